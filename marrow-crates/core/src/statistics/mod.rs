//! Contains structures related to the statistic logging of the [`Engine`] and the
//! [`EvLayerGraph`].
mod statistic_logger;
mod statistic_logging;

use std::fmt::Display;

pub use statistic_logger::StatisticLogger;
pub use statistic_logging::StatisticOptions;
pub use statistic_logging::StatisticSink;
pub use statistic_logging::configure_statistic_logging;
pub use statistic_logging::log_statistic;
pub use statistic_logging::log_statistic_postfix;
pub use statistic_logging::should_log_statistics;

#[cfg(doc)]
use crate::decision_diagrams::EvLayerGraph;
#[cfg(doc)]
use crate::engine::Engine;

/// A simple trait for defining a loggable statistic.
///
/// See [`create_statistics_struct!`] for creating a statistic struct automatically!
pub(crate) trait Statistic {
    /// Logs the [`Statistic`] using the provided [`StatisticLogger`].
    fn log(&self, statistic_logger: StatisticLogger);
}

impl<Value: Display> Statistic for Value {
    fn log(&self, statistic_logger: StatisticLogger) {
        statistic_logger.log_statistic(self);
    }
}

/// A macro for generating a struct for storing statistics.
///
/// # Example
/// ```rust,ignore
/// create_statistics_struct!(Statistics {
///     number_of_calls: usize
/// });
///
/// let statistics = Statistics::default();
///
/// assert_eq!(statistics.number_of_calls, 0);
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! create_statistics_struct {
    ($(#[$struct_documentation:meta])* $name:ident { $($(#[$variable_documentation:meta])* $field:ident : $type:ident),+ $(,)? }) => {
        $(#[$struct_documentation])*
        #[derive(Default, Debug, Copy, Clone)]
        pub(crate) struct $name {
            $($(#[$variable_documentation])* pub(crate) $field: $type),+
        }

        impl $crate::statistics::Statistic for $name {
            fn log(&self, statistic_logger: $crate::statistics::StatisticLogger) {
                $($crate::statistics::Statistic::log(&self.$field, statistic_logger.attach_to_prefix(stringify!($field))));+
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;
    use std::sync::Mutex;

    use convert_case::Case;

    use super::*;
    use crate::decision_diagrams::EdgeInfo;
    use crate::decision_diagrams::EvLayerGraph;
    use crate::decision_diagrams::NodeId;

    #[derive(Debug, Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("buffer is not poisoned").write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    // The statistic options are process-wide, so this is the only test which configures them.
    #[test]
    fn configured_statistics_are_written_with_prefix_and_casing() {
        let buffer = SharedBuffer::default();
        let options = StatisticOptions::new("%%%mzn-stat:")
            .with_postfix("%%%mzn-stat-end")
            .with_casing(Case::Camel)
            .with_sink(StatisticSink::Writer(Box::new(buffer.clone())));
        assert!(configure_statistic_logging(options));
        assert!(should_log_statistics());

        let mut graph = EvLayerGraph::default();
        let _ = graph.insert(
            0,
            &[EdgeInfo {
                value: 0,
                weight: 0,
                destination: NodeId::TRUE,
            }],
        );
        graph.log_statistics(StatisticLogger::new(["graph"]));
        log_statistic_postfix();

        let written = String::from_utf8(buffer.0.lock().expect("buffer is not poisoned").clone())
            .expect("statistics are valid UTF-8");
        assert_eq!(
            written,
            "%%%mzn-stat: graphNumInserts=1\n\
             %%%mzn-stat: graphNumCacheHits=0\n\
             %%%mzn-stat: graphNumNodes=3\n\
             %%%mzn-stat: graphNumEdges=1\n\
             %%%mzn-stat-end\n"
        );
    }
}
