mod trailed_change;
mod trailed_integer;
mod trailed_values;

pub(crate) use trailed_change::*;
pub use trailed_integer::*;
pub use trailed_values::*;
