mod random;
mod trail;

pub use random::*;
pub(crate) use trail::*;
