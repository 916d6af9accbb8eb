mod connect;
mod pool;

pub use connect::connect;
pub use pool::*;
