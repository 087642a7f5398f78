pub mod logger;
pub mod rolling;

pub use logger::*;
pub use rolling::*;
