pub mod chart_builder;
pub mod pipeline;
pub mod transformer;

pub use chart_builder::*;
pub use pipeline::*;
pub use transformer::*;
