pub mod chart;
pub mod frame;
pub mod period;
pub mod selection;
pub mod series;
pub mod table;

pub use chart::*;
pub use frame::*;
pub use period::*;
pub use selection::*;
pub use series::*;
pub use table::*;
