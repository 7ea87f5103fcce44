#[macro_use]
mod macros;

pub mod consumption;
pub mod cost;
pub mod months;
pub mod price;
