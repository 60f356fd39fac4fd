pub mod aggregate;
pub mod chart;
pub mod fetch;
pub mod parse;

pub use parse::{Dataset, Row};
