pub mod calculator;
pub mod comparator;
pub mod error;
pub mod logger;
pub mod summarize;
pub mod units;

pub use calculator::{builder::CalculatorBuilder, engine::Calculator, state::Catalog};
pub use error::CalmagError;
