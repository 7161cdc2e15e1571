pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod label;
pub mod model;
pub mod query;
pub mod report;
pub mod results;
pub mod util;

pub use error::{PaletteError, Result};
