mod handler;
pub mod model;

pub use handler::{analyze_competitor, analyze_thumbnail};
