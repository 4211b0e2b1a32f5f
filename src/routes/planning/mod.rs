mod handler;
pub mod model;

pub use handler::{find_niches, find_trends, generate_calendar};
