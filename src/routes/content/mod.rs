mod handler;
pub mod model;

pub use handler::{
    generate_description,
    generate_hashtags,
    generate_hooks,
    generate_script,
    generate_titles,
};
