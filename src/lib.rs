pub mod api;
pub mod config;
pub mod errors;
pub mod extract;
pub mod render;
pub mod store;
pub mod summary;
