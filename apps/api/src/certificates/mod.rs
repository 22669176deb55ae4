pub mod archive;
pub mod handlers;
pub mod repo;
