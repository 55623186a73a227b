pub mod config;
pub mod find;
