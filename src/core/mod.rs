pub mod completion;
pub mod config;
pub mod cost;
pub mod formatter;
pub mod generator;
pub mod models;
pub mod prompt;
pub mod providers;
pub mod sink;
