pub mod openrouter;
pub mod transport;
