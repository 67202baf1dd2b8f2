pub mod cost;
pub mod post;
pub mod record;
pub mod request;
pub mod usage;
