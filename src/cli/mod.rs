pub mod config_cmd;
pub mod generate_cmd;
pub mod models_cmd;
pub mod output;
pub mod renderer;
