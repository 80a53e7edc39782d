pub mod batch_cmd;
pub mod board_cmd;
pub mod completions_cmd;
pub mod config_cmd;
pub mod history_cmd;
pub mod menu;
pub mod search_cmd;
