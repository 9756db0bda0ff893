pub mod add;
pub mod common;
pub mod completions;
pub mod config;
pub mod delete;
pub mod edit;
pub mod labels;
pub mod list;
pub mod shell;
pub mod toggle;
