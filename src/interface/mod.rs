pub mod config;
pub mod helper;
pub mod page;
pub mod template;
