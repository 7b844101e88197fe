mod command_result;
mod context;
pub mod extract;
pub mod helper;
pub mod init;
pub mod populate;

pub use command_result::*;
