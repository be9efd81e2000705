mod command_result;
pub mod helper;
pub mod init;
pub mod locate;
pub mod query;
pub mod resolve;

pub use command_result::*;
