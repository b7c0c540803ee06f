mod command_result;
pub mod entries;
pub mod generate;
pub mod init;

pub use command_result::*;
