pub mod exchange;
pub mod init;
pub mod misc;
pub mod records;
