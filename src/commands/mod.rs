pub mod init;
pub mod rank;
