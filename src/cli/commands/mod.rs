mod context;
pub mod init;
pub mod pull;
pub mod push;
