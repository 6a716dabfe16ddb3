pub mod export;
pub mod init;
pub mod models;
pub mod run;
