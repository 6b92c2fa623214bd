pub mod init;
pub mod run;
pub mod serve;
pub mod validate;
