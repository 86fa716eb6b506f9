pub mod form;
pub mod init;
pub mod score;
pub mod suggest;
pub mod validate;
