pub mod field;
pub mod helper;
pub mod token;
