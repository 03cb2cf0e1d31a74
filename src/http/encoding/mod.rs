pub mod error;
pub mod reply;
