pub mod cipher;
pub mod cli;
pub mod random;
