pub mod billing;
pub mod contact;
pub mod error;
