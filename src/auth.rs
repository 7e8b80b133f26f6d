//! Credential and token models used while assembling authorization headers.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
