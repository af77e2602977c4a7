//! Signup Validation Core
//!
//! Pure validation and formatting functions for the bank-account signup form.
//! Every function here is total: validators return `Ok(())` or the French
//! message to display, transforms always return a value.
//! Used by the rule engine, the WASM bindings and the CLI.

pub mod code;
pub mod date;
pub mod email;
pub mod string;

// Re-export all validators
pub use code::*;
pub use date::*;
pub use email::*;
pub use string::*;
