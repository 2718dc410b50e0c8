//! Validator table and built-in validators.

pub mod args;
pub mod builtin;
pub mod table;

pub use args::ValidatorArgs;
pub use table::{ValidatorFn, ValidatorId, ValidatorTable};
