//! CLI commands

mod check;
mod kinds;

pub use check::{check, CheckArgs};
pub use kinds::{kinds, KindsArgs};

/// Exit status when a record fails validation.
pub const INVALID_EXIT_CODE: u8 = 1;
