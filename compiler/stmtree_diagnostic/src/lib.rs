//! Diagnostics for faults reported by the statement core.
//!
//! The statement core never renders messages. Fallible operations return
//! a fault kind and a byte offset; this crate maps them to:
//! - Stable error codes for searchability
//! - A message saying what went wrong
//! - A primary label at the exact source location
//! - Suggestions where the fix is mechanical

mod asm;
mod diagnostic;
mod error_code;

pub use asm::{asm_string_diagnostic, asm_string_fault_location};
pub use diagnostic::{internal_error, Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
