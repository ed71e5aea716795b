//! Data models for the duty scheduling API.
//!
//! Records mirror the server payloads field for field. Status values are kept as
//! the raw server strings and only mapped to typed enums for display and filtering.

mod area;
mod assignment;
mod kind;
mod schedule;
mod student;
mod trade;

pub use area::*;
pub use assignment::*;
pub use kind::*;
pub use schedule::*;
pub use student::*;
pub use trade::*;
