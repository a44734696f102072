//! Domain models
//!
//! Write input is validated on the raw JSON record before it becomes a
//! typed [`NewBook`]. Invalid input yields a [`ValidationReport`], not a panic.

pub mod book;
pub mod validation;

pub use book::{Book, Envelope, NewBook};
pub use validation::{validate, ValidationReport};
