//! Command implementations for bookstore CLI

pub mod invoke;
pub mod lambda;
pub mod serve;
pub mod validate;

// Re-export main dispatcher functions for flat access from main.rs
pub use invoke::run_invoke;
pub use lambda::run_lambda;
pub use serve::run_serve;
pub use validate::run_validate;
