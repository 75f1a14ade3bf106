//! API middleware stack.
//!
//! Execution order (outermost → innermost):
//! 1. Audit logger — logs every request with its status
//! 2. Auth validator — admin bearer token (protected routes only)

pub mod audit;
pub mod auth;
