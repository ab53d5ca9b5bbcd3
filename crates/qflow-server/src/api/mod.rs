//! API endpoint handlers.

pub mod backends;
pub mod execute;
pub mod health;
