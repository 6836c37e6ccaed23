//! Event scripts for driving a simulated session.

pub mod loader;
pub mod script;
