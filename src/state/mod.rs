//! State management module
//!
//! This module handles admin wizard state and its storage

pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use session::{AdminSession, WizardEffect, WizardInput};
pub use storage::StateStorage;
