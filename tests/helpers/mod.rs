//! Test helpers module
//!
//! Mock Telegram server and a ready-to-use service context for the
//! integration tests.

#![allow(dead_code)]

pub mod telegram_mock;
pub mod test_context;

#[allow(unused_imports)]
pub use telegram_mock::*;
#[allow(unused_imports)]
pub use test_context::*;
