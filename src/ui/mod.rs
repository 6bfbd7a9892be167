//! Presentation layer
//!
//! Texts, reply keyboard labels, inline callback payloads and keyboards.
//! Handlers decode labels and payloads here; the access and approval
//! services only deal with ids and decisions.

pub mod callback;
pub mod keyboards;
pub mod menu;
pub mod texts;

pub use callback::CallbackData;
pub use menu::MenuCommand;
