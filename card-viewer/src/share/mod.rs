pub mod dialog;
pub mod form;
pub mod scroll_lock;

pub use dialog::{InputProblem, ShareFormDialog};
pub use form::{ContactField, ContactForm};
pub use scroll_lock::{ScrollHost, ScrollLockGuard};
