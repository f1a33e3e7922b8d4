pub mod guard;

pub use guard::{admin_guard, requires_session};
