//! Small shared helpers

mod debounce;
mod retry;

pub use debounce::Debouncer;
pub use retry::retry_with_backoff;
