//! Observable application state and its persistence

mod snapshot;
mod store;

pub use snapshot::{read_json, write_json_atomic, Snapshot};
pub use store::{AppState, Mutation, StateKey, StateStore, SubscriptionId};
