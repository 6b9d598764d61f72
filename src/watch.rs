//! Watch runtime: change events, debouncing, and the refresh daemon.

mod debounce;
mod events;
mod runtime;

pub use debounce::{DebounceState, Debouncer};
pub use events::{classify_event, ChangeEvent, WatchConfig};
pub use runtime::{WatchDaemon, WatchHandle};
