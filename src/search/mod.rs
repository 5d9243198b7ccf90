//! Live search overlay.
//!
//! Split in three layers:
//!
//! - [`machine`]: Pure transition logic over [`SearchState`], emitting commands
//! - [`live`]: The async driver that owns the debounce timer and the in-flight
//!   request and runs the machine's commands
//! - [`overlay`]: Mounts/unmounts the driver following `is_search_open`

pub mod live;
pub mod machine;
pub mod overlay;
pub mod state;

pub use live::{LiveSearch, DEFAULT_DEBOUNCE};
pub use machine::{SearchCommand, SearchMachine};
pub use overlay::SearchOverlay;
pub use state::{SearchState, Show};
