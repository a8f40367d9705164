//! Progress state, change notification and ETE/ETA math.
//!
//! A [`Progress`] owns a counter, an optional total and a start time taken
//! from its [`crate::clock::Clock`]. Elapsed time, percentage, ETE and ETA are
//! computed from those on every read; nothing derived is cached.

mod interval;
mod notify;
mod state;

pub use interval::{remaining_secs, TimeInterval};
pub use notify::{ChangeCallback, NotifyOptions, ProgressEvent};
pub use state::{Progress, ProgressOptions, ProgressState};
