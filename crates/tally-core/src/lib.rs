//! Progress tracking with live elapsed time, ETE/ETA and a formatted status line.
//!
//! ```
//! use tally_core::{Progress, ProgressOptions, ProgressUnit};
//!
//! let mut progress = Progress::new(ProgressOptions::default().unit(ProgressUnit::Byte));
//! progress.set_counter(2_000).unwrap();
//! assert_eq!(progress.format_value(progress.counter()), "1.95 KiB");
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod progress;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::ProgressError;
pub use format::{NumberLocale, ProgressUnit};
pub use progress::{
    NotifyOptions, Progress, ProgressEvent, ProgressOptions, ProgressState, TimeInterval,
};
