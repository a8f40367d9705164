//! Human-readable rendering: values, locales and the status line.

mod locale;
mod status;
mod value;

pub use locale::NumberLocale;
pub use status::{format_eta, render_status, DEFAULT_TEMPLATE};
pub use value::{format_value, ProgressUnit};
