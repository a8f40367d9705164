//! Counter/total state and the `Progress` handle that mutates it.

use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use super::interval::{self, TimeInterval};
use super::notify::{ChangeNotifier, NotifyOptions, ProgressEvent};
use crate::clock::{Clock, SystemClock};
use crate::config::TallyConfig;
use crate::error::ProgressError;
use crate::format::{self, NumberLocale, ProgressUnit};

/// Construction parameters for [`Progress`].
#[derive(Clone, Default)]
pub struct ProgressOptions {
    total: Option<u64>,
    locale: Option<String>,
    unit: ProgressUnit,
    clock: Option<Arc<dyn Clock>>,
}

impl ProgressOptions {
    pub fn total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Locale identifier for digit grouping, e.g. `de-DE`.
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn unit(mut self, unit: ProgressUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Time source; defaults to [`SystemClock`].
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Locale and unit from configuration.
    pub fn from_config(cfg: &TallyConfig) -> Self {
        let mut options = Self::default().unit(cfg.unit.unwrap_or_default());
        if let Some(locale) = &cfg.locale {
            options = options.locale(locale.clone());
        }
        options
    }
}

/// Read side of a progress tracker. Change callbacks receive this.
pub struct ProgressState {
    counter: u64,
    total: Option<u64>,
    start_time: DateTime<Utc>,
    locale: Option<NumberLocale>,
    unit: ProgressUnit,
    clock: Arc<dyn Clock>,
}

impl ProgressState {
    fn new(options: ProgressOptions) -> Self {
        let clock = options.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Self {
            counter: 0,
            total: options.total,
            start_time: clock.now(),
            locale: options.locale.as_deref().map(NumberLocale::parse),
            unit: options.unit,
            clock,
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total
    }

    /// `counter / total * 100`, not clamped. `None` when the total is unknown
    /// or zero.
    pub fn percentage_completed(&self) -> Option<f64> {
        match self.total {
            Some(total) if total > 0 => Some(self.counter as f64 / total as f64 * 100.0),
            _ => None,
        }
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Time since construction, never negative.
    pub fn elapsed_time(&self) -> Duration {
        self.elapsed_at(self.now())
    }

    pub fn locale(&self) -> Option<&NumberLocale> {
        self.locale.as_ref()
    }

    pub fn unit(&self) -> ProgressUnit {
        self.unit
    }

    /// Projected remaining time, re-sampled on every call. `None` when the
    /// total is unknown or nothing has been counted yet.
    pub fn calculate_estimated_time_enroute(&self) -> Option<TimeInterval> {
        self.ete_at(self.now())
    }

    /// `now + ETE`, re-sampled on every call.
    pub fn calculate_estimated_time_of_arrival(&self) -> Option<DateTime<Utc>> {
        self.eta_at(self.now())
    }

    /// Format a value with this tracker's locale and unit.
    pub fn format_value(&self, value: u64) -> String {
        format::format_value(value, self.locale.as_ref(), self.unit)
    }

    /// Render `template` (or the default template) with the current values.
    pub fn to_formatted_string(&self, template: Option<&str>) -> String {
        format::render_status(
            self,
            template.unwrap_or(format::DEFAULT_TEMPLATE),
            self.now(),
        )
    }

    pub(crate) fn elapsed_at(&self, now: DateTime<Utc>) -> Duration {
        (now - self.start_time).max(Duration::zero())
    }

    pub(crate) fn ete_at(&self, now: DateTime<Utc>) -> Option<TimeInterval> {
        let elapsed_secs = u64::try_from(self.elapsed_at(now).num_seconds()).unwrap_or(0);
        if let Some(total) = self.total {
            if self.counter > total {
                tracing::debug!(
                    counter = self.counter,
                    total,
                    "counter exceeds total, estimate clamped to zero"
                );
            }
        }
        interval::remaining_secs(elapsed_secs, self.counter, self.total)
            .map(TimeInterval::from_secs)
    }

    pub(crate) fn eta_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let ete = self.ete_at(now)?;
        now.checked_add_signed(ete.to_duration())
    }
}

impl fmt::Debug for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressState")
            .field("counter", &self.counter)
            .field("total", &self.total)
            .field("start_time", &self.start_time)
            .field("locale", &self.locale.as_ref().map(NumberLocale::tag))
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

/// Status line with the default template.
impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formatted_string(None))
    }
}

/// Progress tracker: owns the state and the change subscription.
///
/// Reads go through [`ProgressState`], which `Progress` dereferences to.
/// Mutations raise [`ProgressEvent::Change`] synchronously on the caller's
/// thread; a failing callback surfaces as [`ProgressError::Callback`] after the
/// mutation has been applied.
#[derive(Debug)]
pub struct Progress {
    state: ProgressState,
    notifier: ChangeNotifier,
}

impl Progress {
    pub fn new(options: ProgressOptions) -> Self {
        Self {
            state: ProgressState::new(options),
            notifier: ChangeNotifier::default(),
        }
    }

    pub fn with_total(total: u64) -> Self {
        Self::new(ProgressOptions::default().total(total))
    }

    pub fn increment_counter(&mut self) -> Result<(), ProgressError> {
        self.state.counter = self.state.counter.saturating_add(1);
        self.notify()
    }

    /// Add `n` to the counter in one step (one notification).
    pub fn advance(&mut self, n: u64) -> Result<(), ProgressError> {
        self.state.counter = self.state.counter.saturating_add(n);
        self.notify()
    }

    /// Fires a change even when `value` equals the current counter.
    pub fn set_counter(&mut self, value: i64) -> Result<(), ProgressError> {
        let value = u64::try_from(value).map_err(|_| ProgressError::negative("counter"))?;
        self.state.counter = value;
        self.notify()
    }

    pub fn set_total(&mut self, value: i64) -> Result<(), ProgressError> {
        let value = u64::try_from(value).map_err(|_| ProgressError::negative("total count"))?;
        self.state.total = Some(value);
        self.notify()
    }

    /// Register `callback` for `kind`, replacing any earlier one. The first
    /// change after registration always fires.
    pub fn on<F>(&mut self, kind: ProgressEvent, callback: F, options: NotifyOptions)
    where
        F: FnMut(&ProgressState) -> anyhow::Result<()> + Send + 'static,
    {
        self.notifier.subscribe(kind, Box::new(callback), options);
    }

    pub fn is_subscribed(&self, kind: ProgressEvent) -> bool {
        self.notifier.is_subscribed(kind)
    }

    fn notify(&mut self) -> Result<(), ProgressError> {
        self.notifier.raise(ProgressEvent::Change, &self.state)
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(ProgressOptions::default())
    }
}

impl Deref for Progress {
    type Target = ProgressState;

    fn deref(&self) -> &ProgressState {
        &self.state
    }
}
