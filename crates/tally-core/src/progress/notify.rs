//! Throttled change notification.
//!
//! Each event kind has at most one subscription. Registering again replaces
//! it. A fire is dropped (not queued) when the subscription's minimum interval
//! has not elapsed since the last fire that actually ran.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use super::state::ProgressState;
use crate::error::ProgressError;

/// Events a [`crate::Progress`] raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressEvent {
    /// Counter or total was set or incremented.
    Change,
}

/// Per-subscription options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyOptions {
    /// Minimum milliseconds between two callback invocations.
    pub min_interval_ms: Option<u64>,
}

impl NotifyOptions {
    pub fn throttled(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms: Some(min_interval_ms),
        }
    }
}

/// Callback invoked with read-only access to the state for the duration of the call.
pub type ChangeCallback = Box<dyn FnMut(&ProgressState) -> anyhow::Result<()> + Send>;

struct Subscription {
    callback: ChangeCallback,
    min_interval: Option<Duration>,
    last_fired: Option<DateTime<Utc>>,
}

impl Subscription {
    fn is_throttled(&self, now: DateTime<Utc>) -> bool {
        match (self.min_interval, self.last_fired) {
            (Some(min), Some(last)) => now - last < min,
            _ => false,
        }
    }
}

/// Fixed map from event kind to its optional subscription.
#[derive(Default)]
pub(crate) struct ChangeNotifier {
    change: Option<Subscription>,
}

impl ChangeNotifier {
    fn slot_mut(&mut self, kind: ProgressEvent) -> &mut Option<Subscription> {
        match kind {
            ProgressEvent::Change => &mut self.change,
        }
    }

    pub(crate) fn subscribe(
        &mut self,
        kind: ProgressEvent,
        callback: ChangeCallback,
        options: NotifyOptions,
    ) {
        let min_interval = options.min_interval_ms.map(|ms| {
            i64::try_from(ms)
                .ok()
                .and_then(Duration::try_milliseconds)
                .unwrap_or(Duration::MAX)
        });
        let replaced = self
            .slot_mut(kind)
            .replace(Subscription {
                callback,
                min_interval,
                last_fired: None,
            })
            .is_some();
        tracing::debug!(
            event = ?kind,
            min_interval_ms = options.min_interval_ms,
            replaced,
            "subscription registered"
        );
    }

    pub(crate) fn is_subscribed(&self, kind: ProgressEvent) -> bool {
        match kind {
            ProgressEvent::Change => self.change.is_some(),
        }
    }

    /// Run the subscription's callback unless it is throttled. `last_fired`
    /// is stamped before the callback runs, so a failing callback still counts
    /// as a fire.
    pub(crate) fn raise(
        &mut self,
        kind: ProgressEvent,
        state: &ProgressState,
    ) -> Result<(), ProgressError> {
        let Some(sub) = self.slot_mut(kind).as_mut() else {
            return Ok(());
        };
        let now = state.now();
        if sub.is_throttled(now) {
            tracing::trace!(event = ?kind, counter = state.counter(), "notification suppressed");
            return Ok(());
        }
        sub.last_fired = Some(now);
        tracing::trace!(event = ?kind, counter = state.counter(), "notification fired");
        (sub.callback)(state).map_err(ProgressError::Callback)
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("change", &self.change.as_ref().map(|s| s.last_fired))
            .finish()
    }
}
