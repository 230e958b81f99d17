//! Cancel-and-reschedule debouncing of rapidly changing input.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// Holds the latest input until it has been stable for `delay`.
///
/// Every [`Debouncer::push`] replaces the pending value and restarts the
/// timer, so a burst of input yields a single value from [`Debouncer::poll`].
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules `value` to fire `delay` after `now`, superseding any pending value.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            value,
            deadline: now + self.delay,
        });
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Instant at which the pending value fires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the pending value once its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.cancel()
        } else {
            None
        }
    }
}

/// Debounces a time-ordered input stream.
///
/// Each emitted value is tagged with the instant it fires. A value fires when
/// no newer input arrives before its deadline; the final value always fires.
pub fn debounce<T, I>(events: I, delay: Duration) -> Vec<(Instant, T)>
where
    I: IntoIterator<Item = (Instant, T)>,
{
    let mut debouncer = Debouncer::new(delay);
    let mut fired = Vec::new();

    for (at, value) in events {
        if let (Some(deadline), Some(previous)) = (debouncer.deadline(), debouncer.poll(at)) {
            fired.push((deadline, previous));
        }
        debouncer.push(value, at);
    }

    if let (Some(deadline), Some(last)) = (debouncer.deadline(), debouncer.cancel()) {
        fired.push((deadline, last));
    }

    fired
}
