use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Emits a value once it has been stable for `delay`, skipping repeats of the
/// last emitted value.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
    last_emitted: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            last_emitted: None,
        }
    }

    /// Records a change; any earlier pending value is superseded.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Whether `poll(now)` would emit a value.
    pub fn is_due(&self, now: Instant) -> bool {
        match &self.pending {
            Some((value, deadline)) => *deadline <= now && self.last_emitted.as_ref() != Some(value),
            None => false,
        }
    }

    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {}
            _ => return None,
        }
        let (value, _) = self.pending.take()?;
        if self.last_emitted.as_ref() == Some(&value) {
            return None;
        }
        self.last_emitted = Some(value.clone());
        Some(value)
    }

    /// Drops any pending change and treats `value` as already emitted.
    pub fn reset(&mut self, value: T) {
        self.pending = None;
        self.last_emitted = Some(value);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}
