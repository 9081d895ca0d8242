//! One-shot deferred events
//!
//! A scheduled event is a value that becomes ready at `created_at + delay`.
//! The owner polls it against the current clock each tick instead of
//! registering a callback, so nothing fires re-entrantly.

/// A scheduled one-shot event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerHandle<E> {
    created_at_ms: u64,
    delay_ms: u64,
    event: Option<E>,
}

/// Schedule `event` to fire once, `delay_ms` after `now_ms`
pub fn schedule_once<E>(event: E, delay_ms: u64, now_ms: u64) -> TimerHandle<E> {
    TimerHandle {
        created_at_ms: now_ms,
        delay_ms,
        event: Some(event),
    }
}

impl<E> TimerHandle<E> {
    pub fn created_at_ms(&self) -> u64 {
        self.created_at_ms
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Clock time at which the event becomes ready
    pub fn due_at_ms(&self) -> u64 {
        self.created_at_ms.saturating_add(self.delay_ms)
    }

    /// Whether the event is ready and has not fired yet
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.event.is_some() && now_ms >= self.due_at_ms()
    }

    pub fn has_fired(&self) -> bool {
        self.event.is_none()
    }

    /// The pending event, without firing it
    pub fn event(&self) -> Option<&E> {
        self.event.as_ref()
    }

    /// Fire the event if it is due. Yields it at most once.
    pub fn poll(&mut self, now_ms: u64) -> Option<E> {
        if self.is_due(now_ms) {
            self.event.take()
        } else {
            None
        }
    }
}
