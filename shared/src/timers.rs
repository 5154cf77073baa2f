//! Cancellable timeouts.
//!
//! The picker keeps at most one pending timeout per [`TimerPurpose`].
//! Starting a purpose that is already pending cancels the old handle first.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    /// Closes the popup after the pointer has left it
    AutoHide,
    /// Force-closes the popup while a dropdown is open
    Extended,
    /// Completion of the fade-out transition
    Fade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u64);

/// Something that can run a callback after a delay.
///
/// Implementations report expiry back to the owner by calling
/// `Picker::timer_fired` with the purpose and handle.
pub trait Scheduler {
    fn schedule(&mut self, purpose: TimerPurpose, delay_ms: u32) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Tracks the outstanding handle for each purpose
pub struct TimerSlots<S: Scheduler> {
    scheduler: S,
    pending: HashMap<TimerPurpose, TimerHandle>,
}

impl<S: Scheduler> TimerSlots<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: HashMap::new(),
        }
    }

    pub fn start(&mut self, purpose: TimerPurpose, delay_ms: u32) -> TimerHandle {
        self.cancel(purpose);
        let handle = self.scheduler.schedule(purpose, delay_ms);
        self.pending.insert(purpose, handle);
        handle
    }

    pub fn cancel(&mut self, purpose: TimerPurpose) {
        if let Some(handle) = self.pending.remove(&purpose) {
            self.scheduler.cancel(handle);
        }
    }

    pub fn is_pending(&self, purpose: TimerPurpose) -> bool {
        self.pending.contains_key(&purpose)
    }

    /// Claim an expiry. Returns false for a handle that was cancelled or
    /// replaced, which the caller should ignore.
    pub fn claim(&mut self, purpose: TimerPurpose, handle: TimerHandle) -> bool {
        if self.pending.get(&purpose) == Some(&handle) {
            self.pending.remove(&purpose);
            true
        } else {
            false
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

/// A scheduler driven by hand, for hosts without an event loop and for tests
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now_ms: u64,
    next_id: u64,
    queued: Vec<(u64, TimerPurpose, TimerHandle)>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock, returning the timers that expired in due order
    pub fn advance(&mut self, ms: u64) -> Vec<(TimerPurpose, TimerHandle)> {
        self.now_ms += ms;
        let now = self.now_ms;
        let mut due: Vec<_> = self.queued.iter().filter(|(at, _, _)| *at <= now).copied().collect();
        self.queued.retain(|(at, _, _)| *at > now);
        due.sort_by_key(|(at, _, handle)| (*at, handle.0));
        due.into_iter().map(|(_, purpose, handle)| (purpose, handle)).collect()
    }

    pub fn pending_count(&self) -> usize {
        self.queued.len()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, purpose: TimerPurpose, delay_ms: u32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.queued.push((self.now_ms + delay_ms as u64, purpose, handle));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.queued.retain(|(_, _, queued)| *queued != handle);
    }
}
