use std::collections::HashMap;

use gloo::timers::callback::Timeout;
use shared::{Scheduler, TimerHandle, TimerPurpose};
use yew::Callback;

/// Scheduler backed by browser timeouts.
///
/// Expiry is reported through `on_fire`; dropping a `Timeout` clears it, so
/// cancelling is just removing it from the map.
pub struct GlooScheduler {
    next_id: u64,
    on_fire: Callback<(TimerPurpose, TimerHandle)>,
    timeouts: HashMap<TimerPurpose, (TimerHandle, Timeout)>,
}

impl GlooScheduler {
    pub fn new(on_fire: Callback<(TimerPurpose, TimerHandle)>) -> Self {
        Self {
            next_id: 0,
            on_fire,
            timeouts: HashMap::new(),
        }
    }
}

impl Scheduler for GlooScheduler {
    fn schedule(&mut self, purpose: TimerPurpose, delay_ms: u32) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let on_fire = self.on_fire.clone();
        let timeout = Timeout::new(delay_ms, move || on_fire.emit((purpose, handle)));
        // Replacing an entry drops (and clears) any spent timeout for the purpose
        self.timeouts.insert(purpose, (handle, timeout));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timeouts.retain(|_, (pending, _)| *pending != handle);
    }
}
