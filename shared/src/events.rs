//! Callback registration for picker lifecycle events.

use crate::calendar::{CalendarCursor, CalendarDate};

#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    Opened,
    Closed,
    /// A day was picked; `value` is what goes into the host input
    Selected { value: String, date: CalendarDate },
    MonthChanged(CalendarCursor),
    /// The popup's subtree was torn down after closing
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&PickerEvent)>;

#[derive(Default)]
pub struct EventEmitter {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl EventEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PickerEvent) + 'static) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &PickerEvent) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
