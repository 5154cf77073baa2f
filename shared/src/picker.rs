//! The picker controller.
//!
//! Owns the date context, the rendered grid, hover state and timers, and
//! exposes one method per user interaction. The DOM shell renders from the
//! accessors and forwards events; nothing in here touches the page.

use crate::calendar::{CalendarCursor, CalendarDate, DateContext};
use crate::config::PickerConfig;
use crate::error::Result;
use crate::events::{EventEmitter, ListenerId, PickerEvent};
use crate::grid::{self, build_grid, CalendarGrid, DropdownOption};
use crate::navigation::{HoverPosition, Key, NavigationState};
use crate::placement::{compute_placement, DocSize, Placement, Rect};
use crate::timers::{Scheduler, TimerHandle, TimerPurpose, TimerSlots};

/// Lifecycle of the popup's DOM subtree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Not created yet, or destroyed after a selection
    Detached,
    Shown,
    FadingOut,
    /// Faded out and kept for reuse
    Hidden,
}

pub struct Picker<S: Scheduler> {
    config: PickerConfig,
    context: DateContext,
    grid: Option<CalendarGrid>,
    navigation: NavigationState,
    open: bool,
    dropdown_showing: bool,
    visibility: Visibility,
    /// Bumped on every draw so the shell knows when to re-measure
    generation: u64,
    timers: TimerSlots<S>,
    events: EventEmitter,
}

impl<S: Scheduler> Picker<S> {
    /// Create a picker for a host input currently holding `input_value`
    pub fn new(
        config: PickerConfig,
        input_value: &str,
        today: CalendarDate,
        scheduler: S,
    ) -> Result<Self> {
        config.validate()?;
        let context = DateContext::from_input(input_value, today, &config.format);
        log::debug!(
            "Picker created with current date {} (today {})",
            context.current,
            context.now
        );

        Ok(Self {
            config,
            context,
            grid: None,
            navigation: NavigationState::new(0),
            open: false,
            dropdown_showing: false,
            visibility: Visibility::Detached,
            generation: 0,
            timers: TimerSlots::new(scheduler),
            events: EventEmitter::new(),
        })
    }

    /// Open the popup. Returns false if it was already open.
    pub fn show(&mut self) -> Result<bool> {
        if self.open {
            return Ok(false);
        }
        self.open = true;
        self.timers.cancel(TimerPurpose::Fade);
        if self.visibility == Visibility::Detached {
            log::debug!("Creating calendar container");
        }
        self.visibility = Visibility::Shown;
        self.draw()?;
        self.events.emit(&PickerEvent::Opened);
        Ok(true)
    }

    pub fn close(&mut self) {
        self.open = false;
        self.dropdown_showing = false;
        self.timers.cancel(TimerPurpose::AutoHide);
        self.timers.cancel(TimerPurpose::Extended);
        if matches!(self.visibility, Visibility::Detached | Visibility::Hidden) {
            return;
        }
        self.visibility = Visibility::FadingOut;
        self.timers.start(TimerPurpose::Fade, self.config.fade_duration);
        self.events.emit(&PickerEvent::Closed);
    }

    /// Rebuild the grid for the current cursor and re-seat the hover
    pub fn draw(&mut self) -> Result<()> {
        let grid = build_grid(
            &self.context,
            self.config.start_day,
            &mut self.config.days_in_month,
        )?;
        self.navigation.reset_for(&grid);
        self.grid = Some(grid);
        self.generation += 1;
        Ok(())
    }

    /// Route a scheduler expiry. Stale handles are ignored.
    pub fn timer_fired(&mut self, purpose: TimerPurpose, handle: TimerHandle) {
        if !self.timers.claim(purpose, handle) {
            return;
        }
        match purpose {
            TimerPurpose::AutoHide => {
                log::debug!("Auto-hiding calendar");
                self.close();
            }
            TimerPurpose::Extended => {
                log::debug!("Dropdown left open too long, closing calendar");
                self.close();
            }
            TimerPurpose::Fade => self.finish_fade(),
        }
    }

    fn finish_fade(&mut self) {
        if self.visibility != Visibility::FadingOut {
            return;
        }
        if self.config.destroy_when_done {
            self.visibility = Visibility::Detached;
            self.grid = None;
            self.events.emit(&PickerEvent::Destroyed);
        } else {
            self.visibility = Visibility::Hidden;
        }
    }

    /// Handle a normalised key. Returns true when the key was consumed and
    /// its default action should be suppressed.
    pub fn handle_key(&mut self, key: Key) -> Result<bool> {
        if !self.open {
            return Ok(false);
        }
        match key {
            Key::Enter => {
                self.select_hovered()?;
                Ok(true)
            }
            Key::Esc => {
                self.close();
                Ok(true)
            }
            // Let focus move on
            Key::Tab => {
                self.close();
                Ok(false)
            }
            Key::Arrow(direction) => {
                self.navigation.move_hover(direction);
                Ok(true)
            }
            Key::PageUp => {
                self.show_previous_month()?;
                Ok(true)
            }
            Key::PageDown => {
                self.show_next_month()?;
                Ok(true)
            }
        }
    }

    /// Pick whatever day is hovered. No-op on the header row or a blank cell.
    pub fn select_hovered(&mut self) -> Result<Option<String>> {
        let date = self
            .navigation
            .hovered_cell()
            .and_then(|position| self.grid.as_ref()?.date_at(position));
        match date {
            Some(date) => self.select(date).map(Some),
            None => Ok(None),
        }
    }

    /// A day cell was clicked; `month` is 1-12
    pub fn click_day(&mut self, year: i32, month: u32, day: u32) -> Result<String> {
        let date = CalendarDate::new(year, month, day)?;
        self.select(date)
    }

    fn select(&mut self, date: CalendarDate) -> Result<String> {
        let value = self.context.format_and_commit(date, &self.config.format)?;
        log::info!("Selected {} -> '{}'", date, value);
        self.events.emit(&PickerEvent::Selected {
            value: value.clone(),
            date,
        });
        self.close();
        Ok(value)
    }

    /// The month or year dropdown changed; `month` is 0-11
    pub fn select_month_year(&mut self, month: u32, year: i32) -> Result<()> {
        let cursor = CalendarCursor::new(year, month)?;
        self.dropdown_showing = false;
        self.timers.cancel(TimerPurpose::Extended);
        self.move_cursor(cursor)
    }

    pub fn show_previous_month(&mut self) -> Result<()> {
        self.move_cursor(self.context.cursor.prev_month())
    }

    pub fn show_next_month(&mut self) -> Result<()> {
        self.move_cursor(self.context.cursor.next_month())
    }

    fn move_cursor(&mut self, cursor: CalendarCursor) -> Result<()> {
        self.context.cursor = cursor;
        self.draw()?;
        self.events.emit(&PickerEvent::MonthChanged(cursor));
        Ok(())
    }

    pub fn pointer_enter(&mut self) {
        self.timers.cancel(TimerPurpose::AutoHide);
    }

    pub fn pointer_leave(&mut self) {
        if self.open && self.config.auto_hide && !self.dropdown_showing {
            self.timers.start(TimerPurpose::AutoHide, self.config.hide_delay);
        }
    }

    /// A month/year dropdown gained focus
    pub fn dropdown_focus(&mut self) {
        self.dropdown_showing = true;
        self.timers.cancel(TimerPurpose::AutoHide);
        self.timers.start(TimerPurpose::Extended, self.config.extended_delay);
    }

    /// Work out how the calendar should be anchored
    pub fn place(&self, anchor: Rect, popup: Rect, doc: DocSize) -> Placement {
        if self.config.force_doc_boundary {
            compute_placement(anchor, popup, doc)
        } else {
            Placement::NATURAL
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&PickerEvent) + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn weekday_labels(&self) -> Vec<String> {
        grid::weekday_labels(&self.config)
    }

    pub fn month_options(&self) -> Vec<DropdownOption> {
        grid::month_options(&self.config, self.context.cursor)
    }

    pub fn year_options(&self) -> Vec<DropdownOption> {
        grid::year_options(&self.config, self.context.cursor)
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn context(&self) -> &DateContext {
        &self.context
    }

    pub fn grid(&self) -> Option<&CalendarGrid> {
        self.grid.as_ref()
    }

    pub fn hovered(&self) -> Option<HoverPosition> {
        self.navigation.hovered_cell()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_dropdown_showing(&self) -> bool {
        self.dropdown_showing
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn timers(&self) -> &TimerSlots<S> {
        &self.timers
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.timers.scheduler_mut()
    }
}
