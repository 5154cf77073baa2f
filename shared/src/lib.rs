//! Platform-independent core of the slimpicker date picker.
//!
//! Everything here is plain data and pure functions plus the [`Picker`]
//! controller; the browser shell lives in the `slimpicker` frontend crate.

pub mod calendar;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod grid;
pub mod navigation;
pub mod picker;
pub mod placement;
pub mod timers;

pub use calendar::{is_leap_year, CalendarCursor, CalendarDate, DateContext};
pub use config::{PickerConfig, YearOrder};
pub use error::{PickerError, Result};
pub use events::{EventEmitter, ListenerId, PickerEvent};
pub use format::{format_date, parse_date};
pub use grid::{build_grid, CalendarGrid, DropdownOption, GridCell, GridRow, DAYS_PER_WEEK};
pub use navigation::{Direction, HoverPosition, Key, NavigationState};
pub use picker::{Picker, Visibility};
pub use placement::{compute_placement, DocSize, Horizontal, Placement, Rect, Vertical};
pub use timers::{ManualScheduler, Scheduler, TimerHandle, TimerPurpose, TimerSlots};
