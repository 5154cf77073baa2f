//! Calendar grid layout.
//!
//! Maps a displayed month to rows of seven cells with blank padding before
//! the first and after the last day, honouring the configured week start.

use serde::{Deserialize, Serialize};

use crate::calendar::{
    first_weekday, is_leap_year, CalendarCursor, CalendarDate, DateContext, LONGEST_MONTHS,
};
use crate::config::PickerConfig;
use crate::error::{PickerError, Result};
use crate::navigation::HoverPosition;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridCell {
    Empty,
    Day {
        day: u32,
        is_selected: bool,
        is_today: bool,
    },
}

impl GridCell {
    pub fn day(&self) -> Option<u32> {
        match self {
            GridCell::Day { day, .. } => Some(*day),
            GridCell::Empty => None,
        }
    }
}

pub type GridRow = [GridCell; DAYS_PER_WEEK];

/// One rendered month.
///
/// Row numbering follows the hover convention: row 0 is the header (the
/// month/year dropdowns), content rows are 1..=`row_count()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub cursor: CalendarCursor,
    pub rows: Vec<GridRow>,
    pub days_in_month: u32,
    /// Position of the selected day, when it is in the displayed month
    pub selected: Option<HoverPosition>,
}

impl CalendarGrid {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, position: HoverPosition) -> Option<&GridCell> {
        if position.row == 0 {
            return None;
        }
        self.rows
            .get(position.row - 1)
            .and_then(|row| row.get(position.col))
    }

    /// The date under `position`, if it is a day cell holding a real date
    pub fn date_at(&self, position: HoverPosition) -> Option<CalendarDate> {
        let day = self.cell(position)?.day()?;
        CalendarDate::new(self.cursor.year, self.cursor.month + 1, day).ok()
    }

    /// Number of non-empty cells
    pub fn day_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.day().is_some())
            .count()
    }
}

/// Patch February for `year`, then return the length of `month` (0-based).
pub fn patch_days_in_month(table: &mut [u32], year: i32, month: u32) -> Result<u32> {
    if table.len() != 12 {
        return Err(PickerError::InvalidConfig(format!(
            "daysInMonth must have 12 entries, got {}",
            table.len()
        )));
    }
    table[1] = if is_leap_year(year) { 29 } else { 28 };
    let length = table
        .get(month as usize)
        .copied()
        .ok_or(PickerError::InvalidMonth(month))?;
    if length > LONGEST_MONTHS[month as usize] {
        return Err(PickerError::InvalidConfig(format!(
            "daysInMonth[{}] is {}, past the end of the month",
            month, length
        )));
    }
    Ok(length)
}

/// Lay out `context.cursor`'s month.
///
/// `start_day` uses 1 = Monday .. 7 = Sunday. The leap-year patch is written
/// back into `days_in_month`.
pub fn build_grid(
    context: &DateContext,
    start_day: u32,
    days_in_month: &mut [u32],
) -> Result<CalendarGrid> {
    let cursor = context.cursor;
    if cursor.month > 11 {
        return Err(PickerError::InvalidMonth(cursor.month));
    }
    if !(1..=7).contains(&start_day) {
        return Err(PickerError::InvalidConfig(format!(
            "startDay must be between 1 and 7, got {}",
            start_day
        )));
    }

    let month_length = patch_days_in_month(days_in_month, cursor.year, cursor.month)?;
    let offset = (7 + first_weekday(cursor)? - start_day % 7) % 7;

    let mut rows = Vec::new();
    let mut selected = None;
    let mut current_day = 1 - offset as i64;

    while current_day <= month_length as i64 {
        let mut row = [GridCell::Empty; DAYS_PER_WEEK];
        for (col, cell) in row.iter_mut().enumerate() {
            if current_day > 0 && current_day <= month_length as i64 {
                let date = CalendarDate {
                    year: cursor.year,
                    month: cursor.month + 1,
                    day: current_day as u32,
                };
                let is_selected = context.is_selected(&date);
                if is_selected {
                    selected = Some(HoverPosition {
                        row: rows.len() + 1,
                        col,
                    });
                }
                *cell = GridCell::Day {
                    day: date.day,
                    is_selected,
                    is_today: context.is_today(&date),
                };
            }
            current_day += 1;
        }
        rows.push(row);
    }

    log::debug!(
        "Built grid for {}-{:02}: {} rows, first day offset {}",
        cursor.year,
        cursor.month + 1,
        rows.len(),
        offset
    );

    Ok(CalendarGrid {
        cursor,
        rows,
        days_in_month: month_length,
        selected,
    })
}

/// Weekday labels for the header row, rotated so the configured start day
/// comes first and truncated to `day_chars` characters.
pub fn weekday_labels(config: &PickerConfig) -> Vec<String> {
    (0..DAYS_PER_WEEK)
        .map(|index| {
            let name = &config.day_names[(config.start_day as usize + index) % DAYS_PER_WEEK];
            name.chars().take(config.day_chars).collect()
        })
        .collect()
}

/// An entry in the month or year dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownOption {
    pub value: i32,
    pub label: String,
    pub selected: bool,
}

pub fn month_options(config: &PickerConfig, cursor: CalendarCursor) -> Vec<DropdownOption> {
    config
        .month_names
        .iter()
        .enumerate()
        .map(|(index, name)| DropdownOption {
            value: index as i32,
            label: name.clone(),
            selected: index as u32 == cursor.month,
        })
        .collect()
}

pub fn year_options(config: &PickerConfig, cursor: CalendarCursor) -> Vec<DropdownOption> {
    config
        .year_options()
        .into_iter()
        .map(|year| DropdownOption {
            value: year,
            label: year.to_string(),
            selected: year == cursor.year,
        })
        .collect()
}
