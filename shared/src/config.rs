//! Picker configuration.
//!
//! Options are fixed at construction. A host input may carry a JSON object
//! (in its `alt` or `data-picker` attribute) whose keys override the
//! defaults; keys use the same camelCase names as the widget's options.

use chrono::Datelike;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::calendar::LONGEST_MONTHS;
use crate::error::{PickerError, Result};

/// Direction of the year dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum YearOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PickerConfig {
    pub container_class: String,
    pub calendar_class: String,
    pub hover_class: String,
    pub selected_class: String,
    pub today_class: String,
    pub empty_class: String,
    pub day_class: String,
    pub month_class: String,
    pub year_class: String,

    /// Fade in/out duration in milliseconds
    pub fade_duration: u32,
    /// Delay before auto-hiding after the pointer leaves the popup
    pub hide_delay: u32,
    /// How long an open dropdown may keep the popup alive
    pub extended_delay: u32,

    pub show_month: bool,
    pub show_year: bool,
    pub auto_hide: bool,
    /// Flip the popup when it would overflow the document
    pub force_doc_boundary: bool,
    /// Tear the popup down after a selection instead of hiding it
    pub destroy_when_done: bool,

    /// Number of characters of each weekday name shown in the header
    pub day_chars: usize,
    pub month_names: Vec<String>,
    /// Weekday names, Sunday first
    pub day_names: Vec<String>,
    /// February is patched for leap years before each render
    pub days_in_month: Vec<u32>,
    /// Output template; `dd`, `mm` and `yyyy` are substituted
    pub format: String,
    pub year_start: i32,
    pub year_range: i32,
    pub year_order: YearOrder,
    /// 1 = week starts on Monday ... 7 = week starts on Sunday
    pub start_day: u32,

    pub log_level: LevelFilter,
}

impl Default for PickerConfig {
    fn default() -> Self {
        let this_year = chrono::Local::now().year();
        Self {
            container_class: "sp_container".to_string(),
            calendar_class: "sp_cal".to_string(),
            hover_class: "sp_hover".to_string(),
            selected_class: "sp_selected".to_string(),
            today_class: "sp_today".to_string(),
            empty_class: "sp_empty".to_string(),
            day_class: "sp_day".to_string(),
            month_class: "sp_month".to_string(),
            year_class: "sp_year".to_string(),
            fade_duration: 200,
            hide_delay: 500,
            extended_delay: 5000,
            show_month: true,
            show_year: true,
            auto_hide: true,
            force_doc_boundary: true,
            destroy_when_done: false,
            day_chars: 1,
            month_names: [
                "January", "February", "March", "April", "May", "June",
                "July", "August", "September", "October", "November", "December",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            day_names: [
                "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            days_in_month: vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
            format: "mm/dd/yyyy".to_string(),
            year_start: this_year - 5,
            year_range: 10,
            year_order: YearOrder::Asc,
            start_day: 7,
            log_level: LevelFilter::Info,
        }
    }
}

impl PickerConfig {
    /// Overlay the keys present in `json` onto this config.
    ///
    /// Keys missing from the override keep their current value, not the
    /// default. An empty or whitespace-only string is treated as "no override".
    pub fn merge_override(&self, json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(self.clone());
        }

        let overrides: serde_json::Value = serde_json::from_str(json)?;
        let serde_json::Value::Object(overrides) = overrides else {
            return Err(PickerError::InvalidConfig(
                "override must be a JSON object".to_string(),
            ));
        };

        let mut merged = serde_json::to_value(self)?;
        if let serde_json::Value::Object(base) = &mut merged {
            for (key, value) in overrides {
                if !base.contains_key(&key) {
                    log::warn!("Ignoring unknown picker option '{}'", key);
                    continue;
                }
                base.insert(key, value);
            }
        }

        let config: PickerConfig = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.month_names.len() != 12 {
            return Err(invalid(format!(
                "monthNames must have 12 entries, got {}",
                self.month_names.len()
            )));
        }
        if self.day_names.len() != 7 {
            return Err(invalid(format!(
                "dayNames must have 7 entries, got {}",
                self.day_names.len()
            )));
        }
        if self.days_in_month.len() != 12 {
            return Err(invalid(format!(
                "daysInMonth must have 12 entries, got {}",
                self.days_in_month.len()
            )));
        }
        let limits = self.days_in_month.iter().zip(LONGEST_MONTHS.iter());
        for (month, (&days, &longest)) in limits.enumerate() {
            if !(1..=longest).contains(&days) {
                return Err(invalid(format!(
                    "daysInMonth[{}] must be between 1 and {}, got {}",
                    month, longest, days
                )));
            }
        }
        if !(1..=7).contains(&self.start_day) {
            return Err(invalid(format!(
                "startDay must be between 1 and 7, got {}",
                self.start_day
            )));
        }
        if self.day_chars == 0 {
            return Err(invalid("dayChars must be at least 1".to_string()));
        }
        if self.year_start <= 0 {
            return Err(invalid(format!(
                "yearStart must be positive, got {}",
                self.year_start
            )));
        }
        if self.year_range < 0 {
            return Err(invalid(format!(
                "yearRange must not be negative, got {}",
                self.year_range
            )));
        }
        if self.year_order == YearOrder::Desc && self.year_start - self.year_range <= 0 {
            return Err(invalid("descending year range reaches year 0".to_string()));
        }
        let format = self.format.to_ascii_lowercase();
        for token in ["dd", "mm", "yyyy"] {
            if !format.contains(token) {
                return Err(invalid(format!("format '{}' is missing '{}'", self.format, token)));
            }
        }
        Ok(())
    }

    /// Years offered by the year dropdown, in display order
    pub fn year_options(&self) -> Vec<i32> {
        let span = 0..=self.year_range;
        match self.year_order {
            YearOrder::Asc => span.map(|offset| self.year_start + offset).collect(),
            YearOrder::Desc => span.map(|offset| self.year_start - offset).collect(),
        }
    }

    pub fn shows_dropdowns(&self) -> bool {
        self.show_month || self.show_year
    }
}

fn invalid(message: String) -> PickerError {
    PickerError::InvalidConfig(message)
}
