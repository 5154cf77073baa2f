//! Output formatting for picked dates and the matching parser used to read
//! an existing value back out of the host input.

use chrono::NaiveDate;

use crate::calendar::{CalendarDate, DateContext};
use crate::error::{PickerError, Result};

/// Render a date through a template such as `mm/dd/yyyy`.
///
/// Day and month are zero-padded to two digits. Each of `dd`, `mm` and
/// `yyyy` is matched case-insensitively and replaced once, in that order;
/// everything else in the template is copied through.
pub fn format_date(year: i32, month: u32, day: u32, template: &str) -> Result<String> {
    if !(1..=12).contains(&month) {
        return Err(PickerError::InvalidMonth(month));
    }
    let day = format!("{:02}", day);
    let month = format!("{:02}", month);
    let year = year.to_string();

    let output = replace_first_ignore_case(template, "dd", &day);
    let output = replace_first_ignore_case(&output, "mm", &month);
    Ok(replace_first_ignore_case(&output, "yyyy", &year))
}

impl DateContext {
    /// Format `date` and make it the current selection
    pub fn format_and_commit(&mut self, date: CalendarDate, template: &str) -> Result<String> {
        let value = format_date(date.year, date.month, date.day, template)?;
        self.commit(date);
        Ok(value)
    }
}

fn replace_first_ignore_case(haystack: &str, token: &str, value: &str) -> String {
    // ASCII lowercasing keeps byte offsets stable
    match haystack.to_ascii_lowercase().find(token) {
        Some(start) => {
            let end = start + token.len();
            format!("{}{}{}", &haystack[..start], value, &haystack[end..])
        }
        None => haystack.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Day,
    Month,
    Year,
}

enum Piece {
    Literal(char),
    Field(Field),
}

fn tokenize(template: &str) -> Vec<Piece> {
    let lower = template.to_ascii_lowercase();
    let mut pieces = Vec::new();
    let mut seen = Vec::new();
    let mut rest = lower.as_str();
    let mut raw = template;

    while !rest.is_empty() {
        let field = [("yyyy", Field::Year), ("dd", Field::Day), ("mm", Field::Month)]
            .into_iter()
            .find(|(token, field)| rest.starts_with(token) && !seen.contains(field));

        if let Some((token, field)) = field {
            seen.push(field);
            pieces.push(Piece::Field(field));
            rest = &rest[token.len()..];
            raw = &raw[token.len()..];
        } else if let Some(c) = raw.chars().next() {
            pieces.push(Piece::Literal(c));
            rest = &rest[c.len_utf8()..];
            raw = &raw[c.len_utf8()..];
        } else {
            break;
        }
    }
    pieces
}

/// Parse a value written with `template`, falling back to ISO `yyyy-mm-dd`.
pub fn parse_date(value: &str, template: &str) -> Result<CalendarDate> {
    if let Some(date) = parse_with_template(value, template) {
        return Ok(date);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(CalendarDate::from)
        .map_err(|_| PickerError::UnparseableDate(value.to_string()))
}

fn parse_with_template(value: &str, template: &str) -> Option<CalendarDate> {
    let (mut year, mut month, mut day) = (None, None, None);
    let mut input = value;

    for piece in tokenize(template) {
        match piece {
            Piece::Literal(c) => {
                input = input.strip_prefix(c)?;
            }
            Piece::Field(field) => {
                let max_digits = if field == Field::Year { 4 } else { 2 };
                let digits = input
                    .chars()
                    .take(max_digits)
                    .take_while(|c| c.is_ascii_digit())
                    .count();
                if digits == 0 || (field == Field::Year && digits != max_digits) {
                    return None;
                }
                let number: u32 = input[..digits].parse().ok()?;
                input = &input[digits..];
                match field {
                    Field::Year => year = Some(number as i32),
                    Field::Month => month = Some(number),
                    Field::Day => day = Some(number),
                }
            }
        }
    }

    if !input.is_empty() {
        return None;
    }
    CalendarDate::new(year?, month?, day?).ok()
}
