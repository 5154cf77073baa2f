pub mod calendar_table;
pub mod date_picker;

pub use calendar_table::CalendarTable;
pub use date_picker::{DatePicker, DatePickerProps};
