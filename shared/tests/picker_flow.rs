use std::cell::RefCell;
use std::rc::Rc;

use shared::{
    CalendarCursor, CalendarDate, Direction, DocSize, Horizontal, HoverPosition, Key,
    ManualScheduler, Picker, PickerConfig, PickerError, PickerEvent, Rect, TimerPurpose, Visibility,
};

fn today() -> CalendarDate {
    CalendarDate::new(2025, 6, 14).unwrap()
}

fn picker_with(config: PickerConfig, input: &str) -> Picker<ManualScheduler> {
    Picker::new(config, input, today(), ManualScheduler::new()).unwrap()
}

fn record_events(picker: &mut Picker<ManualScheduler>) -> Rc<RefCell<Vec<PickerEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    picker.subscribe(move |event| sink.borrow_mut().push(event.clone()));
    events
}

fn advance(picker: &mut Picker<ManualScheduler>, ms: u64) {
    let fired = picker.scheduler_mut().advance(ms);
    for (purpose, handle) in fired {
        picker.timer_fired(purpose, handle);
    }
}

#[test]
fn test_show_renders_current_month_and_hovers_selection() {
    let mut picker = picker_with(PickerConfig::default(), "");
    assert!(picker.show().unwrap());
    assert!(!picker.show().unwrap());

    let grid = picker.grid().unwrap();
    assert_eq!(grid.cursor, CalendarCursor { year: 2025, month: 5 });
    assert_eq!(picker.hovered(), Some(HoverPosition { row: 2, col: 6 }));
    assert_eq!(picker.visibility(), Visibility::Shown);
}

#[test]
fn test_keyboard_selection_writes_formatted_value() {
    let mut picker = picker_with(PickerConfig::default(), "");
    let events = record_events(&mut picker);
    picker.show().unwrap();

    // From Saturday the 14th: right wraps to Sunday the 8th, down to the 15th
    picker.handle_key(Key::Arrow(Direction::Right)).unwrap();
    picker.handle_key(Key::Arrow(Direction::Down)).unwrap();
    assert!(picker.handle_key(Key::Enter).unwrap());

    assert!(!picker.is_open());
    let events = events.borrow();
    assert_eq!(events[0], PickerEvent::Opened);
    assert_eq!(
        events[1],
        PickerEvent::Selected {
            value: "06/15/2025".to_string(),
            date: CalendarDate::new(2025, 6, 15).unwrap(),
        }
    );
    assert_eq!(events[2], PickerEvent::Closed);
}

#[test]
fn test_enter_on_blank_cell_does_nothing() {
    // March 2024 starts on a Friday, so row 1 column 0 is blank
    let mut picker = picker_with(PickerConfig::default(), "03/29/2024");
    picker.show().unwrap();
    // The 29th sits at row 5 column 5 of a six-row grid
    for _ in 0..2 {
        picker.handle_key(Key::Arrow(Direction::Down)).unwrap();
    }
    for _ in 0..5 {
        picker.handle_key(Key::Arrow(Direction::Left)).unwrap();
    }
    assert_eq!(picker.hovered(), Some(HoverPosition { row: 1, col: 0 }));

    assert_eq!(picker.select_hovered().unwrap(), None);
    assert!(picker.is_open());
}

#[test]
fn test_keys_ignored_while_closed() {
    let mut picker = picker_with(PickerConfig::default(), "");
    assert!(!picker.handle_key(Key::Enter).unwrap());
    assert!(!picker.handle_key(Key::Arrow(Direction::Up)).unwrap());
    assert_eq!(picker.hovered(), None);
}

#[test]
fn test_escape_and_tab_close() {
    let mut picker = picker_with(PickerConfig::default(), "");
    picker.show().unwrap();
    assert!(picker.handle_key(Key::Esc).unwrap());
    assert!(!picker.is_open());

    picker.show().unwrap();
    assert!(!picker.handle_key(Key::Tab).unwrap());
    assert!(!picker.is_open());
}

#[test]
fn test_click_commits_selection_and_reopens_on_that_month() {
    let config = PickerConfig {
        format: "yyyy-mm-dd".to_string(),
        ..PickerConfig::default()
    };
    let mut picker = picker_with(config, "");
    picker.show().unwrap();
    picker.select_month_year(10, 2024).unwrap();

    let value = picker.click_day(2024, 11, 25).unwrap();
    assert_eq!(value, "2024-11-25");
    assert_eq!(picker.context().cursor, CalendarCursor { year: 2024, month: 10 });

    advance(&mut picker, 200);
    picker.show().unwrap();
    let grid = picker.grid().unwrap();
    assert_eq!(grid.cursor, CalendarCursor { year: 2024, month: 10 });
    assert_eq!(grid.date_at(grid.selected.unwrap()), CalendarDate::new(2024, 11, 25).ok());
}

#[test]
fn test_click_rejects_impossible_day() {
    let mut picker = picker_with(PickerConfig::default(), "");
    picker.show().unwrap();
    assert!(picker.click_day(2023, 2, 29).is_err());
    assert!(picker.is_open());
}

#[test]
fn test_dropdown_rejects_out_of_range_month() {
    let mut picker = picker_with(PickerConfig::default(), "");
    picker.show().unwrap();
    assert!(picker.select_month_year(12, 2025).is_err());
    assert_eq!(picker.context().cursor, CalendarCursor { year: 2025, month: 5 });
}

#[test]
fn test_page_keys_roll_over_year() {
    let mut picker = picker_with(PickerConfig::default(), "01/10/2025");
    let events = record_events(&mut picker);
    picker.show().unwrap();
    assert!(picker.handle_key(Key::PageUp).unwrap());

    assert_eq!(picker.context().cursor, CalendarCursor { year: 2024, month: 11 });
    assert_eq!(
        events.borrow().last(),
        Some(&PickerEvent::MonthChanged(CalendarCursor { year: 2024, month: 11 }))
    );
    picker.handle_key(Key::PageDown).unwrap();
    assert_eq!(picker.context().cursor, CalendarCursor { year: 2025, month: 0 });
}

#[test]
fn test_auto_hide_after_pointer_leaves() {
    let mut picker = picker_with(PickerConfig::default(), "");
    picker.show().unwrap();
    picker.pointer_leave();

    advance(&mut picker, 499);
    assert!(picker.is_open());
    advance(&mut picker, 1);
    assert!(!picker.is_open());
    assert_eq!(picker.visibility(), Visibility::FadingOut);

    advance(&mut picker, 200);
    assert_eq!(picker.visibility(), Visibility::Hidden);
}

#[test]
fn test_pointer_reentry_cancels_auto_hide() {
    let mut picker = picker_with(PickerConfig::default(), "");
    picker.show().unwrap();
    picker.pointer_leave();
    advance(&mut picker, 300);
    picker.pointer_enter();
    advance(&mut picker, 1000);
    assert!(picker.is_open());
}

#[test]
fn test_auto_hide_disabled() {
    let config = PickerConfig {
        auto_hide: false,
        ..PickerConfig::default()
    };
    let mut picker = picker_with(config, "");
    picker.show().unwrap();
    picker.pointer_leave();
    assert!(!picker.timers().is_pending(TimerPurpose::AutoHide));
}

#[test]
fn test_open_dropdown_suppresses_auto_hide_until_extended_delay() {
    let mut picker = picker_with(PickerConfig::default(), "");
    picker.show().unwrap();
    picker.pointer_leave();
    picker.dropdown_focus();
    assert!(!picker.timers().is_pending(TimerPurpose::AutoHide));

    picker.pointer_leave();
    advance(&mut picker, 4999);
    assert!(picker.is_open());
    advance(&mut picker, 1);
    assert!(!picker.is_open());
    assert!(!picker.is_dropdown_showing());
}

#[test]
fn test_dropdown_change_cancels_extended_timer() {
    let mut picker = picker_with(PickerConfig::default(), "");
    picker.show().unwrap();
    picker.dropdown_focus();
    picker.select_month_year(1, 2024).unwrap();

    assert!(!picker.is_dropdown_showing());
    assert!(!picker.timers().is_pending(TimerPurpose::Extended));
    assert_eq!(picker.grid().unwrap().days_in_month, 29);
    advance(&mut picker, 10_000);
    assert!(picker.is_open());
}

#[test]
fn test_destroy_when_done_detaches_after_fade() {
    let config = PickerConfig {
        destroy_when_done: true,
        ..PickerConfig::default()
    };
    let mut picker = picker_with(config, "");
    let events = record_events(&mut picker);
    picker.show().unwrap();
    picker.click_day(2025, 6, 1).unwrap();

    assert_eq!(picker.visibility(), Visibility::FadingOut);
    advance(&mut picker, 200);
    assert_eq!(picker.visibility(), Visibility::Detached);
    assert!(picker.grid().is_none());
    assert_eq!(events.borrow().last(), Some(&PickerEvent::Destroyed));
}

#[test]
fn test_reopen_during_fade_keeps_popup() {
    let config = PickerConfig {
        destroy_when_done: true,
        ..PickerConfig::default()
    };
    let mut picker = picker_with(config, "");
    picker.show().unwrap();
    picker.close();
    advance(&mut picker, 100);
    picker.show().unwrap();
    advance(&mut picker, 500);

    assert_eq!(picker.visibility(), Visibility::Shown);
    assert!(picker.grid().is_some());
}

#[test]
fn test_placement_respects_force_doc_boundary() {
    let anchor = Rect::new(900.0, 100.0, 150.0, 24.0);
    let popup = Rect::new(900.0, 124.0, 200.0, 180.0);
    let doc = DocSize { width: 1000.0, height: 800.0 };

    let picker = picker_with(PickerConfig::default(), "");
    assert_eq!(picker.place(anchor, popup, doc).horizontal, Horizontal::Right);

    let config = PickerConfig {
        force_doc_boundary: false,
        ..PickerConfig::default()
    };
    let picker = picker_with(config, "");
    assert!(!picker.place(anchor, popup, doc).is_flipped());
}

#[test]
fn test_override_from_host_attribute() {
    let config = PickerConfig::default()
        .merge_override(r#"{"format": "dd.mm.yyyy", "startDay": 1, "showYear": false}"#)
        .unwrap();
    let mut picker = picker_with(config, "05.03.2024");
    picker.show().unwrap();

    assert_eq!(picker.context().current, CalendarDate::new(2024, 3, 5).unwrap());
    assert_eq!(picker.weekday_labels()[0], "M");
    // March 2024 starts on a Friday, column 4 with Monday first
    assert_eq!(picker.hovered(), Some(HoverPosition { row: 2, col: 1 }));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = PickerConfig {
        month_names: vec!["Jan".to_string()],
        ..PickerConfig::default()
    };
    assert!(Picker::new(config, "", today(), ManualScheduler::new()).is_err());
}

#[test]
fn test_days_in_month_override_cannot_exceed_real_month() {
    let base = PickerConfig::default();
    let result = base.merge_override(r#"{"daysInMonth": [31,28,31,31,31,30,31,31,30,31,30,31]}"#);
    assert!(matches!(result, Err(PickerError::InvalidConfig(_))));

    // A shorter month is allowed and keyboard selection stays on real dates
    let config = base
        .merge_override(r#"{"daysInMonth": [31,28,31,28,31,30,31,31,30,31,30,31]}"#)
        .unwrap();
    let mut picker = picker_with(config, "04/10/2024");
    picker.show().unwrap();
    assert_eq!(picker.grid().unwrap().days_in_month, 28);
    let value = picker.select_hovered().unwrap();
    assert_eq!(value.as_deref(), Some("04/10/2024"));
}
