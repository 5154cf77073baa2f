#![cfg(target_arch = "wasm32")]

use std::time::Duration;

use log::LevelFilter;
use shared::{PickerConfig, PickerError};
use slimpicker::services::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlInputElement};
use yew::platform::time::sleep;

wasm_bindgen_test_configure!(run_in_browser);

fn add_input(id: &str, alt: Option<&str>) -> HtmlInputElement {
    let document = dom::document().unwrap();
    let input = document
        .create_element("input")
        .unwrap()
        .dyn_into::<HtmlInputElement>()
        .unwrap();
    input.set_id(id);
    if let Some(alt) = alt {
        input.set_attribute("alt", alt).unwrap();
    }
    document.body().unwrap().append_child(&input).unwrap();
    input
}

#[wasm_bindgen_test]
fn test_find_input_reports_missing_anchor() {
    let result = dom::find_input("no-such-input");
    assert!(matches!(result, Err(PickerError::MissingAnchor(_))));
}

#[wasm_bindgen_test]
fn test_config_override_read_from_alt() {
    let input = add_input("with-alt", Some(r#"{"format": "yyyy-mm-dd"}"#));
    let json = dom::config_override(&input).unwrap();
    let config = PickerConfig::default().merge_override(&json).unwrap();
    assert_eq!(config.format, "yyyy-mm-dd");
}

#[wasm_bindgen_test]
fn test_attach_leaves_input_editable_until_opened() {
    let input = add_input("attach-me", None);
    let _app = slimpicker::attach("attach-me", PickerConfig::default(), None).unwrap();
    assert!(!input.read_only());
}

#[wasm_bindgen_test]
fn test_today_is_a_real_date() {
    let today = dom::today();
    assert!(shared::CalendarDate::new(today.year, today.month, today.day).is_ok());
}

/// Let Yew run pending renders and effects
async fn settle() {
    sleep(Duration::from_millis(50)).await;
}

#[wasm_bindgen_test]
async fn test_calendar_flips_at_bottom_right_of_page() {
    let document = dom::document().unwrap();
    let style = document.create_element("style").unwrap();
    style.set_text_content(Some(
        ".flip-box { position: absolute; } \
         .flip-cal { position: absolute; top: 100%; left: 0; width: 300px; height: 200px; }",
    ));
    document.body().unwrap().append_child(&style).unwrap();

    let input = add_input("flip-me", None);
    input
        .set_attribute("style", "position: absolute; right: 0; bottom: 0; width: 100px;")
        .unwrap();
    let config = PickerConfig {
        container_class: "flip-box".to_string(),
        calendar_class: "flip-cal".to_string(),
        ..PickerConfig::default()
    };
    let _app = slimpicker::attach("flip-me", config, None).unwrap();
    settle().await;

    input.click();
    settle().await;

    let calendar: Element = document.query_selector(".flip-cal").unwrap().unwrap();
    let style = calendar.get_attribute("style").unwrap_or_default();
    assert!(style.contains("right: 0px;"), "style was {:?}", style);
    assert!(style.contains("bottom: 0px;"), "style was {:?}", style);
}

#[wasm_bindgen_test]
async fn test_input_override_leaves_log_level_alone() {
    log::set_max_level(LevelFilter::Warn);
    add_input("chatty", Some(r#"{"logLevel": "trace"}"#));
    let _app = slimpicker::attach("chatty", PickerConfig::default(), None).unwrap();
    settle().await;

    assert_eq!(log::max_level(), LevelFilter::Warn);
}
