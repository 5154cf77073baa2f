//! Thin wrappers over the bits of the DOM the picker reads.

use shared::{CalendarDate, DocSize, PickerError, Rect};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, Window};

/// Attributes that may carry a JSON options override on the host input
pub const OVERRIDE_ATTRIBUTES: [&str; 2] = ["alt", "data-picker"];

pub fn window() -> Result<Window, PickerError> {
    web_sys::window().ok_or_else(|| PickerError::MissingAnchor("window".to_string()))
}

pub fn document() -> Result<Document, PickerError> {
    window()?
        .document()
        .ok_or_else(|| PickerError::MissingAnchor("document".to_string()))
}

/// Look up the host input by element id
pub fn find_input(id: &str) -> Result<HtmlInputElement, PickerError> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| PickerError::MissingAnchor(format!("#{}", id)))?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| PickerError::MissingAnchor(format!("#{} is not an <input>", id)))
}

/// The first non-empty override attribute on the input, if any
pub fn config_override(input: &HtmlInputElement) -> Option<String> {
    OVERRIDE_ATTRIBUTES
        .iter()
        .filter_map(|name| input.get_attribute(name))
        .find(|value| !value.trim().is_empty())
}

/// An element's box in document coordinates
pub fn document_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    let (scroll_x, scroll_y) = window()
        .map(|w| (w.scroll_x().unwrap_or(0.0), w.scroll_y().unwrap_or(0.0)))
        .unwrap_or((0.0, 0.0));
    Rect::new(
        rect.left() + scroll_x,
        rect.top() + scroll_y,
        rect.width(),
        rect.height(),
    )
}

/// Full scrollable size of the document
pub fn document_size() -> DocSize {
    document()
        .ok()
        .and_then(|doc| doc.document_element())
        .map(|root| DocSize {
            width: root.scroll_width() as f64,
            height: root.scroll_height() as f64,
        })
        .unwrap_or_default()
}

/// Today according to the browser clock
pub fn today() -> CalendarDate {
    let now = js_sys::Date::new_0();
    CalendarDate {
        year: now.get_full_year() as i32,
        month: now.get_month() + 1, // JavaScript months are 0-indexed
        day: now.get_date(),
    }
}

/// Prevent typing in the host input once the popup takes over
pub fn lock_input(input: &HtmlInputElement) {
    input.set_read_only(true);
    if input.set_attribute("autocomplete", "off").is_err() {
        log::warn!("Could not disable autocomplete on host input");
    }
}
