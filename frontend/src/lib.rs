//! Browser shell for the slimpicker date picker.
//!
//! [`attach`] wires a popup calendar to an existing `<input>` on the page;
//! [`components::DatePicker`] can also be rendered directly from a Yew app.

pub mod components;
pub mod hooks;
pub mod services;

use shared::{PickerConfig, PickerError};
use yew::{AppHandle, Callback};

use components::{DatePicker, DatePickerProps};
use services::dom;

pub use shared;

/// Attach a picker to the input with element id `input_id`.
///
/// The popup is rendered into a fresh element at the end of `<body>` so it
/// can overlay anything on the page. Options in the input's `alt` or
/// `data-picker` attribute override `config`.
pub fn attach(
    input_id: &str,
    config: PickerConfig,
    on_select: Option<Callback<String>>,
) -> Result<AppHandle<DatePicker>, PickerError> {
    let input = dom::find_input(input_id)?;
    let document = dom::document()?;
    let body = document
        .body()
        .ok_or_else(|| PickerError::MissingAnchor("body".to_string()))?;
    let root = document
        .create_element("div")
        .map_err(|_| PickerError::MissingAnchor("popup root".to_string()))?;
    body.append_child(&root)
        .map_err(|_| PickerError::MissingAnchor("body".to_string()))?;

    log::info!("Attaching date picker to #{}", input_id);
    let props = DatePickerProps {
        input,
        config,
        on_select,
    };
    Ok(yew::Renderer::<DatePicker>::with_root_and_props(root, props).render())
}
