use shared::{CalendarDate, PickerConfig, Visibility};
use web_sys::{Element, HtmlInputElement};
use yew::prelude::*;

use crate::components::calendar_table::CalendarTable;
use crate::hooks::use_picker;
use crate::services::dom;

#[derive(Properties, PartialEq)]
pub struct DatePickerProps {
    /// The text field the calendar is attached to
    pub input: HtmlInputElement,
    #[prop_or_default]
    pub config: PickerConfig,
    /// Called with the formatted value after a day is picked
    #[prop_or_default]
    pub on_select: Option<Callback<String>>,
}

/// Popup calendar for a host input.
///
/// Renders nothing until the input is first clicked or focused. The
/// container is laid over the input and the calendar inside it is
/// re-anchored after every draw so it stays inside the document.
#[function_component(DatePicker)]
pub fn date_picker(props: &DatePickerProps) -> Html {
    let container_ref = use_node_ref();
    let calendar_ref = use_node_ref();
    let picker = use_picker(props.input.clone(), props.config.clone(), props.on_select.clone());
    let handle = picker.handle;

    // Cover the input with the container, then measure and anchor the calendar
    {
        let handle = handle.clone();
        let container_ref = container_ref.clone();
        let calendar_ref = calendar_ref.clone();
        let deps = picker
            .view
            .as_ref()
            .map(|view| (view.is_open, view.generation))
            .unwrap_or_default();
        use_effect_with(deps, move |(is_open, _)| {
            if *is_open {
                if let Some(container) = container_ref.cast::<Element>() {
                    let anchor = dom::document_rect(handle.input());
                    let style = format!(
                        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
                        anchor.left, anchor.top, anchor.width, anchor.height
                    );
                    if container.set_attribute("style", &style).is_err() {
                        log::warn!("Could not position calendar container");
                    }
                }
                if let Some(calendar) = calendar_ref.cast::<Element>() {
                    // Measure with natural anchoring before deciding on a flip
                    if calendar.remove_attribute("style").is_err() {
                        log::warn!("Could not reset calendar placement");
                    }
                    let popup = dom::document_rect(&calendar);
                    if let Some(placement) = handle.place(popup) {
                        let style = placement.to_style();
                        if !style.is_empty() && calendar.set_attribute("style", &style).is_err() {
                            log::warn!("Could not apply calendar placement");
                        }
                    }
                }
            }
            || ()
        });
    }

    let Some(view) = picker.view else {
        return html! {};
    };
    let Some(grid) = view.grid.clone() else {
        return html! {};
    };
    if view.visibility == Visibility::Detached {
        return html! {};
    }

    let config = &view.config;
    let opacity = if view.visibility == Visibility::Shown { 1 } else { 0 };
    let hidden = if view.visibility == Visibility::Hidden { " visibility: hidden;" } else { "" };
    // The container and calendar carry imperatively set geometry, so the
    // fade lives on a wrapper between them
    let fade_style = format!(
        "opacity: {}; transition: opacity {}ms;{}",
        opacity, config.fade_duration, hidden
    );

    let on_pick = {
        let handle = handle.clone();
        Callback::from(move |date: CalendarDate| {
            handle.dispatch(|picker| picker.click_day(date.year, date.month, date.day));
        })
    };
    let on_month_year = {
        let handle = handle.clone();
        Callback::from(move |(month, year): (u32, i32)| {
            handle.dispatch(|picker| picker.select_month_year(month, year));
        })
    };
    let on_dropdown_focus = {
        let handle = handle.clone();
        Callback::from(move |_: ()| {
            handle.dispatch(|picker| {
                picker.dropdown_focus();
                Ok(())
            });
        })
    };
    let (onmouseenter, onmouseleave) = if config.auto_hide {
        let enter = handle.clone();
        let leave = handle.clone();
        (
            Some(Callback::from(move |_: MouseEvent| {
                enter.dispatch(|picker| {
                    picker.pointer_enter();
                    Ok(())
                });
            })),
            Some(Callback::from(move |_: MouseEvent| {
                leave.dispatch(|picker| {
                    picker.pointer_leave();
                    Ok(())
                });
            })),
        )
    } else {
        (None, None)
    };

    html! {
        <div
            class={config.container_class.clone()}
            ref={container_ref}
            {onmouseenter}
            {onmouseleave}
        >
            <div style={fade_style}>
                <div class={config.calendar_class.clone()} ref={calendar_ref}>
                    <CalendarTable
                        {grid}
                        config={config.clone()}
                        hovered={view.hovered}
                        weekday_labels={view.weekday_labels.clone()}
                        month_options={view.month_options.clone()}
                        year_options={view.year_options.clone()}
                        {on_pick}
                        {on_month_year}
                        {on_dropdown_focus}
                    />
                </div>
            </div>
        </div>
    }
}
