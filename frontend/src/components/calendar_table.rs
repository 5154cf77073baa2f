use shared::{CalendarDate, CalendarGrid, DropdownOption, GridCell, HoverPosition, PickerConfig};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CalendarTableProps {
    pub grid: CalendarGrid,
    pub config: PickerConfig,
    pub hovered: Option<HoverPosition>,
    pub weekday_labels: Vec<String>,
    pub month_options: Vec<DropdownOption>,
    pub year_options: Vec<DropdownOption>,
    /// A day link was clicked
    pub on_pick: Callback<CalendarDate>,
    /// Month (0-11) and year chosen in the dropdowns
    pub on_month_year: Callback<(u32, i32)>,
    pub on_dropdown_focus: Callback<()>,
}

/// Renders the month as a table: dropdown header, weekday row, then one row
/// per week.
#[function_component(CalendarTable)]
pub fn calendar_table(props: &CalendarTableProps) -> Html {
    let month_ref = use_node_ref();
    let year_ref = use_node_ref();
    let config = &props.config;
    let cursor = props.grid.cursor;

    // Read both selects; a hidden one keeps the displayed value
    let on_change = {
        let month_ref = month_ref.clone();
        let year_ref = year_ref.clone();
        let on_month_year = props.on_month_year.clone();
        Callback::from(move |_: Event| {
            let month = month_ref
                .cast::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<u32>().ok())
                .unwrap_or(cursor.month);
            let year = year_ref
                .cast::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<i32>().ok())
                .unwrap_or(cursor.year);
            on_month_year.emit((month, year));
        })
    };

    let on_focus = {
        let on_dropdown_focus = props.on_dropdown_focus.clone();
        Callback::from(move |_: FocusEvent| on_dropdown_focus.emit(()))
    };

    let dropdown = |options: &[DropdownOption], class: &str, node_ref: &NodeRef| {
        html! {
            <select
                class={class.to_string()}
                ref={node_ref.clone()}
                onfocus={on_focus.clone()}
                onchange={on_change.clone()}
            >
                {for options.iter().map(|option| html! {
                    <option value={option.value.to_string()} selected={option.selected}>
                        {&option.label}
                    </option>
                })}
            </select>
        }
    };

    html! {
        <table>
            {if config.shows_dropdowns() {
                html! {
                    <thead>
                        <tr>
                            <th colspan="7">
                                {if config.show_month {
                                    dropdown(props.month_options.as_slice(), config.month_class.as_str(), &month_ref)
                                } else { html! {} }}
                                {if config.show_year {
                                    dropdown(props.year_options.as_slice(), config.year_class.as_str(), &year_ref)
                                } else { html! {} }}
                            </th>
                        </tr>
                    </thead>
                }
            } else { html! {} }}
            <tbody>
                <tr>
                    {for props.weekday_labels.iter().map(|label| html! { <th>{label}</th> })}
                </tr>
                {for props.grid.rows.iter().enumerate().map(|(index, row)| {
                    let row_number = index + 1;
                    html! {
                        <tr>
                            {for row.iter().enumerate().map(|(col, cell)| {
                                let position = HoverPosition { row: row_number, col };
                                let hovered = props.hovered == Some(position);
                                day_cell(props, cell, position, hovered)
                            })}
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}

fn day_cell(props: &CalendarTableProps, cell: &GridCell, position: HoverPosition, hovered: bool) -> Html {
    let config = &props.config;
    let hover_class = hovered.then(|| config.hover_class.clone());

    let GridCell::Day { day, is_selected, is_today } = *cell else {
        return html! {
            <td class={classes!(config.empty_class.clone(), hover_class)}>{" "}</td>
        };
    };

    let Some(date) = props.grid.date_at(position) else {
        return html! { <td></td> };
    };
    let onclick = {
        let on_pick = props.on_pick.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_pick.emit(date);
        })
    };

    html! {
        <td class={classes!(hover_class)}>
            <a
                href={format!("#{}|{}|{}", date.year, date.month, date.day)}
                class={classes!(
                    config.day_class.clone(),
                    is_selected.then(|| config.selected_class.clone()),
                    is_today.then(|| config.today_class.clone())
                )}
                {onclick}
            >
                {day}
            </a>
        </td>
    }
}
