use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use shared::{
    CalendarGrid, DocSize, DropdownOption, HoverPosition, Key, Picker, PickerConfig,
    PickerEvent, Placement, Visibility,
};
use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::services::dom;
use crate::services::logging::Logger;
use crate::services::scheduler::GlooScheduler;

const COMPONENT: &str = "date-picker";

type SharedPicker = Rc<RefCell<Option<Picker<GlooScheduler>>>>;

/// Snapshot of the picker taken at render time
#[derive(Clone, PartialEq)]
pub struct PickerView {
    pub config: PickerConfig,
    pub grid: Option<CalendarGrid>,
    pub hovered: Option<HoverPosition>,
    pub weekday_labels: Vec<String>,
    pub month_options: Vec<DropdownOption>,
    pub year_options: Vec<DropdownOption>,
    pub visibility: Visibility,
    pub is_open: bool,
    pub generation: u64,
}

/// Cheap, cloneable access to the picker from event handlers.
///
/// Every mutation goes through [`PickerHandle::dispatch`], which releases
/// the borrow before acting on emitted events or re-rendering, so listeners
/// and renders never observe the picker mid-update.
#[derive(Clone)]
pub struct PickerHandle {
    picker: SharedPicker,
    pending: Rc<RefCell<Vec<PickerEvent>>>,
    /// Document size measured while no popup is in the page
    doc_size: Rc<Cell<DocSize>>,
    input: HtmlInputElement,
    on_select: Option<Callback<String>>,
    trigger: UseForceUpdateHandle,
}

impl PickerHandle {
    pub fn dispatch<R>(
        &self,
        action: impl FnOnce(&mut Picker<GlooScheduler>) -> shared::Result<R>,
    ) -> Option<R> {
        let result = {
            let mut guard = self.picker.borrow_mut();
            let picker = guard.as_mut()?;
            action(picker)
        };
        self.flush_events();
        self.trigger.force_update();

        match result {
            Ok(value) => Some(value),
            Err(e) => {
                Logger::error_with_component(COMPONENT, &e.to_string());
                None
            }
        }
    }

    fn flush_events(&self) {
        let events: Vec<PickerEvent> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                PickerEvent::Selected { value, .. } => {
                    self.input.set_value(&value);
                    if let Some(on_select) = &self.on_select {
                        on_select.emit(value);
                    }
                }
                PickerEvent::Opened => {
                    Logger::debug_with_component(COMPONENT, "Calendar opened");
                }
                PickerEvent::Closed => {
                    Logger::debug_with_component(COMPONENT, "Calendar closed");
                }
                PickerEvent::MonthChanged(cursor) => {
                    Logger::debug_with_component(
                        COMPONENT,
                        &format!("Showing {}-{:02}", cursor.year, cursor.month + 1),
                    );
                }
                PickerEvent::Destroyed => {
                    Logger::debug_with_component(COMPONENT, "Calendar torn down");
                }
            }
        }
    }

    pub fn show(&self) {
        self.dispatch(|picker| {
            if picker.visibility() == Visibility::Detached {
                dom::lock_input(&self.input);
                self.doc_size.set(dom::document_size());
            }
            picker.show()
        });
    }

    pub fn close(&self) {
        self.dispatch(|picker| {
            picker.close();
            Ok(())
        });
    }

    /// Returns true when the key was consumed
    pub fn key(&self, key: Key) -> bool {
        let is_open = self
            .picker
            .borrow()
            .as_ref()
            .is_some_and(|picker| picker.is_open());
        if !is_open {
            return false;
        }
        self.dispatch(|picker| picker.handle_key(key)).unwrap_or(false)
    }

    /// Anchor the calendar against the host input and the document bounds.
    /// Does not re-render: the shell applies the styles directly.
    pub fn place(&self, popup: shared::Rect) -> Option<Placement> {
        let anchor = dom::document_rect(&self.input);
        let guard = self.picker.borrow();
        let picker = guard.as_ref()?;
        Some(picker.place(anchor, popup, self.doc_size.get()))
    }

    pub fn input(&self) -> &HtmlInputElement {
        &self.input
    }

    fn view(&self) -> Option<PickerView> {
        let guard = self.picker.borrow();
        let picker = guard.as_ref()?;
        Some(PickerView {
            config: picker.config().clone(),
            grid: picker.grid().cloned(),
            hovered: picker.hovered(),
            weekday_labels: picker.weekday_labels(),
            month_options: picker.month_options(),
            year_options: picker.year_options(),
            visibility: picker.visibility(),
            is_open: picker.is_open(),
            generation: picker.generation(),
        })
    }
}

pub struct UsePickerResult {
    pub view: Option<PickerView>,
    pub handle: PickerHandle,
}

/// Owns a [`Picker`] bound to `input` for the lifetime of the component.
///
/// On mount the host input's value seeds the date context and its `alt` /
/// `data-picker` attribute overrides `config`. Click and focus on the input
/// open the popup; document keydown drives keyboard navigation.
#[hook]
pub fn use_picker(
    input: HtmlInputElement,
    config: PickerConfig,
    on_select: Option<Callback<String>>,
) -> UsePickerResult {
    let picker: SharedPicker = use_mut_ref(|| None);
    let pending = use_mut_ref(Vec::<PickerEvent>::new);
    let doc_size = use_memo((), |_| Cell::new(DocSize::default()));
    let trigger = use_force_update();

    let handle = PickerHandle {
        picker: picker.clone(),
        pending: pending.clone(),
        doc_size: doc_size.clone(),
        input: input.clone(),
        on_select,
        trigger,
    };

    {
        let handle = handle.clone();
        use_effect_with(input, move |input| {
            let on_fire = {
                let handle = handle.clone();
                Callback::from(move |(purpose, timer)| {
                    handle.dispatch(|picker| {
                        picker.timer_fired(purpose, timer);
                        Ok(())
                    });
                })
            };

            let config = match dom::config_override(input) {
                Some(json) => config.merge_override(&json).unwrap_or_else(|e| {
                    Logger::warn_with_component(
                        COMPONENT,
                        &format!("Ignoring options on host input: {}", e),
                    );
                    config
                }),
                None => config,
            };
            // The popup renders nothing until shown, so this is the bare page
            handle.doc_size.set(dom::document_size());

            match Picker::new(config, &input.value(), dom::today(), GlooScheduler::new(on_fire)) {
                Ok(mut created) => {
                    let pending = handle.pending.clone();
                    created.subscribe(move |event| pending.borrow_mut().push(event.clone()));
                    *handle.picker.borrow_mut() = Some(created);
                }
                Err(e) => {
                    Logger::error_with_component(
                        COMPONENT,
                        &format!("Could not create picker: {}", e),
                    );
                }
            }

            let mut listeners = Vec::new();
            for event in ["click", "focus"] {
                let handle = handle.clone();
                listeners.push(EventListener::new(input, event, move |_| handle.show()));
            }
            if let Ok(document) = dom::document() {
                let handle = handle.clone();
                listeners.push(EventListener::new_with_options(
                    &document,
                    "keydown",
                    EventListenerOptions::enable_prevent_default(),
                    move |event| {
                        let Some(key) = event
                            .dyn_ref::<KeyboardEvent>()
                            .and_then(|e| Key::from_dom(&e.key()))
                        else {
                            return;
                        };
                        if handle.key(key) {
                            event.prevent_default();
                        }
                    },
                ));
            }
            handle.trigger.force_update();

            let picker = handle.picker.clone();
            move || {
                drop(listeners);
                // Breaks the picker -> scheduler -> callback -> picker cycle
                picker.borrow_mut().take();
            }
        });
    }

    UsePickerResult {
        view: handle.view(),
        handle,
    }
}
