pub mod use_picker;

pub use use_picker::{use_picker, PickerHandle, PickerView, UsePickerResult};
