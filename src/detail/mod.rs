//! Task detail screen: the draft controller, the picker overlays and the
//! screen state machine that ties them together.

pub mod controller;
pub mod picker;
pub mod screen;

pub use controller::{TaskDetailController, TaskDetailState};
pub use picker::{DatePicker, PickerStep, TimePicker};
pub use screen::{Intent, Overlay, ScreenState, TaskDetailScreen};

/// Leaves the detail screen for the task list.
pub trait Navigator {
    fn go_to_list(&mut self);
}

impl<F: FnMut()> Navigator for F {
    fn go_to_list(&mut self) {
        self()
    }
}
