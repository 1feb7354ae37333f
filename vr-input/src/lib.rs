mod actions;
mod bindings;
mod controller;
pub mod gamepad;

pub use actions::XrAction;
pub use bindings::{ActionBindings, ButtonBinding};
pub use controller::{ControllerButton, ControllerState, Hand, end_controller_frame};
pub use gamepad::{GilrsResource, gilrs_controller_polling_system};
