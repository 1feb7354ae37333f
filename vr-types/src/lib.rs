mod settings;

pub use settings::{
    ActionSettings, ControlBinding, ControlBindings, LocomotionSettings, PointerSettings,
};
