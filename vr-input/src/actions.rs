/// Logical controller actions. Physical controls are assigned through [`crate::ActionBindings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XrAction {
    /// Click on the hovered object, dispatched by the pointer of the same hand.
    PointerClick,
    /// Press physics buttons and drag physics sliders.
    Activate,
    /// Drive the object's enabled action.
    Manipulate,
    Jump,
}

impl XrAction {
    pub fn all() -> &'static [XrAction] {
        &[
            XrAction::PointerClick,
            XrAction::Activate,
            XrAction::Manipulate,
            XrAction::Jump,
        ]
    }
}
