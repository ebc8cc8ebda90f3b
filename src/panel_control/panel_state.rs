/// View state of one interactive surface. Every surface cycles
/// `Idle → Loading → {Success, Error}` and re-enters `Loading` on its next
/// trigger; entering `Loading` hides any prior result or error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState<T> {
    #[default]
    Idle,
    Loading,
    Success(T),
    Error(String),
}

impl<T> PanelState<T> {
    pub fn is_loading(&self) -> bool { matches!(self, PanelState::Loading) }

    pub fn success(&self) -> Option<&T> {
        match self {
            PanelState::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PanelState::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
