/// The engine's fullscreen element view, handed over for the shell to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomView {
    /// Host-specific description of what is shown (e.g. the element tag).
    pub label: String,
}

impl CustomView {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into() }
    }
}
