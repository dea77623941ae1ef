//! The page the flows run against
//!
//! Handlers never touch a document directly. A host (browser bindings, the
//! terminal CLI, test doubles) implements [`Page`] over whatever it renders.

/// Element ids and classes the flows rely on
pub mod dom {
    pub const PROMPT_INPUT: &str = "prompt";
    pub const GENERATE_BUTTON: &str = "genBtn";
    pub const LOADER: &str = "loader";
    pub const DIMMED_CLASS: &str = "opacity-50";
    pub const FIREBASE_CONFIG: &str = "firebase-config";
    pub const GOOGLE_SIGN_IN: &str = "googleSignIn";
    pub const GOOGLE_SIGN_UP: &str = "googleSignUp";
    pub const LOGOUT_CLASS: &str = "logout";
    pub const NAV_LINK_CLASS: &str = "list-group-item";
    pub const ACTIVE_CLASS: &str = "active";
}

/// Visual state of the generation controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    /// `#genBtn` disabled
    pub trigger_disabled: bool,
    /// `#loader` shown
    pub loader_visible: bool,
    /// `#prompt` carries `.opacity-50`
    pub input_dimmed: bool,
}

impl ControlState {
    pub const IDLE: ControlState = ControlState {
        trigger_disabled: false,
        loader_visible: false,
        input_dimmed: false,
    };

    pub const BUSY: ControlState = ControlState {
        trigger_disabled: true,
        loader_visible: true,
        input_dimmed: true,
    };
}

impl Default for ControlState {
    fn default() -> Self {
        Self::IDLE
    }
}

/// Host surface for the client flows.
///
/// Methods take `&self`; implementations use interior mutability so one page
/// can be shared between handlers.
pub trait Page: Send + Sync {
    /// Current text of `#prompt`, `None` when the page has no prompt input
    fn prompt_value(&self) -> Option<String>;

    fn control_state(&self) -> ControlState;

    fn apply_controls(&self, state: ControlState);

    /// Blocking user-visible message
    fn alert(&self, message: &str);

    /// Full-page navigation
    fn navigate(&self, location: &str);

    /// Path component of the current location
    fn current_path(&self) -> String;

    /// `href` of every `.list-group-item`, in document order
    fn nav_links(&self) -> Vec<Option<String>>;

    /// Add `.active` to the nav link at `index`
    fn mark_nav_active(&self, index: usize);

    fn has_element(&self, id: &str) -> bool;

    /// Text content of the element with `id`
    fn element_text(&self, id: &str) -> Option<String>;
}
