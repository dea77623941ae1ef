//! Terminal rendering of the page surface
//!
//! Alerts go to stderr, navigations to stdout, so a script can capture the
//! landing location of a flow.

use std::io::Write;
use std::sync::Mutex;

use scriptly_client::page::dom;
use scriptly_client::{ControlState, Page};

type Sink = Box<dyn Write + Send>;

#[derive(Debug, Default)]
struct PageState {
    prompt: Option<String>,
    controls: ControlState,
    path: String,
    signup: bool,
    web_config: Option<String>,
}

pub struct TerminalPage {
    state: Mutex<PageState>,
    out: Mutex<Sink>,
    err: Mutex<Sink>,
}

impl TerminalPage {
    pub fn stdio() -> Self {
        Self::with_writers(Box::new(std::io::stdout()), Box::new(std::io::stderr()))
    }

    pub fn with_writers(out: Sink, err: Sink) -> Self {
        Self {
            state: Mutex::new(PageState {
                path: "/".to_string(),
                ..Default::default()
            }),
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    /// Fill `#prompt`
    pub fn with_prompt(self, prompt: &str) -> Self {
        self.lock().prompt = Some(prompt.to_string());
        self
    }

    /// Present as the signup page (offers `#googleSignUp`)
    pub fn as_signup(self) -> Self {
        self.lock().signup = true;
        self
    }

    /// Embed the sign-in configuration as `#firebase-config`
    pub fn with_web_config(self, json: String) -> Self {
        self.lock().web_config = Some(json);
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_line(sink: &Mutex<Sink>, line: &str) {
        let mut sink = sink.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(e) = writeln!(sink, "{}", line) {
            tracing::debug!(error = %e, "Terminal write failed");
        }
    }
}

impl Page for TerminalPage {
    fn prompt_value(&self) -> Option<String> {
        self.lock().prompt.clone()
    }

    fn control_state(&self) -> ControlState {
        self.lock().controls
    }

    fn apply_controls(&self, controls: ControlState) {
        let was_loading = {
            let mut state = self.lock();
            std::mem::replace(&mut state.controls, controls).loader_visible
        };
        if controls.loader_visible && !was_loading {
            Self::write_line(&self.err, "Generating...");
        }
    }

    fn alert(&self, message: &str) {
        Self::write_line(&self.err, message);
    }

    fn navigate(&self, location: &str) {
        self.lock().path = location.to_string();
        Self::write_line(&self.out, location);
    }

    fn current_path(&self) -> String {
        self.lock().path.clone()
    }

    fn nav_links(&self) -> Vec<Option<String>> {
        Vec::new()
    }

    fn mark_nav_active(&self, _index: usize) {}

    fn has_element(&self, id: &str) -> bool {
        let state = self.lock();
        match id {
            dom::GOOGLE_SIGN_UP => state.signup,
            dom::FIREBASE_CONFIG => state.web_config.is_some(),
            dom::PROMPT_INPUT => state.prompt.is_some(),
            _ => false,
        }
    }

    fn element_text(&self, id: &str) -> Option<String> {
        match id {
            dom::FIREBASE_CONFIG => self.lock().web_config.clone(),
            dom::PROMPT_INPUT => self.lock().prompt.clone(),
            _ => None,
        }
    }
}
