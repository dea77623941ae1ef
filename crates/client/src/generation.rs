//! Generation trigger: prompt → `POST /api/generate` → redirect or alert

use std::sync::Arc;

use scriptly_common::GenerateRequest;

use crate::backend::ScriptlyApi;
use crate::outcome::{FlowOutcome, InFlight};
use crate::page::{ControlState, Page};

/// Placeholder author for hosts that have no session identity
pub const DEFAULT_USER_ID: &str = "admin_user_01";

pub const EMPTY_PROMPT_ALERT: &str = "Please enter a blog topic or prompt.";
const FAILURE_PREFIX: &str = "Oops! Something went wrong: ";
const DEFAULT_FAILURE: &str = "Generation failed.";

/// Handles clicks on the generate button
pub struct GenerationTrigger {
    page: Arc<dyn Page>,
    api: Arc<dyn ScriptlyApi>,
    user_id: String,
    auto_submit: bool,
    in_flight: InFlight,
}

impl GenerationTrigger {
    pub fn new(page: Arc<dyn Page>, api: Arc<dyn ScriptlyApi>, user_id: impl Into<String>) -> Self {
        Self {
            page,
            api,
            user_id: user_id.into(),
            auto_submit: false,
            in_flight: InFlight::new(),
        }
    }

    /// Queue generated blogs for review instead of saving them as drafts
    pub fn with_auto_submit(mut self, auto_submit: bool) -> Self {
        self.auto_submit = auto_submit;
        self
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_active()
    }

    pub async fn trigger(&self) -> FlowOutcome {
        let Some(_flight) = self.in_flight.try_acquire() else {
            tracing::debug!("Generation already in flight, ignoring trigger");
            return FlowOutcome::Busy;
        };

        let prompt = self.page.prompt_value().unwrap_or_default();
        if prompt.trim().is_empty() {
            self.page.alert(EMPTY_PROMPT_ALERT);
            return FlowOutcome::Invalid(EMPTY_PROMPT_ALERT.to_string());
        }

        let _controls = BusyControls::engage(self.page.as_ref());

        let mut request = GenerateRequest::new(prompt, self.user_id.clone());
        request.auto_submit = self.auto_submit;

        let error = match self.api.generate(&request).await {
            Ok(result) if result.success => match result.redirect {
                Some(location) => {
                    tracing::info!(blog_id = ?result.blog_id, redirect = %location, "Blog generated");
                    self.page.navigate(&location);
                    return FlowOutcome::Redirected(location);
                }
                None => "Malformed response: missing redirect".to_string(),
            },
            Ok(result) => result
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
            Err(e) => e.to_string(),
        };

        tracing::error!(error = %error, "Generation request failed");
        let message = format!("{}{}", FAILURE_PREFIX, error);
        self.page.alert(&message);
        FlowOutcome::Failed(message)
    }
}

/// Busy controls for the lifetime of the guard; the previous state comes
/// back on drop, whichever way the call ends
struct BusyControls<'a> {
    page: &'a dyn Page,
    previous: ControlState,
}

impl<'a> BusyControls<'a> {
    fn engage(page: &'a dyn Page) -> Self {
        let previous = page.control_state();
        page.apply_controls(ControlState::BUSY);
        Self { page, previous }
    }
}

impl Drop for BusyControls<'_> {
    fn drop(&mut self) {
        self.page.apply_controls(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::mock::{MockScriptlyApi, RecordingPage};
    use scriptly_common::GenerationResult;
    use std::time::Duration;

    fn setup(prompt: &str) -> (Arc<RecordingPage>, Arc<MockScriptlyApi>, GenerationTrigger) {
        let page = Arc::new(RecordingPage::new().with_prompt(prompt));
        let api = Arc::new(MockScriptlyApi::new());
        let trigger = GenerationTrigger::new(page.clone(), api.clone(), DEFAULT_USER_ID);
        (page, api, trigger)
    }

    #[tokio::test]
    async fn test_blank_prompts_never_reach_the_network() {
        for prompt in ["", "   ", "\n\t "] {
            let (page, api, trigger) = setup(prompt);

            let outcome = trigger.trigger().await;

            assert_eq!(outcome, FlowOutcome::Invalid(EMPTY_PROMPT_ALERT.to_string()));
            assert_eq!(page.alerts(), vec![EMPTY_PROMPT_ALERT]);
            assert!(api.recorded_generate_requests().is_empty());
            assert_eq!(page.control_history(), Vec::<ControlState>::new());
        }
    }

    #[tokio::test]
    async fn test_prompt_posted_once_as_entered() {
        let (_, api, trigger) = setup("  Rust for beginners ");

        trigger.trigger().await;

        let requests = api.recorded_generate_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].prompt, "  Rust for beginners ");
        assert_eq!(requests[0].user_id, DEFAULT_USER_ID);
        assert!(!requests[0].auto_submit);
    }

    #[tokio::test]
    async fn test_success_navigates_to_server_redirect() {
        let (page, api, trigger) = setup("Rust");
        api.push_generate(Ok(GenerationResult::created("5", "/queue/5")));

        let outcome = trigger.trigger().await;

        assert_eq!(outcome, FlowOutcome::Redirected("/queue/5".to_string()));
        assert_eq!(page.navigations(), vec!["/queue/5"]);
        assert!(page.alerts().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_application_failure_alerts_server_error() {
        let (page, api, trigger) = setup("Rust");
        api.push_generate(Ok(GenerationResult::failed("quota exceeded")));

        let outcome = trigger.trigger().await;

        assert!(matches!(outcome, FlowOutcome::Failed(_)));
        assert_eq!(
            page.alerts(),
            vec!["Oops! Something went wrong: quota exceeded"]
        );
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_default() {
        let (page, api, trigger) = setup("Rust");
        api.push_generate(Ok(GenerationResult {
            success: false,
            ..Default::default()
        }));

        trigger.trigger().await;

        assert_eq!(
            page.alerts(),
            vec!["Oops! Something went wrong: Generation failed."]
        );
    }

    #[tokio::test]
    async fn test_transport_and_parse_errors_alert() {
        let (page, api, trigger) = setup("Rust");
        api.push_generate(Err(ClientError::Transport("connection refused".to_string())));
        api.push_generate(Err(ClientError::MalformedResponse("HTTP 502".to_string())));
        api.push_generate(Ok(GenerationResult {
            success: true,
            ..Default::default()
        }));

        trigger.trigger().await;
        trigger.trigger().await;
        trigger.trigger().await;

        let alerts = page.alerts();
        assert_eq!(alerts[0], "Oops! Something went wrong: connection refused");
        assert!(alerts[1].contains("HTTP 502"));
        assert!(alerts[2].contains("missing redirect"));
        assert!(page.navigations().is_empty());
    }

    #[tokio::test]
    async fn test_controls_restored_on_every_outcome() {
        let (page, api, trigger) = setup("Rust");
        api.push_generate(Ok(GenerationResult::created("1", "/drafts")));
        api.push_generate(Ok(GenerationResult::failed("nope")));
        api.push_generate(Err(ClientError::Transport("down".to_string())));

        for _ in 0..3 {
            let before = page.control_state();
            trigger.trigger().await;
            assert_eq!(page.control_state(), before);
        }

        // Every call went busy then back
        let history = page.control_history();
        assert_eq!(history.len(), 6);
        for pair in history.chunks(2) {
            assert_eq!(pair, [ControlState::BUSY, ControlState::IDLE]);
        }
    }

    #[tokio::test]
    async fn test_cancelled_call_restores_controls_and_flag() {
        let (page, api, trigger) = setup("Rust");
        api.set_delay(Duration::from_secs(30));

        let cancelled =
            tokio::time::timeout(Duration::from_millis(20), trigger.trigger()).await;
        assert!(cancelled.is_err());

        assert_eq!(page.control_state(), ControlState::IDLE);
        assert!(!trigger.is_in_flight());
    }

    #[tokio::test]
    async fn test_second_trigger_while_in_flight_is_busy() {
        let (page, api, trigger) = setup("Rust");
        api.set_delay(Duration::from_millis(50));

        let (first, second) = tokio::join!(trigger.trigger(), trigger.trigger());

        assert!(first.is_redirect());
        assert_eq!(second, FlowOutcome::Busy);
        assert_eq!(api.recorded_generate_requests().len(), 1);
        assert_eq!(page.navigations().len(), 1);
    }

    #[tokio::test]
    async fn test_auto_submit_is_forwarded() {
        let (_, api, trigger) = setup("Rust");
        let trigger = trigger.with_auto_submit(true);

        trigger.trigger().await;

        assert!(api.recorded_generate_requests()[0].auto_submit);
    }
}
