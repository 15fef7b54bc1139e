//! Request orchestration for the chat surface.
//!
//! One submission walks: validate, append the user message, mark busy,
//! animate the agent steps in order, call the generator, interpret the
//! reply, apply its theme, append the assistant message, clear busy.
//! Clearing busy is tied to a drop guard so no exit path can skip it.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::constants::{
    DEFAULT_STEP_DELAY_MAX_MS, DEFAULT_STEP_DELAY_MIN_MS, GENERATION_FAILURE_TEXT,
    IMAGE_ONLY_PROMPT,
};
use crate::core::conversation::Conversation;
use crate::core::generation::{GenerationError, GenerationRequest, ImageAttachment, TextGenerator};
use crate::core::interpreter::{interpret, InterpretedResponse};
use crate::core::message::{ConversationMessage, MessageId, Payload, RenderKind};
use crate::core::steps::{default_steps, AgentStep, StageChange, StepPipeline, StepStatus};
use crate::core::store::VibeStore;
use crate::core::theme::Theme;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub text: String,
    pub image: Option<ImageAttachment>,
}

impl Submission {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to send; no state was touched.
    Empty,
    /// Another run is in flight; no state was touched.
    Busy,
    Completed {
        reply: MessageId,
        /// The generation call failed and an alert was shown instead.
        failed: bool,
    },
}

/// Decides how long each simulated stage appears to take.
#[async_trait(?Send)]
pub trait Pacer {
    async fn pause(&self, step: &AgentStep);
}

/// Sleeps a random duration within `[min, max]` per stage.
#[derive(Debug, Clone)]
pub struct JitterPacer {
    min: Duration,
    max: Duration,
}

impl JitterPacer {
    pub fn new(min: Duration, max: Duration) -> Self {
        if max < min {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    pub fn delay(&self) -> Duration {
        let span = self.max.saturating_sub(self.min).as_millis() as u64;
        if span == 0 {
            return self.min;
        }
        let mut bytes = [0u8; 8];
        let offset = match getrandom::fill(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes) % (span + 1),
            Err(_) => span / 2,
        };
        self.min + Duration::from_millis(offset)
    }
}

impl Default for JitterPacer {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_STEP_DELAY_MIN_MS),
            Duration::from_millis(DEFAULT_STEP_DELAY_MAX_MS),
        )
    }
}

#[async_trait(?Send)]
impl Pacer for JitterPacer {
    async fn pause(&self, _step: &AgentStep) {
        tokio::time::sleep(self.delay()).await;
    }
}

/// Advances stages without waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer;

#[async_trait(?Send)]
impl Pacer for InstantPacer {
    async fn pause(&self, _step: &AgentStep) {}
}

struct BusyGuard {
    store: VibeStore,
}

impl BusyGuard {
    fn engage(store: &VibeStore) -> Self {
        store.set_is_busy(true);
        Self {
            store: store.clone(),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.store.set_is_busy(false);
    }
}

#[derive(Debug)]
pub struct Orchestrator<G, P> {
    store: VibeStore,
    conversation: Conversation,
    generator: G,
    pacer: P,
}

impl<G, P> Orchestrator<G, P>
where
    G: TextGenerator,
    P: Pacer,
{
    pub fn new(store: VibeStore, conversation: Conversation, generator: G, pacer: P) -> Self {
        Self {
            store,
            conversation,
            generator,
            pacer,
        }
    }

    pub fn store(&self) -> &VibeStore {
        &self.store
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub async fn submit(&self, submission: Submission) -> SubmitOutcome {
        if submission.is_empty() {
            return SubmitOutcome::Empty;
        }
        if self.store.get_state().is_busy {
            debug!("submission rejected while a run is in flight");
            return SubmitOutcome::Busy;
        }

        let Submission { text, image } = submission;
        let shown = if text.trim().is_empty() {
            IMAGE_ONLY_PROMPT.to_string()
        } else {
            text.clone()
        };
        self.conversation.append(ConversationMessage::user(shown));

        let busy = BusyGuard::engage(&self.store);
        let steps = default_steps();
        self.store.set_steps(steps.clone());
        self.walk_steps(&steps).await;

        let request = GenerationRequest {
            prompt: text,
            image,
        };
        let (response, failed) = match self.generator.generate(&request).await {
            Ok(raw) => (interpret(&raw), false),
            Err(err) => {
                warn!(error = %err, "generation call failed");
                (failure_response(&err), true)
            }
        };

        if let Some(theme) = response.theme_hint {
            self.store.set_theme(theme);
        }
        let reply = self
            .conversation
            .append(ConversationMessage::from_response(response));
        drop(busy);

        SubmitOutcome::Completed { reply, failed }
    }

    async fn walk_steps(&self, steps: &[AgentStep]) {
        let mut pipeline = StepPipeline::new(steps);
        while let Some(change) = pipeline.advance() {
            match change {
                StageChange::Start(id) => {
                    self.store.update_step_status(&id, StepStatus::Processing);
                    if let Some(step) = steps.iter().find(|step| step.id == id) {
                        self.pacer.pause(step).await;
                    }
                }
                StageChange::Finish(id) => {
                    self.store.update_step_status(&id, StepStatus::Complete);
                }
            }
        }
    }
}

fn failure_response(err: &GenerationError) -> InterpretedResponse {
    InterpretedResponse {
        kind: RenderKind::Alert,
        text: GENERATION_FAILURE_TEXT.to_string(),
        payload: Some(Payload::Alert(serde_json::json!({ "error": err.to_string() }))),
        theme_hint: Some(Theme::Obsidian),
    }
}
