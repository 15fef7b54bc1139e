//! Simulated agent progress.
//!
//! A run walks a fixed list of stages strictly in order. [`StepPipeline`]
//! tracks which stage is current and knows nothing about timing; the caller
//! decides how long each stage appears to take.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Idle,
    Processing,
    Complete,
    Error,
}

impl StepStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StepStatus::Idle => "idle",
            StepStatus::Processing => "processing",
            StepStatus::Complete => "complete",
            StepStatus::Error => "error",
        }
    }

    /// Whether moving from `self` to `next` keeps the lifecycle monotonic:
    /// idle → processing → complete, with error reachable from any live state.
    pub fn can_transition_to(self, next: StepStatus) -> bool {
        use StepStatus::*;
        matches!(
            (self, next),
            (Idle, Processing) | (Processing, Complete) | (Idle | Processing, Error)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Complete | StepStatus::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStep {
    pub id: String,
    pub label: String,
    pub icon: String,
    pub status: StepStatus,
}

impl AgentStep {
    pub fn new(id: impl Into<String>, label: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: icon.into(),
            status: StepStatus::Idle,
        }
    }
}

const STEP_TEMPLATE: [(&str, &str, &str); 4] = [
    ("1", "Iniciando Percepção", "🧠"),
    ("2", "Análise Semântica", "🔍"),
    ("3", "Síntese de Interface", "🎨"),
    ("4", "Validação Estrutural", "🛡️"),
];

/// A fresh, all-idle copy of the standard step sequence.
pub fn default_steps() -> Vec<AgentStep> {
    STEP_TEMPLATE
        .iter()
        .map(|(id, label, icon)| AgentStep::new(*id, *label, *icon))
        .collect()
}

/// Stage list plus a cursor. Advancing never revisits an earlier stage.
#[derive(Debug, Clone)]
pub struct StepPipeline {
    stages: Vec<String>,
    cursor: usize,
    active: bool,
}

/// What the pipeline asks the caller to apply next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageChange {
    Start(String),
    Finish(String),
}

impl StepPipeline {
    pub fn new(steps: &[AgentStep]) -> Self {
        Self {
            stages: steps.iter().map(|step| step.id.clone()).collect(),
            cursor: 0,
            active: false,
        }
    }

    /// Start the next stage, or finish the one in flight. Returns `None`
    /// once every stage has finished.
    pub fn advance(&mut self) -> Option<StageChange> {
        let id = self.stages.get(self.cursor)?.clone();
        if self.active {
            self.active = false;
            self.cursor += 1;
            Some(StageChange::Finish(id))
        } else {
            self.active = true;
            Some(StageChange::Start(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_are_monotonic() {
        use StepStatus::*;
        assert!(Idle.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Complete));
        assert!(Processing.can_transition_to(Error));
        assert!(Idle.can_transition_to(Error));

        assert!(!Complete.can_transition_to(Processing));
        assert!(!Complete.can_transition_to(Idle));
        assert!(!Processing.can_transition_to(Idle));
        assert!(!Error.can_transition_to(Processing));
        assert!(!Idle.can_transition_to(Complete));
        assert!(!Idle.can_transition_to(Idle));
    }

    #[test]
    fn default_steps_start_idle_and_ordered() {
        let steps = default_steps();
        let ids: Vec<_> = steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        assert!(steps.iter().all(|s| s.status == StepStatus::Idle));
    }

    #[test]
    fn pipeline_alternates_start_and_finish_in_order() {
        let mut pipeline = StepPipeline::new(&default_steps());
        let mut changes = Vec::new();
        while let Some(change) = pipeline.advance() {
            changes.push(change);
        }
        assert_eq!(changes.len(), 8);
        assert_eq!(changes[0], StageChange::Start("1".to_string()));
        assert_eq!(changes[1], StageChange::Finish("1".to_string()));
        assert_eq!(changes[6], StageChange::Start("4".to_string()));
        assert_eq!(changes[7], StageChange::Finish("4".to_string()));
        assert_eq!(pipeline.advance(), None);
        assert_eq!(pipeline.advance(), None);
    }

    #[test]
    fn a_stage_finishes_before_the_next_starts() {
        let mut pipeline = StepPipeline::new(&default_steps()[..2]);
        assert_eq!(pipeline.advance(), Some(StageChange::Start("1".to_string())));
        assert_eq!(pipeline.advance(), Some(StageChange::Finish("1".to_string())));
        assert_eq!(pipeline.advance(), Some(StageChange::Start("2".to_string())));
    }

    #[test]
    fn empty_pipeline_is_immediately_finished() {
        let mut pipeline = StepPipeline::new(&[]);
        assert_eq!(pipeline.advance(), None);
    }

    #[test]
    fn complete_and_error_are_terminal() {
        assert!(StepStatus::Complete.is_terminal());
        assert!(StepStatus::Error.is_terminal());
        assert!(!StepStatus::Idle.is_terminal());
        assert!(!StepStatus::Processing.is_terminal());
    }
}
