//! Step-level execution events.
//!
//! The loop narrates every step through an [`EventSink`] so callers can
//! observe progress without coupling to a concrete logging backend. Emitting
//! events is the loop's only externally visible effect besides its return
//! value.

use std::sync::Mutex;

/// Why a run ended without an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The generator returned an error or no usable text.
    GenerationFailed,
    /// The response contained no `Action:` line.
    MissingAction,
    /// The step bound was exhausted without a `Finish` action.
    StepLimit,
}

/// Events emitted by the agent loop, one or more per step.
///
/// `step` is the 1-based index of the iteration the event belongs to.
#[derive(Debug, Clone)]
pub enum StepEvent {
    /// The prompt rendered for this step.
    Prompt { step: usize, text: String },
    /// A `Thought:` line extracted from the model response.
    Thought { step: usize, text: String },
    /// An `Action:` line extracted from the model response.
    Action { step: usize, text: String },
    /// The action text did not match the tool-call grammar; the step was
    /// consumed without dispatching.
    MalformedAction { step: usize, action: String },
    /// The parsed tool name has no registered callable.
    UnknownTool { step: usize, name: String },
    /// Result of dispatching the action to a tool.
    Observation {
        step: usize,
        tool: String,
        text: String,
    },
    /// A `Finish` action produced the final answer.
    Finished { step: usize, answer: String },
    /// The run ended without an answer.
    Aborted { step: usize, reason: AbortReason },
}

/// Receiver for loop events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: StepEvent);
}

/// Default sink: narrates events through `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: StepEvent) {
        match event {
            StepEvent::Prompt { step, text } => {
                tracing::debug!("step {}: prompt:\n{}", step, text);
            }
            StepEvent::Thought { step, text } => {
                tracing::info!("step {}: thought: {}", step, text);
            }
            StepEvent::Action { step, text } => {
                tracing::info!("step {}: action: {}", step, text);
            }
            StepEvent::MalformedAction { step, action } => {
                tracing::warn!("step {}: action does not match name[input]: {}", step, action);
            }
            StepEvent::UnknownTool { step, name } => {
                tracing::warn!("step {}: no tool named '{}'", step, name);
            }
            StepEvent::Observation { step, tool, text } => {
                tracing::info!("step {}: observation from {}: {}", step, tool, text);
            }
            StepEvent::Finished { step, answer } => {
                tracing::info!("step {}: final answer: {}", step, answer);
            }
            StepEvent::Aborted { step, reason } => {
                tracing::warn!("step {}: aborted: {:?}", step, reason);
            }
        }
    }
}

/// Sink that records every event for later inspection, for tests and
/// embedders that render their own progress display.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<StepEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events emitted so far.
    pub fn events(&self) -> Vec<StepEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: StepEvent) {
        self.events.lock().unwrap().push(event);
    }
}
