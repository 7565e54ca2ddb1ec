//! Core agent loop implementation.

use std::sync::Arc;

use crate::llm::{ChatMessage, LlmClient};
use crate::tools::ToolRegistry;

use super::events::{AbortReason, EventSink, StepEvent, TracingSink};
use super::parser::{parse_action, parse_finish, parse_output};
use super::prompt::PromptTemplate;

/// Default bound on loop iterations.
pub const DEFAULT_MAX_STEPS: usize = 5;

/// Default sampling temperature for generation calls.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// The ReAct agent.
///
/// Owns the step loop: renders a prompt from the template, the tool catalog,
/// the question and the accumulated history; calls the generator; parses the
/// response into a thought and an action; dispatches tool calls; and stops on
/// a `Finish` action, an abort condition, or the step bound.
///
/// History is reset in place at the start of every [`run`](Agent::run), so an
/// `Agent` serves one run at a time; `run` takes `&mut self` to make that a
/// compile-time guarantee. Use one `Agent` per concurrent run.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    template: PromptTemplate,
    max_steps: usize,
    temperature: f32,
    sink: Arc<dyn EventSink>,
    history: Vec<String>,
}

impl Agent {
    /// Create an agent with the default step bound, temperature and
    /// tracing-backed event sink.
    pub fn new(llm: Arc<dyn LlmClient>, tools: ToolRegistry, template: PromptTemplate) -> Self {
        Self {
            llm,
            tools,
            template,
            max_steps: DEFAULT_MAX_STEPS,
            temperature: DEFAULT_TEMPERATURE,
            sink: Arc::new(TracingSink),
            history: Vec::new(),
        }
    }

    /// Bound the number of loop iterations.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the sampling temperature passed to the generator.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Replace the event sink.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Action/Observation lines accumulated by the most recent run.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Run the loop on a question.
    ///
    /// Returns the `Finish` payload, or `None` when the generator fails, the
    /// response carries no action, or the step bound is exhausted. The causes
    /// are not distinguished here; they are observable through the event
    /// sink.
    pub async fn run(&mut self, question: &str) -> Option<String> {
        self.history.clear();
        let catalog = self.tools.describe_all();

        for step in 1..=self.max_steps {
            tracing::debug!("step {} of {}", step, self.max_steps);

            // 1. Render the prompt. Pure substitution, cannot fail.
            let prompt = self
                .template
                .render(&catalog, question, &self.history.join("\n"));
            self.sink.emit(StepEvent::Prompt {
                step,
                text: prompt.clone(),
            });

            // 2. Call the generator with a single user message.
            let messages = [ChatMessage::user(prompt)];
            let response = match self.llm.generate(&messages, self.temperature).await {
                Ok(text) if !text.trim().is_empty() => text,
                Ok(_) => {
                    tracing::warn!("model returned an empty response");
                    self.sink.emit(StepEvent::Aborted {
                        step,
                        reason: AbortReason::GenerationFailed,
                    });
                    return None;
                }
                Err(e) => {
                    tracing::error!("generation failed: {}", e);
                    self.sink.emit(StepEvent::Aborted {
                        step,
                        reason: AbortReason::GenerationFailed,
                    });
                    return None;
                }
            };

            // 3. Extract thought and action. The thought is observability
            // only and never drives control flow.
            let parsed = parse_output(&response);
            if let Some(thought) = parsed.thought {
                self.sink.emit(StepEvent::Thought {
                    step,
                    text: thought,
                });
            }

            // 4. A response without an action ends the run.
            let Some(action) = parsed.action else {
                self.sink.emit(StepEvent::Aborted {
                    step,
                    reason: AbortReason::MissingAction,
                });
                return None;
            };
            self.sink.emit(StepEvent::Action {
                step,
                text: action.clone(),
            });

            // 5. Finish[answer] terminates with the payload.
            if let Some(answer) = parse_finish(&action) {
                self.sink.emit(StepEvent::Finished {
                    step,
                    answer: answer.clone(),
                });
                return Some(answer);
            }

            // 6. An action that does not match the grammar consumes the step
            // without touching history.
            let Some(call) = parse_action(&action) else {
                self.sink.emit(StepEvent::MalformedAction { step, action });
                continue;
            };

            // 7. Dispatch. Tool failures become observations, never faults.
            let observation = match self.tools.lookup(&call.name) {
                Some(tool) => tool
                    .call(&call.input)
                    .await
                    .unwrap_or_else(|e| format!("Error: {}", e)),
                None => {
                    self.sink.emit(StepEvent::UnknownTool {
                        step,
                        name: call.name.clone(),
                    });
                    format!("Error: no tool named '{}' is registered.", call.name)
                }
            };
            self.sink.emit(StepEvent::Observation {
                step,
                tool: call.name,
                text: observation.clone(),
            });

            // 8. Record the pair and continue.
            self.history.push(format!("Action: {}", action));
            self.history.push(format!("Observation: {}", observation));
        }

        tracing::warn!("step bound ({}) reached without a final answer", self.max_steps);
        self.sink.emit(StepEvent::Aborted {
            step: self.max_steps,
            reason: AbortReason::StepLimit,
        });
        None
    }
}
