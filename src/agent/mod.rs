//! Agent module - the ReAct control loop.
//!
//! The agent interleaves reasoning and acting:
//! 1. Render a prompt with the tool catalog, question and history
//! 2. Call the generator and extract a Thought and an Action line
//! 3. Dispatch `Name[input]` actions to tools, record the Observation
//! 4. Repeat until `Finish[answer]`, an abort, or the step bound

mod agent_loop;
mod events;
mod parser;
mod prompt;

pub use agent_loop::{Agent, DEFAULT_MAX_STEPS, DEFAULT_TEMPERATURE};
pub use events::{AbortReason, EventSink, MemorySink, StepEvent, TracingSink};
pub use parser::{parse_action, parse_finish, parse_output, ParsedAction, ParsedOutput};
pub use prompt::{PromptTemplate, DEFAULT_TEMPLATE};
