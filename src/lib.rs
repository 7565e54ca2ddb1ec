//! # reagent
//!
//! A bounded ReAct agent loop over a plain-text tool protocol.
//!
//! This library provides:
//! - An agent loop that interleaves model "thoughts" with tool calls
//! - A registry of single-string-in, single-string-out tools
//! - An OpenAI-compatible generation client (plus a scripted one for tests)
//!
//! ## Architecture
//!
//! Each step of a run follows one cycle:
//! 1. Render the prompt from a template, the tool catalog, the question and
//!    the accumulated Action/Observation history
//! 2. Call the generator, parse `Thought:` and `Action:` lines leniently
//! 3. Dispatch `Name[input]` actions to tools; `Finish[answer]` ends the run
//! 4. Append the Action/Observation pair to history and repeat, at most
//!    `max_steps` times
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use reagent::{Agent, OpenAiClient, PromptTemplate, ToolRegistry, WebSearch};
//!
//! let llm = Arc::new(OpenAiClient::new(api_key, model).with_base_url(base_url));
//! let mut tools = ToolRegistry::new();
//! tools.register(Arc::new(WebSearch));
//! let mut agent = Agent::new(llm, tools, PromptTemplate::default());
//! let answer = agent.run("What is Google's latest phone?").await;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod tools;

pub use agent::{Agent, EventSink, MemorySink, PromptTemplate, StepEvent, TracingSink};
pub use config::Config;
pub use llm::{LlmClient, OpenAiClient, ScriptedLlm};
pub use tools::{Tool, ToolRegistry, WebSearch};
