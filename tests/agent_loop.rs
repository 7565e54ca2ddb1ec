//! End-to-end tests for the agent loop against a scripted generator.

use std::sync::Arc;

use async_trait::async_trait;

use reagent::agent::{AbortReason, StepEvent};
use reagent::{Agent, MemorySink, PromptTemplate, ScriptedLlm, Tool, ToolRegistry};

fn echo_registry() -> ToolRegistry {
    let mut tools = ToolRegistry::new();
    tools.register_fn("Echo", "repeats its input", |input| format!("echo: {}", input));
    tools
}

struct FailingTool;

#[async_trait]
impl Tool for FailingTool {
    fn name(&self) -> &str {
        "Broken"
    }

    fn description(&self) -> &str {
        "always fails"
    }

    async fn call(&self, _input: &str) -> anyhow::Result<String> {
        anyhow::bail!("disk on fire")
    }
}

#[tokio::test]
async fn finish_on_first_step_returns_payload() {
    let llm = Arc::new(ScriptedLlm::new().respond("Thought: done\nAction: Finish[42]"));
    let mut agent = Agent::new(llm.clone(), echo_registry(), PromptTemplate::default());

    assert_eq!(agent.run("q").await.as_deref(), Some("42"));
    assert_eq!(llm.calls(), 1);
    assert!(agent.history().is_empty());
}

#[tokio::test]
async fn finish_on_step_k_leaves_k_minus_one_pairs() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .respond("Thought: search\nAction: Echo[first]")
            .respond("Thought: again\nAction: Echo[second]")
            .respond("Thought: done\nAction: Finish[answer]"),
    );
    let mut agent = Agent::new(llm.clone(), echo_registry(), PromptTemplate::default());

    assert_eq!(agent.run("q").await.as_deref(), Some("answer"));
    assert_eq!(llm.calls(), 3);
    assert_eq!(agent.history().len(), 4);
    assert_eq!(agent.history()[0], "Action: Echo[first]");
    assert_eq!(agent.history()[1], "Observation: echo: first");
    assert_eq!(agent.history()[2], "Action: Echo[second]");
    assert_eq!(agent.history()[3], "Observation: echo: second");
}

#[tokio::test]
async fn exhausting_steps_returns_no_answer() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .respond("Action: Echo[a]")
            .respond("Action: Echo[b]")
            .respond("Action: Echo[c]"),
    );
    let sink = Arc::new(MemorySink::new());
    let mut agent = Agent::new(llm.clone(), echo_registry(), PromptTemplate::default())
        .with_max_steps(3)
        .with_event_sink(sink.clone());

    assert_eq!(agent.run("q").await, None);
    assert_eq!(llm.calls(), 3);
    assert_eq!(agent.history().len(), 6);
    assert!(matches!(
        sink.events().last(),
        Some(StepEvent::Aborted {
            reason: AbortReason::StepLimit,
            ..
        })
    ));
}

#[tokio::test]
async fn default_step_bound_is_five() {
    let mut script = ScriptedLlm::new();
    for _ in 0..10 {
        script = script.respond("Action: Echo[x]");
    }
    let llm = Arc::new(script);
    let mut agent = Agent::new(llm.clone(), echo_registry(), PromptTemplate::default());

    assert_eq!(agent.run("q").await, None);
    assert_eq!(llm.calls(), 5);
    assert_eq!(agent.history().len(), 10);
}

#[tokio::test]
async fn unknown_tool_becomes_observation_and_run_continues() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .respond("Thought: try\nAction: Missing[x]")
            .respond("Thought: ok\nAction: Finish[done]"),
    );
    let sink = Arc::new(MemorySink::new());
    let mut agent = Agent::new(llm.clone(), echo_registry(), PromptTemplate::default())
        .with_event_sink(sink.clone());

    assert_eq!(agent.run("q").await.as_deref(), Some("done"));
    assert_eq!(agent.history().len(), 2);
    assert_eq!(agent.history()[0], "Action: Missing[x]");
    assert!(agent.history()[1].contains("Missing"));
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, StepEvent::UnknownTool { step: 1, name } if name == "Missing")));
}

#[tokio::test]
async fn tool_failure_becomes_error_observation() {
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(FailingTool));
    let llm = Arc::new(
        ScriptedLlm::new()
            .respond("Action: Broken[x]")
            .respond("Action: Finish[survived]"),
    );
    let mut agent = Agent::new(llm, tools, PromptTemplate::default());

    assert_eq!(agent.run("q").await.as_deref(), Some("survived"));
    assert_eq!(agent.history()[1], "Observation: Error: disk on fire");
}

#[tokio::test]
async fn generator_error_aborts_without_history() {
    let llm = Arc::new(ScriptedLlm::new().fail("connection reset"));
    let sink = Arc::new(MemorySink::new());
    let mut agent = Agent::new(llm.clone(), echo_registry(), PromptTemplate::default())
        .with_event_sink(sink.clone());

    assert_eq!(agent.run("q").await, None);
    assert_eq!(llm.calls(), 1);
    assert!(agent.history().is_empty());
    assert!(matches!(
        sink.events().last(),
        Some(StepEvent::Aborted {
            step: 1,
            reason: AbortReason::GenerationFailed,
        })
    ));
}

#[tokio::test]
async fn empty_completion_counts_as_generation_failure() {
    let llm = Arc::new(ScriptedLlm::new().respond("   \n  "));
    let sink = Arc::new(MemorySink::new());
    let mut agent = Agent::new(llm, echo_registry(), PromptTemplate::default())
        .with_event_sink(sink.clone());

    assert_eq!(agent.run("q").await, None);
    assert!(matches!(
        sink.events().last(),
        Some(StepEvent::Aborted {
            reason: AbortReason::GenerationFailed,
            ..
        })
    ));
}

#[tokio::test]
async fn thought_without_action_aborts_immediately() {
    let llm = Arc::new(ScriptedLlm::new().respond("Thought: pondering, no action"));
    let sink = Arc::new(MemorySink::new());
    let mut agent = Agent::new(llm.clone(), echo_registry(), PromptTemplate::default())
        .with_event_sink(sink.clone());

    assert_eq!(agent.run("q").await, None);
    assert_eq!(llm.calls(), 1);
    assert!(agent.history().is_empty());

    let events = sink.events();
    assert!(events
        .iter()
        .any(|e| matches!(e, StepEvent::Thought { step: 1, .. })));
    assert!(matches!(
        events.last(),
        Some(StepEvent::Aborted {
            step: 1,
            reason: AbortReason::MissingAction,
        })
    ));
}

#[tokio::test]
async fn malformed_action_consumes_step_without_history() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .respond("Thought: hm\nAction: Echo no brackets")
            .respond("Action: Finish[recovered]"),
    );
    let sink = Arc::new(MemorySink::new());
    let mut agent = Agent::new(llm.clone(), echo_registry(), PromptTemplate::default())
        .with_event_sink(sink.clone());

    assert_eq!(agent.run("q").await.as_deref(), Some("recovered"));
    assert_eq!(llm.calls(), 2);
    assert!(agent.history().is_empty());
    assert!(sink
        .events()
        .iter()
        .any(|e| matches!(e, StepEvent::MalformedAction { step: 1, .. })));
}

#[tokio::test]
async fn greedy_bracket_argument_reaches_the_tool() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .respond("Action: Echo[a[b]c]")
            .respond("Action: Finish[ok]"),
    );
    let mut agent = Agent::new(llm, echo_registry(), PromptTemplate::default());

    assert_eq!(agent.run("q").await.as_deref(), Some("ok"));
    assert_eq!(agent.history()[1], "Observation: echo: a[b]c");
}

#[tokio::test]
async fn sequential_runs_have_independent_histories() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .respond("Action: Echo[from first run]")
            .respond("Action: Finish[one]")
            .respond("Action: Finish[two]"),
    );
    let mut agent = Agent::new(llm, echo_registry(), PromptTemplate::default());

    assert_eq!(agent.run("first").await.as_deref(), Some("one"));
    assert_eq!(agent.history().len(), 2);

    assert_eq!(agent.run("second").await.as_deref(), Some("two"));
    assert!(agent.history().is_empty());
}

#[tokio::test]
async fn history_feeds_back_into_the_prompt() {
    let llm = Arc::new(
        ScriptedLlm::new()
            .respond("Action: Echo[alpha]")
            .respond("Action: Finish[ok]"),
    );
    let sink = Arc::new(MemorySink::new());
    let template = PromptTemplate::new("{tools}|{question}|{history}");
    let mut agent = Agent::new(llm, echo_registry(), template).with_event_sink(sink.clone());

    agent.run("the question").await;

    let prompts: Vec<String> = sink
        .events()
        .iter()
        .filter_map(|e| match e {
            StepEvent::Prompt { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].ends_with("|the question|"));
    assert!(prompts[1].contains("Action: Echo[alpha]\nObservation: echo: alpha"));
    assert!(prompts[1].contains("- **Echo**: repeats its input"));
}
