//! Prompt template for the agent.

use std::path::Path;

/// Placeholder substituted with the tool catalog.
pub const TOOLS_PLACEHOLDER: &str = "{tools}";
/// Placeholder substituted with the original question.
pub const QUESTION_PLACEHOLDER: &str = "{question}";
/// Placeholder substituted with the newline-joined Action/Observation lines.
pub const HISTORY_PLACEHOLDER: &str = "{history}";

/// Built-in ReAct template used when no custom template is supplied.
pub const DEFAULT_TEMPLATE: &str = r#"Answer the following question as best you can. You have access to these tools:

{tools}

Use the following format:

Thought: reason about what to do next
Action: ToolName[tool input]

The system will run the tool and append the result as an Observation line.
When you know the final answer, respond with:

Thought: I now know the final answer
Action: Finish[the answer]

Question: {question}

{history}
"#;

/// A prompt template with `{tools}`, `{question}` and `{history}`
/// placeholders.
///
/// Rendering is plain text substitution with no conditional logic; it cannot
/// fail.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    text: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl PromptTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Load a template from a file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// Substitute the tool catalog, question and history into the template.
    pub fn render(&self, tools: &str, question: &str, history: &str) -> String {
        self.text
            .replace(TOOLS_PLACEHOLDER, tools)
            .replace(QUESTION_PLACEHOLDER, question)
            .replace(HISTORY_PLACEHOLDER, history)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn render_substitutes_all_placeholders() {
        let template = PromptTemplate::new("T={tools} Q={question} H={history}");
        let rendered = template.render("catalog", "why?", "Action: a\nObservation: b");
        assert_eq!(rendered, "T=catalog Q=why? H=Action: a\nObservation: b");
    }

    #[test]
    fn default_template_carries_placeholders() {
        for placeholder in [TOOLS_PLACEHOLDER, QUESTION_PLACEHOLDER, HISTORY_PLACEHOLDER] {
            assert!(DEFAULT_TEMPLATE.contains(placeholder));
        }
    }

    #[test]
    fn from_file_reads_template() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Q: {{question}}").unwrap();

        let template = PromptTemplate::from_file(file.path()).unwrap();
        assert_eq!(template.render("", "hi", ""), "Q: hi");
    }
}
