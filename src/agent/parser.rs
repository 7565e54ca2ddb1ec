//! Parsers for the model-facing text protocol.
//!
//! The model is expected to emit lines of the form `Thought: <text>` and
//! `Action: <text>`, where the action payload is either a tool call
//! `Name[argument]` or the terminal signal `Finish[answer]`. None of this is
//! guaranteed to be well-formed; every parser here degrades to "absent"
//! instead of failing.

use std::sync::LazyLock;

use regex::Regex;

static THOUGHT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Thought: (.*)").unwrap());
static ACTION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Action: (.*)").unwrap());
static TOOL_CALL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\w+)\[(.*)\]$").unwrap());
static FINISH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^Finish\[(.*)\]$").unwrap());

/// Thought and action extracted from one raw generation response.
///
/// The two fields are independent: a response may carry a thought without an
/// action and vice versa.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOutput {
    pub thought: Option<String>,
    pub action: Option<String>,
}

/// A dispatchable tool call extracted from an action directive.
///
/// Name and input always come together; a failed parse yields no
/// `ParsedAction` at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAction {
    pub name: String,
    pub input: String,
}

/// Extract the first `Thought:` and first `Action:` lines from a response.
///
/// Each capture runs to the end of its line and is trimmed of surrounding
/// whitespace. Later occurrences of either prefix are ignored.
pub fn parse_output(text: &str) -> ParsedOutput {
    let capture = |re: &Regex| {
        re.captures(text)
            .map(|c| c[1].trim().to_string())
    };

    ParsedOutput {
        thought: capture(&THOUGHT_RE),
        action: capture(&ACTION_RE),
    }
}

/// Parse an action directive into a tool name and argument.
///
/// The grammar is `name[argument]`, anchored at both ends of the text. The
/// argument capture is greedy: with multiple `]` characters the argument
/// extends to the last one, so `Search[a[b]c]` yields argument `a[b]c`. Text
/// that does not start with `name[` or does not end with `]` fails wholesale.
pub fn parse_action(action_text: &str) -> Option<ParsedAction> {
    TOOL_CALL_RE.captures(action_text).map(|c| ParsedAction {
        name: c[1].to_string(),
        input: c[2].to_string(),
    })
}

/// Extract the final-answer payload from a `Finish[answer]` directive.
///
/// Applies the same greedy bracket rule as [`parse_action`], anchored after
/// the literal `Finish`. An action that merely starts with the letters
/// `Finish` without a matching bracketed payload is not a finish signal.
pub fn parse_finish(action_text: &str) -> Option<String> {
    FINISH_RE
        .captures(action_text)
        .map(|c| c[1].to_string())
}
