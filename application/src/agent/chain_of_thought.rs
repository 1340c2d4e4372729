//! Chain-of-thought strategy
//!
//! The model replies in free text using three tags:
//!
//! ```text
//! Thought: I need the length of each fruit name.
//! Action: {"tool": "string_length", "parameters": {"text": "Apple"}}
//! ...
//! Final Answer: 26
//! ```
//!
//! The action payload may also be wrapped in a json code fence.
//!
//! A `Final Answer:` wins over everything else. Thoughts, actions and tool
//! observations accumulate in an append-only scratchpad that is replayed to
//! the model on every request.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;
use serde_json::{Map, Value};
use toolweave_domain::{
    AgentAction, AgentPromptTemplate, ExecutionContext, FinishAction, FunctionDescriptor, Message,
    ModelResponse, Role, ToolAction, ToolsCollection,
};
use tracing::debug;

use super::strategy::DecisionStrategy;
use crate::ports::language_model::{LanguageModel, ModelError};

// Tags only count as whole words: "reaction:" is not an action.
static FINAL_ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bfinal answer:\s*(.*)\z").expect("static regex is valid")
});

static THOUGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)\bthought:\s*(.*?)\s*(?:\baction:|\bfinal answer:|\z)")
        .expect("static regex is valid")
});

static ACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)\baction:\s*(.*)\z").expect("static regex is valid"));

#[derive(Debug, Deserialize)]
struct ActionPayload {
    tool: String,
    #[serde(default, alias = "args", alias = "arguments")]
    parameters: Map<String, Value>,
}

#[derive(Debug, Default)]
pub struct ChainOfThoughtStrategy {
    scratchpad: String,
}

impl ChainOfThoughtStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scratchpad(&self) -> &str {
        &self.scratchpad
    }

    fn record(&mut self, entry: &str) {
        self.scratchpad.push_str(entry);
        self.scratchpad.push('\n');
    }

    fn parse_text(&mut self, text: &str, tools: &ToolsCollection) -> AgentAction {
        let thought = THOUGHT
            .captures(text)
            .map(|c| c[1].trim().to_string())
            .filter(|t| !t.is_empty());

        if let Some(answer) = FINAL_ANSWER.captures(text) {
            let answer = answer[1].trim().to_string();
            let mut finish = FinishAction::output(answer);
            if let Some(thought) = thought {
                self.record(&format!("Thought: {}", thought));
                finish = finish.with_rationale(thought);
            }
            return finish.into();
        }

        let Some(action) = ACTION.captures(text) else {
            let text = text.trim();
            self.record(&format!("Thought: {}", thought.as_deref().unwrap_or(text)));
            return FinishAction::output(text)
                .with_rationale(thought.unwrap_or_else(|| text.to_string()))
                .into();
        };

        let payload = match parse_action(&action[1]) {
            Ok(payload) => payload,
            Err(reason) => {
                return FinishAction::error(format!("Could not parse action: {}", reason)).into();
            }
        };

        let Some(tool) = tools.get_tool(&payload.tool) else {
            return FinishAction::error(format!("Unknown tool '{}' in action", payload.tool))
                .into();
        };

        let thought = thought.unwrap_or_default();
        if !thought.is_empty() {
            self.record(&format!("Thought: {}", thought));
        }
        self.record(&format!(
            "Action: {}",
            serde_json::json!({"tool": payload.tool, "parameters": payload.parameters})
        ));
        debug!(tool = %payload.tool, "Parsed chain-of-thought action");

        let context: ExecutionContext = payload.parameters.into_iter().collect();
        let action = ToolAction::new(tool, context);
        if thought.is_empty() {
            action.into()
        } else {
            action.with_rationale(thought).into()
        }
    }
}

/// Extract the JSON object of an `Action:` segment, with or without a code fence.
fn parse_action(segment: &str) -> Result<ActionPayload, String> {
    let start = segment
        .find('{')
        .ok_or_else(|| "no JSON object after 'Action:'".to_string())?;
    let end = segment
        .rfind('}')
        .filter(|end| *end > start)
        .ok_or_else(|| "unterminated JSON object after 'Action:'".to_string())?;

    serde_json::from_str(&segment[start..=end]).map_err(|e| e.to_string())
}

#[async_trait]
impl DecisionStrategy for ChainOfThoughtStrategy {
    fn name(&self) -> &str {
        "chain_of_thought"
    }

    fn system_prompt(&self, functions: &[FunctionDescriptor]) -> String {
        AgentPromptTemplate::chain_of_thought_system(functions)
    }

    /// Sends the seed prompts plus the scratchpad; tool results reach the
    /// model as scratchpad observations.
    async fn request(
        &self,
        model: &dyn LanguageModel,
        history: &[Message],
        _tools: &ToolsCollection,
        temperature: f32,
    ) -> Result<ModelResponse, ModelError> {
        let mut messages: Vec<Message> = history
            .iter()
            .filter(|m| matches!(m.role, Role::System | Role::User))
            .cloned()
            .collect();
        if !self.scratchpad.is_empty() {
            messages.push(Message::user(AgentPromptTemplate::chain_of_thought_continue(
                &self.scratchpad,
            )));
        }
        model.get_response(&messages, temperature).await
    }

    fn parse_response(
        &mut self,
        response: &ModelResponse,
        tools: &ToolsCollection,
    ) -> AgentAction {
        match response {
            ModelResponse::Done { text } | ModelResponse::Partial { text } => {
                self.parse_text(text, tools)
            }
            ModelResponse::Failed { reason } => {
                FinishAction::error(format!("Model failed to respond: {}", reason)).into()
            }
            ModelResponse::FunctionCall(call) => FinishAction::error(format!(
                "Unexpected function call '{}' in chain-of-thought mode",
                call.name
            ))
            .into(),
        }
    }

    fn observe(&mut self, _tool: &str, output: &str) {
        self.record(&format!("Observation: {}", output));
    }

    fn reset(&mut self) {
        self.scratchpad.clear();
    }
}
