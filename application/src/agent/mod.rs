//! Agent: the decision loop
//!
//! ```text
//! execute(objective)
//!   │  reset, seed system + user prompts
//!   ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │ strategy.request() → strategy.parse_response()           │
//! │   Finish                    → return (Finished)          │
//! │   Tool, step > max_steps    → return Finish(error)       │
//! │   Tool, output non-empty    → record, observe, loop      │◀─┐
//! │   Tool, output empty        → return the action (Paused) │  │
//! └──────────────────────────────────────────────────────────┘  │
//!                       update_agent_action_response(tool, out) ─┘
//! ```
//!
//! The agent never returns an error: model failures, unparseable replies
//! and the step budget all end in a [`FinishAction`] with `error` set.

pub mod chain_of_thought;
pub mod function_calling;
pub mod step;
pub mod strategy;

pub use chain_of_thought::ChainOfThoughtStrategy;
pub use function_calling::FunctionCallingStrategy;
pub use step::AgentStep;
pub use strategy::DecisionStrategy;

use std::sync::Arc;

use serde_json::Value;
use toolweave_domain::{
    AgentAction, AgentPromptTemplate, AgentState, ExecutionContext, FinishAction, Message,
    ModelResponse, PromptTemplate, ToolsCollection,
};
use tracing::{debug, info, warn};

use crate::config::AgentParams;
use crate::ports::language_model::LanguageModel;

/// Autonomous tool-using agent
pub struct Agent {
    model: Arc<dyn LanguageModel>,
    tools: Arc<ToolsCollection>,
    strategy: Box<dyn DecisionStrategy>,
    params: AgentParams,
    history: Vec<Message>,
    steps: Vec<AgentStep>,
    state: AgentState,
    step_count: usize,
    /// Rationale of the action the agent is paused on
    paused_on: Option<(String, Option<String>)>,
}

impl Agent {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        tools: Arc<ToolsCollection>,
        strategy: Box<dyn DecisionStrategy>,
        params: AgentParams,
    ) -> Self {
        Self {
            model,
            tools,
            strategy,
            params,
            history: Vec::new(),
            steps: Vec::new(),
            state: AgentState::Idle,
            step_count: 0,
            paused_on: None,
        }
    }

    pub fn state(&self) -> AgentState {
        self.state
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn steps(&self) -> &[AgentStep] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn params(&self) -> &AgentParams {
        &self.params
    }

    pub fn tools(&self) -> &ToolsCollection {
        &self.tools
    }

    /// Start working on `objective`, discarding any previous run.
    pub async fn execute(&mut self, objective: &str) -> AgentAction {
        self.history.clear();
        self.steps.clear();
        self.step_count = 0;
        self.paused_on = None;
        self.strategy.reset();

        let system_prompt = match self.system_prompt() {
            Ok(prompt) => prompt,
            Err(error) => return self.finish(FinishAction::error(error)),
        };
        self.history.push(Message::system(system_prompt));
        self.history
            .push(Message::user(self.strategy.user_prompt(objective)));

        info!(
            strategy = self.strategy.name(),
            max_steps = self.params.max_steps,
            "Agent started"
        );
        self.state = AgentState::Running;
        self.run_loop().await
    }

    /// Report the output of a tool the caller ran for a paused agent and
    /// continue the loop.
    pub async fn update_agent_action_response(&mut self, tool: &str, output: &str) -> AgentAction {
        if self.state != AgentState::Paused {
            warn!(state = %self.state, tool, "Agent is not waiting for a tool response");
            return FinishAction::error(format!(
                "Agent is {}, not waiting for a response from '{}'",
                self.state, tool
            ))
            .into();
        }

        if let Some((expected, _)) = &self.paused_on
            && expected != tool
        {
            warn!(expected = %expected, tool, "Response does not match the paused action");
            return FinishAction::error(format!(
                "Agent is paused on '{}', not waiting for a response from '{}'",
                expected, tool
            ))
            .into();
        }

        let rationale = self.paused_on.take().and_then(|(_, rationale)| rationale);

        info!(tool, "Agent resumed");
        self.record_output(tool, rationale, output);
        self.state = AgentState::Running;
        self.run_loop().await
    }

    fn system_prompt(&self) -> Result<String, String> {
        let functions = self.tools.functions();
        match &self.params.system_prompt {
            Some(template) => {
                let context = ExecutionContext::new().with(
                    "tools",
                    Value::String(AgentPromptTemplate::tool_descriptions(&functions)),
                );
                PromptTemplate::new(template.as_str())
                    .render(&context)
                    .map_err(|e| format!("Invalid system prompt template: {}", e))
            }
            None => Ok(self.strategy.system_prompt(&functions)),
        }
    }

    async fn run_loop(&mut self) -> AgentAction {
        loop {
            let response = match self
                .strategy
                .request(
                    self.model.as_ref(),
                    &self.history,
                    &self.tools,
                    self.params.temperature,
                )
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, "Model request failed");
                    return self.finish(FinishAction::error(format!("Model request failed: {}", e)));
                }
            };

            match &response {
                ModelResponse::Done { text } | ModelResponse::Partial { text } => {
                    self.history.push(Message::assistant(text.clone()));
                }
                ModelResponse::FunctionCall(call) => {
                    self.history.push(Message::assistant_call(call.clone()));
                }
                ModelResponse::Failed { .. } => {}
            }

            let mut action = match self.strategy.parse_response(&response, &self.tools) {
                AgentAction::Finish(finish) => return self.finish(finish),
                AgentAction::Tool(action) => action,
            };

            self.step_count += 1;
            if self.step_count > self.params.max_steps {
                warn!(max_steps = self.params.max_steps, "Agent step budget exhausted");
                return self.finish(FinishAction::error(format!(
                    "Exceeded maximum allowed steps ({})",
                    self.params.max_steps
                )));
            }

            let tool = action.tool_name().to_string();
            debug!(step = self.step_count, tool = %tool, "Executing agent action");
            let output = action.execute().await;

            if output.is_empty() {
                info!(step = self.step_count, tool = %tool, "Agent paused for external tool");
                self.paused_on = Some((tool, action.rationale.clone()));
                self.state = AgentState::Paused;
                return AgentAction::Tool(action);
            }

            self.record_output(&tool, action.rationale.clone(), &output);
        }
    }

    fn record_output(&mut self, tool: &str, rationale: Option<String>, output: &str) {
        self.history.push(Message::function(tool, output));
        self.steps.push(AgentStep::new(tool, rationale, output));
        self.strategy.observe(tool, output);
    }

    fn finish(&mut self, finish: FinishAction) -> AgentAction {
        self.state = AgentState::Finished;
        match &finish.error {
            Some(error) => info!(steps = self.step_count, error = %error, "Agent finished with error"),
            None => info!(steps = self.step_count, "Agent finished"),
        }
        AgentAction::Finish(finish)
    }
}
