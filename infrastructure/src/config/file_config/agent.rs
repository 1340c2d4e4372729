//! Agent configuration from TOML (`[agent]` section)

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use toolweave_application::{
    AgentParams, ChainOfThoughtStrategy, DecisionStrategy, FunctionCallingStrategy,
};

use crate::config::error::ConfigError;

/// How the agent turns model replies into actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    FunctionCalling,
    ChainOfThought,
}

impl StrategyKind {
    pub fn as_str(&self) -> &str {
        match self {
            StrategyKind::FunctionCalling => "function_calling",
            StrategyKind::ChainOfThought => "chain_of_thought",
        }
    }

    pub fn build(&self) -> Box<dyn DecisionStrategy> {
        match self {
            StrategyKind::FunctionCalling => Box::new(FunctionCallingStrategy),
            StrategyKind::ChainOfThought => Box::new(ChainOfThoughtStrategy::new()),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "function_calling" | "functions" => Ok(StrategyKind::FunctionCalling),
            "chain_of_thought" | "cot" => Ok(StrategyKind::ChainOfThought),
            other => Err(format!(
                "unknown strategy '{}', expected 'function_calling' or 'chain_of_thought'",
                other
            )),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// max_steps = 10
/// temperature = 0.0
/// strategy = "function_calling"   # or "chain_of_thought"
/// system_prompt = "You can use:\n{{$tools}}"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Tool executions allowed per objective
    pub max_steps: usize,
    /// Sampling temperature, 0.0 to 2.0
    pub temperature: f32,
    /// Decision strategy name
    pub strategy: String,
    /// Custom system prompt template
    pub system_prompt: Option<String>,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = AgentParams::default();
        Self {
            max_steps: params.max_steps,
            temperature: params.temperature,
            strategy: StrategyKind::FunctionCalling.as_str().to_string(),
            system_prompt: None,
        }
    }
}

impl FileAgentConfig {
    pub fn parse_strategy(&self) -> Result<StrategyKind, ConfigError> {
        self.strategy
            .parse()
            .map_err(|reason| ConfigError::invalid_value("agent.strategy", reason))
    }

    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.max_steps == 0 {
            errors.push(ConfigError::invalid_value(
                "agent.max_steps",
                "must be at least 1",
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            errors.push(ConfigError::invalid_value(
                "agent.temperature",
                format!("{} is outside 0.0..=2.0", self.temperature),
            ));
        }
        if let Err(e) = self.parse_strategy() {
            errors.push(e);
        }

        errors
    }

    pub fn to_agent_params(&self) -> AgentParams {
        let params = AgentParams::default()
            .with_max_steps(self.max_steps)
            .with_temperature(self.temperature);
        match &self.system_prompt {
            Some(prompt) => params.with_system_prompt(prompt.clone()),
            None => params,
        }
    }
}
