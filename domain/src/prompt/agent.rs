//! Prompt templates for the agent decision strategies

use crate::tool::entities::FunctionDescriptor;

/// Templates for generating agent prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// Human-readable list of the available functions
    pub fn tool_descriptions(functions: &[FunctionDescriptor]) -> String {
        functions
            .iter()
            .map(|f| {
                let params = f
                    .parameters
                    .iter()
                    .map(|p| {
                        let required = if p.required { " (required)" } else { "" };
                        format!("    - {} ({}): {}{}", p.name, p.ty, p.description, required)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                if params.is_empty() {
                    format!("- **{}**: {}", f.name, f.description)
                } else {
                    format!("- **{}**: {}\n  Parameters:\n{}", f.name, f.description, params)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// System prompt when the model calls functions natively
    pub fn function_calling_system(functions: &[FunctionDescriptor]) -> String {
        format!(
            r#"You are an autonomous assistant that completes objectives by calling functions.

## Available Functions

{tools}

## Guidelines

1. Call exactly one function at a time and wait for its result
2. Use the results of earlier calls when choosing the next one
3. When the objective is complete, reply with the final answer as plain text
"#,
            tools = Self::tool_descriptions(functions)
        )
    }

    /// System prompt for the free-text Thought/Action/Final Answer loop
    pub fn chain_of_thought_system(functions: &[FunctionDescriptor]) -> String {
        format!(
            r#"You are an autonomous assistant that completes objectives step by step.

## Available Tools

{tools}

## Response Format

Think about what to do next, then either use a tool:

Thought: what you need to find out and why
Action:
```json
{{
  "tool": "tool_name",
  "parameters": {{
    "name": "value"
  }}
}}
```

or, once you know the answer:

Thought: why the objective is complete
Final Answer: the answer to the objective

Use exactly one Action per response and stop after it; the observation will be provided.
"#,
            tools = Self::tool_descriptions(functions)
        )
    }

    /// User prompt carrying the objective
    pub fn objective(objective: &str) -> String {
        format!("Objective: {}", objective)
    }

    /// Follow-up prompt replaying the thought/observation scratchpad
    pub fn chain_of_thought_continue(scratchpad: &str) -> String {
        format!(
            "Progress so far:\n\n{}\n\nContinue with the next Thought.",
            scratchpad.trim_end()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ParameterDescriptor, TypeDescriptor};

    fn add() -> FunctionDescriptor {
        FunctionDescriptor::new("add", "Add two numbers").with_parameters([
            ParameterDescriptor::new("a", "First number", true).with_type(TypeDescriptor::number()),
            ParameterDescriptor::new("b", "Second number", true)
                .with_type(TypeDescriptor::number()),
        ])
    }

    #[test]
    fn test_tool_descriptions() {
        let text = AgentPromptTemplate::tool_descriptions(&[
            add(),
            FunctionDescriptor::new("now", "Current time"),
        ]);

        assert!(text.contains("- **add**: Add two numbers"));
        assert!(text.contains("    - a (number): First number (required)"));
        assert!(text.contains("- **now**: Current time"));
    }

    #[test]
    fn test_chain_of_thought_system_mentions_tags() {
        let prompt = AgentPromptTemplate::chain_of_thought_system(&[add()]);
        assert!(prompt.contains("Thought:"));
        assert!(prompt.contains("Action:"));
        assert!(prompt.contains("Final Answer:"));
        assert!(prompt.contains("\"tool\": \"tool_name\""));
    }

    #[test]
    fn test_objective() {
        assert_eq!(
            AgentPromptTemplate::objective("sum the fruits"),
            "Objective: sum the fruits"
        );
    }
}
