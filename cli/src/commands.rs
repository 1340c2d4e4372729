//! Subcommand handlers
//!
//! Each handler returns the text to print. A tool output carrying the
//! `ERROR:` sentinel becomes an error so the process exits non-zero.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use toolweave_application::{MapReduce, Pipeline, PromptTool};
use toolweave_domain::{ExecutionContext, Tool, ToolsCollection, is_error_output};
use toolweave_infrastructure::{ConfigLoader, FileConfig, builtin_collection};
use tracing::{debug, info};

use crate::args::Command;

/// Stage prefix that turns the rest of the argument into a prompt template
pub const PROMPT_STAGE_PREFIX: &str = "prompt:";

pub async fn run(command: Command, config: &FileConfig) -> Result<String> {
    let tools = builtin_collection()
        .await
        .context("Failed to register builtin functions")?;

    match command {
        Command::Functions => functions(&tools),
        Command::Call { tool, args } => call(&tools, &tool, &args).await,
        Command::Pipeline { stages, args } => pipeline(&tools, &stages, &args).await,
        Command::MapReduce {
            mapper,
            reducer,
            args,
            max_concurrency,
        } => {
            let max = max_concurrency.unwrap_or(config.map_reduce.max_concurrency);
            map_reduce(&tools, &mapper, &reducer, &args, max).await
        }
        Command::Config => show_config(config),
    }
}

fn functions(tools: &ToolsCollection) -> Result<String> {
    Ok(serde_json::to_string_pretty(&tools.function_schemas())?)
}

async fn call(tools: &ToolsCollection, tool: &str, args: &[String]) -> Result<String> {
    let mut context = context_from_args(args)?;
    let output = tools
        .execute(tool, &mut context)
        .await
        .with_context(|| format!("Cannot call '{}'", tool))?;
    check_output(output)
}

async fn pipeline(tools: &ToolsCollection, stages: &[String], args: &[String]) -> Result<String> {
    let pipeline = build_pipeline(tools, stages)?;
    info!(stages = pipeline.len(), "Running pipeline");

    let mut context = context_from_args(args)?;
    check_output(pipeline.execute(&mut context).await)
}

async fn map_reduce(
    tools: &ToolsCollection,
    mapper: &str,
    reducer: &str,
    args: &[String],
    max_concurrency: usize,
) -> Result<String> {
    let job = MapReduce::new(
        "map_reduce",
        format!("Map '{}' over the inputs, then reduce with '{}'", mapper, reducer),
        lookup(tools, mapper)?,
        lookup(tools, reducer)?,
    )
    .with_max_concurrency(max_concurrency);
    info!(mapper, reducer, max_concurrency, "Running map-reduce");

    let mut context = context_from_args(args)?;
    check_output(job.execute(&mut context).await)
}

fn show_config(config: &FileConfig) -> Result<String> {
    let mut out = String::from("# Configuration sources (later sources win)\n");
    if let Some(path) = ConfigLoader::global_config_path() {
        let mark = if path.exists() { "FOUND" } else { "     " };
        out.push_str(&format!("# [{}] Global:  {}\n", mark, path.display()));
    }
    match ConfigLoader::project_config_path() {
        Some(path) => out.push_str(&format!("# [FOUND] Project: {}\n", path.display())),
        None => out.push_str("# [     ] Project: ./toolweave.toml\n"),
    }
    out.push('\n');
    out.push_str(&toml::to_string_pretty(config).context("Failed to render configuration")?);
    Ok(out)
}

fn lookup(tools: &ToolsCollection, name: &str) -> Result<Arc<dyn Tool>> {
    if let Some(tool) = tools.get_tool(name) {
        return Ok(tool);
    }
    let mut available: Vec<&str> = tools.names().collect();
    available.sort_unstable();
    bail!(
        "Unknown function '{}'. Available: {}",
        name,
        available.join(", ")
    )
}

fn check_output(output: String) -> Result<String> {
    if is_error_output(&output) {
        bail!("{}", output);
    }
    Ok(output)
}

/// Build a pipeline from stage arguments: a function name, or
/// `prompt:<template>` for an inline prompt stage.
pub fn build_pipeline(tools: &ToolsCollection, stages: &[String]) -> Result<Pipeline> {
    let mut pipeline = Pipeline::new("pipeline", "Pipeline assembled on the command line");

    for (index, stage) in stages.iter().enumerate() {
        let tool: Arc<dyn Tool> = match stage.strip_prefix(PROMPT_STAGE_PREFIX) {
            Some(template) => Arc::new(PromptTool::new(
                format!("prompt_{}", index + 1),
                "Inline prompt stage",
                template,
            )),
            None => lookup(tools, stage)?,
        };
        if !pipeline.add_tool(tool) {
            debug!(stage = %stage, "Stage skipped");
        }
    }

    if pipeline.is_empty() {
        bail!("No usable pipeline stages");
    }
    Ok(pipeline)
}

/// Parse `name=value` pairs into a context. Values that are valid JSON keep
/// their JSON type; anything else is text.
pub fn context_from_args(args: &[String]) -> Result<ExecutionContext> {
    let mut context = ExecutionContext::new();
    for raw in args {
        let (name, value) = parse_assignment(raw)?;
        context.set(name, value);
    }
    Ok(context)
}

pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("Expected name=value, got '{}'", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing parameter name in '{}'", raw);
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("a=5.4").unwrap(), ("a".to_string(), json!(5.4)));
        assert_eq!(
            parse_assignment("text=Apple").unwrap(),
            ("text".to_string(), json!("Apple"))
        );
        assert_eq!(
            parse_assignment("items=[1,2]").unwrap(),
            ("items".to_string(), json!([1, 2]))
        );
        assert_eq!(
            parse_assignment("expr=a=b").unwrap(),
            ("expr".to_string(), json!("a=b"))
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=1").is_err());
    }

    #[tokio::test]
    async fn test_call() {
        let tools = builtin_collection().await.unwrap();

        let output = call(&tools, "add", &args(&["a=5.4", "b=4.8"])).await.unwrap();

        assert_eq!(output, "10.2");
    }

    #[tokio::test]
    async fn test_call_failure_is_an_error() {
        let tools = builtin_collection().await.unwrap();

        let err = call(&tools, "add", &args(&["a=1"])).await.unwrap_err();
        assert!(err.to_string().starts_with("ERROR: tool 'add' failed"));

        let err = call(&tools, "pow", &[]).await.unwrap_err();
        assert!(err.to_string().contains("Cannot call 'pow'"));
    }

    #[tokio::test]
    async fn test_pipeline_with_prompt_stage() {
        let tools = builtin_collection().await.unwrap();
        let stages = args(&["add", "prompt:The addition of two numbers is {{$sum}}."]);

        let output = pipeline(&tools, &stages, &args(&["a=5.4", "b=4.8"]))
            .await
            .unwrap();

        assert_eq!(output, "The addition of two numbers is 10.2.");
    }

    #[tokio::test]
    async fn test_pipeline_unknown_stage() {
        let tools = builtin_collection().await.unwrap();

        let err = build_pipeline(&tools, &args(&["add", "pow"])).err().unwrap();

        assert!(err.to_string().contains("Unknown function 'pow'"));
    }

    #[tokio::test]
    async fn test_map_reduce() {
        let tools = builtin_collection().await.unwrap();
        let inputs = args(&[r#"text=["Apple","Banana","Mango","Pear","Orange"]"#]);

        let output = map_reduce(&tools, "string_length", "sum", &inputs, 2)
            .await
            .unwrap();

        assert_eq!(output, "26");
    }

    #[tokio::test]
    async fn test_map_reduce_rejects_scalar_input() {
        let tools = builtin_collection().await.unwrap();

        let err = map_reduce(&tools, "string_length", "sum", &args(&["text=Apple"]), 0)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("INVALID_ARGUMENT"));
    }

    #[test]
    fn test_show_config_renders_toml() {
        let output = show_config(&FileConfig::default()).unwrap();

        assert!(output.contains("[agent]"));
        assert!(output.contains("max_steps = 10"));
        assert!(output.contains("[map_reduce]"));
    }

    #[tokio::test]
    async fn test_functions_lists_schemas() {
        let tools = builtin_collection().await.unwrap();

        let schemas: Value = serde_json::from_str(&functions(&tools).unwrap()).unwrap();

        let names: Vec<&str> = schemas
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert!(names.contains(&"string_length"));
        assert_eq!(names.len(), tools.len());
    }
}
