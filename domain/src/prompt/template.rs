//! `{{$variable}}` prompt templates

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::core::error::DomainError;
use crate::tool::value_objects::serialize_output;

static VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*\$([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").expect("static regex is valid")
});

/// A text template with `{{$name}}` placeholders.
///
/// Placeholders are resolved against an [`ExecutionContext`], so
/// `{{$Result.add}}` reads the stored output of the `add` tool.
///
/// # Examples
///
/// ```
/// use toolweave_domain::context::ExecutionContext;
/// use toolweave_domain::prompt::PromptTemplate;
///
/// let template = PromptTemplate::new("The addition of two numbers is {{$sum}}.");
/// assert_eq!(template.variables(), ["sum"]);
///
/// let context = ExecutionContext::new().with("sum", 10.2);
/// assert_eq!(
///     template.render(&context).unwrap(),
///     "The addition of two numbers is 10.2."
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let mut variables: Vec<String> = Vec::new();
        for captures in VARIABLE.captures_iter(&template) {
            let name = &captures[1];
            if !variables.iter().any(|v| v == name) {
                variables.push(name.to_string());
            }
        }
        Self {
            template,
            variables,
        }
    }

    /// Variable names in order of first appearance
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Substitute every placeholder; an unresolved variable is an error.
    pub fn render(&self, context: &ExecutionContext) -> Result<String, DomainError> {
        for name in &self.variables {
            context.get(name)?;
        }

        Ok(VARIABLE
            .replace_all(&self.template, |captures: &regex::Captures<'_>| {
                context
                    .try_get(&captures[1])
                    .map(serialize_output)
                    .unwrap_or_default()
            })
            .into_owned())
    }
}

impl std::fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variables_are_unique_and_ordered() {
        let template = PromptTemplate::new("{{$b}} then {{ $a }} then {{$b}}");
        assert_eq!(template.variables(), ["b", "a"]);
    }

    #[test]
    fn test_render_structured_values() {
        let template = PromptTemplate::new("Fruits: {{$fruits}}, ripe: {{$ripe}}");
        let context = ExecutionContext::new()
            .with("fruits", json!(["Apple", "Pear"]))
            .with("ripe", true);

        assert_eq!(
            template.render(&context).unwrap(),
            r#"Fruits: ["Apple","Pear"], ripe: true"#
        );
    }

    #[test]
    fn test_render_result_reference() {
        let template = PromptTemplate::new("Total: {{$Result.sum}}");
        let mut context = ExecutionContext::new();
        context.add_result("sum", 26);

        assert_eq!(template.render(&context).unwrap(), "Total: 26");
    }

    #[test]
    fn test_render_missing_variable() {
        let template = PromptTemplate::new("Hello {{$name}}");
        let err = template.render(&ExecutionContext::new()).unwrap_err();
        assert_eq!(err, DomainError::ParameterNotFound("name".to_string()));
    }

    #[test]
    fn test_plain_text_has_no_variables() {
        let template = PromptTemplate::new("No placeholders, only {{braces}} and $dollars");
        assert!(template.variables().is_empty());
        assert_eq!(
            template.render(&ExecutionContext::new()).unwrap(),
            "No placeholders, only {{braces}} and $dollars"
        );
    }
}
