//! Shared test doubles: small arithmetic tools and a scripted language model.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use toolweave_domain::{
    ExecutionContext, FunctionDescriptor, Message, ModelResponse, ParameterDescriptor, Tool,
    ToolError, TypeDescriptor, number_value,
};

use crate::ports::language_model::{LanguageModel, ModelError};

/// `add(a, b)` over numbers
pub struct Add {
    descriptor: FunctionDescriptor,
}

impl Add {
    pub fn new() -> Arc<dyn Tool> {
        Arc::new(Self {
            descriptor: FunctionDescriptor::new("add", "Add two numbers").with_parameters([
                ParameterDescriptor::new("a", "First number", true)
                    .with_type(TypeDescriptor::number()),
                ParameterDescriptor::new("b", "Second number", true)
                    .with_type(TypeDescriptor::number()),
            ]),
        })
    }
}

#[async_trait]
impl Tool for Add {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        let a: f64 = context.get_as("a")?;
        let b: f64 = context.get_as("b")?;
        Ok(number_value(a + b))
    }
}

/// `string_length(text)`; sleeps inversely to the length so short strings
/// finish last
pub struct StringLength {
    descriptor: FunctionDescriptor,
    pub calls: AtomicUsize,
}

impl StringLength {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            descriptor: FunctionDescriptor::new("string_length", "Length of a string")
                .with_parameter(ParameterDescriptor::new("text", "Text to measure", true)),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Tool for StringLength {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text: String = context.get_as("text")?;
        if text == "boom" {
            return Err(ToolError::execution_failed("refusing to measure"));
        }
        let len = text.chars().count();
        tokio::time::sleep(Duration::from_millis(40u64.saturating_sub(len as u64 * 5))).await;
        Ok(json!(len))
    }
}

/// `sum(numbers)` over an array of numbers
pub struct Sum {
    descriptor: FunctionDescriptor,
    pub calls: AtomicUsize,
}

impl Sum {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            descriptor: FunctionDescriptor::new("sum", "Sum a list of numbers").with_parameter(
                ParameterDescriptor::new("numbers", "Numbers to add", true)
                    .with_type(TypeDescriptor::array(TypeDescriptor::number())),
            ),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Tool for Sum {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let numbers: Vec<f64> = context.get_as("numbers")?;
        Ok(number_value(numbers.iter().sum()))
    }
}

/// Collects its input list unchanged, so tests can inspect what the reducer saw
pub struct Collect {
    descriptor: FunctionDescriptor,
}

impl Collect {
    pub fn new() -> Arc<dyn Tool> {
        Arc::new(Self {
            descriptor: FunctionDescriptor::new("collect", "Return the list unchanged")
                .with_parameter(
                    ParameterDescriptor::new("items", "Items", true)
                        .with_type(TypeDescriptor::array(TypeDescriptor::string())),
                ),
        })
    }
}

#[async_trait]
impl Tool for Collect {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        Ok(context.get("items")?.clone())
    }
}

/// Language model replaying scripted responses in order
pub struct ScriptedModel {
    responses: Mutex<VecDeque<Result<ModelResponse, String>>>,
    pub requests: Mutex<Vec<Vec<Message>>>,
    pub function_requests: AtomicUsize,
}

impl ScriptedModel {
    pub fn new(responses: Vec<ModelResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            requests: Mutex::new(Vec::new()),
            function_requests: AtomicUsize::new(0),
        })
    }

    /// A model whose first request fails at the transport level
    pub fn failing(error: &str) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(VecDeque::from([Err(error.to_string())])),
            requests: Mutex::new(Vec::new()),
            function_requests: AtomicUsize::new(0),
        })
    }

    /// Replay the same response forever
    pub fn repeating(response: ModelResponse, times: usize) -> Arc<Self> {
        Self::new(vec![response; times])
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Vec<Message> {
        self.requests.lock().unwrap().last().cloned().unwrap_or_default()
    }

    fn next(&self, messages: &[Message]) -> Result<ModelResponse, ModelError> {
        self.requests.lock().unwrap().push(messages.to_vec());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(e)) => Err(ModelError::RequestFailed(e)),
            None => Ok(ModelResponse::failed("(no more responses)")),
        }
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn get_response(
        &self,
        messages: &[Message],
        _temperature: f32,
    ) -> Result<ModelResponse, ModelError> {
        self.next(messages)
    }

    async fn get_response_with_functions(
        &self,
        messages: &[Message],
        _functions: &[Value],
        _temperature: f32,
    ) -> Result<ModelResponse, ModelError> {
        self.function_requests.fetch_add(1, Ordering::SeqCst);
        self.next(messages)
    }
}
