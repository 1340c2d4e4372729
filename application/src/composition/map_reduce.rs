//! MapReduce: parallel fan-out over a mapper, then one reducer call
//!
//! ```text
//!                    ┌─▶ mapper(ctx[0]) ─┐
//! context ─expand─▶  ├─▶ mapper(ctx[1]) ─┼─ reorder by index ─▶ reducer([r0, r1, ...])
//!  (arrays)          └─▶ mapper(ctx[n]) ─┘
//! ```
//!
//! Mapper failures do not abort the run: the failed element contributes its
//! `ERROR:` string to the reduced list.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};
use toolweave_domain::{
    ExecutionContext, FunctionDescriptor, ParameterDescriptor, Tool, ToolError, TypeDescriptor,
    error_sentinel, is_error_output,
};

/// Data-parallel composition of a mapper and a reducer
pub struct MapReduce {
    descriptor: FunctionDescriptor,
    mapper: Arc<dyn Tool>,
    reducer: Arc<dyn Tool>,
    max_concurrency: Option<usize>,
}

impl MapReduce {
    /// The descriptor mirrors the mapper's parameters, each wrapped as an array.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        mapper: Arc<dyn Tool>,
        reducer: Arc<dyn Tool>,
    ) -> Self {
        let parameters = mapper
            .descriptor()
            .parameters
            .iter()
            .map(|p| ParameterDescriptor {
                ty: TypeDescriptor::array(p.ty.clone()),
                ..p.clone()
            })
            .collect::<Vec<_>>();

        Self {
            descriptor: FunctionDescriptor::new(name, description).with_parameters(parameters),
            mapper,
            reducer,
            max_concurrency: None,
        }
    }

    /// Limit how many mapper calls run at once; `0` means unbounded.
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = (max > 0).then_some(max);
        self
    }

    pub fn mapper(&self) -> &Arc<dyn Tool> {
        &self.mapper
    }

    pub fn reducer(&self) -> &Arc<dyn Tool> {
        &self.reducer
    }

    /// Transpose array parameters into one context per element.
    ///
    /// Every mapper parameter present in `context` must hold an array, and all
    /// of those arrays must have the same length. Other values of `context`
    /// are copied into every element context.
    pub fn expand(&self, context: &ExecutionContext) -> Result<Vec<ExecutionContext>, ToolError> {
        let mut expanded: Vec<(&str, &Vec<Value>)> = Vec::new();

        for param in &self.mapper.descriptor().parameters {
            match context.try_get(&param.name) {
                None | Some(Value::Null) => continue,
                Some(Value::Array(items)) => expanded.push((param.name.as_str(), items)),
                Some(other) => {
                    return Err(ToolError::invalid_argument(format!(
                        "Parameter '{}' of '{}' must be an array, got {}",
                        param.name, self.descriptor.name, other
                    )));
                }
            }
        }

        let Some((first_name, first_items)) = expanded.first() else {
            return Err(ToolError::invalid_argument(format!(
                "None of the parameters of '{}' are present",
                self.descriptor.name
            )));
        };

        let len = first_items.len();
        if let Some((name, items)) = expanded.iter().find(|(_, items)| items.len() != len) {
            return Err(ToolError::invalid_argument(format!(
                "Array lengths differ: '{}' has {} elements, '{}' has {}",
                first_name,
                len,
                name,
                items.len()
            )));
        }

        Ok((0..len)
            .map(|index| {
                let mut element = context.clone();
                for (name, items) in &expanded {
                    element.set(*name, items[index].clone());
                }
                element
            })
            .collect())
    }

    /// Run the mapper over every element context; outputs come back in
    /// element order.
    async fn map(&self, elements: Vec<ExecutionContext>) -> Vec<(ExecutionContext, String)> {
        let semaphore = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let mut join_set = JoinSet::new();
        let count = elements.len();

        for (index, mut element) in elements.into_iter().enumerate() {
            let mapper = Arc::clone(&self.mapper);
            let semaphore = semaphore.clone();

            join_set.spawn(async move {
                let _permit = match semaphore {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };
                let output = mapper.execute(&mut element).await;
                (index, element, output)
            });
        }

        let mut slots: Vec<Option<(ExecutionContext, String)>> = vec![None; count];

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, element, output)) => {
                    debug!(tool = %self.mapper.name(), index, "Map element completed");
                    slots[index] = Some((element, output));
                }
                Err(e) => {
                    warn!(tool = %self.mapper.name(), error = %e, "Map task join error");
                }
            }
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    let error = ToolError::execution_failed("map task did not complete");
                    (
                        ExecutionContext::new(),
                        error_sentinel(self.mapper.name(), &error),
                    )
                })
            })
            .collect()
    }
}

#[async_trait]
impl Tool for MapReduce {
    fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, context: &mut ExecutionContext) -> Result<Value, ToolError> {
        let Some(input) = self.reducer.descriptor().parameters.first() else {
            return Err(ToolError::invalid_argument(format!(
                "Reducer '{}' declares no parameter to receive the mapped values",
                self.reducer.name()
            )));
        };

        let elements = self.expand(context)?;
        debug!(tool = %self.descriptor.name, elements = elements.len(), "Expanded map-reduce input");

        let mapped = self.map(elements).await;

        let values: Vec<Value> = mapped
            .into_iter()
            .map(|(element, output)| match element.try_get_result(self.mapper.name()) {
                Some(value) => value.clone(),
                None => Value::String(output),
            })
            .collect();

        let mut reduce_context = ExecutionContext::new().with(input.name.clone(), values);
        let output = self.reducer.execute(&mut reduce_context).await;
        context.merge_results_from(&reduce_context);

        match reduce_context.try_get_result(self.reducer.name()) {
            Some(value) => Ok(value.clone()),
            None if is_error_output(&output) => Err(ToolError::execution_failed(format!(
                "Reducer '{}' failed",
                self.reducer.name()
            ))
            .with_details(output)),
            None => Ok(Value::String(output)),
        }
    }
}
