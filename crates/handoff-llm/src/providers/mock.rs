//! Scripted model provider for tests and offline runs
//!
//! Returns queued outputs in order and records every request it receives,
//! so tests can assert on exactly what the model was shown.

use crate::{CompletionRequest, LLMError, ModelOutput, ModelProvider, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

type Responder = Box<dyn FnOnce(&CompletionRequest) -> Result<ModelOutput> + Send>;
type Fallback = Box<dyn Fn(&CompletionRequest) -> Result<ModelOutput> + Send + Sync>;

enum Step {
    Reply(Result<ModelOutput>),
    Respond(Responder),
}

/// A provider that replays a fixed script
///
/// # Example
///
/// ```
/// use handoff_llm::providers::ScriptedProvider;
/// use handoff_llm::ModelOutput;
/// use serde_json::json;
///
/// let provider = ScriptedProvider::new()
///     .then(ModelOutput::handoff("h1", "BookingAgent"))
///     .then(ModelOutput::tool_call("c1", "get_flights", json!({"destination": "Bali"})))
///     .then(ModelOutput::text("Here are your flights."));
/// assert_eq!(provider.remaining(), 3);
/// ```
pub struct ScriptedProvider {
    name: String,
    steps: Mutex<VecDeque<Step>>,
    fallback: Option<Fallback>,
    requests: Mutex<Vec<CompletionRequest>>,
    latency: Option<Duration>,
}

impl ScriptedProvider {
    /// Create a provider with an empty script
    pub fn new() -> Self {
        Self {
            name: "scripted".to_string(),
            steps: Mutex::new(VecDeque::new()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
            latency: None,
        }
    }

    /// Create a provider that replays the given outputs in order
    pub fn from_outputs(outputs: impl IntoIterator<Item = ModelOutput>) -> Self {
        outputs.into_iter().fold(Self::new(), ScriptedProvider::then)
    }

    /// Queue an output
    pub fn then(self, output: ModelOutput) -> Self {
        self.push(Step::Reply(Ok(output)))
    }

    /// Queue a provider error
    pub fn then_error(self, error: LLMError) -> Self {
        self.push(Step::Reply(Err(error)))
    }

    /// Queue a responder computed from the request it answers
    pub fn then_with<F>(self, responder: F) -> Self
    where
        F: FnOnce(&CompletionRequest) -> Result<ModelOutput> + Send + 'static,
    {
        self.push(Step::Respond(Box::new(responder)))
    }

    /// Answer with `fallback` once the script is exhausted
    pub fn otherwise<F>(mut self, fallback: F) -> Self
    where
        F: Fn(&CompletionRequest) -> Result<ModelOutput> + Send + Sync + 'static,
    {
        self.fallback = Some(Box::new(fallback));
        self
    }

    /// Delay every answer, to exercise timeouts and cancellation
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Set the provider name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn push(self, step: Step) -> Self {
        lock(&self.steps).push_back(step);
        self
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Number of scripted steps not yet consumed
    pub fn remaining(&self) -> usize {
        lock(&self.steps).len()
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<ModelOutput> {
        lock(&self.requests).push(request.clone());

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let step = lock(&self.steps).pop_front();
        match step {
            Some(Step::Reply(result)) => result,
            Some(Step::Respond(responder)) => responder(&request),
            None => match &self.fallback {
                Some(fallback) => fallback(&request),
                None => Err(LLMError::UnexpectedResponse(
                    "Script exhausted: no response queued".to_string(),
                )),
            },
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
