//! The run loop
//!
//! Each step invokes the active agent's model and classifies the answer:
//!
//! 1. Text: append it and stop.
//! 2. Tool calls: execute every call in order, append the results, loop on
//!    the same agent. A handoff signalled in the same answer is applied after
//!    the tool results.
//! 3. Handoff: resolve the target against the active agent's handoffs,
//!    append a transition marker and loop on the target.
//!
//! Everything a step appends goes in as one batch once the step has
//! succeeded, so a failed or cancelled step leaves the conversation as it
//! was before the step began.

use crate::{NoopRunHooks, RunConfig, RunFailure, RunHooks, RunResult};
use handoff_core::{Agent, AgentGraph, AgentId, Budget, Error, Result};
use handoff_llm::{
    CompletionRequest, Conversation, HandoffCall, Message, ModelProvider, ModelResponse,
    TokenUsage, ToolCall,
};
use handoff_tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, Span, debug, info, info_span, warn};

/// What a successful step led to
enum StepOutcome {
    /// Keep looping with the (possibly new) active agent
    Continue,
    /// The active agent produced the final answer
    Done(String),
}

/// Mutable state of one run
struct RunState {
    current: AgentId,
    conversation: Conversation,
    usage: TokenUsage,
    handoffs: usize,
    tool_iterations: usize,
}

impl RunState {
    fn new(root: AgentId, input: String) -> Self {
        Self {
            current: root,
            conversation: Conversation::new(input),
            usage: TokenUsage::default(),
            handoffs: 0,
            tool_iterations: 0,
        }
    }
}

/// A classified model answer plus the assistant message recording it
struct Completion {
    message: Message,
    response: ModelResponse,
    usage: TokenUsage,
}

/// Drives requests through an agent graph
///
/// The graph and the tool registry are shared read-only, so one runner can
/// serve any number of concurrent runs.
///
/// # Example
///
/// ```
/// use handoff_core::{Agent, AgentGraph, ModelSettings};
/// use handoff_llm::{ModelOutput, providers::ScriptedProvider};
/// use handoff_runtime::{RunConfig, Runner};
/// use handoff_tools::ToolRegistry;
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let model = Arc::new(ModelSettings::default());
/// let mut graph = AgentGraph::new();
/// let root = graph.add(Agent::builder("Greeter", model).instructions("Say hi").build()?)?;
///
/// let runner = Runner::new(Arc::new(graph), Arc::new(ToolRegistry::new()));
/// let config = RunConfig::new(Arc::new(ScriptedProvider::new().then(ModelOutput::text("Hi!"))));
///
/// let result = runner.run(root, "Hello", &config).await?;
/// assert_eq!(result.final_output, "Hi!");
/// # Ok(())
/// # }
/// ```
pub struct Runner {
    graph: Arc<AgentGraph>,
    tools: Arc<ToolRegistry>,
    hooks: Arc<dyn RunHooks>,
}

impl Runner {
    /// Create a runner over a graph and the tools its agents may call
    pub fn new(graph: Arc<AgentGraph>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            graph,
            tools,
            hooks: Arc::new(NoopRunHooks),
        }
    }

    /// Set the lifecycle hooks
    pub fn with_hooks(mut self, hooks: Arc<dyn RunHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// The agent graph this runner drives
    pub fn graph(&self) -> &AgentGraph {
        &self.graph
    }

    /// The tool registry this runner invokes
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Run `input` to completion starting at `root`
    pub async fn run(
        &self,
        root: AgentId,
        input: impl Into<String>,
        config: &RunConfig,
    ) -> std::result::Result<RunResult, RunFailure> {
        self.run_with_cancel(root, input, config, CancellationToken::new())
            .await
    }

    /// Run `input` to completion, stopping early once `cancel` fires
    ///
    /// Cancellation is checked before every step and raced against the
    /// in-flight model or tool call. A cancelled run fails with
    /// [`Error::Cancelled`].
    pub async fn run_with_cancel(
        &self,
        root: AgentId,
        input: impl Into<String>,
        config: &RunConfig,
        cancel: CancellationToken,
    ) -> std::result::Result<RunResult, RunFailure> {
        let input = input.into();

        let root_name = match self.graph.agent(root) {
            Ok(agent) => agent.name().to_string(),
            Err(error) => {
                return Err(RunFailure {
                    error,
                    agent: root.to_string(),
                    conversation: Conversation::new(input),
                });
            }
        };

        let span = if config.tracing_enabled {
            info_span!(
                "run",
                root = %root_name,
                max_handoffs = config.max_handoffs,
                max_tool_iterations = config.max_tool_iterations
            )
        } else {
            Span::none()
        };

        self.drive(RunState::new(root, input), config, &cancel)
            .instrument(span)
            .await
    }

    /// Blocking variant of [`run`](Self::run)
    ///
    /// Builds a current-thread tokio runtime for the duration of the call.
    /// Must not be called from inside an async context.
    pub fn run_sync(
        &self,
        root: AgentId,
        input: impl Into<String>,
        config: &RunConfig,
    ) -> std::result::Result<RunResult, RunFailure> {
        let input = input.into();

        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                return Err(RunFailure {
                    error: Error::Configuration(format!("failed to start runtime: {e}")),
                    agent: self.agent_name(root).to_string(),
                    conversation: Conversation::new(input),
                });
            }
        };

        runtime.block_on(self.run(root, input, config))
    }

    async fn drive(
        &self,
        mut state: RunState,
        config: &RunConfig,
        cancel: &CancellationToken,
    ) -> std::result::Result<RunResult, RunFailure> {
        info!(agent = %self.agent_name(state.current), "Run started");
        self.hooks.on_agent_start(self.agent_name(state.current)).await;

        loop {
            if cancel.is_cancelled() {
                return Err(self.fail(state, Error::Cancelled).await);
            }

            let span = if config.tracing_enabled {
                info_span!(
                    "step",
                    agent = %self.agent_name(state.current),
                    handoffs = state.handoffs,
                    tool_iterations = state.tool_iterations
                )
            } else {
                Span::none()
            };

            match self.step(&mut state, config, cancel).instrument(span).await {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::Done(final_output)) => {
                    let agent = self.agent_name(state.current);
                    info!(
                        agent = %agent,
                        handoffs = state.handoffs,
                        tool_iterations = state.tool_iterations,
                        total_tokens = state.usage.total(),
                        "Run completed"
                    );
                    self.hooks.on_complete(agent, &final_output).await;

                    return Ok(RunResult {
                        final_output,
                        last_agent: state.current,
                        last_agent_name: agent.to_string(),
                        conversation: state.conversation,
                        usage: state.usage,
                        handoffs: state.handoffs,
                        tool_iterations: state.tool_iterations,
                    });
                }
                Err(error) => return Err(self.fail(state, error).await),
            }
        }
    }

    async fn step(
        &self,
        state: &mut RunState,
        config: &RunConfig,
        cancel: &CancellationToken,
    ) -> Result<StepOutcome> {
        let agent = self.graph.agent(state.current)?;
        let view = self.graph.describe(state.current, self.tools.as_ref())?;
        let request = CompletionRequest::new(
            config.model_for(agent.model()),
            view,
            state.conversation.messages().to_vec(),
        );

        let completion = self.complete(request, config, cancel).await?;
        state.usage.add(completion.usage);

        match completion.response {
            ModelResponse::Text(text) => {
                state.conversation.push(completion.message);
                Ok(StepOutcome::Done(text))
            }
            ModelResponse::ToolCalls {
                calls,
                then_handoff,
            } => {
                state.tool_iterations += 1;
                if state.tool_iterations > config.max_tool_iterations {
                    return Err(Error::RunBudgetExceeded {
                        budget: Budget::ToolIterations,
                        limit: config.max_tool_iterations,
                    });
                }

                info!(
                    agent = %agent.name(),
                    tool_count = calls.len(),
                    deferred_handoff = then_handoff.is_some(),
                    "Agent requested tool use"
                );

                let mut batch = Vec::with_capacity(calls.len() + 2);
                batch.push(completion.message);
                for call in &calls {
                    batch.push(self.call_tool(agent, call, config, cancel).await?);
                }

                match then_handoff {
                    Some(handoff) => self.hand_off(state, agent, &handoff, batch, config).await,
                    None => {
                        state.conversation.extend(batch);
                        Ok(StepOutcome::Continue)
                    }
                }
            }
            ModelResponse::Handoff(handoff) => {
                self.hand_off(state, agent, &handoff, vec![completion.message], config)
                    .await
            }
        }
    }

    /// Call the model under the run's timeout, retry and cancellation rules
    async fn complete(
        &self,
        request: CompletionRequest,
        config: &RunConfig,
        cancel: &CancellationToken,
    ) -> Result<Completion> {
        debug!(
            agent = %request.agent.name,
            model = %request.model.model,
            message_count = request.messages.len(),
            "Calling model"
        );

        let request = &request;
        let provider = config.provider.as_ref();
        let model_timeout = config.model_timeout;
        let attempt = move || complete_once(provider, request.clone(), model_timeout);

        let completion = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = config.retry.execute("model", attempt) => result,
        }?;

        debug!(
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            response = response_class(&completion.response),
            "Model answered"
        );

        Ok(completion)
    }

    /// Execute one tool call for `agent`
    ///
    /// A tool body failure becomes an error tool result; every other error
    /// ends the run.
    async fn call_tool(
        &self,
        agent: &Agent,
        call: &ToolCall,
        config: &RunConfig,
        cancel: &CancellationToken,
    ) -> Result<Message> {
        if !agent.has_tool(&call.name) || !self.tools.contains(&call.name) {
            warn!(agent = %agent.name(), tool = %call.name, "Model requested an unavailable tool");
            return Err(Error::ToolNotFound(call.name.clone()));
        }

        let input_preview: String = call.arguments.to_string().chars().take(500).collect();
        info!(
            tool_name = %call.name,
            tool_id = %call.id,
            input_preview = %input_preview,
            "Executing tool"
        );
        self.hooks.on_tool_start(agent.name(), call).await;

        let tools = self.tools.as_ref();
        let tool_timeout = config.tool_timeout;
        let attempt = move || invoke_once(tools, call, tool_timeout);

        let started = Instant::now();
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(Error::Cancelled),
            result = config.retry.execute(&call.name, attempt) => result,
        };
        let duration_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(value) => {
                info!(tool_name = %call.name, duration_ms, "Tool execution succeeded");
                self.hooks
                    .on_tool_end(agent.name(), call, Ok(&value), duration_ms)
                    .await;
                Ok(Message::tool_result(&call.id, &call.name, value))
            }
            Err(error @ Error::ToolFailed { .. }) => {
                let reason = error.to_string();
                warn!(tool_name = %call.name, duration_ms, error = %reason, "Tool execution failed");
                self.hooks
                    .on_tool_end(agent.name(), call, Err(&reason), duration_ms)
                    .await;
                Ok(Message::tool_error(&call.id, &call.name, reason))
            }
            Err(error) => {
                let reason = error.to_string();
                self.hooks
                    .on_tool_end(agent.name(), call, Err(&reason), duration_ms)
                    .await;
                Err(error)
            }
        }
    }

    /// Apply a handoff, committing `batch` and the transition marker together
    async fn hand_off(
        &self,
        state: &mut RunState,
        from: &Agent,
        handoff: &HandoffCall,
        mut batch: Vec<Message>,
        config: &RunConfig,
    ) -> Result<StepOutcome> {
        let target = self.graph.resolve_handoff(state.current, &handoff.target)?;

        if state.handoffs >= config.max_handoffs {
            warn!(
                from = %from.name(),
                to = %handoff.target,
                limit = config.max_handoffs,
                "Handoff budget exhausted"
            );
            return Err(Error::RunBudgetExceeded {
                budget: Budget::Handoffs,
                limit: config.max_handoffs,
            });
        }

        let to = self.graph.agent(target)?.name();
        batch.push(Message::handoff_marker(&handoff.id, from.name(), to));
        state.conversation.extend(batch);
        state.handoffs += 1;
        state.current = target;

        info!(from = %from.name(), to = %to, handoffs = state.handoffs, "Handoff");
        self.hooks.on_handoff(from.name(), to).await;
        self.hooks.on_agent_start(to).await;

        Ok(StepOutcome::Continue)
    }

    async fn fail(&self, state: RunState, error: Error) -> RunFailure {
        let agent = self.agent_name(state.current).to_string();
        warn!(agent = %agent, kind = ?error.kind(), error = %error, "Run failed");
        self.hooks.on_error(&agent, &error).await;

        RunFailure {
            error,
            agent,
            conversation: state.conversation,
        }
    }

    fn agent_name(&self, id: AgentId) -> &str {
        self.graph.get(id).map_or("<unknown>", Agent::name)
    }
}

/// One model call attempt: bounded by `model_timeout`, then classified
async fn complete_once(
    provider: &dyn ModelProvider,
    request: CompletionRequest,
    model_timeout: Duration,
) -> Result<Completion> {
    let output = match timeout(model_timeout, provider.complete(request)).await {
        Ok(result) => result?,
        Err(_) => {
            return Err(Error::ProviderUnavailable(format!(
                "model call timed out after {model_timeout:?}"
            )));
        }
    };

    let usage = output.usage;
    let message = output.to_message();
    let response = output.classify()?;
    Ok(Completion {
        message,
        response,
        usage,
    })
}

/// One tool invocation attempt, bounded by `tool_timeout`
async fn invoke_once(tools: &ToolRegistry, call: &ToolCall, tool_timeout: Duration) -> Result<Value> {
    match timeout(tool_timeout, tools.invoke(&call.name, call.arguments.clone())).await {
        Ok(result) => result,
        Err(_) => Err(Error::ToolTimeout {
            tool: call.name.clone(),
            timeout: tool_timeout,
        }),
    }
}

fn response_class(response: &ModelResponse) -> &'static str {
    match response {
        ModelResponse::Text(_) => "text",
        ModelResponse::ToolCalls { .. } => "tool_calls",
        ModelResponse::Handoff(_) => "handoff",
    }
}
