//! OpenAI-compatible chat-completions provider
//!
//! Works with any endpoint that speaks the OpenAI chat-completions protocol,
//! including Gemini's OpenAI-compatible surface.
//! See: https://platform.openai.com/docs/api-reference/chat
//!
//! Handoffs are offered to the model as function tools named
//! `transfer_to_<agent>`. A call to one of those functions is mapped back to
//! a [`HandoffCall`] by looking the function name up in the agent view; the
//! transition marker is sent back as that call's tool response.
//!
//! # Example
//!
//! ```no_run
//! use handoff_llm::providers::{OpenAIConfig, OpenAIProvider};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OpenAIConfig::new("your-key")
//!     .with_api_base("https://generativelanguage.googleapis.com/v1beta/openai/")
//!     .with_timeout(60);
//!
//! let provider = OpenAIProvider::with_config(config)?;
//! # Ok(())
//! # }
//! ```

use crate::{
    CompletionRequest, ContentBlock, HandoffCall, LLMError, Message, MessageContent, ModelOutput,
    ModelProvider, Result, Role, StopReason, TokenUsage, ToolCall,
};
use async_trait::async_trait;
use handoff_core::{AgentView, ToolDefinition, handoff_tool_name};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for OpenAI-compatible provider
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the API (default: "https://api.openai.com/v1")
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,

    /// Optional list of supported models
    /// If None, any model string is accepted
    pub supported_models: Option<Vec<String>>,
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Set custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set supported models list
    pub fn with_supported_models(mut self, models: Vec<String>) -> Self {
        self.supported_models = Some(models);
        self
    }

    /// Add a single supported model
    pub fn add_supported_model(mut self, model: impl Into<String>) -> Self {
        self.supported_models
            .get_or_insert_with(Vec::new)
            .push(model.into());
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            supported_models: None,
        }
    }
}

/// OpenAI-compatible provider
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a new provider with custom configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is empty, or an HTTP
    /// error if the client cannot be built
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LLMError::ConfigurationError("API key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new provider with API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Validate model name against supported models list (if configured)
    fn validate_model(&self, model: &str) -> Result<()> {
        if let Some(supported) = &self.config.supported_models {
            if !supported.iter().any(|m| m == model) {
                return Err(LLMError::InvalidRequest(format!(
                    "Model '{model}' is not in the supported models list: {supported:?}"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ModelProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model.model, agent = %request.agent.name, api_base = %self.config.api_base))]
    async fn complete(&self, request: CompletionRequest) -> Result<ModelOutput> {
        self.validate_model(&request.model.model)?;

        let tools = request.agent.all_tool_definitions();
        let openai_request = OpenAIRequest {
            model: request.model.model.clone(),
            messages: build_openai_messages(&request.agent.instructions, &request.messages),
            max_tokens: request.model.max_tokens,
            temperature: request.model.temperature,
            tools: (!tools.is_empty()).then(|| convert_tools(&tools)),
        };

        debug!(
            message_count = openai_request.messages.len(),
            tool_count = tools.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&openai_request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(request.model.model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let openai_response: OpenAIResponse = response.json().await.map_err(|e| {
            LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        let choice = openai_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".to_string()))?;

        let usage = openai_response.usage.unwrap_or_default();
        debug!(
            finish_reason = ?choice.finish_reason,
            input_tokens = usage.prompt_tokens,
            output_tokens = usage.completion_tokens,
            "Received chat completion"
        );

        let mut output = parse_openai_response(choice.message, &request.agent)?;
        output.stop_reason = map_stop_reason(choice.finish_reason.as_deref());
        output.usage = TokenUsage {
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
        };
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// OpenAI-specific request types
// ============================================================================

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<OpenAIToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl OpenAIMessage {
    fn text(role: &'static str, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
        }
    }

    fn tool(tool_call_id: &str, content: String) -> Self {
        Self {
            role: "tool",
            content: Some(content),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OpenAIFunction,
}

#[derive(Debug, Serialize)]
struct OpenAIFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Serialize)]
struct OpenAIToolCall {
    id: String,
    #[serde(rename = "type")]
    tool_type: &'static str,
    function: OpenAIFunctionCall,
}

#[derive(Debug, Serialize)]
struct OpenAIFunctionCall {
    name: String,
    arguments: String,
}

// ============================================================================
// OpenAI-specific response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    #[serde(default)]
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<OpenAIResponseToolCall>>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseToolCall {
    #[serde(default)]
    id: String,
    function: OpenAIResponseFunctionCall,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAIUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Build OpenAI messages: instructions first, then the conversation
fn build_openai_messages(instructions: &str, messages: &[Message]) -> Vec<OpenAIMessage> {
    let mut result = Vec::with_capacity(messages.len() + 1);

    if !instructions.is_empty() {
        result.push(OpenAIMessage::text("system", instructions));
    }

    for msg in messages {
        result.extend(convert_message(msg));
    }

    result
}

/// Convert a single message to OpenAI format
///
/// Tool-role messages may expand into several OpenAI messages, one per result.
fn convert_message(msg: &Message) -> Vec<OpenAIMessage> {
    let role = match msg.role {
        Role::User => "user",
        Role::Assistant => "assistant",
        Role::Tool => "tool",
    };

    match &msg.content {
        Some(MessageContent::Text(text)) => vec![OpenAIMessage::text(role, text.clone())],
        Some(MessageContent::Blocks(blocks)) => convert_blocks(role, blocks),
        None => vec![OpenAIMessage::text(role, String::new())],
    }
}

/// Convert content blocks to OpenAI messages
fn convert_blocks(role: &'static str, blocks: &[ContentBlock]) -> Vec<OpenAIMessage> {
    let mut messages = Vec::new();
    let mut text_parts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => text_parts.push(text.as_str()),
            ContentBlock::ToolUse { id, name, input } => {
                tool_calls.push(OpenAIToolCall {
                    id: id.clone(),
                    tool_type: "function",
                    function: OpenAIFunctionCall {
                        name: name.clone(),
                        arguments: input.to_string(),
                    },
                });
            }
            ContentBlock::Handoff { id, target } => {
                tool_calls.push(OpenAIToolCall {
                    id: id.clone(),
                    tool_type: "function",
                    function: OpenAIFunctionCall {
                        name: handoff_tool_name(target),
                        arguments: "{}".to_string(),
                    },
                });
            }
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                ..
            } => {
                let content = match content {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                messages.push(OpenAIMessage::tool(tool_use_id, content));
            }
            ContentBlock::HandoffMarker { handoff_id, to, .. } => {
                messages.push(OpenAIMessage::tool(
                    handoff_id,
                    json!({ "assistant": to }).to_string(),
                ));
            }
        }
    }

    if !text_parts.is_empty() || !tool_calls.is_empty() {
        messages.insert(
            0,
            OpenAIMessage {
                role,
                content: (!text_parts.is_empty()).then(|| text_parts.join("\n")),
                tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
                tool_call_id: None,
            },
        );
    }

    messages
}

/// Convert tool definitions to OpenAI format
fn convert_tools(tools: &[ToolDefinition]) -> Vec<OpenAITool> {
    tools
        .iter()
        .map(|tool| OpenAITool {
            tool_type: "function",
            function: OpenAIFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

/// Parse the response message into normalized output
///
/// Function calls whose name matches one of the agent's handoff functions
/// become handoffs; every other function call is a tool call.
fn parse_openai_response(msg: OpenAIResponseMessage, agent: &AgentView) -> Result<ModelOutput> {
    let mut output = ModelOutput::empty();
    output.text = msg.content.filter(|c| !c.is_empty());

    for (index, call) in msg.tool_calls.unwrap_or_default().into_iter().enumerate() {
        let id = if call.id.is_empty() {
            format!("call_{index}")
        } else {
            call.id
        };

        if let Some(handoff) = agent.handoff_for_tool(&call.function.name) {
            output.handoffs.push(HandoffCall {
                id,
                target: handoff.agent_name.clone(),
            });
            continue;
        }

        let arguments = parse_arguments(&call.function.name, &call.function.arguments)?;
        output.tool_calls.push(ToolCall {
            id,
            name: call.function.name,
            arguments,
        });
    }

    Ok(output)
}

/// Parse a function-call argument string; empty means no arguments
fn parse_arguments(tool: &str, raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(json!({}));
    }

    serde_json::from_str(raw).map_err(|e| LLMError::InvalidToolArguments {
        tool: tool.to_string(),
        reason: format!("arguments are not valid JSON: {e}"),
    })
}

/// Map OpenAI finish reason to our format
fn map_stop_reason(reason: Option<&str>) -> StopReason {
    match reason {
        Some("stop") | None => StopReason::EndTurn,
        Some("length") => StopReason::MaxTokens,
        Some("tool_calls" | "function_call") => StopReason::ToolUse,
        Some("content_filter") => {
            debug!("Content filtered by provider safety systems");
            StopReason::EndTurn
        }
        Some(other) => {
            debug!("Unknown stop reason: {}", other);
            StopReason::EndTurn
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
