//! Command-line travel router
//!
//! Sends one traveller request through the travel agents and prints the
//! final plan.
//!
//! # Usage
//!
//! ```bash
//! # API_KEY is required; API_BASE, MODEL and REQUEST_TIMEOUT_SECS are optional
//! echo 'API_KEY=...' > .env
//!
//! cargo run -- "Two nights of beach and spa, leaving from Karachi"
//! ```

use anyhow::Context;
use clap::Parser;
use handoff_llm::providers::{OpenAIConfig, OpenAIProvider};
use handoff_runtime::{CancellationToken, RetryPolicy, RunConfig};
use handoff_utils::{LogFormat, ProviderSettings};
use std::sync::Arc;
use tracing::{info, warn};
use travel_planner::TravelPlanner;
use travel_planner::prompts::SAMPLE_REQUEST;

#[derive(Parser, Debug)]
#[command(name = "travel-router")]
#[command(about = "Plan a trip with a team of handoff agents", long_about = None)]
struct Args {
    /// Traveller request (defaults to a sample beach-holiday request)
    prompt: Option<String>,

    /// Model name, overriding MODEL
    #[arg(long)]
    model: Option<String>,

    /// OpenAI-compatible base URL, overriding API_BASE
    #[arg(long)]
    api_base: Option<String>,

    /// Maximum number of agent handoffs
    #[arg(long, default_value_t = 10)]
    max_handoffs: usize,

    /// Maximum number of tool-calling model turns
    #[arg(long, default_value_t = 16)]
    max_tool_iterations: usize,

    /// Retries for transient provider failures and tool timeouts
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Record run and step spans
    #[arg(long)]
    trace: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Print the conversation as JSON to stderr when the run fails
    #[arg(long)]
    show_conversation: bool,
}

impl Args {
    fn retry_policy(&self) -> RetryPolicy {
        if self.retries == 0 {
            RetryPolicy::no_retry()
        } else {
            RetryPolicy::default().with_max_attempts(self.retries.saturating_add(1))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    handoff_utils::init_tracing_with(if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    let mut settings = ProviderSettings::load().context("loading provider settings")?;
    if let Some(model) = &args.model {
        settings = settings.with_model(model.clone());
    }
    if let Some(api_base) = &args.api_base {
        settings = settings.with_api_base(api_base.clone());
    }
    info!(model = %settings.model, api_base = %settings.api_base, "Starting travel-router");

    let provider = OpenAIProvider::with_config(
        OpenAIConfig::new(settings.api_key.clone())
            .with_api_base(settings.api_base.clone())
            .with_timeout(settings.request_timeout_secs),
    )
    .context("creating model provider")?;

    let config = RunConfig::builder(Arc::new(provider))
        .tracing(args.trace)
        .max_handoffs(args.max_handoffs)
        .max_tool_iterations(args.max_tool_iterations)
        .retry(args.retry_policy())
        .build();

    let planner = TravelPlanner::new(settings.model_settings()).context("building travel agents")?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling run");
            on_interrupt.cancel();
        }
    });

    let request = args.prompt.clone().unwrap_or_else(|| SAMPLE_REQUEST.to_string());

    match planner.plan_with_cancel(request, &config, cancel).await {
        Ok(result) => {
            info!(
                agent = %result.last_agent_name,
                handoffs = result.handoffs,
                tool_iterations = result.tool_iterations,
                total_tokens = result.usage.total(),
                "Plan ready"
            );
            println!("{}", result.final_output);
            Ok(())
        }
        Err(failure) => {
            eprintln!("Run failed ({:?}) in {}: {}", failure.kind(), failure.agent, failure.error);
            if args.show_conversation {
                eprintln!("{}", serde_json::to_string_pretty(&failure.conversation)?);
            }
            Err(failure.into())
        }
    }
}
