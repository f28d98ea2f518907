//! End-to-end travel runs against a scripted model

use handoff_core::{Budget, Error, ErrorKind, ModelSettings};
use handoff_llm::providers::ScriptedProvider;
use handoff_llm::{CompletionRequest, ContentBlock, ModelOutput};
use handoff_runtime::{RunConfig, RunResult};
use serde_json::{Value, json};
use std::sync::Arc;
use travel_planner::TravelPlanner;
use travel_planner::prompts::SAMPLE_REQUEST;

fn planner() -> TravelPlanner {
    TravelPlanner::new(ModelSettings::default()).unwrap()
}

/// Tool results visible to the model, as (tool name, content)
fn results_in(request: &CompletionRequest) -> Vec<(String, Value)> {
    request
        .messages
        .iter()
        .flat_map(|m| m.blocks())
        .filter_map(|block| match block {
            ContentBlock::ToolResult { name, content, .. } => Some((name.clone(), content.clone())),
            _ => None,
        })
        .collect()
}

/// Summarise whatever tool results the agent has seen
fn summarise(request: &CompletionRequest) -> handoff_llm::Result<ModelOutput> {
    let lines: Vec<String> = results_in(request)
        .into_iter()
        .map(|(name, content)| format!("{name}: {content}"))
        .collect();
    Ok(ModelOutput::text(format!("Your trip plan\n{}", lines.join("\n"))))
}

fn booking_script(destination: &str) -> ScriptedProvider {
    ScriptedProvider::new()
        .then(ModelOutput::handoff("call_handoff", "BookingAgent"))
        .then(
            ModelOutput::tool_call("call_flights", "get_flights", json!({"destination": destination}))
                .with_tool_call("call_hotels", "suggest_hotels", json!({"destination": destination})),
        )
        .then_with(summarise)
}

fn tool_results(result: &RunResult) -> Vec<(String, String, Value)> {
    result
        .conversation
        .tool_results()
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::ToolResult {
                tool_use_id,
                name,
                content,
                ..
            } => Some((tool_use_id.clone(), name.clone(), content.clone())),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn bali_booking_end_to_end() {
    let planner = planner();
    let provider = Arc::new(booking_script("Bali"));
    let config = RunConfig::new(provider.clone());

    let result = planner.plan(SAMPLE_REQUEST, &config).await.unwrap();

    assert_eq!(result.last_agent, planner.agents().booking);
    assert_eq!(result.last_agent_name, "BookingAgent");
    assert_eq!(result.handoffs, 1);
    assert_eq!(result.tool_iterations, 1);

    assert_eq!(result.conversation.handoff_markers().len(), 1);
    assert_eq!(
        tool_results(&result),
        vec![
            (
                "call_flights".to_string(),
                "get_flights".to_string(),
                json!(["PKR 120,000 - Emirates", "PKR 135,000 - Qatar Airways"]),
            ),
            (
                "call_hotels".to_string(),
                "suggest_hotels".to_string(),
                json!(["Ubud Heaven Villa", "Bali Garden Beach Resort"]),
            ),
        ]
    );

    for expected in [
        "PKR 120,000 - Emirates",
        "PKR 135,000 - Qatar Airways",
        "Ubud Heaven Villa",
        "Bali Garden Beach Resort",
    ] {
        assert!(result.final_output.contains(expected), "missing {expected}");
    }

    let requests = provider.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].agent.name, "AI Travel Designer Agent");
    assert_eq!(requests[1].agent.name, "BookingAgent");
    let offered: Vec<_> = requests[1].agent.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(offered, vec!["get_flights", "suggest_hotels"]);
}

#[tokio::test]
async fn unknown_destination_returns_sentinels() {
    let planner = planner();
    let provider = Arc::new(booking_script("Atlantis"));

    let result = planner
        .plan("Book me a trip to Atlantis", &RunConfig::new(provider))
        .await
        .unwrap();

    let contents: Vec<_> = tool_results(&result).into_iter().map(|(_, _, c)| c).collect();
    assert_eq!(contents, vec![json!(["No flights found."]), json!(["No hotels found."])]);
    assert!(result.final_output.contains("No flights found."));
}

#[tokio::test]
async fn explore_agent_uses_local_guide() {
    let planner = planner();
    let provider = Arc::new(
        ScriptedProvider::new()
            .then(ModelOutput::handoff("h1", "ExploreAgent"))
            .then(ModelOutput::tool_call("c1", "explore_local", json!({"destination": "Atlantis"})))
            .then(ModelOutput::tool_call("c2", "explore_local", json!({"destination": "Paris"})))
            .then_with(summarise),
    );

    let result = planner
        .plan("What should we do in Paris?", &RunConfig::new(provider))
        .await
        .unwrap();

    assert_eq!(result.last_agent, planner.agents().explore);
    let contents: Vec<_> = tool_results(&result).into_iter().map(|(_, _, c)| c).collect();
    assert_eq!(contents[0], json!({"attractions": [], "food": []}));
    assert_eq!(
        contents[1],
        json!({
            "attractions": ["Eiffel Tower", "Louvre Museum"],
            "food": ["Croissants", "Ratatouille"],
        })
    );
    assert!(result.final_output.contains("Eiffel Tower"));
}

#[tokio::test]
async fn destination_agent_answers_without_tools() {
    let planner = planner();
    let provider = Arc::new(
        ScriptedProvider::new()
            .then(ModelOutput::handoff("h1", "DestinationAgent"))
            .then(ModelOutput::text("For beach and spa relaxation, try Bali.")),
    );

    let result = planner
        .plan(SAMPLE_REQUEST, &RunConfig::new(provider.clone()))
        .await
        .unwrap();

    assert_eq!(result.last_agent, planner.agents().destination);
    assert!(provider.requests()[1].agent.all_tool_definitions().is_empty());
}

#[tokio::test]
async fn replaying_a_run_gives_identical_tool_results() {
    let planner = planner();

    let first = planner
        .plan(SAMPLE_REQUEST, &RunConfig::new(Arc::new(booking_script("Bali"))))
        .await
        .unwrap();
    let second = planner
        .plan(SAMPLE_REQUEST, &RunConfig::new(Arc::new(booking_script("Bali"))))
        .await
        .unwrap();

    assert_eq!(tool_results(&first), tool_results(&second));
    assert_eq!(first.final_output, second.final_output);

    let tools = planner.runner().tools();
    let a = tools.invoke("get_flights", json!({"destination": "Bali"})).await.unwrap();
    let b = tools.invoke("get_flights", json!({"destination": "Bali"})).await.unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn specialist_cannot_hand_off_sideways() {
    let planner = planner();
    let provider = Arc::new(
        ScriptedProvider::new()
            .then(ModelOutput::handoff("h1", "BookingAgent"))
            .then(ModelOutput::handoff("h2", "ExploreAgent")),
    );

    let failure = planner
        .plan(SAMPLE_REQUEST, &RunConfig::new(provider))
        .await
        .unwrap_err();

    assert!(matches!(
        failure.error,
        Error::InvalidHandoff { ref from, ref target } if from == "BookingAgent" && target == "ExploreAgent"
    ));
    assert_eq!(failure.agent, "BookingAgent");
    assert_eq!(failure.conversation.handoff_markers().len(), 1);
}

#[tokio::test]
async fn booking_agent_cannot_call_explore_tool() {
    let planner = planner();
    let provider = Arc::new(
        ScriptedProvider::new()
            .then(ModelOutput::handoff("h1", "BookingAgent"))
            .then(ModelOutput::tool_call("c1", "explore_local", json!({"destination": "Bali"}))),
    );

    let failure = planner
        .plan(SAMPLE_REQUEST, &RunConfig::new(provider))
        .await
        .unwrap_err();
    assert_eq!(failure.kind(), ErrorKind::ToolNotFound);
}

#[tokio::test]
async fn zero_handoff_budget_stops_delegation() {
    let planner = planner();
    let provider = Arc::new(ScriptedProvider::new().then(ModelOutput::handoff("h1", "BookingAgent")));
    let config = RunConfig::builder(provider).max_handoffs(0).build();

    let failure = planner.plan(SAMPLE_REQUEST, &config).await.unwrap_err();
    assert!(matches!(
        failure.error,
        Error::RunBudgetExceeded { budget: Budget::Handoffs, limit: 0 }
    ));
    assert_eq!(failure.conversation.len(), 1);
}

#[test]
fn plan_sync_runs_to_completion() {
    let planner = planner();
    let result = planner
        .plan_sync(SAMPLE_REQUEST, &RunConfig::new(Arc::new(booking_script("Paris"))))
        .unwrap();
    assert!(result.final_output.contains("Hotel Le Meurice"));
}
