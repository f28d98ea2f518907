//! Local attractions and food

use super::{DestinationParams, destination_schema, lookup};
use async_trait::async_trait;
use handoff_core::{Error, Result};
use handoff_tools::Tool;
use serde::Serialize;
use serde_json::Value;

struct GuideEntry {
    attractions: &'static [&'static str],
    food: &'static [&'static str],
}

const GUIDES: &[(&str, &GuideEntry)] = &[
    (
        "Bali",
        &GuideEntry {
            attractions: &["Ubud Monkey Forest", "Tegallalang Rice Terraces"],
            food: &["Nasi Goreng", "Babi Guling"],
        },
    ),
    (
        "Paris",
        &GuideEntry {
            attractions: &["Eiffel Tower", "Louvre Museum"],
            food: &["Croissants", "Ratatouille"],
        },
    ),
];

/// What to see and eat in a destination
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocalGuide {
    pub attractions: Vec<&'static str>,
    pub food: Vec<&'static str>,
}

/// `explore_local`: attractions and food for a destination
#[derive(Debug, Default, Clone, Copy)]
pub struct ExploreLocalTool;

impl ExploreLocalTool {
    /// Guide for `destination`; empty lists when unknown
    pub fn guide(destination: &str) -> LocalGuide {
        lookup(GUIDES, destination).map_or_else(LocalGuide::default, |entry| LocalGuide {
            attractions: entry.attractions.to_vec(),
            food: entry.food.to_vec(),
        })
    }
}

#[async_trait]
impl Tool for ExploreLocalTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params = DestinationParams::parse(self.name(), params)?;
        serde_json::to_value(Self::guide(&params.destination))
            .map_err(|e| Error::tool_failed(self.name(), e.to_string()))
    }

    fn name(&self) -> &str {
        "explore_local"
    }

    fn description(&self) -> &str {
        "Suggests top attractions and food options in the given location."
    }

    fn input_schema(&self) -> Value {
        destination_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_known_destination() {
        let result = ExploreLocalTool
            .execute(json!({"destination": "Bali"}))
            .await
            .unwrap();
        assert_eq!(
            result,
            json!({
                "attractions": ["Ubud Monkey Forest", "Tegallalang Rice Terraces"],
                "food": ["Nasi Goreng", "Babi Guling"],
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_destination_sentinel() {
        let result = ExploreLocalTool
            .execute(json!({"destination": "Atlantis"}))
            .await
            .unwrap();
        assert_eq!(result, json!({"attractions": [], "food": []}));
    }

    #[test]
    fn test_las_vegas_has_no_guide() {
        assert_eq!(ExploreLocalTool::guide("Las Vegas"), LocalGuide::default());
    }
}
