//! Flight fares

use super::{DestinationParams, destination_schema, lookup};
use async_trait::async_trait;
use handoff_core::Result;
use handoff_tools::Tool;
use serde_json::{Value, json};

const FLIGHTS: &[(&str, &[&str])] = &[
    ("Bali", &["PKR 120,000 - Emirates", "PKR 135,000 - Qatar Airways"]),
    ("Paris", &["PKR 145,000 - Turkish Airlines", "PKR 160,000 - Emirates"]),
    (
        "Las Vegas",
        &["PKR 180,000 - Qatar Airways", "PKR 200,000 - American Airlines"],
    ),
];

/// Returned for a destination with no fares
pub const NO_FLIGHTS: &str = "No flights found.";

/// `get_flights`: mock flight options for a destination
#[derive(Debug, Default, Clone, Copy)]
pub struct GetFlightsTool;

impl GetFlightsTool {
    /// Fares for `destination`, or the single sentinel entry
    pub fn flights(destination: &str) -> Vec<&'static str> {
        lookup(FLIGHTS, destination).map_or_else(|| vec![NO_FLIGHTS], |entries| entries.to_vec())
    }
}

#[async_trait]
impl Tool for GetFlightsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params = DestinationParams::parse(self.name(), params)?;
        Ok(json!(Self::flights(&params.destination)))
    }

    fn name(&self) -> &str {
        "get_flights"
    }

    fn description(&self) -> &str {
        "Returns a list of mock flight options for a given destination."
    }

    fn input_schema(&self) -> Value {
        destination_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_destinations() {
        let result = GetFlightsTool.execute(json!({"destination": "Bali"})).await.unwrap();
        assert_eq!(
            result,
            json!(["PKR 120,000 - Emirates", "PKR 135,000 - Qatar Airways"])
        );

        let result = GetFlightsTool
            .execute(json!({"destination": "Las Vegas"}))
            .await
            .unwrap();
        assert_eq!(result[1], "PKR 200,000 - American Airlines");
    }

    #[tokio::test]
    async fn test_unknown_destination_sentinel() {
        let result = GetFlightsTool
            .execute(json!({"destination": "Atlantis"}))
            .await
            .unwrap();
        assert_eq!(result, json!(["No flights found."]));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(GetFlightsTool::flights("bali"), vec![NO_FLIGHTS]);
        assert_eq!(GetFlightsTool::flights("Paris").len(), 2);
    }
}
