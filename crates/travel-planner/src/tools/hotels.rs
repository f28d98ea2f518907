//! Hotel suggestions

use super::{DestinationParams, destination_schema, lookup};
use async_trait::async_trait;
use handoff_core::Result;
use handoff_tools::Tool;
use serde_json::{Value, json};

const HOTELS: &[(&str, &[&str])] = &[
    ("Bali", &["Ubud Heaven Villa", "Bali Garden Beach Resort"]),
    ("Paris", &["Hotel Le Meurice", "Novotel Paris Centre"]),
    ("Las Vegas", &["Bellagio", "MGM Grand"]),
];

/// Returned for a destination with no hotels
pub const NO_HOTELS: &str = "No hotels found.";

/// `suggest_hotels`: mock hotel options for a destination
#[derive(Debug, Default, Clone, Copy)]
pub struct SuggestHotelsTool;

impl SuggestHotelsTool {
    /// Hotels for `destination`, or the single sentinel entry
    pub fn hotels(destination: &str) -> Vec<&'static str> {
        lookup(HOTELS, destination).map_or_else(|| vec![NO_HOTELS], |entries| entries.to_vec())
    }
}

#[async_trait]
impl Tool for SuggestHotelsTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params = DestinationParams::parse(self.name(), params)?;
        Ok(json!(Self::hotels(&params.destination)))
    }

    fn name(&self) -> &str {
        "suggest_hotels"
    }

    fn description(&self) -> &str {
        "Returns a list of mock hotel options for a given destination."
    }

    fn input_schema(&self) -> Value {
        destination_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_destination() {
        let result = SuggestHotelsTool
            .execute(json!({"destination": "Paris"}))
            .await
            .unwrap();
        assert_eq!(result, json!(["Hotel Le Meurice", "Novotel Paris Centre"]));
    }

    #[test]
    fn test_unknown_destination_sentinel() {
        let result =
            tokio_test::block_on(SuggestHotelsTool.execute(json!({"destination": "Atlantis"})))
                .unwrap();
        assert_eq!(result, json!(["No hotels found."]));
    }
}
