//! Mock travel data tools
//!
//! Every tool takes `{"destination": string}`. Destinations match exactly,
//! case included. An unknown destination is not an error: each tool returns
//! its documented sentinel instead.
//!
//! | Tool | Result | Unknown destination |
//! |---|---|---|
//! | `get_flights` | list of fares | `["No flights found."]` |
//! | `suggest_hotels` | list of hotels | `["No hotels found."]` |
//! | `explore_local` | `{"attractions": [..], "food": [..]}` | both lists empty |

mod explore;
mod flights;
mod hotels;

pub use explore::{ExploreLocalTool, LocalGuide};
pub use flights::GetFlightsTool;
pub use hotels::SuggestHotelsTool;

use handoff_core::tool::schema;
use handoff_core::{Error, Result};
use handoff_tools::ToolRegistry;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Parameters shared by every travel tool
#[derive(Debug, Clone, Deserialize)]
pub struct DestinationParams {
    /// Destination name, e.g. "Bali"
    pub destination: String,
}

impl DestinationParams {
    fn parse(tool: &str, params: Value) -> Result<Self> {
        serde_json::from_value(params)
            .map_err(|e| Error::tool_failed(tool, format!("Invalid parameters: {e}")))
    }
}

fn destination_schema() -> Value {
    schema::object(
        json!({
            "destination": schema::string("Destination name, e.g. \"Bali\" or \"Paris\""),
        }),
        vec!["destination"],
    )
}

/// Look `destination` up in a fixed table
fn lookup<'a, T: ?Sized>(table: &'a [(&str, &'a T)], destination: &str) -> Option<&'a T> {
    table
        .iter()
        .find(|(name, _)| *name == destination)
        .map(|(_, entry)| *entry)
}

/// Register the three travel tools
pub fn register_travel_tools(registry: &ToolRegistry) -> Result<()> {
    registry.register(Arc::new(GetFlightsTool))?;
    registry.register(Arc::new(SuggestHotelsTool))?;
    registry.register(Arc::new(ExploreLocalTool))?;
    Ok(())
}
