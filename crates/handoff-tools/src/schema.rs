//! Argument validation against a tool's declared input schema
//!
//! Arguments that do not conform are rejected with [`Error::SchemaViolation`];
//! nothing is coerced.

use handoff_core::{Error, Result};
use serde_json::Value;

/// Validate `args` for `tool` against `schema`
///
/// # Errors
///
/// Returns [`Error::SchemaViolation`] listing every violation, or a
/// configuration error if `schema` is not itself a valid JSON Schema.
///
/// # Example
///
/// ```
/// use handoff_core::tool::schema;
/// use handoff_tools::validate_arguments;
/// use serde_json::json;
///
/// let input = schema::object(json!({ "destination": schema::string("Where") }), vec!["destination"]);
///
/// assert!(validate_arguments("get_flights", &input, &json!({ "destination": "Bali" })).is_ok());
/// assert!(validate_arguments("get_flights", &input, &json!({ "destination": 7 })).is_err());
/// ```
pub fn validate_arguments(tool: &str, schema: &Value, args: &Value) -> Result<()> {
    let validator = jsonschema::Validator::new(schema).map_err(|e| {
        Error::Configuration(format!("Tool '{tool}' has an invalid input schema: {e}"))
    })?;
    if validator.is_valid(args) {
        return Ok(());
    }

    let reasons: Vec<String> = validator.iter_errors(args).map(|e| e.to_string()).collect();
    Err(Error::schema_violation(tool, reasons.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use handoff_core::ErrorKind;
    use handoff_core::tool::schema;
    use serde_json::json;

    fn destination_schema() -> Value {
        schema::object(
            json!({ "destination": schema::string("City or region") }),
            vec!["destination"],
        )
    }

    fn reason(err: Error) -> String {
        match err {
            Error::SchemaViolation { reason, .. } => reason,
            other => panic!("expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_accepts_conforming_arguments() {
        assert!(validate_arguments("t", &destination_schema(), &json!({"destination": "Bali"})).is_ok());
    }

    #[test]
    fn test_rejects_missing_required_field() {
        let err = validate_arguments("get_flights", &destination_schema(), &json!({})).unwrap_err();
        assert!(matches!(&err, Error::SchemaViolation { tool, .. } if tool == "get_flights"));
        assert!(reason(err).contains("destination"));
    }

    #[test]
    fn test_rejects_wrong_property_type() {
        let err = validate_arguments("t", &destination_schema(), &json!({"destination": 42})).unwrap_err();
        let reason = reason(err);
        assert!(reason.contains("42"));
        assert!(reason.contains("string"));
    }

    #[test]
    fn test_rejects_non_object_arguments() {
        let err = validate_arguments("t", &destination_schema(), &json!("Bali")).unwrap_err();
        assert!(reason(err).contains("object"));
    }

    #[test]
    fn test_rejects_unexpected_field_when_closed() {
        let err = validate_arguments(
            "t",
            &destination_schema(),
            &json!({"destination": "Bali", "budget": 10}),
        )
        .unwrap_err();
        assert!(reason(err).contains("budget"));
    }

    #[test]
    fn test_reports_every_violation() {
        let schema = schema::object(
            json!({
                "destination": schema::string("Where"),
                "nights": schema::integer("Nights"),
            }),
            vec!["destination", "nights"],
        );
        let err = validate_arguments("t", &schema, &json!({"destination": 1, "nights": "two"})).unwrap_err();
        assert_eq!(reason(err).split("; ").count(), 2);
    }

    #[test]
    fn test_open_object_allows_extra_fields() {
        let open = json!({
            "type": "object",
            "properties": { "name": { "type": "string" } }
        });
        assert!(validate_arguments("t", &open, &json!({"name": "x", "extra": true})).is_ok());
    }

    #[test]
    fn test_nested_arrays_and_integers() {
        let schema = schema::object(
            json!({
                "nights": schema::integer("Nights"),
                "cities": schema::array("Cities", schema::string("City")),
            }),
            vec!["nights"],
        );

        assert!(validate_arguments("t", &schema, &json!({"nights": 3, "cities": ["Bali"]})).is_ok());
        assert!(validate_arguments("t", &schema, &json!({"nights": 2.5})).is_err());
        assert!(validate_arguments("t", &schema, &json!({"nights": 1, "cities": ["Bali", 3]})).is_err());
    }

    #[test]
    fn test_enum_constraint() {
        let schema = json!({ "type": "string", "enum": ["relax", "adventure"] });
        assert!(validate_arguments("t", &schema, &json!("relax")).is_ok());
        assert!(validate_arguments("t", &schema, &json!("party")).is_err());
    }

    #[test]
    fn test_schema_without_type_accepts_anything() {
        assert!(validate_arguments("t", &json!({}), &json!([1, "two"])).is_ok());
    }

    #[test]
    fn test_invalid_schema_is_configuration_error() {
        let broken = json!({ "type": "no-such-type" });
        let err = validate_arguments("t", &broken, &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}
