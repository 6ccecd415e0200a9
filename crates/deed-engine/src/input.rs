// Shape checks on the extracted field set
use crate::error::MalformedInputError;
use serde_json::Value;
use shared_types::{field, ExtractedFields};

/// Text of every required field, read before any rule runs
#[derive(Debug, Clone)]
pub struct RequiredFields {
    pub doc_number: String,
    pub county: String,
    pub date_signed: String,
    pub date_recorded: String,
    pub amount_numeric: String,
    pub amount_written: String,
}

impl RequiredFields {
    pub fn read(fields: &ExtractedFields) -> Result<Self, MalformedInputError> {
        Ok(Self {
            doc_number: required_text(fields, field::DOC_NUMBER)?,
            county: required_text(fields, field::COUNTY)?,
            date_signed: required_text(fields, field::DATE_SIGNED)?,
            date_recorded: required_text(fields, field::DATE_RECORDED)?,
            amount_numeric: required_text(fields, field::AMOUNT_NUMERIC)?,
            amount_written: required_text(fields, field::AMOUNT_WRITTEN)?,
        })
    }
}

/// A field's value as text; strings pass through and numbers are formatted
pub fn required_text(fields: &ExtractedFields, name: &str) -> Result<String, MalformedInputError> {
    match fields.get(name) {
        None | Some(Value::Null) => Err(MalformedInputError::MissingField(name.to_string())),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(MalformedInputError::UnsupportedValue {
            field: name.to_string(),
            found: match other {
                Value::Bool(_) => "a boolean",
                Value::Array(_) => "an array",
                _ => "an object",
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_are_read_as_text() {
        let fields = ExtractedFields::new().with(field::AMOUNT_NUMERIC, json!(500000));
        assert_eq!(
            required_text(&fields, field::AMOUNT_NUMERIC),
            Ok("500000".to_string())
        );
    }

    #[test]
    fn test_missing_and_null_fields() {
        let fields = ExtractedFields::new().with(field::COUNTY, Value::Null);
        assert_eq!(
            required_text(&fields, field::COUNTY),
            Err(MalformedInputError::MissingField("county".to_string()))
        );
        assert_eq!(
            required_text(&fields, field::DOC_NUMBER),
            Err(MalformedInputError::MissingField("doc_number".to_string()))
        );
    }

    #[test]
    fn test_structured_values_are_malformed() {
        let fields = ExtractedFields::new().with(field::DATE_SIGNED, json!(["2024-01-15"]));
        assert_eq!(
            required_text(&fields, field::DATE_SIGNED),
            Err(MalformedInputError::UnsupportedValue {
                field: "date_signed".to_string(),
                found: "an array",
            })
        );
    }
}
