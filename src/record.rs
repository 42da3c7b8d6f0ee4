// ABOUTME: Dynamic JSON records decoded from podman output.
// ABOUTME: Provides typed accessors that return errors instead of panicking.

use serde_json::{Map, Value};
use thiserror::Error;

/// One JSON object from podman output: a container, an image, an inspect
/// result or the version document. No schema is enforced.
pub type Record = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("field '{field}' is missing")]
    Missing { field: String },

    #[error("field '{field}' is {found}, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Name of the JSON kind held by `value`, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Typed access to record fields.
pub trait RecordExt {
    fn get_value(&self, field: &str) -> Result<&Value, FieldError>;

    fn get_str(&self, field: &str) -> Result<&str, FieldError> {
        let value = self.get_value(field)?;
        value.as_str().ok_or_else(|| wrong_type(field, "a string", value))
    }

    fn get_bool(&self, field: &str) -> Result<bool, FieldError> {
        let value = self.get_value(field)?;
        value.as_bool().ok_or_else(|| wrong_type(field, "a boolean", value))
    }

    fn get_i64(&self, field: &str) -> Result<i64, FieldError> {
        let value = self.get_value(field)?;
        value.as_i64().ok_or_else(|| wrong_type(field, "an integer", value))
    }

    fn get_u64(&self, field: &str) -> Result<u64, FieldError> {
        let value = self.get_value(field)?;
        value
            .as_u64()
            .ok_or_else(|| wrong_type(field, "an unsigned integer", value))
    }

    fn get_f64(&self, field: &str) -> Result<f64, FieldError> {
        let value = self.get_value(field)?;
        value.as_f64().ok_or_else(|| wrong_type(field, "a number", value))
    }

    fn get_object(&self, field: &str) -> Result<&Record, FieldError> {
        let value = self.get_value(field)?;
        value
            .as_object()
            .ok_or_else(|| wrong_type(field, "an object", value))
    }

    fn get_array(&self, field: &str) -> Result<&Vec<Value>, FieldError> {
        let value = self.get_value(field)?;
        value
            .as_array()
            .ok_or_else(|| wrong_type(field, "an array", value))
    }

    /// Walk nested objects, e.g. `["State", "Running"]`. Errors name the
    /// dotted path up to the failing segment.
    fn get_path(&self, path: &[&str]) -> Result<&Value, FieldError>;
}

impl RecordExt for Record {
    fn get_value(&self, field: &str) -> Result<&Value, FieldError> {
        self.get(field).ok_or_else(|| FieldError::Missing {
            field: field.to_string(),
        })
    }

    fn get_path(&self, path: &[&str]) -> Result<&Value, FieldError> {
        let mut current = self;
        let mut walked = String::new();

        for (i, segment) in path.iter().enumerate() {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);

            let value = current.get(*segment).ok_or_else(|| FieldError::Missing {
                field: walked.clone(),
            })?;

            if i + 1 == path.len() {
                return Ok(value);
            }
            current = value
                .as_object()
                .ok_or_else(|| wrong_type(&walked, "an object", value))?;
        }

        Err(FieldError::Missing { field: walked })
    }
}

fn wrong_type(field: &str, expected: &'static str, value: &Value) -> FieldError {
    FieldError::WrongType {
        field: field.to_string(),
        expected,
        found: kind_of(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn container() -> Record {
        match json!({
            "Id": "4f1c2a",
            "Names": ["toolbox-fedora"],
            "Created": 1_600_000_000,
            "Pid": -1,
            "Size": 12.5,
            "IsInfra": false,
            "State": { "Running": true, "Status": "running" },
            "Labels": null
        }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn typed_getters_read_matching_kinds() {
        let record = container();
        assert_eq!(record.get_str("Id").unwrap(), "4f1c2a");
        assert_eq!(record.get_u64("Created").unwrap(), 1_600_000_000);
        assert_eq!(record.get_i64("Pid").unwrap(), -1);
        assert_eq!(record.get_f64("Size").unwrap(), 12.5);
        assert!(!record.get_bool("IsInfra").unwrap());
        assert_eq!(record.get_array("Names").unwrap().len(), 1);
        assert_eq!(record.get_object("State").unwrap().len(), 2);
    }

    #[test]
    fn missing_field_is_reported() {
        let err = container().get_str("Image").unwrap_err();
        assert_eq!(
            err,
            FieldError::Missing {
                field: "Image".to_string()
            }
        );
    }

    #[test]
    fn wrong_kind_is_reported() {
        let err = container().get_str("Labels").unwrap_err();
        assert_eq!(
            err.to_string(),
            "field 'Labels' is null, expected a string"
        );
    }

    #[test]
    fn negative_number_is_not_unsigned() {
        assert!(matches!(
            container().get_u64("Pid"),
            Err(FieldError::WrongType { .. })
        ));
    }

    #[test]
    fn path_walks_nested_objects() {
        let record = container();
        assert_eq!(
            record.get_path(&["State", "Running"]).unwrap(),
            &Value::Bool(true)
        );
    }

    #[test]
    fn path_names_failing_segment() {
        let record = container();
        assert_eq!(
            record.get_path(&["State", "ExitCode"]).unwrap_err(),
            FieldError::Missing {
                field: "State.ExitCode".to_string()
            }
        );
        assert!(matches!(
            record.get_path(&["Id", "Short"]).unwrap_err(),
            FieldError::WrongType { field, .. } if field == "Id"
        ));
    }

    #[test]
    fn empty_path_is_missing() {
        assert!(container().get_path(&[]).is_err());
    }
}
