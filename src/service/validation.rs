//! Request validation from per-resource field rules.

use crate::error::AppError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
}

#[derive(Clone, Copy, Debug)]
pub struct ValidationRule {
    pub kind: FieldKind,
    pub min_length: Option<usize>,
    pub minimum: Option<f64>,
}

impl ValidationRule {
    /// Required string, not blank once trimmed.
    pub const TEXT: ValidationRule = ValidationRule {
        kind: FieldKind::Text,
        min_length: Some(1),
        minimum: None,
    };

    /// Required number, zero or greater.
    pub const NON_NEGATIVE: ValidationRule = ValidationRule {
        kind: FieldKind::Number,
        min_length: None,
        minimum: Some(0.0),
    };
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against per-field rules. Every ruled field must be present and non-null.
    pub fn validate(body: &Map<String, Value>, rules: &[(&str, ValidationRule)]) -> Result<(), AppError> {
        for (field, rule) in rules {
            match body.get(*field) {
                None | Some(Value::Null) => {
                    return Err(AppError::Validation(format!("{} is required", field)));
                }
                Some(v) => validate_field(field, v, rule)?,
            }
        }
        Ok(())
    }

    /// Validate a JSON body, then deserialize it. Non-object bodies are a bad request.
    pub fn parse<T: DeserializeOwned>(body: Value, rules: &[(&str, ValidationRule)]) -> Result<T, AppError> {
        let map = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::BadRequest("body must be a JSON object".into())),
        };
        Self::validate(&map, rules)?;
        serde_json::from_value(Value::Object(map)).map_err(|e| AppError::Validation(e.to_string()))
    }
}

fn validate_field(field: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    match rule.kind {
        FieldKind::Text => {
            let s = v
                .as_str()
                .ok_or_else(|| AppError::Validation(format!("{} must be a string", field)))?;
            if let Some(min) = rule.min_length {
                if s.trim().chars().count() < min {
                    return Err(AppError::Validation(format!(
                        "{} must be at least {} characters",
                        field, min
                    )));
                }
            }
        }
        FieldKind::Number => {
            let n = v
                .as_f64()
                .ok_or_else(|| AppError::Validation(format!("{} must be a number", field)))?;
            if let Some(min) = rule.minimum {
                if n < min {
                    return Err(AppError::Validation(format!("{} must be at least {}", field, min)));
                }
            }
        }
    }
    Ok(())
}
