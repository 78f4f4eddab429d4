//! Request validation from descriptor column rules.

use crate::domain::{EntityDescriptor, ValidationRule};
use crate::error::AppError;
use regex::Regex;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a JSON object body against the entity's column rules. All required fields must be present and non-null.
    pub fn validate(body: &Map<String, Value>, entity: &EntityDescriptor) -> Result<(), AppError> {
        for col in entity.columns {
            let val = body.get(col.name);
            if col.rule.required && val.map_or(true, Value::is_null) {
                return Err(AppError::validation(
                    entity.entity_name,
                    format!("{} is required", col.name),
                ));
            }
            if let Some(v) = val {
                validate_field(entity.entity_name, col.name, v, &col.rule)?;
            }
        }
        Ok(())
    }
}

fn validate_field(entity: &'static str, col: &str, v: &Value, rule: &ValidationRule) -> Result<(), AppError> {
    if v.is_null() {
        return Ok(());
    }
    let Some(s) = v.as_str() else {
        if rule.max_length.is_some() || rule.min_length.is_some() || rule.pattern.is_some() {
            return Err(AppError::validation(entity, format!("{} must be a string", col)));
        }
        return Ok(());
    };
    let len = s.chars().count();
    if let Some(max) = rule.max_length {
        if len > max {
            return Err(AppError::validation(
                entity,
                format!("{} must be at most {} characters", col, max),
            ));
        }
    }
    if let Some(min) = rule.min_length {
        if len < min {
            return Err(AppError::validation(
                entity,
                format!("{} must be at least {} characters", col, min),
            ));
        }
    }
    if let Some(pattern) = rule.pattern {
        let re = Regex::new(pattern).map_err(|_| AppError::validation(entity, format!("invalid pattern for {}", col)))?;
        if !re.is_match(s) {
            return Err(AppError::validation(
                entity,
                format!("{} does not match required pattern", col),
            ));
        }
    }
    Ok(())
}
