//! Validation rule set and violation types.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::component::{ComponentInput, Field};
use crate::error::CoreError;
use crate::policy::Operation;
use crate::types::parse_id;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Path of the offending field, e.g. `name` or `props[1].type`.
    pub field: String,
    pub rule_type: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, rule_type: &str, message: &str) -> Self {
        Self {
            field: field.into(),
            rule_type: rule_type.to_string(),
            message: message.to_string(),
        }
    }
}

/// Stateless rule set applied to a [`ComponentInput`] before cleaning.
///
/// Per-field constraints (minimum lengths, URL shape, per-prop rules) live
/// on the DTOs as `validator` attributes. This type adds what depends on the
/// operation: which fields must be present on create. On update only the
/// fields that were sent are checked.
#[derive(Debug, Clone)]
pub struct ValidationRules {
    required_on_create: Vec<Field>,
}

impl ValidationRules {
    pub fn new(required_on_create: Vec<Field>) -> Self {
        Self { required_on_create }
    }

    /// The component rule set: `name`, `children` and `props` are required
    /// on create.
    pub fn component() -> Self {
        Self::new(vec![Field::Name, Field::Children, Field::Props])
    }

    /// Check `input` for `op`, collecting every violation.
    pub fn validate(&self, input: &ComponentInput, op: Operation) -> Result<(), CoreError> {
        let mut violations = Vec::new();

        if op == Operation::Create {
            for field in &self.required_on_create {
                if !input.has(*field) {
                    violations.push(FieldViolation::new(
                        field.as_str(),
                        "required",
                        "is required",
                    ));
                }
            }
        }

        if let Err(errors) = input.validate() {
            collect_violations("", &errors, &mut violations);
        }

        if let Some(children) = &input.children {
            for (index, child) in children.iter().enumerate() {
                if parse_id(child).is_err() {
                    violations.push(FieldViolation::new(
                        format!("children[{index}]"),
                        "identifier",
                        "must be a valid identifier",
                    ));
                }
            }
        }

        if let Some(props) = &input.props {
            for (index, prop) in props.iter().enumerate() {
                if let Err(errors) = prop.validate() {
                    collect_violations(&format!("props[{index}]."), &errors, &mut violations);
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = violations.len(), ?op, "Component failed validation");
            Err(CoreError::Validation(violations))
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self::component()
    }
}

/// Flatten `validator` field errors into violations, ordered by field path.
fn collect_violations(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldViolation>) {
    let mut found: Vec<FieldViolation> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| err.code.to_string());
                FieldViolation {
                    field: format!("{prefix}{}", wire_name(&field)),
                    rule_type: err.code.to_string(),
                    message,
                }
            })
        })
        .collect();
    found.sort_by(|a, b| a.field.cmp(&b.field));
    out.extend(found);
}

/// Map Rust field names reported by `validator` to their wire names.
fn wire_name(field: &str) -> &str {
    match field {
        "kind" => "type",
        "is_child" => "isChild",
        other => other,
    }
}
