//! Component entity, its props, and the submitted DTO.
//!
//! [`Component`] is the canonical shape read back from the store.
//! [`ComponentInput`] is what clients send on create and update: every
//! field is optional so the pipeline can tell "absent" from "empty".

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use validator::{Validate, ValidateUrl, ValidationError};

use crate::types::DbId;

/// A component as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: DbId,
    #[serde(flatten)]
    pub document: ComponentDocument,
}

impl Component {
    pub fn new(id: DbId, document: ComponentDocument) -> Self {
        Self { id, document }
    }
}

/// Every persisted field except the identifier.
///
/// Missing document keys read back as their empty defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentDocument {
    pub name: String,
    pub image: String,
    pub children: Vec<DbId>,
    pub is_child: bool,
    pub props: Vec<ComponentProp>,
}

/// A named attribute attached to a component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ComponentProp {
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub name: String,
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub value: String,
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub description: String,
    #[serde(rename = "type")]
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub kind: String,
}

/// Component payload as submitted by a client.
///
/// A submitted `id` is accepted so clients can echo back what they read,
/// but the write policy never lets it through.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInput {
    pub id: Option<Value>,
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_image_url"))]
    pub image: Option<String>,
    /// Child identifiers as sent. Each one is checked by the validation
    /// rules so a bad entry is reported as `children[i]`.
    pub children: Option<Vec<String>>,
    pub is_child: Option<bool>,
    pub props: Option<Vec<ComponentProp>>,
}

/// Top-level component fields, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Image,
    Children,
    IsChild,
    Props,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Id,
        Field::Name,
        Field::Image,
        Field::Children,
        Field::IsChild,
        Field::Props,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Image => "image",
            Field::Children => "children",
            Field::IsChild => "isChild",
            Field::Props => "props",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A submitted field value together with whether it counts as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedValue {
    pub value: Value,
    pub is_empty: bool,
}

impl ComponentInput {
    /// Whether the client sent a value for `field`.
    pub fn has(&self, field: Field) -> bool {
        self.submitted(field).is_some()
    }

    /// The submitted JSON value for `field`, if any.
    ///
    /// Strings and sequences are empty when they have no content. A boolean
    /// that was sent is never empty: `false` is a deliberate value here.
    pub fn submitted(&self, field: Field) -> Option<SubmittedValue> {
        match field {
            Field::Id => self.id.as_ref().filter(|v| !v.is_null()).map(|v| SubmittedValue {
                value: v.clone(),
                is_empty: v.as_str().is_some_and(str::is_empty),
            }),
            Field::Name => self.name.as_ref().map(|s| SubmittedValue {
                value: json!(s),
                is_empty: s.is_empty(),
            }),
            Field::Image => self.image.as_ref().map(|s| SubmittedValue {
                value: json!(s),
                is_empty: s.is_empty(),
            }),
            Field::Children => self.children.as_ref().map(|c| SubmittedValue {
                value: json!(c),
                is_empty: c.is_empty(),
            }),
            Field::IsChild => self.is_child.map(|b| SubmittedValue {
                value: json!(b),
                is_empty: false,
            }),
            Field::Props => self.props.as_ref().map(|p| SubmittedValue {
                value: json!(p),
                is_empty: p.is_empty(),
            }),
        }
    }
}

/// An empty image means "no image"; anything else must parse as a URL.
fn validate_image_url(image: &str) -> Result<(), ValidationError> {
    if image.is_empty() || image.validate_url() {
        return Ok(());
    }
    let mut err = ValidationError::new("url");
    err.message = Some("must be a well-formed URL".into());
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_serializes_with_wire_names() {
        let id = DbId::now_v7();
        let component = Component::new(
            id,
            ComponentDocument {
                name: "Header".into(),
                is_child: true,
                props: vec![ComponentProp {
                    name: "title".into(),
                    value: "Hello".into(),
                    description: "Heading text".into(),
                    kind: "string".into(),
                }],
                ..Default::default()
            },
        );

        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["isChild"], true);
        assert_eq!(json["image"], "");
        assert_eq!(json["children"], json!([]));
        assert_eq!(json["props"][0]["type"], "string");
    }

    #[test]
    fn document_defaults_missing_keys() {
        let doc: ComponentDocument = serde_json::from_value(json!({"name": "Footer"})).unwrap();
        assert_eq!(doc.name, "Footer");
        assert!(doc.children.is_empty());
        assert!(!doc.is_child);
        assert!(doc.props.is_empty());
    }

    #[test]
    fn input_distinguishes_absent_from_empty() {
        let input: ComponentInput =
            serde_json::from_value(json!({"name": "", "children": []})).unwrap();

        assert!(input.has(Field::Name));
        assert!(input.submitted(Field::Name).unwrap().is_empty);
        assert!(input.submitted(Field::Children).unwrap().is_empty);
        assert!(!input.has(Field::Image));
        assert!(!input.has(Field::Props));
    }

    #[test]
    fn false_flag_is_not_empty() {
        let input: ComponentInput = serde_json::from_value(json!({"isChild": false})).unwrap();
        let submitted = input.submitted(Field::IsChild).unwrap();
        assert_eq!(submitted.value, json!(false));
        assert!(!submitted.is_empty);
    }

    #[test]
    fn null_id_counts_as_absent() {
        let input: ComponentInput = serde_json::from_value(json!({"id": null})).unwrap();
        assert!(!input.has(Field::Id));
    }

    #[test]
    fn image_url_rule() {
        assert!(validate_image_url("").is_ok());
        assert!(validate_image_url("https://cdn.example.com/header.png").is_ok());
        assert!(validate_image_url("not a url").is_err());
    }
}
