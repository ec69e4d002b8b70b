//! Operation-scoped write policy and the cleaning stage.
//!
//! A [`WritePolicy`] is a table of `(field, operation) -> eligibility`.
//! Cleaning walks the table and keeps only what the operation may write,
//! producing the partial document handed to the store.

use serde_json::{Map, Value};

use crate::component::{ComponentInput, Field};

/// The write operations the pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Update,
}

/// Whether a field may be written by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Denied,
    /// `allow_empty: false` drops empty strings and sequences instead of
    /// letting them overwrite the stored value.
    Allowed { allow_empty: bool },
}

/// Policy row for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPolicy {
    pub field: Field,
    pub create: Eligibility,
    pub update: Eligibility,
}

impl FieldPolicy {
    pub const fn new(field: Field, create: Eligibility, update: Eligibility) -> Self {
        Self {
            field,
            create,
            update,
        }
    }

    pub fn for_operation(&self, op: Operation) -> Eligibility {
        match op {
            Operation::Create => self.create,
            Operation::Update => self.update,
        }
    }
}

const DENIED: Eligibility = Eligibility::Denied;
const NO_EMPTY: Eligibility = Eligibility::Allowed { allow_empty: false };
const EMPTY_OK: Eligibility = Eligibility::Allowed { allow_empty: true };

/// Versioned write policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePolicy {
    version: u32,
    fields: Vec<FieldPolicy>,
}

impl WritePolicy {
    /// Current version of [`WritePolicy::component`].
    pub const COMPONENT_VERSION: u32 = 1;

    pub fn new(version: u32, fields: Vec<FieldPolicy>) -> Self {
        Self { version, fields }
    }

    /// The component policy.
    ///
    /// ```text
    /// field     create        update
    /// id        denied        denied
    /// name      no empty      no empty
    /// image     no empty      no empty
    /// children  empty ok      empty ok
    /// isChild   empty ok      empty ok
    /// props     empty ok      empty ok
    /// ```
    pub fn component() -> Self {
        Self::new(
            Self::COMPONENT_VERSION,
            vec![
                FieldPolicy::new(Field::Id, DENIED, DENIED),
                FieldPolicy::new(Field::Name, NO_EMPTY, NO_EMPTY),
                FieldPolicy::new(Field::Image, NO_EMPTY, NO_EMPTY),
                FieldPolicy::new(Field::Children, EMPTY_OK, EMPTY_OK),
                FieldPolicy::new(Field::IsChild, EMPTY_OK, EMPTY_OK),
                FieldPolicy::new(Field::Props, EMPTY_OK, EMPTY_OK),
            ],
        )
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn fields(&self) -> &[FieldPolicy] {
        &self.fields
    }

    /// Eligibility of `field` for `op`. Fields missing from the table are
    /// denied.
    pub fn eligibility(&self, field: Field, op: Operation) -> Eligibility {
        self.fields
            .iter()
            .find(|p| p.field == field)
            .map_or(Eligibility::Denied, |p| p.for_operation(op))
    }

    /// Build the partial document `op` is allowed to write.
    pub fn clean(&self, input: &ComponentInput, op: Operation) -> CleanedDocument {
        let mut fields = Map::new();

        for policy in &self.fields {
            let Some(submitted) = input.submitted(policy.field) else {
                continue;
            };
            match policy.for_operation(op) {
                Eligibility::Denied => {
                    tracing::debug!(field = %policy.field, ?op, "Dropping field not writable by operation");
                }
                Eligibility::Allowed { allow_empty: false } if submitted.is_empty => {
                    tracing::debug!(field = %policy.field, ?op, "Dropping empty value");
                }
                Eligibility::Allowed { .. } => {
                    fields.insert(policy.field.as_str().to_string(), submitted.value);
                }
            }
        }

        CleanedDocument { fields }
    }
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self::component()
    }
}

/// Partial component document produced by [`WritePolicy::clean`].
///
/// Keys are wire field names; the identifier is never present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedDocument {
    fields: Map<String, Value>,
}

impl CleanedDocument {
    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(field.as_str())
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(field.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn input(value: Value) -> ComponentInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn id_is_never_written() {
        let policy = WritePolicy::component();
        let submitted = input(json!({"id": "67e55044-10b1-426f-9247-bb680e5fe0c8", "name": "Header"}));

        for op in [Operation::Create, Operation::Update] {
            let cleaned = policy.clean(&submitted, op);
            assert!(!cleaned.contains(Field::Id));
            assert_eq!(cleaned.get(Field::Name), Some(&json!("Header")));
        }
    }

    #[test]
    fn empty_strings_are_dropped() {
        let policy = WritePolicy::component();
        let cleaned = policy.clean(&input(json!({"name": "", "image": ""})), Operation::Update);
        assert!(cleaned.is_empty());
    }

    #[test]
    fn empty_sequences_may_overwrite() {
        let policy = WritePolicy::component();
        let cleaned = policy.clean(
            &input(json!({"children": [], "props": []})),
            Operation::Update,
        );
        assert_eq!(cleaned.get(Field::Children), Some(&json!([])));
        assert_eq!(cleaned.get(Field::Props), Some(&json!([])));
    }

    #[test]
    fn absent_fields_stay_absent() {
        let policy = WritePolicy::component();
        let cleaned = policy.clean(&input(json!({"name": "Footer"})), Operation::Update);
        assert_eq!(cleaned.into_value(), json!({"name": "Footer"}));
    }

    #[test]
    fn false_flag_is_written() {
        let policy = WritePolicy::component();
        let cleaned = policy.clean(&input(json!({"isChild": false})), Operation::Update);
        assert_eq!(cleaned.get(Field::IsChild), Some(&json!(false)));
    }

    #[test]
    fn header_scenario_create_document() {
        let policy = WritePolicy::component();
        let cleaned = policy.clean(
            &input(json!({
                "name": "Header",
                "image": "",
                "children": [],
                "isChild": false,
                "props": []
            })),
            Operation::Create,
        );
        assert_eq!(
            cleaned.into_value(),
            json!({"name": "Header", "children": [], "isChild": false, "props": []})
        );
    }

    #[test]
    fn custom_table_restricts_update() {
        let policy = WritePolicy::new(
            2,
            vec![
                FieldPolicy::new(Field::Name, NO_EMPTY, DENIED),
                FieldPolicy::new(Field::Image, NO_EMPTY, NO_EMPTY),
            ],
        );
        let submitted = input(json!({"name": "Header", "image": "https://x.io/a.png", "isChild": true}));

        let cleaned = policy.clean(&submitted, Operation::Update);
        assert!(!cleaned.contains(Field::Name));
        assert!(cleaned.contains(Field::Image));
        assert!(!cleaned.contains(Field::IsChild), "fields missing from the table are denied");
        assert_eq!(policy.version(), 2);
    }

    #[test]
    fn lookup_matches_table() {
        let policy = WritePolicy::component();
        assert_eq!(policy.eligibility(Field::Id, Operation::Create), Eligibility::Denied);
        assert_eq!(
            policy.eligibility(Field::Children, Operation::Update),
            Eligibility::Allowed { allow_empty: true }
        );
        for op in [Operation::Create, Operation::Update] {
            assert_eq!(
                policy.eligibility(Field::IsChild, op),
                Eligibility::Allowed { allow_empty: true }
            );
        }
    }
}
