//! Audit record data structures
//!
//! Defines the `Auditable` contract consumed from the host framework and the
//! ordered `AuditRecord` that becomes one CSV row.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

/// Field holding the previous values of the changed attributes
pub const OLD_VALUES: &str = "old_values";

/// Field holding the new values of the changed attributes
pub const NEW_VALUES: &str = "new_values";

/// Field appended by the sink when the record is built
pub const CREATED_AT: &str = "created_at";

/// Format of the generated `created_at` column
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An entity that can describe one change to itself
///
/// The returned map must contain at least `old_values` and `new_values`.
/// Key order is preserved and becomes the column order of the audit file.
pub trait Auditable {
    fn to_audit(&self) -> Map<String, Value>;
}

/// A plain old/new delta, for callers that don't have their own entity type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditChange {
    pub old_values: Map<String, Value>,
    pub new_values: Map<String, Value>,

    /// Additional columns, written after `new_values` in insertion order
    pub extra: Map<String, Value>,
}

impl AuditChange {
    pub fn new(old_values: Map<String, Value>, new_values: Map<String, Value>) -> Self {
        Self {
            old_values,
            new_values,
            extra: Map::new(),
        }
    }

    /// Add an extra column to the change
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl Auditable for AuditChange {
    fn to_audit(&self) -> Map<String, Value> {
        let mut audit = Map::new();
        audit.insert(OLD_VALUES.to_string(), Value::Object(self.old_values.clone()));
        audit.insert(NEW_VALUES.to_string(), Value::Object(self.new_values.clone()));
        for (key, value) in &self.extra {
            audit.insert(key.clone(), value.clone());
        }
        audit
    }
}

/// One audit event, ready to be written as a row
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    fields: Map<String, Value>,
}

impl AuditRecord {
    /// Build a record from an entity, stamping `created_at` with `now`
    ///
    /// A `created_at` key supplied by the entity keeps its position but is
    /// overwritten.
    pub fn from_auditable(entity: &dyn Auditable, now: NaiveDateTime) -> Self {
        let mut fields = entity.to_audit();
        fields.insert(
            CREATED_AT.to_string(),
            Value::String(now.format(CREATED_AT_FORMAT).to_string()),
        );
        Self { fields }
    }

    /// Serialize `old_values` and `new_values` into compact JSON text
    ///
    /// Each delta must land in a single cell, never spread over columns. A
    /// missing delta is written as `null` and appended as a new column.
    pub fn sanitized(mut self) -> Self {
        for key in [OLD_VALUES, NEW_VALUES] {
            let text = self
                .fields
                .get(key)
                .map_or_else(|| Value::Null.to_string(), Value::to_string);
            self.fields.insert(key.to_string(), Value::String(text));
        }
        self
    }

    /// Field names in column order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Field values in column order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.values()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}
