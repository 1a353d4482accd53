//! Field descriptors and record reconstruction.

use std::{fmt, rc::Rc};

use kv_store::StoredValue;
use serde_json::{Map, Value};

use crate::Record;

/// Transform applied to a raw stored value when a field is rebuilt.
pub type FieldDecoder = Rc<dyn Fn(&Value) -> Value>;

#[derive(Clone)]
/// How a field's raw stored value becomes its record value.
pub enum FieldKind {
    /// The raw value is used unchanged.
    Plain,
    /// The raw value is passed through a decoder.
    Decoded(FieldDecoder),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("Plain"),
            Self::Decoded(_) => f.write_str("Decoded(..)"),
        }
    }
}

#[derive(Debug, Clone)]
/// One declared field of a [`ModelSchema`].
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
}

impl FieldDescriptor {
    /// Declares a field whose stored value is used as-is.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Plain,
        }
    }

    /// Declares a field whose stored value goes through `decode` on reconstruction.
    pub fn decoded(name: impl Into<String>, decode: impl Fn(&Value) -> Value + 'static) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Decoded(Rc::new(decode)),
        }
    }

    /// Returns the field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns how the field is rebuilt.
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Rebuilds the field value from its raw stored value. Absent values arrive as `null`.
    pub fn rebuild(&self, raw: Option<&Value>) -> Value {
        let raw = raw.cloned().unwrap_or(Value::Null);
        match &self.kind {
            FieldKind::Plain => raw,
            FieldKind::Decoded(decode) => decode(&raw),
        }
    }
}

#[derive(Debug, Clone)]
/// Field layout of one record type.
pub struct ModelSchema {
    name: String,
    id_property: String,
    fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    /// Creates an empty schema whose identifier lives in the `id` field.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_property: "id".to_string(),
            fields: Vec::new(),
        }
    }

    /// Sets the field that holds the record identifier.
    pub fn with_id_property(mut self, id_property: impl Into<String>) -> Self {
        self.id_property = id_property.into();
        self
    }

    /// Appends a declared field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the record type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field that holds the record identifier.
    pub fn id_property(&self) -> &str {
        &self.id_property
    }

    /// Returns the declared fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Creates a new (phantom) record. A non-empty string under the id property becomes its id.
    pub fn record(&self, data: Map<String, Value>) -> Record {
        Record::phantom(&self.id_property, data)
    }

    /// Creates a new (phantom) record from `(field, value)` pairs.
    pub fn record_with<'f>(&self, fields: impl IntoIterator<Item = (&'f str, Value)>) -> Record {
        self.record(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    /// Returns the raw value persisted for `record`: its field values with the id property set
    /// to the record identifier.
    pub fn store_shape(&self, record: &Record) -> StoredValue {
        let mut value = record.data().clone();
        if let Some(id) = record.id() {
            value.insert(self.id_property.clone(), Value::String(id.to_string()));
        }
        value
    }

    /// Rebuilds an existing record stored under `id`.
    ///
    /// Only declared fields are kept; raw fields outside the schema are dropped.
    pub fn reconstruct(&self, raw: &StoredValue, id: &str) -> Record {
        let data = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.rebuild(raw.get(&field.name))))
            .collect::<Map<_, _>>();
        Record::existing(&self.id_property, id, data)
    }
}
