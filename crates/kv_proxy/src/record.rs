//! Domain records handled by the proxy.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
/// A domain entity: an optional identifier plus field values.
///
/// A record is "phantom" until it has been persisted. Records are built through
/// [`ModelSchema::record`](crate::ModelSchema::record) or rebuilt from stored values by the proxy.
/// The identifier and the value of the schema's id property always agree.
pub struct Record {
    id: Option<String>,
    id_property: String,
    data: Map<String, Value>,
    phantom: bool,
}

fn id_from(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

impl Record {
    pub(crate) fn phantom(id_property: &str, data: Map<String, Value>) -> Self {
        Self {
            id: data.get(id_property).and_then(id_from),
            id_property: id_property.to_string(),
            data,
            phantom: true,
        }
    }

    pub(crate) fn existing(id_property: &str, id: &str, mut data: Map<String, Value>) -> Self {
        data.insert(id_property.to_string(), Value::String(id.to_string()));
        Self {
            id: Some(id.to_string()),
            id_property: id_property.to_string(),
            data,
            phantom: false,
        }
    }

    /// Returns the record identifier, if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Assigns the record identifier and writes it to the id property.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.data
            .insert(self.id_property.clone(), Value::String(id.clone()));
        self.id = Some(id);
    }

    /// Returns whether the record has not been persisted yet.
    pub fn is_phantom(&self) -> bool {
        self.phantom
    }

    /// Returns a field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Sets a field value. Setting the id property also sets the identifier; a value that is not
    /// a non-empty string clears it.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        if field == self.id_property {
            self.id = id_from(&value);
        }
        self.data.insert(field, value);
    }

    /// Returns all field values.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub(crate) fn mark_persisted(&mut self, key: String) {
        self.set_id(key);
        self.phantom = false;
    }
}
