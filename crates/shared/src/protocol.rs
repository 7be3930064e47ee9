use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const REFLECTOR_FIELD: &str = "reflector";
pub const PLUGBOARD_FIELD: &str = "plugboard";
pub const PLAINTEXT_FIELD: &str = "plaintext";
/// Display-only field holding the previous output; never submitted.
pub const CIPHERTEXT_FIELD: &str = "ciphertext";

pub fn encode_route() -> &'static str {
    "/encode"
}

/// Field name of the rotor selector for a 1-based slot.
pub fn rotor_field(slot: usize) -> String {
    format!("rotor{slot}")
}

/// Field name of the starting position for a 1-based slot.
pub fn position_field(slot: usize) -> String {
    format!("rotor{slot}-pos")
}

/// Named text and select values of the form, as a generic field collection sees them.
pub type FormFields = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Integer(i64),
    Text(String),
}

/// Flat field-name to value mapping sent to the encode service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionPayload {
    fields: BTreeMap<String, FieldValue>,
}

impl SubmissionPayload {
    pub fn from_fields(fields: FormFields) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name, FieldValue::Text(value)))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.fields.get(name) {
            Some(FieldValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.fields.get(name) {
            Some(FieldValue::Flag(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Successful encode response. Older deployments answer with a bare JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncodeResponse {
    Bare(String),
    Wrapped { ciphertext: String },
}

impl EncodeResponse {
    pub fn into_ciphertext(self) -> String {
        match self {
            EncodeResponse::Bare(ciphertext) | EncodeResponse::Wrapped { ciphertext } => ciphertext,
        }
    }
}
