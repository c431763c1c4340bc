use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::{Attachment, ExtraParams};

/// Field name shared by every attachment part.
pub const ATTACHMENTS_FIELD: &str = "attachments";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    Json(Map<String, Value>),
    Multipart(MultipartBody),
}

/// Merge passthrough parameters under the operation's explicit JSON fields.
///
/// Passthrough keys go in first, so an explicit field always wins; passthrough may
/// still contribute keys the operation does not set.
pub fn merge_json_body(extra: &ExtraParams, explicit: Map<String, Value>) -> Map<String, Value> {
    let mut merged = extra
        .iter()
        .map(|(k, v)| (k.to_owned(), Value::String(v.to_owned())))
        .collect::<Map<String, Value>>();
    merged.extend(explicit);
    merged
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File { filename: String, content: Vec<u8> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: String,
    pub value: PartValue,
}

/// Ordered multipart body. Parts are sent in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    parts: Vec<MultipartPart>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, name: &str, value: impl Into<String>) {
        self.parts.push(MultipartPart {
            name: name.to_owned(),
            value: PartValue::Text(value.into()),
        });
    }

    /// Append a text part when the value is present and non-empty.
    pub fn optional_text(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|it| !it.is_empty()) {
            self.text(name, value);
        }
    }

    /// Append `value` serialized as a JSON text part.
    pub fn json<T: Serialize + ?Sized>(
        &mut self,
        name: &str,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let encoded = serde_json::to_string(value)?;
        self.text(name, encoded);
        Ok(())
    }

    pub fn optional_json<T: Serialize>(
        &mut self,
        name: &str,
        value: Option<&T>,
    ) -> Result<(), serde_json::Error> {
        match value {
            Some(value) => self.json(name, value),
            None => Ok(()),
        }
    }

    /// Append one binary part per attachment, keeping their order.
    pub fn attachments(&mut self, attachments: &[Attachment]) {
        for attachment in attachments {
            self.parts.push(MultipartPart {
                name: ATTACHMENTS_FIELD.to_owned(),
                value: PartValue::File {
                    filename: attachment.filename.clone(),
                    content: attachment.content.clone(),
                },
            });
        }
    }

    /// Append passthrough parameters whose names no part uses yet.
    pub fn merge_extra(&mut self, extra: &ExtraParams) {
        for (key, value) in extra.iter() {
            if !self.has(key) {
                self.text(key, value);
            }
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.parts.iter().any(|part| part.name == name)
    }

    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<MultipartPart> {
        self.parts
    }
}
