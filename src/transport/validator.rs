use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{
    ApiObject, AttachmentBlob, Chat, Folder, FolderList, Mail, MailDeleted, MailList, MailSent,
    MailUpdated, Message,
};

/// Response as received from the wire, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a successful response body is turned into the validator's input.
pub trait DecodePayload: Sized {
    /// `Accept` header sent for endpoints producing this payload.
    const ACCEPT: &'static str;

    fn decode(raw: RawResponse) -> Result<Self, DecodeError>;
}

impl DecodePayload for Value {
    const ACCEPT: &'static str = "application/json";

    fn decode(raw: RawResponse) -> Result<Self, DecodeError> {
        if raw.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&raw.body)?)
    }
}

impl DecodePayload for AttachmentBlob {
    const ACCEPT: &'static str = "*/*";

    fn decode(raw: RawResponse) -> Result<Self, DecodeError> {
        Ok(AttachmentBlob {
            content_type: raw.content_type,
            bytes: raw.body,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResponseValidationError {
    #[error("expected object {expected:?}, got {actual:?}")]
    UnexpectedObject {
        expected: &'static str,
        actual: Option<String>,
    },

    #[error("response does not match the {object} shape: {source}")]
    Shape {
        object: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Per-endpoint response contract: checks a decoded payload and produces the typed result.
pub trait ResponseValidator {
    type Input: DecodePayload;
    type Output;

    fn validate(&self, payload: Self::Input) -> Result<Self::Output, ResponseValidationError>;
}

/// Validator for responses tagged with an `object` discriminator.
///
/// Rejects payloads whose `object` differs from `T::OBJECT`, then requires the typed
/// shape to deserialize.
pub struct Strict<T>(PhantomData<fn() -> T>);

impl<T> Strict<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for Strict<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Strict<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Strict<T> {}

impl<T> PartialEq for Strict<T> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T> Eq for Strict<T> {}

impl<T: ApiObject> fmt::Debug for Strict<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Strict").field(&T::OBJECT).finish()
    }
}

impl<T: ApiObject + DeserializeOwned> ResponseValidator for Strict<T> {
    type Input = Value;
    type Output = T;

    fn validate(&self, payload: Value) -> Result<T, ResponseValidationError> {
        let actual = payload.get("object").and_then(Value::as_str);
        if actual != Some(T::OBJECT) {
            return Err(ResponseValidationError::UnexpectedObject {
                expected: T::OBJECT,
                actual: actual.map(str::to_owned),
            });
        }
        serde_json::from_value(payload).map_err(|source| ResponseValidationError::Shape {
            object: T::OBJECT,
            source,
        })
    }
}

pub type MailValidator = Strict<Mail>;
pub type MailListValidator = Strict<MailList>;
pub type MailDeletedValidator = Strict<MailDeleted>;
pub type MailUpdatedValidator = Strict<MailUpdated>;
pub type MailSentValidator = Strict<MailSent>;
pub type FolderValidator = Strict<Folder>;
pub type FolderListValidator = Strict<FolderList>;
pub type MessageValidator = Strict<Message>;
pub type ChatValidator = Strict<Chat>;

/// Validator for endpoints whose response schema is not pinned down yet.
///
/// Performs no structural check and hands back the decoded JSON unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissive;

impl ResponseValidator for Permissive {
    type Input = Value;
    type Output = Value;

    fn validate(&self, payload: Value) -> Result<Value, ResponseValidationError> {
        Ok(payload)
    }
}

/// Validator for binary attachment downloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlobValidator;

impl ResponseValidator for BlobValidator {
    type Input = AttachmentBlob;
    type Output = AttachmentBlob;

    fn validate(&self, payload: AttachmentBlob) -> Result<AttachmentBlob, ResponseValidationError> {
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn strict_accepts_matching_object() {
        let payload = json!({
            "object": "Folder",
            "id": "f1",
            "name": "INBOX",
            "account_id": "acct",
            "provider_id": "INBOX",
            "nb_mails": 3
        });
        let folder = FolderValidator::new().validate(payload).unwrap();
        assert_eq!(folder.id, "f1");
        assert_eq!(folder.nb_mails, Some(3));
    }

    #[test]
    fn chat_shape_only_requires_id() {
        let chat = ChatValidator::new()
            .validate(json!({
                "object": "Chat",
                "id": "c1",
                "account_id": "a",
                "type": 0,
                "name": null
            }))
            .unwrap();
        assert_eq!(chat.id, "c1");
        assert_eq!(chat.account_type, None);
    }

    #[test]
    fn strict_rejects_wrong_object_tag() {
        let err = MailValidator::new()
            .validate(json!({ "object": "Folder" }))
            .unwrap_err();
        match err {
            ResponseValidationError::UnexpectedObject { expected, actual } => {
                assert_eq!(expected, "Email");
                assert_eq!(actual.as_deref(), Some("Folder"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn strict_rejects_missing_fields() {
        let err = MailListValidator::new()
            .validate(json!({ "object": "EmailList" }))
            .unwrap_err();
        assert!(matches!(
            err,
            ResponseValidationError::Shape {
                object: "EmailList",
                ..
            }
        ));
    }

    #[test]
    fn permissive_returns_payload_unchanged() {
        for payload in [
            json!(null),
            json!([1, 2, 3]),
            json!({ "object": "Anything", "nested": { "x": true } }),
            json!("text"),
        ] {
            assert_eq!(Permissive.validate(payload.clone()).unwrap(), payload);
        }
    }

    #[test]
    fn json_decode_treats_blank_body_as_null() {
        let raw = RawResponse {
            content_type: None,
            body: b"  ".to_vec(),
        };
        assert_eq!(Value::decode(raw).unwrap(), Value::Null);

        let raw = RawResponse {
            content_type: Some("text/html".to_owned()),
            body: b"<html>".to_vec(),
        };
        assert!(Value::decode(raw).is_err());
    }

    #[test]
    fn blob_decode_keeps_bytes_and_content_type() {
        let raw = RawResponse {
            content_type: Some("image/png".to_owned()),
            body: vec![0x89, 0x50],
        };
        let blob = AttachmentBlob::decode(raw).unwrap();
        assert_eq!(blob.content_type.as_deref(), Some("image/png"));
        assert_eq!(BlobValidator.validate(blob).unwrap().bytes, vec![0x89, 0x50]);
    }
}
