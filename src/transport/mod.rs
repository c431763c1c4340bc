//! Transport layer: request descriptors and wire-format details.
//!
//! Every operation is expressed as a [`RequestDescriptor`]: path segments, method,
//! query parameters, body and the [`ResponseValidator`] that checks the answer. The
//! builders here are pure; the client executes the descriptors.

mod descriptor;
mod dual;
pub mod email;
pub mod messaging;
mod params;
mod payload;
mod validator;

pub use descriptor::{Method, RequestDescriptor};
pub use dual::{DualAddressed, DualOutput};
pub use params::QueryParams;
pub use payload::{
    ATTACHMENTS_FIELD, Body, MultipartBody, MultipartPart, PartValue, merge_json_body,
};
pub use validator::{
    BlobValidator, ChatValidator, DecodeError, DecodePayload, FolderListValidator,
    FolderValidator, MailDeletedValidator, MailListValidator, MailSentValidator,
    MailUpdatedValidator, MailValidator, MessageValidator, Permissive, RawResponse,
    ResponseValidationError, ResponseValidator, Strict,
};
