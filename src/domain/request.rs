use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    AccountId, AccountType, AttachmentId, AttendeeId, ChatAction, ChatId, EmailId,
    EmailProviderId, EmailRole, MessageId, ProviderAddress,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Caller-supplied parameters passed through to the API untouched.
///
/// Merged into query strings and bodies, but never over a field the operation sets
/// itself.
pub struct ExtraParams(BTreeMap<String, String>);

impl ExtraParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter, replacing an earlier value for the same key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtraParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Per-call options accepted by every operation.
pub struct RequestOptions {
    pub extra_params: ExtraParams,
}

impl RequestOptions {
    pub fn with_extra_params(extra_params: ExtraParams) -> Self {
        Self { extra_params }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A file sent along with an email or a chat message.
pub struct Attachment {
    pub filename: String,
    pub content: Vec<u8>,
}

impl Attachment {
    pub fn new(filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Email address with an optional display name.
pub struct Recipient {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub identifier: String,
}

impl Recipient {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            display_name: None,
            identifier: identifier.into(),
        }
    }

    pub fn named(display_name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            display_name: Some(display_name.into()),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Extra header set on an outgoing email. Names must start with `X-`.
pub struct CustomHeader {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrackingOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opens: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkedinApi {
    Classic,
    Recruiter,
    SalesNavigator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// LinkedIn-specific settings for starting a chat, sent as the `linkedin` part.
pub struct LinkedinChatOptions {
    pub api: LinkedinApi,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inmail: Option<bool>,
}

// Email

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `GET /emails`.
pub struct ListEmails {
    pub account_id: Option<AccountId>,
    pub role: Option<EmailRole>,
    pub folder: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub any_email: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Partial update of an email. `None` leaves the field unchanged server-side.
pub struct EmailChanges {
    pub folders: Option<Vec<String>>,
    pub unread: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEmail {
    pub email_id: EmailId,
    pub changes: EmailChanges,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateEmailByProviderId {
    pub email: ProviderAddress<EmailProviderId>,
    pub changes: EmailChanges,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFolders {
    pub account_id: Option<AccountId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outgoing email for `POST /emails`.
pub struct SendEmail {
    pub account_id: AccountId,
    pub to: Vec<Recipient>,
    pub body: String,
    pub subject: Option<String>,
    pub cc: Option<Vec<Recipient>>,
    pub bcc: Option<Vec<Recipient>>,
    pub from: Option<Recipient>,
    /// Draft to send instead of composing a new email.
    pub draft_id: Option<String>,
    /// Provider id of the email this one replies to.
    pub reply_to: Option<String>,
    pub custom_headers: Option<Vec<CustomHeader>>,
    pub tracking_options: Option<TrackingOptions>,
    pub attachments: Vec<Attachment>,
}

impl SendEmail {
    pub fn new(account_id: AccountId, to: Vec<Recipient>, body: impl Into<String>) -> Self {
        Self {
            account_id,
            to,
            body: body.into(),
            subject: None,
            cc: None,
            bcc: None,
            from: None,
            draft_id: None,
            reply_to: None,
            custom_headers: None,
            tracking_options: None,
            attachments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachment {
    pub email_id: EmailId,
    pub attachment_id: AttachmentId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAttachmentByProviderId {
    pub email: ProviderAddress<EmailProviderId>,
    pub attachment_id: AttachmentId,
}

// Messaging

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `GET /chats`.
pub struct ListChats {
    pub account_id: Option<AccountId>,
    pub account_type: Option<AccountType>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
    pub only_unreads: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChatMessages {
    pub chat_id: ChatId,
    pub sender_id: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl ListChatMessages {
    pub fn new(chat_id: ChatId) -> Self {
        Self {
            chat_id,
            sender_id: None,
            before: None,
            after: None,
            limit: None,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendChatMessage {
    pub chat_id: ChatId,
    pub text: String,
    pub thread_id: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl SendChatMessage {
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            thread_id: None,
            attachments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartChatOptions {
    pub subject: Option<String>,
    pub linkedin: Option<LinkedinChatOptions>,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// New chat for `POST /chats`.
///
/// Invariant: at least one attendee, none of them blank.
pub struct StartChat {
    account_id: AccountId,
    attendees_ids: Vec<String>,
    text: String,
    options: StartChatOptions,
}

impl StartChat {
    pub const ATTENDEES_FIELD: &'static str = "attendees_ids";

    pub fn new(
        account_id: AccountId,
        attendees_ids: Vec<String>,
        text: impl Into<String>,
        options: StartChatOptions,
    ) -> Result<Self, ValidationError> {
        if attendees_ids.is_empty() {
            return Err(ValidationError::NoAttendees);
        }
        if attendees_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ValidationError::Empty {
                field: Self::ATTENDEES_FIELD,
            });
        }
        Ok(Self {
            account_id,
            attendees_ids,
            text: text.into(),
            options,
        })
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    pub fn attendees_ids(&self) -> &[String] {
        &self.attendees_ids
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &StartChatOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `GET /messages`.
pub struct ListMessages {
    pub account_id: Option<AccountId>,
    pub sender_id: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAttendeeMessages {
    pub attendee_id: AttendeeId,
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl ListAttendeeMessages {
    pub fn new(attendee_id: AttendeeId) -> Self {
        Self {
            attendee_id,
            before: None,
            after: None,
            limit: None,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAttendeeChats {
    pub attendee_id: AttendeeId,
    pub account_id: Option<AccountId>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl ListAttendeeChats {
    pub fn new(attendee_id: AttendeeId) -> Self {
        Self {
            attendee_id,
            account_id: None,
            before: None,
            after: None,
            limit: None,
            cursor: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageAttachment {
    pub message_id: MessageId,
    pub attachment_id: AttachmentId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Filters for `GET /chat_attendees`.
pub struct ListAttendees {
    pub account_id: Option<AccountId>,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateChatStatus {
    pub chat_id: ChatId,
    pub action: ChatAction,
}
