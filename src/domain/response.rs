use serde::Deserialize;

/// Response shape tagged by the API's `object` discriminator.
pub trait ApiObject {
    /// Expected value of the top-level `object` field.
    const OBJECT: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EmailAddress {
    #[serde(default)]
    pub display_name: Option<String>,
    pub identifier: String,
    #[serde(default)]
    pub identifier_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Attachment metadata listed on an email. The content is fetched separately.
pub struct MailAttachmentInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub mime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Mail {
    pub id: String,
    pub account_id: String,
    pub provider_id: String,
    pub date: String,
    pub role: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub body_plain: Option<String>,
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub read_date: Option<String>,
    #[serde(default)]
    pub has_attachments: bool,
    #[serde(default)]
    pub from_attendee: Option<EmailAddress>,
    #[serde(default)]
    pub to_attendees: Vec<EmailAddress>,
    #[serde(default)]
    pub cc_attendees: Vec<EmailAddress>,
    #[serde(default)]
    pub bcc_attendees: Vec<EmailAddress>,
    #[serde(default)]
    pub reply_to_attendees: Vec<EmailAddress>,
    #[serde(default)]
    pub attachments: Vec<MailAttachmentInfo>,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
}

impl ApiObject for Mail {
    const OBJECT: &'static str = "Email";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MailList {
    pub items: Vec<Mail>,
    #[serde(default)]
    pub cursor: Option<String>,
}

impl ApiObject for MailList {
    const OBJECT: &'static str = "EmailList";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MailDeleted {}

impl ApiObject for MailDeleted {
    const OBJECT: &'static str = "EmailDeleted";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MailUpdated {}

impl ApiObject for MailUpdated {
    const OBJECT: &'static str = "EmailUpdated";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MailSent {
    #[serde(default)]
    pub tracking_id: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
}

impl ApiObject for MailSent {
    const OBJECT: &'static str = "EmailSent";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub account_id: String,
    pub provider_id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub nb_mails: Option<u64>,
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl ApiObject for Folder {
    const OBJECT: &'static str = "Folder";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FolderList {
    pub items: Vec<Folder>,
}

impl ApiObject for FolderList {
    const OBJECT: &'static str = "FolderList";
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub id: String,
    pub account_id: String,
    pub chat_id: String,
    pub sender_id: String,
    pub timestamp: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    /// Attachment descriptors; their shape differs per provider.
    #[serde(default)]
    pub attachments: Vec<serde_json::Value>,
}

impl ApiObject for Message {
    const OBJECT: &'static str = "Message";
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Chat summary. Only `id` is guaranteed; the rest varies per messaging provider.
pub struct Chat {
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub account_type: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unread_count: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl ApiObject for Chat {
    const OBJECT: &'static str = "Chat";
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw attachment content as returned by the attachment endpoints.
pub struct AttachmentBlob {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
