use std::fmt;

use crate::domain::validation::ValidationError;

macro_rules! string_id {
    (@define $(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            #[doc = concat!("Field name used by the API (`", $field, "`).")]
            pub const FIELD: &'static str = $field;

            /// Borrow the validated value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
    ($(#[$meta:meta])* $name:ident, $field:literal, verbatim) => {
        string_id!(@define $(#[$meta])* $name, $field);

        impl $name {
            #[doc = concat!("Create a validated [`", stringify!($name), "`], kept as provided.")]
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::Empty { field: Self::FIELD });
                }
                Ok(Self(value))
            }
        }
    };
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        string_id!(@define $(#[$meta])* $name, $field);

        impl $name {
            #[doc = concat!("Create a validated [`", stringify!($name), "`].")]
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::Empty { field: Self::FIELD });
                }
                Ok(Self(trimmed.to_owned()))
            }
        }
    };
}

string_id!(
    /// Unipile access token, sent as the `X-API-KEY` header.
    ///
    /// Invariant: non-empty after trimming.
    AccessToken,
    "access_token"
);

string_id!(
    /// Id of a connected account.
    ///
    /// Invariant: non-empty after trimming. Required whenever a resource is addressed
    /// by its provider id, because provider ids are only unique per account.
    AccountId,
    "account_id"
);

string_id!(
    /// Unipile id of an email.
    EmailId,
    "email_id"
);

string_id!(
    /// Provider-native id of an email (the id the mailbox vendor assigned).
    ///
    /// Opaque: rejected when blank, otherwise stored exactly as given.
    EmailProviderId,
    "email_provider_id",
    verbatim
);

string_id!(
    /// Unipile id of a mail folder.
    FolderId,
    "folder_id"
);

string_id!(
    /// Provider-native id of a mail folder.
    ///
    /// Opaque: rejected when blank, otherwise stored exactly as given.
    FolderProviderId,
    "folder_provider_id",
    verbatim
);

string_id!(
    /// Id of an attachment, scoped to its email or message.
    AttachmentId,
    "attachment_id"
);

string_id!(
    /// Unipile id of a chat.
    ChatId,
    "chat_id"
);

string_id!(
    /// Unipile id of a chat message.
    MessageId,
    "message_id"
);

string_id!(
    /// Unipile id of a chat attendee.
    AttendeeId,
    "attendee_id"
);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A provider-native id together with the account it belongs to.
///
/// The only way to address a resource by provider id; the account scope cannot be
/// left out. The fields are private, so [`ProviderAddress::new`] is the only
/// constructor:
///
/// ```compile_fail
/// use unipile::{AccountId, EmailProviderId, ProviderAddress};
///
/// let address = ProviderAddress {
///     provider_id: EmailProviderId::new("prov123").unwrap(),
///     account_id: AccountId::new("acct1").unwrap(),
/// };
/// ```
///
/// and it takes the account id as a required argument:
///
/// ```compile_fail
/// use unipile::{EmailProviderId, ProviderAddress};
///
/// let address = ProviderAddress::new(EmailProviderId::new("prov123").unwrap());
/// ```
pub struct ProviderAddress<T> {
    provider_id: T,
    account_id: AccountId,
}

impl<T> ProviderAddress<T> {
    pub fn new(provider_id: T, account_id: AccountId) -> Self {
        Self {
            provider_id,
            account_id,
        }
    }

    pub fn provider_id(&self) -> &T {
        &self.provider_id
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Mailbox role used to filter email listings (`role`).
pub enum EmailRole {
    Inbox,
    Sent,
    Archive,
    Drafts,
    Trash,
    Spam,
    All,
    Important,
    Starred,
    Unknown,
}

impl EmailRole {
    pub const FIELD: &'static str = "role";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Sent => "sent",
            Self::Archive => "archive",
            Self::Drafts => "drafts",
            Self::Trash => "trash",
            Self::Spam => "spam",
            Self::All => "all",
            Self::Important => "important",
            Self::Starred => "starred",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Messaging account type used to filter chat listings (`account_type`).
pub enum AccountType {
    Whatsapp,
    Linkedin,
    Slack,
    Twitter,
    Messenger,
    Instagram,
    Telegram,
}

impl AccountType {
    pub const FIELD: &'static str = "account_type";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Whatsapp => "WHATSAPP",
            Self::Linkedin => "LINKEDIN",
            Self::Slack => "SLACK",
            Self::Twitter => "TWITTER",
            Self::Messenger => "MESSENGER",
            Self::Instagram => "INSTAGRAM",
            Self::Telegram => "TELEGRAM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Status change applied to a chat through `PATCH /chats/{id}`.
pub enum ChatAction {
    SetReadStatus(bool),
    SetMuteStatus(bool),
    SetArchiveStatus(bool),
}

impl ChatAction {
    /// Wire name of the action (`action` body field).
    pub fn name(self) -> &'static str {
        match self {
            Self::SetReadStatus(_) => "setReadStatus",
            Self::SetMuteStatus(_) => "setMuteStatus",
            Self::SetArchiveStatus(_) => "setArchiveStatus",
        }
    }

    /// Value carried by the action (`value` body field).
    pub fn value(self) -> bool {
        match self {
            Self::SetReadStatus(value)
            | Self::SetMuteStatus(value)
            | Self::SetArchiveStatus(value) => value,
        }
    }
}
