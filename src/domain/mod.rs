//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    Attachment, CustomHeader, EmailAttachment, EmailAttachmentByProviderId, EmailChanges,
    ExtraParams, LinkedinApi, LinkedinChatOptions, ListAttendeeChats, ListAttendeeMessages,
    ListAttendees, ListChatMessages, ListChats, ListEmails, ListFolders, ListMessages,
    MessageAttachment, Recipient, RequestOptions, SendChatMessage, SendEmail, StartChat,
    StartChatOptions, TrackingOptions, UpdateChatStatus, UpdateEmail, UpdateEmailByProviderId,
};
pub use response::{
    ApiObject, AttachmentBlob, Chat, EmailAddress, Folder, FolderList, Mail, MailAttachmentInfo,
    MailDeleted, MailList, MailSent, MailUpdated, Message,
};
pub use validation::ValidationError;
pub use value::{
    AccessToken, AccountId, AccountType, AttachmentId, AttendeeId, ChatAction, ChatId, EmailId,
    EmailProviderId, EmailRole, FolderId, FolderProviderId, MessageId, ProviderAddress,
};
