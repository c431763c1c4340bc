//! Typed Rust client for the Unipile email and messaging HTTP API.
//!
//! The crate is split in three layers: a domain layer of strong types, a transport
//! layer that turns each operation into a [`transport::RequestDescriptor`] (path,
//! query, JSON or multipart body, response validator), and a small client layer that
//! executes descriptors over HTTP.
//!
//! ```rust,no_run
//! use unipile::{AccessToken, AccountId, ListEmails, RequestOptions, UnipileClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), unipile::UnipileError> {
//!     let client = UnipileClient::new("api1.unipile.com:13111", AccessToken::new("...")?)?;
//!     let input = ListEmails {
//!         account_id: Some(AccountId::new("acct")?),
//!         limit: Some(10),
//!         ..Default::default()
//!     };
//!     let emails = client.email().list(&input, &RequestOptions::default()).await?;
//!     println!("{} emails", emails.items.len());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod transport;

pub use client::{
    DualAddress, EmailResource, MessagingResource, UnipileClient, UnipileClientBuilder,
    UnipileError,
};
pub use domain::{
    AccessToken, AccountId, AccountType, Attachment, AttachmentBlob, AttachmentId, AttendeeId,
    ChatAction, ChatId, EmailAttachment, EmailAttachmentByProviderId, EmailChanges, EmailId,
    EmailProviderId, EmailRole, ExtraParams, FolderId, FolderProviderId, ListAttendeeChats,
    ListAttendeeMessages, ListAttendees, ListChatMessages, ListChats, ListEmails, ListFolders,
    ListMessages, MessageAttachment, MessageId, ProviderAddress, Recipient, RequestOptions,
    SendChatMessage, SendEmail, StartChat, StartChatOptions, UpdateChatStatus, UpdateEmail,
    UpdateEmailByProviderId, ValidationError,
};
