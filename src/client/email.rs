use crate::client::{DualAddress, UnipileClient, UnipileError};
use crate::domain::{
    FolderList, ListEmails, ListFolders, MailList, MailSent, RequestOptions, SendEmail,
};
use crate::transport::email::{
    self, EmailAttachmentGet, EmailDelete, EmailGetOne, EmailUpdate, FolderGetOne,
};

/// Email, folder and email-attachment operations.
///
/// Obtained through [`UnipileClient::email`].
#[derive(Clone, Copy)]
pub struct EmailResource<'a> {
    client: &'a UnipileClient,
}

impl<'a> EmailResource<'a> {
    pub(crate) fn new(client: &'a UnipileClient) -> Self {
        Self { client }
    }

    /// List emails (`GET /emails`).
    pub async fn list(
        &self,
        input: &ListEmails,
        options: &RequestOptions,
    ) -> Result<MailList, UnipileError> {
        self.client.send(email::list_emails(input, options)).await
    }

    /// Get one email, by Unipile id or by provider id.
    pub fn get_one(&self) -> DualAddress<'a, EmailGetOne> {
        DualAddress::new(self.client)
    }

    /// Delete an email, by Unipile id or by provider id.
    pub fn delete(&self) -> DualAddress<'a, EmailDelete> {
        DualAddress::new(self.client)
    }

    /// Move an email between folders or change its read state.
    pub fn update(&self) -> DualAddress<'a, EmailUpdate> {
        DualAddress::new(self.client)
    }

    /// List mail folders (`GET /folders`).
    pub async fn list_folders(
        &self,
        input: &ListFolders,
        options: &RequestOptions,
    ) -> Result<FolderList, UnipileError> {
        self.client.send(email::list_folders(input, options)).await
    }

    /// Get one folder, by Unipile id or by provider id.
    pub fn get_one_folder(&self) -> DualAddress<'a, FolderGetOne> {
        DualAddress::new(self.client)
    }

    /// Send an email as multipart form data (`POST /emails`).
    pub async fn send(
        &self,
        input: &SendEmail,
        options: &RequestOptions,
    ) -> Result<MailSent, UnipileError> {
        let descriptor = email::send_email(input, options).map_err(UnipileError::Encode)?;
        self.client.send(descriptor).await
    }

    /// Download an email attachment, addressing the email by Unipile id or provider id.
    pub fn get_attachment(&self) -> DualAddress<'a, EmailAttachmentGet> {
        DualAddress::new(self.client)
    }
}
