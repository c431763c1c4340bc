//! Request construction for the email, folder and email-attachment endpoints.

use serde_json::{Map, Value};

use crate::domain::{
    AccountId, EmailAttachment, EmailAttachmentByProviderId, EmailChanges, EmailId,
    EmailProviderId, EmailRole, FolderId, FolderProviderId, ListEmails, ListFolders,
    ProviderAddress, RequestOptions, SendEmail, UpdateEmail, UpdateEmailByProviderId,
};
use crate::transport::descriptor::{Method, RequestDescriptor};
use crate::transport::dual::DualAddressed;
use crate::transport::params::QueryParams;
use crate::transport::payload::{MultipartBody, merge_json_body};
use crate::transport::validator::{
    BlobValidator, FolderListValidator, FolderValidator, MailDeletedValidator, MailListValidator,
    MailSentValidator, MailUpdatedValidator, MailValidator,
};

const EMAILS: &str = "emails";
const FOLDERS: &str = "folders";
const ATTACHMENTS: &str = "attachments";

pub fn list_emails(
    input: &ListEmails,
    options: &RequestOptions,
) -> RequestDescriptor<MailListValidator> {
    let mut params = QueryParams::from_extra(&options.extra_params);
    params.set_account(input.account_id.as_ref());
    params.set_text(EmailRole::FIELD, input.role.map(EmailRole::as_str));
    params.set_text("folder", input.folder.as_deref());
    params.set_text("from", input.from.as_deref());
    params.set_text("to", input.to.as_deref());
    params.set_text("any_email", input.any_email.as_deref());
    params.set_text("before", input.before.as_deref());
    params.set_text("after", input.after.as_deref());
    params.set_count("limit", input.limit);
    params.set_text("cursor", input.cursor.as_deref());

    RequestDescriptor::new(Method::Get, [EMAILS], MailListValidator::new()).with_parameters(params)
}

pub fn list_folders(
    input: &ListFolders,
    options: &RequestOptions,
) -> RequestDescriptor<FolderListValidator> {
    let mut params = QueryParams::from_extra(&options.extra_params);
    params.set_account(input.account_id.as_ref());

    RequestDescriptor::new(Method::Get, [FOLDERS], FolderListValidator::new())
        .with_parameters(params)
}

pub fn send_email(
    input: &SendEmail,
    options: &RequestOptions,
) -> Result<RequestDescriptor<MailSentValidator>, serde_json::Error> {
    let mut body = MultipartBody::new();
    body.text(AccountId::FIELD, input.account_id.as_str());
    body.text("body", input.body.as_str());
    body.optional_text("subject", input.subject.as_deref());
    body.optional_text("draft_id", input.draft_id.as_deref());
    body.optional_text("reply_to", input.reply_to.as_deref());
    body.json("to", &input.to)?;
    body.optional_json("cc", input.cc.as_ref())?;
    body.optional_json("bcc", input.bcc.as_ref())?;
    body.optional_json("from", input.from.as_ref())?;
    body.optional_json("custom_headers", input.custom_headers.as_ref())?;
    body.optional_json("tracking_options", input.tracking_options.as_ref())?;
    body.attachments(&input.attachments);
    body.merge_extra(&options.extra_params);

    Ok(
        RequestDescriptor::new(Method::Post, [EMAILS], MailSentValidator::new())
            .with_multipart_body(body),
    )
}

/// JSON fields of a partial email update.
///
/// Only supplied fields are written: `unread: Some(false)` is sent, `None` is not.
fn email_changes_body(changes: &EmailChanges) -> Map<String, Value> {
    let mut body = Map::new();
    if let Some(folders) = changes.folders.as_ref() {
        body.insert(
            "folders".to_owned(),
            Value::Array(folders.iter().cloned().map(Value::String).collect()),
        );
    }
    if let Some(unread) = changes.unread {
        body.insert("unread".to_owned(), Value::Bool(unread));
    }
    body
}

/// `GET /emails/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct EmailGetOne;

impl DualAddressed for EmailGetOne {
    type ById = EmailId;
    type ByProviderId = ProviderAddress<EmailProviderId>;
    type Validator = MailValidator;

    fn by_id(input: &EmailId, options: &RequestOptions) -> RequestDescriptor<MailValidator> {
        RequestDescriptor::new(Method::Get, [EMAILS, input.as_str()], MailValidator::new())
            .with_parameters(QueryParams::from_extra(&options.extra_params))
    }

    fn by_provider_id(
        input: &ProviderAddress<EmailProviderId>,
        options: &RequestOptions,
    ) -> RequestDescriptor<MailValidator> {
        RequestDescriptor::new(
            Method::Get,
            [EMAILS, input.provider_id().as_str()],
            MailValidator::new(),
        )
        .with_parameters(QueryParams::provider_scoped(
            &options.extra_params,
            input.account_id(),
        ))
    }
}

/// `DELETE /emails/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct EmailDelete;

impl DualAddressed for EmailDelete {
    type ById = EmailId;
    type ByProviderId = ProviderAddress<EmailProviderId>;
    type Validator = MailDeletedValidator;

    fn by_id(input: &EmailId, options: &RequestOptions) -> RequestDescriptor<MailDeletedValidator> {
        RequestDescriptor::new(
            Method::Delete,
            [EMAILS, input.as_str()],
            MailDeletedValidator::new(),
        )
        .with_parameters(QueryParams::from_extra(&options.extra_params))
    }

    fn by_provider_id(
        input: &ProviderAddress<EmailProviderId>,
        options: &RequestOptions,
    ) -> RequestDescriptor<MailDeletedValidator> {
        RequestDescriptor::new(
            Method::Delete,
            [EMAILS, input.provider_id().as_str()],
            MailDeletedValidator::new(),
        )
        .with_parameters(QueryParams::provider_scoped(
            &options.extra_params,
            input.account_id(),
        ))
    }
}

/// `PUT /emails/{id}`. Passthrough parameters go into the body, under the changes.
#[derive(Debug, Clone, Copy)]
pub struct EmailUpdate;

impl DualAddressed for EmailUpdate {
    type ById = UpdateEmail;
    type ByProviderId = UpdateEmailByProviderId;
    type Validator = MailUpdatedValidator;

    fn by_id(
        input: &UpdateEmail,
        options: &RequestOptions,
    ) -> RequestDescriptor<MailUpdatedValidator> {
        let body = merge_json_body(&options.extra_params, email_changes_body(&input.changes));
        RequestDescriptor::new(
            Method::Put,
            [EMAILS, input.email_id.as_str()],
            MailUpdatedValidator::new(),
        )
        .with_json_body(body)
    }

    fn by_provider_id(
        input: &UpdateEmailByProviderId,
        options: &RequestOptions,
    ) -> RequestDescriptor<MailUpdatedValidator> {
        let body = merge_json_body(&options.extra_params, email_changes_body(&input.changes));
        let mut params = QueryParams::new();
        params.set(AccountId::FIELD, input.email.account_id().as_str());

        RequestDescriptor::new(
            Method::Put,
            [EMAILS, input.email.provider_id().as_str()],
            MailUpdatedValidator::new(),
        )
        .with_parameters(params)
        .with_json_body(body)
    }
}

/// `GET /folders/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct FolderGetOne;

impl DualAddressed for FolderGetOne {
    type ById = FolderId;
    type ByProviderId = ProviderAddress<FolderProviderId>;
    type Validator = FolderValidator;

    fn by_id(input: &FolderId, options: &RequestOptions) -> RequestDescriptor<FolderValidator> {
        RequestDescriptor::new(Method::Get, [FOLDERS, input.as_str()], FolderValidator::new())
            .with_parameters(QueryParams::from_extra(&options.extra_params))
    }

    fn by_provider_id(
        input: &ProviderAddress<FolderProviderId>,
        options: &RequestOptions,
    ) -> RequestDescriptor<FolderValidator> {
        RequestDescriptor::new(
            Method::Get,
            [FOLDERS, input.provider_id().as_str()],
            FolderValidator::new(),
        )
        .with_parameters(QueryParams::provider_scoped(
            &options.extra_params,
            input.account_id(),
        ))
    }
}

/// `GET /emails/{id}/attachments/{attachment_id}`, binary response.
#[derive(Debug, Clone, Copy)]
pub struct EmailAttachmentGet;

impl DualAddressed for EmailAttachmentGet {
    type ById = EmailAttachment;
    type ByProviderId = EmailAttachmentByProviderId;
    type Validator = BlobValidator;

    fn by_id(
        input: &EmailAttachment,
        options: &RequestOptions,
    ) -> RequestDescriptor<BlobValidator> {
        RequestDescriptor::new(
            Method::Get,
            [
                EMAILS,
                input.email_id.as_str(),
                ATTACHMENTS,
                input.attachment_id.as_str(),
            ],
            BlobValidator,
        )
        .with_parameters(QueryParams::from_extra(&options.extra_params))
    }

    fn by_provider_id(
        input: &EmailAttachmentByProviderId,
        options: &RequestOptions,
    ) -> RequestDescriptor<BlobValidator> {
        RequestDescriptor::new(
            Method::Get,
            [
                EMAILS,
                input.email.provider_id().as_str(),
                ATTACHMENTS,
                input.attachment_id.as_str(),
            ],
            BlobValidator,
        )
        .with_parameters(QueryParams::provider_scoped(
            &options.extra_params,
            input.email.account_id(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{Attachment, AttachmentId, ExtraParams, Recipient, TrackingOptions};
    use crate::transport::payload::{ATTACHMENTS_FIELD, Body, MultipartPart, PartValue};

    fn no_options() -> RequestOptions {
        RequestOptions::default()
    }

    fn provider_address() -> ProviderAddress<EmailProviderId> {
        ProviderAddress::new(
            EmailProviderId::new("prov123").unwrap(),
            AccountId::new("acct1").unwrap(),
        )
    }

    fn json_body<V>(descriptor: &RequestDescriptor<V>) -> Value {
        match &descriptor.body {
            Body::Json(map) => Value::Object(map.clone()),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    fn text_part<'a>(parts: &'a [MultipartPart], name: &str) -> Option<&'a str> {
        parts.iter().find_map(|part| match &part.value {
            PartValue::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }

    #[test]
    fn list_emails_only_sends_present_filters() {
        let input = ListEmails {
            account_id: Some(AccountId::new("acct1").unwrap()),
            role: Some(EmailRole::Inbox),
            folder: Some(String::new()),
            limit: Some(20),
            cursor: Some("next".to_owned()),
            ..Default::default()
        };
        let descriptor = list_emails(&input, &no_options());

        assert_eq!(descriptor.method, Method::Get);
        assert_eq!(descriptor.path_display(), "/emails");
        assert_eq!(
            descriptor.parameters.iter().collect::<Vec<_>>(),
            vec![
                ("account_id", "acct1"),
                ("cursor", "next"),
                ("limit", "20"),
                ("role", "inbox"),
            ]
        );
    }

    #[test]
    fn list_emails_without_filters_has_no_parameters() {
        let descriptor = list_emails(&ListEmails::default(), &no_options());
        assert!(descriptor.parameters.is_empty());
        assert_eq!(descriptor.body, Body::Empty);
    }

    #[test]
    fn get_one_by_id_uses_internal_id() {
        let id = EmailId::new("email_id").unwrap();
        let descriptor = EmailGetOne::by_id(&id, &no_options());
        assert_eq!(descriptor.method, Method::Get);
        assert_eq!(descriptor.path, vec!["emails", "email_id"]);
        assert!(descriptor.parameters.is_empty());
    }

    #[test]
    fn get_one_by_provider_id_adds_account_scope() {
        let descriptor = EmailGetOne::by_provider_id(&provider_address(), &no_options());
        assert_eq!(descriptor.method, Method::Get);
        assert_eq!(descriptor.path_display(), "/emails/prov123");
        assert_eq!(descriptor.parameters.get("account_id"), Some("acct1"));
    }

    #[test]
    fn delete_by_provider_id_keeps_passthrough_but_not_over_account() {
        let options = RequestOptions::with_extra_params(
            ExtraParams::new()
                .with("account_id", "other")
                .with("permanent", "true"),
        );
        let descriptor = EmailDelete::by_provider_id(&provider_address(), &options);
        assert_eq!(descriptor.method, Method::Delete);
        assert_eq!(descriptor.parameters.get("account_id"), Some("acct1"));
        assert_eq!(descriptor.parameters.get("permanent"), Some("true"));
    }

    #[test]
    fn update_sends_only_supplied_fields() {
        let input = UpdateEmail {
            email_id: EmailId::new("e1").unwrap(),
            changes: EmailChanges {
                folders: None,
                unread: Some(false),
            },
        };
        let descriptor = EmailUpdate::by_id(&input, &no_options());
        assert_eq!(descriptor.method, Method::Put);
        assert_eq!(descriptor.path_display(), "/emails/e1");
        assert_eq!(json_body(&descriptor), json!({ "unread": false }));
        assert!(descriptor.parameters.is_empty());
    }

    #[test]
    fn update_passthrough_never_overrides_explicit_fields() {
        let input = UpdateEmail {
            email_id: EmailId::new("e1").unwrap(),
            changes: EmailChanges {
                folders: Some(vec!["INBOX".to_owned()]),
                unread: Some(true),
            },
        };
        let options = RequestOptions::with_extra_params(
            ExtraParams::new()
                .with("unread", "false")
                .with("label", "x"),
        );
        let descriptor = EmailUpdate::by_id(&input, &options);
        assert_eq!(
            json_body(&descriptor),
            json!({ "folders": ["INBOX"], "unread": true, "label": "x" })
        );
    }

    #[test]
    fn update_by_provider_id_keeps_account_in_parameters() {
        let input = UpdateEmailByProviderId {
            email: provider_address(),
            changes: EmailChanges {
                folders: Some(vec!["Archive".to_owned()]),
                unread: None,
            },
        };
        let descriptor = EmailUpdate::by_provider_id(&input, &no_options());
        assert_eq!(descriptor.path_display(), "/emails/prov123");
        assert_eq!(
            descriptor.parameters.iter().collect::<Vec<_>>(),
            vec![("account_id", "acct1")]
        );
        assert_eq!(json_body(&descriptor), json!({ "folders": ["Archive"] }));
    }

    #[test]
    fn folder_by_provider_id_routes_to_folder_path() {
        let address = ProviderAddress::new(
            FolderProviderId::new("INBOX").unwrap(),
            AccountId::new("acct1").unwrap(),
        );
        let descriptor = FolderGetOne::by_provider_id(&address, &no_options());
        assert_eq!(descriptor.path_display(), "/folders/INBOX");
        assert_eq!(descriptor.parameters.get("account_id"), Some("acct1"));
    }

    #[test]
    fn attachment_paths_use_both_ids() {
        let by_id = EmailAttachmentGet::by_id(
            &EmailAttachment {
                email_id: EmailId::new("e1").unwrap(),
                attachment_id: AttachmentId::new("a1").unwrap(),
            },
            &no_options(),
        );
        assert_eq!(by_id.path_display(), "/emails/e1/attachments/a1");

        let by_provider = EmailAttachmentGet::by_provider_id(
            &EmailAttachmentByProviderId {
                email: provider_address(),
                attachment_id: AttachmentId::new("a1").unwrap(),
            },
            &no_options(),
        );
        assert_eq!(by_provider.path_display(), "/emails/prov123/attachments/a1");
        assert_eq!(by_provider.parameters.get("account_id"), Some("acct1"));
    }

    #[test]
    fn send_email_encodes_fields_then_attachments_then_passthrough() {
        let mut input = SendEmail::new(
            AccountId::new("acct1").unwrap(),
            vec![Recipient::named("Jane", "jane@example.com")],
            "<p>hi</p>",
        );
        input.subject = Some("Hello".to_owned());
        input.tracking_options = Some(TrackingOptions {
            opens: Some(true),
            ..Default::default()
        });
        input.attachments = vec![
            Attachment::new("a.png", vec![1u8]),
            Attachment::new("b.png", vec![2u8]),
        ];
        let options = RequestOptions::with_extra_params(
            ExtraParams::new()
                .with("subject", "spoofed")
                .with("signature", "sig"),
        );

        let descriptor = send_email(&input, &options).unwrap();
        assert_eq!(descriptor.method, Method::Post);
        assert_eq!(descriptor.path_display(), "/emails");
        let Body::Multipart(body) = &descriptor.body else {
            panic!("expected multipart body");
        };
        let parts = body.parts();

        assert_eq!(text_part(parts, "account_id"), Some("acct1"));
        assert_eq!(text_part(parts, "body"), Some("<p>hi</p>"));
        assert_eq!(text_part(parts, "subject"), Some("Hello"));
        assert_eq!(
            text_part(parts, "to"),
            Some(r#"[{"display_name":"Jane","identifier":"jane@example.com"}]"#)
        );
        assert_eq!(text_part(parts, "tracking_options"), Some(r#"{"opens":true}"#));
        assert_eq!(text_part(parts, "signature"), Some("sig"));
        assert!(!body.has("cc"));
        assert!(!body.has("draft_id"));
        assert_eq!(parts.iter().filter(|p| p.name == "subject").count(), 1);

        let files = parts
            .iter()
            .filter(|p| p.name == ATTACHMENTS_FIELD)
            .map(|p| match &p.value {
                PartValue::File { filename, .. } => filename.as_str(),
                PartValue::Text(_) => panic!("attachment encoded as text"),
            })
            .collect::<Vec<_>>();
        assert_eq!(files, vec!["a.png", "b.png"]);
        assert_eq!(parts.last().map(|p| p.name.as_str()), Some("signature"));
    }
}
