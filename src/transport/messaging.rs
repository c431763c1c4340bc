//! Request construction for the chat, message and attendee endpoints.

use serde_json::{Map, Value};

use crate::domain::{
    AccountId, AccountType, AttendeeId, ChatId, ListAttendeeChats, ListAttendeeMessages,
    ListAttendees, ListChatMessages, ListChats, ListMessages, MessageAttachment, MessageId,
    RequestOptions, SendChatMessage, StartChat, UpdateChatStatus,
};
use crate::transport::descriptor::{Method, RequestDescriptor};
use crate::transport::params::QueryParams;
use crate::transport::payload::{MultipartBody, merge_json_body};
use crate::transport::validator::{BlobValidator, MessageValidator, Permissive};

const CHATS: &str = "chats";
const MESSAGES: &str = "messages";
const ATTENDEES: &str = "attendees";
const CHAT_ATTENDEES: &str = "chat_attendees";
const ATTACHMENTS: &str = "attachments";

fn extra(options: &RequestOptions) -> QueryParams {
    QueryParams::from_extra(&options.extra_params)
}

pub fn list_chats(input: &ListChats, options: &RequestOptions) -> RequestDescriptor<Permissive> {
    let mut params = extra(options);
    params.set_text("before", input.before.as_deref());
    params.set_text("after", input.after.as_deref());
    params.set_count("limit", input.limit);
    params.set_text(
        AccountType::FIELD,
        input.account_type.map(AccountType::as_str),
    );
    params.set_account(input.account_id.as_ref());
    params.set_text("cursor", input.cursor.as_deref());
    params.set_flag("only_unreads", input.only_unreads);

    RequestDescriptor::new(Method::Get, [CHATS], Permissive).with_parameters(params)
}

pub fn get_chat(chat_id: &ChatId, options: &RequestOptions) -> RequestDescriptor<Permissive> {
    RequestDescriptor::new(Method::Get, [CHATS, chat_id.as_str()], Permissive)
        .with_parameters(extra(options))
}

pub fn list_chat_messages(
    input: &ListChatMessages,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    let mut params = extra(options);
    params.set_text("sender_id", input.sender_id.as_deref());
    params.set_text("before", input.before.as_deref());
    params.set_text("after", input.after.as_deref());
    params.set_count("limit", input.limit);
    params.set_text("cursor", input.cursor.as_deref());

    RequestDescriptor::new(
        Method::Get,
        [CHATS, input.chat_id.as_str(), MESSAGES],
        Permissive,
    )
    .with_parameters(params)
}

pub fn send_chat_message(
    input: &SendChatMessage,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    let mut body = MultipartBody::new();
    body.text("text", input.text.as_str());
    body.optional_text("thread_id", input.thread_id.as_deref());
    body.attachments(&input.attachments);
    body.merge_extra(&options.extra_params);

    RequestDescriptor::new(
        Method::Post,
        [CHATS, input.chat_id.as_str(), MESSAGES],
        Permissive,
    )
    .with_multipart_body(body)
}

pub fn start_chat(
    input: &StartChat,
    options: &RequestOptions,
) -> Result<RequestDescriptor<Permissive>, serde_json::Error> {
    let chat_options = input.options();
    let mut body = MultipartBody::new();
    body.text(AccountId::FIELD, input.account_id().as_str());
    body.text("text", input.text());
    for attendee in input.attendees_ids() {
        body.text(StartChat::ATTENDEES_FIELD, attendee.as_str());
    }
    body.optional_text("subject", chat_options.subject.as_deref());
    body.optional_json("linkedin", chat_options.linkedin.as_ref())?;
    body.attachments(&chat_options.attachments);
    body.merge_extra(&options.extra_params);

    Ok(RequestDescriptor::new(Method::Post, [CHATS], Permissive).with_multipart_body(body))
}

pub fn list_chat_attendees(
    chat_id: &ChatId,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    RequestDescriptor::new(
        Method::Get,
        [CHATS, chat_id.as_str(), ATTENDEES],
        Permissive,
    )
    .with_parameters(extra(options))
}

pub fn get_message(
    message_id: &MessageId,
    options: &RequestOptions,
) -> RequestDescriptor<MessageValidator> {
    RequestDescriptor::new(
        Method::Get,
        [MESSAGES, message_id.as_str()],
        MessageValidator::new(),
    )
    .with_parameters(extra(options))
}

pub fn list_messages(
    input: &ListMessages,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    let mut params = extra(options);
    params.set_text("before", input.before.as_deref());
    params.set_text("after", input.after.as_deref());
    params.set_count("limit", input.limit);
    params.set_text("sender_id", input.sender_id.as_deref());
    params.set_account(input.account_id.as_ref());
    params.set_text("cursor", input.cursor.as_deref());

    RequestDescriptor::new(Method::Get, [MESSAGES], Permissive).with_parameters(params)
}

pub fn list_attendee_messages(
    input: &ListAttendeeMessages,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    let mut params = extra(options);
    params.set_text("cursor", input.cursor.as_deref());
    params.set_text("before", input.before.as_deref());
    params.set_text("after", input.after.as_deref());
    params.set_count("limit", input.limit);

    RequestDescriptor::new(
        Method::Get,
        [CHAT_ATTENDEES, input.attendee_id.as_str(), MESSAGES],
        Permissive,
    )
    .with_parameters(params)
}

pub fn list_attendee_chats(
    input: &ListAttendeeChats,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    let mut params = extra(options);
    params.set_text("cursor", input.cursor.as_deref());
    params.set_text("before", input.before.as_deref());
    params.set_text("after", input.after.as_deref());
    params.set_count("limit", input.limit);
    params.set_account(input.account_id.as_ref());

    RequestDescriptor::new(
        Method::Get,
        [CHAT_ATTENDEES, input.attendee_id.as_str(), CHATS],
        Permissive,
    )
    .with_parameters(params)
}

pub fn get_message_attachment(
    input: &MessageAttachment,
    options: &RequestOptions,
) -> RequestDescriptor<BlobValidator> {
    RequestDescriptor::new(
        Method::Get,
        [
            MESSAGES,
            input.message_id.as_str(),
            ATTACHMENTS,
            input.attachment_id.as_str(),
        ],
        BlobValidator,
    )
    .with_parameters(extra(options))
}

pub fn list_attendees(
    input: &ListAttendees,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    let mut params = extra(options);
    params.set_text("cursor", input.cursor.as_deref());
    params.set_count("limit", input.limit);
    params.set_account(input.account_id.as_ref());

    RequestDescriptor::new(Method::Get, [CHAT_ATTENDEES], Permissive).with_parameters(params)
}

pub fn get_attendee(
    attendee_id: &AttendeeId,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    RequestDescriptor::new(
        Method::Get,
        [CHAT_ATTENDEES, attendee_id.as_str()],
        Permissive,
    )
    .with_parameters(extra(options))
}

pub fn update_chat_status(
    input: &UpdateChatStatus,
    options: &RequestOptions,
) -> RequestDescriptor<Permissive> {
    let mut explicit = Map::new();
    explicit.insert(
        "action".to_owned(),
        Value::String(input.action.name().to_owned()),
    );
    explicit.insert("value".to_owned(), Value::Bool(input.action.value()));

    RequestDescriptor::new(Method::Patch, [CHATS, input.chat_id.as_str()], Permissive)
        .with_json_body(merge_json_body(&options.extra_params, explicit))
}
