use serde_json::Value;

use crate::client::{UnipileClient, UnipileError};
use crate::domain::{
    AttachmentBlob, AttendeeId, ChatId, ListAttendeeChats, ListAttendeeMessages,
    ListAttendees, ListChatMessages, ListChats, ListMessages, Message, MessageAttachment,
    MessageId, RequestOptions, SendChatMessage, StartChat, UpdateChatStatus,
};
use crate::transport::messaging;

/// Chat, message and attendee operations.
///
/// Obtained through [`UnipileClient::messaging`]. Most responses are returned as raw
/// JSON until their schema is pinned down.
#[derive(Clone, Copy)]
pub struct MessagingResource<'a> {
    client: &'a UnipileClient,
}

impl<'a> MessagingResource<'a> {
    pub(crate) fn new(client: &'a UnipileClient) -> Self {
        Self { client }
    }

    /// `GET /chats`
    pub async fn list_chats(
        &self,
        input: &ListChats,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client.send(messaging::list_chats(input, options)).await
    }

    /// `GET /chats/{id}`
    pub async fn get_chat(
        &self,
        chat_id: &ChatId,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client.send(messaging::get_chat(chat_id, options)).await
    }

    /// `GET /chats/{id}/messages`
    pub async fn list_chat_messages(
        &self,
        input: &ListChatMessages,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client
            .send(messaging::list_chat_messages(input, options))
            .await
    }

    /// Send a message in an existing chat (`POST /chats/{id}/messages`, multipart).
    pub async fn send_message(
        &self,
        input: &SendChatMessage,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client
            .send(messaging::send_chat_message(input, options))
            .await
    }

    /// Start a chat with one or more attendees (`POST /chats`, multipart).
    pub async fn start_chat(
        &self,
        input: &StartChat,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        let descriptor = messaging::start_chat(input, options).map_err(UnipileError::Encode)?;
        self.client.send(descriptor).await
    }

    /// `GET /chats/{id}/attendees`
    pub async fn list_chat_attendees(
        &self,
        chat_id: &ChatId,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client
            .send(messaging::list_chat_attendees(chat_id, options))
            .await
    }

    /// `GET /messages/{id}`
    pub async fn get_message(
        &self,
        message_id: &MessageId,
        options: &RequestOptions,
    ) -> Result<Message, UnipileError> {
        self.client
            .send(messaging::get_message(message_id, options))
            .await
    }

    /// `GET /messages`
    pub async fn list_messages(
        &self,
        input: &ListMessages,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client.send(messaging::list_messages(input, options)).await
    }

    /// `GET /chat_attendees/{id}/messages`
    pub async fn list_attendee_messages(
        &self,
        input: &ListAttendeeMessages,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client
            .send(messaging::list_attendee_messages(input, options))
            .await
    }

    /// `GET /chat_attendees/{id}/chats`
    pub async fn list_attendee_chats(
        &self,
        input: &ListAttendeeChats,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client
            .send(messaging::list_attendee_chats(input, options))
            .await
    }

    /// Download a message attachment.
    pub async fn get_message_attachment(
        &self,
        input: &MessageAttachment,
        options: &RequestOptions,
    ) -> Result<AttachmentBlob, UnipileError> {
        self.client
            .send(messaging::get_message_attachment(input, options))
            .await
    }

    /// `GET /chat_attendees`
    pub async fn list_attendees(
        &self,
        input: &ListAttendees,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client
            .send(messaging::list_attendees(input, options))
            .await
    }

    /// `GET /chat_attendees/{id}`
    pub async fn get_attendee(
        &self,
        attendee_id: &AttendeeId,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client
            .send(messaging::get_attendee(attendee_id, options))
            .await
    }

    /// Mark a chat read/unread, muted or archived (`PATCH /chats/{id}`).
    pub async fn set_chat_status(
        &self,
        input: &UpdateChatStatus,
        options: &RequestOptions,
    ) -> Result<Value, UnipileError> {
        self.client
            .send(messaging::update_chat_status(input, options))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::client::UnipileError;
    use crate::client::fake::{FakeTransport, make_client, multipart_summary};
    use crate::domain::{
        AccountId, AccountType, Attachment, AttachmentId, AttendeeId, ChatAction, ChatId,
        ListAttendeeChats, ListChats, ListMessages, MessageAttachment, MessageId, RequestOptions,
        SendChatMessage, StartChat, StartChatOptions, UpdateChatStatus,
    };
    use crate::transport::{Body, Method};

    fn pair(name: &str, value: &str) -> (String, String) {
        (name.to_owned(), value.to_owned())
    }

    #[tokio::test]
    async fn list_chats_returns_raw_payload() {
        let payload = json!({ "object": "ChatList", "items": [{ "id": "c1" }], "cursor": null });
        let transport = FakeTransport::json(200, payload.clone());
        let client = make_client(transport.clone());

        let input = ListChats {
            account_type: Some(AccountType::Linkedin),
            only_unreads: Some(true),
            ..Default::default()
        };
        let result = client
            .messaging()
            .list_chats(&input, &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(result, payload);
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/api/v1/chats?account_type=LINKEDIN&only_unreads=true"
        );
    }

    #[tokio::test]
    async fn get_chat_returns_partial_payload_unchanged() {
        let payload = json!({
            "object": "Chat",
            "id": "c1",
            "account_id": "acct1",
            "type": 0,
            "name": null
        });
        let transport = FakeTransport::json(200, payload.clone());
        let client = make_client(transport.clone());

        let chat = client
            .messaging()
            .get_chat(&ChatId::new("c1").unwrap(), &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(chat, payload);
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/api/v1/chats/c1"
        );
    }

    #[tokio::test]
    async fn get_message_parses_message() {
        let transport = FakeTransport::json(
            200,
            json!({
                "object": "Message",
                "id": "m1",
                "account_id": "acct1",
                "chat_id": "c1",
                "sender_id": "s1",
                "timestamp": "2024-01-01T00:00:00.000Z",
                "text": "hi",
                "is_sender": 0
            }),
        );
        let client = make_client(transport.clone());
        let message = client
            .messaging()
            .get_message(&MessageId::new("m1").unwrap(), &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(message.text.as_deref(), Some("hi"));
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/api/v1/messages/m1"
        );
    }

    #[tokio::test]
    async fn send_message_posts_multipart() {
        let transport = FakeTransport::json(
            200,
            json!({ "object": "MessageSent", "message_id": "m1" }),
        );
        let client = make_client(transport.clone());

        let mut input = SendChatMessage::new(ChatId::new("c1").unwrap(), "hello");
        input.thread_id = Some("t1".to_owned());
        input.attachments = vec![Attachment::new("a.png", vec![1u8])];
        client
            .messaging()
            .send_message(&input, &RequestOptions::default())
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url.as_str(),
            "https://example.invalid/api/v1/chats/c1/messages"
        );
        assert_eq!(
            multipart_summary(&request),
            vec![
                pair("text", "hello"),
                pair("thread_id", "t1"),
                pair("attachments", "file:a.png"),
            ]
        );
    }

    #[tokio::test]
    async fn start_chat_posts_attendees() {
        let transport =
            FakeTransport::json(200, json!({ "object": "ChatStarted", "chat_id": "c9" }));
        let client = make_client(transport.clone());

        let input = StartChat::new(
            AccountId::new("acct1").unwrap(),
            vec!["u1".to_owned()],
            "hi",
            StartChatOptions::default(),
        )
        .unwrap();
        let result = client
            .messaging()
            .start_chat(&input, &RequestOptions::default())
            .await
            .unwrap();
        assert_eq!(result["chat_id"], "c9");

        let request = transport.last_request();
        assert_eq!(request.url.as_str(), "https://example.invalid/api/v1/chats");
        assert_eq!(
            multipart_summary(&request),
            vec![
                pair("account_id", "acct1"),
                pair("text", "hi"),
                pair("attendees_ids", "u1"),
            ]
        );
    }

    #[tokio::test]
    async fn attendee_and_message_listings_hit_expected_paths() {
        let transport = FakeTransport::json(200, json!({ "items": [] }));
        let client = make_client(transport.clone());
        let messaging = client.messaging();
        let options = RequestOptions::default();
        let attendee = AttendeeId::new("att1").unwrap();

        let mut chats = ListAttendeeChats::new(attendee.clone());
        chats.account_id = Some(AccountId::new("acct1").unwrap());
        messaging.list_attendee_chats(&chats, &options).await.unwrap();
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/api/v1/chat_attendees/att1/chats?account_id=acct1"
        );

        messaging.get_attendee(&attendee, &options).await.unwrap();
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/api/v1/chat_attendees/att1"
        );

        messaging
            .list_chat_attendees(&ChatId::new("c1").unwrap(), &options)
            .await
            .unwrap();
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/api/v1/chats/c1/attendees"
        );

        let input = ListMessages {
            sender_id: Some("s1".to_owned()),
            cursor: Some(String::new()),
            ..Default::default()
        };
        messaging.list_messages(&input, &options).await.unwrap();
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/api/v1/messages?sender_id=s1"
        );
    }

    #[tokio::test]
    async fn message_attachment_is_binary() {
        let transport = FakeTransport::new(200, Some("image/png"), vec![0x89, 0x50]);
        let client = make_client(transport.clone());
        let blob = client
            .messaging()
            .get_message_attachment(
                &MessageAttachment {
                    message_id: MessageId::new("m1").unwrap(),
                    attachment_id: AttachmentId::new("a1").unwrap(),
                },
                &RequestOptions::default(),
            )
            .await
            .unwrap();
        assert_eq!(blob.bytes, vec![0x89, 0x50]);
        assert_eq!(
            transport.last_request().url.as_str(),
            "https://example.invalid/api/v1/messages/m1/attachments/a1"
        );
    }

    #[tokio::test]
    async fn set_chat_status_patches_json() {
        let transport = FakeTransport::json(200, json!({ "object": "ChatPatched" }));
        let client = make_client(transport.clone());

        let input = UpdateChatStatus {
            chat_id: ChatId::new("c1").unwrap(),
            action: ChatAction::SetMuteStatus(true),
        };
        client
            .messaging()
            .set_chat_status(&input, &RequestOptions::default())
            .await
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.url.as_str(), "https://example.invalid/api/v1/chats/c1");
        assert_eq!(
            request.body,
            Body::Json(
                json!({ "action": "setMuteStatus", "value": true })
                    .as_object()
                    .unwrap()
                    .clone()
            )
        );
    }
}
