use std::io;

use unipile::{ChatAction, ChatId, RequestOptions, UnipileClientBuilder, UpdateChatStatus};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let chat_id = std::env::args().nth(1).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "usage: mark_chat_read <chat_id>")
    })?;

    let client = UnipileClientBuilder::from_env()?.build()?;
    let update = UpdateChatStatus {
        chat_id: ChatId::new(chat_id)?,
        action: ChatAction::SetReadStatus(true),
    };
    let response = client
        .messaging()
        .set_chat_status(&update, &RequestOptions::default())
        .await?;
    println!("{response}");

    Ok(())
}
