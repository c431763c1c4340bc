use std::io;

use tracing_subscriber::EnvFilter;
use unipile::{AccountId, Attachment, Recipient, RequestOptions, SendEmail, UnipileClientBuilder};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let account_id = AccountId::new(required("UNIPILE_ACCOUNT_ID")?)?;
    let to = required("UNIPILE_TO")?;

    let client = UnipileClientBuilder::from_env()?.build()?;
    let mut email = SendEmail::new(
        account_id,
        vec![Recipient::new(to)],
        "<p>Hello from unipile.</p>",
    );
    email.subject = Some("Hello".to_owned());
    if let Ok(path) = std::env::var("UNIPILE_ATTACHMENT") {
        let content = std::fs::read(&path)?;
        let filename = std::path::Path::new(&path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(path);
        email.attachments.push(Attachment::new(filename, content));
    }

    let sent = client.email().send(&email, &RequestOptions::default()).await?;
    println!("tracking_id: {:?}", sent.tracking_id);

    Ok(())
}
