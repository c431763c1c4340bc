use std::io;

use tracing_subscriber::EnvFilter;
use unipile::{AccountId, ListEmails, RequestOptions, UnipileClientBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let account_id = std::env::var("UNIPILE_ACCOUNT_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "UNIPILE_ACCOUNT_ID environment variable is required",
        )
    })?;

    let client = UnipileClientBuilder::from_env()?.build()?;
    let input = ListEmails {
        account_id: Some(AccountId::new(account_id)?),
        limit: Some(10),
        ..Default::default()
    };

    let emails = client.email().list(&input, &RequestOptions::default()).await?;
    for mail in &emails.items {
        println!(
            "{} {} {:?}",
            mail.date,
            mail.id,
            mail.subject.as_deref().unwrap_or("")
        );
    }
    if let Some(cursor) = emails.cursor {
        println!("next cursor: {cursor}");
    }

    Ok(())
}
