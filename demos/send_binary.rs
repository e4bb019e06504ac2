use std::io;

use nexmo::{BinaryItem, Config, MessageRequest, NexmoClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let to = std::env::var("NEXMO_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "NEXMO_TO environment variable is required",
        )
    })?;

    let client = NexmoClient::from_config(Config::from_env())?;
    let request = MessageRequest {
        from: Some("MyCompany20".to_owned()),
        to: Some(to),
        message_type: Some("binary".to_owned()),
        body: Some("Hi".chars().map(BinaryItem::from).collect()),
        udh: Some(vec![BinaryItem::from(0u8)]),
        ..Default::default()
    }
    .validate()?;

    let response = client.send(request).await?;
    println!("response: {}", response.raw());
    println!("all accepted: {}", response.all_accepted());

    Ok(())
}
