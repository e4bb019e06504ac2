use std::io;

use nexmo::{
    Config, CountryCode, MessageText, NexmoClient, Recipient, SearchNumbers, SendSms, Sender,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = NexmoClient::from_config(Config::from_env())?;

    let balance = client.get_balance().await?;
    println!("balance: {balance}");

    let us = CountryCode::new("US")?;
    let pricing = client.get_pricing(&us).await?;
    println!("pricing: {pricing}");

    let numbers = client.get_numbers().await?;
    println!("numbers: {numbers}");

    let available = client
        .search_numbers(SearchNumbers::new(us).with_pattern("11"))
        .await?;
    println!("available: {available}");

    let Ok(to) = std::env::var("NEXMO_TO") else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "NEXMO_TO environment variable is required",
        )
        .into());
    };
    let request = SendSms::text(
        Sender::new("MyCompany20")?,
        Recipient::new(to)?,
        MessageText::new("test!")?,
    );
    let response = client.send(request).await?;
    println!("sent: {}", response.raw());
    let messages = response.report().map(|it| it.messages.as_slice()).unwrap_or_default();
    for message in messages {
        let kind = message.status.known().map(|it| it.kind());
        println!(
            "message {:?}: status {} ({kind:?})",
            message.message_id,
            message.status.as_i32()
        );
    }

    Ok(())
}
