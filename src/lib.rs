//! Typed Rust client for the Nexmo SMS and number management REST API.
//!
//! The crate is split into a domain layer of validated types, a transport layer for URL
//! and wire-format details, and a small client layer issuing one request per operation.
//! Invalid arguments are rejected by the domain constructors, so nothing is sent until a
//! request value exists.
//!
//! ```rust,no_run
//! use nexmo::{Credentials, MessageText, NexmoClient, Recipient, SendSms, Sender};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), nexmo::NexmoError> {
//!     let client = NexmoClient::new(Credentials::new("key", "secret")?);
//!     let request = SendSms::text(
//!         Sender::new("MyCompany20")?,
//!         Recipient::new("15124978584")?,
//!         MessageText::new("hello")?,
//!     );
//!     let response = client.send(request).await?;
//!     println!("accepted: {}", response.all_accepted());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{CancelRoute, Config, Credentials, NexmoClient, NexmoClientBuilder, NexmoError};
pub use domain::{
    BinaryItem, CallbackUrl, CountryCode, KnownMessageStatus, MessageRequest, MessageResult,
    MessageStatusCode, MessageText, MessageType, Msisdn, NewSecret, NumberRequest, PhoneNumber,
    Recipient, SearchNumbers, SendOptions, SendSms, SendSmsReport, SendSmsResponse, Sender,
    UpdateSettings, ValidationError, Validity,
};
