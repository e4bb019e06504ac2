//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    BinaryItem, HexPayload, MessageContent, MessageRequest, MessageType, NumberRequest,
    SearchNumbers, SendOptions, SendSms, UpdateSettings,
};
pub use response::{MessageResult, SendSmsReport, SendSmsResponse};
pub use validation::ValidationError;
pub use value::{
    ApiKey, ApiSecret, CallbackUrl, CountryCode, KnownMessageStatus, MessageStatusCode,
    MessageText, Msisdn, NewSecret, PhoneNumber, Recipient, Sender, Validity,
};

pub(crate) use value::encode_uri_component;
