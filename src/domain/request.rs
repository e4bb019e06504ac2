use std::fmt;
use std::str::FromStr;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    CallbackUrl, CountryCode, MessageText, Msisdn, NewSecret, Recipient, Sender, Validity,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message type accepted by `sms/json` (`type`).
pub enum MessageType {
    Binary,
    Default,
    Text,
    Unicode,
    VCal,
    VCard,
    WapPush,
}

impl MessageType {
    /// Query field name used by Nexmo (`type`).
    pub const FIELD: &'static str = "type";

    /// Wire value of this type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Default => "default",
            Self::Text => "text",
            Self::Unicode => "unicode",
            Self::VCal => "vcal",
            Self::VCard => "vcard",
            Self::WapPush => "wappush",
        }
    }
}

impl FromStr for MessageType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "binary" => Self::Binary,
            "default" => Self::Default,
            "text" => Self::Text,
            "unicode" => Self::Unicode,
            "vcal" => Self::VCal,
            "vcard" => Self::VCard,
            "wappush" => Self::WapPush,
            other => {
                return Err(ValidationError::InvalidMessageType {
                    value: other.to_owned(),
                });
            }
        })
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One element of a binary `body` or `udh` sequence.
///
/// Text elements contribute the code point of their first character; numeric elements
/// contribute their value.
pub enum BinaryItem {
    Text(String),
    Number(u32),
}

impl BinaryItem {
    fn code_point(&self) -> Option<u32> {
        match self {
            Self::Text(text) => text.chars().next().map(u32::from),
            Self::Number(value) => Some(*value),
        }
    }
}

impl From<u8> for BinaryItem {
    fn from(value: u8) -> Self {
        Self::Number(u32::from(value))
    }
}

impl From<u32> for BinaryItem {
    fn from(value: u32) -> Self {
        Self::Number(value)
    }
}

impl From<char> for BinaryItem {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<&str> for BinaryItem {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Binary payload as a sequence of lowercase hex octets (at least two digits each).
///
/// Invariant: non-empty.
pub struct HexPayload(Vec<String>);

impl HexPayload {
    /// Hex-encode every item of `items`, failing on an empty sequence or an empty text item.
    pub fn encode(field: &'static str, items: &[BinaryItem]) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        let octets = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                item.code_point()
                    .map(|code| format!("{code:02x}"))
                    .ok_or(ValidationError::InvalidBinaryItem { field, index })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self(octets))
    }

    pub fn octets(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Optional `sms/json` fields forwarded verbatim when present.
pub struct SendOptions {
    pub status_report_req: Option<String>,
    pub client_ref: Option<String>,
    pub network_code: Option<String>,
    pub vcard: Option<String>,
    pub vcal: Option<String>,
    pub ttl: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Type-specific content of an outbound message.
pub enum MessageContent {
    /// `default`, `text`, `unicode` or untyped messages.
    Text(MessageText),
    /// `binary` messages.
    Binary { body: HexPayload, udh: HexPayload },
    /// `wappush` messages.
    WapPush {
        title: String,
        url: String,
        validity: Validity,
    },
    /// `vcard` / `vcal` messages; the payload travels in [`SendOptions`].
    Passthrough,
}

#[derive(Debug, Clone, Default)]
/// Loosely typed `sms/json` options, validated into [`SendSms`] by [`MessageRequest::validate`].
pub struct MessageRequest {
    pub from: Option<String>,
    pub to: Option<String>,
    pub message_type: Option<String>,
    pub text: Option<String>,
    pub body: Option<Vec<BinaryItem>>,
    pub udh: Option<Vec<BinaryItem>>,
    pub title: Option<String>,
    pub url: Option<String>,
    pub validity: Option<String>,
    pub options: SendOptions,
}

impl MessageRequest {
    /// Resolve the message type and check the fields it requires.
    pub fn validate(self) -> Result<SendSms, ValidationError> {
        let from = Sender::new(self.from.unwrap_or_default())?;
        let to = Recipient::new(self.to.unwrap_or_default())?;
        let message_type = self
            .message_type
            .filter(|value| !value.is_empty())
            .map(|value| value.parse::<MessageType>())
            .transpose()?;

        let content = match message_type {
            Some(MessageType::Binary) => MessageContent::Binary {
                body: HexPayload::encode("body", &self.body.unwrap_or_default())?,
                udh: HexPayload::encode("udh", &self.udh.unwrap_or_default())?,
            },
            Some(MessageType::WapPush) => MessageContent::WapPush {
                title: required("title", self.title)?,
                url: required("url", self.url)?,
                validity: Validity::new(self.validity.unwrap_or_default())?,
            },
            Some(MessageType::VCal | MessageType::VCard) => MessageContent::Passthrough,
            None | Some(MessageType::Default | MessageType::Text | MessageType::Unicode) => {
                MessageContent::Text(MessageText::new(self.text.unwrap_or_default())?)
            }
        };

        Ok(SendSms {
            from,
            to,
            message_type,
            content,
            options: self.options,
        })
    }
}

impl TryFrom<MessageRequest> for SendSms {
    type Error = ValidationError;

    fn try_from(value: MessageRequest) -> Result<Self, Self::Error> {
        value.validate()
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::Empty { field })
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A validated `sms/json` request.
pub struct SendSms {
    from: Sender,
    to: Recipient,
    message_type: Option<MessageType>,
    content: MessageContent,
    options: SendOptions,
}

impl SendSms {
    /// Plain text message with no explicit `type`.
    pub fn text(from: Sender, to: Recipient, text: MessageText) -> Self {
        Self {
            from,
            to,
            message_type: None,
            content: MessageContent::Text(text),
            options: SendOptions::default(),
        }
    }

    /// Text message sent with `type=unicode`.
    pub fn unicode(from: Sender, to: Recipient, text: MessageText) -> Self {
        Self {
            message_type: Some(MessageType::Unicode),
            ..Self::text(from, to, text)
        }
    }

    /// Binary message; `body` and `udh` are hex-encoded here.
    pub fn binary(
        from: Sender,
        to: Recipient,
        body: &[BinaryItem],
        udh: &[BinaryItem],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            from,
            to,
            message_type: Some(MessageType::Binary),
            content: MessageContent::Binary {
                body: HexPayload::encode("body", body)?,
                udh: HexPayload::encode("udh", udh)?,
            },
            options: SendOptions::default(),
        })
    }

    /// WAP push message.
    pub fn wap_push(
        from: Sender,
        to: Recipient,
        title: impl Into<String>,
        url: impl Into<String>,
        validity: Validity,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            from,
            to,
            message_type: Some(MessageType::WapPush),
            content: MessageContent::WapPush {
                title: required("title", Some(title.into()))?,
                url: required("url", Some(url.into()))?,
                validity,
            },
            options: SendOptions::default(),
        })
    }

    /// Replace the passthrough options.
    pub fn with_options(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }

    pub fn sender(&self) -> &Sender {
        &self.from
    }

    pub fn recipient(&self) -> &Recipient {
        &self.to
    }

    pub fn message_type(&self) -> Option<MessageType> {
        self.message_type
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// `account/settings` update.
///
/// A bare [`NewSecret`] converts into a request that only rotates the secret.
pub struct UpdateSettings {
    pub new_secret: Option<NewSecret>,
    pub mo_callback_url: Option<CallbackUrl>,
    pub dr_callback_url: Option<CallbackUrl>,
}

impl From<NewSecret> for UpdateSettings {
    fn from(value: NewSecret) -> Self {
        Self {
            new_secret: Some(value),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// `number/search` request.
///
/// A bare [`CountryCode`] converts into a search without a pattern.
pub struct SearchNumbers {
    country_code: CountryCode,
    pattern: Option<String>,
}

impl SearchNumbers {
    pub fn new(country_code: CountryCode) -> Self {
        Self {
            country_code,
            pattern: None,
        }
    }

    /// Only return numbers containing `pattern`; an empty pattern is ignored.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.pattern = (!pattern.is_empty()).then_some(pattern);
        self
    }

    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}

impl From<CountryCode> for SearchNumbers {
    fn from(value: CountryCode) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Number addressed by `number/buy` and `number/cancel`.
pub struct NumberRequest {
    country_code: CountryCode,
    msisdn: Msisdn,
}

impl NumberRequest {
    pub fn new(country_code: CountryCode, msisdn: Msisdn) -> Self {
        Self {
            country_code,
            msisdn,
        }
    }

    pub fn country_code(&self) -> &CountryCode {
        &self.country_code
    }

    pub fn msisdn(&self) -> &Msisdn {
        &self.msisdn
    }
}
