use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use phonenumber::country;

use crate::domain::validation::ValidationError;

/// Characters left untouched by URI component encoding (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`).
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value for use as a single URL path segment.
pub(crate) fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Nexmo API key.
///
/// Invariant: non-empty. The percent-encoded form is computed once at construction.
pub struct ApiKey {
    raw: String,
    encoded: String,
}

impl ApiKey {
    /// Query field name used by the SMS endpoint (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "key" });
        }
        let encoded = encode_uri_component(&raw);
        Ok(Self { raw, encoded })
    }

    /// Borrow the key as provided.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Percent-encoded key, as placed in URL paths.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Nexmo API secret.
///
/// Invariant: non-empty. The percent-encoded form is computed once at construction.
pub struct ApiSecret {
    raw: String,
    encoded: String,
}

impl ApiSecret {
    /// Query field name used by the SMS endpoint (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "secret" });
        }
        let encoded = encode_uri_component(&raw);
        Ok(Self { raw, encoded })
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Percent-encoded secret, as placed in URL paths.
    pub fn encoded(&self) -> &str {
        &self.encoded
    }
}

impl From<NewSecret> for ApiSecret {
    fn from(value: NewSecret) -> Self {
        let encoded = encode_uri_component(&value.0);
        Self {
            raw: value.0,
            encoded,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Replacement secret for `account/settings` (`newSecret`).
///
/// Invariant: non-empty, at most [`NewSecret::MAX_LEN`] characters.
pub struct NewSecret(String);

impl NewSecret {
    /// Query field name used by Nexmo (`newSecret`).
    pub const FIELD: &'static str = "newSecret";

    /// Longest secret accepted by the settings endpoint.
    pub const MAX_LEN: usize = 8;

    /// Create a validated [`NewSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let len = value.chars().count();
        if len > Self::MAX_LEN {
            return Err(ValidationError::SecretTooLong {
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Country code used by pricing and number routes (`country-code`), e.g. `US`.
///
/// Invariant: non-empty after trimming.
pub struct CountryCode(String);

impl CountryCode {
    /// Option name used by Nexmo (`country-code`).
    pub const FIELD: &'static str = "country-code";

    /// Create a validated [`CountryCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated country code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Mobile subscriber number handled by number-management routes (`msisdn`).
///
/// Invariant: non-empty after trimming.
pub struct Msisdn(String);

impl Msisdn {
    pub const FIELD: &'static str = "msisdn";

    /// Create a validated [`Msisdn`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Msisdn {
    /// Nexmo expects international numbers without the leading `+`.
    fn from(value: PhoneNumber) -> Self {
        Self(value.international_digits().to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender address (`from`): a phone number or an alphanumeric sender id.
///
/// Invariant: non-empty after trimming.
pub struct Sender(String);

impl Sender {
    /// Query field name used by Nexmo (`from`).
    pub const FIELD: &'static str = "from";

    /// Create a validated [`Sender`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient number as sent to Nexmo (`to`).
///
/// Invariant: non-empty after trimming. No normalization is applied; parse into
/// [`PhoneNumber`] first when E.164 normalization is wanted.
pub struct Recipient(String);

impl Recipient {
    /// Query field name used by Nexmo (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) recipient.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to Nexmo.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Recipient {
    fn from(value: PhoneNumber) -> Self {
        Self(value.international_digits().to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message body for text-like messages (`text`).
///
/// Invariant: non-empty. Whitespace is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query field name used by Nexmo (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// WAP push validity (`validity`), kept exactly as provided.
///
/// Invariant: a numeric literal. Decimal and exponent forms, `0x`/`0o`/`0b` integers and a
/// signed `Infinity` are accepted; `NaN` and other text is not.
pub struct Validity(String);

impl Validity {
    pub const FIELD: &'static str = "validity";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if is_numeric_literal(trimmed) {
            Ok(Self(value))
        } else {
            Err(ValidationError::InvalidValidity { input: value })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_numeric_literal(value: &str) -> bool {
    let prefixed = [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| value.strip_prefix(prefix).map(|digits| (digits, radix)));
    if let Some((digits, radix)) = prefixed {
        return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
    }

    let unsigned = value.strip_prefix(['+', '-']).unwrap_or(value);
    if unsigned == "Infinity" {
        return true;
    }
    // `f64::from_str` also takes `inf` and `nan`, which are not numeric literals here.
    unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        && value.parse::<f64>().is_ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Absolute URL registered for inbound (`moCallBackUrl`) or delivery receipt
/// (`drCallBackUrl`) callbacks.
pub struct CallbackUrl(String);

impl CallbackUrl {
    /// Create a callback URL, rejecting anything that is not an absolute URL.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "callback-url" });
        }
        match url::Url::parse(trimmed) {
            Ok(parsed) if !parsed.cannot_be_a_base() => Ok(Self(trimmed.to_owned())),
            _ => Err(ValidationError::InvalidCallbackUrl { input: value }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality is based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: Recipient::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164 })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation (with leading `+`).
    pub fn e164(&self) -> &str {
        &self.e164
    }

    fn international_digits(&self) -> &str {
        self.e164.strip_prefix('+').unwrap_or(&self.e164)
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Per-message status code returned by `sms/json`.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct MessageStatusCode(i32);

impl MessageStatusCode {
    /// Construct a status code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by Nexmo.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known status, if one exists.
    pub fn known(self) -> Option<KnownMessageStatus> {
        KnownMessageStatus::from_code(self.0)
    }

    /// `true` when the message was accepted for delivery.
    pub fn is_success(self) -> bool {
        self.known() == Some(KnownMessageStatus::Success)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known per-message statuses of the `sms/json` endpoint.
///
/// Used to interpret responses only; the client never branches on these.
pub enum KnownMessageStatus {
    Success,
    Throttled,
    MissingParams,
    InvalidParams,
    InvalidCredentials,
    InternalError,
    InvalidMessage,
    NumberBarred,
    PartnerAccountBarred,
    PartnerQuotaExceeded,
    TooManyExistingBinds,
    AccountNotEnabledForRest,
    MessageTooLong,
    InvalidSenderAddress,
    InvalidTtl,
}

impl KnownMessageStatus {
    /// Every known status, in code order.
    pub const ALL: [Self; 15] = [
        Self::Success,
        Self::Throttled,
        Self::MissingParams,
        Self::InvalidParams,
        Self::InvalidCredentials,
        Self::InternalError,
        Self::InvalidMessage,
        Self::NumberBarred,
        Self::PartnerAccountBarred,
        Self::PartnerQuotaExceeded,
        Self::TooManyExistingBinds,
        Self::AccountNotEnabledForRest,
        Self::MessageTooLong,
        Self::InvalidSenderAddress,
        Self::InvalidTtl,
    ];

    /// Convert a raw integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.code() == code)
    }

    /// Integer code as sent by Nexmo.
    pub fn code(self) -> i32 {
        self.entry().0
    }

    /// Short status label, e.g. `"Throttled"`.
    pub fn kind(self) -> &'static str {
        self.entry().1
    }

    /// Human-readable explanation of the status.
    pub fn description(self) -> &'static str {
        self.entry().2
    }

    fn entry(self) -> (i32, &'static str, &'static str) {
        match self {
            Self::Success => (
                0,
                "Success",
                "The message was successfully accepted for delivery by nexmo",
            ),
            Self::Throttled => (
                1,
                "Throttled",
                "You have exceeded the submission capacity allowed on this account, please back-off and retry",
            ),
            Self::MissingParams => (
                2,
                "Missing params",
                "Your request is incomplete and missing some mandatory parameters",
            ),
            Self::InvalidParams => (
                3,
                "Invalid params",
                "The value of one or more parameters is invalid",
            ),
            Self::InvalidCredentials => (
                4,
                "Invalid credentials",
                "The username / password you supplied is either invalid or disabled",
            ),
            Self::InternalError => (
                5,
                "Internal error",
                "An error has occurred in the nexmo platform whilst processing this message",
            ),
            Self::InvalidMessage => (
                6,
                "Invalid message",
                "The Nexmo platform was unable to process this message, for example, an un-recognized number prefix",
            ),
            Self::NumberBarred => (
                7,
                "Number barred",
                "The number you are trying to submit to is blacklisted and may not receive messages",
            ),
            Self::PartnerAccountBarred => (
                8,
                "Partner account barred",
                "The username you supplied is for an account that has been barred from submitting messages",
            ),
            Self::PartnerQuotaExceeded => (
                9,
                "Partner quota exceeded",
                "Your pre-pay account does not have sufficient credit to process this message",
            ),
            Self::TooManyExistingBinds => (
                10,
                "Too many existing binds",
                "The number of simultaneous connections to the platform exceeds the capabilities of your account",
            ),
            Self::AccountNotEnabledForRest => (
                11,
                "Account not enabled for REST",
                "This account is not provisioned for REST submission, you should use SMPP instead",
            ),
            Self::MessageTooLong => (
                12,
                "Message too long",
                "Applies to Binary submissions, where the length of the UDF and the message body combined exceed 140 octets",
            ),
            Self::InvalidSenderAddress => (
                15,
                "Invalid sender address",
                "The sender address (from parameter) was not allowed for this message",
            ),
            Self::InvalidTtl => (16, "Invalid TTL", "The ttl parameter values is invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_are_percent_encoded_once() {
        let key = ApiKey::new("my key/1").unwrap();
        assert_eq!(key.as_str(), "my key/1");
        assert_eq!(key.encoded(), "my%20key%2F1");

        let secret = ApiSecret::new("p@ss(word)!").unwrap();
        assert_eq!(secret.encoded(), "p%40ss(word)!");

        assert!(ApiKey::new("").is_err());
        assert!(ApiSecret::new("").is_err());
    }

    #[test]
    fn new_secret_length_is_enforced() {
        assert!(NewSecret::new("12345678").is_ok());
        assert_eq!(
            NewSecret::new("123456789").unwrap_err(),
            ValidationError::SecretTooLong { max: 8, actual: 9 }
        );
        assert!(NewSecret::new("").is_err());

        let secret: ApiSecret = NewSecret::new("a b").unwrap().into();
        assert_eq!(secret.as_str(), "a b");
        assert_eq!(secret.encoded(), "a%20b");
    }

    #[test]
    fn string_newtypes_trim_or_validate() {
        assert_eq!(CountryCode::new(" US ").unwrap().as_str(), "US");
        assert!(CountryCode::new("  ").is_err());

        assert_eq!(Msisdn::new(" 15551230000 ").unwrap().as_str(), "15551230000");
        assert!(Msisdn::new("").is_err());

        assert_eq!(Sender::new(" MyCompany20 ").unwrap().as_str(), "MyCompany20");
        assert_eq!(Recipient::new(" 15124978584 ").unwrap().as_str(), "15124978584");

        assert_eq!(MessageText::new(" hi ").unwrap().as_str(), " hi ");
        assert!(MessageText::new("").is_err());
    }

    #[test]
    fn validity_must_be_numeric() {
        assert_eq!(Validity::new("86400000").unwrap().as_str(), "86400000");
        assert!(Validity::new("1.5").is_ok());
        assert!(matches!(
            Validity::new("not-a-number"),
            Err(ValidationError::InvalidValidity { .. })
        ));
        assert!(matches!(
            Validity::new(""),
            Err(ValidationError::Empty { field: "validity" })
        ));
        assert!(Validity::new("NaN").is_err());
        assert!(Validity::new("inf").is_err());
        assert!(Validity::new("0x").is_err());
    }

    #[test]
    fn validity_accepts_hex_and_infinity_literals() {
        assert_eq!(Validity::new("0x10").unwrap().as_str(), "0x10");
        assert!(Validity::new("0b101").is_ok());
        assert!(Validity::new("Infinity").is_ok());
        assert!(Validity::new("-Infinity").is_ok());
        assert!(Validity::new("1e3").is_ok());
        assert!(Validity::new(".5").is_ok());
        assert!(Validity::new("0x1g").is_err());
    }

    #[test]
    fn callback_url_requires_absolute_url() {
        assert!(CallbackUrl::new("https://example.com/mo").is_ok());
        assert!(matches!(
            CallbackUrl::new("/relative"),
            Err(ValidationError::InvalidCallbackUrl { .. })
        ));
    }

    #[test]
    fn phone_number_converts_to_digits_only() {
        let phone = PhoneNumber::parse(None, "+1 512 497 8584").unwrap();
        assert_eq!(phone.e164(), "+15124978584");
        assert_eq!(phone, PhoneNumber::parse(None, "+15124978584").unwrap());

        let recipient: Recipient = phone.clone().into();
        assert_eq!(recipient.as_str(), "15124978584");
        let msisdn: Msisdn = phone.into();
        assert_eq!(msisdn.as_str(), "15124978584");

        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn message_status_table_covers_known_codes() {
        let codes: Vec<i32> = KnownMessageStatus::ALL
            .iter()
            .map(|status| status.code())
            .collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 15, 16]);

        let throttled = MessageStatusCode::new(1);
        assert_eq!(throttled.known(), Some(KnownMessageStatus::Throttled));
        assert_eq!(throttled.known().unwrap().kind(), "Throttled");
        assert!(!throttled.is_success());

        assert!(MessageStatusCode::new(0).is_success());
        assert_eq!(
            KnownMessageStatus::InvalidTtl.description(),
            "The ttl parameter values is invalid"
        );
        assert_eq!(MessageStatusCode::new(13).known(), None);
    }
}
