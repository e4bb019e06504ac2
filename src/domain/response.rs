use serde_json::Value;

use crate::domain::value::MessageStatusCode;

#[derive(Debug, Clone, PartialEq)]
/// Decoded `sms/json` body.
///
/// The JSON value is always present, exactly as every other operation returns it. The typed
/// [`SendSmsReport`] is an interpretation on top of it and is `None` when the body does not
/// follow the documented `sms/json` shape.
pub struct SendSmsResponse {
    raw: Value,
    report: Option<SendSmsReport>,
}

impl SendSmsResponse {
    pub(crate) fn new(raw: Value, report: Option<SendSmsReport>) -> Self {
        Self { raw, report }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }

    pub fn report(&self) -> Option<&SendSmsReport> {
        self.report.as_ref()
    }

    /// `true` when the body could be interpreted and every message part was accepted.
    pub fn all_accepted(&self) -> bool {
        self.report.as_ref().is_some_and(SendSmsReport::all_accepted)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendSmsReport {
    pub message_count: Option<u32>,
    pub messages: Vec<MessageResult>,
}

impl SendSmsReport {
    /// `true` when every message part was accepted (status `0`).
    pub fn all_accepted(&self) -> bool {
        !self.messages.is_empty() && self.messages.iter().all(|it| it.status.is_success())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageResult {
    pub status: MessageStatusCode,
    pub message_id: Option<String>,
    pub to: Option<String>,
    pub client_ref: Option<String>,
    pub remaining_balance: Option<String>,
    pub message_price: Option<String>,
    pub network: Option<String>,
    pub error_text: Option<String>,
}
