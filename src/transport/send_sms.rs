use serde::Deserialize;

use super::encode_query;
use super::token::TransportToken;
use crate::domain::{
    ApiKey, ApiSecret, MessageContent, MessageResult, MessageStatusCode, MessageText,
    MessageType, Recipient, SendOptions, SendSms, SendSmsReport, Sender, Validity,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message status is not an integer: {value}")]
    InvalidStatus { value: String },
}

#[derive(Debug, Clone, Deserialize)]
struct SendSmsJsonResponse {
    #[serde(rename = "message-count", default)]
    message_count: Option<TransportToken>,
    #[serde(default)]
    messages: Vec<MessageJsonResult>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct MessageJsonResult {
    status: TransportToken,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    to: Option<String>,
    #[serde(default)]
    client_ref: Option<String>,
    #[serde(default)]
    remaining_balance: Option<TransportToken>,
    #[serde(default)]
    message_price: Option<TransportToken>,
    #[serde(default)]
    network: Option<String>,
    #[serde(default)]
    error_text: Option<String>,
}

pub fn encode_send_sms_query(
    key: &ApiKey,
    secret: &ApiSecret,
    request: &SendSms,
) -> Vec<(String, String)> {
    let mut params = vec![
        (ApiKey::FIELD.to_owned(), key.as_str().to_owned()),
        (ApiSecret::FIELD.to_owned(), secret.as_str().to_owned()),
        (
            Sender::FIELD.to_owned(),
            request.sender().as_str().to_owned(),
        ),
        (
            Recipient::FIELD.to_owned(),
            request.recipient().as_str().to_owned(),
        ),
    ];
    if let Some(message_type) = request.message_type() {
        params.push((MessageType::FIELD.to_owned(), message_type.as_str().to_owned()));
    }
    push_options(&mut params, request.options());

    match request.content() {
        MessageContent::Text(text) => {
            params.push((MessageText::FIELD.to_owned(), text.as_str().to_owned()));
        }
        MessageContent::Binary { body, udh } => {
            for octet in body.octets() {
                params.push(("body".to_owned(), octet.clone()));
            }
            for octet in udh.octets() {
                params.push(("udh".to_owned(), octet.clone()));
            }
        }
        MessageContent::WapPush {
            title,
            url,
            validity,
        } => {
            params.push(("title".to_owned(), title.clone()));
            params.push(("url".to_owned(), url.clone()));
            params.push((Validity::FIELD.to_owned(), validity.as_str().to_owned()));
        }
        MessageContent::Passthrough => {}
    }

    params
}

fn push_options(params: &mut Vec<(String, String)>, options: &SendOptions) {
    let fields = [
        ("status-report-req", &options.status_report_req),
        ("client-ref", &options.client_ref),
        ("network-code", &options.network_code),
        ("vcard", &options.vcard),
        ("vcal", &options.vcal),
        ("ttl", &options.ttl),
    ];
    for (name, value) in fields {
        if let Some(value) = value.as_ref().filter(|value| !value.is_empty()) {
            params.push((name.to_owned(), value.clone()));
        }
    }
}

pub fn send_sms_url(base: &str, key: &ApiKey, secret: &ApiSecret, request: &SendSms) -> String {
    format!(
        "{base}/sms/json?{}",
        encode_query(&encode_send_sms_query(key, secret, request))
    )
}

/// Interpret an `sms/json` body as a typed report.
///
/// Takes the body text rather than a decoded value so numeric tokens keep their formatting.
pub fn decode_send_sms_json_response(json: &str) -> Result<SendSmsReport, TransportError> {
    let parsed: SendSmsJsonResponse = serde_json::from_str(json)?;

    let messages = parsed
        .messages
        .into_iter()
        .map(|message| {
            let status = message
                .status
                .parse_i32()
                .ok_or_else(|| TransportError::InvalidStatus {
                    value: message.status.clone().into_string(),
                })?;
            Ok(MessageResult {
                status: MessageStatusCode::new(status),
                message_id: message.message_id,
                to: message.to,
                client_ref: message.client_ref,
                remaining_balance: message.remaining_balance.map(TransportToken::into_string),
                message_price: message.message_price.map(TransportToken::into_string),
                network: message.network,
                error_text: message.error_text,
            })
        })
        .collect::<Result<Vec<MessageResult>, TransportError>>()?;

    Ok(SendSmsReport {
        message_count: parsed.message_count.and_then(|count| count.parse_u32()),
        messages,
    })
}

#[cfg(test)]
mod tests {
    use crate::domain::{BinaryItem, KnownMessageStatus, MessageRequest};

    use super::*;

    fn credentials() -> (ApiKey, ApiSecret) {
        (ApiKey::new("key").unwrap(), ApiSecret::new("sec ret").unwrap())
    }

    fn base_request() -> MessageRequest {
        MessageRequest {
            from: Some("MyCompany20".to_owned()),
            to: Some("15124978584".to_owned()),
            ..Default::default()
        }
    }

    fn pairs(params: &[(&str, &str)]) -> Vec<(String, String)> {
        params
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn encode_text_message_with_passthrough_options() {
        let (key, secret) = credentials();
        let request = MessageRequest {
            message_type: Some("unicode".to_owned()),
            text: Some("test!".to_owned()),
            options: SendOptions {
                client_ref: Some("order-7".to_owned()),
                status_report_req: Some("1".to_owned()),
                ttl: Some("60000".to_owned()),
                ..Default::default()
            },
            ..base_request()
        }
        .validate()
        .unwrap();

        assert_eq!(
            encode_send_sms_query(&key, &secret, &request),
            pairs(&[
                ("username", "key"),
                ("password", "sec ret"),
                ("from", "MyCompany20"),
                ("to", "15124978584"),
                ("type", "unicode"),
                ("status-report-req", "1"),
                ("client-ref", "order-7"),
                ("ttl", "60000"),
                ("text", "test!"),
            ])
        );
    }

    #[test]
    fn encode_binary_repeats_octet_keys() {
        let (key, secret) = credentials();
        let request = MessageRequest {
            message_type: Some("binary".to_owned()),
            body: Some(vec![BinaryItem::from(72u8), BinaryItem::from(105u8)]),
            udh: Some(vec![BinaryItem::from(0u8)]),
            ..base_request()
        }
        .validate()
        .unwrap();

        let url = send_sms_url("http://rest.example.invalid", &key, &secret, &request);
        assert_eq!(
            url,
            "http://rest.example.invalid/sms/json?username=key&password=sec+ret&from=MyCompany20&to=15124978584&type=binary&body=48&body=69&udh=00"
        );
    }

    #[test]
    fn encode_wap_push_fields() {
        let (key, secret) = credentials();
        let request = MessageRequest {
            message_type: Some("wappush".to_owned()),
            title: Some("News".to_owned()),
            url: Some("https://example.com".to_owned()),
            validity: Some("86400000".to_owned()),
            text: Some("ignored".to_owned()),
            ..base_request()
        }
        .validate()
        .unwrap();

        let params = encode_send_sms_query(&key, &secret, &request);
        assert_eq!(
            &params[5..],
            pairs(&[
                ("title", "News"),
                ("url", "https://example.com"),
                ("validity", "86400000"),
            ])
            .as_slice()
        );
        assert!(!params.iter().any(|(k, _)| k == "text"));
    }

    #[test]
    fn decode_json_response_maps_messages() {
        let json = r#"
        {
          "message-count": "1",
          "messages": [
            {
              "to": "15124978584",
              "message-id": "0A0000000123ABCD1",
              "status": "0",
              "remaining-balance": "3.14159265",
              "message-price": 0.03330000,
              "network": "12345"
            }
          ]
        }
        "#;

        let resp = decode_send_sms_json_response(json).unwrap();
        assert_eq!(resp.message_count, Some(1));
        assert!(resp.all_accepted());

        let message = &resp.messages[0];
        assert_eq!(message.status.known(), Some(KnownMessageStatus::Success));
        assert_eq!(message.message_id.as_deref(), Some("0A0000000123ABCD1"));
        assert_eq!(message.remaining_balance.as_deref(), Some("3.14159265"));
        assert_eq!(message.message_price.as_deref(), Some("0.03330000"));
    }

    #[test]
    fn decode_json_response_keeps_error_text() {
        let json = r#"
        {
          "message-count": 1,
          "messages": [{ "status": 4, "error-text": "Bad Credentials" }]
        }
        "#;

        let resp = decode_send_sms_json_response(json).unwrap();
        assert!(!resp.all_accepted());
        assert_eq!(
            resp.messages[0].status.known(),
            Some(KnownMessageStatus::InvalidCredentials)
        );
        assert_eq!(resp.messages[0].error_text.as_deref(), Some("Bad Credentials"));
    }

    #[test]
    fn decode_rejects_non_integer_status() {
        let json = r#"{ "messages": [{ "status": "ok" }] }"#;
        let err = decode_send_sms_json_response(json).unwrap_err();
        assert!(matches!(err, TransportError::InvalidStatus { .. }));
    }

    #[test]
    fn decode_rejects_off_schema_bodies() {
        for json in [
            r#"{ "messages": [{ "status": "0", "network": 12345 }] }"#,
            r#"{ "messages": [{ "to": "15124978584" }] }"#,
            "[1, 2, 3]",
        ] {
            assert!(matches!(
                decode_send_sms_json_response(json),
                Err(TransportError::Json(_))
            ));
        }
    }
}
