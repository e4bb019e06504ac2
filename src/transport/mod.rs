//! Transport layer: URL construction and wire-format details (serialization/deserialization).

mod account;
mod number;
mod send_sms;
mod token;

pub use account::{get_balance_url, get_numbers_url, get_pricing_url, update_settings_url};
pub use number::{buy_number_url, cancel_number_url, search_numbers_url};
pub use send_sms::{decode_send_sms_json_response, send_sms_url};

/// Serialize query parameters with `application/x-www-form-urlencoded` rules.
///
/// Repeated keys are emitted in order, which is how sequence values are sent.
fn encode_query(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_query_escapes_reserved_characters() {
        let params = vec![
            ("text".to_owned(), "a b&c=d".to_owned()),
            ("body".to_owned(), "48".to_owned()),
            ("body".to_owned(), "69".to_owned()),
        ];
        assert_eq!(encode_query(&params), "text=a+b%26c%3Dd&body=48&body=69");
        assert_eq!(encode_query(&[]), "");
    }
}
