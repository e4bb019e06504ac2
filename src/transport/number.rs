use crate::domain::{ApiKey, ApiSecret, NumberRequest, SearchNumbers, encode_uri_component};

use super::encode_query;

pub fn encode_search_numbers_query(request: &SearchNumbers) -> Vec<(String, String)> {
    request
        .pattern()
        .map(|pattern| vec![("pattern".to_owned(), pattern.to_owned())])
        .unwrap_or_default()
}

pub fn search_numbers_url(
    base: &str,
    key: &ApiKey,
    secret: &ApiSecret,
    request: &SearchNumbers,
) -> String {
    format!(
        "{base}/number/search/{}/{}/{}?{}",
        key.encoded(),
        secret.encoded(),
        encode_uri_component(request.country_code().as_str()),
        encode_query(&encode_search_numbers_query(request))
    )
}

pub fn buy_number_url(
    base: &str,
    key: &ApiKey,
    secret: &ApiSecret,
    request: &NumberRequest,
) -> String {
    number_action_url(base, "buy", key, secret, request)
}

pub fn cancel_number_url(
    base: &str,
    key: &ApiKey,
    secret: &ApiSecret,
    request: &NumberRequest,
) -> String {
    number_action_url(base, "cancel", key, secret, request)
}

fn number_action_url(
    base: &str,
    action: &str,
    key: &ApiKey,
    secret: &ApiSecret,
    request: &NumberRequest,
) -> String {
    format!(
        "{base}/number/{action}/{}/{}/{}/{}",
        key.encoded(),
        secret.encoded(),
        encode_uri_component(request.country_code().as_str()),
        encode_uri_component(request.msisdn().as_str())
    )
}
