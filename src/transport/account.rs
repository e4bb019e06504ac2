use crate::domain::{ApiKey, ApiSecret, CountryCode, NewSecret, UpdateSettings, encode_uri_component};

use super::encode_query;

pub fn get_balance_url(base: &str, key: &ApiKey, secret: &ApiSecret) -> String {
    format!(
        "{base}/account/get-balance/{}/{}",
        key.encoded(),
        secret.encoded()
    )
}

pub fn get_pricing_url(
    base: &str,
    key: &ApiKey,
    secret: &ApiSecret,
    country_code: &CountryCode,
) -> String {
    format!(
        "{base}/account/get-pricing/outbound/{}/{}/{}",
        key.encoded(),
        secret.encoded(),
        encode_uri_component(country_code.as_str())
    )
}

pub fn get_numbers_url(base: &str, key: &ApiKey, secret: &ApiSecret) -> String {
    format!(
        "{base}/account/numbers/{}/{}",
        key.encoded(),
        secret.encoded()
    )
}

pub fn encode_update_settings_query(request: &UpdateSettings) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    if let Some(new_secret) = request.new_secret.as_ref() {
        params.push((NewSecret::FIELD.to_owned(), new_secret.as_str().to_owned()));
    }
    if let Some(url) = request.mo_callback_url.as_ref() {
        params.push(("moCallBackUrl".to_owned(), url.as_str().to_owned()));
    }
    if let Some(url) = request.dr_callback_url.as_ref() {
        params.push(("drCallBackUrl".to_owned(), url.as_str().to_owned()));
    }
    params
}

/// The query separator is always present, even when no setting is changed.
pub fn update_settings_url(
    base: &str,
    key: &ApiKey,
    secret: &ApiSecret,
    request: &UpdateSettings,
) -> String {
    format!(
        "{base}/account/settings/{}/{}?{}",
        key.encoded(),
        secret.encoded(),
        encode_query(&encode_update_settings_query(request))
    )
}

#[cfg(test)]
mod tests {
    use crate::domain::CallbackUrl;

    use super::*;

    const BASE: &str = "https://rest.example.invalid";

    fn credentials() -> (ApiKey, ApiSecret) {
        (ApiKey::new("key").unwrap(), ApiSecret::new("s/cret").unwrap())
    }

    #[test]
    fn account_urls_embed_encoded_credentials() {
        let (key, secret) = credentials();
        assert_eq!(
            get_balance_url(BASE, &key, &secret),
            "https://rest.example.invalid/account/get-balance/key/s%2Fcret"
        );
        assert_eq!(
            get_numbers_url(BASE, &key, &secret),
            "https://rest.example.invalid/account/numbers/key/s%2Fcret"
        );
        assert_eq!(
            get_pricing_url(BASE, &key, &secret, &CountryCode::new("US").unwrap()),
            "https://rest.example.invalid/account/get-pricing/outbound/key/s%2Fcret/US"
        );
    }

    #[test]
    fn settings_query_only_includes_present_fields() {
        let request = UpdateSettings {
            new_secret: Some(NewSecret::new("n3w").unwrap()),
            mo_callback_url: None,
            dr_callback_url: Some(CallbackUrl::new("https://example.com/dr?a=1").unwrap()),
        };
        assert_eq!(
            encode_update_settings_query(&request),
            vec![
                ("newSecret".to_owned(), "n3w".to_owned()),
                (
                    "drCallBackUrl".to_owned(),
                    "https://example.com/dr?a=1".to_owned()
                ),
            ]
        );

        let (key, secret) = credentials();
        assert_eq!(
            update_settings_url(BASE, &key, &secret, &request),
            "https://rest.example.invalid/account/settings/key/s%2Fcret?newSecret=n3w&drCallBackUrl=https%3A%2F%2Fexample.com%2Fdr%3Fa%3D1"
        );
    }

    #[test]
    fn settings_url_keeps_separator_without_params() {
        let (key, secret) = credentials();
        assert_eq!(
            update_settings_url(BASE, &key, &secret, &UpdateSettings::default()),
            "https://rest.example.invalid/account/settings/key/s%2Fcret?"
        );
    }
}
