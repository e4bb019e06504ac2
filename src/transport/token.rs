use serde::Deserialize;
use serde::de::Error as DeError;

/// Scalar returned by Nexmo as either a JSON string or a JSON number.
///
/// For numbers, the raw JSON token is preserved to avoid formatting drift
/// (`0.03330000` remains `"0.03330000"` instead of becoming `"0.0333"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportToken(String);

impl TransportToken {
    pub fn into_string(self) -> String {
        self.0
    }

    pub fn parse_i32(&self) -> Option<i32> {
        self.0.trim().parse().ok()
    }

    pub fn parse_u32(&self) -> Option<u32> {
        self.0.trim().parse().ok()
    }
}

impl<'de> Deserialize<'de> for TransportToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self(token.to_owned())),
            _ => Err(D::Error::custom("expected JSON string or number")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        value: TransportToken,
    }

    #[test]
    fn keeps_numeric_token_verbatim() {
        let parsed: Wrapper = serde_json::from_str(r#"{"value": 0.03330000}"#).unwrap();
        assert_eq!(parsed.value.into_string(), "0.03330000");
    }

    #[test]
    fn unwraps_string_and_parses_integers() {
        let parsed: Wrapper = serde_json::from_str(r#"{"value": " 15 "}"#).unwrap();
        assert_eq!(parsed.value.parse_i32(), Some(15));
        assert_eq!(parsed.value.parse_u32(), Some(15));
    }

    #[test]
    fn rejects_non_scalar_values() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value": [1]}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value": true}"#).is_err());
    }
}
