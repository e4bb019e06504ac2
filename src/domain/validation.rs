use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    SecretTooLong { max: usize, actual: usize },
    InvalidMessageType { value: String },
    InvalidValidity { input: String },
    InvalidBinaryItem { field: &'static str, index: usize },
    InvalidCallbackUrl { input: String },
    InvalidPhoneNumber { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::SecretTooLong { max, actual } => {
                write!(f, "new secret too long: {actual} characters (max {max})")
            }
            Self::InvalidMessageType { value } => write!(f, "invalid message type: {value}"),
            Self::InvalidValidity { input } => {
                write!(f, "validity must be a number: {input}")
            }
            Self::InvalidBinaryItem { field, index } => {
                write!(f, "{field}[{index}] is not a valid octet")
            }
            Self::InvalidCallbackUrl { input } => write!(f, "invalid callback url: {input}"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "to" };
        assert_eq!(err.to_string(), "to must not be empty");

        let err = ValidationError::SecretTooLong { max: 8, actual: 9 };
        assert_eq!(err.to_string(), "new secret too long: 9 characters (max 8)");

        let err = ValidationError::InvalidMessageType {
            value: "bogus".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid message type: bogus");

        let err = ValidationError::InvalidValidity {
            input: "soon".to_owned(),
        };
        assert_eq!(err.to_string(), "validity must be a number: soon");

        let err = ValidationError::InvalidBinaryItem {
            field: "udh",
            index: 2,
        };
        assert_eq!(err.to_string(), "udh[2] is not a valid octet");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");
    }
}
