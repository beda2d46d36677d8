//! Client errors

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Not logged in: an access token is required for this operation")]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Message to show the user, `None` when the error is not one we recognise
    pub fn notification(&self) -> Option<String> {
        match self {
            Self::Api { message, .. } => Some(message.clone()),
            Self::Transport(error) => Some(error.to_string()),
            Self::MissingToken => Some(self.to_string()),
            Self::Decode(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<ErrorMessage>,
}

/// Validation failures arrive as a list of messages
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// Pull the `message` field out of an error response body
pub(crate) fn api_error(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .map(|message| match message {
            ErrorMessage::One(message) => message,
            ErrorMessage::Many(messages) => messages.join(", "),
        })
        .filter(|message| !message.is_empty())
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty() && !text.starts_with('{')).then(|| text.to_string())
        })
        .unwrap_or_else(|| format!("Request failed with status {}", status));

    ClientError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(error: ClientError) -> String {
        match error {
            ClientError::Api { message, .. } => message,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_message_field_is_used() {
        let error = api_error(422, r#"{"statusCode":422,"message":"Slug already taken"}"#);
        assert_eq!(error.status(), Some(422));
        assert_eq!(message_of(error), "Slug already taken");
    }

    #[test]
    fn test_message_list_is_joined() {
        let error = api_error(
            400,
            r#"{"message":["firstName must be longer","slug should not be empty"]}"#,
        );
        assert_eq!(
            message_of(error),
            "firstName must be longer, slug should not be empty"
        );
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(message_of(api_error(502, "Bad Gateway")), "Bad Gateway");
        assert_eq!(
            message_of(api_error(500, r#"{"error":"boom"}"#)),
            "Request failed with status 500"
        );
        assert_eq!(message_of(api_error(404, "")), "Request failed with status 404");
    }

    #[test]
    fn test_notification_policy() {
        let api = api_error(422, r#"{"message":"Invalid"}"#);
        assert_eq!(api.notification().as_deref(), Some("Invalid"));

        let decode = ClientError::Decode(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(decode.notification().is_none());

        assert!(ClientError::MissingToken.notification().is_some());
    }
}
