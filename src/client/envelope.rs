// src/client/envelope.rs — Error-envelope decoding
//
// The remote API reports failures as `{"detail": ...}` where `detail` is
// either a plain string or a list of validation records carrying `msg`
// (FastAPI convention). Decoding is a tagged parse with a generic-message
// fallback, never an ad hoc field probe.

use serde::Deserialize;

/// Message used when the error body carries nothing usable.
pub const GENERIC_ERROR: &str = "An error occurred";

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    detail: Detail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Message(String),
    Validation(Vec<ValidationItem>),
}

#[derive(Debug, Deserialize)]
struct ValidationItem {
    msg: String,
}

/// Extract a human-readable message from a non-2xx response body.
///
/// A string `detail` is used verbatim; a validation list joins the
/// individual messages with `"; "`; anything else (malformed JSON, missing
/// `detail`, an empty list) falls back to the generic message.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.detail {
            Detail::Message(message) => message,
            Detail::Validation(items) if items.is_empty() => GENERIC_ERROR.into(),
            Detail::Validation(items) => items
                .iter()
                .map(|item| item.msg.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        },
        Err(_) => GENERIC_ERROR.into(),
    }
}
