//! The backend's JSON response envelope.
//!
//! Every endpoint wraps its payload in the same shape:
//!
//! ```json
//! { "success": true, "data": { ... }, "message": "optional" }
//! { "success": false, "error": "what went wrong" }
//! ```
//!
//! [`Envelope::into_data`] unwraps it, turning `success: false` into a
//! server error that prefers the backend's own wording.

use serde::Deserialize;

use crate::domain::{Error, Result};

/// Deserialized response envelope.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, mapping failure envelopes to [`Error::Server`].
    ///
    /// A success envelope without a payload is treated as malformed; callers
    /// expecting no payload use [`Envelope::expect_success`] instead.
    pub fn into_data(self, status: u16) -> Result<T> {
        if self.success {
            self.data
                .ok_or_else(|| Error::Unknown("response envelope carried no data".to_string()))
        } else {
            Err(Error::Server {
                status: Some(status),
                message: self.failure_message(status),
            })
        }
    }

    /// Checks success for endpoints whose payload is irrelevant (delete).
    pub fn expect_success(self, status: u16) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(Error::Server {
                status: Some(status),
                message: self.failure_message(status),
            })
        }
    }

    fn failure_message(&self, status: u16) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| format!("request failed with status {status}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_yields_data() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"success":true,"data":[1,2,3]}"#).unwrap();
        assert_eq!(env.into_data(200).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn failure_prefers_error_over_message() {
        let env: Envelope<()> = serde_json::from_str(
            r#"{"success":false,"error":"Experience not found","message":"other"}"#,
        )
        .unwrap();
        let err = env.into_data(404).unwrap_err();
        assert_eq!(err.to_string(), "Experience not found");
    }

    #[test]
    fn failure_without_text_synthesizes_from_status() {
        let env: Envelope<()> = serde_json::from_str(r#"{"success":false}"#).unwrap();
        let err = env.expect_success(500).unwrap_err();
        assert_eq!(err.to_string(), "request failed with status 500");
    }

    #[test]
    fn success_without_data_is_malformed() {
        let env: Envelope<u32> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.into_data(200).is_err());
    }

    #[test]
    fn delete_acknowledgement_needs_no_data() {
        let env: Envelope<()> =
            serde_json::from_str(r#"{"success":true,"message":"deleted"}"#).unwrap();
        assert!(env.expect_success(200).is_ok());
    }
}
