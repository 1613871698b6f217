use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Body shape every backend endpoint answers with. `data` carries the
/// payload on success; `error` or `message` carries the reason otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    // No `#[serde(default)]` here: serde already treats a missing `Option`
    // field as `None`, and the attribute would force a spurious `T: Default`
    // bound on the derived `Deserialize` impl.
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::ServerRejected(self.reason()));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("successful response carried no data".to_string()))
    }

    /// For endpoints whose payload is irrelevant, such as deletes.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::ServerRejected(self.reason()))
        }
    }

    pub fn reason(&self) -> String {
        self.error
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "unknown server error".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn successful_envelope_yields_data() {
        let envelope: ApiEnvelope<i64> =
            serde_json::from_value(serde_json::json!({ "success": true, "data": 7 })).unwrap();
        assert_eq!(envelope.into_data().unwrap(), 7);
    }

    #[test]
    fn failed_envelope_carries_the_server_reason() {
        let envelope: ApiEnvelope<i64> = serde_json::from_value(
            serde_json::json!({ "success": false, "error": "slot already exists" }),
        )
        .unwrap();
        assert_matches!(
            envelope.into_data(),
            Err(ApiError::ServerRejected(msg)) if msg == "slot already exists"
        );
    }

    #[test]
    fn success_without_data_is_a_decode_error() {
        let envelope: ApiEnvelope<i64> =
            serde_json::from_value(serde_json::json!({ "success": true })).unwrap();
        assert_matches!(envelope.into_data(), Err(ApiError::Decode(_)));
    }

    #[test]
    fn unit_conversion_ignores_missing_data() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_value(serde_json::json!({ "success": true })).unwrap();
        assert_matches!(envelope.into_unit(), Ok(()));
    }
}
