//! Parsed webhook envelope

use crate::{Result, WebhookError};
use serde::Deserialize;
use serde_json::Value;
use sumsub_core::de;
use sumsub_core::{ReviewAnswer, ReviewStatus, WebhookType};

/// An inbound webhook notification.
///
/// Built once per request and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookData {
    /// Wire value of `type`, kept even when it is not a known kind
    pub type_name: String,

    pub applicant_id: String,

    pub external_user_id: String,

    pub inspection_id: Option<String>,

    pub correlation_id: Option<String>,

    /// Raw `reviewStatus` value
    pub review_status: Option<String>,

    /// `reviewResult.reviewAnswer`, when it is a known answer
    pub review_answer: Option<ReviewAnswer>,

    pub applicant_type: Option<String>,

    pub created_at: Option<String>,

    /// The `reviewResult` object as sent
    pub review_result: Option<Value>,

    /// The full decoded body
    pub raw_payload: Value,

    webhook_type: Option<WebhookType>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    #[serde(rename = "type")]
    type_name: String,
    applicant_id: String,
    external_user_id: String,
    #[serde(default, deserialize_with = "de::lenient")]
    inspection_id: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    correlation_id: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    review_status: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    applicant_type: Option<String>,
    #[serde(default, deserialize_with = "de::lenient")]
    created_at: Option<String>,
    #[serde(default)]
    review_result: Option<Value>,
}

impl WebhookData {
    /// Build the envelope from a decoded body.
    ///
    /// Required fields must be strings; optional fields of any other type
    /// are treated as absent.
    pub fn from_value(payload: Value) -> Result<Self> {
        let envelope = Envelope::deserialize(&payload)?;

        let review_answer = envelope
            .review_result
            .as_ref()
            .and_then(|r| r.get("reviewAnswer"))
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok());

        Ok(Self {
            webhook_type: envelope.type_name.parse().ok(),
            type_name: envelope.type_name,
            applicant_id: envelope.applicant_id,
            external_user_id: envelope.external_user_id,
            inspection_id: envelope.inspection_id,
            correlation_id: envelope.correlation_id,
            review_status: envelope.review_status,
            review_answer,
            applicant_type: envelope.applicant_type,
            created_at: envelope.created_at,
            review_result: envelope.review_result.filter(|r| !r.is_null()),
            raw_payload: payload,
        })
    }

    /// Parse the envelope from raw JSON bytes
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let payload: Value = serde_json::from_slice(body)?;
        Self::from_value(payload)
    }

    /// Notification kind, or `None` for a type this SDK does not know
    pub fn webhook_type(&self) -> Option<WebhookType> {
        self.webhook_type
    }

    /// `review_status` parsed into a known status
    pub fn parsed_review_status(&self) -> Option<ReviewStatus> {
        self.review_status.as_deref()?.parse().ok()
    }

    pub fn is_approved(&self) -> bool {
        self.review_answer.is_some_and(|a| a.is_approved())
    }

    pub fn is_rejected(&self) -> bool {
        self.review_answer.is_some_and(|a| a.is_rejected())
    }

    pub fn requires_review(&self) -> bool {
        self.review_answer.is_some_and(|a| a.requires_review())
    }

    /// A review notification whose status is `completed`
    pub fn is_review_completed(&self) -> bool {
        self.webhook_type.is_some_and(|t| t.is_review())
            && self.review_status.as_deref() == Some("completed")
    }

    /// Look up any top-level field of the original body
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.raw_payload.get(field)
    }
}

impl TryFrom<Value> for WebhookData {
    type Error = WebhookError;

    fn try_from(payload: Value) -> Result<Self> {
        Self::from_value(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_envelope() {
        let data = WebhookData::from_value(json!({
            "type": "applicantReviewed",
            "applicantId": "app-1",
            "externalUserId": "user-1",
            "inspectionId": "insp-1",
            "correlationId": "corr-1",
            "reviewStatus": "completed",
            "applicantType": "individual",
            "createdAt": "2024-01-01 00:00:00+0000",
            "reviewResult": { "reviewAnswer": "GREEN" },
            "levelName": "basic-kyc-level"
        }))
        .unwrap();

        assert_eq!(data.webhook_type(), Some(WebhookType::ApplicantReviewed));
        assert_eq!(data.applicant_id, "app-1");
        assert_eq!(data.inspection_id.as_deref(), Some("insp-1"));
        assert_eq!(data.correlation_id.as_deref(), Some("corr-1"));
        assert_eq!(data.parsed_review_status(), Some(ReviewStatus::Completed));
        assert!(data.is_approved());
        assert!(data.is_review_completed());
        assert_eq!(data.get("levelName").unwrap(), "basic-kyc-level");
    }

    #[test]
    fn test_optional_fields_default_to_absent() {
        let data = WebhookData::from_value(json!({
            "type": "applicantCreated",
            "applicantId": "app-1",
            "externalUserId": "user-1"
        }))
        .unwrap();

        assert!(data.inspection_id.is_none());
        assert!(data.review_status.is_none());
        assert!(data.review_answer.is_none());
        assert!(data.review_result.is_none());
        assert!(!data.is_approved());
        assert!(!data.is_review_completed());
    }

    #[test]
    fn test_unknown_type_is_kept() {
        let data = WebhookData::from_value(json!({
            "type": "applicantDeleted",
            "applicantId": "app-1",
            "externalUserId": "user-1"
        }))
        .unwrap();

        assert_eq!(data.webhook_type(), None);
        assert_eq!(data.type_name, "applicantDeleted");
    }

    #[test]
    fn test_unknown_review_answer() {
        let data = WebhookData::from_value(json!({
            "type": "applicantReviewed",
            "applicantId": "app-1",
            "externalUserId": "user-1",
            "reviewResult": { "reviewAnswer": "PURPLE" }
        }))
        .unwrap();

        assert!(data.review_answer.is_none());
        assert!(data.review_result.is_some());
    }

    #[test]
    fn test_pending_review_is_not_completed() {
        let data = WebhookData::from_value(json!({
            "type": "applicantReviewed",
            "applicantId": "app-1",
            "externalUserId": "user-1",
            "reviewStatus": "pending"
        }))
        .unwrap();
        assert!(!data.is_review_completed());
    }

    #[test]
    fn test_wrong_type_for_required_field() {
        let err = WebhookData::from_value(json!({
            "type": "applicantCreated",
            "applicantId": 42,
            "externalUserId": "user-1"
        }))
        .unwrap_err();
        assert!(matches!(err, WebhookError::InvalidPayload(_)));
    }

    #[test]
    fn test_from_slice() {
        let data = WebhookData::from_slice(
            br#"{"type":"applicantPending","applicantId":"a","externalUserId":"u"}"#,
        )
        .unwrap();
        assert_eq!(data.webhook_type(), Some(WebhookType::ApplicantPending));

        assert!(WebhookData::from_slice(b"not json").is_err());
    }
}
