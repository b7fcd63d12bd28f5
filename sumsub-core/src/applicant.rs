//! Applicant data objects

use crate::de;
use crate::{ApplicantType, ReviewAnswer, ReviewStatus};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An applicant as returned by `/resources/applicants/.../one`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantData {
    /// Remote applicant id
    pub id: String,

    /// Caller-side user id
    pub external_user_id: String,

    pub created_at: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_id: Option<String>,

    #[serde(
        rename = "type",
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub applicant_type: Option<ApplicantType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicant_platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Personal info as submitted
    #[serde(
        default,
        deserialize_with = "de::non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub info: Option<ApplicantInfo>,

    /// Personal info fixed by the integrator
    #[serde(
        default,
        deserialize_with = "de::non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub fixed_info: Option<ApplicantInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agreement: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_id_docs: Option<Value>,
}

impl ApplicantData {
    /// Review finished with a GREEN answer
    pub fn is_verified(&self) -> bool {
        self.review.as_ref().is_some_and(ReviewData::is_approved)
    }

    pub fn is_rejected(&self) -> bool {
        self.review.as_ref().is_some_and(ReviewData::is_rejected)
    }

    /// An applicant without a review is considered pending
    pub fn is_pending(&self) -> bool {
        self.review.as_ref().is_none_or(ReviewData::is_pending)
    }

    /// `verified`, `rejected` or `pending`
    pub fn verification_status(&self) -> &'static str {
        if self.is_verified() {
            "verified"
        } else if self.is_rejected() {
            "rejected"
        } else {
            "pending"
        }
    }
}

/// Personal information block (`info` / `fixedInfo`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,

    /// Date of birth, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub addresses: Option<Vec<AddressData>>,

    #[serde(
        default,
        deserialize_with = "de::non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_docs: Option<Vec<IdDocData>>,
}

impl ApplicantInfo {
    /// Primary address (the first one listed)
    pub fn address(&self) -> Option<&AddressData> {
        self.addresses.as_deref().and_then(<[_]>::first)
    }

    /// First identity document listed
    pub fn id_doc(&self) -> Option<&IdDocData> {
        self.id_docs.as_deref().and_then(<[_]>::first)
    }

    /// First, middle and last name joined by spaces, skipping blanks
    pub fn full_name(&self) -> String {
        join_present(
            [&self.first_name, &self.middle_name, &self.last_name],
            " ",
        )
    }
}

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_street: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub building_number: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub flat_number: Option<String>,
}

impl AddressData {
    /// Single-line address, comma separated, skipping blanks
    pub fn formatted(&self) -> String {
        join_present(
            [
                &self.street,
                &self.building_number,
                &self.flat_number,
                &self.town,
                &self.state,
                &self.post_code,
                &self.country,
            ],
            ", ",
        )
    }
}

/// Identity document as recorded on the applicant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdDocData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_doc_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dob: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrz_line1: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrz_line2: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrz_line3: Option<String>,
}

/// Review state of an applicant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_cnt: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_date: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_status: Option<ReviewStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_result: Option<ReviewResultData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl ReviewData {
    pub fn is_completed(&self) -> bool {
        self.review_status.is_some_and(|s| s.is_completed())
    }

    /// Unknown or missing status counts as pending
    pub fn is_pending(&self) -> bool {
        self.review_status.is_none_or(|s| s.is_pending())
    }

    pub fn is_approved(&self) -> bool {
        self.review_result
            .as_ref()
            .is_some_and(ReviewResultData::is_approved)
    }

    pub fn is_rejected(&self) -> bool {
        self.review_result
            .as_ref()
            .is_some_and(ReviewResultData::is_rejected)
    }
}

/// Result part of a review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResultData {
    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_answer: Option<ReviewAnswer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_reject_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reject_labels: Option<Vec<String>>,
}

impl ReviewResultData {
    pub fn is_approved(&self) -> bool {
        self.review_answer.is_some_and(|a| a.is_approved())
    }

    pub fn is_rejected(&self) -> bool {
        self.review_answer.is_some_and(|a| a.is_rejected())
    }

    pub fn requires_review(&self) -> bool {
        self.review_answer.is_some_and(|a| a.requires_review())
    }
}

/// Short-lived token for initializing the client-side SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessToken {
    pub token: String,
    pub user_id: String,
}

fn join_present<'a>(parts: impl IntoIterator<Item = &'a Option<String>>, sep: &str) -> String {
    parts
        .into_iter()
        .filter_map(|p| p.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn applicant(review: Value) -> ApplicantData {
        serde_json::from_value(json!({
            "id": "app-1",
            "externalUserId": "user-1",
            "createdAt": "2024-01-01 00:00:00",
            "review": review,
        }))
        .unwrap()
    }

    #[test]
    fn test_verified_applicant() {
        let a = applicant(json!({
            "reviewStatus": "completed",
            "reviewResult": { "reviewAnswer": "GREEN" }
        }));
        assert!(a.is_verified());
        assert!(!a.is_rejected());
        assert!(!a.is_pending());
        assert_eq!(a.verification_status(), "verified");
    }

    #[test]
    fn test_rejected_applicant() {
        let a = applicant(json!({
            "reviewStatus": "completed",
            "reviewResult": { "reviewAnswer": "RED", "rejectLabels": ["FORGERY"] }
        }));
        assert!(a.is_rejected());
        assert_eq!(a.verification_status(), "rejected");
        let labels = a.review.unwrap().review_result.unwrap().reject_labels.unwrap();
        assert_eq!(labels, vec!["FORGERY"]);
    }

    #[test]
    fn test_applicant_without_review_is_pending() {
        let a: ApplicantData = serde_json::from_value(json!({
            "id": "app-1",
            "externalUserId": "user-1",
            "createdAt": "2024-01-01 00:00:00"
        }))
        .unwrap();
        assert!(a.is_pending());
        assert!(!a.is_verified());
        assert_eq!(a.verification_status(), "pending");
    }

    #[test]
    fn test_unknown_enum_values_are_dropped() {
        let a: ApplicantData = serde_json::from_value(json!({
            "id": "app-1",
            "externalUserId": "user-1",
            "createdAt": "2024-01-01 00:00:00",
            "type": "trust",
            "review": { "reviewStatus": "archived", "reviewResult": { "reviewAnswer": "ORANGE" } }
        }))
        .unwrap();
        assert!(a.applicant_type.is_none());
        let review = a.review.unwrap();
        assert!(review.review_status.is_none());
        assert!(review.is_pending());
        assert!(review.review_result.unwrap().review_answer.is_none());
    }

    #[test]
    fn test_missing_required_field_fails() {
        let result = serde_json::from_value::<ApplicantData>(json!({
            "id": "app-1",
            "createdAt": "2024-01-01 00:00:00"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_info_is_absent() {
        let a: ApplicantData = serde_json::from_value(json!({
            "id": "app-1",
            "externalUserId": "user-1",
            "createdAt": "2024-01-01 00:00:00",
            "info": {},
            "fixedInfo": { "firstName": "Jane" }
        }))
        .unwrap();
        assert!(a.info.is_none());
        assert_eq!(a.fixed_info.unwrap().first_name.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_info_helpers() {
        let info: ApplicantInfo = serde_json::from_value(json!({
            "firstName": "John",
            "middleName": "",
            "lastName": "Smith",
            "addresses": [
                { "street": "Main St", "buildingNumber": 12, "town": "Berlin", "postCode": "10115", "country": "DEU" },
                { "street": "Second St" }
            ],
            "idDocs": [
                { "idDocType": "PASSPORT", "country": "DEU", "number": "C01X00T47", "validUntil": "2030-01-01" }
            ]
        }))
        .unwrap();

        assert_eq!(info.full_name(), "John Smith");
        let address = info.address().unwrap();
        assert_eq!(address.building_number.as_deref(), Some("12"));
        assert_eq!(address.formatted(), "Main St, 12, Berlin, 10115, DEU");
        assert_eq!(info.id_doc().unwrap().id_doc_type.as_deref(), Some("PASSPORT"));
    }

    #[test]
    fn test_access_token() {
        let token: AccessToken =
            serde_json::from_value(json!({ "token": "_act-abc", "userId": "user-1" })).unwrap();
        assert_eq!(token.token, "_act-abc");
        assert_eq!(token.user_id, "user-1");
    }
}
