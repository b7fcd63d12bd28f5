//! Flattened, snake_case views of applicants and documents for API responses

use crate::{AddressData, ApplicantData, ApplicantInfo, DocumentData, ReviewData};
use serde::Serialize;
use serde_json::Value;

/// Serializable overview of an applicant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantSummary {
    pub id: String,
    pub external_user_id: String,
    pub created_at: String,
    pub inspection_id: Option<String>,
    #[serde(rename = "type")]
    pub applicant_type: Option<String>,
    pub lang: Option<String>,
    pub key: Option<String>,
    pub client_id: Option<String>,
    pub applicant_platform: Option<String>,
    pub email: Option<String>,
    /// `verified`, `rejected` or `pending`
    pub verification_status: &'static str,
    pub is_verified: bool,
    pub is_rejected: bool,
    pub is_pending: bool,
    pub personal_info: Option<PersonalInfoSummary>,
    pub fixed_info: Option<NameSummary>,
    pub review: Option<ReviewSummary>,
    pub agreement: Option<Value>,
    pub required_id_docs: Option<Value>,
}

impl From<&ApplicantData> for ApplicantSummary {
    fn from(a: &ApplicantData) -> Self {
        Self {
            id: a.id.clone(),
            external_user_id: a.external_user_id.clone(),
            created_at: a.created_at.clone(),
            inspection_id: a.inspection_id.clone(),
            applicant_type: a.applicant_type.map(|t| t.as_str().to_string()),
            lang: a.lang.clone(),
            key: a.key.clone(),
            client_id: a.client_id.clone(),
            applicant_platform: a.applicant_platform.clone(),
            email: a.email.clone(),
            verification_status: a.verification_status(),
            is_verified: a.is_verified(),
            is_rejected: a.is_rejected(),
            is_pending: a.is_pending(),
            personal_info: a.info.as_ref().map(PersonalInfoSummary::from),
            fixed_info: a.fixed_info.as_ref().map(NameSummary::from),
            review: a.review.as_ref().map(ReviewSummary::from),
            agreement: a.agreement.clone(),
            required_id_docs: a.required_id_docs.clone(),
        }
    }
}

impl ApplicantData {
    pub fn summary(&self) -> ApplicantSummary {
        ApplicantSummary::from(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalInfoSummary {
    pub full_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub country: Option<String>,
    pub nationality: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<AddressSummary>,
}

impl From<&ApplicantInfo> for PersonalInfoSummary {
    fn from(info: &ApplicantInfo) -> Self {
        Self {
            full_name: info.full_name(),
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            middle_name: info.middle_name.clone(),
            date_of_birth: info.dob.clone(),
            country: info.country.clone(),
            nationality: info.nationality.clone(),
            phone: info.phone.clone(),
            email: info.email.clone(),
            address: info.address().map(AddressSummary::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressSummary {
    pub formatted: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub post_code: Option<String>,
}

impl From<&AddressData> for AddressSummary {
    fn from(address: &AddressData) -> Self {
        Self {
            formatted: address.formatted(),
            country: address.country.clone(),
            city: address.town.clone(),
            street: address.street.clone(),
            post_code: address.post_code.clone(),
        }
    }
}

/// Name-only view used for `fixedInfo`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameSummary {
    pub full_name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
}

impl From<&ApplicantInfo> for NameSummary {
    fn from(info: &ApplicantInfo) -> Self {
        Self {
            full_name: info.full_name(),
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            middle_name: info.middle_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub review_id: Option<String>,
    pub attempt_id: Option<String>,
    pub attempt_count: Option<u32>,
    pub level_name: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub reviewed_at: Option<String>,
    pub result: Option<ReviewResultSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewResultSummary {
    pub answer: Option<String>,
    pub label: Option<&'static str>,
    pub moderation_comment: Option<String>,
    pub reject_type: Option<String>,
    pub reject_labels: Option<Vec<String>>,
}

impl From<&ReviewData> for ReviewSummary {
    fn from(review: &ReviewData) -> Self {
        Self {
            review_id: review.review_id.clone(),
            attempt_id: review.attempt_id.clone(),
            attempt_count: review.attempt_cnt,
            level_name: review.level_name.clone(),
            status: review.review_status.map(|s| s.as_str().to_string()),
            created_at: review.create_date.clone(),
            reviewed_at: review.review_date.clone(),
            result: review.review_result.as_ref().map(|r| ReviewResultSummary {
                answer: r.review_answer.map(|a| a.as_str().to_string()),
                label: r.review_answer.map(|a| a.label()),
                moderation_comment: r.moderation_comment.clone(),
                reject_type: r.review_reject_type.clone(),
                reject_labels: r.reject_labels.clone(),
            }),
        }
    }
}

/// Serializable overview of a single document image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub image_id: Option<String>,
    #[serde(rename = "type")]
    pub doc_set_type: Option<String>,
    pub document_type: Option<String>,
    pub country: Option<String>,
    /// Lowercased review answer (`green`, `red`, `yellow`)
    pub review_status: Option<String>,
    pub is_approved: bool,
    pub is_rejected: bool,
    pub requires_review: bool,
}

impl From<&DocumentData> for DocumentSummary {
    fn from(doc: &DocumentData) -> Self {
        Self {
            image_id: doc.image_id.clone(),
            doc_set_type: doc.doc_set_type.clone(),
            document_type: doc.id_doc_type.clone(),
            country: doc.country.clone(),
            review_status: doc.review_answer.map(|a| a.as_str().to_ascii_lowercase()),
            is_approved: doc.is_approved(),
            is_rejected: doc.is_rejected(),
            requires_review: doc.requires_review(),
        }
    }
}
