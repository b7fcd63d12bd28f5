//! Document data objects and the document listing

use crate::de;
use crate::{DocumentSummary, ReviewAnswer, ReviewResultData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single uploaded document image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    #[serde(
        default,
        deserialize_with = "de::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_id: Option<String>,

    /// Document set the image belongs to (`IDENTITY`, `SELFIE`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_set_type: Option<String>,

    /// Concrete document type (`PASSPORT`, `ID_CARD`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_doc_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_answer: Option<ReviewAnswer>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64_image: Option<String>,
}

impl DocumentData {
    pub fn is_approved(&self) -> bool {
        self.review_answer.is_some_and(|a| a.is_approved())
    }

    pub fn is_rejected(&self) -> bool {
        self.review_answer.is_some_and(|a| a.is_rejected())
    }

    pub fn requires_review(&self) -> bool {
        self.review_answer.is_some_and(|a| a.requires_review())
    }

    /// Numeric document type code used by downstream exports.
    ///
    /// PASSPORT=1, ID_CARD=2, DRIVERS=3, RESIDENCE_PERMIT=4, anything else 0.
    pub fn type_number(&self) -> u8 {
        match self.id_doc_type.as_deref() {
            Some("PASSPORT") => 1,
            Some("ID_CARD") => 2,
            Some("DRIVERS") => 3,
            Some("RESIDENCE_PERMIT") => 4,
            _ => 0,
        }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::from(self)
    }
}

/// Status of one document set in `requiredIdDocsStatus`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocSetStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_doc_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(
        default,
        deserialize_with = "de::non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub review_result: Option<ReviewResultData>,

    #[serde(
        default,
        deserialize_with = "de::id_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_ids: Option<Vec<String>>,

    /// Per-image review results keyed by image id
    #[serde(
        default,
        deserialize_with = "de::non_empty",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_review_results: Option<BTreeMap<String, ReviewResultData>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_id: Option<String>,
}

impl DocSetStatus {
    fn image_review(&self, image_id: &str) -> Option<&ReviewResultData> {
        self.image_review_results.as_ref()?.get(image_id)
    }
}

/// Body of `GET /resources/applicants/{id}/requiredIdDocsStatus`:
/// document set name to its status (`null` when nothing was submitted)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequiredIdDocsStatus(pub BTreeMap<String, Option<DocSetStatus>>);

impl RequiredIdDocsStatus {
    pub fn get(&self, doc_set_type: &str) -> Option<&DocSetStatus> {
        self.0.get(doc_set_type)?.as_ref()
    }

    /// Flatten into one document per image id.
    ///
    /// Sets without an `imageIds` array produce nothing. The review answer
    /// comes from the set-level result, then from the per-image result.
    pub fn documents(&self) -> DocumentCollection {
        self.0
            .iter()
            .filter_map(|(set_type, status)| Some((set_type, status.as_ref()?)))
            .flat_map(|(set_type, status)| {
                status
                    .image_ids
                    .iter()
                    .flatten()
                    .map(move |image_id| DocumentData {
                        image_id: Some(image_id.clone()),
                        doc_set_type: Some(set_type.clone()),
                        id_doc_type: status.id_doc_type.clone(),
                        country: status.country.clone(),
                        review_answer: status
                            .review_result
                            .as_ref()
                            .and_then(|r| r.review_answer)
                            .or_else(|| {
                                status.image_review(image_id).and_then(|r| r.review_answer)
                            }),
                        attempt_id: status.attempt_id.clone(),
                        ..Default::default()
                    })
            })
            .collect()
    }
}

/// Ordered list of documents with filtering helpers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentCollection {
    documents: Vec<DocumentData>,
}

impl DocumentCollection {
    pub fn new(documents: Vec<DocumentData>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentData> {
        self.documents.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DocumentData> {
        self.documents.get(index)
    }

    pub fn first(&self) -> Option<&DocumentData> {
        self.documents.first()
    }

    pub fn approved(&self) -> Self {
        self.filter(DocumentData::is_approved)
    }

    pub fn rejected(&self) -> Self {
        self.filter(DocumentData::is_rejected)
    }

    /// Documents belonging to the given document set
    pub fn by_type(&self, doc_set_type: &str) -> Self {
        self.filter(|d| d.doc_set_type.as_deref() == Some(doc_set_type))
    }

    pub fn summaries(&self) -> Vec<DocumentSummary> {
        self.documents.iter().map(DocumentSummary::from).collect()
    }

    pub fn into_vec(self) -> Vec<DocumentData> {
        self.documents
    }

    fn filter(&self, predicate: impl Fn(&DocumentData) -> bool) -> Self {
        self.documents.iter().filter(|&d| predicate(d)).cloned().collect()
    }
}

impl FromIterator<DocumentData> for DocumentCollection {
    fn from_iter<I: IntoIterator<Item = DocumentData>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for DocumentCollection {
    type Item = DocumentData;
    type IntoIter = std::vec::IntoIter<DocumentData>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.into_iter()
    }
}

impl<'a> IntoIterator for &'a DocumentCollection {
    type Item = &'a DocumentData;
    type IntoIter = std::slice::Iter<'a, DocumentData>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}
