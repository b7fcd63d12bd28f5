//! Portal data service

use crate::data::{PortalDocumentData, PortalUserData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use sumsub_client::{ApiError, Result, SumsubClient};
use sumsub_core::{DocumentCollection, DocumentData};
use tracing::{debug, warn};

/// Document set holding the identity document images
const IDENTITY_SET: &str = "IDENTITY";
/// Document set holding the selfie
const SELFIE_SET: &str = "SELFIE";

/// Result for one user in a bulk export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BulkEntry {
    Found(PortalUserData),
    Failed { error: String, status_code: u16 },
}

impl BulkEntry {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn data(&self) -> Option<&PortalUserData> {
        match self {
            Self::Found(data) => Some(data),
            Self::Failed { .. } => None,
        }
    }
}

impl From<ApiError> for BulkEntry {
    fn from(err: ApiError) -> Self {
        Self::Failed {
            error: err.to_string(),
            status_code: err.status_code(),
        }
    }
}

/// Builds portal export records from live Sumsub data
#[derive(Debug, Clone)]
pub struct PortalDataService {
    client: SumsubClient,
}

impl PortalDataService {
    pub fn new(client: SumsubClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &SumsubClient {
        &self.client
    }

    /// Fetch one user by external id.
    ///
    /// Documents are only looked up when `include_images` is set. Failing to
    /// list documents leaves `document` empty instead of failing the call.
    pub async fn get_user_data(
        &self,
        external_user_id: &str,
        include_images: bool,
    ) -> Result<PortalUserData> {
        let applicant = self
            .client
            .get_applicant_by_external_user_id(external_user_id)
            .await?;
        let data = PortalUserData::from_applicant(&applicant);

        if !include_images {
            return Ok(data);
        }

        match self.client.get_documents(&applicant.id).await {
            Ok(documents) => {
                let document = self.build_document(&applicant.id, &documents).await;
                Ok(data.with_document(document))
            }
            Err(e) => {
                warn!(
                    applicant_id = %applicant.id,
                    error = %e,
                    "Documents unavailable, exporting without them"
                );
                Ok(data)
            }
        }
    }

    /// Same as [`get_user_data`](Self::get_user_data), serialized to JSON
    pub async fn get_user_data_json(
        &self,
        external_user_id: &str,
        include_images: bool,
        pretty: bool,
    ) -> Result<String> {
        let data = self.get_user_data(external_user_id, include_images).await?;

        let json = if pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };
        Ok(json)
    }

    /// Fetch several users one after another.
    ///
    /// A failure for one user is recorded under that user's id and does not
    /// stop the others.
    pub async fn get_bulk_user_data<I, S>(
        &self,
        external_user_ids: I,
        include_images: bool,
    ) -> BTreeMap<String, BulkEntry>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = BTreeMap::new();

        for id in external_user_ids {
            let id = id.as_ref();
            let entry = match self.get_user_data(id, include_images).await {
                Ok(data) => BulkEntry::Found(data),
                Err(e) => {
                    warn!(external_user_id = %id, error = %e, "Bulk export entry failed");
                    BulkEntry::from(e)
                }
            };
            results.insert(id.to_string(), entry);
        }

        debug!(count = results.len(), "Bulk export finished");
        results
    }

    async fn build_document(
        &self,
        applicant_id: &str,
        documents: &DocumentCollection,
    ) -> PortalDocumentData {
        let identity = documents.by_type(IDENTITY_SET);
        let selfie = documents.by_type(SELFIE_SET);

        let primary = identity.first();
        let sumsub_type = primary
            .and_then(|d| d.id_doc_type.as_deref().or(d.doc_set_type.as_deref()))
            .unwrap_or(IDENTITY_SET);

        let mut document =
            PortalDocumentData::new(sumsub_type, primary.and_then(|d| d.country.clone()));
        document.front = self.fetch_image(applicant_id, identity.get(0)).await;
        document.back = self.fetch_image(applicant_id, identity.get(1)).await;
        document.face = self.fetch_image(applicant_id, selfie.first()).await;
        document
    }

    async fn fetch_image(&self, applicant_id: &str, doc: Option<&DocumentData>) -> Option<String> {
        let image_id = doc?.image_id.as_deref()?;

        match self.client.get_document_image(applicant_id, image_id).await {
            Ok(bytes) => PortalDocumentData::image_data_uri(&bytes),
            Err(e) => {
                warn!(applicant_id, image_id, error = %e, "Skipping document image");
                None
            }
        }
    }
}
