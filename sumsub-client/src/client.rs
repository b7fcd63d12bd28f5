//! Sumsub API client.

use bytes::Bytes;
use http::{Method, StatusCode};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use sumsub_core::signature::headers;
use sumsub_core::{AccessToken, ApplicantData, ApplicantInfo, DocumentCollection, RequiredIdDocsStatus};
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::{ApiError, ClientConfig, DocumentMetadata, DocumentUpload, RequestSigner, Result};

/// Characters escaped when an id is placed in a path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b';')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Authenticated client for the Sumsub REST API.
///
/// Every request is signed with a fresh timestamp. Cloning is cheap and
/// shares the connection pool.
#[derive(Clone)]
pub struct SumsubClient {
    inner: reqwest::Client,
    config: Arc<ClientConfig>,
    signer: RequestSigner,
}

/// Request body representation.
enum Body {
    Empty,
    Json(Vec<u8>),
    Multipart(Form),
}

impl SumsubClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            signer: RequestSigner::new(config.credentials.clone()),
            inner,
            config: Arc::new(config),
        })
    }

    /// Create a client for the default API host.
    pub fn with_credentials(
        app_token: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Result<Self> {
        Self::new(ClientConfig::new(app_token, secret_key))
    }

    /// Create a client configured from `SUMSUB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch an applicant by its Sumsub id.
    pub async fn get_applicant(&self, applicant_id: &str) -> Result<ApplicantData> {
        let path = format!("/resources/applicants/{}/one", segment(applicant_id));
        self.request_json(Method::GET, &path, None).await
    }

    /// Fetch an applicant by the caller's own user id.
    pub async fn get_applicant_by_external_user_id(
        &self,
        external_user_id: &str,
    ) -> Result<ApplicantData> {
        let path = format!(
            "/resources/applicants/-;externalUserId={}/one",
            segment(external_user_id)
        );
        self.request_json(Method::GET, &path, None).await
    }

    /// Create an applicant at the given verification level.
    pub async fn create_applicant(
        &self,
        external_user_id: &str,
        level_name: &str,
        info: Option<&ApplicantInfo>,
    ) -> Result<ApplicantData> {
        let path = format!("/resources/applicants?{}", query(&[("levelName", level_name)]));

        let mut body = Map::new();
        body.insert("externalUserId".into(), Value::from(external_user_id));
        if let Some(info) = info.filter(|i| **i != ApplicantInfo::default()) {
            body.insert("info".into(), serde_json::to_value(info)?);
        }

        self.request_json(Method::POST, &path, Some(Value::Object(body)))
            .await
    }

    /// Fetch the per-document-set verification status.
    pub async fn get_applicant_status(&self, applicant_id: &str) -> Result<RequiredIdDocsStatus> {
        let path = format!(
            "/resources/applicants/{}/requiredIdDocsStatus",
            segment(applicant_id)
        );
        self.request_json(Method::GET, &path, None).await
    }

    /// List every uploaded image as a document record.
    pub async fn get_documents(&self, applicant_id: &str) -> Result<DocumentCollection> {
        Ok(self.get_applicant_status(applicant_id).await?.documents())
    }

    /// Download a document image.
    pub async fn get_document_image(&self, applicant_id: &str, image_id: &str) -> Result<Bytes> {
        let path = format!(
            "/resources/applicants/{}/document/{}",
            segment(applicant_id),
            segment(image_id)
        );
        let response = self.send(Method::GET, &path, Body::Empty).await?;
        Ok(response.bytes().await?)
    }

    /// Create an access token for the client-side SDK.
    pub async fn generate_access_token(
        &self,
        external_user_id: &str,
        level_name: &str,
    ) -> Result<AccessToken> {
        let path = format!(
            "/resources/accessTokens?{}",
            query(&[("userId", external_user_id), ("levelName", level_name)])
        );
        self.request_json(Method::POST, &path, None).await
    }

    /// Upload a document image.
    ///
    /// Returns the new image id from the `X-Image-Id` response header.
    pub async fn add_document(
        &self,
        applicant_id: &str,
        upload: DocumentUpload,
        metadata: &DocumentMetadata,
    ) -> Result<Option<String>> {
        let path = format!("/resources/applicants/{}/info/idDoc", segment(applicant_id));

        let metadata = serde_json::to_string(metadata)?;

        let mut content = Part::bytes(upload.content.to_vec()).file_name(upload.file_name);
        if let Some(content_type) = upload.content_type {
            content = content.mime_str(&content_type)?;
        }

        let form = Form::new().text("metadata", metadata).part("content", content);

        let response = self.send(Method::POST, &path, Body::Multipart(form)).await?;

        Ok(response
            .headers()
            .get(headers::IMAGE_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string))
    }

    /// Upload a document image read from disk.
    pub async fn add_document_from_path(
        &self,
        applicant_id: &str,
        path: impl AsRef<Path>,
        metadata: &DocumentMetadata,
    ) -> Result<Option<String>> {
        let upload = DocumentUpload::from_path(path).await?;
        self.add_document(applicant_id, upload, metadata).await
    }

    /// Send a request and decode the JSON response.
    async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let body = match body {
            Some(value) => Body::Json(serde_json::to_vec(&value)?),
            None => Body::Empty,
        };

        let response = self.send(method, path, body).await?;
        let raw = response.bytes().await?;

        serde_json::from_slice(&raw).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Sign and send a request, mapping non-success statuses to errors.
    async fn send(&self, method: Method, path: &str, body: Body) -> Result<reqwest::Response> {
        let url = url::Url::parse(&self.config.url_for(path))
            .map_err(|e| ApiError::Transport(format!("invalid URL for {}: {}", path, e)))?;

        // Sign the path exactly as it will go on the wire.
        let signed_path = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };

        let signed_body: &[u8] = match &body {
            Body::Json(bytes) => bytes.as_slice(),
            Body::Empty | Body::Multipart(_) => &[],
        };

        let signed = self.signer.sign(method.as_str(), &signed_path, signed_body);

        debug!(
            method = %method,
            path = %signed_path,
            timestamp = signed.timestamp,
            "Sending signed request"
        );

        let mut request = self
            .inner
            .request(method.clone(), url)
            .headers(self.signer.headers(&signed));

        request = match body {
            Body::Empty => request,
            Body::Json(bytes) => request
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(bytes),
            Body::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::OK || status == StatusCode::CREATED {
            return Ok(response);
        }

        let raw = response.bytes().await.unwrap_or_default();
        let err = ApiError::from_response(status.as_u16(), &raw);

        warn!(
            method = %method,
            path = %signed_path,
            status = status.as_u16(),
            correlation_id = err.correlation_id().unwrap_or(""),
            "API request failed"
        );

        Err(err)
    }
}

impl std::fmt::Debug for SumsubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SumsubClient")
            .field("config", &self.config)
            .finish()
    }
}

fn segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

fn query(pairs: &[(&str, &str)]) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish()
}
