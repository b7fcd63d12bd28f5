//! Webhook handler: verify, parse, validate, dispatch

use crate::dispatcher::{DispatchPolicy, EventDispatcher};
use crate::events::WebhookEvent;
use crate::payload::WebhookData;
use crate::verifier::{extract_algorithm, extract_signature, HeaderSource, WebhookValidator};
use crate::Result;
use serde_json::Value;
use sumsub_core::DigestAlgorithm;
use tracing::{debug, info};

/// Configuration for the webhook handler
#[derive(Debug, Clone, Default)]
pub struct HandlerConfig {
    /// Behavior when a listener fails
    pub dispatch_policy: DispatchPolicy,
}

impl HandlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> HandlerConfigBuilder {
        HandlerConfigBuilder::default()
    }
}

/// Builder for HandlerConfig
#[derive(Debug, Clone, Default)]
pub struct HandlerConfigBuilder {
    config: HandlerConfig,
}

impl HandlerConfigBuilder {
    /// Set the listener failure policy
    pub fn dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.config.dispatch_policy = policy;
        self
    }

    /// Stop dispatching at the first failing listener
    pub fn stop_on_error(self) -> Self {
        self.dispatch_policy(DispatchPolicy::StopOnError)
    }

    pub fn build(self) -> HandlerConfig {
        self.config
    }
}

/// Receives Sumsub webhook notifications.
///
/// # Examples
///
/// ```
/// use sumsub_webhooks::{ApplicantReviewed, Event, WebhookHandler};
///
/// let handler = WebhookHandler::new("webhook-secret");
/// handler.dispatcher().on::<ApplicantReviewed, _>(|event| {
///     println!("{} reviewed", event.applicant_id());
///     Ok(())
/// });
///
/// let body = br#"{"type":"applicantReviewed","applicantId":"a1","externalUserId":"u1"}"#;
/// let signature = sumsub_core::signature::sign(b"webhook-secret", body);
/// let data = handler.handle(body, &signature, Default::default()).unwrap();
/// assert_eq!(data.external_user_id, "u1");
/// ```
#[derive(Debug, Clone)]
pub struct WebhookHandler {
    validator: WebhookValidator,
    dispatcher: EventDispatcher,
    config: HandlerConfig,
}

impl WebhookHandler {
    /// Create a handler with default configuration
    pub fn new(secret: impl Into<String>) -> Self {
        Self::with_config(secret, HandlerConfig::default())
    }

    /// Create a handler with custom configuration
    pub fn with_config(secret: impl Into<String>, config: HandlerConfig) -> Self {
        Self {
            validator: WebhookValidator::new(secret),
            dispatcher: EventDispatcher::with_policy(config.dispatch_policy),
            config,
        }
    }

    /// Use an existing dispatcher, for example one shared across handlers.
    ///
    /// Listeners stay shared with `dispatcher`; the handler's configured
    /// policy applies to its own dispatches.
    pub fn with_dispatcher(mut self, mut dispatcher: EventDispatcher) -> Self {
        dispatcher.set_policy(self.config.dispatch_policy);
        self.dispatcher = dispatcher;
        self
    }

    /// The registry listeners are added to
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn validator(&self) -> &WebhookValidator {
        &self.validator
    }

    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Verify and process one notification.
    ///
    /// The signature is checked over the raw body before anything is parsed.
    /// A type this SDK does not know is returned without dispatching. When
    /// listeners fail, the envelope travels in the error; see
    /// [`WebhookError::webhook_data`](crate::WebhookError::webhook_data).
    pub fn handle(
        &self,
        payload: &[u8],
        signature: &str,
        algorithm: DigestAlgorithm,
    ) -> Result<WebhookData> {
        self.validator
            .validate_signature(payload, signature, algorithm)?;

        let value: Value = serde_json::from_slice(payload)?;
        self.validator.validate_payload(&value)?;

        let data = WebhookData::from_value(value)?;

        match WebhookEvent::from_webhook(data.clone()) {
            Some(event) => {
                let invoked = self.dispatcher.dispatch(&event)?;
                debug!(kind = %event.kind(), invoked, "Webhook handled");
            }
            None => {
                info!(type_name = %data.type_name, "Ignoring unknown webhook type");
            }
        }

        Ok(data)
    }

    /// Extract the signature and algorithm from headers, then [`handle`](Self::handle)
    pub fn handle_from_request<H: HeaderSource + ?Sized>(
        &self,
        headers: &H,
        body: &[u8],
    ) -> Result<WebhookData> {
        let signature = extract_signature(headers)?;
        let algorithm = extract_algorithm(headers);
        self.handle(body, signature, algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WebhookError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use sumsub_core::signature;
    use sumsub_core::WebhookType;

    const SECRET: &str = "test-secret";

    fn signed(body: &[u8]) -> String {
        signature::sign(SECRET.as_bytes(), body)
    }

    #[test]
    fn test_invalid_signature_does_not_dispatch() {
        let handler = WebhookHandler::new(SECRET);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        handler.dispatcher().listen(WebhookType::ApplicantCreated, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let body = br#"{"type":"applicantCreated","applicantId":"a","externalUserId":"u"}"#;
        let err = handler
            .handle(body, &signature::sign(b"wrong", body), DigestAlgorithm::Sha256)
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Invalid webhook signature");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_json() {
        let handler = WebhookHandler::new(SECRET);
        let body = b"{not json";
        let err = handler
            .handle(body, &signed(body), DigestAlgorithm::Sha256)
            .unwrap_err();

        assert!(matches!(err, WebhookError::InvalidPayload(_)));
        assert!(err.to_string().starts_with("Invalid JSON payload: "));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_missing_field() {
        let handler = WebhookHandler::new(SECRET);
        let body = br#"{"type":"applicantCreated","externalUserId":"u"}"#;
        let err = handler
            .handle(body, &signed(body), DigestAlgorithm::Sha256)
            .unwrap_err();

        assert_eq!(err.missing_fields(), ["applicantId".to_string()]);
    }

    #[test]
    fn test_unknown_type_returns_envelope() {
        let handler = WebhookHandler::new(SECRET);
        let body = br#"{"type":"applicantDeleted","applicantId":"a","externalUserId":"u"}"#;
        let data = handler
            .handle(body, &signed(body), DigestAlgorithm::Sha256)
            .unwrap();

        assert_eq!(data.webhook_type(), None);
        assert_eq!(data.type_name, "applicantDeleted");
    }

    #[test]
    fn test_listener_failure_surfaces() {
        let handler =
            WebhookHandler::with_config(SECRET, HandlerConfig::builder().stop_on_error().build());
        handler
            .dispatcher()
            .listen(WebhookType::ApplicantReset, |_| Err("store unavailable".into()));

        let body = br#"{"type":"applicantReset","applicantId":"a","externalUserId":"u"}"#;
        let err = handler
            .handle(body, &signed(body), DigestAlgorithm::Sha256)
            .unwrap_err();

        assert!(matches!(err, WebhookError::Dispatch(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(handler.config().dispatch_policy, DispatchPolicy::StopOnError);

        let data = err.webhook_data().unwrap();
        assert_eq!(data.webhook_type(), Some(WebhookType::ApplicantReset));
        assert_eq!(data.external_user_id, "u");
    }

    #[test]
    fn test_shared_dispatcher_follows_handler_policy() {
        let shared = EventDispatcher::new();
        let calls = Arc::new(AtomicUsize::new(0));

        shared.listen(WebhookType::ApplicantReset, |_| Err("store unavailable".into()));
        let c = calls.clone();
        shared.listen(WebhookType::ApplicantReset, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let handler =
            WebhookHandler::with_config(SECRET, HandlerConfig::builder().stop_on_error().build())
                .with_dispatcher(shared.clone());

        assert_eq!(handler.dispatcher().policy(), DispatchPolicy::StopOnError);
        assert_eq!(handler.dispatcher().policy(), handler.config().dispatch_policy);

        let body = br#"{"type":"applicantReset","applicantId":"a","externalUserId":"u"}"#;
        let err = handler
            .handle(body, &signed(body), DigestAlgorithm::Sha256)
            .unwrap_err();

        assert!(matches!(err, WebhookError::Dispatch(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(shared.policy(), DispatchPolicy::ContinueOnError);
    }

    #[test]
    fn test_shared_dispatcher() {
        let dispatcher = EventDispatcher::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        dispatcher.listen(WebhookType::ApplicantOnHold, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let handler = WebhookHandler::new(SECRET).with_dispatcher(dispatcher);
        let body = br#"{"type":"applicantOnHold","applicantId":"a","externalUserId":"u"}"#;
        handler
            .handle(body, &signed(body), DigestAlgorithm::Sha256)
            .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handle_from_request_sha1() {
        let handler = WebhookHandler::new(SECRET);
        let body = br#"{"type":"applicantPending","applicantId":"a","externalUserId":"u"}"#;
        let sig = signature::sign_with(DigestAlgorithm::Sha1, SECRET.as_bytes(), body);
        let headers = vec![
            ("X-Payload-Digest".to_string(), sig),
            ("X-Payload-Digest-Alg".to_string(), "HMAC_SHA1_HEX".to_string()),
        ];

        let data = handler.handle_from_request(&headers, body).unwrap();
        assert_eq!(data.webhook_type(), Some(WebhookType::ApplicantPending));
    }

    #[test]
    fn test_handle_from_request_missing_header() {
        let handler = WebhookHandler::new(SECRET);
        let headers: Vec<(String, String)> = Vec::new();
        let err = handler.handle_from_request(&headers, b"{}").unwrap_err();
        assert!(matches!(err, WebhookError::MissingSignature));
    }
}
