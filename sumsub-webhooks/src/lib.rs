//! Webhook handling for Sumsub notifications
//!
//! Verifies the `x-payload-digest` signature over the raw request body,
//! parses the notification and dispatches a typed event to the listeners
//! registered for its kind.
//!
//! # Features
//!
//! - **Signature Verification**: HMAC-SHA1/SHA256/SHA512, constant time
//! - **Typed Events**: one struct per notification kind
//! - **Observer Registry**: ordered listeners per kind, with a failure policy
//! - **Header Sources**: `http::HeaderMap`, hash maps and lists of pairs
//!
//! # Example: Receiving Webhooks
//!
//! ```rust
//! use std::collections::HashMap;
//! use sumsub_core::WebhookType;
//! use sumsub_webhooks::{ApplicantReviewed, Event, WebhookHandler};
//!
//! let handler = WebhookHandler::new("webhook-secret");
//!
//! handler.dispatcher().on::<ApplicantReviewed, _>(|event| {
//!     if event.is_approved() {
//!         println!("{} passed verification", event.external_user_id());
//!     }
//!     Ok(())
//! });
//! handler.dispatcher().listen(WebhookType::ApplicantCreated, |event| {
//!     println!("new applicant {}", event.applicant_id());
//!     Ok(())
//! });
//!
//! let body = br#"{"type":"applicantCreated","applicantId":"a1","externalUserId":"u1"}"#;
//! let mut headers = HashMap::new();
//! headers.insert(
//!     "X-Payload-Digest".to_string(),
//!     sumsub_core::signature::sign(b"webhook-secret", body),
//! );
//!
//! match handler.handle_from_request(&headers, body) {
//!     Ok(data) => println!("handled {}", data.type_name),
//!     Err(e) => eprintln!("rejected with {}: {}", e.status_code(), e),
//! }
//! ```

mod dispatcher;
mod error;
mod events;
mod handler;
mod payload;
mod verifier;

pub use dispatcher::{DispatchPolicy, EventDispatcher, Listener};
pub use error::{DispatchError, ListenerError, Result, ValidationError, WebhookError};
pub use events::{
    ApplicantActionOnHold, ApplicantActionPending, ApplicantActionReviewed, ApplicantCreated,
    ApplicantOnHold, ApplicantPending, ApplicantPersonalInfoChanged, ApplicantReset,
    ApplicantReviewed, ApplicantWorkflowCompleted, Event, KindedEvent, VideoIdentStatusChanged,
    WebhookEvent,
};
pub use handler::{HandlerConfig, HandlerConfigBuilder, WebhookHandler};
pub use payload::WebhookData;
pub use verifier::{
    extract_algorithm, extract_signature, HeaderSource, WebhookValidator, REQUIRED_FIELDS,
};
