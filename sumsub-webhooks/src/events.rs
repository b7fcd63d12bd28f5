//! Typed webhook events
//!
//! Each known [`WebhookType`] maps to exactly one event struct. The structs
//! wrap the parsed [`WebhookData`] and are collected in the [`WebhookEvent`]
//! sum type, which is what listeners receive.

use crate::payload::WebhookData;
use std::fmt::Debug;
use sumsub_core::WebhookType;

/// Event trait
///
/// Implemented by every typed webhook event.
pub trait Event: Send + Sync + Debug + 'static {
    /// Notification kind this event was built from
    fn kind(&self) -> WebhookType;

    /// The envelope the event wraps
    fn webhook(&self) -> &WebhookData;

    /// Get event name (the wire value of the kind)
    fn event_name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn applicant_id(&self) -> &str {
        &self.webhook().applicant_id
    }

    fn external_user_id(&self) -> &str {
        &self.webhook().external_user_id
    }
}

/// An event struct bound to one statically known kind.
///
/// Used by [`EventDispatcher::on`](crate::EventDispatcher::on) to register
/// listeners that receive the concrete type.
pub trait KindedEvent: Event + Sized {
    const KIND: WebhookType;

    /// Borrow the concrete event out of the sum type when the kinds match
    fn from_event(event: &WebhookEvent) -> Option<&Self>;
}

macro_rules! webhook_events {
    ($( $(#[$meta:meta])* $name:ident ),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq)]
            pub struct $name {
                webhook: WebhookData,
            }

            impl $name {
                pub fn new(webhook: WebhookData) -> Self {
                    Self { webhook }
                }

                pub fn into_webhook(self) -> WebhookData {
                    self.webhook
                }
            }

            impl Event for $name {
                fn kind(&self) -> WebhookType {
                    WebhookType::$name
                }

                fn webhook(&self) -> &WebhookData {
                    &self.webhook
                }
            }

            impl KindedEvent for $name {
                const KIND: WebhookType = WebhookType::$name;

                fn from_event(event: &WebhookEvent) -> Option<&Self> {
                    match event {
                        WebhookEvent::$name(e) => Some(e),
                        _ => None,
                    }
                }
            }

            impl From<$name> for WebhookEvent {
                fn from(event: $name) -> Self {
                    WebhookEvent::$name(event)
                }
            }
        )+

        /// A typed webhook event, one variant per known kind
        #[derive(Debug, Clone, PartialEq)]
        pub enum WebhookEvent {
            $( $name($name), )+
        }

        impl WebhookEvent {
            /// Build the event matching the envelope's kind.
            ///
            /// Returns `None` when the wire type is not a known kind.
            pub fn from_webhook(webhook: WebhookData) -> Option<Self> {
                match webhook.webhook_type()? {
                    $( WebhookType::$name => Some(Self::$name($name::new(webhook))), )+
                }
            }

            /// View the event through the object-safe trait
            pub fn as_event(&self) -> &dyn Event {
                match self {
                    $( Self::$name(e) => e, )+
                }
            }
        }
    };
}

webhook_events! {
    /// An applicant was created
    ApplicantCreated,
    /// Documents were submitted and await review
    ApplicantPending,
    /// A review finished with a final answer
    ApplicantReviewed,
    /// The review was put on hold
    ApplicantOnHold,
    ApplicantPersonalInfoChanged,
    /// The applicant was reset for a new attempt
    ApplicantReset,
    ApplicantActionPending,
    ApplicantActionReviewed,
    ApplicantActionOnHold,
    /// The verification workflow ran to completion
    ApplicantWorkflowCompleted,
    VideoIdentStatusChanged,
}

impl WebhookEvent {
    pub fn kind(&self) -> WebhookType {
        self.as_event().kind()
    }

    pub fn webhook(&self) -> &WebhookData {
        self.as_event().webhook()
    }

    pub fn applicant_id(&self) -> &str {
        self.as_event().applicant_id()
    }

    pub fn external_user_id(&self) -> &str {
        self.as_event().external_user_id()
    }

    /// Borrow the concrete event type, if this is that kind
    pub fn downcast_ref<E: KindedEvent>(&self) -> Option<&E> {
        E::from_event(self)
    }
}

impl ApplicantReviewed {
    /// Review answer was GREEN
    pub fn is_approved(&self) -> bool {
        self.webhook.is_approved()
    }

    /// Review answer was RED
    pub fn is_rejected(&self) -> bool {
        self.webhook.is_rejected()
    }

    /// Review answer was YELLOW
    pub fn requires_review(&self) -> bool {
        self.webhook.requires_review()
    }
}

impl ApplicantActionReviewed {
    pub fn is_approved(&self) -> bool {
        self.webhook.is_approved()
    }

    pub fn is_rejected(&self) -> bool {
        self.webhook.is_rejected()
    }
}
