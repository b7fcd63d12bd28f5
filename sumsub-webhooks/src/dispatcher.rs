//! Observer registry for webhook events

use crate::error::{DispatchError, ListenerError};
use crate::events::{KindedEvent, WebhookEvent};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use sumsub_core::WebhookType;
use tracing::{debug, error, info};

/// A registered callback
pub type Listener = Arc<dyn Fn(&WebhookEvent) -> Result<(), ListenerError> + Send + Sync>;

/// What happens when a listener returns an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchPolicy {
    /// Run every listener, then report all failures together
    #[default]
    ContinueOnError,
    /// Stop at the first failing listener
    StopOnError,
}

/// Registry of listeners keyed by webhook kind.
///
/// Listeners for a kind run in registration order. Cloning the dispatcher
/// shares the registry.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    listeners: Arc<DashMap<WebhookType, Vec<Listener>>>,
    policy: DispatchPolicy,
}

impl EventDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with a custom failure policy
    pub fn with_policy(policy: DispatchPolicy) -> Self {
        Self {
            listeners: Arc::default(),
            policy,
        }
    }

    pub fn policy(&self) -> DispatchPolicy {
        self.policy
    }

    /// Change the failure policy of this handle. Clones sharing the
    /// registry keep their own policy.
    pub fn set_policy(&mut self, policy: DispatchPolicy) {
        self.policy = policy;
    }

    /// Append a listener for a kind. The same callback may be added twice.
    ///
    /// # Examples
    ///
    /// ```
    /// use sumsub_core::WebhookType;
    /// use sumsub_webhooks::EventDispatcher;
    ///
    /// let dispatcher = EventDispatcher::new();
    /// dispatcher.listen(WebhookType::ApplicantCreated, |event| {
    ///     println!("created {}", event.applicant_id());
    ///     Ok(())
    /// });
    /// assert!(dispatcher.has_listeners(WebhookType::ApplicantCreated));
    /// ```
    pub fn listen<F>(&self, kind: WebhookType, listener: F)
    where
        F: Fn(&WebhookEvent) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Arc::new(listener));

        debug!(kind = %kind, "Registered webhook listener");
    }

    /// Register a listener that receives the concrete event type
    ///
    /// # Examples
    ///
    /// ```
    /// use sumsub_webhooks::{ApplicantReviewed, Event, EventDispatcher};
    ///
    /// let dispatcher = EventDispatcher::new();
    /// dispatcher.on::<ApplicantReviewed, _>(|event| {
    ///     if event.is_approved() {
    ///         println!("approved {}", event.external_user_id());
    ///     }
    ///     Ok(())
    /// });
    /// ```
    pub fn on<E, F>(&self, listener: F)
    where
        E: KindedEvent,
        F: Fn(&E) -> Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.listen(E::KIND, move |event| match E::from_event(event) {
            Some(typed) => listener(typed),
            None => Ok(()),
        });
    }

    /// Invoke every listener registered for the event's kind.
    ///
    /// Returns the number of listeners that ran. The listener list is
    /// snapshotted first, so a listener may register further listeners;
    /// those only see later events.
    pub fn dispatch(&self, event: &WebhookEvent) -> Result<usize, DispatchError> {
        let kind = event.kind();

        let listeners = match self.listeners.get(&kind) {
            Some(listeners) => listeners.clone(),
            None => {
                debug!(kind = %kind, "No listeners registered");
                return Ok(0);
            }
        };

        info!(
            kind = %kind,
            applicant_id = %event.applicant_id(),
            listeners = listeners.len(),
            "Dispatching webhook event"
        );

        let mut failures = Vec::new();
        let mut invoked = 0;

        for listener in listeners.iter() {
            invoked += 1;
            if let Err(e) = listener(event) {
                error!(kind = %kind, error = %e, "Webhook listener failed");
                failures.push(e);
                if self.policy == DispatchPolicy::StopOnError {
                    break;
                }
            }
        }

        if failures.is_empty() {
            Ok(invoked)
        } else {
            Err(DispatchError {
                kind,
                failures,
                webhook: Box::new(event.webhook().clone()),
            })
        }
    }

    /// Remove every listener for a kind
    pub fn forget(&self, kind: WebhookType) {
        if self.listeners.remove(&kind).is_some() {
            debug!(kind = %kind, "Removed webhook listeners");
        }
    }

    /// Remove all listeners
    pub fn forget_all(&self) {
        self.listeners.clear();
    }

    pub fn has_listeners(&self, kind: WebhookType) -> bool {
        self.listener_count(kind) > 0
    }

    /// Snapshot of the listeners for a kind, in registration order
    pub fn get_listeners(&self, kind: WebhookType) -> Vec<Listener> {
        self.listeners
            .get(&kind)
            .map(|l| l.clone())
            .unwrap_or_default()
    }

    pub fn listener_count(&self, kind: WebhookType) -> usize {
        self.listeners.get(&kind).map(|l| l.len()).unwrap_or(0)
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut counts: Vec<(WebhookType, usize)> = self
            .listeners
            .iter()
            .map(|entry| (*entry.key(), entry.value().len()))
            .collect();
        counts.sort();

        f.debug_struct("EventDispatcher")
            .field("listeners", &counts)
            .field("policy", &self.policy)
            .finish()
    }
}
