use super::domain::{CanonicalAttribute, MatchTier};
use serde::Serialize;
use std::sync::Mutex;

/// Diagnostic emitted while resolving a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PrefillEvent {
    ProfileMissing {
        field_count: usize,
    },
    Prefilled {
        field_id: String,
        normalized_id: String,
        attribute: CanonicalAttribute,
        tier: MatchTier,
        #[serde(skip_serializing_if = "Option::is_none")]
        option_match: Option<bool>,
    },
    AttributeEmpty {
        field_id: String,
        attribute: CanonicalAttribute,
        tier: MatchTier,
    },
    Unrecognized {
        field_id: String,
        normalized_id: String,
    },
    CustomFieldSkipped {
        field_id: String,
    },
    Completed {
        prefilled: usize,
        total: usize,
    },
}

/// Sink for resolver diagnostics; the resolver never logs on its own.
pub trait PrefillObserver: Send + Sync {
    fn observe(&self, event: &PrefillEvent);
}

/// Forwards events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PrefillObserver for TracingObserver {
    fn observe(&self, event: &PrefillEvent) {
        match event {
            PrefillEvent::ProfileMissing { field_count } => {
                tracing::debug!(field_count, "no citizen profile; using type defaults");
            }
            PrefillEvent::Prefilled {
                field_id,
                normalized_id,
                attribute,
                tier,
                option_match,
            } => {
                tracing::debug!(
                    %field_id,
                    %normalized_id,
                    %attribute,
                    tier = tier.label(),
                    ?option_match,
                    "field prefilled"
                );
            }
            PrefillEvent::AttributeEmpty {
                field_id,
                attribute,
                tier,
            } => {
                tracing::debug!(%field_id, %attribute, tier = tier.label(), "profile value empty");
            }
            PrefillEvent::Unrecognized {
                field_id,
                normalized_id,
            } => {
                tracing::debug!(%field_id, %normalized_id, "field id not recognized");
            }
            PrefillEvent::CustomFieldSkipped { field_id } => {
                tracing::debug!(%field_id, "service-specific field left empty");
            }
            PrefillEvent::Completed { prefilled, total } => {
                tracing::debug!(prefilled, total, "prefill finished");
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PrefillObserver for NoopObserver {
    fn observe(&self, _event: &PrefillEvent) {}
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<PrefillEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<PrefillEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl PrefillObserver for RecordingObserver {
    fn observe(&self, event: &PrefillEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
