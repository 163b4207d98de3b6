//! Usage notification seam
//!
//! The orchestrator publishes a single fire-and-forget event per completion
//! call: "this model was used". Consumers (recency lists, telemetry) hook in
//! through an injected [`UsageNotifier`] rather than a global event bus.

use crate::core_types::model::ModelDescriptor;
use crate::logging::log_trace;

/// Receiver for model-usage notifications.
///
/// `model_used` is invoked exactly once per `stream_chat_completion` call,
/// after the availability check passes and before the network request is
/// issued, regardless of whether the call itself later succeeds. There is no
/// acknowledgment; implementations must not block.
pub trait UsageNotifier: Send + Sync {
    fn model_used(&self, model: &ModelDescriptor);
}

/// Default notifier that records usage only in trace logs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopUsageNotifier;

impl UsageNotifier for NoopUsageNotifier {
    fn model_used(&self, model: &ModelDescriptor) {
        log_trace!(model_uid = %model.uid(), "Model usage notification dropped (noop notifier)");
    }
}
