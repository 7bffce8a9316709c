//! Broadcast session — the ordered, flush-once operation accumulator.
//!
//! One session collects every operation a single walk emits, then hands
//! the whole sequence to the transport as one payload. Flushing consumes
//! the session, so a flushed session cannot be reused or re-flushed; the
//! payload is fully serialized before the transport is touched, so either
//! the complete sequence reaches the transport boundary or none of it
//! does.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::ops::{json::payload_to_json, PatchOp};

/// Delivery failure reported by a transport implementation.
#[derive(Debug, Error, PartialEq)]
#[error("transport delivery failed: {0}")]
pub struct TransportError(pub String);

/// The pub/sub boundary patch payloads are handed to. Delivery guarantees
/// past this boundary are the transport's concern; failures propagate
/// unmasked.
pub trait Transport {
    fn deliver(&mut self, channel: &str, payload: Value) -> Result<(), TransportError>;
}

/// Ordered in-memory accumulator for one broadcast.
#[derive(Debug, Default)]
pub struct Session {
    ops: Vec<PatchOp>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one operation. Order of appends is the order on the wire.
    pub fn append(&mut self, op: PatchOp) {
        self.ops.push(op);
    }

    /// The operations accumulated so far, in emission order.
    pub fn ops(&self) -> &[PatchOp] {
        &self.ops
    }

    /// Serialize and deliver the full sequence as one payload, consuming
    /// the session.
    pub fn flush<T: Transport + ?Sized>(
        self,
        transport: &mut T,
        channel: &str,
    ) -> Result<(), TransportError> {
        let payload = payload_to_json(&self.ops);
        debug!(channel, op_count = self.ops.len(), "flushing broadcast session");
        transport.deliver(channel, payload)
    }
}
