//! formpatch — server-driven inline validation for remote UIs.
//!
//! Given a just-validated model (possibly nesting sub-models through
//! associations), formpatch walks a declarative attribute spec, derives a
//! deterministic selector for every visited node, and emits the exact set
//! of idempotent patch operations needed to bring a remote form in sync
//! with the model's validity: error classes, inline messages, form state,
//! submit control. The ordered operation sequence is flushed as a single
//! broadcast over a caller-supplied transport.
//!
//! The core pipeline:
//!
//! 1. [`attr_spec`] normalizes caller input into a canonical [`AttributeSpec`].
//! 2. [`walk`] recurses over the spec, consulting the model's
//!    [`ErrorCollection`] and appending [`PatchOp`]s to a [`Session`].
//! 3. [`Session::flush`] serializes the whole sequence and hands it to the
//!    [`Transport`] in one call.
//!
//! Validation itself, transport delivery, and the initial markup are
//! external collaborators; this crate only speaks their interfaces.

pub mod ancestry;
pub mod attr_spec;
pub mod broadcast;
pub mod config;
pub mod model;
pub mod ops;
pub mod session;
pub mod walk;

pub use ancestry::Ancestry;
pub use attr_spec::{AssociationSpec, AttributeSpec, SpecEntry, SpecError, SpecInput};
pub use broadcast::{broadcast_errors, BroadcastError, Broadcaster};
pub use config::{ChannelResolver, Config};
pub use model::{Association, ErrorCollection, FormModel, BASE};
pub use ops::{events, json::payload_to_json, PatchOp};
pub use session::{Session, Transport, TransportError};
pub use walk::{walk, WalkError};

pub use formpatch_dom_selector::{SelectorKind, SelectorLabels};
