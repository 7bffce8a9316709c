//! The broadcast entry point.
//!
//! Orchestrates one broadcast: capability check, one-shot validation
//! trigger, spec normalization, the recursive walk, the top-level
//! form-state operations, and the final flush. Everything before the
//! flush is pure in-memory computation; a failure anywhere leaves the
//! transport untouched.

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use formpatch_dom_selector::{form_selector, submit_selector};

use crate::ancestry::Ancestry;
use crate::attr_spec::{SpecError, SpecInput};
use crate::config::Config;
use crate::model::{dom_id, FormModel};
use crate::ops::{events, PatchOp};
use crate::session::{Session, Transport, TransportError};
use crate::walk::{walk, WalkError};

#[derive(Debug, Error, PartialEq)]
pub enum BroadcastError {
    #[error(transparent)]
    Spec(#[from] SpecError),
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Owns a config and a transport; the long-lived handle request handlers
/// call into.
#[derive(Debug)]
pub struct Broadcaster<T: Transport> {
    config: Config,
    transport: T,
}

impl<T: Transport> Broadcaster<T> {
    pub fn new(config: Config, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// See [`broadcast_errors`].
    pub fn broadcast_errors(
        &mut self,
        model: &mut dyn FormModel,
        input: impl Into<SpecInput>,
    ) -> Result<(), BroadcastError> {
        broadcast_errors(model, input, &self.config, &mut self.transport)
    }
}

/// Broadcast the model's current validity as one atomic patch sequence.
///
/// Validation is triggered at most once, only when the error collection is
/// empty; callers that already validated are never re-validated (after
/// mutating a model, re-validate before calling again). The emitted
/// sequence is a pure function of (model errors, spec, config), so
/// repeating a call with unchanged error state broadcasts an identical
/// payload.
pub fn broadcast_errors(
    model: &mut dyn FormModel,
    input: impl Into<SpecInput>,
    config: &Config,
    transport: &mut dyn Transport,
) -> Result<(), BroadcastError> {
    let resource = model.model_name().to_string();
    let needs_validation = model
        .errors()
        .ok_or_else(|| WalkError::MissingErrorState(resource.clone()))?
        .is_empty();
    if needs_validation {
        model.validate();
    }

    let spec = input.into().normalize()?;
    let mut ancestry = Ancestry::new(&resource);
    let mut session = Session::new();
    walk(&*model, &spec, &mut ancestry, config, &mut session)?;

    let invalid = model
        .errors()
        .is_some_and(|errors| !errors.is_empty());
    append_form_state(&mut session, model, &resource, invalid, config);
    debug!(
        resource = %resource,
        invalid,
        op_count = session.ops().len(),
        "broadcasting validation state"
    );

    let channel = (config.channel)(&resource);
    session.flush(transport, &channel)?;
    Ok(())
}

/// The once-per-broadcast form-state operations, appended after the walk:
/// form-level event, form-class toggle, submit-control toggle.
fn append_form_state(
    session: &mut Session,
    model: &dyn FormModel,
    resource: &str,
    invalid: bool,
    config: &Config,
) {
    let id = dom_id(model);
    let form = form_selector(&id, &config.labels);
    let submit = submit_selector(&id, &config.labels);

    if invalid {
        if config.emit_events {
            session.append(PatchOp::DispatchEvent {
                selector: form.clone(),
                name: events::FORM_INVALID.to_string(),
                detail: json!({ "resource": resource }),
            });
        }
        if !config.form_class.is_empty() {
            session.append(PatchOp::AddCssClass {
                selector: form,
                name: config.form_class.clone(),
            });
        }
        if config.disable_submit {
            session.append(PatchOp::SetAttribute {
                selector: submit,
                name: "disabled".to_string(),
            });
        }
    } else {
        if config.emit_events {
            session.append(PatchOp::DispatchEvent {
                selector: form.clone(),
                name: events::FORM_VALID.to_string(),
                detail: json!({ "resource": resource }),
            });
        }
        if !config.form_class.is_empty() {
            session.append(PatchOp::RemoveCssClass {
                selector: form,
                name: config.form_class.clone(),
            });
        }
        if config.disable_submit {
            session.append(PatchOp::RemoveAttribute {
                selector: submit,
                name: "disabled".to_string(),
            });
        }
    }
}
