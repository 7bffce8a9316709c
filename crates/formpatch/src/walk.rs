//! The error-tree walker.
//!
//! Recurses over a normalized [`AttributeSpec`], visiting every leaf
//! attribute and every traversed association of the model. Each visit
//! derives the node's selectors and appends the invalid or valid
//! operation triple to the session. The walk is read-only with respect to
//! the model and deterministic: unchanged error state yields a
//! byte-identical operation sequence.

use serde_json::json;
use thiserror::Error;
use tracing::trace;

use formpatch_dom_selector::{
    attribute_selector, base_error_selector, form_selector, SelectorKind,
};

use crate::ancestry::Ancestry;
use crate::attr_spec::{AssociationSpec, AttributeSpec, SpecEntry};
use crate::config::Config;
use crate::model::{dom_id, Association, ErrorCollection, FormModel, BASE};
use crate::ops::{events, PatchOp};
use crate::session::Session;

#[derive(Debug, Error, PartialEq)]
pub enum WalkError {
    #[error("model `{0}` has no error-reporting capability")]
    MissingErrorState(String),
}

/// Walk one model level: base-error pair first, then each spec entry in
/// order. Association entries recurse with the ancestry extended by one
/// hop.
pub fn walk(
    model: &dyn FormModel,
    spec: &AttributeSpec,
    ancestry: &mut Ancestry,
    config: &Config,
    session: &mut Session,
) -> Result<(), WalkError> {
    let errors = model
        .errors()
        .ok_or_else(|| WalkError::MissingErrorState(model.model_name().to_string()))?;
    let form = form_selector(&dom_id(model), &config.labels);
    trace!(
        resource = %ancestry.resource_label(),
        form = %form,
        depth = ancestry.depth(),
        "walking model"
    );

    if config.inject_inline {
        let text = if errors.is_invalid(BASE) {
            errors.base_messages_joined()
        } else {
            String::new()
        };
        session.append(PatchOp::TextContent {
            selector: base_error_selector(&form, &config.labels),
            text,
        });
    }

    for entry in spec.entries() {
        match entry {
            SpecEntry::Plain(attribute) => {
                emit_attribute(&form, attribute, errors, ancestry, config, session);
            }
            SpecEntry::Association { name, spec } => {
                walk_association(model, name, spec, ancestry, config, session)?;
            }
        }
    }
    Ok(())
}

/// Recurse into an association entry. Absent associations and spec shapes
/// that do not match the association's arity are silent no-ops.
fn walk_association(
    model: &dyn FormModel,
    name: &str,
    spec: &AssociationSpec,
    ancestry: &mut Ancestry,
    config: &Config,
    session: &mut Session,
) -> Result<(), WalkError> {
    let Some(association) = model.association(name) else {
        trace!(association = name, "association absent, skipping");
        return Ok(());
    };
    match (association, spec) {
        (Association::Singular(nested), AssociationSpec::Nested(sub)) => {
            ancestry.push(name, None);
            let result = walk(nested, sub, ancestry, config, session);
            ancestry.pop();
            result
        }
        (Association::Collection(members), AssociationSpec::Indexed(indexed)) => {
            // Only indices present in both the live collection and the
            // spec are visited; everything else is skipped without error.
            for (index, member) in members.into_iter().enumerate() {
                let Some(sub) = indexed.get(index.to_string().as_str()) else {
                    continue;
                };
                ancestry.push(name, Some(index));
                let result = walk(member, sub, ancestry, config, session);
                ancestry.pop();
                result?;
            }
            Ok(())
        }
        _ => {
            trace!(
                association = name,
                "spec shape does not match association arity, skipping"
            );
            Ok(())
        }
    }
}

/// Emit exactly one of the invalid/valid operation triples for a leaf
/// attribute. Each operation is gated by its own flag; a disabled flag
/// suppresses only that operation, never the branch.
fn emit_attribute(
    form: &str,
    attribute: &str,
    errors: &ErrorCollection,
    ancestry: &Ancestry,
    config: &Config,
    session: &mut Session,
) {
    let container = attribute_selector(form, attribute, SelectorKind::Container, &config.labels);
    let error = attribute_selector(form, attribute, SelectorKind::ErrorLabel, &config.labels);
    let resource = ancestry.resource_label();

    if errors.is_invalid(attribute) {
        let message = format!(
            "{}{}",
            errors.first_message(attribute).unwrap_or(""),
            config.suffix
        );
        if config.emit_events {
            session.append(PatchOp::DispatchEvent {
                selector: container.clone(),
                name: events::ATTRIBUTE_INVALID.to_string(),
                detail: json!({
                    "resource": resource,
                    "attribute": attribute,
                    "text": message,
                }),
            });
        }
        if config.add_css {
            session.append(PatchOp::AddCssClass {
                selector: container,
                name: config.error_class.clone(),
            });
        }
        if config.inject_inline {
            session.append(PatchOp::TextContent {
                selector: error,
                text: message,
            });
        }
    } else {
        if config.emit_events {
            session.append(PatchOp::DispatchEvent {
                selector: container.clone(),
                name: events::ATTRIBUTE_VALID.to_string(),
                detail: json!({
                    "resource": resource,
                    "attribute": attribute,
                }),
            });
        }
        if config.add_css {
            session.append(PatchOp::RemoveCssClass {
                selector: container,
                name: config.error_class.clone(),
            });
        }
        if config.inject_inline {
            session.append(PatchOp::TextContent {
                selector: error,
                text: String::new(),
            });
        }
    }
}
