//! Patch operations — the atomic UI mutations formpatch emits.
//!
//! Each operation is a tagged record addressing one element by selector.
//! Operations are immutable once created and order-significant within a
//! session; the remote renderer applies them in sequence.

use serde_json::Value;

pub mod json;

/// Names of the custom events emitted when `emit_events` is on.
pub mod events {
    pub const ATTRIBUTE_INVALID: &str = "formpatch:attribute:invalid";
    pub const ATTRIBUTE_VALID: &str = "formpatch:attribute:valid";
    pub const FORM_INVALID: &str = "formpatch:form:invalid";
    pub const FORM_VALID: &str = "formpatch:form:valid";
}

/// One atomic instruction to mutate remote UI state.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchOp {
    /// Add a CSS class marker to the target element.
    AddCssClass { selector: String, name: String },
    /// Remove a CSS class marker from the target element.
    RemoveCssClass { selector: String, name: String },
    /// Replace the target element's text content. Empty text clears it.
    TextContent { selector: String, text: String },
    /// Set a bare attribute (e.g. `disabled`) on the target element.
    SetAttribute { selector: String, name: String },
    /// Remove an attribute from the target element.
    RemoveAttribute { selector: String, name: String },
    /// Dispatch a custom event from the target element.
    /// `detail` is always a JSON object.
    DispatchEvent {
        selector: String,
        name: String,
        detail: Value,
    },
}

impl PatchOp {
    /// The operation's wire name.
    pub fn op_name(&self) -> &'static str {
        match self {
            PatchOp::AddCssClass { .. } => "add_css_class",
            PatchOp::RemoveCssClass { .. } => "remove_css_class",
            PatchOp::TextContent { .. } => "text_content",
            PatchOp::SetAttribute { .. } => "set_attribute",
            PatchOp::RemoveAttribute { .. } => "remove_attribute",
            PatchOp::DispatchEvent { .. } => "dispatch_event",
        }
    }

    /// The selector this operation targets.
    pub fn selector(&self) -> &str {
        match self {
            PatchOp::AddCssClass { selector, .. }
            | PatchOp::RemoveCssClass { selector, .. }
            | PatchOp::TextContent { selector, .. }
            | PatchOp::SetAttribute { selector, .. }
            | PatchOp::RemoveAttribute { selector, .. }
            | PatchOp::DispatchEvent { selector, .. } => selector,
        }
    }
}
