//! Deterministic DOM selector derivation.
//!
//! Every element formpatch patches is addressed by a stable string id
//! derived purely from (model identity, selector kind, attribute name) and
//! a fixed [`SelectorLabels`] table. The rendering side must produce
//! elements with exactly these ids; linking this crate on both sides keeps
//! the two formulas identical by construction.
//!
//! # Example
//!
//! ```
//! use formpatch_dom_selector::{dom_identity, form_selector, attribute_selector, SelectorKind, SelectorLabels};
//!
//! let labels = SelectorLabels::default();
//! let id = dom_identity("post", Some("5"));
//! assert_eq!(id, "post_5");
//!
//! let form = form_selector(&id, &labels);
//! assert_eq!(form, "post_5_form");
//!
//! let container = attribute_selector(&form, "name", SelectorKind::Container, &labels);
//! assert_eq!(container, "post_5_form_name_container");
//! ```

use serde::Deserialize;

/// The label fragments appended when deriving selectors.
///
/// Labels are configuration constants, fixed for the lifetime of a config
/// value. Changing any label changes every selector produced from it, so
/// the rendering side must be built from the same table.
///
/// The `submit` label defaults to the same string as `form`: by default the
/// submit control and the form-class toggle address the same element. The
/// two are independently configurable for renderers that separate them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SelectorLabels {
    pub form: String,
    pub container: String,
    pub error: String,
    pub submit: String,
    pub base_error: String,
}

impl Default for SelectorLabels {
    fn default() -> Self {
        Self {
            form: "form".to_string(),
            container: "container".to_string(),
            error: "error".to_string(),
            submit: "form".to_string(),
            base_error: "base_error".to_string(),
        }
    }
}

/// Which element of a form a selector addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    /// The wrapper element around one attribute's input.
    Container,
    /// The inline message span for one attribute.
    ErrorLabel,
}

/// Derive the dom identity of a model from its name and primary key.
///
/// A persisted record yields `<name>_<key>`; an unsaved one falls back to
/// `new_<name>`.
///
/// # Example
///
/// ```
/// use formpatch_dom_selector::dom_identity;
///
/// assert_eq!(dom_identity("post", Some("5")), "post_5");
/// assert_eq!(dom_identity("post", None), "new_post");
/// ```
pub fn dom_identity(model_name: &str, record_key: Option<&str>) -> String {
    match record_key {
        Some(key) => format!("{model_name}_{key}"),
        None => format!("new_{model_name}"),
    }
}

/// Derive the root form selector: `<dom-identity>_<form-label>`.
pub fn form_selector(dom_identity: &str, labels: &SelectorLabels) -> String {
    format!("{dom_identity}_{}", labels.form)
}

/// Derive the submit-control selector: `<dom-identity>_<submit-label>`.
///
/// With default labels this coincides with [`form_selector`].
pub fn submit_selector(dom_identity: &str, labels: &SelectorLabels) -> String {
    format!("{dom_identity}_{}", labels.submit)
}

/// Derive a per-attribute selector: `<form-selector>_<attribute>_<label>`.
///
/// # Example
///
/// ```
/// use formpatch_dom_selector::{attribute_selector, SelectorKind, SelectorLabels};
///
/// let labels = SelectorLabels::default();
/// assert_eq!(
///     attribute_selector("post_5_form", "name", SelectorKind::ErrorLabel, &labels),
///     "post_5_form_name_error",
/// );
/// ```
pub fn attribute_selector(
    form_selector: &str,
    attribute: &str,
    kind: SelectorKind,
    labels: &SelectorLabels,
) -> String {
    let label = match kind {
        SelectorKind::Container => &labels.container,
        SelectorKind::ErrorLabel => &labels.error,
    };
    format!("{form_selector}_{attribute}_{label}")
}

/// Derive the base (model-level) error selector:
/// `<form-selector>_<base-error-label>`.
pub fn base_error_selector(form_selector: &str, labels: &SelectorLabels) -> String {
    format!("{form_selector}_{}", labels.base_error)
}
