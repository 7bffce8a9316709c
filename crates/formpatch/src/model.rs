//! The consumed model contract: identity, error state, associations.
//!
//! formpatch never owns or mutates model data. It reads identity parts to
//! derive selectors, reads the error collection to pick the invalid/valid
//! branch per attribute, and resolves associations to recurse into nested
//! models. Validation is triggered at most once, on the root model, by the
//! broadcast entry point.

use indexmap::IndexMap;

use formpatch_dom_selector::dom_identity;

/// The pseudo attribute path for whole-model errors.
pub const BASE: &str = "base";

/// Ordered mapping from attribute path to human-readable messages.
///
/// An attribute with at least one message is invalid; an attribute absent
/// from the collection (or with an empty message list) is valid. Only the
/// first message per attribute is surfaced to the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorCollection {
    entries: IndexMap<String, Vec<String>>,
}

impl ErrorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against an attribute path (or [`BASE`]).
    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.entries
            .entry(attribute.into())
            .or_default()
            .push(message.into());
    }

    /// Drop every recorded message, e.g. before re-validating.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True when no attribute has any message.
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|msgs| msgs.is_empty())
    }

    /// True when `attribute` has at least one message.
    pub fn is_invalid(&self, attribute: &str) -> bool {
        self.entries
            .get(attribute)
            .is_some_and(|msgs| !msgs.is_empty())
    }

    /// All messages for `attribute`, in insertion order.
    pub fn messages(&self, attribute: &str) -> &[String] {
        self.entries.get(attribute).map_or(&[], Vec::as_slice)
    }

    /// The first message for `attribute`, the only one surfaced inline.
    pub fn first_message(&self, attribute: &str) -> Option<&str> {
        self.messages(attribute).first().map(String::as_str)
    }

    /// The whole-model messages joined with `", "`, empty when none.
    pub fn base_messages_joined(&self) -> String {
        self.messages(BASE).join(", ")
    }
}

/// A resolved association value, tagged by arity.
///
/// The walker dispatches on this tag; it never probes a value for
/// iteration capability.
pub enum Association<'a> {
    /// A one-to-one association: a single nested model.
    Singular(&'a dyn FormModel),
    /// A one-to-many association: nested models in collection order.
    Collection(Vec<&'a dyn FormModel>),
}

/// A data entity formpatch can broadcast errors for.
pub trait FormModel {
    /// The resource name used in dom identities and event payloads,
    /// e.g. `"post"`.
    fn model_name(&self) -> &str;

    /// The primary key when persisted; `None` for an unsaved record.
    fn record_key(&self) -> Option<String>;

    /// The model's error collection, or `None` when the model carries no
    /// error-reporting capability at all (rejected up front with
    /// [`MissingErrorState`](crate::BroadcastError::MissingErrorState)).
    fn errors(&self) -> Option<&ErrorCollection>;

    /// Populate the error collection, including those of nested models.
    /// Called once by the entry point when the collection is empty;
    /// callers that validated beforehand are never re-validated.
    fn validate(&mut self) {}

    /// Resolve an association by name. `None` when the association does
    /// not exist or is currently unset.
    fn association(&self, name: &str) -> Option<Association<'_>> {
        let _ = name;
        None
    }
}

/// The dom identity of a model: `<name>_<key>`, or `new_<name>` when
/// unsaved.
pub fn dom_id(model: &dyn FormModel) -> String {
    dom_identity(model.model_name(), model.record_key().as_deref())
}
