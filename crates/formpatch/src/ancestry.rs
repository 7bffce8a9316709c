//! Ancestry — the association path from the root model to the current node.
//!
//! Ancestry only feeds the flattened resource label carried in event
//! payloads. It deliberately does not feed selector derivation, which keys
//! off the immediate model's identity alone (a known collision gap kept for
//! renderer compatibility).

/// One association hop. `index` is present only when the hop passed
/// through an indexed collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub name: String,
    pub index: Option<usize>,
}

/// Root resource name plus the ordered hops taken so far. Grows and
/// shrinks around each recursion level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestry {
    root: String,
    hops: Vec<Hop>,
}

impl Ancestry {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            hops: Vec::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn depth(&self) -> usize {
        self.hops.len()
    }

    pub fn push(&mut self, name: &str, index: Option<usize>) {
        self.hops.push(Hop {
            name: name.to_string(),
            index,
        });
    }

    pub fn pop(&mut self) {
        self.hops.pop();
    }

    /// The flattened resource label used in event details:
    /// root, then `_<name>_attributes` per hop, then `_<index>` for
    /// indexed hops. E.g. `post_items_attributes_0`.
    pub fn resource_label(&self) -> String {
        let mut label = self.root.clone();
        for hop in &self.hops {
            label.push('_');
            label.push_str(&hop.name);
            label.push_str("_attributes");
            if let Some(index) = hop.index {
                label.push('_');
                label.push_str(&index.to_string());
            }
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_label_is_just_the_resource() {
        assert_eq!(Ancestry::new("post").resource_label(), "post");
    }

    #[test]
    fn singular_hop_adds_the_attributes_suffix() {
        let mut ancestry = Ancestry::new("post");
        ancestry.push("author", None);
        assert_eq!(ancestry.resource_label(), "post_author_attributes");
    }

    #[test]
    fn indexed_hops_append_their_index() {
        let mut ancestry = Ancestry::new("post");
        ancestry.push("items", Some(0));
        assert_eq!(ancestry.resource_label(), "post_items_attributes_0");

        ancestry.push("taxes", Some(2));
        assert_eq!(
            ancestry.resource_label(),
            "post_items_attributes_0_taxes_attributes_2"
        );
    }

    #[test]
    fn pop_restores_the_previous_label() {
        let mut ancestry = Ancestry::new("post");
        ancestry.push("items", Some(1));
        ancestry.pop();
        assert_eq!(ancestry.resource_label(), "post");
        assert_eq!(ancestry.depth(), 0);
    }
}
