//! Shared fixture models and a recording transport.
//!
//! `Post` nests `LineItem` through the indexed `items` association and
//! `Author` through the singular `author` association. Validation rules
//! are deliberately simple: blank strings are invalid, and a `locked`
//! post carries a base error.

use serde_json::Value;

use formpatch::{Association, ErrorCollection, FormModel, Transport, TransportError, BASE};

#[derive(Default)]
pub struct Author {
    pub email: String,
    pub key: Option<String>,
    pub errors: ErrorCollection,
}

impl Author {
    fn run_validations(&mut self) {
        self.errors.clear();
        if self.email.is_empty() {
            self.errors.add("email", "can't be blank");
        }
    }
}

impl FormModel for Author {
    fn model_name(&self) -> &str {
        "author"
    }
    fn record_key(&self) -> Option<String> {
        self.key.clone()
    }
    fn errors(&self) -> Option<&ErrorCollection> {
        Some(&self.errors)
    }
}

#[derive(Default)]
pub struct LineItem {
    pub price: String,
    pub key: Option<String>,
    pub errors: ErrorCollection,
}

impl LineItem {
    pub fn priced(price: &str, key: &str) -> Self {
        Self {
            price: price.to_string(),
            key: Some(key.to_string()),
            errors: ErrorCollection::new(),
        }
    }

    fn run_validations(&mut self) {
        self.errors.clear();
        if self.price.is_empty() {
            self.errors.add("price", "can't be blank");
        }
    }
}

impl FormModel for LineItem {
    fn model_name(&self) -> &str {
        "item"
    }
    fn record_key(&self) -> Option<String> {
        self.key.clone()
    }
    fn errors(&self) -> Option<&ErrorCollection> {
        Some(&self.errors)
    }
}

#[derive(Default)]
pub struct Post {
    pub name: String,
    pub body: String,
    pub locked: bool,
    pub key: Option<String>,
    pub items: Vec<LineItem>,
    pub author: Option<Author>,
    pub errors: ErrorCollection,
    pub validate_calls: u32,
}

impl Post {
    pub fn saved(key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::default()
        }
    }
}

impl FormModel for Post {
    fn model_name(&self) -> &str {
        "post"
    }

    fn record_key(&self) -> Option<String> {
        self.key.clone()
    }

    fn errors(&self) -> Option<&ErrorCollection> {
        Some(&self.errors)
    }

    fn validate(&mut self) {
        self.validate_calls += 1;
        self.errors.clear();
        if self.name.is_empty() {
            self.errors.add("name", "can't be blank");
        }
        if self.locked {
            self.errors.add(BASE, "is locked");
        }
        for item in &mut self.items {
            item.run_validations();
        }
        if self.items.iter().any(|item| !item.errors.is_empty()) {
            self.errors.add("items", "is invalid");
        }
        if let Some(author) = &mut self.author {
            author.run_validations();
            if !author.errors.is_empty() {
                self.errors.add("author", "is invalid");
            }
        }
    }

    fn association(&self, name: &str) -> Option<Association<'_>> {
        match name {
            "items" => Some(Association::Collection(
                self.items.iter().map(|item| item as &dyn FormModel).collect(),
            )),
            "author" => self
                .author
                .as_ref()
                .map(|author| Association::Singular(author as &dyn FormModel)),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct RecordingTransport {
    pub deliveries: Vec<(String, Value)>,
    pub fail: bool,
}

impl Transport for RecordingTransport {
    fn deliver(&mut self, channel: &str, payload: Value) -> Result<(), TransportError> {
        if self.fail {
            return Err(TransportError("channel closed".to_string()));
        }
        self.deliveries.push((channel.to_string(), payload));
        Ok(())
    }
}

/// The ops of the only delivery, as JSON records.
pub fn sole_payload(transport: &RecordingTransport) -> Vec<Value> {
    assert_eq!(transport.deliveries.len(), 1, "expected exactly one delivery");
    transport.deliveries[0].1.as_array().expect("payload is an array").clone()
}

pub fn ops_named<'a>(ops: &'a [Value], name: &str) -> Vec<&'a Value> {
    ops.iter().filter(|op| op["op"] == name).collect()
}
