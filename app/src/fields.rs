//! Per-field validation messages shared by the form reducers.

use std::collections::BTreeMap;

/// Validation messages keyed by form field
///
/// Iteration follows the field enum's declaration order, which is the order
/// fields appear on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    messages: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            messages: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    /// No errors
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing any previous one
    pub fn set(&mut self, field: F, message: impl Into<String>) {
        self.messages.insert(field, message.into());
    }

    /// Forget the message for `field`
    pub fn clear(&mut self, field: F) {
        self.messages.remove(&field);
    }

    /// Message for `field`, if any
    #[must_use]
    pub fn get(&self, field: F) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    /// Whether `field` has a message
    #[must_use]
    pub fn contains(&self, field: F) -> bool {
        self.messages.contains_key(&field)
    }

    /// Whether the form is free of errors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of fields with errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Fields and messages in screen order
    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.messages.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}
