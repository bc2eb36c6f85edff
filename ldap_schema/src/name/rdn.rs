use crate::{
    data::NormalizedValue,
    schema::{AttributeType, Schema},
};

use super::{split_once_unescaped, trim_unescaped};

/// A relative distinguished name: a single `attribute=value` pair.
///
/// The attribute name is resolved against the schema at parse time. An RDN
/// with an unknown attribute still renders, but never matches anything.
#[derive(Clone, Debug)]
pub struct Rdn<'a> {
    attr: Option<AttributeType<'a>>,
    attr_name: String,
    value: String,
}

impl<'a> Rdn<'a> {
    /// Parse `attribute=value`, splitting on the first unescaped `=`.
    ///
    /// Both sides are trimmed, except for whitespace escaped with a
    /// backslash. Text without `=` becomes an attribute name
    /// with an empty value.
    pub fn parse(schema: &'a Schema, text: &str) -> Self {
        let (name, value) = split_once_unescaped(text, '=').unwrap_or((text, ""));
        let attr_name = name.trim();
        Self {
            attr: schema.attr(attr_name),
            attr_name: attr_name.to_string(),
            value: trim_unescaped(value).to_string(),
        }
    }

    pub fn attr(&self) -> Option<AttributeType<'a>> {
        self.attr
    }

    /// The attribute name as written.
    pub fn attr_name(&self) -> &str {
        &self.attr_name
    }

    /// The raw value as written, trimmed of unescaped whitespace.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_resolved(&self) -> bool {
        self.attr.is_some()
    }

    pub fn normalized_value(&self) -> NormalizedValue {
        match &self.attr {
            Some(attr) => attr.normalize(&self.value),
            None => NormalizedValue::Text(self.value.clone()),
        }
    }

    /// Equality under the attribute's equality rule.
    ///
    /// Both sides must resolve to the same attribute type, aliases included.
    pub fn matches(&self, other: &Rdn<'_>) -> bool {
        match (&self.attr, &other.attr) {
            (Some(a), Some(b)) if a.same_type(b) => a.values_match(&self.value, &other.value),
            _ => false,
        }
    }
}

impl<'a> std::fmt::Display for Rdn<'a> {
    /// Canonical form: `canonicalName=normalizedValue`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.attr {
            Some(attr) => write!(f, "{}={}", attr.name(), attr.normalize(&self.value)),
            None => write!(f, "{}={}", self.attr_name, self.value),
        }
    }
}
