use crate::{
    data::NormalizedValue,
    registry::{LocalAttributeId, SchemaElement},
};

use super::{
    matching::{self, MatchingRule},
    AttributeSchema, RegisteredAttribute, Schema, Syntax, DIRECTORY_STRING_SYNTAX,
};

/// Attribute type fields that are inherited from the superior type when
/// absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeField {
    Equality,
    Ordering,
    Substring,
    Syntax,
}

impl AttributeField {
    fn get(self, schema: &AttributeSchema) -> Option<&str> {
        match self {
            Self::Equality => schema.equality.as_deref(),
            Self::Ordering => schema.ordering.as_deref(),
            Self::Substring => schema.substring.as_deref(),
            Self::Syntax => schema.syntax.as_deref(),
        }
    }
}

/// An attribute type resolved in a [`Schema`].
#[derive(Clone, Copy)]
pub struct AttributeType<'a> {
    schema: &'a Schema,
    item: &'a RegisteredAttribute,
}

impl<'a> AttributeType<'a> {
    pub(super) fn new(schema: &'a Schema, item: &'a RegisteredAttribute) -> Self {
        Self { schema, item }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn local_id(&self) -> LocalAttributeId {
        self.item.local_id
    }

    /// The definition as found in the schema document.
    pub fn definition(&self) -> &'a AttributeSchema {
        &self.item.schema
    }

    pub fn oid(&self) -> &'a str {
        &self.item.schema.oid
    }

    /// The canonical name.
    pub fn name(&self) -> &'a str {
        self.item.schema.canonical_name()
    }

    pub fn names(&self) -> &'a [String] {
        &self.item.schema.names
    }

    pub fn description(&self) -> Option<&'a str> {
        self.item.schema.description.as_deref()
    }

    /// Identity comparison. Aliases of one type are the same type, distinct
    /// types never are.
    pub fn same_type(&self, other: &AttributeType<'_>) -> bool {
        self.oid() == other.oid()
    }

    pub fn superior(&self) -> Option<AttributeType<'a>> {
        let id = self.item.superior?;
        Some(Self::new(self.schema, self.schema.attr_registry().get(id)))
    }

    /// This type followed by its superior chain.
    pub fn chain(&self) -> impl Iterator<Item = AttributeType<'a>> {
        let schema = self.schema;
        schema
            .attr_registry()
            .chain(self.item.local_id)
            .map(move |item| Self::new(schema, item))
    }

    /// The superior chain, excluding this type.
    pub fn superiors(&self) -> impl Iterator<Item = AttributeType<'a>> {
        self.chain().skip(1)
    }

    pub fn is_subtype_of(&self, other: &AttributeType<'_>) -> bool {
        self.superiors().any(|sup| sup.same_type(other))
    }

    /// Look up a field on this type, then on each superior in turn.
    pub fn field(&self, field: AttributeField) -> Option<&'a str> {
        self.chain()
            .find_map(|attr| field.get(attr.definition()))
    }

    pub fn equality(&self) -> Option<&'a str> {
        self.field(AttributeField::Equality)
    }

    pub fn ordering(&self) -> Option<&'a str> {
        self.field(AttributeField::Ordering)
    }

    pub fn substring(&self) -> Option<&'a str> {
        self.field(AttributeField::Substring)
    }

    /// The effective syntax oid, without a length bound (`oid{len}`).
    pub fn syntax_oid(&self) -> Option<&'a str> {
        self.field(AttributeField::Syntax)
            .map(|oid| oid.split('{').next().unwrap_or(oid).trim())
    }

    pub fn syntax(&self) -> Option<&'a Syntax> {
        self.syntax_oid().and_then(|oid| self.schema.syntax(oid))
    }

    /// The syntax used to present values, Directory String when none is
    /// declared.
    pub fn display_syntax(&self) -> Option<&'a Syntax> {
        self.syntax()
            .or_else(|| self.schema.syntax(DIRECTORY_STRING_SYNTAX))
    }

    pub fn matching_rule(&self) -> Option<MatchingRule> {
        self.equality().and_then(MatchingRule::from_name)
    }

    /// Whether values are binary.
    ///
    /// Types compared with `octetStringMatch` are treated as text and report
    /// `None`, as do types without a known syntax.
    pub fn is_binary(&self) -> Option<bool> {
        if self.equality() == Some(MatchingRule::OctetString.name()) {
            return None;
        }
        self.syntax().map(|syntax| syntax.not_human_readable)
    }

    /// Normalize a value under the effective equality rule.
    pub fn normalize(&self, value: &str) -> NormalizedValue {
        matching::normalize_with(self.schema, self.equality(), value)
    }

    pub fn values_match(&self, a: &str, b: &str) -> bool {
        self.normalize(a) == self.normalize(b)
    }

    pub fn is_single_valued(&self) -> bool {
        self.item.schema.single_value
    }

    pub fn is_read_only(&self) -> bool {
        self.item.schema.no_user_mod
    }

    pub fn is_obsolete(&self) -> bool {
        self.item.schema.obsolete
    }

    /// Operational attributes have a usage other than `userApplications`.
    pub fn is_operational(&self) -> bool {
        matches!(self.item.schema.usage.as_deref(), Some(usage) if usage != "userApplications")
    }
}

impl<'a> std::fmt::Debug for AttributeType<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeType")
            .field("oid", &self.oid())
            .field("name", &self.name())
            .finish()
    }
}

impl<'a> std::fmt::Display for AttributeType<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a, 'b> PartialEq<AttributeType<'b>> for AttributeType<'a> {
    fn eq(&self, other: &AttributeType<'b>) -> bool {
        self.same_type(other)
    }
}

impl<'a> Eq for AttributeType<'a> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::schema::SchemaDocument;

    fn schema() -> Schema {
        let mut doc = SchemaDocument::default();
        for attr in [
            AttributeSchema::new("2.5.4.41", "name")
                .with_equality("caseIgnoreMatch")
                .with_syntax("1.3.6.1.4.1.1466.115.121.1.15{32768}"),
            AttributeSchema::new("2.5.4.4", "sn")
                .with_alias("surname")
                .with_sup("name"),
            AttributeSchema::new("2.5.4.35", "userPassword")
                .with_equality("octetStringMatch")
                .with_syntax("1.3.6.1.4.1.1466.115.121.1.40"),
            AttributeSchema::new("0.9.2342.19200300.100.1.60", "jpegPhoto")
                .with_syntax("1.3.6.1.4.1.1466.115.121.1.28"),
            AttributeSchema::new("1.1", "custom"),
        ] {
            doc.attributes
                .insert(attr.names[0].to_lowercase(), attr);
        }
        for (oid, desc, binary) in [
            ("1.3.6.1.4.1.1466.115.121.1.15", "Directory String", false),
            ("1.3.6.1.4.1.1466.115.121.1.40", "Octet String", true),
            ("1.3.6.1.4.1.1466.115.121.1.28", "JPEG", true),
        ] {
            doc.syntaxes.insert(
                oid.to_string(),
                Syntax {
                    oid: oid.to_string(),
                    description: desc.to_string(),
                    not_human_readable: binary,
                },
            );
        }
        Schema::new(doc)
    }

    #[test]
    fn test_field_inherited_from_superior() {
        let schema = schema();
        let sn = schema.attr("sn").unwrap();
        assert_eq!(sn.definition().equality, None);
        assert_eq!(sn.field(AttributeField::Equality), Some("caseIgnoreMatch"));
        assert_eq!(sn.matching_rule(), Some(MatchingRule::CaseIgnore));
        assert_eq!(sn.ordering(), None);
        assert_eq!(sn.superior().unwrap().name(), "name");
        assert!(sn.is_subtype_of(&schema.attr("name").unwrap()));
    }

    #[test]
    fn test_syntax_resolution_strips_length() {
        let schema = schema();
        let sn = schema.attr("surname").unwrap();
        assert_eq!(sn.syntax().unwrap().to_string(), "Directory String");
        assert_eq!(sn.is_binary(), Some(false));
    }

    #[test]
    fn test_binary_flags() {
        let schema = schema();
        assert_eq!(schema.attr("jpegPhoto").unwrap().is_binary(), Some(true));
        // octetStringMatch is never reported as binary.
        assert_eq!(schema.attr("userPassword").unwrap().is_binary(), None);
        assert_eq!(schema.attr("custom").unwrap().is_binary(), None);
        assert_eq!(
            schema.attr("custom").unwrap().display_syntax().unwrap().oid,
            DIRECTORY_STRING_SYNTAX
        );
    }

    #[test]
    fn test_normalize_dispatch() {
        let schema = schema();
        let sn = schema.attr("sn").unwrap();
        assert_eq!(sn.normalize("Smith").to_string(), "smith");
        assert!(sn.values_match("SMITH", "smith"));

        let custom = schema.attr("custom").unwrap();
        assert!(!custom.values_match("A", "a"));
    }

    #[test]
    fn test_identity_by_oid() {
        let schema = schema();
        assert_eq!(schema.attr("sn").unwrap(), schema.attr("SURNAME").unwrap());
        assert_ne!(schema.attr("sn").unwrap(), schema.attr("name").unwrap());
    }
}
