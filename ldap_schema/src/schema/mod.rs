mod attribute;
mod class;
pub mod document;
pub mod logic;
pub mod matching;

use std::path::Path;

use anyhow::Context;
use fnv::FnvHashMap;

use crate::{
    error::{AttributeNotFound, ObjectClassNotFound},
    name::{Dn, Rdn},
    registry::{ElementRegistry, LocalAttributeId, LocalClassId, Registered},
    AnyError,
};

pub use self::{
    attribute::{AttributeField, AttributeType},
    class::{ClassField, ObjectClass},
    document::{AttributeSchema, ObjectClassKind, ObjectClassSchema, SchemaDocument, Syntax},
    matching::MatchingRule,
};

pub type RegisteredAttribute = Registered<LocalAttributeId, AttributeSchema>;
pub type RegisteredObjectClass = Registered<LocalClassId, ObjectClassSchema>;

/// Oid of the Directory String syntax, used for display when an attribute
/// declares no syntax.
pub const DIRECTORY_STRING_SYNTAX: &str = "1.3.6.1.4.1.1466.115.121.1.15";

/// An immutable LDAP schema.
///
/// Built once from a [`SchemaDocument`]. Reloading means building a new
/// instance; names parsed against a schema borrow it.
#[derive(Clone, Debug, Default)]
pub struct Schema {
    attrs: ElementRegistry<LocalAttributeId, AttributeSchema>,
    classes: ElementRegistry<LocalClassId, ObjectClassSchema>,
    syntaxes: FnvHashMap<String, Syntax>,
}

impl Schema {
    pub fn new(doc: SchemaDocument) -> Self {
        let syntaxes = doc
            .syntaxes
            .into_iter()
            .map(|(key, mut syntax)| {
                if syntax.oid.is_empty() {
                    syntax.oid = key;
                }
                (syntax.oid.clone(), syntax)
            })
            .collect::<FnvHashMap<_, _>>();
        let attrs = ElementRegistry::build(doc.attributes.into_values());
        let classes = ElementRegistry::build(doc.object_classes.into_values());

        tracing::debug!(
            attributes = attrs.len(),
            object_classes = classes.len(),
            syntaxes = syntaxes.len(),
            "schema built"
        );

        Self {
            attrs,
            classes,
            syntaxes,
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, AnyError> {
        let jd = &mut serde_json::Deserializer::from_str(contents);
        let doc: SchemaDocument =
            serde_path_to_error::deserialize(jd).context("Invalid schema document")?;
        Ok(Self::new(doc))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnyError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read schema file '{}'", path.display()))?;
        Self::from_json(&contents)
            .with_context(|| format!("Could not load schema file '{}'", path.display()))
    }

    /// Case-insensitive attribute type lookup by any of its names.
    pub fn attr(&self, name: &str) -> Option<AttributeType<'_>> {
        self.attrs
            .get_by_name(name)
            .map(|item| AttributeType::new(self, item))
    }

    pub fn require_attr(&self, name: &str) -> Result<AttributeType<'_>, AttributeNotFound> {
        self.attr(name).ok_or_else(|| AttributeNotFound::new(name))
    }

    /// Case-insensitive object class lookup by any of its names.
    pub fn oc(&self, name: &str) -> Option<ObjectClass<'_>> {
        self.classes
            .get_by_name(name)
            .map(|item| ObjectClass::new(self, item))
    }

    pub fn require_oc(&self, name: &str) -> Result<ObjectClass<'_>, ObjectClassNotFound> {
        self.oc(name).ok_or_else(|| ObjectClassNotFound::new(name))
    }

    pub fn syntax(&self, oid: &str) -> Option<&Syntax> {
        self.syntaxes.get(oid)
    }

    /// Attribute types in document order.
    pub fn attributes(&self) -> impl Iterator<Item = AttributeType<'_>> {
        self.attrs.iter().map(move |item| AttributeType::new(self, item))
    }

    /// Object classes in document order.
    pub fn object_classes(&self) -> impl Iterator<Item = ObjectClass<'_>> {
        self.classes.iter().map(move |item| ObjectClass::new(self, item))
    }

    pub fn syntaxes(&self) -> impl Iterator<Item = &Syntax> {
        self.syntaxes.values()
    }

    /// Attribute types with any name starting with `prefix`, ignoring case.
    ///
    /// Results keep document order.
    pub fn search(&self, prefix: &str) -> Vec<AttributeType<'_>> {
        let prefix = prefix.to_lowercase();
        self.attributes()
            .filter(|attr| {
                attr.names()
                    .iter()
                    .any(|name| name.to_lowercase().starts_with(&prefix))
            })
            .collect()
    }

    /// Parse a relative distinguished name against this schema.
    pub fn rdn(&self, text: &str) -> Rdn<'_> {
        Rdn::parse(self, text)
    }

    /// Parse a distinguished name against this schema.
    pub fn dn(&self, text: &str) -> Dn<'_> {
        Dn::parse(self, text)
    }

    pub(crate) fn attr_registry(&self) -> &ElementRegistry<LocalAttributeId, AttributeSchema> {
        &self.attrs
    }

    pub(crate) fn class_registry(&self) -> &ElementRegistry<LocalClassId, ObjectClassSchema> {
        &self.classes
    }
}
