use std::collections::BTreeSet;

use crate::registry::{LocalClassId, SchemaElement};

use super::{ObjectClassKind, ObjectClassSchema, RegisteredObjectClass, Schema};

/// Name of the attribute holding an entry's object classes.
pub const OBJECT_CLASS_ATTRIBUTE: &str = "objectClass";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClassField {
    Must,
    May,
}

impl ClassField {
    fn get(self, schema: &ObjectClassSchema) -> &[String] {
        match self {
            Self::Must => &schema.must,
            Self::May => &schema.may,
        }
    }
}

/// An object class resolved in a [`Schema`].
#[derive(Clone, Copy)]
pub struct ObjectClass<'a> {
    schema: &'a Schema,
    item: &'a RegisteredObjectClass,
}

impl<'a> ObjectClass<'a> {
    pub(super) fn new(schema: &'a Schema, item: &'a RegisteredObjectClass) -> Self {
        Self { schema, item }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn local_id(&self) -> LocalClassId {
        self.item.local_id
    }

    pub fn definition(&self) -> &'a ObjectClassSchema {
        &self.item.schema
    }

    pub fn oid(&self) -> &'a str {
        &self.item.schema.oid
    }

    pub fn name(&self) -> &'a str {
        self.item.schema.canonical_name()
    }

    pub fn names(&self) -> &'a [String] {
        &self.item.schema.names
    }

    pub fn description(&self) -> Option<&'a str> {
        self.item.schema.description.as_deref()
    }

    pub fn kind(&self) -> ObjectClassKind {
        self.item.schema.kind
    }

    #[inline]
    pub fn is_structural(&self) -> bool {
        self.kind() == ObjectClassKind::Structural
    }

    #[inline]
    pub fn is_auxiliary(&self) -> bool {
        self.kind() == ObjectClassKind::Auxiliary
    }

    #[inline]
    pub fn is_abstract(&self) -> bool {
        self.kind() == ObjectClassKind::Abstract
    }

    pub fn is_obsolete(&self) -> bool {
        self.item.schema.obsolete
    }

    pub fn same_class(&self, other: &ObjectClass<'_>) -> bool {
        self.oid() == other.oid()
    }

    pub fn superior(&self) -> Option<ObjectClass<'a>> {
        let id = self.item.superior?;
        Some(Self::new(self.schema, self.schema.class_registry().get(id)))
    }

    /// This class followed by its superior chain.
    pub fn chain(&self) -> impl Iterator<Item = ObjectClass<'a>> {
        let schema = self.schema;
        schema
            .class_registry()
            .chain(self.item.local_id)
            .map(move |item| Self::new(schema, item))
    }

    pub fn superiors(&self) -> impl Iterator<Item = ObjectClass<'a>> {
        self.chain().skip(1)
    }

    pub fn is_subclass_of(&self, other: &ObjectClass<'_>) -> bool {
        self.superiors().any(|sup| sup.same_class(other))
    }

    /// Resolve an attribute reference to its canonical name.
    /// Unknown names are kept as written.
    fn canonical_attr(&self, name: &'a str) -> &'a str {
        self.schema.attr(name).map(|attr| attr.name()).unwrap_or(name)
    }

    /// Gather a field across the whole superior chain.
    ///
    /// Names are resolved to canonical attribute names, de-duplicated and
    /// sorted.
    pub fn collect(&self, field: ClassField) -> Vec<String> {
        self.chain()
            .flat_map(|oc| field.get(oc.definition()).iter())
            .map(|name| self.canonical_attr(name))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Attributes an entry of this class must carry, except `objectClass`
    /// which is maintained separately.
    pub fn required_attributes(&self) -> Vec<String> {
        let mut attrs = self.collect(ClassField::Must);
        attrs.retain(|name| !name.eq_ignore_ascii_case(OBJECT_CLASS_ATTRIBUTE));
        attrs
    }

    /// Attributes offered for naming a new entry of this class, in chain
    /// order.
    pub fn rdn_candidates(&self) -> Vec<&'a str> {
        let mut names: Vec<&'a str> = Vec::new();
        for oc in self.chain() {
            for name in &oc.definition().must {
                let name = self.canonical_attr(name);
                if !name.eq_ignore_ascii_case(OBJECT_CLASS_ATTRIBUTE) && !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

impl<'a> std::fmt::Debug for ObjectClass<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectClass")
            .field("oid", &self.oid())
            .field("name", &self.name())
            .field("kind", &self.kind())
            .finish()
    }
}

impl<'a> std::fmt::Display for ObjectClass<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl<'a, 'b> PartialEq<ObjectClass<'b>> for ObjectClass<'a> {
    fn eq(&self, other: &ObjectClass<'b>) -> bool {
        self.same_class(other)
    }
}

impl<'a> Eq for ObjectClass<'a> {}
