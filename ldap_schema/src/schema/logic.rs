//! Schema driven rules the entry editor applies to an entry's object classes.

use std::collections::BTreeSet;

use super::{class::OBJECT_CLASS_ATTRIBUTE, ClassField, ObjectClass, Schema};

const TOP: &str = "top";

impl Schema {
    /// Canonical names of all structural classes, sorted.
    pub fn structural_classes(&self) -> Vec<&str> {
        self.classes_where(|oc| oc.is_structural())
    }

    /// Canonical names of all auxiliary classes, sorted.
    pub fn auxiliary_classes(&self) -> Vec<&str> {
        self.classes_where(|oc| oc.is_auxiliary())
    }

    fn classes_where(&self, predicate: impl Fn(&ObjectClass<'_>) -> bool) -> Vec<&str> {
        let mut names = self
            .object_classes()
            .filter(|oc| !oc.is_obsolete() && predicate(oc))
            .map(|oc| oc.name())
            .collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Union of the required attributes of the given object classes.
    ///
    /// Unknown classes contribute nothing.
    pub fn required_attributes<S: AsRef<str>>(&self, classes: &[S]) -> Vec<String> {
        classes
            .iter()
            .filter_map(|name| self.oc(name.as_ref()))
            .flat_map(|oc| oc.required_attributes())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Attributes the given classes allow that are not yet present.
    ///
    /// Presence is decided by attribute type identity, so an alias of a
    /// present attribute counts as present.
    pub fn optional_attributes<S: AsRef<str>, P: AsRef<str>>(
        &self,
        classes: &[S],
        present: &[P],
    ) -> Vec<String> {
        let present = present
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.attr(name)
                    .map(|attr| attr.name())
                    .unwrap_or(name)
                    .to_lowercase()
            })
            .collect::<BTreeSet<_>>();

        classes
            .iter()
            .filter_map(|name| self.oc(name.as_ref()))
            .flat_map(|oc| oc.collect(ClassField::May))
            .filter(|name| !present.contains(&name.to_lowercase()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// The `objectClass` values of a new entry with the given structural
    /// class: the class itself plus every non-structural superior below
    /// `top`.
    pub fn new_entry_classes(&self, structural: &str) -> Option<Vec<String>> {
        let oc = self.oc(structural)?;
        let mut classes = vec![oc.name().to_string()];
        for sup in oc.superiors() {
            if sup.name().eq_ignore_ascii_case(TOP) {
                break;
            }
            if !sup.is_structural() {
                classes.push(sup.name().to_string());
            }
        }
        Some(classes)
    }

    /// Whether `name` is the attribute holding object classes.
    pub fn is_object_class_attribute(&self, name: &str) -> bool {
        match (self.attr(name), self.attr(OBJECT_CLASS_ATTRIBUTE)) {
            (Some(a), Some(b)) => a.same_type(&b),
            _ => name.eq_ignore_ascii_case(OBJECT_CLASS_ATTRIBUTE),
        }
    }
}
