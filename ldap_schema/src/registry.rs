//! Name indexed storage for schema elements.
//!
//! Elements are stored in insertion order and addressed by a dense local id.
//! Every registered name maps (lower-cased) to its element, and each element
//! records the local id of its superior once the registry is linked.

use fnv::FnvHashMap;

/// Common accessors of attribute type and object class definitions.
pub trait SchemaElement {
    fn oid(&self) -> &str;
    /// All registered names, the first being the canonical one.
    fn names(&self) -> &[String];
    /// Name used for display. Falls back to the first registered name.
    fn canonical_name(&self) -> &str;
    fn superior_name(&self) -> Option<&str>;
}

pub trait RegistryKey: Copy + Eq + std::fmt::Debug {
    fn from_index(index: usize) -> Self;
    fn as_index(self) -> usize;
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LocalAttributeId(u32);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct LocalClassId(u32);

impl RegistryKey for LocalAttributeId {
    #[inline]
    fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    fn as_index(self) -> usize {
        self.0 as usize
    }
}

impl RegistryKey for LocalClassId {
    #[inline]
    fn from_index(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    fn as_index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug)]
pub struct Registered<K, T> {
    pub local_id: K,
    pub schema: T,
    /// Resolved superior. `None` for roots and for dangling references.
    pub superior: Option<K>,
}

#[derive(Clone, Debug)]
pub struct ElementRegistry<K, T> {
    items: Vec<Registered<K, T>>,
    /// Lookup table that maps every lower-cased name to its local id.
    names: FnvHashMap<String, K>,
}

impl<K, T> ElementRegistry<K, T>
where
    K: RegistryKey,
    T: SchemaElement,
{
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            names: Default::default(),
        }
    }

    /// Build a linked registry from element definitions.
    pub fn build(elements: impl IntoIterator<Item = T>) -> Self {
        let mut reg = Self::new();
        for element in elements {
            reg.add(element);
        }
        reg.link_superiors();
        reg
    }

    fn add(&mut self, schema: T) -> K {
        assert!(self.items.len() < u32::MAX as usize - 1);

        let local_id = K::from_index(self.items.len());

        let names = schema
            .names()
            .iter()
            .map(|n| n.as_str())
            .chain(std::iter::once(schema.canonical_name()))
            .filter(|n| !n.is_empty())
            .map(|n| n.to_lowercase())
            .collect::<Vec<_>>();
        for name in names {
            if let Some(old) = self.names.insert(name.clone(), local_id) {
                if old != local_id {
                    tracing::debug!(%name, oid=%schema.oid(), "duplicate schema name, last definition wins");
                }
            }
        }

        self.items.push(Registered {
            local_id,
            schema,
            superior: None,
        });
        local_id
    }

    /// Resolve the superior name of every element.
    ///
    /// Unknown superiors leave the element rootless. An edge that would close
    /// a cycle is dropped, so superior chains are always finite.
    fn link_superiors(&mut self) {
        for index in 0..self.items.len() {
            let local_id = K::from_index(index);
            let superior_name = match self.items[index].schema.superior_name() {
                Some(name) => name.to_lowercase(),
                None => continue,
            };

            match self.names.get(&superior_name).copied() {
                Some(parent) if self.reaches(parent, local_id) => {
                    tracing::warn!(
                        name = %self.items[index].schema.canonical_name(),
                        superior = %superior_name,
                        "cyclic superior reference, treating element as root"
                    );
                }
                Some(parent) => {
                    self.items[index].superior = Some(parent);
                }
                None => {
                    tracing::debug!(
                        name = %self.items[index].schema.canonical_name(),
                        superior = %superior_name,
                        "unresolved superior reference, treating element as root"
                    );
                }
            }
        }
    }

    fn reaches(&self, from: K, target: K) -> bool {
        self.chain(from).any(|item| item.local_id == target)
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get an element by local id.
    ///
    /// Local ids are only handed out by this registry, so this can not fail
    /// for ids obtained from it.
    #[inline]
    pub fn get(&self, id: K) -> &Registered<K, T> {
        &self.items[id.as_index()]
    }

    /// Case-insensitive lookup by any registered name.
    pub fn get_by_name(&self, name: &str) -> Option<&Registered<K, T>> {
        if name.is_empty() {
            return None;
        }
        self.names
            .get(&name.to_lowercase())
            .map(|id| self.get(*id))
    }

    /// Iterate over the elements in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<Registered<K, T>> {
        self.items.iter()
    }

    /// Walk from an element up its superior chain, starting with the element
    /// itself.
    pub fn chain(&self, start: K) -> Chain<'_, K, T> {
        Chain {
            registry: self,
            next: Some(start),
        }
    }
}

impl<K, T> Default for ElementRegistry<K, T>
where
    K: RegistryKey,
    T: SchemaElement,
{
    fn default() -> Self {
        Self::new()
    }
}

pub struct Chain<'r, K, T> {
    registry: &'r ElementRegistry<K, T>,
    next: Option<K>,
}

impl<'r, K, T> Iterator for Chain<'r, K, T>
where
    K: RegistryKey,
    T: SchemaElement,
{
    type Item = &'r Registered<K, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.registry.get(self.next?);
        self.next = item.superior;
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Element {
        names: Vec<String>,
        sup: Option<String>,
    }

    impl Element {
        fn new(names: &[&str], sup: Option<&str>) -> Self {
            Self {
                names: names.iter().map(|s| s.to_string()).collect(),
                sup: sup.map(|s| s.to_string()),
            }
        }
    }

    impl SchemaElement for Element {
        fn oid(&self) -> &str {
            ""
        }

        fn names(&self) -> &[String] {
            &self.names
        }

        fn canonical_name(&self) -> &str {
            &self.names[0]
        }

        fn superior_name(&self) -> Option<&str> {
            self.sup.as_deref()
        }
    }

    fn chain_names(reg: &ElementRegistry<LocalClassId, Element>, name: &str) -> Vec<String> {
        let start = reg.get_by_name(name).unwrap().local_id;
        reg.chain(start)
            .map(|item| item.schema.canonical_name().to_string())
            .collect()
    }

    #[test]
    fn test_lookup_any_name_case_insensitive() {
        let reg = ElementRegistry::<LocalClassId, _>::build(vec![
            Element::new(&["sn", "surname"], None),
            Element::new(&["cn", "commonName"], None),
        ]);
        assert_eq!(reg.len(), 2);
        assert_eq!(
            reg.get_by_name("SurName").unwrap().schema.canonical_name(),
            "sn"
        );
        assert_eq!(
            reg.get_by_name("COMMONNAME").unwrap().schema.canonical_name(),
            "cn"
        );
        assert!(reg.get_by_name("").is_none());
        assert!(reg.get_by_name("uid").is_none());
    }

    #[test]
    fn test_link_superiors() {
        let reg = ElementRegistry::<LocalClassId, _>::build(vec![
            Element::new(&["c"], Some("B")),
            Element::new(&["b"], Some("a")),
            Element::new(&["a"], None),
        ]);
        assert_eq!(chain_names(&reg, "c"), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_dangling_superior_is_root() {
        let reg = ElementRegistry::<LocalClassId, _>::build(vec![Element::new(
            &["orphan"],
            Some("missing"),
        )]);
        assert!(reg.get_by_name("orphan").unwrap().superior.is_none());
    }

    #[test]
    fn test_cycles_are_broken() {
        let reg = ElementRegistry::<LocalClassId, _>::build(vec![
            Element::new(&["a"], Some("b")),
            Element::new(&["b"], Some("a")),
            Element::new(&["self"], Some("self")),
        ]);
        assert_eq!(chain_names(&reg, "a"), vec!["a", "b"]);
        assert_eq!(chain_names(&reg, "b"), vec!["b"]);
        assert_eq!(chain_names(&reg, "self"), vec!["self"]);
    }
}
