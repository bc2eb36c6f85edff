use crate::schema::Schema;

use super::{split_unescaped, Rdn};

/// A distinguished name: an RDN followed by the DN of its parent.
///
/// The most specific RDN comes first, as in `cn=Example,dc=example,dc=com`.
pub struct Dn<'a> {
    rdn: Rdn<'a>,
    parent: Option<Box<Dn<'a>>>,
}

impl<'a> Dn<'a> {
    /// Parse a DN, splitting at unescaped commas.
    pub fn parse(schema: &'a Schema, text: &str) -> Self {
        let components = split_unescaped(text, ',');
        // split_unescaped always yields at least one part.
        Self::from_rdns(
            components
                .into_iter()
                .rev()
                .map(|component| Rdn::parse(schema, component)),
        )
        .unwrap_or_else(|| Dn {
            rdn: Rdn::parse(schema, ""),
            parent: None,
        })
    }

    /// Build a DN from its RDNs, root first.
    fn from_rdns(rdns: impl IntoIterator<Item = Rdn<'a>>) -> Option<Self> {
        let mut dn: Option<Dn<'a>> = None;
        for rdn in rdns {
            dn = Some(Dn {
                rdn,
                parent: dn.map(Box::new),
            });
        }
        dn
    }

    fn chain(&self) -> impl Iterator<Item = &Dn<'a>> {
        std::iter::once(self).chain(self.ancestors())
    }

    pub fn rdn(&self) -> &Rdn<'a> {
        &self.rdn
    }

    pub fn parent(&self) -> Option<&Dn<'a>> {
        self.parent.as_deref()
    }

    /// Proper ancestors, from the immediate parent up to the root.
    pub fn ancestors(&self) -> Ancestors<'_, 'a> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// Number of RDNs.
    pub fn len(&self) -> usize {
        self.level() + 1
    }

    /// Distance to the root. The root has level 0.
    pub fn level(&self) -> usize {
        self.ancestors().count()
    }

    /// Structural equality: same length and pairwise matching RDNs.
    pub fn matches(&self, other: &Dn<'_>) -> bool {
        let (mut a, mut b) = (Some(self), Some(other));
        loop {
            match (a, b) {
                (Some(x), Some(y)) => {
                    if !x.rdn.matches(&y.rdn) {
                        return false;
                    }
                    a = x.parent();
                    b = y.parent();
                }
                (None, None) => return true,
                _ => return false,
            }
        }
    }

    /// Whether `ancestor` is a proper ancestor of this DN.
    /// A DN is never subordinate to itself.
    pub fn is_subordinate(&self, ancestor: &Dn<'_>) -> bool {
        self.ancestors().any(|dn| dn.matches(ancestor))
    }

    pub fn is_descendant_or_self(&self, base: &Dn<'_>) -> bool {
        self.matches(base) || self.is_subordinate(base)
    }

    /// Proper ancestors from the immediate parent up to and including the
    /// first one matching `stop_at`, or up to the root.
    pub fn parents(&self, stop_at: Option<&Dn<'_>>) -> Vec<&Dn<'a>> {
        let mut parents = Vec::new();
        for dn in self.ancestors() {
            parents.push(dn);
            if matches!(stop_at, Some(stop) if dn.matches(stop)) {
                break;
            }
        }
        parents
    }

    /// Number of steps from `base` down to this DN, if it lies in the
    /// subtree of `base`.
    pub fn depth_below(&self, base: &Dn<'_>) -> Option<usize> {
        self.chain().position(|dn| dn.matches(base))
    }
}

impl<'a> std::fmt::Display for Dn<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rdn)?;
        for dn in self.ancestors() {
            write!(f, ",{}", dn.rdn)?;
        }
        Ok(())
    }
}

// Clone, Debug and Drop walk the parent links iteratively.

impl<'a> Clone for Dn<'a> {
    fn clone(&self) -> Self {
        let mut rdns = self.chain().map(|dn| dn.rdn.clone()).collect::<Vec<_>>();
        rdns.reverse();
        Self::from_rdns(rdns).unwrap_or_else(|| Dn {
            rdn: self.rdn.clone(),
            parent: None,
        })
    }
}

impl<'a> std::fmt::Debug for Dn<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.chain().map(|dn| &dn.rdn))
            .finish()
    }
}

impl<'a> Drop for Dn<'a> {
    fn drop(&mut self) {
        let mut next = self.parent.take();
        while let Some(mut dn) = next {
            next = dn.parent.take();
        }
    }
}

pub struct Ancestors<'d, 'a> {
    next: Option<&'d Dn<'a>>,
}

impl<'d, 'a> Iterator for Ancestors<'d, 'a> {
    type Item = &'d Dn<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let dn = self.next?;
        self.next = dn.parent();
        Some(dn)
    }
}
