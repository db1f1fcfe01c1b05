//! Interning domains
//!
//! A domain is a namespace of canonical string values. Two keys are only
//! directly comparable when they belong to the same domain; otherwise one
//! must first be translated into the other's domain via [`InternDomain::lookup`].
//!
//! Lookup is strictly non-forcing: it never inserts, and `None` is the
//! normal signal that a value is exclusive to one domain. Only the owning
//! [`InternMap`] can grow a domain, through [`InternMap::intern`].

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_DOMAIN_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an interning domain.
///
/// Two domain handles refer to the same domain iff their ids are equal;
/// the delta engines use this to select the raw-equality fast path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DomainId(u64);

impl DomainId {
    /// Allocate a fresh id from the process-wide atomic counter.
    pub fn next() -> Self {
        Self(NEXT_DOMAIN_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the numeric value (diagnostics only)
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Interning-domain collaborator consumed by the delta engines.
///
/// Implementations supply only read access; the engines never grow a
/// domain while comparing snapshots.
pub trait InternDomain {
    /// Identity of this domain
    fn id(&self) -> DomainId;

    /// Human-readable domain name, used to tag delta buckets
    fn name(&self) -> &str;

    /// Non-forcing lookup: the canonical form of `value` if this domain
    /// contains it, `None` otherwise. Never inserts.
    fn lookup(&self, value: &str) -> Option<&str>;

    /// Number of values interned in this domain
    fn len(&self) -> usize;

    /// True if the domain has no values
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// True if the two handles refer to the same domain.
pub fn same_domain(a: &dyn InternDomain, b: &dyn InternDomain) -> bool {
    a.id() == b.id()
}

/// A named set of canonical string values.
///
/// The production interning table. Owners populate it with [`intern`]
/// while scanning; comparison callers only see it through [`InternDomain`].
///
/// [`intern`]: InternMap::intern
#[derive(Debug)]
pub struct InternMap {
    id: DomainId,
    name: String,
    values: HashSet<String>,
}

impl InternMap {
    /// Create an empty domain with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: DomainId::next(),
            name: name.into(),
            values: HashSet::new(),
        }
    }

    /// Create an empty domain with a capacity hint
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: DomainId::next(),
            name: name.into(),
            values: HashSet::with_capacity(capacity),
        }
    }

    /// Force `value` into this domain and return its canonical form.
    pub fn intern<'a>(&'a mut self, value: &'a str) -> &'a str {
        if !self.values.contains(value) {
            self.values.insert(value.to_owned());
        }
        self.values.get(value).map(String::as_str).unwrap_or(value)
    }

    /// Force every value of `values` into this domain
    pub fn intern_all<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for value in values {
            self.intern(value.as_ref());
        }
    }

    /// True if `value` is already canonical in this domain
    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }
}

impl InternDomain for InternMap {
    fn id(&self) -> DomainId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, value: &str) -> Option<&str> {
        self.values.get(value).map(String::as_str)
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_ids_are_unique() {
        let a = InternMap::new("classes");
        let b = InternMap::new("classes");
        assert_ne!(a.id(), b.id());
        assert!(!same_domain(&a, &b));
        assert!(same_domain(&a, &a));
    }

    #[test]
    fn test_lookup_never_inserts() {
        let domain = InternMap::new("classes");
        assert_eq!(domain.lookup("com.example.A"), None);
        assert_eq!(domain.len(), 0);
    }

    #[test]
    fn test_intern_then_lookup() {
        let mut domain = InternMap::new("classes");
        domain.intern("com.example.A");
        assert_eq!(domain.lookup("com.example.A"), Some("com.example.A"));
        assert_eq!(domain.len(), 1);

        // Re-interning is a no-op
        domain.intern("com.example.A");
        assert_eq!(domain.len(), 1);
    }

    #[test]
    fn test_intern_all() {
        let mut domain = InternMap::new("fields");
        domain.intern_all(["f1", "f2", "f1"]);
        assert_eq!(domain.len(), 2);
        assert!(domain.contains("f1"));
        assert!(domain.contains("f2"));
    }
}
