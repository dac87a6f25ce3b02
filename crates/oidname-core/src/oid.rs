//! OID (Object Identifier) representation.
//!
//! An [`Oid`] is an ordered list of sub-identifiers ("arcs"), the path from
//! the root of the global OID tree. The textual form is dotted decimal.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};
use core::num::ParseIntError;
use core::str::FromStr;

/// Error returned when dotted-decimal text is not a well-formed OID.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseOidError {
    /// A component other than the leading one was empty (`1..2`, `1.2.`).
    #[error("empty component found in OID at position {index}")]
    EmptyComponent {
        /// Zero-based position of the empty component in the split text.
        index: usize,
    },
    /// A component is not a decimal sub-identifier.
    #[error("invalid OID component {component:?}: {source}")]
    InvalidComponent {
        /// The offending text.
        component: String,
        /// The integer parse failure.
        #[source]
        source: ParseIntError,
    },
}

/// A numeric OID.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid {
    arcs: Vec<u32>,
}

impl Oid {
    /// Create a new OID from a vector of arcs.
    #[must_use]
    pub fn new(arcs: Vec<u32>) -> Self {
        Self { arcs }
    }

    /// Create an OID from a slice of arcs.
    #[must_use]
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: arcs.to_vec(),
        }
    }

    /// Parse an OID from dotted notation (e.g., "1.3.6.1.2.1").
    ///
    /// A single leading dot (".1.3.6") denotes the implicit root and is
    /// accepted. Empty text yields an empty OID.
    ///
    /// # Errors
    ///
    /// Returns [`ParseOidError::EmptyComponent`] for consecutive or trailing
    /// dots and [`ParseOidError::InvalidComponent`] for anything that is not
    /// a `u32` in decimal.
    pub fn parse(s: &str) -> Result<Self, ParseOidError> {
        let mut arcs = Vec::new();
        for (index, component) in s.split('.').enumerate() {
            if component.is_empty() {
                if index == 0 {
                    continue;
                }
                return Err(ParseOidError::EmptyComponent { index });
            }
            let arc = component
                .parse()
                .map_err(|source| ParseOidError::InvalidComponent {
                    component: String::from(component),
                    source,
                })?;
            arcs.push(arc);
        }
        Ok(Self::new(arcs))
    }

    /// Convert to dotted notation string.
    #[must_use]
    pub fn to_dotted(&self) -> String {
        // Estimate capacity: avg ~3 chars per arc + 1 for dots
        let mut result = String::with_capacity(self.arcs.len() * 4);
        self.append_dotted(&mut result);
        result
    }

    /// Append the dotted notation to an existing buffer.
    pub fn append_dotted(&self, buf: &mut String) {
        append_arcs(buf, &self.arcs, false);
    }

    /// Get the parent OID (all arcs except the last).
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.arcs.len() <= 1 {
            None
        } else {
            Some(Self::from_slice(&self.arcs[..self.arcs.len() - 1]))
        }
    }

    /// Get the last arc.
    #[must_use]
    pub fn last_arc(&self) -> Option<u32> {
        self.arcs.last().copied()
    }

    /// Check if this OID is a prefix of another.
    #[must_use]
    pub fn is_prefix_of(&self, other: &Self) -> bool {
        other.arcs.starts_with(&self.arcs)
    }

    /// Get the number of arcs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Get the arcs as a slice.
    #[must_use]
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Create a child OID by appending an arc.
    #[must_use]
    pub fn child(&self, arc: u32) -> Self {
        let mut arcs = Vec::with_capacity(self.arcs.len() + 1);
        arcs.extend_from_slice(&self.arcs);
        arcs.push(arc);
        Self::new(arcs)
    }

    /// Create an OID by appending several arcs.
    #[must_use]
    pub fn extended(&self, suffix: &[u32]) -> Self {
        let mut arcs = Vec::with_capacity(self.arcs.len() + suffix.len());
        arcs.extend_from_slice(&self.arcs);
        arcs.extend_from_slice(suffix);
        Self::new(arcs)
    }
}

/// Append arcs in decimal, dot separated.
///
/// With `lead` set, the first arc is also preceded by a dot.
pub(crate) fn append_arcs(buf: &mut String, arcs: &[u32], lead: bool) {
    for (i, arc) in arcs.iter().enumerate() {
        if lead || i > 0 {
            buf.push('.');
        }
        // write! to String is infallible
        let _ = write!(buf, "{arc}");
    }
}

impl FromStr for Oid {
    type Err = ParseOidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.arcs.iter();
        if let Some(first) = iter.next() {
            write!(f, "{first}")?;
            for arc in iter {
                write!(f, ".{arc}")?;
            }
        }
        Ok(())
    }
}

impl From<Vec<u32>> for Oid {
    fn from(arcs: Vec<u32>) -> Self {
        Self::new(arcs)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl AsRef<[u32]> for Oid {
    fn as_ref(&self) -> &[u32] {
        &self.arcs
    }
}

// OIDs travel as their dotted string so JSON and other self-describing
// formats stay readable.
#[cfg(feature = "serde")]
impl serde::Serialize for Oid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Oid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OidVisitor;

        impl serde::de::Visitor<'_> for OidVisitor {
            type Value = Oid;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a dotted-decimal OID string")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Oid, E> {
                Oid::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(OidVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let oid = Oid::parse("1.3.6.1.4.1.4").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 4, 1, 4]);
    }

    #[test]
    fn test_parse_empty() {
        let oid = Oid::parse("").unwrap();
        assert!(oid.is_empty());
    }

    #[test]
    fn test_parse_leading_dot() {
        assert_eq!(Oid::parse(".1.3.6").unwrap(), Oid::parse("1.3.6").unwrap());
        assert!(Oid::parse(".").is_err());
    }

    #[test]
    fn test_parse_empty_components() {
        assert_eq!(
            Oid::parse("1..2"),
            Err(ParseOidError::EmptyComponent { index: 1 })
        );
        assert_eq!(
            Oid::parse("1.2."),
            Err(ParseOidError::EmptyComponent { index: 2 })
        );
        assert!(matches!(
            Oid::parse("..1"),
            Err(ParseOidError::EmptyComponent { index: 1 })
        ));
    }

    #[test]
    fn test_parse_invalid() {
        let err = Oid::parse("1.a.2").unwrap_err();
        match err {
            ParseOidError::InvalidComponent { component, .. } => assert_eq!(component, "a"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(Oid::parse("1.-3").is_err());
        assert!(Oid::parse("1.4294967296").is_err());
    }

    #[test]
    fn test_to_dotted() {
        let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
        assert_eq!(oid.to_dotted(), "1.3.6.1.2.1");
        assert_eq!(Oid::default().to_dotted(), "");
    }

    #[test]
    fn test_dotted_round_trip() {
        for s in ["0", "1.3.6.1.4.1.4", "1.3.6.1.2.1.2.2.1.10.4294967295"] {
            assert_eq!(s.parse::<Oid>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn test_append_dotted() {
        let mut buf = String::from("oid=");
        Oid::new(vec![1, 3, 6]).append_dotted(&mut buf);
        assert_eq!(buf, "oid=1.3.6");
    }

    #[test]
    fn test_parent() {
        let oid = Oid::new(vec![1, 3, 6, 1]);
        let parent = oid.parent().unwrap();
        assert_eq!(parent.arcs(), &[1, 3, 6]);
        assert!(Oid::new(vec![1]).parent().is_none());
    }

    #[test]
    fn test_is_prefix_of() {
        let prefix = Oid::new(vec![1, 3, 6]);
        let full = Oid::new(vec![1, 3, 6, 1, 2, 1]);

        assert!(prefix.is_prefix_of(&full));
        assert!(!full.is_prefix_of(&prefix));
    }

    #[test]
    fn test_child_and_extended() {
        let oid = Oid::new(vec![1, 3, 6, 1]);
        assert_eq!(oid.child(2).arcs(), &[1, 3, 6, 1, 2]);
        assert_eq!(oid.extended(&[4, 1]).arcs(), &[1, 3, 6, 1, 4, 1]);
    }

    #[test]
    fn test_ordering() {
        let a = Oid::new(vec![1, 3, 6, 1, 2]);
        let b = Oid::new(vec![1, 3, 6, 1, 10]);
        let c = Oid::new(vec![1, 3, 6, 1, 2, 1]);
        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let oid = Oid::new(vec![1, 3, 6, 1, 4, 1, 4]);
        let json = serde_json::to_string(&oid).unwrap();
        assert_eq!(json, "\"1.3.6.1.4.1.4\"");

        let back: Oid = serde_json::from_str("\".1.3.6\"").unwrap();
        assert_eq!(back.arcs(), &[1, 3, 6]);
        assert!(serde_json::from_str::<Oid>("\"1..3\"").is_err());
    }
}
