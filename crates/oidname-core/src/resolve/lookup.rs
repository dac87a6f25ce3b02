//! Symbolic names back to numeric OIDs.

use crate::mib::MibTree;
use crate::oid::{Oid, ParseOidError};
use alloc::format;
use alloc::string::String;

/// Error returned by [`lookup`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The numeric part is not well formed.
    #[error(transparent)]
    Malformed(#[from] ParseOidError),
    /// No node carries this name.
    #[error("unknown name {name:?}")]
    UnknownName {
        /// The name as written, including any module qualifier.
        name: String,
    },
    /// The module qualifier names no loaded module.
    #[error("unknown module {module:?}")]
    UnknownModule {
        /// The module name as written.
        module: String,
    },
}

/// Resolve a name to its OID.
///
/// Accepts what [`abbreviate`](super::abbreviate) produces, plus plain
/// dotted decimal:
///
/// - `1.3.6.1.2.1` (also `.1.3.6.1.2.1`)
/// - `enterprises.9.1`: first node with that label, in definition order
/// - `SNMPv2-SMI::enterprises.9.1`: that label as defined by that module
///
/// # Errors
///
/// Returns [`LookupError::Malformed`] when a numeric part does not parse,
/// and [`LookupError::UnknownName`] / [`LookupError::UnknownModule`] when the
/// symbolic part is not in the tree.
pub fn lookup(tree: &MibTree, text: &str) -> Result<Oid, LookupError> {
    if text.is_empty() || text.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
        return Ok(Oid::parse(text)?);
    }

    let (module, rest) = match text.split_once("::") {
        Some((module, rest)) => (Some(module), rest),
        None => (None, text),
    };
    let (label, suffix) = match rest.split_once('.') {
        // Parsed with the dot kept so the label counts as component 0.
        Some((label, _)) => (label, Oid::parse(&rest[label.len()..])?),
        None => (rest, Oid::default()),
    };

    let node = match module {
        Some(module) => {
            if tree.module_by_name(module).is_none() {
                return Err(LookupError::UnknownModule {
                    module: String::from(module),
                });
            }
            tree.node_by_qualified_name(module, label)
                .ok_or_else(|| LookupError::UnknownName {
                    name: format!("{module}::{label}"),
                })?
        }
        None => tree
            .nodes_by_label(label)
            .first()
            .copied()
            .ok_or_else(|| LookupError::UnknownName {
                name: String::from(label),
            })?,
    };

    Ok(tree.oid_of(node).extended(suffix.arcs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mib::MibTreeBuilder;
    use crate::resolve::abbreviate;

    fn tree() -> MibTree {
        let mut builder = MibTreeBuilder::with_builtins();
        let if_mib = builder.add_module("IF-MIB").unwrap();
        builder.define(&[1, 3, 6, 1, 2, 1, 2], "interfaces", Some(if_mib)).unwrap();
        builder.finish()
    }

    #[test]
    fn test_lookup_dotted() {
        let oid = lookup(&tree(), ".1.3.6.1").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1]);
        assert!(lookup(&tree(), "").unwrap().is_empty());
    }

    #[test]
    fn test_lookup_bare_label() {
        let oid = lookup(&tree(), "enterprises.9.1").unwrap();
        assert_eq!(oid.to_dotted(), "1.3.6.1.4.1.9.1");
    }

    #[test]
    fn test_lookup_qualified() {
        let oid = lookup(&tree(), "IF-MIB::interfaces").unwrap();
        assert_eq!(oid.to_dotted(), "1.3.6.1.2.1.2");
    }

    #[test]
    fn test_lookup_inverts_abbreviate() {
        let tree = tree();
        for arcs in [&[1u32, 3, 6, 1, 4, 1, 99, 1][..], &[1, 3, 6, 1, 2, 1, 2, 2], &[1, 2]] {
            let name = abbreviate(&tree, arcs);
            assert_eq!(lookup(&tree, &name).unwrap().arcs(), arcs, "{name}");
        }
    }

    #[test]
    fn test_lookup_errors() {
        let tree = tree();
        assert_eq!(
            lookup(&tree, "noSuchThing"),
            Err(LookupError::UnknownName {
                name: String::from("noSuchThing")
            })
        );
        assert_eq!(
            lookup(&tree, "NO-MIB::interfaces"),
            Err(LookupError::UnknownModule {
                module: String::from("NO-MIB")
            })
        );
        assert_eq!(
            lookup(&tree, "SNMPv2-SMI::interfaces"),
            Err(LookupError::UnknownName {
                name: String::from("SNMPv2-SMI::interfaces")
            })
        );
        assert!(matches!(
            lookup(&tree, "enterprises."),
            Err(LookupError::Malformed(ParseOidError::EmptyComponent { index: 1 }))
        ));
        assert!(matches!(
            lookup(&tree, "enterprises.x"),
            Err(LookupError::Malformed(ParseOidError::InvalidComponent { .. }))
        ));
    }
}
