//! Definition lists.
//!
//! A definition list is a JSON array of `{oid, label, module}` records,
//! applied in order on top of the built-in roots:
//!
//! ```json
//! [
//!   {"oid": "1.3.6.1.4.1.9", "label": "cisco", "module": "CISCO-SMI"},
//!   {"oid": "1.3.6.1.4.1.9.1", "label": "ciscoProducts", "module": "CISCO-SMI"}
//! ]
//! ```
//!
//! Parents must appear before their children. `module` may be omitted for
//! unaffiliated nodes.

use std::fs;
use std::io;
use std::path::Path;

use oidname_core::mib::{MibTree, MibTreeBuilder, TreeError};
use oidname_core::Oid;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One symbol definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    /// Full OID of the symbol.
    pub oid: Oid,
    /// Symbolic name.
    pub label: String,
    /// Defining module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

/// Error loading a definition list.
#[derive(Debug, thiserror::Error)]
pub enum DefinitionsError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The file is not a valid definition list.
    #[error("invalid definition list: {0}")]
    Json(#[from] serde_json::Error),
    /// A definition could not be added to the tree.
    #[error("definition #{index} ({label}): {source}")]
    Tree {
        /// Position of the definition in the list.
        index: usize,
        /// Its label.
        label: String,
        /// Why it was rejected.
        #[source]
        source: TreeError,
    },
}

/// Parse a definition list from JSON bytes.
///
/// # Errors
///
/// Returns [`DefinitionsError::Json`] if the bytes are not a definition list,
/// including when an `oid` field is not a well-formed OID.
pub fn parse_definitions(bytes: &[u8]) -> Result<Vec<Definition>, DefinitionsError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Add definitions to a builder, in order.
///
/// # Errors
///
/// Stops at the first definition the tree rejects, typically one whose
/// parent has not been defined.
pub fn apply_definitions(
    builder: &mut MibTreeBuilder,
    defs: &[Definition],
) -> Result<(), DefinitionsError> {
    for (index, def) in defs.iter().enumerate() {
        let tree_err = |source| DefinitionsError::Tree {
            index,
            label: def.label.clone(),
            source,
        };
        let module = def
            .module
            .as_deref()
            .map(|name| builder.add_module(name))
            .transpose()
            .map_err(tree_err)?;
        builder
            .define(def.oid.arcs(), &def.label, module)
            .map_err(tree_err)?;
        debug!(oid = %def.oid, label = %def.label, "defined");
    }
    Ok(())
}

/// Build a tree from built-in roots plus a JSON definition list.
///
/// # Errors
///
/// See [`parse_definitions`] and [`apply_definitions`].
pub fn build_tree(bytes: &[u8]) -> Result<MibTree, DefinitionsError> {
    let defs = parse_definitions(bytes)?;
    let mut builder = MibTreeBuilder::with_builtins();
    apply_definitions(&mut builder, &defs)?;
    let tree = builder.finish();
    info!(
        definitions = defs.len(),
        nodes = tree.node_count(),
        modules = tree.module_count(),
        "built MIB tree"
    );
    Ok(tree)
}

/// Read a definition list file and build a tree from it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or any definition is invalid.
pub fn load_definitions<P: AsRef<Path>>(path: P) -> Result<MibTree, DefinitionsError> {
    let bytes = fs::read(path)?;
    build_tree(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oidname_core::abbreviate;

    const CISCO: &str = r#"[
        {"oid": "1.3.6.1.4.1.9", "label": "cisco", "module": "CISCO-SMI"},
        {"oid": ".1.3.6.1.4.1.9.1", "label": "ciscoProducts", "module": "CISCO-SMI"},
        {"oid": "1.3.6.1.4.1.9.99", "label": "ciscoUnaffiliated"}
    ]"#;

    #[test]
    fn test_parse_definitions() {
        let defs = parse_definitions(CISCO.as_bytes()).unwrap();
        assert_eq!(defs.len(), 3);
        assert_eq!(defs[1].oid.arcs(), &[1, 3, 6, 1, 4, 1, 9, 1]);
        assert_eq!(defs[2].module, None);
    }

    #[test]
    fn test_build_tree() {
        let tree = build_tree(CISCO.as_bytes()).unwrap();
        assert_eq!(abbreviate(&tree, &[1, 3, 6, 1, 4, 1, 9, 1, 5]), "CISCO-SMI::ciscoProducts.5");
        assert_eq!(abbreviate(&tree, &[1, 3, 6, 1, 4, 1, 9, 99]), "ciscoUnaffiliated");
    }

    #[test]
    fn test_bad_oid_is_rejected() {
        let err = parse_definitions(br#"[{"oid": "1..3", "label": "x"}]"#).unwrap_err();
        assert!(matches!(err, DefinitionsError::Json(_)));
    }

    #[test]
    fn test_missing_parent_reports_position() {
        let err = build_tree(br#"[{"oid": "1.3.6.1.4.1.9.9.9", "label": "deep"}]"#).unwrap_err();
        match err {
            DefinitionsError::Tree { index, label, source } => {
                assert_eq!(index, 0);
                assert_eq!(label, "deep");
                assert!(matches!(source, TreeError::MissingParent { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
