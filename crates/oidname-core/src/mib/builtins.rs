//! Built-in OID tree roots.
//!
//! These are the well-known nodes every MIB hangs from. They are defined in
//! SNMPv2-SMI (apart from the three ISO/ITU-T roots, which belong to no
//! module) and are available without loading any MIB file, so
//! `1.3.6.1.4.1.9` abbreviates to `SNMPv2-SMI::enterprises.9` on a bare tree.

/// Module that defines the built-in nodes below the roots.
pub const SNMPV2_SMI: &str = "SNMPv2-SMI";

/// Index constants for built-in OID nodes.
///
/// These indices correspond to positions in [`BUILTIN_OID_NODES`].
pub mod idx {
    /// `ccitt(0)` - ITU-T root.
    pub const CCITT: usize = 0;
    /// `iso(1)` - ISO root.
    pub const ISO: usize = 1;
    /// `joint-iso-ccitt(2)` - joint root.
    pub const JOINT_ISO_CCITT: usize = 2;
    /// `zeroDotZero(0.0)` - Special null/unknown OID value.
    pub const ZERO_DOT_ZERO: usize = 3;
    /// `org(3)` - ISO organizations.
    pub const ORG: usize = 4;
    /// `dod(6)` - US Department of Defense.
    pub const DOD: usize = 5;
    /// `internet(1)` - Internet subtree (1.3.6.1).
    pub const INTERNET: usize = 6;
    /// `directory(1)` - Internet directory (1.3.6.1.1).
    pub const DIRECTORY: usize = 7;
    /// `mgmt(2)` - Internet management (1.3.6.1.2).
    pub const MGMT: usize = 8;
    /// `mib-2(1)` - MIB-2 root (1.3.6.1.2.1).
    pub const MIB_2: usize = 9;
    /// `transmission(10)` - Transmission media (1.3.6.1.2.1.10).
    pub const TRANSMISSION: usize = 10;
    /// `experimental(3)` - Experimental area (1.3.6.1.3).
    pub const EXPERIMENTAL: usize = 11;
    /// `private(4)` - Private enterprises (1.3.6.1.4).
    pub const PRIVATE: usize = 12;
    /// `enterprises(1)` - Enterprise MIBs (1.3.6.1.4.1).
    pub const ENTERPRISES: usize = 13;
    /// `security(5)` - Security area (1.3.6.1.5).
    pub const SECURITY: usize = 14;
    /// `snmpV2(6)` - SNMPv2 area (1.3.6.1.6).
    pub const SNMPV2: usize = 15;
    /// `snmpDomains(1)` - SNMP domains (1.3.6.1.6.1).
    pub const SNMP_DOMAINS: usize = 16;
    /// `snmpProxys(2)` - SNMP proxies (1.3.6.1.6.2).
    pub const SNMP_PROXYS: usize = 17;
    /// `snmpModules(3)` - SNMP modules (1.3.6.1.6.3).
    pub const SNMP_MODULES: usize = 18;
}

/// A built-in OID tree node.
#[derive(Clone, Debug)]
pub struct BuiltinOidNode {
    /// The canonical name of this node.
    pub name: &'static str,
    /// The arc (subidentifier) at this position.
    pub arc: u32,
    /// Index of the parent node in [`BUILTIN_OID_NODES`], or `None` for roots.
    pub parent: Option<usize>,
    /// Defining module, `None` for the unaffiliated roots.
    pub module: Option<&'static str>,
}

const fn root(name: &'static str, arc: u32) -> BuiltinOidNode {
    BuiltinOidNode {
        name,
        arc,
        parent: None,
        module: None,
    }
}

const fn smi(name: &'static str, arc: u32, parent: usize) -> BuiltinOidNode {
    BuiltinOidNode {
        name,
        arc,
        parent: Some(parent),
        module: Some(SNMPV2_SMI),
    }
}

/// All built-in OID nodes, parents before children.
///
/// The order matches the index constants in [`idx`] and is also the sibling
/// order the nodes get in a tree seeded with them.
pub static BUILTIN_OID_NODES: &[BuiltinOidNode] = &[
    root("ccitt", 0),
    root("iso", 1),
    root("joint-iso-ccitt", 2),
    smi("zeroDotZero", 0, idx::CCITT),
    smi("org", 3, idx::ISO),
    smi("dod", 6, idx::ORG),
    smi("internet", 1, idx::DOD),
    smi("directory", 1, idx::INTERNET),
    smi("mgmt", 2, idx::INTERNET),
    smi("mib-2", 1, idx::MGMT),
    smi("transmission", 10, idx::MIB_2),
    smi("experimental", 3, idx::INTERNET),
    smi("private", 4, idx::INTERNET),
    smi("enterprises", 1, idx::PRIVATE),
    smi("security", 5, idx::INTERNET),
    smi("snmpV2", 6, idx::INTERNET),
    smi("snmpDomains", 1, idx::SNMPV2),
    smi("snmpProxys", 2, idx::SNMPV2),
    smi("snmpModules", 3, idx::SNMPV2),
];

impl BuiltinOidNode {
    /// Compute the full numeric OID for this node.
    #[must_use]
    pub fn numeric_oid(&self, nodes: &[BuiltinOidNode]) -> alloc::vec::Vec<u32> {
        let mut path = alloc::vec::Vec::new();
        let mut current = Some(self);
        while let Some(node) = current {
            path.push(node.arc);
            current = node.parent.and_then(|idx| nodes.get(idx));
        }
        path.reverse();
        path
    }
}

/// Look up a built-in OID node by name.
///
/// Returns the index and a reference to the node if found.
#[must_use]
pub fn lookup_builtin_oid(name: &str) -> Option<(usize, &'static BuiltinOidNode)> {
    BUILTIN_OID_NODES
        .iter()
        .enumerate()
        .find(|(_, node)| node.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parents_precede_children() {
        for (i, node) in BUILTIN_OID_NODES.iter().enumerate() {
            if let Some(parent) = node.parent {
                assert!(parent < i, "{} listed before its parent", node.name);
            }
        }
    }

    #[test]
    fn test_roots_are_unaffiliated() {
        for i in [idx::CCITT, idx::ISO, idx::JOINT_ISO_CCITT] {
            let node = &BUILTIN_OID_NODES[i];
            assert!(node.parent.is_none());
            assert!(node.module.is_none());
        }
    }

    #[test]
    fn test_enterprises_oid() {
        let node = &BUILTIN_OID_NODES[idx::ENTERPRISES];
        assert_eq!(node.name, "enterprises");
        assert_eq!(node.module, Some(SNMPV2_SMI));
        assert_eq!(node.numeric_oid(BUILTIN_OID_NODES), vec![1, 3, 6, 1, 4, 1]);
    }

    #[test]
    fn test_mib2_oid() {
        let node = &BUILTIN_OID_NODES[idx::MIB_2];
        assert_eq!(node.numeric_oid(BUILTIN_OID_NODES), vec![1, 3, 6, 1, 2, 1]);
    }

    #[test]
    fn test_zero_dot_zero() {
        let node = &BUILTIN_OID_NODES[idx::ZERO_DOT_ZERO];
        assert_eq!(node.name, "zeroDotZero");
        assert_eq!(node.numeric_oid(BUILTIN_OID_NODES), vec![0, 0]);
    }

    #[test]
    fn test_snmp_modules_oid() {
        let node = &BUILTIN_OID_NODES[idx::SNMP_MODULES];
        assert_eq!(node.numeric_oid(BUILTIN_OID_NODES), vec![1, 3, 6, 1, 6, 3]);
    }

    #[test]
    fn test_lookup_by_name() {
        let (i, node) = lookup_builtin_oid("internet").unwrap();
        assert_eq!(i, idx::INTERNET);
        assert_eq!(node.arc, 1);
        assert!(lookup_builtin_oid("foobar").is_none());
    }
}
