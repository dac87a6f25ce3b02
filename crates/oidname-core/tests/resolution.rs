//! End-to-end resolution against a small SNMPv2 tree.

use oidname_core::mib::{MibRepository, MibTree, MibTreeBuilder};
use oidname_core::{abbreviate, lookup, walk, Oid, ParseOidError};

/// Built-in roots plus a slice of SNMPv2-MIB and IF-MIB.
fn fixture() -> MibTree {
    let mut builder = MibTreeBuilder::with_builtins();
    let snmpv2_mib = builder.add_module("SNMPv2-MIB").unwrap();
    let if_mib = builder.add_module("IF-MIB").unwrap();

    let defs: &[(&str, &str, _)] = &[
        ("1.3.6.1.2.1.1", "system", snmpv2_mib),
        ("1.3.6.1.2.1.1.1", "sysDescr", snmpv2_mib),
        ("1.3.6.1.2.1.1.3", "sysUpTime", snmpv2_mib),
        ("1.3.6.1.2.1.1.5", "sysName", snmpv2_mib),
        ("1.3.6.1.2.1.2", "interfaces", if_mib),
        ("1.3.6.1.2.1.2.1", "ifNumber", if_mib),
        ("1.3.6.1.2.1.2.2", "ifTable", if_mib),
        ("1.3.6.1.2.1.2.2.1", "ifEntry", if_mib),
        ("1.3.6.1.2.1.2.2.1.2", "ifDescr", if_mib),
        ("1.3.6.1.2.1.2.2.1.10", "ifInOctets", if_mib),
    ];
    for (oid, label, module) in defs {
        let oid: Oid = oid.parse().unwrap();
        builder.define(oid.arcs(), label, Some(*module)).unwrap();
    }
    builder.finish()
}

fn oid(s: &str) -> Oid {
    s.parse().unwrap()
}

#[test]
fn test_dotted_round_trip() {
    for s in ["1", "1.3.6.1.4.1.4", "1.3.6.1.2.1.2.2.1.10.1", "0.0"] {
        assert_eq!(oid(s).to_string(), s);
    }
}

#[test]
fn test_malformed_inputs() {
    assert!(matches!(
        Oid::parse("1..2"),
        Err(ParseOidError::EmptyComponent { .. })
    ));
    assert!(matches!(
        Oid::parse("1.2."),
        Err(ParseOidError::EmptyComponent { .. })
    ));
    assert!(matches!(
        Oid::parse("1.a.2"),
        Err(ParseOidError::InvalidComponent { .. })
    ));
}

#[test]
fn test_leading_dot_is_root() {
    assert_eq!(oid(".1.3.6"), oid("1.3.6"));
}

#[test]
fn test_enterprises() {
    let tree = fixture();
    assert_eq!(abbreviate(&tree, oid("1.3.6.1.4.1").arcs()), "SNMPv2-SMI::enterprises");
    assert_eq!(
        abbreviate(&tree, oid("1.3.6.1.4.1.99.1").arcs()),
        "SNMPv2-SMI::enterprises.99.1"
    );
    assert_eq!(abbreviate(&tree, &[]), "");
}

#[test]
fn test_scalar_and_column_instances() {
    let tree = fixture();
    assert_eq!(abbreviate(&tree, oid("1.3.6.1.2.1.1.5.0").arcs()), "SNMPv2-MIB::sysName.0");
    assert_eq!(
        abbreviate(&tree, oid("1.3.6.1.2.1.2.2.1.10.12").arcs()),
        "IF-MIB::ifInOctets.12"
    );
    assert_eq!(abbreviate(&tree, oid("1.3.6.1.2.1.2.2.1.99.12").arcs()), "IF-MIB::ifEntry.99.12");
}

#[test]
fn test_walk_is_contiguous_prefix() {
    let tree = fixture();
    for s in [
        "1.3.6.1.2.1.1.1.0",
        "1.3.6.1.2.1.9.1.1",
        "1.3.9.1.2.1",
        "2.1",
        "4.3.2.1",
        "1.3.6.1.4.1.9.9.9.9.9",
    ] {
        let arcs = oid(s);
        let nodes = walk(&tree, arcs.arcs());
        assert!(nodes.len() <= arcs.len(), "{s}");
        // Every matched node sits at its own position in the OID.
        for (node, arc) in nodes.iter().zip(arcs.arcs()) {
            assert_eq!(node.subid, *arc, "{s}");
        }
        // The walk only stops where the level really has no such arc.
        if let Some(&next) = arcs.arcs().get(nodes.len()) {
            let prefix = &arcs.arcs()[..nodes.len()];
            let level = if prefix.is_empty() {
                tree.root_level()
            } else {
                tree.find(prefix).and_then(|n| tree.first_child(n))
            };
            assert!(tree.siblings(level).all(|n| tree.subid(n) != next), "{s}");
        }
    }
}

#[test]
fn test_lookup_round_trip() {
    let tree = fixture();
    for s in ["1.3.6.1.2.1.1.5.0", "1.3.6.1.2.1.2.2.1.10.12", "1.3.6.1.4.1.99", "7.7"] {
        let name = abbreviate(&tree, oid(s).arcs());
        assert_eq!(lookup(&tree, &name).unwrap(), oid(s), "{name}");
    }
}

#[test]
fn test_concurrent_resolution_matches_sequential() {
    let tree = fixture();
    let inputs: Vec<Oid> = (0..64u32)
        .map(|i| oid("1.3.6.1.2.1.2.2.1").extended(&[i % 12, i]))
        .chain((0..64u32).map(|i| oid("1.3.6.1.4.1").child(i)))
        .collect();

    let sequential: Vec<String> = inputs.iter().map(|o| abbreviate(&tree, o.arcs())).collect();

    let concurrent: Vec<String> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .chunks(16)
            .map(|chunk| {
                let tree = &tree;
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|o| abbreviate(tree, o.arcs()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(concurrent, sequential);
}
