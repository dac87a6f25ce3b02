//! Abbreviated names: deepest symbolic match plus the numeric remainder.

use super::walk::{module_name_of, walk_nodes, NoopWalkTracer, WalkTracer};
use crate::mib::MibRepository;
use crate::oid::append_arcs;
use alloc::string::String;

#[cfg(feature = "tracing")]
use super::{tracing::Tracer, walk::TracingWrapper};

/// Render `arcs` as `Module::label.suffix`.
///
/// The deepest matched node supplies the name (qualified by its module when
/// it has one) and any unmatched arcs follow in dotted decimal:
///
/// ```
/// use oidname_core::{abbreviate, MibTree};
///
/// let tree = MibTree::builtin();
/// assert_eq!(abbreviate(&tree, &[1, 3, 6, 1, 4, 1]), "SNMPv2-SMI::enterprises");
/// assert_eq!(abbreviate(&tree, &[1, 3, 6, 1, 4, 1, 99, 1]), "SNMPv2-SMI::enterprises.99.1");
/// assert_eq!(abbreviate(&tree, &[7, 1]), "7.1");
/// assert_eq!(abbreviate(&tree, &[]), "");
/// ```
pub fn abbreviate<R: MibRepository>(repo: &R, arcs: &[u32]) -> String {
    let mut buf = String::new();
    append_abbreviated_name(&mut buf, repo, arcs);
    buf
}

/// Append the abbreviated name of `arcs` to `buf`.
pub fn append_abbreviated_name<R: MibRepository>(buf: &mut String, repo: &R, arcs: &[u32]) {
    append_name(buf, repo, arcs, &mut NoopWalkTracer);
}

/// [`abbreviate`], reporting the underlying walk to `tracer`.
#[cfg(feature = "tracing")]
pub fn abbreviate_traced<R: MibRepository, T: Tracer>(
    repo: &R,
    arcs: &[u32],
    tracer: &mut T,
) -> String {
    let mut buf = String::new();
    append_name(&mut buf, repo, arcs, &mut TracingWrapper(tracer));
    buf
}

fn append_name<R: MibRepository, TR: WalkTracer>(
    buf: &mut String,
    repo: &R,
    arcs: &[u32],
    tracer: &mut TR,
) {
    let matched = walk_nodes(repo, repo.root_level(), arcs, tracer);
    if let Some(&deepest) = matched.last() {
        let module = module_name_of(repo, deepest);
        if !module.is_empty() {
            buf.push_str(module);
            buf.push_str("::");
        }
        buf.push_str(repo.label(deepest));
    }
    // Matched arcs are consumed by the name; a dot joins it to the remainder.
    let consumed = matched.len();
    append_arcs(buf, &arcs[consumed..], consumed > 0);
}
