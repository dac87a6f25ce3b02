//! Longest-prefix walk of an OID down the MIB tree.

use crate::mib::MibRepository;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "tracing")]
use super::tracing::{TraceEvent, TraceLevel, Tracer};

/// A matched tree node, copied out of the repository.
///
/// Holds no reference into the tree, so it outlives any borrow of it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedNode {
    /// Sub-identifier the node matched.
    pub subid: u32,
    /// Symbolic name.
    pub label: String,
    /// Defining module, empty when the node belongs to none.
    pub module: String,
}

impl ResolvedNode {
    pub(crate) fn from_repo<R: MibRepository>(repo: &R, node: R::Node) -> Self {
        Self {
            subid: repo.subid(node),
            label: String::from(repo.label(node)),
            module: String::from(module_name_of(repo, node)),
        }
    }
}

/// Module name of `node`, empty when unaffiliated.
pub(crate) fn module_name_of<R: MibRepository>(repo: &R, node: R::Node) -> &str {
    repo.module_of(node).map_or("", |m| repo.module_name(m))
}

// ============================================================================
// WalkTracer trait - one walk implementation for traced and untraced paths
// ============================================================================

/// Optional walk tracing; methods default to no-ops.
pub(crate) trait WalkTracer {
    fn trace_start(&mut self, _arcs: &[u32]) {}
    fn trace_matched(&mut self, _depth: usize, _subid: u32, _label: &str) {}
    fn trace_stopped(&mut self, _depth: usize, _subid: u32) {}
    fn trace_end(&mut self, _matched: usize, _total: usize) {}
}

/// No-op tracer for untraced resolution.
pub(crate) struct NoopWalkTracer;

impl WalkTracer for NoopWalkTracer {}

/// Wrapper that adapts a `Tracer` to the `WalkTracer` trait.
#[cfg(feature = "tracing")]
pub(crate) struct TracingWrapper<'a, T: Tracer>(pub(crate) &'a mut T);

#[cfg(feature = "tracing")]
impl<T: Tracer> WalkTracer for TracingWrapper<'_, T> {
    fn trace_start(&mut self, arcs: &[u32]) {
        crate::trace_event!(self.0, TraceLevel::Debug, TraceEvent::WalkStart { arcs });
    }

    fn trace_matched(&mut self, depth: usize, subid: u32, label: &str) {
        crate::trace_event!(
            self.0,
            TraceLevel::Trace,
            TraceEvent::ArcMatched {
                depth,
                subid,
                label
            }
        );
    }

    fn trace_stopped(&mut self, depth: usize, subid: u32) {
        crate::trace_event!(
            self.0,
            TraceLevel::Debug,
            TraceEvent::WalkStopped { depth, subid }
        );
    }

    fn trace_end(&mut self, matched: usize, total: usize) {
        crate::trace_event!(
            self.0,
            TraceLevel::Debug,
            TraceEvent::WalkEnd { matched, total }
        );
    }
}

/// Match `arcs` against the tree from its top level.
///
/// Returns one [`ResolvedNode`] per matched arc: the longest matching prefix.
/// Never fails; an OID with no symbolic prefix yields an empty vector.
pub fn walk<R: MibRepository>(repo: &R, arcs: &[u32]) -> Vec<ResolvedNode> {
    walk_from(repo, repo.root_level(), arcs)
}

/// Match `arcs` starting at the sibling chain `level`.
pub fn walk_from<R: MibRepository>(
    repo: &R,
    level: Option<R::Node>,
    arcs: &[u32],
) -> Vec<ResolvedNode> {
    walk_nodes(repo, level, arcs, &mut NoopWalkTracer)
        .into_iter()
        .map(|node| ResolvedNode::from_repo(repo, node))
        .collect()
}

/// Match `arcs` from the top level, reporting each step to `tracer`.
#[cfg(feature = "tracing")]
pub fn walk_traced<R: MibRepository, T: Tracer>(
    repo: &R,
    arcs: &[u32],
    tracer: &mut T,
) -> Vec<ResolvedNode> {
    walk_nodes(repo, repo.root_level(), arcs, &mut TracingWrapper(tracer))
        .into_iter()
        .map(|node| ResolvedNode::from_repo(repo, node))
        .collect()
}

/// Core walk, returning repository handles.
///
/// Each arc is looked up along the current level's sibling chain; the first
/// node with an equal sub-identifier wins and its children become the next
/// level. The walk stops at the first arc without a match and never revisits
/// earlier levels.
pub(crate) fn walk_nodes<R: MibRepository, TR: WalkTracer>(
    repo: &R,
    level: Option<R::Node>,
    arcs: &[u32],
    tracer: &mut TR,
) -> Vec<R::Node> {
    tracer.trace_start(arcs);
    let mut matched = Vec::with_capacity(arcs.len());
    let mut level = level;

    for (depth, &arc) in arcs.iter().enumerate() {
        let Some(node) = repo.siblings(level).find(|&n| repo.subid(n) == arc) else {
            tracer.trace_stopped(depth, arc);
            break;
        };
        tracer.trace_matched(depth, arc, repo.label(node));
        matched.push(node);
        level = repo.first_child(node);
    }

    tracer.trace_end(matched.len(), arcs.len());
    matched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mib::{MibTree, MibTreeBuilder};

    fn tree() -> MibTree {
        let mut builder = MibTreeBuilder::with_builtins();
        let if_mib = builder.add_module("IF-MIB").unwrap();
        builder.define(&[1, 3, 6, 1, 2, 1, 2], "interfaces", Some(if_mib)).unwrap();
        builder.finish()
    }

    #[test]
    fn test_walk_full_match() {
        let nodes = walk(&tree(), &[1, 3, 6, 1, 4, 1]);
        let labels: Vec<&str> = nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["iso", "org", "dod", "internet", "private", "enterprises"]);

        let last = nodes.last().unwrap();
        assert_eq!(last.subid, 1);
        assert_eq!(last.module, "SNMPv2-SMI");
        assert_eq!(nodes[0].module, "");
    }

    #[test]
    fn test_walk_partial_match() {
        let nodes = walk(&tree(), &[1, 3, 6, 1, 2, 1, 2, 2, 1, 10, 7]);
        assert_eq!(nodes.len(), 7);
        assert_eq!(nodes[6].label, "interfaces");
        assert_eq!(nodes[6].module, "IF-MIB");
    }

    #[test]
    fn test_walk_stops_at_first_miss() {
        // 1.3.7 misses at depth 2; the trailing 1 must not be matched anywhere.
        let nodes = walk(&tree(), &[1, 3, 7, 1]);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_walk_no_match() {
        assert!(walk(&tree(), &[5, 1]).is_empty());
        assert!(walk(&tree(), &[]).is_empty());
        assert!(walk(&MibTree::new(), &[1, 3, 6]).is_empty());
    }

    #[test]
    fn test_walk_from_subtree() {
        let tree = tree();
        let internet = tree.find(&[1, 3, 6, 1]).unwrap();
        let nodes = walk_from(&tree, tree.first_child(internet), &[4, 1, 9]);
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].label, "enterprises");
    }

    #[test]
    fn test_walk_first_sibling_wins() {
        let mut builder = MibTreeBuilder::new();
        let first = builder.append_child(None, 1, "first", None).unwrap();
        builder.append_child(None, 1, "second", None).unwrap();
        builder.append_child(Some(first), 2, "child", None).unwrap();
        let tree = builder.finish();

        let nodes = walk(&tree, &[1, 2]);
        assert_eq!(nodes[0].label, "first");
        assert_eq!(nodes[1].label, "child");
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn test_walk_traced() {
        use crate::resolve::tracing::{TraceEvent, TraceLevel, Tracer};

        #[derive(Default)]
        struct Recorder {
            matched: Vec<u32>,
            stopped: Option<(usize, u32)>,
            end: Option<(usize, usize)>,
        }

        impl Tracer for Recorder {
            fn level(&self) -> TraceLevel {
                TraceLevel::Trace
            }

            fn trace(&mut self, _level: TraceLevel, event: TraceEvent<'_>) {
                match event {
                    TraceEvent::ArcMatched { subid, .. } => self.matched.push(subid),
                    TraceEvent::WalkStopped { depth, subid } => self.stopped = Some((depth, subid)),
                    TraceEvent::WalkEnd { matched, total } => self.end = Some((matched, total)),
                    TraceEvent::WalkStart { .. } => {}
                }
            }
        }

        let mut recorder = Recorder::default();
        let nodes = walk_traced(&tree(), &[1, 3, 6, 99, 1], &mut recorder);
        assert_eq!(nodes.len(), 3);
        assert_eq!(recorder.matched, vec![1, 3, 6]);
        assert_eq!(recorder.stopped, Some((3, 99)));
        assert_eq!(recorder.end, Some((3, 5)));
    }
}
