//! Resolution tracing support.
//!
//! Provides structured trace events for debugging why an OID resolved the
//! way it did. The traced entry points are only compiled with the `tracing`
//! feature; the plain ones carry no tracing cost.

/// Trace verbosity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraceLevel {
    /// Critical errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages.
    Info,
    /// Walk boundaries and outcomes.
    Debug,
    /// Every matched arc.
    Trace,
}

/// Structured trace events emitted during resolution.
#[derive(Clone, Debug)]
pub enum TraceEvent<'a> {
    /// A walk is starting.
    WalkStart {
        /// The OID being resolved.
        arcs: &'a [u32],
    },
    /// An arc matched a node.
    ArcMatched {
        /// Zero-based position of the arc in the OID.
        depth: usize,
        /// The matched sub-identifier.
        subid: u32,
        /// Label of the matched node.
        label: &'a str,
    },
    /// No node at the current level matched; the rest of the OID is numeric.
    WalkStopped {
        /// Position of the first unmatched arc.
        depth: usize,
        /// The unmatched sub-identifier.
        subid: u32,
    },
    /// A walk has ended.
    WalkEnd {
        /// Number of arcs matched.
        matched: usize,
        /// Number of arcs in the OID.
        total: usize,
    },
}

/// Trait for receiving trace events during resolution.
///
/// The tracer can filter events by returning a minimum trace level
/// from `level()`.
pub trait Tracer {
    /// Returns the minimum trace level to emit.
    ///
    /// Events below this level will not be passed to `trace()`.
    /// Default: `TraceLevel::Info`.
    fn level(&self) -> TraceLevel {
        TraceLevel::Info
    }

    /// Called for each trace event at or above the configured level.
    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>);
}

/// A no-op tracer that discards all events.
#[derive(Default, Clone, Copy, Debug)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn level(&self) -> TraceLevel {
        TraceLevel::Error
    }

    fn trace(&mut self, _level: TraceLevel, _event: TraceEvent<'_>) {}
}

/// Emit a trace event if the tracer level permits.
///
/// The level is checked before the event is constructed.
#[macro_export]
macro_rules! trace_event {
    ($tracer:expr, $level:expr, $event:expr) => {
        if $level <= $tracer.level() {
            $tracer.trace($level, $event);
        }
    };
}
