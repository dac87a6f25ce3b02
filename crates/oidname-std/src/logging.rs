//! Logging setup and the bridge from resolution traces to `tracing`.
//!
//! Call [`init_tracing`] once at program start. Resolution itself stays
//! silent unless a traced entry point is used with [`TracingTracer`], which
//! forwards each walk step as a `tracing` event under the `oidname::walk`
//! target.

use oidname_core::resolve::tracing::{TraceEvent, TraceLevel, Tracer};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter, e.g. `oidname=debug`.
pub const LOG_ENV: &str = "OIDNAME_LOG";

/// Forwards resolution trace events to the `tracing` subscriber.
///
/// The tracer level follows the subscriber's maximum level, so no events
/// are built when nothing would record them.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingTracer;

macro_rules! emit {
    ($level:expr, $($rest:tt)+) => {
        match $level {
            TraceLevel::Error => tracing::error!(target: "oidname::walk", $($rest)+),
            TraceLevel::Warn => tracing::warn!(target: "oidname::walk", $($rest)+),
            TraceLevel::Info => tracing::info!(target: "oidname::walk", $($rest)+),
            TraceLevel::Debug => tracing::debug!(target: "oidname::walk", $($rest)+),
            TraceLevel::Trace => tracing::trace!(target: "oidname::walk", $($rest)+),
        }
    };
}

impl Tracer for TracingTracer {
    fn level(&self) -> TraceLevel {
        trace_level(LevelFilter::current())
    }

    fn trace(&mut self, level: TraceLevel, event: TraceEvent<'_>) {
        match event {
            TraceEvent::WalkStart { arcs } => {
                emit!(level, arcs = ?arcs, "walk start");
            }
            TraceEvent::ArcMatched {
                depth,
                subid,
                label,
            } => {
                emit!(level, depth, subid, label, "arc matched");
            }
            TraceEvent::WalkStopped { depth, subid } => {
                emit!(level, depth, subid, "no symbol at level");
            }
            TraceEvent::WalkEnd { matched, total } => {
                emit!(level, matched, total, "walk end");
            }
        }
    }
}

/// Map a subscriber level filter to the resolver's trace level.
fn trace_level(filter: LevelFilter) -> TraceLevel {
    if filter >= LevelFilter::TRACE {
        TraceLevel::Trace
    } else if filter >= LevelFilter::DEBUG {
        TraceLevel::Debug
    } else if filter >= LevelFilter::INFO {
        TraceLevel::Info
    } else if filter >= LevelFilter::WARN {
        TraceLevel::Warn
    } else {
        TraceLevel::Error
    }
}

/// Initialise the global tracing subscriber, logging to stderr.
///
/// * `json` - emit newline-delimited JSON instead of human-readable lines.
/// * `level` - default verbosity when neither `OIDNAME_LOG` nor `RUST_LOG`
///   is set.
///
/// Safe to call multiple times; only the first call takes effect.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
