//! Command-line OID name resolution.
//!
//! ```text
//! oidname abbreviate 1.3.6.1.4.1.9.1.1      # SNMPv2-SMI::enterprises.9.1.1
//! oidname --defs cisco.json lookup CISCO-SMI::ciscoProducts.5
//! oidname --defs cisco.json build-cache --out cisco.omib
//! oidname --cache cisco.omib walk 1.3.6.1.4.1.9.1
//! ```
//!
//! Without `--cache` or `--defs` only the built-in SNMPv2-SMI roots are
//! known.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use oidname_core::mib::MibTree;
use oidname_core::resolve::tracing::Tracer;
use oidname_core::resolve::{abbreviate_traced, walk_traced};
use oidname_core::{lookup, Oid};
use oidname_std::cache::{compute_fingerprint, load_cache, load_definitions_cached, save_cache};
use oidname_std::defs::load_definitions;
use oidname_std::logging::{init_tracing, TracingTracer};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "oidname")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve SNMP OIDs to MIB names and back", long_about = None)]
struct Cli {
    /// Snapshot cache to load (written from --defs when stale)
    #[arg(long, global = true, env = "OIDNAME_CACHE")]
    cache: Option<PathBuf>,

    /// JSON definition list to load on top of the built-in roots
    #[arg(long, global = true, env = "OIDNAME_DEFS")]
    defs: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the abbreviated name of each OID
    Abbreviate {
        /// Dotted-decimal OIDs
        #[arg(required = true)]
        oids: Vec<String>,
    },

    /// Print every node matched along an OID
    Walk {
        /// Dotted-decimal OID
        oid: String,
    },

    /// Print the numeric OID of each name
    Lookup {
        /// Names such as `IF-MIB::ifInOctets.3` or `enterprises.9`
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Build a snapshot cache from --defs
    BuildCache {
        /// Output path
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    init_tracing(cli.json_logs, level);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run the selected command; `Ok(false)` means some inputs were rejected.
fn run(cli: &Cli) -> Result<bool> {
    let mut tracer = TracingTracer;
    match &cli.command {
        Commands::BuildCache { out } => {
            build_cache(cli, out)?;
            Ok(true)
        }
        Commands::Abbreviate { oids } => {
            let tree = load_tree(cli)?;
            Ok(report(abbreviate_args(&tree, oids, &mut tracer)))
        }
        Commands::Walk { oid } => {
            let tree = load_tree(cli)?;
            let oid = Oid::parse(oid).with_context(|| format!("invalid OID {oid:?}"))?;
            for node in walk_traced(&tree, oid.arcs(), &mut tracer) {
                println!("{}\t{}\t{}", node.subid, node.label, node.module);
            }
            Ok(true)
        }
        Commands::Lookup { names } => {
            let tree = load_tree(cli)?;
            Ok(report(lookup_args(&tree, names)))
        }
    }
}

/// Per-argument results: lines for stdout and one message per rejected input.
struct Outcome {
    lines: Vec<String>,
    errors: Vec<String>,
}

/// Print an outcome; `false` when any input was rejected.
fn report(outcome: Outcome) -> bool {
    for line in &outcome.lines {
        println!("{line}");
    }
    for error in &outcome.errors {
        eprintln!("{error}");
    }
    outcome.errors.is_empty()
}

fn abbreviate_args<T: Tracer>(tree: &MibTree, args: &[String], tracer: &mut T) -> Outcome {
    let mut outcome = Outcome {
        lines: Vec::new(),
        errors: Vec::new(),
    };
    for text in args {
        match Oid::parse(text) {
            Ok(oid) => outcome
                .lines
                .push(abbreviate_traced(tree, oid.arcs(), tracer)),
            Err(e) => outcome.errors.push(format!("{text}: {e}")),
        }
    }
    outcome
}

fn lookup_args(tree: &MibTree, args: &[String]) -> Outcome {
    let mut outcome = Outcome {
        lines: Vec::new(),
        errors: Vec::new(),
    };
    for name in args {
        match lookup(tree, name) {
            Ok(oid) => outcome.lines.push(oid.to_dotted()),
            Err(e) => outcome.errors.push(format!("{name}: {e}")),
        }
    }
    outcome
}

fn load_tree(cli: &Cli) -> Result<MibTree> {
    let tree = match (&cli.defs, &cli.cache) {
        (Some(defs), Some(cache)) => load_definitions_cached(defs, cache)
            .with_context(|| format!("loading {}", defs.display()))?,
        (Some(defs), None) => {
            load_definitions(defs).with_context(|| format!("loading {}", defs.display()))?
        }
        (None, Some(cache)) => {
            load_cache(cache).with_context(|| format!("loading cache {}", cache.display()))?
        }
        (None, None) => MibTree::builtin(),
    };
    info!(nodes = tree.node_count(), modules = tree.module_count(), "tree ready");
    Ok(tree)
}

fn build_cache(cli: &Cli, out: &Path) -> Result<()> {
    let Some(defs) = &cli.defs else {
        bail!("build-cache needs --defs");
    };
    let content = std::fs::read(defs).with_context(|| format!("reading {}", defs.display()))?;
    let name = defs
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let fingerprint = compute_fingerprint(&[(name, content.as_slice())]);

    let tree = oidname_std::defs::build_tree(&content)
        .with_context(|| format!("loading {}", defs.display()))?;
    save_cache(&tree, out, Some(fingerprint))
        .with_context(|| format!("writing {}", out.display()))?;
    info!(out = %out.display(), nodes = tree.node_count(), "cache written");
    Ok(())
}
