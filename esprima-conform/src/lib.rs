//! Conformance runner for the Hermes JavaScript parser against the Esprima test suite.
//!
//! Every Esprima fixture `foo.js` is paired with an expected artifact. The
//! runner feeds the fixture to Hermes, captures its JSON tree dump and decides
//! whether the dump agrees with what Esprima recorded. Tree comparison itself is
//! generic and lives in `ast-diff-core`; this crate supplies the two grammars.
//!
//! # Architecture
//!
//! ## Grammars
//!
//! - [`kind`] - Node kinds the grammars rewrite or suppress fields on
//! - [`rules`] - Per-grammar suppression tables
//! - [`normalize`] - Hermes and Esprima node rewrites
//!
//! ## Running tests
//!
//! - [`fixture`] - Locate and load expected artifacts
//! - [`process`] - Run the parser under a time bound
//! - [`classify`] - Turn process output into a test status
//! - [`runner`] - Run a fixture set and summarize it
//! - [`config`] - Runner settings from TOML
//!
//! ## Reporting
//!
//! - [`outcome`] - Test statuses and reasons
//! - [`diagnostics`] - Trimmed trees for failed comparisons
//! - [`report`] - Terminal-friendly colored output
//!
//! # Examples
//!
//! ```ignore
//! use esprima_conform::config::default_config;
//! use esprima_conform::runner::{RunSummary, Runner};
//!
//! let command = default_config().parser_command(Some("build/bin/hermes".as_ref()), None)?;
//! let reports = Runner::new(command, false).run_all(&["test/esprima".into()])?;
//! println!("{:?}", RunSummary::from_reports(&reports));
//! ```

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod fixture;
pub mod kind;
pub mod normalize;
pub mod outcome;
pub mod process;
pub mod report;
pub mod rules;
pub mod runner;

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "esprima_conform=info";

/// Initialize the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `debug` raises this crate to debug level.
pub fn init_tracing(debug: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let fallback = if debug {
        "esprima_conform=debug"
    } else {
        DEFAULT_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
