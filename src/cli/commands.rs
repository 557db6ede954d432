//! Command dispatch

use std::io::{self, Read, Write};

use tracing::{debug, info, instrument};

use crate::application::{CompressOutput, DecompressOutput, TransformService};
use crate::cli::args::{Cli, Mode};
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::config::Settings;
use crate::tree_traits::TreeNodeConvert;

/// Effective options after layering config and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub settings: Settings,
}

impl RunOptions {
    /// Command line flags override loaded settings.
    pub fn resolve(cli: &Cli, settings: Settings) -> Self {
        Self {
            settings: Settings {
                strategy: cli.strategy.unwrap_or(settings.strategy),
                stats: cli.stats || settings.stats,
                show: cli.show || settings.show,
            },
        }
    }
}

/// Runs the selected mode against stdin and stdout.
pub fn execute_command(cli: &Cli, settings: Settings) -> CliResult<()> {
    let options = RunOptions::resolve(cli, settings);
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(cli.selected_mode(), &options, stdin.lock(), stdout.lock())
}

/// Without a mode nothing is read and nothing is written.
#[instrument(level = "debug", skip(input, output))]
pub fn run<R: Read, W: Write>(
    mode: Option<Mode>,
    options: &RunOptions,
    input: R,
    output: W,
) -> CliResult<()> {
    let service = TransformService::new(options.settings.strategy);
    match mode {
        Some(Mode::Compress) => {
            let result = service.compress_stream(input, output)?;
            report_compress(&result, &options.settings);
        }
        Some(Mode::Decompress) => {
            let result = service.decompress_stream(input, output)?;
            report_decompress(&result, &options.settings);
        }
        None => debug!("no mode selected, nothing to do"),
    }
    Ok(())
}

fn report_compress(result: &CompressOutput, settings: &Settings) {
    let stats = &result.stats;
    info!(
        input_nodes = stats.input_nodes,
        dag_nodes = stats.dag_nodes(),
        back_references = stats.back_references,
        "compressed"
    );
    if settings.show {
        output::header("input tree");
        eprint!("{}", result.input.to_tree_string());
        output::header("compressed DAG");
        eprint!("{}", result.dag.to_tree_string());
    }
    if settings.stats {
        output::action(
            "compressed",
            &format!("{} tree nodes -> {} DAG nodes", stats.input_nodes, stats.dag_nodes()),
        );
        output::detail(&format!("cataloged subtrees: {}", stats.cataloged));
        output::detail(&format!("back-references: {}", stats.back_references));
        output::detail(&format!("strategy: {}", settings.strategy));
    }
}

fn report_decompress(result: &DecompressOutput, settings: &Settings) {
    let stats = &result.stats;
    info!(
        dag_nodes = stats.dag_nodes,
        tree_nodes = stats.tree_nodes,
        back_references = stats.back_references,
        "decompressed"
    );
    if settings.show {
        output::header("input DAG");
        eprint!("{}", result.input.to_tree_string());
        output::header("expanded tree");
        eprint!("{}", result.tree.to_tree_string());
    }
    if settings.stats {
        output::action(
            "decompressed",
            &format!("{} DAG nodes -> {} tree nodes", stats.dag_nodes, stats.tree_nodes),
        );
        output::detail(&format!("expanded back-references: {}", stats.back_references));
    }
}
