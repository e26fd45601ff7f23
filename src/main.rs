//! Cladepaint CLI.
//!
//! Command-line interface for colouring phylogenetic trees by alignment
//! sites.

use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

use cladepaint::input::{Input, Options};

/// Colour a phylogenetic tree by the states of an alignment, one tree per
/// selected site.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Tree file
    tree: PathBuf,

    /// Alignment file
    alignment: PathBuf,

    /// Colour branches as well as tip labels
    #[arg(short = 'b', long = "branches")]
    branches: bool,

    /// Tree file format (newick or nexus)
    #[arg(long = "tree-format", default_value = "newick")]
    tree_format: String,

    /// Alignment file format (fasta or phylip)
    #[arg(long = "align-format", default_value = "fasta")]
    align_format: String,

    /// Output format (figtree or newick)
    #[arg(long = "out-format", default_value = "figtree")]
    out_format: String,

    /// Sites to colour, e.g. "2,4-6" (1-based, default: all)
    #[arg(long = "sites", default_value = "")]
    sites: String,

    /// Custom colour file with one "symbol,#RRGGBB" entry per line
    #[arg(long = "colours", alias = "colors")]
    colours: Option<PathBuf>,

    /// Output file (default: tree file name prefixed with "col_")
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let options = Options {
        tree_path: cli.tree,
        alignment_path: cli.alignment,
        tree_format: cli.tree_format,
        alignment_format: cli.align_format,
        output_format: cli.out_format,
        color_branches: cli.branches,
        sites: cli.sites,
        colors_path: cli.colours,
        output_path: cli.output,
    };

    let result = Input::load(&options).and_then(|input| {
        info!(
            "tree: {}, alignment: {}",
            options.tree_path.display(),
            options.alignment_path.display()
        );
        cladepaint::run(&input)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
