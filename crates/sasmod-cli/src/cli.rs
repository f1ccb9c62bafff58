use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    name = "sasmod",
    version,
    about = "sasmod CLI - Evaluate analytic small-angle scattering models such as the Percus-Yevick hard-sphere structure factor.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel evaluation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the registered models.
    List(ListArgs),
    /// Show the parameter table and geometry support of a model.
    Info(InfoArgs),
    /// Evaluate a model on a q grid and write `q,intensity` CSV.
    Eval(EvalArgs),
    /// Report form volume, effective radius and volume ratio of a model.
    Geometry(GeometryArgs),
}

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list models of this category (e.g. 'structure-factor', 'shape', 'shape:cylinder').
    #[arg(long, value_name = "KIND")]
    pub category: Option<String>,
}

/// Arguments for the `info` subcommand.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Model name or legacy alias (e.g. 'hardsphere' or 'HardsphereStructure').
    #[arg(required = true, value_name = "MODEL")]
    pub model: String,
}

/// Arguments for the `eval` subcommand.
#[derive(Args, Debug)]
pub struct EvalArgs {
    // --- Core Arguments ---
    /// Model name or legacy alias.
    #[arg(required = true, value_name = "MODEL")]
    pub model: String,

    /// Path to an evaluation configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Flat `name = value` TOML file of parameter values.
    #[arg(short, long = "params", value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Output CSV file. Writes to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    // --- q Grid Overrides ---
    /// Lower end of the q grid in 1/Ang.
    #[arg(long, value_name = "FLOAT")]
    pub q_min: Option<f64>,

    /// Upper end of the q grid in 1/Ang.
    #[arg(long, value_name = "FLOAT")]
    pub q_max: Option<f64>,

    /// Number of q points.
    #[arg(long, value_name = "INT")]
    pub points: Option<usize>,

    /// Override `q-range.spacing` from the config file.
    #[command(flatten)]
    pub spacing: SpacingFlags,

    /// Read q values from the first column of a CSV or text file instead of a grid.
    #[arg(long, value_name = "PATH", conflicts_with_all = ["q_min", "q_max", "points"])]
    pub q_file: Option<PathBuf>,

    /// Evaluate the oriented model along qx at this fixed qy.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub qy: Option<f64>,

    // --- Scaling Overrides ---
    /// Override the scale factor.
    #[arg(long, value_name = "FLOAT")]
    pub scale: Option<f64>,

    /// Override the constant background.
    #[arg(long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub background: Option<f64>,

    /// Set a model parameter or configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S volfraction=0.3 -S q-range.points=500
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// A group to handle mutually exclusive q spacing flags.
#[derive(Args, Debug, Clone, Copy)]
#[group(required = false, multiple = false)]
pub struct SpacingFlags {
    /// Space q points linearly.
    #[arg(long)]
    pub linear: bool,
    /// Space q points logarithmically.
    #[arg(long)]
    pub log: bool,
}

/// Arguments for the `geometry` subcommand.
#[derive(Args, Debug)]
pub struct GeometryArgs {
    /// Model name or legacy alias.
    #[arg(required = true, value_name = "MODEL")]
    pub model: String,

    /// Flat `name = value` TOML file of parameter values.
    #[arg(short, long = "params", value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Set a model parameter. Can be used multiple times. Example: -S radius=30
    #[arg(short = 'S', long = "set", value_name = "NAME=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn eval_parses_grid_flags_and_repeated_sets() {
        let cli = Cli::parse_from([
            "sasmod", "-vv", "eval", "hardsphere", "--q-min", "0.001", "--q-max", "0.3",
            "--points", "50", "--linear", "-S", "volfraction=0.3", "-S", "effect_radius=40",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Eval(args) = cli.command else {
            panic!("expected eval subcommand");
        };
        assert_eq!(args.model, "hardsphere");
        assert_eq!(args.q_min, Some(0.001));
        assert_eq!(args.points, Some(50));
        assert!(args.spacing.linear);
        assert!(!args.spacing.log);
        assert_eq!(args.set_values, vec!["volfraction=0.3", "effect_radius=40"]);
    }

    #[test]
    fn spacing_flags_are_mutually_exclusive() {
        let result = Cli::try_parse_from(["sasmod", "eval", "guinier", "--linear", "--log"]);
        assert!(result.is_err());
    }

    #[test]
    fn q_file_conflicts_with_grid_flags() {
        let result =
            Cli::try_parse_from(["sasmod", "eval", "guinier", "--q-file", "q.csv", "--points", "5"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let result = Cli::try_parse_from(["sasmod", "-q", "-v", "list"]);
        assert!(result.is_err());
    }
}
