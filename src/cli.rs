use crate::supermatrix::{LabelScheme, LengthPolicy};
use crate::utils::{Result, STDIN_TOKEN};
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="phylobusco",
          version=&**FULL_VERSION,
          about="Supermatrix and single-copy dataset preparation from BUSCO results",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Concatenate per-gene alignments into a supermatrix")]
    Concat(ConcatArgs),
    #[clap(about = "Select single-copy BUSCO genes by taxon coverage")]
    Select(SelectArgs),
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("concat")))]
#[command(arg_required_else_help(true))]
pub struct ConcatArgs {
    #[clap(help = "List of trimmed gene alignment files, one per line ('-' for stdin)")]
    #[clap(value_name = "ALIGNMENT_LIST")]
    #[arg(value_parser = check_list_source)]
    pub alignment_list: String,

    #[clap(short = 'o')]
    #[clap(long = "out")]
    #[clap(help = "Output supermatrix FASTA")]
    #[clap(value_name = "FASTA")]
    #[clap(default_value = "super_BUSCO_matrix.faa")]
    #[arg(value_parser = check_output_path)]
    pub output_path: PathBuf,

    #[clap(short = 'm')]
    #[clap(long = "model-list")]
    #[clap(help = "List of alignment files and their evolutionary models")]
    #[clap(value_name = "MODEL_LIST")]
    #[arg(value_parser = check_file_exists)]
    pub model_list: Option<PathBuf>,

    #[clap(short = 'p')]
    #[clap(long = "partition-scheme")]
    #[clap(help = "Output partition scheme (written with --model-list)")]
    #[clap(value_name = "SCHEME")]
    #[clap(default_value = "best_BUSCO_scheme.txt")]
    #[arg(value_parser = check_output_path)]
    pub partition_scheme: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "label-scheme")]
    #[clap(value_name = "SCHEME")]
    #[clap(help = "How gene labels are derived from file names (first-dot or file-stem)")]
    #[clap(default_value = "first-dot")]
    pub label_scheme: LabelScheme,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "length-check")]
    #[clap(value_name = "POLICY")]
    #[clap(help = "Handling of sequences with a length different from their alignment (lenient or strict)")]
    #[clap(default_value = "lenient")]
    pub length_policy: LengthPolicy,
}

#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("select")))]
#[command(arg_required_else_help(true))]
pub struct SelectArgs {
    #[clap(help = "List of taxon labels and BUSCO full_table.tsv paths ('-' for stdin)")]
    #[clap(value_name = "LABEL_LIST")]
    #[arg(value_parser = check_list_source)]
    pub label_list: String,

    #[clap(required = true)]
    #[clap(short = 'B')]
    #[clap(long = "busco-desc")]
    #[clap(help = "Table of BUSCO gene descriptions: id, description, OrthoDB url")]
    #[clap(value_name = "BUSCO_DESC")]
    #[arg(value_parser = check_file_exists)]
    pub busco_desc: PathBuf,

    #[clap(short = 'o')]
    #[clap(long = "out-matrix")]
    #[clap(help = "Output BUSCO coverage matrix")]
    #[clap(value_name = "TSV")]
    #[clap(default_value = "busco_full_matrix.tsv")]
    #[arg(value_parser = check_output_path)]
    pub out_matrix: PathBuf,

    #[clap(short = 't')]
    #[clap(long = "taxa-coverage")]
    #[clap(help = "Minimum percentage of taxa with a complete copy of a gene")]
    #[clap(value_name = "PERC")]
    #[clap(default_value = "80")]
    #[arg(value_parser = coverage_in_range)]
    pub taxa_coverage: u8,

    #[clap(short = 'O')]
    #[clap(long = "out-dir")]
    #[clap(help = "Output directory for single-copy gene datasets")]
    #[clap(value_name = "DIR")]
    #[clap(default_value = "single_copy_BUSCO_dataset")]
    pub out_dir: PathBuf,
}

pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_output_path(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(format!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(path.to_path_buf())
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        Err(format!("File does not exist: {}", path.display()))
    } else {
        Ok(path.to_path_buf())
    }
}

fn check_list_source(s: &str) -> Result<String> {
    if s == STDIN_TOKEN {
        return Ok(s.to_string());
    }
    check_file_exists(s).map(|_| s.to_string())
}

fn coverage_in_range(s: &str) -> Result<u8> {
    let coverage: u8 = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid taxon coverage", s))?;
    if (1..=100).contains(&coverage) {
        Ok(coverage)
    } else {
        Err("Taxon coverage must be between 1 and 100".into())
    }
}
