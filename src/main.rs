//! CLI for md-autonumber - numbers (or un-numbers) Markdown headings in place.

use clap::{ArgGroup, Parser};
use md_autonumber::document::{collect_markdown_files, Document};
use md_autonumber::{load_style, AutoNumberer, NumeralRegistry, Result, StyleSource, Stripper};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Style used when `--style` is not given.
const DEFAULT_STYLE: &str = "default_style";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["files", "folders"])))]
struct Args {
    /// Markdown files to process (`.md` is appended when missing)
    #[arg(short, long, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Folders whose `.md` files are processed
    #[arg(long, num_args = 1..)]
    folders: Vec<PathBuf>,

    /// Numbering style (built-in: default_style, titled_style, classic_style)
    #[arg(short, long)]
    style: Option<String>,

    /// TOML file with extra styles and numeral systems
    #[arg(long)]
    style_file: Option<PathBuf>,

    /// Remove existing numbering instead of adding it. With --style, only
    /// labels that style can produce are removed.
    #[arg(long)]
    clear: bool,

    /// Heading marker character
    #[arg(long, default_value_t = '#')]
    marker: char,

    /// Descend into subfolders of --folders
    #[arg(long)]
    recursive: bool,

    /// Print the rewritten documents instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Continue with the remaining documents after a failure
    #[arg(long)]
    keep_going: bool,

    /// Log progress
    #[arg(short, long)]
    verbose: bool,
}

enum Action<'a> {
    Number(AutoNumberer<'a>),
    Strip(Stripper),
}

impl Action<'_> {
    fn apply(&self, document: &Document) -> Result<Document> {
        match self {
            Action::Number(numberer) => numberer.number_document(document),
            Action::Strip(stripper) => Ok(stripper.strip_document(document)),
        }
    }
}

fn main() {
    let args = Args::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("{} document(s) failed", failed);
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Processes every requested document and returns the number of failures.
fn run(args: &Args) -> Result<usize> {
    let source = args
        .style_file
        .as_deref()
        .map(StyleSource::load)
        .transpose()?;
    let numerals = match &source {
        Some(source) => source.numeral_registry()?,
        None => NumeralRegistry::new(),
    };

    let style = match &args.style {
        Some(name) => Some(load_style(name, source.as_ref())?),
        None if args.clear => None,
        None => Some(load_style(DEFAULT_STYLE, source.as_ref())?),
    };

    let action = match &style {
        Some(style) if !args.clear => {
            Action::Number(AutoNumberer::new(style, &numerals)?.with_marker(args.marker))
        }
        Some(style) => Action::Strip(Stripper::for_style(style, &numerals)?.with_marker(args.marker)),
        None => Action::Strip(Stripper::heuristic().with_marker(args.marker)),
    };

    let paths = collect_markdown_files(&args.files, &args.folders, args.recursive)?;
    let mut failed = 0;
    for path in &paths {
        match process(&action, path, args.dry_run) {
            Ok(()) => {}
            Err(e) if args.keep_going => {
                eprintln!("Error: {}", e);
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(failed)
}

fn process(action: &Action<'_>, path: &Path, dry_run: bool) -> Result<()> {
    let id = path.display().to_string();
    let document = Document::read(path).map_err(|e| e.in_document(&id))?;
    let rewritten = action.apply(&document)?;

    if dry_run {
        print!("{}", rewritten.to_text());
    } else if rewritten != document {
        rewritten
            .write_atomic(path)
            .map_err(|e| e.in_document(&id))?;
        println!("Updated {}", id);
    } else {
        println!("Unchanged {}", id);
    }
    Ok(())
}
