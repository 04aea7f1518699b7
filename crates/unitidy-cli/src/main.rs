//! unitidy - Find and replace problematic Unicode characters in text files
//!
//! This tool scans text files for invisible characters, non-ASCII spaces,
//! smart quotes, typographic dashes, full-width forms and variation
//! selectors, and rewrites them with ASCII-safe equivalents.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use unitidy_core::{
    clean_file, scan_file, CategoryFilter, CategorySet, CharacterCategory, ClassificationTable,
    IssueSummary, LineLocator, Settings, UnicodeIssue,
};
use walkdir::{DirEntry, WalkDir};

/// Find and replace problematic Unicode characters in text files
#[derive(Parser, Debug)]
#[command(name = "unitidy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file (TOML) with enabled categories and file types
    #[arg(short, long, global = true, env = "UNITIDY_CONFIG")]
    config: Option<PathBuf>,

    /// Only consider these categories, overriding the settings file
    #[arg(long = "category", global = true, value_parser = parse_category)]
    categories: Vec<CharacterCategory>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report problematic characters without changing anything
    Scan(ScanArgs),
    /// Replace problematic characters and write the files back
    Clean(CleanArgs),
    /// List the character categories and their table entries
    Categories(CategoriesArgs),
}

#[derive(Args, Debug)]
struct ScanArgs {
    #[command(flatten)]
    input: InputMode,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Exit with an error if any issue was found
    #[arg(long)]
    check: bool,
}

#[derive(Args, Debug)]
struct CleanArgs {
    #[command(flatten)]
    input: InputMode,

    /// Dry run - don't write files, just show what would be cleaned
    #[arg(long)]
    dry_run: bool,

    /// Clean every category and tidy whitespace (collapse runs of spaces,
    /// excess blank lines, trim the ends)
    #[arg(long)]
    normalize: bool,
}

#[derive(Args, Debug)]
struct CategoriesArgs {
    /// Also list every character in each category
    #[arg(long)]
    entries: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single file to process
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory to process recursively
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line per issue with position, category and context
    Text,
    /// Just the path of each file with issues (for scripting)
    Filename,
}

/// Totals reported at the end of a clean run
#[derive(Debug, Default, PartialEq, Eq)]
struct CleanStats {
    processed: usize,
    cleaned: usize,
    issues_fixed: usize,
}

impl CleanStats {
    fn print_summary(&self) {
        println!("Files processed: {}", self.processed);
        println!("Files cleaned: {}", self.cleaned);
        println!("Total issues fixed: {}", self.issues_fixed);
    }
}

fn parse_category(value: &str) -> Result<CharacterCategory, String> {
    value.parse().map_err(|e: unitidy_core::Error| {
        let keys: Vec<_> = CharacterCategory::ALL.iter().map(|c| c.key()).collect();
        format!("{e} (expected one of: {})", keys.join(", "))
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(cli.config.as_deref())?;

    match &cli.command {
        Command::Scan(args) => {
            let filter = category_filter(&settings, &cli.categories, false);
            run_scan(args, &settings, filter)
        }
        Command::Clean(args) => {
            let filter = category_filter(&settings, &cli.categories, args.normalize);
            run_clean(args, &settings, filter)
        }
        Command::Categories(args) => {
            print_categories(args.entries);
            Ok(())
        }
    }
}

/// Load settings from the given file, or fall back to defaults
fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings: {}", path.display())),
        None => {
            debug!("No settings file given, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Resolve the category filter for this run
///
/// `--normalize` asks for the unfiltered clean; otherwise the categories
/// named on the command line win over those enabled in the settings.
fn category_filter(
    settings: &Settings,
    overrides: &[CharacterCategory],
    normalize: bool,
) -> CategoryFilter {
    if normalize {
        if !overrides.is_empty() {
            warn!("--normalize cleans every category; ignoring --category");
        }
        if settings.enabled_categories() != CategorySet::all() {
            warn!("--normalize cleans every category, including those disabled in the settings");
        }
        return CategoryFilter::All;
    }

    let set: CategorySet = if overrides.is_empty() {
        settings.enabled_categories()
    } else {
        overrides.iter().copied().collect()
    };
    CategoryFilter::Only(set)
}

/// Collect the files to process for an input mode
fn collect_inputs(input: &InputMode, settings: &Settings) -> Result<Vec<PathBuf>> {
    if let Some(ref file) = input.file {
        if !file.exists() {
            bail!("Input file does not exist: {}", file.display());
        }
        if !file.is_file() {
            bail!("Input path is not a file: {}", file.display());
        }
        Ok(vec![file.clone()])
    } else if let Some(ref directory) = input.directory {
        collect_directory(directory, settings)
    } else {
        bail!("Either --file or --directory must be specified")
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|n| n.starts_with('.'))
            .unwrap_or(false)
}

/// Walk a directory and keep the files the settings want inspected
fn collect_directory(directory: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    let mut files = Vec::new();
    for entry in WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Cannot walk {}: {}", directory.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        let size = match entry.metadata() {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                warn!("Cannot stat {}: {}", entry.path().display(), e);
                continue;
            }
        };

        if !settings.should_inspect_file(&name, size) {
            trace!("Skipping {}", entry.path().display());
            continue;
        }

        files.push(entry.into_path());
    }

    debug!("Selected {} file(s)", files.len());
    Ok(files)
}

/// Render one issue as a `path:line:column:` diagnostic line
fn format_issue(path: &Path, line: usize, column: usize, issue: &UnicodeIssue<'_>) -> String {
    format!(
        "{}:{}:{}: {} ({}) {} {:?}",
        path.display(),
        line,
        column,
        issue.info.unicode,
        issue.info.category.display_name(),
        issue.info.description,
        issue.context
    )
}

/// Report the issues in every input file
fn run_scan(args: &ScanArgs, settings: &Settings, filter: CategoryFilter) -> Result<()> {
    let files = collect_inputs(&args.input, settings)?;
    let single = args.input.file.is_some();

    let mut summary = IssueSummary::new();
    let mut files_with_issues = 0;

    for path in &files {
        let (text, issues) = match scan_file(path, filter) {
            Ok(result) => result,
            Err(e) if !single && e.is_recoverable() => {
                warn!("Error processing {}: {}", path.display(), e);
                continue;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to scan: {}", path.display()));
            }
        };

        if issues.is_empty() {
            trace!("No issues in {}", path.display());
            continue;
        }

        files_with_issues += 1;
        summary.record_all(&issues);

        match args.format {
            OutputFormat::Filename => println!("{}", path.display()),
            OutputFormat::Text => {
                let mut locator = LineLocator::new(&text);
                for issue in &issues {
                    let (line, column) = locator.locate(issue.byte_range.start);
                    println!("{}", format_issue(path, line, column, issue));
                }
            }
        }
    }

    for (category, count) in summary.iter() {
        info!("{}: {}", category.display_name(), count);
    }
    info!(
        "Found {} issue(s) in {} of {} file(s)",
        summary.total(),
        files_with_issues,
        files.len()
    );

    if args.check && !summary.is_empty() {
        bail!(
            "Found {} problematic character(s) in {} file(s)",
            summary.total(),
            files_with_issues
        );
    }

    Ok(())
}

/// Clean every input file, writing back the ones that changed
fn run_clean(args: &CleanArgs, settings: &Settings, filter: CategoryFilter) -> Result<()> {
    let files = collect_inputs(&args.input, settings)?;
    if files.is_empty() {
        warn!("No files found that match the configured file types");
        return Ok(());
    }

    let stats = clean_files(&files, filter, args.dry_run, args.input.file.is_some())?;
    stats.print_summary();
    Ok(())
}

fn clean_files(
    files: &[PathBuf],
    filter: CategoryFilter,
    dry_run: bool,
    fail_fast: bool,
) -> Result<CleanStats> {
    let mut stats = CleanStats::default();

    for path in files {
        let outcome = match clean_file(path, filter) {
            Ok(outcome) => outcome,
            Err(e) if !fail_fast && e.is_recoverable() => {
                warn!("Error processing {}: {}", path.display(), e);
                stats.processed += 1;
                continue;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to clean: {}", path.display()));
            }
        };
        stats.processed += 1;

        if !outcome.is_changed() {
            trace!("Nothing to clean in {}", path.display());
            continue;
        }

        if dry_run {
            println!(
                "Would clean {} ({} issues)",
                path.display(),
                outcome.issues_fixed
            );
        } else {
            outcome
                .write_to(path)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            println!(
                "Cleaned {} ({} issues)",
                path.display(),
                outcome.issues_fixed
            );
        }

        stats.cleaned += 1;
        stats.issues_fixed += outcome.issues_fixed;
    }

    Ok(stats)
}

/// Print the categories, their sizes and optionally their entries
fn print_categories(entries: bool) {
    let table = ClassificationTable::global();
    for category in CharacterCategory::ALL {
        let count = table.entries_in(category).count();
        println!(
            "{:<16} {:<28} {} characters",
            category.key(),
            category.display_name(),
            count
        );
        if entries {
            for info in table.entries_in(category) {
                println!(
                    "    {}  {:<6} {}",
                    info.unicode,
                    format!("{:?}", info.replacement),
                    info.description
                );
            }
        }
    }
}
