use clap::Parser;
use logstrip::{
    FileStatus, LogStripError, RunReport, SweepConfig, SweepReport, logging, resolve_execution_id,
    run_sweep,
};
use std::fs;
use std::path::PathBuf;

/// Strip console.log statements from a JavaScript/TypeScript source tree
#[derive(Parser, Debug)]
#[command(name = "logstrip")]
#[command(version)]
#[command(about = "Remove console.log/console.warn calls, keep console.error", long_about = None)]
struct Args {
    /// Directory to process (defaults to the config file's root, or ".")
    root: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sub-directory of the root to include (repeatable, replaces the configured list)
    #[arg(short = 'd', long = "dir")]
    dirs: Vec<String>,

    /// Walk the whole root instead of the include directories
    #[arg(long, conflicts_with = "dirs")]
    all: bool,

    /// File extension to process (repeatable, replaces the configured list)
    #[arg(short = 'x', long = "ext")]
    extensions: Vec<String>,

    /// Extra path substring to exclude (repeatable, added to the configured list)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Honor .gitignore and skip hidden files while walking
    #[arg(long)]
    gitignore: bool,

    /// Report what would change without writing files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Call token that starts a statement to remove
    #[arg(long)]
    target: Option<String>,

    /// Token that keeps a line untouched
    #[arg(long)]
    exempt: Option<String>,

    /// Token whose line is always removed
    #[arg(long)]
    warn: Option<String>,

    /// Output structured JSON instead of human-readable
    #[arg(short, long)]
    json: bool,

    /// List unchanged files in JSON output too
    #[arg(long, requires = "json")]
    include_unchanged: bool,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Execution id for the report ("auto" generates one)
    #[arg(long, default_value = "auto")]
    execution_id: String,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

/// Merge the config file (if any) with command-line overrides
fn build_config(args: &Args) -> Result<SweepConfig, LogStripError> {
    let mut config = match &args.config {
        Some(path) => SweepConfig::load(path)?,
        None => SweepConfig::default(),
    };

    if let Some(root) = &args.root {
        config.root = root.clone();
    }
    if args.all {
        config.include_dirs.clear();
    } else if !args.dirs.is_empty() {
        config.include_dirs = args.dirs.clone();
    }
    if !args.extensions.is_empty() {
        config.extensions = args.extensions.clone();
    }
    config.exclude.extend(args.exclude.iter().cloned());
    config.respect_gitignore |= args.gitignore;
    config.dry_run |= args.dry_run;

    if let Some(target) = &args.target {
        config.rule.target = target.clone();
    }
    if let Some(exempt) = &args.exempt {
        config.rule.exempt = exempt.clone();
    }
    if let Some(warn) = &args.warn {
        config.rule.warn = warn.clone();
    }

    config.normalize();
    Ok(config)
}

fn main() {
    let args = Args::parse();
    logging::init_logger(args.debug);

    let report = match build_config(&args).and_then(|config| run_sweep(&config)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let output = if args.json {
        let execution_id = resolve_execution_id(&args.execution_id);
        let run = RunReport::from_sweep(execution_id, &report, args.include_unchanged);
        serde_json::to_string_pretty(&run)
            .unwrap_or_else(|_| r#"{"error": "Failed to serialize report"}"#.to_string())
    } else {
        render_human(&report)
    };

    if let Some(path) = &args.output {
        if let Err(e) = fs::write(path, &output) {
            eprintln!("Failed to write output to '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    } else {
        println!("{}", output);
    }

    if report.summary.files_failed > 0 {
        std::process::exit(1);
    }
}

/// One line per touched file, then the totals
fn render_human(report: &SweepReport) -> String {
    let mut lines = Vec::new();

    for file in &report.files {
        let path = report.display_path(file).display();
        match &file.status {
            FileStatus::Modified { written: true } => lines.push(format!("✓ {}", path)),
            FileStatus::Modified { written: false } => {
                lines.push(format!("✓ {} (dry run, {} line(s))", path, file.removed_lines()))
            }
            FileStatus::Skipped { reason } => lines.push(format!("- {} skipped: {}", path, reason)),
            FileStatus::Failed { error } => lines.push(format!("✗ {} failed: {}", path, error)),
            FileStatus::Unchanged => {}
        }
    }

    let summary = &report.summary;
    lines.push(String::new());
    lines.push("Done!".to_string());
    lines.push(format!("   Files scanned: {}", summary.files_scanned));
    lines.push(format!("   Files modified: {}", summary.files_modified));
    if summary.files_skipped > 0 {
        lines.push(format!("   Files skipped: {}", summary.files_skipped));
    }
    if summary.files_failed > 0 {
        lines.push(format!("   Files failed: {}", summary.files_failed));
    }

    lines.join("\n")
}
