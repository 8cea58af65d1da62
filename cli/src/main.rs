//! caritive CLI - scan PDFs for words of absence

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use caritive::{find_matches, CleanupOptions, Outcome, ScanOptions, Scanner};

#[derive(Parser)]
#[command(name = "caritive")]
#[command(version)]
#[command(
    about = "Find pages with words of absence in PDF files and report them in Word documents",
    long_about = None
)]
struct Cli {
    /// Directory containing the PDF files (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(flatten)]
    scan: ScanArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every PDF in a directory (the default command)
    Scan {
        /// Directory containing the PDF files
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Print the matching pages of one PDF without writing documents
    Check {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct ScanArgs {
    /// Directory for the output documents (default: next to each PDF)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Do not retry with simple extraction when nothing is found
    #[arg(long)]
    no_fallback: bool,

    /// Clean up the text of the simple extraction too
    #[arg(long)]
    cleanup_fallback: bool,

    /// Skip pages that cannot be decoded instead of failing the file
    #[arg(long)]
    lenient: bool,

    /// Process files in directory order instead of sorted by name
    #[arg(long)]
    unsorted: bool,

    /// Normalize Unicode and expand ligatures before matching
    #[arg(long)]
    normalize_unicode: bool,
}

impl ScanArgs {
    fn to_options(&self) -> ScanOptions {
        let mut options = ScanOptions::new()
            .with_fallback(!self.no_fallback)
            .with_cleanup_on_fallback(self.cleanup_fallback)
            .with_sorted_inputs(!self.unsorted)
            .with_cleanup(CleanupOptions::new().with_unicode_normalization(self.normalize_unicode));
        if self.lenient {
            options = options.lenient();
        }
        if let Some(ref dir) = self.output {
            options = options.with_output_dir(dir);
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Scan { dir, scan }) => cmd_scan(dir.as_deref(), &scan),
        Some(Commands::Check { input, scan }) => cmd_check(&input, &scan),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_scan(cli.dir.as_deref(), &cli.scan),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_scan(dir: Option<&Path>, args: &ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dir = dir.unwrap_or_else(|| Path::new("."));
    let options = args.to_options();
    log::debug!("Scanning {} with {:?}", dir.display(), options);
    if let Some(ref out) = options.output_dir {
        std::fs::create_dir_all(out)?;
    }

    let scanner = Scanner::with_options(options);
    let summary = scanner.run(dir, |index, total, name| {
        println!("Processing file {}/{}: {}", index, total, name);
    })?;

    if summary.total() == 0 {
        println!("{} {}", "No PDF files found in".yellow(), dir.display());
        return Ok(());
    }

    for report in summary.files.iter().filter(|f| f.outcome.is_failure()) {
        if let Outcome::Failed { error, .. } = &report.outcome {
            println!("  {} {}: {}", "✗".red(), report.input.display(), error);
        }
    }

    println!();
    println!(
        "{} {} files: {} with results ({} terms), {} without, {} failed",
        "Done!".green().bold(),
        summary.total(),
        summary.with_results().to_string().green(),
        summary.total_results(),
        summary.nothing_found().to_string().yellow(),
        summary.failed().to_string().red()
    );

    Ok(())
}

fn cmd_check(input: &Path, args: &ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let scanner = Scanner::with_options(args.to_options());
    let findings = scanner.collect_findings(input)?;

    println!("{}: {}", "File".bold(), input.display());
    if findings.is_empty() {
        println!("{}", "Nothing found in this pdf file.".yellow());
        return Ok(());
    }

    let mut total = 0;
    for (label, text) in findings.pages() {
        let matches = find_matches(text);
        total += matches.len();

        println!();
        println!("{} ({} matches)", label.cyan().bold(), matches.len());
        println!("  {}: {}", "Terms".bold(), matches.terms().join(", "));
        for (family, count) in matches.by_family() {
            println!("  {} {}: {}", "├─".dimmed(), family, count);
        }
    }

    println!();
    println!(
        "{} {} matches on {} pages",
        "Done!".green().bold(),
        total,
        findings.page_count()
    );
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "caritive".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF scanner for words of absence and privation");
}
