//! pdf2md CLI - rebuild PDF book structure as Markdown

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf2md::detect::{self, InputKind};
use pdf2md::{
    join_pages, raw_path_for, ConvertOptions, Converter, ExtractOptions, JsonFormat, Locale,
    LocaleTable, LopdfSource, OutputFormat, RenderOptions, StructureOptions, StructureStats,
    Structurer,
};

#[derive(Parser)]
#[command(name = "pdf2md")]
#[command(version)]
#[command(about = "Rebuild the structure of PDF books as Markdown", long_about = None)]
struct Cli {
    /// Input PDF or raw text file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF or raw text file to Markdown
    Convert {
        /// Input PDF or raw text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input name with .md or .json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Re-extract the PDF even if a .raw file exists
        #[arg(short, long)]
        force: bool,

        /// Omit the attribution footer
        #[arg(long)]
        no_footer: bool,

        /// Write JSON records instead of Markdown
        #[arg(long)]
        json: bool,

        /// Output compact JSON
        #[arg(long, requires = "json")]
        compact: bool,

        /// Do not let paragraphs continue across pages
        #[arg(long)]
        split_pages: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Extract the raw page text of a PDF into a .raw file
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to the input name with .raw)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Extract pages one at a time
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Print the heading outline of a document
    Outline {
        /// Input PDF or raw text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Label lines given as arguments or read from stdin
    Classify {
        /// Lines to classify (stdin if none)
        #[arg(value_name = "LINE")]
        lines: Vec<String>,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Show structure statistics
    Info {
        /// Input PDF or raw text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone, Default)]
struct RuleArgs {
    /// Rule locale
    #[arg(short, long, value_enum, env = "PDF2MD_LOCALE")]
    locale: Option<LocaleArg>,

    /// JSON rule table (overrides --locale)
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,
}

impl RuleArgs {
    fn table(&self) -> Result<LocaleTable, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.rules {
            return Ok(LocaleTable::from_json_file(path)?);
        }
        Ok(self.locale.map(Locale::from).unwrap_or_default().table())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum LocaleArg {
    /// Chinese books (第一章, 1.1, 附录, 参考文献)
    Zh,
    /// English books (Chapter 1, Section 2, Appendix, References)
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Zh => Locale::Zh,
            LocaleArg::En => Locale::En,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            force,
            no_footer,
            json,
            compact,
            split_pages,
            rules,
        }) => {
            let format = match (json, compact) {
                (false, _) => OutputFormat::Markdown,
                (true, false) => OutputFormat::Json(JsonFormat::Pretty),
                (true, true) => OutputFormat::Json(JsonFormat::Compact),
            };
            rules.table().and_then(|table| {
                let mut options = ConvertOptions::new()
                    .with_force(force)
                    .with_format(format)
                    .with_structure_options(
                        StructureOptions::new().with_merge_across_pages(!split_pages),
                    );
                if no_footer {
                    options = options.with_render_options(
                        RenderOptions::for_table(&table).with_include_footer(false),
                    );
                }
                cmd_convert(&input, output.as_deref(), options.with_table(table))
            })
        }
        Some(Commands::Extract {
            input,
            output,
            sequential,
            rules,
        }) => cmd_extract(&input, output.as_deref(), sequential, &rules),
        Some(Commands::Outline { input, rules }) => cmd_outline(&input, &rules),
        Some(Commands::Classify { lines, rules }) => cmd_classify(lines, &rules),
        Some(Commands::Info { input, json, rules }) => cmd_info(&input, json, &rules),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), ConvertOptions::new())
            } else {
                println!("{}", "Usage: pdf2md <FILE> [OUTPUT]".yellow());
                println!("       pdf2md --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn page_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {pos} pages [{elapsed}]")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb
}

/// Raw text of a PDF (cache first) or a raw text file.
fn load_raw(input: &Path, table: &LocaleTable) -> Result<String, Box<dyn std::error::Error>> {
    match detect::detect_kind_from_path(input)? {
        InputKind::Pdf { .. } => {
            let cache = raw_path_for(input);
            if cache.exists() {
                log::info!("using raw text cache {}", cache.display());
                return Ok(detect::read_text(&cache)?);
            }
            let source = LopdfSource::open(input)?;
            let pb = page_spinner("Extracting");
            let pages = source.extract_with(|_| pb.inc(1))?;
            pb.finish_and_clear();
            Ok(join_pages(&pages, table))
        }
        InputKind::RawText => Ok(detect::read_text(input)?),
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    options: ConvertOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let converter = Converter::new(options)?;

    let result = match detect::detect_kind_from_path(input)? {
        InputKind::Pdf { .. } => {
            let pb = page_spinner("Extracting");
            let result = converter.convert_pdf_with(input, output, |_| pb.inc(1));
            pb.finish_and_clear();
            result?
        }
        InputKind::RawText => converter.convert_raw_file(input, output)?,
    };

    if result.raw_reused {
        if let Some(ref raw) = result.raw_path {
            println!("{} {}", "Reused".cyan(), raw.display());
        }
    }

    println!(
        "{} {} records ({} headings, {} pages)",
        "Structured".green(),
        result.document.len(),
        result.stats.heading_count(),
        result.stats.page_count
    );
    if let Some(ref path) = result.output_path {
        println!("{} {}", "Saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    sequential: bool,
    rules: &RuleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let extract = ExtractOptions::new().with_parallel(!sequential);
    let options = ConvertOptions::new()
        .with_table(rules.table()?)
        .with_extract_options(extract);
    let converter = Converter::new(options)?;

    let pb = page_spinner("Extracting");
    let result = converter.extract_raw_with(input, output, |_| pb.inc(1));
    pb.finish_and_clear();
    let raw_path = result?;

    println!("{} {}", "Saved to".green(), raw_path.display());
    Ok(())
}

fn cmd_outline(input: &Path, rules: &RuleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let table = rules.table()?;
    let raw = load_raw(input, &table)?;
    let doc = Structurer::from_table(&table)?.structure_text(&raw);

    for heading in doc.headings() {
        let indent = match heading.label.heading_level() {
            Some(2) => "  ",
            _ => "",
        };
        println!(
            "{}{} {}",
            indent,
            format!("[{}]", heading.label).dimmed(),
            heading.text
        );
    }

    Ok(())
}

fn cmd_classify(lines: Vec<String>, rules: &RuleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let structurer = Structurer::from_table(&rules.table()?)?;

    let lines = if lines.is_empty() {
        io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
    } else {
        lines
    };

    for line in &lines {
        let label = if structurer.filter().is_noise(line) {
            "noise".dimmed()
        } else {
            let label = structurer.classifier().label(line);
            if label.is_heading() {
                label.as_str().cyan().bold()
            } else {
                label.as_str().normal()
            }
        };
        println!("{}\t{}", label, line.trim());
    }

    Ok(())
}

fn cmd_info(input: &Path, json: bool, rules: &RuleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let table = rules.table()?;
    let kind = detect::detect_kind_from_path(input)?;
    let raw = load_raw(input, &table)?;

    let mut stats = StructureStats::new();
    let doc = Structurer::from_table(&table)?.structure_text_with(&raw, &mut stats);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), kind);
    println!("{}: {}", "Locale".bold(), doc.metadata.locale);
    println!("{}: {}", "Pages".bold(), stats.page_count);

    println!();
    println!("{}", "Structure Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Noise lines".bold(), stats.noise_lines);
    println!(
        "{}: {} -> {}",
        "Merged lines".bold(),
        stats.lines_before_merge,
        stats.lines_after_merge
    );
    println!("{}: {}", "TOC lines skipped".bold(), stats.toc_lines);
    for (label, count) in &stats.records {
        println!("{}: {}", label.bold(), count);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdf2md".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF book structure to Markdown");
    println!();
    println!("License: MIT");
}
