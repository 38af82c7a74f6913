//! pdfreflow CLI - reflowable text from PDF files

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::{debug, info};

use pdfreflow::config::{config_path_for, section_for_input};
use pdfreflow::{ConfigSection, FragmentOrder, OutputFormat, Reflow, ReflowResult};

#[derive(Parser)]
#[command(name = "pdfreflow")]
#[command(version)]
#[command(
    about = "Convert PDF files to reflowable XHTML with real paragraphs",
    long_about = "Convert PDF files to reflowable XHTML with real paragraphs.\n\n\
        PDF input is laid out by `pdftohtml -xml` first; pdf2xml (*.xml) input is \
        read directly. Settings are also read from a .pdfreflow.toml beside the \
        input, whose [glob] sections apply to matching file names. Command-line \
        flags win over the configuration file."
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Input PDF or pdf2xml file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file ("-" for stdout, default: input name with the format's extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    settings: Settings,

    /// Output format
    #[arg(long, value_enum, default_value = "html")]
    format: Format,

    /// Consume each page's fragments in file order instead of sorting by position
    #[arg(long)]
    source_order: bool,

    /// Leave suppressed headers, footers and pages out of the output
    #[arg(long)]
    drop_suppressed: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags that mirror configuration file keys.
#[derive(clap::Args, Default)]
struct Settings {
    /// Log the frequency tables behind every guessed constant
    #[arg(long)]
    debug: bool,

    /// Keep the temporary pdftohtml output
    #[arg(long)]
    keep: bool,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Document subtitle
    #[arg(long)]
    subtitle: Option<String>,

    /// Suppress text at or above this point (header)
    #[arg(long, value_name = "POS", allow_negative_numbers = true)]
    header_pos: Option<i32>,

    /// Suppress text at or below this point (footer)
    #[arg(long, value_name = "POS", allow_negative_numbers = true)]
    footer_pos: Option<i32>,

    /// Suppress the first N pages of output
    #[arg(long, value_name = "N")]
    skip_initial_pages: Option<u32>,

    /// Skip <meta name="generator" ...>
    #[arg(long)]
    skip_generator: bool,

    /// Override the guessed left margin (negative: guess)
    #[arg(long, value_name = "POS", allow_negative_numbers = true)]
    left_margin: Option<i32>,

    /// Override the guessed paragraph indent (negative: guess)
    #[arg(long, value_name = "POS", allow_negative_numbers = true)]
    indent: Option<i32>,

    /// Override the guessed odd/even margin difference (negative: guess)
    #[arg(long, value_name = "POINTS", allow_negative_numbers = true)]
    horiz_leeway: Option<i32>,

    /// Override the guessed line leading (negative: guess)
    #[arg(long, value_name = "POINTS", allow_negative_numbers = true)]
    leading: Option<i32>,
}

impl Settings {
    /// Flags as a configuration section; unset flags stay unset.
    fn to_section(&self) -> ConfigSection {
        ConfigSection {
            debug: self.debug.then_some(true),
            keep: self.keep.then_some(true),
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            header_pos: self.header_pos,
            footer_pos: self.footer_pos,
            skip_initial_pages: self.skip_initial_pages,
            skip_generator: self.skip_generator.then_some(true),
            left_margin: self.left_margin,
            indent: self.indent,
            horiz_leeway: self.horiz_leeway,
            leading: self.leading,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the layout constants guessed for a document
    Info {
        /// Input PDF or pdf2xml file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        settings: Settings,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// XHTML document
    Html,
    /// Markdown
    #[value(alias = "md")]
    Markdown,
    /// Plain text
    Text,
    /// JSON block structure
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Markdown => OutputFormat::Markdown,
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Info {
            ref input,
            ref settings,
        }) => cmd_info(input, settings),
        None => match cli.input {
            Some(ref input) => cmd_convert(input, &cli),
            None => {
                println!("{}", "Usage: pdfreflow <FILE> [OUTPUT]".yellow());
                println!("       pdfreflow --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Settings for `input`: configuration file sections, then flags.
fn resolve_settings(
    input: &Path,
    flags: &Settings,
) -> Result<ConfigSection, Box<dyn std::error::Error>> {
    let mut section = section_for_input(input)?;
    section.merge(flags.to_section());
    Ok(section)
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

fn build(input: &Path, section: &ConfigSection, output: Option<&Path>) -> Reflow {
    let reflow = Reflow::new().with_section(section);
    if reflow.render_options().title.is_some() {
        return reflow;
    }
    // Without an explicit title, the HTML title is the output file name.
    let name = output
        .filter(|p| *p != Path::new("-"))
        .unwrap_or(input)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    reflow.with_html_title(name)
}

fn cmd_convert(input: &Path, cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let section = resolve_settings(input, &cli.settings)?;
    init_logging(section.debug.unwrap_or(false));
    debug!("Configuration file: {}", config_path_for(input).display());

    let format: OutputFormat = cli.format.into();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(input, format));

    let mut reflow = build(input, &section, Some(&output))
        .with_suppressed(!cli.drop_suppressed);
    if cli.source_order {
        reflow = reflow.with_fragment_order(FragmentOrder::Source);
    }

    let result = reflow.parse(input)?;
    let content = result.render(format)?;

    if output == Path::new("-") {
        std::io::stdout().write_all(content.as_bytes())?;
    } else {
        fs::write(&output, &content)?;
        let stats = result.conversion_stats();
        info!(
            "{} paragraphs, {} headings, {} suppressed",
            stats.paragraph_count, stats.heading_count, stats.suppressed_count
        );
        println!("{} {}", "Saved to".green(), output.display());
    }

    Ok(())
}

fn cmd_info(input: &Path, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let section = resolve_settings(input, settings)?;
    init_logging(section.debug.unwrap_or(false));

    let result = build(input, &section, None).parse(input)?;
    print_info(input, &result);
    Ok(())
}

fn print_info(input: &Path, result: &ReflowResult) {
    let layout = &result.statistics;

    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Body text height".bold(), layout.body_height);
    if let Some(font) = &layout.body_font {
        println!(
            "{}: {} {} {}",
            "Body font".bold(),
            font.family,
            font.size,
            font.color
        );
    }
    println!("{}: {}", "Line leading".bold(), layout.body_leading);
    println!(
        "{}: {} (odd pages), {} (even pages)",
        "Left margin".bold(),
        layout.odd.margin,
        layout.even.margin
    );
    println!(
        "{}: {} (odd pages), {} (even pages)",
        "Indent".bold(),
        layout.odd.indent,
        layout.even.indent
    );
    println!("{}: {}", "Horizontal leeway".bold(), layout.horiz_leeway);
    println!(
        "{}: {}",
        "Minimum paragraph line width".bold(),
        layout.text_width_threshold
    );

    let stats = result.conversion_stats();
    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Suppressed".bold(), stats.suppressed_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfreflow::config::CONFIG_FILE_NAME;

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "pdfreflow",
            "book.pdf",
            "--header-pos",
            "60",
            "--leading",
            "-1",
            "--format",
            "md",
            "--source-order",
        ])
        .unwrap();

        assert_eq!(cli.input.as_deref(), Some(Path::new("book.pdf")));
        assert_eq!(cli.settings.header_pos, Some(60));
        assert_eq!(cli.settings.leading, Some(-1));
        assert!(cli.format == Format::Markdown);
        assert!(cli.source_order);
    }

    #[test]
    fn test_unset_flags_do_not_override() {
        let section = Settings::default().to_section();
        assert_eq!(section, ConfigSection::default());
    }

    #[test]
    fn test_flags_win_over_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[\"*.pdf\"]\ntitle = \"From config\"\nheader_pos = 40\n",
        )
        .unwrap();
        let input = dir.path().join("book.pdf");
        let flags = Settings {
            title: Some("From flags".into()),
            ..Default::default()
        };

        let section = resolve_settings(&input, &flags).unwrap();
        assert_eq!(section.title.as_deref(), Some("From flags"));
        assert_eq!(section.header_pos, Some(40));
    }

    #[test]
    fn test_default_output_uses_format_extension() {
        let input = Path::new("books/moby.pdf");
        assert_eq!(
            default_output(input, OutputFormat::Html),
            PathBuf::from("books/moby.html")
        );
        assert_eq!(
            default_output(input, OutputFormat::Markdown),
            PathBuf::from("books/moby.md")
        );
    }

    #[test]
    fn test_title_falls_back_to_output_name() {
        let reflow = build(
            Path::new("in.xml"),
            &ConfigSection::default(),
            Some(Path::new("out/moby.html")),
        );
        assert_eq!(reflow.render_options().title.as_deref(), Some("moby"));
        assert!(reflow.layout_options().title.is_none());
    }
}
