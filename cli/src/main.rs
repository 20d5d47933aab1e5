//! unsng CLI - SongBeamer song conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use unsng::{parse_file_with_options, JsonFormat, ParseOptions, RenderOptions, Song};

#[derive(Parser)]
#[command(name = "unsng")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert SongBeamer songs to JSON and plain text", long_about = None)]
struct Cli {
    /// Input song file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    parse: ParseArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args, Clone, Copy)]
struct ParseArgs {
    /// Skip invalid property values instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    /// Accept bare LF line endings
    #[arg(long, global = true)]
    any_newline: bool,

    /// Normalize text to Unicode NFC
    #[arg(long, global = true)]
    nfc: bool,
}

impl ParseArgs {
    fn options(self) -> ParseOptions {
        let mut options = ParseOptions::new().with_unicode_normalization(self.nfc);
        if self.lenient {
            options = options.lenient();
        }
        if self.any_newline {
            options = options.any_line_ending();
        }
        options
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a song to JSON
    Json {
        /// Input song file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert a song to plain lyrics
    Text {
        /// Input song file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only print this language (0-based)
        #[arg(long, value_name = "N")]
        lang: Option<usize>,

        /// Omit verse labels
        #[arg(long)]
        no_labels: bool,

        /// Print verses in file order instead of the song's verse order
        #[arg(long)]
        source_order: bool,
    },

    /// Show song information
    Info {
        /// Input song file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let parse_args = cli.parse;

    let result = match cli.command {
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, parse_args),
        Some(Commands::Text {
            input,
            output,
            lang,
            no_labels,
            source_order,
        }) => cmd_text(
            &input,
            output.as_deref(),
            lang,
            no_labels,
            source_order,
            parse_args,
        ),
        Some(Commands::Info { input }) => cmd_info(&input, parse_args),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: JSON to stdout if input is provided
            if let Some(input) = cli.input {
                cmd_json(&input, None, false, parse_args)
            } else {
                println!("{}", "Usage: unsng <FILE>".yellow());
                println!("       unsng --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &Path, parse_args: ParseArgs) -> Result<Song, Box<dyn std::error::Error>> {
    log::info!("Parsing {}", input.display());
    Ok(parse_file_with_options(input, parse_args.options())?)
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    parse_args: ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let song = load(input, parse_args)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unsng::render::to_json(&song, format)?;
    write_output(&json, output)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    lang: Option<usize>,
    no_labels: bool,
    source_order: bool,
    parse_args: ParseArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let song = load(input, parse_args)?;

    let mut render_options = RenderOptions::new()
        .with_labels(!no_labels)
        .with_verse_order(!source_order);
    if let Some(lang) = lang {
        render_options = render_options.with_language(lang);
    }

    let text = unsng::render::to_text(&song, &render_options)?;
    write_output(&text, output)
}

fn cmd_info(input: &Path, parse_args: ParseArgs) -> Result<(), Box<dyn std::error::Error>> {
    let format = unsng::detect_format_from_path(input)?;
    let song = load(input, parse_args)?;

    println!("{}", "Song Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);
    if let Some(title) = song.title() {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(author) = song.properties.get_text("Author") {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(copyright) = song.properties.get_list("Copyright") {
        println!("{}: {}", "Copyright".bold(), copyright.join(", "));
    }
    println!("{}: {}", "Languages".bold(), song.lang_count());
    println!("{}: {}", "Verse order".bold(), song.verse_order().join(", "));

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Verses".bold(), song.texts.len());
    println!("{}: {}", "Slides".bold(), song.texts.slide_count());
    for verse in &song.texts {
        println!(
            "  {} {} ({} slides, {} rows)",
            "├─".dimmed(),
            verse.label,
            verse.slides.len(),
            verse.row_count()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unsng".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("SongBeamer song conversion tool");
    println!();
    println!("License: MIT");
}
