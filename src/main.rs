//! mdscan CLI - convert a Markdown file to HTML, canonical Markdown or JSON

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use mdscan::{ConvertError, Document, Options, RenderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Markdown,
    Json,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Markdown => "md",
            Format::Json => "json",
        }
    }
}

#[derive(Parser)]
#[command(name = "mdscan")]
#[command(about = "Scan a Markdown file and write it as HTML, Markdown or JSON")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output file (defaults to the input name with the format's extension, `-` for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Write an HTML fragment instead of a full page
    #[arg(long)]
    fragment: bool,

    /// Treat `- [x]` items as plain bullets
    #[arg(long)]
    no_task_lists: bool,

    /// Keep `~~` as literal text
    #[arg(long)]
    no_strikethrough: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            task_lists: !self.no_task_lists,
            strikethrough: !self.no_strikethrough,
            ..Options::default()
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            full_document: !self.fragment,
            ..RenderOptions::default()
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension(self.format.extension()))
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn render(doc: &Document, cli: &Cli) -> Result<String, ConvertError> {
    Ok(match cli.format {
        Format::Html => mdscan::render::render_html(doc, &cli.render_options()),
        Format::Markdown => mdscan::to_markdown(doc),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(doc)?;
            json.push('\n');
            json
        }
    })
}

fn write_output(path: &Path, contents: &str) -> Result<(), ConvertError> {
    let write_err = |source| ConvertError::Write {
        path: path.to_path_buf(),
        source,
    };

    if path == Path::new("-") {
        return io::stdout().write_all(contents.as_bytes()).map_err(write_err);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, contents).map_err(write_err)
}

fn run(cli: &Cli) -> Result<PathBuf, ConvertError> {
    let markdown = fs::read_to_string(&cli.input).map_err(|source| ConvertError::Read {
        path: cli.input.clone(),
        source,
    })?;
    log::info!("read {} ({} bytes)", cli.input.display(), markdown.len());

    let doc = mdscan::parse_with_options(&markdown, &cli.options())?;
    log::debug!("{} block(s)", doc.len());

    let output = cli.output_path();
    write_output(&output, &render(&doc, cli)?)?;
    Ok(output)
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(output) if output != Path::new("-") => {
            log::info!("created {}", output.display());
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
