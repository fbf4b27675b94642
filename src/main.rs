use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdstyle::{Config, Error, Profile};

#[derive(Parser)]
#[command(name = "mdstyle")]
#[command(about = "Convert Markdown files to styled documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a Markdown file to PDF, SVG or Typst markup
    Convert {
        /// Input Markdown file
        input: PathBuf,

        /// Output file; the extension (.pdf, .svg, .typ) picks the format
        output: PathBuf,

        #[command(flatten)]
        style: StyleArgs,
    },
    /// Report the fonts, sizes, indents and line spacing a conversion produces
    Analyze {
        /// Input Markdown file
        input: PathBuf,

        #[command(flatten)]
        style: StyleArgs,
    },
}

#[derive(Args)]
struct StyleArgs {
    /// Style profile: standard, academic or official
    #[arg(short, long)]
    profile: Option<Profile>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl StyleArgs {
    fn config(&self) -> mdstyle::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::compiled_default(),
        };
        if let Some(profile) = self.profile {
            config.profile = profile;
        }
        Ok(config)
    }
}

fn read_input(path: &Path) -> mdstyle::Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn write_output(path: &Path, contents: impl AsRef<[u8]>) -> mdstyle::Result<()> {
    fs::write(path, contents).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Page files for a multi-page SVG: `out.svg` becomes `out-1.svg`, `out-2.svg`, ...
fn svg_page_path(output: &Path, page: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string());
    output.with_file_name(format!("{stem}-{page}.svg"))
}

fn convert(input: &Path, output: &Path, config: &Config) -> mdstyle::Result<Vec<PathBuf>> {
    let markdown = read_input(input)?;
    let extension = output
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => {
            let pdf_bytes = mdstyle::markdown_to_pdf_with_config(&markdown, config)?;
            write_output(output, pdf_bytes)?;
            Ok(vec![output.to_path_buf()])
        }
        Some("typ") => {
            let markup = mdstyle::markdown_to_typst_with_config(&markdown, config)?;
            write_output(output, markup)?;
            Ok(vec![output.to_path_buf()])
        }
        Some("svg") => {
            let svg = mdstyle::markdown_to_svg_with_config(&markdown, config)?;
            if svg.pages.len() == 1 {
                write_output(output, &svg.pages[0])?;
                return Ok(vec![output.to_path_buf()]);
            }
            let mut written = Vec::with_capacity(svg.pages.len());
            for (i, page) in svg.pages.iter().enumerate() {
                let path = svg_page_path(output, i + 1);
                write_output(&path, page)?;
                written.push(path);
            }
            Ok(written)
        }
        _ => Err(Error::UnsupportedOutput(output.to_path_buf())),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            input,
            output,
            style,
        } => {
            let config = style.config()?;
            let written = convert(&input, &output, &config)
                .with_context(|| format!("converting {}", input.display()))?;
            for path in written {
                println!("Created {}", path.display());
            }
        }
        Command::Analyze { input, style } => {
            let config = style.config()?;
            let markdown = read_input(&input)?;
            let report = mdstyle::analyze_markdown(&markdown, &config)?;
            println!("Format report for {} ({} profile)\n", input.display(), config.profile);
            print!("{report}");
        }
    }

    Ok(())
}
