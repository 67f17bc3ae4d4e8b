use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use syntaxcard::layout::Viewport;
use syntaxcard::render::{card_svg, cards_html};
use syntaxcard::source::{FsSource, load_cards};
use syntaxcard::style::StyleTable;
use syntaxcard::{CardView, RenderOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One HTML page listing every card
    Html,
    /// One SVG diagram per card
    Svg,
    /// Analysis dump: chunk sets, nesting, segments and arrow targets
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render sentence-diagram cards from annotated chunk JSON", long_about = None)]
struct Cli {
    /// Card JSON file (an object or an array of objects) or a directory of them
    #[arg(value_name = "INPUT")]
    input: Utf8PathBuf,

    /// Output file; stdout if omitted. For SVG with several cards, files are numbered.
    #[arg(short, long, value_name = "FILE")]
    output: Option<Utf8PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Diagram container width in CSS pixels
    #[arg(long, default_value_t = 720.0)]
    width: f32,

    /// Device pixel ratio of the arrow surface
    #[arg(long, default_value_t = 1.0)]
    dpr: f32,

    /// JSON file overriding role and arrow colors
    #[arg(long, value_name = "FILE")]
    theme: Option<Utf8PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("syntaxcard={default_level},{default_level}")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_styles(theme: Option<&Utf8Path>) -> Result<StyleTable> {
    let mut styles = StyleTable::default();
    if let Some(path) = theme {
        let text = std::fs::read_to_string(path).with_context(|| format!("Failed to read theme {}", path))?;
        styles
            .merge_json(&text)
            .with_context(|| format!("Invalid theme {}", path))?;
        info!(path = %path, "applied theme");
    }
    Ok(styles)
}

fn write_output(path: Option<&Utf8Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => std::fs::write(p, text).with_context(|| format!("Failed to write {}", p)),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}

/// `out.svg` → `out-3.svg`
fn numbered_path(path: &Utf8Path, n: usize) -> Utf8PathBuf {
    let stem = path.file_stem().unwrap_or("card");
    let name = match path.extension() {
        Some(ext) => format!("{stem}-{n}.{ext}"),
        None => format!("{stem}-{n}"),
    };
    path.with_file_name(name)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !(cli.width > 0.0) || !(cli.dpr > 0.0) {
        bail!("--width and --dpr must be positive");
    }

    let cards = load_cards(&mut FsSource, &cli.input)
        .with_context(|| format!("Failed to load cards from {}", cli.input))?;
    let styles = load_styles(cli.theme.as_deref())?;
    let options = RenderOptions {
        viewport: Viewport {
            width: cli.width,
            dpr: cli.dpr,
        },
        ..Default::default()
    };

    let views: Vec<CardView<'_>> = cards
        .par_iter()
        .map(|data| CardView::render(data, &options))
        .collect();
    info!(cards = views.len(), "rendered cards");

    match cli.format {
        Format::Html => write_output(cli.output.as_deref(), &cards_html(&views, &styles))?,
        Format::Json => {
            let summaries: Vec<_> = views.iter().enumerate().map(|(i, v)| v.summary(i + 1)).collect();
            let json = serde_json::to_string_pretty(&summaries)?;
            write_output(cli.output.as_deref(), &format!("{json}\n"))?;
        }
        Format::Svg => match cli.output.as_deref() {
            Some(path) if views.len() > 1 => {
                for (i, view) in views.iter().enumerate() {
                    let target = numbered_path(path, i + 1);
                    write_output(Some(&target), &card_svg(view, &styles))?;
                    info!(path = %target, "wrote card");
                }
            }
            path => {
                let svgs: Vec<String> = views.iter().map(|v| card_svg(v, &styles)).collect();
                write_output(path, &svgs.join("\n"))?;
            }
        },
    }
    Ok(())
}
