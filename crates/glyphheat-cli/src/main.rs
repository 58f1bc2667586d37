//! glyphheat CLI - render colored text figures.

#![allow(
    clippy::needless_pass_by_value,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown
)]

use clap::{Args, Parser, Subcommand, ValueEnum};
use glyphheat::{ColoredText, ColormapKind, GlyphError, RenderConfig, TextLayout};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Character counts swept by `grid`.
const GRID_CHAR_COUNTS: [usize; 4] = [10, 113, 375, 819];
/// Figure widths swept by `grid`.
const GRID_WIDTHS: [f64; 2] = [540.0, 1080.0];
/// Font sizes swept by `grid`.
const GRID_FONTSIZES: [f64; 3] = [10.0, 14.0, 18.0];
/// Colorbar settings swept by `grid`.
const GRID_COLORBAR: [bool; 2] = [true, false];
/// Standard deviation divisor for generated values.
const GRID_VALUE_SCALE: f64 = 5.0;

#[derive(Parser)]
#[command(name = "glyphheat")]
#[command(about = "Visualize per-character values as colored text")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one text with its values
    Render(RenderArgs),

    /// Render the parameter sweep of sample figures
    Grid {
        /// Directory receiving the figures
        #[arg(long, default_value = "img")]
        out_dir: PathBuf,

        /// Seed for the sample values (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Image format
        #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
        format: ImageFormat,
    },

    /// Print the computed layout as JSON
    Layout {
        /// Number of characters
        #[arg(long)]
        chars: usize,

        /// Figure width in pixels
        #[arg(long, default_value_t = 1080.0)]
        width: f64,

        /// Font size in points
        #[arg(long, default_value_t = 14.0)]
        fontsize: f64,

        /// Leave room for no colorbar
        #[arg(long)]
        no_colorbar: bool,
    },
}

#[derive(Args)]
struct RenderArgs {
    /// Text to render
    #[arg(long, conflicts_with = "text_file", required_unless_present = "text_file")]
    text: Option<String>,

    /// Read the text from a file (one trailing newline is dropped)
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Values file: JSON array, or numbers separated by whitespace or commas ("-" for stdin)
    #[arg(long)]
    values: PathBuf,

    /// Output image (.png, .svg, ...); shows in the terminal when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Figure title
    #[arg(long)]
    title: Option<String>,

    /// Figure width in pixels
    #[arg(long)]
    width: Option<f64>,

    /// Font size in points
    #[arg(long)]
    fontsize: Option<f64>,

    /// Glyph font family
    #[arg(long)]
    font: Option<String>,

    /// Omit the colorbar
    #[arg(long)]
    no_colorbar: bool,

    /// Colormap: bwr, seismic or rdbu_r
    #[arg(long)]
    colormap: Option<ColormapKind>,

    /// YAML config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Glyph(#[from] GlyphError),

    #[error("invalid input: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "glyphheat failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let default_level = "info";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Render(args) => render(args),
        Commands::Grid {
            out_dir,
            seed,
            format,
        } => {
            let written = grid(&out_dir, seed, format)?;
            tracing::info!(count = written.len(), dir = %out_dir.display(), "grid complete");
            Ok(())
        }
        Commands::Layout {
            chars,
            width,
            fontsize,
            no_colorbar,
        } => {
            println!("{}", layout_json(chars, width, fontsize, !no_colorbar)?);
            Ok(())
        }
    }
}

fn render(args: RenderArgs) -> Result<(), CliError> {
    let config = render_config(&args)?;
    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_text_file(path)?,
        (None, None) => return Err(CliError::Input("no text given".into())),
    };
    let values = parse_values(&read_source(&args.values)?)?;

    let figure = ColoredText::with_config(text, &values, &config)?;
    figure.render(args.title.as_deref(), args.output.as_deref())?;
    if let Some(output) = &args.output {
        tracing::info!(path = %output.display(), "figure written");
    }
    Ok(())
}

/// Config file values, overridden by flags.
fn render_config(args: &RenderArgs) -> Result<RenderConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(fontsize) = args.fontsize {
        config.fontsize = fontsize;
    }
    if let Some(font) = &args.font {
        config.fontname.clone_from(font);
    }
    if args.no_colorbar {
        config.colorbar = false;
    }
    if let Some(colormap) = args.colormap {
        config.colormap = colormap;
    }
    Ok(config)
}

fn read_text_file(path: &Path) -> Result<String, CliError> {
    let mut text = fs::read_to_string(path)?;
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    Ok(text)
}

fn read_source(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

/// Parse a JSON array of numbers, or numbers separated by whitespace or commas.
fn parse_values(content: &str) -> Result<Vec<f64>, CliError> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| CliError::Input(format!("values JSON: {e}")));
    }
    trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|_| CliError::Input(format!("not a number: '{token}'")))
        })
        .collect()
}

fn layout_json(
    chars: usize,
    width: f64,
    fontsize: f64,
    colorbar: bool,
) -> Result<String, CliError> {
    let layout =
        TextLayout::compute(chars, width, fontsize, colorbar).map_err(GlyphError::from)?;
    serde_json::to_string_pretty(&layout).map_err(|e| CliError::Input(e.to_string()))
}

/// One figure of the sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridCase {
    chars: usize,
    width: f64,
    fontsize: f64,
    colorbar: bool,
}

impl GridCase {
    fn title(&self) -> String {
        format!(
            "n:{} width:{} fontsize:{} cbar:{}",
            self.chars,
            self.width,
            self.fontsize,
            u8::from(self.colorbar)
        )
    }

    fn file_name(&self, format: ImageFormat) -> String {
        let stem = self.title().replace(':', "").replace(' ', "_");
        format!("{stem}.{}", format.extension())
    }
}

fn grid_cases() -> impl Iterator<Item = GridCase> {
    GRID_CHAR_COUNTS.into_iter().flat_map(|chars| {
        GRID_WIDTHS.into_iter().flat_map(move |width| {
            GRID_FONTSIZES.into_iter().flat_map(move |fontsize| {
                GRID_COLORBAR.into_iter().map(move |colorbar| GridCase {
                    chars,
                    width,
                    fontsize,
                    colorbar,
                })
            })
        })
    })
}

/// Cycling digits `0123456789...`.
fn digit_text(n: usize) -> String {
    (0..n).map(|i| char::from(b'0' + (i % 10) as u8)).collect()
}

/// Standard normal samples scaled down and clipped to `[-1, 1]`.
fn sample_values(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n)
        .map(|_| {
            let z: f64 = StandardNormal.sample(rng);
            (z / GRID_VALUE_SCALE).clamp(-1.0, 1.0)
        })
        .collect()
}

fn grid(out_dir: &Path, seed: Option<u64>, format: ImageFormat) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(out_dir)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut written = Vec::new();
    for case in grid_cases() {
        let values = sample_values(&mut rng, case.chars);
        let figure = ColoredText::builder(digit_text(case.chars), &values)
            .width(case.width)
            .fontsize(case.fontsize)
            .colorbar(case.colorbar)
            .build()?;
        let path = out_dir.join(case.file_name(format));
        figure.render(Some(&case.title()), Some(&path))?;
        tracing::debug!(path = %path.display(), "grid figure written");
        written.push(path);
    }
    Ok(written)
}
