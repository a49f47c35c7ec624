//! cistercian CLI: encode text as grids of Cistercian numerals and back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rand::rngs::StdRng;

use cistercian::codec::Codec;
use cistercian::config::CodecConfig;
use cistercian::glyph::{GlyphLibrary, Strictness};
use cistercian::grid::LayoutMode;
use cistercian::numeral::{PlaceValue, RandomSource};

#[derive(Parser)]
#[command(name = "cistercian", version, about = "Cistercian numeral visual codec")]
struct Cli {
    /// TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Glyph asset directory (overrides the config).
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    /// Character-code modulus (overrides the config).
    #[arg(long, global = true)]
    modulus: Option<u32>,

    /// Fail on quadrants that match no reference glyph.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode words into a grid image.
    Encode {
        /// Words of the message, joined with single spaces.
        #[arg(required = true)]
        words: Vec<String>,

        /// Output PNG path.
        #[arg(long, short)]
        out: PathBuf,

        /// Seed for reproducible numerals.
        #[arg(long)]
        seed: Option<u64>,

        /// Lay every glyph out in one row.
        #[arg(long)]
        single_row: bool,
    },

    /// Decode grid images back into text.
    Decode {
        /// Grid image files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print a JSON report per file.
        #[arg(long)]
        json: bool,
    },

    /// Manage glyph libraries.
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },

    /// Inspect or create config files.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum LibraryAction {
    /// Write the procedurally drawn glyph set.
    Generate {
        /// Target directory.
        #[arg(long, short)]
        out: PathBuf,
    },

    /// Write one standalone cell image per character of a message.
    Cells {
        /// Words of the message, joined with single spaces.
        #[arg(required = true)]
        words: Vec<String>,

        /// Target directory.
        #[arg(long, short)]
        out: PathBuf,

        /// Seed for reproducible numerals.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Validate a glyph library and print a summary.
    Check {
        /// Asset directory (defaults to the configured library).
        dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config as TOML.
    Show,

    /// Write the default config.
    Init {
        /// Target file.
        #[arg(long, short)]
        out: PathBuf,
    },
}

fn effective_config(cli: &Cli) -> Result<CodecConfig> {
    let mut config = match cli.config {
        Some(ref path) => CodecConfig::load(path)?,
        None => CodecConfig::default(),
    };
    if let Some(ref dir) = cli.library {
        config.library_dir = Some(dir.clone());
    }
    if let Some(modulus) = cli.modulus {
        config.modulus = modulus;
    }
    if cli.strict {
        config.strictness = Strictness::Strict;
    }
    config.validate()?;
    Ok(config)
}

fn load_library(dir: Option<&Path>, config: &CodecConfig) -> Result<GlyphLibrary> {
    Ok(match dir {
        Some(dir) => GlyphLibrary::load_dir(dir, config.geometry)?,
        None => GlyphLibrary::procedural(config.geometry)?,
    })
}

fn random_source(seed: Option<u64>) -> RandomSource<StdRng> {
    match seed {
        Some(seed) => RandomSource::seeded(seed),
        None => RandomSource::from_entropy(),
    }
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = effective_config(&cli)?;

    match cli.command {
        Commands::Encode {
            words,
            out,
            seed,
            single_row,
        } => {
            let codec = Codec::new(config)?;
            let mut source = random_source(seed);
            let numerals = codec.word_numerals(&words, &mut source)?;
            let mode = if single_row {
                LayoutMode::SingleRow
            } else {
                codec.config().layout
            };
            let grid = codec.encode_numerals_with(&numerals, mode)?;
            grid.save(&out)?;

            let listing: Vec<String> = numerals.iter().map(ToString::to_string).collect();
            println!("{}", listing.join(" "));
            println!(
                "Wrote {}x{} grid to {}",
                grid.width(),
                grid.height(),
                out.display()
            );
        }

        Commands::Decode { files, json } => {
            let codec = Codec::new(config)?;
            let mut failed = 0usize;
            for file in &files {
                match codec.decode_file(file) {
                    Ok(report) if json => {
                        let value = serde_json::json!({
                            "file": file.display().to_string(),
                            "report": report,
                        });
                        println!("{}", serde_json::to_string(&value).into_diagnostic()?);
                    }
                    Ok(report) => {
                        if files.len() > 1 {
                            println!("{}: {}", file.display(), report.text);
                        } else {
                            println!("{}", report.text);
                        }
                    }
                    Err(e) => {
                        failed += 1;
                        eprintln!("{}: {:?}", file.display(), miette::Report::new(e));
                    }
                }
            }
            if failed > 0 {
                return Err(miette::miette!(
                    "{failed} of {} files failed to decode",
                    files.len()
                ));
            }
        }

        Commands::Library { action } => match action {
            LibraryAction::Generate { out } => {
                let library = GlyphLibrary::procedural(config.geometry)?;
                library.save_dir(&out)?;
                println!(
                    "Wrote {} glyphs to {}",
                    library.entries().len(),
                    out.display()
                );
            }
            LibraryAction::Cells { words, out, seed } => {
                let codec = Codec::new(config)?;
                let numerals = codec.word_numerals(&words, &mut random_source(seed))?;
                let paths = codec.write_cells(&numerals, &out)?;
                for path in &paths {
                    println!("{}", path.display());
                }
            }
            LibraryAction::Check { dir } => {
                let dir = dir.or_else(|| config.library_dir.clone());
                let library = Arc::new(load_library(dir.as_deref(), &config)?);
                let g = library.geometry();
                println!(
                    "Library: {}",
                    dir.as_deref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "procedural".into())
                );
                println!("  entries:  {}", library.entries().len());
                println!(
                    "  cell:     {}x{} (split at x={}, y={})",
                    g.width,
                    g.height,
                    g.split_x(),
                    g.split_y()
                );
                for place in PlaceValue::ALL {
                    let ink: Vec<String> = (1..=9u8)
                        .map(|d| library.glyph(place, d).map(|r| r.ink_count().to_string()))
                        .collect::<std::result::Result<_, _>>()?;
                    println!(
                        "  {:<10} {} ink: {}",
                        place.to_string(),
                        place.quadrant(),
                        ink.join(" ")
                    );
                }
                // Building a codec also builds the classifier's references.
                let codec = Codec::with_library(config, library)?;
                println!("  kernel:   {}", codec.ops().isa_level());
                println!("OK");
            }
        },

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
            }
            ConfigAction::Init { out } => {
                CodecConfig::default().save(&out)?;
                println!("Wrote default config to {}", out.display());
            }
        },
    }

    Ok(())
}
