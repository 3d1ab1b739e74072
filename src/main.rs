//! `smufl-fonts` CLI — generates the SMuFL header, glyph files, bounding
//! boxes and CSS font declarations from a font's SVG source.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use smufl_fonts::commands::{self, FontSource};
use smufl_fonts::{FontForge, FontFormat, Result};

#[derive(Parser)]
#[command(version, about = "Builds SMuFL font assets for the music notation engine")]
struct Cli {
    /// Run the command with debug output
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the SMuFL header file listing the supported glyphs
    Smufl {
        /// Path to a supported.xml file
        #[arg(long, default_value = "./supported.xml")]
        supported: PathBuf,

        /// Directory smufl.h is written to
        #[arg(long, default_value = "../include/vrv/")]
        header_out: PathBuf,
    },

    /// Extract the supported glyphs of an SVG font into individual glyph
    /// files and a bounding-box file
    Extract {
        fontname: String,

        /// Path to a supported.xml file
        #[arg(long, default_value = "./supported.xml")]
        supported: PathBuf,

        /// Path to the data directory
        #[arg(long, default_value = "../data")]
        data: PathBuf,

        /// The font source parent directory
        #[arg(long, default_value = "./")]
        source: PathBuf,
    },

    /// Create a CSS @font-face declaration embedding a subset WOFF2 font
    Css {
        /// The name of the font; also the font-family in the CSS
        fontname: String,

        /// Path to the data directory
        #[arg(long, default_value = "../data")]
        data: PathBuf,

        /// Path to a supported.xml file
        #[arg(long, default_value = "./supported.xml")]
        supported: PathBuf,

        /// The font source parent directory
        #[arg(long, default_value = "./")]
        source: PathBuf,

        /// Path to the fontforge binary (default is to search the PATH)
        #[arg(long, env = "FONTFORGE")]
        fontforge: Option<PathBuf>,

        /// Keep the subset SVG and WOFF2 fonts in a tmp directory next to
        /// the font source
        #[arg(long)]
        keep_intermediates: bool,
    },

    /// Create an SVG font from any font file fontforge reads
    Svg {
        /// The name of the font; names the generated file
        fontname: String,

        /// The source font file
        fontfile: PathBuf,

        /// Path to the fontforge binary (default is to search the PATH)
        #[arg(long, env = "FONTFORGE")]
        fontforge: Option<PathBuf>,
    },

    /// Create a WOFF2 font from any font file fontforge reads
    Woff2 {
        /// The name of the font; names the generated file
        fontname: String,

        /// The source font file
        fontfile: PathBuf,

        /// Path to the fontforge binary (default is to search the PATH)
        #[arg(long, env = "FONTFORGE")]
        fontforge: Option<PathBuf>,
    },

    /// Report the supported glyphs that are missing from a font
    Check {
        /// The name of the font
        fontname: String,

        /// Path to a supported.xml file
        #[arg(long, default_value = "./supported.xml")]
        supported: PathBuf,

        /// The font source parent directory
        #[arg(long, default_value = "./")]
        source: PathBuf,

        /// Also list the font glyphs that are not supported
        #[arg(long)]
        show_unsupported: bool,
    },
}

fn init_logging(debug: bool) {
    let level = if debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Smufl {
            supported,
            header_out,
        } => {
            commands::generate_header(&supported, &header_out)?;
        }
        Command::Extract {
            fontname,
            supported,
            data,
            source,
        } => {
            let font = FontSource::new(&source, &fontname);
            commands::extract_glyphs(&font, &supported, &data)?;
        }
        Command::Css {
            fontname,
            data,
            supported,
            source,
            fontforge,
            keep_intermediates,
        } => {
            let converter = FontForge::locate(fontforge.as_deref())?;
            let font = FontSource::new(&source, &fontname);
            commands::generate_style(&font, &supported, &data, &converter, keep_intermediates)?;
        }
        Command::Svg {
            fontname,
            fontfile,
            fontforge,
        } => convert(&fontname, &fontfile, FontFormat::Svg, fontforge.as_deref())?,
        Command::Woff2 {
            fontname,
            fontfile,
            fontforge,
        } => convert(&fontname, &fontfile, FontFormat::Woff2, fontforge.as_deref())?,
        Command::Check {
            fontname,
            supported,
            source,
            show_unsupported,
        } => {
            let font = FontSource::new(&source, &fontname);
            let mut stdout = std::io::stdout().lock();
            commands::check_coverage(&font, &supported, show_unsupported, &mut stdout)?;
        }
    }
    Ok(())
}

fn convert(
    fontname: &str,
    fontfile: &Path,
    format: FontFormat,
    fontforge: Option<&Path>,
) -> Result<()> {
    let converter = FontForge::locate(fontforge)?;
    let output = commands::convert_font(fontname, fontfile, format, &converter)?;
    log::debug!("Wrote {}", output.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(e) = run(cli.command) {
        log::error!("{e}");
        log::error!("An error has occurred.");
        process::exit(1);
    }
}
