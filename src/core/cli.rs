//! Command line interface for fontsmith
//!
//! Handles parsing command line arguments and resolves them against the
//! user's settings file. Each tool is a subcommand with its own arguments.

use crate::commands::{
    compare::CompareOptions, convert::ConvertOptions, merge_svg::MergeSvgOptions,
    optimize::OptimizeOptions,
};
use crate::core::config_file::ConfigFile;
use crate::data::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// fontsmith CLI arguments
///
/// Examples:
///   fontsmith convert MyFont.ttf -f woff2               # Convert to WOFF2 next to the input
///   fontsmith convert MyFont.otf -o web/MyFont.woff     # Convert to an explicit path
///   fontsmith cmap-diff old.ttf new.ttf                 # Added/removed codepoints
///   fontsmith diff old.ttf new.ttf --json               # Coverage, outline and metric changes
///   fontsmith merge-svg icons/ Icons.ttf "My Icons"     # Build a font from u<hex>.svg files
///   fontsmith optimize MyFont.ttf -s 1.5                # Clean up every glyph outline
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "fontsmith",
    version,
    about = "Font conversion, diffing and outline cleanup tools",
    long_about = "fontsmith drives FontForge to convert fonts between formats, merge SVG glyphs into a font and clean up glyph outlines, and reads compiled fonts directly to diff their glyph sets."
)]
pub struct CliArgs {
    /// Log at debug level
    #[clap(long = "verbose", short = 'v', global = true)]
    pub verbose: bool,

    /// Also write logs to ~/.config/fontsmith/logs/
    #[clap(long = "log-file", global = true)]
    pub log_file: bool,

    /// Initialize the user config directory with a settings file
    ///
    /// This creates the ~/.config/fontsmith directory with:
    /// - settings.json: defaults for the FontForge path, output format and simplify value
    /// - logs/: where --log-file writes
    #[clap(
        long = "new-config",
        help = "Initialize user config directory with settings",
        long_help = "Initialize the ~/.config/fontsmith directory with a settings.json file holding every default. Edit it to point at a specific FontForge binary or change default formats without passing flags each time."
    )]
    pub new_config: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert a font to another format
    Convert(ConvertArgs),
    /// Compare the cmap coverage of two fonts
    CmapDiff(CompareArgs),
    /// Compare coverage, glyph outlines and metrics of two fonts
    Diff(CompareArgs),
    /// Merge a directory of single-glyph SVG files into one font
    MergeSvg(MergeSvgArgs),
    /// Run the outline cleanup pipeline over every glyph of a font
    Optimize(OptimizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input font file
    #[clap(required_unless_present = "list_formats")]
    pub input: Option<PathBuf>,

    /// Output font file (default: input path with the format's extension)
    #[clap(long = "output", short = 'o')]
    pub output: Option<PathBuf>,

    /// Output format (default: woff2)
    #[clap(long = "format", short = 'f', value_enum)]
    pub format: Option<OutputFormat>,

    /// Set the font family name
    #[clap(long = "family-name")]
    pub family_name: Option<String>,

    /// Set the font version
    #[clap(long = "font-version")]
    pub font_version: Option<String>,

    /// List the supported output formats and exit
    #[clap(long = "list-formats")]
    pub list_formats: bool,
}

impl ConvertArgs {
    /// Resolve against settings. Priority: CLI argument, settings file,
    /// built-in default.
    pub fn resolve(&self, config: &ConfigFile) -> Option<ConvertOptions> {
        let input = self.input.clone()?;
        let format = self
            .format
            .or_else(|| {
                config.default_format.inspect(|format| {
                    debug!("Using output format from config file: {}", format);
                })
            })
            .unwrap_or_default();
        Some(ConvertOptions {
            input,
            output: self.output.clone(),
            format,
            family_name: self.family_name.clone(),
            version: self.font_version.clone(),
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Old font file, e.g. old_font.ttf
    pub old_font: PathBuf,

    /// New font file, e.g. new_font.ttf
    pub new_font: PathBuf,

    /// Print the result as JSON instead of a report
    #[clap(long = "json")]
    pub json: bool,
}

impl From<CompareArgs> for CompareOptions {
    fn from(args: CompareArgs) -> Self {
        CompareOptions {
            old_font: args.old_font,
            new_font: args.new_font,
            json: args.json,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct MergeSvgArgs {
    /// Directory of SVG files named by codepoint (u0041.svg, uni4E00.svg, 0041.svg)
    #[clap(default_value = "input_dir")]
    pub input_dir: PathBuf,

    /// Output font; the format follows the extension
    #[clap(default_value = "output_font.svg")]
    pub output_font: PathBuf,

    /// Family name of the new font
    #[clap(default_value = "CustomFont")]
    pub font_name: String,
}

impl From<MergeSvgArgs> for MergeSvgOptions {
    fn from(args: MergeSvgArgs) -> Self {
        MergeSvgOptions {
            input_dir: args.input_dir,
            output_font: args.output_font,
            font_name: args.font_name,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    /// Font file to optimize
    pub font_file: Option<PathBuf>,

    /// Outline simplification strength (default: 0.5)
    ///
    /// 0.5-1.0 conservative, keeps detail; 1.0-2.0 balanced;
    /// 2.0-3.0 aggressive, smallest files.
    #[clap(long = "simplify", short = 's')]
    pub simplify: Option<f64>,
}

impl OptimizeArgs {
    pub fn resolve(&self, config: &ConfigFile) -> Option<OptimizeOptions> {
        let font_file = self.font_file.clone()?;
        let simplify = self
            .simplify
            .or(config.default_simplify)
            .unwrap_or(crate::commands::optimize::DEFAULT_SIMPLIFY);
        let suffix = config
            .optimize_suffix
            .clone()
            .unwrap_or_else(|| crate::commands::optimize::DEFAULT_SUFFIX.to_string());
        Some(OptimizeOptions {
            font_file,
            simplify,
            suffix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn convert_defaults_to_woff2() {
        let cli = parse(&["fontsmith", "convert", "in.ttf"]);
        let Some(Command::Convert(args)) = cli.command else {
            panic!("expected convert");
        };
        let options = args.resolve(&ConfigFile::default()).unwrap();
        assert_eq!(options.format, OutputFormat::Woff2);
        assert_eq!(options.output, None);
    }

    #[test]
    fn cli_format_beats_config() {
        let cli = parse(&["fontsmith", "convert", "in.ttf", "-f", "otf"]);
        let Some(Command::Convert(args)) = cli.command else {
            panic!("expected convert");
        };
        let config = ConfigFile {
            default_format: Some(OutputFormat::Ttf),
            ..Default::default()
        };
        assert_eq!(args.resolve(&config).unwrap().format, OutputFormat::Otf);

        let cli = parse(&["fontsmith", "convert", "in.ttf"]);
        let Some(Command::Convert(args)) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.resolve(&config).unwrap().format, OutputFormat::Ttf);
    }

    #[test]
    fn convert_rejects_unknown_formats() {
        assert!(CliArgs::try_parse_from(["fontsmith", "convert", "in.ttf", "-f", "pfb"]).is_err());
    }

    #[test]
    fn convert_needs_input_unless_listing() {
        assert!(CliArgs::try_parse_from(["fontsmith", "convert"]).is_err());
        let cli = parse(&["fontsmith", "convert", "--list-formats"]);
        let Some(Command::Convert(args)) = cli.command else {
            panic!("expected convert");
        };
        assert!(args.list_formats);
        assert!(args.resolve(&ConfigFile::default()).is_none());
    }

    #[test]
    fn merge_svg_positional_defaults() {
        let cli = parse(&["fontsmith", "merge-svg"]);
        let Some(Command::MergeSvg(args)) = cli.command else {
            panic!("expected merge-svg");
        };
        assert_eq!(args.input_dir, PathBuf::from("input_dir"));
        assert_eq!(args.output_font, PathBuf::from("output_font.svg"));
        assert_eq!(args.font_name, "CustomFont");
    }

    #[test]
    fn optimize_simplify_priority() {
        let config = ConfigFile {
            default_simplify: Some(2.0),
            ..Default::default()
        };
        let cli = parse(&["fontsmith", "optimize", "a.ttf", "-s", "1.5"]);
        let Some(Command::Optimize(args)) = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(args.resolve(&config).unwrap().simplify, 1.5);

        let cli = parse(&["fontsmith", "optimize", "a.ttf"]);
        let Some(Command::Optimize(args)) = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(args.resolve(&config).unwrap().simplify, 2.0);
        assert_eq!(args.resolve(&ConfigFile::default()).unwrap().simplify, 0.5);
    }

    #[test]
    fn optimize_without_font_resolves_to_none() {
        let cli = parse(&["fontsmith", "optimize"]);
        let Some(Command::Optimize(args)) = cli.command else {
            panic!("expected optimize");
        };
        assert!(args.resolve(&ConfigFile::default()).is_none());
    }

    #[test]
    fn compare_subcommands_take_two_fonts() {
        let cli = parse(&["fontsmith", "diff", "old.ttf", "new.ttf", "--json"]);
        let Some(Command::Diff(args)) = cli.command else {
            panic!("expected diff");
        };
        assert!(args.json);
        assert!(CliArgs::try_parse_from(["fontsmith", "cmap-diff", "old.ttf"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
