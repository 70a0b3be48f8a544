//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

use crate::error::Error;
use crate::export::DEFAULT_FILENAME;
use crate::types::{BrushSize, Rgb, Tool, ToolConfiguration};

/// Command-line arguments for sketchpad.
#[derive(Debug, Clone, Parser)]
#[command(name = "sketchpad")]
#[command(about = "Freehand drawing surface with pen, eraser, clear and PNG export")]
#[command(version)]
pub struct CliArgs {
    /// Canvas width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: usize,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 400)]
    pub height: usize,

    /// Background fill (#RRGGBB)
    #[arg(long, default_value = "#FFFFFF")]
    pub background: String,

    /// Initial pen colour (#RRGGBB)
    #[arg(long, default_value = "#E91E63")]
    pub color: String,

    /// Initial brush size, clamped to 1..=20
    #[arg(long, default_value_t = 5)]
    pub brush_size: u32,

    /// Directory exported drawings are written to
    #[arg(long, env = "SKETCHPAD_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Filename for exported drawings
    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub filename: String,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub width: usize,
    pub height: usize,
    pub background: Rgb,
    pub tools: ToolConfiguration,
    pub output_dir: PathBuf,
    pub filename: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            background: Rgb::WHITE,
            tools: ToolConfiguration::default(),
            output_dir: PathBuf::from("."),
            filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

impl TryFrom<CliArgs> for CanvasConfig {
    type Error = Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.width == 0 || args.height == 0 {
            return Err(Error::InvalidDimensions { width: args.width, height: args.height });
        }
        Ok(Self {
            width: args.width,
            height: args.height,
            background: args.background.parse()?,
            tools: ToolConfiguration {
                tool: Tool::Pen,
                brush_size: BrushSize::new(args.brush_size),
                color: args.color.parse()?,
            },
            output_dir: args.output_dir,
            filename: args.filename,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let args = CliArgs::parse_from(["sketchpad"]);
        let cfg = CanvasConfig::try_from(args).unwrap();
        assert_eq!(cfg, CanvasConfig::default());
    }

    #[test]
    fn brush_size_from_cli_is_clamped() {
        let args = CliArgs::parse_from(["sketchpad", "--brush-size", "64"]);
        let cfg = CanvasConfig::try_from(args).unwrap();
        assert_eq!(cfg.tools.brush_size.get(), 20);
    }

    #[test]
    fn bad_color_is_rejected() {
        let args = CliArgs::parse_from(["sketchpad", "--color", "pink"]);
        assert!(matches!(CanvasConfig::try_from(args), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn zero_width_is_rejected() {
        let args = CliArgs::parse_from(["sketchpad", "--width", "0"]);
        assert!(matches!(CanvasConfig::try_from(args), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn custom_values_carry_through() {
        let args = CliArgs::parse_from([
            "sketchpad", "--width", "320", "--height", "200", "--background", "#000000",
            "--output-dir", "/tmp/sketches", "--filename", "art.png",
        ]);
        let cfg = CanvasConfig::try_from(args).unwrap();
        assert_eq!((cfg.width, cfg.height), (320, 200));
        assert_eq!(cfg.background, Rgb::BLACK);
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/sketches"));
        assert_eq!(cfg.filename, "art.png");
    }
}
