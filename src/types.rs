// Core value types shared by the surface, the toolbar and the window host.

use crate::error::Error;
use std::fmt::{self, Display};
use std::str::FromStr;

/// A position in pixels. Client space or canvas-local space depending on context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB, the layout minifb and the raster use.
    #[inline]
    pub const fn to_packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_packed(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }

    /// Hue in degrees, saturation and lightness in [0, 1].
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        let (s, l) = (saturation.clamp(0.0, 1.0), lightness.clamp(0.0, 1.0));
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb::new(to_u8(r), to_u8(g), to_u8(b))
    }
}

impl FromStr for Rgb {
    type Err = Error;

    /// Accepts `#RRGGBB` or `RRGGBB`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| Error::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Quick palette offered next to the colour control.
pub const PALETTE: [Rgb; 7] = [
    Rgb::new(0xE9, 0x1E, 0x63),
    Rgb::new(0x21, 0x96, 0xF3),
    Rgb::new(0x4C, 0xAF, 0x50),
    Rgb::new(0xFF, 0x98, 0x00),
    Rgb::new(0x9C, 0x27, 0xB0),
    Rgb::new(0xF4, 0x43, 0x36),
    Rgb::BLACK,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
    /// Reserved; strokes made with it leave pixels untouched.
    Select,
}

impl Tool {
    pub const ALL: [Tool; 3] = [Tool::Pen, Tool::Eraser, Tool::Select];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Pen => "PEN",
            Tool::Eraser => "ERASER",
            Tool::Select => "SELECT",
        }
    }
}

/// Stroke width in pixels, always within [MIN, MAX].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BrushSize(u32);

impl BrushSize {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 20;

    /// Out-of-range input is clamped, never stored.
    pub fn new(px: u32) -> Self {
        Self(px.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn grow(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    pub fn shrink(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }
}

impl Default for BrushSize {
    fn default() -> Self {
        Self(5)
    }
}

/// The settings the next stroke segment is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolConfiguration {
    pub tool: Tool,
    pub brush_size: BrushSize,
    pub color: Rgb, // only read when tool == Pen
}

impl Default for ToolConfiguration {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            brush_size: BrushSize::default(),
            color: PALETTE[0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// A pointer event as delivered by the host, in client (window) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub client: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f32, y: f32) -> Self {
        Self { kind, client: Point::new(x, y) }
    }
}

/// On-screen rectangle occupied by the canvas, in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub origin: Point,
    pub width: usize,
    pub height: usize,
}

impl CanvasBounds {
    /// Client → canvas-local.
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.origin.x, client.y - self.origin.y)
    }

    pub fn contains(&self, client: Point) -> bool {
        let local = self.to_local(client);
        local.x >= 0.0
            && local.y >= 0.0
            && local.x < self.width as f32
            && local.y < self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_parses_with_and_without_hash() {
        let c: Rgb = "#E91E63".parse().unwrap();
        assert_eq!(c, Rgb::new(0xE9, 0x1E, 0x63));
        let c: Rgb = "2196f3".parse().unwrap();
        assert_eq!(c, Rgb::new(0x21, 0x96, 0xF3));
    }

    #[test]
    fn rgb_rejects_garbage() {
        assert!("#E91E6".parse::<Rgb>().is_err());
        assert!("#GG0000".parse::<Rgb>().is_err());
        assert!("".parse::<Rgb>().is_err());
    }

    #[test]
    fn rgb_display_is_upper_hex() {
        assert_eq!(Rgb::new(0x9C, 0x27, 0xB0).to_string(), "#9C27B0");
    }

    #[test]
    fn rgb_packing_matches_minifb_layout() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_packed(), 0x0012_3456);
        assert_eq!(Rgb::from_packed(0xFF12_3456), c);
    }

    #[test]
    fn hsl_primaries_and_greys() {
        assert_eq!(Rgb::from_hsl(0.0, 1.0, 0.5), Rgb::new(0xFF, 0, 0));
        assert_eq!(Rgb::from_hsl(120.0, 1.0, 0.5), Rgb::new(0, 0xFF, 0));
        assert_eq!(Rgb::from_hsl(240.0, 1.0, 0.5), Rgb::new(0, 0, 0xFF));
        assert_eq!(Rgb::from_hsl(360.0, 1.0, 0.5), Rgb::new(0xFF, 0, 0));
        assert_eq!(Rgb::from_hsl(77.0, 0.0, 1.0), Rgb::WHITE);
        assert_eq!(Rgb::from_hsl(77.0, 1.0, 0.0), Rgb::BLACK);
    }

    #[test]
    fn brush_size_clamps() {
        assert_eq!(BrushSize::new(0).get(), 1);
        assert_eq!(BrushSize::new(7).get(), 7);
        assert_eq!(BrushSize::new(99).get(), 20);
        assert_eq!(BrushSize::new(20).grow().get(), 20);
        assert_eq!(BrushSize::new(1).shrink().get(), 1);
    }

    #[test]
    fn bounds_translate_client_to_local() {
        let b = CanvasBounds { origin: Point::new(30.0, 40.0), width: 100, height: 50 };
        assert_eq!(b.to_local(Point::new(35.0, 47.0)), Point::new(5.0, 7.0));
        assert!(b.contains(Point::new(30.0, 40.0)));
        assert!(!b.contains(Point::new(29.0, 40.0)));
        assert!(!b.contains(Point::new(130.0, 60.0)));
    }
}
