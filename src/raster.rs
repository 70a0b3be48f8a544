// Fixed-size opaque pixel buffer that strokes are rasterized into.
// Visual: this is the drawing itself; the toolbar and overlays live elsewhere.

use crate::error::{Error, Result};
use crate::types::{Point, Rgb};

/// How a stroke's pixels combine with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Paint the stroke colour over existing pixels.
    SourceOver,
    /// Remove painted content under the stroke. The surface is opaque,
    /// so removal reveals the background fill.
    DestinationOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<u32>, // 0x00RRGGBB, row-major
}

impl RasterSurface {
    /// Allocate a surface filled with `background`.
    pub fn new(width: usize, height: usize, background: Rgb) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            background,
            pixels: vec![background.to_packed(); width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Colour at (x, y), or None outside the surface.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Rgb::from_packed(self.pixels[y * self.width + x]))
    }

    /// Repaint everything with the background fill.
    pub fn fill_background(&mut self) {
        let bg = self.background.to_packed();
        self.pixels.fill(bg);
    }

    /// True when no pixel differs from the background.
    pub fn is_blank(&self) -> bool {
        let bg = self.background.to_packed();
        self.pixels.iter().all(|&p| p == bg)
    }

    /// Rasterize a round-capped segment `a → b` of the given width.
    /// A pixel is covered when its integer coordinate lies within
    /// `width / 2` of the segment. Pixels off the surface are clipped.
    pub fn draw_segment(
        &mut self,
        a: Point,
        b: Point,
        width: u32,
        color: Rgb,
        composite: Composite,
    ) {
        let radius = width as f32 / 2.0;
        let packed = match composite {
            Composite::SourceOver => color.to_packed(),
            Composite::DestinationOut => self.background.to_packed(),
        };

        // Scan just the bounding box of the capsule.
        let min_x = (a.x.min(b.x) - radius).floor().max(0.0);
        let min_y = (a.y.min(b.y) - radius).floor().max(0.0);
        let max_x = (a.x.max(b.x) + radius).ceil().min(self.width as f32 - 1.0);
        let max_y = (a.y.max(b.y) + radius).ceil().min(self.height as f32 - 1.0);
        if min_x > max_x || min_y > max_y {
            return;
        }

        let r2 = radius * radius;
        for y in (min_y as usize)..=(max_y as usize) {
            let row = y * self.width;
            for x in (min_x as usize)..=(max_x as usize) {
                let p = Point::new(x as f32, y as f32);
                if dist2_to_segment(p, a, b) <= r2 {
                    self.pixels[row + x] = packed;
                }
            }
        }
    }

    /// RGB8 bytes, row-major, for encoders.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &px in &self.pixels {
            let c = Rgb::from_packed(px);
            out.extend_from_slice(&[c.r, c.g, c.b]);
        }
        out
    }
}

/// Squared distance from `p` to the closed segment `a → b`.
#[inline]
fn dist2_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    let t = if len2 > 0.0 {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0)
    } else {
        0.0 // degenerate segment: a dot at `a`
    };
    let (cx, cy) = (a.x + t * dx - p.x, a.y + t * dy - p.y);
    cx * cx + cy * cy
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(0xFF, 0, 0);

    fn surface() -> RasterSurface {
        RasterSurface::new(40, 20, Rgb::WHITE).unwrap()
    }

    fn column_height(s: &RasterSurface, x: usize, color: Rgb) -> usize {
        (0..s.height()).filter(|&y| s.pixel(x, y) == Some(color)).count()
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert!(matches!(
            RasterSurface::new(0, 10, Rgb::WHITE),
            Err(Error::InvalidDimensions { width: 0, height: 10 })
        ));
    }

    #[test]
    fn new_surface_is_background() {
        let s = surface();
        assert!(s.is_blank());
        assert_eq!(s.pixels().len(), 40 * 20);
        assert_eq!(s.pixel(39, 19), Some(Rgb::WHITE));
        assert_eq!(s.pixel(40, 0), None);
    }

    #[test]
    fn odd_width_horizontal_segment_is_exactly_that_tall() {
        let mut s = surface();
        let (a, b) = (Point::new(5.0, 10.0), Point::new(30.0, 10.0));
        s.draw_segment(a, b, 5, RED, Composite::SourceOver);
        assert_eq!(column_height(&s, 15, RED), 5);
        for y in 8..=12 {
            assert_eq!(s.pixel(15, y), Some(RED));
        }
        assert_eq!(s.pixel(15, 7), Some(Rgb::WHITE));
        assert_eq!(s.pixel(15, 13), Some(Rgb::WHITE));
    }

    #[test]
    fn caps_are_round() {
        let mut s = surface();
        let (a, b) = (Point::new(10.0, 10.0), Point::new(20.0, 10.0));
        s.draw_segment(a, b, 6, RED, Composite::SourceOver);
        // Cap extends 3px past the end on the axis but not at the corner.
        assert_eq!(s.pixel(23, 10), Some(RED));
        assert_eq!(s.pixel(23, 13), Some(Rgb::WHITE));
    }

    #[test]
    fn degenerate_segment_paints_a_dot() {
        let mut s = surface();
        let p = Point::new(10.0, 10.0);
        s.draw_segment(p, p, 1, RED, Composite::SourceOver);
        assert_eq!(s.pixel(10, 10), Some(RED));
        assert_eq!(s.pixels().iter().filter(|&&px| px == RED.to_packed()).count(), 1);
    }

    #[test]
    fn destination_out_restores_background() {
        let mut s = surface();
        let (a, b) = (Point::new(2.0, 5.0), Point::new(35.0, 5.0));
        s.draw_segment(a, b, 4, RED, Composite::SourceOver);
        assert!(!s.is_blank());
        s.draw_segment(a, b, 4, RED, Composite::DestinationOut);
        assert!(s.is_blank());
    }

    #[test]
    fn segments_off_surface_are_clipped() {
        let mut s = surface();
        let (a, b) = (Point::new(-50.0, -50.0), Point::new(-10.0, -10.0));
        s.draw_segment(a, b, 4, RED, Composite::SourceOver);
        assert!(s.is_blank());
        let (a, b) = (Point::new(-10.0, 0.0), Point::new(100.0, 0.0));
        s.draw_segment(a, b, 2, RED, Composite::SourceOver);
        assert_eq!(s.pixel(0, 0), Some(RED));
        assert_eq!(s.pixel(39, 0), Some(RED));
    }

    #[test]
    fn fill_background_resets_everything() {
        let mut s = surface();
        s.draw_segment(Point::new(0.0, 0.0), Point::new(39.0, 19.0), 8, RED, Composite::SourceOver);
        s.fill_background();
        assert_eq!(s, surface());
    }

    #[test]
    fn rgb_bytes_are_row_major() {
        let mut s = RasterSurface::new(2, 1, Rgb::WHITE).unwrap();
        s.draw_segment(Point::new(1.0, 0.0), Point::new(1.0, 0.0), 1, RED, Composite::SourceOver);
        assert_eq!(s.to_rgb_bytes(), vec![255, 255, 255, 255, 0, 0]);
    }
}
