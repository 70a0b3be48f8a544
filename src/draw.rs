// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the toolbar strip and the drawing below it.
// 2) A crosshair that follows your mouse over the canvas.
// 3) A tiny 5x7 bitmap font for button labels and toasts.

use crate::error::Error;
use crate::notify::Toast;
use crate::raster::RasterSurface;
use crate::toolbar::{Rect, TOOLBAR_HEIGHT, Toolbar};
use crate::types::{Rgb, ToolConfiguration};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// Horizontal distance between glyph origins (5px glyph + 1px gap).
pub const GLYPH_ADVANCE: i32 = 6;

const TOOLBAR_BG: u32 = 0x00_F1_F1_F4;
const BUTTON_BG: u32 = 0x00_FF_FF_FF;
const BUTTON_ACTIVE_BG: u32 = 0x00_22_22_22;
const BORDER: u32 = 0x00_C8_C8_CC;
const TEXT: u32 = 0x00_22_22_22;
const TEXT_INVERSE: u32 = 0x00_FF_FF_FF;
const CROSSHAIR: u32 = 0x00_55_55_55;
const TOAST_BG: u32 = 0x00_2A_2A_2E;

/// The window's full back buffer: toolbar on top, canvas below.
pub struct Screen {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl Screen {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a window of the given size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, screen: &Screen) -> Result<(), Error> {
        self.window
            .update_with_buffer(&screen.pixels, screen.width, screen.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Mouse position in window pixels, or None when the cursor is outside.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Like `pressed_once`, but fires again while the key is held.
    pub fn pressed_repeating(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::Yes)
    }
}

/* ---------- Software drawing: pixels, rects, lines, crosshair ---------- */

/// Put a pixel on the screen if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut Screen, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

pub fn fill_rect(fb: &mut Screen, r: Rect, color: u32) {
    for y in r.y..r.y + r.h {
        for x in r.x..r.x + r.w {
            put_pixel(fb, x, y, color);
        }
    }
}

/// 1px outline just inside `r`.
pub fn stroke_rect(fb: &mut Screen, r: Rect, color: u32) {
    let (x1, y1) = (r.x + r.w - 1, r.y + r.h - 1);
    draw_line(fb, r.x, r.y, x1, r.y, color);
    draw_line(fb, r.x, y1, x1, y1, color);
    draw_line(fb, r.x, r.y, r.x, y1, color);
    draw_line(fb, x1, r.y, x1, y1, color);
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut Screen, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) follows your mouse.
pub fn draw_crosshair(fb: &mut Screen, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/// Copy the drawing into the screen with its top-left at (0, top).
/// Visual: the canvas appears under the toolbar, clipped to the window.
pub fn blit_raster(fb: &mut Screen, raster: &RasterSurface, top: usize) {
    let cols = raster.width().min(fb.width);
    for (ry, row) in raster.pixels().chunks_exact(raster.width()).enumerate() {
        let sy = top + ry;
        if sy >= fb.height {
            break;
        }
        let start = sy * fb.width;
        fb.pixels[start..start + cols].copy_from_slice(&row[..cols]);
    }
}

/* ---------- Toolbar + toasts ---------- */

fn draw_button(fb: &mut Screen, r: Rect, label: &str, active: bool) {
    let (bg, fg) = if active { (BUTTON_ACTIVE_BG, TEXT_INVERSE) } else { (BUTTON_BG, TEXT) };
    fill_rect(fb, r, bg);
    stroke_rect(fb, r, BORDER);
    let text_w = label.chars().count() as i32 * GLYPH_ADVANCE - 1;
    draw_text_5x7(fb, r.x + (r.w - text_w) / 2, r.y + (r.h - 7) / 2, label, fg);
}

/// Paint the toolbar strip for the given configuration.
/// Visual: active tool is filled dark, active colour swatch gets a ring.
pub fn draw_toolbar(fb: &mut Screen, toolbar: &Toolbar, config: &ToolConfiguration) {
    fill_rect(fb, Rect { x: 0, y: 0, w: fb.width as i32, h: TOOLBAR_HEIGHT as i32 }, TOOLBAR_BG);
    let bottom = TOOLBAR_HEIGHT as i32 - 1;
    draw_line(fb, 0, bottom, fb.width as i32 - 1, bottom, BORDER);

    for (tool, r) in &toolbar.tools {
        draw_button(fb, *r, tool.label(), *tool == config.tool);
    }

    // Size slider: track, knob and readout.
    let (lx, ly) = toolbar.size_label;
    draw_text_5x7(fb, lx, ly, "SIZE", TEXT);
    let s = toolbar.slider;
    fill_rect(fb, Rect { x: s.x, y: s.y + s.h / 2 - 1, w: s.w, h: 2 }, BORDER);
    let knob = toolbar.slider_knob_x(config.brush_size);
    fill_rect(fb, Rect { x: knob - 2, y: s.y + 3, w: 5, h: s.h - 6 }, BUTTON_ACTIVE_BG);
    let (rx, ry) = toolbar.size_readout;
    draw_text_5x7(fb, rx, ry, &format!("{}PX", config.brush_size.get()), TEXT);

    for (color, r) in &toolbar.swatches {
        fill_rect(fb, *r, color.to_packed());
        if *color == config.color {
            let ring = Rect { x: r.x - 2, y: r.y - 2, w: r.w + 4, h: r.h + 4 };
            stroke_rect(fb, ring, BUTTON_ACTIVE_BG);
        } else {
            stroke_rect(fb, *r, BORDER);
        }
    }

    // Colour strip, then a preview of whatever colour is current.
    let strip = toolbar.color_strip;
    for y in strip.y..strip.y + strip.h {
        for x in strip.x..strip.x + strip.w {
            put_pixel(fb, x, y, toolbar.strip_color(x, y).to_packed());
        }
    }
    stroke_rect(fb, strip, BORDER);
    fill_rect(fb, toolbar.color_preview, config.color.to_packed());
    stroke_rect(fb, toolbar.color_preview, BORDER);

    draw_button(fb, toolbar.clear, "CLEAR", false);
    draw_button(fb, toolbar.save, "SAVE", false);
}

/// Stack toasts upward from the bottom-right corner, newest at the bottom.
pub fn draw_toasts(fb: &mut Screen, toasts: &[Toast]) {
    let h = 20;
    let mut y = fb.height as i32 - 8 - h;
    for toast in toasts.iter().rev() {
        let text = toast.message.to_ascii_uppercase();
        let w = text.chars().count() as i32 * GLYPH_ADVANCE + 20;
        let r = Rect { x: fb.width as i32 - 8 - w, y, w, h };
        fill_rect(fb, r, TOAST_BG);
        fill_rect(fb, Rect { x: r.x, y: r.y, w: 4, h }, toast.kind.accent());
        draw_text_5x7(fb, r.x + 12, r.y + 7, &text, TEXT_INVERSE);
        y -= h + 4;
        if y < TOOLBAR_HEIGHT as i32 {
            break;
        }
    }
}

pub fn crosshair_color(under: Option<Rgb>) -> u32 {
    // Flip to white over dark paint so the cursor stays visible.
    match under {
        Some(c) if (c.r as u32 + c.g as u32 + c.b as u32) < 3 * 96 => TEXT_INVERSE,
        _ => CROSSHAIR,
    }
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase maps to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
#[rustfmt::skip]
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        ',' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b01000),
        '!' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00000,0b00100),
        '#' => g!(0b01010,0b01010,0b11111,0b01010,0b11111,0b01010,0b01010),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '_' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b11111),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '(' => g!(0b00010,0b00100,0b01000,0b01000,0b01000,0b00100,0b00010),
        ')' => g!(0b01000,0b00100,0b00010,0b00010,0b00010,0b00100,0b01000),
        '\'' => g!(0b00100,0b00100,0b01000,0b00000,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y). Unknown characters leave a gap.
fn draw_char_5x7(fb: &mut Screen, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx, y + ry as i32, color);
                }
            }
        }
    }
}

pub fn draw_text_5x7(fb: &mut Screen, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += GLYPH_ADVANCE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Composite;
    use crate::types::{Point, Tool};

    #[test]
    fn every_label_character_has_a_glyph() {
        let labels = ["PEN", "ERASER", "SELECT", "SIZE", "20PX", "CLEAR", "SAVE"];
        for ch in labels.iter().flat_map(|l| l.chars()) {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
        for ch in "Canvas cleared! Drawing downloaded! Color changed to #2196F3".chars() {
            assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
        }
    }

    #[test]
    fn blit_places_raster_below_toolbar() {
        let mut raster = RasterSurface::new(8, 4, Rgb::WHITE).unwrap();
        let red = Rgb::new(0xFF, 0, 0);
        let origin = Point::new(0.0, 0.0);
        raster.draw_segment(origin, origin, 1, red, Composite::SourceOver);
        let mut screen = Screen::new(10, 40);
        blit_raster(&mut screen, &raster, TOOLBAR_HEIGHT);
        assert_eq!(screen.pixels[TOOLBAR_HEIGHT * 10], red.to_packed());
        assert_eq!(screen.pixels[TOOLBAR_HEIGHT * 10 + 1], Rgb::WHITE.to_packed());
        assert_eq!(screen.pixels[TOOLBAR_HEIGHT * 10 + 8], 0); // right of the canvas
        assert_eq!(screen.pixels[(TOOLBAR_HEIGHT - 1) * 10], 0); // above it
    }

    #[test]
    fn toolbar_marks_active_tool() {
        let tb = Toolbar::new();
        let mut screen = Screen::new(tb.min_width(), TOOLBAR_HEIGHT);
        let config = ToolConfiguration { tool: Tool::Eraser, ..ToolConfiguration::default() };
        draw_toolbar(&mut screen, &tb, &config);
        let inside =
            |r: Rect| screen.pixels[(r.y + 1) as usize * screen.width + (r.x + 1) as usize];
        let (_, pen) = tb.tools[0];
        let (_, eraser) = tb.tools[1];
        assert_eq!(inside(pen), BUTTON_BG);
        assert_eq!(inside(eraser), BUTTON_ACTIVE_BG);
    }

    #[test]
    fn toolbar_previews_current_color() {
        let tb = Toolbar::new();
        let mut screen = Screen::new(tb.min_width(), TOOLBAR_HEIGHT);
        let color = Rgb::new(0x12, 0x80, 0x7F);
        let config = ToolConfiguration { color, ..ToolConfiguration::default() };
        draw_toolbar(&mut screen, &tb, &config);
        let at = |x: i32, y: i32| screen.pixels[y as usize * screen.width + x as usize];

        let p = tb.color_preview;
        assert_eq!(at(p.x + p.w / 2, p.y + p.h / 2), color.to_packed());
        let s = tb.color_strip;
        let (x, y) = (s.x + s.w / 2, s.y + s.h / 2);
        assert_eq!(at(x, y), tb.strip_color(x, y).to_packed());
    }
}
