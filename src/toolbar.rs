// Toolbar strip above the canvas: tool buttons, size slider, palette, colour strip, clear/save.
// Visual: one row of flat buttons; the active tool and colour are outlined.
// This module only knows geometry and hit-testing; draw.rs paints it.

use crate::draw::GLYPH_ADVANCE;
use crate::types::{BrushSize, PALETTE, Rgb, Tool};

pub const TOOLBAR_HEIGHT: usize = 36;

const PAD: i32 = 8;
const BUTTON_H: i32 = 20;
const BUTTON_Y: i32 = (TOOLBAR_HEIGHT as i32 - BUTTON_H) / 2;
const SWATCH: i32 = 18;
const SLIDER_W: i32 = 100;
const STRIP_W: i32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.w && y < self.y + self.h
    }
}

/// What a click on the toolbar asks the surface to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    SelectTool(Tool),
    SetBrushSize(u32),
    PickColor(Rgb),
    /// Free pick from the colour strip; no toast.
    SetColor(Rgb),
    Clear,
    Export,
}

#[derive(Debug, Clone)]
pub struct Toolbar {
    pub tools: Vec<(Tool, Rect)>,
    pub size_label: (i32, i32),
    pub slider: Rect,
    pub size_readout: (i32, i32),
    pub swatches: Vec<(Rgb, Rect)>,
    pub color_strip: Rect,
    pub color_preview: Rect,
    pub clear: Rect,
    pub save: Rect,
    width: usize,
}

fn text_width(text: &str) -> i32 {
    text.chars().count() as i32 * GLYPH_ADVANCE
}

fn button_for(label: &str, x: i32) -> Rect {
    Rect { x, y: BUTTON_Y, w: text_width(label) + 2 * PAD, h: BUTTON_H }
}

impl Toolbar {
    /// Lay the controls out left to right.
    pub fn new() -> Self {
        let mut x = PAD;

        let mut tools = Vec::with_capacity(Tool::ALL.len());
        for tool in Tool::ALL {
            let r = button_for(tool.label(), x);
            x += r.w + 4;
            tools.push((tool, r));
        }

        x += PAD;
        let size_label = (x, BUTTON_Y + 7);
        x += text_width("SIZE") + 6;
        let slider = Rect { x, y: BUTTON_Y, w: SLIDER_W, h: BUTTON_H };
        x += SLIDER_W + 6;
        let size_readout = (x, BUTTON_Y + 7);
        x += text_width("20PX") + 2 * PAD;

        let mut swatches = Vec::with_capacity(PALETTE.len());
        for color in PALETTE {
            swatches.push((color, Rect { x, y: BUTTON_Y + 1, w: SWATCH, h: SWATCH }));
            x += SWATCH + 4;
        }

        x += PAD;
        let color_strip = Rect { x, y: BUTTON_Y, w: STRIP_W, h: BUTTON_H };
        x += STRIP_W + 4;
        let color_preview = Rect { x, y: BUTTON_Y + 1, w: SWATCH, h: SWATCH };
        x += SWATCH;

        x += PAD;
        let clear = button_for("CLEAR", x);
        x += clear.w + 4;
        let save = button_for("SAVE", x);
        x += save.w + PAD;

        Self {
            tools,
            size_label,
            slider,
            size_readout,
            swatches,
            color_strip,
            color_preview,
            clear,
            save,
            width: x as usize,
        }
    }

    /// Narrowest window that fits every control.
    pub fn min_width(&self) -> usize {
        self.width
    }

    /// Map a slider x position onto 1..=20.
    pub fn slider_value(&self, x: i32) -> u32 {
        let t = (x - self.slider.x).clamp(0, self.slider.w - 1) as f32 / (self.slider.w - 1) as f32;
        let span = (BrushSize::MAX - BrushSize::MIN) as f32;
        BrushSize::MIN + (t * span).round() as u32
    }

    /// Where the slider knob sits for a given size.
    pub fn slider_knob_x(&self, size: BrushSize) -> i32 {
        let t = (size.get() - BrushSize::MIN) as f32 / (BrushSize::MAX - BrushSize::MIN) as f32;
        self.slider.x + (t * (self.slider.w - 1) as f32).round() as i32
    }

    /// Colour under (x, y) on the strip: hue runs left to right over the
    /// full circle, lightness runs from pale at the top to dark at the bottom.
    /// Positions off the strip are clamped to its edge.
    pub fn strip_color(&self, x: i32, y: i32) -> Rgb {
        let r = self.color_strip;
        let u = (x - r.x).clamp(0, r.w - 1) as f32 / (r.w - 1) as f32;
        let v = (y - r.y).clamp(0, r.h - 1) as f32 / (r.h - 1) as f32;
        Rgb::from_hsl(u * 360.0, 1.0, 0.85 - 0.7 * v)
    }

    pub fn hit(&self, x: i32, y: i32) -> Option<ToolbarAction> {
        if let Some((tool, _)) = self.tools.iter().find(|(_, r)| r.contains(x, y)) {
            return Some(ToolbarAction::SelectTool(*tool));
        }
        if self.slider.contains(x, y) {
            return Some(ToolbarAction::SetBrushSize(self.slider_value(x)));
        }
        if let Some((color, _)) = self.swatches.iter().find(|(_, r)| r.contains(x, y)) {
            return Some(ToolbarAction::PickColor(*color));
        }
        if self.color_strip.contains(x, y) {
            return Some(ToolbarAction::SetColor(self.strip_color(x, y)));
        }
        if self.clear.contains(x, y) {
            return Some(ToolbarAction::Clear);
        }
        if self.save.contains(x, y) {
            return Some(ToolbarAction::Export);
        }
        None
    }
}

impl Default for Toolbar {
    fn default() -> Self {
        Self::new()
    }
}
