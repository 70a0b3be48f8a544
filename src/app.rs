// Frame loop: poll input, drive the drawing surface, compose the screen, present.
// What you SEE each frame: toolbar on top, your drawing below, crosshair and toasts on top.

use std::time::Instant;

use minifb::Key;

use crate::config::CanvasConfig;
use crate::draw::{self, Drawer, Screen};
use crate::error::Result;
use crate::export::DirectorySaver;
use crate::notify::ToastQueue;
use crate::surface::DrawingSurface;
use crate::toolbar::{TOOLBAR_HEIGHT, Toolbar, ToolbarAction};
use crate::types::{
    CanvasBounds, PALETTE, Point, PointerEvent, PointerKind, Tool, ToolConfiguration,
};

/// Turns polled (position, button) samples into discrete pointer events.
/// minifb only reports state, so edges are derived here.
#[derive(Debug, Default)]
pub struct PointerTracker {
    was_down: bool,
    was_inside: bool,
    last: Option<Point>,
}

impl PointerTracker {
    /// At most one event per sample, in the host order down → move* → up|leave.
    pub fn sample(
        &mut self,
        pos: Option<(f32, f32)>,
        down: bool,
        bounds: &CanvasBounds,
    ) -> Option<PointerEvent> {
        let pos = pos.map(Point::from);
        let inside = pos.is_some_and(|p| bounds.contains(p));
        let moved = pos != self.last;

        let event = match (self.was_down, down) {
            (false, true) if inside => Some(PointerKind::Down),
            (true, true) if self.was_inside && !inside => Some(PointerKind::Leave),
            (true, true) if self.was_inside && inside && moved => Some(PointerKind::Move),
            (true, false) if self.was_inside => Some(PointerKind::Up),
            _ => None,
        };

        // A drag that left the canvas stays outside until the next press.
        self.was_inside = match (self.was_down, down) {
            (false, true) => inside,
            (true, true) => self.was_inside && inside,
            _ => false,
        };
        self.was_down = down;
        let client = pos.or(self.last).unwrap_or(bounds.origin);
        if pos.is_some() {
            self.last = pos;
        }
        event.map(|kind| PointerEvent { kind, client })
    }
}

/// Toolbar control that keeps following the mouse while the button is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Slider,
    ColorStrip,
}

impl Drag {
    fn from_action(action: ToolbarAction) -> Option<Self> {
        match action {
            ToolbarAction::SetBrushSize(_) => Some(Drag::Slider),
            ToolbarAction::SetColor(_) => Some(Drag::ColorStrip),
            _ => None,
        }
    }

    /// The action the control asks for with the mouse at (x, y).
    fn follow(self, toolbar: &Toolbar, x: i32, y: i32) -> ToolbarAction {
        match self {
            Drag::Slider => ToolbarAction::SetBrushSize(toolbar.slider_value(x)),
            Drag::ColorStrip => ToolbarAction::SetColor(toolbar.strip_color(x, y)),
        }
    }
}

pub struct App {
    drawer: Drawer,
    screen: Screen,
    surface: DrawingSurface,
    toolbar: Toolbar,
    toasts: ToastQueue,
    bounds: CanvasBounds,
    pointer: PointerTracker,
    mouse_was_down: bool,
    drag: Option<Drag>,
    shown_config: Option<ToolConfiguration>,
}

impl App {
    pub fn new(config: &CanvasConfig) -> Result<Self> {
        let toolbar = Toolbar::new();
        let width = config.width.max(toolbar.min_width());
        let height = config.height + TOOLBAR_HEIGHT;

        let toasts = ToastQueue::default();
        let saver = DirectorySaver::new(&config.output_dir);
        let mut surface =
            DrawingSurface::new(config.tools, Box::new(toasts.clone()), Box::new(saver))
                .with_filename(config.filename.clone());
        surface.mount(config.width, config.height, config.background)?;

        let drawer = Drawer::new("Sketchpad", width, height)?;
        tracing::info!(width, height, output_dir = %config.output_dir.display(), "window opened");

        Ok(Self {
            drawer,
            screen: Screen::new(width, height),
            surface,
            toolbar,
            toasts,
            bounds: CanvasBounds {
                origin: Point::new(0.0, TOOLBAR_HEIGHT as f32),
                width: config.width,
                height: config.height,
            },
            pointer: PointerTracker::default(),
            mouse_was_down: false,
            drag: None,
            shown_config: None,
        })
    }

    /// Run until the window closes or ESC is pressed.
    pub fn run(mut self) -> Result<()> {
        while self.drawer.is_open() && !self.drawer.esc_pressed() {
            self.handle_mouse();
            self.handle_keys();
            self.compose(Instant::now());
            self.drawer.present(&self.screen)?;
            self.refresh_title();
        }
        self.surface.unmount();
        tracing::info!("window closed");
        Ok(())
    }

    fn handle_mouse(&mut self) {
        let pos = self.drawer.mouse_pos();
        let down = self.drawer.left_mouse_down();

        if let Some(event) = self.pointer.sample(pos, down, &self.bounds) {
            self.surface.handle_pointer(event, &self.bounds);
        }

        // Toolbar: act on the press edge; the slider and colour strip also follow drags.
        if down && !self.mouse_was_down {
            if let Some((x, y)) = pos.filter(|&(_, y)| y < TOOLBAR_HEIGHT as f32) {
                if let Some(action) = self.toolbar.hit(x as i32, y as i32) {
                    self.drag = Drag::from_action(action);
                    self.apply(action);
                }
            }
        } else if let (true, Some(drag), Some((x, y))) = (down, self.drag, pos) {
            match drag.follow(&self.toolbar, x as i32, y as i32) {
                ToolbarAction::SetBrushSize(size) => self.surface.set_brush_size(size),
                ToolbarAction::SetColor(color) => self.surface.set_color(color),
                _ => {}
            }
        }
        if !down {
            self.drag = None;
        }
        self.mouse_was_down = down;
    }

    fn handle_keys(&mut self) {
        let tool_keys = [(Key::P, Tool::Pen), (Key::E, Tool::Eraser), (Key::S, Tool::Select)];
        for (key, tool) in tool_keys {
            if self.drawer.pressed_once(key) {
                self.apply(ToolbarAction::SelectTool(tool));
            }
        }

        let size = self.surface.config().brush_size;
        if self.drawer.pressed_repeating(Key::LeftBracket) {
            self.apply(ToolbarAction::SetBrushSize(size.shrink().get()));
        }
        if self.drawer.pressed_repeating(Key::RightBracket) {
            self.apply(ToolbarAction::SetBrushSize(size.grow().get()));
        }

        let palette_keys = [
            Key::Key1,
            Key::Key2,
            Key::Key3,
            Key::Key4,
            Key::Key5,
            Key::Key6,
            Key::Key7,
        ];
        for (key, color) in palette_keys.into_iter().zip(PALETTE) {
            if self.drawer.pressed_once(key) {
                self.apply(ToolbarAction::PickColor(color));
            }
        }

        if self.drawer.pressed_once(Key::C) {
            self.apply(ToolbarAction::Clear);
        }
        if self.drawer.pressed_once(Key::X) {
            self.apply(ToolbarAction::Export);
        }
    }

    fn apply(&mut self, action: ToolbarAction) {
        tracing::debug!(?action, "toolbar action");
        match action {
            ToolbarAction::SelectTool(tool) => self.surface.select_tool(tool),
            ToolbarAction::SetBrushSize(size) => self.surface.set_brush_size(size),
            ToolbarAction::PickColor(color) => self.surface.pick_palette_color(color),
            ToolbarAction::SetColor(color) => self.surface.set_color(color),
            ToolbarAction::Clear => self.surface.clear(),
            ToolbarAction::Export => {
                self.surface.export_image();
            }
        }
    }

    /// Build this frame's screen. Overlays go into the screen buffer only,
    /// never into the raster, so exports contain strokes alone.
    fn compose(&mut self, now: Instant) {
        let config = self.surface.config();
        self.screen.pixels.fill(0x00_E4_E4_E7); // margin right of a narrow canvas
        draw::draw_toolbar(&mut self.screen, &self.toolbar, &config);

        if let Some(raster) = self.surface.raster() {
            draw::blit_raster(&mut self.screen, raster, TOOLBAR_HEIGHT);

            if let Some((mx, my)) = self.drawer.mouse_pos() {
                let client = Point::new(mx, my);
                if self.bounds.contains(client) {
                    let local = self.bounds.to_local(client);
                    let under = raster.pixel(local.x as usize, local.y as usize);
                    let color = draw::crosshair_color(under);
                    draw::draw_crosshair(&mut self.screen, mx as i32, my as i32, 10, color);
                }
            }
        }

        draw::draw_toasts(&mut self.screen, &self.toasts.visible(now));
    }

    fn refresh_title(&mut self) {
        let config = self.surface.config();
        if self.shown_config == Some(config) {
            return;
        }
        let title = format!(
            "Sketchpad | {} {}px {} | P/E/S tools  [ ] size  1-7 colors  C clear  X save",
            config.tool.label(),
            config.brush_size.get(),
            config.color,
        );
        self.drawer.set_title(&title);
        self.shown_config = Some(config);
    }
}
