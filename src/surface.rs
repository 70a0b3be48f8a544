//! The interactive drawing surface.
//!
//! [`DrawingSurface`] owns the tool configuration, the stroke state machine
//! and (once mounted) the raster. Pointer input drives it through
//! [`DrawingSurface::handle_pointer`] or the individual stroke methods.
//! Every operation is a silent no-op while the surface is unmounted.

use std::path::PathBuf;

use crate::error::Result;
use crate::export::{self, DEFAULT_FILENAME, FileSaver};
use crate::notify::{Notifier, NotifyKind};
use crate::raster::{Composite, RasterSurface};
use crate::types::{
    BrushSize, CanvasBounds, Point, PointerEvent, PointerKind, Rgb, Tool, ToolConfiguration,
};

/// Progress of the current pointer drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    /// Pointer is pressed; the next segment starts at `last`.
    Stroking { last: Point },
}

pub struct DrawingSurface {
    config: ToolConfiguration,
    stroke: StrokeState,
    raster: Option<RasterSurface>,
    notifier: Box<dyn Notifier>,
    saver: Box<dyn FileSaver>,
    filename: String,
}

impl DrawingSurface {
    /// An unmounted surface. Call [`mount`](Self::mount) before drawing.
    pub fn new(
        config: ToolConfiguration,
        notifier: Box<dyn Notifier>,
        saver: Box<dyn FileSaver>,
    ) -> Self {
        Self {
            config,
            stroke: StrokeState::Idle,
            raster: None,
            notifier,
            saver,
            filename: DEFAULT_FILENAME.to_string(),
        }
    }

    /// Filename handed to the saver on export.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Allocate the raster and fill it with `background`. Remounting
    /// replaces any previous drawing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDimensions`] if either side is zero.
    pub fn mount(&mut self, width: usize, height: usize, background: Rgb) -> Result<()> {
        self.raster = Some(RasterSurface::new(width, height, background)?);
        self.stroke = StrokeState::Idle;
        tracing::debug!(width, height, %background, "surface mounted");
        Ok(())
    }

    pub fn unmount(&mut self) {
        self.raster = None;
        self.stroke = StrokeState::Idle;
    }

    pub fn is_mounted(&self) -> bool {
        self.raster.is_some()
    }

    pub fn raster(&self) -> Option<&RasterSurface> {
        self.raster.as_ref()
    }

    pub fn config(&self) -> ToolConfiguration {
        self.config
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.stroke
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.stroke, StrokeState::Stroking { .. })
    }

    /* ---------- Tool configuration ---------- */

    /// Switching tools mid-stroke ends the stroke; drawing resumes on the
    /// next pointer-down.
    pub fn select_tool(&mut self, tool: Tool) {
        if self.is_stroking() && tool != self.config.tool {
            tracing::debug!(
                from = ?self.config.tool,
                to = ?tool,
                "tool switched mid-stroke, ending stroke"
            );
            self.end_stroke();
        }
        self.config.tool = tool;
    }

    /// Stored clamped to [1, 20]; applies to subsequent segments only.
    pub fn set_brush_size(&mut self, size: u32) {
        let clamped = BrushSize::new(size);
        if clamped.get() != size {
            tracing::debug!(requested = size, stored = clamped.get(), "brush size clamped");
        }
        self.config.brush_size = clamped;
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.config.color = color;
    }

    /// Palette pick: like [`set_color`](Self::set_color) but tells the user.
    pub fn pick_palette_color(&mut self, color: Rgb) {
        self.set_color(color);
        self.notifier.notify(NotifyKind::Success, &format!("Color changed to {color}"));
    }

    /* ---------- Strokes ---------- */

    /// Pointer-down. Nothing is painted until the pointer moves.
    pub fn begin_stroke(&mut self, point: Point) {
        if self.raster.is_none() {
            return;
        }
        self.stroke = StrokeState::Stroking { last: point };
    }

    /// Pointer-move. Draws `last → point` with the active tool while stroking.
    pub fn extend_stroke(&mut self, point: Point) {
        let StrokeState::Stroking { last } = self.stroke else {
            return; // hovering, not pressed
        };
        let Some(raster) = self.raster.as_mut() else {
            return;
        };

        let width = self.config.brush_size.get();
        let composite = match self.config.tool {
            Tool::Pen => Some(Composite::SourceOver),
            Tool::Eraser => Some(Composite::DestinationOut),
            Tool::Select => None,
        };
        if let Some(composite) = composite {
            raster.draw_segment(last, point, width, self.config.color, composite);
        }
        self.stroke = StrokeState::Stroking { last: point };
    }

    /// Pointer-up or pointer-leave.
    pub fn end_stroke(&mut self) {
        self.stroke = StrokeState::Idle;
    }

    /// Translate a client-space pointer event into canvas-local space and
    /// run the matching stroke operation.
    pub fn handle_pointer(&mut self, event: PointerEvent, bounds: &CanvasBounds) {
        let local = bounds.to_local(event.client);
        match event.kind {
            PointerKind::Down => self.begin_stroke(local),
            PointerKind::Move => self.extend_stroke(local),
            PointerKind::Up | PointerKind::Leave => self.end_stroke(),
        }
    }

    /* ---------- Whole-surface operations ---------- */

    /// Repaint the background over everything. Not undoable.
    pub fn clear(&mut self) {
        let Some(raster) = self.raster.as_mut() else {
            return;
        };
        raster.fill_background();
        tracing::info!("canvas cleared");
        self.notifier.notify(NotifyKind::Success, "Canvas cleared!");
    }

    /// Encode the current drawing as PNG and hand it to the saver.
    /// Returns the saved path; failures are reported to the user via an
    /// error notification and yield `None`. The surface is not modified.
    pub fn export_image(&mut self) -> Option<PathBuf> {
        let raster = self.raster.as_ref()?;
        let saved = export::encode_png(raster)
            .and_then(|png| self.saver.save(&self.filename, &png));
        match saved {
            Ok(path) => {
                tracing::info!(path = %path.display(), "drawing exported");
                self.notifier.notify(NotifyKind::Success, "Drawing downloaded!");
                Some(path)
            }
            Err(e) => {
                tracing::warn!(error = %e, filename = %self.filename, "export failed");
                self.notifier.notify(NotifyKind::Error, &format!("Export failed: {e}"));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<(NotifyKind, String)>>>;

    struct Recorder(Log);

    impl Notifier for Recorder {
        fn notify(&self, kind: NotifyKind, message: &str) {
            self.0.borrow_mut().push((kind, message.to_string()));
        }
    }

    struct NullSaver;

    impl FileSaver for NullSaver {
        fn save(&mut self, filename: &str, _bytes: &[u8]) -> Result<PathBuf> {
            Ok(PathBuf::from(filename))
        }
    }

    fn mounted() -> (DrawingSurface, Log) {
        let log = Log::default();
        let mut s = DrawingSurface::new(
            ToolConfiguration::default(),
            Box::new(Recorder(log.clone())),
            Box::new(NullSaver),
        );
        s.mount(50, 30, Rgb::WHITE).unwrap();
        (s, log)
    }

    #[test]
    fn unmounted_surface_ignores_everything() {
        let log = Log::default();
        let mut s = DrawingSurface::new(
            ToolConfiguration::default(),
            Box::new(Recorder(log.clone())),
            Box::new(NullSaver),
        );
        s.begin_stroke(Point::new(1.0, 1.0));
        assert_eq!(s.stroke_state(), StrokeState::Idle);
        s.extend_stroke(Point::new(5.0, 5.0));
        s.clear();
        assert_eq!(s.export_image(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn state_machine_transitions() {
        let (mut s, _) = mounted();
        let p0 = Point::new(1.0, 1.0);
        s.begin_stroke(p0);
        assert_eq!(s.stroke_state(), StrokeState::Stroking { last: p0 });
        let p1 = Point::new(9.0, 1.0);
        s.extend_stroke(p1);
        assert_eq!(s.stroke_state(), StrokeState::Stroking { last: p1 });
        s.end_stroke();
        assert_eq!(s.stroke_state(), StrokeState::Idle);
    }

    #[test]
    fn begin_alone_paints_nothing() {
        let (mut s, _) = mounted();
        s.begin_stroke(Point::new(10.0, 10.0));
        s.end_stroke();
        assert!(s.raster().unwrap().is_blank());
    }

    #[test]
    fn select_tool_moves_the_anchor_without_painting() {
        let (mut s, _) = mounted();
        s.select_tool(Tool::Select);
        s.begin_stroke(Point::new(1.0, 1.0));
        s.extend_stroke(Point::new(20.0, 20.0));
        assert!(s.raster().unwrap().is_blank());
        assert_eq!(s.stroke_state(), StrokeState::Stroking { last: Point::new(20.0, 20.0) });
    }

    #[test]
    fn switching_tool_mid_stroke_ends_it() {
        let (mut s, _) = mounted();
        s.begin_stroke(Point::new(1.0, 5.0));
        s.extend_stroke(Point::new(10.0, 5.0));
        let before = s.raster().unwrap().clone();

        s.select_tool(Tool::Eraser);
        assert!(!s.is_stroking());
        s.extend_stroke(Point::new(1.0, 5.0));
        assert_eq!(s.raster().unwrap(), &before);
    }

    #[test]
    fn reselecting_same_tool_keeps_stroke() {
        let (mut s, _) = mounted();
        s.begin_stroke(Point::new(1.0, 5.0));
        s.select_tool(Tool::Pen);
        assert!(s.is_stroking());
    }

    #[test]
    fn brush_size_is_clamped_on_store() {
        let (mut s, _) = mounted();
        s.set_brush_size(0);
        assert_eq!(s.config().brush_size.get(), 1);
        s.set_brush_size(500);
        assert_eq!(s.config().brush_size.get(), 20);
    }

    #[test]
    fn clear_and_export_notify_success() {
        let (mut s, log) = mounted();
        s.clear();
        assert_eq!(s.export_image(), Some(PathBuf::from("drawing.png")));
        let log = log.borrow();
        assert_eq!(
            *log,
            vec![
                (NotifyKind::Success, "Canvas cleared!".to_string()),
                (NotifyKind::Success, "Drawing downloaded!".to_string()),
            ]
        );
    }

    #[test]
    fn palette_pick_sets_color_and_reports_success() {
        let (mut s, log) = mounted();
        let blue = Rgb::new(0x21, 0x96, 0xF3);
        s.pick_palette_color(blue);
        assert_eq!(s.config().color, blue);
        assert_eq!(
            log.borrow()[0],
            (NotifyKind::Success, "Color changed to #2196F3".to_string())
        );
    }

    #[test]
    fn free_color_change_is_silent_and_paints() {
        let (mut s, log) = mounted();
        let teal = Rgb::new(0x12, 0x80, 0x7F);
        s.set_color(teal);
        assert_eq!(s.config().color, teal);
        assert!(log.borrow().is_empty());

        s.begin_stroke(Point::new(5.0, 5.0));
        s.extend_stroke(Point::new(15.0, 5.0));
        s.end_stroke();
        assert_eq!(s.raster().and_then(|r| r.pixel(10, 5)), Some(teal));
    }

    #[test]
    fn handle_pointer_uses_local_coordinates() {
        let (mut s, _) = mounted();
        let bounds = CanvasBounds { origin: Point::new(100.0, 200.0), width: 50, height: 30 };
        s.handle_pointer(PointerEvent::new(PointerKind::Down, 110.0, 210.0), &bounds);
        assert_eq!(s.stroke_state(), StrokeState::Stroking { last: Point::new(10.0, 10.0) });
        s.handle_pointer(PointerEvent::new(PointerKind::Leave, 300.0, 300.0), &bounds);
        assert_eq!(s.stroke_state(), StrokeState::Idle);
    }
}
