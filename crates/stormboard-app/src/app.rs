//! Board application: toolbar, legend, canvas and persistence wiring.

use std::time::{Duration, Instant};

use egui::{
    text::{CCursor, CCursorRange},
    Id, Key, Order, Pos2, RichText, Sense, pos2, vec2,
};
use kurbo::{Point, Vec2};

use stormboard_core::config;
use stormboard_core::storage::{FileStorage, Storage, StorageError};
use stormboard_core::{
    Board, BoardDocument, EditSession, Host, LayoutEngine, ShapeRegistry, StickyNote, StickyType,
};
use stormboard_widgets::{
    panel_frame, section_label, separator, theme, toolbar_frame, ColorSwatch, StickyButton,
    TextButton,
};

use crate::canvas;

/// Fallback spawn position when the viewport is unavailable.
const DEFAULT_SPAWN: Point = Point::new(100.0, 100.0);

/// How long a notice stays on screen.
const NOTICE_DURATION: Duration = Duration::from_secs(4);

/// What a drag that started on the canvas is doing.
#[derive(Debug, Clone, Copy)]
enum DragState {
    /// Panning the camera.
    Pan,
    /// Moving one sticky (manual drag).
    MoveShape(stormboard_core::ShapeId),
}

/// Outcome of the edit overlay for this frame.
enum EditOutcome {
    None,
    Commit,
    Cancel,
}

pub struct BoardApp {
    board: Board,
    registry: ShapeRegistry,
    layout: LayoutEngine,
    storage: Option<FileStorage>,
    room: String,
    edit: Option<EditSession>,
    edit_needs_focus: bool,
    drag: Option<DragState>,
    notice: Option<(String, Instant)>,
    legend_open: bool,
    canvas_origin: Pos2,
    spawn_counter: u32,
    /// Fit the camera to the loaded content on the first frame.
    pending_fit: bool,
}

impl BoardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, room: String) -> Self {
        let storage = match FileStorage::default_location() {
            Ok(storage) => Some(storage),
            Err(err) => {
                log::warn!("storage unavailable, board will not be persisted: {err}");
                None
            }
        };

        let document = match &storage {
            Some(storage) => match block_on(storage.load(&room)) {
                Ok(document) => document,
                Err(StorageError::NotFound(_)) => {
                    log::info!("no saved board for room {room:?}, starting empty");
                    BoardDocument::new()
                }
                Err(err) => {
                    log::warn!("failed to load saved board for room {room:?}: {err}; starting empty");
                    BoardDocument::new()
                }
            },
            None => BoardDocument::new(),
        };

        let pending_fit = !document.is_empty();
        Self {
            board: Board::with_document(document),
            registry: ShapeRegistry::with_defaults(),
            layout: LayoutEngine::new(),
            storage,
            room,
            edit: None,
            edit_needs_focus: false,
            drag: None,
            notice: None,
            legend_open: false,
            canvas_origin: Pos2::ZERO,
            spawn_counter: 0,
            pending_fit,
        }
    }

    /// Persist the full snapshot after a user-sourced change.
    fn save(&self) {
        if let Some(storage) = &self.storage {
            if let Err(err) = block_on(storage.save(&self.room, &self.board.document)) {
                log::warn!("failed to persist board for room {:?}: {err}", self.room);
            }
        }
    }

    fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some((text.into(), Instant::now()));
    }

    /// Deterministic per-process jitter in [0, 1)^2 (splitmix32-like).
    fn spawn_jitter(&mut self) -> (f64, f64) {
        self.spawn_counter = self.spawn_counter.wrapping_add(1);
        let mut x = self.spawn_counter.wrapping_mul(0x9E3779B9);
        x ^= x >> 16;
        x = x.wrapping_mul(0x85EBCA6B);
        x ^= x >> 13;
        x = x.wrapping_mul(0xC2B2AE35);
        x ^= x >> 16;
        (
            (x & 0xFFFF) as f64 / 65536.0,
            (x >> 16) as f64 / 65536.0,
        )
    }

    /// Pick a spawn position inside the current viewport, falling back
    /// to a fixed default when the viewport is unavailable.
    fn spawn_position(&mut self) -> Point {
        let (jx, jy) = self.spawn_jitter();
        match self.board.viewport() {
            Some(vp) if !vp.is_degenerate() => {
                let bounds = vp.bounds;
                Point::new(
                    bounds.x0 + bounds.width() * (0.2 + 0.4 * jx),
                    bounds.y0 + bounds.height() * (0.2 + 0.4 * jy),
                )
            }
            _ => {
                log::warn!("viewport unavailable, creating note at the default position");
                Point::new(DEFAULT_SPAWN.x + jx * 200.0, DEFAULT_SPAWN.y + jy * 200.0)
            }
        }
    }

    /// Create a new sticky of the given type, prefilled from its
    /// template table, and select it as the sole selection.
    fn create_note(&mut self, sticky_type: StickyType) {
        self.commit_edit();

        let position = self.spawn_position();
        let note = StickyNote::new(sticky_type, position)
            .with_text(config::pick_template(sticky_type));

        match self.board.create_sticky(note) {
            Ok(id) => {
                self.board.set_selection(&[id]);
                self.save();
            }
            Err(err) => {
                log::warn!("sticky creation failed: {err}");
                self.set_notice(format!("Could not create note: {err}"));
            }
        }
    }

    /// Run one auto-align pass and surface the result.
    fn run_auto_align(&mut self) {
        self.commit_edit();

        match self.layout.auto_align(&mut self.board) {
            Ok(placed) => {
                self.set_notice(format!("Aligned {placed} notes"));
                self.save();
            }
            Err(err) => {
                log::info!("auto align: {err}");
                self.set_notice(err.to_string());
            }
        }
    }

    /// Commit any open edit session through the host.
    fn commit_edit(&mut self) {
        if let Some(mut session) = self.edit.take() {
            if let Some((id, patch)) = session.commit() {
                match self.board.update_sticky(id, patch) {
                    Ok(()) => self.save(),
                    Err(err) => {
                        log::warn!("text commit failed: {err}");
                        self.set_notice(format!("Could not update note: {err}"));
                    }
                }
            }
        }
    }

    /// Open an edit session for a note (double-click gesture).
    fn open_edit(&mut self, id: stormboard_core::ShapeId) {
        self.commit_edit();
        if let Some(note) = self.board.document.get_shape(id) {
            let mut session = EditSession::new(note);
            session.begin();
            self.edit = Some(session);
            self.edit_needs_focus = true;
        }
    }

    fn show_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::from_rgb(246, 247, 249)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
                let rect = response.rect;
                self.canvas_origin = rect.min;
                self.board
                    .set_viewport_size(rect.width() as f64, rect.height() as f64);

                // Frame the loaded board once a real viewport exists.
                if self.pending_fit {
                    if let (Some(bounds), Some(vp)) =
                        (self.board.document.bounds(), self.board.viewport())
                    {
                        if !vp.is_degenerate() {
                            let fit = stormboard_core::layout::fit_camera(bounds, &vp);
                            self.board.set_camera(fit.center, fit.zoom);
                            self.pending_fit = false;
                        }
                    } else {
                        self.pending_fit = false;
                    }
                }

                // Zoom about the cursor.
                if let Some(hover) = response.hover_pos() {
                    let scroll = ui.input(|i| i.raw_scroll_delta.y);
                    if scroll != 0.0 {
                        let factor = (scroll as f64 * 0.002).exp();
                        let local = Point::new(
                            (hover.x - rect.left()) as f64,
                            (hover.y - rect.top()) as f64,
                        );
                        self.board.camera.zoom_at(local, factor);
                    }
                }

                // Drag: move a sticky, or pan on empty space.
                if response.drag_started() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let world = canvas::screen_to_world(&self.board.camera, rect.min, pos);
                        match self.board.document.topmost_at(world) {
                            Some(id) => {
                                self.board.set_selection(&[id]);
                                self.drag = Some(DragState::MoveShape(id));
                            }
                            None => self.drag = Some(DragState::Pan),
                        }
                    }
                }
                if response.dragged() {
                    let delta = response.drag_delta();
                    match self.drag {
                        Some(DragState::MoveShape(id)) => {
                            let zoom = self.board.camera.zoom;
                            if let Some(note) = self.board.document.get_shape_mut(id) {
                                note.position.x += delta.x as f64 / zoom;
                                note.position.y += delta.y as f64 / zoom;
                            }
                        }
                        Some(DragState::Pan) => {
                            self.board
                                .camera
                                .pan(Vec2::new(delta.x as f64, delta.y as f64));
                        }
                        None => {}
                    }
                }
                if response.drag_stopped() {
                    if matches!(self.drag, Some(DragState::MoveShape(_))) {
                        // One user-sourced change per completed drag.
                        self.board.document.revision += 1;
                        self.save();
                    }
                    self.drag = None;
                }

                // Click selects; double-click opens the edit session.
                if response.double_clicked() {
                    if let Some(pos) = response.interact_pointer_pos() {
                        let world = canvas::screen_to_world(&self.board.camera, rect.min, pos);
                        if let Some(id) = self.board.document.topmost_at(world) {
                            self.board.set_selection(&[id]);
                            self.open_edit(id);
                        }
                    }
                } else if response.clicked() {
                    self.commit_edit();
                    if let Some(pos) = response.interact_pointer_pos() {
                        let world = canvas::screen_to_world(&self.board.camera, rect.min, pos);
                        match self.board.document.topmost_at(world) {
                            Some(id) => self.board.set_selection(&[id]),
                            None => self.board.clear_selection(),
                        }
                    }
                }

                // Delete selected shapes (only while not editing text).
                let editing = self.edit.as_ref().is_some_and(|e| e.is_editing());
                if !editing
                    && ui.input(|i| i.key_pressed(Key::Delete) || i.key_pressed(Key::Backspace))
                    && self.board.delete_selected() > 0
                {
                    self.save();
                }

                canvas::paint_board(&painter, rect.min, &self.board, &self.registry);
            });
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        let mut create: Option<StickyType> = None;
        let mut align = false;

        egui::Area::new(Id::new("toolbar"))
            .fixed_pos(pos2(12.0, 12.0))
            .order(Order::Foreground)
            .show(ctx, |ui| {
                toolbar_frame().show(ui, |ui| {
                    ui.set_width(190.0);
                    section_label(ui, "Event Storming");
                    ui.add_space(4.0);

                    for sticky_type in StickyType::ALL {
                        let cfg = config::sticky_config(sticky_type);
                        let chip = canvas::color32(cfg.color);
                        if StickyButton::new(cfg.icon, cfg.label, cfg.description, chip).show(ui) {
                            create = Some(sticky_type);
                        }
                    }

                    ui.add_space(6.0);
                    separator(ui);
                    ui.horizontal(|ui| {
                        if TextButton::new("Auto align").min_width(88.0).show(ui) {
                            align = true;
                        }
                        if TextButton::new("Legend")
                            .selected(self.legend_open)
                            .show(ui)
                        {
                            self.legend_open = !self.legend_open;
                        }
                    });
                });
            });

        if let Some(sticky_type) = create {
            self.create_note(sticky_type);
        }
        if align {
            self.run_auto_align();
        }
    }

    fn show_legend(&mut self, ctx: &egui::Context) {
        if !self.legend_open {
            return;
        }
        let screen = ctx.screen_rect();
        egui::Area::new(Id::new("legend"))
            .fixed_pos(pos2(screen.right() - 292.0, 12.0))
            .order(Order::Foreground)
            .show(ctx, |ui| {
                panel_frame().show(ui, |ui| {
                    ui.set_width(268.0);
                    section_label(ui, "Legend");
                    ui.add_space(4.0);
                    for sticky_type in StickyType::ALL {
                        let cfg = config::sticky_config(sticky_type);
                        ui.horizontal(|ui| {
                            ColorSwatch::new(canvas::color32(cfg.color), cfg.label).show(ui);
                            ui.label(RichText::new(cfg.label).size(12.0).color(theme::TEXT));
                        });
                        ui.label(
                            RichText::new(cfg.description)
                                .size(10.0)
                                .color(theme::TEXT_MUTED),
                        );
                        ui.add_space(4.0);
                    }
                });
            });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some((text, since)) = self.notice.clone() else {
            return;
        };
        if since.elapsed() > NOTICE_DURATION {
            self.notice = None;
            return;
        }
        let screen = ctx.screen_rect();
        egui::Area::new(Id::new("notice"))
            .fixed_pos(pos2(screen.center().x - 140.0, screen.bottom() - 52.0))
            .order(Order::Foreground)
            .show(ctx, |ui| {
                panel_frame().show(ui, |ui| {
                    ui.set_max_width(280.0);
                    ui.label(RichText::new(text).size(12.0).color(theme::TEXT));
                });
            });
        ctx.request_repaint_after(Duration::from_millis(250));
    }

    fn show_edit_overlay(&mut self, ctx: &egui::Context) {
        let Some(session) = &self.edit else { return };
        if !session.is_editing() {
            return;
        }
        let shape = session.shape();
        let Some(note) = self.board.document.get_shape(shape) else {
            // The note was deleted out from under the session.
            self.edit = None;
            return;
        };

        let rect = canvas::note_screen_rect(
            &self.board.camera,
            self.canvas_origin,
            note.position,
            note.width,
            note.height,
        );
        let zoom = self.board.camera.zoom as f32;
        let inset = vec2(8.0 * zoom, 26.0 * zoom);
        let edit_width = (rect.width() - 2.0 * inset.x).max(40.0);
        let edit_id = Id::new(("sticky-edit-text", shape));

        let mut outcome = EditOutcome::None;
        let mut needs_focus = self.edit_needs_focus;
        let Some(session) = self.edit.as_mut() else {
            return;
        };

        egui::Area::new(Id::new("sticky-edit"))
            .fixed_pos(rect.left_top() + inset)
            .order(Order::Foreground)
            .show(ctx, |ui| {
                let output = egui::TextEdit::multiline(session.buffer_mut())
                    .id(edit_id)
                    .desired_width(edit_width)
                    .show(ui);

                if needs_focus {
                    output.response.request_focus();
                    // Select the full content on activation.
                    if let Some(mut state) = egui::TextEdit::load_state(ui.ctx(), edit_id) {
                        let end = CCursor::new(session.buffer().chars().count());
                        state
                            .cursor
                            .set_char_range(Some(CCursorRange::two(CCursor::new(0), end)));
                        state.store(ui.ctx(), edit_id);
                    }
                    needs_focus = false;
                }

                let commit_combo = ui
                    .input(|i| i.key_pressed(Key::Enter) && (i.modifiers.command || i.modifiers.ctrl));
                if ui.input(|i| i.key_pressed(Key::Escape)) {
                    outcome = EditOutcome::Cancel;
                } else if output.response.lost_focus() || commit_combo {
                    outcome = EditOutcome::Commit;
                }
            });

        self.edit_needs_focus = needs_focus;
        match outcome {
            EditOutcome::Commit => self.commit_edit(),
            EditOutcome::Cancel => {
                if let Some(session) = &mut self.edit {
                    session.cancel();
                }
                self.edit = None;
            }
            EditOutcome::None => {}
        }
    }
}

impl eframe::App for BoardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show_canvas(ctx);
        self.show_toolbar(ctx);
        self.show_legend(ctx);
        self.show_edit_overlay(ctx);
        self.show_notice(ctx);
    }
}

/// Drive a storage future to completion.
///
/// Storage futures never suspend (memory and filesystem work complete
/// in one poll), so a trivial polling executor is all that is needed.
fn block_on<F: std::future::Future>(f: F) -> F::Output {
    use std::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};

    fn dummy_raw_waker() -> RawWaker {
        fn no_op(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            dummy_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, no_op, no_op, no_op);
        RawWaker::new(std::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(dummy_raw_waker()) };
    let mut cx = Context::from_waker(&waker);
    let mut f = std::pin::pin!(f);

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {}
        }
    }
}
