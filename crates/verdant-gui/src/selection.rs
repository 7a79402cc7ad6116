//! Drag-selection state for the tray rectangle.
//!
//! One rectangle at a time: pointer-down records the start point, dragging
//! moves the end point, pointer-up fixes it. Drags shorter than the minimum
//! distance are treated as accidental clicks and discarded.

use eframe::egui;

/// In-progress or completed drag gesture, in screen coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct DragSelection {
    start: Option<egui::Pos2>,
    current: Option<egui::Pos2>,
    dragging: bool,
}

/// State change produced by one frame of pointer input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    /// User started a new selection drag.
    Started,
    /// User is actively dragging.
    Dragging,
    /// User completed a valid selection from `start` to `end`.
    Completed {
        start: egui::Pos2,
        end: egui::Pos2,
    },
    /// User completed a drag that was too small to be intentional.
    Cancelled,
    /// No selection event occurred.
    None,
}

impl DragSelection {
    /// Begin a new drag at `pos`, discarding any previous rectangle
    pub fn begin(&mut self, pos: egui::Pos2) {
        self.start = Some(pos);
        self.current = Some(pos);
        self.dragging = true;
    }

    /// Move the end point of an active drag
    pub fn update(&mut self, pos: egui::Pos2) {
        if self.dragging {
            self.current = Some(pos);
        }
    }

    /// Finish the active drag
    ///
    /// Returns the start/end pair when the gesture covers at least
    /// `min_distance` screen pixels; shorter drags clear the selection.
    pub fn finish(&mut self, min_distance: f32) -> Option<(egui::Pos2, egui::Pos2)> {
        self.dragging = false;
        match (self.start, self.current) {
            (Some(start), Some(end)) if start.distance(end) >= min_distance => Some((start, end)),
            _ => {
                self.clear();
                None
            }
        }
    }

    /// The rectangle to draw this frame, if any
    pub fn rect(&self) -> Option<egui::Rect> {
        match (self.start, self.current) {
            (Some(start), Some(end)) => Some(egui::Rect::from_two_pos(start, end)),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn clear(&mut self) {
        self.start = None;
        self.current = None;
        self.dragging = false;
    }

    /// Feed one frame of pointer input from the image widget's response
    pub fn process(&mut self, response: &egui::Response, min_distance: f32) -> SelectionEvent {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.begin(pos);
                return SelectionEvent::Started;
            }
        }

        if response.dragged() && self.dragging {
            if let Some(pos) = response.interact_pointer_pos() {
                self.update(pos);
            }
            return SelectionEvent::Dragging;
        }

        if response.drag_stopped() && self.dragging {
            return match self.finish(min_distance) {
                Some((start, end)) => SelectionEvent::Completed { start, end },
                None => SelectionEvent::Cancelled,
            };
        }

        SelectionEvent::None
    }
}
