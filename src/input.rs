//! Input adapter for the three supported input modalities.
//!
//! Pointer clicks, drag-and-drop gestures and touch press/release pairs
//! all funnel into one canonical request: "move the tile at `source` into
//! the grid". The adapter owns the in-flight gesture state and emits
//! [`MoveIntent`]s; the adjacency, swap and win logic lives in
//! [`crate::engine`] alone and is never duplicated per modality.

use crate::engine::is_adjacent;

/// A raw input event, already mapped to the cell index it landed on by the
/// input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer click on a cell. Forwarded unconditionally; the engine
    /// derives legality from adjacency.
    Click { index: usize },
    /// Drag gesture started on the tile at `source`.
    DragStart { source: usize },
    /// Drag gesture released over `target`.
    Drop { target: usize },
    /// Touch press on the tile at `source`.
    TouchStart { source: usize },
    /// Touch release over `target`.
    TouchEnd { target: usize },
}

/// The canonical move request produced by the adapter and consumed by
/// [`crate::engine::Game::attempt_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveIntent {
    /// Cell index of the tile the user wants to move.
    pub source: usize,
}

/// Gesture state for the drag and touch modalities.
///
/// Each modality captures its source index at gesture start; a new gesture
/// start overwrites any prior in-flight source for that modality. Releases
/// over an illegal target are swallowed silently, with no feedback to the
/// user, and always consume the captured source.
#[derive(Debug, Default)]
pub struct InputAdapter {
    drag_source: Option<usize>,
    touch_source: Option<usize>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one raw event and returns the move intent it completes, if
    /// any.
    ///
    /// `empty_index` is the current empty cell of the grid the event
    /// refers to. Clicks always pass through (the engine rejects illegal
    /// ones). Drag and touch releases only produce an intent when the
    /// release target is the empty cell itself and the captured source is
    /// adjacent to it.
    pub fn translate(&mut self, event: InputEvent, empty_index: usize) -> Option<MoveIntent> {
        match event {
            InputEvent::Click { index } => Some(MoveIntent { source: index }),
            InputEvent::DragStart { source } => {
                self.drag_source = Some(source);
                None
            }
            InputEvent::Drop { target } => {
                let source = self.drag_source.take()?;
                Self::gesture_intent(source, target, empty_index)
            }
            InputEvent::TouchStart { source } => {
                self.touch_source = Some(source);
                None
            }
            InputEvent::TouchEnd { target } => {
                let source = self.touch_source.take()?;
                Self::gesture_intent(source, target, empty_index)
            }
        }
    }

    fn gesture_intent(source: usize, target: usize, empty_index: usize) -> Option<MoveIntent> {
        if target == empty_index && is_adjacent(source, empty_index) {
            Some(MoveIntent { source })
        } else {
            None
        }
    }
}
