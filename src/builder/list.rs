//! List cursor shared by a document and its parts
//!
//! Paragraphs created while a list is open join it at the current level.
//! The position is captured when the paragraph is created, so moving the
//! cursor afterwards does not renumber paragraphs already added.

use std::cell::Cell;
use std::rc::Rc;

/// Deepest list level WordprocessingML defines
pub const MAX_LIST_LEVEL: u8 = 8;

/// Where a paragraph sits in a list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListPosition {
    /// Numbering instance (`w:numId`)
    pub num_id: u32,
    /// Zero-based level (`w:ilvl`)
    pub level: u8,
}

#[derive(Clone, Copy, Debug, Default)]
struct ListState {
    num_id: u32,
    level: u8,
    active: bool,
}

/// Handle to the list state; clones share the same state
#[derive(Clone, Debug, Default)]
pub(crate) struct ListCursor(Rc<Cell<ListState>>);

impl ListCursor {
    /// Open a list on numbering instance `num_id`, at level 0
    pub fn start(&self, num_id: u32) {
        self.0.set(ListState {
            num_id,
            level: 0,
            active: true,
        });
    }

    pub fn increment(&self) {
        let mut state = self.0.get();
        if state.level < MAX_LIST_LEVEL {
            state.level += 1;
        }
        self.0.set(state);
    }

    pub fn decrement(&self) {
        let mut state = self.0.get();
        state.level = state.level.saturating_sub(1);
        self.0.set(state);
    }

    pub fn end(&self) {
        let mut state = self.0.get();
        state.active = false;
        self.0.set(state);
    }

    /// Current position, if a list is open
    pub fn position(&self) -> Option<ListPosition> {
        let state = self.0.get();
        state.active.then_some(ListPosition {
            num_id: state.num_id,
            level: state.level,
        })
    }
}
