//! Edit-mode state machine.
//!
//! `EditMode` is the single authority on which mutations are legal. The draft
//! ring only exists inside `Drawing`, the edit target only inside `Editing`,
//! so the two can never be active together. There is no direct
//! Drawing <-> Editing transition; both go through `Idle`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ZoneError;
use crate::ids::IdSource;
use crate::model::{Color, Point, Ring, ZoneId};
use crate::store::ZoneStore;

/// The zone being drawn: its ring plus the name and color picked for it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub ring: Ring,
    pub name: String,
    pub color: Color,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum EditMode {
    #[default]
    Idle,
    Drawing(Draft),
    Editing(ZoneId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    Idle,
    Drawing,
    Editing,
}

impl fmt::Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModeKind::Idle => "idle",
            ModeKind::Drawing => "drawing",
            ModeKind::Editing => "editing",
        })
    }
}

/// What a `finish` transition did.
#[derive(Clone, Debug, PartialEq)]
pub enum Finished {
    /// Drawing ended with a non-empty draft, now stored as this zone.
    Committed(ZoneId),
    /// Drawing ended with nothing drawn.
    Discarded,
    /// Editing ended.
    EditClosed(ZoneId),
}

impl EditMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            EditMode::Idle => ModeKind::Idle,
            EditMode::Drawing(_) => ModeKind::Drawing,
            EditMode::Editing(_) => ModeKind::Editing,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            EditMode::Drawing(d) => Some(d),
            _ => None,
        }
    }

    pub fn editing(&self) -> Option<&ZoneId> {
        match self {
            EditMode::Editing(id) => Some(id),
            _ => None,
        }
    }

    fn refuse(&self, action: &'static str) -> ZoneError {
        ZoneError::InvalidTransition {
            mode: self.kind(),
            action,
        }
    }

    pub fn start_drawing(&mut self, color: Color) -> Result<(), ZoneError> {
        if !matches!(self, EditMode::Idle) {
            return Err(self.refuse("start drawing"));
        }
        *self = EditMode::Drawing(Draft {
            color,
            ..Draft::default()
        });
        Ok(())
    }

    /// Returns the draft length after the append.
    pub fn add_point(&mut self, p: Point) -> Result<usize, ZoneError> {
        match self {
            EditMode::Drawing(d) => {
                d.ring.push(p);
                Ok(d.ring.len())
            }
            _ => Err(self.refuse("add a draft point")),
        }
    }

    pub fn set_draft_style(&mut self, name: impl Into<String>, color: Color) -> Result<(), ZoneError> {
        match self {
            EditMode::Drawing(d) => {
                d.name = name.into();
                d.color = color;
                Ok(())
            }
            _ => Err(self.refuse("style the draft")),
        }
    }

    /// Drawing -> Idle (committing a non-empty draft) or Editing -> Idle.
    pub fn finish(&mut self, store: &mut ZoneStore, ids: &mut dyn IdSource) -> Result<Finished, ZoneError> {
        match std::mem::take(self) {
            EditMode::Idle => Err(self.refuse("finish")),
            EditMode::Editing(id) => Ok(Finished::EditClosed(id)),
            EditMode::Drawing(draft) => {
                if draft.ring.is_empty() {
                    return Ok(Finished::Discarded);
                }
                let id = ids.next_id();
                match store.create_zone(id, draft.ring.clone(), draft.name.clone(), draft.color) {
                    Ok(id) => Ok(Finished::Committed(id)),
                    Err(e) => {
                        // Keep drawing so the user does not lose the draft.
                        *self = EditMode::Drawing(draft);
                        Err(e)
                    }
                }
            }
        }
    }

    /// Drawing -> Idle, dropping the draft.
    pub fn cancel(&mut self) -> Result<Draft, ZoneError> {
        match std::mem::take(self) {
            EditMode::Drawing(draft) => Ok(draft),
            other => {
                *self = other;
                Err(self.refuse("cancel drawing"))
            }
        }
    }

    /// Idle -> Editing, targeting the store's current selection.
    pub fn start_editing(&mut self, store: &ZoneStore) -> Result<ZoneId, ZoneError> {
        if !matches!(self, EditMode::Idle) {
            return Err(self.refuse("start editing"));
        }
        let id = store.selected().cloned().ok_or(ZoneError::NoSelection)?;
        *self = EditMode::Editing(id.clone());
        Ok(id)
    }

    /// Follow a selection change: while editing, the target moves with the
    /// selection, and a cleared selection ends the edit.
    pub fn retarget(&mut self, selected: Option<&ZoneId>) {
        if let EditMode::Editing(current) = self {
            match selected {
                Some(id) => *current = id.clone(),
                None => *self = EditMode::Idle,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use crate::model::DEFAULT_ZONE_COLOR;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn draw_and_commit() {
        let mut store = ZoneStore::new();
        let mut ids = SequentialIds::new("zone");
        let mut mode = EditMode::Idle;
        mode.start_drawing(DEFAULT_ZONE_COLOR).unwrap();
        assert_eq!(mode.add_point(pt(0.0, 0.0)), Ok(1));
        assert_eq!(mode.add_point(pt(1.0, 0.0)), Ok(2));
        mode.set_draft_style("North", Color::rgb(255, 0, 0)).unwrap();
        let done = mode.finish(&mut store, &mut ids).unwrap();
        assert_eq!(done, Finished::Committed(ZoneId::new("zone-1")));
        assert_eq!(mode, EditMode::Idle);
        let z = &store.list()[0];
        assert_eq!(z.name, "North");
        assert_eq!(z.color, Color::rgb(255, 0, 0));
        assert_eq!(z.ring.len(), 2);
    }

    #[test]
    fn empty_draft_commits_nothing() {
        let mut store = ZoneStore::new();
        let mut ids = SequentialIds::new("zone");
        let mut mode = EditMode::Idle;
        mode.start_drawing(DEFAULT_ZONE_COLOR).unwrap();
        assert_eq!(mode.finish(&mut store, &mut ids), Ok(Finished::Discarded));
        assert_eq!(mode, EditMode::Idle);
        assert!(store.is_empty());
    }

    #[test]
    fn editing_requires_selection() {
        let store = ZoneStore::new();
        let mut mode = EditMode::Idle;
        assert_eq!(mode.start_editing(&store), Err(ZoneError::NoSelection));
        assert_eq!(mode, EditMode::Idle);
    }

    #[test]
    fn no_direct_drawing_editing_hop() {
        let mut store = ZoneStore::new();
        store
            .create_zone(ZoneId::new("a"), vec![pt(0.0, 0.0)].into(), "a", DEFAULT_ZONE_COLOR)
            .unwrap();
        store.select(&ZoneId::new("a"));

        let mut mode = EditMode::Idle;
        mode.start_drawing(DEFAULT_ZONE_COLOR).unwrap();
        let err = mode.start_editing(&store).unwrap_err();
        assert_eq!(err.code(), "invalid_transition");
        assert_eq!(mode.kind(), ModeKind::Drawing);

        mode.cancel().unwrap();
        mode.start_editing(&store).unwrap();
        assert!(mode.start_drawing(DEFAULT_ZONE_COLOR).is_err());
        assert!(mode.add_point(pt(1.0, 1.0)).is_err());
        assert!(mode.cancel().is_err());
        assert_eq!(mode.editing(), Some(&ZoneId::new("a")));
    }

    #[test]
    fn finish_from_idle_is_refused() {
        let mut store = ZoneStore::new();
        let mut ids = SequentialIds::new("zone");
        let mut mode = EditMode::Idle;
        let err = mode.finish(&mut store, &mut ids).unwrap_err();
        assert_eq!(
            err,
            ZoneError::InvalidTransition {
                mode: ModeKind::Idle,
                action: "finish"
            }
        );
    }

    #[test]
    fn start_drawing_clears_previous_draft() {
        let mut mode = EditMode::Idle;
        mode.start_drawing(DEFAULT_ZONE_COLOR).unwrap();
        mode.add_point(pt(3.0, 3.0)).unwrap();
        let dropped = mode.cancel().unwrap();
        assert_eq!(dropped.ring.len(), 1);
        mode.start_drawing(DEFAULT_ZONE_COLOR).unwrap();
        assert!(mode.draft().unwrap().ring.is_empty());
    }

    #[test]
    fn retarget_follows_selection() {
        let mut mode = EditMode::Editing(ZoneId::new("a"));
        mode.retarget(Some(&ZoneId::new("b")));
        assert_eq!(mode.editing(), Some(&ZoneId::new("b")));
        mode.retarget(None);
        assert_eq!(mode, EditMode::Idle);

        let mut drawing = EditMode::Drawing(Draft::default());
        drawing.retarget(None);
        assert_eq!(drawing.kind(), ModeKind::Drawing);
    }
}
