use crate::drawable::DrawableRef;

/// Linear undo/redo over the committed log.
///
/// `redo` is only ever filled by [`History::undo`] and only ever drained by
/// [`History::redo`]; any new commit discards it.
#[derive(Debug, Default, Clone)]
pub struct History {
    /// Drawables that make up the current picture, oldest first
    committed: Vec<DrawableRef>,
    /// Drawables removed by undo, most recently undone last
    redo: Vec<DrawableRef>,
}

impl History {
    /// Creates a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a drawable to the log and drop forward history
    pub fn commit(&mut self, drawable: DrawableRef) {
        self.committed.push(drawable);
        self.redo.clear();
    }

    /// Move the newest committed drawable to the redo buffer.
    ///
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.committed.pop() {
            Some(drawable) => {
                self.redo.push(drawable);
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone drawable.
    ///
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.redo.pop() {
            Some(drawable) => {
                self.committed.push(drawable);
                true
            }
            None => false,
        }
    }

    /// Empty both stacks
    pub fn clear(&mut self) {
        self.committed.clear();
        self.redo.clear();
    }

    /// Forget forward history without touching the log.
    ///
    /// Returns `true` if anything was dropped.
    pub fn discard_redo(&mut self) -> bool {
        let had_redo = !self.redo.is_empty();
        self.redo.clear();
        had_redo
    }

    pub fn committed(&self) -> &[DrawableRef] {
        &self.committed
    }

    pub fn redo_buffer(&self) -> &[DrawableRef] {
        &self.redo
    }

    /// Returns true if there are drawables that can be undone
    pub fn can_undo(&self) -> bool {
        !self.committed.is_empty()
    }

    /// Returns true if there are drawables that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// By-value copy of the log for work that outlives the current event
    pub fn snapshot(&self) -> Vec<DrawableRef> {
        self.committed.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::{Drawable, Stroke};
    use egui::Pos2;
    use std::sync::Arc;

    fn dot(x: f32) -> DrawableRef {
        Drawable::from(Stroke::begin(Pos2::new(x, x), 1.0)).into_ref()
    }

    #[test]
    fn test_undo_redo_on_empty_are_noops() {
        let mut history = History::new();
        assert!(!history.undo());
        assert!(!history.redo());
        assert!(history.committed().is_empty());
        assert!(history.redo_buffer().is_empty());
    }

    #[test]
    fn test_undo_n_then_redo_n_restores_identity() {
        let mut history = History::new();
        for i in 0..5 {
            history.commit(dot(i as f32));
        }
        let before = history.snapshot();

        for n in 0..=before.len() {
            for _ in 0..n {
                assert!(history.undo());
            }
            assert_eq!(history.committed().len(), before.len() - n);
            for _ in 0..n {
                assert!(history.redo());
            }
            assert_eq!(history.committed().len(), before.len());
            for (restored, original) in history.committed().iter().zip(&before) {
                assert!(Arc::ptr_eq(restored, original));
            }
        }
    }

    #[test]
    fn test_commit_discards_redo() {
        let mut history = History::new();
        history.commit(dot(1.0));
        history.commit(dot(2.0));
        history.undo();
        history.undo();
        assert_eq!(history.redo_buffer().len(), 2);

        history.commit(dot(3.0));
        assert!(history.redo_buffer().is_empty());
        assert!(!history.can_redo());
        assert_eq!(history.committed().len(), 1);
    }

    #[test]
    fn test_undo_leaves_a_prefix() {
        let mut history = History::new();
        let items: Vec<_> = (0..3).map(|i| dot(i as f32)).collect();
        for item in &items {
            history.commit(item.clone());
        }
        history.undo();

        assert_eq!(history.committed().len(), 2);
        assert!(Arc::ptr_eq(&history.committed()[0], &items[0]));
        assert!(Arc::ptr_eq(&history.committed()[1], &items[1]));
        assert!(Arc::ptr_eq(&history.redo_buffer()[0], &items[2]));
    }
}
