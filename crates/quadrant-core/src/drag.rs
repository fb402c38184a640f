//! Drag reorder controller.
//!
//! Translates a continuous pointer gesture into discrete task store
//! mutations. The controller is an explicit state machine (idle, or one
//! active gesture) decoupled from any input or rendering stack: hover
//! events arrive as plain coordinates plus the hovered item's screen-space
//! bounds, and each hover commits at most one mutation.
//!
//! Reorders are committed mid-gesture, so the model always matches the
//! live preview. The midpoint rule keeps the dragged and hovered items
//! from swapping back and forth on every pixel of movement: downward
//! travel only commits once the pointer passes the lower half of the
//! hovered item, upward travel only once it passes the upper half.

use crate::matrix::Quadrant;
use crate::store::TaskStore;

/// Vertical travel direction of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    Up,
    Down,
}

/// Screen-space bounds of a hovered list item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    pub top: f32,
    pub height: f32,
}

impl ItemBounds {
    pub fn new(top: f32, height: f32) -> Self {
        ItemBounds { top, height }
    }

    /// Pointer offset from the item's top edge.
    pub fn offset_of(&self, pointer_y: f32) -> f32 {
        pointer_y - self.top
    }
}

/// Midpoint hysteresis predicate.
///
/// True when pointer travel in `direction` has crossed the hovered item's
/// midpoint, i.e. the swap should commit.
pub fn crosses_midpoint(direction: DragDirection, pointer_offset: f32, item_height: f32) -> bool {
    let midpoint = item_height / 2.0;
    match direction {
        DragDirection::Down => pointer_offset >= midpoint,
        DragDirection::Up => pointer_offset <= midpoint,
    }
}

/// One in-flight drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    task_id: String,
    origin: (Quadrant, usize),
    current: (Quadrant, usize),
    last_pointer_y: Option<f32>,
}

impl DragGesture {
    /// Id of the task being dragged.
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Position the gesture started from.
    pub fn origin(&self) -> (Quadrant, usize) {
        self.origin
    }

    /// Last committed position of the dragged task.
    pub fn current(&self) -> (Quadrant, usize) {
        self.current
    }
}

/// Controller state: idle or one active gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragGesture),
}

/// State machine driving live drag reordering.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        DragController::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Active gesture, if any.
    pub fn gesture(&self) -> Option<&DragGesture> {
        match &self.state {
            DragState::Dragging(gesture) => Some(gesture),
            DragState::Idle => None,
        }
    }

    /// Begin a gesture at a model position.
    ///
    /// False (and no state change) when the slot is vacant or a gesture is
    /// already active.
    pub fn begin(&mut self, store: &TaskStore, quadrant: Quadrant, index: usize) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(task) = store.model().tasks(quadrant).get(index) else {
            return false;
        };
        self.state = DragState::Dragging(DragGesture {
            task_id: task.id.clone(),
            origin: (quadrant, index),
            current: (quadrant, index),
            last_pointer_y: None,
        });
        true
    }

    /// Feed one hover event: the pointer is at `pointer_y` over the item
    /// currently occupying `target_index` in `target`.
    ///
    /// Returns the dragged task's new position when a swap or move was
    /// committed, `None` otherwise.
    pub fn hover(
        &mut self,
        store: &mut TaskStore,
        target: Quadrant,
        target_index: usize,
        pointer_y: f32,
        bounds: ItemBounds,
    ) -> Option<(Quadrant, usize)> {
        let DragState::Dragging(gesture) = &mut self.state else {
            return None;
        };
        let (current_quadrant, current_index) = gesture.current;

        // hovering the dragged task's own slot never commits
        if target == current_quadrant && target_index == current_index {
            gesture.last_pointer_y = Some(pointer_y);
            return None;
        }

        let direction = if target == current_quadrant {
            gesture.last_pointer_y = Some(pointer_y);
            if current_index < target_index {
                DragDirection::Down
            } else {
                DragDirection::Up
            }
        } else {
            // across quadrants the index delta means nothing; infer travel
            // from successive pointer heights instead
            match gesture.last_pointer_y.replace(pointer_y) {
                Some(prev) if pointer_y > prev => DragDirection::Down,
                Some(prev) if pointer_y < prev => DragDirection::Up,
                _ => return None,
            }
        };

        if !crosses_midpoint(direction, bounds.offset_of(pointer_y), bounds.height) {
            return None;
        }

        let position = if target == current_quadrant {
            // the committed slot may be stale if the model changed
            // mid-gesture; only the dragged task itself may be reordered
            let occupant = store.model().tasks(target).get(current_index);
            if occupant.map(|t| t.id.as_str()) != Some(gesture.task_id.as_str()) {
                return None;
            }
            if store.reorder_task(target, current_index, target_index).is_err() {
                return None;
            }
            (target, target_index)
        } else {
            if !store.move_task(&gesture.task_id, target) {
                return None;
            }
            let appended = store.model().tasks(target).len() - 1;
            let slot = target_index.min(appended);
            match store.reorder_task(target, appended, slot) {
                Ok(()) => (target, slot),
                Err(_) => (target, appended),
            }
        };
        gesture.current = position;
        Some(position)
    }

    /// Complete the gesture over a drop target.
    ///
    /// When the drop quadrant differs from both the origin and the current
    /// quadrant (no hover placed the task there), a final append-at-end
    /// move is issued. Returns the task's final position; `None` when no
    /// gesture was active. The controller always returns to idle.
    pub fn finish(
        &mut self,
        store: &mut TaskStore,
        drop_quadrant: Quadrant,
    ) -> Option<(Quadrant, usize)> {
        let DragState::Dragging(gesture) = std::mem::take(&mut self.state) else {
            return None;
        };
        let (origin_quadrant, _) = gesture.origin;
        let (current_quadrant, current_index) = gesture.current;

        if drop_quadrant != origin_quadrant
            && drop_quadrant != current_quadrant
            && store.move_task(&gesture.task_id, drop_quadrant)
        {
            let index = store.model().tasks(drop_quadrant).len() - 1;
            return Some((drop_quadrant, index));
        }
        Some((current_quadrant, current_index))
    }

    /// Abandon the gesture with no further mutation.
    ///
    /// Swaps already committed during hover remain in the model.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
