use speakbox_types::{Point, Region, SelectionView};

/// Transient state of the crosshair overlay
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub id: u64,
    /// Virtual screen the overlay covers; its origin converts local to absolute
    pub screen: Region,
    pub anchor: Option<Point>,
    pub current: Option<Point>,
}

impl DragSession {
    /// Rubber band in overlay-local coordinates
    pub fn preview(&self) -> Option<Region> {
        Some(Region::from_corners(self.anchor?, self.current?))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    TooSmall,
    Escape,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Still dragging, or the input did not apply
    Pending,
    Confirmed(Region),
    Cancelled(CancelReason),
}

/// Idle -> Dragging -> (Confirmed | Cancelled) -> Idle
#[derive(Debug)]
pub struct SelectionMachine {
    state: SelectionState,
    next_id: u64,
    min_drag: u32,
}

impl SelectionMachine {
    pub fn new(min_drag: u32) -> Self {
        Self {
            state: SelectionState::Idle,
            next_id: 1,
            min_drag,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging(_))
    }

    /// Enter Dragging over `screen`. Returns the session id for the failsafe
    /// timeout, or `None` when a drag is already in progress.
    pub fn begin(&mut self, screen: Region) -> Option<u64> {
        if self.is_dragging() {
            return None;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.state = SelectionState::Dragging(DragSession {
            id,
            screen,
            anchor: None,
            current: None,
        });
        tracing::debug!("selection {id} started over {screen}");
        Some(id)
    }

    pub fn pointer_down(&mut self, local: Point) -> Option<Region> {
        let SelectionState::Dragging(session) = &mut self.state else {
            return None;
        };
        session.anchor = Some(local);
        session.current = Some(local);
        session.preview()
    }

    pub fn pointer_move(&mut self, local: Point) -> Option<Region> {
        let SelectionState::Dragging(session) = &mut self.state else {
            return None;
        };
        session.anchor?;
        session.current = Some(local);
        session.preview()
    }

    pub fn pointer_up(&mut self, local: Point) -> DragOutcome {
        let SelectionState::Dragging(session) = &self.state else {
            return DragOutcome::Pending;
        };
        let Some(anchor) = session.anchor else {
            return DragOutcome::Pending;
        };

        let rect = Region::from_corners(anchor, local);
        if rect.width > self.min_drag && rect.height > self.min_drag {
            let absolute = rect.offset(session.screen.x, session.screen.y);
            self.state = SelectionState::Idle;
            tracing::debug!("selection confirmed at {absolute}");
            DragOutcome::Confirmed(absolute)
        } else {
            self.cancel(CancelReason::TooSmall)
        }
    }

    pub fn escape(&mut self) -> DragOutcome {
        if !self.is_dragging() {
            return DragOutcome::Pending;
        }
        self.cancel(CancelReason::Escape)
    }

    /// Failsafe timeout; ignored unless `id` is the drag still in progress
    pub fn expire(&mut self, id: u64) -> DragOutcome {
        match &self.state {
            SelectionState::Dragging(session) if session.id == id => {
                self.cancel(CancelReason::Timeout)
            }
            _ => DragOutcome::Pending,
        }
    }

    pub fn view(&self) -> Option<SelectionView> {
        match &self.state {
            SelectionState::Idle => None,
            SelectionState::Dragging(session) => Some(SelectionView {
                screen: session.screen,
                preview: session.preview(),
            }),
        }
    }

    fn cancel(&mut self, reason: CancelReason) -> DragOutcome {
        tracing::debug!("selection cancelled: {reason:?}");
        self.state = SelectionState::Idle;
        DragOutcome::Cancelled(reason)
    }
}
