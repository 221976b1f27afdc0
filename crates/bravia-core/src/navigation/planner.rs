//! Greedy cursor navigation over a [`KeyboardLayout`].
//!
//! The TV gives no way to jump to a cell: the only way to select a character
//! is to walk the highlight one cell at a time with the arrow keys and press
//! Confirm.  The planner turns "type this character" into that walk.
//!
//! # The walk (for beginners)
//!
//! Each step looks at the remaining horizontal and vertical distance to the
//! target (`dx`, `dy`):
//!
//! 1. While `dx != 0` it tries to step sideways.  If the neighbouring cell is
//!    blank it steps vertically instead:
//!    - on an odd row, toward the target row, or up when already on it;
//!    - on an even row, up, or down when on row 0.
//! 2. Once `dx == 0` it steps vertically.  If that cell is blank it steps
//!    sideways instead: left, or right when already in column 0.
//!
//! The walk is greedy and not always the shortest path, but it terminates for
//! both built-in keyboards from every starting cell.  For arbitrary grids it
//! can cycle, so every character gets a step budget; running out of budget
//! fails that one character instead of looping forever.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::domain::keyboard::{GridPos, KeyboardLayout};

/// One remote key press produced by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavCommand {
    Up,
    Down,
    Left,
    Right,
    /// Selects the highlighted cell.
    Confirm,
}

impl NavCommand {
    /// Returns `true` for the four arrow commands.
    pub fn is_move(self) -> bool {
        !matches!(self, NavCommand::Confirm)
    }

    /// Returns the cursor position after this command, as the planner models it.
    ///
    /// Moves past the top or left edge saturate at zero; `Confirm` does not move.
    pub fn apply(self, pos: GridPos) -> GridPos {
        match self {
            NavCommand::Up => GridPos::new(pos.col, pos.row.saturating_sub(1)),
            NavCommand::Down => GridPos::new(pos.col, pos.row + 1),
            NavCommand::Left => GridPos::new(pos.col.saturating_sub(1), pos.row),
            NavCommand::Right => GridPos::new(pos.col + 1, pos.row),
            NavCommand::Confirm => pos,
        }
    }
}

/// Errors raised while planning a walk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// The walk did not reach its target within the step budget.
    ///
    /// This only happens on grids whose blanks trap the greedy walk.
    #[error("no route from {from} to {to} within {budget} steps")]
    StepBudgetExceeded {
        from: GridPos,
        to: GridPos,
        budget: usize,
    },
}

/// The walk to one character: arrow moves, then a single Confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeystrokePlan {
    pub ch: char,
    pub from: GridPos,
    pub to: GridPos,
    /// Arrow commands only; the trailing Confirm is implied.
    pub moves: Vec<NavCommand>,
}

impl KeystrokePlan {
    /// The full command sequence for this character, Confirm included.
    pub fn commands(&self) -> impl Iterator<Item = NavCommand> + '_ {
        self.moves
            .iter()
            .copied()
            .chain(std::iter::once(NavCommand::Confirm))
    }
}

/// What the planner decided for one input character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanStep {
    /// Walk to the character and press it.
    Press(KeystrokePlan),
    /// The keyboard has no cell for this character; nothing is sent.
    Skip(char),
    /// The character has a cell but the walk could not reach it.
    Unreachable { ch: char, error: NavigationError },
}

/// A complete plan for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPlan {
    pub steps: Vec<PlanStep>,
    /// Where the cursor rests after the last pressed character.
    pub end: GridPos,
}

impl TextPlan {
    /// Flattens the plan into the exact command stream sent to the TV.
    pub fn commands(&self) -> Vec<NavCommand> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PlanStep::Press(plan) => Some(plan.commands()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// The characters that will actually be entered, in order.
    pub fn pressed(&self) -> String {
        self.steps
            .iter()
            .filter_map(|step| match step {
                PlanStep::Press(plan) => Some(plan.ch),
                _ => None,
            })
            .collect()
    }
}

/// Plans cursor walks over one keyboard.
#[derive(Debug, Clone, Copy)]
pub struct NavigationPlanner<'a> {
    layout: &'a KeyboardLayout,
    max_steps: usize,
}

impl<'a> NavigationPlanner<'a> {
    /// Creates a planner whose per-character budget is twice the grid perimeter.
    pub fn new(layout: &'a KeyboardLayout) -> Self {
        Self {
            layout,
            max_steps: Self::default_step_budget(layout),
        }
    }

    /// The default per-character step budget for `layout`.
    pub fn default_step_budget(layout: &KeyboardLayout) -> usize {
        2 * layout.perimeter()
    }

    /// Overrides the per-character step budget.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn layout(&self) -> &'a KeyboardLayout {
        self.layout
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Returns the single step the walk takes from `cursor` toward `target`,
    /// or `None` when the cursor is already there.
    pub fn next_step(&self, cursor: GridPos, target: GridPos) -> Option<NavCommand> {
        if cursor == target {
            return None;
        }

        if cursor.col != target.col {
            let toward = if target.col > cursor.col {
                NavCommand::Right
            } else {
                NavCommand::Left
            };
            let next = toward.apply(cursor);
            if !self.layout.is_blank(next.col, next.row) {
                return Some(toward);
            }
            let deflected = self.vertical_deflection(cursor, target);
            trace!("blank at {next}, deflecting {deflected:?} from {cursor}");
            return Some(deflected);
        }

        let toward = if target.row > cursor.row {
            NavCommand::Down
        } else {
            NavCommand::Up
        };
        let next = toward.apply(cursor);
        if !self.layout.is_blank(next.col, next.row) {
            return Some(toward);
        }
        let deflected = if cursor.col > 0 {
            NavCommand::Left
        } else {
            NavCommand::Right
        };
        trace!("blank at {next}, deflecting {deflected:?} from {cursor}");
        Some(deflected)
    }

    /// Vertical detour taken when a sideways step would land on a blank cell.
    fn vertical_deflection(&self, cursor: GridPos, target: GridPos) -> NavCommand {
        if cursor.row % 2 == 1 {
            // Odd rows: head for the target row, otherwise back to the even row above.
            if target.row > cursor.row {
                NavCommand::Down
            } else {
                NavCommand::Up
            }
        } else if cursor.row > 0 {
            NavCommand::Up
        } else {
            NavCommand::Down
        }
    }

    /// Computes the arrow moves from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::StepBudgetExceeded`] when the walk has not
    /// arrived after [`max_steps`](Self::max_steps) moves.
    pub fn route(&self, from: GridPos, to: GridPos) -> Result<Vec<NavCommand>, NavigationError> {
        let mut cursor = from;
        let mut moves = Vec::new();

        while let Some(step) = self.next_step(cursor, to) {
            if moves.len() == self.max_steps {
                debug!("walk from {from} to {to} exceeded {} steps", self.max_steps);
                return Err(NavigationError::StepBudgetExceeded {
                    from,
                    to,
                    budget: self.max_steps,
                });
            }
            moves.push(step);
            cursor = step.apply(cursor);
        }

        Ok(moves)
    }

    /// Plans one character starting at `cursor`.
    pub fn plan_char(&self, cursor: GridPos, ch: char) -> PlanStep {
        let Some(target) = self.layout.locate(ch) else {
            return PlanStep::Skip(ch);
        };

        match self.route(cursor, target) {
            Ok(moves) => PlanStep::Press(KeystrokePlan {
                ch,
                from: cursor,
                to: target,
                moves,
            }),
            Err(error) => PlanStep::Unreachable { ch, error },
        }
    }

    /// Plans a whole sequence starting at the top-left cell.
    pub fn plan_text<I>(&self, chars: I) -> TextPlan
    where
        I: IntoIterator<Item = char>,
    {
        self.plan_text_from(GridPos::ORIGIN, chars)
    }

    /// Plans a whole sequence starting at `start`.
    ///
    /// Each pressed character's cell becomes the start of the next walk.
    /// Skipped and unreachable characters leave the cursor where it was.
    pub fn plan_text_from<I>(&self, start: GridPos, chars: I) -> TextPlan
    where
        I: IntoIterator<Item = char>,
    {
        let mut cursor = start;
        let mut steps = Vec::new();

        for ch in chars {
            let step = self.plan_char(cursor, ch);
            if let PlanStep::Press(plan) = &step {
                cursor = plan.to;
            }
            steps.push(step);
        }

        TextPlan { steps, end: cursor }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
