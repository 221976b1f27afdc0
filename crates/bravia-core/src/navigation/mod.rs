//! Cursor navigation over on-screen keyboards.

pub mod planner;

pub use planner::{KeystrokePlan, NavCommand, NavigationError, NavigationPlanner, PlanStep, TextPlan};
