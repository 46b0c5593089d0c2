mod machine;
mod present;
mod render;

use serde::{Deserialize, Serialize};

pub use machine::{
    AppState, Controller, Effect, Input, Transition, ANSWER_DELAY_MS, CALCULATING_DELAY_MS,
};
pub use present::{Command, Control, ControlAction, ControlStyle, Presenter};
pub use render::{
    controls, expected_quiz_len, render, DONE_LINE_STEP_MS, FAILURE_MESSAGE, FAILURE_TITLE,
    INTRO_TITLE, PROPOSE_LINE_STEP_MS,
};

/// The point in the experience that governs what is shown and which inputs
/// are legal. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Loading,
    Intro,
    Quiz,
    Calculating,
    Score,
    Propose,
    Done,
    /// Startup documents could not be loaded. No way out.
    Failed,
}
