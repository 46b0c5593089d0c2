use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::stage::Stage;

/// Every notable state change in a run produces an Event.
/// Drivers drain them from the runtime; nothing in the core reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    DocumentsLoaded {
        cute: usize,
        memory: usize,
        at: DateTime<Utc>,
    },
    LoadFailed {
        reason: String,
        at: DateTime<Utc>,
    },
    StageEntered {
        stage: Stage,
        at: DateTime<Utc>,
    },
    QuizBuilt {
        session_id: Uuid,
        total: usize,
        at: DateTime<Utc>,
    },
    AnswerRecorded {
        question_index: usize,
        choice: usize,
        correct: bool,
        score: usize,
        at: DateTime<Utc>,
    },
    /// A question with no options was passed over unscored.
    QuestionSkipped {
        question_index: usize,
        at: DateTime<Utc>,
    },
    /// Background music started for the first time.
    MusicUnlocked {
        at: DateTime<Utc>,
    },
    Celebrated {
        particles: usize,
        at: DateTime<Utc>,
    },
}
