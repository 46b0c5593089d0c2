//! Quiz session: drawn questions, cursor and score.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::documents::{Question, QuestionBank, QuizConfig};
use crate::sampler::Sampler;

/// Mutable quiz-in-progress data, rebuilt on every Start.
///
/// Invariants: `current_index <= questions.len()` and `score <= current_index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    pub id: Uuid,
    questions: Vec<Question>,
    current_index: usize,
    score: usize,
}

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    /// Index of the question that was answered.
    pub question_index: usize,
    pub choice: usize,
    pub correct: bool,
    /// True when this was the last question.
    pub finished: bool,
}

/// Progress bar values for the quiz stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
    pub percent: u32,
}

/// Draw `sample.cute` from the cute pool and `sample.memory` from the memory
/// pool, cute block first, then optionally reshuffle the whole list.
pub fn build_quiz(bank: &QuestionBank, config: &QuizConfig, sampler: &mut Sampler) -> QuizSession {
    let mut questions = sampler.sample(&bank.cute, config.sample.cute);
    questions.extend(sampler.sample(&bank.memory, config.sample.memory));
    if config.shuffle_final_order {
        questions = sampler.shuffle(&questions);
    }
    QuizSession::new(questions)
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            questions,
            current_index: 0,
            score: 0,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// Question after the current one, for lookahead prefetching.
    pub fn upcoming(&self) -> Option<&Question> {
        self.questions.get(self.current_index + 1)
    }

    pub fn is_finished(&self) -> bool {
        self.current_index >= self.questions.len()
    }

    /// Score the current question and move the cursor forward.
    ///
    /// Returns `None` once every question has been answered.
    pub fn answer(&mut self, choice: usize) -> Option<AnswerOutcome> {
        let question = self.current()?;
        let correct = question.is_correct(choice);
        let question_index = self.current_index;
        if correct {
            self.score += 1;
        }
        self.current_index += 1;
        Some(AnswerOutcome {
            question_index,
            choice,
            correct,
            finished: self.is_finished(),
        })
    }

    /// Move past the current question without scoring it.
    ///
    /// Returns the skipped index, or `None` once the quiz is finished.
    pub fn skip(&mut self) -> Option<usize> {
        if self.is_finished() {
            return None;
        }
        let question_index = self.current_index;
        self.current_index += 1;
        Some(question_index)
    }

    /// Quiz-stage progress: `round(100 * min(index + 1, total) / total)` with
    /// `total` floored at 1.
    pub fn progress(&self) -> Progress {
        let total = self.questions.len().max(1);
        let current = (self.current_index + 1).min(total);
        Progress {
            current,
            total,
            percent: percent_of(current, total),
        }
    }

    /// Final score percentage; an empty quiz scores 0.
    pub fn score_percent(&self) -> u32 {
        percent_of(self.score, self.questions.len())
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn percent_of(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round() as u32
}
