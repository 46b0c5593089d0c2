//! Stage machine.
//!
//! `Controller::handle` maps `(state, input)` to a new state plus a list of
//! effects. It never touches a surface directly; the runtime applies the
//! effects in order.
//!
//! ```text
//! Loading -> Intro -> Quiz -> Calculating -> Score -> Propose -> Done -> Intro ...
//!    \-> Failed
//! ```

use chrono::{DateTime, Utc};

use super::present::{Command, ControlAction};
use super::render::{controls, not_yet_text, render};
use super::Stage;
use crate::audio::{DONE_VOLUME, PROPOSE_VOLUME, QUIZ_VOLUME};
use crate::documents::Documents;
use crate::events::Event;
use crate::quiz::{build_quiz, QuizSession};
use crate::sampler::Sampler;

/// Pause after an answer so the pressed state is visible.
pub const ANSWER_DELAY_MS: u64 = 120;
/// Time spent on the calculating screen.
pub const CALCULATING_DELAY_MS: u64 = 2500;

/// All mutable application state. Owned by the controller.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub stage: Stage,
    pub documents: Option<Documents>,
    pub session: QuizSession,
    /// "Not yet" was tapped on the current intro screen.
    pub intro_nudged: bool,
    /// Controls are disabled until the next frame.
    pub input_locked: bool,
}

/// Something that happened outside the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Loaded(Box<Documents>),
    LoadFailed(String),
    /// The control at this index of the current frame was tapped.
    Activate(usize),
    /// The post-answer delay elapsed.
    ShowNextQuestion,
    /// The current question cannot be answered; move past it unscored.
    SkipQuestion,
    /// The calculating delay elapsed.
    RevealScore,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Present(Vec<Command>),
    StartMusic,
    SetVolume(f32),
    Prefetch(String),
    Celebrate,
    Schedule { delay_ms: u64, input: Input },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    pub effects: Vec<Effect>,
    pub events: Vec<Event>,
}

impl Transition {
    /// Nothing observable happened.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.events.is_empty()
    }

    fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn record(&mut self, event: Event) {
        self.events.push(event);
    }
}

#[derive(Debug, Clone)]
pub struct Controller {
    state: AppState,
    sampler: Sampler,
}

impl Controller {
    pub fn new(sampler: Sampler) -> Self {
        Self {
            state: AppState::default(),
            sampler,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn session(&self) -> &QuizSession {
        &self.state.session
    }

    /// Whether a tap on control `index` would do anything.
    pub fn accepts(&self, index: usize) -> bool {
        !self.state.input_locked && index < controls(&self.state).len()
    }

    /// Frame for the current state.
    pub fn frame(&self) -> Vec<Command> {
        render(&self.state)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn handle(&mut self, input: Input, at: DateTime<Utc>) -> Transition {
        let mut t = Transition::default();
        match (self.state.stage, input) {
            (Stage::Loading, Input::Loaded(documents)) => {
                for issue in documents.bank.validate() {
                    tracing::warn!(%issue, "question bank problem");
                }
                t.record(Event::DocumentsLoaded {
                    cute: documents.bank.cute.len(),
                    memory: documents.bank.memory.len(),
                    at,
                });
                for path in documents.config.paths.static_images() {
                    t.push(Effect::Prefetch(path.to_string()));
                }
                self.state.documents = Some(*documents);
                self.enter(Stage::Intro, &mut t, at);
            }
            (Stage::Loading, Input::LoadFailed(reason)) => {
                tracing::error!(%reason, "startup documents failed to load");
                t.record(Event::LoadFailed { reason, at });
                self.enter(Stage::Failed, &mut t, at);
            }
            (_, Input::Activate(index)) => self.activate(index, &mut t, at),
            (Stage::Quiz, Input::ShowNextQuestion) => self.next_question(&mut t, at),
            (Stage::Quiz, Input::SkipQuestion) => {
                if let Some(question_index) = self.state.session.skip() {
                    tracing::warn!(question_index, "question has no options; skipped");
                    t.record(Event::QuestionSkipped { question_index, at });
                }
                self.next_question(&mut t, at);
            }
            (Stage::Calculating, Input::RevealScore) => self.enter(Stage::Score, &mut t, at),
            (stage, input) => {
                tracing::debug!(?stage, ?input, "input ignored");
            }
        }
        t
    }

    fn activate(&mut self, index: usize, t: &mut Transition, at: DateTime<Utc>) {
        if !self.accepts(index) {
            tracing::debug!(index, stage = ?self.state.stage, "activation ignored");
            return;
        }
        let Some(control) = controls(&self.state).into_iter().nth(index) else {
            return;
        };

        match control.action {
            ControlAction::Start => {
                t.push(Effect::StartMusic);
                if let Some(documents) = self.state.documents.as_ref() {
                    self.state.session =
                        build_quiz(&documents.bank, &documents.config, &mut self.sampler);
                    let session = &self.state.session;
                    tracing::info!(session = %session.id, total = session.total(), "quiz built");
                    t.record(Event::QuizBuilt {
                        session_id: session.id,
                        total: session.total(),
                        at,
                    });
                    if let Some(first) = session.current() {
                        t.push(Effect::Prefetch(documents.config.paths.question_image(first)));
                    }
                }
                self.enter(Stage::Quiz, t, at);
            }
            ControlAction::NotYet => {
                self.state.intro_nudged = true;
                let name = self
                    .state
                    .documents
                    .as_ref()
                    .map(|d| d.config.names.recipient())
                    .unwrap_or_default();
                t.push(Effect::Present(vec![Command::SetBodyPlain {
                    text: not_yet_text(&name),
                }]));
            }
            ControlAction::Answer(choice) => {
                // Lock first so any later tap on this question is dropped.
                self.state.input_locked = true;
                t.push(Effect::Present(vec![
                    Command::MarkPressed { index },
                    Command::DisableAllControls,
                ]));
                let Some(outcome) = self.state.session.answer(choice) else {
                    return;
                };
                t.record(Event::AnswerRecorded {
                    question_index: outcome.question_index,
                    choice,
                    correct: outcome.correct,
                    score: self.state.session.score(),
                    at,
                });
                if outcome.finished {
                    self.enter(Stage::Calculating, t, at);
                } else {
                    t.push(Effect::Schedule {
                        delay_ms: ANSWER_DELAY_MS,
                        input: Input::ShowNextQuestion,
                    });
                }
            }
            ControlAction::Continue => self.enter(Stage::Propose, t, at),
            ControlAction::Accept => {
                t.push(Effect::Celebrate);
                self.enter(Stage::Done, t, at);
            }
            ControlAction::Retake => self.enter(Stage::Intro, t, at),
        }
    }

    fn next_question(&mut self, t: &mut Transition, at: DateTime<Utc>) {
        let next = if self.state.session.is_finished() {
            Stage::Calculating
        } else {
            Stage::Quiz
        };
        self.enter(next, t, at);
    }

    /// Switch to `stage`, emit its entry effects and a full frame.
    fn enter(&mut self, stage: Stage, t: &mut Transition, at: DateTime<Utc>) {
        if self.state.stage != stage {
            tracing::info!(from = ?self.state.stage, to = ?stage, "stage entered");
            t.record(Event::StageEntered { stage, at });
        }
        self.state.stage = stage;
        self.state.input_locked = false;
        if stage == Stage::Intro {
            self.state.intro_nudged = false;
        }

        t.push(Effect::Present(render(&self.state)));

        match stage {
            Stage::Quiz => {
                t.push(Effect::SetVolume(QUIZ_VOLUME));
                let session = &self.state.session;
                if session.total() == 0 {
                    // Nothing to answer: move on as if the last answer was given.
                    self.state.input_locked = true;
                    t.push(Effect::Schedule {
                        delay_ms: ANSWER_DELAY_MS,
                        input: Input::ShowNextQuestion,
                    });
                } else {
                    if session.current().is_some_and(|q| q.options.is_empty()) {
                        self.state.input_locked = true;
                        t.push(Effect::Schedule {
                            delay_ms: ANSWER_DELAY_MS,
                            input: Input::SkipQuestion,
                        });
                    }
                    if let (Some(next), Some(documents)) =
                        (session.upcoming(), self.state.documents.as_ref())
                    {
                        t.push(Effect::Prefetch(documents.config.paths.question_image(next)));
                    }
                }
            }
            Stage::Calculating => {
                self.state.input_locked = true;
                t.push(Effect::Schedule {
                    delay_ms: CALCULATING_DELAY_MS,
                    input: Input::RevealScore,
                });
            }
            Stage::Propose => t.push(Effect::SetVolume(PROPOSE_VOLUME)),
            Stage::Done => t.push(Effect::SetVolume(DONE_VOLUME)),
            Stage::Failed => self.state.input_locked = true,
            Stage::Loading | Stage::Intro | Stage::Score => {}
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(Sampler::default())
    }
}
