//! Pure rendering: application state in, presentation commands out.
//!
//! Every frame starts from cleared controls, hidden overlay and letter mode
//! off; stage-specific commands follow.

use indoc::formatdoc;

use super::machine::AppState;
use super::present::{Command, Control, ControlAction, ControlStyle};
use super::Stage;
use crate::documents::{QuestionBank, QuizConfig};

pub const INTRO_TITLE: &str = "Flames Test 🔥";
pub const FAILURE_TITLE: &str = "Oops";
pub const FAILURE_MESSAGE: &str = "Couldn’t load data files. Check the assets location and retry.";
/// Reveal step between letter lines on the proposal screen.
pub const PROPOSE_LINE_STEP_MS: u32 = 220;
/// Reveal step between letter lines on the closing screen.
pub const DONE_LINE_STEP_MS: u32 = 240;

/// Controls offered by the current state, in display order.
pub fn controls(state: &AppState) -> Vec<Control> {
    use ControlAction::*;
    use ControlStyle::*;

    match state.stage {
        Stage::Intro => vec![
            Control::new("Start", Primary, Start),
            Control::new("Not yet", Secondary, NotYet),
        ],
        Stage::Quiz => state
            .session
            .current()
            .map(|q| {
                q.options
                    .iter()
                    .enumerate()
                    .map(|(i, opt)| Control::new(opt.clone(), Primary, Answer(i)))
                    .collect()
            })
            .unwrap_or_default(),
        Stage::Score => vec![Control::new("Continue →", Primary, Continue)],
        Stage::Propose => vec![Control::new("Yes 💖", Primary, Accept)],
        Stage::Done => vec![Control::new("Retake the Flames Test 🔁", Secondary, Retake)],
        Stage::Loading | Stage::Calculating | Stage::Failed => Vec::new(),
    }
}

/// Full frame for the current state.
pub fn render(state: &AppState) -> Vec<Command> {
    let mut frame = vec![
        Command::ClearControls,
        Command::SetOverlayVisible { visible: false },
        Command::SetLetterMode { on: false },
    ];

    let config = state.documents.as_ref().map(|d| &d.config);
    match (state.stage, config) {
        (Stage::Failed, _) => {
            frame.push(title(FAILURE_TITLE));
            frame.push(subtitle(""));
            frame.push(plain(FAILURE_MESSAGE));
        }
        (Stage::Loading, _) | (_, None) => {
            frame.push(Command::SetProgressVisible { visible: false });
        }
        (Stage::Intro, Some(config)) => {
            let name = config.names.recipient();
            frame.push(Command::SetProgressVisible { visible: false });
            frame.push(title(INTRO_TITLE));
            frame.push(subtitle(&format!("For {name}.")));
            frame.push(image(&config.paths.intro_image));
            if state.intro_nudged {
                frame.push(plain(&not_yet_text(&name)));
            } else {
                let count = state
                    .documents
                    .as_ref()
                    .map(|d| expected_quiz_len(&d.bank, config))
                    .unwrap_or_default();
                frame.push(plain(&intro_text(&name, count)));
            }
        }
        (Stage::Quiz, Some(config)) => {
            let session = &state.session;
            frame.push(subtitle(""));
            match session.current() {
                Some(question) => {
                    frame.push(Command::SetProgressVisible { visible: true });
                    frame.push(Command::SetProgress {
                        progress: session.progress(),
                    });
                    frame.push(title(&format!(
                        "Question {}/{}",
                        session.current_index() + 1,
                        session.total()
                    )));
                    frame.push(image(&config.paths.question_image(question)));
                    frame.push(plain(&question.question));
                }
                None => {
                    frame.push(Command::SetProgressVisible { visible: false });
                    frame.push(title("Question 0/0"));
                    frame.push(plain(""));
                }
            }
        }
        (Stage::Calculating, Some(config)) => {
            frame.push(Command::SetProgressVisible { visible: false });
            frame.push(subtitle(""));
            frame.push(title("One sec…"));
            frame.push(image(&config.paths.score_image));
            frame.push(plain("Calculating…"));
            frame.push(Command::SetOverlayVisible { visible: true });
        }
        (Stage::Score, Some(config)) => {
            let session = &state.session;
            let name = config.names.recipient();
            frame.push(Command::SetProgressVisible { visible: false });
            frame.push(subtitle(""));
            frame.push(title(&format!("Flame Sync: {}%", session.score_percent())));
            frame.push(image(&config.paths.score_image));
            frame.push(plain(&formatdoc! {"
                {name}, we matched on {score}/{total}.
                But honestly… this test is just the warm-up.

                One last thing…",
                score = session.score(),
                total = session.total(),
            }));
        }
        (Stage::Propose, Some(config)) => {
            frame.push(Command::SetProgressVisible { visible: false });
            frame.push(subtitle(""));
            frame.push(Command::SetLetterMode { on: true });
            frame.push(title("A question I really care about ❤️"));
            frame.push(image(&config.paths.propose_image));
            frame.push(Command::SetBodyLines {
                lines: propose_lines(config),
                base_delay_ms: 0,
                step_ms: PROPOSE_LINE_STEP_MS,
            });
        }
        (Stage::Done, Some(config)) => {
            frame.push(Command::SetProgressVisible { visible: false });
            frame.push(subtitle(""));
            frame.push(Command::SetLetterMode { on: true });
            frame.push(title("Always ❤️"));
            frame.push(image(&config.paths.propose_image));
            frame.push(Command::SetBodyLines {
                lines: vec![
                    format!("{},", config.names.recipient()),
                    String::new(),
                    "Thank you for choosing me.".into(),
                    "I choose you — always.".into(),
                ],
                base_delay_ms: 0,
                step_ms: DONE_LINE_STEP_MS,
            });
        }
    }

    frame.extend(
        controls(state)
            .into_iter()
            .map(|control| Command::AddControl { control }),
    );
    frame
}

/// Number of questions a quiz built from these documents will have.
pub fn expected_quiz_len(bank: &QuestionBank, config: &QuizConfig) -> usize {
    config.sample.cute.min(bank.cute.len()) + config.sample.memory.min(bank.memory.len())
}

pub fn not_yet_text(name: &str) -> String {
    format!("No pressure, {name}. Tap Start when you’re ready 🙂")
}

fn intro_text(name: &str, count: usize) -> String {
    let noun = if count == 1 { "question" } else { "questions" };
    formatdoc! {"
        Okay {name}, quick flame check.
        {count} {noun}.
        No cheating.

        Ready?"
    }
}

fn propose_lines(config: &QuizConfig) -> Vec<String> {
    let sender = config.names.sender();
    let sign = if sender.is_empty() {
        String::new()
    } else {
        format!("— {sender}")
    };
    vec![
        format!("{},", config.names.recipient()),
        String::new(),
        "Being with you still feels like my favorite place to be.".into(),
        "You’re my love, my calm, my excitement, my home.".into(),
        String::new(),
        "So today I’m not asking something new.".into(),
        "I’m asking something deeper.".into(),
        String::new(),
        "Will you continue to be my love,".into(),
        "and love me for all our tomorrows?".into(),
        String::new(),
        sign,
    ]
}

fn title(text: &str) -> Command {
    Command::SetTitle { text: text.into() }
}

fn subtitle(text: &str) -> Command {
    Command::SetSubtitle { text: text.into() }
}

fn plain(text: &str) -> Command {
    Command::SetBodyPlain { text: text.into() }
}

fn image(path: &str) -> Command {
    Command::SetImage { path: path.into() }
}
