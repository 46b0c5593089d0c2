//! Integration tests driving the full runtime on a virtual clock.

mod common;

use common::{documents, shared, FakeAudio, FakeFx, FakePrefetcher, FakePresenter, Shared};
use flames_core::stage::{ANSWER_DELAY_MS, CALCULATING_DELAY_MS, FAILURE_MESSAGE};
use flames_core::{Documents, Event, LoadError, ManualClock, Rect, Runtime, Stage};

struct Harness {
    runtime: Runtime,
    record: Shared,
    clock: ManualClock,
}

fn harness(refuse_starts: usize, fx_bounds: Option<Rect>) -> Harness {
    let record = shared();
    let clock = ManualClock::default();
    let runtime = Runtime::builder(FakePresenter(record.clone()))
        .with_audio(FakeAudio {
            record: record.clone(),
            refuse_starts,
        })
        .with_prefetcher(FakePrefetcher(record.clone()))
        .with_fx(FakeFx {
            record: record.clone(),
            bounds: fx_bounds,
        })
        .with_clock(clock.clone())
        .with_seed(Some(7))
        .build();
    Harness {
        runtime,
        record,
        clock,
    }
}

fn booted(docs: Documents) -> Harness {
    let mut h = harness(0, Some(Rect {
        left: 0.0,
        top: 0.0,
        width: 400.0,
        height: 700.0,
    }));
    h.runtime.boot(Ok(docs)).unwrap();
    h
}

impl Harness {
    fn advance(&mut self, ms: i64) -> usize {
        self.clock.advance_ms(ms);
        self.runtime.tick()
    }

    /// Answer every question, choosing option 0 (correct) or 1 (wrong).
    fn answer_all(&mut self, correct: bool) {
        let total = self.runtime.session().total();
        for i in 0..total {
            assert_eq!(self.runtime.stage(), Stage::Quiz);
            assert!(self.runtime.activate(if correct { 0 } else { 1 }));
            if i + 1 < total {
                self.advance(ANSWER_DELAY_MS as i64);
            }
        }
    }

    fn title(&self) -> String {
        self.record.lock().unwrap().title.clone()
    }
}

#[test]
fn full_run_all_correct_scores_100() {
    let mut h = booted(documents(5, 3, 2, 1));
    assert_eq!(h.runtime.stage(), Stage::Intro);
    assert_eq!(h.title(), "Flames Test 🔥");

    assert!(h.runtime.activate(0));
    assert_eq!(h.runtime.stage(), Stage::Quiz);
    assert_eq!(h.runtime.session().total(), 3);
    assert_eq!(h.title(), "Question 1/3");

    h.answer_all(true);
    assert_eq!(h.runtime.stage(), Stage::Calculating);
    assert!(h.record.lock().unwrap().overlay);

    assert_eq!(h.advance(CALCULATING_DELAY_MS as i64 - 1), 0);
    assert_eq!(h.runtime.stage(), Stage::Calculating);
    assert_eq!(h.advance(1), 1);
    assert_eq!(h.runtime.stage(), Stage::Score);
    assert_eq!(h.runtime.session().score(), 3);
    assert_eq!(h.title(), "Flame Sync: 100%");

    assert!(h.runtime.activate(0));
    assert_eq!(h.runtime.stage(), Stage::Propose);
    {
        let r = h.record.lock().unwrap();
        assert!(r.letter_mode);
        assert_eq!(r.line_step_ms, 220);
        assert_eq!(r.body_lines.last().map(String::as_str), Some("— Bo"));
    }

    assert!(h.runtime.activate(0));
    assert_eq!(h.runtime.stage(), Stage::Done);
    let r = h.record.lock().unwrap();
    assert_eq!(r.particles.len(), 40);
    assert_eq!(r.line_step_ms, 240);
    assert_eq!(r.controls.len(), 1);
}

#[test]
fn all_wrong_scores_zero() {
    let mut h = booted(documents(5, 3, 3, 2));
    h.runtime.activate(0);
    h.answer_all(false);
    h.advance(CALCULATING_DELAY_MS as i64);
    assert_eq!(h.runtime.session().score(), 0);
    assert_eq!(h.title(), "Flame Sync: 0%");
}

#[test]
fn question_advances_only_after_delay() {
    let mut h = booted(documents(5, 3, 2, 0));
    h.runtime.activate(0);
    h.runtime.activate(0);
    assert_eq!(h.title(), "Question 1/2");
    assert_eq!(h.advance(ANSWER_DELAY_MS as i64 - 1), 0);
    assert_eq!(h.title(), "Question 1/2");
    assert_eq!(h.advance(1), 1);
    assert_eq!(h.title(), "Question 2/2");
    let progress = h.record.lock().unwrap().progress.unwrap();
    assert_eq!((progress.current, progress.total, progress.percent), (2, 2, 100));
}

#[test]
fn second_tap_on_answered_question_has_no_effect() {
    let mut h = booted(documents(5, 3, 2, 0));
    h.runtime.activate(0);
    assert!(h.runtime.activate(1));
    {
        let r = h.record.lock().unwrap();
        assert!(!r.controls_enabled);
        assert_eq!(r.pressed, Some(1));
    }
    let clicks_before = h.record.lock().unwrap().audio.len();

    assert!(!h.runtime.activate(0));
    assert!(!h.runtime.activate(2));
    assert_eq!(h.runtime.session().current_index(), 1);
    assert_eq!(h.runtime.session().score(), 0);
    assert_eq!(h.record.lock().unwrap().audio.len(), clicks_before);
    assert_eq!(h.runtime.pending_timers(), 1);
}

#[test]
fn click_sound_precedes_the_transition_it_belongs_to() {
    let mut h = booted(documents(5, 3, 2, 0));
    h.runtime.activate(0);
    h.record.lock().unwrap().timeline.clear();

    h.runtime.activate(0);
    let timeline = h.record.lock().unwrap().timeline.clone();
    assert_eq!(timeline.first().map(String::as_str), Some("click"));
    assert!(timeline.contains(&"disable".to_string()));
}

#[test]
fn empty_quiz_reaches_zero_percent_score() {
    let mut h = booted(documents(0, 0, 3, 3));
    assert!(h.runtime.activate(0));
    assert_eq!(h.runtime.stage(), Stage::Quiz);
    assert_eq!(h.runtime.session().total(), 0);
    assert!(!h.runtime.activate(0));

    h.advance(ANSWER_DELAY_MS as i64);
    assert_eq!(h.runtime.stage(), Stage::Calculating);
    h.advance(CALCULATING_DELAY_MS as i64);
    assert_eq!(h.runtime.stage(), Stage::Score);
    assert_eq!(h.title(), "Flame Sync: 0%");
}

#[test]
fn question_without_options_is_skipped_unscored() {
    let mut docs = documents(1, 1, 1, 1);
    docs.bank.cute[0].options.clear();
    let mut h = booted(docs);
    h.runtime.activate(0);
    assert_eq!(h.runtime.stage(), Stage::Quiz);
    assert_eq!(h.runtime.session().current_index(), 0);
    assert!(!h.runtime.activate(0));

    assert_eq!(h.advance(ANSWER_DELAY_MS as i64), 1);
    assert_eq!(h.runtime.stage(), Stage::Quiz);
    assert_eq!(h.runtime.session().current_index(), 1);
    assert_eq!(h.title(), "Question 2/2");

    assert!(h.runtime.activate(0));
    assert_eq!(h.runtime.stage(), Stage::Calculating);
    h.advance(CALCULATING_DELAY_MS as i64);
    assert_eq!(h.title(), "Flame Sync: 50%");
    assert!(h
        .runtime
        .drain_events()
        .iter()
        .any(|e| matches!(e, Event::QuestionSkipped { question_index: 0, .. })));
}

#[test]
fn retake_rebuilds_a_fresh_session() {
    let mut h = booted(documents(5, 3, 2, 1));
    h.runtime.activate(0);
    let first_id = h.runtime.session().id;
    h.answer_all(true);
    h.advance(CALCULATING_DELAY_MS as i64);
    h.runtime.activate(0);
    h.runtime.activate(0);
    assert_eq!(h.runtime.stage(), Stage::Done);

    assert!(h.runtime.activate(0));
    assert_eq!(h.runtime.stage(), Stage::Intro);
    assert_eq!(h.title(), "Flames Test 🔥");

    h.runtime.activate(0);
    assert_eq!(h.runtime.stage(), Stage::Quiz);
    assert_ne!(h.runtime.session().id, first_id);
    assert_eq!(h.runtime.session().current_index(), 0);
    assert_eq!(h.runtime.session().score(), 0);
}

#[test]
fn prefetch_follows_lookahead_policy() {
    let mut h = booted(documents(5, 3, 3, 0));
    {
        let r = h.record.lock().unwrap();
        assert_eq!(
            r.prefetched,
            vec![
                "assets/img/intro.jpg",
                "assets/img/score.jpg",
                "assets/img/propose.jpg"
            ]
        );
    }
    h.record.lock().unwrap().prefetched.clear();

    h.runtime.activate(0);
    let images: Vec<String> = h
        .runtime
        .session()
        .questions()
        .iter()
        .map(|q| format!("assets/img/q/{}", q.image))
        .collect();
    assert_eq!(h.record.lock().unwrap().prefetched, images[..2].to_vec());

    h.runtime.activate(0);
    h.advance(ANSWER_DELAY_MS as i64);
    assert_eq!(h.record.lock().unwrap().prefetched, images[..3].to_vec());

    // Last question has nothing ahead of it.
    h.runtime.activate(0);
    h.advance(ANSWER_DELAY_MS as i64);
    assert_eq!(h.record.lock().unwrap().prefetched.len(), 3);
}

#[test]
fn music_unlocks_on_start_and_sets_stage_volumes() {
    let mut h = booted(documents(5, 3, 1, 0));
    assert_eq!(h.record.lock().unwrap().audio, vec!["volume 0.32"]);

    h.runtime.activate(0);
    assert!(h.runtime.is_music_unlocked());
    h.runtime.activate(0);
    h.advance(CALCULATING_DELAY_MS as i64);
    h.runtime.activate(0);
    h.runtime.activate(0);

    assert_eq!(
        h.record.lock().unwrap().audio,
        vec![
            "volume 0.32",
            "start",
            "volume 0.28",
            "click",
            "click",
            "volume 0.22",
            "click",
            "volume 0.24",
        ]
    );
}

#[test]
fn blocked_music_stays_silent_until_a_later_start_succeeds() {
    let record = shared();
    let clock = ManualClock::default();
    let mut runtime = Runtime::builder(FakePresenter(record.clone()))
        .with_audio(FakeAudio {
            record: record.clone(),
            refuse_starts: 1,
        })
        .with_clock(clock.clone())
        .build();
    runtime.boot(Ok(documents(5, 3, 1, 0))).unwrap();

    runtime.activate(0);
    assert!(!runtime.is_music_unlocked());
    runtime.activate(0);
    clock.advance_ms(CALCULATING_DELAY_MS as i64);
    runtime.tick();
    runtime.activate(0);
    runtime.activate(0);
    runtime.activate(0);
    assert_eq!(runtime.stage(), Stage::Intro);
    assert_eq!(record.lock().unwrap().audio, vec!["volume 0.32", "start"]);

    runtime.activate(0);
    assert!(runtime.is_music_unlocked());
    assert_eq!(
        record.lock().unwrap().audio,
        vec!["volume 0.32", "start", "start", "volume 0.28"]
    );
}

#[test]
fn not_yet_keeps_intro_and_controls() {
    let mut h = booted(documents(5, 3, 1, 0));
    let frames = h.record.lock().unwrap().frames;
    assert!(h.runtime.activate(1));
    let r = h.record.lock().unwrap();
    assert_eq!(h.runtime.stage(), Stage::Intro);
    assert_eq!(r.body, "No pressure, Ada. Tap Start when you’re ready 🙂");
    assert_eq!(r.controls.len(), 2);
    assert_eq!(r.frames, frames + 1);
}

#[test]
fn celebration_without_layout_still_reaches_done() {
    let mut h = harness(0, None);
    h.runtime.boot(Ok(documents(5, 3, 1, 0))).unwrap();
    h.runtime.activate(0);
    h.runtime.activate(0);
    h.advance(CALCULATING_DELAY_MS as i64);
    h.runtime.activate(0);
    h.runtime.activate(0);
    assert_eq!(h.runtime.stage(), Stage::Done);
    assert!(h.record.lock().unwrap().particles.is_empty());
    assert!(h
        .runtime
        .drain_events()
        .iter()
        .any(|e| matches!(e, Event::Celebrated { particles: 0, .. })));
}

#[test]
fn load_failure_shows_message_and_accepts_nothing() {
    let mut h = harness(0, None);
    let err = LoadError::Status {
        document: "assets/data/questions.json".into(),
        status: 404,
    };
    assert!(h.runtime.boot(Err(err)).is_err());
    assert_eq!(h.runtime.stage(), Stage::Failed);
    {
        let r = h.record.lock().unwrap();
        assert_eq!(r.title, "Oops");
        assert_eq!(r.body, FAILURE_MESSAGE);
        assert!(r.controls.is_empty());
    }
    assert!(!h.runtime.activate(0));
    assert_eq!(h.advance(10_000), 0);
    assert_eq!(h.runtime.stage(), Stage::Failed);
}

#[test]
fn events_trace_the_run() {
    let mut h = booted(documents(5, 3, 1, 0));
    h.runtime.activate(0);
    h.runtime.activate(0);
    h.advance(CALCULATING_DELAY_MS as i64);

    let kinds: Vec<&'static str> = h
        .runtime
        .drain_events()
        .iter()
        .map(|e| match e {
            Event::DocumentsLoaded { .. } => "loaded",
            Event::LoadFailed { .. } => "failed",
            Event::StageEntered { .. } => "stage",
            Event::QuizBuilt { .. } => "built",
            Event::AnswerRecorded { .. } => "answer",
            Event::QuestionSkipped { .. } => "skipped",
            Event::MusicUnlocked { .. } => "music",
            Event::Celebrated { .. } => "fx",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["loaded", "stage", "music", "built", "stage", "answer", "stage", "stage"]
    );
    assert!(h.runtime.drain_events().is_empty());
}
