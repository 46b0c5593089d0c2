//! Recording fakes for the runtime's capabilities.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use flames_core::documents::{AssetPaths, Names, SampleCounts};
use flames_core::{
    AudioError, AudioSurface, ControlStyle, Documents, FxError, FxRenderer, Particle, Prefetcher,
    Presenter, Progress, Question, QuestionBank, QuizConfig, Rect,
};

/// Everything the fakes observed, in order.
#[derive(Debug, Default)]
pub struct Record {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub body_lines: Vec<String>,
    pub line_step_ms: u32,
    pub image: String,
    pub controls: Vec<(String, ControlStyle)>,
    pub controls_enabled: bool,
    pub pressed: Option<usize>,
    pub progress_visible: bool,
    pub progress: Option<Progress>,
    pub overlay: bool,
    pub letter_mode: bool,
    pub frames: usize,
    pub audio: Vec<String>,
    pub prefetched: Vec<String>,
    pub particles: Vec<Particle>,
    /// Interleaved log of taps-relevant side effects, for ordering checks.
    pub timeline: Vec<String>,
}

pub type Shared = Arc<Mutex<Record>>;

pub fn shared() -> Shared {
    Arc::new(Mutex::new(Record::default()))
}

pub struct FakePresenter(pub Shared);

impl Presenter for FakePresenter {
    fn set_title(&mut self, text: &str) {
        self.0.lock().unwrap().title = text.to_string();
    }
    fn set_subtitle(&mut self, text: &str) {
        self.0.lock().unwrap().subtitle = text.to_string();
    }
    fn set_body_plain(&mut self, text: &str) {
        let mut r = self.0.lock().unwrap();
        r.body = text.to_string();
        r.body_lines.clear();
    }
    fn set_body_lines(&mut self, lines: &[String], _base_delay_ms: u32, step_ms: u32) {
        let mut r = self.0.lock().unwrap();
        r.body = lines.join("\n");
        r.body_lines = lines.to_vec();
        r.line_step_ms = step_ms;
    }
    fn set_image(&mut self, path: &str) {
        self.0.lock().unwrap().image = path.to_string();
    }
    fn clear_controls(&mut self) {
        let mut r = self.0.lock().unwrap();
        r.controls.clear();
        r.controls_enabled = true;
        r.pressed = None;
    }
    fn add_control(&mut self, label: &str, style: ControlStyle) {
        self.0.lock().unwrap().controls.push((label.to_string(), style));
    }
    fn disable_all_controls(&mut self) {
        let mut r = self.0.lock().unwrap();
        r.controls_enabled = false;
        r.timeline.push("disable".into());
    }
    fn mark_pressed(&mut self, index: usize) {
        self.0.lock().unwrap().pressed = Some(index);
    }
    fn set_progress_visible(&mut self, visible: bool) {
        self.0.lock().unwrap().progress_visible = visible;
    }
    fn set_progress(&mut self, progress: Progress) {
        self.0.lock().unwrap().progress = Some(progress);
    }
    fn set_overlay_visible(&mut self, visible: bool) {
        self.0.lock().unwrap().overlay = visible;
    }
    fn set_letter_mode(&mut self, on: bool) {
        self.0.lock().unwrap().letter_mode = on;
    }
    fn flush(&mut self) {
        let mut r = self.0.lock().unwrap();
        r.frames += 1;
        let title = r.title.clone();
        r.timeline.push(format!("frame {title}"));
    }
}

pub struct FakeAudio {
    pub record: Shared,
    pub refuse_starts: usize,
}

impl AudioSurface for FakeAudio {
    fn background_start(&mut self) -> Result<(), AudioError> {
        let mut r = self.record.lock().unwrap();
        r.audio.push("start".into());
        if self.refuse_starts > 0 {
            self.refuse_starts -= 1;
            return Err(AudioError::Blocked("autoplay policy".into()));
        }
        Ok(())
    }

    fn background_set_volume(&mut self, volume: f32) {
        self.record.lock().unwrap().audio.push(format!("volume {volume}"));
    }

    fn confirmation_play_from_start(&mut self) -> Result<(), AudioError> {
        let mut r = self.record.lock().unwrap();
        r.audio.push("click".into());
        r.timeline.push("click".into());
        Ok(())
    }
}

pub struct FakePrefetcher(pub Shared);

impl Prefetcher for FakePrefetcher {
    fn prefetch_image(&mut self, path: &str) {
        self.0.lock().unwrap().prefetched.push(path.to_string());
    }
}

pub struct FakeFx {
    pub record: Shared,
    pub bounds: Option<Rect>,
}

impl FxRenderer for FakeFx {
    fn surface_bounds(&self) -> Option<Rect> {
        self.bounds
    }

    fn spawn(&mut self, particle: Particle) -> Result<(), FxError> {
        let mut r = self.record.lock().unwrap();
        r.particles.push(particle);
        Ok(())
    }

    fn flush(&mut self) {
        self.record.lock().unwrap().timeline.push("burst".into());
    }
}

pub fn question(pool: &str, n: usize) -> Question {
    Question {
        image: format!("{pool}-{n}.jpg"),
        question: format!("{pool} question {n}?"),
        options: vec!["right".into(), "wrong".into(), "also wrong".into()],
        correct_index: 0,
    }
}

pub fn documents(cute_pool: usize, memory_pool: usize, cute: usize, memory: usize) -> Documents {
    Documents {
        bank: QuestionBank {
            cute: (0..cute_pool).map(|n| question("cute", n)).collect(),
            memory: (0..memory_pool).map(|n| question("memory", n)).collect(),
        },
        config: QuizConfig {
            names: Names {
                gf_name: Some("Ada".into()),
                your_name: Some("Bo".into()),
            },
            sample: SampleCounts { cute, memory },
            shuffle_final_order: false,
            paths: AssetPaths {
                intro_image: "assets/img/intro.jpg".into(),
                question_image_base: "assets/img/q/".into(),
                score_image: "assets/img/score.jpg".into(),
                propose_image: "assets/img/propose.jpg".into(),
            },
        },
    }
}
