//! Event-loop driver.
//!
//! Owns the controller and every capability, applies transition effects in
//! order, and fires one-shot timers against an injected [`Clock`]. Single
//! threaded: the caller feeds it taps and calls [`Runtime::tick`] whenever
//! [`Runtime::next_deadline`] has passed.

use chrono::{DateTime, Utc};

use crate::audio::{AudioGate, AudioSurface, SilentAudio};
use crate::documents::{load_documents, AssetSource, Documents};
use crate::error::{LoadError, Result};
use crate::events::Event;
use crate::fx::{burst_fx, FxRenderer, NoFx};
use crate::prefetch::{NoopPrefetcher, Prefetcher};
use crate::quiz::QuizSession;
use crate::sampler::Sampler;
use crate::stage::{AppState, Controller, Effect, Input, Presenter, Stage};
use crate::timer::{Clock, SystemClock, TimerQueue};

pub struct Runtime {
    controller: Controller,
    presenter: Box<dyn Presenter>,
    audio: AudioGate,
    prefetcher: Box<dyn Prefetcher>,
    fx: Box<dyn FxRenderer>,
    fx_sampler: Sampler,
    clock: Box<dyn Clock>,
    timers: TimerQueue<Input>,
    events: Vec<Event>,
}

/// Assembles a [`Runtime`]. Only the presenter is mandatory.
pub struct RuntimeBuilder {
    presenter: Box<dyn Presenter>,
    audio: Box<dyn AudioSurface>,
    prefetcher: Box<dyn Prefetcher>,
    fx: Box<dyn FxRenderer>,
    clock: Box<dyn Clock>,
    seed: Option<u64>,
}

impl RuntimeBuilder {
    pub fn with_audio(mut self, audio: impl AudioSurface + 'static) -> Self {
        self.audio = Box::new(audio);
        self
    }

    pub fn with_prefetcher(mut self, prefetcher: impl Prefetcher + 'static) -> Self {
        self.prefetcher = Box::new(prefetcher);
        self
    }

    pub fn with_fx(mut self, fx: impl FxRenderer + 'static) -> Self {
        self.fx = Box::new(fx);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Fix the random seed for quiz sampling and FX jitter.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Build the runtime and show the loading frame.
    pub fn build(self) -> Runtime {
        let controller = Controller::new(Sampler::new(self.seed));
        let mut runtime = Runtime {
            controller,
            presenter: self.presenter,
            audio: AudioGate::new(self.audio),
            prefetcher: self.prefetcher,
            fx: self.fx,
            fx_sampler: Sampler::new(self.seed.map(|s| s.wrapping_add(1))),
            clock: self.clock,
            timers: TimerQueue::new(),
            events: Vec::new(),
        };
        let frame = runtime.controller.frame();
        runtime.apply(Effect::Present(frame));
        runtime
    }
}

impl Runtime {
    pub fn builder(presenter: impl Presenter + 'static) -> RuntimeBuilder {
        RuntimeBuilder {
            presenter: Box::new(presenter),
            audio: Box::new(SilentAudio),
            prefetcher: Box::new(NoopPrefetcher),
            fx: Box::new(NoFx),
            clock: Box::new(SystemClock),
            seed: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn stage(&self) -> Stage {
        self.controller.stage()
    }

    pub fn state(&self) -> &AppState {
        self.controller.state()
    }

    pub fn session(&self) -> &QuizSession {
        self.controller.session()
    }

    pub fn is_music_unlocked(&self) -> bool {
        self.audio.is_unlocked()
    }

    /// Earliest pending timer, if any.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.timers.next_due()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Take every event recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Fetch both documents from `source` and leave the loading stage.
    ///
    /// # Errors
    ///
    /// Returns the load error after the failure frame has been shown.
    pub async fn load(&mut self, source: &AssetSource) -> Result<()> {
        let result = load_documents(source).await;
        self.boot(result).map_err(Into::into)
    }

    /// Deliver the outcome of the startup fetch.
    ///
    /// # Errors
    ///
    /// Hands the load error back after dispatching the failure transition.
    pub fn boot(&mut self, result: Result<Documents, LoadError>) -> Result<(), LoadError> {
        match result {
            Ok(documents) => {
                self.dispatch(Input::Loaded(Box::new(documents)));
                Ok(())
            }
            Err(e) => {
                self.dispatch(Input::LoadFailed(e.to_string()));
                Err(e)
            }
        }
    }

    /// Tap on the control at `index` of the current frame.
    ///
    /// The click sound is attempted before the transition runs. Returns
    /// false when the tap had no effect (disabled or unknown control).
    pub fn activate(&mut self, index: usize) -> bool {
        if !self.controller.accepts(index) {
            tracing::debug!(index, "tap on inactive control");
            return false;
        }
        self.audio.play_confirmation();
        self.dispatch(Input::Activate(index));
        true
    }

    /// Fire every timer that is due. Returns how many fired.
    pub fn tick(&mut self) -> usize {
        let mut fired = 0;
        while let Some(entry) = self.timers.pop_due(self.clock.now()) {
            fired += 1;
            self.dispatch(entry.payload);
        }
        fired
    }

    fn dispatch(&mut self, input: Input) {
        let at = self.clock.now();
        let transition = self.controller.handle(input, at);
        // Music and FX events come from effects that lead their transition.
        for effect in transition.effects {
            self.apply(effect);
        }
        self.events.extend(transition.events);
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Present(commands) => {
                for command in &commands {
                    self.presenter.apply(command);
                }
                self.presenter.flush();
            }
            Effect::StartMusic => {
                if self.audio.request_music_start() {
                    self.events.push(Event::MusicUnlocked {
                        at: self.clock.now(),
                    });
                }
            }
            Effect::SetVolume(volume) => self.audio.set_volume(volume),
            Effect::Prefetch(path) => self.prefetcher.prefetch_image(&path),
            Effect::Celebrate => {
                let particles = burst_fx(self.fx.as_mut(), &mut self.fx_sampler);
                self.events.push(Event::Celebrated {
                    particles,
                    at: self.clock.now(),
                });
            }
            Effect::Schedule { delay_ms, input } => {
                let due = self.timers.schedule(self.clock.now(), delay_ms, input);
                tracing::debug!(delay_ms, %due, "timer scheduled");
            }
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("stage", &self.controller.stage())
            .field("audio", &self.audio)
            .field("pending_timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}
