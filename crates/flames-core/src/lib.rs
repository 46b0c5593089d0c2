//! # Flames Core Library
//!
//! Core logic for the Flames Test: a short multi-stage quiz that turns into a
//! scripted proposal. Rendering, audio, image caching and particle effects are
//! capabilities injected behind small traits, so the whole experience can be
//! driven and tested without a real surface.
//!
//! ## Architecture
//!
//! - **Stage machine**: [`Controller`] maps `(state, input)` to effects;
//!   [`render`] turns state into presentation commands
//! - **Runtime**: [`Runtime`] applies effects to the capabilities and fires
//!   one-shot timers against a [`Clock`]
//! - **Documents**: question bank + quiz configuration, loaded from a
//!   directory or an HTTP root
//! - **Quiz**: sampling without replacement and the per-run [`QuizSession`]
//!
//! ## Key Components
//!
//! - [`Runtime`]: event-loop driver
//! - [`Presenter`]: rendering surface contract
//! - [`AudioGate`]: one-time music unlock and click feedback
//! - [`Prefetcher`]: best-effort image cache warming
//! - [`burst_fx`]: celebration particles

pub mod audio;
pub mod documents;
pub mod error;
pub mod events;
pub mod fx;
pub mod prefetch;
pub mod quiz;
pub mod runtime;
pub mod sampler;
pub mod stage;
pub mod timer;

pub use audio::{AudioGate, AudioSurface, SilentAudio};
pub use documents::{
    load_documents, AssetSource, Documents, Question, QuestionBank, QuizConfig,
};
pub use error::{AudioError, CoreError, FxError, LoadError, ValidationError};
pub use events::Event;
pub use fx::{burst_fx, FxRenderer, NoFx, Particle, ParticleKind, Rect};
pub use prefetch::{CachingPrefetcher, NoopPrefetcher, Prefetcher};
pub use quiz::{build_quiz, Progress, QuizSession};
pub use runtime::{Runtime, RuntimeBuilder};
pub use sampler::{sample_without_replacement, shuffle, Sampler};
pub use stage::{
    render, Command, Control, ControlAction, ControlStyle, Controller, Effect, Input, Presenter,
    Stage, Transition,
};
pub use timer::{Clock, ManualClock, SystemClock};
