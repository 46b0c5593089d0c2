//! Terminal implementations of the presentation, audio and FX surfaces.

use std::io::Write;

use flames_core::audio::CONFIRMATION_VOLUME;
use flames_core::fx::ParticleKind;
use flames_core::{
    AudioError, AudioSurface, ControlStyle, FxError, FxRenderer, Particle, Presenter, Progress,
    Rect,
};

const WIDTH: usize = 56;
const BAR_WIDTH: usize = 20;
/// Surface units per terminal column when placing particles.
const UNITS_PER_COLUMN: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body {
    Plain(String),
    Lines(Vec<String>),
}

/// Keeps the current screen and redraws it on every flush.
pub struct TerminalPresenter<W: Write> {
    out: W,
    title: String,
    subtitle: String,
    body: Body,
    image: String,
    controls: Vec<(String, ControlStyle)>,
    enabled: bool,
    pressed: Option<usize>,
    progress_visible: bool,
    progress: Option<Progress>,
    overlay: bool,
    letter_mode: bool,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            title: String::new(),
            subtitle: String::new(),
            body: Body::Plain(String::new()),
            image: String::new(),
            controls: Vec::new(),
            enabled: true,
            pressed: None,
            progress_visible: false,
            progress: None,
            overlay: false,
            letter_mode: false,
        }
    }

    /// The current screen as text.
    pub fn screen(&self) -> String {
        let mut s = String::new();
        s.push_str(&"─".repeat(WIDTH));
        s.push('\n');
        if !self.title.is_empty() {
            s.push_str(&format!(" {}\n", self.title));
        }
        if !self.subtitle.is_empty() {
            s.push_str(&format!(" {}\n", self.subtitle));
        }
        if !self.image.is_empty() {
            s.push_str(&format!(" [image: {}]\n", self.image));
        }
        if self.progress_visible {
            if let Some(p) = self.progress {
                let filled = BAR_WIDTH * p.percent as usize / 100;
                s.push_str(&format!(
                    " Question {}/{}  {}{} {}%\n",
                    p.current,
                    p.total,
                    "▓".repeat(filled),
                    "░".repeat(BAR_WIDTH - filled),
                    p.percent
                ));
            }
        }
        s.push('\n');

        let gutter = if self.letter_mode { "   │ " } else { " " };
        let lines: Vec<&str> = match &self.body {
            Body::Plain(text) => text.lines().collect(),
            Body::Lines(lines) => lines.iter().map(String::as_str).collect(),
        };
        for line in lines {
            s.push_str(gutter);
            s.push_str(line);
            s.push('\n');
        }
        if self.overlay {
            s.push_str("\n   …\n");
        }

        if !self.controls.is_empty() {
            s.push('\n');
            for (i, (label, style)) in self.controls.iter().enumerate() {
                let marker = match (self.pressed == Some(i), self.enabled) {
                    (true, _) => "•".to_string(),
                    (false, false) => "-".to_string(),
                    (false, true) => (i + 1).to_string(),
                };
                let label = match style {
                    ControlStyle::Primary => label.clone(),
                    ControlStyle::Secondary => format!("({label})"),
                };
                s.push_str(&format!(" [{marker}] {label}\n"));
            }
        }
        s
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
    }

    fn set_subtitle(&mut self, text: &str) {
        self.subtitle = text.to_string();
    }

    fn set_body_plain(&mut self, text: &str) {
        self.body = Body::Plain(text.to_string());
    }

    fn set_body_lines(&mut self, lines: &[String], base_delay_ms: u32, step_ms: u32) {
        tracing::debug!(
            lines = lines.len(),
            base_delay_ms,
            step_ms,
            "letter lines revealed at once"
        );
        self.body = Body::Lines(lines.to_vec());
    }

    fn set_image(&mut self, path: &str) {
        self.image = path.to_string();
    }

    fn clear_controls(&mut self) {
        self.controls.clear();
        self.enabled = true;
        self.pressed = None;
    }

    fn add_control(&mut self, label: &str, style: ControlStyle) {
        self.controls.push((label.to_string(), style));
    }

    fn disable_all_controls(&mut self) {
        self.enabled = false;
    }

    fn mark_pressed(&mut self, index: usize) {
        self.pressed = Some(index);
    }

    fn set_progress_visible(&mut self, visible: bool) {
        self.progress_visible = visible;
    }

    fn set_progress(&mut self, progress: Progress) {
        self.progress = Some(progress);
    }

    fn set_overlay_visible(&mut self, visible: bool) {
        self.overlay = visible;
    }

    fn set_letter_mode(&mut self, on: bool) {
        self.letter_mode = on;
    }

    fn flush(&mut self) {
        let screen = self.screen();
        if let Err(e) = self.out.write_all(screen.as_bytes()).and_then(|_| self.out.flush()) {
            tracing::debug!(error = %e, "screen write failed");
        }
    }
}

/// "Plays" sound by ringing the terminal bell; music is a logged loop.
#[derive(Debug, Default)]
pub struct TerminalAudio {
    muted: bool,
    volume: f32,
    playing: bool,
}

impl TerminalAudio {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            volume: 0.0,
            playing: false,
        }
    }
}

impl AudioSurface for TerminalAudio {
    fn background_start(&mut self) -> Result<(), AudioError> {
        if self.muted {
            return Err(AudioError::Blocked("muted".into()));
        }
        self.playing = true;
        tracing::info!(volume = self.volume, "background loop playing");
        Ok(())
    }

    fn background_set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        tracing::debug!(volume = self.volume, playing = self.playing, "background volume");
    }

    fn confirmation_play_from_start(&mut self) -> Result<(), AudioError> {
        if self.muted {
            return Err(AudioError::Blocked("muted".into()));
        }
        tracing::debug!(volume = CONFIRMATION_VOLUME, "click");
        let mut err = std::io::stderr();
        err.write_all(b"\x07")
            .and_then(|_| err.flush())
            .map_err(|e| AudioError::Unavailable(e.to_string()))
    }
}

/// Draws a burst as a single row of glyphs under the screen.
pub struct TerminalFx<W: Write> {
    out: W,
    row: Vec<char>,
}

impl<W: Write> TerminalFx<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            row: vec![' '; WIDTH],
        }
    }

    fn bounds() -> Rect {
        Rect {
            left: 0.0,
            top: 0.0,
            width: WIDTH as f64 * UNITS_PER_COLUMN,
            height: 200.0,
        }
    }
}

impl<W: Write> FxRenderer for TerminalFx<W> {
    fn surface_bounds(&self) -> Option<Rect> {
        Some(Self::bounds())
    }

    fn spawn(&mut self, particle: Particle) -> Result<(), FxError> {
        let col = (particle.x / UNITS_PER_COLUMN).round();
        if !(0.0..WIDTH as f64).contains(&col) {
            return Err(FxError::SpawnFailed(format!("x {} off screen", particle.x)));
        }
        let glyph = match particle.kind {
            ParticleKind::Heart { .. } => '❤',
            ParticleKind::Confetti { .. } => '*',
        };
        self.row[col as usize] = glyph;
        Ok(())
    }

    fn flush(&mut self) {
        let line: String = self.row.iter().collect();
        if let Err(e) = writeln!(self.out, "{}", line.trim_end()) {
            tracing::debug!(error = %e, "burst write failed");
        }
        self.row = vec![' '; WIDTH];
    }
}
