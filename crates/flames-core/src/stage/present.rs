//! Presentation commands and the surface that consumes them.

use serde::{Deserialize, Serialize};

use crate::quiz::Progress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlStyle {
    Primary,
    Secondary,
}

/// What a control does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlAction {
    Start,
    NotYet,
    Answer(usize),
    Continue,
    Accept,
    Retake,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Control {
    pub label: String,
    pub style: ControlStyle,
    pub action: ControlAction,
}

impl Control {
    pub fn new(label: impl Into<String>, style: ControlStyle, action: ControlAction) -> Self {
        Self {
            label: label.into(),
            style,
            action,
        }
    }
}

/// One instruction for the presentation surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum Command {
    SetTitle { text: String },
    SetSubtitle { text: String },
    SetBodyPlain { text: String },
    /// Lines revealed one by one, line `i` at `base_delay_ms + i * step_ms`.
    SetBodyLines {
        lines: Vec<String>,
        base_delay_ms: u32,
        step_ms: u32,
    },
    SetImage { path: String },
    ClearControls,
    AddControl { control: Control },
    DisableAllControls,
    /// Visually mark the control at `index` as pressed.
    MarkPressed { index: usize },
    SetProgressVisible { visible: bool },
    SetProgress { progress: Progress },
    SetOverlayVisible { visible: bool },
    SetLetterMode { on: bool },
}

/// The rendering surface. Controls are addressed by their position in the
/// order they were added since the last `clear_controls`.
pub trait Presenter {
    fn set_title(&mut self, text: &str);
    fn set_subtitle(&mut self, text: &str);
    fn set_body_plain(&mut self, text: &str);
    fn set_body_lines(&mut self, lines: &[String], base_delay_ms: u32, step_ms: u32);
    fn set_image(&mut self, path: &str);
    fn clear_controls(&mut self);
    fn add_control(&mut self, label: &str, style: ControlStyle);
    fn disable_all_controls(&mut self);
    fn mark_pressed(&mut self, index: usize);
    fn set_progress_visible(&mut self, visible: bool);
    fn set_progress(&mut self, progress: Progress);
    fn set_overlay_visible(&mut self, visible: bool);
    fn set_letter_mode(&mut self, on: bool);

    /// End of a batch of commands.
    fn flush(&mut self) {}

    fn apply(&mut self, command: &Command) {
        match command {
            Command::SetTitle { text } => self.set_title(text),
            Command::SetSubtitle { text } => self.set_subtitle(text),
            Command::SetBodyPlain { text } => self.set_body_plain(text),
            Command::SetBodyLines {
                lines,
                base_delay_ms,
                step_ms,
            } => self.set_body_lines(lines, *base_delay_ms, *step_ms),
            Command::SetImage { path } => self.set_image(path),
            Command::ClearControls => self.clear_controls(),
            Command::AddControl { control } => self.add_control(&control.label, control.style),
            Command::DisableAllControls => self.disable_all_controls(),
            Command::MarkPressed { index } => self.mark_pressed(*index),
            Command::SetProgressVisible { visible } => self.set_progress_visible(*visible),
            Command::SetProgress { progress } => self.set_progress(*progress),
            Command::SetOverlayVisible { visible } => self.set_overlay_visible(*visible),
            Command::SetLetterMode { on } => self.set_letter_mode(*on),
        }
    }
}
