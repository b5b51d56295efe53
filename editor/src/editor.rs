//! Frame-driven editor session.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use redlilium_bindings::widget::SliderWidget;
use redlilium_bindings::{InstanceAccessor, InstanceSlot, SharedHistory};
use redlilium_core::abstract_editor::EditActionHistory;

use crate::decal::Decal;
use crate::panel::Panel;
use crate::script::{Command, ScriptError, ScriptLine};
use crate::settings::{DecalSettings, EditorSettings};

/// Outcome of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Finished,
}

/// One decal, its parameter panel and the script driving it.
///
/// The decal does not exist until the first frame, the way a scene object
/// appears only after the world has loaded; the panel is built before that
/// and resolves the decal through a slot.
pub struct Editor {
    slot: InstanceSlot<Decal>,
    initial: DecalSettings,
    history: SharedHistory,
    panel: Panel,
    script: VecDeque<ScriptLine>,
    idle_frames: u32,
    frame_number: u64,
}

impl Editor {
    pub fn new(settings: &EditorSettings, script: Vec<ScriptLine>) -> Self {
        let slot: InstanceSlot<Decal> = Rc::new(RefCell::new(None));
        let history: SharedHistory = Rc::new(RefCell::new(EditActionHistory::new(
            settings.history.max_undo,
        )));
        let panel = Panel::new(
            history.clone(),
            InstanceAccessor::from_slot(slot.clone()),
            settings,
        );
        Self {
            slot,
            initial: settings.decal.clone(),
            history,
            panel,
            script: script.into(),
            idle_frames: 0,
            frame_number: 0,
        }
    }

    /// Runs one frame: makes sure the decal exists, refreshes the panel,
    /// then performs at most one scripted command.
    pub fn tick(&mut self) -> Result<FrameStatus, ScriptError> {
        self.frame_number += 1;
        if self.slot.borrow().is_none() {
            let decal = Decal::from(&self.initial);
            log::info!("Frame {}: created decal {decal}", self.frame_number);
            *self.slot.borrow_mut() = Some(Rc::new(RefCell::new(decal)));
        }
        self.panel.update();

        if self.idle_frames > 0 {
            self.idle_frames -= 1;
            return Ok(FrameStatus::Running);
        }
        let Some(ScriptLine { line, command }) = self.script.pop_front() else {
            return Ok(FrameStatus::Finished);
        };
        log::debug!("Frame {}: line {line}: {command:?}", self.frame_number);
        self.execute(line, command)?;
        Ok(FrameStatus::Running)
    }

    fn execute(&mut self, line: usize, command: Command) -> Result<(), ScriptError> {
        let unknown = |property: &str, what: &str| {
            ScriptError::new(line, format!("`{property}` has no {what}"))
        };

        match command {
            Command::Type { property, text } => {
                let edit = self
                    .panel
                    .edit_line(&property)
                    .ok_or_else(|| unknown(&property, "text field"))?;
                edit.focus();
                edit.type_text(&text);
                edit.press();
            }
            Command::Drag {
                property,
                positions,
            } => {
                let controls = self
                    .panel
                    .numeric(&property)
                    .ok_or_else(|| unknown(&property, "slider"))?;
                controls.slider.press();
                for position in positions {
                    controls.slider.drag_to(position);
                }
                controls.slider.release();
            }
            Command::Cancel {
                property,
                positions,
            } => {
                let controls = self
                    .panel
                    .numeric(&property)
                    .ok_or_else(|| unknown(&property, "slider"))?;
                controls.slider.press();
                for position in positions {
                    controls.slider.drag_to(position);
                }
                controls
                    .binding
                    .cancel_updating()
                    .map_err(|e| ScriptError::new(line, e.to_string()))?;
                controls.slider.release();
                log::info!(
                    "Cancelled drag of {property} at position {}",
                    controls.slider.value()
                );
            }
            Command::Toggle { property } => {
                self.panel
                    .check_box(&property)
                    .ok_or_else(|| unknown(&property, "check box"))?
                    .click();
            }
            Command::Undo => {
                self.history
                    .borrow_mut()
                    .undo()
                    .map_err(|e| ScriptError::new(line, e.to_string()))?;
            }
            Command::Redo => {
                self.history
                    .borrow_mut()
                    .redo()
                    .map_err(|e| ScriptError::new(line, e.to_string()))?;
            }
            Command::Tick(frames) => {
                self.idle_frames = frames.saturating_sub(1);
            }
            Command::Save => {
                self.history.borrow_mut().mark_saved();
                log::info!("Saved at history position {}", self.history.borrow().index());
            }
            Command::Print => {
                for text in self.report() {
                    println!("{text}");
                }
            }
        }
        Ok(())
    }

    /// Human-readable state: the decal, the panel widgets and the history.
    pub fn report(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self.decal() {
            Some(decal) => lines.push(format!("frame {}: {decal}", self.frame_number)),
            None => lines.push(format!("frame {}: no decal", self.frame_number)),
        }
        lines.extend(self.panel.describe().into_iter().map(|l| format!("  {l}")));

        let history = self.history.borrow();
        lines.push(format!(
            "  history  {}/{} (undo: {}, redo: {}){}",
            history.index(),
            history.len(),
            history.undo_count(),
            history.redo_count(),
            if history.has_unsaved_changes() { " *" } else { "" }
        ));
        if let Some(next) = history.undo_descriptions().next() {
            lines.push(format!("  next undo: {next}"));
        }
        lines
    }

    /// Snapshot of the edited decal, once it exists.
    pub fn decal(&self) -> Option<Decal> {
        self.slot.borrow().as_ref().map(|d| d.borrow().clone())
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{DEFAULT_SCRIPT, parse_script};

    fn editor(source: &str) -> Editor {
        Editor::new(&EditorSettings::default(), parse_script(source).unwrap())
    }

    fn run(editor: &mut Editor) {
        while editor.tick().unwrap() == FrameStatus::Running {}
    }

    #[test]
    fn decal_appears_on_first_frame() {
        let mut editor = editor("");
        assert!(editor.decal().is_none());
        assert_eq!(editor.tick().unwrap(), FrameStatus::Finished);
        assert_eq!(editor.decal().unwrap().width(), 10.0);
        assert_eq!(editor.frame_number(), 1);
    }

    #[test]
    fn default_script_ends_on_redone_drag() {
        let mut editor = editor(DEFAULT_SCRIPT);
        run(&mut editor);

        let decal = editor.decal().unwrap();
        assert!((decal.width() - 12.0).abs() < 1e-4);
        let history = editor.history().borrow();
        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 2);
        assert!(history.has_unsaved_changes());
    }

    #[test]
    fn cancel_leaves_no_trace() {
        let mut editor = editor("cancel height 900 950\n");
        run(&mut editor);

        assert_eq!(editor.decal().unwrap().height(), 10.0);
        assert!(editor.history().borrow().is_empty());
    }

    #[test]
    fn tick_waits_frames() {
        let mut editor = editor("tick 3\ntoggle visible\n");
        for _ in 0..3 {
            editor.tick().unwrap();
            assert!(editor.decal().unwrap().visible);
        }
        editor.tick().unwrap();
        assert!(!editor.decal().unwrap().visible);
        assert_eq!(editor.tick().unwrap(), FrameStatus::Finished);
    }

    #[test]
    fn save_tracks_unsaved_changes() {
        let mut editor = editor("type width 30\nsave\nundo\n");
        editor.tick().unwrap();
        editor.tick().unwrap();
        assert!(!editor.history().borrow().has_unsaved_changes());
        editor.tick().unwrap();
        assert!(editor.history().borrow().has_unsaved_changes());
    }

    #[test]
    fn unknown_property_reports_line() {
        let mut editor = editor("print\n\ndrag depth 10\n");
        editor.tick().unwrap();
        let err = editor.tick().unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.message, "`depth` has no slider");
    }

    #[test]
    fn report_lists_history() {
        let mut editor = editor("type label sign\n");
        run(&mut editor);
        let report = editor.report();
        assert!(report[0].contains("\"sign\""));
        assert!(report.iter().any(|l| l.contains("history  1/1")));
        assert!(report.iter().any(|l| l == "  next undo: Set label"));
    }
}
