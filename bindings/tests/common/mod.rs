//! Shared fixtures for binding integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use redlilium_bindings::headless::{HeadlessEditLine, HeadlessLabel, HeadlessSlider};
use redlilium_bindings::{Binder, Binding, InstanceAccessor, InstanceRef, SharedHistory};
use redlilium_core::abstract_editor::EditActionHistory;

/// Widget range used by every test slider.
pub const SLIDER_MAX: i32 = 1000;

/// Logical range the width slider is mapped onto.
pub const WIDTH_RANGE: (f64, f64) = (0.0, 100.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Decal {
    pub width: f32,
}

/// A decal with a width edit line, a width slider and a readout label,
/// all attached to one binding.
pub struct TestPanel {
    pub decal: InstanceRef<Decal>,
    pub binder: Binder<Decal>,
    pub width: Rc<Binding<f32>>,
    pub edit: Rc<HeadlessEditLine>,
    pub slider: Rc<HeadlessSlider>,
    pub label: Rc<HeadlessLabel>,
}

impl TestPanel {
    pub fn new(width: f32) -> Self {
        let _ = env_logger::builder()
            .filter_level(log::LevelFilter::Debug)
            .is_test(true)
            .try_init();

        let decal = Rc::new(RefCell::new(Decal { width }));
        let history: SharedHistory = Rc::new(RefCell::new(EditActionHistory::default()));
        let mut binder = Binder::new(history, InstanceAccessor::from_instance(&decal));

        let edit = Rc::new(HeadlessEditLine::new());
        let slider = Rc::new(HeadlessSlider::new(0, SLIDER_MAX));
        let label = Rc::new(HeadlessLabel::new());
        let width = binder.create_field("width", |d| &d.width, |d| &mut d.width);
        width
            .set_range(WIDTH_RANGE.0, WIDTH_RANGE.1)
            .attach(edit.clone())
            .attach(slider.clone())
            .attach(label.clone());
        binder.update();

        Self {
            decal,
            binder,
            width,
            edit,
            slider,
            label,
        }
    }

    pub fn value(&self) -> f32 {
        self.decal.borrow().width
    }

    pub fn history_len(&self) -> usize {
        self.binder.history().borrow().len()
    }

    pub fn undo(&self) {
        self.binder.history().borrow_mut().undo().unwrap();
        self.binder.update();
    }

    pub fn redo(&self) {
        self.binder.history().borrow_mut().redo().unwrap();
        self.binder.update();
    }

    /// Focuses the edit line, types `text` and presses Enter.
    pub fn type_and_commit(&self, text: &str) {
        self.edit.focus();
        self.edit.type_text(text);
        self.edit.press();
        self.binder.update();
    }

    /// Presses the slider, drags through `positions` and releases it.
    pub fn drag(&self, positions: &[i32]) {
        self.slider.press();
        for &position in positions {
            self.slider.drag_to(position);
        }
        self.slider.release();
        self.binder.update();
    }
}

pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}
