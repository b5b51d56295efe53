//! Decal parameter panel: headless widgets bound to the decal properties.

use std::rc::Rc;

use redlilium_bindings::headless::{
    HeadlessCheckBox, HeadlessEditLine, HeadlessLabel, HeadlessSlider,
};
use redlilium_bindings::widget::{CheckBoxWidget, EditLineWidget, LabelWidget, SliderWidget};
use redlilium_bindings::{Binder, Binding, InstanceAccessor, SharedHistory};

use crate::decal::Decal;
use crate::settings::EditorSettings;

/// Number of discrete slider positions.
pub const SLIDER_STEPS: i32 = 1000;

/// Edit line, slider and readout for one numeric property.
pub struct NumericControls {
    pub binding: Rc<Binding<f32>>,
    pub edit: Rc<HeadlessEditLine>,
    pub slider: Rc<HeadlessSlider>,
    pub readout: Rc<HeadlessLabel>,
}

impl NumericControls {
    fn new(binding: Rc<Binding<f32>>, settings: &EditorSettings) -> Self {
        let (min, max) = settings.range_for(binding.name());
        let controls = Self {
            edit: Rc::new(HeadlessEditLine::new()),
            slider: Rc::new(HeadlessSlider::new(0, SLIDER_STEPS)),
            readout: Rc::new(HeadlessLabel::new()),
            binding,
        };
        controls
            .binding
            .set_range(min, max)
            .attach(controls.edit.clone())
            .attach(controls.slider.clone())
            .attach(controls.readout.clone());
        controls
    }
}

pub struct Panel {
    binder: Binder<Decal>,
    numeric: Vec<NumericControls>,
    visible: Rc<HeadlessCheckBox>,
    label: Rc<HeadlessEditLine>,
}

impl Panel {
    pub fn new(
        history: SharedHistory,
        instance: InstanceAccessor<Decal>,
        settings: &EditorSettings,
    ) -> Self {
        let mut binder = Binder::new(history, instance);

        let width = binder.create("width", Decal::width, Decal::set_width);
        let height = binder.create("height", Decal::height, Decal::set_height);
        let numeric = vec![
            NumericControls::new(width, settings),
            NumericControls::new(height, settings),
        ];

        let visible = Rc::new(HeadlessCheckBox::new());
        binder
            .create_field("visible", |d| &d.visible, |d| &mut d.visible)
            .attach(visible.clone());

        let label = Rc::new(HeadlessEditLine::new());
        binder
            .create_field("label", |d| &d.label, |d| &mut d.label)
            .attach(label.clone());

        log::info!("Panel created with {} bindings", binder.len());
        Self {
            binder,
            numeric,
            visible,
            label,
        }
    }

    /// Pulls every property into its widgets.
    pub fn update(&self) {
        self.binder.update();
    }

    pub fn numeric(&self, name: &str) -> Option<&NumericControls> {
        self.numeric.iter().find(|c| c.binding.name() == name)
    }

    /// Text field editing `name`.
    pub fn edit_line(&self, name: &str) -> Option<&Rc<HeadlessEditLine>> {
        match name {
            "label" => Some(&self.label),
            _ => self.numeric(name).map(|c| &c.edit),
        }
    }

    pub fn check_box(&self, name: &str) -> Option<&Rc<HeadlessCheckBox>> {
        (name == "visible").then_some(&self.visible)
    }

    /// One line per widget, as currently displayed.
    pub fn describe(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .numeric
            .iter()
            .map(|c| {
                format!(
                    "{:<8} [{:>10}] slider {:>4}/{SLIDER_STEPS} = {}",
                    c.binding.name(),
                    c.edit.text(),
                    c.slider.value(),
                    c.readout.text()
                )
            })
            .collect();
        lines.push(format!("{:<8} [{}]", "visible", self.visible.is_checked()));
        lines.push(format!("{:<8} [{}]", "label", self.label.text()));
        lines
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use redlilium_core::abstract_editor::EditActionHistory;

    use super::*;
    use crate::settings::{DecalSettings, PropertyRange};

    fn panel(settings: &EditorSettings) -> (Rc<RefCell<Decal>>, SharedHistory, Panel) {
        let decal = Rc::new(RefCell::new(Decal::from(&settings.decal)));
        let history: SharedHistory = Rc::new(RefCell::new(EditActionHistory::default()));
        let panel = Panel::new(
            history.clone(),
            InstanceAccessor::from_instance(&decal),
            settings,
        );
        panel.update();
        (decal, history, panel)
    }

    #[test]
    fn widgets_show_initial_values() {
        let (_decal, _history, panel) = panel(&EditorSettings::default());

        let width = panel.numeric("width").unwrap();
        assert_eq!(width.edit.text(), "10.000");
        assert_eq!(width.slider.value(), 100);
        assert_eq!(width.readout.text(), "10.000");
        assert!(panel.check_box("visible").unwrap().is_checked());
        assert_eq!(panel.edit_line("label").unwrap().text(), "decal");
        assert_eq!(panel.describe().len(), 4);
    }

    #[test]
    fn slider_uses_configured_range() {
        let settings = EditorSettings {
            property: vec![PropertyRange {
                name: "height".into(),
                min: 0.0,
                max: 50.0,
            }],
            decal: DecalSettings {
                height: 25.0,
                ..DecalSettings::default()
            },
            ..EditorSettings::default()
        };
        let (decal, history, panel) = panel(&settings);

        let height = panel.numeric("height").unwrap();
        assert_eq!(height.slider.value(), 500);

        height.slider.press();
        height.slider.drag_to(1000);
        height.slider.release();
        assert_eq!(decal.borrow().height(), 50.0);
        assert_eq!(history.borrow().len(), 1);
    }

    #[test]
    fn label_and_visibility_are_editable() {
        let (decal, history, panel) = panel(&EditorSettings::default());

        let label = panel.edit_line("label").unwrap();
        label.focus();
        label.type_text("arrow");
        label.press();
        panel.check_box("visible").unwrap().click();

        assert_eq!(decal.borrow().label, "arrow");
        assert!(!decal.borrow().visible);
        assert_eq!(history.borrow().len(), 2);
    }

    #[test]
    fn unknown_names() {
        let (_decal, _history, panel) = panel(&EditorSettings::default());
        assert!(panel.numeric("depth").is_none());
        assert!(panel.edit_line("visible").is_none());
        assert!(panel.check_box("width").is_none());
    }
}
