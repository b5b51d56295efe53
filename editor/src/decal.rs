//! The edited object.

use std::fmt;

use crate::settings::DecalSettings;

/// A projected decal, reduced to the parameters the panel edits.
#[derive(Debug, Clone, PartialEq)]
pub struct Decal {
    width: f32,
    height: f32,
    pub visible: bool,
    pub label: String,
}

impl Decal {
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Negative sizes are clamped to zero.
    pub fn set_width(&mut self, width: f32) {
        self.width = width.max(0.0);
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(0.0);
    }
}

impl From<&DecalSettings> for Decal {
    fn from(settings: &DecalSettings) -> Self {
        let mut decal = Self {
            width: 0.0,
            height: 0.0,
            visible: settings.visible,
            label: settings.label.clone(),
        };
        decal.set_width(settings.width);
        decal.set_height(settings.height);
        decal
    }
}

impl fmt::Display for Decal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}: {:.3} x {:.3}{}",
            self.label,
            self.width,
            self.height,
            if self.visible { "" } else { " (hidden)" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_are_never_negative() {
        let mut decal = Decal::from(&DecalSettings {
            width: -1.0,
            ..DecalSettings::default()
        });
        assert_eq!(decal.width(), 0.0);
        decal.set_height(-5.0);
        assert_eq!(decal.height(), 0.0);
    }

    #[test]
    fn display() {
        let mut decal = Decal::from(&DecalSettings::default());
        assert_eq!(decal.to_string(), "\"decal\": 10.000 x 10.000");
        decal.visible = false;
        assert!(decal.to_string().ends_with("(hidden)"));
    }
}
