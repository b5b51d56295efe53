//! Property value traits: comparison, text conversion and slider mapping.
//!
//! Every bound property type implements [`PropertyValue`], which decides
//! whether two values are "the same" for the purpose of no-op detection and
//! transaction modification checks. Floating-point types compare with a
//! relative tolerance, everything else compares exactly. Text input never
//! produces a non-finite float.

use std::fmt;

/// Tolerance used by [`PropertyValue::same_value`] for `f32`.
pub const F32_EPSILON: f32 = 1e-6;

/// Tolerance used by [`PropertyValue::same_value`] for `f64`.
pub const F64_EPSILON: f64 = 1e-9;

/// A value type that can be edited through a binding.
pub trait PropertyValue: Clone + fmt::Debug + 'static {
    /// Returns `true` if `self` and `other` are equal under this type's
    /// comparison rule.
    fn same_value(&self, other: &Self) -> bool;
}

/// A value that can be shown and typed in a text field.
pub trait TextValue: PropertyValue {
    /// Parses user-entered text. Returns `None` when the text is not a
    /// valid value.
    fn parse_text(text: &str) -> Option<Self>;

    /// Formats the value for display.
    fn format_text(&self) -> String;
}

/// A numeric value that can be driven by a slider.
pub trait SliderValue: PropertyValue {
    fn to_f64(&self) -> f64;
    fn from_f64(value: f64) -> Self;
}

macro_rules! exact_property_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                fn same_value(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

exact_property_value!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize, bool, char, String);

impl PropertyValue for f32 {
    fn same_value(&self, other: &Self) -> bool {
        if self == other || (self.is_nan() && other.is_nan()) {
            return true;
        }
        if !self.is_finite() || !other.is_finite() {
            return false;
        }
        (self - other).abs() <= F32_EPSILON * (self.abs() + other.abs() + 1.0)
    }
}

impl PropertyValue for f64 {
    fn same_value(&self, other: &Self) -> bool {
        if self == other || (self.is_nan() && other.is_nan()) {
            return true;
        }
        if !self.is_finite() || !other.is_finite() {
            return false;
        }
        (self - other).abs() <= F64_EPSILON * (self.abs() + other.abs() + 1.0)
    }
}

impl TextValue for f32 {
    fn parse_text(text: &str) -> Option<Self> {
        text.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite())
    }

    fn format_text(&self) -> String {
        format!("{self:.3}")
    }
}

impl TextValue for f64 {
    fn parse_text(text: &str) -> Option<Self> {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    fn format_text(&self) -> String {
        format!("{self:.3}")
    }
}

impl TextValue for i32 {
    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn format_text(&self) -> String {
        self.to_string()
    }
}

impl TextValue for bool {
    fn parse_text(text: &str) -> Option<Self> {
        text.trim().parse().ok()
    }

    fn format_text(&self) -> String {
        self.to_string()
    }
}

impl TextValue for String {
    fn parse_text(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }

    fn format_text(&self) -> String {
        self.clone()
    }
}

impl SliderValue for f32 {
    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl SliderValue for f64 {
    fn to_f64(&self) -> f64 {
        *self
    }

    fn from_f64(value: f64) -> Self {
        value
    }
}

impl SliderValue for i32 {
    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn from_f64(value: f64) -> Self {
        value.round() as i32
    }
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Position of `v` within `[a, b]` as a fraction. A degenerate range maps
/// to `0.0`.
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> f64 {
    if a == b { 0.0 } else { (v - a) / (b - a) }
}

/// Maps `v` from `[in_min, in_max]` to `[out_min, out_max]`.
pub fn remap(in_min: f64, in_max: f64, out_min: f64, out_max: f64, v: f64) -> f64 {
    lerp(out_min, out_max, inverse_lerp(in_min, in_max, v))
}
