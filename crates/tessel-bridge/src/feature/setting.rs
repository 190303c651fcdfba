use std::fmt;

use crate::paint::Color;

// ── SettingKind ───────────────────────────────────────────────────────────

/// Editor widget used for a setting.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SettingKind {
    Checkbox,
    SliderFloat { min: f32, max: f32 },
    InputInt,
    ColorEdit4,
}

// ── SettingValue ──────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SettingValue {
    Bool(bool),
    Int(i32),
    /// Edited with a `[0, 1]` slider.
    Float(f32),
    /// Straight-alpha RGBA.
    Color(Color),
}

impl SettingValue {
    pub fn kind(&self) -> SettingKind {
        match self {
            SettingValue::Bool(_) => SettingKind::Checkbox,
            SettingValue::Int(_) => SettingKind::InputInt,
            SettingValue::Float(_) => SettingKind::SliderFloat { min: 0.0, max: 1.0 },
            SettingValue::Color(_) => SettingKind::ColorEdit4,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            SettingValue::Bool(_) => "bool",
            SettingValue::Int(_) => "int",
            SettingValue::Float(_) => "float",
            SettingValue::Color(_) => "color",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            SettingValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            SettingValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            SettingValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Brings the value into the range its editor allows.
    fn clamped(self) -> Self {
        match (self, self.kind()) {
            (SettingValue::Float(v), SettingKind::SliderFloat { min, max }) => {
                SettingValue::Float(v.clamp(min, max))
            }
            (SettingValue::Color(c), _) => SettingValue::Color(Color::rgba(
                c.r.clamp(0.0, 1.0),
                c.g.clamp(0.0, 1.0),
                c.b.clamp(0.0, 1.0),
                c.a.clamp(0.0, 1.0),
            )),
            (v, _) => v,
        }
    }

    fn same_variant(&self, other: &SettingValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl From<bool> for SettingValue {
    fn from(v: bool) -> Self {
        SettingValue::Bool(v)
    }
}

impl From<i32> for SettingValue {
    fn from(v: i32) -> Self {
        SettingValue::Int(v)
    }
}

impl From<f32> for SettingValue {
    fn from(v: f32) -> Self {
        SettingValue::Float(v)
    }
}

impl From<Color> for SettingValue {
    fn from(c: Color) -> Self {
        SettingValue::Color(c)
    }
}

// ── SettingError ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum SettingError {
    /// The new value has a different type than the setting.
    TypeMismatch { setting: String, expected: &'static str, found: &'static str },
    /// No setting with this name on the feature.
    Unknown { feature: String, setting: String },
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::TypeMismatch { setting, expected, found } => {
                write!(f, "setting `{setting}` holds {expected}, got {found}")
            }
            SettingError::Unknown { feature, setting } => {
                write!(f, "feature `{feature}` has no setting `{setting}`")
            }
        }
    }
}

impl std::error::Error for SettingError {}

// ── Setting ───────────────────────────────────────────────────────────────

/// A named value whose type is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    name: String,
    value: SettingValue,
}

impl Setting {
    pub fn new(name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        Self { name: name.into(), value: value.into().clamped() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> SettingValue {
        self.value
    }

    #[inline]
    pub fn kind(&self) -> SettingKind {
        self.value.kind()
    }

    /// Replaces the value, clamped to the editor's range. Changing the type
    /// is rejected and leaves the old value in place.
    pub fn set(&mut self, value: impl Into<SettingValue>) -> Result<(), SettingError> {
        let value = value.into();
        if !self.value.same_variant(&value) {
            return Err(SettingError::TypeMismatch {
                setting: self.name.clone(),
                expected: self.value.type_name(),
                found: value.type_name(),
            });
        }
        self.value = value.clamped();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_value_type() {
        assert_eq!(SettingValue::Bool(true).kind(), SettingKind::Checkbox);
        assert_eq!(SettingValue::Int(3).kind(), SettingKind::InputInt);
        assert_eq!(SettingValue::Float(0.5).kind(), SettingKind::SliderFloat { min: 0.0, max: 1.0 });
        assert_eq!(SettingValue::Color(Color::WHITE).kind(), SettingKind::ColorEdit4);
    }

    #[test]
    fn set_keeps_type() {
        let mut s = Setting::new("Opacity", 0.5_f32);
        let err = s.set(true).unwrap_err();
        assert_eq!(
            err,
            SettingError::TypeMismatch { setting: "Opacity".into(), expected: "float", found: "bool" }
        );
        assert_eq!(s.value(), SettingValue::Float(0.5));

        s.set(0.25_f32).unwrap();
        assert_eq!(s.value().as_float(), Some(0.25));
    }

    #[test]
    fn float_is_clamped_to_slider_range() {
        let mut s = Setting::new("Opacity", 2.0_f32);
        assert_eq!(s.value().as_float(), Some(1.0));
        s.set(-1.0_f32).unwrap();
        assert_eq!(s.value().as_float(), Some(0.0));
    }

    #[test]
    fn ints_are_not_clamped() {
        let mut s = Setting::new("Radius", 4_i32);
        s.set(-300_i32).unwrap();
        assert_eq!(s.value().as_int(), Some(-300));
    }

    #[test]
    fn color_channels_are_clamped() {
        let s = Setting::new("Tint", Color::rgba(1.5, 0.5, -0.2, 1.0));
        assert_eq!(s.value().as_color(), Some(Color::rgba(1.0, 0.5, 0.0, 1.0)));
    }

    #[test]
    fn accessors_reject_other_types() {
        let v = SettingValue::Bool(true);
        assert_eq!(v.as_bool(), Some(true));
        assert_eq!(v.as_int(), None);
        assert_eq!(v.as_float(), None);
        assert_eq!(v.as_color(), None);
    }

    #[test]
    fn error_messages_name_the_setting() {
        let err = SettingError::Unknown { feature: "Zoom".into(), setting: "Speed".into() };
        assert_eq!(err.to_string(), "feature `Zoom` has no setting `Speed`");
    }
}
