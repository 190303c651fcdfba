use super::{Setting, SettingError, SettingValue};

const UNNAMED: &str = "Unnamed Feature";

/// A toggleable piece of functionality and its settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    name: Option<String>,
    description: Option<String>,
    enabled: bool,
    settings: Vec<Setting>,
}

impl Feature {
    /// A disabled feature without settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: Some(name.into()), description: None, enabled: false, settings: Vec::new() }
    }

    /// A feature with no name; shown as "Unnamed Feature".
    pub fn unnamed() -> Self {
        Self { name: None, description: None, enabled: false, settings: Vec::new() }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_setting(mut self, name: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.settings.push(Setting::new(name, value));
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(UNNAMED)
    }

    /// Hover text; `None` when the feature has no description.
    pub fn tooltip(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flips the enabled state and returns the new one.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    #[inline]
    pub fn settings(&self) -> &[Setting] {
        &self.settings
    }

    #[inline]
    pub fn settings_mut(&mut self) -> &mut [Setting] {
        &mut self.settings
    }

    pub fn setting(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.name() == name)
    }

    /// Updates the setting called `name`.
    pub fn set_setting(&mut self, name: &str, value: impl Into<SettingValue>) -> Result<(), SettingError> {
        let feature = self.display_name().to_owned();
        match self.settings.iter_mut().find(|s| s.name() == name) {
            Some(setting) => setting.set(value),
            None => Err(SettingError::Unknown { feature, setting: name.to_owned() }),
        }
    }
}

/// Index of a feature in its registry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FeatureId(usize);

/// All features, in registration order.
#[derive(Debug, Default)]
pub struct FeatureRegistry {
    features: Vec<Feature>,
}

impl FeatureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, feature: Feature) -> FeatureId {
        let id = FeatureId(self.features.len());
        log::debug!("registered feature {:?} as {id:?}", feature.display_name());
        self.features.push(feature);
        id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[inline]
    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id.0)
    }

    #[inline]
    pub fn get_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
        self.features.get_mut(id.0)
    }

    /// First feature with this display name.
    pub fn find(&self, name: &str) -> Option<FeatureId> {
        self.features.iter().position(|f| f.display_name() == name).map(FeatureId)
    }

    /// Toggles a feature; returns its new state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: FeatureId) -> Option<bool> {
        let feature = self.features.get_mut(id.0)?;
        let enabled = feature.toggle();
        log::debug!("feature {:?} {}", feature.display_name(), if enabled { "enabled" } else { "disabled" });
        Some(enabled)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, &Feature)> {
        self.features.iter().enumerate().map(|(i, f)| (FeatureId(i), f))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FeatureId, &mut Feature)> {
        self.features.iter_mut().enumerate().map(|(i, f)| (FeatureId(i), f))
    }

    /// Features that are currently enabled.
    pub fn enabled(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter().filter(|f| f.is_enabled())
    }
}
