//! Feature toggles with typed settings, and the screen gate that decides
//! when the overlay may be shown.
//!
//! Features are plain data: the application registers them once and the
//! settings panel edits them through [`SettingValue::kind`], which names the
//! editor widget each value type uses.

mod registry;
mod screen;
mod setting;

pub use registry::{Feature, FeatureId, FeatureRegistry};
pub use screen::ScreenGate;
pub use setting::{Setting, SettingError, SettingKind, SettingValue};
