use std::fmt;
use std::sync::Arc;

/// Stable name of a host resource (e.g. `"imgui_font"`).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceLocation(Arc<str>);

impl ResourceLocation {
    pub fn new(path: impl Into<Arc<str>>) -> Self {
        Self(path.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a host material (shader + fixed render state).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct MaterialId(Arc<str>);

impl MaterialId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque renderable texture handed out by the host.
///
/// `id` is assigned by the host and changes whenever the resource behind
/// `location` is re-created, so a handle taken before a re-upload compares
/// unequal to one taken after it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle {
    id: u64,
    location: ResourceLocation,
}

impl TextureHandle {
    pub fn new(id: u64, location: ResourceLocation) -> Self {
        Self { id, location }
    }

    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn location(&self) -> &ResourceLocation {
        &self.location
    }
}
