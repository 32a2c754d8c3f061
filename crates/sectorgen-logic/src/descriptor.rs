//! JSON region descriptors.
//!
//! ```json
//! {
//!     "Size": "Domain",
//!     "Name": "Radio Club",
//!     "Origin": [0, 0],
//!     "Density": ["Rift", "Sparse", "Standard", ["Dense", ...]],
//!     "Maturity": "Standard",
//!     "Tech cap": [12, 13, 14, null],
//!     "Subspace names": ["Spring", "Summer", "Autumn", ["Winter", [...]]]
//! }
//! ```
//!
//! Every key except `"Name"` is optional. The per-class entry points ignore
//! `"Size"`; [`space_from_descriptor`] dispatches on it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::space::{ConfigError, Density, Layered, RegionOverrides, SizeClass, SpaceNode, SubspaceName};
use crate::world::Maturity;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed descriptor: {0}")]
    Json(#[from] serde_json::Error),
    #[error("descriptor has no \"Size\"")]
    MissingSize,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDescriptor {
    #[serde(rename = "Size", default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Origin", default)]
    pub origin: (u32, u32),
    #[serde(rename = "Density", default)]
    pub density: Layered<Density>,
    #[serde(rename = "Maturity", default)]
    pub maturity: Layered<Maturity>,
    #[serde(rename = "Tech cap", default)]
    pub tech_cap: Layered<Option<u8>>,
    #[serde(rename = "Subspace names", default)]
    pub subspace_names: Vec<SubspaceName>,
}

impl SpaceDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            size: None,
            name: name.into(),
            origin: (0, 0),
            density: Layered::default(),
            maturity: Layered::default(),
            tech_cap: Layered::default(),
            subspace_names: Vec::new(),
        }
    }

    pub fn overrides(&self) -> RegionOverrides {
        RegionOverrides {
            density: self.density.clone(),
            maturity: self.maturity.clone(),
            tech_cap: self.tech_cap.clone(),
        }
    }

    /// The declared size class, if any.
    pub fn size_class(&self) -> Result<Option<SizeClass>, ConfigError> {
        self.size.as_deref().map(str::parse::<SizeClass>).transpose()
    }

    fn build(&self, class: SizeClass) -> Result<SpaceNode, ConfigError> {
        class.build(
            self.name.as_str(),
            self.origin,
            &self.overrides(),
            &self.subspace_names,
        )
    }
}

pub fn subsector_from(descriptor: &SpaceDescriptor) -> Result<SpaceNode, ConfigError> {
    descriptor.build(SizeClass::Subsector)
}

pub fn quadrant_from(descriptor: &SpaceDescriptor) -> Result<SpaceNode, ConfigError> {
    descriptor.build(SizeClass::Quadrant)
}

pub fn sector_from(descriptor: &SpaceDescriptor) -> Result<SpaceNode, ConfigError> {
    descriptor.build(SizeClass::Sector)
}

pub fn domain_from(descriptor: &SpaceDescriptor) -> Result<SpaceNode, ConfigError> {
    descriptor.build(SizeClass::Domain)
}

/// Build whatever class the descriptor declares.
pub fn space_from_descriptor(descriptor: &SpaceDescriptor) -> Result<SpaceNode, DescriptorError> {
    let class = descriptor.size_class()?.ok_or(DescriptorError::MissingSize)?;
    tracing::debug!("building {class} '{}'", descriptor.name);
    Ok(descriptor.build(class)?)
}

pub fn space_from_json(json: &str) -> Result<SpaceNode, DescriptorError> {
    let descriptor: SpaceDescriptor = serde_json::from_str(json)?;
    space_from_descriptor(&descriptor)
}
