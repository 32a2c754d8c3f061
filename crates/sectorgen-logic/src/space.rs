//! Map regions — hex grids of star systems and the containers that tile them.
//!
//! A [`SpaceNode`] is either a [`Space`] (one rectangular grid of hexes)
//! or a [`ContainerSpace`] (a `base × base` tiling of child nodes). The
//! named size classes sit on top:
//!
//! | Class     | Shape                       | Hexes   |
//! |-----------|-----------------------------|---------|
//! | Subsector | grid                        | 8 × 10  |
//! | Quadrant  | 2 × 2 subsectors            | 16 × 20 |
//! | Sector    | 4 × 4 subsectors            | 32 × 40 |
//! | Domain    | 2 × 2 sectors               | 64 × 80 |
//!
//! Containers validate their per-cell overrides and subspace names when
//! they are built; generation itself cannot fail.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{grid, presence, SUBSPACE_LABELS};
use crate::dice::Dice;
use crate::system::StarSystem;
use crate::world::{Development, Maturity, WorldGenerator};

// ── Errors ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("'{space}': {field} needs 1 or {expected} entries, got {found}")]
    OverrideCount {
        space: String,
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("'{space}': expected {expected} subspace names, got {found}")]
    NameCount {
        space: String,
        expected: usize,
        found: usize,
    },
    #[error("container base {0} is unsupported (1 to 4)")]
    UnsupportedBase(u32),
    #[error("unknown size class '{0}'")]
    UnknownSizeClass(String),
    #[error("'{space}': {field} is a per-cell list but '{space}' is a single grid")]
    NestedOverrideOnGrid { space: String, field: &'static str },
    #[error("'{space}': a single grid has no subspaces to name")]
    NestedNamesOnGrid { space: String },
}

// ── Region overrides ───────────────────────────────────────────────────

/// How crowded a region is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Density {
    Rift,
    Sparse,
    #[default]
    Standard,
    Dense,
}

impl Density {
    pub fn modifier(self) -> i32 {
        match self {
            Density::Rift => -2,
            Density::Sparse => -1,
            Density::Standard => 0,
            Density::Dense => 1,
        }
    }

    /// Whether a presence roll places a system in the hex.
    pub fn admits(self, roll: i32) -> bool {
        roll + self.modifier() >= presence::THRESHOLD
    }
}

/// A value for a whole region, or one entry per cell of a container.
/// Entries may themselves be per-cell, one level of container deeper.
///
/// Deserializes from a bare value or a (nested) list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Layered<T> {
    Uniform(T),
    PerCell(Vec<Layered<T>>),
}

impl<T: Default> Default for Layered<T> {
    fn default() -> Self {
        Layered::Uniform(T::default())
    }
}

impl<T> From<T> for Layered<T> {
    fn from(value: T) -> Self {
        Layered::Uniform(value)
    }
}

impl<T: Clone> Layered<T> {
    /// Spread over `count` cells. A single entry is broadcast.
    fn cells(&self, count: usize, space: &str, field: &'static str) -> Result<Vec<Self>, ConfigError> {
        match self {
            Layered::Uniform(_) => Ok(vec![self.clone(); count]),
            Layered::PerCell(list) if list.len() == 1 => Ok(vec![list[0].clone(); count]),
            Layered::PerCell(list) if list.len() == count => Ok(list.clone()),
            Layered::PerCell(list) => Err(ConfigError::OverrideCount {
                space: space.to_string(),
                field,
                expected: count,
                found: list.len(),
            }),
        }
    }

    /// The single value for a grid.
    fn single(&self, space: &str, field: &'static str) -> Result<T, ConfigError> {
        match self {
            Layered::Uniform(value) => Ok(value.clone()),
            Layered::PerCell(list) if list.len() == 1 => list[0].single(space, field),
            Layered::PerCell(_) => Err(ConfigError::NestedOverrideOnGrid {
                space: space.to_string(),
                field,
            }),
        }
    }
}

/// Density, maturity and tech cap for a region.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegionOverrides {
    pub density: Layered<Density>,
    pub maturity: Layered<Maturity>,
    pub tech_cap: Layered<Option<u8>>,
}

impl RegionOverrides {
    fn cells(&self, count: usize, space: &str) -> Result<Vec<RegionOverrides>, ConfigError> {
        let density = self.density.cells(count, space, "density")?;
        let maturity = self.maturity.cells(count, space, "maturity")?;
        let tech_cap = self.tech_cap.cells(count, space, "tech cap")?;
        Ok(density
            .into_iter()
            .zip(maturity)
            .zip(tech_cap)
            .map(|((density, maturity), tech_cap)| RegionOverrides {
                density,
                maturity,
                tech_cap,
            })
            .collect())
    }

    fn resolve(&self, space: &str) -> Result<(Density, Development), ConfigError> {
        let density = self.density.single(space, "density")?;
        let maturity = self.maturity.single(space, "maturity")?;
        let tech_cap = self.tech_cap.single(space, "tech cap")?;
        Ok((density, Development::new(maturity, tech_cap)))
    }
}

/// A subspace name, optionally with names for its own subspaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubspaceName {
    Plain(String),
    Nested(String, Vec<SubspaceName>),
}

impl SubspaceName {
    pub fn name(&self) -> &str {
        match self {
            SubspaceName::Plain(name) | SubspaceName::Nested(name, _) => name,
        }
    }

    pub fn children(&self) -> &[SubspaceName] {
        match self {
            SubspaceName::Plain(_) => &[],
            SubspaceName::Nested(_, children) => children,
        }
    }
}

impl From<&str> for SubspaceName {
    fn from(name: &str) -> Self {
        SubspaceName::Plain(name.to_string())
    }
}

// ── Size classes ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Subsector,
    Quadrant,
    Sector,
    Domain,
}

impl SizeClass {
    /// (rows, columns) in hexes.
    pub fn extent(self) -> (u32, u32) {
        let (rows, columns) = (grid::SUBSECTOR_ROWS, grid::SUBSECTOR_COLUMNS);
        match self {
            SizeClass::Subsector => (rows, columns),
            SizeClass::Quadrant => (rows * grid::QUADRANT_BASE, columns * grid::QUADRANT_BASE),
            SizeClass::Sector => (rows * grid::SECTOR_BASE, columns * grid::SECTOR_BASE),
            SizeClass::Domain => (
                rows * grid::SECTOR_BASE * grid::DOMAIN_BASE,
                columns * grid::SECTOR_BASE * grid::DOMAIN_BASE,
            ),
        }
    }

    /// Cells per side, `None` for a plain grid.
    pub fn base(self) -> Option<u32> {
        match self {
            SizeClass::Subsector => None,
            SizeClass::Quadrant => Some(grid::QUADRANT_BASE),
            SizeClass::Sector => Some(grid::SECTOR_BASE),
            SizeClass::Domain => Some(grid::DOMAIN_BASE),
        }
    }

    /// What a container of this class is tiled with.
    pub fn child(self) -> Option<SizeClass> {
        match self {
            SizeClass::Subsector => None,
            SizeClass::Quadrant | SizeClass::Sector => Some(SizeClass::Subsector),
            SizeClass::Domain => Some(SizeClass::Sector),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SizeClass::Subsector => "Subsector",
            SizeClass::Quadrant => "Quadrant",
            SizeClass::Sector => "Sector",
            SizeClass::Domain => "Domain",
        }
    }

    /// Build an ungenerated region of this class.
    pub fn build(
        self,
        name: impl Into<String>,
        origin: (u32, u32),
        overrides: &RegionOverrides,
        names: &[SubspaceName],
    ) -> Result<SpaceNode, ConfigError> {
        let name = name.into();
        match (self.base(), self.child()) {
            (Some(base), Some(child)) => ContainerSpace::build(
                name,
                Some(self),
                base,
                child,
                origin,
                overrides,
                names,
            )
            .map(SpaceNode::Container),
            _ => {
                if !names.is_empty() {
                    return Err(ConfigError::NestedNamesOnGrid { space: name });
                }
                let (density, development) = overrides.resolve(&name)?;
                let mut space = Space::new(name, self.extent(), origin)
                    .with_density(density)
                    .with_development(development);
                space.kind = Some(self);
                Ok(SpaceNode::Grid(space))
            }
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SizeClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subsector" => Ok(SizeClass::Subsector),
            "quadrant" => Ok(SizeClass::Quadrant),
            "sector" => Ok(SizeClass::Sector),
            "domain" => Ok(SizeClass::Domain),
            _ => Err(ConfigError::UnknownSizeClass(s.to_string())),
        }
    }
}

// ── Grid ───────────────────────────────────────────────────────────────

/// One rectangular grid of hexes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Space {
    name: String,
    kind: Option<SizeClass>,
    rows: u32,
    columns: u32,
    origin: (u32, u32),
    density: Density,
    development: Development,
    systems: Vec<StarSystem>,
}

impl Space {
    /// A headerless grid of `size` = (rows, columns).
    pub fn new(name: impl Into<String>, size: (u32, u32), origin: (u32, u32)) -> Self {
        Self {
            name: name.into(),
            kind: None,
            rows: size.0,
            columns: size.1,
            origin,
            density: Density::default(),
            development: Development::default(),
            systems: Vec::new(),
        }
    }

    /// An 8 × 10 subsector with standard density.
    pub fn subsector(name: impl Into<String>, origin: (u32, u32)) -> Self {
        let mut space = Self::new(name, SizeClass::Subsector.extent(), origin);
        space.kind = Some(SizeClass::Subsector);
        space
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
        self
    }

    pub fn with_development(mut self, development: Development) -> Self {
        self.development = development;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<SizeClass> {
        self.kind
    }

    /// (rows, columns).
    pub fn size(&self) -> (u32, u32) {
        (self.rows, self.columns)
    }

    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn development(&self) -> &Development {
        &self.development
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    /// Roll every hex in row-major order, replacing any previous systems.
    pub fn generate(&mut self, dice: &mut impl Dice, worlds: &WorldGenerator) {
        self.systems.clear();
        for row in 1..=self.rows {
            for column in 1..=self.columns {
                if !self.density.admits(dice.roll(1, 6)) {
                    continue;
                }
                let name = format!("{} {}", self.name, self.systems.len() + 1);
                let coordinates = (self.origin.0 + row, self.origin.1 + column);
                let system =
                    StarSystem::generate(name, coordinates, dice, worlds, &self.development);
                self.systems.push(system);
            }
        }
        tracing::debug!(
            "{} '{}': {} systems in {} hexes",
            self.kind.map_or("Grid", SizeClass::label),
            self.name,
            self.systems.len(),
            self.rows * self.columns
        );
    }

    pub fn to_text(&self) -> String {
        let mut out = header(self.kind, &self.name, self.origin);
        for system in &self.systems {
            out.push_str(&system.to_line());
            out.push('\n');
        }
        out
    }
}

// ── Container ──────────────────────────────────────────────────────────

/// A `base × base` tiling of child regions, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerSpace {
    name: String,
    kind: Option<SizeClass>,
    base: u32,
    origin: (u32, u32),
    subspaces: Vec<SpaceNode>,
}

impl ContainerSpace {
    /// A headerless container of `base × base` subsectors.
    pub fn of_subsectors(
        name: impl Into<String>,
        base: u32,
        origin: (u32, u32),
        overrides: &RegionOverrides,
        names: &[SubspaceName],
    ) -> Result<Self, ConfigError> {
        Self::build(name.into(), None, base, SizeClass::Subsector, origin, overrides, names)
    }

    /// A headerless container of `base × base` sectors.
    pub fn of_sectors(
        name: impl Into<String>,
        base: u32,
        origin: (u32, u32),
        overrides: &RegionOverrides,
        names: &[SubspaceName],
    ) -> Result<Self, ConfigError> {
        Self::build(name.into(), None, base, SizeClass::Sector, origin, overrides, names)
    }

    fn build(
        name: String,
        kind: Option<SizeClass>,
        base: u32,
        child: SizeClass,
        origin: (u32, u32),
        overrides: &RegionOverrides,
        names: &[SubspaceName],
    ) -> Result<Self, ConfigError> {
        let cells = match base.checked_mul(base) {
            Some(cells) if base > 0 && cells as usize <= SUBSPACE_LABELS.len() => cells as usize,
            _ => return Err(ConfigError::UnsupportedBase(base)),
        };

        let cell_overrides = overrides.cells(cells, &name)?;
        let cell_names: Vec<SubspaceName> = if names.is_empty() {
            SUBSPACE_LABELS[..cells]
                .iter()
                .map(|label| SubspaceName::Plain(format!("{name} {label}")))
                .collect()
        } else if names.len() == cells {
            names.to_vec()
        } else {
            return Err(ConfigError::NameCount {
                space: name,
                expected: cells,
                found: names.len(),
            });
        };

        let (child_rows, child_columns) = child.extent();
        let mut subspaces = Vec::with_capacity(cells);
        for (index, (cell_name, cell_overrides)) in
            cell_names.iter().zip(&cell_overrides).enumerate()
        {
            let row = index as u32 / base;
            let column = index as u32 % base;
            let child_origin = (origin.0 + row * child_rows, origin.1 + column * child_columns);
            // An explicit nested list must name every cell of the child.
            if let SubspaceName::Nested(cell, children) = cell_name {
                if children.is_empty() {
                    return Err(match child.base() {
                        Some(child_base) => ConfigError::NameCount {
                            space: cell.clone(),
                            expected: (child_base * child_base) as usize,
                            found: 0,
                        },
                        None => ConfigError::NestedNamesOnGrid {
                            space: cell.clone(),
                        },
                    });
                }
            }
            subspaces.push(child.build(
                cell_name.name(),
                child_origin,
                cell_overrides,
                cell_name.children(),
            )?);
        }

        Ok(Self {
            name,
            kind,
            base,
            origin,
            subspaces,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<SizeClass> {
        self.kind
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn origin(&self) -> (u32, u32) {
        self.origin
    }

    pub fn subspaces(&self) -> &[SpaceNode] {
        &self.subspaces
    }

    pub fn subspace_names(&self) -> Vec<&str> {
        self.subspaces.iter().map(SpaceNode::name).collect()
    }

    pub fn generate(&mut self, dice: &mut impl Dice, worlds: &WorldGenerator) {
        for subspace in &mut self.subspaces {
            subspace.fill(dice, worlds);
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = header(self.kind, &self.name, self.origin);
        for subspace in &self.subspaces {
            out.push_str(&subspace.to_text());
        }
        out
    }
}

fn header(kind: Option<SizeClass>, name: &str, origin: (u32, u32)) -> String {
    match kind {
        Some(kind) => format!("# {kind} '{name}' at '{},{}'\n", origin.0, origin.1),
        None => String::new(),
    }
}

// ── Node ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SpaceNode {
    Grid(Space),
    Container(ContainerSpace),
}

impl SpaceNode {
    pub fn name(&self) -> &str {
        match self {
            SpaceNode::Grid(space) => space.name(),
            SpaceNode::Container(container) => container.name(),
        }
    }

    pub fn kind(&self) -> Option<SizeClass> {
        match self {
            SpaceNode::Grid(space) => space.kind(),
            SpaceNode::Container(container) => container.kind(),
        }
    }

    pub fn origin(&self) -> (u32, u32) {
        match self {
            SpaceNode::Grid(space) => space.origin(),
            SpaceNode::Container(container) => container.origin(),
        }
    }

    /// Every system below this node, in rendering order.
    pub fn systems(&self) -> Vec<&StarSystem> {
        match self {
            SpaceNode::Grid(space) => space.systems().iter().collect(),
            SpaceNode::Container(container) => container
                .subspaces()
                .iter()
                .flat_map(SpaceNode::systems)
                .collect(),
        }
    }

    /// Populate every grid below this node, replacing earlier results.
    pub fn generate(&mut self, dice: &mut impl Dice, worlds: &WorldGenerator) {
        self.fill(dice, worlds);
        tracing::info!(
            "generated '{}' under {} rules: {} systems",
            self.name(),
            worlds.rules().name(),
            self.systems().len()
        );
    }

    fn fill(&mut self, dice: &mut impl Dice, worlds: &WorldGenerator) {
        match self {
            SpaceNode::Grid(space) => space.generate(dice, worlds),
            SpaceNode::Container(container) => container.generate(dice, worlds),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            SpaceNode::Grid(space) => space.to_text(),
            SpaceNode::Container(container) => container.to_text(),
        }
    }
}

impl fmt::Display for SpaceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
