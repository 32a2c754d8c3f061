//! Map constants — grid sizes, presence threshold, subspace labels.
//!
//! Plain values with no lifecycle; everything that lays out a map reads
//! them from here.

pub mod grid {
    /// Subsector hex rows.
    pub const SUBSECTOR_ROWS: u32 = 8;
    /// Subsector hex columns.
    pub const SUBSECTOR_COLUMNS: u32 = 10;
    /// Subsectors per side of a quadrant.
    pub const QUADRANT_BASE: u32 = 2;
    /// Subsectors per side of a sector.
    pub const SECTOR_BASE: u32 = 4;
    /// Sectors per side of a domain.
    pub const DOMAIN_BASE: u32 = 2;
}

pub mod presence {
    /// A hex holds a system when 1d6 + density DM reaches this.
    pub const THRESHOLD: i32 = 4;
}

/// Suffixes for auto-named subspaces, row-major. Their count caps how many
/// cells a container can have.
pub const SUBSPACE_LABELS: [char; 16] = [
    'A', 'B', 'C', 'D', //
    'E', 'F', 'G', 'H', //
    'I', 'J', 'K', 'L', //
    'M', 'N', 'O', 'P',
];
