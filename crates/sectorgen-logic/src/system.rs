//! Star systems — one occupied hex: a main world plus bases and PBG.
//!
//! A [`StarSystem`] is either a template built around a known UWP
//! ([`StarSystem::new`]) or fully rolled ([`StarSystem::generate`]). There
//! is no half-generated state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dice::Dice;
use crate::trade_codes;
use crate::uwp::{Starport, Uwp};
use crate::world::{Development, WorldGenerator};

/// Population multiplier, planetoid belts, gas giants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pbg {
    pub population_multiplier: u8,
    pub belts: u8,
    pub gas_giants: u8,
}

impl fmt::Display for Pbg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.population_multiplier, self.belts, self.gas_giants
        )
    }
}

/// Naval and scout base presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Bases {
    pub naval: bool,
    pub scout: bool,
}

impl Bases {
    /// Roll bases for a world with the given starport. Only starports that
    /// can host a base consume dice.
    pub fn generate(dice: &mut impl Dice, starport: Starport) -> Self {
        let naval = matches!(starport, Starport::A | Starport::B) && dice.roll(2, 6) >= 8;

        let scout_dm = match starport {
            Starport::A => -3,
            Starport::B => -2,
            Starport::C => -1,
            _ => 0,
        };
        let scout = matches!(
            starport,
            Starport::A | Starport::B | Starport::C | Starport::D
        ) && dice.roll(2, 6) + scout_dm >= 7;

        Self { naval, scout }
    }

    /// Single-character base code used in sector files.
    pub fn code(&self) -> char {
        match (self.naval, self.scout) {
            (true, true) => 'B',
            (true, false) => 'N',
            (false, true) => 'S',
            (false, false) => ' ',
        }
    }
}

/// One occupied hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarSystem {
    pub name: String,
    /// Global (row, column), 1-based.
    pub coordinates: (u32, u32),
    pub uwp: Uwp,
    pub bases: Bases,
    pub pbg: Pbg,
}

impl StarSystem {
    /// A hand-written system around a known world: no bases, no belts,
    /// no gas giants.
    pub fn new(name: impl Into<String>, coordinates: (u32, u32), uwp: Uwp) -> Self {
        Self {
            name: name.into(),
            coordinates,
            uwp,
            bases: Bases::default(),
            pbg: Pbg {
                population_multiplier: u8::from(uwp.is_populated()),
                belts: 0,
                gas_giants: 0,
            },
        }
    }

    pub fn with_bases(mut self, bases: Bases) -> Self {
        self.bases = bases;
        self
    }

    pub fn with_pbg(mut self, pbg: Pbg) -> Self {
        self.pbg = pbg;
        self
    }

    /// Roll a complete system: world, then bases, then PBG.
    pub fn generate(
        name: impl Into<String>,
        coordinates: (u32, u32),
        dice: &mut impl Dice,
        worlds: &WorldGenerator,
        development: &Development,
    ) -> Self {
        let uwp = worlds.generate_with(dice, development);
        let bases = Bases::generate(dice, uwp.starport());
        let pbg = worlds.rules().pbg(dice, uwp.population());
        Self {
            name: name.into(),
            coordinates,
            uwp,
            bases,
            pbg,
        }
    }

    pub fn trade_codes(&self) -> String {
        trade_codes::codes_string(&self.uwp)
    }

    /// One fixed-width `.sec` line, without a trailing newline. Travel zone,
    /// allegiance and stellar data are left blank.
    pub fn to_line(&self) -> String {
        format!(
            "{:<20}{:02}{:02} {}  {} {:<20}    {}    ",
            self.name,
            self.coordinates.0,
            self.coordinates.1,
            self.uwp,
            self.bases.code(),
            self.trade_codes(),
            self.pbg,
        )
    }
}

impl fmt::Display for StarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}
