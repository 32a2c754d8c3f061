//! World generation — dice rolls in, [`Uwp`] out.
//!
//! Each edition is a [`RuleTable`]: the field-by-field rolls, the tech level
//! DM tables and the PBG rules. [`WorldGenerator`] picks one table when it is
//! built and runs the shared pipeline:
//!
//! 1. starport (editions that roll it first)
//! 2. size → atmosphere → temperature → hydrographics → population
//! 3. population 0 short-circuits: starport X, everything else 0
//! 4. government → law level → starport (editions that roll it last)
//! 5. tech level = 1d6 + Σ field DMs, then regional maturity and tech cap
//!
//! Order matters: scripted tests depend on the exact roll sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dice::Dice;
use crate::system::Pbg;
use crate::uwp::{Starport, Uwp};

/// Which edition's tables to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Ruleset {
    /// Classic Traveller (Book 3).
    Classic,
    /// Mongoose Traveller 2nd edition.
    #[default]
    Mongoose,
}

/// Edition plus the optional campaign rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldOptions {
    pub ruleset: Ruleset,
    /// Small worlds keep little or no air, and water is scarcer.
    pub space_opera: bool,
    /// Population tracks how habitable a world actually is.
    pub hard_science: bool,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            ruleset: Ruleset::Mongoose,
            space_opera: true,
            hard_science: true,
        }
    }
}

impl WorldOptions {
    pub fn classic() -> Self {
        Self {
            ruleset: Ruleset::Classic,
            space_opera: false,
            hard_science: false,
        }
    }

    pub fn mongoose() -> Self {
        Self {
            ruleset: Ruleset::Mongoose,
            space_opera: false,
            hard_science: false,
        }
    }
}

/// How long a region has been settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Maturity {
    Backwater,
    #[default]
    Standard,
    Mature,
    Cluster,
}

impl Maturity {
    pub fn tech_dm(self) -> i32 {
        match self {
            Maturity::Backwater => -2,
            Maturity::Standard => 0,
            Maturity::Mature => 1,
            Maturity::Cluster => 2,
        }
    }
}

/// Regional limits on how advanced a world may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Development {
    pub maturity: Maturity,
    pub tech_cap: Option<u8>,
}

impl Development {
    pub fn new(maturity: Maturity, tech_cap: Option<u8>) -> Self {
        Self { maturity, tech_cap }
    }

    /// Final tech level from the edition's raw roll.
    pub fn apply(&self, tech_roll: i32) -> i32 {
        let tech = (tech_roll.max(0) + self.maturity.tech_dm()).max(0);
        match self.tech_cap {
            Some(cap) => tech.min(cap as i32),
            None => tech,
        }
    }
}

/// Surface temperature. Feeds hydrographics; not part of the UWP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Temperature {
    Frozen,
    Cold,
    Temperate,
    Hot,
    Boiling,
}

impl Temperature {
    pub fn from_roll(roll: i32) -> Self {
        match roll {
            i32::MIN..=2 => Temperature::Frozen,
            3..=4 => Temperature::Cold,
            5..=9 => Temperature::Temperate,
            10..=11 => Temperature::Hot,
            _ => Temperature::Boiling,
        }
    }
}

/// Tech DMs for one field, indexed by field value. Values past the end of
/// the table take `beyond`.
#[derive(Debug, Clone, Copy)]
pub struct DmTable {
    values: &'static [i32],
    beyond: i32,
}

impl DmTable {
    pub const fn new(values: &'static [i32], beyond: i32) -> Self {
        Self { values, beyond }
    }

    pub fn lookup(&self, value: i32) -> i32 {
        if value < 0 {
            return 0;
        }
        self.values
            .get(value as usize)
            .copied()
            .unwrap_or(self.beyond)
    }
}

/// One edition's complete set of tech level DM tables.
#[derive(Debug, Clone, Copy)]
pub struct TechModifiers {
    /// Indexed by [`Starport::index`].
    pub starport: [i32; 6],
    pub size: DmTable,
    pub atmosphere: DmTable,
    pub hydrographics: DmTable,
    pub population: DmTable,
    pub government: DmTable,
}

impl TechModifiers {
    pub fn total(
        &self,
        starport: Starport,
        size: i32,
        atmosphere: i32,
        hydrographics: i32,
        population: i32,
        government: i32,
    ) -> i32 {
        self.starport[starport.index()]
            + self.size.lookup(size)
            + self.atmosphere.lookup(atmosphere)
            + self.hydrographics.lookup(hydrographics)
            + self.population.lookup(population)
            + self.government.lookup(government)
    }
}

// ── Tables ─────────────────────────────────────────────────────────────

const STARPORT_TECH_DM: [i32; 6] = [6, 4, 2, 0, 0, -4];
const SIZE_TECH_DM: DmTable = DmTable::new(&[2, 2, 1, 1, 1], 0);

static CLASSIC_TECH: TechModifiers = TechModifiers {
    starport: STARPORT_TECH_DM,
    size: SIZE_TECH_DM,
    atmosphere: DmTable::new(&[1, 1, 1, 1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1], 0),
    hydrographics: DmTable::new(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2], 0),
    population: DmTable::new(&[0, 1, 1, 1, 1, 1, 0, 0, 0, 2, 4], 0),
    government: DmTable::new(&[1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, -2], 0),
};

static MONGOOSE_TECH: TechModifiers = TechModifiers {
    starport: STARPORT_TECH_DM,
    size: SIZE_TECH_DM,
    atmosphere: DmTable::new(&[1, 1, 1, 1, 0, 0, 0, 0, 0, 0], 1),
    hydrographics: DmTable::new(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2], 0),
    population: DmTable::new(&[0, 1, 1, 1, 1, 1, 0, 0, 1, 2, 4], 0),
    government: DmTable::new(&[1, 0, 0, 0, 0, 1, 0, 2, 0, 0, 0, 0, 0, -2, -2], 0),
};

/// Classic starports, indexed by 2d6 - 2.
const CLASSIC_STARPORTS: [Starport; 11] = [
    Starport::A,
    Starport::A,
    Starport::A,
    Starport::B,
    Starport::B,
    Starport::C,
    Starport::C,
    Starport::D,
    Starport::E,
    Starport::E,
    Starport::X,
];

/// Mongoose starports, indexed by 2d6 + population DM.
const MONGOOSE_STARPORTS: [Starport; 12] = [
    Starport::X,
    Starport::X,
    Starport::X,
    Starport::E,
    Starport::E,
    Starport::D,
    Starport::D,
    Starport::C,
    Starport::C,
    Starport::B,
    Starport::B,
    Starport::A,
];

/// Planetoid belt count, indexed by 2d6.
const BELT_COUNTS: [u8; 14] = [0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3];

/// Gas giant count, indexed by 2d6.
const GAS_GIANT_COUNTS: [u8; 13] = [0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 4, 5, 5];

/// Index a roll table, pinning out-of-range rolls to the nearest end.
fn lookup<T: Copy>(table: &[T], index: i32) -> T {
    let last = table.len() - 1;
    table[(index.max(0) as usize).min(last)]
}

// ── Rule tables ────────────────────────────────────────────────────────

/// One edition's rules. Methods consume dice in the order the pipeline
/// calls them and must not roll when their result is already determined.
pub trait RuleTable: fmt::Debug + Sync {
    fn name(&self) -> &'static str;

    /// Whether the starport is rolled before anything else.
    fn starport_first(&self) -> bool;

    /// `population` is 0 for editions that roll the starport first.
    fn starport(&self, dice: &mut dyn Dice, population: i32) -> Starport;

    fn size(&self, dice: &mut dyn Dice) -> i32 {
        dice.roll(2, 6) - 2
    }

    fn atmosphere(&self, dice: &mut dyn Dice, size: i32, options: &WorldOptions) -> i32;

    /// `None` for editions without a temperature step.
    fn temperature(&self, dice: &mut dyn Dice, atmosphere: i32) -> Option<Temperature>;

    fn hydrographics(
        &self,
        dice: &mut dyn Dice,
        size: i32,
        atmosphere: i32,
        temperature: Option<Temperature>,
        options: &WorldOptions,
    ) -> i32;

    fn population(
        &self,
        dice: &mut dyn Dice,
        size: i32,
        atmosphere: i32,
        options: &WorldOptions,
    ) -> i32;

    fn tech_modifiers(&self) -> &'static TechModifiers;

    /// Population multiplier, planetoid belts and gas giants.
    fn pbg(&self, dice: &mut dyn Dice, population: u8) -> Pbg;
}

/// Classic Traveller. No temperature, no campaign flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicRules;

impl RuleTable for ClassicRules {
    fn name(&self) -> &'static str {
        "Classic"
    }

    fn starport_first(&self) -> bool {
        true
    }

    fn starport(&self, dice: &mut dyn Dice, _population: i32) -> Starport {
        lookup(&CLASSIC_STARPORTS, dice.roll(2, 6) - 2)
    }

    fn atmosphere(&self, dice: &mut dyn Dice, size: i32, _options: &WorldOptions) -> i32 {
        if size == 0 {
            return 0;
        }
        (dice.roll(2, 6) - 7 + size).max(0)
    }

    fn temperature(&self, _dice: &mut dyn Dice, _atmosphere: i32) -> Option<Temperature> {
        None
    }

    fn hydrographics(
        &self,
        dice: &mut dyn Dice,
        size: i32,
        atmosphere: i32,
        _temperature: Option<Temperature>,
        _options: &WorldOptions,
    ) -> i32 {
        if size == 0 {
            return 0;
        }
        let dm = if atmosphere <= 1 || atmosphere >= 10 { -4 } else { 0 };
        (dice.roll(2, 6) - 7 + size + dm).clamp(0, 10)
    }

    fn population(
        &self,
        dice: &mut dyn Dice,
        _size: i32,
        _atmosphere: i32,
        _options: &WorldOptions,
    ) -> i32 {
        (dice.roll(2, 6) - 2).clamp(0, 10)
    }

    fn tech_modifiers(&self) -> &'static TechModifiers {
        &CLASSIC_TECH
    }

    fn pbg(&self, dice: &mut dyn Dice, population: u8) -> Pbg {
        // Classic only records whether a gas giant is present.
        let gas_giants = u8::from(dice.roll(2, 6) <= 9);
        Pbg {
            population_multiplier: u8::from(population > 0),
            belts: 0,
            gas_giants,
        }
    }
}

/// Mongoose Traveller 2e, with the 1e space-opera and hard-science options
/// and MegaTraveller PBG rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongooseRules;

impl RuleTable for MongooseRules {
    fn name(&self) -> &'static str {
        "Mongoose"
    }

    fn starport_first(&self) -> bool {
        false
    }

    fn starport(&self, dice: &mut dyn Dice, population: i32) -> Starport {
        let dm = match population {
            i32::MIN..=2 => -2,
            3..=4 => -1,
            8..=9 => 1,
            10..=i32::MAX => 2,
            _ => 0,
        };
        lookup(&MONGOOSE_STARPORTS, dice.roll(2, 6) + dm)
    }

    fn atmosphere(&self, dice: &mut dyn Dice, size: i32, options: &WorldOptions) -> i32 {
        let atmosphere = dice.roll(2, 6) + size - 7;
        if atmosphere < 0 {
            return 0;
        }
        if options.space_opera {
            match size {
                i32::MIN..=2 => return 0,
                3 | 4 => {
                    return match atmosphere {
                        i32::MIN..=2 => 0,
                        3..=5 => 1,
                        _ => 10,
                    }
                }
                _ => {}
            }
        }
        atmosphere
    }

    fn temperature(&self, dice: &mut dyn Dice, atmosphere: i32) -> Option<Temperature> {
        let dm = match atmosphere {
            2 | 3 => -2,
            4 | 5 | 14 => -1,
            8 | 9 => 1,
            10 | 13 | 15 => 2,
            11 | 12 => 6,
            _ => 0,
        };
        Some(Temperature::from_roll(dice.roll(2, 6) + dm))
    }

    fn hydrographics(
        &self,
        dice: &mut dyn Dice,
        size: i32,
        atmosphere: i32,
        temperature: Option<Temperature>,
        options: &WorldOptions,
    ) -> i32 {
        if size <= 1 {
            return 0;
        }

        let mut dm = 0;
        if matches!(atmosphere, 0 | 1 | 10 | 11 | 12) {
            dm -= 4;
        }
        // Dense and panthalassic atmospheres hold water whatever the heat.
        if !matches!(atmosphere, 13 | 15) {
            match temperature {
                Some(Temperature::Hot) => dm -= 2,
                Some(Temperature::Boiling) => dm -= 6,
                _ => {}
            }
        }
        if options.space_opera {
            if matches!(size, 3 | 4) && atmosphere == 10 {
                dm -= 6;
            }
            if matches!(atmosphere, 0 | 1) {
                dm -= 6;
            }
            if matches!(atmosphere, 2 | 3 | 11 | 12) {
                dm -= 4;
            }
        }

        (dice.roll(2, 6) - 7 + size + dm).clamp(0, 10)
    }

    fn population(
        &self,
        dice: &mut dyn Dice,
        size: i32,
        atmosphere: i32,
        options: &WorldOptions,
    ) -> i32 {
        let mut dm = 0;
        if options.hard_science {
            if size <= 2 || size >= 10 {
                dm -= 1;
            }
            if matches!(atmosphere, 5 | 6 | 8) {
                dm += 1;
            } else {
                dm -= 1;
            }
        }
        (dice.roll(2, 6) + dm).clamp(0, 10)
    }

    fn tech_modifiers(&self) -> &'static TechModifiers {
        &MONGOOSE_TECH
    }

    fn pbg(&self, dice: &mut dyn Dice, population: u8) -> Pbg {
        // 1d10 rather than the d6 emulation; a populated world never gets 0.
        let rolled = (dice.roll(1, 10) - 1).clamp(0, 9) as u8;
        let population_multiplier = match population {
            0 => 0,
            _ => rolled.max(1),
        };

        let belts = if dice.roll(2, 6) >= 8 {
            lookup(&BELT_COUNTS, dice.roll(2, 6))
        } else {
            0
        };

        let gas_giants = if dice.roll(2, 6) >= 5 {
            lookup(&GAS_GIANT_COUNTS, dice.roll(2, 6))
        } else {
            0
        };

        Pbg {
            population_multiplier,
            belts,
            gas_giants,
        }
    }
}

static CLASSIC: ClassicRules = ClassicRules;
static MONGOOSE: MongooseRules = MongooseRules;

impl Ruleset {
    pub fn rules(self) -> &'static dyn RuleTable {
        match self {
            Ruleset::Classic => &CLASSIC,
            Ruleset::Mongoose => &MONGOOSE,
        }
    }
}

// ── Generator ──────────────────────────────────────────────────────────

/// Produces UWPs under one fixed set of rules.
#[derive(Debug, Clone, Copy)]
pub struct WorldGenerator {
    options: WorldOptions,
    rules: &'static dyn RuleTable,
}

impl Default for WorldGenerator {
    fn default() -> Self {
        Self::new(WorldOptions::default())
    }
}

impl WorldGenerator {
    pub fn new(options: WorldOptions) -> Self {
        Self {
            options,
            rules: options.ruleset.rules(),
        }
    }

    pub fn options(&self) -> &WorldOptions {
        &self.options
    }

    pub fn rules(&self) -> &'static dyn RuleTable {
        self.rules
    }

    /// Generate a world with no regional limits.
    pub fn generate(&self, dice: &mut impl Dice) -> Uwp {
        self.generate_with(dice, &Development::default())
    }

    /// Generate a world, then apply the region's maturity and tech cap.
    pub fn generate_with(&self, dice: &mut impl Dice, development: &Development) -> Uwp {
        let dice: &mut dyn Dice = dice;
        let rules = self.rules;
        let options = &self.options;

        let early_starport = if rules.starport_first() {
            Some(rules.starport(dice, 0))
        } else {
            None
        };

        let size = rules.size(dice);
        let atmosphere = rules.atmosphere(dice, size, options);
        let temperature = rules.temperature(dice, atmosphere);
        let hydrographics = rules.hydrographics(dice, size, atmosphere, temperature, options);
        let population = rules.population(dice, size, atmosphere, options);

        if population == 0 {
            return Uwp::clamped(Starport::X, size, atmosphere, hydrographics, 0, 0, 0, 0);
        }

        let government = (dice.roll(2, 6) - 7 + population).max(0);
        let law_level = (dice.roll(2, 6) - 7 + government).max(0);
        let starport = match early_starport {
            Some(starport) => starport,
            None => rules.starport(dice, population),
        };

        let dm = rules.tech_modifiers().total(
            starport,
            size,
            atmosphere,
            hydrographics,
            population,
            government,
        );
        let tech_level = development.apply(dice.roll(1, 6) + dm);

        Uwp::clamped(
            starport,
            size,
            atmosphere,
            hydrographics,
            population,
            government,
            law_level,
            tech_level,
        )
    }
}
