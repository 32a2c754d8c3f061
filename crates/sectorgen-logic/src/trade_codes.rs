//! Trade classifications derived from a UWP.
//!
//! Each code is an independent predicate over the decoded fields; a world
//! carries every code whose predicate holds. Codes are never stored; call
//! [`classify`] whenever they are needed.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ehex;
use crate::uwp::Uwp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TradeCode {
    /// Agricultural
    Ag,
    /// Asteroid
    As,
    /// Barren
    Ba,
    /// Desert
    De,
    /// Fluid oceans
    Fl,
    /// Garden
    Ga,
    /// High population
    Hi,
    /// High tech
    Ht,
    /// Ice-capped
    Ic,
    /// Industrial
    In,
    /// Low population
    Lo,
    /// Low tech
    Lt,
    /// Non-agricultural
    Na,
    /// Non-industrial
    Ni,
    /// Poor
    Po,
    /// Rich
    Ri,
    /// Vacuum
    Va,
    /// Water world
    Wa,
}

impl TradeCode {
    /// Every code, in alphabetical order.
    pub const ALL: [TradeCode; 18] = [
        TradeCode::Ag,
        TradeCode::As,
        TradeCode::Ba,
        TradeCode::De,
        TradeCode::Fl,
        TradeCode::Ga,
        TradeCode::Hi,
        TradeCode::Ht,
        TradeCode::Ic,
        TradeCode::In,
        TradeCode::Lo,
        TradeCode::Lt,
        TradeCode::Na,
        TradeCode::Ni,
        TradeCode::Po,
        TradeCode::Ri,
        TradeCode::Va,
        TradeCode::Wa,
    ];

    pub fn code(self) -> &'static str {
        match self {
            TradeCode::Ag => "Ag",
            TradeCode::As => "As",
            TradeCode::Ba => "Ba",
            TradeCode::De => "De",
            TradeCode::Fl => "Fl",
            TradeCode::Ga => "Ga",
            TradeCode::Hi => "Hi",
            TradeCode::Ht => "Ht",
            TradeCode::Ic => "Ic",
            TradeCode::In => "In",
            TradeCode::Lo => "Lo",
            TradeCode::Lt => "Lt",
            TradeCode::Na => "Na",
            TradeCode::Ni => "Ni",
            TradeCode::Po => "Po",
            TradeCode::Ri => "Ri",
            TradeCode::Va => "Va",
            TradeCode::Wa => "Wa",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TradeCode::Ag => "Agricultural",
            TradeCode::As => "Asteroid",
            TradeCode::Ba => "Barren",
            TradeCode::De => "Desert",
            TradeCode::Fl => "Fluid Oceans",
            TradeCode::Ga => "Garden",
            TradeCode::Hi => "High Population",
            TradeCode::Ht => "High Tech",
            TradeCode::Ic => "Ice-Capped",
            TradeCode::In => "Industrial",
            TradeCode::Lo => "Low Population",
            TradeCode::Lt => "Low Tech",
            TradeCode::Na => "Non-Agricultural",
            TradeCode::Ni => "Non-Industrial",
            TradeCode::Po => "Poor",
            TradeCode::Ri => "Rich",
            TradeCode::Va => "Vacuum",
            TradeCode::Wa => "Water World",
        }
    }

    /// Whether a world qualifies for this code.
    pub fn applies_to(self, uwp: &Uwp) -> bool {
        let size = uwp.size();
        let atmo = uwp.atmosphere();
        let hydro = uwp.hydrographics();
        let pop = uwp.population();
        let gov = uwp.government();
        let law = uwp.law_level();
        let tech = uwp.tech_level();

        match self {
            TradeCode::Ag => {
                (4..=9).contains(&atmo) && (4..=8).contains(&hydro) && (5..=7).contains(&pop)
            }
            TradeCode::As => size == 0 && atmo == 0 && hydro == 0,
            TradeCode::Ba => pop == 0 && gov == 0 && law == 0,
            TradeCode::De => atmo > 1 && hydro == 0,
            TradeCode::Fl => atmo >= 10 && hydro != 0,
            TradeCode::Ga => {
                (6..=8).contains(&size) && matches!(atmo, 5 | 6 | 8) && (5..=7).contains(&hydro)
            }
            TradeCode::Hi => at_least(pop, '9'),
            TradeCode::Ht => at_least(tech, 'C'),
            TradeCode::Ic => atmo <= 1 && hydro != 0,
            TradeCode::In => at_least(pop, '9') && matches!(atmo, 0 | 1 | 2 | 4 | 7 | 9),
            TradeCode::Lo => pop <= 3,
            TradeCode::Lt => tech <= 3,
            TradeCode::Na => atmo <= 3 && hydro <= 3 && at_least(pop, '6'),
            TradeCode::Ni => pop <= 6,
            TradeCode::Po => (2..=5).contains(&atmo) && hydro <= 3,
            TradeCode::Ri => {
                matches!(atmo, 6 | 8) && (6..=8).contains(&pop) && (4..=9).contains(&gov)
            }
            TradeCode::Va => atmo == 0,
            TradeCode::Wa => hydro == 10,
        }
    }
}

impl fmt::Display for TradeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// `value` meets the threshold digit, ordered by eHex value.
fn at_least(value: u8, threshold: char) -> bool {
    matches!(
        ehex::to_digit(i32::from(value)).and_then(|digit| ehex::compare(digit, threshold)),
        Ok(Ordering::Greater | Ordering::Equal)
    )
}

/// All codes that apply to `uwp`, alphabetical.
pub fn classify(uwp: &Uwp) -> Vec<TradeCode> {
    TradeCode::ALL
        .into_iter()
        .filter(|code| code.applies_to(uwp))
        .collect()
}

/// Codes joined by single spaces, as they appear in a sector listing.
pub fn codes_string(uwp: &Uwp) -> String {
    classify(uwp)
        .iter()
        .map(|c| c.code())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(text: &str) -> Vec<TradeCode> {
        classify(&Uwp::parse(text).unwrap())
    }

    #[test]
    fn test_earth() {
        assert_eq!(codes("A867977-8"), vec![TradeCode::Ga, TradeCode::Hi]);
        assert_eq!(codes_string(&Uwp::parse("A867977-8").unwrap()), "Ga Hi");
    }

    #[test]
    fn test_asteroid_belt_settlement() {
        assert_eq!(
            codes("C000411-B"),
            vec![TradeCode::As, TradeCode::Ni, TradeCode::Va]
        );
    }

    #[test]
    fn test_barren_rock() {
        assert_eq!(
            codes("X000000-0"),
            vec![
                TradeCode::As,
                TradeCode::Ba,
                TradeCode::Lo,
                TradeCode::Lt,
                TradeCode::Ni,
                TradeCode::Va
            ]
        );
    }

    #[test]
    fn test_agricultural_rich() {
        // atmo 6, hydro 5, pop 6, gov 5
        assert_eq!(
            codes("B665654-9"),
            vec![TradeCode::Ag, TradeCode::Ga, TradeCode::Ni, TradeCode::Ri]
        );
    }

    #[test]
    fn test_industrial_high_tech() {
        // atmo 7, hydro 4, pop 9, tech C
        assert_eq!(
            codes("A774966-C"),
            vec![TradeCode::Hi, TradeCode::Ht, TradeCode::In]
        );
    }

    #[test]
    fn test_desert_and_poor() {
        // atmo 4, hydro 0
        assert_eq!(
            codes("D540520-6"),
            vec![TradeCode::De, TradeCode::Ni, TradeCode::Po]
        );
    }

    #[test]
    fn test_fluid_oceans_and_water_world() {
        assert!(codes("E7BA433-7").contains(&TradeCode::Fl));
        assert!(codes("E7BA433-7").contains(&TradeCode::Wa));
        // water under a standard atmosphere is not fluid
        assert!(!codes("E76A433-7").contains(&TradeCode::Fl));
    }

    #[test]
    fn test_ice_capped() {
        assert!(codes("E411200-5").contains(&TradeCode::Ic));
        assert!(!codes("E410200-5").contains(&TradeCode::Ic));
    }

    #[test]
    fn test_non_agricultural() {
        // atmo 3, hydro 2, pop 6
        assert!(codes("C532674-9").contains(&TradeCode::Na));
        assert!(!codes("C532574-9").contains(&TradeCode::Na));
    }

    #[test]
    fn test_industrial_requires_high_population() {
        assert!(!codes("A774866-C").contains(&TradeCode::In));
        assert!(codes("A7749G6-C").contains(&TradeCode::In));
    }

    #[test]
    fn test_thresholds_compare_by_ehex_value() {
        assert!(at_least(9, '9'));
        assert!(at_least(10, '9'));
        assert!(!at_least(11, 'C'));
        assert!(at_least(12, 'C'));
        assert!(at_least(33, 'C'));
        assert!(!codes("A774966-B").contains(&TradeCode::Ht));
        assert!(codes("A774A66-C").contains(&TradeCode::Hi));
    }

    #[test]
    fn test_population_bands_are_exclusive_where_expected() {
        for pop in 0..=10u8 {
            let uwp = Uwp::new(crate::uwp::Starport::C, 5, 5, 5, pop, 5, 5, 8).unwrap();
            let c = classify(&uwp);
            assert!(!(c.contains(&TradeCode::Hi) && c.contains(&TradeCode::Lo)));
            assert!(!(c.contains(&TradeCode::Hi) && c.contains(&TradeCode::Ni)));
        }
    }

    #[test]
    fn test_output_is_sorted_and_stable() {
        let uwp = Uwp::parse("X000000-0").unwrap();
        let first = classify(&uwp);
        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(first, sorted);
        assert_eq!(first, classify(&uwp));
    }

    #[test]
    fn test_all_is_alphabetical() {
        let names: Vec<&str> = TradeCode::ALL.iter().map(|c| c.code()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
