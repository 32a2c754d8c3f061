//! Integration tests for the full map generation pipeline.
//!
//! Exercises: descriptor JSON → SpaceNode construction → generation with
//! seeded dice → `.sec` text and JSON output.
//!
//! All tests are pure logic — no files, no terminal.

use sectorgen_logic::descriptor::{space_from_json, SpaceDescriptor};
use sectorgen_logic::dice::RandomDice;
use sectorgen_logic::space::{ContainerSpace, Density, SizeClass, SpaceNode};
use sectorgen_logic::system::StarSystem;
use sectorgen_logic::trade_codes::classify;
use sectorgen_logic::uwp::{Starport, Uwp};
use sectorgen_logic::world::{Maturity, WorldGenerator, WorldOptions};

const RADIO_CLUB: &str = include_str!("../../../data/radio_club_domain.json");

// ── Helpers ────────────────────────────────────────────────────────────

fn radio_club() -> SpaceNode {
    space_from_json(RADIO_CLUB).unwrap()
}

fn generated(seed: u64, options: WorldOptions) -> SpaceNode {
    let mut domain = radio_club();
    domain.generate(&mut RandomDice::seeded(seed), &WorldGenerator::new(options));
    domain
}

fn as_container(node: &SpaceNode) -> &ContainerSpace {
    match node {
        SpaceNode::Container(container) => container,
        SpaceNode::Grid(space) => panic!("'{}' is a grid", space.name()),
    }
}

/// Every leaf grid, row-major.
fn grids(node: &SpaceNode) -> Vec<&sectorgen_logic::space::Space> {
    match node {
        SpaceNode::Grid(space) => vec![space],
        SpaceNode::Container(container) => container.subspaces().iter().flat_map(grids).collect(),
    }
}

// ── Construction ───────────────────────────────────────────────────────

#[test]
fn radio_club_shape() {
    let domain = radio_club();
    assert_eq!(domain.kind(), Some(SizeClass::Domain));
    let domain = as_container(&domain);
    assert_eq!(
        domain.subspace_names(),
        vec!["Spring", "Summer", "Autumn", "Winter"]
    );
    for sector in domain.subspaces() {
        assert_eq!(sector.kind(), Some(SizeClass::Sector));
        assert_eq!(as_container(sector).subspaces().len(), 16);
    }
}

#[test]
fn radio_club_names() {
    let domain = radio_club();
    let sectors = as_container(&domain).subspaces();

    let spring = as_container(&sectors[0]);
    assert_eq!(spring.subspace_names()[0], "Spring A");
    assert_eq!(spring.subspace_names()[15], "Spring P");

    let winter = as_container(&sectors[3]);
    assert_eq!(winter.subspace_names()[0], "Alpha");
    assert_eq!(winter.subspace_names()[14], "Omicron");
    assert_eq!(winter.subspace_names()[15], "Pi");
}

#[test]
fn radio_club_overrides_reach_subsectors() {
    let domain = radio_club();
    let all = grids(&domain);
    assert_eq!(all.len(), 64);

    // Spring: every subsector inherits the sector-wide values
    for space in &all[0..16] {
        assert_eq!(space.density(), Density::Rift);
        assert_eq!(space.development().maturity, Maturity::Backwater);
        assert_eq!(space.development().tech_cap, Some(12));
    }
    // Autumn
    assert_eq!(all[32].density(), Density::Standard);
    assert_eq!(all[32].development().tech_cap, Some(14));

    // Winter: per-subsector lists
    let winter = &all[48..64];
    assert_eq!(winter[0].density(), Density::Rift);
    assert_eq!(winter[12].development().maturity, Maturity::Cluster);
    assert_eq!(winter[12].development().tech_cap, Some(15));
    assert_eq!(winter[15].name(), "Pi");
    assert_eq!(winter[15].density(), Density::Dense);
    assert_eq!(winter[15].development().maturity, Maturity::Mature);
    assert_eq!(winter[15].development().tech_cap, Some(14));
}

#[test]
fn radio_club_origins() {
    let domain = radio_club();
    let all = grids(&domain);
    assert_eq!(all[0].origin(), (0, 0));
    // Summer sector, subsector B
    assert_eq!(all[17].origin(), (0, 50));
    // Winter sector, last subsector
    assert_eq!(all[63].origin(), (56, 70));
}

// ── Generation ─────────────────────────────────────────────────────────

#[test]
fn coordinates_stay_inside_their_grid() {
    let domain = generated(11, WorldOptions::default());
    for space in grids(&domain) {
        let (rows, columns) = space.size();
        let (row0, column0) = space.origin();
        for system in space.systems() {
            let (row, column) = system.coordinates;
            assert!(row > row0 && row <= row0 + rows, "{}", system.to_line());
            assert!(column > column0 && column <= column0 + columns, "{}", system.to_line());
        }
    }
}

#[test]
fn tech_caps_hold_after_generation() {
    for options in [WorldOptions::classic(), WorldOptions::mongoose(), WorldOptions::default()] {
        let domain = generated(5, options);
        for space in grids(&domain) {
            let cap = space.development().tech_cap.unwrap();
            for system in space.systems() {
                assert!(system.uwp.tech_level() <= cap, "{} over {}", system.uwp, cap);
            }
        }
    }
}

#[test]
fn zero_population_worlds_are_empty() {
    let domain = generated(99, WorldOptions::default());
    for system in domain.systems() {
        if system.uwp.population() == 0 {
            assert_eq!(system.uwp.starport(), Starport::X);
            assert_eq!(system.uwp.government(), 0);
            assert_eq!(system.uwp.law_level(), 0);
            assert_eq!(system.uwp.tech_level(), 0);
            assert_eq!(system.pbg.population_multiplier, 0);
        } else {
            assert!(system.pbg.population_multiplier > 0);
        }
    }
}

#[test]
fn same_seed_same_map() {
    let a = generated(2024, WorldOptions::default());
    let b = generated(2024, WorldOptions::default());
    assert_eq!(a, b);
    assert_eq!(a.to_text(), b.to_text());
}

#[test]
fn regenerating_replaces_contents() {
    let worlds = WorldGenerator::default();
    let mut domain = radio_club();
    domain.generate(&mut RandomDice::seeded(1), &worlds);
    let first = domain.systems().len();
    domain.generate(&mut RandomDice::seeded(1), &worlds);
    assert_eq!(domain.systems().len(), first);
}

#[test]
fn dense_regions_fill_more_hexes() {
    let worlds = WorldGenerator::default();
    let count = |density: &str| {
        let json = format!(r#"{{"Size": "Sector", "Name": "S", "Density": "{density}"}}"#);
        let mut sector = space_from_json(&json).unwrap();
        sector.generate(&mut RandomDice::seeded(8), &worlds);
        sector.systems().len()
    };
    let rift = count("Rift");
    let sparse = count("Sparse");
    let standard = count("Standard");
    let dense = count("Dense");
    assert!(rift < sparse && sparse < standard && standard < dense);
}

#[test]
fn system_names_count_per_subsector() {
    let domain = generated(3, WorldOptions::default());
    for space in grids(&domain) {
        for (i, system) in space.systems().iter().enumerate() {
            assert_eq!(system.name, format!("{} {}", space.name(), i + 1));
        }
    }
}

// ── Output ─────────────────────────────────────────────────────────────

#[test]
fn text_has_header_per_region_and_line_per_system() {
    let domain = generated(17, WorldOptions::default());
    let text = domain.to_text();
    let headers = text.lines().filter(|l| l.starts_with("# ")).count();
    let rows = text.lines().filter(|l| !l.starts_with("# ")).count();
    assert_eq!(headers, 1 + 4 + 64);
    assert_eq!(rows, domain.systems().len());
    assert!(text.starts_with("# Domain 'Radio Club' at '0,0'\n# Sector 'Spring' at '0,0'\n"));
    assert!(text.contains("# Subsector 'Pi' at '56,70'\n"));
}

#[test]
fn system_lines_parse_back() {
    let domain = generated(23, WorldOptions::classic());
    for system in domain.systems() {
        let line = system.to_line();
        assert_eq!(line.len(), 69);
        let uwp = Uwp::parse(&line[25..34]).unwrap();
        assert_eq!(uwp, system.uwp);
        assert_eq!(line[38..58].trim_end(), system.trade_codes());
        assert_eq!(system.trade_codes().split_whitespace().count(), classify(&uwp).len());
    }
}

#[test]
fn json_output_uses_uwp_strings() {
    let mut subsector = space_from_json(r#"{"Size": "Subsector", "Name": "Trin"}"#).unwrap();
    subsector.generate(&mut RandomDice::seeded(4), &WorldGenerator::default());
    let json = serde_json::to_value(&subsector).unwrap();
    let systems = json["Grid"]["systems"].as_array().unwrap();
    assert_eq!(systems.len(), subsector.systems().len());
    for (value, system) in systems.iter().zip(subsector.systems()) {
        assert_eq!(value["uwp"], system.uwp.to_string());
        let back: StarSystem = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(&back, system);
    }
}

#[test]
fn descriptor_round_trips_through_json() {
    let descriptor: SpaceDescriptor = serde_json::from_str(RADIO_CLUB).unwrap();
    let again: SpaceDescriptor =
        serde_json::from_str(&serde_json::to_string(&descriptor).unwrap()).unwrap();
    assert_eq!(descriptor, again);
}
