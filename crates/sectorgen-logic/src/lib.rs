//! Pure generation logic for Traveller-style star maps.
//!
//! Nothing in this crate reads files, prints, or owns a random number
//! generator. Every roll goes through a caller-supplied [`dice::Dice`], so
//! the same code drives the CLI, seeded reproducible runs, and tests that
//! script exact roll sequences.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`constants`] | Grid sizes, presence threshold, subspace labels |
//! | [`descriptor`] | JSON region descriptors and per-class entry points |
//! | [`dice`] | Dice capability, seeded `rand` dice, scripted test dice |
//! | [`ehex`] | Extended-hex digits (0-9, A-Z) for values 0 to 35 |
//! | [`space`] | Subsector/Quadrant/Sector/Domain grids and containers |
//! | [`system`] | Star systems: main world, bases, PBG, `.sec` lines |
//! | [`trade_codes`] | Trade classifications derived from a UWP |
//! | [`uwp`] | Universal World Profile record and its text codec |
//! | [`world`] | Classic and Mongoose world generation rule tables |

pub mod constants;
pub mod descriptor;
pub mod dice;
pub mod ehex;
pub mod space;
pub mod system;
pub mod trade_codes;
pub mod uwp;
pub mod world;
