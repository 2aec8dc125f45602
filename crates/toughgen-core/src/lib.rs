//! Builds fixed-column TOUGHREACT input decks from a source mesh deck and a
//! JSON configuration, and flattens tecplot result tables into CSV.

pub mod config;
pub mod domain;
pub mod fixed_width;
pub mod mesh;
pub mod modules;
pub mod numerics;
pub mod parser;
