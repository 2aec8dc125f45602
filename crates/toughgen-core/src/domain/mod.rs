pub mod errors;

pub use errors::{DeckError, DeckErrorCategory, DeckErrorKind, DeckResult, ParserResult};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckKind {
    Mesh,
    Flow,
    Incon,
    Solute,
    Chemical,
}

impl DeckKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mesh => "MESH",
            Self::Flow => "FLOW",
            Self::Incon => "INCON",
            Self::Solute => "SOLUTE",
            Self::Chemical => "CHEMICAL",
        }
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Mesh => "MESH",
            Self::Flow => "flow.inp",
            Self::Incon => "INCON",
            Self::Solute => "solute.inp",
            Self::Chemical => "chemical.inp",
        }
    }
}

impl Display for DeckKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// One deck to produce from a source deck into an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub deck: DeckKind,
    pub source_path: PathBuf,
    pub output_dir: PathBuf,
}

impl GenerateRequest {
    pub fn new(
        deck: DeckKind,
        source_path: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            deck,
            source_path: source_path.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.deck.file_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckArtifact {
    pub relative_path: PathBuf,
}

impl DeckArtifact {
    pub fn new(relative_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_squared(self, other: Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

/// A control volume from the `ELEME` block.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Five characters, kept verbatim including blanks.
    pub name: String,
    pub rock_type: String,
    pub center: Point3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RockProperties {
    pub name: String,
    pub density: f64,
    pub porosity: f64,
    pub permeability: [f64; 3],
    pub thermal_conductivity: f64,
    pub specific_heat: f64,
}

impl Default for RockProperties {
    fn default() -> Self {
        Self {
            name: "Backg".to_string(),
            density: 2600.0,
            porosity: 0.10,
            permeability: [1.0e-13, 1.0e-13, 1.0e-14],
            thermal_conductivity: 2.51,
            specific_heat: 920.0,
        }
    }
}

/// EOS primary variables for one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialState {
    pub pressure: f64,
    pub salinity: f64,
    pub co2_fraction: f64,
    pub temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    pub time: f64,
    pub rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRate {
    Constant(f64),
    Table(Vec<RatePoint>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceTerm {
    pub element: String,
    pub name: String,
    pub component: String,
    pub rate: SourceRate,
    pub enthalpy: Option<f64>,
}

impl SourceTerm {
    pub fn validate(&self) -> DeckResult<()> {
        let SourceRate::Table(points) = &self.rate else {
            return Ok(());
        };

        if points.is_empty() {
            return Err(DeckError::config(
                "CONFIG.GENER_TABLE_EMPTY",
                format!("source '{}' has an empty rate table", self.name),
            ));
        }

        for pair in points.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(DeckError::config(
                    "CONFIG.GENER_TABLE_ORDER",
                    format!(
                        "source '{}' rate table times must be strictly increasing ({} then {})",
                        self.name, pair[0].time, pair[1].time
                    ),
                ));
            }
        }

        Ok(())
    }
}
