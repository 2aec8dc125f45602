use crate::domain::{DeckError, Point3, RatePoint, RockProperties, SourceRate, SourceTerm};
use crate::mesh::DuplicatePolicy;
use crate::numerics::{HydrostaticConfig, ScheduleConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Every knob the deck generators read. Each section falls back to its
/// defaults when omitted from the JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub title: String,
    pub hydrostatic: HydrostaticConfig,
    pub schedule: ScheduleConfig,
    pub injection: InjectionConfig,
    pub flow: FlowConfig,
    /// Used when the source deck has no `ROCKS` block.
    pub rocks: Vec<RockProperties>,
    pub incon: InconConfig,
    pub mesh: MeshConfig,
    pub solute: SoluteConfig,
    pub chemistry: ChemistryConfig,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            title: "TOUGHREACT 3D: CO2 injection with phased output times".to_string(),
            hydrostatic: HydrostaticConfig::default(),
            schedule: ScheduleConfig::default(),
            injection: InjectionConfig::default(),
            flow: FlowConfig::default(),
            rocks: Vec::new(),
            incon: InconConfig::default(),
            mesh: MeshConfig::default(),
            solute: SoluteConfig::default(),
            chemistry: ChemistryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    pub target: Point3,
    pub source_name: String,
    pub component: String,
    /// kg/s
    pub rate: f64,
    /// J/kg
    pub enthalpy: Option<f64>,
    /// Explicit `(time, rate)` table. When absent the rate runs through the
    /// first schedule phase and drops to zero afterwards.
    pub table: Option<Vec<RatePoint>>,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            target: Point3::new(319_000.0, 5_100_900.0, 1_000.0),
            source_name: "INJ01".to_string(),
            component: "COM3".to_string(),
            rate: 5.0,
            enthalpy: Some(5.38e4),
            table: None,
        }
    }
}

impl InjectionConfig {
    pub fn source_term(&self, element: &str, schedule: &ScheduleConfig) -> SourceTerm {
        SourceTerm {
            element: element.to_string(),
            name: self.source_name.clone(),
            component: self.component.clone(),
            rate: self.source_rate(schedule),
            enthalpy: self.enthalpy,
        }
    }

    fn source_rate(&self, schedule: &ScheduleConfig) -> SourceRate {
        if let Some(table) = &self.table {
            return SourceRate::Table(table.clone());
        }

        let shut_in = schedule.first_phase_end_seconds();
        let end = schedule.end_seconds();
        if shut_in > 0.0 && shut_in < end {
            SourceRate::Table(vec![
                RatePoint {
                    time: 0.0,
                    rate: self.rate,
                },
                RatePoint {
                    time: shut_in,
                    rate: 0.0,
                },
                RatePoint {
                    time: end,
                    rate: 0.0,
                },
            ])
        } else {
            SourceRate::Constant(self.rate)
        }
    }
}

/// `MULTI`, `SELEC` and `PARAM` controls for `flow.inp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// NK, NEQ, NPH, NB
    pub multi: [u32; 4],
    /// Written when the source deck has no `SELEC` block.
    pub selec: Vec<String>,
    pub max_iterations: u32,
    pub print_interval: u32,
    pub max_time_steps: u32,
    /// Verbatim MOP columns following MCYC on the first PARAM record.
    pub mop: String,
    /// Negative values select the DLT table that follows PARAM.2.
    pub initial_time_step: f64,
    pub max_time_step: f64,
    pub gravity: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            multi: [3, 3, 3, 6],
            selec: vec![
                "    1                                      0    0    0    0    0    0    1"
                    .to_string(),
                "       0.8       0.8".to_string(),
            ],
            max_iterations: 8,
            print_interval: 50,
            max_time_steps: 4000,
            mop: " 00000010  4   0500".to_string(),
            initial_time_step: -1.0,
            max_time_step: 1.0e-5,
            gravity: 9.81,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InconVariant {
    /// Ruler header and four 20-column fields per element.
    #[default]
    Fixed,
    /// No header, `.5E` values separated by two spaces.
    Free,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InconConfig {
    pub variant: InconVariant,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    pub duplicates: DuplicatePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoluteConfig {
    pub title: String,
    /// NWTI
    pub time_output_interval: u32,
    pub components: u32,
    pub minerals: u32,
    pub aqueous_species: u32,
    pub files: SoluteFiles,
}

impl Default for SoluteConfig {
    fn default() -> Self {
        Self {
            title: "'TOUGHREACT 3D CO2 Injection'".to_string(),
            time_output_interval: 100,
            components: 13,
            minerals: 4,
            aqueous_species: 13,
            files: SoluteFiles::default(),
        }
    }
}

/// File names handed to the simulator; the database is never opened here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoluteFiles {
    pub database: String,
    pub iteration: String,
    pub aqueous: String,
    pub minerals: String,
    pub gases: String,
    pub time_series: String,
}

impl Default for SoluteFiles {
    fn default() -> Self {
        Self {
            database: "TherAkin10.dat".to_string(),
            iteration: "iter.out".to_string(),
            aqueous: "co2d_conc.tec".to_string(),
            minerals: "co2d_min.tec".to_string(),
            gases: "co2d_gas.tec".to_string(),
            time_series: "co2d_tim.out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemistryConfig {
    pub title: String,
    pub primary_species: Vec<String>,
    pub gases: Vec<String>,
    pub water: WaterZoneConfig,
}

impl Default for ChemistryConfig {
    fn default() -> Self {
        let primary_species = [
            "h2o", "h+", "na+", "k+", "ca+2", "mg+2", "hco3-", "so4-2", "cl-", "sio2(aq)",
            "alo2-", "fe+2", "o2(aq)",
        ];
        Self {
            title: "CO2 storage brine: aqueous system without minerals".to_string(),
            primary_species: primary_species.iter().map(|name| name.to_string()).collect(),
            gases: vec!["co2(g)".to_string()],
            water: WaterZoneConfig::default(),
        }
    }
}

/// Initial water zone; species without an explicit concentration get the
/// trace value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterZoneConfig {
    /// deg C
    pub temperature: f64,
    pub pressure_bar: f64,
    pub trace_concentration: f64,
    pub concentrations: BTreeMap<String, f64>,
}

impl Default for WaterZoneConfig {
    fn default() -> Self {
        let concentrations = [("h2o", 1.0), ("h+", 1.0e-7), ("na+", 0.1), ("cl-", 0.1)];
        Self {
            temperature: 15.0,
            pressure_bar: 1.013,
            trace_concentration: 1.0e-10,
            concentrations: concentrations
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }
}

impl WaterZoneConfig {
    pub fn concentration(&self, species: &str) -> f64 {
        self.concentrations
            .get(species)
            .copied()
            .unwrap_or(self.trace_concentration)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read deck configuration '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse deck configuration '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl From<ConfigError> for DeckError {
    fn from(error: ConfigError) -> Self {
        match &error {
            ConfigError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                DeckError::missing_input("IO.CONFIG_MISSING", error.to_string())
            }
            ConfigError::Read { .. } => DeckError::io("IO.CONFIG_READ", error.to_string()),
            ConfigError::Parse { .. } => DeckError::config("CONFIG.PARSE", error.to_string()),
        }
    }
}

/// Defaults when no path is given.
pub fn load_deck_config(config_path: Option<&Path>) -> Result<DeckConfig, ConfigError> {
    let Some(config_path) = config_path else {
        return Ok(DeckConfig::default());
    };
    let source = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })
}
