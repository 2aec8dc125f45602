use crate::domain::{DeckError, DeckResult, Element, InitialState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Surface state and gradients for the depth-dependent initial field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydrostaticConfig {
    /// Pa
    pub surface_pressure: f64,
    /// deg C
    pub surface_temperature: f64,
    /// deg C per m
    pub temperature_gradient: f64,
    /// kg/m3
    pub water_density: f64,
    pub gravity: f64,
    pub salinity: f64,
    pub co2_fraction: f64,
}

impl Default for HydrostaticConfig {
    fn default() -> Self {
        Self {
            surface_pressure: 1.013e5,
            surface_temperature: 15.0,
            temperature_gradient: 0.03,
            water_density: 1000.0,
            gravity: 9.81,
            salinity: 0.1,
            co2_fraction: 0.0,
        }
    }
}

impl HydrostaticConfig {
    pub fn state_at_depth(&self, depth: f64) -> InitialState {
        let depth = depth.max(0.0);
        InitialState {
            pressure: self.surface_pressure + self.water_density * self.gravity * depth,
            salinity: self.salinity,
            co2_fraction: self.co2_fraction,
            temperature: self.surface_temperature + self.temperature_gradient * depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    pub name: String,
    pub depth: f64,
    pub state: InitialState,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HydrostaticField {
    reference_z: f64,
    states: Vec<ElementState>,
    index: HashMap<String, usize>,
}

impl HydrostaticField {
    pub fn reference_z(&self) -> f64 {
        self.reference_z
    }

    /// States in mesh order.
    pub fn states(&self) -> &[ElementState] {
        &self.states
    }

    pub fn get(&self, name: &str) -> Option<&InitialState> {
        self.index.get(name).map(|&index| &self.states[index].state)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Depth is measured down from the shallowest element of the mesh and
/// clamped at zero.
pub fn compute_initial_state(
    elements: &[Element],
    config: &HydrostaticConfig,
) -> DeckResult<HydrostaticField> {
    let reference_z = elements
        .iter()
        .map(|element| element.center.z)
        .reduce(f64::max)
        .ok_or_else(|| {
            DeckError::empty_mesh(
                "INPUT.EMPTY_MESH",
                "hydrostatic field needs at least one element",
            )
        })?;

    let mut states = Vec::with_capacity(elements.len());
    let mut index = HashMap::with_capacity(elements.len());
    for element in elements {
        let depth = (reference_z - element.center.z).max(0.0);
        index.insert(element.name.clone(), states.len());
        states.push(ElementState {
            name: element.name.clone(),
            depth,
            state: config.state_at_depth(depth),
        });
    }

    Ok(HydrostaticField {
        reference_z,
        states,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::{HydrostaticConfig, compute_initial_state};
    use crate::domain::{DeckErrorKind, Element, Point3};

    fn element(name: &str, z: f64) -> Element {
        Element {
            name: name.to_string(),
            rock_type: "ROCK1".to_string(),
            center: Point3::new(0.0, 0.0, z),
        }
    }

    #[test]
    fn deepest_element_gets_full_hydrostatic_column() {
        let elements = [element("A1  1", 0.0), element("A1  2", 50.0), element("A1  3", 100.0)];
        let field = compute_initial_state(&elements, &HydrostaticConfig::default())
            .expect("field should compute");

        assert_eq!(field.reference_z(), 100.0);
        let deepest = field.get("A1  1").expect("deepest element");
        assert!((deepest.pressure - 1_082_300.0).abs() < 1.0e-6);
        assert!((deepest.temperature - 18.0).abs() < 1.0e-12);
        assert_eq!(deepest.salinity, 0.1);
        assert_eq!(deepest.co2_fraction, 0.0);

        let surface = field.get("A1  3").expect("surface element");
        assert_eq!(surface.pressure, 1.013e5);
        assert_eq!(surface.temperature, 15.0);
    }

    #[test]
    fn depth_is_never_negative_and_state_is_monotone_in_depth() {
        let elements = [
            element("A", -20.0),
            element("B", 35.0),
            element("C", -300.0),
            element("D", 35.0),
        ];
        let field = compute_initial_state(&elements, &HydrostaticConfig::default())
            .expect("field should compute");

        assert!(field.states().iter().all(|state| state.depth >= 0.0));

        let mut by_depth = field.states().to_vec();
        by_depth.sort_by(|left, right| left.depth.total_cmp(&right.depth));
        for pair in by_depth.windows(2) {
            assert!(pair[1].state.pressure >= pair[0].state.pressure);
            assert!(pair[1].state.temperature >= pair[0].state.temperature);
        }
    }

    #[test]
    fn negative_depth_request_is_clamped() {
        let config = HydrostaticConfig::default();
        assert_eq!(config.state_at_depth(-5.0), config.state_at_depth(0.0));
    }

    #[test]
    fn empty_element_list_is_rejected() {
        let error = compute_initial_state(&[], &HydrostaticConfig::default())
            .expect_err("no elements");
        assert_eq!(error.kind(), DeckErrorKind::EmptyMesh);
    }
}
