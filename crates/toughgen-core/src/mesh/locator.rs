use super::{MeshModel, empty_mesh_error};
use crate::domain::{DeckError, DeckResult, Element, Point3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestElement<'a> {
    pub element: &'a Element,
    pub distance_squared: f64,
}

impl MeshModel {
    /// Linear scan; on equal distances the first element in mesh order wins.
    /// Elements at a non-finite distance are never chosen.
    pub fn find_nearest(&self, target: Point3) -> DeckResult<NearestElement<'_>> {
        if self.is_empty() {
            return Err(empty_mesh_error());
        }

        let mut nearest: Option<NearestElement<'_>> = None;
        for element in self.elements() {
            let distance_squared = element.center.distance_squared(target);
            if !distance_squared.is_finite() {
                continue;
            }
            if nearest.is_none_or(|best| distance_squared < best.distance_squared) {
                nearest = Some(NearestElement {
                    element,
                    distance_squared,
                });
            }
        }
        let Some(nearest) = nearest else {
            return Err(DeckError::config(
                "CONFIG.INJECTION_TARGET",
                format!(
                    "no element lies at a finite distance from ({}, {}, {})",
                    target.x, target.y, target.z
                ),
            ));
        };

        tracing::debug!(
            element = %nearest.element.name,
            distance = nearest.distance_squared.sqrt(),
            "nearest element located"
        );
        Ok(nearest)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{DeckErrorKind, Element, Point3};
    use crate::mesh::tests::{eleme_line, lines};
    use crate::mesh::{DuplicatePolicy, MeshModel};

    fn mesh() -> MeshModel {
        let texts = [
            eleme_line("A1  1", "ROCK1", 0.0, 0.0, 0.0),
            eleme_line("A1  2", "ROCK1", 10.0, 0.0, 0.0),
            eleme_line("A1  3", "ROCK1", -10.0, 0.0, 0.0),
            eleme_line("A1  4", "ROCK1", 0.0, 0.0, -100.0),
        ];
        MeshModel::from_element_lines(&lines(&texts), DuplicatePolicy::LastWins).expect("mesh")
    }

    #[test]
    fn exact_center_match_has_zero_distance() {
        let mesh = mesh();
        let nearest = mesh
            .find_nearest(Point3::new(0.0, 0.0, -100.0))
            .expect("nearest");
        assert_eq!(nearest.element.name, "A1  4");
        assert_eq!(nearest.distance_squared, 0.0);
    }

    #[test]
    fn ties_resolve_to_first_element_in_mesh_order() {
        let mesh = mesh();
        let nearest = mesh
            .find_nearest(Point3::new(5.0, 0.0, 0.0))
            .expect("nearest");
        assert_eq!(nearest.element.name, "A1  1");
        assert_eq!(nearest.distance_squared, 25.0);

        let nearest = mesh
            .find_nearest(Point3::new(-5.0, 0.0, 0.0))
            .expect("nearest");
        assert_eq!(nearest.element.name, "A1  1");
    }

    #[test]
    fn non_finite_centers_never_win() {
        let mut texts = vec![
            eleme_line("A1  1", "ROCK1", 0.0, 0.0, 0.0),
            eleme_line("A1  2", "ROCK1", 0.0, 0.0, 0.0),
        ];
        texts[0].replace_range(50..60, "       NaN");
        let mesh = MeshModel::from_element_lines(&lines(&texts), DuplicatePolicy::LastWins)
            .expect("mesh");
        assert_eq!(mesh.len(), 1);
        assert_eq!(mesh.diagnostics().len(), 1);

        let nearest = mesh.find_nearest(Point3::default()).expect("nearest");
        assert_eq!(nearest.element.name, "A1  2");
        assert_eq!(nearest.distance_squared, 0.0);

        let mut mesh = mesh;
        mesh.elements.insert(
            0,
            Element {
                name: "A1  0".to_string(),
                rock_type: "ROCK1".to_string(),
                center: Point3::new(f64::NAN, 0.0, 0.0),
            },
        );
        let nearest = mesh.find_nearest(Point3::default()).expect("nearest");
        assert_eq!(nearest.element.name, "A1  2");

        let error = mesh
            .find_nearest(Point3::new(f64::INFINITY, 0.0, 0.0))
            .expect_err("no finite distance");
        assert_eq!(error.kind(), DeckErrorKind::Config);
    }

    #[test]
    fn empty_mesh_has_no_nearest_element() {
        let error = MeshModel::default()
            .find_nearest(Point3::default())
            .expect_err("empty mesh");
        assert_eq!(error.kind(), DeckErrorKind::EmptyMesh);
    }
}
