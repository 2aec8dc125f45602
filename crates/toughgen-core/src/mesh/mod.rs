//! Element table read from the `ELEME` block.

mod locator;

pub use locator::NearestElement;

use crate::domain::{DeckError, DeckResult, Element, ParserResult, Point3};
use crate::parser::{DeckBlocks, Record, Requirement, SourceLine};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt::{Display, Formatter};
use std::ops::Range;
use tracing::{debug, warn};

pub const ELEMENT_RECORD_WIDTH: usize = 80;

const NAME_COLUMNS: Range<usize> = 0..5;
const ROCK_COLUMNS: Range<usize> = 15..20;
const X_COLUMNS: Range<usize> = 50..60;
const Y_COLUMNS: Range<usize> = 60..70;
const Z_COLUMNS: Range<usize> = 70..80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later record replaces the earlier one in place; a diagnostic is kept.
    #[default]
    LastWins,
    Strict,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MeshDiagnosticKind {
    TooShort { length: usize },
    Unparseable { reason: String },
    DuplicateName { name: String, first_line: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeshDiagnostic {
    pub line_number: usize,
    pub kind: MeshDiagnosticKind,
}

impl Display for MeshDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            MeshDiagnosticKind::TooShort { length } => write!(
                f,
                "line {}: {} columns, element records need {}",
                self.line_number, length, ELEMENT_RECORD_WIDTH
            ),
            MeshDiagnosticKind::Unparseable { reason } => {
                write!(f, "line {}: {}", self.line_number, reason)
            }
            MeshDiagnosticKind::DuplicateName { name, first_line } => write!(
                f,
                "line {}: element '{}' already defined on line {}",
                self.line_number, name, first_line
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshModel {
    elements: Vec<Element>,
    source_lines: Vec<usize>,
    index: HashMap<String, usize>,
    diagnostics: Vec<MeshDiagnostic>,
}

impl MeshModel {
    /// A source deck without `ELEME` yields an empty mesh.
    pub fn from_blocks(blocks: &DeckBlocks, policy: DuplicatePolicy) -> ParserResult<Self> {
        match blocks.get("ELEME") {
            Some(block) => Self::from_element_lines(&block.lines, policy),
            None => {
                debug!("source deck has no ELEME block");
                Ok(Self::default())
            }
        }
    }

    pub fn from_element_lines(lines: &[SourceLine], policy: DuplicatePolicy) -> ParserResult<Self> {
        let mut mesh = Self::default();

        for line in lines {
            let record = line.record();
            if record.len() < ELEMENT_RECORD_WIDTH {
                mesh.skip(line.line_number, MeshDiagnosticKind::TooShort {
                    length: record.len(),
                });
                continue;
            }

            match parse_element(&record) {
                Ok(element) => mesh.insert(element, line.line_number, policy)?,
                Err(error) => mesh.skip(line.line_number, MeshDiagnosticKind::Unparseable {
                    reason: error.message().to_string(),
                }),
            }
        }

        debug!(
            elements = mesh.elements.len(),
            skipped = mesh.diagnostics.len(),
            "parsed ELEME block"
        );
        Ok(mesh)
    }

    fn skip(&mut self, line_number: usize, kind: MeshDiagnosticKind) {
        let diagnostic = MeshDiagnostic { line_number, kind };
        warn!("skipping ELEME record: {}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    fn insert(
        &mut self,
        element: Element,
        line_number: usize,
        policy: DuplicatePolicy,
    ) -> ParserResult<()> {
        let Some(&existing) = self.index.get(&element.name) else {
            self.index.insert(element.name.clone(), self.elements.len());
            self.elements.push(element);
            self.source_lines.push(line_number);
            return Ok(());
        };

        let first_line = self.source_lines[existing];
        match policy {
            DuplicatePolicy::Strict => Err(DeckError::format(
                "INPUT.DUPLICATE_ELEMENT",
                format!(
                    "element '{}' on line {} duplicates line {}",
                    element.name, line_number, first_line
                ),
            )),
            DuplicatePolicy::LastWins => {
                let diagnostic = MeshDiagnostic {
                    line_number,
                    kind: MeshDiagnosticKind::DuplicateName {
                        name: element.name.clone(),
                        first_line,
                    },
                };
                warn!("replacing element: {}", diagnostic);
                self.diagnostics.push(diagnostic);
                self.elements[existing] = element;
                self.source_lines[existing] = line_number;
                Ok(())
            }
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, name: &str) -> Option<&Element> {
        self.index.get(name).map(|&index| &self.elements[index])
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn diagnostics(&self) -> &[MeshDiagnostic] {
        &self.diagnostics
    }

    /// Shallowest element elevation; the hydrostatic reference surface.
    pub fn max_z(&self) -> Option<f64> {
        self.elements
            .iter()
            .map(|element| element.center.z)
            .reduce(f64::max)
    }

    /// Distinct rock-type codes, verbatim (blanks preserved).
    pub fn rock_types(&self) -> BTreeSet<&str> {
        self.elements
            .iter()
            .map(|element| element.rock_type.as_str())
            .collect()
    }

    pub fn require_elements(&self) -> DeckResult<()> {
        if self.is_empty() {
            return Err(empty_mesh_error());
        }
        Ok(())
    }
}

fn empty_mesh_error() -> DeckError {
    DeckError::empty_mesh("INPUT.EMPTY_MESH", "mesh has no usable ELEME records")
}

pub fn parse_element(record: &Record<'_>) -> ParserResult<Element> {
    let name = record.field(NAME_COLUMNS, Requirement::Mandatory)?;
    let rock_type = record.field(ROCK_COLUMNS, Requirement::Mandatory)?;
    let center = Point3::new(
        record.f64_field(X_COLUMNS)?,
        record.f64_field(Y_COLUMNS)?,
        record.f64_field(Z_COLUMNS)?,
    );

    Ok(Element {
        name: name.to_string(),
        rock_type: rock_type.to_string(),
        center,
    })
}
