use crate::domain::{DeckError, ParserResult};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Mandatory,
    Optional,
}

/// One fixed-format line plus its 1-based position in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub line_number: usize,
    pub text: &'a str,
}

impl<'a> Record<'a> {
    pub fn new(line_number: usize, text: &'a str) -> Self {
        Self { line_number, text }
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Columns `[start, end)`, zero-based. Optional fields clip to whatever the
    /// line actually holds.
    pub fn field(&self, range: Range<usize>, requirement: Requirement) -> ParserResult<&'a str> {
        if self.text.len() >= range.end {
            return self.text.get(range.clone()).ok_or_else(|| {
                DeckError::format(
                    "INPUT.RECORD_FIELD",
                    format!(
                        "line {} columns {}-{} split a multi-byte character",
                        self.line_number, range.start, range.end
                    ),
                )
            });
        }

        match requirement {
            Requirement::Mandatory => Err(DeckError::format(
                "INPUT.RECORD_TOO_SHORT",
                format!(
                    "line {} has {} columns but field {}-{} is mandatory",
                    self.line_number,
                    self.text.len(),
                    range.start,
                    range.end
                ),
            )),
            Requirement::Optional => Ok(self.text.get(range.start..).unwrap_or("")),
        }
    }

    pub fn text_field(&self, range: Range<usize>, requirement: Requirement) -> ParserResult<&'a str> {
        self.field(range, requirement).map(str::trim)
    }

    pub fn f64_field(&self, range: Range<usize>) -> ParserResult<f64> {
        let raw = self.field(range.clone(), Requirement::Mandatory)?;
        parse_fortran_f64(raw).ok_or_else(|| {
            DeckError::parse(
                "INPUT.RECORD_NUMERIC",
                format!(
                    "line {} columns {}-{}: expected a number, found '{}'",
                    self.line_number,
                    range.start,
                    range.end,
                    raw.trim()
                ),
            )
        })
    }

    /// Blank optional numeric fields read as `None`.
    pub fn optional_f64_field(&self, range: Range<usize>) -> ParserResult<Option<f64>> {
        let raw = self.field(range.clone(), Requirement::Optional)?;
        if raw.trim().is_empty() {
            return Ok(None);
        }
        self.f64_field(range.start..range.start + raw.len()).map(Some)
    }
}

/// Accepts Fortran `D` exponents alongside the usual forms (`1.e7`, `.457`).
/// `NaN` and infinities are not numbers in a deck.
pub fn parse_fortran_f64(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(['d', 'D'], "E").parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::{Record, Requirement, parse_fortran_f64};
    use crate::domain::DeckErrorKind;

    #[test]
    fn mandatory_field_on_short_line_is_a_format_error() {
        let record = Record::new(7, "A1  1");
        let error = record
            .field(0..10, Requirement::Mandatory)
            .expect_err("short line should fail");
        assert_eq!(error.kind(), DeckErrorKind::Format);
        assert!(error.message().contains("line 7"));
    }

    #[test]
    fn optional_field_clips_to_line_length() {
        let record = Record::new(1, "ROCK1   2  2600.0");
        assert_eq!(
            record.field(10..20, Requirement::Optional).expect("optional"),
            "  2600.0"
        );
        assert_eq!(
            record.field(30..40, Requirement::Optional).expect("optional"),
            ""
        );
    }

    #[test]
    fn numeric_field_reports_line_and_columns() {
        let record = Record::new(12, "abcdefghijklmnopqrst");
        let error = record.f64_field(10..20).expect_err("letters are not numeric");
        assert_eq!(error.kind(), DeckErrorKind::Parse);
        assert!(error.message().contains("line 12 columns 10-20"));
    }

    #[test]
    fn optional_numeric_field_tolerates_trailing_whitespace_and_blanks() {
        let record = Record::new(3, "          1.5e+02   ");
        assert_eq!(record.optional_f64_field(0..20).expect("parse"), Some(150.0));
        assert_eq!(record.optional_f64_field(20..30).expect("parse"), None);
    }

    #[test]
    fn fortran_numbers_parse() {
        assert_eq!(parse_fortran_f64(" 1.0d-09 "), Some(1.0e-9));
        assert_eq!(parse_fortran_f64("200.e5"), Some(2.0e7));
        assert_eq!(parse_fortran_f64(".457"), Some(0.457));
        assert_eq!(parse_fortran_f64("   "), None);
        assert_eq!(parse_fortran_f64("COM3h"), None);
    }

    #[test]
    fn non_finite_spellings_are_numeric_errors() {
        for raw in ["NaN", "inf", "-Infinity", "1e999"] {
            assert_eq!(parse_fortran_f64(raw), None, "{raw}");
        }
        let record = Record::new(4, "       NaN");
        let error = record.f64_field(0..10).expect_err("NaN is not a coordinate");
        assert_eq!(error.kind(), DeckErrorKind::Parse);
    }
}
