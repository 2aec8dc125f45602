use crate::domain::{DeckError, DeckResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// `d.ddddE±XX`: the exponent sign is always written and the exponent is
/// zero-padded to `exponent_digits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScientificStyle {
    pub decimals: usize,
    pub exponent_digits: usize,
    /// Render exactly `-1.0` and `0.0` as `-1.` and `0.`.
    pub short_literals: bool,
}

impl ScientificStyle {
    /// PARAM, TIMES and scalar GENER fields.
    pub const TEN_CHAR: Self = Self {
        decimals: 3,
        exponent_digits: 2,
        short_literals: true,
    };
    pub const ROCK_PERMEABILITY: Self = Self {
        decimals: 2,
        exponent_digits: 2,
        short_literals: false,
    };
    /// Tabular GENER time/rate/enthalpy columns.
    pub const GENER_TABLE: Self = Self {
        decimals: 4,
        exponent_digits: 2,
        short_literals: false,
    };
    pub const INCON_FIELD: Self = Self {
        decimals: 14,
        exponent_digits: 2,
        short_literals: false,
    };
    pub const INCON_FREE: Self = Self {
        decimals: 5,
        exponent_digits: 2,
        short_literals: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    Fixed { decimals: usize },
    Scientific(ScientificStyle),
}

/// Renders `value` right-justified into exactly `width` columns. Numbers are
/// never truncated: a value that does not fit is an `EncodingError`.
pub fn encode(value: f64, width: usize, style: NumberStyle) -> DeckResult<String> {
    if !value.is_finite() {
        return Err(DeckError::encoding(
            "ENCODE.NON_FINITE",
            format!("cannot encode non-finite value {value} in {width} columns"),
        ));
    }

    let rendered = match style {
        NumberStyle::Fixed { decimals } => format!("{value:.decimals$}"),
        NumberStyle::Scientific(style) => {
            if let Some(literal) = short_literal(value, style) {
                literal.to_string()
            } else {
                let plain = scientific(value, style.decimals, style.exponent_digits);
                if plain.len() > width {
                    plain.replacen("E+", "E", 1)
                } else {
                    plain
                }
            }
        }
    };

    if rendered.len() > width {
        return Err(DeckError::encoding(
            "ENCODE.FIELD_OVERFLOW",
            format!(
                "value {value} renders as '{rendered}' ({} columns) but the field is {width} wide",
                rendered.len()
            ),
        ));
    }

    Ok(format!("{rendered:>width$}"))
}

pub fn encode_int(value: i64, width: usize) -> DeckResult<String> {
    let rendered = value.to_string();
    if rendered.len() > width {
        return Err(DeckError::encoding(
            "ENCODE.FIELD_OVERFLOW",
            format!("integer {value} does not fit in {width} columns"),
        ));
    }
    Ok(format!("{rendered:>width$}"))
}

/// Text is padded or silently cut to `width` characters.
pub fn encode_text(text: &str, width: usize, align: Align) -> String {
    let clipped: String = text.chars().take(width).collect();
    match align {
        Align::Left => format!("{clipped:<width$}"),
        Align::Right => format!("{clipped:>width$}"),
    }
}

/// Unpadded `d.dddE±XX` rendering.
pub fn scientific(value: f64, decimals: usize, exponent_digits: usize) -> String {
    let rendered = format!("{value:.decimals$e}");
    let (mantissa, exponent) = match rendered.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (rendered.as_str(), 0),
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!(
        "{mantissa}E{sign}{:0>exponent_digits$}",
        exponent.unsigned_abs()
    )
}

fn short_literal(value: f64, style: ScientificStyle) -> Option<&'static str> {
    if !style.short_literals {
        return None;
    }
    if value == -1.0 {
        Some("-1.")
    } else if value == 0.0 {
        Some("0.")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Align, NumberStyle, ScientificStyle, encode, encode_int, encode_text, scientific,
    };
    use crate::domain::DeckErrorKind;

    const TEN: NumberStyle = NumberStyle::Scientific(ScientificStyle::TEN_CHAR);

    #[test]
    fn short_literals_for_minus_one_and_zero() {
        assert_eq!(encode(-1.0, 10, TEN).expect("encode"), "       -1.");
        assert_eq!(encode(0.0, 10, TEN).expect("encode"), "        0.");
        assert_eq!(encode(-0.0, 10, TEN).expect("encode"), "        0.");
    }

    #[test]
    fn short_literals_are_opt_in() {
        let style = NumberStyle::Scientific(ScientificStyle::GENER_TABLE);
        assert_eq!(encode(0.0, 14, style).expect("encode"), "    0.0000E+00");
        assert_eq!(encode(-1.0, 14, style).expect("encode"), "   -1.0000E+00");
    }

    #[test]
    fn scientific_has_signed_padded_exponent() {
        assert_eq!(scientific(3.15576e8, 3, 2), "3.156E+08");
        assert_eq!(scientific(1.0e-5, 3, 2), "1.000E-05");
        assert_eq!(scientific(9.9996e4, 3, 2), "1.000E+05");
        assert_eq!(scientific(1.0e-100, 2, 2), "1.00E-100");
        assert_eq!(scientific(1_081_300.0, 14, 2), "1.08130000000000E+06");
    }

    #[test]
    fn plus_sign_is_dropped_only_when_the_field_overflows() {
        let style = NumberStyle::Scientific(ScientificStyle {
            decimals: 4,
            exponent_digits: 2,
            short_literals: true,
        });
        assert_eq!(encode(1.2345e10, 10, style).expect("fits"), "1.2345E+10");
        assert_eq!(encode(-1.2345e10, 10, style).expect("compressed"), "-1.2345E10");
    }

    #[test]
    fn values_that_still_overflow_fail() {
        let style = NumberStyle::Scientific(ScientificStyle {
            decimals: 4,
            exponent_digits: 2,
            short_literals: false,
        });
        let error = encode(-1.0e-5, 10, style).expect_err("negative exponent cannot compress");
        assert_eq!(error.kind(), DeckErrorKind::Encoding);

        let error = encode(123_456.789, 8, NumberStyle::Fixed { decimals: 3 })
            .expect_err("fixed overflow");
        assert_eq!(error.kind(), DeckErrorKind::Encoding);

        let error = encode(f64::NAN, 10, TEN).expect_err("nan");
        assert_eq!(error.kind(), DeckErrorKind::Encoding);
    }

    #[test]
    fn every_encoded_field_has_the_requested_width() {
        let samples = [0.0, -1.0, 1.0, 2600.0, 0.1, 1.0e-13, -273.15, 3.15576e9, 6.02e23];
        for value in samples {
            for width in [10, 14, 20] {
                let encoded = encode(value, width, TEN).expect("fits");
                assert_eq!(encoded.len(), width, "{value} in {width}: '{encoded}'");
            }
            let fixed = encode(value.min(1.0e6), 16, NumberStyle::Fixed { decimals: 3 })
                .expect("fixed fits");
            assert_eq!(fixed.len(), 16);
        }
    }

    #[test]
    fn fixed_point_matches_rock_layout() {
        let style = NumberStyle::Fixed { decimals: 3 };
        assert_eq!(encode(2600.0, 10, style).expect("encode"), "  2600.000");
        assert_eq!(encode(0.1, 10, style).expect("encode"), "     0.100");
    }

    #[test]
    fn text_is_padded_or_truncated() {
        assert_eq!(encode_text("INJ01", 5, Align::Left), "INJ01");
        assert_eq!(encode_text("COM3", 5, Align::Left), "COM3 ");
        assert_eq!(encode_text("TherAkin10.dat", 8, Align::Left), "TherAkin");
        assert_eq!(encode_text("7", 3, Align::Right), "  7");
    }

    #[test]
    fn integers_are_right_justified() {
        assert_eq!(encode_int(2, 5).expect("encode"), "    2");
        assert_eq!(encode_int(4000, 4).expect("encode"), "4000");
        assert_eq!(
            encode_int(40000, 4).expect_err("overflow").kind(),
            DeckErrorKind::Encoding
        );
    }
}
