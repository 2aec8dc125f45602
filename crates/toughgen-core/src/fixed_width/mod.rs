pub mod encoder;
pub mod policy;

pub use encoder::{
    Align, NumberStyle, ScientificStyle, encode, encode_int, encode_text, scientific,
};
pub use policy::{DeckFormat, DeckWriter, Header, RULER_TAIL, SectionFormat, Terminator, ruler};

/// `TEN_CHAR` scientific rendering into a 10-column field.
pub fn encode_ten(value: f64) -> crate::domain::DeckResult<String> {
    encode(value, 10, NumberStyle::Scientific(ScientificStyle::TEN_CHAR))
}
