//! Section order, headers and terminators for every deck format.

use crate::domain::{DeckError, DeckResult};

/// Column ruler that follows a five-character keyword on a header line.
pub const RULER_TAIL: &str =
    "----1----*----2----*----3----*----4----*----5----*----6----*----7----*----8";

const SELEC_HEADER: &str =
    "SELEC....2....3....4....5....6....7....8....9...10...11...12...13...14...15...16";
const REACT_HEADER: &str =
    "REACT----1MOPR(20)-2----*----3----*----4----*----5----*----6----*----7----*----8";
pub const CHEMICAL_RULE: &str =
    "#-----------------------------------------------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// Keyword followed by [`RULER_TAIL`].
    Ruler,
    Literal(&'static str),
    Lines(&'static [&'static str]),
    /// Keyword alone on its line.
    Bare,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    None,
    BlankLine,
    Asterisk,
}

impl Terminator {
    fn line(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::BlankLine => Some(""),
            Self::Asterisk => Some("*"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFormat {
    pub keyword: &'static str,
    pub header: Header,
    pub terminator: Terminator,
}

const fn section(keyword: &'static str, header: Header, terminator: Terminator) -> SectionFormat {
    SectionFormat {
        keyword,
        header,
        terminator,
    }
}

const fn comment(keyword: &'static str, text: &'static str) -> SectionFormat {
    section(keyword, Header::Literal(text), Terminator::None)
}

const fn starred(keyword: &'static str, text: &'static str) -> SectionFormat {
    section(keyword, Header::Literal(text), Terminator::Asterisk)
}

const MESH_SECTIONS: [SectionFormat; 2] = [
    section("ELEME", Header::Ruler, Terminator::BlankLine),
    section("CONNE", Header::Ruler, Terminator::BlankLine),
];

const FLOW_SECTIONS: [SectionFormat; 10] = [
    section("ROCKS", Header::Ruler, Terminator::BlankLine),
    section("MULTI", Header::Ruler, Terminator::None),
    section("SELEC", Header::Literal(SELEC_HEADER), Terminator::None),
    section("SOLVR", Header::Ruler, Terminator::None),
    section("START", Header::Ruler, Terminator::None),
    section("REACT", Header::Literal(REACT_HEADER), Terminator::None),
    section("PARAM", Header::Ruler, Terminator::None),
    section("TIMES", Header::Ruler, Terminator::None),
    section("GENER", Header::Ruler, Terminator::BlankLine),
    section("ENDCY", Header::Bare, Terminator::None),
];

const INCON_FIXED_SECTIONS: [SectionFormat; 1] =
    [section("INCON", Header::Ruler, Terminator::BlankLine)];

const INCON_FREE_SECTIONS: [SectionFormat; 1] =
    [section("INCON", Header::None, Terminator::BlankLine)];

const SOLUTE_SECTIONS: [SectionFormat; 16] = [
    comment("TITLE", "# Title"),
    comment(
        "OPTIONS",
        "#ISPIA,itersfa,ISOLVC,NGAMM,NGAS1,ichdump,kcpl,Ico2h2o,nu",
    ),
    comment(
        "CONSTRAINTS",
        "#constraints for chemical solver:  sl1min, rcour, stimax, cnfact",
    ),
    comment("FILES", "#Read input and output file names:"),
    comment("WEIGHTING", "#Weighting parameters"),
    comment("CONVERGENCE", "#data to convergence criteria:"),
    comment(
        "OUTPUT",
        "#NWTI NWNOD NWCOM NWMIN NWAQ NWADS NWEXC iconflag minflag  igasflag",
    ),
    comment("NODES", "#pointer of nodes for writing in time:"),
    comment("COMPONENTS", "#pointer of components for writing:"),
    comment("MINERALS", "#pointer of minerals for writing:"),
    comment(
        "AQUEOUS",
        "#Individual aqueous species for which to output concentrations:",
    ),
    comment(
        "ADSORPTION",
        "#Adsorption species for which to output concentrations in time and plot files:",
    ),
    comment(
        "EXCHANGE",
        "#Exchange species for which to output concentrations in time and plot files:",
    ),
    comment(
        "DEFAULT_ZONES",
        "#IZIWDF IZBWDF IZMIDF IZGSDF IZADDF IZEXDF IZPPDF IZKDDF IZBGDF (default types of chemical zones)",
    ),
    comment(
        "ELEMENT_ZONES",
        "#ELEM(a5) NSEQ NADD IZIW IZBW IZMI IZGS IZAD IZEX izpp IZKD IZBG",
    ),
    section(
        "END",
        Header::Literal("# this \"end\" record is needed now"),
        Terminator::None,
    ),
];

const CHEMICAL_SECTIONS: [SectionFormat; 16] = [
    comment("TITLE", "# Title"),
    starred("PRIMARY", "# PRIMARY AQUEOUS SPECIES"),
    starred("AQUEOUS_KINETICS", "# AQUEOUS KINETICS"),
    starred("AQUEOUS_COMPLEXES", "# AQUEOUS COMPLEXES"),
    starred("MINERALS", "# MINERALS"),
    starred("GASES", "# GASES"),
    starred("SURFACE_COMPLEXES", "# SURFACE COMPLEXES"),
    starred(
        "DECAY",
        "# species with Kd and decay    decay constant(1/s)",
    ),
    starred("EXCHANGEABLE_CATIONS", "# EXCHANGEABLE CATIONS"),
    section(
        "WATER_ZONES",
        Header::Lines(&[CHEMICAL_RULE, "# INITIAL AND BOUNDARY WATER TYPES"]),
        Terminator::Asterisk,
    ),
    starred("MINERAL_ZONES", "# INITIAL MINERAL ZONES"),
    starred("GAS_ZONES", "# INITIAL gas ZONES"),
    starred("PERM_PORO_ZONES", "# Permeability-Porosity Zones"),
    starred("ADSORPTION_ZONES", "# INITIAL SURFACE ADSORPTION ZONES"),
    starred("KD_ZONES", "# INITIAL LINEAR EQUILIBRIUM Kd ZONE"),
    starred("EXCHANGE_ZONES", "# INITIAL ZONES OF CATION EXCHANGE"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeckFormat {
    Mesh,
    Flow,
    InconFixed,
    InconFree,
    Solute,
    Chemical,
}

impl DeckFormat {
    pub fn sections(self) -> &'static [SectionFormat] {
        match self {
            Self::Mesh => &MESH_SECTIONS,
            Self::Flow => &FLOW_SECTIONS,
            Self::InconFixed => &INCON_FIXED_SECTIONS,
            Self::InconFree => &INCON_FREE_SECTIONS,
            Self::Solute => &SOLUTE_SECTIONS,
            Self::Chemical => &CHEMICAL_SECTIONS,
        }
    }

    /// Lines closing the deck after its last section.
    pub fn trailer(self) -> &'static [&'static str] {
        match self {
            Self::Solute => &["end"],
            Self::Chemical => &["# end"],
            Self::Mesh | Self::Flow | Self::InconFixed | Self::InconFree => &[],
        }
    }
}

pub fn ruler(keyword: &str) -> String {
    format!("{keyword:<5}{RULER_TAIL}")
}

/// Accumulates a deck section by section in the order its format declares.
#[derive(Debug, Clone)]
pub struct DeckWriter {
    format: DeckFormat,
    lines: Vec<String>,
    next_section: usize,
}

impl DeckWriter {
    pub fn new(format: DeckFormat) -> Self {
        Self {
            format,
            lines: Vec::new(),
            next_section: 0,
        }
    }

    pub fn format(&self) -> DeckFormat {
        self.format
    }

    /// Free line outside any section (deck titles).
    pub fn line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn section<I>(&mut self, keyword: &str, body: I) -> DeckResult<()>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let sections = self.format.sections();
        let offset = sections[self.next_section..]
            .iter()
            .position(|section| section.keyword == keyword)
            .ok_or_else(|| {
                DeckError::encoding(
                    "ENCODE.SECTION_ORDER",
                    format!(
                        "section '{}' is unknown or out of order for the {:?} deck",
                        keyword, self.format
                    ),
                )
            })?;
        let format = sections[self.next_section + offset];
        self.next_section += offset + 1;

        match format.header {
            Header::Ruler => self.lines.push(ruler(format.keyword)),
            Header::Literal(text) => self.lines.push(text.to_string()),
            Header::Lines(texts) => self.lines.extend(texts.iter().map(|text| text.to_string())),
            Header::Bare => self.lines.push(format.keyword.to_string()),
            Header::None => {}
        }
        self.lines.extend(body.into_iter().map(Into::into));
        if let Some(line) = format.terminator.line() {
            self.lines.push(line.to_string());
        }
        Ok(())
    }

    /// Deck text with `\n` line endings and a final newline. A deck with no
    /// lines at all renders as an empty file.
    pub fn finish(mut self) -> String {
        self.lines
            .extend(self.format.trailer().iter().map(|line| line.to_string()));
        if self.lines.is_empty() {
            return String::new();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::{DeckFormat, DeckWriter, RULER_TAIL, ruler};
    use crate::domain::DeckErrorKind;

    #[test]
    fn rulers_are_eighty_columns() {
        assert_eq!(RULER_TAIL.len(), 75);
        assert_eq!(ruler("ROCKS").len(), 80);
        assert_eq!(
            ruler("INCON"),
            "INCON----1----*----2----*----3----*----4----*----5----*----6----*----7----*----8"
        );
        for format in [DeckFormat::Flow, DeckFormat::Mesh, DeckFormat::InconFixed] {
            for section in format.sections() {
                if let super::Header::Literal(text) = section.header {
                    assert_eq!(text.len(), 80, "{}", section.keyword);
                }
            }
        }
    }

    #[test]
    fn terminators_follow_the_format_table() {
        let mut writer = DeckWriter::new(DeckFormat::Flow);
        writer.line("title");
        writer.section("ROCKS", ["rock"]).expect("ROCKS");
        writer.section("MULTI", ["    3"]).expect("MULTI");
        writer.section("GENER", Vec::<String>::new()).expect("GENER");
        writer.section("ENDCY", Vec::<String>::new()).expect("ENDCY");
        let text = writer.finish();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "title");
        assert_eq!(lines[1], ruler("ROCKS"));
        assert_eq!(lines[2], "rock");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], ruler("MULTI"));
        assert_eq!(lines[5], "    3");
        assert_eq!(lines[6], ruler("GENER"));
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "ENDCY");
        assert!(text.ends_with("ENDCY\n"));
    }

    #[test]
    fn chemical_blocks_close_with_asterisks_and_solute_with_end() {
        let mut chemical = DeckWriter::new(DeckFormat::Chemical);
        chemical.section("GASES", ["co2(g)"]).expect("GASES");
        assert_eq!(chemical.finish(), "# GASES\nco2(g)\n*\n# end\n");

        let mut solute = DeckWriter::new(DeckFormat::Solute);
        solute.section("NODES", [""]).expect("NODES");
        assert_eq!(
            solute.finish(),
            "#pointer of nodes for writing in time:\n\nend\n"
        );
    }

    #[test]
    fn free_incon_has_no_header() {
        let mut writer = DeckWriter::new(DeckFormat::InconFree);
        writer.section("INCON", ["A1  1"]).expect("INCON");
        assert_eq!(writer.finish(), "A1  1\n\n");
    }

    #[test]
    fn out_of_order_sections_are_rejected() {
        let mut writer = DeckWriter::new(DeckFormat::Mesh);
        writer.section("CONNE", ["c"]).expect("CONNE");
        let error = writer
            .section("ELEME", ["e"])
            .expect_err("ELEME after CONNE");
        assert_eq!(error.kind(), DeckErrorKind::Encoding);
    }
}
