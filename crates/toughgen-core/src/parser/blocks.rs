use super::record::Record;
use std::collections::BTreeMap;
use tracing::warn;

/// Keywords recognised in TOUGH source decks, in the order they are tried.
pub const SOURCE_DECK_KEYWORDS: [&str; 11] = [
    "ROCKS", "PARAM", "ELEME", "CONNE", "GENER", "INCON", "SOLVR", "MULTI", "SELEC", "START",
    "ENDCY",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub line_number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn record(&self) -> Record<'_> {
        Record::new(self.line_number, &self.text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckBlock {
    pub keyword: String,
    pub header_line: usize,
    pub lines: Vec<SourceLine>,
}

impl DeckBlock {
    pub fn raw_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }
}

/// Keyword-indexed blocks of a source deck. Absent keywords are simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeckBlocks {
    blocks: BTreeMap<String, DeckBlock>,
}

impl DeckBlocks {
    pub fn get(&self, keyword: &str) -> Option<&DeckBlock> {
        self.blocks.get(keyword)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.blocks.contains_key(keyword)
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.blocks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn close(&mut self, block: DeckBlock) {
        if let Some(previous) = self.blocks.get(&block.keyword) {
            warn!(
                keyword = %block.keyword,
                first = previous.header_line,
                replacement = block.header_line,
                "block appears more than once; keeping the later one"
            );
        }
        self.blocks.insert(block.keyword.clone(), block);
    }
}

pub fn segment_source_deck(source: &str) -> DeckBlocks {
    segment_blocks(source, &SOURCE_DECK_KEYWORDS)
}

/// Splits `source` at left-anchored keyword lines. Blank lines are dropped and
/// lines before the first keyword are ignored.
pub fn segment_blocks(source: &str, keywords: &[&str]) -> DeckBlocks {
    let mut blocks = DeckBlocks::default();
    let mut current: Option<DeckBlock> = None;

    for (index, raw) in source.lines().enumerate() {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        let stripped = text.trim();
        if stripped.is_empty() {
            continue;
        }

        if let Some(keyword) = keywords.iter().find(|keyword| stripped.starts_with(**keyword)) {
            if let Some(block) = current.take() {
                blocks.close(block);
            }
            current = Some(DeckBlock {
                keyword: (*keyword).to_string(),
                header_line: index + 1,
                lines: Vec::new(),
            });
            continue;
        }

        if let Some(block) = current.as_mut() {
            block.lines.push(SourceLine {
                line_number: index + 1,
                text: text.to_string(),
            });
        }
    }

    if let Some(block) = current.take() {
        blocks.close(block);
    }

    blocks
}
