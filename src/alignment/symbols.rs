//! Glyphs of the Phon alignment notation and the legacy-symbol table.

/// Separates the target side from the actual side of a pair-token.
pub const LINK: char = '↔';
/// Separates pair-tokens.
pub const PAIR_SEPARATOR: char = ',';
/// Introduces a syllable-position tag, e.g. `s:O`.
pub const TAG_SEPARATOR: char = ':';
/// The null segment: a deletion on the actual side, an insertion on the target side.
pub const NULL_SEGMENT: &str = "∅";

/// `∅` read back through a Latin-1 decode of its UTF-8 bytes; old exports carry it.
const NULL_SEGMENT_MOJIBAKE: &str = "âˆ…";

/// Single-glyph symbols the feature table does not know, with their canonical spelling.
pub const LEGACY_SYMBOLS: &[(char, &str)] = &[
    ('ʧ', "t͡ʃ"),
    ('ʤ', "d͡ʒ"),
    ('ʦ', "t͡s"),
    ('ʣ', "d͡z"),
    ('ʨ', "t͡ɕ"),
    ('ʥ', "d͡ʑ"),
    ('g', "ɡ"),
    // undertie written in place of the tie bar
    ('\u{035C}', "\u{0361}"),
];

pub fn is_null_segment(symbol: &str) -> bool {
    symbol == NULL_SEGMENT || symbol == NULL_SEGMENT_MOJIBAKE
}

/// Expands every legacy glyph in `raw` to its canonical multi-character form.
pub fn canonicalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for c in raw.chars() {
        match LEGACY_SYMBOLS.iter().find(|(legacy, _)| *legacy == c) {
            Some((_, canonical)) => out.push_str(canonical),
            None => out.push(c),
        }
    }
    out
}
