//! Phone → feature bundle tables.
//!
//! The built-in table covers the IPA pulmonic consonants, the common
//! affricates and the cardinal vowels. Phones carrying a small set of
//! trailing modifiers (aspiration, ejective, length, labialization, nasal
//! tilde, (de)voicing, dental bridge) resolve against their base symbol.

use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;

use super::{Feature, FeatureBundle, FeatureValue};
use crate::error::ScoringError;

use Feature::*;
use FeatureValue::{Minus as M, Plus as P, Unspecified as U};

type Spec = &'static [(Feature, FeatureValue)];

const CONSONANT: Spec = &[
    (Syllabic, M),
    (DelayedRelease, M),
    (Lateral, M),
    (Nasal, M),
    (Strident, M),
    (SpreadGlottis, M),
    (ConstrictedGlottis, M),
    (Labial, M),
    (Round, M),
    (Tense, U),
    (Long, M),
];

const BILABIAL: Spec = &[(Anterior, P), (Coronal, M), (Distributed, P), (Labial, P), (High, M), (Low, M), (Back, M)];
const LABIODENTAL: Spec = &[(Anterior, P), (Coronal, M), (Distributed, M), (Labial, P), (High, M), (Low, M), (Back, M)];
const DENTAL: Spec = &[(Anterior, P), (Coronal, P), (Distributed, P), (High, M), (Low, M), (Back, M)];
const ALVEOLAR: Spec = &[(Anterior, P), (Coronal, P), (Distributed, M), (High, M), (Low, M), (Back, M)];
const POSTALVEOLAR: Spec = &[(Anterior, M), (Coronal, P), (Distributed, P), (High, P), (Low, M), (Back, M)];
const RETROFLEX: Spec = &[(Anterior, M), (Coronal, P), (Distributed, M), (High, M), (Low, M), (Back, M)];
const PALATAL: Spec = &[(Anterior, M), (Coronal, M), (Distributed, U), (High, P), (Low, M), (Back, M)];
const VELAR: Spec = &[(Anterior, M), (Coronal, M), (Distributed, U), (High, P), (Low, M), (Back, P)];
const LABIAL_VELAR: Spec = &[(Anterior, M), (Coronal, M), (Distributed, U), (Labial, P), (Round, P), (High, P), (Low, M), (Back, P)];
const UVULAR: Spec = &[(Anterior, M), (Coronal, M), (Distributed, U), (High, M), (Low, M), (Back, P)];
const PHARYNGEAL: Spec = &[(Anterior, M), (Coronal, M), (Distributed, U), (High, M), (Low, P), (Back, P)];
const GLOTTAL: Spec = &[(Anterior, M), (Coronal, M), (Distributed, U), (High, M), (Low, M), (Back, M)];

const STOP: Spec = &[(Sonorant, M), (Consonantal, P), (Continuant, M), (DelayedRelease, M)];
const AFFRICATE: Spec = &[(Sonorant, M), (Consonantal, P), (Continuant, M), (DelayedRelease, P)];
const FRICATIVE: Spec = &[(Sonorant, M), (Consonantal, P), (Continuant, P)];
const LATERAL_FRICATIVE: Spec = &[(Sonorant, M), (Consonantal, P), (Continuant, P), (Lateral, P)];
const NASAL: Spec = &[(Sonorant, P), (Consonantal, P), (Continuant, M), (Nasal, P)];
const TRILL: Spec = &[(Sonorant, P), (Consonantal, P), (Continuant, P)];
const TAP: Spec = &[(Sonorant, P), (Consonantal, P), (Continuant, M)];
const APPROXIMANT: Spec = &[(Sonorant, P), (Consonantal, M), (Continuant, P)];
const LATERAL_APPROXIMANT: Spec = &[(Sonorant, P), (Consonantal, P), (Continuant, P), (Lateral, P)];

const SIBILANT: Spec = &[(Strident, P)];
const ASPIRATED: Spec = &[(SpreadGlottis, P)];
const GLOTTALIZED: Spec = &[(ConstrictedGlottis, P)];
const NONE: Spec = &[];

/// (symbol, place, manner, voiced, extra)
const CONSONANTS: &[(&str, Spec, Spec, bool, Spec)] = &[
    ("p", BILABIAL, STOP, false, NONE),
    ("b", BILABIAL, STOP, true, NONE),
    ("m", BILABIAL, NASAL, true, NONE),
    ("ʙ", BILABIAL, TRILL, true, NONE),
    ("ɸ", BILABIAL, FRICATIVE, false, NONE),
    ("β", BILABIAL, FRICATIVE, true, NONE),
    ("ɱ", LABIODENTAL, NASAL, true, NONE),
    ("f", LABIODENTAL, FRICATIVE, false, SIBILANT),
    ("v", LABIODENTAL, FRICATIVE, true, SIBILANT),
    ("ʋ", LABIODENTAL, APPROXIMANT, true, NONE),
    ("θ", DENTAL, FRICATIVE, false, NONE),
    ("ð", DENTAL, FRICATIVE, true, NONE),
    ("t", ALVEOLAR, STOP, false, NONE),
    ("d", ALVEOLAR, STOP, true, NONE),
    ("n", ALVEOLAR, NASAL, true, NONE),
    ("r", ALVEOLAR, TRILL, true, NONE),
    ("ɾ", ALVEOLAR, TAP, true, NONE),
    ("s", ALVEOLAR, FRICATIVE, false, SIBILANT),
    ("z", ALVEOLAR, FRICATIVE, true, SIBILANT),
    ("ɬ", ALVEOLAR, LATERAL_FRICATIVE, false, NONE),
    ("ɮ", ALVEOLAR, LATERAL_FRICATIVE, true, NONE),
    ("ɹ", ALVEOLAR, APPROXIMANT, true, NONE),
    ("l", ALVEOLAR, LATERAL_APPROXIMANT, true, NONE),
    ("t͡s", ALVEOLAR, AFFRICATE, false, SIBILANT),
    ("d͡z", ALVEOLAR, AFFRICATE, true, SIBILANT),
    ("ʃ", POSTALVEOLAR, FRICATIVE, false, SIBILANT),
    ("ʒ", POSTALVEOLAR, FRICATIVE, true, SIBILANT),
    ("t͡ʃ", POSTALVEOLAR, AFFRICATE, false, SIBILANT),
    ("d͡ʒ", POSTALVEOLAR, AFFRICATE, true, SIBILANT),
    ("ɕ", POSTALVEOLAR, FRICATIVE, false, SIBILANT),
    ("ʑ", POSTALVEOLAR, FRICATIVE, true, SIBILANT),
    ("t͡ɕ", POSTALVEOLAR, AFFRICATE, false, SIBILANT),
    ("d͡ʑ", POSTALVEOLAR, AFFRICATE, true, SIBILANT),
    ("ʈ", RETROFLEX, STOP, false, NONE),
    ("ɖ", RETROFLEX, STOP, true, NONE),
    ("ɳ", RETROFLEX, NASAL, true, NONE),
    ("ɽ", RETROFLEX, TAP, true, NONE),
    ("ʂ", RETROFLEX, FRICATIVE, false, SIBILANT),
    ("ʐ", RETROFLEX, FRICATIVE, true, SIBILANT),
    ("ɻ", RETROFLEX, APPROXIMANT, true, NONE),
    ("ɭ", RETROFLEX, LATERAL_APPROXIMANT, true, NONE),
    ("c", PALATAL, STOP, false, NONE),
    ("ɟ", PALATAL, STOP, true, NONE),
    ("ɲ", PALATAL, NASAL, true, NONE),
    ("ç", PALATAL, FRICATIVE, false, NONE),
    ("ʝ", PALATAL, FRICATIVE, true, NONE),
    ("j", PALATAL, APPROXIMANT, true, NONE),
    ("ʎ", PALATAL, LATERAL_APPROXIMANT, true, NONE),
    ("k", VELAR, STOP, false, NONE),
    ("ɡ", VELAR, STOP, true, NONE),
    ("ŋ", VELAR, NASAL, true, NONE),
    ("x", VELAR, FRICATIVE, false, NONE),
    ("ɣ", VELAR, FRICATIVE, true, NONE),
    ("ɰ", VELAR, APPROXIMANT, true, NONE),
    ("ʟ", VELAR, LATERAL_APPROXIMANT, true, NONE),
    ("w", LABIAL_VELAR, APPROXIMANT, true, NONE),
    ("ʍ", LABIAL_VELAR, FRICATIVE, false, NONE),
    ("q", UVULAR, STOP, false, NONE),
    ("ɢ", UVULAR, STOP, true, NONE),
    ("ɴ", UVULAR, NASAL, true, NONE),
    ("ʀ", UVULAR, TRILL, true, NONE),
    ("χ", UVULAR, FRICATIVE, false, NONE),
    ("ʁ", UVULAR, FRICATIVE, true, NONE),
    ("ħ", PHARYNGEAL, FRICATIVE, false, NONE),
    ("ʕ", PHARYNGEAL, FRICATIVE, true, NONE),
    ("ʔ", GLOTTAL, STOP, false, GLOTTALIZED),
    ("h", GLOTTAL, FRICATIVE, false, ASPIRATED),
    ("ɦ", GLOTTAL, FRICATIVE, true, ASPIRATED),
];

const VOWEL: Spec = &[
    (Syllabic, P),
    (Sonorant, P),
    (Consonantal, M),
    (Continuant, P),
    (DelayedRelease, M),
    (Lateral, M),
    (Nasal, M),
    (Strident, M),
    (Voice, P),
    (SpreadGlottis, M),
    (ConstrictedGlottis, M),
    (Anterior, M),
    (Coronal, M),
    (Distributed, U),
    (Long, M),
];

const CLOSE: Spec = &[(High, P), (Low, M)];
const MID: Spec = &[(High, M), (Low, M)];
const OPEN: Spec = &[(High, M), (Low, P)];
const FRONT: Spec = &[(Back, M)];
const CENTRAL: Spec = &[(Back, U)];
const BACK: Spec = &[(Back, P)];

/// (symbol, height, backness, rounded, tense)
const VOWELS: &[(&str, Spec, Spec, bool, FeatureValue)] = &[
    ("i", CLOSE, FRONT, false, P),
    ("y", CLOSE, FRONT, true, P),
    ("ɨ", CLOSE, CENTRAL, false, U),
    ("ʉ", CLOSE, CENTRAL, true, U),
    ("ɯ", CLOSE, BACK, false, P),
    ("u", CLOSE, BACK, true, P),
    ("ɪ", CLOSE, FRONT, false, M),
    ("ʏ", CLOSE, FRONT, true, M),
    ("ʊ", CLOSE, BACK, true, M),
    ("e", MID, FRONT, false, P),
    ("ø", MID, FRONT, true, P),
    ("ɘ", MID, CENTRAL, false, U),
    ("ɵ", MID, CENTRAL, true, U),
    ("ɤ", MID, BACK, false, P),
    ("o", MID, BACK, true, P),
    ("ə", MID, CENTRAL, false, U),
    ("ɛ", MID, FRONT, false, M),
    ("œ", MID, FRONT, true, M),
    ("ɜ", MID, CENTRAL, false, U),
    ("ɞ", MID, CENTRAL, true, U),
    ("ʌ", MID, BACK, false, M),
    ("ɔ", MID, BACK, true, M),
    ("æ", OPEN, FRONT, false, M),
    ("ɐ", OPEN, CENTRAL, false, U),
    ("a", OPEN, FRONT, false, U),
    ("ɶ", OPEN, FRONT, true, U),
    ("ɑ", OPEN, BACK, false, U),
    ("ɒ", OPEN, BACK, true, U),
];

/// Trailing modifiers accepted after a base symbol.
const MODIFIERS: &[(char, Spec)] = &[
    ('ʰ', &[(SpreadGlottis, P)]),
    ('ʼ', &[(ConstrictedGlottis, P)]),
    ('ː', &[(Long, P)]),
    ('ʷ', &[(Round, P), (Labial, P)]),
    ('\u{0303}', &[(Nasal, P)]),
    ('\u{0325}', &[(Voice, M)]),
    ('\u{030A}', &[(Voice, M)]),
    ('\u{032C}', &[(Voice, P)]),
    ('\u{032A}', &[(Anterior, P), (Distributed, P)]),
];

fn polarity(flag: bool) -> FeatureValue {
    if flag {
        P
    } else {
        M
    }
}

fn build_builtin() -> FeatureTable {
    let mut entries = HashMap::with_capacity(CONSONANTS.len() + VOWELS.len());
    for &(symbol, place, manner, voiced, extra) in CONSONANTS {
        let bundle = FeatureBundle::from_pairs(CONSONANT)
            .with_all(place)
            .with_all(manner)
            .with(Voice, polarity(voiced))
            .with_all(extra);
        entries.insert(symbol.to_string(), bundle);
    }
    for &(symbol, height, backness, rounded, tense) in VOWELS {
        let bundle = FeatureBundle::from_pairs(VOWEL)
            .with_all(height)
            .with_all(backness)
            .with(Round, polarity(rounded))
            .with(Labial, polarity(rounded))
            .with(Tense, tense);
        entries.insert(symbol.to_string(), bundle);
    }
    FeatureTable { entries }
}

/// Lookup table from canonical phone strings to feature bundles.
#[derive(Debug, Clone, Default)]
pub struct FeatureTable {
    entries: HashMap<String, FeatureBundle>,
}

impl FeatureTable {
    pub fn builtin() -> &'static FeatureTable {
        static BUILTIN: OnceLock<FeatureTable> = OnceLock::new();
        BUILTIN.get_or_init(build_builtin)
    }

    /// Parses `{"p": {"son": "-", "voi": "-", ...}, ...}`. Features missing from
    /// an entry stay unspecified.
    pub fn from_json_str(json: &str) -> Result<Self, ScoringError> {
        let raw: HashMap<String, HashMap<String, String>> =
            serde_json::from_str(json).map_err(|e| ScoringError::json("parse feature table", e))?;

        let mut entries = HashMap::with_capacity(raw.len());
        for (phone, values) in raw {
            let mut bundle = FeatureBundle::unspecified();
            for (code, symbol) in values {
                let feature = Feature::from_code(&code).ok_or_else(|| {
                    ScoringError::invalid_input(format!(
                        "feature table entry '{phone}' uses unknown feature '{code}'"
                    ))
                })?;
                let value = FeatureValue::from_symbol(&symbol).ok_or_else(|| {
                    ScoringError::invalid_input(format!(
                        "feature table entry '{phone}' has invalid value '{symbol}' for '{code}'"
                    ))
                })?;
                bundle = bundle.with(feature, value);
            }
            entries.insert(phone, bundle);
        }
        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read feature table", e))?;
        Self::from_json_str(&data)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Exact lookup first, then the longest known base followed only by
    /// recognised modifiers.
    pub fn resolve(&self, phone: &str) -> Result<FeatureBundle, ScoringError> {
        if let Some(bundle) = self.entries.get(phone) {
            return Ok(*bundle);
        }

        let mut boundaries: Vec<usize> = phone.char_indices().map(|(idx, _)| idx).skip(1).collect();
        boundaries.reverse();
        for split in boundaries {
            let (base, suffix) = phone.split_at(split);
            let Some(bundle) = self.entries.get(base) else {
                continue;
            };
            if let Some(modified) = apply_modifiers(*bundle, suffix) {
                return Ok(modified);
            }
        }

        Err(ScoringError::unknown_phone(phone))
    }
}

fn apply_modifiers(bundle: FeatureBundle, suffix: &str) -> Option<FeatureBundle> {
    suffix.chars().try_fold(bundle, |acc, c| {
        MODIFIERS
            .iter()
            .find(|(m, _)| *m == c)
            .map(|(_, spec)| acc.with_all(spec))
    })
}
