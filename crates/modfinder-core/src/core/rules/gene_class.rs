use crate::core::models::modification::{GeneClass, GeneClassSet};
use once_cell::sync::Lazy;
use phf::{Set, phf_set};
use regex::Regex;

/// Marks the start of a protein-change annotation appended to a gene name.
const VARIANT_MARKER: char = ':';

static INSULIN_PARALOGS: Set<&'static str> = phf_set! {
    "ins", "ins1", "ins2", "insl3", "insl4", "insl5", "insl6",
    "igf1", "igf2", "rln1", "rln2", "rln3",
};

static GLA_PROTEINS: Set<&'static str> = phf_set! {
    "f2", "f7", "f9", "f10", "proc", "pros1", "proz", "gas6", "bglap", "mgp",
    "prrg1", "prrg2", "prrg3", "prrg4",
};

static UBIQUITIN_FUSIONS: Set<&'static str> = phf_set! {
    "uba52", "rps27a", "ubb", "ubc",
};

static HYDROXYPROLINE_FAMILY: Set<&'static str> = phf_set! {
    "c1qa", "c1qb", "c1qc", "mbl2", "sftpa1", "sftpa2", "sftpd",
    "colec10", "colec11", "colec12", "fcn1", "fcn2", "fcn3", "adipoq",
    "fga", "fgb", "fgg",
};

static THYROGLOBULIN: Set<&'static str> = phf_set! {
    "tg",
};

static EXACT_RULES: [(&Set<&'static str>, GeneClass); 5] = [
    (&INSULIN_PARALOGS, GeneClass::Semi),
    (&GLA_PROTEINS, GeneClass::Gla),
    (&UBIQUITIN_FUSIONS, GeneClass::GlyGly),
    (&HYDROXYPROLINE_FAMILY, GeneClass::HydroxyProline),
    (&THYROGLOBULIN, GeneClass::IodoY),
];

static KERATIN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^krt\d+[a-z]?$").expect("keratin pattern is valid"));

static COLLAGEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^col\d+a\d+$").expect("collagen pattern is valid"));

/// Lowercases a description and drops any variant suffix (`COL1A1:p.G12S` -> `col1a1`).
pub fn normalize_description(description: &str) -> String {
    let head = description
        .split_once(VARIANT_MARKER)
        .map_or(description, |(head, _)| head);
    head.trim().to_lowercase()
}

/// Returns every special-case gene class the description belongs to.
pub fn match_gene_classes(description: &str) -> GeneClassSet {
    let name = normalize_description(description);
    let mut classes = GeneClassSet::new();
    if name.is_empty() {
        return classes;
    }

    for (names, class) in &EXACT_RULES {
        if names.contains(name.as_str()) {
            classes.insert(*class);
        }
    }
    if KERATIN_PATTERN.is_match(&name) {
        classes.insert(GeneClass::CitrullineR);
    }
    if COLLAGEN_PATTERN.is_match(&name) {
        classes.insert(GeneClass::HydroxyProline);
    }
    classes
}
