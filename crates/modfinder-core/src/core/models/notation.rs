use indexmap::IndexSet;
use std::fmt;

/// Separator between notations in the summary file's `pmods` attribute.
pub const NOTATION_SEPARATOR: &str = ",";

/// Monoisotopic mass shifts used in the summary annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MassDelta {
    Acetyl,
    Phospho,
    Dimethyl,
    Deamidation,
    Hydroxyl,
    Carboxyl,
    Iodo,
    GlyGly,
    /// Zero-mass marker used by the sentinel notations.
    Null,
}

impl MassDelta {
    pub fn monoisotopic(self) -> f64 {
        match self {
            Self::Acetyl => 42.010565,
            Self::Phospho => 79.966331,
            Self::Dimethyl => 28.031300,
            Self::Deamidation => 0.984016,
            Self::Hydroxyl => 15.994915,
            Self::Carboxyl => 43.989829,
            Self::Iodo => 125.896648,
            Self::GlyGly => 114.042927,
            Self::Null => 0.0,
        }
    }
}

/// Where a notation applies along the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Every occurrence of the residue.
    Residue,
    /// Relative to a chain end; rendered with the `]` marker.
    Terminus,
}

/// A (mass delta, residue) pair rendered as `<mass>@[<anchor>]<residue>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalNotation {
    pub delta: MassDelta,
    pub anchor: Anchor,
    pub residue: char,
}

impl CanonicalNotation {
    pub const fn new(delta: MassDelta, anchor: Anchor, residue: char) -> Self {
        Self {
            delta,
            anchor,
            residue,
        }
    }

    pub const ACETYL_K: Self = Self::new(MassDelta::Acetyl, Anchor::Terminus, 'K');
    pub const PHOSPHO_S: Self = Self::new(MassDelta::Phospho, Anchor::Residue, 'S');
    pub const PHOSPHO_T: Self = Self::new(MassDelta::Phospho, Anchor::Residue, 'T');
    pub const PHOSPHO_Y: Self = Self::new(MassDelta::Phospho, Anchor::Residue, 'Y');
    pub const DIMETHYL_R: Self = Self::new(MassDelta::Dimethyl, Anchor::Terminus, 'R');
    pub const DEAMIDATED_R: Self = Self::new(MassDelta::Deamidation, Anchor::Terminus, 'R');
    pub const HYDROXY_K: Self = Self::new(MassDelta::Hydroxyl, Anchor::Residue, 'K');
    pub const HYDROXY_P: Self = Self::new(MassDelta::Hydroxyl, Anchor::Residue, 'P');
    pub const CARBOXY_E: Self = Self::new(MassDelta::Carboxyl, Anchor::Residue, 'E');
    pub const IODO_Y: Self = Self::new(MassDelta::Iodo, Anchor::Residue, 'Y');
    pub const GLYGLY_K: Self = Self::new(MassDelta::GlyGly, Anchor::Terminus, 'K');
    /// No-cleavage marker applying to any residue.
    pub const ANY_RESIDUE: Self = Self::new(MassDelta::Null, Anchor::Residue, 'X');
    /// Non-specific cleavage marker.
    pub const SEMI_CLEAVAGE: Self = Self::new(MassDelta::Null, Anchor::Residue, 'Z');
}

impl fmt::Display for CanonicalNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}@", self.delta.monoisotopic())?;
        if self.anchor == Anchor::Terminus {
            f.write_str("]")?;
        }
        write!(f, "{}", self.residue)
    }
}

/// Deduplicated notations for one protein, kept in first-insertion order so that the
/// rendered string is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotationSet(IndexSet<CanonicalNotation>);

impl NotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the notation was already present.
    pub fn insert(&mut self, notation: CanonicalNotation) -> bool {
        self.0.insert(notation)
    }

    pub fn contains(&self, notation: &CanonicalNotation) -> bool {
        self.0.contains(notation)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalNotation> {
        self.0.iter()
    }

    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(NOTATION_SEPARATOR)
    }
}

impl Extend<CanonicalNotation> for NotationSet {
    fn extend<I: IntoIterator<Item = CanonicalNotation>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<CanonicalNotation> for NotationSet {
    fn from_iter<I: IntoIterator<Item = CanonicalNotation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_six_decimals_and_terminus_marker() {
        assert_eq!(CanonicalNotation::ACETYL_K.to_string(), "42.010565@]K");
        assert_eq!(CanonicalNotation::PHOSPHO_S.to_string(), "79.966331@S");
        assert_eq!(CanonicalNotation::DIMETHYL_R.to_string(), "28.031300@]R");
        assert_eq!(CanonicalNotation::DEAMIDATED_R.to_string(), "0.984016@]R");
        assert_eq!(CanonicalNotation::ANY_RESIDUE.to_string(), "0.000000@X");
        assert_eq!(CanonicalNotation::SEMI_CLEAVAGE.to_string(), "0.000000@Z");
    }

    #[test]
    fn sentinels_are_distinct() {
        assert_ne!(
            CanonicalNotation::ANY_RESIDUE,
            CanonicalNotation::SEMI_CLEAVAGE
        );
    }

    #[test]
    fn set_collapses_duplicates_and_keeps_insertion_order() {
        let mut set = NotationSet::new();
        assert!(set.insert(CanonicalNotation::PHOSPHO_T));
        assert!(set.insert(CanonicalNotation::PHOSPHO_S));
        assert!(!set.insert(CanonicalNotation::PHOSPHO_T));

        assert_eq!(set.len(), 2);
        assert_eq!(set.render(), "79.966331@T,79.966331@S");
    }

    #[test]
    fn empty_set_renders_empty_string() {
        assert_eq!(NotationSet::new().render(), "");
    }
}
