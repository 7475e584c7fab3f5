use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;
use thiserror::Error;

/// The kinds of residue modification tracked by the observation store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModificationType {
    Acetylation,
    Phosphorylation,
    Dimethylation,
    /// Ubiquitin-like modification detected through its GG remnant.
    GlyGly,
    Hydroxylation,
}

impl ModificationType {
    pub const ALL: [ModificationType; 5] = [
        ModificationType::Acetylation,
        ModificationType::Phosphorylation,
        ModificationType::Dimethylation,
        ModificationType::GlyGly,
        ModificationType::Hydroxylation,
    ];

    /// The tag used by the observation store and the detail file for this type.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Acetylation => "acetyl",
            Self::Phosphorylation => "phosphoryl",
            Self::Dimethylation => "dimethyl",
            Self::GlyGly => "GGyl",
            Self::Hydroxylation => "hydroxyl",
        }
    }

    pub fn allowed_residues(self) -> &'static [u8] {
        match self {
            Self::Acetylation | Self::GlyGly => b"K",
            Self::Phosphorylation => b"STY",
            Self::Dimethylation => b"R",
            Self::Hydroxylation => b"PK",
        }
    }

    pub fn allows(self, residue: u8) -> bool {
        self.allowed_residues().contains(&residue)
    }

    /// Maps a residue of this type to its abstract tag, or `None` when the residue
    /// cannot carry the modification.
    pub fn residue_tag(self, residue: u8) -> Option<ModTag> {
        match (self, residue) {
            (Self::Acetylation, b'K') => Some(ModTag::AcetylK),
            (Self::Phosphorylation, b'S') => Some(ModTag::PhosphoS),
            (Self::Phosphorylation, b'T') => Some(ModTag::PhosphoT),
            (Self::Phosphorylation, b'Y') => Some(ModTag::PhosphoY),
            (Self::Dimethylation, b'R') => Some(ModTag::DimethylR),
            (Self::GlyGly, b'K') => Some(ModTag::GlyGlyK),
            (Self::Hydroxylation, b'P') => Some(ModTag::HydroxyP),
            (Self::Hydroxylation, b'K') => Some(ModTag::HydroxyK),
            _ => None,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Acetylation => 0,
            Self::Phosphorylation => 1,
            Self::Dimethylation => 2,
            Self::GlyGly => 3,
            Self::Hydroxylation => 4,
        }
    }
}

impl fmt::Display for ModificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unrecognized modification type tag '{0}'")]
pub struct UnknownModificationType(pub String);

impl FromStr for ModificationType {
    type Err = UnknownModificationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| UnknownModificationType(s.to_string()))
    }
}

/// A value for each [`ModificationType`], stored in a fixed-size array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModificationTable<T> {
    entries: [T; 5],
}

impl<T> ModificationTable<T> {
    pub fn from_fn(mut f: impl FnMut(ModificationType) -> T) -> Self {
        Self {
            entries: ModificationType::ALL.map(&mut f),
        }
    }

    pub fn try_from_fn<E>(
        mut f: impl FnMut(ModificationType) -> Result<T, E>,
    ) -> Result<Self, E> {
        let [a, b, c, d, e] = ModificationType::ALL;
        Ok(Self {
            entries: [f(a)?, f(b)?, f(c)?, f(d)?, f(e)?],
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (ModificationType, &T)> {
        ModificationType::ALL.into_iter().zip(self.entries.iter())
    }
}

impl<T> Index<ModificationType> for ModificationTable<T> {
    type Output = T;

    fn index(&self, index: ModificationType) -> &T {
        &self.entries[index.slot()]
    }
}

impl<T> IndexMut<ModificationType> for ModificationTable<T> {
    fn index_mut(&mut self, index: ModificationType) -> &mut T {
        &mut self.entries[index.slot()]
    }
}

/// A modification type observed on a specific residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModTag {
    AcetylK,
    PhosphoS,
    PhosphoT,
    PhosphoY,
    DimethylR,
    GlyGlyK,
    HydroxyP,
    HydroxyK,
}

impl ModTag {
    pub fn code(self) -> &'static str {
        match self {
            Self::AcetylK => "aK",
            Self::PhosphoS => "pS",
            Self::PhosphoT => "pT",
            Self::PhosphoY => "pY",
            Self::DimethylR => "dR",
            Self::GlyGlyK => "gK",
            Self::HydroxyP => "hP",
            Self::HydroxyK => "hK",
        }
    }

    pub fn modification(self) -> ModificationType {
        match self {
            Self::AcetylK => ModificationType::Acetylation,
            Self::PhosphoS | Self::PhosphoT | Self::PhosphoY => ModificationType::Phosphorylation,
            Self::DimethylR => ModificationType::Dimethylation,
            Self::GlyGlyK => ModificationType::GlyGly,
            Self::HydroxyP | Self::HydroxyK => ModificationType::Hydroxylation,
        }
    }
}

impl fmt::Display for ModTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Special-case bucket assigned from a protein's description rather than its residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneClass {
    /// Vitamin-K dependent γ-carboxylated proteins.
    Gla,
    /// Insulin paralogs, processed by non-tryptic cleavage.
    Semi,
    /// Hydroxyproline-rich: collagens, complement C1q, collectins, fibrinogen.
    HydroxyProline,
    /// Keratins (citrullinated arginine).
    CitrullineR,
    /// Ribosomal ubiquitin fusions.
    GlyGly,
    /// Thyroglobulin (iodinated tyrosine).
    IodoY,
}

impl GeneClass {
    pub fn code(self) -> &'static str {
        match self {
            Self::Gla => "gla",
            Self::Semi => "semi",
            Self::HydroxyProline => "cP",
            Self::CitrullineR => "cR",
            Self::GlyGly => "gG",
            Self::IodoY => "iY",
        }
    }
}

impl fmt::Display for GeneClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub type TagSet = BTreeSet<ModTag>;
pub type GeneClassSet = BTreeSet<GeneClass>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_from_str() {
        for t in ModificationType::ALL {
            assert_eq!(t.tag().parse::<ModificationType>(), Ok(t));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = "methyl".parse::<ModificationType>().unwrap_err();
        assert_eq!(err, UnknownModificationType("methyl".to_string()));
        assert!("Phosphoryl".parse::<ModificationType>().is_err());
    }

    #[test]
    fn residue_tag_only_exists_for_allowed_residues() {
        for t in ModificationType::ALL {
            for residue in b'A'..=b'Z' {
                assert_eq!(
                    t.residue_tag(residue).is_some(),
                    t.allows(residue),
                    "{t} / {}",
                    residue as char
                );
            }
        }
    }

    #[test]
    fn residue_tag_maps_back_to_its_type() {
        for t in ModificationType::ALL {
            for &residue in t.allowed_residues() {
                assert_eq!(t.residue_tag(residue).unwrap().modification(), t);
            }
        }
    }

    #[test]
    fn table_indexes_each_type_independently() {
        let mut table = ModificationTable::from_fn(|_| 0u32);
        table[ModificationType::Dimethylation] = 3;
        table[ModificationType::Hydroxylation] += 7;

        let values: Vec<_> = table.iter().map(|(t, v)| (t, *v)).collect();
        assert_eq!(
            values,
            vec![
                (ModificationType::Acetylation, 0),
                (ModificationType::Phosphorylation, 0),
                (ModificationType::Dimethylation, 3),
                (ModificationType::GlyGly, 0),
                (ModificationType::Hydroxylation, 7),
            ]
        );
    }

    #[test]
    fn try_from_fn_stops_at_first_error() {
        let result: Result<ModificationTable<u8>, &str> = ModificationTable::try_from_fn(|t| {
            if t == ModificationType::Dimethylation {
                Err("boom")
            } else {
                Ok(1)
            }
        });
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn gene_class_codes_are_distinct() {
        let classes = [
            GeneClass::Gla,
            GeneClass::Semi,
            GeneClass::HydroxyProline,
            GeneClass::CitrullineR,
            GeneClass::GlyGly,
            GeneClass::IodoY,
        ];
        let codes: BTreeSet<_> = classes.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), classes.len());
    }
}
