use super::config::HYDROXYLATION_MIN_SITES;
use crate::core::models::modification::{GeneClass, GeneClassSet, ModTag, TagSet};
use crate::core::models::notation::{CanonicalNotation as N, NotationSet};

/// Which condition enabled the hydroxylation notations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydroxylationPath {
    /// Enough qualifying hydroxylation sites were observed.
    SiteCount,
    /// The protein belongs to the hydroxyproline gene class.
    GeneClass,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub notations: NotationSet,
    pub hydroxylation: Option<HydroxylationPath>,
}

impl Resolution {
    pub fn is_renderable(&self) -> bool {
        !self.notations.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Tag(ModTag),
    Class(GeneClass),
    Hydroxylation,
}

struct NotationRule {
    trigger: Trigger,
    notations: &'static [N],
}

/// Evaluated top to bottom; notations accumulate into one set, so the order here is the
/// order of the rendered `pmods` string.
static RULES: [NotationRule; 11] = [
    NotationRule { trigger: Trigger::Tag(ModTag::AcetylK), notations: &[N::ACETYL_K] },
    NotationRule { trigger: Trigger::Tag(ModTag::PhosphoS), notations: &[N::PHOSPHO_S] },
    NotationRule { trigger: Trigger::Tag(ModTag::PhosphoT), notations: &[N::PHOSPHO_T] },
    NotationRule { trigger: Trigger::Tag(ModTag::PhosphoY), notations: &[N::PHOSPHO_Y] },
    NotationRule { trigger: Trigger::Tag(ModTag::DimethylR), notations: &[N::DIMETHYL_R] },
    NotationRule { trigger: Trigger::Class(GeneClass::CitrullineR), notations: &[N::DEAMIDATED_R] },
    NotationRule {
        trigger: Trigger::Hydroxylation,
        notations: &[N::HYDROXY_K, N::HYDROXY_P, N::ANY_RESIDUE],
    },
    NotationRule { trigger: Trigger::Class(GeneClass::Gla), notations: &[N::CARBOXY_E] },
    NotationRule { trigger: Trigger::Class(GeneClass::IodoY), notations: &[N::IODO_Y] },
    NotationRule {
        trigger: Trigger::Class(GeneClass::GlyGly),
        notations: &[N::GLYGLY_K, N::ANY_RESIDUE],
    },
    NotationRule { trigger: Trigger::Class(GeneClass::Semi), notations: &[N::SEMI_CLEAVAGE] },
];

/// The site-count path takes precedence over the gene-class path when both hold.
fn hydroxylation_path(
    tags: &TagSet,
    classes: &GeneClassSet,
    hydroxyl_hits: usize,
) -> Option<HydroxylationPath> {
    let tagged = tags.contains(&ModTag::HydroxyP) || tags.contains(&ModTag::HydroxyK);
    if tagged && hydroxyl_hits >= HYDROXYLATION_MIN_SITES {
        Some(HydroxylationPath::SiteCount)
    } else if classes.contains(&GeneClass::HydroxyProline) {
        Some(HydroxylationPath::GeneClass)
    } else {
        None
    }
}

/// Maps a protein's tags and gene classes to its deduplicated canonical notations.
pub fn resolve(tags: &TagSet, classes: &GeneClassSet, hydroxyl_hits: usize) -> Resolution {
    let hydroxylation = hydroxylation_path(tags, classes, hydroxyl_hits);
    let mut notations = NotationSet::new();

    for rule in &RULES {
        let fired = match rule.trigger {
            Trigger::Tag(tag) => tags.contains(&tag),
            Trigger::Class(class) => classes.contains(&class),
            Trigger::Hydroxylation => hydroxylation.is_some(),
        };
        if fired {
            notations.extend(rule.notations.iter().copied());
        }
    }

    Resolution {
        notations,
        hydroxylation,
    }
}
