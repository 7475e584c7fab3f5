use super::config::threshold_for;
use crate::core::models::evidence::EvidenceEntry;
use crate::core::models::modification::{
    ModTag, ModificationTable, ModificationType, TagSet,
};
use crate::core::store::provider::ObservationMap;

/// What the observation maps say about one protein.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Type+residue tags observed at or above their threshold.
    pub tags: TagSet,
    /// Every allowed-residue position with a positive count, ascending by position.
    pub evidence: ModificationTable<Vec<EvidenceEntry>>,
    /// Number of hydroxylation sites at or above the hydroxylation threshold.
    pub hydroxyl_hits: usize,
}

impl Classification {
    pub fn has_hydroxylation_tag(&self) -> bool {
        self.tags.contains(&ModTag::HydroxyP) || self.tags.contains(&ModTag::HydroxyK)
    }
}

/// Classifies the residues of one protein.
///
/// A position contributes to a modification type only when its residue is one the type
/// can modify. Positive counts become evidence entries; counts reaching the type's
/// threshold add the type+residue tag. Hydroxylation uses a fixed threshold and also
/// counts its qualifying sites.
pub fn classify(
    sequence: &str,
    observations: &ModificationTable<ObservationMap>,
    min_observations: u32,
) -> Classification {
    let mut result = Classification::default();

    for (index, &residue) in sequence.as_bytes().iter().enumerate() {
        let position = index + 1;
        for modification in ModificationType::ALL {
            let Some(tag) = modification.residue_tag(residue) else {
                continue;
            };
            let Some(count) = observations[modification].get(position) else {
                continue;
            };
            if count > 0 {
                result.evidence[modification].push(EvidenceEntry::new(
                    residue as char,
                    position,
                    count,
                ));
            }
            if count >= threshold_for(modification, min_observations) {
                result.tags.insert(tag);
                if modification == ModificationType::Hydroxylation {
                    result.hydroxyl_hits += 1;
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::{DEFAULT_MIN_OBSERVATIONS, HYDROXYLATION_MIN_OBSERVATIONS};

    fn observations(
        length: usize,
        rows: &[(ModificationType, usize, u32)],
    ) -> ModificationTable<ObservationMap> {
        ModificationTable::from_fn(|modification| {
            ObservationMap::from_observations(
                length,
                rows.iter()
                    .filter(|(t, _, _)| *t == modification)
                    .map(|&(_, p, c)| (p, c)),
            )
        })
    }

    #[test]
    fn phospho_serine_scenario() {
        let obs = observations(4, &[(ModificationType::Phosphorylation, 2, 7)]);
        let result = classify("MSTK", &obs, 5);

        assert_eq!(result.tags, TagSet::from([ModTag::PhosphoS]));
        assert_eq!(
            result.evidence[ModificationType::Phosphorylation],
            vec![EvidenceEntry::new('S', 2, 7)]
        );
        assert!(result.evidence[ModificationType::Acetylation].is_empty());
        assert_eq!(result.hydroxyl_hits, 0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let below = classify(
            "AK",
            &observations(2, &[(ModificationType::Acetylation, 2, 4)]),
            5,
        );
        assert!(below.tags.is_empty());
        assert_eq!(
            below.evidence[ModificationType::Acetylation],
            vec![EvidenceEntry::new('K', 2, 4)]
        );

        let at = classify(
            "AK",
            &observations(2, &[(ModificationType::Acetylation, 2, 5)]),
            5,
        );
        assert_eq!(at.tags, TagSet::from([ModTag::AcetylK]));
    }

    #[test]
    fn residue_identity_filters_every_type() {
        let sequence = "ACDEFGHIKLMNPQRSTVWY";
        let len = sequence.len();
        let rows: Vec<_> = ModificationType::ALL
            .into_iter()
            .flat_map(|t| (1..=len).map(move |p| (t, p, 100)))
            .collect();
        let result = classify(sequence, &observations(len, &rows), 5);

        for (modification, entries) in result.evidence.iter() {
            assert!(!entries.is_empty());
            for entry in entries {
                assert!(
                    modification.allows(entry.residue as u8),
                    "{modification} evidence on {}",
                    entry.residue
                );
            }
        }
        assert_eq!(
            result.tags,
            TagSet::from([
                ModTag::AcetylK,
                ModTag::PhosphoS,
                ModTag::PhosphoT,
                ModTag::PhosphoY,
                ModTag::DimethylR,
                ModTag::GlyGlyK,
                ModTag::HydroxyP,
                ModTag::HydroxyK,
            ])
        );
        assert_eq!(result.hydroxyl_hits, 2);
    }

    #[test]
    fn counts_on_disallowed_residues_are_ignored() {
        let obs = observations(
            3,
            &[
                (ModificationType::Acetylation, 1, 50),
                (ModificationType::Dimethylation, 2, 50),
                (ModificationType::Phosphorylation, 3, 50),
            ],
        );
        let result = classify("RKA", &obs, 5);
        assert_eq!(result, Classification::default());
    }

    #[test]
    fn hydroxylation_uses_fixed_threshold() {
        let obs = observations(
            3,
            &[
                (ModificationType::Hydroxylation, 1, HYDROXYLATION_MIN_OBSERVATIONS - 1),
                (ModificationType::Hydroxylation, 2, HYDROXYLATION_MIN_OBSERVATIONS),
            ],
        );
        let result = classify("PKP", &obs, 1);
        assert_eq!(result.tags, TagSet::from([ModTag::HydroxyK]));
        assert_eq!(result.hydroxyl_hits, 1);
        assert_eq!(result.evidence[ModificationType::Hydroxylation].len(), 2);
        assert!(result.has_hydroxylation_tag());
    }

    #[test]
    fn hydroxyl_hits_never_exceed_proline_and_lysine_count() {
        let sequence = "PPKAKSP";
        let rows: Vec<_> = (1..=sequence.len())
            .map(|p| (ModificationType::Hydroxylation, p, 40))
            .collect();
        let result = classify(sequence, &observations(sequence.len(), &rows), 5);
        assert_eq!(result.hydroxyl_hits, 5);
    }

    #[test]
    fn shared_lysine_feeds_acetyl_ubiquitin_and_hydroxyl() {
        let obs = observations(
            1,
            &[
                (ModificationType::Acetylation, 1, 6),
                (ModificationType::GlyGly, 1, 6),
                (ModificationType::Hydroxylation, 1, 6),
            ],
        );
        let result = classify("K", &obs, DEFAULT_MIN_OBSERVATIONS);
        assert_eq!(result.tags, TagSet::from([ModTag::AcetylK, ModTag::GlyGlyK]));
        assert_eq!(result.evidence[ModificationType::Hydroxylation].len(), 1);
        assert_eq!(result.hydroxyl_hits, 0);
    }

    #[test]
    fn evidence_is_in_ascending_position_order() {
        let obs = observations(
            6,
            &[
                (ModificationType::Phosphorylation, 6, 1),
                (ModificationType::Phosphorylation, 1, 2),
                (ModificationType::Phosphorylation, 3, 3),
            ],
        );
        let result = classify("STYSTY", &obs, 5);
        let positions: Vec<_> = result.evidence[ModificationType::Phosphorylation]
            .iter()
            .map(|e| e.position)
            .collect();
        assert_eq!(positions, vec![1, 3, 6]);
    }

    #[test]
    fn empty_sequence_yields_empty_classification() {
        let result = classify("", &observations(0, &[]), 5);
        assert_eq!(result, Classification::default());
    }
}
