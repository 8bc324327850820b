//! Ligand binding-site detection.
//!
//! Finds the protein residues in physical contact with a bound ligand:
//! a residue qualifies when any of its atoms lies within the distance
//! cutoff of any atom of any instance of the target ligand.

use std::collections::BTreeMap;

use aurelia_core::{AureliaError, Result, Summarizable};

use crate::types::{Point3D, ResidueId, Structure};

/// One residue detected in contact with the ligand.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingResidue {
    /// Model-native residue identity.
    pub id: ResidueId,
    /// Three-letter residue name.
    pub name: String,
    /// One-letter code from the shared residue table (`X` if unmapped).
    pub code: u8,
}

/// The set of residues within the cutoff of a ligand, ordered by residue
/// number (insertion code, then chain, breaking ties) with duplicates
/// collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingSiteSet {
    /// The ligand identifier the set was computed for.
    pub ligand: String,
    residues: Vec<BindingResidue>,
}

impl BindingSiteSet {
    /// Number of binding residues.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Whether no residue was within the cutoff.
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// The detected residues in ascending residue order.
    pub fn residues(&self) -> &[BindingResidue] {
        &self.residues
    }

    /// Iterate over the detected residue identities.
    pub fn ids(&self) -> impl Iterator<Item = ResidueId> + '_ {
        self.residues.iter().map(|r| r.id)
    }

    /// Whether a residue identity is in the set.
    pub fn contains(&self, id: &ResidueId) -> bool {
        self.residues.binary_search_by(|r| r.id.cmp(id)).is_ok()
    }
}

impl Summarizable for BindingSiteSet {
    fn summary(&self) -> String {
        format!(
            "{} site — {} residue(s) in contact",
            self.ligand,
            self.len()
        )
    }
}

/// Detect the residues of `structure` in contact with ligand `ligand_id`.
///
/// `ligand_id` is whitespace-trimmed and compared case-sensitively against
/// trimmed residue names; `cutoff` is an inclusive Euclidean distance in
/// Angstroms. All instances of the ligand contribute to one unioned result.
/// A structure without any ligand instance yields an empty set, not an error.
///
/// # Errors
///
/// Returns an error if `cutoff` is not a positive finite number or
/// `ligand_id` is blank.
pub fn detect_binding_sites(
    structure: &Structure,
    ligand_id: &str,
    cutoff: f64,
) -> Result<BindingSiteSet> {
    let ligand = ligand_id.trim();
    if ligand.is_empty() {
        return Err(AureliaError::InvalidInput(
            "ligand identifier must not be blank".into(),
        ));
    }
    if !cutoff.is_finite() || cutoff <= 0.0 {
        return Err(AureliaError::InvalidInput(format!(
            "distance cutoff must be positive, got {}",
            cutoff
        )));
    }

    // Atoms of every ligand instance, pooled.
    let ligand_atoms: Vec<Point3D> = structure
        .residues()
        .filter(|(_, r)| r.name.trim() == ligand)
        .flat_map(|(_, r)| r.atoms.iter().map(|a| a.coords))
        .collect();

    let mut found: BTreeMap<ResidueId, BindingResidue> = BTreeMap::new();

    for (chain_id, residue) in structure.residues() {
        if !residue.is_polymer() {
            continue;
        }
        let in_contact = residue.atoms.iter().any(|atom| {
            ligand_atoms
                .iter()
                .any(|l| atom.coords.distance_to(l) <= cutoff)
        });
        if in_contact {
            let id = residue.id(chain_id);
            found.entry(id).or_insert_with(|| BindingResidue {
                id,
                name: residue.name.trim().to_string(),
                code: residue.one_letter(),
            });
        }
    }

    Ok(BindingSiteSet {
        ligand: ligand.to_string(),
        residues: found.into_values().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Atom, Chain, Residue};

    fn atom(name: &str, x: f64, y: f64, z: f64, het: bool) -> Atom {
        Atom {
            serial: 1,
            name: name.into(),
            alt_loc: None,
            coords: Point3D::new(x, y, z),
            occupancy: 1.0,
            temp_factor: 0.0,
            element: None,
            is_hetatm: het,
        }
    }

    fn protein_residue(name: &str, seq_num: i32, x: f64) -> Residue {
        Residue {
            name: name.into(),
            seq_num,
            i_code: None,
            atoms: vec![atom("CA", x, 0.0, 0.0, false)],
        }
    }

    fn ligand_residue(name: &str, seq_num: i32, x: f64) -> Residue {
        Residue {
            name: name.into(),
            seq_num,
            i_code: None,
            atoms: vec![atom("PG", x, 0.0, 0.0, true)],
        }
    }

    /// One ATP at x=0; residues at x = 3, 4, 6; water at x = 1.
    fn test_structure() -> Structure {
        Structure {
            id: "TEST".into(),
            chains: vec![Chain::new(
                'A',
                vec![
                    protein_residue("LYS", 10, 3.0),
                    protein_residue("THR", 11, 4.0),
                    protein_residue("GLY", 12, 6.0),
                    ligand_residue("ATP", 500, 0.0),
                    ligand_residue("HOH", 600, 1.0),
                ],
            )],
        }
    }

    #[test]
    fn detects_residues_within_cutoff() {
        let s = test_structure();
        let sites = detect_binding_sites(&s, "ATP", 3.5).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites.residues()[0].id.seq_num, 10);
        assert_eq!(sites.residues()[0].code, b'K');
    }

    #[test]
    fn boundary_is_inclusive() {
        let s = test_structure();
        // THR CA sits at exactly 4.0 from the ligand atom.
        let sites = detect_binding_sites(&s, "ATP", 4.0).unwrap();
        assert_eq!(sites.len(), 2);
        assert!(sites.contains(&ResidueId::new('A', 11, None)));

        // Just under the residue distance, it drops out.
        let sites = detect_binding_sites(&s, "ATP", 3.999).unwrap();
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn monotone_in_cutoff() {
        let s = test_structure();
        let small = detect_binding_sites(&s, "ATP", 3.5).unwrap();
        let large = detect_binding_sites(&s, "ATP", 6.0).unwrap();
        assert!(small.len() <= large.len());
        for r in small.residues() {
            assert!(large.contains(&r.id));
        }
    }

    #[test]
    fn water_is_never_a_binding_residue() {
        let s = test_structure();
        // Water at x=1 is nearest to the ligand but not polymer.
        let sites = detect_binding_sites(&s, "ATP", 6.0).unwrap();
        assert_eq!(sites.len(), 3);
        assert!(sites.ids().all(|id| id.seq_num < 500));
    }

    #[test]
    fn no_ligand_instance_gives_empty_set() {
        let s = test_structure();
        let sites = detect_binding_sites(&s, "GTP", 4.0).unwrap();
        assert!(sites.is_empty());
    }

    #[test]
    fn multiple_instances_union() {
        let mut s = test_structure();
        // Second ATP copy near the far GLY residue.
        s.chains[0].residues.push(ligand_residue("ATP", 501, 7.0));
        let sites = detect_binding_sites(&s, "ATP", 3.5).unwrap();
        let nums: Vec<i32> = sites.ids().map(|id| id.seq_num).collect();
        assert_eq!(nums, vec![10, 12]);
    }

    #[test]
    fn ligand_id_is_trimmed() {
        let s = test_structure();
        let sites = detect_binding_sites(&s, " ATP ", 3.5).unwrap();
        assert_eq!(sites.len(), 1);
    }

    #[test]
    fn unknown_residue_names_are_kept_with_sentinel_code() {
        let s = Structure {
            id: "T".into(),
            chains: vec![Chain::new(
                'A',
                vec![
                    protein_residue("XYZ", 1, 2.0),
                    ligand_residue("ATP", 500, 0.0),
                ],
            )],
        };
        let sites = detect_binding_sites(&s, "ATP", 4.0).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites.residues()[0].code, b'X');
    }

    #[test]
    fn invalid_arguments() {
        let s = test_structure();
        assert!(detect_binding_sites(&s, "ATP", 0.0).is_err());
        assert!(detect_binding_sites(&s, "ATP", -1.0).is_err());
        assert!(detect_binding_sites(&s, "ATP", f64::NAN).is_err());
        assert!(detect_binding_sites(&s, "  ", 4.0).is_err());
    }

    #[test]
    fn structure_is_not_mutated() {
        let s = test_structure();
        let before = s.atom_count();
        let _ = detect_binding_sites(&s, "ATP", 4.0).unwrap();
        assert_eq!(s.atom_count(), before);
    }
}
