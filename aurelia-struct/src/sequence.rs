//! Model-derived sequences.
//!
//! A [`ModelSequence`] is the one-letter sequence read off a structural
//! model's polymer residues in file order, with each position's native
//! residue identity recorded in parallel. It is the "structure side" of a
//! numbering reconciliation: model numbering may start at an arbitrary
//! offset, skip disordered stretches, or carry insertion codes.

use aurelia_core::Sequence;

use crate::types::{ResidueId, Structure};

/// The one-letter sequence of a structural model plus per-position residue
/// identities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelSequence {
    codes: Vec<u8>,
    ids: Vec<ResidueId>,
}

impl ModelSequence {
    /// Extract the polymer sequence from a structure.
    ///
    /// Walks every chain's residues in file order, keeping standard
    /// amino-acid residues and skipping ligands, waters, and other
    /// heteroatom groups. Unmapped residue names contribute the unknown
    /// code `X` but keep their position.
    pub fn from_structure(structure: &Structure) -> Self {
        let mut codes = Vec::new();
        let mut ids = Vec::new();
        for (chain_id, residue) in structure.residues() {
            if residue.is_polymer() {
                codes.push(residue.one_letter());
                ids.push(residue.id(chain_id));
            }
        }
        Self { codes, ids }
    }

    /// Per-position residue identities, parallel to [`Sequence::as_bytes`].
    pub fn ids(&self) -> &[ResidueId] {
        &self.ids
    }

    /// The residue identity at a 0-based sequence index.
    pub fn id_at(&self, index: usize) -> Option<ResidueId> {
        self.ids.get(index).copied()
    }
}

impl Sequence for ModelSequence {
    fn as_bytes(&self) -> &[u8] {
        &self.codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Atom, Chain, Point3D, Residue};

    fn residue(name: &str, seq_num: i32, het: bool) -> Residue {
        Residue {
            name: name.into(),
            seq_num,
            i_code: None,
            atoms: vec![Atom {
                serial: 1,
                name: "CA".into(),
                alt_loc: None,
                coords: Point3D::zero(),
                occupancy: 1.0,
                temp_factor: 0.0,
                element: None,
                is_hetatm: het,
            }],
        }
    }

    #[test]
    fn extracts_polymer_only() {
        let s = Structure {
            id: "T".into(),
            chains: vec![Chain::new(
                'A',
                vec![
                    residue("MET", 5, false),
                    residue("LYS", 6, false),
                    residue("ATP", 500, true),
                    residue("HOH", 600, true),
                ],
            )],
        };
        let seq = ModelSequence::from_structure(&s);
        assert_eq!(seq.as_bytes(), b"MK");
        assert_eq!(seq.ids().len(), 2);
        assert_eq!(seq.ids()[0], ResidueId::new('A', 5, None));
        assert_eq!(seq.id_at(1), Some(ResidueId::new('A', 6, None)));
        assert_eq!(seq.id_at(2), None);
    }

    #[test]
    fn unknown_names_keep_their_position() {
        let s = Structure {
            id: "T".into(),
            chains: vec![Chain::new(
                'A',
                vec![residue("MET", 1, false), residue("UNK", 2, false)],
            )],
        };
        let seq = ModelSequence::from_structure(&s);
        assert_eq!(seq.as_bytes(), b"MX");
    }

    #[test]
    fn empty_structure_gives_empty_sequence() {
        let s = Structure {
            id: "T".into(),
            chains: vec![],
        };
        let seq = ModelSequence::from_structure(&s);
        assert!(seq.is_empty());
    }
}
