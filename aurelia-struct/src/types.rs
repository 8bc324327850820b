//! Core types for macromolecular 3D structure representation.

use core::cmp::Ordering;
use core::fmt;

use aurelia_core::{Annotated, ContentAddressable, Summarizable};
use sha2::{Digest, Sha256};

/// A point in 3D Cartesian space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// Create a new point.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The origin.
    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point3D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A single atom in a macromolecular structure.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Atom {
    /// Atom serial number.
    pub serial: u32,
    /// Atom name (e.g. "CA", "N", "PG").
    pub name: String,
    /// Alternate location indicator.
    pub alt_loc: Option<char>,
    /// 3D coordinates in Angstroms.
    pub coords: Point3D,
    /// Occupancy factor.
    pub occupancy: f64,
    /// Temperature factor (B-factor).
    pub temp_factor: f64,
    /// Element symbol.
    pub element: Option<String>,
    /// Whether this is a HETATM record.
    pub is_hetatm: bool,
}

/// The identity of a residue within a structural model: chain, sequence
/// number, and insertion code.
///
/// Ordering follows model numbering — sequence number first, then insertion
/// code (absent before `A`), then chain — which is the order detection
/// results are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResidueId {
    /// Single-character chain identifier.
    pub chain: char,
    /// Sequence number native to the structure file.
    pub seq_num: i32,
    /// Insertion code.
    pub i_code: Option<char>,
}

impl ResidueId {
    /// Create a residue identity.
    pub fn new(chain: char, seq_num: i32, i_code: Option<char>) -> Self {
        Self {
            chain,
            seq_num,
            i_code,
        }
    }
}

impl Ord for ResidueId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seq_num
            .cmp(&other.seq_num)
            .then_with(|| self.i_code.cmp(&other.i_code))
            .then_with(|| self.chain.cmp(&other.chain))
    }
}

impl PartialOrd for ResidueId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ResidueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chain, self.seq_num)?;
        if let Some(ic) = self.i_code {
            write!(f, "{}", ic)?;
        }
        Ok(())
    }
}

/// A residue (amino acid, ligand, or solvent) in a chain.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Residue {
    /// Three-letter residue name (e.g. "ALA", "ATP", "HOH").
    pub name: String,
    /// Sequence number from the structure file.
    pub seq_num: i32,
    /// Insertion code.
    pub i_code: Option<char>,
    /// Atoms belonging to this residue.
    pub atoms: Vec<Atom>,
}

impl Residue {
    /// This residue's identity within the given chain.
    pub fn id(&self, chain: char) -> ResidueId {
        ResidueId::new(chain, self.seq_num, self.i_code)
    }

    /// One-letter code via the shared residue table; `X` for unmapped names.
    pub fn one_letter(&self) -> u8 {
        aurelia_seq::residues::one_letter(&self.name)
    }

    /// Whether this residue belongs to the polymer (standard amino acid)
    /// rather than being a ligand, water, or other heteroatom group.
    pub fn is_polymer(&self) -> bool {
        !self.atoms.is_empty() && self.atoms.iter().all(|a| !a.is_hetatm)
    }
}

impl Annotated for Residue {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A chain of residues in file order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chain {
    /// Single-character chain identifier.
    pub id: char,
    /// Residues in this chain, in file order.
    pub residues: Vec<Residue>,
}

impl Chain {
    /// Create a new chain.
    pub fn new(id: char, residues: Vec<Residue>) -> Self {
        Self { id, residues }
    }

    /// Number of residues.
    pub fn residue_count(&self) -> usize {
        self.residues.len()
    }

    /// Total number of atoms across all residues.
    pub fn atom_count(&self) -> usize {
        self.residues.iter().map(|r| r.atoms.len()).sum()
    }
}

/// A complete macromolecular structure (one or more chains).
///
/// Immutable once parsed; all downstream artifacts (binding sites,
/// correspondence maps) are derived without mutating it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Structure {
    /// PDB identifier or user-supplied name.
    pub id: String,
    /// Chains in this structure.
    pub chains: Vec<Chain>,
}

impl Structure {
    /// Number of chains.
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }

    /// Total residues across all chains.
    pub fn residue_count(&self) -> usize {
        self.chains.iter().map(|c| c.residue_count()).sum()
    }

    /// Total atoms across all chains.
    pub fn atom_count(&self) -> usize {
        self.chains.iter().map(|c| c.atom_count()).sum()
    }

    /// Get a chain by its single-character ID.
    pub fn get_chain(&self, id: char) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }

    /// Iterate over `(chain id, residue)` pairs across all chains in file order.
    pub fn residues(&self) -> impl Iterator<Item = (char, &Residue)> {
        self.chains
            .iter()
            .flat_map(|c| c.residues.iter().map(move |r| (c.id, r)))
    }
}

impl Annotated for Structure {
    fn name(&self) -> &str {
        &self.id
    }
}

impl Summarizable for Structure {
    fn summary(&self) -> String {
        format!(
            "Structure {} — {} chain(s), {} residue(s), {} atom(s)",
            self.id,
            self.chain_count(),
            self.residue_count(),
            self.atom_count(),
        )
    }
}

impl ContentAddressable for Structure {
    fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.id.as_bytes());
        for chain in &self.chains {
            hasher.update([chain.id as u8]);
            for residue in &chain.residues {
                hasher.update(residue.name.as_bytes());
                hasher.update(residue.seq_num.to_le_bytes());
                hasher.update([residue.i_code.map_or(0, |ic| ic as u8)]);
                for atom in &residue.atoms {
                    hasher.update(atom.name.as_bytes());
                    hasher.update(atom.coords.x.to_le_bytes());
                    hasher.update(atom.coords.y.to_le_bytes());
                    hasher.update(atom.coords.z.to_le_bytes());
                }
            }
        }
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_atom(name: &str, x: f64, y: f64, z: f64, het: bool) -> Atom {
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

    #[test]
    fn point_distance() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::new(4.0, 5.0, 6.0);
        assert!((a.distance_to(&b) - (27.0_f64).sqrt()).abs() < 1e-10);
        assert!((a.distance_to(&a)).abs() < 1e-10);
    }

    #[test]
    fn residue_id_ordering() {
        let a = ResidueId::new('A', 10, None);
        let b = ResidueId::new('A', 10, Some('A'));
        let c = ResidueId::new('A', 11, None);
        let d = ResidueId::new('B', 10, None);
        assert!(a < b); // no insertion code before 'A'
        assert!(b < c);
        assert!(a < d); // same number, chain breaks the tie
        assert!(d < b);
    }

    #[test]
    fn residue_id_display() {
        assert_eq!(ResidueId::new('A', 42, None).to_string(), "A:42");
        assert_eq!(ResidueId::new('B', 100, Some('C')).to_string(), "B:100C");
    }

    #[test]
    fn residue_classification() {
        let protein = Residue {
            name: "ALA".into(),
            seq_num: 1,
            i_code: None,
            atoms: vec![make_atom("CA", 0.0, 0.0, 0.0, false)],
        };
        let ligand = Residue {
            name: "ATP".into(),
            seq_num: 500,
            i_code: None,
            atoms: vec![make_atom("PG", 0.0, 0.0, 0.0, true)],
        };
        assert!(protein.is_polymer());
        assert_eq!(protein.one_letter(), b'A');
        assert!(!ligand.is_polymer());
        assert_eq!(ligand.one_letter(), b'X');
    }

    #[test]
    fn empty_residue_is_not_polymer() {
        let r = Residue {
            name: "GLY".into(),
            seq_num: 1,
            i_code: None,
            atoms: Vec::new(),
        };
        assert!(!r.is_polymer());
    }

    #[test]
    fn structure_summary_and_hash() {
        let chain = Chain::new(
            'A',
            vec![Residue {
                name: "GLY".into(),
                seq_num: 1,
                i_code: None,
                atoms: vec![make_atom("CA", 1.0, 2.0, 3.0, false)],
            }],
        );
        let s = Structure {
            id: "1ABC".into(),
            chains: vec![chain],
        };
        assert!(s.summary().contains("1ABC"));
        assert!(s.summary().contains("1 chain"));
        assert!(s.summary().contains("1 residue"));

        let hash = s.content_hash();
        assert_eq!(hash.len(), 64); // SHA-256 hex
        assert_eq!(hash, s.content_hash());
    }

    #[test]
    fn residues_iterator_spans_chains() {
        let s = Structure {
            id: "X".into(),
            chains: vec![
                Chain::new(
                    'A',
                    vec![Residue {
                        name: "ALA".into(),
                        seq_num: 1,
                        i_code: None,
                        atoms: vec![],
                    }],
                ),
                Chain::new(
                    'B',
                    vec![Residue {
                        name: "GLY".into(),
                        seq_num: 1,
                        i_code: None,
                        atoms: vec![],
                    }],
                ),
            ],
        };
        let ids: Vec<ResidueId> = s.residues().map(|(c, r)| r.id(c)).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].chain, 'A');
        assert_eq!(ids[1].chain, 'B');
    }
}
