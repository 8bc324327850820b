//! Protein 3D structures and ligand binding-site detection for the Aurelia
//! toolkit.
//!
//! - **PDB parsing** — Read macromolecular structure files with [`pdb::parse_pdb`]
//! - **mmCIF parsing** — Read PDBx/mmCIF files with [`mmcif::parse_mmcif`]
//! - **Model sequences** — Polymer sequence + native numbering in [`sequence`]
//! - **Binding sites** — Ligand-contact detection in [`binding`]
//!
//! # Quick start
//!
//! ```
//! use aurelia_struct::pdb::parse_pdb;
//! use aurelia_struct::binding::detect_binding_sites;
//!
//! let pdb_text = "\
//! ATOM      1  CA  LYS A  10       3.000   0.000   0.000  1.00  0.00           C
//! TER
//! HETATM    2  PG  ATP A 500       0.000   0.000   0.000  1.00  0.00           P
//! END
//! ";
//!
//! let structure = parse_pdb(pdb_text).unwrap();
//! let sites = detect_binding_sites(&structure, "ATP", 4.0).unwrap();
//! assert_eq!(sites.len(), 1);
//! assert_eq!(sites.residues()[0].code, b'K');
//! ```

pub mod binding;
mod builder;
pub mod mmcif;
pub mod pdb;
pub mod sequence;
pub mod types;

pub use binding::{detect_binding_sites, BindingResidue, BindingSiteSet};
pub use mmcif::parse_mmcif;
pub use pdb::parse_pdb;
pub use sequence::ModelSequence;
pub use types::{Atom, Chain, Point3D, Residue, ResidueId, Structure};

#[cfg(test)]
mod tests {
    use super::*;
    use aurelia_core::{ContentAddressable, Sequence, Summarizable};

    #[test]
    fn integration_parse_and_detect() {
        let pdb_text = "\
HEADER    TRANSFERASE                             01-JAN-00   1INT\n\
ATOM      1  N   MET A   5       0.000   0.000   0.000  1.00  0.00           N\n\
ATOM      2  CA  MET A   5       1.458   0.000   0.000  1.00  0.00           C\n\
ATOM      3  CA  LYS A   6       3.900   0.000   0.000  1.00  0.00           C\n\
ATOM      4  CA  THR A   7      10.000   0.000   0.000  1.00  0.00           C\n\
TER\n\
HETATM    5  PG  ATP A 500       5.000   0.000   0.000  1.00  0.00           P\n\
END\n";

        let s = parse_pdb(pdb_text).unwrap();
        assert_eq!(s.id, "1INT");
        assert!(s.summary().contains("atom"));
        assert_eq!(s.content_hash().len(), 64);

        let seq = ModelSequence::from_structure(&s);
        assert_eq!(seq.as_bytes(), b"MKT");
        assert_eq!(seq.ids()[0].seq_num, 5);

        // LYS CA at 1.1 Å from the phosphate, MET CA at 3.542; THR is out of range.
        let sites = detect_binding_sites(&s, "ATP", 4.0).unwrap();
        let nums: Vec<i32> = sites.ids().map(|id| id.seq_num).collect();
        assert_eq!(nums, vec![5, 6]);
    }

    #[test]
    fn mmcif_and_pdb_agree_on_detection() {
        let pdb_text = "\
ATOM      1  CA  LYS A  10       3.000   0.000   0.000  1.00  0.00           C\n\
TER\n\
HETATM    2  PG  ATP A 500       0.000   0.000   0.000  1.00  0.00           P\n\
END\n";
        let cif_text = "\
data_SAME
loop_
_atom_site.group_PDB
_atom_site.id
_atom_site.label_atom_id
_atom_site.label_comp_id
_atom_site.auth_asym_id
_atom_site.auth_seq_id
_atom_site.Cartn_x
_atom_site.Cartn_y
_atom_site.Cartn_z
ATOM 1 CA LYS A 10 3.000 0.000 0.000
HETATM 2 PG ATP A 500 0.000 0.000 0.000
#
";
        let from_pdb = detect_binding_sites(&parse_pdb(pdb_text).unwrap(), "ATP", 4.0).unwrap();
        let from_cif = detect_binding_sites(&parse_mmcif(cif_text).unwrap(), "ATP", 4.0).unwrap();
        assert_eq!(
            from_pdb.ids().collect::<Vec<_>>(),
            from_cif.ids().collect::<Vec<_>>()
        );
    }
}
