//! Incremental assembly of a [`Structure`] from per-atom records.
//!
//! Both parsers feed atoms in file order; the builder groups consecutive
//! atoms into residues and residues into chains, flushing whenever the
//! residue key or chain changes.

use crate::types::{Atom, Chain, Residue, Structure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResidueKey {
    pub seq_num: i32,
    pub i_code: Option<char>,
    pub name: String,
}

#[derive(Debug, Default)]
pub(crate) struct StructureBuilder {
    chains: Vec<Chain>,
    chain_id: Option<char>,
    residues: Vec<Residue>,
    residue_key: Option<ResidueKey>,
    atoms: Vec<Atom>,
}

impl StructureBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append one atom, starting a new residue or chain when the identifiers
    /// change from the previous atom.
    pub(crate) fn push_atom(&mut self, chain_id: char, key: ResidueKey, atom: Atom) {
        if self.chain_id != Some(chain_id) {
            self.flush_chain();
            self.chain_id = Some(chain_id);
        } else if self.residue_key.as_ref() != Some(&key) {
            self.flush_residue();
        }
        self.residue_key = Some(key);
        self.atoms.push(atom);
    }

    /// Close the current chain (e.g. on a TER record).
    pub(crate) fn end_chain(&mut self) {
        self.flush_chain();
        self.chain_id = None;
    }

    pub(crate) fn finish(mut self, id: String) -> Structure {
        self.flush_chain();
        Structure {
            id,
            chains: self.chains,
        }
    }

    fn flush_residue(&mut self) {
        if let Some(key) = self.residue_key.take() {
            if !self.atoms.is_empty() {
                self.residues.push(Residue {
                    name: key.name,
                    seq_num: key.seq_num,
                    i_code: key.i_code,
                    atoms: core::mem::take(&mut self.atoms),
                });
            }
        }
    }

    fn flush_chain(&mut self) {
        self.flush_residue();
        if let Some(id) = self.chain_id {
            if !self.residues.is_empty() {
                self.chains.push(Chain::new(id, core::mem::take(&mut self.residues)));
            }
        }
    }
}
