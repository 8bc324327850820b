//! PDB format parser.
//!
//! Parses ATOM, HETATM, TER, HEADER, and MODEL/ENDMDL records from PDB-format
//! text. Only the first MODEL is read for multi-model (NMR) files.

use aurelia_core::{AureliaError, Result};

use crate::builder::{ResidueKey, StructureBuilder};
use crate::types::{Atom, Point3D, Structure};

/// Parse a PDB-format string into a [`Structure`].
///
/// # Errors
///
/// Returns an error if no ATOM/HETATM records are found or if a coordinate
/// record is malformed (truncated columns, unparseable numbers).
pub fn parse_pdb(input: &str) -> Result<Structure> {
    let mut id = String::from("UNKN");
    let mut builder = StructureBuilder::new();
    let mut atom_count = 0u32;
    let mut in_first_model = true;

    for line in input.lines() {
        if line.starts_with("ENDMDL") {
            break; // only first model
        }
        if line.starts_with("MODEL") {
            if !in_first_model {
                break;
            }
            in_first_model = false;
            continue;
        }

        if line.starts_with("HEADER") && line.len() >= 66 {
            let pdb_id = column(line, 62, 66).trim();
            if !pdb_id.is_empty() {
                id = pdb_id.into();
            }
            continue;
        }

        if line.starts_with("TER") {
            builder.end_chain();
            continue;
        }

        let is_hetatm = line.starts_with("HETATM");
        if is_hetatm || line.starts_with("ATOM  ") {
            let record = parse_coordinate_line(line, is_hetatm)?;
            builder.push_atom(record.chain_id, record.key, record.atom);
            atom_count += 1;
        }
    }

    if atom_count == 0 {
        return Err(AureliaError::Parse("no ATOM records found".into()));
    }

    Ok(builder.finish(id))
}

/// Parse a PDB file from disk.
pub fn parse_pdb_file(path: impl AsRef<std::path::Path>) -> Result<Structure> {
    let contents = std::fs::read_to_string(path)?;
    parse_pdb(&contents)
}

struct CoordinateRecord {
    chain_id: char,
    key: ResidueKey,
    atom: Atom,
}

/// Decode one fixed-column ATOM/HETATM line.
///
/// Columns (0-based, end-exclusive): serial 6..11, atom name 12..16, alt-loc
/// 16, residue name 17..20, chain 21, residue number 22..26, insertion code
/// 26, x/y/z 30..54 in 8.3 fields, occupancy 54..60, B-factor 60..66,
/// element 76..78.
fn parse_coordinate_line(line: &str, is_hetatm: bool) -> Result<CoordinateRecord> {
    if line.len() < 54 {
        return Err(AureliaError::Parse(format!(
            "coordinate record too short ({} chars): {}",
            line.len(),
            line
        )));
    }

    let serial = parse_num::<u32>(line, 6, 11, "atom serial")?;
    let name = column(line, 12, 16).trim().to_string();
    let alt_loc = char_column(line, 16);
    let res_name = column(line, 17, 20).trim().to_string();
    let chain_id = char_column(line, 21).unwrap_or(' ');
    let seq_num = parse_num::<i32>(line, 22, 26, "residue number")?;
    let i_code = char_column(line, 26);

    let x = parse_num::<f64>(line, 30, 38, "x coordinate")?;
    let y = parse_num::<f64>(line, 38, 46, "y coordinate")?;
    let z = parse_num::<f64>(line, 46, 54, "z coordinate")?;

    let occupancy = column(line, 54, 60).trim().parse::<f64>().unwrap_or(1.0);
    let temp_factor = column(line, 60, 66).trim().parse::<f64>().unwrap_or(0.0);
    let element = {
        let e = column(line, 76, 78).trim();
        if e.is_empty() {
            None
        } else {
            Some(e.to_string())
        }
    };

    Ok(CoordinateRecord {
        chain_id,
        key: ResidueKey {
            seq_num,
            i_code,
            name: res_name,
        },
        atom: Atom {
            serial,
            name,
            alt_loc,
            coords: Point3D::new(x, y, z),
            occupancy,
            temp_factor,
            element,
            is_hetatm,
        },
    })
}

/// Substring by byte columns, tolerant of short lines. PDB files are ASCII,
/// so byte boundaries are char boundaries.
fn column(line: &str, start: usize, end: usize) -> &str {
    let len = line.len();
    if start >= len {
        return "";
    }
    &line[start..end.min(len)]
}

/// A single column as a char, with blank meaning absent.
fn char_column(line: &str, index: usize) -> Option<char> {
    match column(line, index, index + 1).chars().next() {
        Some(' ') | None => None,
        c => c,
    }
}

fn parse_num<T: std::str::FromStr>(
    line: &str,
    start: usize,
    end: usize,
    what: &str,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    column(line, start, end)
        .trim()
        .parse::<T>()
        .map_err(|e| AureliaError::Parse(format!("bad {}: {}", what, e)))
}
