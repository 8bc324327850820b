//! mmCIF/PDBx format parser.
//!
//! Extracts the `_atom_site` loop into a [`Structure`]. Author-assigned
//! identifiers (`auth_seq_id`, `auth_asym_id`, `auth_comp_id`) are preferred
//! over label identifiers when both are present: author numbering is what
//! binding-site reports and deposited FASTA headers refer to, and it is the
//! numbering ligand heteroatom rows always carry. Only the first model of a
//! multi-model file is read.

use aurelia_core::{AureliaError, Result};

use crate::builder::{ResidueKey, StructureBuilder};
use crate::types::{Atom, Point3D, Structure};

/// Parse an mmCIF-format string into a [`Structure`].
///
/// # Errors
///
/// Returns an error if no `_atom_site` loop is present, if a required field
/// (coordinates, residue number) is missing, or if a value fails to parse.
pub fn parse_mmcif(input: &str) -> Result<Structure> {
    let lines: Vec<&str> = input.lines().collect();
    let id = data_block_id(&lines);

    let (headers, rows) = atom_site_loop(&lines)?;
    if rows.is_empty() {
        return Err(AureliaError::Parse("no _atom_site rows found".into()));
    }

    build_structure(id, &headers, &rows)
}

/// Parse an mmCIF file from disk.
pub fn parse_mmcif_file(path: impl AsRef<std::path::Path>) -> Result<Structure> {
    let contents = std::fs::read_to_string(path)?;
    parse_mmcif(&contents)
}

/// The structure ID from the `data_XXXX` block header, or "UNKN".
fn data_block_id(lines: &[&str]) -> String {
    lines
        .iter()
        .map(|l| l.trim())
        .find_map(|l| l.strip_prefix("data_"))
        .filter(|rest| !rest.is_empty())
        .map(|rest| rest.to_string())
        .unwrap_or_else(|| String::from("UNKN"))
}

/// Locate the `_atom_site` loop and split it into header names and data rows.
fn atom_site_loop<'a>(lines: &[&'a str]) -> Result<(Vec<String>, Vec<&'a str>)> {
    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim() == "loop_" {
            let mut headers = Vec::new();
            let mut j = i + 1;
            while j < lines.len() {
                let t = lines[j].trim();
                if t.starts_with("_atom_site.") {
                    headers.push(t["_atom_site.".len()..].to_string());
                    j += 1;
                } else if t.is_empty() {
                    j += 1;
                } else {
                    break;
                }
            }

            if !headers.is_empty() {
                let mut rows = Vec::new();
                while j < lines.len() {
                    let t = lines[j].trim();
                    if t.is_empty() {
                        j += 1;
                        continue;
                    }
                    if t.starts_with('#') || t.starts_with("loop_") || t.starts_with("data_")
                        || t.starts_with('_')
                    {
                        break;
                    }
                    rows.push(lines[j]);
                    j += 1;
                }
                return Ok((headers, rows));
            }
        }
        i += 1;
    }

    Err(AureliaError::Parse(
        "no _atom_site loop found in mmCIF data".into(),
    ))
}

/// Column accessor over one tokenized `_atom_site` row.
struct Row<'a> {
    tokens: Vec<String>,
    headers: &'a [String],
    number: usize,
}

impl Row<'_> {
    /// Field by header name; `.` and `?` mean absent.
    fn get(&self, name: &str) -> Option<&str> {
        let idx = self.headers.iter().position(|h| h == name)?;
        let v = self.tokens.get(idx)?.as_str();
        if v == "." || v == "?" {
            None
        } else {
            Some(v)
        }
    }

    /// Author-assigned field, falling back to the label variant.
    fn auth_or_label(&self, field: &str) -> Option<&str> {
        self.get(&format!("auth_{}", field))
            .or_else(|| self.get(&format!("label_{}", field)))
    }

    fn require(&self, name: &str) -> Result<&str> {
        self.get(name).ok_or_else(|| {
            AureliaError::Parse(format!(
                "missing _atom_site.{} in row {}",
                name, self.number
            ))
        })
    }

    fn require_f64(&self, name: &str) -> Result<f64> {
        let v = self.require(name)?;
        v.parse::<f64>().map_err(|e| {
            AureliaError::Parse(format!(
                "bad _atom_site.{} value '{}' in row {}: {}",
                name, v, self.number, e
            ))
        })
    }
}

fn build_structure(id: String, headers: &[String], rows: &[&str]) -> Result<Structure> {
    let mut builder = StructureBuilder::new();
    let mut first_model: Option<String> = None;
    let mut atom_count = 0u32;

    for (number, raw) in rows.iter().enumerate() {
        let tokens = tokenize(raw);
        if tokens.len() < headers.len() {
            // Continuation or malformed row; skip.
            continue;
        }
        let row = Row {
            tokens,
            headers,
            number,
        };

        // First model only.
        if let Some(model) = row.get("pdbx_PDB_model_num") {
            match &first_model {
                None => first_model = Some(model.to_string()),
                Some(first) if first.as_str() != model => break,
                _ => {}
            }
        }

        let is_hetatm = row.get("group_PDB").unwrap_or("ATOM") == "HETATM";
        let serial = row
            .get("id")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(atom_count + 1);

        let name = row.require("label_atom_id")?.to_string();
        let res_name = row
            .auth_or_label("comp_id")
            .ok_or_else(|| {
                AureliaError::Parse(format!("missing residue name in row {}", number))
            })?
            .to_string();
        let chain_id = row
            .auth_or_label("asym_id")
            .and_then(|v| v.chars().next())
            .unwrap_or('A');
        let seq_str = row.auth_or_label("seq_id").ok_or_else(|| {
            AureliaError::Parse(format!("missing residue number in row {}", number))
        })?;
        let seq_num = seq_str.parse::<i32>().map_err(|e| {
            AureliaError::Parse(format!(
                "bad residue number '{}' in row {}: {}",
                seq_str, number, e
            ))
        })?;
        let i_code = row
            .get("pdbx_PDB_ins_code")
            .and_then(|v| v.chars().next());

        let atom = Atom {
            serial,
            name,
            alt_loc: row.get("label_alt_id").and_then(|v| v.chars().next()),
            coords: Point3D::new(
                row.require_f64("Cartn_x")?,
                row.require_f64("Cartn_y")?,
                row.require_f64("Cartn_z")?,
            ),
            occupancy: row
                .get("occupancy")
                .and_then(|v| v.parse().ok())
                .unwrap_or(1.0),
            temp_factor: row
                .get("B_iso_or_equiv")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            element: row.get("type_symbol").map(|v| v.to_string()),
            is_hetatm,
        };

        builder.push_atom(
            chain_id,
            ResidueKey {
                seq_num,
                i_code,
                name: res_name,
            },
            atom,
        );
        atom_count += 1;
    }

    if atom_count == 0 {
        return Err(AureliaError::Parse("no _atom_site rows found".into()));
    }

    Ok(builder.finish(id))
}

/// Split one data row into tokens, honoring single- and double-quoted values.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '\'' || c == '"' {
            chars.next();
            let mut tok = String::new();
            for ch in chars.by_ref() {
                if ch == c {
                    break;
                }
                tok.push(ch);
            }
            tokens.push(tok);
        } else {
            let mut tok = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                tok.push(ch);
                chars.next();
            }
            tokens.push(tok);
        }
    }

    tokens
}
