//! Unweighted Needleman-Wunsch global alignment.
//!
//! Maximizes the number of identical-residue columns between two full-length
//! sequences: a match scores 1, mismatches and gaps score 0. This is the
//! scoring that residue-numbering reconciliation needs — the alignment exists
//! to pair up corresponding positions, not to model evolutionary distance, so
//! no substitution matrix or gap-penalty tuning applies.
//!
//! With flat gap costs the affine-gap formulation collapses to a single DP
//! matrix:
//!
//! ```text
//! H[i][j] = max(H[i-1][j-1] + eq(i,j), H[i-1][j], H[i][j-1])
//! ```
//!
//! Multiple alignments can attain the optimal score. The traceback pins one
//! deterministically: at equal score it prefers the diagonal (pairing the
//! residues) over a gap in the target over a gap in the query. Callers can
//! rely on byte-identical output for identical input.

use aurelia_core::{AureliaError, Result};

use crate::types::{AlignmentResult, CigarOp};

/// Globally align two sequences, maximizing identical-residue columns.
///
/// Comparison is case-insensitive. Length mismatch is never an error — the
/// shorter sequence is padded with gap columns wherever the DP places them.
///
/// # Errors
///
/// Returns an error if either sequence is empty.
pub fn global_align(query: &[u8], target: &[u8]) -> Result<AlignmentResult> {
    let m = query.len();
    let n = target.len();

    if m == 0 || n == 0 {
        return Err(AureliaError::InvalidInput(
            "sequences must not be empty".into(),
        ));
    }

    let cols = n + 1;
    let idx = |i: usize, j: usize| -> usize { i * cols + j };

    // Leading and trailing gaps are free, so row 0 and column 0 stay zero.
    let mut h = vec![0i32; (m + 1) * cols];

    for i in 1..=m {
        for j in 1..=n {
            let eq = matches(query[i - 1], target[j - 1]) as i32;
            h[idx(i, j)] = (h[idx(i - 1, j - 1)] + eq)
                .max(h[idx(i - 1, j)])
                .max(h[idx(i, j - 1)]);
        }
    }

    // Traceback from (m, n); tie-break order: diagonal, gap in target,
    // gap in query.
    let mut aligned_query = Vec::with_capacity(m.max(n));
    let mut aligned_target = Vec::with_capacity(m.max(n));
    let mut cigar: Vec<CigarOp> = Vec::new();

    let mut i = m;
    let mut j = n;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let eq = matches(query[i - 1], target[j - 1]);
            if h[idx(i, j)] == h[idx(i - 1, j - 1)] + eq as i32 {
                aligned_query.push(query[i - 1]);
                aligned_target.push(target[j - 1]);
                let op = if eq {
                    CigarOp::Match(1)
                } else {
                    CigarOp::Mismatch(1)
                };
                push_cigar(&mut cigar, op);
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && (j == 0 || h[idx(i, j)] == h[idx(i - 1, j)]) {
            aligned_query.push(query[i - 1]);
            aligned_target.push(b'-');
            push_cigar(&mut cigar, CigarOp::Deletion(1));
            i -= 1;
        } else {
            aligned_query.push(b'-');
            aligned_target.push(target[j - 1]);
            push_cigar(&mut cigar, CigarOp::Insertion(1));
            j -= 1;
        }
    }

    aligned_query.reverse();
    aligned_target.reverse();
    cigar.reverse();

    Ok(AlignmentResult {
        score: h[idx(m, n)],
        aligned_query,
        aligned_target,
        cigar,
    })
}

fn matches(a: u8, b: u8) -> bool {
    a.to_ascii_uppercase() == b.to_ascii_uppercase()
}

/// Merge a new 1-length CIGAR op with the last op if they are the same variant.
fn push_cigar(ops: &mut Vec<CigarOp>, op: CigarOp) {
    if let Some(last) = ops.last_mut() {
        match (last, &op) {
            (CigarOp::Match(ref mut n), CigarOp::Match(1))
            | (CigarOp::Mismatch(ref mut n), CigarOp::Mismatch(1))
            | (CigarOp::Insertion(ref mut n), CigarOp::Insertion(1))
            | (CigarOp::Deletion(ref mut n), CigarOp::Deletion(1)) => {
                *n += 1;
                return;
            }
            _ => {}
        }
    }
    ops.push(op);
}
