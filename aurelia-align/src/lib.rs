//! Pairwise sequence alignment for the Aurelia binding-site evaluation
//! toolkit.
//!
//! Provides unweighted global (Needleman-Wunsch) alignment: +1 for an
//! identical pair, 0 for mismatches and gaps. This maximizes the count of
//! identical-residue columns, which is exactly what position-to-position
//! numbering reconciliation needs.
//!
//! # Quick start
//!
//! ```
//! use aurelia_align::global_align;
//!
//! let result = global_align(b"MKVT", b"MKVT").unwrap();
//! assert_eq!(result.score, 4);
//! assert_eq!(result.cigar_string(), "4=");
//! ```

pub mod needleman_wunsch;
pub mod types;

pub use needleman_wunsch::global_align;
pub use types::{AlignmentResult, CigarOp};


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn protein_seq(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            proptest::sample::select(b"ACDEFGHIKLMNPQRSTVWY".to_vec()),
            1..=max_len,
        )
    }

    proptest! {
        #[test]
        fn alignment_is_deterministic(
            q in protein_seq(40),
            t in protein_seq(40),
        ) {
            let r1 = global_align(&q, &t).unwrap();
            let r2 = global_align(&q, &t).unwrap();
            prop_assert_eq!(r1, r2);
        }

        #[test]
        fn score_bounded_by_shorter_sequence(
            q in protein_seq(40),
            t in protein_seq(40),
        ) {
            let r = global_align(&q, &t).unwrap();
            prop_assert!(r.score >= 0);
            prop_assert!(r.score as usize <= q.len().min(t.len()));
            prop_assert_eq!(r.score as usize, r.matches());
        }

        #[test]
        fn identity_in_unit_interval(
            q in protein_seq(40),
            t in protein_seq(40),
        ) {
            let r = global_align(&q, &t).unwrap();
            let id = r.identity();
            prop_assert!((0.0..=1.0).contains(&id), "identity={} out of [0,1]", id);
        }

        #[test]
        fn identical_sequences_align_perfectly(seq in protein_seq(40)) {
            let r = global_align(&seq, &seq).unwrap();
            prop_assert_eq!(r.score as usize, seq.len());
            prop_assert_eq!(r.gaps(), 0);
            prop_assert!((r.identity() - 1.0).abs() < 1e-10);
        }

        #[test]
        fn rows_consume_both_sequences(
            q in protein_seq(40),
            t in protein_seq(40),
        ) {
            let r = global_align(&q, &t).unwrap();
            let q_back: Vec<u8> =
                r.aligned_query.iter().copied().filter(|&b| b != b'-').collect();
            let t_back: Vec<u8> =
                r.aligned_target.iter().copied().filter(|&b| b != b'-').collect();
            prop_assert_eq!(q_back, q);
            prop_assert_eq!(t_back, t);
        }
    }
}
