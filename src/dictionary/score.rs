//! Net savings estimate for candidate sequences

use super::Sequence;

/// Estimated bytes saved by substituting a sequence
///
/// Each repetition beyond the first saves `key_len` bytes; the first copy
/// is spent on the table entry. The table entry costs a symbol byte and a
/// length byte, and each occurrence is charged one byte for its symbol.
pub fn score(key_len: usize, count: usize) -> i64 {
    let key_len = key_len as i64;
    let count = count as i64;
    key_len * (count - 1) - 2 - count
}

/// Rescore every sequence and drop those that cannot shrink the output
pub fn retain_positive(sequences: Vec<Sequence>) -> Vec<Sequence> {
    sequences
        .into_iter()
        .filter_map(|mut seq| {
            seq.score = score(seq.len(), seq.count());
            (seq.score > 0).then_some(seq)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        assert_eq!(score(2, 5), 1);
        assert_eq!(score(3, 4), 3);
        assert_eq!(score(4, 3), 3);
        assert_eq!(score(5, 2), 1);
        assert_eq!(score(2, 2), -2);
        assert_eq!(score(10, 1), -3);
        assert_eq!(score(0, 0), -2);
    }

    #[test]
    fn test_retain_positive() {
        let sequences = vec![
            Sequence::new(b"ab".to_vec(), vec![1, 3]),
            Sequence::new(b"hello".to_vec(), vec![4, 10, 16]),
        ];
        let kept = retain_positive(sequences);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].key, b"hello");
        assert_eq!(kept[0].score, 5 * 2 - 2 - 3);
    }
}
