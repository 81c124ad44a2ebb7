// # Superperm: superpermutations from exact covers
//
// This crate builds short strings containing every permutation of an n-symbol
// alphabet. The construction picks a single 3-cycle of permutations and asks an
// exact-cover solver for ways to hang every remaining 2-cycle off it as a tree.
// Each covering is then walked greedily into a permutation sequence and
// squashed into one string.
//
// The binaries under `src/bin` are thin drivers around these modules.

/// The ordered alphabet. A problem of size `n` uses the first `n` symbols.
pub const SYMBOLS: &str = "123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Smallest problem size for which the gadget construction is meaningful.
pub const MIN_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SizeError {
    #[error("n = {0} is too small (need at least {min})", min = MIN_SIZE)]
    TooSmall(usize),
    #[error("n = {0} exceeds the alphabet ({len} symbols)", len = SYMBOLS.len())]
    TooLarge(usize),
}

/// Validates a problem size for the drivers. The library itself assumes a valid `n`.
pub fn check_size(n: usize) -> Result<usize, SizeError> {
    if n < MIN_SIZE {
        Err(SizeError::TooSmall(n))
    } else if n > SYMBOLS.len() {
        Err(SizeError::TooLarge(n))
    } else {
        Ok(n)
    }
}

/// The first `n` symbols in order, i.e. the identity permutation.
pub fn alphabet(n: usize) -> &'static str {
    &SYMBOLS[..n]
}

/// `n!`, saturating at `usize::MAX`.
pub fn factorial(n: usize) -> usize {
    (1..=n).fold(1usize, |acc, k| acc.saturating_mul(k))
}

/// Overlap and compaction of string sequences.
pub mod squash;

/// Cyclic equivalence classes of permutations: 1-, 2- and 3-cycles.
pub mod cycles;

/// The single-3-cycle exact-cover instance.
pub mod matrix;

/// Exact-cover search (dancing links) behind the [`xc::ExactCover`] trait.
pub mod xc;

/// Turning a covering into a permutation walk and a superpermutation.
pub mod decode;

/// Scanning strings for the permutations they contain.
pub mod split;

/// 2-cycle and 3-cycle structure of an existing superpermutation.
pub mod cycle_graph;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_size_bounds() {
        assert_eq!(check_size(2), Err(SizeError::TooSmall(2)));
        assert_eq!(check_size(3), Ok(3));
        assert_eq!(check_size(35), Ok(35));
        assert_eq!(check_size(36), Err(SizeError::TooLarge(36)));
    }

    #[test]
    fn size_error_messages() {
        assert_eq!(
            SizeError::TooSmall(2).to_string(),
            "n = 2 is too small (need at least 3)"
        );
        assert_eq!(
            SizeError::TooLarge(36).to_string(),
            "n = 36 exceeds the alphabet (35 symbols)"
        );
    }

    #[test]
    fn alphabet_and_factorial() {
        assert_eq!(alphabet(5), "12345");
        assert_eq!(alphabet(11), "123456789AB");
        assert_eq!(factorial(0), 1);
        assert_eq!(factorial(6), 720);
        assert_eq!(factorial(40), usize::MAX);
    }
}
