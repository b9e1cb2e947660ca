use std::str::FromStr;

use rand::Rng;

use crate::constants::ALL_MOVES;
use crate::{error::Error, Move};

/// Generates a random scramble of `length` moves. Consecutive moves never
/// share a face and never undo a prior move on the same axis in the wrong
/// order (the same redundancy rule the search driver prunes on), so every
/// move in the scramble actually changes the cube.
pub fn gen_scramble(length: usize) -> Result<Vec<Move>, Error> {
    let mut rng = rand::thread_rng();
    let mut moves = Vec::with_capacity(length);
    while moves.len() < length {
        let m = ALL_MOVES[rng.gen_range(0..ALL_MOVES.len())];
        if let Some(&prev) = moves.last() {
            if m.is_same_layer(prev) || m.is_inverse(prev) {
                continue;
            }
        }
        moves.push(m);
    }
    Ok(moves)
}

pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace()
        .map(|word| Move::from_str(word.trim()))
        .collect()
}

pub fn scramble_to_str(s: &Vec<Move>) -> Result<String, Error> {
    let result: String = s
        .iter()
        .map(|m| Move::to_string(m))
        .fold("".to_string(), |acc, x| format!("{} {}", acc, x));
    Ok(result)
}

#[cfg(test)]
mod test {
    use crate::moves::Move::*;
    use super::*;

    #[test]
    fn test_scramble_from_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_from_str("R U R' U' F L' D' B2 R' U'").unwrap(), m);
    }

    #[test]
    fn test_scramble_to_str() {
        let m = vec![R, U, R3, U3, F, L3, D3, B2, R3, U3];
        assert_eq!(scramble_to_str(&m).unwrap().trim(), "R U R' U' F L' D' B2 R' U'");
    }

    #[test]
    fn test_gen_scramble_length_and_no_redundant_moves() {
        let ss = gen_scramble(25).unwrap();
        assert_eq!(ss.len(), 25);
        for pair in ss.windows(2) {
            assert!(!pair[1].is_same_layer(pair[0]));
            assert!(!pair[1].is_inverse(pair[0]));
        }
    }
}
