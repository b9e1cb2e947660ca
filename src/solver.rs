use std::time::{Duration, Instant};

use crate::constants::*;
use crate::coord::CoordCube;
use crate::cubie::CubieCube;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::{Move, MoveTables};
use crate::pruning::PruningTables;

lazy_static! {
    static ref MOVE_TABLES: MoveTables = MoveTables::new();
    static ref PRUNING_TABLES: PruningTables =
        PruningTables::new(&MOVE_TABLES).expect("failed to build pruning tables");
}

/// Tunables for a single [`solve`] call.
#[derive(Debug, Clone, Copy)]
pub struct SolveOptions {
    /// Longest solution the search is allowed to return.
    pub max_depth: u8,
    /// Wall-clock budget for the whole search. `None` means no limit.
    pub timeout_ms: Option<u64>,
    /// Replay the returned move list against the input cube and check it
    /// lands on the solved state before returning it.
    pub verify_solution: bool,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            timeout_ms: None,
            verify_solution: true,
        }
    }
}

/// Parses a facelet string and solves it, returning the solution as a
/// space-separated move sequence (e.g. `"R U R' U'"`, or `""` for an
/// already-solved cube).
pub fn solve_facelet(cube_string: &str, options: SolveOptions) -> Result<String, Error> {
    let fc = FaceCube::try_from(cube_string)?;
    let cc = CubieCube::try_from(&fc)?;
    solve(&cc, options)
}

/// Solves `cube`, returning the solution as a space-separated move sequence.
pub fn solve(cube: &CubieCube, options: SolveOptions) -> Result<String, Error> {
    let mv = &*MOVE_TABLES;
    let pr = &*PRUNING_TABLES;
    let max_depth = options.max_depth.min(MAX_SEARCH_DEPTH);
    let deadline = options
        .timeout_ms
        .map(|ms| Instant::now() + Duration::from_millis(ms));

    let cdc0 = CoordCube::from_cubie(cube)?;
    let mut moves = Vec::with_capacity(max_depth as usize);
    let mut solution = None;

    let h1 = pr.phase1_lower_bound(cdc0.slice_sorted / N_PERM_4 as u16, cdc0.flip, cdc0.twist);
    let mut depth1_bound = h1;
    while depth1_bound <= max_depth {
        let found = search_phase1(
            *cube,
            cdc0,
            mv,
            pr,
            &mut moves,
            depth1_bound,
            None,
            max_depth,
            deadline,
            &mut solution,
        )?;
        if found {
            break;
        }
        depth1_bound += 1;
    }

    let solution = solution.ok_or(Error::NoSolution)?;

    if options.verify_solution {
        let replayed = cube.apply_moves(&solution);
        if replayed != CubieCube::default() {
            return Err(Error::InternalError(
                "solution failed self-verification".to_string(),
            ));
        }
    }

    Ok(moves_to_string(&solution))
}

/// Depth-bounded phase 1 search. Whenever the walk reaches the phase 1 goal
/// subgroup (`twist = flip = slice = 0`), it pivots into phase 2 with
/// whatever depth budget remains; if phase 2 can't finish within that
/// budget, the walk resumes exploring phase 1 from the same node (the
/// back-pivot the driver relies on instead of re-running phase 1 from
/// scratch at every candidate length).
#[allow(clippy::too_many_arguments)]
fn search_phase1(
    cc: CubieCube,
    cdc: CoordCube,
    mv: &MoveTables,
    pr: &PruningTables,
    moves: &mut Vec<Move>,
    depth_left: u8,
    prev: Option<Move>,
    max_depth: u8,
    deadline: Option<Instant>,
    solution: &mut Option<Vec<Move>>,
) -> Result<bool, Error> {
    if let Some(dl) = deadline {
        if Instant::now() >= dl {
            return Err(Error::Timeout);
        }
    }

    if cdc.twist == 0 && cdc.flip == 0 && cdc.slice_sorted / N_PERM_4 as u16 == 0 {
        let mut pivoted = cdc;
        pivoted.pivot(&cc);
        let budget = max_depth - moves.len() as u8;
        if search_phase2(cc, pivoted, mv, pr, moves, budget, None, deadline, solution)? {
            return Ok(true);
        }
    }

    if depth_left == 0 {
        return Ok(false);
    }

    let h = pr.phase1_lower_bound(cdc.slice_sorted / N_PERM_4 as u16, cdc.flip, cdc.twist);
    if h > depth_left {
        return Ok(false);
    }

    for &m in ALL_MOVES.iter() {
        if let Some(p) = prev {
            if m.is_same_layer(p) || m.is_inverse(p) {
                continue;
            }
        }

        let mut cc2 = cc;
        cc2.multiply(CubieCube::basic_move_cube(m));
        let mut cdc2 = cdc;
        cdc2.phase1_move(m, mv);

        moves.push(m);
        let found = search_phase1(
            cc2,
            cdc2,
            mv,
            pr,
            moves,
            depth_left - 1,
            Some(m),
            max_depth,
            deadline,
            solution,
        )?;
        moves.pop();

        if found {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Depth-bounded phase 2 search restricted to [`PHASE2_MOVES`].
#[allow(clippy::too_many_arguments)]
fn search_phase2(
    cc: CubieCube,
    cdc: CoordCube,
    mv: &MoveTables,
    pr: &PruningTables,
    moves: &mut Vec<Move>,
    depth_left: u8,
    prev: Option<Move>,
    deadline: Option<Instant>,
    solution: &mut Option<Vec<Move>>,
) -> Result<bool, Error> {
    if let Some(dl) = deadline {
        if Instant::now() >= dl {
            return Err(Error::Timeout);
        }
    }

    if cdc.corners == 0 && cdc.ud_edges == 0 && cdc.slice_sorted == 0 {
        *solution = Some(moves.clone());
        return Ok(true);
    }

    if depth_left == 0 {
        return Ok(false);
    }

    let h = pr.phase2_lower_bound(cdc.corners, cdc.ud_edges, cdc.slice_sorted, cc.get_parity());
    if h > depth_left {
        return Ok(false);
    }

    for &m in PHASE2_MOVES.iter() {
        if let Some(p) = prev {
            if m.is_same_layer(p) || m.is_inverse(p) {
                continue;
            }
        }

        let mut cc2 = cc;
        cc2.multiply(CubieCube::basic_move_cube(m));
        let mut cdc2 = cdc;
        cdc2.phase2_move(m, mv);

        moves.push(m);
        let found = search_phase2(
            cc2,
            cdc2,
            mv,
            pr,
            moves,
            depth_left - 1,
            Some(m),
            deadline,
            solution,
        )?;
        moves.pop();

        if found {
            return Ok(true);
        }
    }

    Ok(false)
}

fn moves_to_string(moves: &[Move]) -> String {
    moves
        .iter()
        .map(Move::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facelet::SOLVED_FACE_CUBE;

    fn opts() -> SolveOptions {
        SolveOptions {
            max_depth: 24,
            timeout_ms: Some(30_000),
            verify_solution: true,
        }
    }

    #[test]
    fn test_solve_already_solved_is_empty() {
        let cc = CubieCube::default();
        let solution = solve(&cc, opts()).unwrap();
        assert_eq!(solution, "");
    }

    #[test]
    fn test_solve_single_move_scramble() {
        let cc = CubieCube::default().apply_move(Move::R);
        let solution = solve(&cc, opts()).unwrap();
        let moves: Vec<Move> = solution
            .split_whitespace()
            .map(|w| w.parse().unwrap())
            .collect();
        assert_eq!(cc.apply_moves(&moves), CubieCube::default());
    }

    #[test]
    fn test_solve_short_scramble_round_trips() {
        let scramble = [
            Move::U,
            Move::R,
            Move::F2,
            Move::D3,
            Move::L,
            Move::B2,
            Move::U2,
        ];
        let cc = CubieCube::default().apply_moves(&scramble);
        let solution = solve(&cc, opts()).unwrap();
        let moves: Vec<Move> = solution
            .split_whitespace()
            .map(|w| w.parse().unwrap())
            .collect();
        assert!(moves.len() as u8 <= opts().max_depth);
        assert_eq!(cc.apply_moves(&moves), CubieCube::default());
    }

    #[test]
    fn test_solve_facelet_matches_solve() {
        let s = SOLVED_FACE_CUBE.to_string();
        let solution = solve_facelet(&s, opts()).unwrap();
        assert_eq!(solution, "");
    }

    #[test]
    fn test_solve_rejects_invalid_cube() {
        let mut cc = CubieCube::default();
        cc.co[0] = 1;
        let err = solve(&cc, opts()).unwrap_err();
        assert!(matches!(err, Error::TwistError));
    }
}
