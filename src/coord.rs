use std::fmt;

use crate::constants::*;
use crate::cubie::Edge::*;
use crate::error::Error;
use crate::moves::{self, Move, MoveTables};
use crate::{cubie::CubieCube, decode_table, write_table};

/// Represents a cube on the coordinate level.
///
/// In phase 1 a state is uniquely determined by `twist`, `flip` and
/// `slice` (= `slice_sorted / 24`). In phase 2 a state is uniquely
/// determined by `corners`, `ud_edges` and `slice_sorted % 24`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CoordCube {
    pub twist: u16,
    pub flip: u16,
    /// Valid in phase 1 (< 11880) and phase 2 (< 24); `slice_sorted / 24` is
    /// the phase 1 `slice` coordinate.
    pub slice_sorted: u16,
    /// Valid in phase 1 only (< 11880); used to assemble `ud_edges` at the pivot.
    pub u_edges: u16,
    /// Valid in phase 1 only (< 11880); used to assemble `ud_edges` at the pivot.
    pub d_edges: u16,
    pub corners: u16,
    /// Valid only once phase 2 has been entered (slice_sorted < 24).
    pub ud_edges: u16,
}

/// Sentinel stored in `ud_edges` before phase 2 coordinates are known.
pub const UD_EDGES_UNSET: u16 = u16::MAX;

impl Default for CoordCube {
    fn default() -> Self {
        Self {
            twist: 0,
            flip: 0,
            slice_sorted: 0,
            u_edges: 1656,
            d_edges: 0,
            corners: 0,
            ud_edges: 0,
        }
    }
}

impl fmt::Display for CoordCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(twist: {}, flip: {}, slice: {}, corners: {}, ud_edges: {})",
            self.twist,
            self.flip,
            self.slice_sorted / 24,
            self.corners,
            self.ud_edges
        )
    }
}

impl CoordCube {
    pub fn from_cubie(cc: &CubieCube) -> Result<Self, Error> {
        cc.verify()?;

        let slice_sorted = cc.get_slice_sorted();
        let ud_edges = if slice_sorted < N_PERM_4 as u16 {
            cc.get_ud_edges()
        } else {
            UD_EDGES_UNSET
        };

        Ok(Self {
            twist: cc.get_twist(),
            flip: cc.get_flip(),
            slice_sorted,
            u_edges: cc.get_u_edges(),
            d_edges: cc.get_d_edges(),
            corners: cc.get_corners(),
            ud_edges,
        })
    }

    /// Advances all phase 1 coordinates by one move, using the pre-computed
    /// move tables. Also keeps `corners` current so the phase 1 -> phase 2
    /// pivot does not need to recompute it from a cubie replay.
    pub fn phase1_move(&mut self, m: Move, mv: &MoveTables) {
        self.twist = mv.twist_move[N_MOVE * self.twist as usize + m as usize];
        self.flip = mv.flip_move[N_MOVE * self.flip as usize + m as usize];
        self.slice_sorted = mv.slice_sorted_move[N_MOVE * self.slice_sorted as usize + m as usize];
        self.u_edges = mv.u_edges_move[N_MOVE * self.u_edges as usize + m as usize];
        self.d_edges = mv.d_edges_move[N_MOVE * self.d_edges as usize + m as usize];
        self.corners = mv.corners_move[N_MOVE * self.corners as usize + m as usize];
    }

    /// Advances phase 2 coordinates by one move. `m` must be one of the 10
    /// phase-2 moves.
    pub fn phase2_move(&mut self, m: Move, mv: &MoveTables) {
        self.slice_sorted = mv.slice_sorted_move[N_MOVE * self.slice_sorted as usize + m as usize];
        self.corners = mv.corners_move[N_MOVE * self.corners as usize + m as usize];
        self.ud_edges = mv.ud_edges_move[N_MOVE * self.ud_edges as usize + m as usize];
    }

    /// Recomputes `ud_edges` from the cubie state tracked alongside the
    /// phase 1 search, once `slice_sorted < 24` (the pivot point). Phase 1
    /// does not probe `ud_edges` at all, so it is cheaper to read it off the
    /// cubie replay here than to maintain a dedicated move table for it.
    pub fn pivot(&mut self, cc: &CubieCube) {
        debug_assert!(self.slice_sorted < N_PERM_4 as u16);
        self.ud_edges = cc.get_ud_edges();
    }
}

/// Stores the phase 2 `ud_edges` coordinate recovered from a phase 1
/// `(u_edges, d_edges)` pair. Built by filtering out `(u_edges, d_edges)`
/// combinations whose edge sets collide, leaving exactly 40320 valid
/// `(u_edges, slice_sorted % 24)` pairs with a dense `ud_edges` index.
pub struct EdgeMergeTables {
    pub ud_edges: Vec<u16>,
}

impl EdgeMergeTables {
    pub fn new() -> Self {
        Self {
            ud_edges: create_phase2_edgemerge_table().unwrap(),
        }
    }
}

impl Default for EdgeMergeTables {
    fn default() -> Self {
        Self::new()
    }
}

fn create_phase2_edgemerge_table() -> Result<Vec<u16>, Error> {
    let fname = "tables/phase2_edgemerge";
    let mut u_edges_plus_d_edges_to_ud_edges: Vec<u16> = vec![0; N_U_EDGES_PHASE2 * N_PERM_4];
    let mut c_u = CubieCube::default();
    let mut c_d = CubieCube::default();
    let mut c_ud = CubieCube::default();
    let edge_u = [UR, UF, UL, UB];
    let edge_d = [DR, DF, DL, DB];
    let edge_ud = [UR, UF, UL, UB, DR, DF, DL, DB];

    let phase2_edgemerge_table = std::fs::read(fname).unwrap_or_default();
    if phase2_edgemerge_table.is_empty() {
        println!("Creating {} table...", fname);
        for i in 0..N_U_EDGES_PHASE2 {
            c_u.set_u_edges(i as u16);
            for j in 0..N_CHOOSE_8_4 {
                c_d.set_d_edges((j * N_PERM_4) as u16);
                let mut invalid = false;
                for ei in edge_ud {
                    let e = ei as usize;
                    let mut set = false;
                    if edge_u.contains(&c_u.ep[e]) {
                        c_ud.ep[e] = c_u.ep[e];
                        set = true;
                    }
                    if edge_d.contains(&c_d.ep[e]) {
                        c_ud.ep[e] = c_d.ep[e];
                        set = true;
                    }
                    if !set {
                        invalid = true;
                        break;
                    }
                }
                if !invalid {
                    for k in 0..N_PERM_4 {
                        c_d.set_d_edges((j * N_PERM_4 + k) as u16);
                        for ei in edge_ud {
                            let e = ei as usize;
                            if edge_u.contains(&c_u.ep[e]) {
                                c_ud.ep[e] = c_u.ep[e];
                            }
                            if edge_d.contains(&c_d.ep[e]) {
                                c_ud.ep[e] = c_d.ep[e];
                            }
                        }
                        u_edges_plus_d_edges_to_ud_edges[N_PERM_4 * i + k] = c_ud.get_ud_edges();
                    }
                }
            }
        }
        write_table(fname, &u_edges_plus_d_edges_to_ud_edges)?;
    } else {
        u_edges_plus_d_edges_to_ud_edges = decode_table(&phase2_edgemerge_table)?;
    }
    Ok(u_edges_plus_d_edges_to_ud_edges)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::facelet::FaceCube;
    use crate::moves::Move;

    #[test]
    fn test_coordcube_from_solved() {
        let cc = CubieCube::default();
        let cdc = CoordCube::from_cubie(&cc).unwrap();
        assert_eq!(cdc.twist, 0);
        assert_eq!(cdc.flip, 0);
        assert_eq!(cdc.slice_sorted, 0);
        assert_eq!(cdc.corners, 0);
        assert_eq!(cdc.ud_edges, 0);
    }

    #[test]
    fn test_coordcube_moves_track_cubie() {
        let fc = FaceCube::try_from("RLLBUFUUUBDURRBBUBRLRRFDFDDLLLUDFLRRDDFRLFDBUBFFLBBDUF").unwrap();
        let cc = CubieCube::try_from(&fc).unwrap();
        let mv = MoveTables::new();
        let mut cdc = CoordCube::from_cubie(&cc).unwrap();
        cdc.phase1_move(Move::U2, &mv);
        let cc2 = cc.apply_move(Move::U2);
        let cdc2 = CoordCube::from_cubie(&cc2).unwrap();
        assert_eq!(cdc.twist, cdc2.twist);
        assert_eq!(cdc.flip, cdc2.flip);
        assert_eq!(cdc.slice_sorted, cdc2.slice_sorted);
        assert_eq!(cdc.corners, cdc2.corners);
    }

    #[test]
    fn test_create_phase2_edgemerge_table() {
        let ud_edges = create_phase2_edgemerge_table().unwrap();
        assert_eq!(ud_edges.len(), 40320);
    }
}
