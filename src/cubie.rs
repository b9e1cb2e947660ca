use rand::random;
use std::fmt;

use self::{Corner::*, Edge::*};
use crate::constants::*;
use crate::error::Error;
use crate::facelet::FaceCube;
use crate::moves::{Move, B_MOVE, D_MOVE, F_MOVE, L_MOVE, R_MOVE, U_MOVE};

/// The 8 corner cubies, named by the three faces they show when solved.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy)]
pub enum Corner {
    URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB,
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Corner {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(URF),
            1 => Ok(UFL),
            2 => Ok(ULB),
            3 => Ok(UBR),
            4 => Ok(DFR),
            5 => Ok(DLF),
            6 => Ok(DBL),
            7 => Ok(DRB),
            _ => Err(Error::InvalidCorner),
        }
    }
}

/// The 12 edge cubies, named by the two faces they show when solved.
#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy)]
pub enum Edge {
    UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<u8> for Edge {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(UR),
            1 => Ok(UF),
            2 => Ok(UL),
            3 => Ok(UB),
            4 => Ok(DR),
            5 => Ok(DF),
            6 => Ok(DL),
            7 => Ok(DB),
            8 => Ok(FR),
            9 => Ok(FL),
            10 => Ok(BL),
            11 => Ok(BR),
            _ => Err(Error::InvalidEdge),
        }
    }
}

/// Cube on the cubie level: corner/edge permutation plus orientation.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct CubieCube {
    /// Corner permutation, relative to the solved state.
    pub cp: [Corner; 8],
    /// Corner orientation: 0 correct, 1/2 twisted clockwise/counter-clockwise.
    pub co: [u8; 8],
    /// Edge permutation, relative to the solved state.
    pub ep: [Edge; 12],
    /// Edge orientation: 0 correct, 1 flipped.
    pub eo: [u8; 12],
}

pub const SOLVED_CUBIE_CUBE: CubieCube = CubieCube {
    cp: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
    co: [0, 0, 0, 0, 0, 0, 0, 0],
    ep: [UR, UF, UL, UB, DR, DF, DL, DB, FR, FL, BL, BR],
    eo: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
};

impl Default for CubieCube {
    fn default() -> Self {
        SOLVED_CUBIE_CUBE
    }
}

impl fmt::Display for CubieCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        for i in 0..8 {
            s.push_str(&format!("({},{})", self.cp[i], self.co[i]));
        }
        for i in 0..12 {
            s.push_str(&format!("({},{})", self.ep[i], self.eo[i]));
        }
        write!(f, "{s}")
    }
}

/// Builds a cubie state from a facelet string, identifying the occupant of
/// each corner/edge slot by matching its observed sticker colors against the
/// home colour triples/pairs in `facelet::CORNER_COLOR`/`EDGE_COLOR`.
impl TryFrom<&FaceCube> for CubieCube {
    type Error = Error;
    fn try_from(face_cube: &FaceCube) -> Result<Self, Self::Error> {
        use crate::facelet::{Color, CORNER_COLOR, CORNER_FACELET, EDGE_COLOR, EDGE_FACELET};

        let mut state = CubieCube::default();

        for i in 0..8 {
            let mut ori = 0usize;
            for index in 0..3 {
                ori = index;
                let sticker = face_cube.f[CORNER_FACELET[i][ori] as usize];
                if sticker == Color::U || sticker == Color::D {
                    break;
                }
            }
            let col1 = face_cube.f[CORNER_FACELET[i][(ori + 1) % 3] as usize];
            let col2 = face_cube.f[CORNER_FACELET[i][(ori + 2) % 3] as usize];

            let mut found = false;
            for j in 0..8 {
                if col1 == CORNER_COLOR[j][1] && col2 == CORNER_COLOR[j][2] {
                    state.cp[i] = Corner::try_from(j as u8)?;
                    state.co[i] = ori as u8 % 3;
                    found = true;
                    break;
                }
            }
            if !found {
                return Err(Error::CornerNotFound);
            }
        }

        for i in 0..12 {
            let mut found = false;
            for j in 0..12 {
                if face_cube.f[EDGE_FACELET[i][0] as usize] == EDGE_COLOR[j][0]
                    && face_cube.f[EDGE_FACELET[i][1] as usize] == EDGE_COLOR[j][1]
                {
                    state.ep[i] = Edge::try_from(j as u8)?;
                    state.eo[i] = 0;
                    found = true;
                    break;
                }
                if face_cube.f[EDGE_FACELET[i][0] as usize] == EDGE_COLOR[j][1]
                    && face_cube.f[EDGE_FACELET[i][1] as usize] == EDGE_COLOR[j][0]
                {
                    state.ep[i] = Edge::try_from(j as u8)?;
                    state.eo[i] = 1;
                    found = true;
                    break;
                }
            }
            if !found {
                return Err(Error::EdgeNotFound);
            }
        }

        state.verify()?;
        Ok(state)
    }
}

impl CubieCube {
    /// Returns the basic move cube for `m`, built by composing the six
    /// quarter-turn generators.
    pub fn basic_move_cube(m: Move) -> CubieCube {
        use Move::*;
        match m {
            U => U_MOVE,
            R => R_MOVE,
            F => F_MOVE,
            D => D_MOVE,
            L => L_MOVE,
            B => B_MOVE,
            U2 | U3 | R2 | R3 | F2 | F3 | D2 | D3 | L2 | L3 | B2 | B3 => {
                let base = Self::basic_move_cube(Self::base_face(m));
                let mut acc = base;
                let reps = Self::turns(m);
                for _ in 1..reps {
                    acc.multiply(base);
                }
                acc
            }
        }
    }

    fn base_face(m: Move) -> Move {
        use Move::*;
        match m {
            U | U2 | U3 => U,
            R | R2 | R3 => R,
            F | F2 | F3 => F,
            D | D2 | D3 => D,
            L | L2 | L3 => L,
            B | B2 | B3 => B,
        }
    }

    fn turns(m: Move) -> u8 {
        use Move::*;
        match m {
            U | R | F | D | L | B => 1,
            U2 | R2 | F2 | D2 | L2 | B2 => 2,
            U3 | R3 | F3 | D3 | L3 | B3 => 3,
        }
    }

    /// Applies a single move, returning the resulting state.
    pub fn apply_move(&self, m: Move) -> Self {
        let mut result = *self;
        result.multiply(Self::basic_move_cube(m));
        result
    }

    /// Applies a sequence of moves in order.
    pub fn apply_moves(&self, moves: &[Move]) -> Self {
        moves.iter().fold(*self, |acc, &m| acc.apply_move(m))
    }

    /// Multiplies this cube by `b`, restricted to the corners: `self := self * b`.
    pub fn corner_multiply(&mut self, b: CubieCube) {
        let mut c_perm = [URF; 8];
        let mut c_ori = [0u8; 8];
        for ci in ALL_CORNERS {
            let c = ci as usize;
            c_perm[c] = self.cp[b.cp[c] as usize];
            c_ori[c] = (self.co[b.cp[c] as usize] + b.co[c]) % 3;
        }
        self.cp = c_perm;
        self.co = c_ori;
    }

    /// Multiplies this cube by `b`, restricted to the edges: `self := self * b`.
    pub fn edge_multiply(&mut self, b: CubieCube) {
        let mut e_perm = [UR; 12];
        let mut e_ori = [0u8; 12];
        for ei in ALL_EDGES {
            let e = ei as usize;
            e_perm[e] = self.ep[b.ep[e] as usize];
            e_ori[e] = (self.eo[b.ep[e] as usize] + b.eo[e]) % 2;
        }
        self.ep = e_perm;
        self.eo = e_ori;
    }

    /// Multiplies this cube by `b`: `self := self * b`.
    pub fn multiply(&mut self, b: CubieCube) {
        self.corner_multiply(b);
        self.edge_multiply(b);
    }

    /// twist coordinate: 0 <= twist < 2187. co[7] (DRB) is determined by the rest.
    pub fn get_twist(&self) -> u16 {
        let mut ret: u16 = 0;
        for i in 0..7 {
            ret = 3 * ret + self.co[i] as u16;
        }
        ret
    }

    pub fn set_twist(&mut self, twist: u16) {
        let mut twistparity: u16 = 0;
        let mut twist = twist;
        for i in (0..7).rev() {
            self.co[i] = (twist % 3) as u8;
            twistparity += self.co[i] as u16;
            twist /= 3;
        }
        self.co[7] = ((3 - twistparity % 3) % 3) as u8;
    }

    /// flip coordinate: 0 <= flip < 2048. eo[11] (BR) is determined by the rest.
    pub fn get_flip(&self) -> u16 {
        let mut ret: u16 = 0;
        for i in 0..11 {
            ret = 2 * ret + self.eo[i] as u16;
        }
        ret
    }

    pub fn set_flip(&mut self, flip: u16) {
        let mut flipparity: u16 = 0;
        let mut flip = flip;
        for i in (0..11).rev() {
            self.eo[i] = (flip % 2) as u8;
            flipparity += self.eo[i] as u16;
            flip /= 2;
        }
        self.eo[11] = ((2 - flipparity % 2) % 2) as u8;
    }

    /// slice coordinate: location of the FR/FL/BL/BR edges among the 12
    /// slots, ignoring their relative order. 0 <= slice < 495.
    pub fn get_slice(&self) -> u16 {
        (self.get_slice_sorted() / N_PERM_4 as u16) as u16
    }

    /// slice_sorted coordinate: location and order of the FR/FL/BL/BR edges.
    /// 0 <= slice_sorted < 11880.
    pub fn get_slice_sorted(&self) -> u16 {
        get_edges_sorted(&self.ep, |e| matches!(e, FR | FL | BL | BR))
    }

    pub fn set_slice_sorted(&mut self, idx: u16) {
        set_edges_sorted(&mut self.ep, idx, &[FR, FL, BL, BR], &[UR, UF, UL, UB, DR, DF, DL, DB]);
    }

    /// u_edges coordinate: location and order of UR/UF/UL/UB among the 12
    /// slots. Used only at the phase 1 -> phase 2 pivot. 0 <= u_edges < 11880.
    pub fn get_u_edges(&self) -> u16 {
        get_edges_sorted(&self.ep, |e| matches!(e, UR | UF | UL | UB))
    }

    pub fn set_u_edges(&mut self, idx: u16) {
        set_edges_sorted(&mut self.ep, idx, &[UR, UF, UL, UB], &[DR, DF, DL, DB, FR, FL, BL, BR]);
    }

    /// d_edges coordinate: location and order of DR/DF/DL/DB among the 12
    /// slots. Used only at the phase 1 -> phase 2 pivot. 0 <= d_edges < 11880.
    pub fn get_d_edges(&self) -> u16 {
        get_edges_sorted(&self.ep, |e| matches!(e, DR | DF | DL | DB))
    }

    pub fn set_d_edges(&mut self, idx: u16) {
        set_edges_sorted(&mut self.ep, idx, &[DR, DF, DL, DB], &[UR, UF, UL, UB, FR, FL, BL, BR]);
    }

    /// corners coordinate: Lehmer rank of the 8-corner permutation.
    /// 0 <= corners < 40320.
    pub fn get_corners(&self) -> u16 {
        let mut perm: [u8; 8] = [0; 8];
        for i in 0..8 {
            perm[i] = self.cp[i] as u8;
        }
        lehmer_rank(&mut perm)
    }

    pub fn set_corners(&mut self, idx: u16) {
        self.cp = ALL_CORNERS;
        let mut idx = idx;
        for j in 1..8usize {
            let k = idx % (j as u16 + 1);
            idx /= j as u16 + 1;
            for _ in 0..k {
                rotate_right(&mut self.cp, 0, j);
            }
        }
    }

    /// ud_edges coordinate: Lehmer rank of the permutation of the 8
    /// U/D-layer edges (UR,UF,UL,UB,DR,DF,DL,DB). Only meaningful once
    /// `slice_sorted < 24`, i.e. the FR/FL/BL/BR edges already sit in their
    /// home slots. 0 <= ud_edges < 40320.
    pub fn get_ud_edges(&self) -> u16 {
        let mut perm: [u8; 8] = [0; 8];
        for i in 0..8 {
            perm[i] = self.ep[i] as u8;
        }
        lehmer_rank(&mut perm)
    }

    pub fn set_ud_edges(&mut self, idx: usize) {
        let mut ud = [UR, UF, UL, UB, DR, DF, DL, DB];
        let mut idx = idx as u16;
        for j in 1..8usize {
            let k = idx % (j as u16 + 1);
            idx /= j as u16 + 1;
            for _ in 0..k {
                rotate_right(&mut ud, 0, j);
            }
        }
        for i in 0..8 {
            self.ep[i] = ud[i];
        }
    }

    /// parity coordinate: 0 if the corner (equivalently edge) permutation is even.
    pub fn get_parity(&self) -> u8 {
        if self.corner_parity() {
            0
        } else {
            1
        }
    }

    /// Generates a uniformly random valid cube. Used by the scramble generator
    /// and by property tests.
    pub fn randomize(&mut self) {
        let mut idx = random::<usize>() % 479_001_600; // 12!
        self.ep = ALL_EDGES;
        for j in 1..12usize {
            let k = idx % (j + 1);
            idx /= j + 1;
            for _ in 0..k {
                rotate_right(&mut self.ep, 0, j);
            }
        }
        let edge_parity = self.edge_parity();
        loop {
            self.set_corners(random::<u16>() % 40320);
            if edge_parity == self.corner_parity() {
                break;
            }
        }
        self.set_flip(random::<u16>() % 2048);
        self.set_twist(random::<u16>() % 2187);
    }

    pub fn corner_parity(&self) -> bool {
        let mut s = 0u32;
        for i in (1..8).rev() {
            for j in (0..i).rev() {
                if self.cp[j] > self.cp[i] {
                    s += 1;
                }
            }
        }
        s % 2 == 0
    }

    pub fn edge_parity(&self) -> bool {
        let mut s = 0u32;
        for i in (1..12).rev() {
            for j in (0..i).rev() {
                if self.ep[j] > self.ep[i] {
                    s += 1;
                }
            }
        }
        s % 2 == 0
    }

    pub fn inverse(&self) -> Self {
        let mut d = CubieCube::default();
        for ei in ALL_EDGES {
            d.ep[self.ep[ei as usize] as usize] = ei;
        }
        for ei in ALL_EDGES {
            d.eo[ei as usize] = self.eo[d.ep[ei as usize] as usize];
        }
        for ci in ALL_CORNERS {
            d.cp[self.cp[ci as usize] as usize] = ci;
        }
        for ci in ALL_CORNERS {
            let ori = self.co[d.cp[ci as usize] as usize];
            d.co[ci as usize] = (3 - ori) % 3;
        }
        d
    }

    /// Checks the seven cube invariants in a fixed order, returning the
    /// first one that fails.
    pub fn verify(&self) -> Result<(), Error> {
        let mut edge_count = [0u8; 12];
        for i in 0..12 {
            edge_count[self.ep[i] as usize] += 1;
        }
        if edge_count.iter().any(|&c| c != 1) {
            return Err(Error::InvalidEdge);
        }

        let eo_sum: u32 = self.eo.iter().map(|&e| e as u32).sum();
        if eo_sum % 2 != 0 {
            return Err(Error::FlipError);
        }

        let mut corner_count = [0u8; 8];
        for i in 0..8 {
            corner_count[self.cp[i] as usize] += 1;
        }
        if corner_count.iter().any(|&c| c != 1) {
            return Err(Error::InvalidCorner);
        }

        let co_sum: u32 = self.co.iter().map(|&c| c as u32).sum();
        if co_sum % 3 != 0 {
            return Err(Error::TwistError);
        }

        if self.edge_parity() != self.corner_parity() {
            return Err(Error::ParityError);
        }

        Ok(())
    }
}

/// Lehmer-code rank of a permutation of {0, ..., n-1} given as `perm`.
/// Destroys `perm` by rotating it down to the identity.
fn lehmer_rank<const N: usize>(perm: &mut [u8; N]) -> u16 {
    let mut b: u16 = 0;
    for j in (1..N).rev() {
        let mut k = 0u16;
        while perm[j] as usize != j {
            rotate_left(perm, 0, j);
            k += 1;
        }
        b = (j as u16 + 1) * b + k;
    }
    b
}

/// Rank of the location-and-order of the 4 edges satisfying `is_chosen`
/// among all 12 edge slots: a combination rank (which 4 slots) times 24
/// plus a permutation rank (their relative order).
fn get_edges_sorted(ep: &[Edge; 12], is_chosen: impl Fn(Edge) -> bool) -> u16 {
    let mut a: u32 = 0;
    let mut x: u32 = 0;
    let mut chosen = [UR; 4];
    for j in (0..12).rev() {
        if is_chosen(ep[j]) {
            a += c_nk((11 - j) as u32, x + 1);
            chosen[3 - x as usize] = ep[j];
            x += 1;
        }
    }
    let mut b: u32 = 0;
    for j in (1..4usize).rev() {
        let mut k = 0u32;
        while chosen[j] as usize != j + 8 {
            rotate_left(&mut chosen, 0, j);
            k += 1;
        }
        b = (j as u32 + 1) * b + k;
    }
    (24 * a + b) as u16
}

fn set_edges_sorted(ep: &mut [Edge; 12], idx: u16, chosen_edges: &[Edge; 4], other_edges: &[Edge; 8]) {
    let mut b = (idx % 24) as u32;
    let mut a = (idx / 24) as u32;

    let mut chosen = *chosen_edges;
    for j in 1..4usize {
        let k = b % (j as u32 + 1);
        b /= j as u32 + 1;
        for _ in 0..k {
            rotate_right(&mut chosen, 0, j);
        }
    }

    let mut slot_used = [false; 12];
    let mut x: i32 = 3;
    for j in 0..12usize {
        if a >= c_nk((11 - j) as u32, (x + 1) as u32) {
            ep[j] = chosen[(3 - x) as usize];
            slot_used[j] = true;
            a -= c_nk((11 - j) as u32, (x + 1) as u32);
            x -= 1;
        }
    }
    let mut oi = 0usize;
    for j in 0..12usize {
        if !slot_used[j] {
            ep[j] = other_edges[oi];
            oi += 1;
        }
    }
}

/// Rotates `arr[left..=right]` one step right (the element at `right` moves to `left`).
pub fn rotate_right<T: Copy>(arr: &mut [T], left: usize, right: usize) {
    let temp = arr[right];
    for i in (left + 1..=right).rev() {
        arr[i] = arr[i - 1];
    }
    arr[left] = temp;
}

/// Rotates `arr[left..=right]` one step left (the element at `left` moves to `right`).
pub fn rotate_left<T: Copy>(arr: &mut [T], left: usize, right: usize) {
    let temp = arr[left];
    for i in left..right {
        arr[i] = arr[i + 1];
    }
    arr[right] = temp;
}

/// Binomial coefficient (n choose k), 0 if n < k.
pub fn c_nk(n: u32, k: u32) -> u32 {
    let mut k = k;
    if n < k {
        return 0;
    }
    if k > n / 2 {
        k = n - k;
    }
    let mut s = 1u32;
    let mut i = n;
    let mut j = 1u32;
    while i != n - k {
        s *= i;
        s /= j;
        i -= 1;
        j += 1;
    }
    s
}

/// The six basic move cubes, indexed by `facelet::Color as usize`
/// (U=0, R=1, F=2, D=3, L=4, B=5), matching the order iterated by
/// `constants::ALL_COLORS`.
pub fn basic_move_cubes() -> [CubieCube; 6] {
    [U_MOVE, R_MOVE, F_MOVE, D_MOVE, L_MOVE, B_MOVE]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move::*;

    #[test]
    fn test_identity_roundtrip() {
        let state = CubieCube::default();
        assert_eq!(state.apply_move(U).apply_move(U3), state);
    }

    #[test]
    fn test_inverse() {
        let state = CubieCube::default().apply_moves(&[R, U, R3, U3, F, L]);
        let inv = state.inverse();
        let mut combined = state;
        combined.multiply(inv);
        assert_eq!(combined, CubieCube::default());
    }

    #[test]
    fn test_move_sequence_cancels() {
        let moves = [R, U, R3, U3, R, U, R3, U3, R, U, R3, U3, R, U, R3, U3, R, U, R3, U3, R, U, R3, U3];
        let state = CubieCube::default().apply_moves(&moves);
        assert_eq!(state, SOLVED_CUBIE_CUBE);
    }

    #[test]
    fn test_verify_detects_bad_orientation() {
        let mut state = CubieCube::default();
        state.co[0] = 1;
        assert!(matches!(state.verify(), Err(Error::TwistError)));
    }

    #[test]
    fn test_twist_coordinate_roundtrip() {
        let mut c = CubieCube::default();
        for v in [0u16, 1, 2186, 1000] {
            c.set_twist(v);
            assert_eq!(c.get_twist(), v);
        }
    }

    #[test]
    fn test_flip_coordinate_roundtrip() {
        let mut c = CubieCube::default();
        for v in [0u16, 1, 2047, 1000] {
            c.set_flip(v);
            assert_eq!(c.get_flip(), v);
        }
    }

    #[test]
    fn test_corners_coordinate_roundtrip() {
        let mut c = CubieCube::default();
        for v in [0u16, 1, 40319, 12345] {
            c.set_corners(v);
            assert_eq!(c.get_corners(), v);
        }
    }

    #[test]
    fn test_slice_sorted_coordinate_roundtrip() {
        let mut c = CubieCube::default();
        for v in [0u16, 1, 11879, 5000] {
            c.set_slice_sorted(v);
            assert_eq!(c.get_slice_sorted(), v);
        }
    }

    #[test]
    fn test_ud_edges_coordinate_roundtrip() {
        let mut c = CubieCube::default();
        for v in [0u16, 1, 40319, 777] {
            c.set_ud_edges(v as usize);
            assert_eq!(c.get_ud_edges(), v);
        }
    }
}
