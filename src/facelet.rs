use std::fmt;

use crate::cubie::CubieCube;
use crate::error::Error;

/// Names the colors of the cube facelets: up, right, front, down, left, back.
#[rustfmt::skip]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Eq, Hash)]
pub enum Color {
    U, R, F, D, L, B,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl TryFrom<char> for Color {
    type Error = Error;
    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'U' => Ok(Color::U),
            'R' => Ok(Color::R),
            'F' => Ok(Color::F),
            'D' => Ok(Color::D),
            'L' => Ok(Color::L),
            'B' => Ok(Color::B),
            _ => Err(Error::BadFaceletChar),
        }
    }
}

/// Cube on the facelet level: 54 stickers, ordered U-R-F-D-L-B, each face
/// row-major starting at the top-left sticker.
///
/// A solved facelet string is `UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB`.
#[derive(Debug, PartialEq)]
pub struct FaceCube {
    pub f: [Color; 54],
}

#[rustfmt::skip]
pub const SOLVED_FACE_CUBE: FaceCube = FaceCube {
    f: [
        Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U, Color::U,
        Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R, Color::R,
        Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F, Color::F,
        Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D, Color::D,
        Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L, Color::L,
        Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B, Color::B,
    ],
};

impl Default for FaceCube {
    fn default() -> Self {
        SOLVED_FACE_CUBE
    }
}

/// Builds the facelet string for a cubie state. Corners/edges always sit in
/// the same six reference slots, so no whole-cube reorientation is needed.
impl From<&CubieCube> for FaceCube {
    fn from(cc: &CubieCube) -> Self {
        let mut face = FaceCube::default();

        for (i, c) in CENTER_FACELET.iter().enumerate() {
            face.f[*c as usize] = CENTER_COLOR[i];
        }

        for (i, corner_faces) in CORNER_FACELET.iter().enumerate() {
            let corner = cc.cp[i] as usize;
            for (j, ff) in corner_faces.iter().enumerate() {
                face.f[*ff as usize] = CORNER_COLOR[corner][(j + (3 - cc.co[i] as usize)) % 3];
            }
        }

        for (i, edge_faces) in EDGE_FACELET.iter().enumerate() {
            let edge = cc.ep[i] as usize;
            for (j, ff) in edge_faces.iter().enumerate() {
                face.f[*ff as usize] = EDGE_COLOR[edge][(j + cc.eo[i] as usize) % 2];
            }
        }

        face
    }
}

impl TryFrom<&str> for FaceCube {
    type Error = Error;
    fn try_from(cube_string: &str) -> Result<Self, Self::Error> {
        if cube_string.chars().count() != 54 {
            return Err(Error::BadFaceletCount);
        }

        let mut face_cube = FaceCube::default();
        for (i, c) in cube_string.chars().enumerate() {
            face_cube.f[i] = Color::try_from(c)?;
        }
        Ok(face_cube)
    }
}

impl fmt::Display for FaceCube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.f.iter().fold(String::new(), |acc, c| format!("{acc}{c}"));
        write!(f, "{s}")
    }
}

/// Names of the 54 facelet positions, grouped U-R-F-D-L-B, each face
/// row-major from the top-left sticker; the centre of each face is
/// prefixed with `_` since it never participates in cubie identification.
#[rustfmt::skip]
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub enum Facelet {
    U1, U2, U3, U4, _U5, U6, U7, U8, U9,
    R1, R2, R3, R4, _R5, R6, R7, R8, R9,
    F1, F2, F3, F4, _F5, F6, F7, F8, F9,
    D1, D2, D3, D4, _D5, D6, D7, D8, D9,
    L1, L2, L3, L4, _L5, L6, L7, L8, L9,
    B1, B2, B3, B4, _B5, B6, B7, B8, B9,
}

pub const CENTER_FACELET: [Facelet; 6] = [
    Facelet::_U5, Facelet::_R5, Facelet::_F5, Facelet::_D5, Facelet::_L5, Facelet::_B5,
];

pub const CENTER_COLOR: [Color; 6] = [
    Color::U, Color::R, Color::F, Color::D, Color::L, Color::B,
];

/// Maps each corner slot to its three facelet positions.
pub const CORNER_FACELET: [[Facelet; 3]; 8] = [
    [Facelet::U9, Facelet::R1, Facelet::F3], //URF
    [Facelet::U7, Facelet::F1, Facelet::L3], //UFL
    [Facelet::U1, Facelet::L1, Facelet::B3], //ULB
    [Facelet::U3, Facelet::B1, Facelet::R3], //UBR
    [Facelet::D3, Facelet::F9, Facelet::R7], //DFR
    [Facelet::D1, Facelet::L9, Facelet::F7], //DLF
    [Facelet::D7, Facelet::B9, Facelet::L7], //DBL
    [Facelet::D9, Facelet::R9, Facelet::B7], //DRB
];

/// Maps each edge slot to its two facelet positions.
pub const EDGE_FACELET: [[Facelet; 2]; 12] = [
    [Facelet::U6, Facelet::R2],
    [Facelet::U8, Facelet::F2],
    [Facelet::U4, Facelet::L2],
    [Facelet::U2, Facelet::B2],
    [Facelet::D6, Facelet::R8],
    [Facelet::D2, Facelet::F8],
    [Facelet::D4, Facelet::L8],
    [Facelet::D8, Facelet::B8],
    [Facelet::F6, Facelet::R4],
    [Facelet::F4, Facelet::L6],
    [Facelet::B6, Facelet::L4],
    [Facelet::B4, Facelet::R6],
];

/// Home colour triple of each corner cubie, in the order matching `CORNER_FACELET`.
pub const CORNER_COLOR: [[Color; 3]; 8] = [
    [Color::U, Color::R, Color::F],
    [Color::U, Color::F, Color::L],
    [Color::U, Color::L, Color::B],
    [Color::U, Color::B, Color::R],
    [Color::D, Color::F, Color::R],
    [Color::D, Color::L, Color::F],
    [Color::D, Color::B, Color::L],
    [Color::D, Color::R, Color::B],
];

/// Home colour pair of each edge cubie, in the order matching `EDGE_FACELET`.
pub const EDGE_COLOR: [[Color; 2]; 12] = [
    [Color::U, Color::R],
    [Color::U, Color::F],
    [Color::U, Color::L],
    [Color::U, Color::B],
    [Color::D, Color::R],
    [Color::D, Color::F],
    [Color::D, Color::L],
    [Color::D, Color::B],
    [Color::F, Color::R],
    [Color::F, Color::L],
    [Color::B, Color::L],
    [Color::B, Color::R],
];

#[cfg(test)]
mod test {
    use crate::cubie::SOLVED_CUBIE_CUBE;
    use crate::facelet::*;

    #[test]
    fn test_cubie_to_facelet_solved() {
        let face_cube = FaceCube::from(&SOLVED_CUBIE_CUBE);
        assert_eq!(face_cube, SOLVED_FACE_CUBE);
    }

    #[test]
    fn test_facelet_round_trip_on_solved() {
        let s = SOLVED_FACE_CUBE.to_string();
        let parsed = FaceCube::try_from(s.as_str()).unwrap();
        assert_eq!(parsed, SOLVED_FACE_CUBE);
    }

    #[test]
    fn test_bad_facelet_count() {
        let err = FaceCube::try_from("UUU").unwrap_err();
        assert!(matches!(err, Error::BadFaceletCount));
    }
}
