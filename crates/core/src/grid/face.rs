//! The six faces of a structured hexahedral cell

use serde::{Deserialize, Serialize};

/// Cell face, named by the axis direction it faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceType {
    PosI,
    NegI,
    PosJ,
    NegJ,
    PosK,
    NegK,
}

impl FaceType {
    /// All faces in search order
    pub const ALL: [FaceType; 6] = [
        FaceType::PosI,
        FaceType::NegI,
        FaceType::PosJ,
        FaceType::NegJ,
        FaceType::PosK,
        FaceType::NegK,
    ];

    /// The face on the other side of the shared quad
    pub const fn opposite(self) -> FaceType {
        match self {
            FaceType::PosI => FaceType::NegI,
            FaceType::NegI => FaceType::PosI,
            FaceType::PosJ => FaceType::NegJ,
            FaceType::NegJ => FaceType::PosJ,
            FaceType::PosK => FaceType::NegK,
            FaceType::NegK => FaceType::PosK,
        }
    }

    /// Cell corner indices of this face, counter-clockwise seen from outside
    pub const fn corner_indices(self) -> [usize; 4] {
        match self {
            FaceType::PosI => [1, 2, 6, 5],
            FaceType::NegI => [0, 4, 7, 3],
            FaceType::PosJ => [3, 7, 6, 2],
            FaceType::NegJ => [0, 1, 5, 4],
            FaceType::PosK => [4, 5, 6, 7],
            FaceType::NegK => [0, 3, 2, 1],
        }
    }
}
