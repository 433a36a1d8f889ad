//! Smooth per-corner shading for liquid-adjacent faces.
//!
//! Each face samples the 3x3 layer one step along its normal. A corner is
//! open only when both edge-adjacent samples and their shared diagonal are
//! liquid; otherwise it shades. The face then splits into two triangles
//! along whichever diagonal balances the occlusion, so shading artifacts do
//! not streak in one direction.
//!
//! All six directions run the same procedure; only the sampling axes, the
//! flip comparison, and the corner-to-triangle layouts differ, so the face
//! table below carries those and one routine serves every face.

use swampgen_core::GenerationConfig;

use crate::volume::{FaceShading, VoxelVolume, FACE_COUNT, LIGHT, SHADOW};

/// Corner positions in tangent (u, v) space.
///
/// `A = (-1,-1)`, `B = (-1,+1)`, `C = (+1,+1)`, `D = (+1,-1)`.
const CORNER_OFFSETS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, 1), (1, -1)];

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;
const D: usize = 3;

/// Which diagonal-split rules a face uses.
#[derive(Debug, Clone, Copy)]
enum SplitFamily {
    /// Up/down faces.
    Y,
    /// East/west faces.
    X,
    /// South/north faces.
    Z,
}

impl SplitFamily {
    /// Whether the alternative diagonal split applies for the given
    /// diagonal occupancy bits.
    fn flips(self, diagonals: [u8; 4]) -> bool {
        let [e, f, g, h] = diagonals;
        match self {
            SplitFamily::Y | SplitFamily::X => e + g > f + h,
            SplitFamily::Z => e + g < f + h,
        }
    }

    /// Corner indices for the two triangles of this face.
    fn layout(self, flipped: bool) -> [[usize; 3]; 2] {
        match (self, flipped) {
            (SplitFamily::Y, true) => [[B, C, A], [C, D, A]],
            (SplitFamily::Y, false) => [[A, B, D], [B, C, D]],
            (SplitFamily::X, true) => [[B, A, C], [A, D, C]],
            (SplitFamily::X, false) => [[C, B, D], [B, A, D]],
            (SplitFamily::Z, true) => [[A, B, D], [B, C, D]],
            (SplitFamily::Z, false) => [[D, A, C], [A, B, C]],
        }
    }
}

/// Sampling geometry for one face direction.
struct FaceParams {
    normal: [i32; 3],
    u_axis: [i32; 3],
    v_axis: [i32; 3],
    family: SplitFamily,
}

/// Face order matches the lighting volume: `+y, +x, +z, -x, -z, -y`.
const FACES: [FaceParams; FACE_COUNT] = [
    FaceParams {
        normal: [0, 1, 0],
        u_axis: [1, 0, 0],
        v_axis: [0, 0, 1],
        family: SplitFamily::Y,
    },
    FaceParams {
        normal: [1, 0, 0],
        u_axis: [0, 1, 0],
        v_axis: [0, 0, 1],
        family: SplitFamily::X,
    },
    FaceParams {
        normal: [0, 0, 1],
        u_axis: [0, 1, 0],
        v_axis: [1, 0, 0],
        family: SplitFamily::Z,
    },
    FaceParams {
        normal: [-1, 0, 0],
        u_axis: [0, 1, 0],
        v_axis: [0, 0, 1],
        family: SplitFamily::X,
    },
    FaceParams {
        normal: [0, 0, -1],
        u_axis: [0, 1, 0],
        v_axis: [1, 0, 0],
        family: SplitFamily::Z,
    },
    FaceParams {
        normal: [0, -1, 0],
        u_axis: [1, 0, 0],
        v_axis: [0, 0, 1],
        family: SplitFamily::Y,
    },
];

/// Smooth shading for the six faces of the voxel at volume-local
/// `(x, y, z)`. Faces whose adjacent voxel is not liquid yield `None`.
///
/// The position must be in the chunk interior so the 3x3 neighborhood stays
/// inside the padded volume.
pub fn face_shading(
    voxels: &VoxelVolume,
    x: usize,
    z: usize,
    y: usize,
    config: &GenerationConfig,
) -> [Option<FaceShading>; FACE_COUNT] {
    let mut output = [None; FACE_COUNT];
    let center = [x as i32, y as i32, z as i32];

    for (index, face) in FACES.iter().enumerate() {
        let liquid_at = |du: i32, dv: i32| -> bool {
            let px = center[0] + face.normal[0] + du * face.u_axis[0] + dv * face.v_axis[0];
            let py = center[1] + face.normal[1] + du * face.u_axis[1] + dv * face.v_axis[1];
            let pz = center[2] + face.normal[2] + du * face.u_axis[2] + dv * face.v_axis[2];
            config.is_liquid(voxels.get_i(px, pz, py))
        };

        if !liquid_at(0, 0) {
            continue;
        }

        let mut corners = [0u8; 4];
        let mut diagonals = [0u8; 4];
        for (i, (du, dv)) in CORNER_OFFSETS.iter().enumerate() {
            let diagonal = liquid_at(*du, *dv);
            corners[i] = u8::from(liquid_at(*du, 0) && liquid_at(0, *dv) && diagonal);
            diagonals[i] = u8::from(diagonal);
        }

        let flipped = face.family.flips(diagonals);
        let layout = face.family.layout(flipped);
        let shade = |corner: usize| if corners[corner] == 0 { SHADOW } else { LIGHT };
        let triangles = [
            layout[0].map(shade),
            layout[1].map(shade),
        ];

        output[index] = Some(FaceShading { triangles, flipped });
    }

    output
}
