//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[column][row]`), matching WGSL's `mat4x4<f32>`
//! layout so they can be uploaded to uniform buffers unchanged. The builders
//! mirror the classic fixed-function calls: `translation`, `scaling` and the
//! `rotation_*` family take angles in degrees.

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Multiply a chain of matrices left to right: `chain(&[a, b, c]) == a * b * c`
pub fn chain(matrices: &[Mat4]) -> Mat4 {
    matrices.iter().fold(IDENTITY, |acc, m| mul(acc, *m))
}

/// Translation matrix
pub fn translation(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = x;
    m[3][1] = y;
    m[3][2] = z;
    m
}

/// Non-uniform scale matrix
pub fn scaling(x: f32, y: f32, z: f32) -> Mat4 {
    let mut m = IDENTITY;
    m[0][0] = x;
    m[1][1] = y;
    m[2][2] = z;
    m
}

/// Uniform scale matrix
pub fn uniform_scaling(s: f32) -> Mat4 {
    scaling(s, s, s)
}

/// Rotation about the X axis (degrees, counter-clockwise looking down -X)
pub fn rotation_x(degrees: f32) -> Mat4 {
    let (s, c) = degrees.to_radians().sin_cos();
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, s, 0.0],
        [0.0, -s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Y axis (degrees)
pub fn rotation_y(degrees: f32) -> Mat4 {
    let (s, c) = degrees.to_radians().sin_cos();
    [
        [c, 0.0, -s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Rotation about the Z axis (degrees)
pub fn rotation_z(degrees: f32) -> Mat4 {
    let (s, c) = degrees.to_radians().sin_cos();
    [
        [c, s, 0.0, 0.0],
        [-s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Right-handed perspective projection with wgpu's 0..1 depth range
///
/// `fov_y` is the vertical field of view in degrees.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y.to_radians() / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Transform a point (w = 1) by a 4x4 matrix
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    let x = m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0];
    let y = m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1];
    let z = m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2];
    let w = m[0][3] * p.x + m[1][3] * p.y + m[2][3] * p.z + m[3][3];
    if w != 0.0 && w != 1.0 {
        Vec3::new(x / w, y / w, z / w)
    } else {
        Vec3::new(x, y, z)
    }
}

/// Transform a direction (w = 0) by a 4x4 matrix
pub fn transform_direction(m: Mat4, d: Vec3) -> Vec3 {
    Vec3::new(
        m[0][0] * d.x + m[1][0] * d.y + m[2][0] * d.z,
        m[0][1] * d.x + m[1][1] * d.y + m[2][1] * d.z,
        m[0][2] * d.x + m[1][2] * d.y + m[2][2] * d.z,
    )
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

/// Normal matrix: inverse-transpose of the upper 3x3, embedded in a 4x4
///
/// Returns the identity when the upper 3x3 is singular.
pub fn normal_matrix(m: Mat4) -> Mat4 {
    // r(row, col)
    let r = |row: usize, col: usize| m[col][row];

    // Cofactors; inverse-transpose = cofactor / det
    let c = [
        [
            r(1, 1) * r(2, 2) - r(1, 2) * r(2, 1),
            -(r(1, 0) * r(2, 2) - r(1, 2) * r(2, 0)),
            r(1, 0) * r(2, 1) - r(1, 1) * r(2, 0),
        ],
        [
            -(r(0, 1) * r(2, 2) - r(0, 2) * r(2, 1)),
            r(0, 0) * r(2, 2) - r(0, 2) * r(2, 0),
            -(r(0, 0) * r(2, 1) - r(0, 1) * r(2, 0)),
        ],
        [
            r(0, 1) * r(1, 2) - r(0, 2) * r(1, 1),
            -(r(0, 0) * r(1, 2) - r(0, 2) * r(1, 0)),
            r(0, 0) * r(1, 1) - r(0, 1) * r(1, 0),
        ],
    ];

    let det = r(0, 0) * c[0][0] + r(0, 1) * c[0][1] + r(0, 2) * c[0][2];
    if det.abs() < 1e-12 {
        return IDENTITY;
    }
    let inv_det = 1.0 / det;

    let mut out = IDENTITY;
    for row in 0..3 {
        for col in 0..3 {
            out[col][row] = c[row][col] * inv_det;
        }
    }
    out
}
