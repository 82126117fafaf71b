//! # 晶格几何
//!
//! 由六个晶胞参数构造实空间晶格向量，计算倒格矢，并在分数坐标与绝对坐标之间转换。
//!
//! ## 约定
//! - 晶格向量按行存储：`matrix[0] = a1`, `matrix[1] = a2`, `matrix[2] = a3`
//! - a1 沿 x 轴，a2 位于 xy 平面且与 a1 夹角为 γ，a3 由标准三斜分解得到
//! - 绝对坐标 r = Lᵀ · f，其中 L 的行为晶格向量
//! - 分数坐标通过 LU 分解求解 Lᵀ · f = r，不使用手写逆矩阵
//!
//! ## 依赖关系
//! - 被 `models/structure.rs`, `parsers/cif` 使用
//! - 使用 `nalgebra` 做线性代数

use crate::error::{Result, SolidStateError};

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// 玻尔半径 (Å)
pub const BOHR_IN_ANGSTROM: f64 = 0.52917721067;

/// 由晶胞参数计算三条晶格向量
///
/// 长度单位任意但需一致；角度单位为度，须在 (0°, 180°) 内，
/// 并构成几何上可实现的晶胞，否则返回 [`SolidStateError::Geometry`]。
pub fn calculate_lattice_vectors(
    a: f64,
    b: f64,
    c: f64,
    alpha: f64,
    beta: f64,
    gamma: f64,
) -> Result<[[f64; 3]; 3]> {
    for (name, len) in [("a", a), ("b", b), ("c", c)] {
        if !(len.is_finite() && len > 0.0) {
            return Err(SolidStateError::Geometry(format!(
                "cell length {} = {} must be positive",
                name, len
            )));
        }
    }
    for (name, angle) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
        if !(angle.is_finite() && angle > 0.0 && angle < 180.0) {
            return Err(SolidStateError::Geometry(format!(
                "cell angle {} = {} must lie in (0, 180) degrees",
                name, angle
            )));
        }
    }

    let cos_alpha = alpha.to_radians().cos();
    let cos_beta = beta.to_radians().cos();
    let cos_gamma = gamma.to_radians().cos();
    let sin_gamma = gamma.to_radians().sin();

    let a_vec = [a, 0.0, 0.0];
    let b_vec = [b * cos_gamma, b * sin_gamma, 0.0];

    let y = (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
    let z_sq = 1.0 - cos_beta * cos_beta - y * y;
    if z_sq < 0.0 {
        return Err(SolidStateError::Geometry(format!(
            "angles alpha={} beta={} gamma={} do not form a valid cell",
            alpha, beta, gamma
        )));
    }
    let c_vec = [c * cos_beta, c * y, c * z_sq.sqrt()];

    Ok([a_vec, b_vec, c_vec])
}

/// 晶格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a1, a2, a3
    pub matrix: [[f64; 3]; 3],
}

impl Lattice {
    /// 从晶格参数 (a, b, c, alpha, beta, gamma) 创建晶格
    /// 角度单位：度
    pub fn from_parameters(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self> {
        let matrix = calculate_lattice_vectors(a, b, c, alpha, beta, gamma)?;
        Self::from_vectors(matrix)
    }

    /// 从晶格向量矩阵创建，拒绝体积为零的退化晶胞
    pub fn from_vectors(matrix: [[f64; 3]; 3]) -> Result<Self> {
        let lattice = Lattice { matrix };
        let volume = lattice.volume();
        let scale: f64 = matrix.iter().map(|v| norm(v)).product();

        if !volume.is_finite() || volume.abs() <= 1e-12 * scale {
            return Err(SolidStateError::Geometry(format!(
                "lattice vectors are degenerate (volume = {:e})",
                volume
            )));
        }
        Ok(lattice)
    }

    /// 获取晶格参数 (a, b, c, alpha, beta, gamma)
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let [a_vec, b_vec, c_vec] = self.matrix;

        let a = norm(&a_vec);
        let b = norm(&b_vec);
        let c = norm(&c_vec);

        let alpha = (dot(&b_vec, &c_vec) / (b * c)).acos().to_degrees();
        let beta = (dot(&a_vec, &c_vec) / (a * c)).acos().to_degrees();
        let gamma = (dot(&a_vec, &b_vec) / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// 晶胞体积（混合积，带符号）
    pub fn volume(&self) -> f64 {
        let [a, b, c] = self.matrix;
        dot(&cross(&a, &b), &c)
    }

    /// 倒格矢，行向量表示 b1, b2, b3
    ///
    /// b1 = 2π (a2 × a3) / V，其余轮换。
    pub fn reciprocal_vectors(&self) -> [[f64; 3]; 3] {
        let [a, b, c] = self.matrix;
        let factor = 2.0 * PI / self.volume();

        [
            scale(&cross(&b, &c), factor),
            scale(&cross(&c, &a), factor),
            scale(&cross(&a, &b), factor),
        ]
    }

    /// 第一晶格向量长度
    pub fn a_length(&self) -> f64 {
        norm(&self.matrix[0])
    }

    /// 分数坐标 -> 绝对坐标
    pub fn to_cartesian(&self, frac: &[f64; 3]) -> [f64; 3] {
        let m = &self.matrix;
        [
            frac[0] * m[0][0] + frac[1] * m[1][0] + frac[2] * m[2][0],
            frac[0] * m[0][1] + frac[1] * m[1][1] + frac[2] * m[2][1],
            frac[0] * m[0][2] + frac[1] * m[1][2] + frac[2] * m[2][2],
        ]
    }

    /// 绝对坐标 -> 分数坐标
    pub fn to_fractional(&self, cart: &[f64; 3]) -> Result<[f64; 3]> {
        Ok(self.to_fractional_many(std::slice::from_ref(cart))?[0])
    }

    /// 批量绝对坐标 -> 分数坐标，只做一次 LU 分解
    pub fn to_fractional_many(&self, carts: &[[f64; 3]]) -> Result<Vec<[f64; 3]>> {
        let lu = self.transposed().lu();

        carts
            .iter()
            .map(|cart| {
                lu.solve(&Vector3::from(*cart))
                    .map(|f| [f.x, f.y, f.z])
                    .ok_or_else(|| {
                        SolidStateError::Geometry("lattice matrix is singular".to_string())
                    })
            })
            .collect()
    }

    /// 周期像的平移：i·a1 + j·a2 + k·a3
    pub fn image_offset(&self, image: [usize; 3]) -> [f64; 3] {
        self.to_cartesian(&[image[0] as f64, image[1] as f64, image[2] as f64])
    }

    /// Lᵀ：列为晶格向量
    fn transposed(&self) -> Matrix3<f64> {
        Matrix3::from_columns(&[
            Vector3::from(self.matrix[0]),
            Vector3::from(self.matrix[1]),
            Vector3::from(self.matrix[2]),
        ])
    }
}

pub(crate) fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn norm(a: &[f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

pub(crate) fn distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    let d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    norm(&d)
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn scale(a: &[f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}
