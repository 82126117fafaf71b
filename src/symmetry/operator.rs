//! # 对称操作
//!
//! 一个对称操作由三个分量表达式组成，如 `-x, y+1/2, -z`。
//! 解析后保存为 Seitz 形式 {R | t}，作用于分数坐标后取模折回 [0,1)。
//!
//! ## 依赖关系
//! - 被 `symmetry/expand.rs` 和 `parsers/cif` 使用
//! - 使用 `symmetry/expr.rs`

use super::expr::parse_affine;
use crate::error::{Result, SolidStateError};
use crate::models::structure::wrap_fractional;

use std::fmt;
use std::str::FromStr;

/// 对称操作
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryOperator {
    source: String,
    rotation: [[f64; 3]; 3],
    translation: [f64; 3],
}

impl SymmetryOperator {
    /// 解析操作字符串，去除引号，按逗号分为三个分量
    pub fn parse(operator: &str) -> Result<Self> {
        let cleaned: String = operator
            .chars()
            .filter(|&c| c != '\'' && c != '"')
            .collect();
        let cleaned = cleaned.trim();

        let fail = |reason: String| SolidStateError::SymmetryParse {
            operator: operator.to_string(),
            reason,
        };

        let parts: Vec<&str> = cleaned.split(',').collect();
        if parts.len() != 3 {
            return Err(fail(format!(
                "expected 3 comma-separated components, found {}",
                parts.len()
            )));
        }

        let mut rotation = [[0.0; 3]; 3];
        let mut translation = [0.0; 3];
        for (axis, part) in parts.iter().enumerate() {
            let affine = parse_affine(part).map_err(|reason| fail(reason))?;
            rotation[axis] = affine.coeffs;
            translation[axis] = affine.constant;
        }

        Ok(SymmetryOperator {
            source: cleaned.to_string(),
            rotation,
            translation,
        })
    }

    /// 恒等操作 x, y, z
    pub fn identity() -> Self {
        SymmetryOperator {
            source: "x,y,z".to_string(),
            rotation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: [0.0; 3],
        }
    }

    /// 原始操作字符串（已去除引号）
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rotation(&self) -> &[[f64; 3]; 3] {
        &self.rotation
    }

    pub fn translation(&self) -> &[f64; 3] {
        &self.translation
    }

    /// 作用于分数坐标，结果折回 [0,1)
    pub fn apply(&self, position: &[f64; 3]) -> [f64; 3] {
        let mut out = self.translation;
        for (i, row) in self.rotation.iter().enumerate() {
            out[i] += row[0] * position[0] + row[1] * position[1] + row[2] * position[2];
        }
        wrap_fractional(out)
    }
}

impl FromStr for SymmetryOperator {
    type Err = SolidStateError;

    fn from_str(s: &str) -> Result<Self> {
        SymmetryOperator::parse(s)
    }
}

impl fmt::Display for SymmetryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
