//! # 共价半径表
//!
//! 按原子序数索引的经验共价半径，用作成键判据的距离阈值。
//! 内置数据单位为 Å，加载时统一除以玻尔半径转换为原子单位。
//!
//! 全局表在进程启动时初始化一次（默认内置表，或通过 `--radii` 指定的文件），
//! 之后只读。
//!
//! ## 数据来源
//! B. Cordero et al., "Covalent radii revisited", Dalton Trans. (2008) 2832.
//! Z > 96 无文献值，统一取 1.50 Å。
//!
//! ## 依赖关系
//! - 被 `bonds.rs` 调用
//! - 使用 `models/lattice.rs` 中的单位常数

use crate::error::{Result, SolidStateError};
use crate::models::lattice::BOHR_IN_ANGSTROM;

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// 内置共价半径 (Å)，下标即原子序数
const DEFAULT_RADII_ANGSTROM: [f64; 119] = [
    0.00, // 占位
    0.31, 0.28, // H-He
    1.28, 0.96, 0.84, 0.76, 0.71, 0.66, 0.57, 0.58, // Li-Ne
    1.66, 1.41, 1.21, 1.11, 1.07, 1.05, 1.02, 1.06, // Na-Ar
    2.03, 1.76, 1.70, 1.60, 1.53, 1.39, 1.39, 1.32, 1.26, 1.24, 1.32, 1.22, // K-Zn
    1.22, 1.20, 1.19, 1.20, 1.20, 1.16, // Ga-Kr
    2.20, 1.95, 1.90, 1.75, 1.64, 1.54, 1.47, 1.46, 1.42, 1.39, 1.45, 1.44, // Rb-Cd
    1.42, 1.39, 1.39, 1.38, 1.39, 1.40, // In-Xe
    2.44, 2.15, // Cs-Ba
    2.07, 2.04, 2.03, 2.01, 1.99, 1.98, 1.98, 1.96, 1.94, 1.92, 1.92, 1.89, 1.90, 1.87, 1.87, // La-Lu
    1.75, 1.70, 1.62, 1.51, 1.44, 1.41, 1.36, 1.36, 1.32, // Hf-Hg
    1.45, 1.46, 1.48, 1.40, 1.50, 1.50, // Tl-Rn
    2.60, 2.21, // Fr-Ra
    2.15, 2.06, 2.00, 1.96, 1.90, 1.87, 1.80, 1.69, // Ac-Cm
    1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, // Bk-Lr
    1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, 1.50, // Rf-Og
];

/// 进程级共价半径表
static TABLE: OnceLock<CovalentRadii> = OnceLock::new();

/// 共价半径表（原子单位）
#[derive(Debug, Clone)]
pub struct CovalentRadii {
    radii: Vec<f64>,
}

impl CovalentRadii {
    /// 内置表
    pub fn builtin() -> Self {
        Self::from_angstrom(&DEFAULT_RADII_ANGSTROM)
    }

    /// 由 Å 单位的数值构造
    pub fn from_angstrom(values: &[f64]) -> Self {
        CovalentRadii {
            radii: values.iter().map(|r| r / BOHR_IN_ANGSTROM).collect(),
        }
    }

    /// 解析半径表文本：每行一个数值 (Å)，行号即原子序数，`#` 开头为注释
    pub fn parse_table(content: &str, source: &str) -> Result<Self> {
        let mut values = Vec::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let token = line.split_whitespace().next().unwrap_or(line);
            let value: f64 = token.parse().map_err(|_| SolidStateError::InvalidValue {
                tag: format!("{}:{}", source, line_no + 1),
                value: token.to_string(),
            })?;
            values.push(value);
        }

        if values.is_empty() {
            return Err(SolidStateError::InvalidArgument(format!(
                "Covalent radius table '{}' is empty",
                source
            )));
        }

        Ok(Self::from_angstrom(&values))
    }

    /// 从文件加载半径表
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| SolidStateError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse_table(&content, &path.display().to_string())
    }

    /// 查询某原子序数的共价半径（原子单位）
    pub fn get(&self, z: u8) -> Option<f64> {
        self.radii.get(z as usize).copied()
    }

    /// 表中没有条目的原子序数（升序去重）
    pub fn missing_species(&self, atomic_numbers: impl IntoIterator<Item = u8>) -> Vec<u8> {
        let mut missing: Vec<u8> = atomic_numbers
            .into_iter()
            .filter(|&z| self.get(z).is_none())
            .collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }

    /// 表中条目数
    pub fn len(&self) -> usize {
        self.radii.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radii.is_empty()
    }
}

/// 安装进程级半径表，只能在首次使用前调用一次
pub fn install(table: CovalentRadii) -> Result<()> {
    TABLE.set(table).map_err(|_| {
        SolidStateError::InvalidArgument(
            "Covalent radius table is already initialized".to_string(),
        )
    })
}

/// 从文件加载并安装进程级半径表
pub fn init_from_file(path: &Path) -> Result<()> {
    let table = CovalentRadii::from_file(path)?;
    log::debug!(
        "Loaded {} covalent radii from {}",
        table.len(),
        path.display()
    );
    install(table)
}

/// 进程级半径表，未安装时使用内置表
pub fn table() -> &'static CovalentRadii {
    TABLE.get_or_init(CovalentRadii::builtin)
}

/// 查询共价半径（原子单位），表中缺失的元素返回 0
pub fn covalent_radius(z: u8) -> f64 {
    table().get(z).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_periodic_table() {
        let radii = CovalentRadii::builtin();
        assert_eq!(radii.len(), 119);
        assert_eq!(radii.get(0), Some(0.0));
        assert!(radii.get(119).is_none());
    }

    #[test]
    fn test_builtin_converted_to_bohr() {
        let carbon = covalent_radius(6);
        assert!((carbon * BOHR_IN_ANGSTROM - 0.76).abs() < 1e-12);
        let hydrogen = covalent_radius(1);
        assert!((hydrogen - 0.31 / BOHR_IN_ANGSTROM).abs() < 1e-12);
    }

    #[test]
    fn test_parse_table() {
        let content = "# radii in angstrom\n0.0\n0.31\n\n0.28 # helium\n";
        let radii = CovalentRadii::parse_table(content, "inline").unwrap();
        assert_eq!(radii.len(), 3);
        assert!((radii.get(2).unwrap() - 0.28 / BOHR_IN_ANGSTROM).abs() < 1e-12);
    }

    #[test]
    fn test_parse_table_rejects_garbage() {
        let err = CovalentRadii::parse_table("0.0\nabc\n", "bad.dat").unwrap_err();
        match err {
            SolidStateError::InvalidValue { tag, value } => {
                assert_eq!(tag, "bad.dat:2");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(CovalentRadii::parse_table("# nothing\n", "empty.dat").is_err());
    }
}
