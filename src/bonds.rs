//! # 成键判定
//!
//! 对绝对坐标原子列表做 O(n²) 两两比较：
//! 距离 < 1.3 × (r_i + r_j) 即视为成键，r 为共价半径。
//!
//! 判据中的系数与半径表都是固定数据，不随调用变化。
//!
//! ## 依赖关系
//! - 被 `models/structure.rs` 和 `commands/` 使用
//! - 使用 `data/covalent_radii.rs`

use crate::data::covalent_radii::{self, CovalentRadii};
use crate::models::lattice::distance;
use crate::models::Atom;

/// 共价半径之和的放大系数
pub const BOND_TOLERANCE_FACTOR: f64 = 1.3;

/// 使用进程级半径表查找成键原子对 (i, j)，i < j
pub fn find_bonds(abs_atoms: &[Atom]) -> Vec<(usize, usize)> {
    find_bonds_with(abs_atoms, covalent_radii::table())
}

/// 使用给定半径表查找成键原子对
///
/// 表中缺失的元素半径按 0 处理（永不成键），并记录一条警告。
pub fn find_bonds_with(abs_atoms: &[Atom], radii: &CovalentRadii) -> Vec<(usize, usize)> {
    let missing = radii.missing_species(abs_atoms.iter().map(|a| a.atomic_number));
    if !missing.is_empty() {
        log::warn!(
            "Covalent radius table has {} entries; no radius for Z = {:?}, these atoms will not bond",
            radii.len(),
            missing
        );
    }

    let cutoffs: Vec<f64> = abs_atoms
        .iter()
        .map(|a| radii.get(a.atomic_number).unwrap_or(0.0))
        .collect();

    let mut bonds = Vec::new();
    for i in 0..abs_atoms.len() {
        for j in (i + 1)..abs_atoms.len() {
            let threshold = (cutoffs[i] + cutoffs[j]) * BOND_TOLERANCE_FACTOR;
            if distance(&abs_atoms[i].position, &abs_atoms[j].position) < threshold {
                bonds.push((i, j));
            }
        }
    }

    bonds
}

/// 成键原子对的键长
pub fn bond_length(abs_atoms: &[Atom], bond: (usize, usize)) -> f64 {
    distance(&abs_atoms[bond.0].position, &abs_atoms[bond.1].position)
}
