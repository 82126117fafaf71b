//! # 对称展开与去重
//!
//! 1. 每个对称操作作用于不对称单元的每个原子，得到 n_atoms × n_ops 个候选
//! 2. 去重：候选 i 若与其后任一同种原子距离小于容差，则丢弃 i
//! 3. 元素种类在展开中保持不变
//!
//! 距离采用最小像约定，跨越晶胞边界（如 0.999 与 0.001）的同一原子也会被合并。
//!
//! ## 依赖关系
//! - 被 `parsers/cif` 使用
//! - 使用 `symmetry/operator.rs`, `models/`

use super::operator::SymmetryOperator;
use crate::models::lattice::{norm, Lattice};
use crate::models::Atom;

/// 默认去重容差（分数坐标单位）
pub const DEFAULT_DEDUP_TOLERANCE: f64 = 0.01;

/// 去重距离度量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupMetric {
    /// 分数坐标空间的欧氏距离，容差为分数坐标单位
    #[default]
    Fractional,
    /// 笛卡尔空间距离，容差与晶格长度单位一致
    Cartesian,
}

/// 展开选项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionOptions {
    pub tolerance: f64,
    pub metric: DedupMetric,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        ExpansionOptions {
            tolerance: DEFAULT_DEDUP_TOLERANCE,
            metric: DedupMetric::Fractional,
        }
    }
}

/// 对不对称单元施加全部对称操作（操作在外层，原子在内层）
pub fn expand(asymmetric_unit: &[Atom], operators: &[SymmetryOperator]) -> Vec<Atom> {
    let mut out = Vec::with_capacity(asymmetric_unit.len() * operators.len());
    for op in operators {
        for atom in asymmetric_unit {
            out.push(Atom::new(op.apply(&atom.position), atom.atomic_number));
        }
    }
    out
}

/// 最小像分数坐标差
fn minimum_image(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    let mut d = [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    for x in d.iter_mut() {
        *x -= x.round();
    }
    d
}

/// 去除重复原子，保留每组重复中最后出现的一个
pub fn deduplicate(atoms: &[Atom], lattice: &Lattice, options: &ExpansionOptions) -> Vec<Atom> {
    let separation = |a: &Atom, b: &Atom| {
        let d = minimum_image(&a.position, &b.position);
        match options.metric {
            DedupMetric::Fractional => norm(&d),
            DedupMetric::Cartesian => norm(&lattice.to_cartesian(&d)),
        }
    };

    atoms
        .iter()
        .enumerate()
        .filter(|&(i, atom)| {
            !atoms[i + 1..].iter().any(|other| {
                other.atomic_number == atom.atomic_number
                    && separation(atom, other) < options.tolerance
            })
        })
        .map(|(_, atom)| *atom)
        .collect()
}

/// 展开并去重，结果按原子序数稳定排序
pub fn expand_and_deduplicate(
    asymmetric_unit: &[Atom],
    operators: &[SymmetryOperator],
    lattice: &Lattice,
    options: &ExpansionOptions,
) -> Vec<Atom> {
    let candidates = expand(asymmetric_unit, operators);
    let mut atoms = deduplicate(&candidates, lattice, options);
    atoms.sort_by_key(|a| a.atomic_number);

    log::debug!(
        "Symmetry expansion: {} atoms x {} operators -> {} candidates -> {} unique",
        asymmetric_unit.len(),
        operators.len(),
        candidates.len(),
        atoms.len()
    );

    atoms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic() -> Lattice {
        Lattice::from_parameters(5.0, 5.0, 5.0, 90.0, 90.0, 90.0).unwrap()
    }

    fn ops(list: &[&str]) -> Vec<SymmetryOperator> {
        list.iter()
            .map(|s| SymmetryOperator::parse(s).unwrap())
            .collect()
    }

    #[test]
    fn test_identity_reproduces_input() {
        let input = vec![
            Atom::new([0.1, 0.2, 0.3], 11),
            Atom::new([1.5, -0.25, 0.0], 17),
        ];
        let out = expand(&input, &[SymmetryOperator::identity()]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0], input[0]);
        assert_eq!(out[1].atomic_number, 17);
        assert!((out[1].position[0] - 0.5).abs() < 1e-12);
        assert!((out[1].position[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_expand_order_and_count() {
        let input = vec![Atom::new([0.1, 0.1, 0.1], 6), Atom::new([0.2, 0.2, 0.2], 8)];
        let out = expand(&input, &ops(&["x,y,z", "-x,-y,-z", "x+1/2,y,z"]));
        assert_eq!(out.len(), 6);
        // 操作在外层
        assert_eq!(out[1].atomic_number, 8);
        assert!((out[2].position[0] - 0.9).abs() < 1e-12);
        assert!((out[5].position[0] - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_special_position_merges() {
        // 原点在反演下不变
        let input = vec![Atom::new([0.0, 0.0, 0.0], 26)];
        let out = expand_and_deduplicate(
            &input,
            &ops(&["x,y,z", "-x,-y,-z"]),
            &cubic(),
            &ExpansionOptions::default(),
        );
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_merge_across_cell_boundary() {
        let atoms = vec![Atom::new([0.999, 0.5, 0.5], 8), Atom::new([0.001, 0.5, 0.5], 8)];
        let out = deduplicate(&atoms, &cubic(), &ExpansionOptions::default());
        assert_eq!(out.len(), 1);
        assert!((out[0].position[0] - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_different_species_never_merge() {
        let atoms = vec![Atom::new([0.5, 0.5, 0.5], 11), Atom::new([0.5, 0.5, 0.5], 17)];
        let out = deduplicate(&atoms, &cubic(), &ExpansionOptions::default());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_deduplicate_idempotent() {
        let input = vec![
            Atom::new([0.0, 0.0, 0.0], 11),
            Atom::new([0.25, 0.25, 0.25], 17),
            Atom::new([0.1, 0.3, 0.7], 8),
        ];
        let candidates = expand(
            &input,
            &ops(&["x,y,z", "-x,-y,-z", "x+1/2,y+1/2,z", "-x+1/2,-y+1/2,-z", "y,x,z"]),
        );
        let options = ExpansionOptions::default();
        let once = deduplicate(&candidates, &cubic(), &options);
        let twice = deduplicate(&once, &cubic(), &options);

        assert!(once.len() < candidates.len());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cartesian_metric() {
        // 长轴方向上相差 0.005 分数坐标 = 0.5 长度单位
        let lattice = Lattice::from_parameters(1.0, 1.0, 100.0, 90.0, 90.0, 90.0).unwrap();
        let atoms = vec![Atom::new([0.5, 0.5, 0.100], 6), Atom::new([0.5, 0.5, 0.105], 6)];

        let fractional = deduplicate(&atoms, &lattice, &ExpansionOptions::default());
        assert_eq!(fractional.len(), 1);

        let cartesian = deduplicate(
            &atoms,
            &lattice,
            &ExpansionOptions {
                tolerance: 0.1,
                metric: DedupMetric::Cartesian,
            },
        );
        assert_eq!(cartesian.len(), 2);
    }

    #[test]
    fn test_sorted_by_species() {
        let input = vec![Atom::new([0.1, 0.2, 0.3], 17), Atom::new([0.4, 0.1, 0.2], 11)];
        let out = expand_and_deduplicate(
            &input,
            &ops(&["x,y,z", "-x,-y,-z"]),
            &cubic(),
            &ExpansionOptions::default(),
        );
        assert_eq!(out.len(), 4);
        assert_eq!(
            out.iter().map(|a| a.atomic_number).collect::<Vec<_>>(),
            vec![11, 11, 17, 17]
        );
    }
}
