//! # 结构数据模型
//!
//! 分子结构与晶体结构的值对象。构造时完成一次性规范化，之后只读：
//! - 晶体：分数坐标取模折回 [0,1)，绝对坐标输入先经逆晶格变换
//! - 分子：绝对坐标在构造时乘以 `scale`
//!
//! ## 依赖关系
//! - 被 `parsers/`, `symmetry/`, `bonds.rs`, `commands/` 使用
//! - 使用 `models/lattice.rs`

use crate::bonds;
use crate::data::element_symbol;
use crate::error::Result;
use crate::models::lattice::Lattice;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// 原子：坐标 + 原子序数
///
/// 绑定到晶体时坐标为分数坐标，绑定到分子时为绝对坐标。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub position: [f64; 3],
    pub atomic_number: u8,
}

impl Atom {
    pub fn new(position: [f64; 3], atomic_number: u8) -> Self {
        Atom {
            position,
            atomic_number,
        }
    }

    /// 元素符号，未识别元素返回 None
    pub fn symbol(&self) -> Option<&'static str> {
        element_symbol(self.atomic_number)
    }
}

/// 输入坐标类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateKind {
    /// 相对晶格向量的分数坐标
    Fractional,
    /// 绝对坐标（长度单位与晶格一致）
    Absolute,
}

/// 将分数坐标折回 [0,1)
pub fn wrap_fractional(position: [f64; 3]) -> [f64; 3] {
    position.map(wrap_unit)
}

/// 单个分量取模 1，保证结果严格小于 1
pub fn wrap_unit(value: f64) -> f64 {
    let wrapped = value.rem_euclid(1.0);
    if wrapped >= 1.0 {
        0.0
    } else {
        // 消除 -0.0
        wrapped + 0.0
    }
}

/// 化学式（按元素符号字母序）
fn formula_of(atoms: &[Atom]) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();

    for atom in atoms {
        *counts.entry(atom.symbol().unwrap_or("X")).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(el, count)| {
            if count == 1 {
                el.to_string()
            } else {
                format!("{}{}", el, count)
            }
        })
        .collect::<Vec<_>>()
        .join("")
}

// ─────────────────────────────────────────────────────────────
// 分子结构
// ─────────────────────────────────────────────────────────────

/// 分子结构（无周期性）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MolecularStructure {
    atoms: Vec<Atom>,
    /// 构造时使用的缩放因子，仅作记录
    pub scale: f64,
}

impl MolecularStructure {
    pub fn new(atoms: Vec<Atom>, scale: f64) -> Self {
        let atoms = atoms
            .into_iter()
            .map(|atom| Atom::new(atom.position.map(|x| x * scale), atom.atomic_number))
            .collect();
        MolecularStructure { atoms, scale }
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn formula(&self) -> String {
        formula_of(&self.atoms)
    }

    /// 绝对坐标（分子本身即为绝对坐标）
    pub fn calc_absolute_coordinates(&self) -> Vec<Atom> {
        self.atoms.clone()
    }

    /// 成键原子对
    pub fn find_bonds(&self, abs_atoms: &[Atom]) -> Vec<(usize, usize)> {
        bonds::find_bonds(abs_atoms)
    }
}

// ─────────────────────────────────────────────────────────────
// 晶体结构
// ─────────────────────────────────────────────────────────────

/// 晶体结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrystalStructure {
    lattice: Lattice,
    /// 分数坐标，每个分量位于 [0,1)
    atoms: Vec<Atom>,
    /// 来源信息（如晶格常数 a），不参与任何计算
    pub scale: f64,
}

impl CrystalStructure {
    /// 构造晶体结构
    ///
    /// `Absolute` 输入经 LU 求解转换为分数坐标；两种输入最终都取模折回 [0,1)。
    pub fn new(
        lattice: Lattice,
        atoms: Vec<Atom>,
        kind: CoordinateKind,
        scale: f64,
    ) -> Result<Self> {
        let lattice = Lattice::from_vectors(lattice.matrix)?;

        let atoms = match kind {
            CoordinateKind::Fractional => atoms
                .into_iter()
                .map(|a| Atom::new(wrap_fractional(a.position), a.atomic_number))
                .collect(),
            CoordinateKind::Absolute => {
                let carts: Vec<[f64; 3]> = atoms.iter().map(|a| a.position).collect();
                let fracs = lattice.to_fractional_many(&carts)?;
                atoms
                    .iter()
                    .zip(fracs)
                    .map(|(a, f)| Atom::new(wrap_fractional(f), a.atomic_number))
                    .collect()
            }
        };

        Ok(CrystalStructure {
            lattice,
            atoms,
            scale,
        })
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// 分数坐标原子列表
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn lattice_vectors(&self) -> [[f64; 3]; 3] {
        self.lattice.matrix
    }

    pub fn reciprocal_vectors(&self) -> [[f64; 3]; 3] {
        self.lattice.reciprocal_vectors()
    }

    pub fn formula(&self) -> String {
        formula_of(&self.atoms)
    }

    /// 展开为绝对坐标
    ///
    /// `repeat = [nx, ny, nz]` 个周期像；输出顺序为原子优先，
    /// 其次像指标 (i, j, k) 按行优先。每个像平移 i·a1 + j·a2 + k·a3。
    pub fn calc_absolute_coordinates(&self, repeat: [usize; 3]) -> Vec<Atom> {
        let n_images = repeat[0] * repeat[1] * repeat[2];
        let mut out = Vec::with_capacity(self.atoms.len() * n_images);

        for atom in &self.atoms {
            let base = self.lattice.to_cartesian(&atom.position);
            for i in 0..repeat[0] {
                for j in 0..repeat[1] {
                    for k in 0..repeat[2] {
                        let offset = self.lattice.image_offset([i, j, k]);
                        out.push(Atom::new(
                            [
                                base[0] + offset[0],
                                base[1] + offset[1],
                                base[2] + offset[2],
                            ],
                            atom.atomic_number,
                        ));
                    }
                }
            }
        }

        out
    }

    /// 成键原子对
    pub fn find_bonds(&self, abs_atoms: &[Atom]) -> Vec<(usize, usize)> {
        bonds::find_bonds(abs_atoms)
    }

    /// 将倒格子分数坐标 (k1, k2, k3) 转换为笛卡尔坐标，以 tpiba（2π/|a1|）为单位
    pub fn convert_to_tpiba(&self, points: &[[f64; 3]]) -> Vec<[f64; 3]> {
        let recip = self.lattice.reciprocal_vectors();
        let unit = 2.0 * PI / self.lattice.a_length();

        points
            .iter()
            .map(|p| {
                let mut out = [0.0; 3];
                for (j, value) in out.iter_mut().enumerate() {
                    *value = (0..3).map(|i| recip[i][j] * p[i]).sum::<f64>() / unit;
                }
                out
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::lattice::BOHR_IN_ANGSTROM;

    fn cubic(a: f64) -> Lattice {
        Lattice::from_parameters(a, a, a, 90.0, 90.0, 90.0).unwrap()
    }

    #[test]
    fn test_wrap_into_unit_cell() {
        let atoms = vec![
            Atom::new([1.25, -0.25, 2.0], 11),
            Atom::new([-1e-18, 0.5, 0.999], 17),
        ];
        let crystal =
            CrystalStructure::new(cubic(5.0), atoms, CoordinateKind::Fractional, 1.0).unwrap();

        for atom in crystal.atoms() {
            for x in atom.position {
                assert!((0.0..1.0).contains(&x));
            }
        }
        assert!((crystal.atoms()[0].position[0] - 0.25).abs() < 1e-12);
        assert!((crystal.atoms()[0].position[1] - 0.75).abs() < 1e-12);
        assert_eq!(crystal.atoms()[0].position[2], 0.0);
    }

    #[test]
    fn test_absolute_input_converted_and_wrapped() {
        let lattice = Lattice::from_parameters(4.0, 5.0, 6.0, 80.0, 95.0, 110.0).unwrap();
        let frac = [0.2, 0.4, 0.6];
        let mut cart = lattice.to_cartesian(&frac);
        // 加一个 a1 平移，应被折回
        for (c, a1) in cart.iter_mut().zip(lattice.matrix[0]) {
            *c += a1;
        }

        let crystal = CrystalStructure::new(
            lattice,
            vec![Atom::new(cart, 8)],
            CoordinateKind::Absolute,
            1.0,
        )
        .unwrap();

        let pos = crystal.atoms()[0].position;
        for k in 0..3 {
            assert!((pos[k] - frac[k]).abs() < 1e-8);
        }
    }

    #[test]
    fn test_absolute_coordinates_with_repeat() {
        let crystal = CrystalStructure::new(
            cubic(2.0),
            vec![Atom::new([0.5, 0.0, 0.0], 26), Atom::new([0.0, 0.5, 0.0], 26)],
            CoordinateKind::Fractional,
            1.0,
        )
        .unwrap();

        let abs = crystal.calc_absolute_coordinates([2, 1, 3]);
        assert_eq!(abs.len(), 2 * 6);

        // 原子优先，其次 (i, j, k)
        assert!((abs[0].position[0] - 1.0).abs() < 1e-12);
        assert!((abs[1].position[2] - 2.0).abs() < 1e-12);
        assert!((abs[2].position[2] - 4.0).abs() < 1e-12);
        assert!((abs[3].position[0] - 3.0).abs() < 1e-12);
        assert!((abs[6].position[1] - 1.0).abs() < 1e-12);
        assert!(abs.iter().all(|a| a.atomic_number == 26));
    }

    #[test]
    fn test_scale_is_metadata_only() {
        let atoms = vec![Atom::new([0.1, 0.2, 0.3], 6)];
        let a = CrystalStructure::new(cubic(3.0), atoms.clone(), CoordinateKind::Fractional, 1.0)
            .unwrap();
        let b = CrystalStructure::new(cubic(3.0), atoms, CoordinateKind::Fractional, 42.0).unwrap();
        assert_eq!(a.atoms(), b.atoms());
        assert_eq!(
            a.calc_absolute_coordinates([1, 1, 1]),
            b.calc_absolute_coordinates([1, 1, 1])
        );
    }

    #[test]
    fn test_diamond_primitive_bond() {
        // 金刚石：惯用晶胞 a = 6.719 bohr，原胞为 60° 菱面体
        let a = 6.719 / 2f64.sqrt();
        let lattice = Lattice::from_parameters(a, a, a, 60.0, 60.0, 60.0).unwrap();
        let crystal = CrystalStructure::new(
            lattice,
            vec![Atom::new([0.0, 0.0, 0.0], 6), Atom::new([0.25, 0.25, 0.25], 6)],
            CoordinateKind::Fractional,
            a,
        )
        .unwrap();

        let abs = crystal.calc_absolute_coordinates([1, 1, 1]);
        let bonds = crystal.find_bonds(&abs);
        assert_eq!(bonds, vec![(0, 1)]);

        // C-C 键长约 1.54 Å
        let d = crate::models::lattice::distance(&abs[0].position, &abs[1].position);
        assert!((d * BOHR_IN_ANGSTROM - 1.54).abs() < 0.01);
    }

    #[test]
    fn test_large_rhombohedral_cell_is_valid() {
        let a = 6.719 / BOHR_IN_ANGSTROM;
        let lattice = Lattice::from_parameters(a, a, a, 60.0, 60.0, 60.0).unwrap();
        // V = a³/√2
        assert!((lattice.volume() - a.powi(3) / 2f64.sqrt()).abs() < 1e-6 * a.powi(3));
    }

    #[test]
    fn test_convert_to_tpiba_cubic() {
        let a = 5.0;
        let crystal =
            CrystalStructure::new(cubic(a), vec![], CoordinateKind::Fractional, a).unwrap();
        let points = crystal.convert_to_tpiba(&[[0.5, 0.0, 0.0], [0.5, 0.5, 0.5]]);

        // 立方晶格中 b_i = (2π/a) e_i，因此 tpiba 坐标与输入一致
        for k in 0..3 {
            assert!((points[0][k] - [0.5, 0.0, 0.0][k]).abs() < 1e-12);
            assert!((points[1][k] - 0.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_molecule_scaled_once() {
        let molecule = MolecularStructure::new(
            vec![Atom::new([0.0, 0.0, 0.0], 1), Atom::new([0.0, 0.0, 0.7], 1)],
            2.0,
        );
        let abs = molecule.calc_absolute_coordinates();
        assert!((abs[1].position[2] - 1.4).abs() < 1e-12);
        assert_eq!(molecule.scale, 2.0);
        assert_eq!(molecule.formula(), "H2");
    }

    #[test]
    fn test_crystal_formula() {
        let crystal = CrystalStructure::new(
            cubic(5.64),
            vec![
                Atom::new([0.0, 0.0, 0.0], 11),
                Atom::new([0.5, 0.5, 0.0], 11),
                Atom::new([0.5, 0.0, 0.0], 17),
                Atom::new([0.0, 0.5, 0.0], 17),
            ],
            CoordinateKind::Fractional,
            1.0,
        )
        .unwrap();
        assert_eq!(crystal.formula(), "Cl2Na2");
    }
}
