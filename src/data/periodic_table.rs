//! # 元素周期表
//!
//! 元素符号与原子序数之间的固定双向映射。
//! 原子序数 0 保留为“未识别元素”哨兵值。
//!
//! ## 依赖关系
//! - 被 `parsers/cif` 和 `commands/` 使用
//! - 纯静态数据，无外部依赖

use std::collections::HashMap;
use std::sync::LazyLock;

/// 未识别元素的哨兵原子序数
pub const UNKNOWN_SPECIES: u8 = 0;

/// 元素符号，下标即原子序数（下标 0 为占位）
const SYMBOLS: [&str; 119] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", // 0-10
    "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", // 11-20
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", // 21-30
    "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", // 31-40
    "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", // 41-50
    "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", // 51-60
    "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", // 61-70
    "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", // 71-80
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", // 81-90
    "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", // 91-100
    "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", // 101-110
    "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og", // 111-118
];

/// 符号 -> 原子序数 反向映射
static SYMBOL_TO_NUMBER: LazyLock<HashMap<&'static str, u8>> = LazyLock::new(|| {
    SYMBOLS
        .iter()
        .enumerate()
        .skip(1)
        .map(|(z, &sym)| (sym, z as u8))
        .collect()
});

/// 由元素符号查询原子序数（区分大小写，需为首字母大写形式）
pub fn atomic_number(symbol: &str) -> Option<u8> {
    SYMBOL_TO_NUMBER.get(symbol).copied()
}

/// 由原子序数查询元素符号
pub fn element_symbol(z: u8) -> Option<&'static str> {
    if z == UNKNOWN_SPECIES {
        return None;
    }
    SYMBOLS.get(z as usize).copied()
}

/// 元素数量上限
pub fn max_atomic_number() -> u8 {
    (SYMBOLS.len() - 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_directions() {
        assert_eq!(atomic_number("C"), Some(6));
        assert_eq!(atomic_number("Fe"), Some(26));
        assert_eq!(atomic_number("Og"), Some(118));
        assert_eq!(element_symbol(6), Some("C"));
        assert_eq!(element_symbol(79), Some("Au"));
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(atomic_number("Xx"), None);
        assert_eq!(atomic_number("fe"), None);
        assert_eq!(atomic_number("X"), None);
        assert_eq!(element_symbol(UNKNOWN_SPECIES), None);
        assert_eq!(element_symbol(200), None);
    }

    #[test]
    fn test_table_is_consistent() {
        for z in 1..=max_atomic_number() {
            let sym = element_symbol(z).unwrap();
            assert_eq!(atomic_number(sym), Some(z));
        }
    }
}
