//! # CIF 数据块定位
//!
//! 在分类记录序列上定位晶胞参数、原子位点块与对称操作块，
//! 并解析单条原子记录。
//!
//! ## 依赖关系
//! - 被 `parsers/cif/mod.rs` 使用
//! - 使用 `parsers/cif/lexer.rs`, `data/periodic_table.rs`

use super::lexer::{parse_cif_number, tokenize, CifLine, LineKind};
use crate::data::periodic_table::{atomic_number, UNKNOWN_SPECIES};
use crate::error::{Result, SolidStateError};

/// 原子位点块的列头标签
pub const ATOM_SITE_FRACT_X: &str = "_atom_site_fract_x";

/// 对称操作块标签（旧式在前，新式在后）
pub const SYMMETRY_TAGS: [&str; 2] = [
    "_symmetry_equiv_pos_as_xyz",
    "_space_group_symop_operation_xyz",
];

/// 原子位点块
#[derive(Debug, Clone, PartialEq)]
pub struct AtomSiteBlock<'a> {
    /// x 坐标所在列，y、z 依次为后两列
    pub x_column: usize,
    /// 原子记录行
    pub records: Vec<&'a str>,
}

/// 解析得到的原始原子记录
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// 原始标签（首列）
    pub label: String,
    /// 规范化后的元素符号
    pub species: String,
    /// 原子序数，未识别为 0
    pub atomic_number: u8,
    /// 分数坐标
    pub position: [f64; 3],
}

/// 分类后的 CIF 文档
#[derive(Debug, Clone)]
pub struct CifDocument<'a> {
    lines: Vec<CifLine<'a>>,
}

impl<'a> CifDocument<'a> {
    pub fn parse(content: &'a str) -> Self {
        CifDocument {
            lines: tokenize(content),
        }
    }

    pub fn lines(&self) -> &[CifLine<'a>] {
        &self.lines
    }

    fn find_tag(&self, tag: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.tag_name() == Some(tag))
    }

    /// 数据块名（`data_xxx`）
    pub fn block_name(&self) -> Option<&'a str> {
        self.lines.iter().find_map(|l| match l.kind {
            LineKind::DataBlock(name) if !name.is_empty() => Some(name),
            _ => None,
        })
    }

    /// 提取晶胞参数
    ///
    /// 取标签后第一个空白分隔的数值；若标签行无值则取下一数据行的首个字段。
    pub fn extract_cell_parameter(&self, tag: &str) -> Result<f64> {
        let idx = self.find_tag(tag).ok_or_else(|| SolidStateError::MissingTag {
            tag: tag.to_string(),
        })?;

        let token = match self.lines[idx].kind {
            LineKind::Tag {
                value: Some(value), ..
            } => value.split_whitespace().next(),
            _ => self.lines[idx + 1..]
                .iter()
                .find(|l| !matches!(l.kind, LineKind::Blank | LineKind::Comment))
                .and_then(|l| match l.kind {
                    LineKind::Data(data) => data.split_whitespace().next(),
                    _ => None,
                }),
        };

        let token = token.ok_or_else(|| SolidStateError::InvalidValue {
            tag: tag.to_string(),
            value: String::new(),
        })?;

        parse_cif_number(token).ok_or_else(|| SolidStateError::InvalidValue {
            tag: tag.to_string(),
            value: token.to_string(),
        })
    }

    /// 定位原子位点块
    ///
    /// 自 `_atom_site_fract_x` 向前数紧邻的标签行得到 x 所在列；
    /// 向后收集数据行，直到空行或 `loop_`，其间穿插的标签行被跳过。
    pub fn locate_atom_site_block(&self) -> Result<AtomSiteBlock<'a>> {
        let header = self
            .find_tag(ATOM_SITE_FRACT_X)
            .ok_or_else(|| SolidStateError::BlockNotFound {
                block: ATOM_SITE_FRACT_X.to_string(),
            })?;

        let x_column = self.lines[..header]
            .iter()
            .rev()
            .take_while(|l| l.is_tag())
            .count();

        let mut records = Vec::new();
        for line in &self.lines[header..] {
            match line.kind {
                LineKind::Blank | LineKind::Loop | LineKind::DataBlock(_) => break,
                LineKind::Data(data) => records.push(data),
                LineKind::Tag { .. } | LineKind::Comment | LineKind::Text => continue,
            }
        }

        log::debug!(
            "Atom site block at line {}: x column {}, {} records",
            self.lines[header].number,
            x_column,
            records.len()
        );

        Ok(AtomSiteBlock { x_column, records })
    }

    /// 定位对称操作块
    ///
    /// 收集对称操作标签之后、下一个 `loop_` 之前的数据行，
    /// 跳过数据行之前穿插的标签行，并去除行首的序号列。
    pub fn locate_symmetry_block(&self) -> Result<Vec<&'a str>> {
        let (tag, header) = SYMMETRY_TAGS
            .iter()
            .find_map(|&tag| self.find_tag(tag).map(|idx| (tag, idx)))
            .ok_or_else(|| SolidStateError::BlockNotFound {
                block: SYMMETRY_TAGS[0].to_string(),
            })?;

        let mut operators = Vec::new();
        if let LineKind::Tag {
            value: Some(value), ..
        } = self.lines[header].kind
        {
            operators.push(strip_enumeration(value));
        }

        for line in &self.lines[header + 1..] {
            match line.kind {
                LineKind::Loop | LineKind::DataBlock(_) => break,
                LineKind::Tag { .. } if operators.is_empty() => continue,
                LineKind::Tag { .. } => break,
                LineKind::Data(data) => operators.push(strip_enumeration(data)),
                LineKind::Blank | LineKind::Comment | LineKind::Text => continue,
            }
        }

        if operators.is_empty() {
            return Err(SolidStateError::BlockNotFound {
                block: tag.to_string(),
            });
        }

        Ok(operators)
    }
}

/// 去除对称操作行首的序号列，如 `3 -x,y,-z` -> `-x,y,-z`
pub fn strip_enumeration(line: &str) -> &str {
    let line = line.trim();
    match line.split_once(char::is_whitespace) {
        Some((first, rest)) if first.chars().all(|c| c.is_ascii_digit()) => rest.trim(),
        _ => line,
    }
}

/// 规范化元素标签：保留开头的字母部分并转为首字母大写
///
/// `Fe2+` -> `Fe`, `O1` -> `O`, `CL3` -> `Cl`
pub fn normalize_species(label: &str) -> String {
    let letters: String = label.chars().take_while(|c| c.is_alphabetic()).collect();
    let mut chars = letters.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// 解析单条原子记录
///
/// 首列为元素标签，`x_column` 起的三列为分数坐标。
pub fn parse_atom_record(line: &str, x_column: usize) -> Result<AtomRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    if tokens.len() < x_column + 3 {
        return Err(SolidStateError::MalformedRecord {
            line: line.to_string(),
            reason: format!(
                "expected at least {} columns, found {}",
                x_column + 3,
                tokens.len()
            ),
        });
    }

    let mut position = [0.0; 3];
    for (axis, value) in position.iter_mut().enumerate() {
        let token = tokens[x_column + axis];
        *value = parse_cif_number(token).ok_or_else(|| SolidStateError::MalformedRecord {
            line: line.to_string(),
            reason: format!("non-numeric coordinate '{}'", token),
        })?;
    }

    let label = tokens[0].to_string();
    let species = normalize_species(&label);
    let atomic_number = atomic_number(&species).unwrap_or(UNKNOWN_SPECIES);

    Ok(AtomRecord {
        label,
        species,
        atomic_number,
        position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NACL: &str = r#"data_NaCl
_symmetry_space_group_name_H-M 'F m -3 m'
_cell_length_a 5.6402(3)
_cell_length_b 5.6402
_cell_length_c
5.6402
_cell_angle_alpha 90
_cell_angle_beta 90
_cell_angle_gamma 90

loop_
_symmetry_equiv_pos_site_id
_symmetry_equiv_pos_as_xyz
1 x,y,z
2 '-x, -y, -z'
3 1/2+x,1/2+y,z
loop_
_atom_site_label
_atom_site_type_symbol
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
_atom_site_occupancy
Na1 Na+ 0.0 0.0 0.0 1.0
Cl1 Cl- 0.5(1) 0.5 0.5 1.0

loop_
_atom_site_aniso_label
"#;

    #[test]
    fn test_extract_cell_parameter() {
        let doc = CifDocument::parse(NACL);
        assert_eq!(doc.extract_cell_parameter("_cell_length_a").unwrap(), 5.6402);
        assert_eq!(doc.extract_cell_parameter("_cell_angle_gamma").unwrap(), 90.0);
        // 值在下一行
        assert_eq!(doc.extract_cell_parameter("_cell_length_c").unwrap(), 5.6402);
        assert_eq!(doc.block_name(), Some("NaCl"));
    }

    #[test]
    fn test_uncertainty_discarded() {
        let doc = CifDocument::parse("_cell_length_a 5.43(2)\n");
        let a = doc.extract_cell_parameter("_cell_length_a").unwrap();
        assert!((a - 5.43).abs() < 1e-12);
    }

    #[test]
    fn test_missing_tag() {
        let doc = CifDocument::parse(NACL);
        let err = doc.extract_cell_parameter("_cell_volume").unwrap_err();
        assert!(matches!(err, SolidStateError::MissingTag { ref tag } if tag == "_cell_volume"));
    }

    #[test]
    fn test_invalid_value() {
        let doc = CifDocument::parse("_cell_length_a ?\n");
        let err = doc.extract_cell_parameter("_cell_length_a").unwrap_err();
        assert!(matches!(err, SolidStateError::InvalidValue { .. }));
    }

    #[test]
    fn test_locate_atom_site_block() {
        let doc = CifDocument::parse(NACL);
        let block = doc.locate_atom_site_block().unwrap();
        assert_eq!(block.x_column, 2);
        assert_eq!(
            block.records,
            vec!["Na1 Na+ 0.0 0.0 0.0 1.0", "Cl1 Cl- 0.5(1) 0.5 0.5 1.0"]
        );
    }

    #[test]
    fn test_atom_site_block_missing() {
        let doc = CifDocument::parse("_cell_length_a 1.0\n");
        let err = doc.locate_atom_site_block().unwrap_err();
        assert!(matches!(err, SolidStateError::BlockNotFound { .. }));
    }

    #[test]
    fn test_atom_site_interleaved_tags() {
        let content = "loop_\n_atom_site_label\n_atom_site_fract_x\n_atom_site_fract_y\nC1 0.1 0.2 0.3\n_atom_site_fract_z\nC2 0.4 0.5 0.6\nloop_\n";
        let block = CifDocument::parse(content).locate_atom_site_block().unwrap();
        assert_eq!(block.x_column, 1);
        assert_eq!(block.records, vec!["C1 0.1 0.2 0.3", "C2 0.4 0.5 0.6"]);
    }

    #[test]
    fn test_locate_symmetry_block() {
        let doc = CifDocument::parse(NACL);
        let ops = doc.locate_symmetry_block().unwrap();
        assert_eq!(ops, vec!["x,y,z", "'-x, -y, -z'", "1/2+x,1/2+y,z"]);
    }

    #[test]
    fn test_symmetry_block_new_dialect() {
        let content = "loop_\n_space_group_symop_operation_xyz\n'x, y, z'\n'-x, y, -z'\n\n_cell_length_a 3\n";
        let ops = CifDocument::parse(content).locate_symmetry_block().unwrap();
        assert_eq!(ops, vec!["'x, y, z'", "'-x, y, -z'"]);
    }

    #[test]
    fn test_symmetry_block_missing() {
        let err = CifDocument::parse("_cell_length_a 3\n")
            .locate_symmetry_block()
            .unwrap_err();
        assert!(matches!(err, SolidStateError::BlockNotFound { .. }));

        let err = CifDocument::parse("loop_\n_symmetry_equiv_pos_as_xyz\nloop_\n")
            .locate_symmetry_block()
            .unwrap_err();
        assert!(matches!(err, SolidStateError::BlockNotFound { .. }));
    }

    #[test]
    fn test_strip_enumeration() {
        assert_eq!(strip_enumeration("12 -x,y,-z"), "-x,y,-z");
        assert_eq!(strip_enumeration("1/2+x,y,z"), "1/2+x,y,z");
        assert_eq!(strip_enumeration("x, y, z"), "x, y, z");
        assert_eq!(strip_enumeration("  3   'x, -y, z'"), "'x, -y, z'");
    }

    #[test]
    fn test_normalize_species() {
        assert_eq!(normalize_species("Fe2+"), "Fe");
        assert_eq!(normalize_species("O1"), "O");
        assert_eq!(normalize_species("CL3"), "Cl");
        assert_eq!(normalize_species("c"), "C");
        assert_eq!(normalize_species("12"), "");
    }

    #[test]
    fn test_parse_atom_record() {
        let record = parse_atom_record("Si1 Si 0.125(3) 0.125 -0.125 1.0", 2).unwrap();
        assert_eq!(record.label, "Si1");
        assert_eq!(record.species, "Si");
        assert_eq!(record.atomic_number, 14);
        assert_eq!(record.position, [0.125, 0.125, -0.125]);
    }

    #[test]
    fn test_parse_atom_record_unknown_species() {
        let record = parse_atom_record("Qq1 0.1 0.2 0.3", 1).unwrap();
        assert_eq!(record.atomic_number, UNKNOWN_SPECIES);
    }

    #[test]
    fn test_parse_atom_record_malformed() {
        assert!(matches!(
            parse_atom_record("C1 0.1 0.2", 1),
            Err(SolidStateError::MalformedRecord { .. })
        ));
        assert!(matches!(
            parse_atom_record("C1 0.1 ? 0.3", 1),
            Err(SolidStateError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_parse_atom_record_overflow() {
        match parse_atom_record("C1 1e999 0.2 0.3", 1) {
            Err(SolidStateError::MalformedRecord { reason, .. }) => {
                assert!(reason.contains("1e999"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
