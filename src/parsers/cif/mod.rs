//! # CIF 格式解析器
//!
//! 解析晶体学信息文件 (CIF)，重建完整的对称展开晶胞。
//!
//! ## CIF 格式说明
//! ```text
//! data_name
//! _cell_length_a    5.6402(3)
//! _cell_length_b    5.6402(3)
//! _cell_length_c    5.6402(3)
//! _cell_angle_alpha 90
//! _cell_angle_beta  90
//! _cell_angle_gamma 90
//! loop_
//! _symmetry_equiv_pos_site_id
//! _symmetry_equiv_pos_as_xyz
//! 1 x,y,z
//! 2 -x,-y,-z
//! ...
//! loop_
//! _atom_site_label
//! _atom_site_fract_x
//! _atom_site_fract_y
//! _atom_site_fract_z
//! Na1 0.0 0.0 0.0
//! ...
//! ```
//!
//! ## 流程
//! 晶胞参数 -> 晶格向量 -> 原子位点 -> 对称展开 + 去重 -> `CrystalStructure`
//!
//! 长度由 Å 转换为原子单位（bohr），`scale` 记录 a（bohr）。
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 使用
//! - 使用 `models/`, `symmetry/`
//! - 子模块: lexer, blocks

pub mod blocks;
pub mod lexer;

pub use blocks::{normalize_species, parse_atom_record, AtomRecord, AtomSiteBlock, CifDocument};

use crate::data::periodic_table::UNKNOWN_SPECIES;
use crate::error::{ParseWarning, Result, SolidStateError};
use crate::models::{Atom, CoordinateKind, CrystalStructure, Lattice, BOHR_IN_ANGSTROM};
use crate::symmetry::{expand_and_deduplicate, ExpansionOptions, SymmetryOperator};

use std::fs;
use std::path::Path;

/// 解析结果：结构 + 非致命警告
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// 数据块名或文件名
    pub name: String,
    pub structure: CrystalStructure,
    pub warnings: Vec<ParseWarning>,
}

/// CIF 结构解析器
#[derive(Debug, Clone, Default)]
pub struct StructureParser {
    options: ExpansionOptions,
}

impl StructureParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定去重选项
    pub fn with_options(options: ExpansionOptions) -> Self {
        StructureParser { options }
    }

    pub fn options(&self) -> &ExpansionOptions {
        &self.options
    }

    /// 解析 CIF 文件
    ///
    /// 非 UTF-8 字节（如 Latin-1 编码的注释）按替换字符解码，标签与数值只含 ASCII。
    pub fn parse_cif_file(&self, path: &Path) -> Result<ParseReport> {
        let bytes = fs::read(path).map_err(|e| SolidStateError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        let content = String::from_utf8_lossy(&bytes);

        self.parse_cif_content(
            &content,
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unknown"),
        )
    }

    /// 从字符串内容解析 CIF
    pub fn parse_cif_content(&self, content: &str, default_name: &str) -> Result<ParseReport> {
        let doc = CifDocument::parse(content);
        let name = doc.block_name().unwrap_or(default_name).to_string();

        // 晶胞参数
        let a = doc.extract_cell_parameter("_cell_length_a")? / BOHR_IN_ANGSTROM;
        let b = doc.extract_cell_parameter("_cell_length_b")? / BOHR_IN_ANGSTROM;
        let c = doc.extract_cell_parameter("_cell_length_c")? / BOHR_IN_ANGSTROM;
        let alpha = doc.extract_cell_parameter("_cell_angle_alpha")?;
        let beta = doc.extract_cell_parameter("_cell_angle_beta")?;
        let gamma = doc.extract_cell_parameter("_cell_angle_gamma")?;

        let lattice = Lattice::from_parameters(a, b, c, alpha, beta, gamma)?;

        // 原子位点
        let block = doc.locate_atom_site_block()?;
        let mut warnings = Vec::new();
        let mut asymmetric_unit = Vec::with_capacity(block.records.len());

        for line in &block.records {
            let record = parse_atom_record(line, block.x_column)?;
            if record.atomic_number == UNKNOWN_SPECIES {
                warnings.push(ParseWarning::UnknownSpecies {
                    label: record.label,
                    line: line.to_string(),
                });
                continue;
            }
            asymmetric_unit.push(Atom::new(record.position, record.atomic_number));
        }

        if asymmetric_unit.is_empty() {
            return Err(SolidStateError::NoAtoms { path: name });
        }

        // 对称操作
        let operators = doc
            .locate_symmetry_block()?
            .into_iter()
            .map(SymmetryOperator::parse)
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "{}: {} asymmetric atoms, {} symmetry operators",
            name,
            asymmetric_unit.len(),
            operators.len()
        );

        let atoms = expand_and_deduplicate(&asymmetric_unit, &operators, &lattice, &self.options);
        let structure = CrystalStructure::new(lattice, atoms, CoordinateKind::Fractional, a)?;

        Ok(ParseReport {
            name,
            structure,
            warnings,
        })
    }
}
