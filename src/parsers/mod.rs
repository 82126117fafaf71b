//! # 解析器模块
//!
//! 提供结构文件解析器，目前支持 CIF。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/`, `symmetry/`
//! - 子模块: cif

pub mod cif;

pub use cif::{ParseReport, StructureParser};

use crate::error::{Result, SolidStateError};
use crate::symmetry::ExpansionOptions;
use std::path::Path;

/// 从文件路径推断格式并解析（默认去重选项）
pub fn parse_structure_file(path: &Path) -> Result<ParseReport> {
    parse_structure_file_with(path, ExpansionOptions::default())
}

/// 从文件路径推断格式并解析
///
/// 非致命警告保留在返回的 [`ParseReport`] 中，由调用方决定如何呈现；
/// 这里只以 `info` 级别记录。
pub fn parse_structure_file_with(path: &Path, options: ExpansionOptions) -> Result<ParseReport> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let report = match ext.as_str() {
        "cif" => StructureParser::with_options(options).parse_cif_file(path)?,
        _ => {
            return Err(SolidStateError::UnsupportedFormat(format!(
                "Cannot determine format for: {}",
                path.display()
            )))
        }
    };

    for warning in &report.warnings {
        log::info!("{}: {}", path.display(), warning);
    }

    Ok(report)
}
