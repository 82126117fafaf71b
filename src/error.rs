//! # 统一错误处理模块
//!
//! 定义 solidstate 的所有错误类型，使用 `thiserror` 派生。
//!
//! 致命错误（缺失标签、缺失数据块、几何错误、对称操作解析失败）会中止整个解析，
//! 不会返回部分结构。非致命情况（未知元素）以 [`ParseWarning`] 收集。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use std::fmt;
use thiserror::Error;

/// solidstate 统一错误类型
#[derive(Error, Debug)]
pub enum SolidStateError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    // ─────────────────────────────────────────────────────────────
    // CIF 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Required CIF tag '{tag}' not found")]
    MissingTag { tag: String },

    #[error("CIF block '{block}' not found")]
    BlockNotFound { block: String },

    #[error("Invalid value '{value}' for CIF tag '{tag}'")]
    InvalidValue { tag: String, value: String },

    #[error("Malformed atom record '{line}': {reason}")]
    MalformedRecord { line: String, reason: String },

    #[error("No atoms with a recognized species in {path}")]
    NoAtoms { path: String },

    // ─────────────────────────────────────────────────────────────
    // 几何与对称错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid cell geometry: {0}")]
    Geometry(String),

    #[error("Cannot evaluate symmetry operator '{operator}': {reason}")]
    SymmetryParse { operator: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SolidStateError>;

/// 非致命解析警告
///
/// 对应的原子已被丢弃，解析继续进行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseWarning {
    /// 原子记录的元素标签无法识别
    UnknownSpecies { label: String, line: String },
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::UnknownSpecies { label, line } => {
                write!(f, "Unknown species '{}' dropped (record: '{}')", label, line)
            }
        }
    }
}
