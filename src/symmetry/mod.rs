//! # 对称展开模块
//!
//! 将不对称单元通过对称操作展开为完整晶胞，并去除重复原子。
//! 对称操作字符串只经受限的仿射表达式解析器求值，绝不作为代码执行。
//!
//! ## 依赖关系
//! - 被 `parsers/cif` 使用
//! - 使用 `models/`
//! - 子模块: expr, operator, expand

pub mod expand;
pub mod expr;
pub mod operator;

pub use expand::{
    deduplicate, expand, expand_and_deduplicate, DedupMetric, ExpansionOptions,
    DEFAULT_DEDUP_TOLERANCE,
};
pub use operator::SymmetryOperator;
