//! # 静态数据表模块
//!
//! 进程级只读查找表：元素周期表与共价半径。
//! 初始化一次，之后不再修改。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `bonds.rs`, `commands/` 使用
//! - 子模块: periodic_table, covalent_radii

pub mod covalent_radii;
pub mod periodic_table;

pub use covalent_radii::{covalent_radius, CovalentRadii};
pub use periodic_table::{atomic_number, element_symbol, UNKNOWN_SPECIES};
