//! # inspect 子命令 CLI 定义
//!
//! 解析单个 CIF 文件并打印晶格、倒格矢与展开后的原子表
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/inspect.rs`

use super::DedupArgs;
use clap::Args;
use std::path::PathBuf;

/// inspect 子命令参数
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input CIF file
    pub file: PathBuf,

    #[command(flatten)]
    pub dedup: DedupArgs,

    /// Print Cartesian coordinates (bohr) instead of fractional
    #[arg(long, default_value_t = false)]
    pub cartesian: bool,
}
