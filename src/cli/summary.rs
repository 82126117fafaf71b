//! # summary 子命令 CLI 定义
//!
//! 批量解析 CIF 文件，输出化学式、晶胞参数与成键统计
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/summary.rs`

use super::DedupArgs;
use clap::Args;
use std::path::PathBuf;

/// summary 子命令参数
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Input CIF file or directory
    pub input: PathBuf,

    /// Glob pattern(s) for input files, comma separated
    #[arg(short, long, default_value = "*.cif")]
    pub pattern: String,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    #[command(flatten)]
    pub dedup: DedupArgs,

    /// Filename for the summary CSV output
    #[arg(short, long, default_value = "summary.csv")]
    pub output: PathBuf,
}
