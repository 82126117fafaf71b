//! # bonds 子命令 CLI 定义
//!
//! 在 nx × ny × nz 周期像超胞中检测共价键
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/bonds.rs`

use super::DedupArgs;
use clap::Args;
use std::path::PathBuf;

/// bonds 子命令参数
#[derive(Args, Debug)]
pub struct BondsArgs {
    /// Input CIF file
    pub file: PathBuf,

    /// Number of periodic images along a1, a2 and a3
    #[arg(long, num_args = 3, value_names = ["NX", "NY", "NZ"], default_values_t = [1, 1, 1])]
    pub repeat: Vec<usize>,

    #[command(flatten)]
    pub dedup: DedupArgs,

    /// Write the bond list to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
