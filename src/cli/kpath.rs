//! # kpath 子命令 CLI 定义
//!
//! 将倒格子分数坐标 k 点转换为 tpiba（2π/a）笛卡尔坐标
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/kpath.rs`

use super::DedupArgs;
use clap::Args;
use std::path::PathBuf;

/// kpath 子命令参数
#[derive(Args, Debug)]
pub struct KpathArgs {
    /// Input CIF file
    pub file: PathBuf,

    /// K-point in reciprocal-lattice coordinates, e.g. '0.5,0,0.5' (repeatable)
    #[arg(short, long = "point", value_name = "K1,K2,K3", value_parser = parse_point, required = true)]
    pub points: Vec<[f64; 3]>,

    #[command(flatten)]
    pub dedup: DedupArgs,
}

/// 解析 "k1,k2,k3" 形式的 k 点
pub fn parse_point(s: &str) -> Result<[f64; 3], String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", v.trim()))
        })
        .collect::<Result<_, _>>()?;

    match values.as_slice() {
        [k1, k2, k3] => Ok([*k1, *k2, *k3]),
        _ => Err(format!("expected 3 comma-separated values, got {}", values.len())),
    }
}
