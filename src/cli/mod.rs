//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `inspect`: 解析单个 CIF，打印晶格与原子表
//! - `bonds`: 在周期像超胞中检测化学键
//! - `kpath`: 将倒格子分数坐标 k 点转换为 tpiba 单位
//! - `summary`: 批量解析 CIF 并导出汇总 CSV
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: inspect, bonds, kpath, summary

pub mod bonds;
pub mod inspect;
pub mod kpath;
pub mod summary;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use solidstate::symmetry::{DedupMetric, ExpansionOptions, DEFAULT_DEDUP_TOLERANCE};
use std::path::PathBuf;

/// solidstate - CIF 结构几何工具
#[derive(Parser)]
#[command(name = "solidstate")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "CIF structure parsing, symmetry expansion and bonding topology", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Covalent radii table in Å, one value per line indexed by atomic number
    #[arg(long, global = true, env = "SOLIDSTATE_RADII", value_name = "FILE")]
    pub radii: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// 日志级别过滤器
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Parse a CIF file and print the lattice and expanded atom list
    Inspect(inspect::InspectArgs),

    /// Detect covalent bonds in a periodic supercell
    Bonds(bonds::BondsArgs),

    /// Convert k-points from reciprocal-lattice coordinates to tpiba units
    Kpath(kpath::KpathArgs),

    /// Summarize many CIF files in parallel and export a CSV table
    Summary(summary::SummaryArgs),
}

// ─────────────────────────────────────────────────────────────
// 共享参数
// ─────────────────────────────────────────────────────────────

/// 去重距离度量
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum MetricArg {
    /// Euclidean distance between fractional coordinates
    Fractional,
    /// Cartesian distance in bohr
    Cartesian,
}

impl std::fmt::Display for MetricArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricArg::Fractional => write!(f, "fractional"),
            MetricArg::Cartesian => write!(f, "cartesian"),
        }
    }
}

/// 对称展开去重参数
#[derive(Args, Debug, Clone, Copy)]
pub struct DedupArgs {
    /// Distance below which two symmetry images of the same species are merged
    #[arg(long, default_value_t = DEFAULT_DEDUP_TOLERANCE)]
    pub tolerance: f64,

    /// Distance metric used for merging symmetry images
    #[arg(long, value_enum, default_value_t = MetricArg::Fractional)]
    pub metric: MetricArg,
}

impl DedupArgs {
    pub fn to_options(self) -> ExpansionOptions {
        ExpansionOptions {
            tolerance: self.tolerance,
            metric: match self.metric {
                MetricArg::Fractional => DedupMetric::Fractional,
                MetricArg::Cartesian => DedupMetric::Cartesian,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::parse_from(["solidstate", "inspect", "a.cif"]);
        assert_eq!(cli.log_filter(), "warn");
        let cli = Cli::parse_from(["solidstate", "-vv", "inspect", "a.cif"]);
        assert_eq!(cli.log_filter(), "debug");
    }

    #[test]
    fn test_dedup_args() {
        let cli = Cli::parse_from([
            "solidstate",
            "inspect",
            "a.cif",
            "--metric",
            "cartesian",
            "--tolerance",
            "0.1",
        ]);
        match cli.command {
            Commands::Inspect(args) => {
                let options = args.dedup.to_options();
                assert_eq!(options.metric, DedupMetric::Cartesian);
                assert!((options.tolerance - 0.1).abs() < 1e-12);
            }
            _ => panic!("expected inspect"),
        }
    }
}
