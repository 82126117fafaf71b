//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/` 以及库中的 `parsers/`, `models/`, `batch/`, `utils/`
//! - 子模块: inspect, bonds, kpath, summary

pub mod bonds;
pub mod inspect;
pub mod kpath;
pub mod summary;

use crate::cli::{Cli, Commands};
use solidstate::data::covalent_radii;
use solidstate::error::Result;
use solidstate::utils::output;
use solidstate::ParseReport;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    if let Some(path) = &cli.radii {
        covalent_radii::init_from_file(path)?;
    }

    match cli.command {
        Commands::Inspect(args) => inspect::execute(args),
        Commands::Bonds(args) => bonds::execute(args),
        Commands::Kpath(args) => kpath::execute(args),
        Commands::Summary(args) => summary::execute(args),
    }
}

/// 打印解析警告
fn report_warnings(report: &ParseReport) {
    for warning in &report.warnings {
        output::print_warning(&warning.to_string());
    }
}
