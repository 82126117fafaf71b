//! # kpath 命令实现
//!
//! 将倒格子分数坐标 k 点转换为 tpiba（2π/|a1|）单位的笛卡尔坐标，
//! 可直接写入以 tpiba 为单位的 k 点列表。
//!
//! ## 依赖关系
//! - 使用 `cli/kpath.rs` 定义的参数
//! - 使用 `parsers/`, `models/structure.rs`
//! - 使用 `utils/output.rs`

use crate::cli::kpath::KpathArgs;
use solidstate::error::Result;
use solidstate::parsers;
use solidstate::utils::output;

use tabled::{Table, Tabled};

/// k 点表行
#[derive(Debug, Clone, Tabled)]
struct KPointRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "k (crystal)")]
    crystal: String,
    #[tabled(rename = "k (tpiba)")]
    tpiba: String,
}

/// 执行 kpath 命令
pub fn execute(args: KpathArgs) -> Result<()> {
    let report = parsers::parse_structure_file_with(&args.file, args.dedup.to_options())?;
    super::report_warnings(&report);

    let crystal = &report.structure;
    let converted = crystal.convert_to_tpiba(&args.points);

    output::print_header(&format!(
        "K-points for {} (2π/a, a = {:.6} bohr)",
        report.name,
        crystal.lattice().a_length()
    ));

    let rows: Vec<KPointRow> = args
        .points
        .iter()
        .zip(&converted)
        .enumerate()
        .map(|(i, (k, t))| KPointRow {
            index: i + 1,
            crystal: output::format_vector(k, 4),
            tpiba: output::format_vector(t, 6),
        })
        .collect();

    println!("{}", Table::new(&rows));

    Ok(())
}
