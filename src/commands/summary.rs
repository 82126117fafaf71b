//! # summary 命令实现
//!
//! 批量解析 CIF 文件，汇总化学式、晶胞参数、体积与成键数。
//!
//! ## 功能
//! - 单文件或目录输入，glob 模式匹配，可递归
//! - rayon 并行解析，进度条显示
//! - 终端表格 + CSV 输出
//!
//! ## 依赖关系
//! - 使用 `cli/summary.rs` 定义的参数
//! - 使用 `batch/`, `parsers/`, `models/`
//! - 使用 `utils/output.rs`

use crate::cli::summary::SummaryArgs;
use solidstate::batch::{BatchRunner, FileCollector, ProcessResult};
use solidstate::error::{Result, SolidStateError};
use solidstate::models::BOHR_IN_ANGSTROM;
use solidstate::parsers;
use solidstate::symmetry::ExpansionOptions;
use solidstate::utils::output;

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// 单个结构的汇总信息（长度单位 Å）
#[derive(Debug, Clone, Serialize)]
pub struct StructureSummary {
    pub file: String,
    pub formula: String,
    pub n_atoms: usize,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    pub volume: f64,
    pub n_bonds: usize,
    pub n_warnings: usize,
}

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct SummaryRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Atoms")]
    n_atoms: usize,
    #[tabled(rename = "a, b, c (Å)")]
    lengths: String,
    #[tabled(rename = "α, β, γ (°)")]
    angles: String,
    #[tabled(rename = "V (Å³)")]
    volume: String,
    #[tabled(rename = "Bonds")]
    n_bonds: usize,
}

impl From<&StructureSummary> for SummaryRow {
    fn from(s: &StructureSummary) -> Self {
        SummaryRow {
            file: s.file.clone(),
            formula: s.formula.clone(),
            n_atoms: s.n_atoms,
            lengths: format!("{:.4} {:.4} {:.4}", s.a, s.b, s.c),
            angles: format!("{:.2} {:.2} {:.2}", s.alpha, s.beta, s.gamma),
            volume: format!("{:.3}", s.volume),
            n_bonds: s.n_bonds,
        }
    }
}

/// 执行 summary 命令
pub fn execute(args: SummaryArgs) -> Result<()> {
    output::print_header("Summarizing CIF structures");

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&args.pattern)
        .recursive(args.recursive)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No files matched '{}' under {}",
            args.pattern,
            args.input.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} file(s) to parse", files.len()));

    let options = args.dedup.to_options();
    let runner = BatchRunner::new(args.jobs);
    let result = runner.run(&files, |path| match summarize(path, options) {
        Ok(summary) => ProcessResult::Success(summary),
        Err(e) => ProcessResult::Failed(path.display().to_string(), e.to_string()),
    })?;

    for (path, err) in &result.failures {
        output::print_error(&format!("{}: {}", path, err));
    }

    if result.outputs.is_empty() {
        output::print_warning("No structures could be parsed.");
        return Ok(());
    }

    let rows: Vec<SummaryRow> = result.outputs.iter().map(SummaryRow::from).collect();
    println!("{}", Table::new(&rows));

    save_summary_csv(&result.outputs, &args.output)?;
    output::print_success(&format!("Summary saved to '{}'", args.output.display()));

    output::print_done(&format!(
        "Parsed {}/{} file(s) ({} failed)",
        result.success(),
        result.total(),
        result.failed()
    ));

    Ok(())
}

/// 解析单个文件并计算汇总信息
///
/// 成键数只统计单个晶胞（1 × 1 × 1）内的原子对。
pub fn summarize(path: &Path, options: ExpansionOptions) -> Result<StructureSummary> {
    let report = parsers::parse_structure_file_with(path, options)?;
    let crystal = &report.structure;
    let (a, b, c, alpha, beta, gamma) = crystal.lattice().parameters();

    let abs_atoms = crystal.calc_absolute_coordinates([1, 1, 1]);
    let n_bonds = crystal.find_bonds(&abs_atoms).len();

    Ok(StructureSummary {
        file: path.display().to_string(),
        formula: crystal.formula(),
        n_atoms: crystal.n_atoms(),
        a: a * BOHR_IN_ANGSTROM,
        b: b * BOHR_IN_ANGSTROM,
        c: c * BOHR_IN_ANGSTROM,
        alpha,
        beta,
        gamma,
        volume: crystal.lattice().volume().abs() * BOHR_IN_ANGSTROM.powi(3),
        n_bonds,
        n_warnings: report.warnings.len(),
    })
}

/// 保存汇总到 CSV
fn save_summary_csv(summaries: &[StructureSummary], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for summary in summaries {
        wtr.serialize(summary)?;
    }

    wtr.flush().map_err(|e| SolidStateError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
