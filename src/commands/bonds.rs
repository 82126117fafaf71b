//! # bonds 命令实现
//!
//! 将晶胞展开为 nx × ny × nz 周期像，用共价半径判据检测化学键。
//!
//! ## 功能
//! - 终端表格显示成键原子对与键长（Å）
//! - 可选导出 CSV
//!
//! ## 依赖关系
//! - 使用 `cli/bonds.rs` 定义的参数
//! - 使用 `parsers/`, `models/`, `bonds.rs`
//! - 使用 `utils/output.rs`

use crate::cli::bonds::BondsArgs;
use solidstate::bonds::bond_length;
use solidstate::error::{Result, SolidStateError};
use solidstate::models::{Atom, BOHR_IN_ANGSTROM};
use solidstate::parsers;
use solidstate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 键表行
#[derive(Debug, Clone, Tabled)]
struct BondRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Atom i")]
    first: String,
    #[tabled(rename = "Atom j")]
    second: String,
    #[tabled(rename = "Length (Å)")]
    length: String,
}

/// 执行 bonds 命令
pub fn execute(args: BondsArgs) -> Result<()> {
    let repeat = repeat_counts(&args.repeat)?;

    let report = parsers::parse_structure_file_with(&args.file, args.dedup.to_options())?;
    super::report_warnings(&report);

    let crystal = &report.structure;
    let abs_atoms = crystal.calc_absolute_coordinates(repeat);
    let bonds = crystal.find_bonds(&abs_atoms);

    output::print_header(&format!(
        "Bonds in {} ({} × {} × {} cells, {} atoms)",
        report.name,
        repeat[0],
        repeat[1],
        repeat[2],
        abs_atoms.len()
    ));

    if bonds.is_empty() {
        output::print_warning("No bonds found.");
        return Ok(());
    }

    let rows: Vec<BondRow> = bonds
        .iter()
        .enumerate()
        .map(|(n, &(i, j))| BondRow {
            index: n + 1,
            first: atom_label(&abs_atoms, i),
            second: atom_label(&abs_atoms, j),
            length: format!("{:.4}", bond_length(&abs_atoms, (i, j)) * BOHR_IN_ANGSTROM),
        })
        .collect();

    println!("{}", Table::new(&rows));
    output::print_done(&format!("Found {} bond(s)", bonds.len()));

    if let Some(path) = &args.output {
        save_bonds_csv(&abs_atoms, &bonds, path)?;
        output::print_success(&format!("Bond list saved to '{}'", path.display()));
    }

    Ok(())
}

/// 校验周期像数目
fn repeat_counts(values: &[usize]) -> Result<[usize; 3]> {
    match values {
        [nx, ny, nz] if *nx > 0 && *ny > 0 && *nz > 0 => Ok([*nx, *ny, *nz]),
        _ => Err(SolidStateError::InvalidArgument(format!(
            "--repeat expects three positive integers, got {:?}",
            values
        ))),
    }
}

/// 原子标签，如 "Na3"（从 1 开始）
fn atom_label(atoms: &[Atom], index: usize) -> String {
    let symbol = atoms[index].symbol().unwrap_or("X");
    format!("{}{}", symbol, index + 1)
}

/// 保存键列表到 CSV
fn save_bonds_csv(atoms: &[Atom], bonds: &[(usize, usize)], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["i", "j", "species_i", "species_j", "length_angstrom"])?;

    for &(i, j) in bonds {
        wtr.write_record(&[
            (i + 1).to_string(),
            (j + 1).to_string(),
            atoms[i].symbol().unwrap_or("X").to_string(),
            atoms[j].symbol().unwrap_or("X").to_string(),
            format!("{:.6}", bond_length(atoms, (i, j)) * BOHR_IN_ANGSTROM),
        ])?;
    }

    wtr.flush().map_err(|e| SolidStateError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_counts() {
        assert_eq!(repeat_counts(&[2, 1, 3]).unwrap(), [2, 1, 3]);
        assert!(repeat_counts(&[0, 1, 1]).is_err());
        assert!(repeat_counts(&[1, 1]).is_err());
    }

    #[test]
    fn test_atom_label() {
        let atoms = vec![Atom::new([0.0; 3], 11), Atom::new([0.0; 3], 17)];
        assert_eq!(atom_label(&atoms, 1), "Cl2");
    }
}
