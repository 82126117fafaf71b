//! # inspect 命令实现
//!
//! 解析单个 CIF，打印晶胞参数、晶格向量、倒格矢与展开后的原子表。
//!
//! ## 依赖关系
//! - 使用 `cli/inspect.rs` 定义的参数
//! - 使用 `parsers/`, `models/`
//! - 使用 `utils/output.rs`

use crate::cli::inspect::InspectArgs;
use solidstate::error::Result;
use solidstate::models::BOHR_IN_ANGSTROM;
use solidstate::parsers;
use solidstate::utils::output;

use tabled::{Table, Tabled};

/// 原子表行
#[derive(Debug, Clone, Tabled)]
struct AtomRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Z")]
    z: u8,
    #[tabled(rename = "x")]
    x: String,
    #[tabled(rename = "y")]
    y: String,
    #[tabled(rename = "z")]
    w: String,
}

/// 执行 inspect 命令
pub fn execute(args: InspectArgs) -> Result<()> {
    let report = parsers::parse_structure_file_with(&args.file, args.dedup.to_options())?;
    super::report_warnings(&report);

    let crystal = &report.structure;
    let lattice = crystal.lattice();
    let (a, b, c, alpha, beta, gamma) = lattice.parameters();
    let volume = lattice.volume();

    output::print_header(&format!("{} ({})", report.name, crystal.formula()));

    output::print_field("Atoms", &crystal.n_atoms().to_string());
    output::print_field(
        "a, b, c (Å)",
        &format!(
            "{:.5} {:.5} {:.5}",
            a * BOHR_IN_ANGSTROM,
            b * BOHR_IN_ANGSTROM,
            c * BOHR_IN_ANGSTROM
        ),
    );
    output::print_field(
        "α, β, γ (°)",
        &format!("{:.4} {:.4} {:.4}", alpha, beta, gamma),
    );
    output::print_field(
        "Volume",
        &format!(
            "{:.4} bohr³ ({:.4} Å³)",
            volume,
            volume * BOHR_IN_ANGSTROM.powi(3)
        ),
    );
    output::print_field("Scale (bohr)", &format!("{:.6}", crystal.scale));

    output::print_header("Lattice vectors (bohr)");
    for (label, v) in ["a1", "a2", "a3"].iter().zip(crystal.lattice_vectors()) {
        output::print_field(label, &output::format_vector(&v, 6));
    }

    output::print_header("Reciprocal vectors (bohr⁻¹)");
    for (label, v) in ["b1", "b2", "b3"].iter().zip(crystal.reciprocal_vectors()) {
        output::print_field(label, &output::format_vector(&v, 6));
    }

    let rows: Vec<AtomRow> = crystal
        .atoms()
        .iter()
        .enumerate()
        .map(|(i, atom)| {
            let p = if args.cartesian {
                lattice.to_cartesian(&atom.position)
            } else {
                atom.position
            };
            AtomRow {
                index: i + 1,
                species: atom.symbol().unwrap_or("X").to_string(),
                z: atom.atomic_number,
                x: format!("{:.6}", p[0]),
                y: format!("{:.6}", p[1]),
                w: format!("{:.6}", p[2]),
            }
        })
        .collect();

    output::print_header(if args.cartesian {
        "Atoms (Cartesian, bohr)"
    } else {
        "Atoms (fractional)"
    });
    println!("{}", Table::new(&rows));

    Ok(())
}
