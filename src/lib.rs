//! # solidstate - 固体结构几何库
//!
//! 读取 CIF 晶体结构，重建对称展开的完整晶胞，并提供晶格几何、
//! 成键拓扑以及能带/光谱数据模型。所有长度均为原子单位（bohr）。
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── parsers/    (CIF 解析)
//!   │     └── symmetry/ (对称操作解析、展开与去重)
//!   ├── models/     (晶格、结构、能带与光谱)
//!   ├── bonds.rs    (共价半径成键判据)
//!   ├── data/       (元素周期表、共价半径表)
//!   ├── batch/      (批量并行处理)
//!   ├── utils/      (终端输出、进度条)
//!   └── error.rs    (错误处理)
//! ```

pub mod batch;
pub mod bonds;
pub mod data;
pub mod error;
pub mod models;
pub mod parsers;
pub mod symmetry;
pub mod utils;

pub use error::{ParseWarning, Result, SolidStateError};
pub use models::{
    Atom, BandStructure, CoordinateKind, CrystalStructure, Lattice, MolecularStructure,
    OpticalSpectrum, BOHR_IN_ANGSTROM,
};
pub use parsers::{parse_structure_file, ParseReport, StructureParser};
pub use symmetry::{DedupMetric, ExpansionOptions, SymmetryOperator};
