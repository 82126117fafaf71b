//! # 数据模型模块
//!
//! 定义晶格、原子结构与模拟结果数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `symmetry/`, `bonds.rs` 和 `commands/` 使用
//! - 子模块: lattice, structure, spectra

pub mod lattice;
pub mod spectra;
pub mod structure;

pub use lattice::{calculate_lattice_vectors, Lattice, BOHR_IN_ANGSTROM};
pub use spectra::{BandGap, BandStructure, BandStructureKind, DielectricComponent, OpticalSpectrum};
pub use structure::{Atom, CoordinateKind, CrystalStructure, MolecularStructure};
