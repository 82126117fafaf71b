//! # 能带与光谱结果模型
//!
//! 模拟输出的下游结果对象：能带结构（含带隙判定）与介电函数光谱。
//!
//! ## 依赖关系
//! - 被外部调用方（可视化、引擎适配层）使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 判定间接带隙的容差 (eV)
const INDIRECT_GAP_TOLERANCE: f64 = 0.01;

/// 单条能带：(k 路径坐标, 能量)，能量以费米能级为零点
pub type Band = Vec<(f64, f64)>;

/// 能带结构类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandStructureKind {
    Electronic,
    Phonon,
}

/// 带隙
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandGap {
    /// 带隙大小 (eV)
    pub energy: f64,
    /// 直接带隙所在 k 点；间接带隙为 None
    pub k: Option<f64>,
}

/// 能带结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandStructure {
    pub bands: Vec<Band>,
    pub special_k_points: Vec<(f64, String)>,
    pub kind: BandStructureKind,
    /// 金属或无法判定时为 None
    pub bandgap: Option<BandGap>,
}

impl BandStructure {
    pub fn new(
        bands: Vec<Band>,
        special_k_points: Vec<(f64, String)>,
        kind: BandStructureKind,
    ) -> Self {
        let bandgap = find_bandgap(&bands);
        BandStructure {
            bands,
            special_k_points,
            kind,
            bandgap,
        }
    }

    pub fn is_metallic(&self) -> bool {
        self.bandgap.is_none()
    }
}

fn max_energy(band: &Band) -> f64 {
    band.iter().map(|&(_, e)| e).fold(f64::NEG_INFINITY, f64::max)
}

fn min_energy(band: &Band) -> f64 {
    band.iter().map(|&(_, e)| e).fold(f64::INFINITY, f64::min)
}

/// 自下而上寻找第一条含正能量的能带作为导带
///
/// 若某条能带跨越零点则视为金属，返回 None。
fn find_bandgap(bands: &[Band]) -> Option<BandGap> {
    let mut pair = None;

    for window in bands.windows(2) {
        let (valence, conduction) = (&window[0], &window[1]);
        if conduction.is_empty() || valence.is_empty() {
            return None;
        }
        if max_energy(valence) > 0.0 && min_energy(valence) < 0.0 {
            return None;
        }
        if max_energy(conduction) > 0.0 && min_energy(conduction) < 0.0 {
            return None;
        }
        if max_energy(conduction) > 0.0 {
            pair = Some((valence, conduction));
            break;
        }
    }

    let (valence, conduction) = pair?;

    // 直接带隙
    let (direct_gap, k_direct) = valence
        .iter()
        .zip(conduction.iter())
        .map(|(&(k, ev), &(_, ec))| (ec - ev, k))
        .fold((f64::INFINITY, 0.0), |best, cur| {
            if cur.0 < best.0 {
                cur
            } else {
                best
            }
        });

    // 间接带隙
    let indirect_gap = min_energy(conduction) - max_energy(valence);
    if (indirect_gap - direct_gap).abs() > INDIRECT_GAP_TOLERANCE {
        Some(BandGap {
            energy: indirect_gap,
            k: None,
        })
    } else {
        Some(BandGap {
            energy: direct_gap,
            k: Some(k_direct),
        })
    }
}

/// 介电函数分量：各向同性，或对角张量 (11, 22, 33)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DielectricComponent {
    Isotropic(Vec<f64>),
    Diagonal([Vec<f64>; 3]),
}

impl DielectricComponent {
    /// 各向同性平均值
    pub fn average(&self) -> Vec<f64> {
        match self {
            DielectricComponent::Isotropic(values) => values.clone(),
            DielectricComponent::Diagonal([xx, yy, zz]) => xx
                .iter()
                .zip(yy)
                .zip(zz)
                .map(|((a, b), c)| (a + b + c) / 3.0)
                .collect(),
        }
    }

    /// 对角分量，各向同性时返回 None
    pub fn diagonal(&self) -> Option<&[Vec<f64>; 3]> {
        match self {
            DielectricComponent::Diagonal(d) => Some(d),
            DielectricComponent::Isotropic(_) => None,
        }
    }
}

/// 光学谱
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpticalSpectrum {
    /// 能量 (eV)
    pub energy: Vec<f64>,
    pub epsilon2: DielectricComponent,
    pub epsilon1: Option<DielectricComponent>,
}

impl OpticalSpectrum {
    pub fn new(
        energy: Vec<f64>,
        epsilon2: DielectricComponent,
        epsilon1: Option<DielectricComponent>,
    ) -> Self {
        OpticalSpectrum {
            energy,
            epsilon2,
            epsilon1,
        }
    }

    /// 虚部的各向同性平均
    pub fn epsilon2_average(&self) -> Vec<f64> {
        self.epsilon2.average()
    }

    /// 实部的各向同性平均
    pub fn epsilon1_average(&self) -> Option<Vec<f64>> {
        self.epsilon1.as_ref().map(DielectricComponent::average)
    }
}
