// crates/rf_fusion/src/entropy.rs

//! 熵权估计
//!
//! 依据熵值法为每个归一化图层计算客观权重：
//! 图层内像元值分布越分散（熵越低），该图层携带的判别信息越多，
//! 权重越大。输出权重非负且和为 1，与输入图层顺序一致。
//!
//! # 降级处理
//!
//! - 单有效像元图层：熵按约定取 1（最大熵，不贡献权重）
//! - 无有效像元图层：同上，熵取 1
//! - 所有图层熵均为 1（全部无判别信息）：权重均分

use ndarray::Array2;
use rayon::prelude::*;
use rf_foundation::error::{RfError, RfResult};
use rf_foundation::float::SAFE_DIV_EPSILON;

/// 比例下限
///
/// 取对数前将过小的比例钳位到该下限，避免 log(0) = -inf。
/// 归一化的 ε 偏移已保证有效像元为正，但有效像元数量极大时
/// 浮点下溢仍可能产生零比例，因此钳位无条件执行。
pub const PROP_FLOOR: f64 = 1e-4;

/// 计算单个图层的归一化熵
///
/// `e = -Σ(p·ln p) / ln(n)`，p 为各有效像元占掩膜内总和的比例。
/// 有效像元数不足两个时 `ln(n)` 退化，按约定返回最大熵 1。
pub fn layer_entropy(
    grid: &Array2<f64>,
    mask: &Array2<bool>,
    floor: f64,
) -> RfResult<f64> {
    RfError::check_shape("mask", grid.dim(), mask.dim())?;

    let mut sum = 0.0;
    let mut n_valid = 0usize;
    for (&v, &m) in grid.iter().zip(mask.iter()) {
        if m {
            sum += v;
            n_valid += 1;
        }
    }

    // 单像元时 ln(1) = 0 导致除法无定义；零像元无比例可言。
    // 两种情形都不携带判别信息，约定为最大熵。
    if n_valid < 2 {
        return Ok(1.0);
    }
    // 全零图层同样无信息
    if sum < SAFE_DIV_EPSILON {
        return Ok(1.0);
    }

    let ln_n = (n_valid as f64).ln();
    let mut acc = 0.0;
    for (&v, &m) in grid.iter().zip(mask.iter()) {
        if !m {
            continue;
        }
        let p = (v / sum).max(floor);
        acc += p * p.ln();
    }
    Ok(-acc / ln_n)
}

/// 并行计算每个图层的归一化熵
///
/// 图层间相互独立，使用 rayon 并行；权重合成阶段是同步屏障。
pub fn layer_entropies(
    grids: &[Array2<f64>],
    mask: &Array2<bool>,
    floor: f64,
) -> RfResult<Vec<f64>> {
    if grids.is_empty() {
        return Err(RfError::invalid_input("熵权估计需要至少一个图层"));
    }
    grids
        .par_iter()
        .map(|g| layer_entropy(g, mask, floor))
        .collect()
}

/// 由各图层熵合成权重向量
///
/// `d_i = 1 - e_i`（钳位非负），`w_i = d_i / Σd`。
/// Σd 为零（所有图层均无判别信息）时权重均分，而不是除以零。
pub fn weights_from_entropies(entropies: &[f64]) -> Vec<f64> {
    let diversities: Vec<f64> = entropies.iter().map(|&e| (1.0 - e).max(0.0)).collect();
    let total: f64 = diversities.iter().sum();

    if total < SAFE_DIV_EPSILON {
        let equal = 1.0 / entropies.len() as f64;
        return vec![equal; entropies.len()];
    }
    diversities.iter().map(|&d| d / total).collect()
}

/// 熵权估计
///
/// 返回与 `grids` 同序的权重向量，保证所有分支下
/// 权重非负且和为 1（浮点容差内）。
pub fn entropy_weights(grids: &[Array2<f64>], mask: &Array2<bool>) -> RfResult<Vec<f64>> {
    let entropies = layer_entropies(grids, mask, PROP_FLOOR)?;
    Ok(weights_from_entropies(&entropies))
}
