// crates/rf_fusion/src/normalize.rs

//! 掩膜内 min-max 归一化
//!
//! 将输入栅格在权威掩膜的有效区域上重缩放到 (ε, 1+ε]，
//! 无效像元置零。ε 偏移保证每个有效像元的归一化值严格大于零，
//! 熵权估计对派生比例取对数时依赖这一性质。
//!
//! # 降级处理
//!
//! - 无任何有效像元：返回全 ε 常量栅格
//! - 常量图层 (max == min)：有效像元为 ε，无效像元为 0

use ndarray::Array2;
use rf_foundation::error::{RfError, RfResult};

/// 归一化偏移量 ε
///
/// 策略常量。保证有效像元的归一化值严格为正。
pub const NORM_OFFSET: f64 = 1e-4;

/// 掩膜内 min-max 归一化（默认 ε 偏移）
pub fn normalize(grid: &Array2<f64>, mask: &Array2<bool>) -> RfResult<Array2<f64>> {
    normalize_with_offset(grid, mask, NORM_OFFSET)
}

/// 掩膜内 min-max 归一化
///
/// 对每个有效像元计算 `(v - min) / (max - min) + offset`，
/// 无效像元置零。`min`/`max` 仅在掩膜内统计，
/// 无效但数值合法的哨兵值不会泄漏进值域。
pub fn normalize_with_offset(
    grid: &Array2<f64>,
    mask: &Array2<bool>,
    offset: f64,
) -> RfResult<Array2<f64>> {
    RfError::check_shape("mask", grid.dim(), mask.dim())?;

    // 掩膜内 min/max 扫描
    let mut min_val = f64::MAX;
    let mut max_val = f64::MIN;
    let mut n_valid = 0usize;
    for (&v, &m) in grid.iter().zip(mask.iter()) {
        if !m {
            continue;
        }
        if v < min_val {
            min_val = v;
        }
        if v > max_val {
            max_val = v;
        }
        n_valid += 1;
    }

    // 降级：没有任何有效像元
    if n_valid == 0 {
        return Ok(Array2::from_elem(grid.dim(), offset));
    }

    // 降级：常量图层，值域塌缩为一点
    if max_val == min_val {
        let mut out = Array2::from_elem(grid.dim(), offset);
        ndarray::Zip::from(&mut out).and(mask).for_each(|v, &m| {
            if !m {
                *v = 0.0;
            }
        });
        return Ok(out);
    }

    let range = max_val - min_val;
    let mut out = Array2::zeros(grid.dim());
    ndarray::Zip::from(&mut out)
        .and(grid)
        .and(mask)
        .for_each(|o, &v, &m| {
            if m {
                *o = (v - min_val) / range + offset;
            }
        });
    Ok(out)
}
