// crates/rf_fusion/src/combine.rs

//! 加权融合
//!
//! 对归一化图层做加权求和，然后用权威掩膜再次置零无效像元。
//! 归一化阶段已经将无效像元置零，但再掩膜仍然强制执行：
//! 掩膜策略未来变化时，无效像元为零这一不变量必须在此兜底。

use ndarray::Array2;
use rf_foundation::error::{RfError, RfResult};

/// 加权融合
///
/// `fused[cell] = Σ weight_i × grids[i][cell]`，掩膜外像元强制为 0。
/// 图层数与权重数必须一致，所有形状必须一致。
pub fn combine(
    grids: &[Array2<f64>],
    weights: &[f64],
    mask: &Array2<bool>,
) -> RfResult<Array2<f64>> {
    if grids.is_empty() {
        return Err(RfError::invalid_input("融合需要至少一个图层"));
    }
    RfError::check_size("weights", grids.len(), weights.len())?;
    let shape = grids[0].dim();
    for g in &grids[1..] {
        RfError::check_shape("layer", shape, g.dim())?;
    }
    RfError::check_shape("mask", shape, mask.dim())?;

    let mut fused = Array2::<f64>::zeros(shape);
    for (grid, &w) in grids.iter().zip(weights.iter()) {
        fused.scaled_add(w, grid);
    }

    // 防御性再掩膜：无效像元必须恰好为 0
    ndarray::Zip::from(&mut fused).and(mask).for_each(|v, &m| {
        if !m {
            *v = 0.0;
        }
    });
    Ok(fused)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_weighted_sum() {
        let a = array![[1.0, 2.0]];
        let b = array![[3.0, 4.0]];
        let mask = array![[true, true]];
        let fused = combine(&[a, b], &[0.25, 0.75], &mask).unwrap();
        assert!((fused[[0, 0]] - 2.5).abs() < 1e-12);
        assert!((fused[[0, 1]] - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_masked_cells_forced_to_zero() {
        // 即使图层在掩膜外有非零值，融合结果也必须为 0
        let a = array![[1.0, 7.0]];
        let b = array![[2.0, 9.0]];
        let mask = array![[true, false]];
        let fused = combine(&[a, b], &[0.5, 0.5], &mask).unwrap();
        assert_eq!(fused[[0, 1]], 0.0);
        assert!((fused[[0, 0]] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_weight_length_mismatch() {
        let a = array![[1.0]];
        let mask = array![[true]];
        assert!(matches!(
            combine(&[a], &[0.5, 0.5], &mask),
            Err(RfError::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_layer_shape_mismatch() {
        let a = array![[1.0, 2.0]];
        let b = array![[1.0], [2.0]];
        let mask = array![[true, true]];
        assert!(matches!(
            combine(&[a, b], &[0.5, 0.5], &mask),
            Err(RfError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        let mask = array![[true]];
        assert!(matches!(
            combine(&[], &[], &mask),
            Err(RfError::InvalidInput { .. })
        ));
    }
}
