//! crates/rf_fusion/tests/degenerate_grids.rs
//!
//! 退化输入与端到端融合验证测试
//!
//! 本模块覆盖融合核心在退化输入下的确定性行为：
//! - 常量图层与单有效像元图层
//! - 掩膜外像元强制为零
//! - 权重向量在所有分支下非负且和为 1
//! - 端到端场景与单图层往返一致性

use ndarray::{array, Array2};
use rf_fusion::{
    combine, entropy_weights, normalize, run, FusionOptions, MaskPolicy, NORM_OFFSET,
};
use rf_raster::{GeoTransform, RasterGrid, RasterMetadata};

// ============================================================
// 常量与辅助设施
// ============================================================

/// 权重求和校验容差
const WEIGHT_TOL: f64 = 1e-9;

/// NoData 哨兵值
const NODATA: f64 = -9999.0;

/// 构建测试栅格（行优先数据 + 哨兵 NoData）
fn make_grid(data: Array2<f64>) -> RasterGrid {
    let (rows, cols) = data.dim();
    let meta = RasterMetadata::new(cols, rows, GeoTransform::new(0.0, 120.0, 30.0, -30.0))
        .with_no_data(NODATA)
        .with_driver("AAIGrid");
    RasterGrid::from_parts(meta, data).unwrap()
}

/// 4x4 掩膜：最后一行无效
fn mask_without_last_row() -> Array2<bool> {
    let mut mask = Array2::from_elem((4, 4), true);
    for c in 0..4 {
        mask[[3, c]] = false;
    }
    mask
}

// ============================================================
// 端到端场景（三图层，最后一行掩膜外）
// ============================================================

#[test]
fn end_to_end_constant_layer_contributes_no_weight() {
    let mask = mask_without_last_row();

    // 图层 A 在有效区域内为常量 5
    let a = Array2::from_elem((4, 4), 5.0);
    // 图层 B、C 有变化
    let b = array![
        [1.0, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
        [NODATA, NODATA, NODATA, NODATA]
    ];
    let c = array![
        [100.0, 1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 50.0],
        [NODATA, NODATA, NODATA, NODATA]
    ];

    // 归一化：常量层在有效像元处为 ε，掩膜外为 0
    let norm_a = normalize(&a, &mask).unwrap();
    for ((r, _), &v) in norm_a.indexed_iter() {
        if r < 3 {
            assert_eq!(v, NORM_OFFSET);
        } else {
            assert_eq!(v, 0.0);
        }
    }

    let norm_b = normalize(&b, &mask).unwrap();
    let norm_c = normalize(&c, &mask).unwrap();

    // 常量层熵为 1（最均匀），其他层有变化时其权重为 0
    let weights = entropy_weights(
        &[norm_a.clone(), norm_b.clone(), norm_c.clone()],
        &mask,
    )
    .unwrap();
    let sum: f64 = weights.iter().sum();
    assert!((sum - 1.0).abs() < WEIGHT_TOL);
    assert!(weights[0].abs() < WEIGHT_TOL, "常量层权重应为 0");
    assert!(weights[1] > 0.0);
    assert!(weights[2] > 0.0);

    // 融合输出在掩膜外的整行必须为 0
    let fused = combine(&[norm_a, norm_b, norm_c], &weights, &mask).unwrap();
    for c_idx in 0..4 {
        assert_eq!(fused[[3, c_idx]], 0.0);
    }
    // 有效区域内为正
    for r in 0..3 {
        for c_idx in 0..4 {
            assert!(fused[[r, c_idx]] > 0.0);
        }
    }
}

#[test]
fn end_to_end_pipeline_masks_last_row() {
    let a = Array2::from_elem((4, 4), 5.0);
    let mut b = Array2::zeros((4, 4));
    let mut c = Array2::zeros((4, 4));
    for ((r, col), v) in b.indexed_iter_mut() {
        *v = (r * 4 + col) as f64;
    }
    for ((r, col), v) in c.indexed_iter_mut() {
        *v = ((r as i64 - col as i64) * (r as i64 - col as i64)) as f64;
    }
    // 参考图层（B）最后一行为 NoData，Reference 策略由它决定掩膜
    for col in 0..4 {
        b[[3, col]] = NODATA;
    }

    let layers = vec![make_grid(a), make_grid(b), make_grid(c)];
    let options = FusionOptions {
        reference: 1,
        mask_policy: MaskPolicy::Reference,
        ..FusionOptions::default()
    };
    let outcome = run(&layers, &options).unwrap();

    assert_eq!(outcome.valid_cells, 12);
    for col in 0..4 {
        assert_eq!(outcome.fused.data[[3, col]], 0.0);
    }
    let sum: f64 = outcome.weights.iter().sum();
    assert!((sum - 1.0).abs() < WEIGHT_TOL);
    // 常量层 A 的熵为 1
    assert!((outcome.entropies[0] - 1.0).abs() < WEIGHT_TOL);
    assert!(outcome.weights[0].abs() < WEIGHT_TOL);
}

// ============================================================
// 单图层往返一致性
// ============================================================

#[test]
fn roundtrip_unit_weight_equals_normalize() {
    let mask = mask_without_last_row();
    let grid = array![
        [1.0, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
        [13.0, 14.0, 15.0, 16.0]
    ];
    let norm = normalize(&grid, &mask).unwrap();

    // 两个零权重的退化图层不得影响结果
    let zeros = Array2::zeros((4, 4));
    let fused = combine(
        &[norm.clone(), zeros.clone(), zeros],
        &[1.0, 0.0, 0.0],
        &mask,
    )
    .unwrap();

    for (a, b) in fused.iter().zip(norm.iter()) {
        assert_eq!(a, b, "权重 [1,0,0] 下融合结果必须与归一化结果逐像元一致");
    }
}

// ============================================================
// 退化图层
// ============================================================

#[test]
fn single_valid_cell_layer_gets_zero_weight() {
    // 约定：单有效像元图层取最大熵（熵 1，权重贡献 0）。
    // 原始实现对该情形留下 ln(1) 除零，此处固定为显式约定并以测试锁定。
    let mut mask = Array2::from_elem((2, 2), false);
    mask[[0, 0]] = true;

    let single = array![[42.0, 0.0], [0.0, 0.0]];
    let varied = array![[1.0, 9.0], [4.0, 2.0]];

    let norm_single = normalize(&single, &mask).unwrap();
    let norm_varied = normalize(&varied, &mask).unwrap();

    let weights = entropy_weights(&[norm_single, norm_varied], &mask).unwrap();
    let sum: f64 = weights.iter().sum();
    assert!((sum - 1.0).abs() < WEIGHT_TOL);
    assert!(weights.iter().all(|&w| w >= 0.0));
}

#[test]
fn all_invalid_mask_still_produces_unit_weight_sum() {
    let mask = Array2::from_elem((2, 2), false);
    let a = normalize(&array![[1.0, 2.0], [3.0, 4.0]], &mask).unwrap();
    let b = normalize(&array![[4.0, 3.0], [2.0, 1.0]], &mask).unwrap();

    // 全部图层无判别信息：权重均分而不是除以零
    let weights = entropy_weights(&[a.clone(), b.clone()], &mask).unwrap();
    assert_eq!(weights, vec![0.5, 0.5]);

    // 融合结果处处为 0（掩膜全假）
    let fused = combine(&[a, b], &weights, &mask).unwrap();
    assert!(fused.iter().all(|&v| v == 0.0));
}

#[test]
fn pixel_identical_layers_share_weight_equally() {
    let mask = Array2::from_elem((3, 3), true);
    let mut base = Array2::zeros((3, 3));
    for ((r, c), v) in base.indexed_iter_mut() {
        *v = (r * 3 + c) as f64 * 1.5;
    }
    let norm = normalize(&base, &mask).unwrap();
    let layers = vec![norm.clone(), norm.clone(), norm.clone(), norm];

    let weights = entropy_weights(&layers, &mask).unwrap();
    for &w in &weights {
        assert!((w - 0.25).abs() < WEIGHT_TOL);
    }
}

#[test]
fn normalized_range_is_strict_on_valid_cells() {
    let mask = mask_without_last_row();
    let mut grid = Array2::zeros((4, 4));
    for ((r, c), v) in grid.indexed_iter_mut() {
        *v = ((r * 4 + c) as f64).powi(2);
    }
    let norm = normalize(&grid, &mask).unwrap();

    for ((r, _), &v) in norm.indexed_iter() {
        if r < 3 {
            assert!(v > 0.0 && v <= 1.0 + NORM_OFFSET);
        } else {
            assert_eq!(v, 0.0);
        }
    }
}
