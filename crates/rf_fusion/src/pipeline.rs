// crates/rf_fusion/src/pipeline.rs

//! 融合流程编排
//!
//! 串联四个核心组件：掩膜解析 → 逐层归一化 → 熵权估计 → 加权融合。
//! 输出栅格继承参考图层的地理参考元数据（原样透传）。
//!
//! 归一化按图层并行；熵权合成与加权求和需要看到全部逐层
//! 中间结果，是同步屏障。

use ndarray::Array2;
use rayon::prelude::*;
use rf_foundation::error::{RfError, RfResult};
use rf_raster::RasterGrid;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entropy::{layer_entropies, weights_from_entropies, PROP_FLOOR};
use crate::mask::{resolve_mask, MaskPolicy};
use crate::normalize::{normalize_with_offset, NORM_OFFSET};

/// 融合选项
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FusionOptions {
    /// 参考图层下标
    ///
    /// 输出栅格继承该图层的元数据；`Reference` 掩膜策略下
    /// 该图层的有效区域同时是权威掩膜。
    #[serde(default)]
    pub reference: usize,

    /// 掩膜解析策略
    #[serde(default)]
    pub mask_policy: MaskPolicy,

    /// 归一化偏移量 ε
    #[serde(default = "default_norm_offset")]
    pub norm_offset: f64,

    /// 熵计算的比例下限
    #[serde(default = "default_prop_floor")]
    pub prop_floor: f64,
}

fn default_norm_offset() -> f64 {
    NORM_OFFSET
}

fn default_prop_floor() -> f64 {
    PROP_FLOOR
}

impl Default for FusionOptions {
    fn default() -> Self {
        Self {
            reference: 0,
            mask_policy: MaskPolicy::default(),
            norm_offset: NORM_OFFSET,
            prop_floor: PROP_FLOOR,
        }
    }
}

impl FusionOptions {
    /// 校验选项取值
    pub fn validate(&self, n_layers: usize) -> RfResult<()> {
        if self.reference >= n_layers {
            return Err(RfError::invalid_config(
                "reference",
                self.reference.to_string(),
                format!("参考图层下标超出范围 0..{n_layers}"),
            ));
        }
        if self.norm_offset <= 0.0 {
            return Err(RfError::invalid_config(
                "norm_offset",
                self.norm_offset.to_string(),
                "归一化偏移必须为正",
            ));
        }
        if self.prop_floor <= 0.0 {
            return Err(RfError::invalid_config(
                "prop_floor",
                self.prop_floor.to_string(),
                "比例下限必须为正",
            ));
        }
        Ok(())
    }
}

/// 融合结果
#[derive(Debug, Clone)]
pub struct FusionOutcome {
    /// 融合后的栅格，元数据继承自参考图层
    pub fused: RasterGrid,
    /// 每个图层的权重，与输入顺序一致
    pub weights: Vec<f64>,
    /// 每个图层的归一化熵
    pub entropies: Vec<f64>,
    /// 权威掩膜内的有效像元数
    pub valid_cells: usize,
}

/// 执行完整融合流程
///
/// 输入图层必须已配准（形状一致）。掩膜解析、归一化、熵权、
/// 融合的全部降级分支都在组件内确定性处理，
/// 只有形状不匹配和非法配置会作为错误传播。
pub fn run(layers: &[RasterGrid], options: &FusionOptions) -> RfResult<FusionOutcome> {
    if layers.is_empty() {
        return Err(RfError::invalid_input("融合需要至少一个图层"));
    }
    options.validate(layers.len())?;

    let (rows, cols) = layers[0].shape();
    info!(
        "融合流程启动: {} 个图层, {}x{} 像元, 掩膜策略 {}",
        layers.len(),
        rows,
        cols,
        options.mask_policy.name()
    );

    // 1. 权威掩膜
    let mask = resolve_mask(layers, options.mask_policy, options.reference)?;
    let valid_cells = mask.iter().filter(|&&m| m).count();
    debug!("权威掩膜: {}/{} 有效像元", valid_cells, rows * cols);

    // 2. 逐层归一化（图层间独立，可并行）
    let normalized: Vec<Array2<f64>> = layers
        .par_iter()
        .map(|layer| normalize_with_offset(&layer.data, &mask, options.norm_offset))
        .collect::<RfResult<_>>()?;

    // 3. 熵权估计（屏障：需要全部归一化图层）
    let entropies = layer_entropies(&normalized, &mask, options.prop_floor)?;
    let weights = weights_from_entropies(&entropies);
    for (i, (e, w)) in entropies.iter().zip(weights.iter()).enumerate() {
        debug!("图层 {}: 熵={:.6}, 权重={:.6}", i, e, w);
    }

    // 4. 加权融合 + 再掩膜
    let fused_data = crate::combine::combine(&normalized, &weights, &mask)?;

    // 输出继承参考图层元数据，透传不修改
    let fused = layers[options.reference].with_data(fused_data)?;

    info!("融合完成: {} 有效像元", valid_cells);
    Ok(FusionOutcome {
        fused,
        weights,
        entropies,
        valid_cells,
    })
}
