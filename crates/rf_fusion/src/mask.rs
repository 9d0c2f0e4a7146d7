// crates/rf_fusion/src/mask.rs

//! 权威有效性掩膜解析
//!
//! 每次融合运行有且仅有一个权威掩膜，下游的归一化、熵权和融合
//! 全部使用该掩膜。掩膜来源是显式配置项，不是隐式默认：
//!
//! - `Reference`: 以指定参考图层的有效区域为准（原始行为，默认策略）。
//!   参考图层的有效区域被视为本次计算的安全超集。
//! - `Union`: 任一图层有效即有效
//! - `Intersection`: 所有图层均有效才有效

use ndarray::Array2;
use rf_foundation::error::{RfError, RfResult};
use rf_raster::RasterGrid;
use serde::{Deserialize, Serialize};

/// 掩膜解析策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskPolicy {
    /// 参考图层的有效性掩膜为权威掩膜
    #[default]
    Reference,
    /// 各图层掩膜的并集
    Union,
    /// 各图层掩膜的交集
    Intersection,
}

impl MaskPolicy {
    /// 获取策略名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reference => "reference",
            Self::Union => "union",
            Self::Intersection => "intersection",
        }
    }
}

/// 解析权威有效性掩膜
///
/// `reference` 为参考图层下标，仅在 [`MaskPolicy::Reference`] 下使用。
/// 所有图层必须已配准（形状一致），否则返回 [`RfError::ShapeMismatch`]。
pub fn resolve_mask(
    layers: &[RasterGrid],
    policy: MaskPolicy,
    reference: usize,
) -> RfResult<Array2<bool>> {
    if layers.is_empty() {
        return Err(RfError::invalid_input("掩膜解析需要至少一个图层"));
    }
    let shape = layers[0].shape();
    for layer in &layers[1..] {
        RfError::check_shape("layer", shape, layer.shape())?;
    }

    match policy {
        MaskPolicy::Reference => {
            let layer = layers.get(reference).ok_or_else(|| {
                RfError::invalid_config(
                    "reference",
                    reference.to_string(),
                    format!("参考图层下标超出范围 0..{}", layers.len()),
                )
            })?;
            Ok(layer.validity_mask())
        }
        MaskPolicy::Union => {
            let mut mask = Array2::from_elem(shape, false);
            for layer in layers {
                let m = layer.validity_mask();
                ndarray::Zip::from(&mut mask).and(&m).for_each(|acc, &v| {
                    *acc = *acc || v;
                });
            }
            Ok(mask)
        }
        MaskPolicy::Intersection => {
            let mut mask = Array2::from_elem(shape, true);
            for layer in layers {
                let m = layer.validity_mask();
                ndarray::Zip::from(&mut mask).and(&m).for_each(|acc, &v| {
                    *acc = *acc && v;
                });
            }
            Ok(mask)
        }
    }
}
