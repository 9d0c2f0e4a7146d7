// crates/rf_fusion/src/lib.rs

//! RasterFuse 融合核心
//!
//! 将多个已配准的栅格图层融合为一个综合评分栅格：
//! 逐层归一化 → 熵权估计 → 加权求和，无效像元强制为零。
//!
//! # 模块
//!
//! - [`mask`]: 权威有效性掩膜解析（参考图层 / 并集 / 交集策略）
//! - [`normalize`]: 掩膜内 min-max 归一化，确定性降级处理
//! - [`entropy`]: 熵权估计，权重非负且和为 1
//! - [`combine`]: 加权融合与防御性再掩膜
//! - [`pipeline`]: 完整融合流程编排
//!
//! # 设计原则
//!
//! 1. **纯计算**: 核心组件不依赖 IO 与渲染，只操作内存数组和布尔掩膜
//! 2. **快速失败**: 形状不匹配立即报错，绝不广播或截断
//! 3. **确定性降级**: 常量层、无有效像元、全层无信息等退化情形
//!    均有确定性回退值，不会产生 NaN/Inf
//!
//! # 示例
//!
//! ```
//! use ndarray::array;
//! use rf_fusion::{entropy_weights, normalize};
//!
//! let mask = array![[true, true], [true, false]];
//! let layer = array![[1.0, 2.0], [3.0, -9999.0]];
//! let norm = normalize(&layer, &mask).unwrap();
//! let weights = entropy_weights(&[norm], &mask).unwrap();
//! assert!((weights[0] - 1.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod combine;
pub mod entropy;
pub mod mask;
pub mod normalize;
pub mod pipeline;

// 重导出常用类型
pub use combine::combine;
pub use entropy::{entropy_weights, layer_entropies, weights_from_entropies, PROP_FLOOR};
pub use mask::{resolve_mask, MaskPolicy};
pub use normalize::{normalize, normalize_with_offset, NORM_OFFSET};
pub use pipeline::{run, FusionOptions, FusionOutcome};
