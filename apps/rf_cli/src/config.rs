// apps/rf_cli/src/config.rs

//! 融合任务配置
//!
//! JSON 格式的任务描述：输入图层、参考图层、掩膜策略与输出路径。
//!
//! ```json
//! {
//!   "layers": [
//!     { "id": "building", "path": "building_density.asc" },
//!     { "id": "finance", "path": "finance_index.asc" },
//!     { "id": "population", "path": "population.asc" }
//!   ],
//!   "reference": "population",
//!   "mask_policy": "reference",
//!   "output": "fused.asc",
//!   "heatmap": "fused.png"
//! }
//! ```

use rf_foundation::error::{RfError, RfResult};
use rf_fusion::{FusionOptions, MaskPolicy, NORM_OFFSET, PROP_FLOOR};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 单个输入图层
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    /// 图层标识，用于日志与参考图层指定
    pub id: String,
    /// 栅格文件路径
    pub path: PathBuf,
}

/// 融合任务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfig {
    /// 输入图层，顺序即权重向量顺序
    pub layers: Vec<LayerSpec>,

    /// 参考图层 id
    ///
    /// 输出栅格继承该图层元数据；`reference` 掩膜策略下
    /// 其有效区域即权威掩膜。
    pub reference: String,

    /// 掩膜策略
    #[serde(default)]
    pub mask_policy: MaskPolicy,

    /// 输出栅格路径
    pub output: PathBuf,

    /// 可选的热力图输出路径
    #[serde(default)]
    pub heatmap: Option<PathBuf>,

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

impl JobConfig {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> RfResult<Self> {
        if !path.exists() {
            return Err(RfError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| RfError::serialization(format!("任务配置解析失败: {e}")))
    }

    /// 解析参考图层 id 为下标
    pub fn reference_index(&self) -> RfResult<usize> {
        self.layers
            .iter()
            .position(|l| l.id == self.reference)
            .ok_or_else(|| RfError::missing_config(format!("参考图层 id: {}", self.reference)))
    }

    /// 转换为核心融合选项
    pub fn fusion_options(&self) -> RfResult<FusionOptions> {
        Ok(FusionOptions {
            reference: self.reference_index()?,
            mask_policy: self.mask_policy,
            norm_offset: self.norm_offset,
            prop_floor: self.prop_floor,
        })
    }
}
