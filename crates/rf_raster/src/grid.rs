// crates/rf_raster/src/grid.rs

//! 栅格网格
//!
//! 完整的地理栅格数据对象：元数据 + 二维数据数组。
//! 所有 IO 驱动最终都要产出这个结构，融合核心以只读方式消费它。
//!
//! # 约定
//!
//! - Row-Major (行优先), 索引 `[row, col]`
//! - 无效像元判定：NaN，或与 NoData 值之差小于容差

use ndarray::Array2;
use rf_foundation::error::{RfError, RfResult};
use rf_foundation::float::NODATA_EPSILON;

use crate::metadata::RasterMetadata;

/// 有效区域统计信息
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidStats {
    /// 有效像元最小值
    pub min: f64,
    /// 有效像元最大值
    pub max: f64,
    /// 有效像元均值
    pub mean: f64,
    /// 有效像元数量
    pub count: usize,
}

/// 地理栅格数据
#[derive(Debug, Clone)]
pub struct RasterGrid {
    /// 元数据信息
    pub meta: RasterMetadata,
    /// 实际的二维数据数组，约定 `[row, col]`
    pub data: Array2<f64>,
}

impl RasterGrid {
    /// 从元数据和数据数组创建
    ///
    /// 数组形状必须与元数据声明的尺寸一致。
    pub fn from_parts(meta: RasterMetadata, data: Array2<f64>) -> RfResult<Self> {
        let (rows, cols) = data.dim();
        RfError::check_shape("raster data", meta.shape(), (rows, cols))?;
        Ok(Self { meta, data })
    }

    /// 栅格尺寸 (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// 判断是否为无数据值
    #[inline]
    pub fn is_nodata(&self, value: f64) -> bool {
        if value.is_nan() {
            return true;
        }
        match self.meta.no_data_value {
            Some(nd) if nd.is_finite() => (value - nd).abs() < NODATA_EPSILON,
            _ => false,
        }
    }

    /// 计算有效性掩膜
    ///
    /// `true` 表示该像元为有效数据。
    pub fn validity_mask(&self) -> Array2<bool> {
        self.data.map(|&v| !self.is_nodata(v))
    }

    /// 获取数据统计信息 (Min, Max, Mean) —— 仅统计有效像元
    ///
    /// 没有任何有效像元时返回 `None`。
    pub fn valid_stats(&self) -> Option<ValidStats> {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut sum = 0.0;
        let mut count = 0usize;

        for &v in self.data.iter() {
            if self.is_nodata(v) {
                continue;
            }
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
            sum += v;
            count += 1;
        }

        if count == 0 {
            return None;
        }
        Some(ValidStats {
            min,
            max,
            mean: sum / count as f64,
            count,
        })
    }

    /// 用相同的地理参考元数据包装一个新的数据数组
    ///
    /// 用于融合输出：结果栅格继承参考图层的元数据，数据被替换。
    pub fn with_data(&self, data: Array2<f64>) -> RfResult<Self> {
        let (rows, cols) = data.dim();
        RfError::check_shape("derived raster", self.shape(), (rows, cols))?;
        Ok(Self {
            meta: self.meta.clone(),
            data,
        })
    }
}
