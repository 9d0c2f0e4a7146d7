// crates/rf_raster/src/metadata.rs

//! 栅格元数据
//!
//! 轻量级元数据 (不包含大数组)，用于快速扫描文件信息，
//! 以及在融合输出时原样透传参考图层的地理参考信息。

use serde::{Deserialize, Serialize};

use crate::geo_transform::GeoTransform;

/// 栅格元数据
///
/// `crs_wkt` 为不透明的坐标系描述字符串，本项目不解析、不修改，
/// 仅在读入与写出之间透传。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterMetadata {
    /// 宽度 (像素)
    pub width: usize,
    /// 高度 (像素)
    pub height: usize,
    /// 仿射变换
    pub transform: GeoTransform,
    /// 坐标系 WKT 字符串（可选，原样透传）
    pub crs_wkt: Option<String>,
    /// NoData 值
    pub no_data_value: Option<f64>,
    /// 来源驱动名，如 "AAIGrid"
    pub driver_name: String,
}

impl RasterMetadata {
    /// 创建新的元数据
    pub fn new(width: usize, height: usize, transform: GeoTransform) -> Self {
        Self {
            width,
            height,
            transform,
            crs_wkt: None,
            no_data_value: None,
            driver_name: String::new(),
        }
    }

    /// 设置 NoData 值
    pub fn with_no_data(mut self, no_data: f64) -> Self {
        self.no_data_value = Some(no_data);
        self
    }

    /// 设置驱动名
    pub fn with_driver(mut self, name: impl Into<String>) -> Self {
        self.driver_name = name.into();
        self
    }

    /// 栅格尺寸 (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// 总像元数
    pub fn total_pixels(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_builder() {
        let meta = RasterMetadata::new(10, 5, GeoTransform::default())
            .with_no_data(-9999.0)
            .with_driver("AAIGrid");
        assert_eq!(meta.shape(), (5, 10));
        assert_eq!(meta.total_pixels(), 50);
        assert_eq!(meta.no_data_value, Some(-9999.0));
        assert_eq!(meta.driver_name, "AAIGrid");
    }
}
