// crates/rf_raster/src/geo_transform.rs

//! 地理仿射变换
//!
//! 标准仿射变换六参数 (GDAL Convention)，
//! 用于描述栅格像素坐标 (Pixel/Line) 与地理空间坐标 (X/Y) 的关系：
//!
//! ```text
//! X_geo = gt[0] + pixel * gt[1] + line * gt[2]
//! Y_geo = gt[3] + pixel * gt[4] + line * gt[5]
//! ```

use serde::{Deserialize, Serialize};

/// GDAL 六参数仿射变换
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// 创建一个标准的正北朝向变换
    ///
    /// - `origin_x`, `origin_y`: 左上角坐标
    /// - `pixel_width`: 像素宽度 (正数)
    /// - `pixel_height`: 像素高度 (通常为负数，表示Y轴向下)
    pub fn new(origin_x: f64, origin_y: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self([
            origin_x,     // 0: top left x
            pixel_width,  // 1: w-e pixel resolution
            0.0,          // 2: rotation, 0 if image is "north up"
            origin_y,     // 3: top left y
            0.0,          // 4: rotation, 0 if image is "north up"
            pixel_height, // 5: n-s pixel resolution (negative)
        ])
    }

    /// 从 GDAL 六参数数组创建
    pub fn from_gdal(gt: &[f64; 6]) -> Self {
        Self(*gt)
    }

    /// 转换为 GDAL 六参数数组
    pub fn to_gdal(&self) -> [f64; 6] {
        self.0
    }

    /// 像素坐标 -> 地理坐标 (左上角原点)
    #[inline]
    pub fn pixel_to_world(&self, px: f64, py: f64) -> (f64, f64) {
        let gt = self.0;
        let x = gt[0] + px * gt[1] + py * gt[2];
        let y = gt[3] + px * gt[4] + py * gt[5];
        (x, y)
    }

    /// 地理坐标 -> 像素坐标
    ///
    /// 行列式退化（接近奇异）时返回 `None`。
    #[inline]
    pub fn world_to_pixel(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let gt = self.0;
        let det = gt[1] * gt[5] - gt[2] * gt[4];
        if det.abs() < 1e-12 {
            return None;
        }
        let dx = x - gt[0];
        let dy = y - gt[3];
        let col = (gt[5] * dx - gt[2] * dy) / det;
        let row = (-gt[4] * dx + gt[1] * dy) / det;
        Some((col, row))
    }

    /// 获取分辨率 (dx, dy)，始终为正
    #[inline]
    pub fn resolution(&self) -> (f64, f64) {
        (self.0[1].abs(), self.0[5].abs())
    }
}

impl Default for GeoTransform {
    fn default() -> Self {
        // 默认为原点 0,0，分辨率 1.0，Y轴向下
        Self([0.0, 1.0, 0.0, 0.0, 0.0, -1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_to_world() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);
        let (x, y) = gt.pixel_to_world(5.0, 3.0);
        assert_eq!(x, 150.0);
        assert_eq!(y, 170.0);
    }

    #[test]
    fn test_world_pixel_roundtrip() {
        let gt = GeoTransform::new(100.0, 200.0, 10.0, -10.0);
        let (x, y) = gt.pixel_to_world(5.0, 3.0);
        let (col, row) = gt.world_to_pixel(x, y).unwrap();
        assert!((col - 5.0).abs() < 1e-10);
        assert!((row - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_gdal_conversion() {
        let gdal_gt = [100.0, 10.0, 0.0, 200.0, 0.0, -10.0];
        let gt = GeoTransform::from_gdal(&gdal_gt);
        let back = gt.to_gdal();
        assert_eq!(gdal_gt, back);
    }

    #[test]
    fn test_singular_inverse() {
        let gt = GeoTransform([0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!(gt.world_to_pixel(1.0, 1.0).is_none());
    }

    #[test]
    fn test_resolution() {
        let gt = GeoTransform::new(0.0, 0.0, 30.0, -30.0);
        assert_eq!(gt.resolution(), (30.0, 30.0));
    }
}
