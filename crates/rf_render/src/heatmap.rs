// crates/rf_render/src/heatmap.rs

//! 热力图渲染
//!
//! 将融合栅格渲染为 RGB PNG：有效像元按值域拉伸后经色带着色，
//! 无效像元（恰好为 0 的掩膜外像元以及 NoData/NaN）画为背景色。

use image::RgbImage;
use rf_foundation::error::{RfError, RfResult};
use rf_raster::RasterGrid;
use std::path::Path;
use tracing::debug;

use crate::colormap::{default_heat_palette, Palette};

/// 热力图样式
#[derive(Debug, Clone)]
pub struct HeatmapStyle {
    /// 色带
    pub palette: Palette,
    /// 无效像元背景色
    pub background: [u8; 3],
    /// 值域上界；`None` 时取有效像元最大值
    pub vmax: Option<f64>,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            palette: default_heat_palette(),
            background: [240, 240, 240],
            vmax: None,
        }
    }
}

/// 渲染热力图
///
/// 融合结果的无效像元恒为 0，渲染时视作背景；
/// 有效像元按 `[0, vmax]` 线性拉伸到色带值域后采样。
pub fn render_heatmap(grid: &RasterGrid, style: &HeatmapStyle) -> RfResult<RgbImage> {
    let (rows, cols) = grid.shape();
    if rows == 0 || cols == 0 {
        return Err(RfError::invalid_input("无法渲染空栅格"));
    }

    let vmax = match style.vmax {
        Some(v) if v > 0.0 => v,
        Some(v) => {
            return Err(RfError::invalid_config(
                "vmax",
                v.to_string(),
                "值域上界必须为正",
            ));
        }
        None => grid
            .data
            .iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, |acc, &v| acc.max(v)),
    };

    let span = style.palette.vmax - style.palette.vmin;
    let mut img = RgbImage::new(cols as u32, rows as u32);
    for ((r, c), &v) in grid.data.indexed_iter() {
        let rgb = if v <= 0.0 || grid.is_nodata(v) || vmax <= 0.0 {
            style.background
        } else {
            let t = (v / vmax).clamp(0.0, 1.0);
            style.palette.sample(style.palette.vmin + t * span)
        };
        img.put_pixel(c as u32, r as u32, image::Rgb(rgb));
    }
    debug!("渲染热力图: {}x{} 像素, vmax={}", cols, rows, vmax);
    Ok(img)
}

/// 渲染并保存为 PNG
pub fn save_heatmap(
    grid: &RasterGrid,
    style: &HeatmapStyle,
    path: impl AsRef<Path>,
) -> RfResult<()> {
    let img = render_heatmap(grid, style)?;
    img.save(path.as_ref())
        .map_err(|e| RfError::io(format!("PNG 保存失败: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rf_raster::{GeoTransform, RasterMetadata};

    fn grid(data: ndarray::Array2<f64>) -> RasterGrid {
        let (rows, cols) = data.dim();
        let meta = RasterMetadata::new(cols, rows, GeoTransform::default());
        RasterGrid::from_parts(meta, data).unwrap()
    }

    #[test]
    fn test_render_dimensions() {
        let g = grid(array![[0.0, 0.5, 1.0], [0.2, 0.4, 0.6]]);
        let img = render_heatmap(&g, &HeatmapStyle::default()).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 2);
    }

    #[test]
    fn test_zero_cells_get_background() {
        let g = grid(array![[0.0, 1.0]]);
        let style = HeatmapStyle::default();
        let img = render_heatmap(&g, &style).unwrap();
        assert_eq!(img.get_pixel(0, 0).0, style.background);
        assert_ne!(img.get_pixel(1, 0).0, style.background);
    }

    #[test]
    fn test_max_value_hits_palette_top() {
        let g = grid(array![[0.0, 2.0]]);
        let style = HeatmapStyle::default();
        let img = render_heatmap(&g, &style).unwrap();
        assert_eq!(img.get_pixel(1, 0).0, style.palette.sample(1.0));
    }

    #[test]
    fn test_all_zero_grid_is_all_background() {
        let g = grid(array![[0.0, 0.0], [0.0, 0.0]]);
        let style = HeatmapStyle::default();
        let img = render_heatmap(&g, &style).unwrap();
        for p in img.pixels() {
            assert_eq!(p.0, style.background);
        }
    }

    #[test]
    fn test_invalid_vmax_rejected() {
        let g = grid(array![[1.0]]);
        let style = HeatmapStyle {
            vmax: Some(-1.0),
            ..HeatmapStyle::default()
        };
        assert!(render_heatmap(&g, &style).is_err());
    }
}
