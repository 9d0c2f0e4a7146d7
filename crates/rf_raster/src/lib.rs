// crates/rf_raster/src/lib.rs

//! RasterFuse 栅格数据模型
//!
//! 提供栅格图层的内存表示：仿射变换、元数据和二维数据数组。
//!
//! # 模块
//!
//! - [`geo_transform`]: GDAL 六参数仿射变换
//! - [`metadata`]: 栅格元数据（尺寸、变换、坐标系 WKT、NoData 值）
//! - [`grid`]: 栅格网格（元数据 + `Array2<f64>`）、有效性掩膜与统计
//!
//! # 约定
//!
//! - 数据按行优先存储，索引为 `[row, col]`
//! - 坐标系 WKT 作为不透明字符串原样透传，本层不做任何 CRS 解析
//!
//! # 示例
//!
//! ```
//! use ndarray::array;
//! use rf_raster::{GeoTransform, RasterGrid, RasterMetadata};
//!
//! let meta = RasterMetadata::new(2, 2, GeoTransform::default());
//! let grid = RasterGrid::from_parts(meta, array![[1.0, 2.0], [3.0, 4.0]]).unwrap();
//! assert_eq!(grid.shape(), (2, 2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod geo_transform;
pub mod grid;
pub mod metadata;

// 重导出常用类型
pub use geo_transform::GeoTransform;
pub use grid::{RasterGrid, ValidStats};
pub use metadata::RasterMetadata;
