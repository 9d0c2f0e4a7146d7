// crates/rf_io/src/traits.rs

//! 栅格驱动抽象接口

use rf_foundation::error::RfResult;
use rf_raster::{RasterGrid, RasterMetadata};
use std::path::Path;

/// 栅格驱动 trait
///
/// 每种磁盘格式实现一个驱动。读取产出 [`RasterGrid`]，
/// 写出时保持该格式的头部元数据约定（含 NoData 值）。
pub trait RasterDriver: Send + Sync {
    /// 仅读取元数据 (快速)
    fn read_metadata(&self, path: &Path) -> RfResult<RasterMetadata>;

    /// 读取完整栅格
    fn read(&self, path: &Path) -> RfResult<RasterGrid>;

    /// 写出完整栅格
    fn write(&self, path: &Path, grid: &RasterGrid) -> RfResult<()>;

    /// 是否支持该扩展名
    fn supports_extension(&self, ext: &str) -> bool;
}
