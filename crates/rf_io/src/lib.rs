// crates/rf_io/src/lib.rs

//! RasterFuse IO 模块
//!
//! 提供栅格文件的读写。融合核心不依赖本模块；
//! 本模块负责把磁盘格式转换为 [`rf_raster::RasterGrid`]，
//! 并在写出时保持与输入一致的头部元数据约定（含 NoData 值）。
//!
//! # 模块
//!
//! - [`drivers`]: 栅格驱动 (ESRI ASCII Grid)
//! - [`error`]: IO 模块错误类型
//! - [`traits`]: 驱动抽象接口
//!
//! # 使用示例
//!
//! ```rust,ignore
//! use rf_io::{open_raster, write_raster};
//!
//! let grid = open_raster("input.asc")?;
//! write_raster("output.asc", &grid)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod drivers;
pub mod error;
pub mod traits;

pub use drivers::AsciiGridDriver;
pub use error::{IoError, IoResult};
pub use traits::RasterDriver;

use rf_foundation::error::{RfError, RfResult};
use rf_raster::RasterGrid;
use std::path::Path;

/// 按扩展名打开栅格文件
///
/// 目前支持 ESRI ASCII Grid (`.asc` / `.agr`)。
/// 其他扩展名返回 [`RfError::UnsupportedFormat`]。
pub fn open_raster(path: impl AsRef<Path>) -> RfResult<RasterGrid> {
    let path = path.as_ref();
    let driver = driver_for(path)?;
    driver.read(path)
}

/// 按扩展名写出栅格文件
pub fn write_raster(path: impl AsRef<Path>, grid: &RasterGrid) -> RfResult<()> {
    let path = path.as_ref();
    let driver = driver_for(path)?;
    driver.write(path, grid)
}

fn driver_for(path: &Path) -> RfResult<Box<dyn RasterDriver>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "asc" | "agr" => Ok(Box::new(AsciiGridDriver)),
        _ => Err(RfError::unsupported_format(
            ext,
            vec!["asc".into(), "agr".into()],
        )),
    }
}
