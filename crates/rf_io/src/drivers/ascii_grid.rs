// crates/rf_io/src/drivers/ascii_grid.rs

//! ESRI ASCII Grid 驱动
//!
//! 读写 `.asc` / `.agr` 文件。格式为 6 行头部 + 行优先数据体：
//!
//! ```text
//! ncols        4
//! nrows        3
//! xllcorner    100.0
//! yllcorner    200.0
//! cellsize     30.0
//! NODATA_value -9999
//! 1.0 2.0 3.0 4.0
//! ...
//! ```
//!
//! 数据体首行对应栅格最北一行；`yllcorner` 为左下角，
//! 因此仿射变换的原点 y = yllcorner + nrows × cellsize。
//! 写出时保持同样的头部约定，NoData 值原样透传。

use ndarray::Array2;
use rf_foundation::error::RfResult;
use rf_raster::{GeoTransform, RasterGrid, RasterMetadata};
use std::path::Path;
use tracing::debug;

use crate::error::{IoError, IoResult};
use crate::traits::RasterDriver;

/// 驱动名
pub const DRIVER_NAME: &str = "AAIGrid";

/// ESRI ASCII Grid 驱动
pub struct AsciiGridDriver;

impl RasterDriver for AsciiGridDriver {
    fn read_metadata(&self, path: &Path) -> RfResult<RasterMetadata> {
        let content = std::fs::read_to_string(path).map_err(IoError::Io)?;
        let (meta, _) = parse_header(&content, path)?;
        Ok(meta)
    }

    fn read(&self, path: &Path) -> RfResult<RasterGrid> {
        let content = std::fs::read_to_string(path).map_err(IoError::Io)?;
        let grid = parse_ascii_grid(&content, path)?;
        debug!(
            "读取 {}: {}x{} 像元, NoData={:?}",
            path.display(),
            grid.meta.height,
            grid.meta.width,
            grid.meta.no_data_value
        );
        Ok(grid)
    }

    fn write(&self, path: &Path, grid: &RasterGrid) -> RfResult<()> {
        let content = format_ascii_grid(grid);
        std::fs::write(path, content).map_err(IoError::Io)?;
        debug!("写出 {}", path.display());
        Ok(())
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "asc" | "agr")
    }
}

// ============================================================================
// 解析
// ============================================================================

/// 解析头部，返回元数据和数据体起始行号（0 基）
///
/// 数据体可能为空（纯头部文件），此时起始行号为总行数。
fn parse_header(content: &str, path: &Path) -> IoResult<(RasterMetadata, usize)> {
    let mut ncols: Option<usize> = None;
    let mut nrows: Option<usize> = None;
    let mut xll: Option<f64> = None;
    let mut yll: Option<f64> = None;
    let mut center = false;
    let mut cellsize: Option<f64> = None;
    let mut nodata: Option<f64> = None;
    let mut data_start: Option<usize> = None;

    for (lineno, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        // 头部行以字母开头；数据体以数字、正负号或小数点开头
        let first = line.chars().next().unwrap_or(' ');
        if !first.is_ascii_alphabetic() {
            data_start = Some(lineno);
            break;
        }

        let mut parts = line.split_whitespace();
        let key = parts.next().unwrap_or("").to_lowercase();
        let value = parts.next().ok_or_else(|| IoError::InvalidHeader {
            file: path.to_path_buf(),
            line: lineno + 1,
            message: format!("头部行缺少值: {key}"),
        })?;

        let bad_value = |msg: String| IoError::InvalidHeader {
            file: path.to_path_buf(),
            line: lineno + 1,
            message: msg,
        };

        match key.as_str() {
            "ncols" => {
                ncols = Some(
                    value
                        .parse()
                        .map_err(|_| bad_value(format!("ncols 不是整数: {value}")))?,
                );
            }
            "nrows" => {
                nrows = Some(
                    value
                        .parse()
                        .map_err(|_| bad_value(format!("nrows 不是整数: {value}")))?,
                );
            }
            "xllcorner" | "xllcenter" => {
                center = center || key == "xllcenter";
                xll = Some(
                    value
                        .parse()
                        .map_err(|_| bad_value(format!("{key} 不是数值: {value}")))?,
                );
            }
            "yllcorner" | "yllcenter" => {
                center = center || key == "yllcenter";
                yll = Some(
                    value
                        .parse()
                        .map_err(|_| bad_value(format!("{key} 不是数值: {value}")))?,
                );
            }
            "cellsize" => {
                cellsize = Some(
                    value
                        .parse()
                        .map_err(|_| bad_value(format!("cellsize 不是数值: {value}")))?,
                );
            }
            "nodata_value" => {
                nodata = Some(
                    value
                        .parse()
                        .map_err(|_| bad_value(format!("NODATA_value 不是数值: {value}")))?,
                );
            }
            _ => {
                return Err(bad_value(format!("未知头部字段: {key}")));
            }
        }
    }

    let missing = |field: &'static str| IoError::MissingHeaderField {
        field,
        file: path.to_path_buf(),
    };
    let ncols = ncols.ok_or_else(|| missing("ncols"))?;
    let nrows = nrows.ok_or_else(|| missing("nrows"))?;
    let xll = xll.ok_or_else(|| missing("xllcorner"))?;
    let yll = yll.ok_or_else(|| missing("yllcorner"))?;
    let cellsize = cellsize.ok_or_else(|| missing("cellsize"))?;

    // center 约定的锚点在像元中心，换算到左下角
    let (xmin, ymin) = if center {
        (xll - cellsize / 2.0, yll - cellsize / 2.0)
    } else {
        (xll, yll)
    };
    let origin_y = ymin + nrows as f64 * cellsize;
    let transform = GeoTransform::new(xmin, origin_y, cellsize, -cellsize);

    let mut meta = RasterMetadata::new(ncols, nrows, transform).with_driver(DRIVER_NAME);
    meta.no_data_value = nodata;

    Ok((meta, data_start.unwrap_or_else(|| content.lines().count())))
}

/// 解析完整的 ASCII Grid 文本
pub fn parse_ascii_grid(content: &str, path: &Path) -> IoResult<RasterGrid> {
    let (meta, data_start) = parse_header(content, path)?;
    let expected = meta.total_pixels();

    let mut values = Vec::with_capacity(expected);
    for (lineno, raw) in content.lines().enumerate().skip(data_start) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        for token in line.split_whitespace() {
            let v: f64 = token.parse().map_err(|_| IoError::InvalidData {
                file: path.to_path_buf(),
                line: lineno + 1,
                message: format!("数据值无法解析: {token}"),
            })?;
            values.push(v);
        }
    }

    if values.len() != expected {
        return Err(IoError::TruncatedData {
            file: path.to_path_buf(),
            expected,
            actual: values.len(),
        });
    }

    let data = Array2::from_shape_vec((meta.height, meta.width), values).map_err(|e| {
        IoError::InvalidData {
            file: path.to_path_buf(),
            line: 0,
            message: format!("数据形状错误: {e}"),
        }
    })?;

    // from_parts 的形状校验在此恒成立，错误仅为防御
    RasterGrid::from_parts(meta, data).map_err(|e| IoError::InvalidData {
        file: path.to_path_buf(),
        line: 0,
        message: e.to_string(),
    })
}

// ============================================================================
// 序列化
// ============================================================================

/// 将栅格序列化为 ASCII Grid 文本
///
/// 头部约定与读入保持一致；NaN 像元在存在 NoData 值时写为哨兵。
pub fn format_ascii_grid(grid: &RasterGrid) -> String {
    let meta = &grid.meta;
    let gt = meta.transform.to_gdal();
    let cellsize = gt[1];
    let xll = gt[0];
    let yll = gt[3] - meta.height as f64 * cellsize;

    let mut out = String::new();
    out.push_str(&format!("ncols {}\n", meta.width));
    out.push_str(&format!("nrows {}\n", meta.height));
    out.push_str(&format!("xllcorner {}\n", xll));
    out.push_str(&format!("yllcorner {}\n", yll));
    out.push_str(&format!("cellsize {}\n", cellsize));
    if let Some(nd) = meta.no_data_value {
        out.push_str(&format!("NODATA_value {}\n", nd));
    }

    for row in grid.data.rows() {
        let mut first = true;
        for &v in row {
            if !first {
                out.push(' ');
            }
            first = false;
            let written = if v.is_nan() {
                meta.no_data_value.unwrap_or(f64::NAN)
            } else {
                v
            };
            out.push_str(&format!("{written}"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ncols 3
nrows 2
xllcorner 100.0
yllcorner 200.0
cellsize 30.0
NODATA_value -9999
1.0 2.0 3.0
4.0 -9999 6.0
";

    #[test]
    fn test_parse_sample() {
        let grid = parse_ascii_grid(SAMPLE, Path::new("sample.asc")).unwrap();
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.meta.no_data_value, Some(-9999.0));
        assert_eq!(grid.data[[0, 0]], 1.0);
        assert_eq!(grid.data[[1, 2]], 6.0);
        assert!(grid.is_nodata(grid.data[[1, 1]]));

        // 左下角 200，2 行 × 30 → 原点 y = 260
        let (x, y) = grid.meta.transform.pixel_to_world(0.0, 0.0);
        assert_eq!(x, 100.0);
        assert_eq!(y, 260.0);
    }

    #[test]
    fn test_parse_center_convention() {
        let content = "\
ncols 2
nrows 2
xllcenter 15.0
yllcenter 15.0
cellsize 30.0
1 2
3 4
";
        let grid = parse_ascii_grid(content, Path::new("c.asc")).unwrap();
        let gt = grid.meta.transform.to_gdal();
        assert_eq!(gt[0], 0.0);
        assert_eq!(gt[3], 60.0);
        assert_eq!(grid.meta.no_data_value, None);
    }

    #[test]
    fn test_roundtrip_preserves_header() {
        let grid = parse_ascii_grid(SAMPLE, Path::new("sample.asc")).unwrap();
        let text = format_ascii_grid(&grid);
        let back = parse_ascii_grid(&text, Path::new("back.asc")).unwrap();

        assert_eq!(back.shape(), grid.shape());
        assert_eq!(back.meta.no_data_value, grid.meta.no_data_value);
        assert_eq!(back.meta.transform, grid.meta.transform);
        assert_eq!(back.data, grid.data);
    }

    #[test]
    fn test_nan_written_as_nodata() {
        let grid = parse_ascii_grid(SAMPLE, Path::new("sample.asc")).unwrap();
        let mut with_nan = grid.clone();
        with_nan.data[[0, 1]] = f64::NAN;
        let text = format_ascii_grid(&with_nan);
        let back = parse_ascii_grid(&text, Path::new("back.asc")).unwrap();
        assert_eq!(back.data[[0, 1]], -9999.0);
    }

    #[test]
    fn test_missing_header_field() {
        let content = "ncols 2\nnrows 2\ncellsize 30.0\n1 2\n3 4\n";
        let err = parse_ascii_grid(content, Path::new("bad.asc"));
        assert!(matches!(err, Err(IoError::MissingHeaderField { .. })));
    }

    #[test]
    fn test_malformed_header_reports_line() {
        let content = "\
ncols 2
nrows abc
xllcorner 0
yllcorner 0
cellsize 1
1 2
3 4
";
        match parse_ascii_grid(content, Path::new("bad.asc")) {
            Err(IoError::InvalidHeader { line, .. }) => assert_eq!(line, 2),
            other => panic!("应为 InvalidHeader, 实际 {other:?}"),
        }
    }

    #[test]
    fn test_truncated_data() {
        let content = "\
ncols 3
nrows 2
xllcorner 0
yllcorner 0
cellsize 1
1 2 3
4 5
";
        let err = parse_ascii_grid(content, Path::new("short.asc"));
        assert!(matches!(
            err,
            Err(IoError::TruncatedData {
                expected: 6,
                actual: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_header_only_file_is_truncated() {
        let content = "\
ncols 2
nrows 2
xllcorner 0
yllcorner 0
cellsize 1
";
        let err = parse_ascii_grid(content, Path::new("empty.asc"));
        assert!(matches!(err, Err(IoError::TruncatedData { .. })));
    }

    #[test]
    fn test_negative_values_are_data_not_header_end() {
        let content = "\
ncols 2
nrows 1
xllcorner 0
yllcorner 0
cellsize 1
-1.5 -2.5
";
        let grid = parse_ascii_grid(content, Path::new("neg.asc")).unwrap();
        assert_eq!(grid.data[[0, 0]], -1.5);
    }
}
