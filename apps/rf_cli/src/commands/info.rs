// apps/rf_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 显示栅格文件的元数据和有效区域统计。

use anyhow::{Context, Result};
use clap::Args;
use rf_io::RasterDriver;
use std::path::PathBuf;
use tracing::info;

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    /// 栅格文件路径
    pub raster: PathBuf,

    /// 同时计算有效区域统计（需要读取完整数据）
    #[arg(long)]
    pub stats: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== RasterFuse 栅格信息 ===");

    if args.stats {
        let grid = rf_io::open_raster(&args.raster)
            .with_context(|| format!("读取失败: {}", args.raster.display()))?;
        print_metadata(&grid.meta);

        println!("\n=== 有效区域统计 ===");
        match grid.valid_stats() {
            Some(stats) => {
                println!("有效像元: {}/{}", stats.count, grid.meta.total_pixels());
                println!("最小值: {}", stats.min);
                println!("最大值: {}", stats.max);
                println!("均值: {:.6}", stats.mean);
            }
            None => println!("无有效像元"),
        }
    } else {
        let driver = rf_io::AsciiGridDriver;
        let meta = driver
            .read_metadata(&args.raster)
            .with_context(|| format!("读取元数据失败: {}", args.raster.display()))?;
        print_metadata(&meta);
    }

    Ok(())
}

fn print_metadata(meta: &rf_raster::RasterMetadata) {
    println!("=== 元数据 ===");
    println!("尺寸: {} 列 x {} 行", meta.width, meta.height);
    println!("驱动: {}", meta.driver_name);
    let gt = meta.transform.to_gdal();
    println!("原点: ({}, {})", gt[0], gt[3]);
    let (dx, dy) = meta.transform.resolution();
    println!("分辨率: {} x {}", dx, dy);
    match meta.no_data_value {
        Some(nd) => println!("NoData 值: {}", nd),
        None => println!("NoData 值: 未定义"),
    }
    match &meta.crs_wkt {
        Some(wkt) => println!("坐标系 WKT: {wkt}"),
        None => println!("坐标系 WKT: 未定义"),
    }
}
