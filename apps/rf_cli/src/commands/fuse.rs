// apps/rf_cli/src/commands/fuse.rs

//! 融合命令
//!
//! 读取输入图层，执行归一化 → 熵权 → 加权融合流程，
//! 写出结果栅格，按需渲染热力图。

use anyhow::{Context, Result};
use clap::Args;
use rf_render::HeatmapStyle;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::{JobConfig, LayerSpec};

/// 融合参数
#[derive(Args)]
pub struct FuseArgs {
    /// 任务配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 输入栅格路径（可多次指定，顺序即图层顺序）
    #[arg(short, long)]
    pub input: Vec<PathBuf>,

    /// 参考图层下标（与 --input 配合使用）
    #[arg(short, long, default_value = "0")]
    pub reference: usize,

    /// 输出栅格路径
    #[arg(short, long, default_value = "fused.asc")]
    pub output: PathBuf,

    /// 热力图输出路径 (PNG)
    #[arg(long)]
    pub heatmap: Option<PathBuf>,
}

/// 由命令行参数构造任务配置
fn config_from_args(args: &FuseArgs) -> Result<JobConfig> {
    let layers: Vec<LayerSpec> = args
        .input
        .iter()
        .enumerate()
        .map(|(i, path)| LayerSpec {
            id: format!("layer{i}"),
            path: path.clone(),
        })
        .collect();
    anyhow::ensure!(!layers.is_empty(), "必须通过 --config 或 --input 指定输入图层");
    anyhow::ensure!(
        args.reference < layers.len(),
        "参考图层下标 {} 超出范围 0..{}",
        args.reference,
        layers.len()
    );

    Ok(JobConfig {
        reference: layers[args.reference].id.clone(),
        layers,
        mask_policy: Default::default(),
        output: args.output.clone(),
        heatmap: args.heatmap.clone(),
        norm_offset: rf_fusion::NORM_OFFSET,
        prop_floor: rf_fusion::PROP_FLOOR,
    })
}

/// 执行融合命令
pub fn execute(args: FuseArgs) -> Result<()> {
    info!("=== RasterFuse 融合启动 ===");

    let config = match &args.config {
        Some(path) => {
            let mut c = JobConfig::load(path)
                .with_context(|| format!("加载任务配置失败: {}", path.display()))?;
            // 命令行热力图参数可补充配置文件
            if c.heatmap.is_none() {
                c.heatmap = args.heatmap.clone();
            }
            c
        }
        None => config_from_args(&args)?,
    };

    info!("任务: {} 个图层, 参考图层 {}", config.layers.len(), config.reference);
    if config.layers.len() < 2 {
        warn!("仅 1 个图层，融合退化为归一化");
    }

    // 读取图层
    let start = Instant::now();
    let mut grids = Vec::with_capacity(config.layers.len());
    for spec in &config.layers {
        let grid = rf_io::open_raster(&spec.path)
            .with_context(|| format!("读取图层 {} 失败: {}", spec.id, spec.path.display()))?;
        let (rows, cols) = grid.shape();
        info!(
            "图层 {}: {}x{} 像元, NoData={:?}",
            spec.id, rows, cols, grid.meta.no_data_value
        );
        grids.push(grid);
    }

    // 核心流程
    let options = config.fusion_options()?;
    let outcome = rf_fusion::run(&grids, &options).context("融合流程失败")?;

    for (spec, (w, e)) in config
        .layers
        .iter()
        .zip(outcome.weights.iter().zip(outcome.entropies.iter()))
    {
        info!("图层 {}: 熵={:.6}, 权重={:.6}", spec.id, e, w);
    }

    // 写出结果
    rf_io::write_raster(&config.output, &outcome.fused)
        .with_context(|| format!("写出结果失败: {}", config.output.display()))?;
    info!("结果栅格: {}", config.output.display());

    // 可选热力图
    if let Some(heatmap_path) = &config.heatmap {
        rf_render::save_heatmap(&outcome.fused, &HeatmapStyle::default(), heatmap_path)
            .with_context(|| format!("渲染热力图失败: {}", heatmap_path.display()))?;
        info!("热力图: {}", heatmap_path.display());
    }

    info!("=== 融合完成 ===");
    info!("有效像元: {}", outcome.valid_cells);
    info!("耗时: {:.2} s", start.elapsed().as_secs_f64());

    Ok(())
}
