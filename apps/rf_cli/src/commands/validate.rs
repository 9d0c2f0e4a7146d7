// apps/rf_cli/src/commands/validate.rs

//! 任务配置验证命令
//!
//! 验证任务配置与输入图层的正确性：文件存在、格式支持、
//! 图层已配准、参考图层可解析。

use anyhow::{bail, Context, Result};
use clap::Args;
use rf_io::RasterDriver;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{error, info, warn};

use crate::config::JobConfig;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 任务配置文件路径 (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== RasterFuse 配置验证 ===");

    let config = JobConfig::load(&args.config)
        .with_context(|| format!("加载任务配置失败: {}", args.config.display()))?;

    let mut result = ValidationResult::default();
    check_layers(&config, &mut result);
    check_reference(&config, &mut result);
    check_rasters(&config, &mut result);

    for w in &result.warnings {
        warn!("警告: {w}");
    }
    for e in &result.errors {
        error!("错误: {e}");
    }

    let passed = if args.strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if passed {
        info!(
            "验证通过: {} 个图层, {} 个警告",
            config.layers.len(),
            result.warnings.len()
        );
        Ok(())
    } else {
        bail!(
            "验证失败: {} 个错误, {} 个警告",
            result.errors.len(),
            result.warnings.len()
        );
    }
}

fn check_layers(config: &JobConfig, result: &mut ValidationResult) {
    if config.layers.is_empty() {
        result.add_error("任务没有输入图层");
        return;
    }
    if config.layers.len() < 2 {
        result.add_warning("仅 1 个图层，融合退化为归一化");
    }

    let mut seen = HashSet::new();
    for spec in &config.layers {
        if !seen.insert(spec.id.as_str()) {
            result.add_error(format!("图层 id 重复: {}", spec.id));
        }
        if !spec.path.exists() {
            result.add_error(format!("图层文件不存在: {}", spec.path.display()));
        }
    }

    if config.norm_offset <= 0.0 {
        result.add_error(format!("norm_offset 必须为正: {}", config.norm_offset));
    }
    if config.prop_floor <= 0.0 {
        result.add_error(format!("prop_floor 必须为正: {}", config.prop_floor));
    }
}

fn check_reference(config: &JobConfig, result: &mut ValidationResult) {
    if config.reference_index().is_err() {
        result.add_error(format!("参考图层 id 未定义: {}", config.reference));
    }
}

fn check_rasters(config: &JobConfig, result: &mut ValidationResult) {
    let driver = rf_io::AsciiGridDriver;
    let mut shape: Option<(usize, usize)> = None;

    for spec in &config.layers {
        if !spec.path.exists() {
            continue; // 已在 check_layers 中报告
        }
        let ext = spec
            .path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if !driver.supports_extension(ext) {
            result.add_error(format!(
                "图层 {} 扩展名不受支持: {}",
                spec.id,
                spec.path.display()
            ));
            continue;
        }

        match driver.read_metadata(&spec.path) {
            Ok(meta) => {
                if meta.no_data_value.is_none() {
                    result.add_warning(format!(
                        "图层 {} 未声明 NoData 值，仅 NaN 视为无效",
                        spec.id
                    ));
                }
                match shape {
                    None => shape = Some(meta.shape()),
                    Some(s) if s != meta.shape() => {
                        result.add_error(format!(
                            "图层 {} 形状 {}x{} 与首图层 {}x{} 不一致，输入必须已配准",
                            spec.id,
                            meta.shape().0,
                            meta.shape().1,
                            s.0,
                            s.1
                        ));
                    }
                    Some(_) => {}
                }
            }
            Err(e) => {
                result.add_error(format!("图层 {} 元数据读取失败: {e}", spec.id));
            }
        }
    }
}
