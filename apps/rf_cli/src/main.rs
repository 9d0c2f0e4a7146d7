// apps/rf_cli/src/main.rs

//! RasterFuse 命令行界面
//!
//! 提供多图层栅格熵权融合的命令行工具。
//!
//! # 架构层级
//!
//! 本模块属于应用层，遵循以下原则：
//! - 仅使用各 crate 的具体类型，错误统一走 anyhow
//! - 融合参数通过 `JobConfig` / `FusionOptions` 配置，不在此硬编码

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// RasterFuse 多图层栅格融合命令行工具
#[derive(Parser)]
#[command(name = "rf_cli")]
#[command(author = "RasterFuse Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Entropy-weighted raster layer fusion", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 执行融合
    Fuse(commands::fuse::FuseArgs),
    /// 显示栅格信息
    Info(commands::info::InfoArgs),
    /// 验证任务配置
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // 执行命令
    match cli.command {
        Commands::Fuse(args) => commands::fuse::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
