// apps/sit_cli/src/main.rs

//! Standard Interface Template 命令行界面
//!
//! 工程保存在一个 JSON 文件中，每个子命令读入工程、通过命令注册表执行、
//! 需要时写回工程。

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Standard Interface Template 模型文件工具
#[derive(Parser)]
#[command(name = "sit_cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Standard Interface Template model tools", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 工程文件
    #[arg(short, long, default_value = "project.json")]
    project: PathBuf,

    /// 工作流配置文件 (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 导入模拟文件组
    Import(commands::model::ImportArgs),
    /// 导出模拟文件组
    Export(commands::model::ExportArgs),
    /// 模型检查
    Check(commands::check::CheckArgs),
    /// 生成捕捉预览
    Snap(commands::model::SnapArgs),
    /// 加载求解结果
    Solution(commands::run::SolutionArgs),
    /// 显示模型运行描述
    Executables(commands::run::ExecutablesArgs),
    /// 读取模型回显中的进度
    Progress(commands::run::ProgressArgs),
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

    let session = commands::Session::open(cli.project, cli.config.as_deref())?;

    match cli.command {
        Commands::Import(args) => commands::model::import(session, args),
        Commands::Export(args) => commands::model::export(session, args),
        Commands::Check(args) => commands::check::execute(session, args),
        Commands::Snap(args) => commands::model::snap(session, args),
        Commands::Solution(args) => commands::run::solution(session, args),
        Commands::Executables(args) => commands::run::executables(session, args),
        Commands::Progress(args) => commands::run::progress(session, args),
    }
}
