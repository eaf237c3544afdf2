// apps/sit_cli/src/commands/run.rs

//! 模型运行相关命令：运行描述、进度、求解结果

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use sit_io::ProgressTracker;
use sit_workflow::{CommandOutcome, ComponentCommand, SimulationRun};
use tracing::info;

use super::Session;

/// 求解结果参数
#[derive(Args)]
pub struct SolutionArgs {
    /// 结果文件，缺省为 `<导出目录>/<模拟名>.example_solution`
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// 运行描述参数
#[derive(Args)]
pub struct ExecutablesArgs {
    /// 运行目录，缺省为导出目录
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

/// 进度参数
#[derive(Args)]
pub struct ProgressArgs {
    /// 模型回显文件
    pub echo_file: PathBuf,
}

pub fn solution(mut session: Session, args: SolutionArgs) -> Result<()> {
    let output = session.run(ComponentCommand::ReadSolution, args.file)?;
    let CommandOutcome::Solution(dataset) = output.outcome else {
        bail!("求解结果命令返回了意外的结果");
    };
    match dataset.range() {
        Some((lo, hi)) => println!("{}: {} 个值, 范围 [{lo}, {hi}]", dataset.name, dataset.len()),
        None => println!("{}: 没有数值", dataset.name),
    }
    Ok(())
}

pub fn executables(session: Session, args: ExecutablesArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| session.config.output_dir.clone());
    let commands = SimulationRun::executables(&session.config.simulation_name, dir);
    println!("{}", serde_json::to_string_pretty(&commands)?);
    Ok(())
}

pub fn progress(session: Session, args: ProgressArgs) -> Result<()> {
    let mut tracker = ProgressTracker::new(args.echo_file);
    match session.poll_progress(&mut tracker)? {
        Some(percent) => println!("{percent}%"),
        None => info!(path = %tracker.echo_file().display(), "没有进度信息"),
    }
    Ok(())
}
