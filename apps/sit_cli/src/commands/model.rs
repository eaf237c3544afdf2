// apps/sit_cli/src/commands/model.rs

//! 导入、导出与捕捉预览

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use sit_workflow::{CommandOutcome, ComponentCommand};
use tracing::info;

use super::Session;

/// 导入参数
#[derive(Args)]
pub struct ImportArgs {
    /// 模拟文件 (*.example_simulation)
    pub simulation: PathBuf,

    /// 组件目录（保存导入的网格）
    #[arg(long)]
    pub component_dir: Option<PathBuf>,
}

/// 导出参数
#[derive(Args)]
pub struct ExportArgs {
    /// 导出目录
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 模拟名称
    #[arg(short, long)]
    pub name: Option<String>,
}

/// 捕捉预览参数
#[derive(Args)]
pub struct SnapArgs {
    /// 组件目录
    #[arg(long)]
    pub component_dir: Option<PathBuf>,
}

pub fn import(mut session: Session, args: ImportArgs) -> Result<()> {
    if let Some(dir) = args.component_dir {
        session.config.component_dir = dir;
    }
    session.run(ComponentCommand::ImportSimulation, Some(args.simulation))?;
    session.save()
}

pub fn export(mut session: Session, args: ExportArgs) -> Result<()> {
    if let Some(dir) = args.output {
        session.config.output_dir = dir;
    }
    if let Some(name) = args.name {
        session.config.simulation_name = name;
    }
    let output = session.run(ComponentCommand::ExportSimulation, None)?;
    let CommandOutcome::Exported(exported) = output.outcome else {
        bail!("导出命令返回了意外的结果");
    };
    for file in &exported.files {
        println!("{}", file.display());
    }
    Ok(())
}

pub fn snap(mut session: Session, args: SnapArgs) -> Result<()> {
    if let Some(dir) = args.component_dir {
        session.config.component_dir = dir;
    }
    let output = session.run(ComponentCommand::GenerateSnap, None)?;
    let CommandOutcome::Snapped(mapping) = output.outcome else {
        bail!("捕捉命令返回了意外的结果");
    };
    for preview in &mapping.previews {
        info!(uuid = %preview.uuid, files = preview.files.len(), "捕捉预览");
        println!("{}", preview.path.display());
    }
    Ok(())
}
