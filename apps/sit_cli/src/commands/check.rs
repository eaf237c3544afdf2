// apps/sit_cli/src/commands/check.rs

//! 模型检查命令

use anyhow::{bail, Result};
use clap::Args;
use sit_workflow::{CommandOutcome, ComponentCommand};

use super::Session;

/// 检查参数
#[derive(Args)]
pub struct CheckArgs {
    /// 以 JSON 输出检查结果
    #[arg(long)]
    pub json: bool,

    /// 有问题时以非零状态退出
    #[arg(long)]
    pub strict: bool,
}

pub fn execute(mut session: Session, args: CheckArgs) -> Result<()> {
    let output = session.run(ComponentCommand::ModelCheck, None)?;
    let CommandOutcome::Checked(errors) = output.outcome else {
        bail!("检查命令返回了意外的结果");
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&errors)?);
    } else if errors.is_empty() {
        println!("模型检查通过");
    } else {
        for e in &errors {
            println!("{e}\n");
        }
    }

    if args.strict && !errors.is_empty() {
        bail!("模型检查发现 {} 个问题", errors.len());
    }
    Ok(())
}
