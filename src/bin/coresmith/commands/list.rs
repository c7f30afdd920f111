//! `coresmith list` command

use anyhow::Result;
use serde_json::json;

use crate::cli::ListArgs;
use coresmith::CoreManager;

pub fn execute(args: ListArgs, manager: &CoreManager) -> Result<()> {
    let mut cores: Vec<_> = manager.get_cores().into_iter().collect();
    cores.sort_by(|a, b| a.0.cmp(&b.0));

    if args.json {
        let entries: Vec<_> = cores
            .iter()
            .map(|(vlnv, core)| {
                json!({
                    "vlnv": vlnv,
                    "name": core.name(),
                    "core_root": core.core_root(),
                    "system": core.is_system(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if cores.is_empty() {
        eprintln!("No cores found");
        return Ok(());
    }

    let width = cores.iter().map(|(vlnv, _)| vlnv.len()).max().unwrap_or(0);
    for (vlnv, core) in &cores {
        println!("{:<width$}  {}", vlnv, core.core_root().display(), width = width);
    }

    Ok(())
}
