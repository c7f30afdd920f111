//! `coresmith deps` command

use anyhow::Result;

use crate::cli::DepsArgs;
use coresmith::CoreManager;

pub fn execute(args: DepsArgs, manager: &CoreManager) -> Result<()> {
    let order = manager.get_depends(&args.name)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&order)?);
    } else {
        for name in order {
            println!("{}", name);
        }
    }

    Ok(())
}
