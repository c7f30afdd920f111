//! `coresmith roots` command

use anyhow::Result;

use coresmith::CoreManager;

pub fn execute(manager: &CoreManager) -> Result<()> {
    for root in manager.cores_root().iter() {
        println!("{}", root.display());
    }

    Ok(())
}
