//! `coresmith systems` command

use anyhow::Result;

use coresmith::CoreManager;

pub fn execute(manager: &CoreManager) -> Result<()> {
    let mut systems: Vec<_> = manager.get_systems().into_keys().collect();
    systems.sort();

    for vlnv in systems {
        println!("{}", vlnv);
    }

    Ok(())
}
