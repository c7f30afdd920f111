//! `coresmith show` command

use anyhow::Result;

use crate::cli::ShowArgs;
use coresmith::{CoreManager, ResolveError};

pub fn execute(args: ShowArgs, manager: &CoreManager) -> Result<()> {
    let core = manager
        .get_core(&args.name)
        .ok_or_else(|| ResolveError::DependencyNotFound {
            name: args.name.clone(),
        })?;

    println!("name:        {}", core.name());
    println!("vlnv:        {}", core.vlnv());
    println!("root:        {}", core.core_root().display());
    if let Some(description) = core.description() {
        println!("description: {}", description);
    }
    println!("system:      {}", if core.is_system() { "yes" } else { "no" });
    if let Some(provider) = core.provider() {
        println!("provider:    {}", provider.kind);
    }
    println!("depend:      {}", core.depend().join(" "));

    for (name, section) in core.sections() {
        match section.depend() {
            Some(depend) if !depend.is_empty() => {
                println!("[{}] depend: {}", name, depend.join(" "))
            }
            _ => println!("[{}]", name),
        }
    }

    Ok(())
}
