use anyhow::{Context, Result};
use mockgen_core::{JsonPackageLoader, PackageLoader};

use crate::cli::ListArgs;
use crate::config::{enter_directory, load_file_config};

pub fn list_command(args: ListArgs) -> Result<()> {
    let cwd = enter_directory(args.chdir.as_deref())?;
    let config = load_file_config(&cwd, args.no_config)?;

    let packages_file = args
        .packages_file
        .or(config.packages_file)
        .context("No package document given (use --packages or packages_file in .mockgen.json)")?;

    let loader = JsonPackageLoader::from_file(&packages_file).with_context(|| {
        format!(
            "Failed to load package document {}",
            packages_file.display()
        )
    })?;

    let paths = if args.packages.is_empty() {
        loader.available()
    } else {
        args.packages
    };
    let packages = loader.load(&paths)?;

    for path in &paths {
        match packages.iter().find(|p| &p.path == path) {
            Some(package) => {
                println!("{} ({})", package.path, package.name);
                for name in package.interface_names() {
                    println!("  {name}");
                }
            }
            None => println!("{path} (not loaded)"),
        }
    }

    Ok(())
}
