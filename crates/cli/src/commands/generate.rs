use anyhow::{Context, Result};
use mockgen_core::{Config, JsonPackageLoader, PackageLoader, generate};
use tracing::{debug, info};

use crate::cli::GenerateArgs;
use crate::config::{enter_directory, load_file_config};
use crate::utils::{write_atomically, write_stdout};

pub fn generate_command(args: GenerateArgs) -> Result<()> {
    let cwd = enter_directory(args.chdir.as_deref())?;
    debug!("Generating from {}", cwd.display());

    let file_config = load_file_config(&cwd, args.no_config)?;
    let config = file_config.merge(Config {
        module: args.module,
        output_package: args.output_package,
        output_file: args.output_file,
        packages_file: args.packages_file,
        inputs: args.inputs,
    });

    let requests = config.request_set()?;
    let options = config.generator_options()?;
    let packages_file = config.packages_file.as_deref().context(
        "No package document given (use --packages or packages_file in .mockgen.json)",
    )?;

    let loader = JsonPackageLoader::from_file(packages_file).with_context(|| {
        format!(
            "Failed to load package document {}",
            packages_file.display()
        )
    })?;
    let packages = loader.load(&requests.package_paths())?;
    debug!("Loaded {} packages", packages.len());

    let document = generate(options, &requests, &packages)?;

    match &config.output_file {
        Some(path) => {
            write_atomically(path, &document)?;
            info!("Wrote {} mocks to {}", requests.len(), path.display());
        }
        None => write_stdout(&document)?,
    }

    Ok(())
}
