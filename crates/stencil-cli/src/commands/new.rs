//! Implementation of the `stencil new` command.
//!
//! Responsibility: translate CLI arguments into a `ScaffoldRequest`, call the
//! core scaffold service, and display results. No business logic lives here.

use std::path::Path;

use tracing::{info, instrument};

use stencil_core::{
    application::{ScaffoldOutcome, ScaffoldRequest, ScaffoldService},
    domain::{ArchiveSource, TemplateReference},
};

use crate::{
    cli::NewArgs,
    commands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `stencil new` command.
///
/// 1. Parse the template reference
/// 2. Wire the adapters from configuration
/// 3. With `--dry-run`, resolve and print the archive only
/// 4. Otherwise run the pipeline and print next steps
#[instrument(skip_all, fields(template = %args.template))]
pub async fn execute(
    args: NewArgs,
    working_dir: &Path,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let reference = TemplateReference::parse(&args.template).map_err(|e| CliError::Core(e.into()))?;

    let ports = commands::build_ports(config)?;
    let service = ScaffoldService::new(&ports, config.sources.clone(), commands::cache_root(config)?)
        .with_post_install(config.postinstall.clone());

    if args.dry_run {
        let spinner = output.spinner("Resolving template...");
        let resolved = service.resolve(&reference).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let resolved = resolved?;

        let target = service.project_dir(working_dir, args.name.as_deref());
        output.info(&format!("Dry run: would create {}", target.display()))?;
        match &resolved.archive {
            ArchiveSource::Remote(url) => {
                output.info(&format!("  Archive: {url}"))?;
                output.info(&format!(
                    "  Cached:  {}",
                    service.cache().cache_path(url).display()
                ))?;
            }
            ArchiveSource::Local(path) => {
                output.info(&format!("  Archive: {}", working_dir.join(path).display()))?;
            }
        }
        return Ok(());
    }

    let mut request = ScaffoldRequest::new(reference, working_dir);
    if let Some(name) = &args.name {
        request = request.project_name(name.as_str());
    }
    if args.no_postinstall {
        request = request.skip_post_install();
    }

    let spinner = output.spinner(&format!("Creating project from {}...", args.template));
    let outcome = service.scaffold(&request).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let outcome = outcome?;

    info!(root = %outcome.project_root.display(), "Project created");
    report(&outcome, working_dir, output)
}

fn report(outcome: &ScaffoldOutcome, working_dir: &Path, output: &OutputManager) -> CliResult<()> {
    let report = &outcome.report;
    output.success(&format!(
        "Project created at {}",
        outcome.project_root.display()
    ))?;
    output.print(&format!(
        "  {} renamed, {} rewritten, {} binary files left untouched",
        report.renamed, report.rewritten, report.skipped_binary
    ))?;
    if report.failures > 0 {
        output.warning(&format!(
            "{} entries could not be processed; run with -v for details",
            report.failures
        ))?;
    }
    for command in &outcome.post_install {
        output.print(&format!("  ran: {command}"))?;
    }

    if let Ok(relative) = outcome.project_root.strip_prefix(working_dir) {
        if !relative.as_os_str().is_empty() {
            output.print("")?;
            output.print("Next steps:")?;
            output.print(&format!("  cd {}", relative.display()))?;
        }
    }
    Ok(())
}
