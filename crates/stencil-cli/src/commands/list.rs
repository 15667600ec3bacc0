//! Implementation of the `stencil list` command.

use serde::Serialize;

use stencil_core::{
    application::{SourceListing, TemplateService},
    domain::RepositoryDescriptor,
};

use crate::{
    cli::{ListArgs, ListFormat},
    commands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Serialize)]
struct ListingDto<'a> {
    source: &'a str,
    url: &'a str,
    templates: &'a [RepositoryDescriptor],
}

pub async fn execute(args: ListArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let ports = commands::build_ports(config)?;
    let service = TemplateService::new(ports.http, ports.usage, config.sources.clone());

    let spinner = output.spinner("Fetching templates...");
    let listings = service.list().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let listings = listings?;

    match args.format {
        ListFormat::Table => {
            for listing in &listings {
                output.header(&listing.source.name)?;
                for line in table_rows(listing) {
                    output.print(&line)?;
                }
                output.print("")?;
            }
            output.print("Usage: stencil new <template> <ProjectName>")?;
        }
        ListFormat::List => {
            for listing in &listings {
                for repo in &listing.repositories {
                    output.data(&repo.name)?;
                }
            }
        }
        ListFormat::Json => {
            let dto: Vec<ListingDto<'_>> = listings
                .iter()
                .map(|l| ListingDto {
                    source: &l.source.name,
                    url: &l.source.url,
                    templates: &l.repositories,
                })
                .collect();
            let json = serde_json::to_string_pretty(&dto).map_err(|e| CliError::IoError {
                message: format!("Failed to serialise listing: {e}"),
                source: std::io::Error::other(e),
            })?;
            output.data(&json)?;
        }
    }

    Ok(())
}

/// Numbered `name  description` rows with the names padded to one column.
fn table_rows(listing: &SourceListing) -> Vec<String> {
    let width = listing
        .repositories
        .iter()
        .map(|r| r.name.len())
        .max()
        .unwrap_or(0);

    listing
        .repositories
        .iter()
        .enumerate()
        .map(|(i, repo)| {
            let description = repo.description.as_deref().unwrap_or_default();
            format!("{:>3}. {:<width$}  {}", i + 1, repo.name, description)
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use stencil_core::domain::TemplateSource;

    use super::*;

    fn repo(name: &str, description: Option<&str>) -> RepositoryDescriptor {
        RepositoryDescriptor {
            name: name.into(),
            description: description.map(str::to_string),
            releases_url: format!("https://api.github.com/repos/acme/{name}/releases{{/id}}"),
        }
    }

    #[test]
    fn rows_are_numbered_and_aligned() {
        let listing = SourceListing {
            source: TemplateSource::new("Acme", "https://api.github.com/orgs/acme/repos"),
            repositories: vec![
                repo("web", Some("Empty web app")),
                repo("vue-spa", None),
            ],
        };

        assert_eq!(
            table_rows(&listing),
            vec!["  1. web      Empty web app".to_string(), "  2. vue-spa".to_string()]
        );
    }
}
