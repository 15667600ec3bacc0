//! Template Service - catalogue listing.
//!
//! Separated from ScaffoldService for single responsibility.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::{
    application::{
        ApplicationError,
        ports::{HttpClient, UsageReporter},
        services::locator::TemplateLocator,
    },
    domain::{RepositoryDescriptor, TemplateSource},
    error::StencilResult,
};

/// One source and the templates it offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceListing {
    pub source: TemplateSource,
    pub repositories: Vec<RepositoryDescriptor>,
}

/// Service for template catalogue queries.
pub struct TemplateService {
    usage: Arc<dyn UsageReporter>,
    locator: TemplateLocator,
}

impl TemplateService {
    pub fn new(
        http: Arc<dyn HttpClient>,
        usage: Arc<dyn UsageReporter>,
        sources: Vec<TemplateSource>,
    ) -> Self {
        Self {
            locator: TemplateLocator::new(http, Arc::clone(&usage), sources),
            usage,
        }
    }

    /// Fetch every source's listing concurrently. Results keep the configured
    /// source order; any failed listing fails the call.
    pub async fn list(&self) -> StencilResult<Vec<SourceListing>> {
        let sources = self.locator.sources();
        if sources.is_empty() {
            return Err(ApplicationError::NoSources.into());
        }

        self.usage.record("list");

        try_join_all(sources.iter().map(|source| async move {
            let repositories = self.locator.list_source(source).await?;
            StencilResult::Ok(SourceListing {
                source: source.clone(),
                repositories,
            })
        }))
        .await
    }
}
