use async_trait::async_trait;
use graphshell_core::config::Settings;
use graphshell_core::error::{GraphshellError, Result};
use graphshell_core::models::{SearchMode, SearchOptions, SearchResponse};
use graphshell_core::ports::{
    BasicSearchTables, DriftSearchTables, GlobalSearchTables, LocalSearchTables, SearchEngine,
};
use serde::Serialize;
use std::time::Duration;

/// Retrieval service client
pub struct HttpSearchEngine {
    /// Base URL of the service (e.g., "http://127.0.0.1:8010")
    base_url: String,

    /// Sent as a bearer token when present
    api_key: Option<String>,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpSearchEngine {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build().map_err(|e| {
            GraphshellError::EngineUnavailable {
                reason: format!("Failed to build HTTP client: {}", e),
                remediation: "Check the TLS configuration of this host".to_string(),
            }
        })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Client for the endpoint configured in `[engine]`
    pub fn from_settings(settings: &Settings, api_key: Option<String>) -> Result<Self> {
        Self::new(
            settings.engine.endpoint.clone(),
            api_key,
            Duration::from_secs(settings.engine.timeout_secs),
        )
    }

    pub fn search_url(&self, mode: SearchMode) -> String {
        format!("{}/search/{}", self.base_url, mode.as_str())
    }

    async fn post<T: Serialize + Send + Sync>(
        &self,
        mode: SearchMode,
        request: &SearchRequest<'_, T>,
    ) -> Result<SearchResponse> {
        let mut builder = self.client.post(self.search_url(mode)).json(request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(mode = %mode, url = %self.search_url(mode), "Dispatching search request");

        let response = builder.send().await.map_err(|e| {
            if e.is_connect() {
                GraphshellError::EngineUnavailable {
                    reason: format!("Failed to connect to retrieval service: {}", e),
                    remediation: format!(
                        "Ensure the retrieval service is running at {} or set GRAPHSHELL_ENGINE_ENDPOINT",
                        self.base_url
                    ),
                }
            } else if e.is_timeout() {
                GraphshellError::Search {
                    mode: mode.to_string(),
                    reason: "request timed out".to_string(),
                }
            } else {
                GraphshellError::Search {
                    mode: mode.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GraphshellError::Search {
                mode: mode.to_string(),
                reason: format!("service returned {}: {}", status, error_text.trim()),
            });
        }

        response.json::<SearchResponse>().await.map_err(|e| GraphshellError::Search {
            mode: mode.to_string(),
            reason: format!("Failed to parse service response: {}", e),
        })
    }
}

/// Request body shared by every search endpoint
#[derive(Debug, Serialize)]
struct SearchRequest<'a, T> {
    query: &'a str,
    options: &'a SearchOptions,
    config: &'a Settings,
    tables: T,
}

#[async_trait]
impl SearchEngine for HttpSearchEngine {
    async fn global_search(
        &self,
        settings: &Settings,
        tables: GlobalSearchTables<'_>,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse> {
        let request = SearchRequest {
            query,
            options,
            config: settings,
            tables,
        };
        self.post(SearchMode::Global, &request).await
    }

    async fn local_search(
        &self,
        settings: &Settings,
        tables: LocalSearchTables<'_>,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse> {
        let request = SearchRequest {
            query,
            options,
            config: settings,
            tables,
        };
        self.post(SearchMode::Local, &request).await
    }

    async fn drift_search(
        &self,
        settings: &Settings,
        tables: DriftSearchTables<'_>,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse> {
        let request = SearchRequest {
            query,
            options,
            config: settings,
            tables,
        };
        self.post(SearchMode::Drift, &request).await
    }

    async fn basic_search(
        &self,
        settings: &Settings,
        tables: BasicSearchTables<'_>,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse> {
        let request = SearchRequest {
            query,
            options,
            config: settings,
            tables,
        };
        self.post(SearchMode::Basic, &request).await
    }
}
