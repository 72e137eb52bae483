//! Elasticsearch REST implementation of [`SearchEngine`]

use crate::config::EngineConfig;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::traits::SearchEngine;
use crate::engine::types::{
    AliasAction, AliasTargets, IndexDefinition, IndexDocument, SearchParams, SearchResponse,
};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
enum Credentials {
    Anonymous,
    Basic {
        username: String,
        password: Option<String>,
    },
    ApiKey(String),
}

/// Search engine reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpEngine {
    client: Client,
    base_url: String,
    credentials: Credentials,
    reindex_timeout: Duration,
}

impl HttpEngine {
    /// Create a new engine client
    pub fn new(config: &EngineConfig) -> EngineResult<Self> {
        config.validate().map_err(EngineError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("indice-manager/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EngineError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let credentials = match (&config.api_key, &config.username) {
            (Some(key), _) => Credentials::ApiKey(key.clone()),
            (None, Some(username)) => Credentials::Basic {
                username: username.clone(),
                password: config.password.clone(),
            },
            (None, None) => Credentials::Anonymous,
        };

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            credentials,
            reindex_timeout: Duration::from_secs(config.reindex_timeout_secs),
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);

        match &self.credentials {
            Credentials::Anonymous => builder,
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, password.as_deref())
            }
            Credentials::ApiKey(key) => builder.header("Authorization", format!("ApiKey {}", key)),
        }
    }

    /// Send a request and turn non-2xx answers into [`EngineError::Status`]
    async fn send(&self, builder: RequestBuilder, operation: &str) -> EngineResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        debug!(operation = operation, status = status.as_u16(), "Search engine response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(EngineError::status(status.as_u16(), operation, body))
    }

    /// HEAD-style probe: 200 is true, 404 is false, anything else is an error
    async fn probe(&self, builder: RequestBuilder, operation: &str) -> EngineResult<bool> {
        let response = builder.send().await?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(EngineError::status(
                status.as_u16(),
                operation,
                response.text().await.unwrap_or_default(),
            )),
        }
    }
}

#[async_trait]
impl SearchEngine for HttpEngine {
    async fn index_exists(&self, name: &str) -> EngineResult<bool> {
        self.probe(self.request(Method::HEAD, name), "index exists")
            .await
    }

    async fn create_index(&self, name: &str, definition: &IndexDefinition) -> EngineResult<()> {
        self.send(
            self.request(Method::PUT, name).json(definition),
            "create index",
        )
        .await?;
        Ok(())
    }

    async fn delete_index(&self, name: &str) -> EngineResult<()> {
        self.send(self.request(Method::DELETE, name), "delete index")
            .await?;
        Ok(())
    }

    async fn refresh_index(&self, name: &str) -> EngineResult<()> {
        self.send(
            self.request(Method::POST, &format!("{}/_refresh", name)),
            "refresh index",
        )
        .await?;
        Ok(())
    }

    async fn alias_exists(&self, indices: &[String], alias: &str) -> EngineResult<bool> {
        let path = format!("{}/_alias/{}", indices.join(","), alias);
        self.probe(self.request(Method::HEAD, &path), "alias exists")
            .await
    }

    async fn get_alias(&self, alias: &str) -> EngineResult<AliasTargets> {
        let builder = self.request(Method::GET, &format!("_alias/{}", alias));

        match self.send(builder, "get alias").await {
            Ok(response) => {
                let targets: AliasTargets = response.json().await?;
                Ok(targets)
            }
            Err(err) if err.is_not_found() => Ok(AliasTargets::new()),
            Err(err) => Err(err),
        }
    }

    async fn put_alias(&self, alias: &str, index: &str) -> EngineResult<()> {
        self.send(
            self.request(Method::PUT, &format!("{}/_alias/{}", index, alias)),
            "put alias",
        )
        .await?;
        Ok(())
    }

    async fn update_aliases(&self, actions: &[AliasAction]) -> EngineResult<()> {
        self.send(
            self.request(Method::POST, "_aliases")
                .json(&json!({ "actions": actions })),
            "update aliases",
        )
        .await?;
        Ok(())
    }

    async fn reindex(
        &self,
        source: &str,
        dest: &str,
        wait_for_completion: bool,
    ) -> EngineResult<()> {
        let body = json!({
            "source": { "index": source },
            "dest": { "index": dest }
        });

        self.send(
            self.request(Method::POST, "_reindex")
                .query(&[("wait_for_completion", wait_for_completion.to_string())])
                .timeout(self.reindex_timeout)
                .json(&body),
            "reindex",
        )
        .await?;
        Ok(())
    }

    async fn search(&self, params: &SearchParams) -> EngineResult<SearchResponse> {
        let path = match &params.doc_type {
            Some(doc_type) => format!("{}/{}/_search", params.index, doc_type),
            None => format!("{}/_search", params.index),
        };

        let mut builder = self
            .request(Method::POST, &path)
            .query(&[("size", params.size), ("from", params.from)]);

        if !params.body.is_null() {
            builder = builder.json(&params.body);
        }

        let response = self.send(builder, "search").await?;
        let body: Value = response.json().await?;
        Ok(serde_json::from_value(body)?)
    }

    async fn index_document(&self, document: &IndexDocument) -> EngineResult<()> {
        let doc_type = document.doc_type.as_deref().unwrap_or("_doc");
        let (method, path) = match &document.id {
            Some(id) => (Method::PUT, format!("{}/{}/{}", document.index, doc_type, id)),
            None => (Method::POST, format!("{}/{}", document.index, doc_type)),
        };

        let refresh = if document.refresh { "true" } else { "false" };

        self.send(
            self.request(method, &path)
                .query(&[("refresh", refresh)])
                .json(&document.document),
            "index document",
        )
        .await?;
        Ok(())
    }
}
