use crate::config::RunConfig;
use crate::domain::models::{PageInfo, ProjectRecord, ProjectsPage, Settings};
use crate::services::query::build_query;
use serde::Deserialize;
use serde_json::Value;

#[derive(thiserror::Error, Debug)]
pub enum GitlabError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("query failed with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("GraphQL errors: {0}")]
    GraphQl(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("page {0} reports more results but carries no endCursor")]
    MissingCursor(usize),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: Option<EnvelopeData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    projects: Option<ProjectsConnection>,
}

#[derive(Debug, Deserialize)]
struct ProjectsConnection {
    #[serde(default)]
    nodes: Vec<Value>,
    #[serde(rename = "pageInfo", default)]
    page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct NodeIdentity {
    id: String,
    name: String,
    #[serde(rename = "fullPath")]
    full_path: String,
}

/// Anything that can answer one page query.
pub trait PageSource {
    fn fetch_page(&self, query: &str) -> Result<ProjectsPage, GitlabError>;
}

pub struct GitlabClient {
    endpoint: String,
    token: String,
    http: reqwest::blocking::Client,
}

impl GitlabClient {
    pub fn new(config: &RunConfig) -> Result<Self, GitlabError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(concat!("projaudit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| GitlabError::Transport {
                endpoint: config.endpoint.clone(),
                source,
            })?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
            http,
        })
    }

    fn transport(&self, source: reqwest::Error) -> GitlabError {
        GitlabError::Transport {
            endpoint: self.endpoint.clone(),
            source,
        }
    }
}

impl PageSource for GitlabClient {
    fn fetch_page(&self, query: &str) -> Result<ProjectsPage, GitlabError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "query": query }))
            .send()
            .map_err(|e| self.transport(e))?;
        let status = resp.status();
        let body = resp.text().map_err(|e| self.transport(e))?;
        if !status.is_success() {
            return Err(GitlabError::Status {
                status: status.as_u16(),
                body,
            });
        }
        parse_page(&body)
    }
}

pub fn parse_page(body: &str) -> Result<ProjectsPage, GitlabError> {
    let envelope: Envelope =
        serde_json::from_str(body).map_err(|e| GitlabError::Malformed(e.to_string()))?;
    if !envelope.errors.is_empty() {
        let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
        return Err(GitlabError::GraphQl(messages.join("; ")));
    }
    let connection = envelope
        .data
        .and_then(|d| d.projects)
        .ok_or_else(|| GitlabError::Malformed("missing data.projects".to_string()))?;
    let nodes = connection
        .nodes
        .into_iter()
        .map(record_from_node)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ProjectsPage {
        nodes,
        page_info: connection.page_info,
    })
}

fn record_from_node(raw: Value) -> Result<ProjectRecord, GitlabError> {
    let identity: NodeIdentity = serde_json::from_value(raw.clone())
        .map_err(|e| GitlabError::Malformed(format!("project node: {}", e)))?;
    Ok(ProjectRecord {
        id: identity.id,
        name: identity.name,
        full_path: identity.full_path,
        raw,
    })
}

/// Pulls every page in order, feeding each `endCursor` into the next query.
pub fn fetch_all_projects<S: PageSource>(
    source: &S,
    settings: &Settings,
    page_size: u32,
) -> Result<Vec<ProjectRecord>, GitlabError> {
    let mut cursor: Option<String> = None;
    let mut all = Vec::new();
    let mut page_no = 0usize;
    loop {
        page_no += 1;
        let query = build_query(settings, cursor.as_deref(), page_size);
        tracing::trace!(page = page_no, %query, "projects query");
        let page = source.fetch_page(&query)?;
        tracing::debug!(
            page = page_no,
            nodes = page.nodes.len(),
            has_next = page.page_info.has_next_page,
            "fetched projects page"
        );
        all.extend(page.nodes);
        if !page.page_info.has_next_page {
            break;
        }
        match page.page_info.end_cursor {
            Some(c) => cursor = Some(c),
            None => return Err(GitlabError::MissingCursor(page_no)),
        }
    }
    tracing::info!(pages = page_no, projects = all.len(), "fetched all projects");
    Ok(all)
}
