use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::client::{ListPage, ListQuery, Record, RecordStore};
use crate::config::ApiConfig;
use crate::error::RecordError;

/// Response header carrying the total number of matching records.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// [`RecordStore`] backed by a json-server style REST API.
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base_url: Url,
}

impl RestClient {
    pub fn new(config: &ApiConfig) -> Result<Self, RecordError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| RecordError::InvalidUrl {
            url: config.base_url.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(RecordError::InvalidUrl {
                url: config.base_url.clone(),
                message: "URL cannot have path segments".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .connect_timeout(Duration::from_secs(u64::from(config.connect_timeout_seconds)))
            .build()
            .map_err(|e| RecordError::Connection {
                url: config.base_url.clone(),
                source: e,
            })?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{entity}[/{id}]`, with segments percent-encoded.
    fn url(&self, segments: &[&str]) -> Result<Url, RecordError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| RecordError::InvalidUrl {
                url: self.base_url.to_string(),
                message: "URL cannot have path segments".to_string(),
            })?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<Response, RecordError> {
        request.send().await.map_err(|e| RecordError::Connection {
            url: url.to_string(),
            source: e,
        })
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        url: &Url,
    ) -> Result<T, RecordError> {
        let bytes = response.bytes().await.map_err(|e| RecordError::Connection {
            url: url.to_string(),
            source: e,
        })?;
        serde_json::from_slice(&bytes).map_err(|e| RecordError::Decode {
            url: url.to_string(),
            source: e,
        })
    }

    async fn send_json(
        &self,
        request: RequestBuilder,
        url: &Url,
        entity: &str,
        id: Option<&str>,
    ) -> Result<Record, RecordError> {
        let response = self.send(request, url).await?;
        let response = check_status(response, url, entity, id)?;
        Self::read_json(response, url).await
    }
}

/// Map non-success statuses onto [`RecordError`]. 404 on an id-addressed
/// call is `NotFound`; everything else is `Transport`.
fn check_status(
    response: Response,
    url: &Url,
    entity: &str,
    id: Option<&str>,
) -> Result<Response, RecordError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if let (StatusCode::NOT_FOUND, Some(id)) = (status, id) {
        return Err(RecordError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        });
    }
    Err(RecordError::Transport {
        status: status.as_u16(),
        url: url.to_string(),
    })
}

/// Total count from the response headers, if present and numeric.
pub(crate) fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[async_trait]
impl RecordStore for RestClient {
    async fn list(&self, entity: &str, query: &ListQuery) -> Result<ListPage, RecordError> {
        let mut url = self.url(&[entity])?;
        let params = query.to_params();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &params {
                pairs.append_pair(key, value);
            }
        }
        tracing::debug!(%url, "GET list");

        let response = self.send(self.http.get(url.clone()), &url).await?;
        let response = check_status(response, &url, entity, None)?;
        let reported = total_count(response.headers());
        let records: Vec<Record> = Self::read_json(response, &url).await?;

        let total = match reported {
            Some(total) => total,
            None => {
                tracing::debug!(%url, "total count header missing; using page length");
                records.len() as u64
            }
        };

        Ok(ListPage {
            records,
            total,
            total_reported: reported.is_some(),
        })
    }

    async fn get_by_id(&self, entity: &str, id: &str) -> Result<Record, RecordError> {
        let url = self.url(&[entity, id])?;
        tracing::debug!(%url, "GET record");
        self.send_json(self.http.get(url.clone()), &url, entity, Some(id))
            .await
    }

    async fn create(&self, entity: &str, payload: &Record) -> Result<Record, RecordError> {
        let url = self.url(&[entity])?;
        tracing::debug!(%url, "POST record");
        let request = self.http.post(url.clone()).json(payload);
        self.send_json(request, &url, entity, None).await
    }

    async fn update(
        &self,
        entity: &str,
        id: &str,
        payload: &Record,
    ) -> Result<Record, RecordError> {
        let url = self.url(&[entity, id])?;
        tracing::debug!(%url, "PUT record");
        let request = self.http.put(url.clone()).json(payload);
        self.send_json(request, &url, entity, Some(id)).await
    }

    async fn patch(&self, entity: &str, id: &str, payload: &Record) -> Result<Record, RecordError> {
        let url = self.url(&[entity, id])?;
        tracing::debug!(%url, "PATCH record");
        let request = self.http.patch(url.clone()).json(payload);
        self.send_json(request, &url, entity, Some(id)).await
    }

    async fn remove(&self, entity: &str, id: &str) -> Result<(), RecordError> {
        let url = self.url(&[entity, id])?;
        tracing::debug!(%url, "DELETE record");
        let response = self.send(self.http.delete(url.clone()), &url).await?;
        check_status(response, &url, entity, Some(id))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn client(base_url: &str) -> RestClient {
        RestClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn collection_url_appends_entity() {
        let url = client("http://localhost:3000").url(&["students"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/students");
    }

    #[test]
    fn trailing_slash_and_prefix_are_kept() {
        let url = client("http://localhost:3000/api/").url(&["courses", "4"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/courses/4");
    }

    #[test]
    fn ids_are_percent_encoded() {
        let url = client("http://localhost:3000").url(&["students", "a/b"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/students/a%2Fb");
    }

    #[test]
    fn non_base_url_is_rejected() {
        let result = RestClient::new(&ApiConfig {
            base_url: "mailto:admin@example.com".to_string(),
            ..ApiConfig::default()
        });
        assert!(matches!(result, Err(RecordError::InvalidUrl { .. })));
    }

    #[test]
    fn total_count_parses_header() {
        let mut headers = HeaderMap::new();
        assert_eq!(total_count(&headers), None);
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("23"));
        assert_eq!(total_count(&headers), Some(23));
        headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from_static("many"));
        assert_eq!(total_count(&headers), None);
    }
}
