// Async HTTP client for the showroom serverless functions.
//
// Base path: /functions/v1/
// Auth: `Authorization: Bearer <key>` + `apikey: <key>` default headers

use std::time::Duration;

use reqwest::RequestBuilder;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::endpoint::Endpoint;
use crate::envelope::{self, BulkOutcome, Deleted, ErrorBody, Listing, Saved};
use crate::error::Error;
use crate::transport::TransportConfig;

const FUNCTIONS_PREFIX: &str = "/functions/v1";

/// Reject zero and negative identifiers before anything leaves the process.
pub fn validate_id(id: i64) -> Result<i64, Error> {
    if id > 0 {
        Ok(id)
    } else {
        Err(Error::InvalidId { id })
    }
}

// ── Request bodies ───────────────────────────────────────────────────

/// Full-entity update body. The id travels both in the query string and
/// in the body, which is what every handler generation accepts.
#[derive(Serialize)]
struct WithId<'a, B> {
    id: i64,
    #[serde(flatten)]
    fields: &'a B,
}

#[derive(Serialize)]
struct Ids<'a> {
    ids: &'a [i64],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusChange<'a, S> {
    ids: &'a [i64],
    new_status: &'a S,
}

// ── Client ───────────────────────────────────────────────────────────

/// Generic client for every resource endpoint.
///
/// One instance serves all resources; the [`Endpoint`] passed to each call
/// selects the function path and the body keys. Every exchange is bounded
/// by the configured timeout and cancelled when it elapses.
#[derive(Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ResourceClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a project URL and transport config.
    ///
    /// `base_url` is the project root (`https://xyz.supabase.co`) or the
    /// functions root (`https://xyz.supabase.co/functions/v1`).
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, transport.timeout)
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    /// Ensure the base URL ends with `/functions/v1/` so endpoint paths join.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with(FUNCTIONS_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{FUNCTIONS_PREFIX}/"));
        }

        Ok(url)
    }

    /// The normalized functions root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Upper bound applied to every exchange.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, endpoint: &Endpoint) -> Result<Url, Error> {
        Ok(self.base_url.join(endpoint.path)?)
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Fetch the full collection.
    pub async fn list<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<Listing<T>, Error> {
        self.list_with(endpoint, &[]).await
    }

    /// Fetch the collection with query filters (e.g. `status`, `category`).
    pub async fn list_with<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, String)],
    ) -> Result<Listing<T>, Error> {
        let url = self.url(endpoint)?;
        debug!("GET {url} params={params:?}");

        let (body, raw) = self.exchange(self.http.get(url).query(params)).await?;
        envelope::listing(endpoint, body, &raw)
    }

    /// Create a row from a draft (no id).
    pub async fn create<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &Endpoint,
        draft: &B,
    ) -> Result<Saved<T>, Error> {
        let url = self.url(endpoint)?;
        debug!("POST {url}");

        let (body, raw) = self.exchange(self.http.post(url).json(draft)).await?;
        envelope::saved(endpoint, body, &raw)
    }

    /// Replace every field of row `id`.
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        endpoint: &Endpoint,
        id: i64,
        draft: &B,
    ) -> Result<Saved<T>, Error> {
        let id = validate_id(id)?;
        let url = self.url(endpoint)?;
        debug!("PUT {url} id={id}");

        let request = self
            .http
            .put(url)
            .query(&[("id", id)])
            .json(&WithId { id, fields: draft });
        let (body, raw) = self.exchange(request).await?;
        envelope::saved(endpoint, body, &raw)
    }

    /// Destroy row `id`.
    pub async fn delete(&self, endpoint: &Endpoint, id: i64) -> Result<Deleted, Error> {
        let id = validate_id(id)?;
        let url = self.url(endpoint)?;
        debug!("DELETE {url} id={id}");

        let (body, _) = self.exchange(self.http.delete(url).query(&[("id", id)])).await?;
        envelope::deleted(id, body)
    }

    /// Destroy several rows; the backend applies it per item.
    pub async fn delete_many(
        &self,
        endpoint: &Endpoint,
        ids: &[i64],
    ) -> Result<BulkOutcome, Error> {
        if ids.is_empty() {
            return Ok(BulkOutcome::default());
        }
        for &id in ids {
            validate_id(id)?;
        }
        let url = self.url(endpoint)?;
        debug!("DELETE {url} ids={ids:?}");

        let (body, raw) = self.exchange(self.http.delete(url).json(&Ids { ids })).await?;
        envelope::bulk(body, &raw)
    }

    /// Move several rows to `new_status`; the backend applies it per item.
    pub async fn update_status_many<S: Serialize + Sync>(
        &self,
        endpoint: &Endpoint,
        ids: &[i64],
        new_status: &S,
    ) -> Result<BulkOutcome, Error> {
        if ids.is_empty() {
            return Ok(BulkOutcome::default());
        }
        for &id in ids {
            validate_id(id)?;
        }
        let url = self.url(endpoint)?;
        debug!("PUT {url} ids={ids:?}");

        let request = self.http.put(url).json(&StatusChange { ids, new_status });
        let (body, raw) = self.exchange(request).await?;
        envelope::bulk(body, &raw)
    }

    // ── Response handling ────────────────────────────────────────────

    /// Send and read the body inside the time budget, then classify.
    async fn exchange(&self, request: RequestBuilder) -> Result<(Value, String), Error> {
        let round_trip = async {
            let resp = request.send().await?;
            let status = resp.status();
            let body = resp.text().await?;
            Ok::<_, Error>((status, body))
        };

        let (status, raw) = tokio::time::timeout(self.timeout, round_trip)
            .await
            .map_err(|_| Error::Timeout {
                timeout: self.timeout,
            })??;

        if !status.is_success() {
            return Err(parse_error(status, raw));
        }

        match serde_json::from_str::<Value>(&raw) {
            Ok(body) => Ok((body, raw)),
            Err(e) => {
                let preview: String = raw.chars().take(200).collect();
                Err(Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body: raw,
                })
            }
        }
    }
}

fn parse_error(status: reqwest::StatusCode, raw: String) -> Error {
    let parsed = serde_json::from_str::<ErrorBody>(&raw).ok();
    let code = parsed.as_ref().and_then(|b| b.code.clone());
    let message = parsed
        .and_then(|b| b.error.or(b.message))
        .or_else(|| (!raw.trim().is_empty()).then_some(raw))
        .unwrap_or_else(|| status.to_string());

    Error::Api {
        status: status.as_u16(),
        message,
        code,
    }
}
