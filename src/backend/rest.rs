use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_RANGE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Response, Url};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::{DrillSearch, ProfileBackend, RoundBackend};
use crate::error::BackendError;
use crate::model::{
    CourseTee, Drill, DrillSearchResponse, HoleScoreRow, Profile, ProfileUpdate, RoundRecord,
};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const ROUND_WITH_COURSE: &str = "*,golf_courses:course_id(id,name,city,state,total_par)";
const SEARCH_DRILLS_FN: &str = "search-drills";
const PROFILE_COLUMNS: &str = "id,has_onboarded,handicap_level,goals,first_name,last_name,\
avatar_url,selected_goals,score_goal,handicap_goal";

#[derive(Clone, Debug)]
pub struct RestConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl RestConfig {
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// PostgREST-style client for the hosted tables and edge functions.
#[derive(Clone)]
pub struct RestBackend {
    client: reqwest::Client,
    config: RestConfig,
}

impl RestBackend {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: RestConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    fn base(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn table_url(&self, table: &str, params: &[(&str, String)]) -> Result<Url, BackendError> {
        let raw = format!("{}/rest/v1/{table}", self.base());
        let mut url =
            Url::parse(&raw).map_err(|e| BackendError::new(format!("invalid url {raw}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn function_url(&self, name: &str) -> Result<Url, BackendError> {
        let raw = format!("{}/functions/v1/{name}", self.base());
        Url::parse(&raw).map_err(|e| BackendError::new(format!("invalid url {raw}: {e}")))
    }

    fn auth_headers(&self) -> Result<HeaderMap, BackendError> {
        let key = HeaderValue::from_str(&self.config.api_key)
            .map_err(|e| BackendError::new(format!("invalid api key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| BackendError::new(format!("invalid api key: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("apikey"), key);
        headers.insert(AUTHORIZATION, bearer);
        Ok(headers)
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: Url,
        single: bool,
    ) -> Result<T, BackendError> {
        let mut headers = self.auth_headers()?;
        if single {
            headers.insert(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT));
        }
        let resp = self.client.get(url).headers(headers).send().await?;
        let resp = ensure_success(resp, "GET").await?;
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice::<T>(&bytes)?)
    }
}

async fn ensure_success(resp: Response, method: &str) -> Result<Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let url = resp.url().path().to_string();
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::new(format!(
        "{method} {url} failed with status {status}: {body}"
    )))
}

/// Reads the total out of a PostgREST `Content-Range` header (`0-0/1`, `*/0`).
#[must_use]
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.trim().parse().ok()
}

#[async_trait]
impl RoundBackend for RestBackend {
    async fn count_rounds(&self, round_id: &str) -> Result<u64, BackendError> {
        let url = self.table_url(
            "rounds",
            &[
                ("select", "id".to_string()),
                ("id", format!("eq.{round_id}")),
            ],
        )?;
        let mut headers = self.auth_headers()?;
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("count=exact"),
        );
        let resp = self.client.head(url).headers(headers).send().await?;
        let resp = ensure_success(resp, "HEAD").await?;
        let range = resp
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| BackendError::new("count response missing Content-Range"))?;
        parse_content_range_total(range)
            .ok_or_else(|| BackendError::new(format!("unreadable Content-Range: {range}")))
    }

    async fn fetch_round(&self, round_id: &str) -> Result<RoundRecord, BackendError> {
        let url = self.table_url(
            "rounds",
            &[
                ("select", ROUND_WITH_COURSE.to_string()),
                ("id", format!("eq.{round_id}")),
            ],
        )?;
        self.get_json(url, true).await
    }

    async fn fetch_hole_scores(&self, round_id: &str) -> Result<Vec<HoleScoreRow>, BackendError> {
        let url = self.table_url(
            "hole_scores",
            &[
                ("select", "*".to_string()),
                ("round_id", format!("eq.{round_id}")),
                ("order", "hole_number.asc".to_string()),
            ],
        )?;
        self.get_json(url, false).await
    }

    async fn fetch_course_tees(&self, course_id: &str) -> Result<Vec<CourseTee>, BackendError> {
        let url = self.table_url(
            "course_tees",
            &[
                ("select", "*".to_string()),
                ("course_id", format!("eq.{course_id}")),
            ],
        )?;
        self.get_json(url, false).await
    }
}

#[async_trait]
impl DrillSearch for RestBackend {
    async fn search_drills(&self, query: &str) -> Result<Vec<Drill>, BackendError> {
        let url = self.function_url(SEARCH_DRILLS_FN)?;
        let resp = self
            .client
            .post(url)
            .headers(self.auth_headers()?)
            .json(&json!({ "query": query }))
            .send()
            .await?;
        let resp = ensure_success(resp, "POST").await?;
        let body: DrillSearchResponse = resp.json().await?;
        Ok(body.drills)
    }
}

#[async_trait]
impl ProfileBackend for RestBackend {
    async fn fetch_profile(&self, user_id: &str) -> Result<Option<Profile>, BackendError> {
        let url = self.table_url(
            "profiles",
            &[
                ("select", PROFILE_COLUMNS.to_string()),
                ("id", format!("eq.{user_id}")),
            ],
        )?;
        let rows: Vec<Profile> = self.get_json(url, false).await?;
        Ok(rows.into_iter().next())
    }

    async fn create_profile(&self, user_id: &str) -> Result<(), BackendError> {
        let url = self.table_url("profiles", &[])?;
        let mut headers = self.auth_headers()?;
        headers.insert(
            HeaderName::from_static("prefer"),
            HeaderValue::from_static("return=minimal"),
        );
        let resp = self
            .client
            .post(url)
            .headers(headers)
            .json(&json!({ "id": user_id, "has_onboarded": false }))
            .send()
            .await?;
        ensure_success(resp, "POST").await?;
        Ok(())
    }

    async fn save_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<(), BackendError> {
        let url = self.table_url("profiles", &[("id", format!("eq.{user_id}"))])?;
        let resp = self
            .client
            .patch(url)
            .headers(self.auth_headers()?)
            .json(update)
            .send()
            .await?;
        ensure_success(resp, "PATCH").await?;
        Ok(())
    }
}
