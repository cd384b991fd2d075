use crate::http::HttpClient;
use crate::{HostedAuthClient, REST_PATH};

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use rw_config::Config;
use rw_core::{NewProfile, Profile};
use rw_session::{ProfileStore, SessionResult};

/// Profile table served by the hosted REST API
pub struct HostedProfileStore {
    http: HttpClient,
    table: String,
    auth: Option<Arc<HostedAuthClient>>,
}

impl HostedProfileStore {
    pub fn new(config: &Config) -> SessionResult<Self> {
        let base_url = format!("{}{REST_PATH}", config.hosted.base_url());
        Ok(Self {
            http: HttpClient::new(&base_url, &config.hosted.anon_key, config.http.timeout())?,
            table: config.hosted.profile_table.clone(),
            auth: None,
        })
    }

    /// Authorize requests with the signed-in user's token when there is one
    pub fn with_auth(mut self, auth: Arc<HostedAuthClient>) -> Self {
        self.auth = Some(auth);
        self
    }

    fn bearer(&self) -> Option<String> {
        self.auth.as_ref().and_then(|auth| auth.access_token())
    }
}

#[async_trait]
impl ProfileStore for HostedProfileStore {
    async fn fetch_profile(&self, id: &str) -> SessionResult<Option<Profile>> {
        let filter = format!("eq.{id}");
        let url = self.http.url(
            &format!("/{}", self.table),
            &[("id", filter.as_str()), ("select", "name,role")],
        )?;
        let req = self
            .http
            .request(Method::GET, url, self.bearer().as_deref());

        let rows: Vec<Profile> = self.http.execute(req).await?;
        debug!("Profile lookup for {id}: {} row(s)", rows.len());
        Ok(rows.into_iter().next())
    }

    async fn create_profile(&self, profile: &NewProfile) -> SessionResult<()> {
        let url = self.http.url(&format!("/{}", self.table), &[])?;
        let req = self
            .http
            .request(Method::POST, url, self.bearer().as_deref())
            .header("Prefer", "return=minimal")
            .json(profile);

        self.http.execute_empty(req).await?;
        debug!("Created profile row for {}", profile.id);
        Ok(())
    }
}
