pub mod config;
pub mod issue;
pub mod release_notes;
pub mod repository;
pub use issue::{Issue, Label, User};
pub use repository::Repository;

use crate::utils::{config as env, jwt};
use anyhow::Result;
use serde::Deserialize;
use tokio::sync::OnceCell;

#[derive(Deserialize)]
pub struct AccessToken {
    token: String,
}

pub static GITHUB_ACCESS_TOKEN: OnceCell<String> = OnceCell::const_new();

impl AccessToken {
    pub async fn get() -> Result<&'static String> {
        GITHUB_ACCESS_TOKEN.get_or_try_init(Self::fetch).await
    }

    async fn fetch() -> Result<String> {
        // A plain token takes precedence over App credentials when provided
        if let Some(github_token) = env::get_optional("GITHUB_TOKEN") {
            return Ok(github_token);
        }

        let gh_base_url = env::get("GITHUB_BASE_URL");
        let gh_app_install_id = env::get("GITHUB_APP_INSTALLATION_ID");

        let jwt_token = jwt::create_github_token();
        let url = format!("{gh_base_url}/app/installations/{gh_app_install_id}/access_tokens");

        let access_token = reqwest::Client::new()
            .post(url)
            .bearer_auth(jwt_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Error fetching GitHub access token: {e}"))?
            .json::<Self>()
            .await?
            .token;

        Ok(access_token)
    }
}
