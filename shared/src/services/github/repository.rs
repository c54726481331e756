use super::{issue::Label, AccessToken};
use anyhow::Result;
use base64::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct Repository {
    pub full_name: String,
    pub name: String,
    pub owner: Owner,
    labels_url: String,
    releases_url: String,
    tags_url: String,
    compare_url: String,
    contents_url: String,
}

impl Repository {
    pub async fn list_labels(&self, per_page: u32) -> Result<Vec<Label>> {
        tracing::info!("Fetching labels for {}", &self.full_name);

        let gh_token = AccessToken::get().await?;
        let url = self.labels_url.replace("{/name}", "");

        let labels = reqwest::Client::new()
            .get(url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .query(&[("per_page", per_page)])
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Error fetching repo labels: {e}"))?
            .json::<Vec<Label>>()
            .await?;

        Ok(labels)
    }

    /// Reads and parses `.github/{file}` from the default branch. A missing
    /// file is not an error.
    pub async fn get_config<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        tracing::info!("Fetching config file {file}");

        let gh_token = AccessToken::get().await?;
        let url = self.contents_url.replace("{+path}", &format!(".github/{file}"));

        let response = match reqwest::Client::new()
            .get(url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .send()
            .await?
            .error_for_status()
        {
            Ok(res) => res,
            Err(err) => {
                if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
                    return Ok(None);
                }

                tracing::error!("Error fetching config file: {err}");

                Err(err)
            }?,
        };

        let contents = response.json::<RepoFile>().await?;

        // The contents API wraps base64 at 60 columns
        let encoded: String = contents.content.split_whitespace().collect();
        let decoded = BASE64_STANDARD.decode(encoded)?;
        let config = serde_yaml::from_slice(&decoded)?;

        Ok(Some(config))
    }

    pub async fn get_release_by_tag(&self, tag: &str) -> Result<Option<Release>> {
        tracing::info!("Fetching release for tag {tag}");

        let gh_token = AccessToken::get().await?;
        let url = self.releases_url.replace("{/id}", &format!("/tags/{tag}"));

        let response = match reqwest::Client::new()
            .get(url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .send()
            .await?
            .error_for_status()
        {
            Ok(res) => res,
            Err(err) => {
                if err.status() == Some(reqwest::StatusCode::NOT_FOUND) {
                    return Ok(None);
                }

                tracing::error!("Error fetching release by tag: {err}");

                Err(err)
            }?,
        };

        let release: Release = response.json().await?;

        Ok(Some(release))
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        tracing::info!("Fetching tags for {}", &self.full_name);

        let gh_token = AccessToken::get().await?;

        let tags = reqwest::Client::new()
            .get(&self.tags_url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Error fetching repo tags: {e}"))?
            .json::<Vec<Tag>>()
            .await?;

        Ok(tags)
    }

    pub async fn compare(&self, base: &str, head: &str) -> Result<Vec<CommitEntry>> {
        tracing::info!("Comparing {base}...{head}");

        let gh_token = AccessToken::get().await?;
        let url = self
            .compare_url
            .replace("{base}...{head}", &format!("{base}...{head}"));

        let comparison = reqwest::Client::new()
            .get(url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Error comparing commits: {e}"))?
            .json::<Comparison>()
            .await?;

        Ok(comparison.commits)
    }

    pub async fn create_release(&self, tag_name: &str, name: &str, body: &str) -> Result<()> {
        tracing::info!("Creating release {name}");

        let gh_token = AccessToken::get().await?;
        let url = self.releases_url.replace("{/id}", "");

        reqwest::Client::new()
            .post(url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .json(&json!({
                "tag_name": tag_name,
                "name": name,
                "body": body,
            }))
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Error creating release: {e}"))?;

        Ok(())
    }
}

#[derive(Deserialize)]
pub struct Owner {
    pub login: String,
}

#[derive(Deserialize)]
pub struct RepoFile {
    pub content: String,
}

#[derive(Deserialize)]
pub struct Release {
    pub id: u64,
}

#[derive(Deserialize)]
pub struct Tag {
    pub name: String,
}

#[derive(Deserialize)]
struct Comparison {
    commits: Vec<CommitEntry>,
}

#[derive(Deserialize)]
pub struct CommitEntry {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitDetails,
    pub author: Option<CommitUser>,
}

#[derive(Deserialize)]
pub struct CommitDetails {
    pub message: String,
    pub author: GitAuthor,
}

#[derive(Deserialize)]
pub struct GitAuthor {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct CommitUser {
    pub login: String,
}
