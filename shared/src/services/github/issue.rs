use super::{config::LabelerConfig, AccessToken};
use anyhow::Result;
use serde::Deserialize;
use serde_json::json;

#[derive(Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    pub body: Option<String>,
    pub user: User,
    url: String,
    comments_url: String,
    labels_url: String,
}

impl Issue {
    /// Repository labels whose name occurs in the issue title or body,
    /// minus the configured exclusions.
    pub fn matching_labels(&self, repo_labels: &[Label], config: &LabelerConfig) -> Vec<String> {
        let title = self.title.to_lowercase();
        let body = self.body.as_deref().unwrap_or_default().to_lowercase();

        repo_labels
            .iter()
            .filter(|label| !config.exclude_labels.contains(&label.name))
            .filter(|label| {
                let needle = label.name.to_lowercase();
                title.contains(&needle) || body.contains(&needle)
            })
            .map(|label| label.name.clone())
            .collect()
    }

    pub async fn add_comment(&self, comment: &str) -> Result<()> {
        tracing::info!("Adding issue #{} comment", &self.number);

        let gh_token = AccessToken::get().await?;

        reqwest::Client::new()
            .post(&self.comments_url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .json(&json!({ "body": comment }))
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Error adding issue comment: {e}"))?;

        Ok(())
    }

    pub async fn add_labels(&self, labels: &[String]) -> Result<()> {
        tracing::info!("Adding labels {labels:?} to issue #{}", &self.number);

        let gh_token = AccessToken::get().await?;
        let url = self.labels_url.replace("{/name}", "");

        reqwest::Client::new()
            .post(url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .json(&json!({ "labels": labels }))
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Error adding issue labels: {e}"))?;

        Ok(())
    }

    pub async fn add_assignees(&self, assignees: &[String]) -> Result<()> {
        tracing::info!("Assigning {assignees:?} to issue #{}", &self.number);

        let gh_token = AccessToken::get().await?;
        let url = format!("{}/assignees", &self.url);

        reqwest::Client::new()
            .post(url)
            .bearer_auth(gh_token)
            .header("Accept", "application/json")
            .header("User-Agent", "Otto")
            .json(&json!({ "assignees": assignees }))
            .send()
            .await?
            .error_for_status()
            .inspect_err(|e| tracing::error!("Error adding issue assignees: {e}"))?;

        Ok(())
    }
}

#[derive(Deserialize)]
pub struct Label {
    pub name: String,
}

#[derive(Deserialize)]
pub struct User {
    pub login: String,
    r#type: UserType,
}

impl User {
    pub fn is_bot(&self) -> bool {
        matches!(self.r#type, UserType::Bot)
    }
}

#[derive(Deserialize)]
enum UserType {
    User,
    Bot,
    Organization,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str, body: Option<&str>) -> Issue {
        Issue {
            number: 1,
            title: title.to_string(),
            body: body.map(String::from),
            user: User {
                login: "octocat".to_string(),
                r#type: UserType::User,
            },
            url: String::new(),
            comments_url: String::new(),
            labels_url: String::new(),
        }
    }

    fn labels(names: &[&str]) -> Vec<Label> {
        names
            .iter()
            .map(|n| Label {
                name: n.to_string(),
            })
            .collect()
    }

    #[test]
    fn matches_labels_in_title_and_body() {
        let issue = issue("Bug in the parser", Some("Related to performance"));
        let repo_labels = labels(&["bug", "performance", "docs"]);

        let matched = issue.matching_labels(&repo_labels, &LabelerConfig::default());

        assert_eq!(matched, vec!["bug", "performance"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let issue = issue("BUG everywhere", None);
        let repo_labels = labels(&["Bug"]);

        let matched = issue.matching_labels(&repo_labels, &LabelerConfig::default());

        assert_eq!(matched, vec!["Bug"]);
    }

    #[test]
    fn excluded_labels_are_skipped() {
        let issue = issue("A duplicate bug", None);
        let repo_labels = labels(&["bug", "duplicate"]);
        let config = LabelerConfig {
            exclude_labels: vec!["duplicate".to_string()],
            ..Default::default()
        };

        let matched = issue.matching_labels(&repo_labels, &config);

        assert_eq!(matched, vec!["bug"]);
    }

    #[test]
    fn no_matches_yields_empty_list() {
        let issue = issue("Question about roadmap", None);
        let repo_labels = labels(&["bug", "docs"]);

        let matched = issue.matching_labels(&repo_labels, &LabelerConfig::default());

        assert!(matched.is_empty());
    }

    #[test]
    fn missing_body_only_matches_title() {
        let issue = issue("docs are stale", None);
        let repo_labels = labels(&["docs", "bug"]);

        let matched = issue.matching_labels(&repo_labels, &LabelerConfig::default());

        assert_eq!(matched, vec!["docs"]);
    }
}
