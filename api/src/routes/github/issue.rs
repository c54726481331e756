use crate::middleware::validation::GithubEvent;
use anyhow::Result;
use futures::future::try_join;
use hyper::StatusCode;
use serde::Deserialize;
use shared::{
    services::github::{
        config::{AutoAssignConfig, LabelerConfig, AUTO_ASSIGN_FILE, LABELER_FILE},
        Issue, Label, Repository,
    },
    utils::error::AppError,
};

pub async fn process(
    GithubEvent(IssuesEvent {
        action,
        issue,
        label,
        repository: repo,
    }): GithubEvent<IssuesEvent>,
) -> Result<StatusCode, AppError> {
    tracing::info!("Processing {} issue #{} '{action}'", repo.name, issue.number);

    match action.as_str() {
        "opened" => {
            if issue.user.is_bot() {
                tracing::info!("Opened by a bot, skipping");
                return Ok(StatusCode::OK);
            }

            try_join(greet(&issue), label_by_keywords(&issue, &repo)).await?;
        }
        "labeled" => {
            let Some(label) = label else {
                return Ok(StatusCode::OK);
            };

            assign_for_label(&issue, &repo, &label).await?;
        }
        _ => {
            tracing::info!("Is ignored '{action}' action, skipping");
        }
    }

    Ok(StatusCode::OK)
}

async fn greet(issue: &Issue) -> Result<()> {
    issue.add_comment("Thanks for opening this issue!").await
}

async fn label_by_keywords(issue: &Issue, repo: &Repository) -> Result<()> {
    let config = repo
        .get_config::<LabelerConfig>(LABELER_FILE)
        .await?
        .unwrap_or_default();

    let repo_labels = repo.list_labels(config.num_labels).await?;
    let labels = issue.matching_labels(&repo_labels, &config);

    if labels.is_empty() {
        tracing::info!("No labels match issue #{}, skipping", issue.number);
        return Ok(());
    }

    issue.add_labels(&labels).await
}

async fn assign_for_label(issue: &Issue, repo: &Repository, label: &Label) -> Result<()> {
    let Some(config) = repo.get_config::<AutoAssignConfig>(AUTO_ASSIGN_FILE).await? else {
        tracing::info!("No auto-assign config in {}, skipping", repo.name);
        return Ok(());
    };

    let Some(assignees) = config.label_to_author.get(&label.name) else {
        tracing::info!("No assignees mapped to '{}', skipping", label.name);
        return Ok(());
    };

    if assignees.is_empty() {
        return Ok(());
    }

    issue.add_assignees(assignees).await
}

#[derive(Deserialize)]
pub struct IssuesEvent {
    pub action: String,
    pub issue: Issue,
    pub label: Option<Label>,
    pub repository: Repository,
}
