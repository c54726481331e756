use crate::middleware::validation::GithubEvent;
use hyper::StatusCode;
use serde::Deserialize;
use shared::{
    services::github::{release_notes, Repository},
    utils::error::AppError,
};

pub async fn release_notes(
    GithubEvent(CreateEvent {
        r#ref: tag,
        ref_type,
        repository: repo,
    }): GithubEvent<CreateEvent>,
) -> Result<StatusCode, AppError> {
    tracing::info!("Processing {} created ref {tag}", repo.name);

    if ref_type != "tag" {
        tracing::info!("Is ignored '{ref_type}' ref, skipping");
        return Ok(StatusCode::OK);
    }

    if repo.get_release_by_tag(&tag).await?.is_some() {
        tracing::info!("Release for {tag} already exists, skipping");
        return Ok(StatusCode::OK);
    }

    let tags = repo.list_tags().await?;

    // The fresh tag plus at least one older one to diff against
    if tags.len() < 2 {
        tracing::info!("Not enough tags to compare, skipping");
        return Ok(StatusCode::OK);
    }

    let head = &tags[0].name;
    let base = &tags[1].name;

    let commits = repo.compare(base, head).await?;

    let Some(body) = release_notes::build(&commits) else {
        tracing::info!("No commits between {base} and {head}, skipping");
        return Ok(StatusCode::OK);
    };

    let name = format!("{tag} @{}", repo.owner.login);

    repo.create_release(&tag, &name, &body).await?;

    Ok(StatusCode::OK)
}

#[derive(Deserialize)]
pub struct CreateEvent {
    pub r#ref: String,
    pub ref_type: String,
    pub repository: Repository,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialises_tag_create_payload() {
        let payload = serde_json::json!({
            "ref": "v1.2.0",
            "ref_type": "tag",
            "repository": {
                "full_name": "octo/repo",
                "name": "repo",
                "owner": { "login": "octo" },
                "labels_url": "https://api.github.com/repos/octo/repo/labels{/name}",
                "releases_url": "https://api.github.com/repos/octo/repo/releases{/id}",
                "tags_url": "https://api.github.com/repos/octo/repo/tags",
                "compare_url": "https://api.github.com/repos/octo/repo/compare/{base}...{head}",
                "contents_url": "https://api.github.com/repos/octo/repo/contents/{+path}"
            }
        });

        let event: CreateEvent = serde_json::from_value(payload).unwrap();

        assert_eq!(event.r#ref, "v1.2.0");
        assert_eq!(event.ref_type, "tag");
        assert_eq!(event.repository.owner.login, "octo");
    }

    #[test]
    fn deserialises_branch_create_payload() {
        let payload = serde_json::json!({
            "ref": "feature/dark-mode",
            "ref_type": "branch",
            "repository": {
                "full_name": "octo/repo",
                "name": "repo",
                "owner": { "login": "octo" },
                "labels_url": "https://api.github.com/repos/octo/repo/labels{/name}",
                "releases_url": "https://api.github.com/repos/octo/repo/releases{/id}",
                "tags_url": "https://api.github.com/repos/octo/repo/tags",
                "compare_url": "https://api.github.com/repos/octo/repo/compare/{base}...{head}",
                "contents_url": "https://api.github.com/repos/octo/repo/contents/{+path}"
            }
        });

        let event: CreateEvent = serde_json::from_value(payload).unwrap();

        assert_eq!(event.ref_type, "branch");
    }
}
