use super::repository::CommitEntry;

/// Section title to the commit-message prefix that lands a commit in it.
const SECTIONS: [(&str, &str); 4] = [
    ("document", "docs"),
    ("feature", "feat"),
    ("bugfix", "fix"),
    ("close", "close"),
];

/// Renders the Markdown body for a tag release, or `None` when there is
/// nothing to say.
pub fn build(commits: &[CommitEntry]) -> Option<String> {
    let mut body: Vec<String> = Vec::new();

    let changes: Vec<(&str, Vec<String>)> = SECTIONS
        .iter()
        .map(|(title, prefix)| {
            let entries = commits
                .iter()
                .filter(|entry| entry.commit.message.starts_with(&format!("{prefix}:")))
                .map(|entry| format!("- {}", describe(entry)))
                .collect::<Vec<_>>();

            (*title, entries)
        })
        .filter(|(_, entries)| !entries.is_empty())
        .collect();

    if !changes.is_empty() {
        body.push("## Notable changes\n".to_string());

        for (title, entries) in &changes {
            body.push(format!("- {title}"));

            for entry in entries {
                body.push(format!("     {entry}"));
            }
        }
    }

    let hash_changes: Vec<String> = commits
        .iter()
        .map(|entry| {
            let short_sha = entry.sha.get(..7).unwrap_or(&entry.sha);

            format!("- [{short_sha}]({}) - {}", entry.html_url, describe(entry))
        })
        .collect();

    if !hash_changes.is_empty() {
        body.push("\n## Commits\n".to_string());
        body.extend(hash_changes);
    }

    if body.is_empty() {
        None
    } else {
        Some(body.join("\n"))
    }
}

fn describe(entry: &CommitEntry) -> String {
    let author = match &entry.author {
        // Accounts can be unlinked, fall back to the git author name
        Some(user) => format!("@{}", user.login),
        None => entry.commit.author.name.clone(),
    };

    format!(
        "{}, by {author} <<{}>>",
        first_line(&entry.commit.message),
        entry.commit.author.email
    )
}

/// Squash merges fold the whole branch history into the message, only the
/// first line is the summary.
fn first_line(message: &str) -> &str {
    match message.find('\n') {
        Some(idx) => &message[..idx],
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::github::repository::{CommitDetails, CommitUser, GitAuthor};

    fn commit(sha: &str, message: &str, login: Option<&str>) -> CommitEntry {
        CommitEntry {
            sha: sha.to_string(),
            html_url: format!("https://github.com/octo/repo/commit/{sha}"),
            commit: CommitDetails {
                message: message.to_string(),
                author: GitAuthor {
                    name: "Mona Lisa".to_string(),
                    email: "mona@example.com".to_string(),
                },
            },
            author: login.map(|l| CommitUser {
                login: l.to_string(),
            }),
        }
    }

    #[test]
    fn groups_commits_into_sections_by_prefix() {
        let commits = vec![
            commit("1111111aaaaaaa", "feat: add dark mode", Some("octocat")),
            commit("2222222bbbbbbb", "fix: crash on empty input", Some("hubot")),
            commit("3333333ccccccc", "chore: bump deps", Some("octocat")),
        ];

        let body = build(&commits).unwrap();

        assert!(body.contains("## Notable changes"));
        assert!(body.contains("- feature"));
        assert!(body.contains("     - feat: add dark mode, by @octocat <<mona@example.com>>"));
        assert!(body.contains("- bugfix"));
        // Unrecognised prefixes still show up in the commit list
        assert!(!body.contains("- chore\n"));
        assert!(body.contains("[3333333]"));
    }

    #[test]
    fn prefix_must_start_the_message() {
        let commits = vec![commit("1111111aaaaaaa", "revert fix: something", Some("octocat"))];

        let body = build(&commits).unwrap();

        assert!(!body.contains("## Notable changes"));
        assert!(body.contains("## Commits"));
    }

    #[test]
    fn squash_merge_messages_are_truncated_to_first_line() {
        let commits = vec![commit(
            "1111111aaaaaaa",
            "feat: big change\n\n* commit one\n* commit two",
            Some("octocat"),
        )];

        let body = build(&commits).unwrap();

        assert!(body.contains("feat: big change, by @octocat"));
        assert!(!body.contains("commit one"));
    }

    #[test]
    fn unlinked_author_falls_back_to_git_name() {
        let commits = vec![commit("1111111aaaaaaa", "fix: off by one", None)];

        let body = build(&commits).unwrap();

        assert!(body.contains("fix: off by one, by Mona Lisa <<mona@example.com>>"));
    }

    #[test]
    fn commit_links_use_seven_char_shas() {
        let commits = vec![commit("abcdef012345", "feat: linked", Some("octocat"))];

        let body = build(&commits).unwrap();

        assert!(body.contains(
            "- [abcdef0](https://github.com/octo/repo/commit/abcdef012345) - feat: linked"
        ));
    }

    #[test]
    fn no_commits_means_no_body() {
        assert!(build(&[]).is_none());
    }
}
