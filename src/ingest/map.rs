//! Mapping from raw API payloads to storage records

use chrono::{DateTime, Utc};

use crate::client::models::{RawIssue, RawRepo};
use crate::store::records::{IssueRecord, RepoRecord};

/// Map a raw repository payload to its storage record
pub fn map_repo(org: &str, raw: &RawRepo) -> RepoRecord {
    RepoRecord {
        org: org.to_string(),
        name: raw.name.clone(),
        description: raw.description.clone(),
        topics: raw.topics.clone(),
        language: raw.language.clone(),
        stars: raw.stargazers_count,
        forks: raw.forks_count,
        open_issues: raw.open_issues_count,
        license: raw.license.as_ref().and_then(|l| l.spdx_id.clone()),
        pushed_at: raw.pushed_at,
    }
}

/// Map a raw issue payload to its storage record
pub fn map_issue(repo_full_name: &str, raw: &RawIssue) -> IssueRecord {
    IssueRecord {
        repo: repo_full_name.to_string(),
        number: raw.number,
        title: raw.title.clone(),
        state: raw.state,
        created_at: raw.created_at,
    }
}

/// True when the repo's last push strictly predates the floor.
/// A repo without a push timestamp is kept.
pub fn pushed_before(raw: &RawRepo, since: DateTime<Utc>) -> bool {
    raw.pushed_at.map(|t| t < since).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{IssueState, RawLicense};
    use chrono::TimeZone;

    fn raw_repo(pushed_at: Option<DateTime<Utc>>) -> RawRepo {
        RawRepo {
            name: "widget".to_string(),
            full_name: "acme/widget".to_string(),
            description: Some("makes widgets".to_string()),
            topics: vec!["rust".to_string()],
            language: Some("Rust".to_string()),
            stargazers_count: 42,
            forks_count: 6,
            open_issues_count: 3,
            license: Some(RawLicense {
                spdx_id: Some("Apache-2.0".to_string()),
            }),
            pushed_at,
        }
    }

    #[test]
    fn test_map_repo_carries_all_fields() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let record = map_repo("acme", &raw_repo(Some(ts)));

        assert_eq!(record.org, "acme");
        assert_eq!(record.name, "widget");
        assert_eq!(record.full_name(), "acme/widget");
        assert_eq!(record.description.as_deref(), Some("makes widgets"));
        assert_eq!(record.topics, vec!["rust"]);
        assert_eq!(record.stars, 42);
        assert_eq!(record.forks, 6);
        assert_eq!(record.open_issues, 3);
        assert_eq!(record.license.as_deref(), Some("Apache-2.0"));
        assert_eq!(record.pushed_at, Some(ts));
    }

    #[test]
    fn test_map_repo_without_license() {
        let mut raw = raw_repo(None);
        raw.license = None;
        assert_eq!(map_repo("acme", &raw).license, None);

        raw.license = Some(RawLicense { spdx_id: None });
        assert_eq!(map_repo("acme", &raw).license, None);
    }

    #[test]
    fn test_map_issue() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let raw = RawIssue {
            number: 12,
            title: "Crash on start".to_string(),
            state: IssueState::Open,
            created_at: ts,
            pull_request: None,
        };

        let record = map_issue("acme/widget", &raw);
        assert_eq!(record.repo, "acme/widget");
        assert_eq!(record.number, 12);
        assert_eq!(record.state, IssueState::Open);
        assert_eq!(record.created_at, ts);
    }

    #[test]
    fn test_pushed_before_is_strict() {
        let since = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        let older = raw_repo(Some(since - chrono::Duration::days(1)));
        assert!(pushed_before(&older, since));

        let equal = raw_repo(Some(since));
        assert!(!pushed_before(&equal, since));

        let newer = raw_repo(Some(since + chrono::Duration::days(1)));
        assert!(!pushed_before(&newer, since));

        let unknown = raw_repo(None);
        assert!(!pushed_before(&unknown, since));
    }
}
