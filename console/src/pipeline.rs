//! Project list filtering and sorting
//!
//! Pure functions feeding the dashboard list view. Filtering always runs
//! before sorting; both are recomputed from scratch on every input change.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::project::{DeploymentType, Project};

/// Deployment type filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    /// Pass every project
    #[default]
    All,

    /// Exact match on deployment type
    Only(DeploymentType),
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(TypeFilter::All);
        }
        DeploymentType::from_str(s).map(TypeFilter::Only)
    }
}

/// Sort key for the project list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Deployment recency; missing timestamps sort as epoch zero
    #[default]
    LastDeployed,

    /// Case-insensitive name ordering
    Name,

    /// Healthiest status first when ascending
    Status,
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter then sort the project list for display
pub fn filter_and_sort(
    projects: &[Project],
    type_filter: TypeFilter,
    query: &str,
    sort_key: SortKey,
    sort_order: SortOrder,
) -> Vec<Project> {
    let query = query.to_lowercase();

    let mut filtered: Vec<Project> = projects
        .iter()
        .filter(|project| matches_type(project, type_filter) && matches_query(project, &query))
        .cloned()
        .collect();

    filtered.sort_by(|a, b| {
        let ordering = compare(a, b, sort_key);
        match sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    filtered
}

fn matches_type(project: &Project, filter: TypeFilter) -> bool {
    match filter {
        TypeFilter::All => true,
        TypeFilter::Only(deployment_type) => project.deployment_type == deployment_type,
    }
}

fn matches_query(project: &Project, query: &str) -> bool {
    project.name.to_lowercase().contains(query)
        || project.project_slug.to_lowercase().contains(query)
}

fn compare(a: &Project, b: &Project, key: SortKey) -> Ordering {
    match key {
        SortKey::LastDeployed => {
            let a_ms = a.last_deployed_at.map(|t| t.timestamp_millis()).unwrap_or(0);
            let b_ms = b.last_deployed_at.map(|t| t.timestamp_millis()).unwrap_or(0);
            a_ms.cmp(&b_ms)
        }
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortKey::Status => a
            .deployment_status
            .sort_rank()
            .cmp(&b.deployment_status.sort_rank()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::project::DeploymentStatus;
    use chrono::{TimeZone, Utc};

    fn project(
        name: &str,
        slug: &str,
        deployment_type: DeploymentType,
        status: DeploymentStatus,
        last_deployed_at: Option<i64>,
    ) -> Project {
        Project {
            id: format!("id-{}", slug),
            name: name.to_string(),
            project_slug: slug.to_string(),
            deployment_status: status,
            deployment_type,
            last_deployed_at: last_deployed_at
                .map(|secs| Utc.timestamp_opt(secs, 0).unwrap()),
            environment: None,
        }
    }

    fn names(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let projects = vec![
            project("Zeta", "z", DeploymentType::Static, DeploymentStatus::Success, None),
            project("alpha", "a", DeploymentType::Static, DeploymentStatus::Success, None),
            project("Beta", "b", DeploymentType::Static, DeploymentStatus::Success, None),
        ];

        let sorted = filter_and_sort(&projects, TypeFilter::All, "", SortKey::Name, SortOrder::Asc);
        assert_eq!(names(&sorted), vec!["alpha", "Beta", "Zeta"]);

        let sorted = filter_and_sort(&projects, TypeFilter::All, "", SortKey::Name, SortOrder::Desc);
        assert_eq!(names(&sorted), vec!["Zeta", "Beta", "alpha"]);
    }

    #[test]
    fn test_type_filter_and_query_compose() {
        let projects = vec![
            project("Foo", "f1", DeploymentType::Static, DeploymentStatus::Success, None),
            project("Bar", "b1", DeploymentType::Serverless, DeploymentStatus::Success, None),
        ];

        let filtered = filter_and_sort(
            &projects,
            TypeFilter::Only(DeploymentType::Static),
            "oo",
            SortKey::Name,
            SortOrder::Asc,
        );
        assert_eq!(names(&filtered), vec!["Foo"]);
    }

    #[test]
    fn test_query_matches_slug_too() {
        let projects = vec![
            project("Foo", "f1", DeploymentType::Static, DeploymentStatus::Success, None),
            project("Bar", "b1", DeploymentType::Serverless, DeploymentStatus::Success, None),
        ];

        let filtered =
            filter_and_sort(&projects, TypeFilter::All, "B1", SortKey::Name, SortOrder::Asc);
        assert_eq!(names(&filtered), vec!["Bar"]);
    }

    #[test]
    fn test_missing_timestamp_sorts_as_earliest() {
        let projects = vec![
            project("Old", "old", DeploymentType::Static, DeploymentStatus::Success, Some(1_000)),
            project("Never", "never", DeploymentType::Static, DeploymentStatus::NotStarted, None),
            project("New", "new", DeploymentType::Static, DeploymentStatus::Success, Some(2_000)),
        ];

        let sorted = filter_and_sort(
            &projects,
            TypeFilter::All,
            "",
            SortKey::LastDeployed,
            SortOrder::Asc,
        );
        assert_eq!(names(&sorted), vec!["Never", "Old", "New"]);

        let sorted = filter_and_sort(
            &projects,
            TypeFilter::All,
            "",
            SortKey::LastDeployed,
            SortOrder::Desc,
        );
        assert_eq!(names(&sorted), vec!["New", "Old", "Never"]);
    }

    #[test]
    fn test_status_sorts_healthiest_first() {
        let projects = vec![
            project("F", "f", DeploymentType::Static, DeploymentStatus::Failed, None),
            project("Q", "q", DeploymentType::Static, DeploymentStatus::Queued, None),
            project("S", "s", DeploymentType::Static, DeploymentStatus::Success, None),
            project("P", "p", DeploymentType::Static, DeploymentStatus::InProgress, None),
            project("N", "n", DeploymentType::Static, DeploymentStatus::NotStarted, None),
        ];

        let sorted =
            filter_and_sort(&projects, TypeFilter::All, "", SortKey::Status, SortOrder::Asc);
        assert_eq!(names(&sorted), vec!["S", "P", "Q", "N", "F"]);
    }

    #[test]
    fn test_type_filter_parses() {
        assert_eq!("all".parse::<TypeFilter>().unwrap(), TypeFilter::All);
        assert_eq!(
            "Static".parse::<TypeFilter>().unwrap(),
            TypeFilter::Only(DeploymentType::Static)
        );
        assert!("edge".parse::<TypeFilter>().is_err());
    }
}
