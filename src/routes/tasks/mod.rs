pub mod dto;
pub mod model;
pub mod queries;
pub mod routes;
pub mod store;

use self::dto::{CreateTask, ListQuery, UpdateTask};
use self::model::Priority;

// VALIDATED INPUT

#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub completed: Option<bool>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

// HELPER FUNCTIONS

pub fn validate_title(title: &str) -> Result<(), String> {
    if title.is_empty() {
        return Err("title is required".to_string());
    }
    Ok(())
}

pub fn validate_priority(raw: Option<&str>) -> Result<Option<Priority>, String> {
    raw.map(str::parse).transpose()
}

/// First violated rule wins.
pub fn validate_create(payload: CreateTask) -> Result<NewTask, String> {
    let title = payload.title.ok_or_else(|| "title is required".to_string())?;
    validate_title(&title)?;
    let priority = validate_priority(payload.priority.as_deref())?.unwrap_or_default();

    Ok(NewTask {
        title,
        description: payload.description.unwrap_or_default(),
        priority,
    })
}

pub fn validate_update(payload: UpdateTask) -> Result<TaskChanges, String> {
    if let Some(title) = &payload.title {
        validate_title(title)?;
    }
    let priority = validate_priority(payload.priority.as_deref())?;

    Ok(TaskChanges {
        title: payload.title,
        description: payload.description,
        completed: payload.completed,
        priority,
    })
}

/// Reads the leading run of digits, so "2.0" and "2abc" both give 2.
fn parse_positive(raw: Option<&str>) -> Option<usize> {
    let s = raw?.trim_start();
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse::<usize>().ok().filter(|n| *n > 0)
}

/// Never fails: anything unparsable means "not given".
pub fn parse_filter(query: &ListQuery) -> TaskFilter {
    let completed = match query.completed.as_deref() {
        Some("true") => Some(true),
        Some("false") => Some(false),
        _ => None,
    };

    TaskFilter {
        completed,
        search: query.search.clone().filter(|s| !s.is_empty()),
        page: parse_positive(query.page.as_deref()),
        limit: parse_positive(query.limit.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults() {
        let new = validate_create(CreateTask {
            title: Some("Buy milk".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(new.description, "");
        assert_eq!(new.priority, Priority::Medium);
    }

    #[test]
    fn test_create_requires_title() {
        let err = validate_create(CreateTask::default()).unwrap_err();
        assert!(err.contains("title"));

        let err = validate_create(CreateTask {
            title: Some("".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.contains("title"));
    }

    #[test]
    fn test_create_reports_first_error_only() {
        let err = validate_create(CreateTask {
            title: None,
            priority: Some("urgente".into()),
            ..Default::default()
        })
        .unwrap_err();

        assert_eq!(err, "title is required");
    }

    #[test]
    fn test_update_validation() {
        assert_eq!(validate_update(UpdateTask::default()), Ok(TaskChanges::default()));

        let err = validate_update(UpdateTask {
            priority: Some("urgente".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(err.contains("priority"));

        assert!(validate_update(UpdateTask {
            title: Some("".into()),
            ..Default::default()
        })
        .is_err());

        let changes = validate_update(UpdateTask {
            description: Some("".into()),
            priority: Some("alta".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.description.as_deref(), Some(""));
        assert_eq!(changes.priority, Some(Priority::High));
    }

    #[test]
    fn test_whitespace_title_is_not_empty() {
        let new = validate_create(CreateTask {
            title: Some("   ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(new.title, "   ");

        let changes = validate_update(UpdateTask {
            title: Some(" ".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(changes.title.as_deref(), Some(" "));
    }

    #[test]
    fn test_page_and_limit_use_leading_digits() {
        assert_eq!(parse_positive(Some("2.0")), Some(2));
        assert_eq!(parse_positive(Some("2abc")), Some(2));
        assert_eq!(parse_positive(Some(" 7")), Some(7));
        assert_eq!(parse_positive(Some("abc2")), None);
        assert_eq!(parse_positive(Some("0.5")), None);
        assert_eq!(parse_positive(Some("")), None);
        assert_eq!(parse_positive(None), None);
    }

    #[test]
    fn test_filter_parsing_never_fails() {
        let filter = parse_filter(&ListQuery {
            completed: Some("talvez".into()),
            search: Some("".into()),
            page: Some("abc".into()),
            limit: Some("-3".into()),
        });
        assert_eq!(filter, TaskFilter::default());

        let filter = parse_filter(&ListQuery {
            completed: Some("false".into()),
            search: Some("Task".into()),
            page: Some("2".into()),
            limit: Some("0".into()),
        });
        assert_eq!(filter.completed, Some(false));
        assert_eq!(filter.search.as_deref(), Some("Task"));
        assert_eq!(filter.page, Some(2));
        assert_eq!(filter.limit, None);
    }
}
