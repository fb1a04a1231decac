use serde::{Deserialize, Serialize};

use super::model::Task;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<String>,
}

/// Raw list query; every field stays a string so bad input degrades to a default.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub completed: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskPage {
    pub total: usize,
    pub page: usize,
    pub limit: usize,
    pub data: Vec<Task>,
}
