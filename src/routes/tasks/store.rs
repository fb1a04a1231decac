use chrono::Utc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::model::{Priority, Task};

const SEED_COUNT: i64 = 4;

/// Ordered task collection plus its id counter.
///
/// All mutations go through a single guard, so allocating an id and
/// inserting, or finding and mutating, cannot interleave with another writer.
#[derive(Debug)]
pub struct TaskTable {
    tasks: Vec<Task>,
    next_id: i64,
}

impl TaskTable {
    pub fn seeded() -> Self {
        let now = Utc::now();
        let tasks = (1..=SEED_COUNT)
            .map(|n| Task {
                id: n,
                title: format!("Task {n}"),
                description: format!("Description {n}"),
                completed: false,
                priority: Priority::Medium,
                created_at: now,
                completed_at: None,
            })
            .collect();

        Self {
            tasks,
            next_id: SEED_COUNT + 1,
        }
    }

    pub fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn find_by_id(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: i64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Tasks in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn reset_to_seed(&mut self) {
        *self = Self::seeded();
        tracing::info!("task store reset to seed state");
    }
}

pub struct TaskStore {
    table: RwLock<TaskTable>,
}

impl TaskStore {
    pub fn seeded() -> Self {
        Self {
            table: RwLock::new(TaskTable::seeded()),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, TaskTable> {
        self.table.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, TaskTable> {
        self.table.write().await
    }

    pub async fn reset_to_seed(&self) {
        self.table.write().await.reset_to_seed();
    }
}
