//! Shared test doubles for task unit tests.

use crate::task::{
    domain::{NewTask, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use mockall::mock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that advances one minute on every reading.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    pub const fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start,
            ticks: AtomicI64::new(0),
        }
    }
}

impl Default for SteppingClock {
    fn default() -> Self {
        Self::starting_at(
            Utc.with_ymd_and_hms(2024, 3, 7, 8, 5, 0)
                .single()
                .expect("valid start instant"),
        )
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::minutes(tick)
    }
}

mock! {
    pub Repository {}

    #[async_trait]
    impl TaskRepository for Repository {
        async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<Task>;
        async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<Task>;
        async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
        async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;
    }
}

/// Repository failure standing in for a dropped connection.
pub fn broken_store() -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other("connection reset"))
}
