use crate::error::AppError;
use crate::model::Task;
use crate::present::Presenter;
use crate::storage::PersistenceGateway;

/// Result of replacing the store's contents from persistence. Records that
/// fail to decode are skipped rather than aborting the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub loaded: usize,
    pub skipped: usize,
}

/// Single authority over the ordered task collection. Every mutation and
/// query funnels through it; indices are 0-based positions into the current
/// sequence and shift on delete.
pub struct TaskStore {
    tasks: Vec<Task>,
    presenter: Box<dyn Presenter>,
}

impl TaskStore {
    pub fn new(presenter: Box<dyn Presenter>) -> Self {
        Self {
            tasks: Vec::new(),
            presenter,
        }
    }

    pub fn size(&self) -> usize {
        self.tasks.len()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn add(&mut self, task: Task) -> String {
        let rendered = self.presenter.render_added(&task, self.tasks.len() + 1);
        self.tasks.push(task);
        rendered
    }

    pub fn add_todo(&mut self, description: &str) -> Result<String, AppError> {
        let task = Task::todo(description)?;
        Ok(self.add(task))
    }

    pub fn add_deadline(&mut self, description: &str, end: &str) -> Result<String, AppError> {
        let task = Task::deadline(description, end)?;
        Ok(self.add(task))
    }

    pub fn add_event(
        &mut self,
        description: &str,
        start: &str,
        end: &str,
    ) -> Result<String, AppError> {
        let task = Task::event(description, start, end)?;
        Ok(self.add(task))
    }

    pub fn list(&self) -> String {
        if self.tasks.is_empty() {
            return self.presenter.render_empty();
        }
        self.presenter.render_list(&self.tasks)
    }

    pub fn mark_done(&mut self, index: usize) -> Result<String, AppError> {
        let task = self.task_at_mut(index)?;
        task.mark_done();
        Ok(self.presenter.render_marked(&self.tasks[index]))
    }

    pub fn mark_not_done(&mut self, index: usize) -> Result<String, AppError> {
        let task = self.task_at_mut(index)?;
        task.mark_not_done();
        Ok(self.presenter.render_unmarked(&self.tasks[index]))
    }

    pub fn delete(&mut self, index: usize) -> Result<String, AppError> {
        self.check_index(index)?;
        let removed = self.tasks.remove(index);
        Ok(self.presenter.render_deleted(&removed, self.tasks.len()))
    }

    /// Case-insensitive search over descriptions. Numbering in the rendering
    /// is local to the filtered result, not the original positions.
    pub fn find(&self, keyword: &str) -> Result<String, AppError> {
        let trimmed = keyword.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_argument("search keyword is required"));
        }

        let matches: Vec<Task> = self
            .tasks
            .iter()
            .filter(|task| task.description_contains(trimmed))
            .cloned()
            .collect();

        if matches.is_empty() {
            return Ok(self.presenter.render_empty());
        }
        Ok(self.presenter.render_list(&matches))
    }

    /// Emits every task to the gateway in insertion order. On a gateway
    /// failure the in-memory state is left as is.
    pub fn save(&self, gateway: &mut dyn PersistenceGateway) -> Result<(), AppError> {
        gateway.prepare()?;
        for task in &self.tasks {
            gateway.write(&task.to_record())?;
        }
        gateway.commit()
    }

    /// Replaces the collection with the gateway's records. A record that
    /// fails to decode is skipped so one corrupt entry does not lose the
    /// rest of the history.
    pub fn load(&mut self, gateway: &dyn PersistenceGateway) -> Result<LoadOutcome, AppError> {
        let records = gateway.load_all()?;
        let mut tasks = Vec::with_capacity(records.len());
        let mut skipped = 0;

        for record in &records {
            match Task::from_record(record) {
                Ok(task) => tasks.push(task),
                Err(_) => skipped += 1,
            }
        }

        let loaded = tasks.len();
        self.tasks = tasks;
        Ok(LoadOutcome { loaded, skipped })
    }

    fn check_index(&self, index: usize) -> Result<(), AppError> {
        if index >= self.tasks.len() {
            return Err(AppError::index_out_of_range(format!(
                "no task at position {} (the list has {})",
                index + 1,
                self.tasks.len()
            )));
        }
        Ok(())
    }

    fn task_at_mut(&mut self, index: usize) -> Result<&mut Task, AppError> {
        self.check_index(index)?;
        Ok(&mut self.tasks[index])
    }
}
