use crate::model::Task;

/// Presentation gateway consumed by the task store. Implementations are pure
/// formatters over the data they are handed: no store mutation, no I/O.
pub trait Presenter {
    fn render_added(&self, task: &Task, new_count: usize) -> String;
    fn render_list(&self, tasks: &[Task]) -> String;
    fn render_marked(&self, task: &Task) -> String;
    fn render_unmarked(&self, task: &Task) -> String;
    fn render_deleted(&self, task: &Task, new_count: usize) -> String;
    fn render_empty(&self) -> String;
}

/// Plain-text presenter used by the CLI shell.
pub struct TextPresenter;

fn count_phrase(count: usize) -> String {
    if count == 1 {
        "1 task".to_string()
    } else {
        format!("{count} tasks")
    }
}

impl Presenter for TextPresenter {
    fn render_added(&self, task: &Task, new_count: usize) -> String {
        format!(
            "Added task:\n  {}\nYou now have {} in the list.",
            task.render(),
            count_phrase(new_count)
        )
    }

    fn render_list(&self, tasks: &[Task]) -> String {
        let mut lines = Vec::with_capacity(tasks.len() + 1);
        lines.push("Tasks:".to_string());
        for (position, task) in tasks.iter().enumerate() {
            lines.push(format!("{}. {}", position + 1, task.render()));
        }
        lines.join("\n")
    }

    fn render_marked(&self, task: &Task) -> String {
        format!("Marked as done:\n  {}", task.render())
    }

    fn render_unmarked(&self, task: &Task) -> String {
        format!("Marked as not done:\n  {}", task.render())
    }

    fn render_deleted(&self, task: &Task, new_count: usize) -> String {
        format!(
            "Deleted task:\n  {}\nYou now have {} in the list.",
            task.render(),
            count_phrase(new_count)
        )
    }

    fn render_empty(&self) -> String {
        "No tasks found.".to_string()
    }
}
