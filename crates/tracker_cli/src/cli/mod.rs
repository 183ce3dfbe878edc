use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tracker", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a plain to-do task
    ///
    /// Example: tracker todo "read book"
    Todo {
        description: String,
    },
    /// Add a task with a deadline
    ///
    /// Example: tracker deadline "submit report" 2024-06-01
    Deadline {
        description: String,
        end: String,
    },
    /// Add an event with a start and an end
    ///
    /// Example: tracker event standup 09:00 09:15
    Event {
        description: String,
        start: String,
        end: String,
    },
    /// List all tasks
    ///
    /// Example: tracker list
    List,
    /// Mark a task as done (position as shown by `list`)
    ///
    /// Example: tracker mark 1
    Mark {
        position: usize,
    },
    /// Mark a task as not done
    ///
    /// Example: tracker unmark 1
    Unmark {
        position: usize,
    },
    /// Delete a task
    ///
    /// Example: tracker delete 1
    Delete {
        position: usize,
    },
    /// Find tasks whose description contains a keyword
    ///
    /// Example: tracker find report
    Find {
        keyword: String,
    },
}
