use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: taskflow add "Buy milk"
    /// Example: taskflow add "Buy milk" -d "2 liters, whole"
    Add {
        title: Option<String>,
        #[arg(short = 'd', long = "description", value_name = "DESCRIPTION")]
        description: Option<String>,
    },
    /// Mark a task as completed
    ///
    /// Example: taskflow done 1
    Done {
        id: u64,
    },
    /// Mark a completed task as pending again
    ///
    /// Example: taskflow undone 1
    Undone {
        id: u64,
    },
    /// Edit a task's title and description
    ///
    /// Example: taskflow edit 1 "Buy organic milk"
    /// Example: taskflow edit 1 "Buy organic milk" -d "from the market"
    Edit {
        id: u64,
        new_title: String,
        #[arg(short = 'd', long = "description", value_name = "DESCRIPTION")]
        description: Option<String>,
    },
    /// Delete a task
    ///
    /// Example: taskflow delete 1
    Delete {
        id: u64,
    },
    /// List tasks through a filter
    ///
    /// Example: taskflow list
    /// Example: taskflow list pending
    List {
        #[command(subcommand)]
        filter: Option<FilterCommand>,
    },
    /// Show aggregate statistics
    ///
    /// Example: taskflow stats
    Stats,
}

#[derive(Subcommand, Debug)]
pub enum FilterCommand {
    /// Every task in insertion order
    All,
    /// Tasks not yet completed
    Pending,
    /// Completed tasks
    Completed,
}
