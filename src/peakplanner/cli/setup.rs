use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "peakplanner", bin_name = "peakplanner", version)]
#[command(about = "Local task and note planner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommands),

    /// Show task totals and recent items (default)
    Stats,

    /// Show or set configuration
    Config {
        /// Setting to show or change
        key: Option<String>,

        /// New value
        value: Option<String>,
    },

    /// Create the data directory and a default config
    Init,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Category filter: a category, "all" or "none"
    #[arg(short, long)]
    pub category: Option<String>,

    /// Case-insensitive text search in title and content
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    #[command(alias = "a")]
    Add {
        /// Title words (empty becomes "Untitled")
        title: Vec<String>,

        /// Task body
        #[arg(short, long)]
        body: String,

        /// work, personal, ideas, study or other
        #[arg(short, long)]
        category: Option<String>,

        /// high, medium or low
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date, YYYY-MM-DD or RFC 3339
        #[arg(short, long)]
        due: Option<String>,
    },

    /// List tasks
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Priority filter: a priority, "all" or "none"
        #[arg(short, long)]
        priority: Option<String>,

        /// none, priority or date
        #[arg(long)]
        sort: Option<String>,
    },

    /// Edit a task
    Edit {
        /// Listing index or id prefix
        selector: String,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        body: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        priority: Option<String>,

        #[arg(short, long, conflicts_with = "no_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        no_due: bool,
    },

    /// Toggle completion of tasks
    Done {
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// Delete tasks
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// Move a task to another listing index
    #[command(alias = "mv")]
    Move { from: usize, to: usize },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Add a note
    #[command(alias = "a")]
    Add {
        /// Title words (empty becomes "Untitled")
        title: Vec<String>,

        /// Note text
        #[arg(short, long)]
        text: String,

        /// work, personal, ideas, study or other
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List notes
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Edit a note
    Edit {
        /// Listing index or id prefix
        selector: String,

        #[arg(short = 'T', long)]
        title: Option<String>,

        #[arg(short, long)]
        text: Option<String>,

        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete notes
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true)]
        selectors: Vec<String>,
    },

    /// Move a note to another listing index
    #[command(alias = "mv")]
    Move { from: usize, to: usize },
}
