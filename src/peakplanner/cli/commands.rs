//! Dispatch and per-command handlers.
//!
//! - `run()`: parses arguments, installs logging, dispatches (called by `main.rs`)
//! - `init_context()`: resolves the data directory and opens the planner
//! - `handle_*()`: call the API and print the result

use super::render::{print_messages, render_config, render_dashboard, render_items};
use super::setup::{Cli, Commands, FilterArgs, NoteCommands, TaskCommands};
use clap::Parser;
use peakplanner::commands::config::ConfigAction;
use peakplanner::commands::CmdResult;
use peakplanner::error::{PlannerError, Result};
use peakplanner::init::{initialize, resolve_data_dir, PlannerContext, HOME_ENV};
use peakplanner::model::{parse_due_date, NoteDraft, NotePatch, TaskDraft, TaskPatch};
use peakplanner::view::{Filter, NoteQuery, TaskQuery};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV: &str = "PEAKPLANNER_LOG";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context()?;

    let outcome = match cli.command {
        Some(Commands::Task(cmd)) => handle_task(&mut ctx, cmd),
        Some(Commands::Note(cmd)) => handle_note(&mut ctx, cmd),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        Some(Commands::Init) => handle_init(&ctx),
        Some(Commands::Stats) | None => handle_stats(&ctx),
    };

    // Flush any save that failed during the command before reporting.
    ctx.api.teardown()?;
    outcome
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "peakplanner=debug"
        } else {
            "peakplanner=warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn init_context() -> Result<PlannerContext> {
    let data_dir = resolve_data_dir(env::var_os(HOME_ENV).map(PathBuf::from))?;
    initialize(data_dir)
}

fn show(result: &CmdResult) {
    if !result.listed.is_empty() {
        print!("{}", render_items(&result.listed));
    }
    print_messages(&result.messages);
}

fn title_from_words(words: Vec<String>) -> String {
    words.join(" ")
}

fn parse_due(input: &str) -> Result<Option<chrono::DateTime<chrono::Utc>>> {
    parse_due_date(input)
        .map(Some)
        .ok_or_else(|| PlannerError::Api(format!("Invalid due date: {}", input)))
}

fn parse_filter<T>(input: Option<String>) -> Result<Filter<T>>
where
    T: std::str::FromStr<Err = PlannerError>,
{
    match input {
        Some(s) => s.parse(),
        None => Ok(Filter::All),
    }
}

fn task_query(
    filter: FilterArgs,
    priority: Option<String>,
    sort: Option<String>,
) -> Result<TaskQuery> {
    Ok(TaskQuery {
        category: parse_filter(filter.category)?,
        priority: parse_filter(priority)?,
        search: filter.search.unwrap_or_default(),
        sort: match sort {
            Some(s) => s.parse()?,
            None => Default::default(),
        },
    })
}

fn note_query(filter: FilterArgs) -> Result<NoteQuery> {
    Ok(NoteQuery {
        category: parse_filter(filter.category)?,
        search: filter.search.unwrap_or_default(),
    })
}

fn handle_task(ctx: &mut PlannerContext, cmd: TaskCommands) -> Result<()> {
    let result = match cmd {
        TaskCommands::Add {
            title,
            body,
            category,
            priority,
            due,
        } => {
            let category = match category {
                Some(c) => c.parse()?,
                None => ctx.config.default_category,
            };
            let priority = match priority {
                Some(p) => p.parse()?,
                None => ctx.config.default_priority,
            };
            let due = match due {
                Some(d) => parse_due(&d)?,
                None => None,
            };
            let draft = TaskDraft::new(title_from_words(title), body)
                .with_category(category)
                .with_priority(priority)
                .with_due_date(due);
            ctx.api.add_task(draft)?
        }
        TaskCommands::List {
            filter,
            priority,
            sort,
        } => {
            let query = task_query(filter, priority, sort)?;
            ctx.api.list_tasks(&query)?
        }
        TaskCommands::Edit {
            selector,
            title,
            body,
            category,
            priority,
            due,
            no_due,
        } => {
            let due_date = if no_due {
                Some(None)
            } else {
                match due {
                    Some(d) => Some(parse_due(&d)?),
                    None => None,
                }
            };
            let patch = TaskPatch {
                title,
                body,
                category: category.map(|c| c.parse()).transpose()?,
                priority: priority.map(|p| p.parse()).transpose()?,
                due_date,
                completed: None,
            };
            ctx.api.update_task(&selector, patch)?
        }
        TaskCommands::Done { selectors } => ctx.api.toggle_tasks(&selectors)?,
        TaskCommands::Delete { selectors } => ctx.api.delete_tasks(&selectors)?,
        TaskCommands::Move { from, to } => ctx.api.move_task(from, to)?,
    };
    show(&result);
    Ok(())
}

fn handle_note(ctx: &mut PlannerContext, cmd: NoteCommands) -> Result<()> {
    let result = match cmd {
        NoteCommands::Add {
            title,
            text,
            category,
        } => {
            let category = match category {
                Some(c) => c.parse()?,
                None => ctx.config.default_category,
            };
            let draft = NoteDraft::new(title_from_words(title), text).with_category(category);
            ctx.api.add_note(draft)?
        }
        NoteCommands::List { filter } => {
            let query = note_query(filter)?;
            ctx.api.list_notes(&query)?
        }
        NoteCommands::Edit {
            selector,
            title,
            text,
            category,
        } => {
            let patch = NotePatch {
                title,
                text,
                category: category.map(|c| c.parse()).transpose()?,
            };
            ctx.api.update_note(&selector, patch)?
        }
        NoteCommands::Delete { selectors } => ctx.api.delete_notes(&selectors)?,
        NoteCommands::Move { from, to } => ctx.api.move_note(from, to)?,
    };
    show(&result);
    Ok(())
}

fn handle_stats(ctx: &PlannerContext) -> Result<()> {
    let result = ctx.api.stats()?;
    if let Some(dashboard) = &result.dashboard {
        print!("{}", render_dashboard(dashboard));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &PlannerContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print!("{}", render_config(config));
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_init(ctx: &PlannerContext) -> Result<()> {
    let result = ctx.api.init()?;
    print_messages(&result.messages);
    Ok(())
}
