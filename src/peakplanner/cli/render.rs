//! Turns command results into terminal text.
//!
//! Every `render_*` function returns a `String` so output can be tested without capturing
//! stdout; the `print_*` wrappers write it.

use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use peakplanner::commands::{AnyItem, CmdMessage, DisplayItem, MessageLevel};
use peakplanner::config::PlannerConfig;
use peakplanner::model::{Note, Task};
use peakplanner::stats::Dashboard;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const CATEGORY_WIDTH: usize = 10;
const PRIORITY_WIDTH: usize = 8;
const DUE_WIDTH: usize = 10;
const ID_WIDTH: usize = 9;
const PREVIEW_CHARS: usize = 50;

/// Paints `text` with a `#RRGGBB` color; unparsable colors leave it plain.
fn paint(text: &str, hex: &str) -> ColoredString {
    match hex_rgb(hex) {
        Some((r, g, b)) => text.truecolor(r, g, b),
        None => text.normal(),
    }
}

fn hex_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn pad_to(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn preview(title: &str, content: &str) -> String {
    let content: String = content
        .chars()
        .take(PREVIEW_CHARS)
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();
    if content.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", title, content)
    }
}

fn render_task_line(index: usize, task: &Task, now: DateTime<Utc>) -> String {
    let idx_str = format!("{:>3}. ", index);
    let check = if task.completed { "[x] " } else { "[ ] " };

    let category = task.category.resolve();
    let category_col = paint(&pad_to(category.label(), CATEGORY_WIDTH), category.color());
    let priority_col = paint(
        &pad_to(task.priority.label(), PRIORITY_WIDTH),
        task.priority.color(),
    );
    let due_col = match task.due_status(now) {
        Some(status) => paint(&pad_to(status.label(), DUE_WIDTH), status.color()),
        None => pad_to("", DUE_WIDTH).normal(),
    };

    let fixed = idx_str.width()
        + ID_WIDTH
        + check.width()
        + CATEGORY_WIDTH
        + PRIORITY_WIDTH
        + DUE_WIDTH
        + TIME_WIDTH
        + 1;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let text = truncate_to_width(&preview(&task.title, &task.body), available);
    let text = pad_to(&text, available);
    let text = if task.completed {
        text.dimmed().strikethrough()
    } else {
        text.normal()
    };

    format!(
        "{}{}{}{} {}{}{}{}",
        idx_str,
        pad_to(task.id.short(), ID_WIDTH).dimmed(),
        check,
        text,
        category_col,
        priority_col,
        due_col,
        format_time_ago(task.created_at).dimmed()
    )
}

fn render_note_line(index: usize, note: &Note) -> String {
    let idx_str = format!("{:>3}. ", index);
    let category = note.category.resolve();
    let category_col = paint(&pad_to(category.label(), CATEGORY_WIDTH), category.color());

    let fixed = idx_str.width() + ID_WIDTH + CATEGORY_WIDTH + TIME_WIDTH + 1;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let text = truncate_to_width(&preview(&note.title, &note.text), available);

    format!(
        "{}{}{} {}{}",
        idx_str,
        pad_to(note.id.short(), ID_WIDTH).dimmed(),
        pad_to(&text, available),
        category_col,
        format_time_ago(note.created_at).dimmed()
    )
}

pub fn render_items(items: &[DisplayItem]) -> String {
    let now = Utc::now();
    items
        .iter()
        .map(|d| match &d.item {
            AnyItem::Task(task) => render_task_line(d.index, task, now),
            AnyItem::Note(note) => render_note_line(d.index, note),
        })
        .map(|line| format!("{}\n", line))
        .collect()
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let now = Utc::now();
    let stats = &dashboard.stats;
    let mut out = String::new();

    out.push_str(&format!(
        "{} {} total, {} completed, {} pending ({}% done)\n",
        "Tasks:".bold(),
        stats.total,
        stats.completed,
        stats.pending,
        stats.completion_rate
    ));

    out.push('\n');
    out.push_str(&format!("{}\n", "Recent tasks".bold()));
    if dashboard.recent_tasks.is_empty() {
        out.push_str(&format!("{}\n", "  No tasks yet".dimmed()));
    }
    for (pos, task) in &dashboard.recent_tasks {
        out.push_str(&render_task_line(pos + 1, task, now));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&format!("{}\n", "Recent notes".bold()));
    if dashboard.recent_notes.is_empty() {
        out.push_str(&format!("{}\n", "  No notes yet".dimmed()));
    }
    for (pos, note) in &dashboard.recent_notes {
        out.push_str(&render_note_line(pos + 1, note));
        out.push('\n');
    }
    out
}

pub fn render_config(config: &PlannerConfig) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{} = {}\n", key, value))
        .collect()
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| {
            let content = message.content.as_str();
            let styled = match message.level {
                MessageLevel::Info => content.dimmed(),
                MessageLevel::Success => content.green(),
                MessageLevel::Warning => content.yellow(),
                MessageLevel::Error => content.red(),
            };
            format!("{}\n", styled)
        })
        .collect()
}

/// Prints command messages to stdout.
pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages));
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use peakplanner::commands::DisplayItem;
    use peakplanner::model::{CategoryRef, ItemId, Priority};
    use peakplanner::stats::TaskStats;

    fn task(title: &str, body: &str) -> Task {
        Task {
            id: ItemId::from("t1"),
            title: title.to_string(),
            body: body.to_string(),
            completed: false,
            category: CategoryRef::from("work"),
            priority: Priority::High,
            due_date: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Wide characters take two columns each.
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn parses_hex_colors() {
        assert_eq!(hex_rgb("#FF6B6B"), Some((0xFF, 0x6B, 0x6B)));
        assert_eq!(hex_rgb("FF6B6B"), None);
        assert_eq!(hex_rgb("#FFF"), None);
    }

    #[test]
    fn task_line_shows_index_title_and_labels() {
        let items = vec![DisplayItem::new(1, task("Write report", "Q3 numbers"))];
        let out = render_items(&items);
        assert!(out.contains("  2. "));
        assert!(out.contains("t1"));
        assert!(out.contains("Write report Q3 numbers"));
        assert!(out.contains("Work"));
        assert!(out.contains("High"));
    }

    #[test]
    fn note_line_flattens_newlines() {
        let note = Note {
            id: ItemId::from("n1"),
            title: "List".into(),
            text: "eggs\nflour".into(),
            category: CategoryRef::from("mystery"),
            created_at: Utc::now(),
        };
        let out = render_items(&[DisplayItem::new(0, note)]);
        assert!(out.contains("List eggs flour"));
        // Unknown categories display as Other.
        assert!(out.contains("Other"));
    }

    #[test]
    fn dashboard_shows_totals() {
        let dashboard = Dashboard {
            stats: TaskStats {
                total: 4,
                completed: 1,
                pending: 3,
                completion_rate: 25,
            },
            recent_tasks: vec![(0, task("Write report", "Q3"))],
            recent_notes: vec![],
        };
        let out = render_dashboard(&dashboard);
        assert!(out.contains("4 total, 1 completed, 3 pending (25% done)"));
        assert!(out.contains("Write report"));
        assert!(out.contains("No notes yet"));
    }

    #[test]
    fn config_lists_every_key() {
        let out = render_config(&PlannerConfig::default());
        assert_eq!(
            out,
            "empty-slot = delete\ndefault-category = other\ndefault-priority = medium\n"
        );
    }

    #[test]
    fn messages_keep_their_text() {
        let out = render_messages(&[CmdMessage::success("Added task 1: A")]);
        assert!(out.contains("Added task 1: A"));
    }
}
