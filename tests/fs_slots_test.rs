use peakplanner::error::PlannerError;
use peakplanner::store::fs::FsSlots;
use peakplanner::store::SlotStore;
use std::fs;

fn entries(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn missing_slot_reads_as_none() {
    let temp = tempfile::tempdir().unwrap();
    let slots = FsSlots::new(temp.path().join("not-created-yet"));
    assert_eq!(slots.read("peakplanner_tasks").unwrap(), None);
    assert!(!slots.contains("peakplanner_tasks").unwrap());
}

#[test]
fn write_creates_directory_and_leaves_no_temp_files() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("data");
    let slots = FsSlots::new(&root);

    slots.write("peakplanner_notes", "[]").unwrap();
    slots.write("peakplanner_notes", r#"[{"id":"a"}]"#).unwrap();

    assert_eq!(entries(&root), vec!["peakplanner_notes.json"]);
    assert_eq!(
        slots.read("peakplanner_notes").unwrap().as_deref(),
        Some(r#"[{"id":"a"}]"#)
    );
}

#[test]
fn delete_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let slots = FsSlots::new(temp.path());
    slots.write("peakplanner_tasks", "[]").unwrap();
    slots.delete("peakplanner_tasks").unwrap();
    slots.delete("peakplanner_tasks").unwrap();
    assert_eq!(slots.read("peakplanner_tasks").unwrap(), None);
}

#[test]
fn keys_cannot_escape_the_root() {
    let temp = tempfile::tempdir().unwrap();
    let slots = FsSlots::new(temp.path());
    for key in ["../outside", "a/b", "", "with space"] {
        assert!(matches!(
            slots.write(key, "x"),
            Err(PlannerError::InvalidSlotKey(_))
        ));
    }
    assert!(entries(temp.path()).is_empty());
}
