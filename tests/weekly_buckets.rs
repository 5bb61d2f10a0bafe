mod support;

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use support::{entry, project, running_entry, task, timed, utc_ms, HOUR_MS};
use taskpulse::project::ProjectMetric;
use taskpulse::record::RawTimeEntry;
use taskpulse::units::LaunchRule;
use taskpulse::week::week_windows;
use taskpulse::weekly::{
    weekly_buckets, BucketMode, EntryAccurate, SnapshotDegraded, TaskIndex, WeeklySource,
    UNATTRIBUTED_ID,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("date")
}

#[test]
fn wednesday_yields_windows_ending_next_sunday() {
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 10, 0, 0).single().expect("now");
    let windows = week_windows(&now, 4);

    assert_eq!(windows.len(), 4);
    assert_eq!(windows[0].week_start, date(2024, 11, 25));
    let last = windows.last().expect("last window");
    assert_eq!(last.week_start, date(2024, 12, 16));
    assert_eq!(last.week_end, date(2024, 12, 22));
    assert_eq!(last.start_ms, utc_ms(2024, 12, 16, 0));
    assert_eq!(last.end_ms, utc_ms(2024, 12, 23, 0) - 1);
    assert!(last.is_current);
    assert!(windows[..3].iter().all(|window| !window.is_current));
    assert_eq!(last.label, "Dec 16-22");
}

#[test]
fn sunday_belongs_to_the_week_before() {
    let now = Utc.with_ymd_and_hms(2024, 12, 22, 23, 0, 0).single().expect("now");
    let windows = week_windows(&now, 1);
    assert_eq!(windows[0].week_start, date(2024, 12, 16));
    assert_eq!(windows[0].week_end, date(2024, 12, 22));
}

#[test]
fn windows_are_contiguous_and_local() {
    let berlin = FixedOffset::east_opt(3600).expect("offset");
    let now = berlin.with_ymd_and_hms(2025, 1, 2, 8, 0, 0).single().expect("now");
    let windows = week_windows(&now, 12);

    for pair in windows.windows(2) {
        assert_eq!(pair[0].end_ms + 1, pair[1].start_ms);
    }
    let last = windows.last().expect("last window");
    assert_eq!(last.start_ms, utc_ms(2024, 12, 29, 23));
    assert_eq!(last.label, "Dec 30-Jan 5");
}

#[test]
fn entries_group_by_week_and_project() {
    let projects = vec![
        project("p1", "Website", vec![task("t1", "Design", "open")]),
        project("p2", "Mobile", vec![task("t2", "API", "open")]),
    ];
    let index = TaskIndex::from_projects(&projects);
    assert_eq!(index.len(), 2);

    let entries = vec![
        entry("e1", Some("t1"), utc_ms(2024, 12, 17, 9), 3 * HOUR_MS / 2),
        entry("e2", Some("t2"), utc_ms(2024, 12, 10, 9), HOUR_MS),
        entry("e3", Some("missing"), utc_ms(2024, 12, 17, 12), HOUR_MS / 2),
        entry("e4", Some("t1"), utc_ms(2024, 12, 18, 9), HOUR_MS),
        running_entry("e5", "t2", utc_ms(2024, 12, 18, 8)),
        entry("e6", Some("t2"), utc_ms(2024, 11, 1, 9), 8 * HOUR_MS),
    ];
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 10, 0, 0).single().expect("now");
    let windows = week_windows(&now, 2);
    let source = EntryAccurate::new(&entries, &index);
    assert_eq!(source.mode(), BucketMode::EntryAccurate);

    let buckets = weekly_buckets(&source, &windows);
    assert_eq!(buckets.len(), 2);

    let previous = &buckets[0];
    assert_eq!(previous.week_start, date(2024, 12, 9));
    assert_eq!(previous.total_hours, 1.0);
    assert_eq!(previous.projects.len(), 1);
    assert_eq!(previous.projects[0].project_id, "p2");

    let current = &buckets[1];
    assert_eq!(current.total_hours, 3.0);
    let ids: Vec<&str> = current
        .projects
        .iter()
        .map(|project| project.project_id.as_str())
        .collect();
    assert_eq!(ids, vec!["p1", UNATTRIBUTED_ID]);
    assert_eq!(current.projects[0].hours, 2.5);
    assert_eq!(current.projects[0].tasks.len(), 1);
    assert_eq!(current.projects[0].tasks[0].hours, 2.5);
    assert_eq!(current.projects[1].hours, 0.5);
}

#[test]
fn entry_without_task_is_unattributed() {
    let index = TaskIndex::default();
    assert!(index.is_empty());
    let entries = vec![entry("e1", None, utc_ms(2024, 12, 17, 9), HOUR_MS)];
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 10, 0, 0).single().expect("now");
    let buckets = weekly_buckets(&EntryAccurate::new(&entries, &index), &week_windows(&now, 1));

    assert_eq!(buckets[0].projects.len(), 1);
    assert_eq!(buckets[0].projects[0].project_id, UNATTRIBUTED_ID);
    assert!(buckets[0].projects[0].tasks.is_empty());
}

#[test]
fn snapshot_fills_only_the_current_week() {
    let rule = LaunchRule::default();
    let metrics = vec![
        ProjectMetric::build(
            "p1",
            "Website",
            &[timed(task("t1", "x", "open"), None, Some(4 * HOUR_MS))],
            &rule,
        ),
        ProjectMetric::build("p2", "Idle", &[task("t2", "x", "open")], &rule),
        ProjectMetric::build(
            "p3",
            "Mobile",
            &[timed(task("t3", "x", "open"), None, Some(HOUR_MS / 4))],
            &rule,
        ),
    ];
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 10, 0, 0).single().expect("now");
    let source = SnapshotDegraded::new(&metrics);
    assert_eq!(source.mode(), BucketMode::SnapshotDegraded);

    let buckets = weekly_buckets(&source, &week_windows(&now, 4));
    assert!(buckets[..3]
        .iter()
        .all(|bucket| bucket.total_hours == 0.0 && bucket.projects.is_empty()));

    let current = &buckets[3];
    let ids: Vec<&str> = current
        .projects
        .iter()
        .map(|project| project.project_id.as_str())
        .collect();
    assert_eq!(ids, vec!["p1", "p3"]);
    assert_eq!(current.total_hours, 4.3);
}

#[test]
fn entries_on_window_edges_land_in_one_bucket() {
    let index = TaskIndex::from_projects(&[project("p1", "Website", vec![task("t1", "x", "open")])]);
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 10, 0, 0).single().expect("now");
    let windows = week_windows(&now, 2);

    // Last millisecond of the previous Sunday and first of the current Monday.
    let entries = vec![
        entry("e1", Some("t1"), windows[0].end_ms, HOUR_MS),
        entry("e2", Some("t1"), windows[1].start_ms, 2 * HOUR_MS),
    ];
    assert_eq!(windows[1].start_ms, utc_ms(2024, 12, 16, 0));

    let buckets = weekly_buckets(&EntryAccurate::new(&entries, &index), &windows);
    assert_eq!(buckets[0].total_hours, 1.0);
    assert_eq!(buckets[1].total_hours, 2.0);
}

#[test]
fn oversized_durations_saturate_instead_of_overflowing() {
    let entries: Vec<RawTimeEntry> = serde_json::from_str(
        r#"[
            {"id": "e1", "task": {"id": "t1", "name": "x"}, "duration": "1e30",
             "start": "1734426000000", "end": "1734429600000"},
            {"id": "e2", "task": {"id": "t1", "name": "x"}, "duration": "1e30",
             "start": "1734429600000", "end": "1734433200000"}
        ]"#,
    )
    .expect("entries json");
    assert_eq!(entries[0].duration, i64::MAX);

    let index = TaskIndex::from_projects(&[project("p1", "Website", vec![task("t1", "x", "open")])]);
    let now = Utc.with_ymd_and_hms(2024, 12, 18, 10, 0, 0).single().expect("now");
    let buckets = weekly_buckets(&EntryAccurate::new(&entries, &index), &week_windows(&now, 1));

    let current = &buckets[0];
    assert!(current.total_hours > 0.0);
    assert_eq!(current.projects.len(), 1);
    assert_eq!(current.projects[0].hours, current.total_hours);
    assert!(current.projects[0].tasks[0].hours > 0.0);
}
