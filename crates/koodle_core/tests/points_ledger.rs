use koodle_core::db::open_db_in_memory;
use koodle_core::{
    CalendarDate, PointsRepository, Session, SqlitePointsRepository, SqliteTaskRepository,
    TaskRepository, TaskService,
};
use rusqlite::Connection;
use uuid::Uuid;

fn service(conn: &Connection) -> TaskService<SqliteTaskRepository<'_>, SqlitePointsRepository<'_>> {
    TaskService::new(
        SqliteTaskRepository::new(conn),
        SqlitePointsRepository::new(conn),
    )
}

fn date(value: &str) -> CalendarDate {
    CalendarDate::parse(value).unwrap()
}

#[test]
fn ledger_row_is_created_lazily_on_first_completion() {
    let conn = open_db_in_memory().unwrap();
    let engine = service(&conn);
    let user = Session::new(Uuid::new_v4(), "lazy@example.com");
    let today = date("2024-03-01");

    let task = engine.create_task(&user, "journal", today.clone()).unwrap();
    assert!(engine.points_entry(&user, &today).unwrap().is_none());

    engine.complete_task(&user, task.task_id, today.clone()).unwrap();
    assert_eq!(engine.points_entry(&user, &today).unwrap().unwrap().points, 10);
}

#[test]
fn award_upsert_increments_an_existing_row() {
    let conn = open_db_in_memory().unwrap();
    let points = SqlitePointsRepository::new(&conn);
    let user = Uuid::new_v4();
    let today = date("2024-03-01");

    assert_eq!(points.award(user, &today, 10).unwrap(), 10);
    assert_eq!(points.award(user, &today, 10).unwrap(), 20);
    assert_eq!(points.award(user, &today, 10).unwrap(), 30);

    let entry = points.entry(user, &today).unwrap().unwrap();
    assert_eq!(entry.points, 30);
}

// Regression guard for the inherited creation-date/completion-date split:
// the display aggregate counts by creation date while the ledger records by
// completion date. The two figures must stay independently observable.
#[test]
fn late_completion_diverges_between_display_aggregate_and_ledger() {
    let conn = open_db_in_memory().unwrap();
    let engine = service(&conn);
    let user = Session::new(Uuid::new_v4(), "night-owl@example.com");
    let created_on = date("2024-01-01");
    let completed_on = date("2024-01-02");

    let task = engine
        .create_task(&user, "finish report", created_on.clone())
        .unwrap();
    engine
        .complete_task(&user, task.task_id, completed_on.clone())
        .unwrap();

    // Display aggregate follows the creation date.
    assert_eq!(engine.daily_points(&user, &created_on).unwrap(), 10);
    assert_eq!(engine.daily_points(&user, &completed_on).unwrap(), 0);

    // The persisted ledger row lives under the completion date.
    assert!(engine.points_entry(&user, &created_on).unwrap().is_none());
    let entry = engine.points_entry(&user, &completed_on).unwrap().unwrap();
    assert_eq!(entry.date, completed_on);
    assert_eq!(entry.points, 10);
}

#[test]
fn users_cannot_see_or_mutate_each_others_tasks_and_points() {
    let conn = open_db_in_memory().unwrap();
    let engine = service(&conn);
    let alice = Session::new(Uuid::new_v4(), "alice@example.com");
    let bob = Session::new(Uuid::new_v4(), "bob@example.com");
    let today = date("2024-04-01");

    let alice_task = engine.create_task(&alice, "laundry", today.clone()).unwrap();

    // Bob cannot fetch or list Alice's task, nor complete it under his
    // identity.
    let tasks = SqliteTaskRepository::new(&conn);
    assert!(tasks.get_task(bob.user_id, alice_task.task_id).unwrap().is_none());
    assert!(tasks
        .get_task(alice.user_id, alice_task.task_id)
        .unwrap()
        .is_some());
    assert!(engine.tasks_for_day(&bob, &today).unwrap().is_empty());
    engine
        .complete_task(&bob, alice_task.task_id, today.clone())
        .unwrap();

    let stored = &engine.tasks_for_day(&alice, &today).unwrap()[0];
    assert!(!stored.completed, "cross-user completion must be a no-op");
    assert!(engine.points_entry(&alice, &today).unwrap().is_none());
    assert!(engine.points_entry(&bob, &today).unwrap().is_none());

    // Alice's own completion stays scoped to her ledger.
    engine
        .complete_task(&alice, alice_task.task_id, today.clone())
        .unwrap();
    assert_eq!(engine.points_entry(&alice, &today).unwrap().unwrap().points, 10);
    assert!(engine.points_entry(&bob, &today).unwrap().is_none());
    assert_eq!(engine.daily_points(&bob, &today).unwrap(), 0);
}

#[test]
fn ledger_rows_are_independent_per_date() {
    let conn = open_db_in_memory().unwrap();
    let engine = service(&conn);
    let user = Session::new(Uuid::new_v4(), "steady@example.com");

    for day in ["2024-05-01", "2024-05-02"] {
        let today = date(day);
        let task = engine.create_task(&user, "meditate", today.clone()).unwrap();
        engine.complete_task(&user, task.task_id, today.clone()).unwrap();
    }

    assert_eq!(
        engine.points_entry(&user, &date("2024-05-01")).unwrap().unwrap().points,
        10
    );
    assert_eq!(
        engine.points_entry(&user, &date("2024-05-02")).unwrap().unwrap().points,
        10
    );
}
