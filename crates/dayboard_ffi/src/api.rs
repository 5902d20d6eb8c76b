//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the to-do store and calendar helpers to Dart via FRB.
//! - Own the one process-wide `TaskStore`, opened by `init_task_store`.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Store operations before `init_task_store` fail with a message.
//! - Titles are trimmed here; the core never sees surrounding whitespace.

use dayboard_core::calendar::{
    agenda_header_label, day_card_labels, days_in_month, month_year_label, shift_month,
};
use dayboard_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, DateKey, SqliteSnapshotStore, StoreConfig, Task, TaskId, TaskStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

struct OpenStore {
    config: StoreConfig,
    store: TaskStore<SqliteSnapshotStore>,
}

static TASK_STORE: Mutex<Option<OpenStore>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive); blank
///   picks the build's default level.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = match level.trim() {
        "" => default_log_level(),
        level => level,
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Opens the to-do store backed by the SQLite file at `db_path`.
///
/// # FFI contract
/// - Sync call; opens and migrates the database on first call.
/// - Repeating the call with the same path is a no-op.
/// - A different path after a successful open is rejected.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_task_store(db_path: String) -> String {
    let trimmed = db_path.trim();
    if trimmed.is_empty() {
        return "db_path cannot be empty".to_string();
    }
    let config = StoreConfig::new(PathBuf::from(trimmed));

    let mut guard = lock_store();
    if let Some(open) = guard.as_ref() {
        if open.config == config {
            return String::new();
        }
        return format!(
            "task store already open at `{}`; refusing to switch to `{}`",
            open.config.db_path.display(),
            config.db_path.display()
        );
    }

    match SqliteSnapshotStore::open(&config) {
        Ok(storage) => {
            *guard = Some(OpenStore {
                config,
                store: TaskStore::new(storage),
            });
            String::new()
        }
        Err(err) => {
            log::error!(
                "event=task_store_open module=ffi status=error error={}",
                err
            );
            format!("init_task_store failed: {err}")
        }
    }
}

/// One task row as rendered by the list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    /// Stable task ID in string form.
    pub id: String,
    pub title: String,
    pub completed: bool,
}

/// Result envelope for add/toggle/delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// False only for rejected input or an unopened store.
    pub ok: bool,
    /// Whether stored state changed. A lookup miss is `ok && !changed`.
    pub changed: bool,
    /// Task after the operation, when one was created or found.
    pub task: Option<TaskItem>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn changed(message: impl Into<String>, task: Option<TaskItem>) -> Self {
        Self {
            ok: true,
            changed: true,
            task,
            message: message.into(),
        }
    }

    fn unchanged(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed: false,
            task: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            task: None,
            message: message.into(),
        }
    }
}

/// Tasks of one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub date_key: String,
    pub items: Vec<TaskItem>,
    pub message: String,
}

/// One agenda section: a day header with its tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaSection {
    pub date_key: String,
    /// Display header, e.g. `Saturday, 21 February`.
    pub header: String,
    pub items: Vec<TaskItem>,
}

/// One card of the horizontal day strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCard {
    pub date_key: String,
    /// Upper-case weekday abbreviation, e.g. `SAT`.
    pub weekday: String,
    pub day_number: String,
}

/// Returns today's local date key (`YYYY-MM-DD`).
#[flutter_rust_bridge::frb(sync)]
pub fn todo_today_key() -> String {
    DateKey::today().to_string()
}

/// Adds a task titled `title` to the day `date_key`.
///
/// # FFI contract
/// - Blank titles (after trim) change nothing and report `changed=false`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add_task(date_key: String, title: String) -> TaskActionResponse {
    let key = match parse_date_key(&date_key) {
        Ok(key) => key,
        Err(message) => return TaskActionResponse::failure(message),
    };
    let title = title.trim().to_string();

    with_store(|store| match store.add_task(key.date(), title) {
        Some(task) => TaskActionResponse::changed("Task added.", Some(to_task_item(&task))),
        None => TaskActionResponse::unchanged("Empty title; nothing added."),
    })
    .unwrap_or_else(TaskActionResponse::failure)
}

/// Flips completion of task `task_id` on day `date_key`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle_task(date_key: String, task_id: String) -> TaskActionResponse {
    let (key, id) = match parse_task_ref(&date_key, &task_id) {
        Ok(parsed) => parsed,
        Err(message) => return TaskActionResponse::failure(message),
    };

    with_store(|store| {
        if !store.toggle_task(&key, id) {
            return TaskActionResponse::unchanged("Task not found; nothing changed.");
        }
        let task = store
            .tasks_for(&key)
            .iter()
            .find(|task| task.id == id)
            .map(to_task_item);
        TaskActionResponse::changed("Task toggled.", task)
    })
    .unwrap_or_else(TaskActionResponse::failure)
}

/// Deletes task `task_id` from day `date_key`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete_task(date_key: String, task_id: String) -> TaskActionResponse {
    let (key, id) = match parse_task_ref(&date_key, &task_id) {
        Ok(parsed) => parsed,
        Err(message) => return TaskActionResponse::failure(message),
    };

    with_store(|store| {
        if store.delete_task(&key, id) {
            TaskActionResponse::changed("Task deleted.", None)
        } else {
            TaskActionResponse::unchanged("Task not found; nothing changed.")
        }
    })
    .unwrap_or_else(TaskActionResponse::failure)
}

/// Lists tasks of day `date_key` in insertion order.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_tasks_for(date_key: String) -> TaskListResponse {
    let failure = |message: String| TaskListResponse {
        ok: false,
        date_key: date_key.clone(),
        items: Vec::new(),
        message,
    };
    let key = match parse_date_key(&date_key) {
        Ok(key) => key,
        Err(message) => return failure(message),
    };

    with_store(|store| {
        let items = store
            .tasks_for(&key)
            .iter()
            .map(to_task_item)
            .collect::<Vec<_>>();
        let message = if items.is_empty() {
            "No tasks for this day.".to_string()
        } else {
            format!("{} task(s).", items.len())
        };
        TaskListResponse {
            ok: true,
            date_key: key.to_string(),
            items,
            message,
        }
    })
    .unwrap_or_else(failure)
}

/// Lists every day holding tasks, most recent first.
///
/// Returns an empty list when the store is not open.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_all_date_keys() -> Vec<String> {
    with_store(|store| {
        store
            .all_date_keys()
            .iter()
            .map(ToString::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Agenda sections, most recent day first.
///
/// Returns an empty list when the store is not open.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_agenda() -> Vec<AgendaSection> {
    with_store(|store| {
        store
            .agenda()
            .into_iter()
            .map(|(key, tasks)| AgendaSection {
                date_key: key.to_string(),
                header: agenda_header_label(&key),
                items: tasks.iter().map(to_task_item).collect(),
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Day strip for the month containing `date_key`; empty on invalid input.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month_days(date_key: String) -> Vec<DayCard> {
    let Ok(key) = parse_date_key(&date_key) else {
        return Vec::new();
    };
    days_in_month(key.date())
        .into_iter()
        .filter_map(|date| {
            let (weekday, day_number) = day_card_labels(date);
            Some(DayCard {
                date_key: DateKey::of(date)?.to_string(),
                weekday,
                day_number,
            })
        })
        .collect()
}

/// Moves `date_key` by `delta` months; returns the input on invalid keys
/// and when the target month has no `YYYY-MM-DD` form.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_shift_month(date_key: String, delta: i32) -> String {
    match parse_date_key(&date_key) {
        Ok(key) => DateKey::of(shift_month(key.date(), delta))
            .unwrap_or(key)
            .to_string(),
        Err(_) => date_key,
    }
}

/// Month header label (e.g. `February 2026`); empty on invalid keys.
#[flutter_rust_bridge::frb(sync)]
pub fn calendar_month_label(date_key: String) -> String {
    parse_date_key(&date_key)
        .map(|key| month_year_label(key.date()))
        .unwrap_or_default()
}

fn lock_store() -> MutexGuard<'static, Option<OpenStore>> {
    // A panic while holding the lock cannot leave the mapping half-updated.
    TASK_STORE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn with_store<T>(f: impl FnOnce(&mut TaskStore<SqliteSnapshotStore>) -> T) -> Result<T, String> {
    let mut guard = lock_store();
    match guard.as_mut() {
        Some(open) => Ok(f(&mut open.store)),
        None => Err("task store is not initialized; call init_task_store first".to_string()),
    }
}

fn parse_date_key(date_key: &str) -> Result<DateKey, String> {
    date_key.trim().parse().map_err(|err| format!("{err}"))
}

fn parse_task_ref(date_key: &str, task_id: &str) -> Result<(DateKey, TaskId), String> {
    let key = parse_date_key(date_key)?;
    let id = TaskId::parse_str(task_id.trim())
        .map_err(|_| format!("invalid task id `{}`", task_id.trim()))?;
    Ok((key, id))
}

fn to_task_item(task: &Task) -> TaskItem {
    TaskItem {
        id: task.id.to_string(),
        title: task.title.clone(),
        completed: task.completed,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        calendar_month_days, calendar_month_label, calendar_shift_month, core_version,
        init_logging, init_task_store, ping, todo_add_task, todo_agenda, todo_all_date_keys,
        todo_delete_task, todo_tasks_for, todo_toggle_task,
    };
    use std::path::PathBuf;
    use std::sync::OnceLock;
    use std::time::{SystemTime, UNIX_EPOCH};

    static TEST_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

    // Tests share one process-wide store, so each test uses its own days.
    fn open_test_store() {
        let path = TEST_DB_PATH.get_or_init(|| {
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("time went backwards")
                .as_nanos();
            std::env::temp_dir().join(format!(
                "dayboard-ffi-{}-{nanos}.sqlite3",
                std::process::id()
            ))
        });
        let error = init_task_store(path.to_string_lossy().into_owned());
        assert!(error.is_empty(), "{error}");
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn init_logging_blank_level_falls_back_to_default() {
        let error = init_logging("  ".to_string(), "tmp/logs".to_string());
        assert!(error.contains("absolute"), "{error}");
        assert!(!error.contains("unsupported log level"));
    }

    #[test]
    fn init_task_store_rejects_empty_and_conflicting_paths() {
        assert!(!init_task_store("  ".to_string()).is_empty());

        open_test_store();
        open_test_store();
        let other = std::env::temp_dir().join("dayboard-ffi-other.sqlite3");
        let error = init_task_store(other.to_string_lossy().into_owned());
        assert!(error.contains("refusing to switch"));
    }

    #[test]
    fn add_toggle_delete_round_trip() {
        open_test_store();
        let day = "2031-05-01".to_string();

        let added = todo_add_task(day.clone(), "  Buy milk  ".to_string());
        assert!(added.ok && added.changed, "{}", added.message);
        let task = added.task.expect("add should return the task");
        assert_eq!(task.title, "Buy milk");
        assert!(!task.completed);

        let toggled = todo_toggle_task(day.clone(), task.id.clone());
        assert!(toggled.changed);
        assert_eq!(toggled.task.map(|item| item.completed), Some(true));

        let listed = todo_tasks_for(day.clone());
        assert!(listed.ok);
        assert_eq!(listed.items.len(), 1);
        assert!(listed.items[0].completed);

        let deleted = todo_delete_task(day.clone(), task.id);
        assert!(deleted.changed);
        assert!(todo_tasks_for(day.clone()).items.is_empty());
        assert!(!todo_all_date_keys().contains(&day));
    }

    #[test]
    fn blank_title_and_misses_report_unchanged() {
        open_test_store();
        let day = "2031-06-01".to_string();

        let blank = todo_add_task(day.clone(), "   ".to_string());
        assert!(blank.ok);
        assert!(!blank.changed);

        let unknown_id = "6f9619ff-8b86-d011-b42d-00c04fc964ff";
        let miss = todo_toggle_task(day.clone(), unknown_id.to_string());
        assert!(miss.ok);
        assert!(!miss.changed);

        let miss = todo_delete_task(day, unknown_id.to_string());
        assert!(miss.ok);
        assert!(!miss.changed);
    }

    #[test]
    fn malformed_input_is_rejected() {
        open_test_store();
        assert!(!todo_add_task("21.02.2026".to_string(), "x".to_string()).ok);
        assert!(!todo_toggle_task("2031-07-01".to_string(), "nope".to_string()).ok);
        assert!(!todo_tasks_for("yesterday".to_string()).ok);
    }

    #[test]
    fn agenda_orders_days_most_recent_first() {
        open_test_store();
        assert!(todo_add_task("2031-08-01".to_string(), "older".to_string()).changed);
        assert!(todo_add_task("2031-08-02".to_string(), "newer".to_string()).changed);

        let agenda = todo_agenda();
        let newer = agenda
            .iter()
            .position(|section| section.date_key == "2031-08-02")
            .expect("newer day in agenda");
        let older = agenda
            .iter()
            .position(|section| section.date_key == "2031-08-01")
            .expect("older day in agenda");
        assert!(newer < older);
        assert_eq!(agenda[newer].header, "Saturday, 2 August");
    }

    #[test]
    fn calendar_helpers_handle_valid_and_invalid_keys() {
        let days = calendar_month_days("2026-02-21".to_string());
        assert_eq!(days.len(), 28);
        assert_eq!(days[20].date_key, "2026-02-21");
        assert_eq!(days[20].weekday, "SAT");
        assert_eq!(days[20].day_number, "21");
        assert!(calendar_month_days("bad".to_string()).is_empty());

        assert_eq!(calendar_shift_month("2026-01-31".to_string(), 1), "2026-02-28");
        assert_eq!(calendar_shift_month("bad".to_string(), 1), "bad");
        assert_eq!(calendar_shift_month("9999-12-15".to_string(), 1), "9999-12-15");
        assert_eq!(calendar_shift_month("9999-11-30".to_string(), 1), "9999-12-30");
        assert_eq!(calendar_month_label("2026-02-21".to_string()), "February 2026");
    }
}
