//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `todo_core` linkage without any UI surface.
//! - Given a JSON config file, start logging, open the configured store and
//!   print list-surface statistics as `key=value` lines.

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;
use todo_core::db::open_db_from_config;
use todo_core::{
    init_logging, CoreConfig, KvTodoRepository, SqliteKvStore, SurfaceKind, SurfaceSession,
};

fn main() -> ExitCode {
    println!("todo_core ping={}", todo_core::ping());
    println!("todo_core version={}", todo_core::core_version());

    let Some(config_path) = std::env::args_os().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match report(Path::new(&config_path)) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("todo_cli error={err}");
            ExitCode::FAILURE
        }
    }
}

fn report(config_path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let config = CoreConfig::load(config_path)?;
    let logging = init_logging(&config)?;

    let conn = open_db_from_config(&config)?;
    let store = SqliteKvStore::try_new(&conn)?;
    let session = SurfaceSession::activate(
        SurfaceKind::List,
        KvTodoRepository::with_keys(&store, config.storage_keys()),
    );
    let stats = session.stats();

    Ok(vec![
        format!("logging={}", if logging { "on" } else { "off" }),
        format!("filter={}", session.filter().as_str()),
        format!("total={}", stats.total),
        format!("completed={}", stats.completed),
        format!("active={}", stats.active),
        format!("high={}", stats.priority.high),
        format!("medium={}", stats.priority.medium),
        format!("low={}", stats.priority.low),
    ])
}

#[cfg(test)]
mod tests {
    use super::report;
    use todo_core::db::open_db;
    use todo_core::{
        AlwaysConfirm, KvTodoRepository, SqliteKvStore, StorageKeys, SurfaceKind, SurfaceSession,
        TodoFilter,
    };

    #[test]
    fn report_reads_store_named_by_config() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("cli.sqlite3");
        let log_dir = dir.path().join("logs");
        {
            let conn = open_db(&db_path).unwrap();
            let store = SqliteKvStore::try_new(&conn).unwrap();
            let keys = StorageKeys {
                todos: "cli.todos".to_string(),
                filter: "cli.filter".to_string(),
            };
            let mut list = SurfaceSession::activate(
                SurfaceKind::List,
                KvTodoRepository::with_keys(&store, keys),
            );
            list.load_samples(&AlwaysConfirm);
            list.set_filter(TodoFilter::Active);
        }

        let config_path = dir.path().join("todo.json");
        let config_json = serde_json::json!({
            "todos_key": "cli.todos",
            "filter_key": "cli.filter",
            "log_level": "info",
            "log_dir": log_dir,
            "db_path": db_path,
        });
        std::fs::write(&config_path, config_json.to_string()).unwrap();

        let lines = report(&config_path).unwrap();
        assert_eq!(lines[0], "logging=on");
        assert_eq!(lines[1], "filter=active");
        assert_eq!(lines[2], "total=6");
        assert!(log_dir.is_dir());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = report(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
