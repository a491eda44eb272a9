#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rowbind::{
        BindConfig, Binder, Connection, Driver, FluentStatement, Row, RowCursor, Statement, Value,
    };
    use rowbind_sqlite::{SqliteConnection, SqliteDriver, TemporalMode};
    use rowbind_tests::{init_logs, silent_logs};
    use std::{fs, path::Path, sync::Mutex};
    use time::macros::{date, offset};

    static MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn create_database() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/creation.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        assert!(
            !Path::new(DB_PATH).exists(),
            "Database file should not exist before test"
        );
        SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", DB_PATH))
            .expect("Could not open the database");
        assert!(
            Path::new(DB_PATH).exists(),
            "Database file should be created after connection"
        );
        let mut connection = SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH))
            .expect("Could not open the database");
        silent_logs! {
            assert!(connection.execute_batch("CREATE TABLE t (a INTEGER)").is_err());
        }
        connection.close().expect("Could not close the database");
        fs::remove_file(DB_PATH)
            .expect(format!("Failed to remove existing test database file {}", DB_PATH).as_str());
        silent_logs! {
            assert!(
                SqliteConnection::connect(&format!("sqlite://{}?mode=ro", DB_PATH)).is_err(),
                "Should not be able to open in read only unexisting database"
            );
        }
    }

    #[test]
    fn wrong_url() {
        silent_logs! {
            assert!(SqliteConnection::connect("duckdb://some_value").is_err());
            assert!(SqliteConnection::connect("sqlite://:memory:?temporal=sometimes").is_err());
            assert!(SqliteConnection::connect("sqlite://:memory:?busy_timeout=-1").is_err());
            assert!(SqliteConnection::connect("sqlite://:memory:?busy_timeout=soon").is_err());
        }
    }

    #[test]
    fn temporal_mode_from_url() {
        let driver = SqliteDriver::new();
        let mut native = driver
            .connect("sqlite://:memory:")
            .expect("Could not open the database");
        assert_eq!(native.temporal_mode(), TemporalMode::Native);
        let statement = native.prepare("SELECT 1").expect("Failed to prepare");
        assert!(statement.native_temporal());
        let mut legacy = driver
            .connect("sqlite://:memory:?temporal=legacy")
            .expect("Could not open the database");
        assert_eq!(legacy.temporal_mode(), TemporalMode::Legacy);
        let statement = legacy.prepare("SELECT 1").expect("Failed to prepare");
        assert!(!statement.native_temporal());
    }

    #[test]
    fn shared_close() {
        let mut connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        let mut other = connection.clone();
        let mut statement = connection
            .prepare("SELECT 1 AS one")
            .expect("Failed to prepare");
        assert!(!other.is_closed());
        other.close().expect("Failed to close");
        assert!(connection.is_closed());
        other.close().expect("Closing twice has no effect");
        silent_logs! {
            assert!(connection.prepare("SELECT 1").is_err());
            assert!(statement.query().is_err());
        }
        statement.close().expect("Failed to close the statement");
    }

    #[test]
    fn close_with_open_cursor() {
        let mut connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        connection
            .execute_batch(indoc! {"
                CREATE TABLE n (v INTEGER);
                INSERT INTO n (v) VALUES (1), (2);
            "})
            .expect("Failed to create the table");
        let mut statement = connection
            .prepare("SELECT v FROM n ORDER BY v")
            .expect("Failed to prepare");
        let mut rows = RowCursor::new(statement.query().expect("Failed to query"));
        assert!(rows.has_next().expect("Failed to advance"));
        connection
            .close()
            .expect("Closing with an open statement should succeed");
        assert!(connection.is_closed());
        silent_logs! {
            let row = rows.take_next().expect("The row was already read");
            assert!(row.get_value(1).is_err());
            assert!(rows.has_next().is_err());
        }
        rows.close().expect("Failed to close the cursor");
        statement.close().expect("Failed to close the statement");
        statement.close().expect("Closing twice has no effect");
    }

    #[test]
    fn busy_timeout() {
        init_logs();
        const DB_PATH: &'static str = "../target/debug/busy.sqlite";
        let _guard = MUTEX.lock().unwrap();
        if Path::new(DB_PATH).exists() {
            fs::remove_file(DB_PATH)
                .expect(format!("Failed to remove test database file {}", DB_PATH).as_str());
        }
        let mut holder = SqliteConnection::connect(&format!("sqlite://{}?mode=rwc", DB_PATH))
            .expect("Could not open the database");
        holder
            .execute_batch(indoc! {"
                CREATE TABLE t (a INTEGER);
                BEGIN EXCLUSIVE;
            "})
            .expect("Failed to lock the database");
        let mut waiter =
            SqliteConnection::connect(&format!("sqlite://{}?busy_timeout=50", DB_PATH))
                .expect("Could not open the database");
        silent_logs! {
            assert!(waiter.execute_batch("INSERT INTO t (a) VALUES (1)").is_err());
            assert!(
                waiter
                    .prepare("INSERT INTO t (a) VALUES (2)")
                    .and_then(|mut s| s.execute())
                    .is_err()
            );
        }
        holder.execute_batch("COMMIT").expect("Failed to unlock");
        waiter
            .execute_batch("INSERT INTO t (a) VALUES (3)")
            .expect("The database should be unlocked");
        let count = FluentStatement::new(
            waiter
                .prepare("SELECT COUNT(*) FROM t")
                .expect("Failed to prepare"),
        )
        .query_scalar::<i64>()
        .expect("Failed to query");
        assert_eq!(count, [1]);
    }

    #[test]
    fn column_labels_and_values() {
        let mut connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        let mut statement = connection
            .prepare("SELECT 1 AS one, 'two' AS two, NULL AS three, 4.5 AS four, x'0102' AS five")
            .expect("Failed to prepare");
        let mut rows = RowCursor::new(statement.query().expect("Failed to query"));
        let row = rows.take_next().expect("Failed to take the row");
        assert_eq!(row.column_count(), 5);
        assert_eq!(row.column_name(2).unwrap(), "two");
        assert!(row.column_name(6).is_err());
        assert_eq!(row.get_value(1).unwrap(), Value::Int64(Some(1)));
        assert_eq!(row.get_value(2).unwrap(), Value::Varchar(Some("two".into())));
        assert_eq!(row.get_value(3).unwrap(), Value::Null);
        assert_eq!(row.get_value(4).unwrap(), Value::Float64(Some(4.5)));
        assert_eq!(
            row.get_value(5).unwrap(),
            Value::Blob(Some(vec![1, 2].into_boxed_slice()))
        );
        assert!(row.get_value(0).is_err());
        assert!(!rows.has_next().unwrap());
    }

    #[test]
    fn bind_errors() {
        let mut connection =
            SqliteConnection::connect("sqlite://:memory:").expect("Could not open the database");
        let mut statement = connection
            .prepare("SELECT ?, ?")
            .expect("Failed to prepare");
        assert_eq!(statement.parameter_count(), 2);
        silent_logs! {
            assert!(statement.bind_value(3, Value::Int32(Some(1))).is_err());
            assert!(statement.bind_value(0, Value::Int32(Some(1))).is_err());
        }
        statement
            .bind_value(1, Value::Int32(Some(1)))
            .expect("Failed to bind");
        statement.clear_bindings().expect("Failed to clear");
        let mut fluent = FluentStatement::new(statement);
        let values = fluent
            .query_scalar::<Option<i32>>()
            .expect("Failed to query");
        assert_eq!(values, [None]);
    }

    #[test]
    fn legacy_storage() {
        let mut connection = SqliteConnection::connect("sqlite://:memory:?temporal=legacy")
            .expect("Could not open the database");
        connection
            .execute_batch(indoc! {"
                CREATE TABLE day (d DATE);
            "})
            .expect("Failed to create the table");
        let binder = Binder::<(time::Date,)>::with_config(BindConfig::new(offset!(-3)));
        FluentStatement::new(
            connection
                .prepare("INSERT INTO day (d) VALUES (?)")
                .expect("Failed to prepare"),
        )
        .bind(&binder, &(date!(2000 - 01 - 01),))
        .expect("Failed to bind")
        .update()
        .expect("Failed to insert");
        let stored = FluentStatement::new(
            connection
                .prepare("SELECT d FROM day")
                .expect("Failed to prepare"),
        )
        .query_scalar::<i64>()
        .expect("Failed to query");
        assert_eq!(stored, [946_695_600_000]);
    }
}
