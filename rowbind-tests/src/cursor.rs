use indoc::indoc;
use rowbind::{BindConfig, Binder, Connection, FluentStatement, RowCursor, Scalar, Statement};

pub fn cursor<C: Connection>(connection: &mut C) {
    let config = BindConfig::utc();

    // Setup
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS numbers;
            CREATE TABLE numbers (n INTEGER NOT NULL, label VARCHAR);
            INSERT INTO numbers (n, label) VALUES (1, 'one'), (2, 'two'), (3, 'three'), (4, 'four');
        "})
        .expect("Failed to create the numbers table");
    let mut statement = connection
        .prepare("SELECT n, label FROM numbers ORDER BY n")
        .expect("Failed to prepare the select");

    // Repeated has_next does not skip rows
    let mut rows = RowCursor::new(statement.query().expect("Failed to query"));
    assert!(rows.has_next().expect("Failed to advance"));
    assert!(rows.has_next().expect("Failed to advance"));
    let mut read = Vec::new();
    while rows.has_next().expect("Failed to advance") {
        assert!(rows.has_next().expect("Failed to advance"));
        let row = rows.take_next().expect("Failed to take the row");
        read.push(i32::read(row, 1, &config).expect("Failed to read the value"));
    }
    assert_eq!(read, [1, 2, 3, 4]);
    assert!(rows.is_closed());
    assert!(!rows.has_next().expect("Failed to advance"));
    drop(rows);

    // take_next alone, as many times as there are rows
    let mut rows = RowCursor::new(statement.query().expect("Failed to query"));
    let mut read = Vec::new();
    for _ in 0..4 {
        let row = rows.take_next().expect("Failed to take the row");
        read.push(String::read(row, 2, &config).expect("Failed to read the value"));
    }
    assert_eq!(read, ["one", "two", "three", "four"]);
    assert!(!rows.has_next().expect("Failed to advance"));
    assert!(rows.is_closed());
    assert!(rows.take_next().is_err());
    drop(rows);

    // Early close, then the statement runs again
    let mut rows = RowCursor::new(statement.query().expect("Failed to query"));
    rows.take_next().expect("Failed to take the row");
    rows.close().expect("Failed to close the cursor");
    assert!(rows.is_closed());
    assert!(!rows.has_next().expect("Failed to advance"));
    drop(rows);
    let binder = Binder::<(i64, Option<String>)>::with_config(config);
    let records = RowCursor::new(statement.query().expect("Failed to query"))
        .records(binder.clone())
        .collect::<rowbind::Result<Vec<_>>>()
        .expect("Failed to read the records");
    assert_eq!(records.len(), 4);
    assert_eq!(records[3], (4, Some("four".to_string())));
    statement.close().expect("Failed to close the statement");

    // Records owning the statement
    let mut records = FluentStatement::new(
        connection
            .prepare("SELECT n, label FROM numbers WHERE n > ? ORDER BY n")
            .expect("Failed to prepare the select"),
    )
    .set(2)
    .expect("Failed to set the parameter")
    .cursor()
    .expect("Failed to query")
    .records(binder);
    assert!(records.has_next().expect("Failed to advance"));
    assert!(records.has_next().expect("Failed to advance"));
    assert_eq!(
        records.next().map(|v| v.expect("Failed to read the record")),
        Some((3, Some("three".to_string())))
    );
    assert_eq!(records.count(), 1);
}
