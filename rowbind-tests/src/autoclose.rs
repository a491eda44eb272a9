use indoc::indoc;
use rowbind::{BindConfig, Binder, Connection, Driver, query_autoclose};

pub fn autoclose<D: Driver>(driver: &D, url: &str)
where
    D::Connection: Clone,
{
    let binder = Binder::<(i32, String)>::with_config(BindConfig::utc());
    let mut connection = driver.connect(url).expect("Could not open the database");
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS letters;
            CREATE TABLE letters (n INTEGER NOT NULL, letter VARCHAR NOT NULL);
            INSERT INTO letters (n, letter) VALUES (1, 'a'), (2, 'b'), (3, 'c'), (4, 'd');
        "})
        .expect("Failed to create the letters table");

    // Full consumption
    let observer = connection.clone();
    let records = query_autoclose(
        connection,
        "SELECT n, letter FROM letters WHERE n >= ? ORDER BY n",
        &(1,),
        &binder,
    )
    .expect("Failed to run the query");
    let mut count = 0;
    for record in records {
        let (n, _) = record.expect("Failed to read the record");
        count += 1;
        assert_eq!(n, count);
        if count < 4 {
            assert!(!observer.is_closed());
        }
    }
    assert_eq!(count, 4);
    assert!(observer.is_closed());

    // Explicit close before the end
    let connection = driver.connect(url).expect("Could not open the database");
    let observer = connection.clone();
    let mut records = query_autoclose(
        connection,
        "SELECT n, letter FROM letters ORDER BY n",
        &(),
        &binder,
    )
    .expect("Failed to run the query");
    assert_eq!(
        records.next().map(|v| v.expect("Failed to read the record")),
        Some((1, "a".to_string()))
    );
    assert!(!observer.is_closed());
    records.close().expect("Failed to close the records");
    assert!(observer.is_closed());
    assert!(records.next().is_none());

    // Dropped
    let connection = driver.connect(url).expect("Could not open the database");
    let observer = connection.clone();
    {
        let mut records = query_autoclose(
            connection,
            "SELECT n, letter FROM letters ORDER BY n",
            &(),
            &binder,
        )
        .expect("Failed to run the query");
        assert!(records.has_next().expect("Failed to advance"));
    }
    assert!(observer.is_closed());

    // Failure while preparing
    let connection = driver.connect(url).expect("Could not open the database");
    let observer = connection.clone();
    assert!(query_autoclose(connection, "SELECT n FROM missing_table", &(), &binder).is_err());
    assert!(observer.is_closed());
}
