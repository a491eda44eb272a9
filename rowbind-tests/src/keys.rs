use indoc::indoc;
use rowbind::{BindConfig, Binder, Connection, FluentStatement, Record};

#[derive(Debug, Clone, PartialEq, Record)]
struct Customer {
    id: i64,
    name: String,
    email: Option<String>,
}

pub fn keys<C: Connection>(connection: &mut C) {
    let binder = Binder::<Customer>::with_config(BindConfig::utc());

    // Setup
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS customer;
            CREATE TABLE customer (
                id INTEGER PRIMARY KEY,
                name VARCHAR NOT NULL,
                email VARCHAR
            );
        "})
        .expect("Failed to create the customer table");

    // Scalar insert
    let first = FluentStatement::new(
        connection
            .prepare("INSERT INTO customer (name) VALUES (?)")
            .expect("Failed to prepare the insert"),
    )
    .set(String::from("Ada"))
    .expect("Failed to set the name")
    .insert_returning_key::<i64>()
    .expect("Failed to insert the customer")
    .expect("The insert did not generate a key");
    let found = FluentStatement::new(
        connection
            .prepare("SELECT id FROM customer WHERE name = ?")
            .expect("Failed to prepare the select"),
    )
    .set(String::from("Ada"))
    .expect("Failed to set the name")
    .query_scalar::<i64>()
    .expect("Failed to query the key");
    assert_eq!(found, [first]);

    // Record insert, key skipped
    let grace = Customer {
        id: 0,
        name: "Grace".into(),
        email: Some("grace@example.com".into()),
    };
    let mut insert = FluentStatement::new(
        connection
            .prepare("INSERT INTO customer (name, email) VALUES (?, ?)")
            .expect("Failed to prepare the insert"),
    );
    let second = insert
        .bind_offsets(&binder, &grace, &binder.skip_offsets(&[0]))
        .expect("Failed to bind the customer")
        .insert_returning_key::<i64>()
        .expect("Failed to insert the customer")
        .expect("The insert did not generate a key");
    assert_ne!(first, second);
    let stored = FluentStatement::new(
        connection
            .prepare("SELECT id, name, email FROM customer WHERE id = ?")
            .expect("Failed to prepare the select"),
    )
    .set(second)
    .expect("Failed to set the id")
    .query_one(&binder)
    .expect("Failed to query the customer");
    assert_eq!(
        stored,
        Some(Customer {
            id: second,
            ..grace.clone()
        })
    );

    // No key
    let key = FluentStatement::new(
        connection
            .prepare("UPDATE customer SET email = ? WHERE id = ?")
            .expect("Failed to prepare the update"),
    )
    .set_null::<String>()
    .expect("Failed to set the email")
    .set(first)
    .expect("Failed to set the id")
    .insert_returning_key::<i64>()
    .expect("Failed to update the customer");
    assert_eq!(key, None);
    let key = FluentStatement::new(
        connection
            .prepare("INSERT INTO customer (name) SELECT name FROM customer WHERE id < 0")
            .expect("Failed to prepare the insert"),
    )
    .insert_returning_key::<i64>()
    .expect("Failed to run the insert");
    assert_eq!(key, None);

    // Inserts not starting with INSERT
    let commented = FluentStatement::new(
        connection
            .prepare("-- new customer\nINSERT INTO customer (name) VALUES (?)")
            .expect("Failed to prepare the insert"),
    )
    .set(String::from("Edsger"))
    .expect("Failed to set the name")
    .insert_returning_key::<i64>()
    .expect("Failed to insert the customer")
    .expect("The commented insert did not generate a key");
    let with = FluentStatement::new(
        connection
            .prepare("WITH v(n) AS (SELECT 'Barbara') INSERT INTO customer (name) SELECT n FROM v")
            .expect("Failed to prepare the insert"),
    )
    .insert_returning_key::<i64>()
    .expect("Failed to insert the customer")
    .expect("The insert with a common table expression did not generate a key");
    let found = FluentStatement::new(
        connection
            .prepare("SELECT id FROM customer WHERE name IN ('Edsger', 'Barbara') ORDER BY id")
            .expect("Failed to prepare the select"),
    )
    .query_scalar::<i64>()
    .expect("Failed to query the keys");
    assert_eq!(found, [commented, with]);
}
