use indoc::indoc;
use rowbind::{BindConfig, Binder, Connection, FluentStatement, Record, RowCursor, Statement};

#[derive(Debug, Clone, PartialEq, Record)]
struct Item {
    id: i32,
    name: String,
    note: Option<String>,
    price: Option<f64>,
}

pub fn simple<C: Connection>(connection: &mut C) {
    let binder = Binder::<Item>::with_config(BindConfig::utc());

    // Setup
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS simple_item;
            CREATE TABLE simple_item (
                id INTEGER PRIMARY KEY,
                name VARCHAR NOT NULL,
                note VARCHAR,
                price DOUBLE
            );
        "})
        .expect("Failed to create the simple_item table");

    // Insert
    let items = [
        Item {
            id: 1,
            name: "pencil".into(),
            note: Some("HB".into()),
            price: Some(0.75),
        },
        Item {
            id: 2,
            name: "eraser".into(),
            note: None,
            price: None,
        },
    ];
    let mut insert = FluentStatement::new(
        connection
            .prepare("INSERT INTO simple_item (id, name, note, price) VALUES (?, ?, ?, ?)")
            .expect("Failed to prepare the insert"),
    );
    for item in &items {
        let affected = insert
            .bind(&binder, item)
            .expect("Failed to bind the item")
            .update()
            .expect("Failed to insert the item");
        assert_eq!(affected, 1);
    }
    insert
        .statement()
        .close()
        .expect("Failed to close the insert");

    // Select
    let mut select = FluentStatement::new(
        connection
            .prepare("SELECT id, name, note, price FROM simple_item ORDER BY id")
            .expect("Failed to prepare the select"),
    );
    let found = select.query(&binder).expect("Failed to query the items");
    assert_eq!(found, items);

    // Read, write to a fresh statement and read again
    for item in &items {
        let mut echo = FluentStatement::new(
            connection
                .prepare("SELECT ?, ?, ?, ?")
                .expect("Failed to prepare the echo"),
        );
        echo.bind(&binder, item).expect("Failed to bind the item");
        let echoed = echo
            .query_one(&binder)
            .expect("Failed to query the echo")
            .expect("The echo returned no row");
        assert_eq!(echoed, *item);
    }

    // Update, key last
    let mut update = FluentStatement::new(
        connection
            .prepare("UPDATE simple_item SET name = ?, note = ?, price = ? WHERE id = ?")
            .expect("Failed to prepare the update"),
    );
    let changed = Item {
        id: 2,
        name: "rubber".into(),
        note: Some("soft".into()),
        price: Some(1.25),
    };
    let affected = update
        .bind_offsets(&binder, &changed, &binder.trailing_key_offsets(&[0]))
        .expect("Failed to bind the update")
        .update()
        .expect("Failed to update the item");
    assert_eq!(affected, 1);
    let mut select_one = FluentStatement::new(
        connection
            .prepare("SELECT id, name, note, price FROM simple_item WHERE id = ?")
            .expect("Failed to prepare the select"),
    );
    let found = select_one
        .set(2)
        .expect("Failed to set the id")
        .query_one(&binder)
        .expect("Failed to query the item");
    assert_eq!(found, Some(changed.clone()));
    let missing = select_one
        .reset()
        .set(3)
        .expect("Failed to set the id")
        .query_one(&binder)
        .expect("Failed to query the item");
    assert_eq!(missing, None);

    // Columns matched by name
    let mut statement = connection
        .prepare("SELECT price, note, name, id FROM simple_item WHERE id = 2")
        .expect("Failed to prepare the select");
    let mut rows = RowCursor::new(statement.query().expect("Failed to query"));
    let row = rows.take_next().expect("Failed to read the row");
    let offsets = binder
        .offsets_by_name(row)
        .expect("Failed to match the columns");
    assert_eq!(offsets, [4, 3, 2, 1]);
    assert_eq!(
        binder
            .read_offsets(row, &offsets)
            .expect("Failed to read the item"),
        changed
    );
    assert!(!rows.has_next().expect("Failed to advance"));
    assert!(rows.is_closed());

    // Errors
    assert!(connection.prepare("SELECT FROM WHERE").is_err());
    assert!(connection.prepare("SELECT 1; SELECT 2").is_err());
    let mut wrong = FluentStatement::new(
        connection
            .prepare("SELECT name FROM simple_item ORDER BY id")
            .expect("Failed to prepare the select"),
    );
    assert!(wrong.query(&Binder::<(i32,)>::new()).is_err());
    assert!(wrong.query(&Binder::<(String, String)>::new()).is_err());
}
