use indoc::indoc;
use rowbind::{BindConfig, Binder, Connection, FluentStatement, Record, Scalar};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::macros::time;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Scalar)]
struct Quantity(i64);

#[derive(Debug, Clone, PartialEq, Record)]
struct Everything {
    flag: bool,
    tiny: i8,
    small: i16,
    regular: i32,
    quantity: Quantity,
    ratio: f32,
    precise: f64,
    #[rowbind(name = "amount")]
    money: Decimal,
    letter: char,
    text: String,
    bytes: Vec<u8>,
    identifier: Uuid,
    moment: time::Time,
    missing: Option<Uuid>,
}

pub fn types<C: Connection>(connection: &mut C) {
    let binder = Binder::<Everything>::with_config(BindConfig::utc());

    // Setup
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS everything;
            CREATE TABLE everything (
                flag BOOLEAN,
                tiny SMALLINT,
                small SMALLINT,
                regular INTEGER,
                quantity BIGINT,
                ratio REAL,
                precise DOUBLE,
                amount VARCHAR,
                letter VARCHAR,
                text VARCHAR,
                bytes BLOB,
                identifier VARCHAR,
                moment TIME,
                missing VARCHAR
            );
        "})
        .expect("Failed to create the everything table");

    let values = [
        Everything {
            flag: true,
            tiny: -128,
            small: 32767,
            regular: -2_000_000_000,
            quantity: Quantity(9_000_000_000_000),
            ratio: 0.25,
            precise: 1.0e-300,
            money: Decimal::from_str("12345.6789").unwrap(),
            letter: 'ß',
            text: "Hello, world! こんにちは".into(),
            bytes: vec![0, 159, 146, 150, 255],
            identifier: Uuid::parse_str("5e915574-bb30-4430-98cf-c5854f61fbbd").unwrap(),
            moment: time!(23:59:59.125),
            missing: None,
        },
        Everything {
            flag: false,
            tiny: 0,
            small: -1,
            regular: 0,
            quantity: Quantity(-1),
            ratio: -3.5,
            precise: 0.0,
            money: Decimal::ZERO,
            letter: ' ',
            text: String::new(),
            bytes: Vec::new(),
            identifier: Uuid::nil(),
            moment: time!(00:00),
            missing: Some(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap()),
        },
    ];
    let mut insert = FluentStatement::new(
        connection
            .prepare(indoc! {"
                INSERT INTO everything
                (flag, tiny, small, regular, quantity, ratio, precise, amount, letter, text, bytes, identifier, moment, missing)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "})
            .expect("Failed to prepare the insert"),
    );
    for value in &values {
        insert
            .bind(&binder, value)
            .expect("Failed to bind the value")
            .update()
            .expect("Failed to insert the value");
    }

    let mut select = FluentStatement::new(
        connection
            .prepare("SELECT * FROM everything ORDER BY regular")
            .expect("Failed to prepare the select"),
    );
    let found = select.query(&binder).expect("Failed to query the values");
    assert_eq!(found.len(), 2);
    assert_eq!(found[0], values[0]);
    assert_eq!(found[1], values[1]);

    let quantities = FluentStatement::new(
        connection
            .prepare("SELECT quantity FROM everything WHERE flag = ? ORDER BY quantity")
            .expect("Failed to prepare the select"),
    )
    .set(true)
    .expect("Failed to set the flag")
    .query_scalar::<Quantity>()
    .expect("Failed to query the quantities");
    assert_eq!(quantities, [Quantity(9_000_000_000_000)]);

    let amounts = FluentStatement::new(
        connection
            .prepare("SELECT amount FROM everything WHERE missing IS NULL")
            .expect("Failed to prepare the select"),
    )
    .query_scalar::<Option<Decimal>>()
    .expect("Failed to query the amounts");
    assert_eq!(amounts, [Some(Decimal::from_str("12345.6789").unwrap())]);
}
