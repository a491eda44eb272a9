use indoc::indoc;
use rowbind::{
    BindConfig, Binder, Connection, FluentStatement, Record, Statement,
    temporal::{epoch_millis, to_instant},
};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    macros::{date, datetime, offset},
};

#[derive(Debug, Clone, PartialEq, Record)]
struct Event {
    id: i32,
    at: PrimitiveDateTime,
    day: Date,
    created: OffsetDateTime,
    ends: Option<PrimitiveDateTime>,
}

pub fn temporal<C: Connection>(connection: &mut C) {
    let binder = Binder::<Event>::with_config(BindConfig::new(offset!(+2)));

    // Setup
    connection
        .execute_batch(indoc! {"
            DROP TABLE IF EXISTS event;
            CREATE TABLE event (
                id INTEGER NOT NULL,
                at TIMESTAMP NOT NULL,
                day DATE NOT NULL,
                created TIMESTAMP NOT NULL,
                ends TIMESTAMP
            );
        "})
        .expect("Failed to create the event table");

    let events = [
        Event {
            id: 1,
            at: datetime!(2024-03-31 01:30:15.250),
            day: date!(2024 - 03 - 31),
            created: datetime!(2024-03-30 23:30:15.250 UTC),
            ends: Some(datetime!(2024-04-01 00:00)),
        },
        Event {
            id: 2,
            at: datetime!(1970-01-01 00:00),
            day: date!(1969 - 12 - 31),
            created: datetime!(1999-12-31 23:59:59.999 -5),
            ends: None,
        },
    ];
    let mut insert = FluentStatement::new(
        connection
            .prepare("INSERT INTO event (id, at, day, created, ends) VALUES (?, ?, ?, ?, ?)")
            .expect("Failed to prepare the insert"),
    );
    let native = insert.statement().native_temporal();
    for event in &events {
        insert
            .bind(&binder, event)
            .expect("Failed to bind the event")
            .update()
            .expect("Failed to insert the event");
    }

    // Same zone, same values
    let mut select = FluentStatement::new(
        connection
            .prepare("SELECT id, at, day, created, ends FROM event ORDER BY id")
            .expect("Failed to prepare the select"),
    );
    let found = select.query(&binder).expect("Failed to query the events");
    assert_eq!(found, events);

    if native {
        return;
    }

    // Instants are stored, the same epoch milliseconds come back
    let stored = FluentStatement::new(
        connection
            .prepare("SELECT at FROM event ORDER BY id")
            .expect("Failed to prepare the select"),
    )
    .query_scalar::<i64>()
    .expect("Failed to query the instants");
    assert_eq!(
        stored,
        events
            .iter()
            .map(|e| epoch_millis(to_instant(e.at, binder.config())))
            .collect::<Vec<_>>()
    );

    // Another zone shows the same instants
    let utc = binder.with_zone(offset!(UTC));
    let found = select.query(&utc).expect("Failed to query the events");
    assert_eq!(found[0].at, datetime!(2024-03-30 23:30:15.250));
    assert_eq!(found[0].day, date!(2024 - 03 - 30));
    assert_eq!(found[0].created, events[0].created);
    assert_eq!(found[1].at, datetime!(1969-12-31 22:00));
    assert_eq!(
        epoch_millis(to_instant(found[0].at, utc.config())),
        epoch_millis(to_instant(events[0].at, binder.config()))
    );
}
