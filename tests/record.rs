mod resource {
    pub mod recorder;
}

#[cfg(test)]
mod tests {
    use crate::resource::recorder::Recorder;
    use indoc::indoc;
    use rowbind::{
        BindConfig, Binder, FieldDef, MemoryRow, Record, RowCursor, Scalar, SqlType, Statement,
        Value,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use time::{
        Date, PrimitiveDateTime,
        macros::{date, datetime, offset},
    };
    use uuid::Uuid;

    #[derive(Debug, Clone, PartialEq, Record)]
    struct Customer {
        id: i64,
        #[rowbind(name = "full_name")]
        name: String,
        email: Option<String>,
        balance: Decimal,
        joined: Date,
    }

    #[derive(Debug, PartialEq, Record)]
    struct Pair(i32, Option<String>);

    #[derive(Debug, PartialEq, Record)]
    struct Nothing;

    #[derive(Debug, Clone, Copy, PartialEq, Scalar)]
    struct CustomerId(i64);

    #[derive(Debug, Clone, PartialEq, Scalar)]
    struct Email {
        address: Option<String>,
    }

    #[derive(Debug, PartialEq, Record)]
    struct Order {
        id: CustomerId,
        email: Email,
        r#type: String,
    }

    #[derive(Debug, PartialEq, Record)]
    struct Tagged<T> {
        tag: T,
        value: f64,
    }

    fn customer() -> Customer {
        Customer {
            id: 1,
            name: "Ada".into(),
            email: None,
            balance: Decimal::from_str("10.50").unwrap(),
            joined: date!(2020 - 02 - 02),
        }
    }

    #[test]
    fn record_shape() {
        assert_eq!(Customer::ARITY, 5);
        assert_eq!(
            *Customer::fields(),
            [
                FieldDef::new("id", SqlType::BigInt, false),
                FieldDef::new("full_name", SqlType::Varchar, false),
                FieldDef::new("email", SqlType::Varchar, true),
                FieldDef::new("balance", SqlType::Decimal, false),
                FieldDef::new("joined", SqlType::Date, false),
            ]
        );
        assert_eq!(Pair::ARITY, 2);
        assert_eq!(
            Binder::<Pair>::new().field_names().collect::<Vec<_>>(),
            ["0", "1"]
        );
        assert_eq!(Nothing::ARITY, 0);
        assert!(Nothing::fields().is_empty());
        assert_eq!(
            Binder::<Order>::new().field_names().collect::<Vec<_>>(),
            ["id", "email", "type"]
        );
    }

    #[test]
    fn derived_round_trip() {
        let binder = Binder::<Customer>::with_config(BindConfig::utc());
        for email in [None, Some("ada@example.com".to_string())] {
            let value = Customer {
                email,
                ..customer()
            };
            let mut statement = Recorder::default();
            binder.write(&mut statement, &value).unwrap();
            assert_eq!(statement.parameter_count(), 5);
            assert_eq!(binder.read(&statement.row()).unwrap(), value);
        }
    }

    #[test]
    fn derived_legacy_temporal() {
        let binder = Binder::<Customer>::with_config(BindConfig::new(offset!(+11)));
        let mut statement = Recorder {
            native_temporal: false,
            ..Default::default()
        };
        binder.write(&mut statement, &customer()).unwrap();
        assert_eq!(
            statement.params[&5],
            Value::TimestampWithTimezone(Some(datetime!(2020-02-02 00:00 +11)))
        );
        assert_eq!(binder.read(&statement.row()).unwrap(), customer());
    }

    #[test]
    fn derived_skip_and_trailing_key() {
        let binder = Binder::<Customer>::with_config(BindConfig::utc());
        let mut insert = Recorder::default();
        binder
            .write_offsets(&mut insert, &customer(), &binder.skip_offsets(&[0]))
            .unwrap();
        assert_eq!(insert.parameter_count(), 4);
        assert_eq!(insert.params[&1], Value::Varchar(Some("Ada".into())));
        assert_eq!(insert.params[&3], Value::Decimal(Some(Decimal::from_str("10.5").unwrap())));

        let _sql = indoc! {"
            UPDATE customer
            SET full_name = ?, email = ?, balance = ?, joined = ?
            WHERE id = ?
        "};
        let mut update = Recorder::default();
        binder
            .write_offsets(&mut update, &customer(), &binder.trailing_key_offsets(&[0]))
            .unwrap();
        assert_eq!(update.params[&1], Value::Varchar(Some("Ada".into())));
        assert_eq!(update.params[&2], Value::Varchar(None));
        assert_eq!(update.params[&5], Value::Int64(Some(1)));
    }

    #[test]
    fn derived_by_name() {
        let binder = Binder::<Customer>::with_config(BindConfig::utc());
        let row = MemoryRow::new(
            ["JOINED", "id", "email", "Full_Name", "balance"]
                .map(String::from)
                .to_vec(),
            vec![
                Value::Varchar(Some("2020-02-02".into())),
                Value::Int64(Some(1)),
                Value::Null,
                Value::Varchar(Some("Ada".into())),
                Value::Varchar(Some("10.50".into())),
            ],
        );
        let offsets = binder.offsets_by_name(&row).unwrap();
        assert_eq!(offsets, [2, 4, 3, 5, 1]);
        assert_eq!(binder.read_offsets(&row, &offsets).unwrap(), customer());
    }

    #[test]
    fn tuple_struct_and_unit() {
        let binder = Binder::<Pair>::with_config(BindConfig::utc());
        let row = MemoryRow::from_values(vec![Value::Int32(Some(3)), Value::Varchar(None)]);
        assert_eq!(binder.read(&row).unwrap(), Pair(3, None));
        let mut statement = Recorder::default();
        binder.write(&mut statement, &Pair(4, Some("x".into()))).unwrap();
        assert_eq!(statement.params[&2], Value::Varchar(Some("x".into())));

        let row = MemoryRow::from_values(Vec::new());
        assert_eq!(Binder::<Nothing>::new().read(&row).unwrap(), Nothing);
    }

    #[test]
    fn wrappers_are_transparent() {
        assert_eq!(CustomerId::SQL_TYPE, SqlType::BigInt);
        assert!(!CustomerId::NULLABLE);
        assert!(Email::NULLABLE);
        let binder = Binder::<Order>::with_config(BindConfig::utc());
        let value = Order {
            id: CustomerId(9),
            email: Email { address: None },
            r#type: "online".into(),
        };
        let mut statement = Recorder::default();
        binder.write(&mut statement, &value).unwrap();
        assert_eq!(
            statement.params.values().cloned().collect::<Vec<_>>(),
            [
                Value::Int64(Some(9)),
                Value::Varchar(None),
                Value::Varchar(Some("online".into())),
            ]
        );
        assert_eq!(binder.read(&statement.row()).unwrap(), value);
    }

    #[test]
    fn generic_record() {
        let binder = Binder::<Tagged<Uuid>>::with_config(BindConfig::utc());
        let value = Tagged {
            tag: Uuid::from_u128(7),
            value: 2.5,
        };
        let mut statement = Recorder::default();
        binder.write(&mut statement, &value).unwrap();
        assert_eq!(binder.read(&statement.row()).unwrap(), value);
        assert_eq!(Tagged::<PrimitiveDateTime>::fields()[0].sql_type, SqlType::Timestamp);
    }

    #[test]
    fn records_from_cursor() {
        let binder = Binder::<Customer>::with_config(BindConfig::utc());
        let mut statement = Recorder::default();
        binder.write(&mut statement, &customer()).unwrap();
        let records = RowCursor::new(statement.query().unwrap())
            .records(binder)
            .collect::<rowbind::Result<Vec<_>>>()
            .unwrap();
        assert_eq!(records, [customer()]);
    }
}
