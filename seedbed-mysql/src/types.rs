//! Conversions between fixture values and MySQL wire values.

use seedbed_fixture::Value;

/// Convert a fixture value into a statement parameter.
///
/// `Eval` values must be substituted before a row reaches the driver;
/// passing one through is a programming error upstream, so it degrades to
/// its textual form rather than panicking.
pub fn to_mysql_value(value: &Value) -> mysql_async::Value {
    match value {
        Value::Null => mysql_async::Value::NULL,
        Value::Bool(b) => mysql_async::Value::from(*b),
        Value::Int(i) => mysql_async::Value::Int(*i),
        Value::Float(x) => mysql_async::Value::Double(*x),
        Value::Text(s) => mysql_async::Value::Bytes(s.clone().into_bytes()),
        Value::Eval(expr) => mysql_async::Value::Bytes(format!("$eval({})", expr).into_bytes()),
    }
}

/// Convert a scalar query result back into a fixture value.
pub fn from_mysql_value(value: mysql_async::Value) -> Value {
    match value {
        mysql_async::Value::NULL => Value::Null,
        mysql_async::Value::Int(i) => Value::Int(i),
        mysql_async::Value::UInt(u) => match i64::try_from(u) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Text(u.to_string()),
        },
        mysql_async::Value::Float(x) => Value::Float(f64::from(x)),
        mysql_async::Value::Double(x) => Value::Float(x),
        mysql_async::Value::Bytes(bytes) => {
            Value::Text(String::from_utf8_lossy(&bytes).into_owned())
        }
        mysql_async::Value::Date(year, month, day, hour, minute, second, micros) => {
            if micros > 0 {
                Value::Text(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
                    year, month, day, hour, minute, second, micros
                ))
            } else {
                Value::Text(format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    year, month, day, hour, minute, second
                ))
            }
        }
        mysql_async::Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if negative { "-" } else { "" };
            let total_hours = u32::from(days) * 24 + u32::from(hours);
            if micros > 0 {
                Value::Text(format!(
                    "{}{:02}:{:02}:{:02}.{:06}",
                    sign, total_hours, minutes, seconds, micros
                ))
            } else {
                Value::Text(format!(
                    "{}{:02}:{:02}:{:02}",
                    sign, total_hours, minutes, seconds
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_mysql_scalars() {
        assert_eq!(to_mysql_value(&Value::Null), mysql_async::Value::NULL);
        assert_eq!(to_mysql_value(&Value::Int(7)), mysql_async::Value::Int(7));
        assert_eq!(
            to_mysql_value(&Value::Float(2.5)),
            mysql_async::Value::Double(2.5)
        );
        assert_eq!(
            to_mysql_value(&Value::Text("hi".into())),
            mysql_async::Value::Bytes(b"hi".to_vec())
        );
    }

    #[test]
    fn test_from_mysql_scalars() {
        assert_eq!(from_mysql_value(mysql_async::Value::NULL), Value::Null);
        assert_eq!(from_mysql_value(mysql_async::Value::Int(7)), Value::Int(7));
        assert_eq!(
            from_mysql_value(mysql_async::Value::Bytes(b"hi".to_vec())),
            Value::Text("hi".into())
        );
    }

    #[test]
    fn test_from_mysql_uint_overflow_degrades_to_text() {
        assert_eq!(
            from_mysql_value(mysql_async::Value::UInt(u64::MAX)),
            Value::Text(u64::MAX.to_string())
        );
        assert_eq!(
            from_mysql_value(mysql_async::Value::UInt(42)),
            Value::Int(42)
        );
    }

    #[test]
    fn test_from_mysql_date_formats() {
        assert_eq!(
            from_mysql_value(mysql_async::Value::Date(2024, 3, 9, 12, 30, 5, 0)),
            Value::Text("2024-03-09 12:30:05".into())
        );
        assert_eq!(
            from_mysql_value(mysql_async::Value::Date(2024, 3, 9, 12, 30, 5, 250)),
            Value::Text("2024-03-09 12:30:05.000250".into())
        );
    }

    #[test]
    fn test_from_mysql_time_formats() {
        assert_eq!(
            from_mysql_value(mysql_async::Value::Time(false, 1, 2, 3, 4, 0)),
            Value::Text("26:03:04".into())
        );
        assert_eq!(
            from_mysql_value(mysql_async::Value::Time(true, 0, 1, 2, 3, 0)),
            Value::Text("-01:02:03".into())
        );
    }
}
