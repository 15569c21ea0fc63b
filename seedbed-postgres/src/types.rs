//! Parameter encoding for untyped fixture values.

use bytes::BytesMut;
use postgres_types::{Format, IsNull, ToSql, Type, to_sql_checked};
use seedbed_fixture::Value;

/// A fixture value bound as a statement parameter.
///
/// Fixture rows know nothing about column types, so every parameter is
/// sent in the text wire format and accepted for any server-inferred
/// type; the server parses the text against the actual column type, the
/// same way psql input works. `Eval` values must be substituted before a
/// row reaches the driver.
#[derive(Debug)]
pub struct PgParam<'a>(pub &'a Value);

impl ToSql for PgParam<'_> {
    fn to_sql(
        &self,
        _ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self.0 {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(b) => {
                out.extend_from_slice(if *b { b"t" } else { b"f" });
                Ok(IsNull::No)
            }
            Value::Int(i) => {
                out.extend_from_slice(i.to_string().as_bytes());
                Ok(IsNull::No)
            }
            Value::Float(x) => {
                out.extend_from_slice(x.to_string().as_bytes());
                Ok(IsNull::No)
            }
            Value::Text(s) => {
                out.extend_from_slice(s.as_bytes());
                Ok(IsNull::No)
            }
            Value::Eval(expr) => Err(format!("unresolved $eval({}) parameter", expr).into()),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        true
    }

    fn encode_format(&self, _ty: &Type) -> Format {
        Format::Text
    }

    to_sql_checked!();
}
