use super::{Flavor, Formatter, ToSql};

use quarry_core::stmt;

/// Collects the values a statement binds, in placeholder order.
pub trait Params {
    /// Stores `value` and returns the placeholder that refers to it.
    fn push(&mut self, value: &stmt::Value) -> Placeholder;
}

/// One-based position of a bound parameter.
pub struct Placeholder(pub usize);

impl Params for Vec<stmt::Value> {
    fn push(&mut self, value: &stmt::Value) -> Placeholder {
        Vec::push(self, value.clone());
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let position = self.0;

        match f.serializer.flavor {
            Flavor::Mysql => f.dst.push('?'),
            Flavor::Postgresql => f.dst.push_str(&format!("${position}")),
            Flavor::Sqlite => f.dst.push_str(&format!("?{position}")),
        }
    }
}

impl ToSql for &stmt::Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let placeholder = f.params.push(self);
        placeholder.to_sql(f);
    }
}
