use super::{Formatter, Ident, Params, ToSql};

/// A column reference, `name` or `table.name`, each part quoted.
pub(super) struct Column<'a>(pub(super) &'a str);

impl ToSql for Column<'_> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let mut s = "";
        for part in self.0.split('.') {
            fmt!(f, s Ident(part));
            s = ".";
        }
    }
}
