use super::{Formatter, Params, ToSql};

/// Items separated by `, `: column lists, value tuples, IN members.
pub(super) struct Comma<L>(pub(super) L);

/// Items separated by the given keyword, such as ` AND ` or ` UNION ALL `.
pub(super) struct Delimited<L>(pub(super) L, pub(super) &'static str);

impl<L> ToSql for Comma<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        Delimited(self.0, ", ").to_sql(f);
    }
}

impl<L> ToSql for Delimited<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let Delimited(items, separator) = self;

        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                f.dst.push_str(separator);
            }

            item.to_sql(f);
        }
    }
}
