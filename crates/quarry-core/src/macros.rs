/// Builds a [`Record`](crate::stmt::Record) from `key => value` pairs,
/// keeping the order in which fields are written.
///
/// ```
/// let user = quarry_core::record! { "id" => 1, "name" => "Ann" };
/// assert_eq!(user.len(), 2);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        $crate::stmt::Record::new()
    };
    ( $( $key:expr => $value:expr ),+ $(,)? ) => {{
        let mut record = $crate::stmt::Record::new();
        $(
            record.insert($key, $crate::stmt::Value::from($value));
        )+
        record
    }};
}
