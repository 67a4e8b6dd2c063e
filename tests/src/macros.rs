/// Builds a [`Row`](procmap::Row) from `column => value` pairs.
#[macro_export]
macro_rules! row {
    ( $( $column:expr => $value:expr ),* $(,)? ) => {
        procmap::Row::from_pairs([
            $( ($column, procmap::Value::from($value)), )*
        ])
    };
}
