#![forbid(unsafe_code)]

mod execution;
mod impact;
mod indexes;
mod meta;
mod strategy;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(meta::SQL);
    sql.push_str(strategy::SQL);
    sql.push_str(execution::SQL);
    sql.push_str(impact::SQL);
    sql.push_str(indexes::SQL);
    sql
}
