use surrealdb::RecordId;

pub fn get_record_id(table: &str, key: &str) -> RecordId {
    RecordId::from_table_key(table, key.to_string())
}
