pub mod split_sql_dump;
