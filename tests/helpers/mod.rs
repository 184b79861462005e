pub mod test_postgres;
