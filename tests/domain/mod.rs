mod owner_id_test;
mod transaction_record_test;
