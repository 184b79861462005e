mod pg_transaction_repository_test;
