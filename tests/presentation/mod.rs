mod error_response_test;
