mod extractor_factory_test;
mod gemini_backend_test;
mod http_status_test;
