mod cache_service_tests;
