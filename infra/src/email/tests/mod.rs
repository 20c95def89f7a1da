mod http_tests;
