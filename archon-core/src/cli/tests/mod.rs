mod watch_tests;
