mod integration_tests;
mod table_tests;
