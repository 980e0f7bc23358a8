mod dead_code_elimination_tests;
mod optimizer_property_tests;
mod optimizer_test_support;
