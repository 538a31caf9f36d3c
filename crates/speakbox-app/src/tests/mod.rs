mod reading_tests;
mod selection_tests;
mod support;
