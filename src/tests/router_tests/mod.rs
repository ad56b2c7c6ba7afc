mod api_tests;
mod form_tests;
mod page_tests;
mod theme_tests;
