//! Integration tests: the library pipeline and the binary, both fed with
//! workbooks generated on the fly.

mod cli_tests;
mod util;
mod workbook_tests;
