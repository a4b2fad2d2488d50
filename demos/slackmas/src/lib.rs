use wasm_bindgen::prelude::*;

mod book;
use book::SlackmasBook;

leaf_web::export_book!(SlackmasBook, "slackmas");
