use wasm_bindgen::prelude::*;
use log::Level;

pub mod federigo;
pub mod util;

use crate::federigo::compiler;
use crate::util::federigo_log::{self, LogTypes, LogSources};

// Function to initialize Federigo in the browser
#[wasm_bindgen]
pub fn federigo_init() {
    // Set up console logs for debugging
    if console_log::init_with_level(Level::Debug).is_err() {
        federigo_log::log(LogTypes::Warning, LogSources::Federigo, String::from("A logger was already installed"));
    }
    console_error_panic_hook::set_once();

    federigo_log::log(LogTypes::Info, LogSources::Federigo, String::from("Federigo initialized"));
}

// Compiles the program and returns the token and tree dump, or the error message
#[wasm_bindgen]
pub fn compile(source_code: String) -> Result<String, JsValue> {
    match compiler::compile(&source_code) {
        Ok(compilation) => Ok(compilation.dump()),
        Err(err) => Err(JsValue::from_str(&err.to_string()))
    }
}
