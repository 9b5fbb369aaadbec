pub mod federigo_log;
