//! Word lists and frequency tables read from disk or standard input

pub mod loader;

pub use loader::{
    STDIN_PATH, load_dictionary, load_dictionary_file, load_frequency_file, open_input,
};
