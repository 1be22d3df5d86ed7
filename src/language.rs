use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::error::Error;

static WORDS_DIR: Dir = include_dir!("src/words");

/// A vocabulary the generator draws from, embedded at compile time.
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    pub fn new(list_name: &str) -> Self {
        read_language_from_file(format!("{list_name}.json")).unwrap()
    }

    /// Pool several embedded lists into one vocabulary.
    pub fn merged(name: &str, list_names: &[&str]) -> Self {
        let mut words = Vec::new();
        for list_name in list_names {
            words.extend(Self::new(list_name).words);
        }
        Self {
            name: name.to_string(),
            size: words.len() as u32,
            words,
        }
    }

    /// Resolve a persisted word-list name; unknown names fall back to the
    /// full pool.
    pub fn for_list(name: &str) -> Self {
        match name {
            "common" => Self::new("common"),
            "cyber" => Self::new("cyber"),
            _ => Self::merged("mixed", &["common", "cyber"]),
        }
    }
}

fn read_language_from_file(file_name: String) -> Result<Language, Box<dyn Error>> {
    let file = WORDS_DIR
        .get_file(file_name)
        .expect("Word list file not found");

    let file_as_str = file
        .contents_utf8()
        .expect("Unable to interpret file as a string");

    let lang = serde_json::from_str(file_as_str).expect("Unable to deserialize word list json");

    Ok(lang)
}
