//! Deck file persistence.
//!
//! A deck file is a single line holding a JSON object that maps each term
//! to its card. Saves are atomic: write to a locked temp file in the
//! target directory, sync, then rename over the destination.

use crate::{Deck, Error, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Load a deck from a file.
///
/// Only the first line of the file is parsed. A missing file yields
/// `Error::FileNotFound`; malformed JSON propagates as `Error::Json`.
pub fn load_deck(path: &Path) -> Result<Deck> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut line = String::new();
    let mut reader = BufReader::new(&file);
    let read_result = reader.read_line(&mut line);

    file.unlock()?;
    read_result?;

    let deck: Deck = serde_json::from_str(&line)?;
    tracing::debug!("Loaded {} cards from {:?}", deck.len(), path);
    Ok(deck)
}

/// Save a deck to a file as a single JSON line, atomically.
pub fn save_deck(path: &Path, deck: &Deck) -> Result<()> {
    // An empty parent means the path is a bare filename in the cwd
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let temp = NamedTempFile::new_in(dir)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = BufWriter::new(temp.as_file());
        let contents = serde_json::to_string(deck)?;
        writer.write_all(contents.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;

    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved {} cards to {:?}", deck.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Card;

    fn sample_deck() -> Deck {
        let mut deck = Deck::new();
        deck.add("capital of France", "Paris").unwrap();
        deck.add("capital of Italy", "Rome").unwrap();
        deck.add_mistake("capital of Italy").unwrap();
        deck
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let deck_path = temp_dir.path().join("deck.json");

        let deck = sample_deck();
        save_deck(&deck_path, &deck).unwrap();

        let loaded = load_deck(&deck_path).unwrap();
        assert_eq!(loaded, deck);
        assert_eq!(loaded.get("capital of Italy").unwrap().mistakes, 1);
    }

    #[test]
    fn test_saved_file_is_single_json_line() {
        let temp_dir = tempfile::tempdir().unwrap();
        let deck_path = temp_dir.path().join("deck.json");

        save_deck(&deck_path, &sample_deck()).unwrap();

        let contents = std::fs::read_to_string(&deck_path).unwrap();
        let mut lines = contents.lines();
        let first = lines.next().unwrap();
        assert!(lines.next().is_none());
        serde_json::from_str::<serde_json::Value>(first).unwrap();
    }

    #[test]
    fn test_load_reads_only_first_line() {
        let temp_dir = tempfile::tempdir().unwrap();
        let deck_path = temp_dir.path().join("deck.json");
        std::fs::write(
            &deck_path,
            "{\"a\":{\"definition\":\"1\",\"mistakes\":0}}\nnot json at all\n",
        )
        .unwrap();

        let deck = load_deck(&deck_path).unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.definition_of("a"), Some("1"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope.json");

        let err = load_deck(&missing).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_load_malformed_json_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let deck_path = temp_dir.path().join("deck.json");
        std::fs::write(&deck_path, "{ not json }\n").unwrap();

        let err = load_deck(&deck_path).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_save_overwrites_atomically() {
        let temp_dir = tempfile::tempdir().unwrap();
        let deck_path = temp_dir.path().join("deck.json");

        save_deck(&deck_path, &sample_deck()).unwrap();

        let mut smaller = Deck::new();
        smaller.upsert("only".into(), Card::new("card"));
        save_deck(&deck_path, &smaller).unwrap();

        let loaded = load_deck(&deck_path).unwrap();
        assert_eq!(loaded.len(), 1);

        // No stray temp files left behind
        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "deck.json")
            .collect();
        assert!(extras.is_empty(), "unexpected files: {:?}", extras);
    }

    #[test]
    fn test_save_to_bare_filename() {
        // Bare filenames resolve against the cwd; run from a temp dir
        let temp_dir = tempfile::tempdir().unwrap();
        let old_cwd = std::env::current_dir().unwrap();
        std::env::set_current_dir(temp_dir.path()).unwrap();

        let result = save_deck(Path::new("deck.json"), &sample_deck());
        let loaded = result.and_then(|_| load_deck(Path::new("deck.json")));

        std::env::set_current_dir(old_cwd).unwrap();
        assert_eq!(loaded.unwrap().len(), 2);
    }
}
