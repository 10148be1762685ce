//! The interactive session: command dispatch and the line protocol.
//!
//! A [`Session`] owns the deck, the transcript, and both ends of the line
//! protocol. It is generic over its input and output streams so the whole
//! interactive flow can be driven from scripted buffers in tests.
//!
//! Every line shown to the user and every line read from them is recorded
//! in the transcript, in order. The one deliberate exception: the `log`
//! command records its own success line only after the transcript has been
//! written, so a saved log never contains it.

use crate::{quiz, storage, Deck, Error, Result, Transcript, Verdict};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const MENU_PROMPT: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

/// A dispatcher action, parsed from one input line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Add,
    Remove,
    Import,
    Export,
    Ask,
    Exit,
    Log,
    HardestCard,
    ResetStats,
}

impl Command {
    /// Map an action line to a command. Matching is exact: no trimming,
    /// no case folding. Anything unrecognized terminates the session.
    pub fn parse(input: &str) -> Option<Command> {
        match input {
            "add" => Some(Command::Add),
            "remove" => Some(Command::Remove),
            "import" => Some(Command::Import),
            "export" => Some(Command::Export),
            "ask" => Some(Command::Ask),
            "exit" => Some(Command::Exit),
            "log" => Some(Command::Log),
            "hardest card" => Some(Command::HardestCard),
            "reset stats" => Some(Command::ResetStats),
            _ => None,
        }
    }
}

/// How a session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `exit`
    Quit,
    /// Unrecognized action or closed input; no farewell is printed
    Aborted,
}

/// Startup paths for automatic import and exit-time export
#[derive(Clone, Debug, Default)]
pub struct SessionOptions {
    pub import_from: Option<PathBuf>,
    pub export_to: Option<PathBuf>,
}

/// One interactive flashcard session over a pair of line streams
pub struct Session<R, W> {
    input: R,
    output: W,
    deck: Deck,
    transcript: Transcript,
    options: SessionOptions,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session with an OS-seeded RNG
    pub fn new(input: R, output: W, options: SessionOptions) -> Self {
        Self::with_rng(input, output, options, StdRng::from_os_rng())
    }

    /// Create a session with a caller-supplied RNG (deterministic quizzes)
    pub fn with_rng(input: R, output: W, options: SessionOptions, rng: StdRng) -> Self {
        Self {
            input,
            output,
            deck: Deck::new(),
            transcript: Transcript::new(),
            options,
            rng,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run the dispatcher loop until `exit`, an unrecognized action, or
    /// the end of input.
    pub fn run(&mut self) -> Result<SessionEnd> {
        if let Some(path) = self.options.import_from.clone() {
            self.import_file(&path)?;
        }

        let mut first = true;
        loop {
            if !first {
                self.say("")?;
            }
            first = false;
            self.say(MENU_PROMPT)?;

            let action = match self.try_read_line()? {
                Some(line) => line,
                None => return Ok(SessionEnd::Aborted),
            };

            match Command::parse(&action) {
                Some(Command::Add) => self.cmd_add()?,
                Some(Command::Remove) => self.cmd_remove()?,
                Some(Command::Import) => self.cmd_import()?,
                Some(Command::Export) => self.cmd_export()?,
                Some(Command::Ask) => self.cmd_ask()?,
                Some(Command::Log) => self.cmd_log()?,
                Some(Command::HardestCard) => self.cmd_hardest_card()?,
                Some(Command::ResetStats) => self.cmd_reset_stats()?,
                Some(Command::Exit) => {
                    match self.options.export_to.clone() {
                        Some(path) => {
                            storage::save_deck(&path, &self.deck)?;
                            self.say(&format!("{} cards have been saved.", self.deck.len()))?;
                        }
                        None => self.say("Bye bye!")?,
                    }
                    return Ok(SessionEnd::Quit);
                }
                None => {
                    tracing::debug!("Unrecognized action {:?}, ending session", action);
                    return Ok(SessionEnd::Aborted);
                }
            }
        }
    }

    fn cmd_add(&mut self) -> Result<()> {
        self.say("The card:")?;
        let mut term = self.read_line()?;
        while self.deck.contains_term(&term) {
            self.say(&format!("The card \"{}\" already exists. Try again:", term))?;
            term = self.read_line()?;
        }

        self.say("The definition of the card:")?;
        let mut definition = self.read_line()?;
        while self.deck.contains_definition(&definition) {
            self.say(&format!(
                "The definition \"{}\" already exists. Try again:",
                definition
            ))?;
            definition = self.read_line()?;
        }

        self.deck.add(term.clone(), definition.clone())?;
        self.say(&format!(
            "The pair (\"{}\":\"{}\") has been added.",
            term, definition
        ))?;
        Ok(())
    }

    fn cmd_remove(&mut self) -> Result<()> {
        self.say("Which card?")?;
        let term = self.read_line()?;
        match self.deck.remove(&term) {
            Ok(()) => self.say("The card has been removed")?,
            Err(Error::CardNotFound(_)) => {
                self.say(&format!("Can't remove \"{}\": there is no such card.", term))?
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn cmd_import(&mut self) -> Result<()> {
        self.say("File name:")?;
        let path = self.read_line()?;
        self.import_file(Path::new(&path))
    }

    /// Shared by the interactive `import` command and the automatic
    /// startup import. A missing file is reported and leaves the deck
    /// unchanged; malformed content is fatal.
    fn import_file(&mut self, path: &Path) -> Result<()> {
        match storage::load_deck(path) {
            Ok(loaded) => {
                let count = self.deck.merge(loaded);
                self.say(&format!("{} cards have been loaded.", count))?;
            }
            Err(Error::FileNotFound(_)) => self.say("File not found")?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn cmd_export(&mut self) -> Result<()> {
        self.say("File name:")?;
        let path = self.read_line()?;
        storage::save_deck(Path::new(&path), &self.deck)?;
        self.say(&format!("{} cards have been saved.", self.deck.len()))?;
        Ok(())
    }

    fn cmd_ask(&mut self) -> Result<()> {
        self.say("How many times to ask?")?;
        let raw = self.read_line()?;
        let count: usize = raw
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCount(raw.clone()))?;

        let drawn = match quiz::draw(&self.deck, count, &mut self.rng) {
            Ok(terms) => terms,
            Err(Error::EmptyDeck) => {
                self.say("There are no cards to ask.")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        for term in drawn {
            self.say(&format!("Print the definition of \"{}\":", term))?;
            let answer = self.read_line()?;
            match quiz::grade(&mut self.deck, &term, &answer)? {
                Verdict::Correct => self.say("Correct!")?,
                Verdict::CrossMatch {
                    correct,
                    matched_term,
                } => self.say(&format!(
                    "Wrong. The right answer is \"{}\", but your definition is correct for \"{}\".",
                    correct, matched_term
                ))?,
                Verdict::Wrong { correct } => {
                    self.say(&format!("Wrong. The right answer is \"{}\".", correct))?
                }
            }
        }
        Ok(())
    }

    fn cmd_log(&mut self) -> Result<()> {
        self.say("File name:")?;
        let path = self.read_line()?;
        self.transcript.save(Path::new(&path))?;
        self.say("The log has been saved.")?;
        Ok(())
    }

    fn cmd_hardest_card(&mut self) -> Result<()> {
        let hardest = self.deck.hardest().map(|(terms, errors)| {
            let terms: Vec<String> = terms.iter().map(|t| t.to_string()).collect();
            (terms, errors)
        });

        match hardest {
            None => self.say("There are no cards with errors.")?,
            Some((terms, errors)) if terms.len() == 1 => self.say(&format!(
                "The hardest card is \"{}\". You have {} errors answering it.",
                terms[0], errors
            ))?,
            Some((terms, errors)) => self.say(&format!(
                "The hardest cards are \"{}\". You have {} errors answering them.",
                terms.join("\", \""),
                errors
            ))?,
        }
        Ok(())
    }

    fn cmd_reset_stats(&mut self) -> Result<()> {
        self.deck.reset_stats();
        self.say("Card statistics have been reset.")?;
        Ok(())
    }

    /// Print one line and record it in the transcript
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        self.output.flush()?;
        self.transcript.record(line);
        Ok(())
    }

    /// Read one input line, record it, and strip the line ending.
    /// Returns `None` at end of input.
    fn try_read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim_end_matches('\n').trim_end_matches('\r').to_string();
        self.transcript.record(&line);
        Ok(Some(line))
    }

    /// Read one input line mid-operation, where running out of input is
    /// a truncated script rather than a clean shutdown
    fn read_line(&mut self) -> Result<String> {
        self.try_read_line()?.ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended mid-operation",
            ))
        })
    }
}
