use std::fs;
use std::path::Path;
use std::path::PathBuf;

use log::info;
use thiserror::Error;

use buchi_utilities::BuchiError;

use crate::Alphabet;
use crate::AutomatonBuilder;
use crate::BuchiAutomaton;
use crate::Edge;
use crate::Symbol;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Parse error at line {line}: \"{text}\". Please check the syntax of the BA format")]
    UnexpectedLine { line: usize, text: String },

    #[error("File {0} does not exist")]
    MissingFile(PathBuf),
}

/// Returns the trimmed, nonempty lines of the source together with their line number.
fn lines(source: &str) -> Vec<(usize, &str)> {
    source
        .lines()
        .enumerate()
        .map(|(number, line)| (number + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}

/// Returns the line as an identifier, i.e., a state or symbol label, when it
/// does not contain the separators of an edge.
fn read_identifier(line: &str) -> Option<&str> {
    if line.is_empty() || line.contains("->") || line.contains(',') {
        None
    } else {
        Some(line)
    }
}

/// Parses an edge of the form `<symbol>,<from>-><to>`.
fn read_edge(line: &str) -> Option<(&str, &str, &str)> {
    let (symbol, from_to) = line.split_once(',')?;
    let (from, to) = from_to.split_once("->")?;

    Some((
        read_identifier(symbol.trim())?,
        read_identifier(from.trim())?,
        read_identifier(to.trim())?,
    ))
}

/// Returns the alphabet consisting of the symbols on the edges of the source.
pub fn parse_alphabet(source: &str) -> Alphabet {
    Alphabet::new(
        lines(source)
            .into_iter()
            .filter_map(|(_, line)| read_edge(line))
            .map(|(symbol, _, _)| Symbol::new(symbol)),
    )
}

/// Parses an automaton in the BA format over the given alphabet, which must
/// contain at least the symbols of its edges.
///
/// The BA format consists of an optional line with the initial state,
/// followed by one line for every edge:
///  `<symbol>,<from>-><to>`
///
/// and finally an optional block with one final state per line. When the
/// initial state is omitted the source of the first edge is initial, and when
/// the block of final states is omitted every state is final.
pub fn parse_ba(source: &str, alphabet: &Alphabet) -> Result<BuchiAutomaton, BuchiError> {
    let lines = lines(source);
    let mut position = 0;

    // The initial state is either given explicitly or the source of the first edge.
    let mut initial_state = None;
    if let Some((_, line)) = lines.first() {
        if let Some((_, from, _)) = read_edge(line) {
            initial_state = Some(from.to_string());
        } else if let Some(state) = read_identifier(line) {
            initial_state = Some(state.to_string());
            position += 1;
        }
    }

    let mut edges = Vec::new();
    while let Some((symbol, from, to)) = lines.get(position).and_then(|(_, line)| read_edge(line)) {
        edges.push(Edge::new(from, Symbol::new(symbol), to));
        position += 1;
    }

    let final_states: Vec<String> = if position == lines.len() {
        // Without a block of final states all states are final.
        initial_state
            .iter()
            .cloned()
            .chain(edges.iter().flat_map(|edge| [edge.from.clone(), edge.to.clone()]))
            .collect()
    } else {
        let mut final_states = Vec::new();
        while let Some(state) = lines.get(position).and_then(|(_, line)| read_identifier(line)) {
            final_states.push(state.to_string());
            position += 1;
        }

        final_states
    };

    if let Some((line, text)) = lines.get(position) {
        return Err(ParseError::UnexpectedLine {
            line: *line,
            text: text.to_string(),
        }
        .into());
    }

    let mut builder = AutomatonBuilder::new()
        .with_edges(edges)
        .with_final_states(final_states)
        .with_alphabet(alphabet.clone());
    if let Some(initial_state) = initial_state {
        builder = builder.with_initial_state(initial_state);
    }

    Ok(builder.build()?)
}

/// Parses two automata over the union of their alphabets, such that they can
/// be compared.
pub fn parse_ba_pair(first: &str, second: &str) -> Result<(BuchiAutomaton, BuchiAutomaton), BuchiError> {
    let alphabet = parse_alphabet(first).merge(&parse_alphabet(second));

    Ok((parse_ba(first, &alphabet)?, parse_ba(second, &alphabet)?))
}

/// Reads two automata in the BA format from the given files, see [`parse_ba_pair`].
///
/// The existence of both files is checked before anything is parsed.
pub fn read_ba_pair(first: &Path, second: &Path) -> Result<(BuchiAutomaton, BuchiAutomaton), BuchiError> {
    for path in [first, second] {
        if !path.exists() {
            return Err(ParseError::MissingFile(path.to_path_buf()).into());
        }
    }

    info!("Reading automata {} and {}...", first.display(), second.display());
    let first_source = fs::read_to_string(first)?;
    let second_source = fs::read_to_string(second)?;

    let result = parse_ba_pair(&first_source, &second_source)?;
    info!("Finished reading automata");

    Ok(result)
}
