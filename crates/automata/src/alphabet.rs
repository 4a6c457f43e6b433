use std::fmt;

use itertools::Itertools;

use buchi_utilities::TagIndex;

/// A unique type for the symbols.
pub struct SymbolTag;

/// The index of a symbol in an [`Alphabet`].
pub type SymbolIndex = TagIndex<usize, SymbolTag>;

/// A letter of the alphabet, two symbols are equal iff their labels are equal.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(label: impl Into<String>) -> Self {
        Symbol(label.into())
    }

    /// Returns the label of the symbol.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finite set of symbols.
///
/// The symbols are kept sorted, so two automata that are built over equal
/// alphabets assign the same [`SymbolIndex`] to every symbol.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Creates an alphabet from the given symbols, duplicates are removed.
    pub fn new(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let mut symbols: Vec<Symbol> = symbols.into_iter().collect();
        symbols.sort();
        symbols.dedup();

        Self { symbols }
    }

    /// Returns the alphabet containing the symbols of both alphabets.
    pub fn merge(&self, other: &Alphabet) -> Alphabet {
        Alphabet::new(self.symbols.iter().chain(other.symbols.iter()).cloned())
    }

    /// Returns the index of the given symbol, if it is part of the alphabet.
    pub fn index_of(&self, symbol: &Symbol) -> Option<SymbolIndex> {
        self.symbols.binary_search(symbol).ok().map(SymbolIndex::new)
    }

    /// Returns the symbol with the given index.
    pub fn symbol(&self, index: SymbolIndex) -> &Symbol {
        &self.symbols[*index]
    }

    /// Returns the number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true iff the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all symbol indices of the alphabet.
    pub fn iter_symbols(&self) -> impl Iterator<Item = SymbolIndex> + use<> {
        (0..self.symbols.len()).map(SymbolIndex::new)
    }

    /// Returns an iterator over the symbols in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.symbols.iter().format(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_merge() {
        let first = Alphabet::new([Symbol::new("b"), Symbol::new("a")]);
        let second = Alphabet::new([Symbol::new("c"), Symbol::new("a")]);

        let merged = first.merge(&second);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged, second.merge(&first));

        // The indices only depend on the symbols.
        let index = merged.index_of(&Symbol::new("b")).unwrap();
        assert_eq!(*index, 1);
        assert_eq!(merged.symbol(index).as_str(), "b");
        assert!(merged.index_of(&Symbol::new("d")).is_none());
    }
}
