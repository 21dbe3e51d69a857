#![warn(missing_docs)]

//! # Interactive word searches
//!
//! A crate that generates word search puzzles and resolves cell selections to the
//! hidden words. Words are placed left-to-right or top-to-bottom, with a bias
//! toward crossing already-placed words at shared letters, and the remaining
//! cells are filled with random letters. A [Puzzle] tracks which words the
//! player has found across begin/extend/end selection gestures.

use std::{collections::HashSet, fmt::Display, ops::Index};

use array2d::Array2D;
use rand::Rng;

/// Chance that a word tries to cross an already-placed word before falling back
/// to a random spot.
const INTERSECTION_CHANCE: f64 = 0.4;

/// Number of random origin/direction combinations tried before a word is given
/// up on and left out of the puzzle.
const MAX_PLACEMENT_ATTEMPTS: usize = 150;

/// An error that happened when generating the puzzle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The configured grid size was zero, so there are no cells to place words
    /// into or fill with letters.
    ZeroGridSize,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ZeroGridSize => {
                write!(f, "Grid size must be at least 1")
            }
        }
    }
}

impl std::error::Error for Error {}

/// The direction a word is placed in inside the puzzle grid.
///
/// Only the two forward-reading axis-aligned directions exist; words never run
/// diagonally or backward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// The word reads left to right from its origin.
    Across,

    /// The word reads top to bottom from its origin.
    Down,
}

impl Direction {
    /// Returns the per-letter `(row, column)` step for this direction.
    pub fn delta(self) -> (usize, usize) {
        match self {
            Direction::Across => (0, 1),
            Direction::Down => (1, 0),
        }
    }

    fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.gen_range(0..2) {
            0 => Direction::Across,
            _ => Direction::Down,
        }
    }
}

/// A word that was successfully placed into the grid, along with the cells that
/// hold its letters.
#[derive(Clone, Debug)]
pub struct PlacedWord {
    /// The placed word, uppercased.
    pub word: String,

    /// The `(row, column)` cell of each letter, in word order. Never empty for
    /// words produced by generation.
    pub positions: Vec<(usize, usize)>,

    /// The direction the word reads in.
    pub direction: Direction,
}

impl PlacedWord {
    /// The cell holding the first letter of the word.
    pub fn start(&self) -> (usize, usize) {
        self.positions[0]
    }

    /// The cell holding the last letter of the word.
    pub fn end(&self) -> (usize, usize) {
        self.positions[self.positions.len() - 1]
    }

    /// Returns whether the given selection endpoints land exactly on this
    /// word's first and last letters, in either order. Only the endpoints are
    /// compared; cells in between are not checked.
    pub fn matches_endpoints(&self, start: (usize, usize), end: (usize, usize)) -> bool {
        (start == self.start() && end == self.end())
            || (start == self.end() && end == self.start())
    }
}

/// A candidate placement that would cross an existing letter in the grid.
struct Intersection {
    row: usize,
    col: usize,
    direction: Direction,
    crossing: (usize, usize),
}

/// The endpoints of an in-progress selection gesture.
#[derive(Clone, Copy, Debug)]
struct Selection {
    start: (usize, usize),
    end: (usize, usize),
}

/// The configuration for a puzzle. See [`Puzzle::generate`] for details.
///
/// [`Puzzle::generate`]: struct.Puzzle.html#method.generate
#[derive(Debug)]
pub struct PuzzleConfig<'a> {
    /// The number of rows and columns of the square grid.
    pub grid_size: usize,

    /// The list of words to hide in the grid. Words are uppercased before
    /// placement; words longer than `grid_size` can never fit and end up
    /// unplaced.
    pub words: &'a [String],
}

/// A word search puzzle: a fully-filled letter grid, the words hidden in it,
/// and the player's progress finding them.
///
/// The grid and placed words are fixed once generated; starting a new puzzle
/// means generating a new [Puzzle] value. Found words only ever accumulate,
/// one per matching [`Puzzle::end_selection`] call.
#[derive(Debug)]
pub struct Puzzle {
    grid: Array2D<char>,
    placed_words: Vec<PlacedWord>,
    found_words: HashSet<String>,
    words: Vec<String>,
    selection: Option<Selection>,
}

impl Puzzle {
    /// Generates a new puzzle with the specified configuration, or returns an
    /// error if the grid has no cells.
    ///
    /// Each word gets one placement pass: some of the time it first looks for
    /// spots crossing an already-placed word at a shared letter, otherwise (or
    /// when no crossing exists) it tries random origins and directions a
    /// bounded number of times. A word that still doesn't fit is left out of
    /// the puzzle rather than failing generation; it stays in [`Puzzle::words`]
    /// but never in [`Puzzle::placed_words`]. Afterward every empty cell is
    /// filled with a random letter, so the published grid never has gaps.
    pub fn generate(config: &PuzzleConfig) -> Result<Self, Error> {
        Self::generate_with_rng(config, &mut rand::thread_rng())
    }

    /// Generates a new puzzle using the given random number generator.
    ///
    /// Behaves exactly like [`Puzzle::generate`]; a seeded generator makes the
    /// layout reproducible.
    pub fn generate_with_rng<R: Rng>(config: &PuzzleConfig, rng: &mut R) -> Result<Self, Error> {
        if config.grid_size == 0 {
            return Err(Error::ZeroGridSize);
        }

        let words: Vec<String> = config.words.iter().map(|word| word.to_uppercase()).collect();

        let mut cells: Array2D<Option<char>> =
            Array2D::filled_with(None, config.grid_size, config.grid_size);

        let placed_words = Self::place_words(rng, &mut cells, &words);
        let grid = Self::fill_grid(rng, &cells);

        Ok(Self {
            grid,
            placed_words,
            found_words: HashSet::new(),
            words,
            selection: None,
        })
    }

    /// Returns whether the word can be written at the given origin and
    /// direction: every letter must land in bounds, on a cell that is either
    /// empty or already holds that same letter.
    ///
    /// Both placement paths go through this check before writing anything.
    fn can_place(
        cells: &Array2D<Option<char>>,
        word: &[char],
        row: usize,
        col: usize,
        direction: Direction,
    ) -> bool {
        let (dr, dc) = direction.delta();

        for (i, &letter) in word.iter().enumerate() {
            let r = row + i * dr;
            let c = col + i * dc;

            if r >= cells.num_rows() || c >= cells.num_columns() {
                return false;
            }

            if let Some(existing) = cells[(r, c)] {
                if existing != letter {
                    return false;
                }
            }
        }

        true
    }

    /// Writes the word's letters into the grid and returns the cell of each
    /// letter in order. The caller must have verified the placement with
    /// [`Puzzle::can_place`] first.
    fn write_word(
        cells: &mut Array2D<Option<char>>,
        word: &[char],
        row: usize,
        col: usize,
        direction: Direction,
    ) -> Vec<(usize, usize)> {
        let (dr, dc) = direction.delta();
        let mut positions = Vec::with_capacity(word.len());

        for (i, &letter) in word.iter().enumerate() {
            let coord = (row + i * dr, col + i * dc);
            cells[coord] = Some(letter);
            positions.push(coord);
        }

        positions
    }

    /// Finds every origin/direction combination that would make the word cross
    /// an existing letter in the grid.
    ///
    /// A placement that crosses several letters shows up once per crossing,
    /// which skews a uniform pick toward placements with more overlap. That
    /// bias is intended.
    fn find_intersections(cells: &Array2D<Option<char>>, word: &[char]) -> Vec<Intersection> {
        let mut candidates = Vec::new();

        for row in 0..cells.num_rows() {
            for col in 0..cells.num_columns() {
                let existing = match cells[(row, col)] {
                    Some(letter) => letter,
                    None => continue,
                };

                for (i, &letter) in word.iter().enumerate() {
                    if letter != existing {
                        continue;
                    }

                    for direction in [Direction::Across, Direction::Down] {
                        let (dr, dc) = direction.delta();

                        // Align letter i of the word onto this cell. Origins that
                        // would start above or left of the grid are discarded.
                        let origin = (row.checked_sub(i * dr), col.checked_sub(i * dc));

                        if let (Some(origin_row), Some(origin_col)) = origin {
                            if Self::can_place(cells, word, origin_row, origin_col, direction) {
                                candidates.push(Intersection {
                                    row: origin_row,
                                    col: origin_col,
                                    direction,
                                    crossing: (row, col),
                                });
                            }
                        }
                    }
                }
            }
        }

        candidates
    }

    fn place_words<R: Rng>(
        rng: &mut R,
        cells: &mut Array2D<Option<char>>,
        words: &[String],
    ) -> Vec<PlacedWord> {
        let size = cells.num_rows();
        let mut placed: Vec<PlacedWord> = Vec::with_capacity(words.len());

        for word in words {
            let letters: Vec<char> = word.chars().collect();
            if letters.is_empty() {
                continue;
            }

            let try_intersection = !placed.is_empty() && rng.gen_bool(INTERSECTION_CHANCE);

            if try_intersection {
                let candidates = Self::find_intersections(cells, &letters);

                if !candidates.is_empty() {
                    let chosen = &candidates[rng.gen_range(0..candidates.len())];
                    let positions =
                        Self::write_word(cells, &letters, chosen.row, chosen.col, chosen.direction);

                    placed.push(PlacedWord {
                        word: word.clone(),
                        positions,
                        direction: chosen.direction,
                    });

                    continue;
                }
            }

            for _ in 0..MAX_PLACEMENT_ATTEMPTS {
                let direction = Direction::random(rng);
                let row = rng.gen_range(0..size);
                let col = rng.gen_range(0..size);

                if Self::can_place(cells, &letters, row, col, direction) {
                    let positions = Self::write_word(cells, &letters, row, col, direction);

                    placed.push(PlacedWord {
                        word: word.clone(),
                        positions,
                        direction,
                    });

                    break;
                }
            }

            // A word that exhausted every attempt is dropped; generation carries on.
        }

        placed
    }

    /// Produces the final grid: placed letters are kept, every empty cell gets
    /// a random letter.
    fn fill_grid<R: Rng>(rng: &mut R, cells: &Array2D<Option<char>>) -> Array2D<char> {
        let mut letters = cells.elements_row_major_iter();

        Array2D::filled_by_row_major(
            || match letters.next() {
                Some(Some(letter)) => *letter,
                _ => rng.gen_range(b'A'..=b'Z') as char,
            },
            cells.num_rows(),
            cells.num_columns(),
        )
    }

    /// Starts a selection gesture at the given cell.
    ///
    /// Any selection already in progress is replaced.
    pub fn begin_selection(&mut self, row: usize, col: usize) {
        self.selection = Some(Selection {
            start: (row, col),
            end: (row, col),
        });
    }

    /// Moves the far end of the selection to the given cell. Does nothing if no
    /// selection was begun.
    pub fn extend_selection(&mut self, row: usize, col: usize) {
        if let Some(selection) = &mut self.selection {
            selection.end = (row, col);
        }
    }

    /// Finishes the selection gesture and checks it against the hidden words.
    ///
    /// The selection matches a word when its two endpoints are exactly the
    /// word's first and last cells, dragged in either direction. On a match the
    /// word is recorded as found and returned; matching a word that was already
    /// found just returns it again. A selection that matches nothing clears
    /// with no other effect, as does calling this without a selection in
    /// progress.
    pub fn end_selection(&mut self) -> Option<String> {
        let selection = self.selection.take()?;

        let matched = self
            .placed_words
            .iter()
            .find(|placed| placed.matches_endpoints(selection.start, selection.end))?;

        let word = matched.word.clone();
        self.found_words.insert(word.clone());

        Some(word)
    }

    /// The number of rows and columns in the grid.
    pub fn size(&self) -> usize {
        self.grid.num_rows()
    }

    /// Provides a reference to the letter grid.
    pub fn grid(&self) -> &Array2D<char> {
        &self.grid
    }

    /// Gets the letter at the specified cell, returning [`Option::None`] if the
    /// coordinates are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.grid.get(row, col).copied()
    }

    /// The full uppercased word list the puzzle was generated from, including
    /// any words that could not be placed.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The words that were actually hidden in the grid, with their cells.
    pub fn placed_words(&self) -> &[PlacedWord] {
        &self.placed_words
    }

    /// The set of words the player has found so far.
    pub fn found_words(&self) -> &HashSet<String> {
        &self.found_words
    }

    /// Returns whether the given word has been found. Case-insensitive.
    pub fn is_found(&self, word: &str) -> bool {
        self.found_words.contains(&word.to_uppercase())
    }

    /// The number of words hidden in the grid.
    pub fn placed_count(&self) -> usize {
        self.placed_words.len()
    }

    /// The number of words the puzzle was asked to hide.
    pub fn requested_count(&self) -> usize {
        self.words.len()
    }

    /// The number of words found so far.
    pub fn found_count(&self) -> usize {
        self.found_words.len()
    }
}

impl Index<(usize, usize)> for Puzzle {
    type Output = char;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.grid[index]
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.grid.rows_iter() {
            for &letter in row {
                f.write_fmt(format_args!("{} ", letter))?;
            }

            f.write_str("\n")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use array2d::Array2D;
    use rand::{rngs::StdRng, SeedableRng};

    use crate::{Direction, Error, PlacedWord, Puzzle, PuzzleConfig};

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|word| String::from(*word)).collect()
    }

    fn chars(word: &str) -> Vec<char> {
        word.chars().collect()
    }

    /// A fixed 5x5 puzzle with "CAT" running down from the top-left corner.
    fn cat_puzzle() -> Puzzle {
        Puzzle {
            grid: Array2D::filled_with('X', 5, 5),
            placed_words: vec![PlacedWord {
                word: String::from("CAT"),
                positions: vec![(0, 0), (1, 0), (2, 0)],
                direction: Direction::Down,
            }],
            found_words: HashSet::new(),
            words: vec![String::from("CAT")],
            selection: None,
        }
    }

    #[test]
    fn grid_has_no_empty_cells() {
        for grid_size in [1, 5, 12] {
            let list = words(&["cat", "dog", "parrot"]);

            let puzzle = Puzzle::generate(&PuzzleConfig {
                grid_size,
                words: &list,
            })
            .unwrap();

            for row in 0..grid_size {
                for col in 0..grid_size {
                    let letter = puzzle.get(row, col).unwrap();

                    assert!(
                        letter.is_ascii_uppercase(),
                        "cell ({}, {}) holds {:?} in a size-{} grid",
                        row,
                        col,
                        letter,
                        grid_size,
                    );
                }
            }
        }
    }

    #[test]
    fn empty_word_list_gives_all_random_grid() {
        let puzzle = Puzzle::generate(&PuzzleConfig {
            grid_size: 8,
            words: &[],
        })
        .unwrap();

        assert!(puzzle.placed_words().is_empty());
        assert_eq!(puzzle.requested_count(), 0);

        for row in 0..8 {
            for col in 0..8 {
                assert!(puzzle.get(row, col).unwrap().is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn zero_grid_size_is_rejected() {
        let list = words(&["cat"]);

        let puzzle = Puzzle::generate(&PuzzleConfig {
            grid_size: 0,
            words: &list,
        });

        assert_eq!(puzzle.unwrap_err(), Error::ZeroGridSize);
    }

    #[test]
    fn placed_words_agree_with_grid() {
        let list = words(&["needle", "lamp", "spoon", "ant", "pearl", "melon"]);
        let mut rng = StdRng::seed_from_u64(7);

        let puzzle = Puzzle::generate_with_rng(
            &PuzzleConfig {
                grid_size: 10,
                words: &list,
            },
            &mut rng,
        )
        .unwrap();

        assert!(!puzzle.placed_words().is_empty());

        for placed in puzzle.placed_words() {
            let letters = chars(&placed.word);
            assert_eq!(letters.len(), placed.positions.len());

            let (dr, dc) = placed.direction.delta();

            for (i, (&letter, &(row, col))) in
                letters.iter().zip(&placed.positions).enumerate()
            {
                assert_eq!(puzzle.get(row, col), Some(letter));

                if i > 0 {
                    let (prev_row, prev_col) = placed.positions[i - 1];
                    assert_eq!((row, col), (prev_row + dr, prev_col + dc));
                }
            }
        }
    }

    #[test]
    fn overlapping_words_share_letters() {
        // A small grid and a letter-heavy list force plenty of crossings.
        let list = words(&["stone", "tones", "onset", "notes", "nest", "tens", "sent"]);
        let mut rng = StdRng::seed_from_u64(42);

        let puzzle = Puzzle::generate_with_rng(
            &PuzzleConfig {
                grid_size: 7,
                words: &list,
            },
            &mut rng,
        )
        .unwrap();

        let mut letters_at: HashMap<(usize, usize), char> = HashMap::new();

        for placed in puzzle.placed_words() {
            for (letter, &position) in placed.word.chars().zip(&placed.positions) {
                if let Some(existing) = letters_at.insert(position, letter) {
                    assert_eq!(
                        existing, letter,
                        "conflicting letters share cell {:?}",
                        position,
                    );
                }
            }
        }
    }

    #[test]
    fn oversized_word_is_silently_dropped() {
        // Length 4 never fits in a 3x3 grid along either axis.
        let list = words(&["ABCD"]);

        let puzzle = Puzzle::generate(&PuzzleConfig {
            grid_size: 3,
            words: &list,
        })
        .unwrap();

        assert!(puzzle.placed_words().is_empty());
        assert_eq!(puzzle.requested_count(), 1);

        for row in 0..3 {
            for col in 0..3 {
                assert!(puzzle.get(row, col).unwrap().is_ascii_uppercase());
            }
        }
    }

    #[test]
    fn can_place_respects_bounds_and_conflicts() {
        let mut cells: Array2D<Option<char>> = Array2D::filled_with(None, 5, 5);

        // "CAT" across from column 3 runs off the right edge.
        assert!(!Puzzle::can_place(&cells, &chars("CAT"), 0, 3, Direction::Across));
        assert!(Puzzle::can_place(&cells, &chars("CAT"), 0, 2, Direction::Across));

        Puzzle::write_word(&mut cells, &chars("CAT"), 0, 0, Direction::Down);

        // Crossing at the shared T is fine; clashing with the C is not.
        assert!(Puzzle::can_place(&cells, &chars("TOP"), 2, 0, Direction::Across));
        assert!(!Puzzle::can_place(&cells, &chars("DOG"), 0, 0, Direction::Across));
    }

    #[test]
    fn find_intersections_aligns_on_shared_letters() {
        let mut cells: Array2D<Option<char>> = Array2D::filled_with(None, 5, 5);
        Puzzle::write_word(&mut cells, &chars("CAT"), 0, 0, Direction::Down);

        // "TOP" can only hook onto the T at (2, 0), in both directions.
        let candidates = Puzzle::find_intersections(&cells, &chars("TOP"));

        assert_eq!(candidates.len(), 2);

        for candidate in &candidates {
            assert_eq!(candidate.crossing, (2, 0));
            assert_eq!((candidate.row, candidate.col), (2, 0));

            assert!(Puzzle::can_place(
                &cells,
                &chars("TOP"),
                candidate.row,
                candidate.col,
                candidate.direction,
            ));
        }

        let directions: Vec<Direction> = candidates
            .iter()
            .map(|candidate| candidate.direction)
            .collect();

        assert!(directions.contains(&Direction::Across));
        assert!(directions.contains(&Direction::Down));
    }

    #[test]
    fn selection_matches_either_drag_direction() {
        let mut puzzle = cat_puzzle();

        puzzle.begin_selection(0, 0);
        puzzle.extend_selection(1, 0);
        puzzle.extend_selection(2, 0);
        assert_eq!(puzzle.end_selection(), Some(String::from("CAT")));
        assert!(puzzle.is_found("cat"));

        // Dragging backward over the same word matches too, and the found set
        // does not grow a second entry.
        puzzle.begin_selection(2, 0);
        puzzle.extend_selection(0, 0);
        assert_eq!(puzzle.end_selection(), Some(String::from("CAT")));
        assert_eq!(puzzle.found_count(), 1);
    }

    #[test]
    fn selection_requires_both_endpoints() {
        let mut puzzle = cat_puzzle();

        // Stopping one cell short of the last letter is not a match.
        puzzle.begin_selection(0, 0);
        puzzle.extend_selection(1, 0);
        assert_eq!(puzzle.end_selection(), None);
        assert_eq!(puzzle.found_count(), 0);

        // Ending twice, or ending with no selection begun, changes nothing.
        assert_eq!(puzzle.end_selection(), None);
        assert_eq!(puzzle.found_count(), 0);

        puzzle.extend_selection(2, 0);
        assert_eq!(puzzle.end_selection(), None);
    }

    #[test]
    fn display_renders_every_row() {
        let puzzle = cat_puzzle();
        let rendered = format!("{}", puzzle);
        let rows: Vec<&str> = rendered.lines().collect();

        assert_eq!(rows.len(), 5);

        for row in rows {
            assert_eq!(row.trim().split(' ').count(), 5);
        }
    }
}
