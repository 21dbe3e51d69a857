use word_hunt::{Puzzle, PuzzleConfig};

fn main() {
    let words = [
        String::from("puzzle"),
        String::from("letter"),
        String::from("search"),
        String::from("random"),
        String::from("corner"),
        String::from("hidden"),
        String::from("grid"),
    ];

    let mut puzzle = Puzzle::generate(&PuzzleConfig {
        grid_size: 12,
        words: &words,
    })
    .unwrap();

    println!("{}", puzzle);

    println!("Words to find:");
    for word in puzzle.words() {
        println!("  {}", word);
    }

    // Simulate a drag along the first hidden word.
    let endpoints = puzzle
        .placed_words()
        .first()
        .map(|placed| (placed.start(), placed.end()));

    if let Some((start, end)) = endpoints {
        puzzle.begin_selection(start.0, start.1);
        puzzle.extend_selection(end.0, end.1);

        if let Some(word) = puzzle.end_selection() {
            println!("\nSelecting {:?} to {:?} found {}", start, end, word);
        }
    }

    println!("Found: {} / {}", puzzle.found_count(), puzzle.requested_count());
}
