//! Schema fixtures taken from the ear-training tools.
//!
//! The JSON sources live in `test-fixtures/schemas/` at the workspace root.

use form_schema::Schema;
use std::path::PathBuf;

const CHORD_MATCH: &str = include_str!("../../../test-fixtures/schemas/chord-match.json");
const PITCH_MATCH: &str = include_str!("../../../test-fixtures/schemas/pitch-match.json");

/// Chord match: basic settings plus a `chords` dynamic list of
/// `{name, offsets, weights[12]}` records with a `chordPresets` library.
pub fn chord_match_schema() -> Schema {
    Schema::from_json_str(CHORD_MATCH).expect("chord-match fixture must be valid")
}

/// Pitch match: solfege weights (fixed list of 12), interval weights
/// (dynamic list, `minLength` 1, `onlyLast` removal) and basic settings.
pub fn pitch_match_schema() -> Schema {
    Schema::from_json_str(PITCH_MATCH).expect("pitch-match fixture must be valid")
}

/// Raw JSON text of the chord-match fixture
pub fn chord_match_source() -> &'static str {
    CHORD_MATCH
}

/// Absolute path of a file in `test-fixtures/schemas/`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../test-fixtures/schemas")
        .join(name)
}

/// The twelve weights of one chord, `10` at each listed solfege position.
pub fn weights(positions: &[usize]) -> Vec<i64> {
    (0..12)
        .map(|i| if positions.contains(&i) { 10 } else { 0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_parse() {
        assert_eq!(chord_match_schema().title(), Some("Chord Match Configuration"));
        assert_eq!(pitch_match_schema().presets().len(), 2);
        assert!(fixture_path("chord-match.json").exists());
    }

    #[test]
    fn test_weights_helper() {
        assert_eq!(weights(&[0, 5, 7]), vec![10, 0, 0, 0, 0, 10, 0, 10, 0, 0, 0, 0]);
    }
}
