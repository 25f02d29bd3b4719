/// Unicode character classification.
///
/// Classifies code points by general category the way the lexer needs them
/// (space separators, letters, connector punctuation, other numbers) and
/// describes the superscript number alphabet along with its mapping back to
/// inline characters.
pub mod unicode;
