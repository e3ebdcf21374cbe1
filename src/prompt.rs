//! Instruction prompt for the generation backend.

/// Render the hashtag instruction block for `text`.
///
/// The trimmed source text is appended verbatim after the rules; nothing in it
/// is escaped, so delimiter-looking content stays literal text.
pub fn build_prompt(text: &str, count: usize) -> String {
    format!(
        r##"Generate exactly {count} hashtags that summarize the text below.

Rules:
- Respond with JSON only, conforming to the provided schema, with no comments or extra text.
- Every hashtag must start with "#".
- No spaces and no emoji; use only letters, digits and underscore after the "#".
- No duplicates, including duplicates that differ only in letter case.
- Write the hashtags in the same language as the text.

Text:
{text}"##,
        count = count,
        text = text.trim()
    )
}
