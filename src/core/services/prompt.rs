//! Prompt builder
//!
//! Turns fetched page text into the fixed-schema analysis request sent to the
//! language model.

/// Maximum number of characters of page content embedded in a prompt
pub const MAX_CONTENT_CHARS: usize = 8000;

const PREAMBLE: &str = "You are an expert content analyzer. Analyze the following web content \
for authenticity, originality, and quality.";

const REQUIREMENTS: &str = "ANALYSIS REQUIREMENTS:
1. Originality Score (0-100): How original is this content? 100 = highly original, unique content. 0 = completely copied/duplicated.
2. Plagiarism Risk (0-100): Likelihood that this content is plagiarized. 100 = high risk of plagiarism. 0 = no plagiarism detected.
3. AI Generation Confidence (0-100): Probability that this content was AI-generated or synthetic. 100 = definitely AI-generated. 0 = definitely human-written.
4. Sentiment: Overall emotional tone - must be exactly one of: \"Positive\", \"Neutral\", or \"Negative\"
5. Summary: A concise 2-3 sentence summary of the main content
6. Reasoning: Brief explanation (2-3 sentences) of why you gave these scores";

const RESPONSE_FORMAT: &str = "IMPORTANT: Respond with ONLY a valid JSON object, no markdown \
formatting, no code blocks. Use this exact format:
{\"originality\": <number>, \"plagiarism\": <number>, \"deepfake\": <number>, \"sentiment\": \"<string>\", \"summary\": \"<string>\", \"reasoning\": \"<string>\"}";

/// Cut `content` down to at most [`MAX_CONTENT_CHARS`] characters
///
/// Counts Unicode scalar values, so the cut never splits a character.
#[must_use]
pub fn truncate_content(content: &str) -> &str {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

/// Build the analysis prompt for content fetched from `url`
///
/// The URL is only used for logging; the model sees the content alone.
#[must_use]
pub fn build_prompt(url: &str, content: &str) -> String {
    let content = truncate_content(content);
    log::debug!(
        "building analysis prompt for {url} ({} chars of content)",
        content.chars().count()
    );

    format!("{PREAMBLE}\n\nCONTENT TO ANALYZE:\n{content}\n\n{REQUIREMENTS}\n\n{RESPONSE_FORMAT}")
}
