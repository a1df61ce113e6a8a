/// Build a deterministic summary prompt for meeting transcripts.
///
/// The model is asked for a single JSON object so the response can be parsed
/// into a structured summary without prose stripping heuristics.
pub fn build_summary_prompt(title: &str, meeting_date: &str, transcript: &str) -> String {
    let date_line = if meeting_date.trim().is_empty() {
        "(not specified)".to_string()
    } else {
        meeting_date.trim().to_string()
    };

    format!(
        "You are an assistant that extracts concise, factual meeting notes.\n\
Meeting title: {title}\n\
Meeting date: {date_line}\n\
\n\
Reply with ONLY a valid JSON object (no code fences, no prose) with exactly\n\
these keys:\n\
- \"key_points\": array of short strings, the main discussion points in order\n\
- \"decisions\": array of short strings, decisions that were reached\n\
- \"action_items\": array of objects with keys \"description\" (string),\n\
  \"owner\" (string or null), \"due\" (string or null)\n\
\n\
Rules:\n\
- Use only information present in the transcript.\n\
- If a section has no content, use an empty array.\n\
- \"due\" must be an ISO date (YYYY-MM-DD); use null when no date is stated.\n\
- Keep each entry short and concrete.\n\
\n\
Transcript:\n\
{transcript}"
    )
}
