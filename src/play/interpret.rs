use super::token::MoveToken;
use super::view::LegalMoves;

/// Line prefix a provider uses to push a durable note to itself.
pub const NOTES_MARKER: &str = "NOTES:";

/// What a raw provider response boiled down to. `action` is always safe to
/// apply: an unparseable or inadmissible token has already collapsed to a
/// fold, with `legal` cleared so the caller can narrate and count it.
#[derive(Debug, Clone)]
pub struct Reading {
    pub action: MoveToken,
    pub commentary: String,
    pub notes: Option<String>,
    pub legal: bool,
}

/// Interpret a free-form response against the current vocabulary.
///
/// The note block (lines from the first `NOTES:` marker onward, excluding
/// the action line itself) is carved off first so it can never leak into the
/// action or its commentary. The remainder splits on the first `@`: token on
/// the left, commentary on the right. Anything that fails the grammar or the
/// vocabulary becomes a fold, unconditionally; there is no reprompt.
pub fn interpret(raw: &str, legal: &LegalMoves) -> Reading {
    let (spoken, notes) = split_notes(raw);
    let (candidate, commentary) = match spoken.split_once('@') {
        Some((token, commentary)) => (token, commentary.trim().to_string()),
        None => (spoken.as_str(), String::new()),
    };
    match candidate.trim().parse::<MoveToken>() {
        Ok(action) if legal.admits(&action) => Reading {
            action,
            commentary,
            notes,
            legal: true,
        },
        _ => Reading {
            action: MoveToken::Fold,
            commentary,
            notes,
            legal: false,
        },
    }
}

/// Everything before the marker line, and the note payload with the marker
/// prefix stripped. The first line never counts as a marker: the action line
/// is the action line.
fn split_notes(raw: &str) -> (String, Option<String>) {
    let lines = raw.lines().collect::<Vec<&str>>();
    let marker = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| line.starts_with(NOTES_MARKER))
        .map(|(i, _)| i);
    match marker {
        Some(i) => {
            let spoken = lines[..i].join("\n");
            let mut notes = lines[i..].to_vec();
            notes[0] = notes[0].strip_prefix(NOTES_MARKER).unwrap_or(notes[0]);
            let notes = notes.join("\n").trim().to_string();
            match notes.is_empty() {
                true => (spoken, None),
                false => (spoken, Some(notes)),
            }
        }
        None => (raw.to_string(), None),
    }
}
