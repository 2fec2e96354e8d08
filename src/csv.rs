use crate::error::FlashmindError;
use crate::models::Flashcard;
use std::fs;
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "Question,Answer";
pub const EXPORT_FILE_NAME: &str = "flashcards.csv";

/// Deck files (`.csv` or `.json`) in `dir`, sorted by path.
pub fn get_deck_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    if dir.is_dir()
        && let Ok(entries) = fs::read_dir(dir)
    {
        for entry in entries.flatten() {
            let path = entry.path();
            if let Some(ext) = path.extension()
                && (ext == "csv" || ext == "json")
            {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

pub fn load_deck(path: &Path) -> Result<Vec<Flashcard>, FlashmindError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Ok(load_csv(path)?),
        Some("json") => load_json(path),
        _ => Err(FlashmindError::UnsupportedDeck(path.to_path_buf())),
    }
}

pub fn load_csv(path: &Path) -> std::io::Result<Vec<Flashcard>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_csv(&content))
}

pub fn parse_csv(content: &str) -> Vec<Flashcard> {
    let mut flashcards = Vec::new();

    for (record_no, record) in split_records(content).iter().enumerate() {
        if record_no == 0 && record.trim() == CSV_HEADER {
            continue;
        }
        if let Some((question, answer)) = parse_csv_line(record)
            && !question.trim().is_empty()
            && !answer.trim().is_empty()
        {
            flashcards.push(Flashcard { question, answer });
        }
    }

    flashcards
}

/// Splits `content` into rows. A newline inside an open quoted field belongs to the row.
fn split_records(content: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for c in content.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            '\n' if !in_quotes => {
                if current.ends_with('\r') {
                    current.pop();
                }
                records.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        if current.ends_with('\r') {
            current.pop();
        }
        records.push(current);
    }

    records
}

/// Cards in the server's shape: an array of objects with `question` and `answer`.
pub fn load_json(path: &Path) -> Result<Vec<Flashcard>, FlashmindError> {
    let content = fs::read_to_string(path)?;
    let cards: Vec<Flashcard> = serde_json::from_str(&content)?;
    Ok(cards
        .into_iter()
        .filter(|c| !c.question.trim().is_empty() && !c.answer.trim().is_empty())
        .collect())
}

pub fn parse_csv_line(line: &str) -> Option<(String, String)> {
    let mut chars = line.chars().peekable();
    let mut question = String::new();
    let mut answer = String::new();
    let mut current_field = &mut question;
    let mut in_quotes = false;
    let mut field_index = 0;

    while let Some(c) = chars.next() {
        match c {
            '"' if !in_quotes => {
                in_quotes = true;
            }
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current_field.push('"');
                } else {
                    in_quotes = false;
                    if chars.peek() == Some(&',') {
                        chars.next();
                    }
                    if field_index == 0 {
                        current_field = &mut answer;
                        field_index = 1;
                    }
                }
            }
            ',' if !in_quotes && field_index == 0 => {
                field_index = 1;
                current_field = &mut answer;
            }
            _ => {
                current_field.push(c);
            }
        }
    }

    Some((question, answer))
}

fn quote_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Header plus one fully quoted row per card, in the given order.
pub fn export_csv(cards: &[Flashcard]) -> String {
    let mut rows = Vec::with_capacity(cards.len() + 1);
    rows.push(CSV_HEADER.to_string());
    for card in cards {
        rows.push(format!(
            "{},{}",
            quote_field(&card.question),
            quote_field(&card.answer)
        ));
    }
    rows.join("\n")
}

pub fn write_csv_export(dir: &Path, cards: &[Flashcard]) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, export_csv(cards))?;
    tracing::info!("Exported {} cards to {:?}", cards.len(), path);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_simple() {
        let (question, answer) = parse_csv_line("What is 2+2?,Four").unwrap();
        assert_eq!(question, "What is 2+2?");
        assert_eq!(answer, "Four");
    }

    #[test]
    fn test_parse_csv_with_quotes() {
        let (question, answer) = parse_csv_line("\"What is 2+2?\",\"Four\"").unwrap();
        assert_eq!(question, "What is 2+2?");
        assert_eq!(answer, "Four");
    }

    #[test]
    fn test_parse_csv_with_commas_in_question() {
        let (question, answer) = parse_csv_line("\"What is 2+2, 3+3?\",\"Four\"").unwrap();
        assert_eq!(question, "What is 2+2, 3+3?");
        assert_eq!(answer, "Four");
    }

    #[test]
    fn test_parse_csv_with_escaped_quotes() {
        let line = "\"What is \"\"quoted\"\"?\",\"Answer with \"\"quotes\"\"\"";
        let (question, answer) = parse_csv_line(line).unwrap();
        assert_eq!(question, "What is \"quoted\"?");
        assert_eq!(answer, "Answer with \"quotes\"");
    }

    #[test]
    fn test_parse_csv_doubled_quote_before_comma() {
        let (question, answer) = parse_csv_line("\"a\"\"\",\"b\"").unwrap();
        assert_eq!(question, "a\"");
        assert_eq!(answer, "b");
    }

    #[test]
    fn test_parse_csv_only_question_quoted() {
        let (question, answer) = parse_csv_line("\"What is 2+2?\",Four").unwrap();
        assert_eq!(question, "What is 2+2?");
        assert_eq!(answer, "Four");
    }

    #[test]
    fn test_parse_csv_empty_fields() {
        let (question, answer) = parse_csv_line(",").unwrap();
        assert_eq!(question, "");
        assert_eq!(answer, "");
    }

    #[test]
    fn test_parse_csv_skips_header_and_blank_rows() {
        let content = "Question,Answer\nQ1,A1\n\n,A2\nQ2,\nQ3,A3";
        let cards = parse_csv(content);
        assert_eq!(
            cards,
            vec![Flashcard::new("Q1", "A1"), Flashcard::new("Q3", "A3")]
        );
    }

    #[test]
    fn test_header_only_skipped_on_first_line() {
        let cards = parse_csv("Q1,A1\nQuestion,Answer");
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn test_export_doubles_quotes() {
        let csv = export_csv(&[Flashcard::new("a\"b", "c")]);
        assert_eq!(csv, "Question,Answer\n\"a\"\"b\",\"c\"");
        assert!(csv.lines().any(|l| l == "\"a\"\"b\",\"c\""));
    }

    #[test]
    fn test_export_keeps_order_and_commas() {
        let cards = vec![
            Flashcard::new("In a CSV, what does a comma do?", "Separates fields"),
            Flashcard::new("Second", "Two"),
        ];
        let csv = export_csv(&cards);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Question,Answer");
        assert_eq!(
            lines[1],
            "\"In a CSV, what does a comma do?\",\"Separates fields\""
        );
        assert_eq!(lines[2], "\"Second\",\"Two\"");
    }

    #[test]
    fn test_export_empty_deck_is_header_only() {
        assert_eq!(export_csv(&[]), "Question,Answer");
    }

    #[test]
    fn test_exported_file_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let cards = vec![
            Flashcard::new("Is \"quoted\" text supported?", "Yes, \"it works\""),
            Flashcard::new("Plain", "Card"),
            Flashcard::new("Two lines?", "line1\nline2"),
            Flashcard::new("After", "the multi-line card"),
        ];

        let path = write_csv_export(dir.path(), &cards).unwrap();

        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        assert_eq!(load_csv(&path).unwrap(), cards);
    }

    #[test]
    fn test_split_records_keeps_quoted_newlines() {
        let content = "Question,Answer\r\n\"Q1\",\"a\r\nb\"\r\nQ2,A2\n";
        let records = split_records(content);
        assert_eq!(records, vec!["Question,Answer", "\"Q1\",\"a\r\nb\"", "Q2,A2"]);
        assert_eq!(
            parse_csv(content),
            vec![Flashcard::new("Q1", "a\r\nb"), Flashcard::new("Q2", "A2")]
        );
    }

    #[test]
    fn test_load_json_deck() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biology.json");
        fs::write(
            &path,
            r#"[{"_id": "1", "question": "Cell powerhouse?", "answer": "Mitochondria"},
                {"question": " ", "answer": "skip me"}]"#,
        )
        .unwrap();

        let cards = load_deck(&path).unwrap();
        assert_eq!(cards, vec![Flashcard::new("Cell powerhouse?", "Mitochondria")]);
    }

    #[test]
    fn test_load_deck_rejects_other_extensions() {
        let result = load_deck(Path::new("notes.txt"));
        assert!(matches!(result, Err(FlashmindError::UnsupportedDeck(_))));
    }

    #[test]
    fn test_get_deck_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.csv", "a.json", "notes.txt", "c.csv"] {
            fs::write(dir.path().join(name), "Q,A").unwrap();
        }

        let names: Vec<String> = get_deck_files(dir.path())
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.json", "b.csv", "c.csv"]);
    }

    #[test]
    fn test_get_deck_files_missing_dir() {
        assert!(get_deck_files(Path::new("/no/such/flashmind/dir")).is_empty());
    }
}
