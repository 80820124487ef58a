use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, RunChild};

use super::DocumentError;

/// Body paragraphs, one per line; blank paragraphs skipped.
pub(super) fn extract(bytes: &[u8]) -> Result<String, DocumentError> {
    let docx = read_docx(bytes)
        .map_err(|e| DocumentError::Malformed(format!("invalid DOCX: {e}")))?;

    let lines: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
            _ => None,
        })
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    Ok(lines.join("\n"))
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}
