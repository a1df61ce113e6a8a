//! Built-in plain-text PDF renderer
//!
//! The guaranteed-success export path: a minimal PDF 1.4 document assembled
//! entirely in memory from the Markdown source lines. No external process,
//! no allocation pattern that can fail, no panics for any UTF-8 input.
//! Characters outside Latin-1 are replaced with '?' (the single built-in
//! Helvetica font has no wider coverage).

const PAGE_WIDTH: u32 = 595; // A4 in points
const PAGE_HEIGHT: u32 = 842;
const MARGIN: u32 = 56;
const FONT_SIZE: u32 = 11;
const LEADING: u32 = 14;
const LINES_PER_PAGE: usize = 52;

/// Render Markdown text as a plain-text PDF.
pub fn render_builtin_pdf(markdown: &str, wrap_columns: usize) -> Vec<u8> {
    let wrap_columns = wrap_columns.max(20);

    let mut lines: Vec<String> = Vec::new();
    for source_line in markdown.lines() {
        let wrapped = wrap_line(source_line, wrap_columns);
        lines.extend(wrapped);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    let pages: Vec<&[String]> = lines.chunks(LINES_PER_PAGE).collect();
    build_document(&pages)
}

/// Wrap one source line to the column limit, hard-splitting oversized words.
fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in line.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > columns {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(columns) {
                out.push(chunk.iter().collect());
            }
            continue;
        }

        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed > columns {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
    }

    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Escape text for a PDF literal string, mapping to Latin-1 lossily.
fn escape_pdf_text(line: &str) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(line.len());
    for ch in line.chars() {
        let byte = match ch {
            '\\' | '(' | ')' => {
                escaped.push(b'\\');
                ch as u8
            }
            ' '..='~' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            _ => b'?',
        };
        escaped.push(byte);
    }
    escaped
}

fn page_content_stream(lines: &[String]) -> Vec<u8> {
    let mut stream = Vec::new();
    stream.extend_from_slice(b"BT\n");
    stream.extend_from_slice(format!("/F1 {} Tf\n", FONT_SIZE).as_bytes());
    stream.extend_from_slice(format!("{} TL\n", LEADING).as_bytes());
    stream.extend_from_slice(
        format!("{} {} Td\n", MARGIN, PAGE_HEIGHT - MARGIN - FONT_SIZE).as_bytes(),
    );

    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            stream.extend_from_slice(b"T*\n");
        }
        stream.push(b'(');
        stream.extend_from_slice(&escape_pdf_text(line));
        stream.extend_from_slice(b") Tj\n");
    }

    stream.extend_from_slice(b"ET\n");
    stream
}

/// Assemble the object table, cross-reference table, and trailer.
fn build_document(pages: &[&[String]]) -> Vec<u8> {
    // Objects: 1 catalog, 2 page tree, 3 font, then (page, content) per page.
    let object_count = 3 + pages.len() * 2;
    let mut offsets: Vec<usize> = Vec::with_capacity(object_count);
    let mut pdf: Vec<u8> = Vec::new();

    pdf.extend_from_slice(b"%PDF-1.4\n");

    offsets.push(pdf.len());
    pdf.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();
    offsets.push(pdf.len());
    pdf.extend_from_slice(
        format!(
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids.join(" "),
            pages.len()
        )
        .as_bytes(),
    );

    offsets.push(pdf.len());
    pdf.extend_from_slice(
        b"3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n",
    );

    for (i, page_lines) in pages.iter().enumerate() {
        let page_id = 4 + i * 2;
        let content_id = page_id + 1;

        offsets.push(pdf.len());
        pdf.extend_from_slice(
            format!(
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>\nendobj\n",
                page_id, PAGE_WIDTH, PAGE_HEIGHT, content_id
            )
            .as_bytes(),
        );

        let stream = page_content_stream(page_lines);
        offsets.push(pdf.len());
        pdf.extend_from_slice(
            format!("{} 0 obj\n<< /Length {} >>\nstream\n", content_id, stream.len()).as_bytes(),
        );
        pdf.extend_from_slice(&stream);
        pdf.extend_from_slice(b"endstream\nendobj\n");
    }

    let xref_offset = pdf.len();
    pdf.extend_from_slice(format!("xref\n0 {}\n", object_count + 1).as_bytes());
    pdf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            object_count + 1,
            xref_offset
        )
        .as_bytes(),
    );

    pdf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_valid_header_and_trailer() {
        let pdf = render_builtin_pdf("# Hello\n\nWorld", 80);
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn empty_input_still_produces_one_page() {
        let pdf = render_builtin_pdf("", 80);
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Count 1"));
    }

    #[test]
    fn long_documents_paginate() {
        let markdown = "line\n".repeat(LINES_PER_PAGE * 2 + 1);
        let pdf = render_builtin_pdf(&markdown, 80);
        let text = String::from_utf8_lossy(&pdf);
        assert!(text.contains("/Count 3"));
    }

    #[test]
    fn wraps_long_lines_at_column_limit() {
        let wrapped = wrap_line("aaa bbb ccc ddd", 7);
        assert_eq!(wrapped, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn hard_splits_oversized_words() {
        let wrapped = wrap_line("abcdefghij", 4);
        assert_eq!(wrapped, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn blank_lines_are_preserved() {
        assert_eq!(wrap_line("", 80), vec![String::new()]);
    }

    #[test]
    fn escapes_pdf_string_delimiters() {
        let escaped = escape_pdf_text(r"a(b)c\d");
        assert_eq!(escaped, br"a\(b\)c\\d".to_vec());
    }

    #[test]
    fn non_latin_characters_degrade_to_question_marks() {
        let escaped = escape_pdf_text("회의");
        assert_eq!(escaped, b"??".to_vec());
    }

    #[test]
    fn latin1_characters_pass_through() {
        let escaped = escape_pdf_text("café");
        assert_eq!(escaped, vec![b'c', b'a', b'f', 0xe9]);
    }

    #[test]
    fn output_is_deterministic() {
        let a = render_builtin_pdf("Same input", 80);
        let b = render_builtin_pdf("Same input", 80);
        assert_eq!(a, b);
    }
}
