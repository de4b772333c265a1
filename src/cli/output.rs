use std::fmt::Write as FmtWrite;

use serde::Serialize;

use crate::models::{
    ContextMatch, DocumentInfo, HealthStatus, OutputFormat, QueryResult, UploadResult,
};
use crate::utils::{PREVIEW_CHARS, preview};

pub trait Formatter {
    fn format_health(&self, health: &HealthStatus, base_url: &str) -> String;
    fn format_query_result(&self, result: &QueryResult) -> String;
    fn format_matches(&self, prompt: &str, matches: &[ContextMatch]) -> String;
    fn format_chunks(&self, chunks: &[String]) -> String;
    fn format_documents(&self, documents: &[DocumentInfo]) -> String;
    fn format_upload(&self, result: &UploadResult) -> String;
    fn format_message(&self, message: &str) -> String;
    fn format_error(&self, error: &str) -> String;
}

/// Readable one-line rendering of an opaque context entry.
fn context_text(context: &serde_json::Value) -> String {
    match context {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => match map.get("content").or_else(|| map.get("text")) {
            Some(serde_json::Value::String(s)) => s.clone(),
            _ => context.to_string(),
        },
        other => other.to_string(),
    }
}

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_health(&self, health: &HealthStatus, base_url: &str) -> String {
        let mut output = String::new();
        writeln!(output, "Status").unwrap();
        writeln!(output, "------").unwrap();
        let label = if health.is_ok() { "[OK]" } else { "[DEGRADED]" };
        writeln!(output, "Service:  {} ({})", label, health.status).unwrap();
        writeln!(output, "  URL:    {}", base_url).unwrap();
        output
    }

    fn format_query_result(&self, result: &QueryResult) -> String {
        let mut output = String::new();
        writeln!(output, "{}", result.response.trim_end()).unwrap();

        if !result.contexts.is_empty() {
            writeln!(output).unwrap();
            writeln!(output, "Contexts ({})", result.contexts.len()).unwrap();
            writeln!(output, "--------").unwrap();
            for (i, context) in result.contexts.iter().enumerate() {
                let text = preview(&context_text(context), PREVIEW_CHARS);
                writeln!(output, "{}. {}", i + 1, text.replace('\n', " ")).unwrap();
            }
        }

        output
    }

    fn format_matches(&self, prompt: &str, matches: &[ContextMatch]) -> String {
        if matches.is_empty() {
            return format!("No matching context found for: {}\n", prompt);
        }

        let mut output = String::new();
        writeln!(output, "Matches for: \"{}\"\n", prompt).unwrap();
        for (i, m) in matches.iter().enumerate() {
            writeln!(output, "{}. [Score: {:.3}]", i + 1, m.score).unwrap();
            writeln!(output, "   ---").unwrap();
            for line in preview(&m.content, PREVIEW_CHARS).lines() {
                writeln!(output, "   {}", line).unwrap();
            }
            writeln!(output).unwrap();
        }
        output
    }

    fn format_chunks(&self, chunks: &[String]) -> String {
        if chunks.is_empty() {
            return "No chunks produced.\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "{} chunk(s)\n", chunks.len()).unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            writeln!(
                output,
                "[{}] ({} chars)",
                i + 1,
                chunk.chars().count()
            )
            .unwrap();
            writeln!(output, "{}\n", chunk).unwrap();
        }
        output
    }

    fn format_documents(&self, documents: &[DocumentInfo]) -> String {
        if documents.is_empty() {
            return "No documents found.\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "Documents").unwrap();
        writeln!(output, "---------").unwrap();
        for doc in documents {
            writeln!(output, "  {}  {}", doc.doc_id, doc.filename).unwrap();
        }
        output
    }

    fn format_upload(&self, result: &UploadResult) -> String {
        let mut output = String::new();
        writeln!(output, "Uploaded {}", result.filename).unwrap();
        writeln!(output, "  Doc ID:  {}", result.doc_id).unwrap();
        writeln!(output, "  Status:  {}", result.message).unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("Error: {}\n", error)
    }
}

pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        let mut out = rendered.unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
        out.push('\n');
        out
    }
}

impl Formatter for JsonFormatter {
    fn format_health(&self, health: &HealthStatus, base_url: &str) -> String {
        self.render(&serde_json::json!({
            "status": health.status,
            "url": base_url,
        }))
    }

    fn format_query_result(&self, result: &QueryResult) -> String {
        self.render(result)
    }

    fn format_matches(&self, prompt: &str, matches: &[ContextMatch]) -> String {
        self.render(&serde_json::json!({
            "prompt": prompt,
            "matches": matches,
        }))
    }

    fn format_chunks(&self, chunks: &[String]) -> String {
        self.render(&serde_json::json!({ "chunks": chunks }))
    }

    fn format_documents(&self, documents: &[DocumentInfo]) -> String {
        self.render(&serde_json::json!({ "documents": documents }))
    }

    fn format_upload(&self, result: &UploadResult) -> String {
        self.render(result)
    }

    fn format_message(&self, message: &str) -> String {
        self.render(&serde_json::json!({ "message": message }))
    }

    fn format_error(&self, error: &str) -> String {
        self.render(&serde_json::json!({ "error": error }))
    }
}

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn format_health(&self, health: &HealthStatus, base_url: &str) -> String {
        let mut output = String::new();
        writeln!(output, "## Status\n").unwrap();
        writeln!(output, "| Service | Status |").unwrap();
        writeln!(output, "|---------|--------|").unwrap();
        writeln!(output, "| {} | {} |", base_url, health.status).unwrap();
        output
    }

    fn format_query_result(&self, result: &QueryResult) -> String {
        let mut output = String::new();
        writeln!(output, "## Answer\n").unwrap();
        writeln!(output, "{}\n", result.response.trim_end()).unwrap();

        if !result.contexts.is_empty() {
            writeln!(output, "### Contexts\n").unwrap();
            for context in &result.contexts {
                let text = preview(&context_text(context), PREVIEW_CHARS);
                writeln!(output, "- {}", text.replace('\n', " ")).unwrap();
            }
        }
        output
    }

    fn format_matches(&self, prompt: &str, matches: &[ContextMatch]) -> String {
        if matches.is_empty() {
            return format!("No matching context found for: *{}*\n", prompt);
        }

        let mut output = String::new();
        writeln!(output, "## Matches: \"{}\"\n", prompt).unwrap();
        for (i, m) in matches.iter().enumerate() {
            writeln!(output, "### {}. Score {:.3}\n", i + 1, m.score).unwrap();
            writeln!(output, "```").unwrap();
            writeln!(output, "{}", preview(&m.content, PREVIEW_CHARS)).unwrap();
            writeln!(output, "```\n").unwrap();
        }
        output
    }

    fn format_chunks(&self, chunks: &[String]) -> String {
        let mut output = String::new();
        writeln!(output, "## Chunks ({})\n", chunks.len()).unwrap();
        for (i, chunk) in chunks.iter().enumerate() {
            writeln!(output, "### Chunk {}\n", i + 1).unwrap();
            writeln!(output, "```").unwrap();
            writeln!(output, "{}", chunk).unwrap();
            writeln!(output, "```\n").unwrap();
        }
        output
    }

    fn format_documents(&self, documents: &[DocumentInfo]) -> String {
        if documents.is_empty() {
            return "*No documents found.*\n".to_string();
        }

        let mut output = String::new();
        writeln!(output, "## Documents\n").unwrap();
        writeln!(output, "| Doc ID | Filename |").unwrap();
        writeln!(output, "|--------|----------|").unwrap();
        for doc in documents {
            writeln!(output, "| `{}` | {} |", doc.doc_id, doc.filename).unwrap();
        }
        output
    }

    fn format_upload(&self, result: &UploadResult) -> String {
        let mut output = String::new();
        writeln!(output, "## Uploaded `{}`\n", result.filename).unwrap();
        writeln!(output, "- **Doc ID**: `{}`", result.doc_id).unwrap();
        writeln!(output, "- **Status**: {}", result.message).unwrap();
        output
    }

    fn format_message(&self, message: &str) -> String {
        format!("{}\n", message)
    }

    fn format_error(&self, error: &str) -> String {
        format!("**Error**: {}\n", error)
    }
}

pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_documents() -> Vec<DocumentInfo> {
        vec![
            DocumentInfo {
                doc_id: "d1".to_string(),
                filename: "a.pdf".to_string(),
            },
            DocumentInfo {
                doc_id: "d2".to_string(),
                filename: "b.txt".to_string(),
            },
        ]
    }

    #[test]
    fn test_text_documents() {
        let output = TextFormatter.format_documents(&sample_documents());
        assert!(output.contains("d1  a.pdf"));
        assert!(output.contains("d2  b.txt"));
        assert_eq!(TextFormatter.format_documents(&[]), "No documents found.\n");
    }

    #[test]
    fn test_json_documents_are_parseable() {
        let output = JsonFormatter::new(false).format_documents(&sample_documents());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["documents"][0]["doc_id"], "d1");
        assert_eq!(value["documents"][1]["filename"], "b.txt");
    }

    #[test]
    fn test_text_query_result_renders_contexts() {
        let result = QueryResult {
            response: "Answer".to_string(),
            contexts: vec![
                serde_json::json!({"content": "first context"}),
                serde_json::json!("second context"),
                serde_json::json!({"id": 7}),
            ],
            prompt: "q".to_string(),
        };
        let output = TextFormatter.format_query_result(&result);
        assert!(output.starts_with("Answer\n"));
        assert!(output.contains("1. first context"));
        assert!(output.contains("2. second context"));
        assert!(output.contains(r#"3. {"id":7}"#));
    }

    #[test]
    fn test_matches_formatting() {
        let matches = vec![ContextMatch {
            content: "relevant text".to_string(),
            score: 0.8765,
        }];
        let output = TextFormatter.format_matches("q", &matches);
        assert!(output.contains("[Score: 0.877]"));
        assert!(output.contains("relevant text"));

        let output = MarkdownFormatter.format_matches("q", &[]);
        assert!(output.contains("No matching context"));
    }

    #[test]
    fn test_json_chunks_keep_order() {
        let chunks = vec!["b".to_string(), "a".to_string()];
        let output = JsonFormatter::new(true).format_chunks(&chunks);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["chunks"], serde_json::json!(["b", "a"]));
    }

    #[test]
    fn test_markdown_upload() {
        let result = UploadResult {
            doc_id: "d9".to_string(),
            filename: "x.md".to_string(),
            message: "ok".to_string(),
        };
        let output = MarkdownFormatter.format_upload(&result);
        assert!(output.contains("`d9`"));
        assert!(output.contains("x.md"));
    }
}
