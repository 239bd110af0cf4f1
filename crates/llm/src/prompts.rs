//! Prompt templates for key-point summaries, one set per language

use crate::language::Language;

const EN_SYSTEM: &str = "You are a professional video content analysis assistant, skilled at extracting video key points and presenting them clearly. You focus on core concepts, important arguments, key data, practical tips, and conclusion points. Please use plain text paragraph format to present key points, write in continuous paragraphs without bullet points, numbered lists, or other formatting.";

const ZH_SYSTEM: &str = "你是一個專業的影片內容分析助手，擅長提取影片重點並以清晰的方式呈現。你會關注核心概念、重要論點、關鍵數據、實用技巧和結論要點。請使用純文字段落格式呈現重點，以連續段落的方式書寫，不要使用項目符號、編號列表或其他格式。";

const EN_KEY_POINTS: &str = "1. Core theme and main concepts
2. Important arguments, steps, or processes
3. Key data, statistics, or facts
4. Practical tips, suggestions, or methods
5. Important concept explanations
6. Conclusion or summary points";

const ZH_KEY_POINTS: &str = "1. 核心主題與主要概念
2. 重要論點、步驟或流程
3. 關鍵數據、統計或事實
4. 實用技巧、建議或方法
5. 重要概念解釋
6. 結論或總結要點";

const EN_PLAIN_TEXT: &str = "Please use plain text paragraph format, write in continuous paragraphs without bullet points, numbered lists, or other formatting.";

const ZH_PLAIN_TEXT: &str = "請使用純文字段落格式，以連續段落的方式書寫，不要使用項目符號、編號列表或其他格式。";

impl Language {
    /// System message sent with every completion call
    pub fn system_message(self) -> &'static str {
        match self {
            Self::En => EN_SYSTEM,
            Self::Zh => ZH_SYSTEM,
        }
    }

    /// Prompt for one chunk of a long transcript (map phase)
    pub fn chunk_prompt(self, content: &str) -> String {
        match self {
            Self::En => format!(
                "Please analyze the following video content segment and extract key points. Key points should include:\n{}\n\n{} Keep the content clear and well-organized:\n\n{}\n\nPlease generate key points for this segment:",
                EN_KEY_POINTS, EN_PLAIN_TEXT, content
            ),
            Self::Zh => format!(
                "請分析以下影片內容片段，提取關鍵重點。重點應包含：\n{}\n\n{}保持內容清晰有條理：\n\n{}\n\n請生成此片段的重點：",
                ZH_KEY_POINTS, ZH_PLAIN_TEXT, content
            ),
        }
    }

    /// Prompt for content short enough to summarize in one call
    pub fn single_prompt(self, content: &str) -> String {
        match self {
            Self::En => format!(
                "Please analyze the following video content and generate a structured key points summary. Key points should include:\n{}\n\n{} Keep the content clear and well-organized:\n\n{}\n\nPlease generate video key points:",
                EN_KEY_POINTS, EN_PLAIN_TEXT, content
            ),
            Self::Zh => format!(
                "請分析以下影片內容，並生成結構化的重點摘要。重點應包含：\n{}\n\n{}保持內容清晰有條理：\n\n{}\n\n請生成影片重點：",
                ZH_KEY_POINTS, ZH_PLAIN_TEXT, content
            ),
        }
    }

    /// Prompt merging the chunk summaries (reduce phase)
    pub fn final_prompt(self, combined_summary: &str) -> String {
        match self {
            Self::En => format!(
                "The following are key points extracted from different segments of the video. Please integrate and deduplicate them to generate a complete structured key points summary. Key points should include:\n{}\n\n{} Organize the content in logical order and keep it clear:\n\n{}\n\nPlease generate the complete video key points summary:",
                EN_KEY_POINTS, EN_PLAIN_TEXT, combined_summary
            ),
            Self::Zh => format!(
                "以下是從影片不同段落提取的重點，請整合並去重，生成一份完整的結構化重點摘要。重點應包含：\n{}\n\n{}按邏輯順序組織內容，保持清晰有條理：\n\n{}\n\n請生成完整的影片重點摘要：",
                ZH_KEY_POINTS, ZH_PLAIN_TEXT, combined_summary
            ),
        }
    }

    fn title_line(self, title: &str) -> String {
        match self {
            Self::En => format!("Title: {}\n\n", title),
            Self::Zh => format!("標題：{}\n\n", title),
        }
    }

    fn description_line(self, description: &str) -> String {
        match self {
            Self::En => format!("Description: {}\n\n", description),
            Self::Zh => format!("描述：{}\n\n", description),
        }
    }

    /// Context block for the single-pass prompt; empty fields are skipped
    pub fn single_context(self, title: &str, description: &str, transcript: &str) -> String {
        let mut content = String::new();
        if !title.is_empty() {
            content.push_str(&self.title_line(title));
        }
        if !description.is_empty() {
            content.push_str(&self.description_line(description));
        }
        if !transcript.is_empty() {
            match self {
                Self::En => content.push_str(&format!("Transcript: {}", transcript)),
                Self::Zh => content.push_str(&format!("字幕內容：{}", transcript)),
            }
        }
        content
    }

    /// Context block for one chunk
    ///
    /// Title and description are only repeated on the first chunk.
    pub fn chunk_context(
        self,
        chunk: &str,
        index: usize,
        total: usize,
        title: &str,
        description: &str,
    ) -> String {
        let mut content = String::new();
        if index == 0 {
            if !title.is_empty() {
                content.push_str(&self.title_line(title));
            }
            if !description.is_empty() {
                content.push_str(&self.description_line(description));
            }
        }
        match self {
            Self::En => content.push_str(&format!(
                "Video content segment {}/{}:\n{}",
                index + 1,
                total,
                chunk
            )),
            Self::Zh => content.push_str(&format!(
                "影片內容片段 {}/{}：\n{}",
                index + 1,
                total,
                chunk
            )),
        }
        content
    }

    /// Message returned with a 405 for anything but POST on the summary path
    pub fn method_not_allowed_message(self) -> &'static str {
        match self {
            Self::En => "Method not allowed",
            Self::Zh => "方法不允許",
        }
    }

    /// Message returned with a 429 when the caller is over quota
    pub fn rate_limited_message(
        self,
        wait_time_seconds: u64,
        count: usize,
        limit: usize,
    ) -> String {
        match self {
            Self::En => format!(
                "Rate limit exceeded. Please wait {} seconds before trying again. ({}/{} requests per minute)",
                wait_time_seconds, count, limit
            ),
            Self::Zh => format!(
                "請求過於頻繁。請等待 {} 秒後再試。（每分鐘 {} 次）",
                wait_time_seconds, limit
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_context_skips_empty_fields() {
        let content = Language::En.single_context("Rust", "", "hello there");
        assert_eq!(content, "Title: Rust\n\nTranscript: hello there");

        let content = Language::Zh.single_context("標題", "說明", "");
        assert_eq!(content, "標題：標題\n\n描述：說明\n\n");
    }

    #[test]
    fn test_chunk_context_only_first_has_title() {
        let first = Language::En.chunk_context("body", 0, 3, "T", "D");
        assert_eq!(first, "Title: T\n\nDescription: D\n\nVideo content segment 1/3:\nbody");

        let second = Language::En.chunk_context("body", 1, 3, "T", "D");
        assert_eq!(second, "Video content segment 2/3:\nbody");

        let zh = Language::Zh.chunk_context("內容", 2, 3, "T", "D");
        assert_eq!(zh, "影片內容片段 3/3：\n內容");
    }

    #[test]
    fn test_prompts_embed_content() {
        for lang in [Language::En, Language::Zh] {
            assert!(lang.chunk_prompt("CHUNK-BODY").contains("CHUNK-BODY"));
            assert!(lang.single_prompt("SINGLE-BODY").contains("SINGLE-BODY"));
            assert!(lang.final_prompt("COMBINED").contains("COMBINED"));
            assert!(!lang.system_message().is_empty());
        }
        assert!(Language::En.final_prompt("x").contains("deduplicate"));
    }

    #[test]
    fn test_rate_limited_message() {
        let msg = Language::En.rate_limited_message(42, 3, 3);
        assert!(msg.contains("42 seconds"));
        assert!(msg.contains("3/3"));

        let msg = Language::Zh.rate_limited_message(7, 3, 3);
        assert!(msg.contains("7 秒"));
    }

    #[test]
    fn test_method_not_allowed_message() {
        assert_eq!(Language::Zh.method_not_allowed_message(), "方法不允許");
        assert_eq!(Language::En.method_not_allowed_message(), "Method not allowed");
    }
}
