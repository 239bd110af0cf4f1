use serde::{Deserialize, Serialize};

/// Characters inspected by [`Language::detect`]
const DETECT_WINDOW: usize = 500;

/// Coarse language tag used to pick prompts and display strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

impl Language {
    /// Guess the language of `text`
    ///
    /// Counts CJK unified ideographs against ASCII letters in the first
    /// 500 characters. Chinese wins only with a strict majority, so ties
    /// (including text with neither) resolve to English. Empty text yields
    /// the default, Chinese.
    pub fn detect(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let (cjk, latin) = text
            .chars()
            .take(DETECT_WINDOW)
            .fold((0usize, 0usize), |(cjk, latin), c| {
                if is_cjk_ideograph(c) {
                    (cjk + 1, latin)
                } else if c.is_ascii_alphabetic() {
                    (cjk, latin + 1)
                } else {
                    (cjk, latin)
                }
            });

        if cjk > latin {
            Self::Zh
        } else {
            Self::En
        }
    }

    /// Like [`Language::detect`], treating absent text as empty
    pub fn detect_opt(text: Option<&str>) -> Self {
        text.map(Self::detect).unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Zh => "zh",
            Self::En => "en",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}
