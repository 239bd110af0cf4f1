/// Characters accepted as sentence ends when looking for a break point
const SENTENCE_TERMINATORS: [char; 2] = ['。', '.'];

/// Chunking parameters (character counts, not bytes)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkOptions {
    /// Window size per chunk
    pub max_size: usize,

    /// Characters carried over from the end of one chunk into the next
    pub overlap: usize,

    /// A sentence break is only taken if it lies past this fraction of the window
    pub min_break_ratio: f64,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_size: 2000,
            overlap: 200,
            min_break_ratio: 0.5,
        }
    }
}

impl ChunkOptions {
    pub fn new(max_size: usize, overlap: usize) -> Self {
        Self {
            max_size,
            overlap,
            ..Self::default()
        }
    }
}

/// Text chunk
#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// Position in the chunk sequence (0-based)
    pub index: usize,

    /// Number of chunks produced for the source text
    pub total: usize,

    /// Start char offset in original text
    pub start: usize,

    /// End char offset in original text (exclusive)
    pub end: usize,
}

/// Split text into overlapping, sentence-aware chunks
///
/// Text no longer than `max_size` comes back as a single chunk. Longer text
/// is cut into windows of `max_size` characters; when a `。` or `.` sits in
/// the back part of a window (at or before the window end) the cut moves to
/// just after it, which can make a chunk one character longer than
/// `max_size`. Each following window starts `overlap` characters before the
/// previous cut.
pub fn split_text(text: &str, options: &ChunkOptions) -> Vec<TextChunk> {
    let chars: Vec<char> = text.chars().collect();
    let text_len = chars.len();

    if text_len <= options.max_size {
        return vec![TextChunk {
            text: text.to_string(),
            index: 0,
            total: 1,
            start: 0,
            end: text_len,
        }];
    }

    let mut spans = Vec::new();
    let mut start = 0;

    while start < text_len {
        let mut end = start + options.max_size;

        if end < text_len {
            let threshold = start as f64 + options.max_size as f64 * options.min_break_ratio;
            if let Some(pos) = find_break_point(&chars, start, end) {
                if pos as f64 > threshold {
                    end = pos + 1;
                }
            }
        }

        spans.push((start, end.min(text_len)));

        // Next window re-reads the tail of this one
        let next = end.saturating_sub(options.overlap);
        start = if next > start { next } else { end };
    }

    let total = spans.len();
    spans
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| TextChunk {
            text: chars[start..end].iter().collect(),
            index,
            total,
            start,
            end,
        })
        .collect()
}

/// Split text with default break ratio, returning only the chunk texts
pub fn split(text: &str, max_size: usize, overlap: usize) -> Vec<String> {
    split_text(text, &ChunkOptions::new(max_size, overlap))
        .into_iter()
        .map(|chunk| chunk.text)
        .collect()
}

/// Last sentence terminator in `chars[start..=end]`
fn find_break_point(chars: &[char], start: usize, end: usize) -> Option<usize> {
    (start..=end)
        .rev()
        .find(|&i| SENTENCE_TERMINATORS.contains(&chars[i]))
}
