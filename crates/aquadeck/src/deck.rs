use std::path::{Path, PathBuf};

/// Slide content read from a markdown file. The controller only cares about
/// how many there are; the painter shows heading and body.
#[derive(Debug, Clone)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<SlideContent>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideContent {
    pub heading: Option<String>,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no slides found in {}", path.display())]
    Empty { path: PathBuf },
}

impl Deck {
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let content = std::fs::read_to_string(path).map_err(|source| DeckError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let slides = parse(&content);
        let title = slides
            .iter()
            .find_map(|s| s.heading.clone())
            .unwrap_or_else(|| {
                path.file_stem()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string()
            });
        let deck = Self { title, slides };
        if deck.is_empty() {
            return Err(DeckError::Empty {
                path: path.to_path_buf(),
            });
        }

        log::debug!("loaded {} slides from {}", deck.len(), path.display());
        Ok(deck)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Split markdown into slides.
///
/// A line consisting of `---` separates slides, as does a `# ` heading when
/// the current slide already has content. Fenced code blocks are opaque.
/// Blank slides are dropped.
pub fn parse(content: &str) -> Vec<SlideContent> {
    let content = content.replace("\r\n", "\n");
    let mut chunks: Vec<Vec<&str>> = vec![Vec::new()];
    let mut in_fence = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        }
        if !in_fence {
            if trimmed == "---" {
                chunks.push(Vec::new());
                continue;
            }
            let has_content = chunks
                .last()
                .is_some_and(|c| c.iter().any(|l| !l.trim().is_empty()));
            if trimmed.starts_with("# ") && has_content {
                chunks.push(Vec::new());
            }
        }
        if let Some(chunk) = chunks.last_mut() {
            chunk.push(line);
        }
    }

    chunks
        .into_iter()
        .filter_map(|lines| slide_from_lines(&lines))
        .collect()
}

fn slide_from_lines(lines: &[&str]) -> Option<SlideContent> {
    let mut heading = None;
    let mut body: Vec<&str> = Vec::new();

    for line in lines {
        let trimmed = line.trim_start();
        if heading.is_none() && body.iter().all(|l| l.trim().is_empty()) {
            let level = trimmed.chars().take_while(|&c| c == '#').count();
            if (1..=6).contains(&level) && trimmed[level..].starts_with(' ') {
                heading = Some(trimmed[level..].trim().to_string());
                body.clear();
                continue;
            }
        }
        body.push(line);
    }

    let body = body.join("\n").trim().to_string();
    if heading.is_none() && body.is_empty() {
        return None;
    }
    Some(SlideContent { heading, body })
}
