//! Glob-style URL path matching.
//!
//! # Pattern Syntax
//!
//! - `?` matches exactly one character
//! - `*` matches zero or more characters within a path segment
//! - `**` matches zero or more path segments
//!
//! # Examples
//!
//! ```rust
//! use authgate_core::http::security::path_pattern::PathPattern;
//!
//! let pattern = PathPattern::new("/admin/**");
//! assert!(pattern.matches("/admin/reports"));
//! assert!(pattern.matches("/admin/users/42/audit"));
//! assert!(!pattern.matches("/db/export"));
//! ```

/// A single glob-style path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pattern: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    /// Literal text (no wildcards)
    Literal(String),
    /// Single segment wildcard (*)
    AnySegment,
    /// Multi-segment wildcard (**)
    AnyDepth,
    /// Segment containing embedded wildcards (*, ?)
    Fragment(String),
}

impl PathPattern {
    /// Parses a pattern. Leading and trailing slashes are normalized away,
    /// so `/admin/reports/` and `/admin/reports` are the same pattern.
    pub fn new(pattern: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            segments: Self::parse(pattern),
        }
    }

    /// The original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn parse(pattern: &str) -> Vec<Segment> {
        let trimmed = pattern.trim_start_matches('/');
        if trimmed.is_empty() {
            return vec![Segment::Literal(String::new())];
        }

        trimmed
            .split('/')
            .filter(|part| !part.is_empty())
            .map(|part| {
                if part == "**" {
                    Segment::AnyDepth
                } else if part == "*" {
                    Segment::AnySegment
                } else if part.contains('*') || part.contains('?') {
                    Segment::Fragment(part.to_string())
                } else {
                    Segment::Literal(part.to_string())
                }
            })
            .collect()
    }

    /// Checks whether the given request path matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        let path_segments: Vec<&str> = path
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match_segments(&self.segments, &path_segments, 0, 0)
    }
}

fn match_segments(
    pattern: &[Segment],
    path: &[&str],
    pattern_idx: usize,
    path_idx: usize,
) -> bool {
    if pattern_idx >= pattern.len() && path_idx >= path.len() {
        return true;
    }
    if pattern_idx >= pattern.len() {
        return false;
    }

    match &pattern[pattern_idx] {
        Segment::AnyDepth => {
            // ** may swallow zero or more path segments
            for skip in 0..=(path.len() - path_idx) {
                if match_segments(pattern, path, pattern_idx + 1, path_idx + skip) {
                    return true;
                }
            }
            false
        }
        Segment::AnySegment => {
            path_idx < path.len()
                && match_segments(pattern, path, pattern_idx + 1, path_idx + 1)
        }
        Segment::Fragment(fragment) => {
            path_idx < path.len()
                && match_fragment(
                    &fragment.chars().collect::<Vec<_>>(),
                    &path[path_idx].chars().collect::<Vec<_>>(),
                    0,
                    0,
                )
                && match_segments(pattern, path, pattern_idx + 1, path_idx + 1)
        }
        Segment::Literal(literal) => {
            if path_idx >= path.len() {
                return literal.is_empty() && pattern_idx + 1 >= pattern.len();
            }
            literal == path[path_idx]
                && match_segments(pattern, path, pattern_idx + 1, path_idx + 1)
        }
    }
}

fn match_fragment(pattern: &[char], text: &[char], p_idx: usize, t_idx: usize) -> bool {
    if p_idx >= pattern.len() && t_idx >= text.len() {
        return true;
    }
    if p_idx >= pattern.len() {
        return false;
    }

    match pattern[p_idx] {
        '*' => (0..=(text.len() - t_idx))
            .any(|skip| match_fragment(pattern, text, p_idx + 1, t_idx + skip)),
        '?' => t_idx < text.len() && match_fragment(pattern, text, p_idx + 1, t_idx + 1),
        c => t_idx < text.len() && c == text[t_idx] && match_fragment(pattern, text, p_idx + 1, t_idx + 1),
    }
}

/// An ordered collection of patterns; a path matches if any pattern matches.
///
/// This is the shape of the authentication whitelist: assembled once at
/// startup, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<PathPattern>,
}

impl PatternSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Adds a pattern.
    #[allow(clippy::should_implement_trait)]
    pub fn add(mut self, pattern: &str) -> Self {
        self.patterns.push(PathPattern::new(pattern));
        self
    }

    /// Adds multiple patterns.
    pub fn add_all(mut self, patterns: &[&str]) -> Self {
        for pattern in patterns {
            self.patterns.push(PathPattern::new(pattern));
        }
        self
    }

    /// Checks whether any pattern matches the given path.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
