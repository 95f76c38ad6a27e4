//! Path template compilation.
//!
//! A template is compiled into an anchored regular expression plus the names of the slugs it
//! captures. Supported segment forms:
//!
//! | segment | matches |
//! |---|---|
//! | `literal` | the literal text (`.`, `^` and `$` are escaped, other regex syntax is kept) |
//! | `:name` / `{name}` | one path segment, captured as `name` |
//! | `:name(regex)` / `{name:regex}` | `regex`, captured as `name` |
//! | `seg*` | `seg` followed by the rest of one segment |
//! | `seg**` | `seg` followed by one or more segments |
//!
//! A trailing `?query` and/or `#fragment` on the matched path is ignored.

use crate::error::PatternError;
use regex::Regex;

/// The capture body of a slug without a custom pattern: one segment, up to a query or fragment
const DEFAULT_SLUG_PATTERN: &str = "[^/?#]+";

/// The groups every pattern ends with; they are never slugs
const QUERY_AND_FRAGMENT: &str = "([?].*)?([#].*)?$";
const TRAILING_GROUPS: usize = 2;

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    regex: Regex,
    slug_names: Vec<String>,
    slug_positions: Vec<usize>,
}

impl PathPattern {
    /// Compiles `template`, which must start with `/`.
    ///
    /// # Example
    /// ```
    /// use micro_router::PathPattern;
    ///
    /// let pattern = PathPattern::compile("/users/:id([0-9]+)").unwrap();
    /// assert_eq!(pattern.captures("/users/42?full=1"), Some(vec!["42".to_string()]));
    /// assert_eq!(pattern.captures("/users/zava"), None);
    /// ```
    pub fn compile(template: &str) -> Result<PathPattern, PatternError> {
        let Some(rest) = template.strip_prefix('/') else {
            return Err(PatternError::missing_leading_slash(template));
        };

        let mut slug_names = vec![];
        let mut slug_positions = vec![];

        // the root template is a single empty segment: "^/([?].*)?([#].*)?$"
        let segments = rest
            .split('/')
            .enumerate()
            .map(|(position, segment)| match parse_slug(segment, template)? {
                Some(Slug { name, pattern }) => {
                    slug_names.push(name.to_owned());
                    slug_positions.push(position);
                    Ok(format!("({pattern})"))
                }
                None => literal_segment(segment, template),
            })
            .collect::<Result<Vec<_>, PatternError>>()?;
        let source = format!("^/{}{QUERY_AND_FRAGMENT}", segments.join("/"));

        let regex = Regex::new(&source).map_err(|e| PatternError::invalid_regex(template, e))?;

        Ok(PathPattern { raw: template.to_owned(), regex, slug_names, slug_positions })
    }

    /// The template this pattern was compiled from
    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[inline]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Slug names, in template order
    #[inline]
    pub fn slug_names(&self) -> &[String] {
        &self.slug_names
    }

    /// Zero based segment index of every slug, aligned with [`slug_names`](Self::slug_names)
    #[inline]
    pub fn slug_positions(&self) -> &[usize] {
        &self.slug_positions
    }

    #[inline]
    pub fn has_slugs(&self) -> bool {
        !self.slug_names.is_empty()
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches the whole of `path` and returns the captured slug values, aligned with
    /// [`slug_names`](Self::slug_names).
    ///
    /// The query and fragment groups are dropped. A group that did not take part in the match
    /// yields an empty value.
    pub fn captures(&self, path: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(path)?;
        let slug_groups = captures.len().saturating_sub(1 + TRAILING_GROUPS);

        let values = (1..=slug_groups)
            .map(|index| captures.get(index).map_or_else(String::new, |m| m.as_str().to_owned()))
            .collect();
        Some(values)
    }
}

struct Slug<'a> {
    name: &'a str,
    pattern: &'a str,
}

/// Parses `:name`, `:name(pattern)`, `{name}` and `{name:pattern}`, `None` for any other segment
fn parse_slug<'a>(segment: &'a str, template: &str) -> Result<Option<Slug<'a>>, PatternError> {
    let slug = if let Some(rest) = segment.strip_prefix(':') {
        match rest.find('(') {
            Some(open) if rest.ends_with(')') => Slug { name: &rest[..open], pattern: &rest[open + 1..rest.len() - 1] },
            _ => Slug { name: rest, pattern: DEFAULT_SLUG_PATTERN },
        }
    } else if segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}') {
        let inner = &segment[1..segment.len() - 1];
        match inner.split_once(':') {
            Some((name, pattern)) if !pattern.is_empty() => Slug { name, pattern },
            Some((name, _)) => Slug { name, pattern: DEFAULT_SLUG_PATTERN },
            None => Slug { name: inner, pattern: DEFAULT_SLUG_PATTERN },
        }
    } else {
        return Ok(None);
    };

    if !is_legal_slug_name(slug.name) {
        return Err(PatternError::illegal_slug_name(slug.name, template));
    }
    Ok(Some(slug))
}

/// A name is legal when it has at least one character of `[0-9A-Za-z-]`
fn is_legal_slug_name(name: &str) -> bool {
    name.chars().any(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Escapes `.`, `^` and `$`, then turns the first run of `*` into a wildcard
fn literal_segment(segment: &str, template: &str) -> Result<String, PatternError> {
    let mut escaped = String::with_capacity(segment.len() + 8);
    for c in segment.chars() {
        if matches!(c, '.' | '^' | '$') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    let Some(start) = escaped.find('*') else {
        return Ok(escaped);
    };
    let run = escaped[start..].chars().take_while(|&c| c == '*').count();
    let wildcard = match run {
        1 => "[^/]+",
        2 => ".*[^/]+",
        _ => return Err(PatternError::unsupported_wildcard(template, run)),
    };

    Ok(format!("{}{}{}", &escaped[..start], wildcard, &escaped[start + run..]))
}

#[cfg(test)]
mod tests {
    use super::PathPattern;
    use crate::PatternError;

    fn compile(template: &str) -> PathPattern {
        PathPattern::compile(template).unwrap()
    }

    fn slugs(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|v| (*v).to_owned()).collect())
    }

    #[test]
    fn test_missing_leading_slash() {
        for template in ["", "a", "a/b", ":id", "*"] {
            assert!(
                matches!(PathPattern::compile(template), Err(PatternError::MissingLeadingSlash { .. })),
                "{template} should be rejected"
            );
        }
    }

    #[test]
    fn test_root() {
        let pattern = compile("/");
        assert!(pattern.is_match("/"));
        assert!(pattern.is_match("/?x=1"));
        assert!(pattern.is_match("/#frag"));
        assert!(!pattern.is_match("/a"));
        assert!(!pattern.is_match("//"));
        assert!(!pattern.is_match(""));
        assert_eq!(pattern.captures("/"), slugs(&[]));
    }

    #[test]
    fn test_literal() {
        let pattern = compile("/a/b");
        assert_eq!(pattern.regex().as_str(), "^/a/b([?].*)?([#].*)?$");
        assert!(pattern.is_match("/a/b"));
        assert!(pattern.is_match("/a/b?x=1"));
        assert!(pattern.is_match("/a/b#top"));
        assert!(pattern.is_match("/a/b?x=1#top"));
        assert!(!pattern.is_match("/a/b/c"));
        assert!(!pattern.is_match("/a"));
        assert!(!pattern.is_match("/x/a/b"));
        assert!(!pattern.has_slugs());
    }

    #[test]
    fn test_literal_escapes_dot() {
        let pattern = compile("/index.html");
        assert!(pattern.is_match("/index.html"));
        assert!(!pattern.is_match("/indexxhtml"));
    }

    #[test]
    fn test_colon_slug() {
        let pattern = compile("/a/:id");
        assert_eq!(pattern.slug_names(), ["id"]);
        assert_eq!(pattern.slug_positions(), [1]);

        assert_eq!(pattern.captures("/a/123"), slugs(&["123"]));
        assert_eq!(pattern.captures("/a/123?x=1"), slugs(&["123"]));
        assert_eq!(pattern.captures("/a/123#frag"), slugs(&["123"]));
        assert_eq!(pattern.captures("/a"), None);
        assert_eq!(pattern.captures("/a/"), None);
        assert_eq!(pattern.captures("/a/123/456"), None);
    }

    #[test]
    fn test_colon_slug_with_custom_pattern() {
        let pattern = compile("/a/:id([0-9]+)");
        assert_eq!(pattern.slug_names(), ["id"]);
        assert_eq!(pattern.captures("/a/42"), slugs(&["42"]));
        assert_eq!(pattern.captures("/a/x"), None);
    }

    #[test]
    fn test_brace_slug_behaves_like_colon_slug() {
        let colon = compile("/a/:id([0-9]+)");
        let brace = compile("/a/{id:[0-9]+}");

        assert_eq!(brace.slug_names(), colon.slug_names());
        for path in ["/a/42", "/a/x", "/a/42?x=1", "/a", "/a/4/2"] {
            assert_eq!(brace.captures(path), colon.captures(path), "{path}");
        }
    }

    #[test]
    fn test_brace_slug() {
        let pattern = compile("/{id}");
        assert_eq!(pattern.captures("/42"), slugs(&["42"]));

        let pattern = compile("/{id:}");
        assert_eq!(pattern.captures("/42"), slugs(&["42"]));

        let pattern = compile("/custom/{id:[0-9a-z]{4}}");
        assert_eq!(pattern.captures("/custom/ab12"), slugs(&["ab12"]));
        assert_eq!(pattern.captures("/custom/ab123"), None);
    }

    #[test]
    fn test_several_slugs() {
        let pattern = compile("/users/:user/posts/{post:[0-9]+}");
        assert_eq!(pattern.slug_names(), ["user", "post"]);
        assert_eq!(pattern.slug_positions(), [1, 3]);
        assert_eq!(pattern.captures("/users/zava/posts/7"), slugs(&["zava", "7"]));
    }

    #[test]
    fn test_illegal_slug_names() {
        for template in ["/:", "/{}", "/{:[0-9]+}", "/:([0-9]+)", "/a/:__", "/{_}"] {
            assert!(
                matches!(PathPattern::compile(template), Err(PatternError::IllegalSlugName { .. })),
                "{template} should be rejected"
            );
        }
    }

    #[test]
    fn test_legal_slug_names() {
        for template in ["/:user-id", "/:user_id", "/{0}", "/:a.b"] {
            assert!(PathPattern::compile(template).is_ok(), "{template} should compile");
        }
    }

    #[test]
    fn test_single_segment_wildcard() {
        let pattern = compile("/files/*");
        assert!(pattern.is_match("/files/readme.txt"));
        assert!(!pattern.is_match("/files/sub/readme.txt"));
        assert!(!pattern.is_match("/files/"));

        let pattern = compile("/files/*.js");
        assert!(pattern.is_match("/files/app.js"));
        assert!(!pattern.is_match("/files/app.css"));
    }

    #[test]
    fn test_multi_segment_wildcard() {
        let pattern = compile("/files/**");
        assert!(pattern.is_match("/files/readme.txt"));
        assert!(pattern.is_match("/files/sub/readme.txt"));
        assert!(!pattern.is_match("/files/"));
        assert!(!pattern.has_slugs());
    }

    #[test]
    fn test_unsupported_wildcard() {
        match PathPattern::compile("/files/***") {
            Err(PatternError::UnsupportedWildcard { run, .. }) => assert_eq!(run, 3),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_custom_regex() {
        assert!(matches!(PathPattern::compile("/a/:id([0-9)"), Err(PatternError::InvalidRegex { .. })));
    }

    #[test]
    fn test_nested_group_in_custom_pattern() {
        // the inner group is counted as a slug group, values stay positional
        let pattern = compile("/:kind((a|b)c)");
        assert_eq!(pattern.captures("/ac"), slugs(&["ac", "a"]));
    }
}
