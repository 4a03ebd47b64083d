/// Attribute that marks the element receiving the styles buffer.
pub const STYLE_MARKER: &str = r#"id="custom-css""#;
/// Attribute that marks the element receiving the script buffer.
pub const SCRIPT_MARKER: &str = r#"id="custom-js""#;
/// Opening tag the styles buffer is spliced after.
pub const STYLE_TAG: &str = r#"<style id="custom-css">"#;
/// Opening tag the script buffer is spliced after.
pub const SCRIPT_TAG: &str = r#"<script id="custom-js">"#;

/// How [`compose`] merges the buffers for a given markup text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionMode {
    /// Markup is wrapped in a generated skeleton.
    Implicit,
    /// Styles and script are spliced into the markup's marker elements.
    Explicit,
}

impl CompositionMode {
    /// Short label for the status bar.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Implicit => "skeleton",
            Self::Explicit => "markers",
        }
    }
}

/// Decide the composition mode for `markup`.
///
/// Explicit mode needs both markers. Markup carrying only one of them still
/// gets the generated skeleton.
pub fn composition_mode(markup: &str) -> CompositionMode {
    if markup.contains(STYLE_MARKER) && markup.contains(SCRIPT_MARKER) {
        CompositionMode::Explicit
    } else {
        CompositionMode::Implicit
    }
}

/// Compose markup, styles and script into a single HTML document.
///
/// Pure and deterministic: the same three inputs always yield the same output.
pub fn compose(markup: &str, styles: &str, script: &str) -> String {
    let _scope = crate::perf::scope("document.compose");
    match composition_mode(markup) {
        CompositionMode::Implicit => skeleton(markup, styles, script),
        CompositionMode::Explicit => splice_into_markers(markup, styles, script),
    }
}

fn skeleton(markup: &str, styles: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Preview</title>
    <style>
{styles}
    </style>
</head>
<body>
{markup}
    <script>
{script}
    </script>
</body>
</html>"#
    )
}

// Insertion points are located in the original markup, so injected text is
// never searched for the other tag.
fn splice_into_markers(markup: &str, styles: &str, script: &str) -> String {
    let mut splices: Vec<(usize, &str)> = [(STYLE_TAG, styles), (SCRIPT_TAG, script)]
        .into_iter()
        .filter_map(|(tag, text)| markup.find(tag).map(|at| (at + tag.len(), text)))
        .collect();
    splices.sort_by_key(|(at, _)| *at);

    let mut out = String::with_capacity(markup.len() + styles.len() + script.len() + 2);
    let mut copied = 0;
    for (at, text) in splices {
        out.push_str(&markup[copied..at]);
        out.push('\n');
        out.push_str(text);
        copied = at;
    }
    out.push_str(&markup[copied..]);
    out
}
