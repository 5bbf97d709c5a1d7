/// Renders the stories as a numbered plain-text block.
///
/// Each story is a `<rank>: <title>` line followed by a tab-indented `(<url>)` line, with a
/// blank line between stories and no trailing newline. Missing titles and urls render as
/// empty text.
pub(crate) fn create_digest(stories: &[crate::StoryRecord]) -> String {
    let mut digest = String::new();

    for (i, story) in stories.iter().enumerate() {
        if i > 0 {
            digest.push_str("\n\n");
        }
        digest.push_str(&format!(
            "{}: {}\n\t({})",
            story.rank,
            story.title.as_deref().unwrap_or_default(),
            story.url.as_deref().unwrap_or_default()
        ));
    }

    digest
}
