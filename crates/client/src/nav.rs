//! Sidebar active-link highlighting

use crate::page::Page;

/// Mark every `.list-group-item` whose `href` equals the current path.
///
/// Exact string comparison; links without `href` never match. Returns the
/// number of links marked.
pub fn highlight_active_links(page: &dyn Page) -> usize {
    let current = page.current_path();
    let mut marked = 0;

    for (index, href) in page.nav_links().iter().enumerate() {
        if href.as_deref() == Some(current.as_str()) {
            page.mark_nav_active(index);
            marked += 1;
        }
    }

    tracing::debug!(path = %current, marked, "Highlighted nav links");
    marked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingPage;

    fn sidebar(path: &str) -> RecordingPage {
        RecordingPage::new()
            .with_path(path)
            .with_nav_link(Some("/dashboard"))
            .with_nav_link(Some("/drafts"))
            .with_nav_link(Some("/dashboard/"))
            .with_nav_link(None)
    }

    #[test]
    fn test_only_exact_match_is_active() {
        let page = sidebar("/dashboard");

        assert_eq!(highlight_active_links(&page), 1);
        assert_eq!(page.active_nav_links(), vec![0]);
    }

    #[test]
    fn test_idempotent() {
        let page = sidebar("/drafts");

        highlight_active_links(&page);
        highlight_active_links(&page);

        assert_eq!(page.active_nav_links(), vec![1]);
    }

    #[test]
    fn test_no_match_marks_nothing() {
        let page = sidebar("/categories");

        assert_eq!(highlight_active_links(&page), 0);
        assert!(page.active_nav_links().is_empty());
    }
}
