use chrono::{DateTime, Utc};

use crate::models::{ForumPost, PostCategory, PostSummary, Reaction};

/// Maximum characters of post content shown on the board
pub const EXCERPT_CHARS: usize = 200;

/// Which board the forum is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(PostCategory),
}

impl CategoryFilter {
    /// Parse the `category` query value; absent or `all` means every board
    pub fn parse(value: Option<&str>) -> Result<Self, String> {
        match value.map(str::trim) {
            None | Some("") | Some("all") => Ok(CategoryFilter::All),
            Some(other) => other.parse().map(CategoryFilter::Only),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Posts",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    fn accepts(&self, category: PostCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

/// Keep posts in the selected board whose title or content contains the search term
///
/// The term is trimmed and compared case-insensitively; a blank term matches
/// every post. Input order is preserved.
pub fn filter_posts(posts: Vec<ForumPost>, filter: CategoryFilter, search: &str) -> Vec<ForumPost> {
    let term = search.trim().to_lowercase();

    posts
        .into_iter()
        .filter(|post| filter.accepts(post.category))
        .filter(|post| {
            term.is_empty()
                || post.title.to_lowercase().contains(&term)
                || post.content.to_lowercase().contains(&term)
        })
        .collect()
}

/// Reaction a user ends up with after pressing `action`
///
/// Pressing the active reaction clears it; pressing the other one switches.
#[inline]
pub fn next_reaction(current: Option<Reaction>, action: Reaction) -> Option<Reaction> {
    if current == Some(action) {
        None
    } else {
        Some(action)
    }
}

/// Uppercase first letters of each word in a name
pub fn author_initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// First [`EXCERPT_CHARS`] characters of the content, with `...` when cut
pub fn excerpt(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();

    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

/// Human-readable age of a post, e.g. "3 days ago"
///
/// A unit is used once the elapsed time exceeds one of it; anything shorter
/// than a minute and a bit is reported in seconds.
pub fn time_ago(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const UNITS: [(f64, &str); 5] = [
        (31_536_000.0, "years"),
        (2_592_000.0, "months"),
        (86_400.0, "days"),
        (3_600.0, "hours"),
        (60.0, "minutes"),
    ];

    let seconds = (now - created_at).num_seconds() as f64;

    for (unit_secs, label) in UNITS {
        let interval = seconds / unit_secs;
        if interval > 1.0 {
            return format!("{} {} ago", interval.floor() as i64, label);
        }
    }

    format!("{} seconds ago", seconds.floor() as i64)
}

/// Build the board view of a post
pub fn summarize(post: ForumPost, now: DateTime<Utc>) -> PostSummary {
    PostSummary {
        id: post.id,
        category: post.category.as_str().to_string(),
        category_label: post.category.label().to_string(),
        excerpt: excerpt(&post.content),
        author_initials: author_initials(&post.author_name),
        time_ago: time_ago(post.created_at, now),
        title: post.title,
        author_name: post.author_name,
        agrees: post.agrees,
        disagrees: post.disagrees,
        viewer_reaction: post.viewer_reaction,
    }
}
