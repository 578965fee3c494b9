use once_cell::sync::Lazy;
use regex::Regex;

static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<(https?://[^|>\n]+)\|([^>\n]+)>").expect("link pattern"));
static USER_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<@([A-Z0-9]+)>").expect("mention pattern"));
static CHANNEL_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<#[A-Z0-9]+\|([^>\n]+)>").expect("channel pattern"));

/// Rewrites Slack mrkdwn references into plain Markdown:
/// `<url|label>` to `[label](url)`, `<@U1>` to `@U1`, `<#C1|general>` to `#general`.
/// References never span a line break. Code blocks, line endings and
/// everything else pass through untouched.
pub fn slack_to_markdown(text: &str) -> String {
    let text = LINK.replace_all(text, "[$2]($1)");
    let text = USER_MENTION.replace_all(&text, "@$1");
    CHANNEL_MENTION.replace_all(&text, "#$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_commit_links() {
        let text = "<https://github.com/junho85/garden5/commit/abc123|`abc123`> - fix bucketing";
        assert_eq!(
            slack_to_markdown(text),
            "[`abc123`](https://github.com/junho85/garden5/commit/abc123) - fix bucketing"
        );
    }

    #[test]
    fn converts_mentions_and_channels() {
        assert_eq!(
            slack_to_markdown("ping <@U12345> in <#C0001|gardening-for-100days>"),
            "ping @U12345 in #gardening-for-100days"
        );
    }

    #[test]
    fn keeps_line_endings() {
        assert_eq!(
            slack_to_markdown("fix <@U1>\r\nsecond line\n"),
            "fix @U1\r\nsecond line\n"
        );
    }

    #[test]
    fn references_do_not_cross_lines() {
        let text = "<https://example.com\n|label>";
        assert_eq!(slack_to_markdown(text), text);
    }

    #[test]
    fn leaves_plain_text_and_bare_links_alone() {
        let text = "```let x = 1;```\n<https://example.com>";
        assert_eq!(slack_to_markdown(text), text);
    }
}
