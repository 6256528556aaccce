//! Robots.txt parser implementation
//!
//! Only literal path prefixes from wildcard (`User-agent: *`) groups are
//! collected. Wildcards inside paths, `$` anchors, crawl-delay and sitemap
//! directives are not interpreted.

use super::RobotsVerdict;

/// Allow and disallow prefixes that apply to every crawler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRuleSet {
    /// `Allow:` values in file order (empty values included)
    pub allow: Vec<String>,
    /// Non-empty `Disallow:` values in file order
    pub disallow: Vec<String>,
}

impl RobotsRuleSet {
    /// Parses robots.txt content
    ///
    /// # Parsing Rules
    ///
    /// - Lines are trimmed; blank lines and `#` comment lines are skipped
    /// - A `User-agent:` line starts a group that applies iff its value is `*`
    /// - Inside an applicable group, `Disallow:` values that are non-empty
    ///   go to `disallow`, and `Allow:` values go to `allow`
    /// - Everything else, including lines without a `:`, is ignored
    ///
    /// Directive names are matched case-insensitively.
    pub fn parse(content: &str) -> Self {
        let mut rules = Self::default();
        let mut group_applies = false;

        for line in content.lines() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (key, value) = match trimmed.split_once(':') {
                Some((key, value)) => (key.trim().to_lowercase(), value.trim()),
                None => continue,
            };

            match key.as_str() {
                "user-agent" => group_applies = value == "*",
                "disallow" if group_applies && !value.is_empty() => {
                    rules.disallow.push(value.to_string());
                }
                "allow" if group_applies => rules.allow.push(value.to_string()),
                _ => {}
            }
        }

        rules
    }

    /// Evaluates a decoded request path
    ///
    /// The longest matching prefix is found independently for each side,
    /// with no match counting as length 0. The path is allowed when the best
    /// allow match is at least as long as the best disallow match, so a path
    /// matched by nothing is allowed and equal-length matches favor allow.
    ///
    /// # Examples
    ///
    /// ```
    /// use seo_checker::robots::{RobotsRuleSet, RobotsVerdict};
    ///
    /// let rules = RobotsRuleSet::parse("User-agent: *\nDisallow: /admin\nAllow: /admin/public");
    /// assert_eq!(rules.evaluate("/admin/public/page"), RobotsVerdict::Allowed);
    /// assert_eq!(rules.evaluate("/admin/secret"), RobotsVerdict::Disallowed);
    /// ```
    pub fn evaluate(&self, path: &str) -> RobotsVerdict {
        let path = if path.is_empty() { "/" } else { path };

        let best_allow = longest_prefix(&self.allow, path);
        let best_disallow = longest_prefix(&self.disallow, path);

        if best_allow >= best_disallow {
            RobotsVerdict::Allowed
        } else {
            RobotsVerdict::Disallowed
        }
    }

    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.disallow.is_empty()
    }
}

/// Length of the longest rule that is a prefix of `path`, or 0
fn longest_prefix(rules: &[String], path: &str) -> usize {
    rules
        .iter()
        .filter(|rule| path.starts_with(rule.as_str()))
        .map(|rule| rule.len())
        .max()
        .unwrap_or(0)
}
