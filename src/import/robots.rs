use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Rule {
    Allow(String),
    Disallow(String),
}

impl Rule {
    fn pattern(&self) -> &str {
        match self {
            Rule::Allow(p) | Rule::Disallow(p) => p,
        }
    }
}

/// The parts of a `robots.txt` that apply to every crawler (`User-agent: *`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsPolicy {
    rules: Vec<Rule>,
    crawl_delay: Option<u64>,
}

impl RobotsPolicy {
    /// A policy that allows everything and asks for no delay, used when a
    /// site has no `robots.txt`.
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Self {
        let mut policy = RobotsPolicy::default();
        let mut in_wildcard_group = false;
        let mut reading_agents = false;

        for line in text.lines() {
            let line = line.split('#').next().unwrap_or_default().trim();
            let Some((field, value)) = line.split_once(':') else {
                continue;
            };
            let value = value.trim();

            match field.trim().to_ascii_lowercase().as_str() {
                "user-agent" => {
                    // Consecutive user-agent lines share one group
                    if !reading_agents {
                        in_wildcard_group = false;
                    }
                    reading_agents = true;
                    in_wildcard_group |= value == "*";
                }
                field => {
                    reading_agents = false;
                    if !in_wildcard_group {
                        continue;
                    }
                    match field {
                        "allow" if !value.is_empty() => {
                            policy.rules.push(Rule::Allow(value.to_string()))
                        }
                        // An empty Disallow allows everything
                        "disallow" if !value.is_empty() => {
                            policy.rules.push(Rule::Disallow(value.to_string()))
                        }
                        "crawl-delay" => match value.parse::<f64>() {
                            Ok(delay) if delay.is_finite() && delay >= 0.0 => {
                                policy.crawl_delay = Some(delay.ceil() as u64)
                            }
                            _ => debug!("Ignoring crawl-delay '{}'", value),
                        },
                        _ => {}
                    }
                }
            }
        }

        policy
    }

    /// Whether `path` may be fetched. The longest matching rule wins, and
    /// Allow wins a tie.
    pub fn can_fetch(&self, path: &str) -> bool {
        let path = if path.is_empty() { "/" } else { path };

        self.rules
            .iter()
            .filter(|rule| matches_pattern(rule.pattern(), path))
            .max_by_key(|rule| (rule.pattern().len(), matches!(rule, Rule::Allow(_))))
            .map_or(true, |rule| matches!(rule, Rule::Allow(_)))
    }

    /// Seconds to wait between requests, if the site asks for it.
    pub fn crawl_delay(&self) -> Option<u64> {
        self.crawl_delay
    }
}

/// Prefix match supporting `*` wildcards and a trailing `$` anchor.
fn matches_pattern(pattern: &str, path: &str) -> bool {
    let (pattern, anchored) = match pattern.strip_suffix('$') {
        Some(pattern) => (pattern, true),
        None => (pattern, false),
    };

    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return true;
    };
    let Some(mut rest) = path.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    for (index, part) in parts.iter().enumerate() {
        let is_last = index + 1 == parts.len();
        if anchored && is_last {
            return rest.ends_with(part);
        }
        match rest.find(part) {
            Some(at) => rest = &rest[at + part.len()..],
            None => return false,
        }
    }

    !anchored || rest.is_empty()
}
