use super::parse_bool_env;
use std::env;

/// Token bucket: `per_second` is the replenish interval in seconds, `burst_size` the bucket depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitRule {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitRule {
    const fn new(per_second: u64, burst_size: u32) -> Self {
        Self {
            per_second,
            burst_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    Auth,
    Read,
    Write,
}

impl RouteGroup {
    fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auth" => Some(Self::Auth),
            "read" | "public" | "public_read" => Some(Self::Read),
            "write" | "protected" => Some(Self::Write),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub auth: RateLimitRule,
    pub read: RateLimitRule,
    pub write: RateLimitRule,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auth: RateLimitRule::new(5, 10),
            read: RateLimitRule::new(1, 60),
            write: RateLimitRule::new(2, 20),
        }
    }
}

impl RateLimitConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self {
            enabled: parse_bool_env("RATE_LIMIT_ENABLED", true),
            ..Self::default()
        };

        if let Ok(raw) = env::var("RATE_LIMIT_CONFIG") {
            match parse_overrides(&raw) {
                Ok(overrides) => {
                    for (group, rule) in overrides {
                        cfg.set(group, rule);
                    }
                }
                Err(err) => tracing::warn!(raw = %raw, "ignoring RATE_LIMIT_CONFIG: {}", err),
            }
        }

        cfg
    }

    pub fn rule(&self, group: RouteGroup) -> RateLimitRule {
        match group {
            RouteGroup::Auth => self.auth,
            RouteGroup::Read => self.read,
            RouteGroup::Write => self.write,
        }
    }

    fn set(&mut self, group: RouteGroup, rule: RateLimitRule) {
        match group {
            RouteGroup::Auth => self.auth = rule,
            RouteGroup::Read => self.read = rule,
            RouteGroup::Write => self.write = rule,
        }
    }
}

/// Accepts either `"per:burst"` (every group) or `"auth=per:burst,read=per:burst,..."`.
fn parse_overrides(raw: &str) -> Result<Vec<(RouteGroup, RateLimitRule)>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("empty value".to_string());
    }

    if !trimmed.contains('=') {
        let rule = parse_rule(trimmed)?;
        return Ok([RouteGroup::Auth, RouteGroup::Read, RouteGroup::Write]
            .into_iter()
            .map(|g| (g, rule))
            .collect());
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let (name, rule) = item
                .split_once('=')
                .ok_or_else(|| format!("invalid item '{item}', expected group=per:burst"))?;
            let group = RouteGroup::parse(name)
                .ok_or_else(|| format!("unknown group '{}'", name.trim()))?;
            Ok((group, parse_rule(rule.trim())?))
        })
        .collect()
}

fn parse_rule(raw: &str) -> Result<RateLimitRule, String> {
    let (per_second, burst) = raw
        .split_once(':')
        .ok_or_else(|| format!("invalid rule '{raw}', expected per:burst"))?;

    let per_second: u64 = per_second
        .trim()
        .parse()
        .map_err(|_| format!("invalid per_second '{}'", per_second.trim()))?;
    let burst_size: u32 = burst
        .trim()
        .parse()
        .map_err(|_| format!("invalid burst_size '{}'", burst.trim()))?;

    if per_second == 0 || burst_size == 0 {
        return Err("per_second and burst_size must be > 0".to_string());
    }

    Ok(RateLimitRule::new(per_second, burst_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_rule_applies_to_every_group() {
        let parsed = parse_overrides("3:9").unwrap();
        assert_eq!(parsed.len(), 3);
        assert!(parsed.iter().all(|(_, r)| *r == RateLimitRule::new(3, 9)));
    }

    #[test]
    fn grouped_rules_with_aliases() {
        let parsed = parse_overrides("auth=1:2, public=3:4 ,protected=5:6").unwrap();
        let mut cfg = RateLimitConfig::default();
        for (g, r) in parsed {
            cfg.set(g, r);
        }
        assert_eq!(cfg.rule(RouteGroup::Auth), RateLimitRule::new(1, 2));
        assert_eq!(cfg.rule(RouteGroup::Read), RateLimitRule::new(3, 4));
        assert_eq!(cfg.rule(RouteGroup::Write), RateLimitRule::new(5, 6));
    }

    #[test]
    fn unknown_group_rejected() {
        let err = parse_overrides("admin=1:1").unwrap_err();
        assert!(err.contains("unknown group"));
    }

    #[test]
    fn zero_burst_rejected() {
        assert!(parse_overrides("read=1:0").is_err());
    }
}
