use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Platforms with a built-in domain table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Platform {
    X,
    Instagram,
    LinkedIn,
    Facebook,
}

/// How a platform's URLs look: which hosts it serves from and where the
/// account handle sits in the path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformProfile {
    pub domains: Vec<String>,
    /// Zero-based path segment holding the account handle.
    pub handle_segment: usize,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::X,
        Platform::Instagram,
        Platform::LinkedIn,
        Platform::Facebook,
    ];

    pub fn default_profile(&self) -> PlatformProfile {
        let (domains, handle_segment): (&[&str], usize) = match self {
            Platform::X => (&["x.com", "twitter.com", "twimg.com", "t.co"], 0),
            Platform::Instagram => (&["instagram.com", "cdninstagram.com", "fbcdn.net"], 0),
            Platform::LinkedIn => (&["linkedin.com", "licdn.com"], 1),
            Platform::Facebook => (&["facebook.com", "fb.com", "fbcdn.net"], 0),
        };
        PlatformProfile {
            domains: domains.iter().map(|d| d.to_string()).collect(),
            handle_segment,
        }
    }
}

impl PlatformProfile {
    /// True when `host` is one of the domains or a subdomain of one.
    pub fn matches_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_lowercase();
        self.domains.iter().any(|domain| {
            let domain = domain.to_lowercase();
            host == domain || host.ends_with(&format!(".{domain}"))
        })
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "x" | "twitter" => Ok(Platform::X),
            "instagram" => Ok(Platform::Instagram),
            "linkedin" => Ok(Platform::LinkedIn),
            "facebook" => Ok(Platform::Facebook),
            _ => Err(format!("unknown platform: {value}")),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Platform::X => "X",
            Platform::Instagram => "Instagram",
            Platform::LinkedIn => "LinkedIn",
            Platform::Facebook => "Facebook",
        };
        write!(f, "{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_matching() {
        let profile = Platform::X.default_profile();
        assert!(profile.matches_host("x.com"));
        assert!(profile.matches_host("mobile.twitter.com"));
        assert!(profile.matches_host("PBS.TWIMG.COM"));
        assert!(!profile.matches_host("notx.com"));
        assert!(!profile.matches_host("x.com.evil.io"));
    }

    #[test]
    fn test_platform_names_round_trip() {
        for platform in Platform::ALL {
            assert_eq!(platform.to_string().parse::<Platform>(), Ok(platform));
        }
        assert_eq!("twitter".parse::<Platform>(), Ok(Platform::X));
        assert!("myspace".parse::<Platform>().is_err());
    }
}
