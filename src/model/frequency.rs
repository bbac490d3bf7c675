use std::fmt;
use std::str::FromStr;

/// How often a page is expected to change
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChangeFrequency {
    #[default]
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub const ALL: [ChangeFrequency; 7] = [
        ChangeFrequency::Always,
        ChangeFrequency::Hourly,
        ChangeFrequency::Daily,
        ChangeFrequency::Weekly,
        ChangeFrequency::Monthly,
        ChangeFrequency::Yearly,
        ChangeFrequency::Never,
    ];

    /// The token as written in a sitemap
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

/// A `<changefreq>` value outside the protocol's token set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown change frequency {0:?}")]
pub struct UnknownFrequency(pub String);

impl FromStr for ChangeFrequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|freq| freq.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| UnknownFrequency(token.to_owned()))
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        for freq in ChangeFrequency::ALL {
            assert_eq!(freq.as_str().parse::<ChangeFrequency>(), Ok(freq));
        }
        assert_eq!(" Weekly\n".parse::<ChangeFrequency>(), Ok(ChangeFrequency::Weekly));
        assert_eq!("DAILY".parse::<ChangeFrequency>(), Ok(ChangeFrequency::Daily));
    }

    #[test]
    fn test_unknown_token() {
        let err = "fortnightly".parse::<ChangeFrequency>().unwrap_err();
        assert_eq!(err, UnknownFrequency("fortnightly".into()));
        assert_eq!(err.to_string(), "unknown change frequency \"fortnightly\"");
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(ChangeFrequency::default(), ChangeFrequency::Always);
        assert_eq!(ChangeFrequency::Monthly.to_string(), "monthly");
    }
}
