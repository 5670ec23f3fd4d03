use std::fmt;
use std::str::FromStr;

use crate::domain::DomainError;

/// License header written into `hack/boilerplate.rs.txt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum License {
    #[default]
    Apache2,
    None,
}

impl License {
    pub const ALL: [License; 2] = [License::Apache2, License::None];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apache2 => "apache2",
            Self::None => "none",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for License {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "apache2" | "apache-2.0" | "apache" => Ok(Self::Apache2),
            "none" | "" => Ok(Self::None),
            _ => Err(DomainError::UnknownLicense {
                license: s.to_string(),
            }),
        }
    }
}
