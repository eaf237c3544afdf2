// crates/sit_coverage/src/option.rs

//! 用户选项

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoverageError;

/// 新建行的默认用户文本
pub const DEFAULT_USER_TEXT: &str = "Hello World!";

/// 用户可选类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum UserOption {
    #[default]
    A,
    B,
    C,
}

impl UserOption {
    /// 全部选项，按显示顺序
    pub const ALL: [UserOption; 3] = [Self::A, Self::B, Self::C];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
        }
    }
}

impl fmt::Display for UserOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserOption {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            _ => Err(CoverageError::InvalidOption {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("B".parse::<UserOption>().unwrap(), UserOption::B);
        assert_eq!(UserOption::C.to_string(), "C");
        assert!("a".parse::<UserOption>().is_err());
        assert!("".parse::<UserOption>().is_err());
        assert_eq!(UserOption::default(), UserOption::A);
    }
}
