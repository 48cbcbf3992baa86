use std::fmt;

/// Case-insensitive function name, stored in upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionName(String);

impl FunctionName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FunctionName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(FunctionName::new("abs"), FunctionName::new("ABS"));
        assert_eq!(FunctionName::from("Log10").as_str(), "LOG10");
        assert_eq!(FunctionName::new("dayofmonth").to_string(), "DAYOFMONTH");
    }
}
