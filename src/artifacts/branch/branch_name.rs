use crate::artifacts::branch::BRANCH_NAME_REGEX;
use crate::artifacts::core::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidBranchName(name));
        }

        let re = regex::Regex::new(BRANCH_NAME_REGEX)
            .expect("branch name pattern is a valid regex");

        if re.is_match(&name) {
            Ok(Self(name))
        } else {
            Err(Error::InvalidBranchName(name))
        }
    }

    pub fn is_default_branch(&self) -> bool {
        self.0 == "master" || self.0 == "main"
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
