//! Injected configuration providers
//!
//! Commit creation needs an author identity and a wall-clock reading. Both
//! come in through traits so tests can stub identity and time instead of
//! depending on the environment and the system clock.

use crate::artifacts::core::error::Result;
use crate::artifacts::objects::commit::Author;

/// Environment variable holding the author name
pub const AUTHOR_NAME_VAR: &str = "GGGIT_AUTHOR_NAME";
/// Environment variable holding the author email
pub const AUTHOR_EMAIL_VAR: &str = "GGGIT_AUTHOR_EMAIL";

const DEFAULT_AUTHOR_NAME: &str = "gggit user";
const DEFAULT_AUTHOR_EMAIL: &str = "gggit@localhost";

/// Source of the author identity recorded in commits
pub trait AuthorProvider {
    fn lookup(&self) -> Result<Author>;
}

/// Reads the author from `GGGIT_AUTHOR_NAME` / `GGGIT_AUTHOR_EMAIL`,
/// falling back to a built-in identity when unset
#[derive(Debug, Default)]
pub struct EnvAuthorProvider;

impl AuthorProvider for EnvAuthorProvider {
    fn lookup(&self) -> Result<Author> {
        let name =
            std::env::var(AUTHOR_NAME_VAR).unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string());
        let email =
            std::env::var(AUTHOR_EMAIL_VAR).unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.to_string());

        Ok(Author::new(name, email))
    }
}

/// Source of commit timestamps
pub trait Clock {
    fn now(&self) -> chrono::DateTime<chrono::FixedOffset>;
}

/// Local wall-clock time with the local zone offset
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> chrono::DateTime<chrono::FixedOffset> {
        chrono::Local::now().fixed_offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_provider_falls_back_to_defaults() {
        // the variables are not set in the test environment unless a caller
        // exported them; scope the assertion to the unset case
        if std::env::var(AUTHOR_NAME_VAR).is_err() && std::env::var(AUTHOR_EMAIL_VAR).is_err() {
            let author = EnvAuthorProvider.lookup().unwrap();
            assert_eq!(author.name(), DEFAULT_AUTHOR_NAME);
            assert_eq!(author.email(), DEFAULT_AUTHOR_EMAIL);
        }
    }

    #[test]
    fn system_clock_carries_a_zone_offset() {
        let now = SystemClock.now();
        assert_eq!(now.timezone().local_minus_utc() % 60, 0);
    }
}
