/// Session state: whether this client currently holds operator access.
///
/// The answer comes from polling the backend; it is never cached to disk
/// and no credential is stored client-side. Any transport failure while
/// checking reads as "not signed in"; the client never fails open.

use crate::api::ApiError;

/// Credentials captured from the login form, ready to post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Default)]
pub struct Session {
    authenticated: bool,
    checking: bool,
    checked_once: bool,
    username: String,
    password: String,
    logging_in: bool,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a status poll; `false` when one is already running
    pub fn begin_check(&mut self) -> bool {
        if self.checking {
            return false;
        }
        self.checking = true;
        true
    }

    /// A failed check means unauthenticated, never an error state
    pub fn finish_check(&mut self, result: Result<bool, ApiError>) {
        self.checking = false;
        self.checked_once = true;
        self.authenticated = result.unwrap_or(false);
    }

    pub fn set_username(&mut self, username: String) {
        self.username = username;
    }

    pub fn set_password(&mut self, password: String) {
        self.password = password;
    }

    /// Take the form contents for a login attempt
    pub fn begin_login(&mut self) -> Option<Credentials> {
        if self.logging_in {
            return None;
        }
        if self.username.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Enter a username and password.".to_string());
            return None;
        }
        self.logging_in = true;
        self.error = None;
        Some(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        })
    }

    pub fn finish_login(&mut self, result: Result<(), ApiError>) {
        self.logging_in = false;
        match result {
            Ok(()) => {
                self.authenticated = true;
                self.username.clear();
                self.password.clear();
                self.error = None;
            }
            Err(_) => {
                // No automatic retry; the form stays filled for another go
                self.authenticated = false;
                self.error = Some("Invalid credentials.".to_string());
            }
        }
    }

    /// Drop to signed-out immediately. The remote call is fired separately
    /// and best-effort; its failure cannot resurrect this session.
    pub fn logout(&mut self) {
        self.authenticated = false;
        self.error = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// True only before the first status answer has come back
    pub fn is_checking(&self) -> bool {
        self.checking && !self.checked_once
    }

    pub fn is_logging_in(&self) -> bool {
        self.logging_in
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_check_reads_as_signed_out() {
        let mut session = Session::new();
        assert!(session.begin_check());
        session.finish_check(Err(ApiError::Transport("unreachable".into())));
        assert!(!session.is_authenticated());
        assert!(!session.is_checking());
    }

    #[test]
    fn test_successful_check_restores_the_session() {
        let mut session = Session::new();
        session.begin_check();
        session.finish_check(Ok(true));
        assert!(session.is_authenticated());
    }

    #[test]
    fn test_concurrent_checks_are_collapsed() {
        let mut session = Session::new();
        assert!(session.begin_check());
        assert!(!session.begin_check());
    }

    #[test]
    fn test_login_requires_both_fields() {
        let mut session = Session::new();
        session.set_username("admin".to_string());
        assert!(session.begin_login().is_none());
        assert!(session.error().is_some());
    }

    #[test]
    fn test_successful_login_clears_the_form() {
        let mut session = Session::new();
        session.set_username("admin".to_string());
        session.set_password("hunter2".to_string());
        let credentials = session.begin_login().unwrap();
        assert_eq!(credentials.username, "admin");

        session.finish_login(Ok(()));
        assert!(session.is_authenticated());
        assert!(session.username().is_empty());
        assert!(session.password().is_empty());
    }

    #[test]
    fn test_rejected_login_sets_the_error() {
        let mut session = Session::new();
        session.set_username("admin".to_string());
        session.set_password("wrong".to_string());
        session.begin_login().unwrap();
        session.finish_login(Err(ApiError::InvalidCredentials));

        assert!(!session.is_authenticated());
        assert_eq!(session.error(), Some("Invalid credentials."));
        // The form keeps its contents for another attempt
        assert_eq!(session.username(), "admin");
    }

    #[test]
    fn test_logout_is_immediate_and_unconditional() {
        let mut session = Session::new();
        session.begin_check();
        session.finish_check(Ok(true));
        assert!(session.is_authenticated());

        // Even if the remote call later fails, local state is signed out
        session.logout();
        assert!(!session.is_authenticated());
    }
}
