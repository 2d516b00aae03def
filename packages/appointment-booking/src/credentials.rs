///
/// How passwords are stored and checked at login.
///
/// `seal` turns the password given at registration into the stored form and
/// `verify` compares a login attempt against that stored form.
///
pub trait CredentialScheme {
    fn seal(&self, password: &str) -> String;

    fn verify(&self, sealed: &str, attempt: &str) -> bool;
}

///
/// Stores passwords as entered and compares them by equality.
///
/// Passwords end up readable in the data files.
/// Swap in a hashing scheme before using this anywhere real.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextCredentials;

impl CredentialScheme for PlaintextCredentials {
    fn seal(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, sealed: &str, attempt: &str) -> bool {
        sealed == attempt
    }
}

///
/// Usernames are compared without regard to case, accented letters included
///
pub fn same_username(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
