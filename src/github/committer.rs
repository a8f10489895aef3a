const DEFAULT_COMMITTER_NAME: &str = "Auto Commit";
const DEFAULT_COMMITTER_EMAIL: &str = "actions@users.noreply.github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

impl Committer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Committer {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Default for Committer {
    fn default() -> Self {
        Committer::new(DEFAULT_COMMITTER_NAME, DEFAULT_COMMITTER_EMAIL)
    }
}
