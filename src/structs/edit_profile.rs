use serde::Deserialize;

#[derive(Deserialize)]
pub struct EditProfile {
    pub username: Option<String>,
    pub biography: Option<String>,
}
