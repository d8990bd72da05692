use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub display_name: String,
}

impl Member {
    pub fn new(id: &str, display_name: &str) -> Self {
        Member {
            id: id.to_string(),
            display_name: display_name.to_string(),
        }
    }
}
