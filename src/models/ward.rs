use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Ward {
    pub id: String,
    pub name: String,
}
