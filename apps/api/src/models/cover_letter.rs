use serde::{Deserialize, Serialize};

use crate::models::resume::Contact;

/// A cover letter ready for rendering.
///
/// `body` is raw prose, usually straight from the text generator; paragraphs are
/// separated by blank lines and may still carry markdown residue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLetter {
    pub name: String,
    pub contact: Contact,
    pub recipient: Option<String>,
    pub body: String,
    pub closing: Option<String>,
}

impl CoverLetter {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty() && self.body.trim().is_empty()
    }
}
