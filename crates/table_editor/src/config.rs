use serde::Deserialize;

pub const DEFAULT_HEADER_BACKGROUND: &str = "grey";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TableEditorConfig {
    /// Background given to the cells of a header row created with the table.
    #[serde(default)]
    pub header_background: String,
}

impl TableEditorConfig {
    pub fn with_defaults(mut self) -> Self {
        if self.header_background.is_empty() {
            self.header_background = DEFAULT_HEADER_BACKGROUND.to_string();
        }
        self
    }
}
