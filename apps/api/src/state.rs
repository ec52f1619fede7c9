use crate::config::Config;
use crate::layout::PageGeometry;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Holds only immutable settings; each synthesis call builds its own layout
/// and cursors from them.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Page size and margins for every rendered document.
    pub geometry: PageGeometry,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            geometry: PageGeometry::new(config.paper_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::PaperSize;

    #[test]
    fn test_geometry_follows_configured_paper() {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            paper_size: PaperSize::A4,
        };
        let state = AppState::new(&config);
        assert_eq!(state.geometry, PageGeometry::new(PaperSize::A4), "A4 config yields A4 pages");
    }
}
