//! Manifest loading with stale-response protection.
//!
//! Every fetch gets a [`FetchTicket`]. Starting a new fetch replaces the
//! pending one, so a late response for an older ticket is dropped instead
//! of clobbering a newer selection.

use std::path::Path;

use crate::error::ManifestError;
use crate::schema::Manifest;

/// Handle for one in-flight manifest request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(u64);

/// Holds the current manifest of one viewer instance.
#[derive(Debug, Default)]
pub struct ManifestLoader {
    generation: u64,
    pending: Option<FetchTicket>,
    manifest: Option<Manifest>,
}

impl ManifestLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, replacing any pending one.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket(self.generation);
        self.pending = Some(ticket);
        ticket
    }

    /// Whether `ticket` is still the pending request.
    #[inline]
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.pending == Some(ticket)
    }

    /// Finish a request. Returns `Ok(false)` when the ticket is stale and the
    /// result was ignored.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Manifest, ManifestError>,
    ) -> Result<bool, ManifestError> {
        if !self.is_current(ticket) {
            tracing::debug!("ignoring stale manifest response {:?}", ticket);
            return Ok(false);
        }
        self.pending = None;
        self.manifest = Some(result?);
        Ok(true)
    }

    /// Load synchronously from a JSON string.
    pub fn load_str(&mut self, json: &str) -> Result<&Manifest, ManifestError> {
        let ticket = self.begin();
        self.complete(ticket, parse_manifest(json))?;
        self.manifest.as_ref().ok_or(ManifestError::NoCustomElements)
    }

    /// Load synchronously from a file.
    pub fn load_path(&mut self, path: &Path) -> Result<&Manifest, ManifestError> {
        let ticket = self.begin();
        let result = std::fs::read_to_string(path)
            .map_err(ManifestError::from)
            .and_then(|json| parse_manifest(&json));
        self.complete(ticket, result)?;
        self.manifest.as_ref().ok_or(ManifestError::NoCustomElements)
    }

    /// The most recently applied manifest.
    #[inline]
    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_ref()
    }
}

/// Decode manifest JSON.
pub fn parse_manifest(json: &str) -> Result<Manifest, ManifestError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(version: &str) -> Manifest {
        Manifest {
            schema_version: version.to_string(),
            ..Manifest::default()
        }
    }

    #[test]
    fn test_latest_ticket_wins() {
        let mut loader = ManifestLoader::new();
        let old = loader.begin();
        let new = loader.begin();

        assert!(loader.complete(new, Ok(manifest("2"))).unwrap());
        assert!(!loader.complete(old, Ok(manifest("1"))).unwrap());
        assert_eq!(loader.manifest().unwrap().schema_version, "2");
    }

    #[test]
    fn test_stale_error_is_ignored() {
        let mut loader = ManifestLoader::new();
        let old = loader.begin();
        let _new = loader.begin();
        let stale = loader.complete(old, Err(ManifestError::NoCustomElements));
        assert!(matches!(stale, Ok(false)));
    }

    #[test]
    fn test_load_str() {
        let mut loader = ManifestLoader::new();
        let manifest = loader.load_str(r#"{"schemaVersion":"1.0.0","modules":[]}"#).unwrap();
        assert_eq!(manifest.schema_version, "1.0.0");
        assert!(matches!(
            loader.load_str("{"),
            Err(ManifestError::Json(_))
        ));
    }
}
