use std::io::ErrorKind;
use std::path::Path;

use tracing::error;

use crate::catalog::{Catalog, MARKDOWN_MIME_TYPE};
use crate::error::ServiceError;
use crate::protocol::ReadResourceResult;

/// Handle a `resources/read` request.
///
/// Only URIs present in the catalog are served. The backing file is read
/// from disk on every call so edits are visible immediately.
pub async fn handle(uri: &str, catalog: &Catalog, methodology_path: &Path) -> Result<ReadResourceResult, ServiceError> {
    if catalog.resource(uri).is_none() {
        return Err(ServiceError::UnknownResource(uri.to_string()));
    }

    let text = read_methodology(methodology_path).await?;
    Ok(ReadResourceResult::text(uri, MARKDOWN_MIME_TYPE, text))
}

async fn read_methodology(path: &Path) -> Result<String, ServiceError> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            error!(path = %path.display(), "Methodology file not found");
            Err(ServiceError::ResourceNotFound(path.to_path_buf()))
        }
        Err(e) => {
            error!(path = %path.display(), "Cannot read methodology file: {e}");
            Err(ServiceError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    }
}
