//! Reading scikit-learn exports from disk.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::repr::{LinearModel, Tree, TreeView};

use super::convert::ConversionError;
use super::json::{PlotDocument, SklearnLinearRegression};

/// Error type for loading model files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid model in {path}: {source}")]
    Conversion {
        path: PathBuf,
        #[source]
        source: ConversionError,
    },
}

/// Deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a [`PlotDocument`] together with its converted [`Tree`].
pub fn load_plot_document(path: impl AsRef<Path>) -> Result<(PlotDocument, Tree), LoadError> {
    let path = path.as_ref();
    let doc: PlotDocument = read_json(path)?;
    let tree = doc.tree.to_tree().map_err(|source| LoadError::Conversion {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        n_nodes = tree.n_nodes(),
        n_samples = doc.samples.len(),
        "loaded plot document"
    );
    Ok((doc, tree))
}

/// Load a [`SklearnLinearRegression`] export as a [`LinearModel`].
pub fn load_linear_model(path: impl AsRef<Path>) -> Result<LinearModel, LoadError> {
    let path = path.as_ref();
    let export: SklearnLinearRegression = read_json(path)?;
    export.to_model().map_err(|source| LoadError::Conversion {
        path: path.to_path_buf(),
        source,
    })
}
