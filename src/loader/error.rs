//! Fatal load errors

use crate::gfx::geometry::GeometryError;
use crate::gfx::resources::TextureFileError;
use crate::gfx::scene::{Category, DuplicateId, GraphError};

/// A structural problem that aborts the whole load
///
/// The `Display` text is the message handed to `on_error`.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed XML
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("root tag <lxs> missing (found <{0}>)")]
    RootTag(String),

    #[error("tag <{0}> missing")]
    MissingBlock(&'static str),

    #[error(transparent)]
    DuplicateId(#[from] DuplicateId),

    #[error("no ID defined for {0}")]
    MissingId(Category),

    #[error("missing attribute '{attribute}' of the {context}")]
    MissingAttribute { attribute: String, context: String },

    #[error("unable to parse '{attribute}' of the {context} (value: {value:?})")]
    InvalidAttribute {
        attribute: String,
        value: String,
        context: String,
    },

    #[error("<{element}> undefined for the {context}")]
    MissingElement { element: String, context: String },

    #[error("invalid {context}: {reason}")]
    InvalidValue { context: String, reason: String },

    #[error("{category} '{id}' referenced by the {context} has not been declared")]
    UnresolvedReference {
        category: Category,
        id: String,
        context: String,
    },

    #[error("root component '{0}' has not been declared")]
    RootNotFound(String),

    #[error("cycle in component graph: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    #[error("texture '{id}': {source}")]
    TextureFile {
        id: String,
        #[source]
        source: TextureFileError,
    },

    #[error("primitive '{id}': {source}")]
    Geometry {
        id: String,
        #[source]
        source: GeometryError,
    },
}

impl From<GraphError> for LoadError {
    fn from(error: GraphError) -> Self {
        match error {
            GraphError::RootNotFound(id) => LoadError::RootNotFound(id),
            GraphError::Cycle(path) => LoadError::Cycle(path),
        }
    }
}

impl LoadError {
    pub(crate) fn missing_attribute(attribute: &str, context: &str) -> Self {
        LoadError::MissingAttribute {
            attribute: attribute.to_string(),
            context: context.to_string(),
        }
    }

    pub(crate) fn invalid_attribute(attribute: &str, value: &str, context: &str) -> Self {
        LoadError::InvalidAttribute {
            attribute: attribute.to_string(),
            value: value.to_string(),
            context: context.to_string(),
        }
    }

    pub(crate) fn missing_element(element: &str, context: &str) -> Self {
        LoadError::MissingElement {
            element: element.to_string(),
            context: context.to_string(),
        }
    }

    pub(crate) fn invalid_value(context: &str, reason: impl Into<String>) -> Self {
        LoadError::InvalidValue {
            context: context.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unresolved(category: Category, id: &str, context: &str) -> Self {
        LoadError::UnresolvedReference {
            category,
            id: id.to_string(),
            context: context.to_string(),
        }
    }
}
