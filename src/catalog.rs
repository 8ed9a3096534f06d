//! Static tool and resource registries.
//!
//! The catalog is built once at startup and shared read-only by every
//! session for the life of the process.

use std::collections::HashMap;

use jsonschema::Validator;
use serde::Serialize;
use serde_json::{json, Value};

use crate::schema::{self, SchemaValidationError};

/// Name of the single tool this server exposes.
pub const ANALYZE_SPIKER_TOOL: &str = "analyze_spiker";

/// URI of the methodology document resource.
pub const METHODOLOGY_URI: &str = "spiker://docs";

/// MIME type of the methodology document, used for both listing and reading.
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// A tool as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// A resource as advertised by `resources/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

pub struct Catalog {
    tools: Vec<ToolDescriptor>,
    resources: Vec<ResourceDescriptor>,
    /// Compiled `inputSchema` per tool name.
    validators: HashMap<String, Validator>,
}

impl Catalog {
    pub fn new() -> Self {
        let tools = vec![ToolDescriptor {
            name: ANALYZE_SPIKER_TOOL.into(),
            description: "Audit code via S.P.I.K.E.R. methodology.".into(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "code": { "type": "string" },
                    "context": { "type": "string" }
                }
            }),
        }];

        let validators = tools
            .iter()
            .map(|t| {
                let validator = schema::compile(&t.input_schema)
                    .expect("built-in tool input schema must compile");
                (t.name.clone(), validator)
            })
            .collect();

        Self {
            tools,
            validators,
            resources: vec![ResourceDescriptor {
                uri: METHODOLOGY_URI.into(),
                name: "S.P.I.K.E.R. Methodology".into(),
                description: "The full philosophical specification.".into(),
                mime_type: MARKDOWN_MIME_TYPE.into(),
            }],
        }
    }

    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn resources(&self) -> &[ResourceDescriptor] {
        &self.resources
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Check `arguments` against the named tool's input schema.
    ///
    /// Tools without a registered schema accept anything.
    pub fn validate_arguments(&self, tool: &str, arguments: &Value) -> Result<(), SchemaValidationError> {
        match self.validators.get(tool) {
            Some(validator) => schema::check(validator, arguments),
            None => Ok(()),
        }
    }

    pub fn resource(&self, uri: &str) -> Option<&ResourceDescriptor> {
        self.resources.iter().find(|r| r.uri == uri)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
