use serde_json::Value;

use crate::catalog::{Catalog, ANALYZE_SPIKER_TOOL};
use crate::error::ServiceError;
use crate::protocol::{AnalyzeSpikerArgs, ToolResult};

/// Handle an `analyze_spiker` tool call.
///
/// Absent or `null` arguments behave exactly like `{code: "", context: ""}`.
/// Present arguments must satisfy the advertised input schema; the prompt
/// itself is pure templating.
pub async fn handle(arguments: Option<&Value>, catalog: &Catalog) -> Result<ToolResult, ServiceError> {
    let args = parse_arguments(arguments, catalog)?;
    Ok(ToolResult::text(render_prompt(&args.code, &args.context)))
}

fn parse_arguments(arguments: Option<&Value>, catalog: &Catalog) -> Result<AnalyzeSpikerArgs, ServiceError> {
    let value = match arguments {
        None | Some(Value::Null) => return Ok(AnalyzeSpikerArgs::default()),
        Some(v) => v,
    };

    let invalid = |detail: String| ServiceError::InvalidArguments {
        tool: ANALYZE_SPIKER_TOOL.to_string(),
        detail,
    };

    catalog
        .validate_arguments(ANALYZE_SPIKER_TOOL, value)
        .map_err(|e| invalid(e.to_string()))?;

    serde_json::from_value(value.clone()).map_err(|e| invalid(e.to_string()))
}

/// Render the six-pillar audit prompt for `code` in `context`.
pub fn render_prompt(code: &str, context: &str) -> String {
    format!(
        r#"
Act as a S.P.I.K.E.R. Methodology Consultant. Evaluate the provided codebase against the six S.P.I.K.E.R. pillars.

CONTEXT:
{context}

CODE TO ANALYZE:
{code}

ANALYSIS FRAMEWORK:
1. [S]pike (Intent): Identify 'Systemic Ambiguity'. Is the intent clear?
2. [P]urge (Hygiene): Identify 'Sanguineous Logic' (dead code, redundancy).
3. [I]solate (Isolation): Check for 'Nerve Propagation' (side effects, coupling).
4. [K]inetic (Purity): Check for 'Tap Water Bloat' (unnecessary dependencies).
5. [E]nzymatic (Aging): Check for 'Rot-prone Design' (extensibility, docs).
6. [R]efine (Refinement): Suggest 'Rigorous Refinement' (testing strategies).

Format output as an ADR (Architecture Decision Record) and organize supporting docs via Diataxis where applicable.
"#
    )
}
