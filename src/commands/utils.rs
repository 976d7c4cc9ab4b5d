use crate::parser::load_trace_file;
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a trace JSON file
pub fn validate_trace_file(file_path: PathBuf) -> Result<()> {
    println!("Validating trace: {}", file_path.display());

    let trace = load_trace_file(&file_path)?;

    let max_depth = trace.steps.iter().map(|s| s.stack.len()).max().unwrap_or(0);
    let max_heap = trace.steps.iter().map(|s| s.heap.len()).max().unwrap_or(0);

    println!("✓ Valid trace JSON");
    println!("  Steps: {}", trace.steps.len());
    println!("  Code: {} lines", trace.code.lines().count());
    println!("  Max stack depth: {}", max_depth);
    println!("  Max heap objects: {}", max_heap);

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("Trace Graph Document Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  source: string             - Trace file or execution service URL");
        println!("  code: string               - Traced source code");
        println!("  step_count: number         - Steps in the full trace");
        println!("  selected_step: number?     - Rendered step when only one was requested");
        println!("  steps: array               - One graph per step");
        println!("    line: number?            - Current line");
        println!("    event: string?           - Tracer event");
        println!("    current_frame: string?   - Id of the highlighted frame node");
        println!("    stdout: string?          - Program output so far");
        println!("    exception_msg: string?   - Exception message");
        println!("    nodes: array             - Frame and object nodes");
        println!("      id: string             - frame-<i> or object-<address>");
        println!("      kind: string           - frame | object");
        println!("      data: object           - Variables or fields");
        println!("      position: object       - Default layout {{x, y}}");
        println!("    edges: array             - References between nodes");
        println!("      id: string             - <source>-<target>-<label>");
        println!("      source, target: string - Node ids");
        println!("      label: string          - Variable or field name");
        println!("      kind: string           - reference | call");
        println!("  generated_at: string       - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Trace Graph Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Graph Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Compiles program-execution traces into node/edge graphs.");
}
