use naga::valid::{Capabilities, ValidationFlags, Validator};

use super::reflect::{self, StageInterface};
use crate::error::{ShaderError, Stage};

/// A single stage that parsed, validated and exposes an entry point for its stage.
///
/// Only the source text and the reflected interface are kept; the naga IR is
/// dropped once reflection is done.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    stage: Stage,
    source: String,
    entry_point: String,
    interface: StageInterface,
    notes: Vec<String>,
}

impl CompiledStage {
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn interface(&self) -> &StageInterface {
        &self.interface
    }

    /// Non-fatal findings surfaced later in the link log.
    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// Compiles WGSL `source` for `stage`.
///
/// The module must parse, pass validation, and declare at least one entry point
/// for `stage`. When several do, the first is used and the rest are noted.
/// Failures are logged and returned as [`ShaderError::Compile`].
pub fn compile_stage(stage: Stage, source: impl Into<String>) -> Result<CompiledStage, ShaderError> {
    let source = source.into();

    let module = naga::front::wgsl::parse_str(&source)
        .map_err(|e| compile_failure(stage, e.emit_to_string(&source)))?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| compile_failure(stage, e.emit_to_string(&source)))?;

    let wanted = naga_stage(stage);
    let mut candidates = module.entry_points.iter().filter(|ep| ep.stage == wanted);

    let Some(entry) = candidates.next() else {
        return Err(compile_failure(stage, format!("no @{stage} entry point declared")));
    };

    let mut notes = Vec::new();
    let ignored: Vec<&str> = candidates.map(|ep| ep.name.as_str()).collect();
    if !ignored.is_empty() {
        notes.push(format!(
            "{stage} stage uses entry point `{}`; ignoring {}",
            entry.name,
            ignored.join(", ")
        ));
    }

    let interface = reflect::stage_interface(&module, &entry.function);
    log::debug!(
        "compiled {stage} stage `{}`: {} input(s), {} output(s)",
        entry.name,
        interface.inputs.len(),
        interface.outputs.len()
    );

    Ok(CompiledStage {
        stage,
        entry_point: entry.name.clone(),
        source,
        interface,
        notes,
    })
}

fn naga_stage(stage: Stage) -> naga::ShaderStage {
    match stage {
        Stage::Vertex => naga::ShaderStage::Vertex,
        Stage::Fragment => naga::ShaderStage::Fragment,
    }
}

fn compile_failure(stage: Stage, log: String) -> ShaderError {
    log::error!("{stage} shader compilation failed:\n{log}");
    ShaderError::Compile { stage, log }
}
