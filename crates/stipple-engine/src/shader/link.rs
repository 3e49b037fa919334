use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use super::compile::{compile_stage, CompiledStage};
use super::reflect::InterfaceVar;
use super::source::{load_source, ShaderPaths};
use crate::error::{ShaderError, Stage};

/// Identifier of a linked program, unique within the process.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ProgramId(u32);

impl ProgramId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A vertex + fragment pair whose interfaces agree.
///
/// The link log holds advisory findings only; anything that makes the pair
/// unusable is reported as [`ShaderError::Link`] instead.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    id: ProgramId,
    vertex: CompiledStage,
    fragment: CompiledStage,
    log: Vec<String>,
}

impl LinkedProgram {
    /// Compiles both sources and links them.
    pub fn from_sources(
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_stage(Stage::Vertex, vertex_source)?;
        let fragment = compile_stage(Stage::Fragment, fragment_source)?;
        link(vertex, fragment)
    }

    /// Loads, compiles and links the two files named by `paths`.
    pub fn from_files(paths: &ShaderPaths) -> Result<Self, ShaderError> {
        let vertex = load_source(Stage::Vertex, &paths.vertex)?;
        let fragment = load_source(Stage::Fragment, &paths.fragment)?;
        Self::from_sources(vertex, fragment)
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn stage(&self, stage: Stage) -> &CompiledStage {
        match stage {
            Stage::Vertex => &self.vertex,
            Stage::Fragment => &self.fragment,
        }
    }

    /// Advisory link messages. Empty for a clean link.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// Vertex-stage inputs, ordered by location.
    pub fn attributes(&self) -> &[InterfaceVar] {
        &self.vertex.interface().inputs
    }

    /// Looks up a vertex input by its WGSL name.
    pub fn attribute(&self, name: &str) -> Result<&InterfaceVar, ShaderError> {
        self.attributes()
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| ShaderError::AttributeNotFound {
                name: name.to_string(),
            })
    }

    /// Location slot of the vertex input called `name`.
    pub fn attribute_location(&self, name: &str) -> Result<u32, ShaderError> {
        self.attribute(name).map(|v| v.location)
    }
}

/// Links a compiled vertex stage with a compiled fragment stage.
///
/// Fails when a fragment input has no vertex output of the same location and
/// type.
/// Vertex outputs the fragment stage ignores only produce log lines.
pub fn link(vertex: CompiledStage, fragment: CompiledStage) -> Result<LinkedProgram, ShaderError> {
    let mut errors = Vec::new();

    if vertex.stage() != Stage::Vertex {
        errors.push(format!("expected a vertex stage, got {}", vertex.stage()));
    }
    if fragment.stage() != Stage::Fragment {
        errors.push(format!("expected a fragment stage, got {}", fragment.stage()));
    }

    let vs = vertex.interface();
    let fs = fragment.interface();

    for input in &fs.inputs {
        match vs.output_at(input.location) {
            None => errors.push(format!(
                "fragment input `{}` at location {} is not written by the vertex stage",
                input.name, input.location
            )),
            Some(output) if output.ty != input.ty => errors.push(format!(
                "location {} is {} in the vertex stage but {} in the fragment stage",
                input.location, output.ty, input.ty
            )),
            Some(_) => {}
        }
    }

    if !errors.is_empty() {
        let log = errors.join("\n");
        log::error!("shader program linking failed:\n{log}");
        return Err(ShaderError::Link { log });
    }

    let mut log: Vec<String> = vertex
        .notes()
        .iter()
        .chain(fragment.notes())
        .cloned()
        .collect();

    for output in &vs.outputs {
        if fs.input_at(output.location).is_none() {
            log.push(format!(
                "vertex output `{}` at location {} is not read by the fragment stage",
                output.name, output.location
            ));
        }
    }

    for line in &log {
        log::warn!("shader link: {line}");
    }

    let id = ProgramId::next();
    log::debug!(
        "linked program {id} ({} -> {})",
        vertex.entry_point(),
        fragment.entry_point()
    );

    Ok(LinkedProgram {
        id,
        vertex,
        fragment,
        log,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::reflect::{InterfaceType, ScalarType};

    const VS: &str = "
        @vertex
        fn vs_main(@location(0) a_position: vec2<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(a_position, 0.0, 1.0);
        }
    ";

    const FS: &str = "
        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 1.0, 1.0, 1.0);
        }
    ";

    const VS_TINT: &str = "
        struct Out {
            @builtin(position) pos: vec4<f32>,
            @location(0) tint: vec3<f32>,
        };

        @vertex
        fn vs_main(@location(0) a_position: vec2<f32>, @location(1) a_tint: vec3<f32>) -> Out {
            var o: Out;
            o.pos = vec4<f32>(a_position, 0.0, 1.0);
            o.tint = a_tint;
            return o;
        }
    ";

    fn link_err(vs: &str, fs: &str) -> String {
        match LinkedProgram::from_sources(vs, fs).unwrap_err() {
            ShaderError::Link { log } => log,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn valid_pair_links_cleanly() {
        let program = LinkedProgram::from_sources(VS, FS).unwrap();
        assert!(program.id().get() > 0);
        assert!(program.log().is_empty());
        assert_eq!(program.stage(Stage::Vertex).entry_point(), "vs_main");
        assert_eq!(program.stage(Stage::Fragment).entry_point(), "fs_main");
    }

    #[test]
    fn each_link_gets_a_fresh_id() {
        let a = LinkedProgram::from_sources(VS, FS).unwrap();
        let b = LinkedProgram::from_sources(VS, FS).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn syntax_error_in_either_stage_produces_no_program() {
        let broken = "@vertex fn vs_main( {";
        assert!(matches!(
            LinkedProgram::from_sources(broken, FS),
            Err(ShaderError::Compile { stage: Stage::Vertex, .. })
        ));

        let broken = "@fragment fn fs_main() -> @location(0) vec4<f32> { return }";
        assert!(matches!(
            LinkedProgram::from_sources(VS, broken),
            Err(ShaderError::Compile { stage: Stage::Fragment, .. })
        ));
    }

    #[test]
    fn attribute_lookup_by_name() {
        let program = LinkedProgram::from_sources(VS_TINT, FS).unwrap();
        assert_eq!(program.attribute_location("a_position").unwrap(), 0);
        assert_eq!(program.attribute_location("a_tint").unwrap(), 1);
        assert_eq!(
            program.attribute("a_tint").unwrap().ty,
            InterfaceType::new(ScalarType::Float32, 3)
        );
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let program = LinkedProgram::from_sources(VS, FS).unwrap();
        match program.attribute_location("aPosition").unwrap_err() {
            ShaderError::AttributeNotFound { name } => assert_eq!(name, "aPosition"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unread_vertex_output_is_advisory() {
        let program = LinkedProgram::from_sources(VS_TINT, FS).unwrap();
        assert_eq!(program.log().len(), 1);
        assert!(program.log()[0].contains("tint"));
    }

    #[test]
    fn fragment_input_without_vertex_output_fails() {
        let fs = "
            @fragment
            fn fs_main(@location(2) shade: f32) -> @location(0) vec4<f32> {
                return vec4<f32>(shade);
            }
        ";
        let log = link_err(VS, fs);
        assert!(log.contains("location 2"));
    }

    #[test]
    fn mismatched_interface_type_fails() {
        let fs = "
            @fragment
            fn fs_main(@location(0) tint: vec4<f32>) -> @location(0) vec4<f32> {
                return tint;
            }
        ";
        let log = link_err(VS_TINT, fs);
        assert!(log.contains("vec3<f32>"));
        assert!(log.contains("vec4<f32>"));
    }

    #[test]
    fn matching_interface_links() {
        let fs = "
            @fragment
            fn fs_main(@location(0) tint: vec3<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(tint, 1.0);
            }
        ";
        let program = LinkedProgram::from_sources(VS_TINT, fs).unwrap();
        assert!(program.log().is_empty());
    }

    #[test]
    fn missing_position_output_is_rejected_at_compile() {
        let vs = "
            @vertex
            fn vs_main(@location(0) a_position: vec2<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(a_position, 0.0, 1.0);
            }
        ";
        assert!(matches!(
            LinkedProgram::from_sources(vs, FS),
            Err(ShaderError::Compile { stage: Stage::Vertex, .. })
        ));
    }

    #[test]
    fn from_files_reports_missing_source() {
        let paths = ShaderPaths::in_dir("no/such/dir");
        assert!(matches!(
            LinkedProgram::from_files(&paths),
            Err(ShaderError::Io { stage: Stage::Vertex, .. })
        ));
    }
}
