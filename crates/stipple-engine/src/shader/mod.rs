//! Shader program construction.
//!
//! WGSL sources are compiled per stage (parse + validate), linked by matching
//! the vertex outputs against the fragment inputs, and only then turned into
//! GPU shader modules. Compile and link failures are fatal for the program;
//! link warnings are not.

mod compile;
mod link;
mod program;
mod reflect;
mod source;

pub use compile::{compile_stage, CompiledStage};
pub use link::{link, LinkedProgram, ProgramId};
pub use program::ShaderProgram;
pub use reflect::{InterfaceType, InterfaceVar, ScalarType, StageInterface};
pub use source::{load_source, ShaderPaths};
