//! Entry-point interface reflection over a validated naga module.

use std::fmt;

/// Scalar component type of an inter-stage or vertex-input variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ScalarType {
    Float16,
    Float32,
    Sint32,
    Uint32,
    /// Anything a vertex buffer cannot feed (bool, 64-bit, abstract).
    Other,
}

impl ScalarType {
    fn from_naga(scalar: naga::Scalar) -> Self {
        match (scalar.kind, scalar.width) {
            (naga::ScalarKind::Float, 2) => ScalarType::Float16,
            (naga::ScalarKind::Float, 4) => ScalarType::Float32,
            (naga::ScalarKind::Sint, 4) => ScalarType::Sint32,
            (naga::ScalarKind::Uint, 4) => ScalarType::Uint32,
            _ => ScalarType::Other,
        }
    }

    fn wgsl_name(self) -> &'static str {
        match self {
            ScalarType::Float16 => "f16",
            ScalarType::Float32 => "f32",
            ScalarType::Sint32 => "i32",
            ScalarType::Uint32 => "u32",
            ScalarType::Other => "?",
        }
    }
}

/// Scalar or vector type of an interface variable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InterfaceType {
    pub scalar: ScalarType,
    /// 1 for scalars, 2..=4 for vectors.
    pub components: u8,
}

impl InterfaceType {
    pub const fn new(scalar: ScalarType, components: u8) -> Self {
        Self { scalar, components }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.components == 1 {
            f.write_str(self.scalar.wgsl_name())
        } else {
            write!(f, "vec{}<{}>", self.components, self.scalar.wgsl_name())
        }
    }
}

/// A `@location`-bound entry-point input or output.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InterfaceVar {
    pub name: String,
    pub location: u32,
    pub ty: InterfaceType,
}

/// Inputs and outputs of one entry point.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StageInterface {
    pub inputs: Vec<InterfaceVar>,
    pub outputs: Vec<InterfaceVar>,
}

impl StageInterface {
    pub fn input_at(&self, location: u32) -> Option<&InterfaceVar> {
        self.inputs.iter().find(|v| v.location == location)
    }

    pub fn output_at(&self, location: u32) -> Option<&InterfaceVar> {
        self.outputs.iter().find(|v| v.location == location)
    }
}

/// Collects the interface of `function`, flattening struct arguments and results.
pub(crate) fn stage_interface(module: &naga::Module, function: &naga::Function) -> StageInterface {
    let mut iface = StageInterface::default();

    for arg in &function.arguments {
        let name = arg.name.as_deref().unwrap_or_default();
        collect(module, name, arg.ty, arg.binding.as_ref(), &mut iface.inputs);
    }

    if let Some(result) = &function.result {
        collect(module, "", result.ty, result.binding.as_ref(), &mut iface.outputs);
    }

    iface.inputs.sort_by_key(|v| v.location);
    iface.outputs.sort_by_key(|v| v.location);
    iface
}

fn collect(
    module: &naga::Module,
    name: &str,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<InterfaceVar>,
) {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            if let Some(ty) = interface_type(module, ty) {
                out.push(InterfaceVar {
                    name: name.to_string(),
                    location: *location,
                    ty,
                });
            }
        }
        // Built-ins are not part of the user-visible interface.
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    let member_name = member.name.as_deref().unwrap_or(name);
                    collect(module, member_name, member.ty, member.binding.as_ref(), out);
                }
            }
        }
    }
}

fn interface_type(module: &naga::Module, ty: naga::Handle<naga::Type>) -> Option<InterfaceType> {
    match module.types[ty].inner {
        naga::TypeInner::Scalar(scalar) => {
            Some(InterfaceType::new(ScalarType::from_naga(scalar), 1))
        }
        naga::TypeInner::Vector { size, scalar } => {
            Some(InterfaceType::new(ScalarType::from_naga(scalar), size as u8))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_interface(src: &str) -> StageInterface {
        let module = naga::front::wgsl::parse_str(src).unwrap();
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.stage == naga::ShaderStage::Vertex)
            .unwrap();
        stage_interface(&module, &ep.function)
    }

    #[test]
    fn plain_arguments_have_no_location_outputs() {
        let iface = vertex_interface(
            "@vertex fn main(@location(0) a_position: vec2<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(a_position, 0.0, 1.0);
            }",
        );
        assert_eq!(
            iface.inputs,
            vec![InterfaceVar {
                name: "a_position".into(),
                location: 0,
                ty: InterfaceType::new(ScalarType::Float32, 2),
            }]
        );
        assert!(iface.outputs.is_empty());
    }

    #[test]
    fn struct_members_are_flattened_and_sorted() {
        let iface = vertex_interface(
            "struct In { @location(3) weight: f32, @location(1) id: u32 };
             struct Out { @builtin(position) pos: vec4<f32>, @location(0) tint: vec3<f32> };
             @vertex fn main(v: In) -> Out {
                 var o: Out;
                 o.pos = vec4<f32>(v.weight, 0.0, 0.0, 1.0);
                 o.tint = vec3<f32>(f32(v.id));
                 return o;
             }",
        );
        let locations: Vec<u32> = iface.inputs.iter().map(|v| v.location).collect();
        assert_eq!(locations, vec![1, 3]);
        assert_eq!(iface.input_at(1).unwrap().ty, InterfaceType::new(ScalarType::Uint32, 1));
        assert_eq!(iface.output_at(0).unwrap().name, "tint");
        assert_eq!(iface.outputs.len(), 1);
    }

    #[test]
    fn display_uses_wgsl_spelling() {
        assert_eq!(InterfaceType::new(ScalarType::Float32, 2).to_string(), "vec2<f32>");
        assert_eq!(InterfaceType::new(ScalarType::Sint32, 1).to_string(), "i32");
    }
}
