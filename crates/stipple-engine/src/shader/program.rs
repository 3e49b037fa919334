use super::link::{LinkedProgram, ProgramId};
use super::source::ShaderPaths;
use crate::error::{ShaderError, Stage};

/// A linked program realized on the GPU as one shader module per stage.
pub struct ShaderProgram {
    linked: LinkedProgram,
    vertex_module: wgpu::ShaderModule,
    fragment_module: wgpu::ShaderModule,
}

impl ShaderProgram {
    /// Loads both WGSL files, compiles, links and creates the GPU modules.
    pub fn from_files(device: &wgpu::Device, paths: &ShaderPaths) -> Result<Self, ShaderError> {
        LinkedProgram::from_files(paths).map(|linked| Self::from_linked(device, linked))
    }

    /// Creates the GPU modules for an already linked pair.
    ///
    /// The sources were validated by the same naga version wgpu uses, so module
    /// creation does not fail for them.
    pub fn from_linked(device: &wgpu::Device, linked: LinkedProgram) -> Self {
        let vertex_module = create_module(device, &linked, Stage::Vertex);
        let fragment_module = create_module(device, &linked, Stage::Fragment);

        log::debug!("shader program {} created", linked.id());

        Self {
            linked,
            vertex_module,
            fragment_module,
        }
    }

    pub fn id(&self) -> ProgramId {
        self.linked.id()
    }

    pub fn linked(&self) -> &LinkedProgram {
        &self.linked
    }

    /// Module and entry point name for `stage`.
    pub fn module(&self, stage: Stage) -> (&wgpu::ShaderModule, &str) {
        let module = match stage {
            Stage::Vertex => &self.vertex_module,
            Stage::Fragment => &self.fragment_module,
        };
        (module, self.linked.stage(stage).entry_point())
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        log::debug!("shader program {} released", self.linked.id());
    }
}

fn create_module(device: &wgpu::Device, linked: &LinkedProgram, stage: Stage) -> wgpu::ShaderModule {
    let label = format!("stipple program {} {stage}", linked.id());
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&label),
        source: wgpu::ShaderSource::Wgsl(linked.stage(stage).source().into()),
    })
}
