use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::AtomVizError;

/// Shared WGSL modules, registered in dependency order.
const MODULES: &[(&str, &str)] = &[
    (
        "modules/fullscreen.wgsl",
        include_str!("../../assets/shaders/modules/fullscreen.wgsl"),
    ),
    (
        "modules/camera.wgsl",
        include_str!("../../assets/shaders/modules/camera.wgsl"),
    ),
    (
        "modules/object.wgsl",
        include_str!("../../assets/shaders/modules/object.wgsl"),
    ),
    (
        "modules/lighting.wgsl",
        include_str!("../../assets/shaders/modules/lighting.wgsl"),
    ),
    (
        "modules/tonemap.wgsl",
        include_str!("../../assets/shaders/modules/tonemap.wgsl"),
    ),
];

/// Entry-point shaders, looked up by their path under `assets/shaders/`.
const SHADERS: &[(&str, &str)] = &[
    (
        "raster/standard.wgsl",
        include_str!("../../assets/shaders/raster/standard.wgsl"),
    ),
    (
        "raster/basic.wgsl",
        include_str!("../../assets/shaders/raster/basic.wgsl"),
    ),
    (
        "screen/bloom_threshold.wgsl",
        include_str!("../../assets/shaders/screen/bloom_threshold.wgsl"),
    ),
    (
        "screen/bloom_blur.wgsl",
        include_str!("../../assets/shaders/screen/bloom_blur.wgsl"),
    ),
    (
        "screen/bloom_composite.wgsl",
        include_str!("../../assets/shaders/screen/bloom_composite.wgsl"),
    ),
    (
        "screen/composite.wgsl",
        include_str!("../../assets/shaders/screen/composite.wgsl"),
    ),
];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared modules are registered at construction time; entry-point shaders
/// pull them in with `#import atomviz::module_name::{...}`. Composition
/// produces `naga::Module` IR directly, skipping a WGSL re-parse in wgpu.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, AtomVizError> {
        let mut composer = Composer::default();

        for &(file_path, source) in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source,
                    file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    AtomVizError::Shader(format!(
                        "failed to register module '{file_path}': {e}"
                    ))
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose the shader registered under `path` into a
    /// `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Shader`] if the path is unknown or the
    /// shader fails to compose.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        path: &str,
    ) -> Result<wgpu::ShaderModule, AtomVizError> {
        let naga_module = self.compose_naga(path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a registered shader into a `naga::Module` without touching a
    /// GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`AtomVizError::Shader`] if the path is unknown or the
    /// shader fails to compose.
    pub fn compose_naga(
        &mut self,
        path: &str,
    ) -> Result<naga::Module, AtomVizError> {
        let source = shader_source(path).ok_or_else(|| {
            AtomVizError::Shader(format!("unknown shader '{path}'"))
        })?;
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path: path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                AtomVizError::Shader(format!(
                    "failed to compose '{path}': {e}"
                ))
            })
    }
}

fn shader_source(path: &str) -> Option<&'static str> {
    SHADERS
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, source)| *source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (path, _) in SHADERS {
            if let Err(e) = composer.compose_naga(path) {
                panic!("shader '{path}' failed to compose: {e}");
            }
        }
    }

    #[test]
    fn unknown_shader_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer.compose_naga("screen/fxaa.wgsl").unwrap_err();
        assert!(err.to_string().contains("unknown shader"));
    }
}
