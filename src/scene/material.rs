use glam::Vec3;

/// Surface description consumed by the raster pipelines.
///
/// Colors are linear RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lit surface with emissive glow (metal/roughness model).
    Standard {
        /// Base color.
        color: Vec3,
        /// Emissive color.
        emissive: Vec3,
        /// Emissive multiplier; values above 1 feed the bloom pass.
        emissive_intensity: f32,
        /// 0 = mirror, 1 = matte.
        roughness: f32,
        /// 0 = dielectric, 1 = metal.
        metalness: f32,
    },
    /// Unlit, optionally translucent surface.
    Basic {
        /// Flat color.
        color: Vec3,
        /// Alpha in `[0, 1]`.
        opacity: f32,
    },
    /// Unlit line.
    Line {
        /// Flat color.
        color: Vec3,
        /// Alpha in `[0, 1]`.
        opacity: f32,
    },
}

impl Material {
    /// Whether the material must be drawn after opaque geometry.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        match *self {
            Self::Standard { .. } => false,
            Self::Basic { opacity, .. } | Self::Line { opacity, .. } => {
                opacity < 1.0
            }
        }
    }

    /// Emissive multiplier, `None` for unlit materials.
    #[must_use]
    pub fn emissive_intensity(&self) -> Option<f32> {
        match *self {
            Self::Standard {
                emissive_intensity, ..
            } => Some(emissive_intensity),
            Self::Basic { .. } | Self::Line { .. } => None,
        }
    }

    /// Update the emissive multiplier. No-op for unlit materials.
    pub fn set_emissive_intensity(&mut self, value: f32) {
        if let Self::Standard {
            emissive_intensity, ..
        } = self
        {
            *emissive_intensity = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_standard_materials_glow() {
        let mut lit = Material::Standard {
            color: Vec3::ONE,
            emissive: Vec3::X,
            emissive_intensity: 1.0,
            roughness: 0.5,
            metalness: 0.0,
        };
        lit.set_emissive_intensity(3.0);
        assert_eq!(lit.emissive_intensity(), Some(3.0));
        assert!(!lit.is_transparent());

        let mut ring = Material::Basic {
            color: Vec3::ONE,
            opacity: 0.5,
        };
        ring.set_emissive_intensity(3.0);
        assert_eq!(ring.emissive_intensity(), None);
        assert!(ring.is_transparent());
    }
}
