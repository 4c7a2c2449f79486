//! `Appearance` and `Material`, the look attached to a `Shape`.

use crate::float_types::Real;
use std::sync::Arc;

/// Shared, read-only reference to an [`Appearance`].
///
/// Every `Shape` built from the same handle points at the same allocation;
/// use [`Arc::ptr_eq`] to tell whether two shapes share their look.
pub type AppearanceHandle = Arc<Appearance>;

/// X3D `Material` node. Field defaults follow the X3D standard.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub diffuse_color: [Real; 3],
    pub emissive_color: [Real; 3],
    pub specular_color: [Real; 3],
    pub ambient_intensity: Real,
    pub shininess: Real,
    pub transparency: Real,
}

impl Material {
    pub const DEFAULT_DIFFUSE_COLOR: [Real; 3] = [0.8, 0.8, 0.8];
    pub const DEFAULT_AMBIENT_INTENSITY: Real = 0.2;
    pub const DEFAULT_SHININESS: Real = 0.2;

    /// A default material with the given diffuse colour (components in `0.0..=1.0`).
    pub fn diffuse(r: Real, g: Real, b: Real) -> Self {
        Material { diffuse_color: [r, g, b], ..Default::default() }
    }

    pub const fn with_emissive(mut self, r: Real, g: Real, b: Real) -> Self {
        self.emissive_color = [r, g, b];
        self
    }

    pub const fn with_transparency(mut self, transparency: Real) -> Self {
        self.transparency = transparency;
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            diffuse_color: Self::DEFAULT_DIFFUSE_COLOR,
            emissive_color: [0.0; 3],
            specular_color: [0.0; 3],
            ambient_intensity: Self::DEFAULT_AMBIENT_INTENSITY,
            shininess: Self::DEFAULT_SHININESS,
            transparency: 0.0,
        }
    }
}

/// X3D `Appearance` node.
///
/// `name` is used as the `DEF` name when the appearance is encoded; when it is
/// `None` the encoder makes one up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Appearance {
    pub name: Option<String>,
    pub material: Option<Material>,
}

impl Appearance {
    pub const fn new() -> Self {
        Appearance { name: None, material: None }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Freeze this appearance into a shareable handle.
    pub fn into_handle(self) -> AppearanceHandle {
        Arc::new(self)
    }
}
