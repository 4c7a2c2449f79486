//! X3D XML encoding of node trees.
//!
//! Fields equal to their X3D default are left out, like most X3D exporters do.
//! A shared `AppearanceHandle` is written once with `DEF` and referenced with
//! `USE` afterwards, so sharing survives a round trip through a viewer.

use crate::float_types::{Real, nearly_equal};
use crate::nodes::{
    Appearance, AppearanceHandle, Circle2D, Cone, Geometry, IndexedFaceSet, Material, Node, Shape,
    Sphere, Transform,
};
use std::io::Write;
use std::sync::Arc;

const INDENT: &str = "  ";

type Attributes = Vec<(&'static str, String)>;

/// How an appearance shows up in the output.
enum AppearanceRef {
    Define(String),
    Use(String),
}

/// Formats a scalar the way X3D field values are written. `-0` is printed as `0`.
fn fmt_real(value: Real) -> String {
    if value == 0.0 { "0".to_string() } else { format!("{value}") }
}

fn fmt_reals(values: &[Real]) -> String {
    values.iter().map(|&v| fmt_real(v)).collect::<Vec<_>>().join(" ")
}

fn fmt_bool(value: bool) -> String {
    let text = if value { "true" } else { "false" };
    text.to_string()
}

/// Turns an arbitrary name into a valid X3D `DEF` id: characters outside
/// `[A-Za-z0-9_.-]` become `_`, and a name that is empty or starts with a digit,
/// `-` or `.` gets a leading `_`.
fn sanitize_def_name(name: &str) -> String {
    let mut id: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') { c } else { '_' })
        .collect();
    if id.chars().next().is_none_or(|c| c.is_ascii_digit() || c == '-' || c == '.') {
        id.insert(0, '_');
    }
    id
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Accumulates XML text plus the `DEF` names handed out so far.
#[derive(Default)]
struct X3dWriter {
    out: String,
    defined: Vec<(*const Appearance, String)>,
    generated: usize,
    uses_geometry_2d: bool,
}

impl X3dWriter {
    fn element(&mut self, depth: usize, name: &str, attributes: &[(&'static str, String)], empty: bool) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attributes {
            self.out.push_str(&format!(" {key}='{}'", escape_attribute(value)));
        }
        self.out.push_str(if empty { "/>\n" } else { ">\n" });
    }

    fn close(&mut self, depth: usize, name: &str) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(&format!("</{name}>\n"));
    }

    fn node(&mut self, node: &Node, depth: usize) {
        match node {
            Node::Transform(transform) => self.transform(transform, depth),
            Node::Shape(shape) => self.shape(shape, depth),
        }
    }

    fn transform(&mut self, transform: &Transform, depth: usize) {
        let mut attributes = Attributes::new();
        if !transform.has_identity_translation() {
            attributes.push(("translation", fmt_reals(transform.translation.as_slice())));
        }
        if !transform.rotation.is_identity() {
            attributes.push(("rotation", fmt_reals(&transform.rotation.to_array())));
        }

        if transform.children.is_empty() {
            self.element(depth, "Transform", &attributes, true);
            return;
        }
        self.element(depth, "Transform", &attributes, false);
        for child in &transform.children {
            self.node(child, depth + 1);
        }
        self.close(depth, "Transform");
    }

    fn shape(&mut self, shape: &Shape, depth: usize) {
        self.element(depth, "Shape", &[], false);
        if let Some(appearance) = &shape.appearance {
            self.appearance(appearance, depth + 1);
        }
        self.geometry(&shape.geometry, depth + 1);
        self.close(depth, "Shape");
    }

    fn is_taken(&self, name: &str) -> bool {
        self.defined.iter().any(|(_, taken)| taken == name)
    }

    /// Reuses an existing `DEF` if this exact allocation was written before.
    /// New names are unique within the writer: a user name that is already
    /// taken gets a `_1`, `_2`, ... suffix.
    fn def_name(&mut self, appearance: &AppearanceHandle) -> AppearanceRef {
        let key = Arc::as_ptr(appearance);
        if let Some((_, name)) = self.defined.iter().find(|(ptr, _)| *ptr == key) {
            return AppearanceRef::Use(name.clone());
        }

        let name = match appearance.name.as_deref().map(sanitize_def_name) {
            Some(base) if !self.is_taken(&base) => base,
            Some(base) => {
                let mut suffix = 1;
                loop {
                    let candidate = format!("{base}_{suffix}");
                    suffix += 1;
                    if !self.is_taken(&candidate) {
                        break candidate;
                    }
                }
            },
            None => loop {
                let candidate = format!("Appearance_{}", self.generated);
                self.generated += 1;
                if !self.is_taken(&candidate) {
                    break candidate;
                }
            },
        };
        self.defined.push((key, name.clone()));
        AppearanceRef::Define(name)
    }

    fn appearance(&mut self, appearance: &AppearanceHandle, depth: usize) {
        let name = match self.def_name(appearance) {
            AppearanceRef::Define(name) => name,
            AppearanceRef::Use(used) => {
                self.element(depth, "Appearance", &[("USE", used)], true);
                return;
            },
        };

        match &appearance.material {
            None => self.element(depth, "Appearance", &[("DEF", name)], true),
            Some(material) => {
                self.element(depth, "Appearance", &[("DEF", name)], false);
                self.material(material, depth + 1);
                self.close(depth, "Appearance");
            },
        }
    }

    /// Material fields are compared exactly, so any value the caller changed is kept.
    fn material(&mut self, material: &Material, depth: usize) {
        let defaults = Material::default();
        let mut attributes = Attributes::new();
        let colors = [
            ("diffuseColor", &material.diffuse_color, &defaults.diffuse_color),
            ("emissiveColor", &material.emissive_color, &defaults.emissive_color),
            ("specularColor", &material.specular_color, &defaults.specular_color),
        ];
        for (key, value, default) in colors {
            if value != default {
                attributes.push((key, fmt_reals(value)));
            }
        }
        let scalars = [
            ("ambientIntensity", material.ambient_intensity, defaults.ambient_intensity),
            ("shininess", material.shininess, defaults.shininess),
            ("transparency", material.transparency, defaults.transparency),
        ];
        for (key, value, default) in scalars {
            if value != default {
                attributes.push((key, fmt_real(value)));
            }
        }
        self.element(depth, "Material", &attributes, true);
    }

    fn geometry(&mut self, geometry: &Geometry, depth: usize) {
        let name = geometry.node_name();
        match geometry {
            Geometry::Sphere(sphere) => {
                let mut attributes = Attributes::new();
                if !nearly_equal(sphere.radius, Sphere::DEFAULT_RADIUS) {
                    attributes.push(("radius", fmt_real(sphere.radius)));
                }
                self.element(depth, name, &attributes, true);
            },
            Geometry::Cone(cone) => {
                let mut attributes = Attributes::new();
                if !nearly_equal(cone.bottom_radius, Cone::DEFAULT_BOTTOM_RADIUS) {
                    attributes.push(("bottomRadius", fmt_real(cone.bottom_radius)));
                }
                if !nearly_equal(cone.height, Cone::DEFAULT_HEIGHT) {
                    attributes.push(("height", fmt_real(cone.height)));
                }
                if !cone.side {
                    attributes.push(("side", fmt_bool(cone.side)));
                }
                if !cone.bottom {
                    attributes.push(("bottom", fmt_bool(cone.bottom)));
                }
                self.element(depth, name, &attributes, true);
            },
            Geometry::Circle2D(circle) => {
                self.uses_geometry_2d = true;
                let mut attributes = Attributes::new();
                if !nearly_equal(circle.radius, Circle2D::DEFAULT_RADIUS) {
                    attributes.push(("radius", fmt_real(circle.radius)));
                }
                self.element(depth, name, &attributes, true);
            },
            Geometry::IndexedFaceSet(ifs) => self.indexed_face_set(ifs, depth),
        }
    }

    fn indexed_face_set(&mut self, ifs: &IndexedFaceSet, depth: usize) {
        let mut attributes = Attributes::new();
        for (key, value) in [("solid", ifs.solid), ("ccw", ifs.ccw), ("convex", ifs.convex)] {
            if !value {
                attributes.push((key, fmt_bool(value)));
            }
        }
        let index = ifs.coord_index.iter().map(i32::to_string).collect::<Vec<_>>().join(" ");
        attributes.push(("coordIndex", index));

        self.element(depth, "IndexedFaceSet", &attributes, false);
        let points = ifs
            .coord
            .point
            .iter()
            .map(|p| fmt_reals(&[p.x, p.y, p.z]))
            .collect::<Vec<_>>()
            .join(", ");
        self.element(depth + 1, "Coordinate", &[("point", points)], true);
        self.close(depth, "IndexedFaceSet");
    }
}

/// Encode a single node tree as an X3D XML fragment (no document prologue).
pub fn to_x3d_xml(node: &Node) -> String {
    let mut writer = X3dWriter::default();
    writer.node(node, 0);
    writer.out
}

/// Encode node trees as a complete X3D document.
///
/// The `Interchange` profile covers everything except `Circle2D`; when one is
/// present a `Geometry2D` component statement is added to the head. Appearance
/// sharing is tracked across all `nodes`.
pub fn to_x3d_document(nodes: &[Node]) -> String {
    let mut writer = X3dWriter::default();
    for node in nodes {
        writer.node(node, 2);
    }

    let mut document = String::new();
    document.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    document.push_str("<X3D profile='Interchange' version='3.3'>\n");
    if writer.uses_geometry_2d {
        document.push_str("  <head>\n");
        document.push_str("    <component name='Geometry2D' level='1'/>\n");
        document.push_str("  </head>\n");
    }
    document.push_str("  <Scene>\n");
    document.push_str(&writer.out);
    document.push_str("  </Scene>\n");
    document.push_str("</X3D>\n");
    document
}

/// Encode a node tree as an X3D XML fragment into `writer`.
pub fn write_x3d_xml<W: Write>(node: &Node, writer: &mut W) -> std::io::Result<()> {
    let xml = to_x3d_xml(node);
    writer.write_all(xml.as_bytes())
}

impl Node {
    pub fn to_x3d_xml(&self) -> String {
        self::to_x3d_xml(self)
    }

    pub fn write_x3d_xml<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        self::write_x3d_xml(self, writer)
    }
}

impl Transform {
    /// Encodes a clone of this transform; see [`to_x3d_xml`].
    pub fn to_x3d_xml(&self) -> String {
        self::to_x3d_xml(&Node::Transform(self.clone()))
    }
}
