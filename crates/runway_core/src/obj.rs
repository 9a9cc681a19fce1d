//! Wavefront OBJ/MTL loading
//!
//! Supports the subset exported by common modelling tools:
//!
//! - `v`, `vt`, `vn` vertex data
//! - `f` faces in all four index forms (`v`, `v/vt`, `v//vn`, `v/vt/vn`),
//!   negative (relative) indices and n-gons (fan triangulated)
//! - `o` / `g` groups and `usemtl` / `mtllib` materials
//!
//! Smoothing groups, lines and free-form geometry are ignored. A model gets
//! one [`Mesh`] per run of faces sharing an object and material.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use runway_math::{quad_normal, Vec3};

use crate::asset_cache::Asset;
use crate::asset_error::AssetError;
use crate::mesh::{Material, Mesh, MeshVertex, Model};

/// Error loading an OBJ or MTL file
#[derive(Debug)]
pub enum ObjError {
    /// IO error reading the file
    Io(io::Error),
    /// Malformed statement
    Syntax { line: usize, message: String },
    /// A face references a vertex, texcoord or normal that does not exist
    InvalidIndex { line: usize, index: i64 },
    /// The file contains no faces
    NoFaces,
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjError::Io(e) => write!(f, "IO error: {}", e),
            ObjError::Syntax { line, message } => write!(f, "line {}: {}", line, message),
            ObjError::InvalidIndex { line, index } => {
                write!(f, "line {}: index {} out of range", line, index)
            }
            ObjError::NoFaces => write!(f, "model has no faces"),
        }
    }
}

impl std::error::Error for ObjError {}

impl From<io::Error> for ObjError {
    fn from(e: io::Error) -> Self {
        ObjError::Io(e)
    }
}

impl Asset for Model {
    fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        let model = load_obj(path)?;
        log::info!(
            "Loaded model '{}': {} meshes, {} vertices, {} triangles",
            model.name,
            model.meshes.len(),
            model.vertex_count(),
            model.triangle_count()
        );
        Ok(model)
    }
}

/// Load an OBJ file, resolving `mtllib` references next to it
///
/// A material library that cannot be read is logged and skipped; faces then
/// use the default material.
pub fn load_obj(path: &Path) -> Result<Model, ObjError> {
    let source = fs::read_to_string(path)?;
    let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    parse_obj(&source, &name, |library| {
        let mtl_path = base_dir.join(normalize_separators(library));
        match load_mtl(&mtl_path) {
            Ok(materials) => materials,
            Err(e) => {
                log::warn!("Skipping material library {}: {}", mtl_path.display(), e);
                HashMap::new()
            }
        }
    })
}

/// Load an MTL file; texture paths resolve against its directory
pub fn load_mtl(path: &Path) -> Result<HashMap<String, Material>, ObjError> {
    let source = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    parse_mtl(&source, base_dir)
}

/// Index triple of one face corner (0-based, resolved)
type Corner = (usize, Option<usize>, Option<usize>);

/// Accumulates one mesh while faces stream in
struct MeshBuilder {
    mesh: Mesh,
    corner_index: HashMap<Corner, u32>,
}

impl MeshBuilder {
    fn new(name: String, material: Material) -> Self {
        Self {
            mesh: Mesh::new(name, material),
            corner_index: HashMap::new(),
        }
    }

    fn push_shared(&mut self, corner: Corner, vertex: MeshVertex) -> u32 {
        if let Some(&i) = self.corner_index.get(&corner) {
            return i;
        }
        let i = self.push_unique(vertex);
        self.corner_index.insert(corner, i);
        i
    }

    fn push_unique(&mut self, vertex: MeshVertex) -> u32 {
        let i = self.mesh.vertices.len() as u32;
        self.mesh.vertices.push(vertex);
        i
    }
}

/// Parse OBJ source text
///
/// `resolve_library` is called with each `mtllib` argument and returns the
/// materials it defines.
pub fn parse_obj<F>(source: &str, name: &str, mut resolve_library: F) -> Result<Model, ObjError>
where
    F: FnMut(&str) -> HashMap<String, Material>,
{
    let mut positions: Vec<Vec3> = Vec::new();
    let mut texcoords: Vec<[f32; 2]> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut materials: HashMap<String, Material> = HashMap::new();

    let mut object = name.to_string();
    let mut material_name: Option<String> = None;
    let mut current: Option<MeshBuilder> = None;
    let mut meshes: Vec<Mesh> = Vec::new();

    for (line_index, raw) in source.lines().enumerate() {
        let line = line_index + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let mut tokens = content.split_whitespace();
        let keyword = tokens.next().unwrap_or("");
        let args: Vec<&str> = tokens.collect();

        match keyword {
            "v" => positions.push(Vec3::from_array(parse_floats::<3>(&args, line, 3)?)),
            "vn" => normals.push(Vec3::from_array(parse_floats::<3>(&args, line, 3)?)),
            "vt" => texcoords.push(parse_floats::<2>(&args, line, 1)?),
            "o" | "g" => {
                flush(&mut current, &mut meshes);
                if let Some(group) = args.first() {
                    object = args.join(" ");
                    log::trace!("OBJ group '{}' at line {}", group, line);
                }
            }
            "usemtl" => {
                flush(&mut current, &mut meshes);
                material_name = Some(args.join(" "));
            }
            "mtllib" => {
                for library in &args {
                    materials.extend(resolve_library(library));
                }
            }
            "f" => {
                if args.len() < 3 {
                    return Err(ObjError::Syntax {
                        line,
                        message: format!("face needs at least 3 vertices, got {}", args.len()),
                    });
                }

                let corners = args
                    .iter()
                    .map(|token| {
                        parse_corner(token, line, positions.len(), texcoords.len(), normals.len())
                    })
                    .collect::<Result<Vec<Corner>, ObjError>>()?;

                let builder = current.get_or_insert_with(|| {
                    let material = lookup_material(&materials, material_name.as_deref());
                    let mesh_name = match &material_name {
                        Some(m) => format!("{}/{}", object, m),
                        None => object.clone(),
                    };
                    MeshBuilder::new(mesh_name, material)
                });

                let face_normal = quad_normal(
                    positions[corners[0].0],
                    positions[corners[1].0],
                    positions[corners[2].0],
                );

                let indices: Vec<u32> = corners
                    .iter()
                    .map(|&corner| {
                        let (v, vt, vn) = corner;
                        let uv = vt.map(|t| texcoords[t]).unwrap_or([0.0, 0.0]);
                        match vn {
                            Some(n) => builder.push_shared(
                                corner,
                                MeshVertex::new(positions[v], normals[n].normalized(), uv),
                            ),
                            None => builder.push_unique(MeshVertex::new(positions[v], face_normal, uv)),
                        }
                    })
                    .collect();

                // Fan triangulation
                for k in 1..indices.len() - 1 {
                    builder.mesh.indices.extend_from_slice(&[indices[0], indices[k], indices[k + 1]]);
                }
            }
            _ => {}
        }
    }

    flush(&mut current, &mut meshes);

    if meshes.is_empty() {
        return Err(ObjError::NoFaces);
    }

    Ok(Model {
        name: name.to_string(),
        meshes,
    })
}

/// Parse MTL source text
pub fn parse_mtl(source: &str, base_dir: &Path) -> Result<HashMap<String, Material>, ObjError> {
    let mut materials = HashMap::new();
    let mut current: Option<Material> = None;

    for (line_index, raw) in source.lines().enumerate() {
        let line = line_index + 1;
        let content = raw.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let mut tokens = content.split_whitespace();
        let keyword = tokens.next().unwrap_or("");
        let args: Vec<&str> = tokens.collect();

        if keyword == "newmtl" {
            if let Some(done) = current.take() {
                materials.insert(done.name.clone(), done);
            }
            current = Some(Material {
                name: args.join(" "),
                ..Material::default()
            });
            continue;
        }

        let Some(material) = current.as_mut() else {
            log::warn!("MTL line {}: '{}' before any newmtl, ignored", line, keyword);
            continue;
        };

        match keyword {
            "Ka" => material.ambient = parse_color(&args, line)?,
            "Kd" => material.diffuse = parse_color(&args, line)?,
            "Ks" => material.specular = parse_color(&args, line)?,
            "Ke" => material.emission = parse_color(&args, line)?,
            "Ns" => material.shininess = parse_floats::<1>(&args, line, 1)?[0],
            "d" => material.opacity = parse_floats::<1>(&args, line, 1)?[0],
            "Tr" => material.opacity = 1.0 - parse_floats::<1>(&args, line, 1)?[0],
            "map_Kd" => {
                // Options (-s, -o, ...) precede the file name
                let file = args.last().ok_or_else(|| ObjError::Syntax {
                    line,
                    message: "map_Kd without a file name".to_string(),
                })?;
                material.diffuse_texture = Some(base_dir.join(normalize_separators(file)));
            }
            _ => {}
        }
    }

    if let Some(done) = current.take() {
        materials.insert(done.name.clone(), done);
    }

    Ok(materials)
}

fn flush(current: &mut Option<MeshBuilder>, meshes: &mut Vec<Mesh>) {
    if let Some(builder) = current.take() {
        if !builder.mesh.is_empty() {
            meshes.push(builder.mesh);
        }
    }
}

fn lookup_material(materials: &HashMap<String, Material>, name: Option<&str>) -> Material {
    match name {
        None => Material::default(),
        Some(name) => materials.get(name).cloned().unwrap_or_else(|| {
            log::warn!("Material '{}' not defined, using default", name);
            Material {
                name: name.to_string(),
                ..Material::default()
            }
        }),
    }
}

/// Parse up to `N` floats, requiring at least `required`; missing trailing values are 0
fn parse_floats<const N: usize>(args: &[&str], line: usize, required: usize) -> Result<[f32; N], ObjError> {
    if args.len() < required {
        return Err(ObjError::Syntax {
            line,
            message: format!("expected {} numbers, got {}", required, args.len()),
        });
    }

    let mut values = [0.0f32; N];
    for (value, token) in values.iter_mut().zip(args.iter()) {
        *value = token.parse().map_err(|_| ObjError::Syntax {
            line,
            message: format!("invalid number '{}'", token),
        })?;
    }
    Ok(values)
}

/// Parse an RGB triple; a single value is used for all three channels
fn parse_color(args: &[&str], line: usize) -> Result<[f32; 3], ObjError> {
    if args.len() == 1 {
        let v = parse_floats::<1>(args, line, 1)?[0];
        return Ok([v, v, v]);
    }
    parse_floats::<3>(args, line, 3)
}

/// Resolve a 1-based (or negative, relative) OBJ index against `count` elements
fn resolve_index(token: &str, line: usize, count: usize) -> Result<usize, ObjError> {
    let index: i64 = token.parse().map_err(|_| ObjError::Syntax {
        line,
        message: format!("invalid index '{}'", token),
    })?;

    let resolved = if index > 0 {
        index - 1
    } else {
        count as i64 + index
    };

    if index == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(ObjError::InvalidIndex { line, index });
    }
    Ok(resolved as usize)
}

fn parse_corner(
    token: &str,
    line: usize,
    position_count: usize,
    texcoord_count: usize,
    normal_count: usize,
) -> Result<Corner, ObjError> {
    let mut parts = token.split('/');
    let v = resolve_index(parts.next().unwrap_or(""), line, position_count)?;
    let vt = match parts.next() {
        Some(t) if !t.is_empty() => Some(resolve_index(t, line, texcoord_count)?),
        _ => None,
    };
    let vn = match parts.next() {
        Some(n) if !n.is_empty() => Some(resolve_index(n, line, normal_count)?),
        _ => None,
    };
    Ok((v, vt, vn))
}

/// Paths authored on Windows use backslashes
fn normalize_separators(path: &str) -> PathBuf {
    PathBuf::from(path.replace('\\', "/"))
}
