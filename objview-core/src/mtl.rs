/// Wavefront MTL material library parser
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use nom::{
    character::complete::i64 as signed,
    combinator::all_consuming,
    number::complete::float,
};

use crate::obj::strip_comment;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub ambient: Color,
    pub diffuse: Color,
    pub specular: Color,
    pub shininess: f32,
    /// Opacity, 1 is opaque and 0 fully transparent.
    pub dissolve: f32,
    pub illumination: bool,
    pub texture_map: Option<String>,
}

impl Material {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Color::new(0.2, 0.2, 0.2),
            diffuse: Color::new(0.8, 0.8, 0.8),
            specular: Color::new(0.0, 0.0, 0.0),
            shininess: 0.0,
            dissolve: 1.0,
            illumination: false,
            texture_map: None,
        }
    }
}

pub type MaterialLibrary = HashMap<String, Material>;

/// Parse material definitions. Fields that fail to parse leave the value
/// they would have set untouched; the rest of the record is still applied
/// up to the first bad token.
pub fn parse_mtl(source: &str) -> MaterialLibrary {
    let mut library = MaterialLibrary::new();
    let mut current = Material::default();

    for line in source.lines() {
        let mut tokens = strip_comment(line).split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword {
            "newmtl" => {
                commit(&mut library, current);
                current = Material::named(tokens.next().unwrap_or_default());
            }
            "Ka" => read_color(&mut current.ambient, tokens),
            "Kd" => read_color(&mut current.diffuse, tokens),
            "Ks" => read_color(&mut current.specular, tokens),
            "Ns" => read_float(&mut current.shininess, tokens.next()),
            "d" | "Tr" => read_float(&mut current.dissolve, tokens.next()),
            "illum" => {
                if let Some(value) = tokens.next().and_then(integer) {
                    current.illumination = value > 0;
                }
            }
            "map_Kd" => {
                if let Some(path) = tokens.next() {
                    current.texture_map = Some(path.to_string());
                }
            }
            _ => {}
        }
    }
    commit(&mut library, current);

    debug!("parsed MTL: {} materials", library.len());
    library
}

pub fn read_mtl(path: impl AsRef<Path>) -> io::Result<MaterialLibrary> {
    let bytes = fs::read(path)?;
    Ok(parse_mtl(&String::from_utf8_lossy(&bytes)))
}

/// Parse a material file, or `None` when it cannot be opened.
pub fn load_mtl(path: impl AsRef<Path>) -> Option<MaterialLibrary> {
    let path = path.as_ref();
    match read_mtl(path) {
        Ok(library) => Some(library),
        Err(err) => {
            warn!("failed to open material library {}: {err}", path.display());
            None
        }
    }
}

fn commit(library: &mut MaterialLibrary, material: Material) {
    if !material.name.is_empty() {
        library.insert(material.name.clone(), material);
    }
}

fn number(token: &str) -> Option<f32> {
    all_consuming(float::<_, nom::error::Error<&str>>)(token)
        .ok()
        .map(|(_, value)| value)
}

fn integer(token: &str) -> Option<i64> {
    all_consuming(signed::<_, nom::error::Error<&str>>)(token)
        .ok()
        .map(|(_, value)| value)
}

fn read_float(slot: &mut f32, token: Option<&str>) {
    if let Some(value) = token.and_then(number) {
        *slot = value;
    }
}

fn read_color<'a>(color: &mut Color, mut tokens: impl Iterator<Item = &'a str>) {
    for channel in [&mut color.r, &mut color.g, &mut color.b] {
        match tokens.next().and_then(number) {
            Some(value) => *channel = value,
            None => break,
        }
    }
}
