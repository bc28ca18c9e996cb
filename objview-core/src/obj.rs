/// Wavefront OBJ text parser
///
/// Reads positions, normals, texture coordinates, faces and the material
/// library reference. Records with unknown keywords are ignored and records
/// whose fields do not parse are skipped with a warning; a bad line never
/// aborts the load. Face indices are stored 0-based and are not range
/// checked here, see [`crate::assemble`].
use std::fs;
use std::io;
use std::path::Path;

use log::{debug, warn};
use nalgebra::{Point2, Point3, Vector3};
use nom::{
    branch::alt,
    character::complete::{char, i64 as signed, space0, space1},
    combinator::{all_consuming, eof, map_res, opt, peek},
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};

/// One corner of a face. Each index is optional and 0-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceCorner {
    pub position: Option<usize>,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
}

impl FaceCorner {
    pub fn new(position: Option<usize>, tex_coord: Option<usize>, normal: Option<usize>) -> Self {
        Self {
            position,
            tex_coord,
            normal,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Face {
    pub corners: Vec<FaceCorner>,
}

/// Parsed contents of an OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjModel {
    pub vertices: Vec<Point3<f32>>,
    pub normals: Vec<Vector3<f32>>,
    pub tex_coords: Vec<Point2<f32>>,
    pub faces: Vec<Face>,
    pub material_library: Option<String>,
}

impl ObjModel {
    pub fn parse(source: &str) -> Self {
        let mut model = Self::default();
        let mut skipped = 0usize;

        for (number, line) in source.lines().enumerate() {
            let line = strip_comment(line).trim();
            let (keyword, rest) = line
                .split_once(|c: char| c.is_whitespace())
                .unwrap_or((line, ""));

            let accepted = match keyword {
                "v" => parse_record(vec3, rest)
                    .map(|v| model.vertices.push(Point3::from(v)))
                    .is_some(),
                "vn" => parse_record(vec3, rest)
                    .map(|n| model.normals.push(Vector3::from(n)))
                    .is_some(),
                "vt" => parse_record(vec2, rest)
                    .map(|t| model.tex_coords.push(Point2::from(t)))
                    .is_some(),
                "f" => parse_face(rest)
                    .map(|face| model.faces.push(face))
                    .is_some(),
                "mtllib" => rest
                    .split_whitespace()
                    .next()
                    .map(|name| model.material_library = Some(name.to_string()))
                    .is_some(),
                _ => true,
            };

            if !accepted {
                skipped += 1;
                warn!("skipping malformed `{keyword}` record on line {}", number + 1);
            }
        }

        debug!(
            "parsed OBJ: {} vertices, {} normals, {} tex coords, {} faces, {} lines skipped",
            model.vertices.len(),
            model.normals.len(),
            model.tex_coords.len(),
            model.faces.len(),
            skipped
        );

        model
    }

    /// Read and parse a file. Bytes that are not valid UTF-8 are replaced
    /// rather than rejected.
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        Ok(Self::parse(&String::from_utf8_lossy(&bytes)))
    }

    /// Parse a file, or `None` when it cannot be opened.
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::read(path) {
            Ok(model) => Some(model),
            Err(err) => {
                warn!("failed to open OBJ file {}: {err}", path.display());
                None
            }
        }
    }
}

pub(crate) fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(content, _)| content)
}

fn parse_record<T>(parser: fn(&str) -> IResult<&str, T>, input: &str) -> Option<T> {
    parser(input).ok().map(|(_, value)| value)
}

/// A float that ends at whitespace or end of input.
pub(crate) fn field(input: &str) -> IResult<&str, f32> {
    preceded(space0, terminated(float, peek(alt((space1, eof)))))(input)
}

fn vec3(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, x) = field(input)?;
    let (input, y) = field(input)?;
    let (input, z) = field(input)?;
    Ok((input, [x, y, z]))
}

fn vec2(input: &str) -> IResult<&str, [f32; 2]> {
    let (input, u) = field(input)?;
    let (input, v) = field(input)?;
    Ok((input, [u, v]))
}

/// 1-based index in the text, 0-based in memory.
fn index(input: &str) -> IResult<&str, usize> {
    map_res(signed, |raw: i64| {
        raw.checked_sub(1)
            .and_then(|zero_based| usize::try_from(zero_based).ok())
            .ok_or("face indices start at 1")
    })(input)
}

fn slot(input: &str) -> IResult<&str, Option<usize>> {
    let (input, value) = opt(preceded(char('/'), opt(index)))(input)?;
    Ok((input, value.flatten()))
}

/// `pos`, `pos/tex`, `pos//norm`, `pos/tex/norm`, with any slot left empty.
fn corner(input: &str) -> IResult<&str, FaceCorner> {
    let (input, position) = opt(index)(input)?;
    let (input, tex_coord) = slot(input)?;
    let (input, normal) = slot(input)?;
    Ok((input, FaceCorner::new(position, tex_coord, normal)))
}

fn whole_corner(input: &str) -> IResult<&str, FaceCorner> {
    all_consuming(corner)(input)
}

fn parse_face(input: &str) -> Option<Face> {
    input
        .split_whitespace()
        .map(|token| parse_record(whole_corner, token))
        .collect::<Option<Vec<_>>>()
        .map(|corners| Face { corners })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_append_in_file_order() {
        let model = ObjModel::parse(
            "v 1 2 3\n\
             v -1.5 0.25 4e2\n\
             vn 0 0 1\n\
             vt 0.5 0.75\n\
             vt 0.1 0.2 0.0\n",
        );
        assert_eq!(
            model.vertices,
            vec![Point3::new(1.0, 2.0, 3.0), Point3::new(-1.5, 0.25, 400.0)]
        );
        assert_eq!(model.normals, vec![Vector3::new(0.0, 0.0, 1.0)]);
        assert_eq!(
            model.tex_coords,
            vec![Point2::new(0.5, 0.75), Point2::new(0.1, 0.2)]
        );
    }

    #[test]
    fn test_face_indices_become_zero_based() {
        let model = ObjModel::parse("f 1 2 3\nf 4/5/6 7/8/9 10/11/12\n");
        assert_eq!(model.faces.len(), 2);
        assert_eq!(
            model.faces[0].corners,
            vec![
                FaceCorner::new(Some(0), None, None),
                FaceCorner::new(Some(1), None, None),
                FaceCorner::new(Some(2), None, None),
            ]
        );
        assert_eq!(model.faces[1].corners[2], FaceCorner::new(Some(9), Some(10), Some(11)));
    }

    #[test]
    fn test_face_corners_with_empty_slots() {
        let model = ObjModel::parse("f 1/1/1 2//2 3/3/\n");
        let corners = &model.faces[0].corners;
        assert_eq!(corners[0], FaceCorner::new(Some(0), Some(0), Some(0)));
        assert_eq!(corners[1], FaceCorner::new(Some(1), None, Some(1)));
        assert_eq!(corners[2], FaceCorner::new(Some(2), Some(2), None));
    }

    #[test]
    fn test_corner_without_position_is_kept_for_the_assembler() {
        let model = ObjModel::parse("f /1/1 2 3\n");
        assert_eq!(model.faces[0].corners[0], FaceCorner::new(None, Some(0), Some(0)));
    }

    #[test]
    fn test_faces_keep_every_corner() {
        let model = ObjModel::parse("f 1 2 3 4 5\nf 1 2\n");
        assert_eq!(model.faces[0].corners.len(), 5);
        assert_eq!(model.faces[1].corners.len(), 2);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let model = ObjModel::parse(
            "v 1 2\n\
             v 1 two 3\n\
             v 1.0 2.03.0 4\n\
             v 0 0 0\n\
             vn x y z\n\
             vt 1\n\
             f 1 a 3\n\
             f 0 1 2\n\
             f 1 2 3\n",
        );
        assert_eq!(model.vertices, vec![Point3::new(0.0, 0.0, 0.0)]);
        assert!(model.normals.is_empty());
        assert!(model.tex_coords.is_empty());
        assert_eq!(model.faces.len(), 1);
        assert_eq!(model.faces[0].corners[0].position, Some(0));
    }

    #[test]
    fn test_unknown_keywords_and_comments_are_ignored() {
        let model = ObjModel::parse(
            "# exported model\n\
             o cube\n\
             g group\n\
             s off\n\
             usemtl red\n\
             v 1 1 1 # trailing comment\n\
             \n",
        );
        assert_eq!(model.vertices.len(), 1);
        assert!(model.faces.is_empty());
    }

    #[test]
    fn test_extra_vertex_components_are_ignored() {
        let model = ObjModel::parse("v 1 2 3 1.0\n");
        assert_eq!(model.vertices, vec![Point3::new(1.0, 2.0, 3.0)]);
    }

    #[test]
    fn test_last_mtllib_wins() {
        let model = ObjModel::parse("mtllib first.mtl\nmtllib second.mtl\nmtllib\n");
        assert_eq!(model.material_library.as_deref(), Some("second.mtl"));
    }

    #[test]
    fn test_missing_file_is_no_model() {
        let path = std::env::temp_dir().join("objview-obj-test-does-not-exist.obj");
        assert!(ObjModel::load(&path).is_none());
    }
}
