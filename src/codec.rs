//! Geometry command stream codec.
//!
//! Geometries are encoded as a stream of `MoveTo`/`LineTo`/`ClosePath`
//! commands with zigzag-encoded coordinate deltas, as defined by the vector
//! tile specification. Encoding and decoding are pure transformations of the
//! command stream; no tile state is involved.
//!
//! See <https://github.com/mapbox/vector-tile-spec/tree/master/2.1#43-geometry-encoding>.

use std::{fmt, mem, slice};

use thiserror::Error;
use tracing::warn;

use crate::geometry::{Geometry, LineString, LinearRing, Point, Polygon};
use crate::tile::protobuf::GeomType;

/// Integer units per tile side on the wire.
pub const EXTENT: u32 = 4096;

/// Width and height of a tile in input coordinate space.
pub const SIZE: f64 = 256.;

/// Factor between input coordinates and wire integer units.
pub const SCALE: f64 = EXTENT as f64 / SIZE;

/// Command identifiers, stored in the low 3 bits of a command word.
const MOVE_TO: u32 = 1;
const LINE_TO: u32 = 2;
const CLOSE_PATH: u32 = 7;

/// Pack a command id and its repeat count into a command word.
///
/// The repeat count occupies the upper 29 bits, so the maximum encodable
/// repeat is 2^29 - 1.
fn command_word(id: u32, repeat: u32) -> u32 {
    repeat << 3 | id
}

/// Map a signed delta to its unsigned zigzag representation.
fn zigzag(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

/// Restore a signed delta from its unsigned zigzag representation.
fn unzigzag(n: u32) -> i32 {
    (n >> 1) as i32 ^ -((n & 1) as i32)
}

/// Wire-level geometry type tag.
#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug)]
pub enum GeometryType {
    Unknown,
    Point,
    Line,
    Polygon,
}

impl GeometryType {
    /// Classify a geometry value.
    ///
    /// Bare linear rings classify as lines, matching their dimension; only
    /// polygons and multipolygons carry the polygon tag.
    pub fn of(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Self::Point,
            Geometry::LineString(_) | Geometry::MultiLineString(_) | Geometry::LinearRing(_) => {
                Self::Line
            },
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Self::Polygon,
            Geometry::Collection(_) => Self::Unknown,
        }
    }

    pub(crate) fn from_protobuf(geom_type: GeomType) -> Self {
        match geom_type {
            GeomType::Unknown => Self::Unknown,
            GeomType::Point => Self::Point,
            GeomType::Linestring => Self::Line,
            GeomType::Polygon => Self::Polygon,
        }
    }

    pub(crate) fn as_protobuf(self) -> GeomType {
        match self {
            Self::Unknown => GeomType::Unknown,
            Self::Point => GeomType::Point,
            Self::Line => GeomType::Linestring,
            Self::Polygon => GeomType::Polygon,
        }
    }
}

/// A geometry encoded as command words, together with its type tag.
///
/// Instances are value-semantic and cheap to compare or hash; decoding is a
/// pure function of the command words and is never memoized.
#[derive(Hash, PartialEq, Eq, Clone)]
pub struct VectorGeometry {
    commands: Vec<u32>,
    geom_type: GeometryType,
}

impl VectorGeometry {
    pub fn new(commands: Vec<u32>, geom_type: GeometryType) -> Self {
        Self { commands, geom_type }
    }

    pub fn commands(&self) -> &[u32] {
        &self.commands
    }

    pub fn geom_type(&self) -> GeometryType {
        self.geom_type
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Decode the command stream back into a geometry.
    ///
    /// Point streams yield points or multipoints, line streams drop
    /// sequences with fewer than two coordinates, and polygon streams are
    /// regrouped into shells and holes by ring orientation: the first
    /// ring's winding defines the outer orientation, subsequent rings with
    /// the same winding start a new polygon and rings with the opposite
    /// winding attach to the current one as holes.
    ///
    /// An empty stream, or one without any usable sequence, decodes to an
    /// empty [`Geometry::Collection`].
    pub fn decode(&self) -> Result<Geometry, DecodeError> {
        decode_commands(self.geom_type, &self.commands)
    }
}

impl fmt::Debug for VectorGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VectorGeometry[{} commands, {:?}]", self.commands.len(), self.geom_type)
    }
}

/// Errors returned by geometry encoding.
#[derive(Error, PartialEq, Eq, Debug)]
pub enum EncodeError {
    #[error("geometry component without coordinates")]
    EmptyGeometry,
}

/// Errors returned when decoding a command stream.
#[derive(Error, PartialEq, Eq, Debug)]
pub enum DecodeError {
    #[error("invalid geometry command id: {0}")]
    InvalidCommand(u32),
    #[error("command stream ended inside a parameter list")]
    Truncated,
    #[error("geometry command before the first MoveTo")]
    MissingMoveTo,
    #[error("ring of {0} points cannot form a polygon")]
    InvalidRing(usize),
}

/// Encode a geometry into its command stream representation.
///
/// Coordinates are scaled from `[0, SIZE]` to `[0, EXTENT]` and rounded to
/// integers. Geometry collections are not representable on the wire; they
/// are skipped with a warning and produce an empty command stream.
pub fn encode_geometry(geometry: &Geometry) -> Result<VectorGeometry, EncodeError> {
    let mut encoder = CommandEncoder::new();
    encoder.accept(geometry)?;
    Ok(VectorGeometry::new(encoder.commands, GeometryType::of(geometry)))
}

/// Streaming geometry encoder.
///
/// Only the first point of a stream is absolute; all subsequent points are
/// deltas against the previous one, so the cursor persists across
/// sub-geometries (rings of a polygon, members of a multi-geometry).
struct CommandEncoder {
    commands: Vec<u32>,
    x: i32,
    y: i32,
}

impl CommandEncoder {
    fn new() -> Self {
        Self { commands: Vec::new(), x: 0, y: 0 }
    }

    fn accept(&mut self, geometry: &Geometry) -> Result<(), EncodeError> {
        match geometry {
            Geometry::Point(point) => self.encode_path(slice::from_ref(point), false, false),
            Geometry::MultiPoint(points) => self.encode_path(points, false, true),
            Geometry::LineString(line) => self.encode_path(&line.points, false, false),
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    self.encode_path(&line.points, false, false)?;
                }
                Ok(())
            },
            Geometry::LinearRing(ring) => self.encode_path(&ring.points, true, false),
            Geometry::Polygon(polygon) => self.encode_polygon(polygon),
            Geometry::MultiPolygon(polygons) => {
                for polygon in polygons {
                    self.encode_polygon(polygon)?;
                }
                Ok(())
            },
            Geometry::Collection(_) => {
                warn!("unrecognized geometry type, skipping");
                Ok(())
            },
        }
    }

    fn encode_polygon(&mut self, polygon: &Polygon) -> Result<(), EncodeError> {
        self.encode_path(&polygon.exterior.points, true, false)?;
        for interior in &polygon.interiors {
            self.encode_path(&interior.points, true, false)?;
        }
        Ok(())
    }

    fn encode_path(
        &mut self,
        points: &[Point],
        close: bool,
        multi_point: bool,
    ) -> Result<(), EncodeError> {
        if points.is_empty() {
            return Err(EncodeError::EmptyGeometry);
        }

        let mut line_to_slot = None;
        let mut line_to_length: i32 = 0;

        for (i, point) in points.iter().enumerate() {
            if i == 0 {
                let repeat = if multi_point { points.len() as u32 } else { 1 };
                self.commands.push(command_word(MOVE_TO, repeat));
            }

            let px = (point.x * SCALE).round() as i32;
            let py = (point.y * SCALE).round() as i32;

            // Drop points that match the previous one after scaling. This
            // only applies within a single linestring or ring; a multipoint
            // must emit exactly as many delta pairs as its header announces.
            if i > 0 && !multi_point && px == self.x && py == self.y {
                line_to_length -= 1;
                continue;
            }

            // Rings are implicitly closed, so an explicit closing point is
            // dropped as well.
            if close
                && points.len() > 1
                && i == points.len() - 1
                && points[0].x == point.x
                && points[0].y == point.y
            {
                line_to_length -= 1;
                continue;
            }

            self.commands.push(zigzag(px.wrapping_sub(self.x)));
            self.commands.push(zigzag(py.wrapping_sub(self.y)));
            self.x = px;
            self.y = py;

            if i == 0 && points.len() > 1 && !multi_point {
                // Reserve the LineTo slot; its repeat count is rewritten
                // once the number of dropped points is known.
                line_to_slot = Some(self.commands.len());
                line_to_length = points.len() as i32 - 1;
                self.commands.push(command_word(LINE_TO, line_to_length as u32));
            }
        }

        if let Some(slot) = line_to_slot {
            if line_to_length == 0 {
                self.commands.remove(slot);
            } else {
                self.commands[slot] = command_word(LINE_TO, line_to_length as u32);
            }
        }

        if close {
            self.commands.push(command_word(CLOSE_PATH, 1));
        }

        Ok(())
    }
}

/// Geometry drawing command with zigzag-decoded deltas.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
enum Command {
    MoveTo(i32, i32),
    LineTo(i32, i32),
    ClosePath,
}

/// Iterator over the commands of an encoded geometry.
struct CommandIter<'a> {
    commands: &'a [u32],
    pending: Option<(u32, u32)>,
    index: usize,
}

impl<'a> CommandIter<'a> {
    fn new(commands: &'a [u32]) -> Self {
        Self { commands, pending: Default::default(), index: Default::default() }
    }
}

impl Iterator for CommandIter<'_> {
    type Item = Result<Command, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.pending {
                // Parse the next command word.
                None => {
                    let word = *self.commands.get(self.index)?;
                    self.index += 1;

                    match word & 0x7 {
                        id @ (MOVE_TO | LINE_TO | CLOSE_PATH) => {
                            self.pending = Some((id, word >> 3));
                        },
                        id => {
                            self.index = self.commands.len();
                            return Some(Err(DecodeError::InvalidCommand(id)));
                        },
                    }
                },

                // Reset once all repeats of one command are dispatched.
                Some((_, 0)) => self.pending = None,

                Some((CLOSE_PATH, count)) => {
                    *count -= 1;
                    return Some(Ok(Command::ClosePath));
                },

                // MoveTo/LineTo consume one delta pair per repeat.
                Some((id, count)) => {
                    *count -= 1;

                    if self.index + 1 >= self.commands.len() {
                        self.index = self.commands.len();
                        self.pending = None;
                        return Some(Err(DecodeError::Truncated));
                    }

                    let dx = unzigzag(self.commands[self.index]);
                    let dy = unzigzag(self.commands[self.index + 1]);
                    self.index += 2;

                    let command = match *id {
                        MOVE_TO => Command::MoveTo(dx, dy),
                        _ => Command::LineTo(dx, dy),
                    };
                    return Some(Ok(command));
                },
            }
        }
    }
}

/// Parse a command stream back into coordinate sequences and assemble the
/// geometry requested by the type tag.
fn decode_commands(geom_type: GeometryType, commands: &[u32]) -> Result<Geometry, DecodeError> {
    let mut sequences: Vec<Vec<Point>> = Vec::new();
    let mut x = 0i32;
    let mut y = 0i32;

    for command in CommandIter::new(commands) {
        match command? {
            Command::MoveTo(dx, dy) => {
                x = x.wrapping_add(dx);
                y = y.wrapping_add(dy);
                sequences.push(vec![Point::new(x as f64 / SCALE, y as f64 / SCALE)]);
            },
            Command::LineTo(dx, dy) => {
                let sequence = sequences.last_mut().ok_or(DecodeError::MissingMoveTo)?;
                x = x.wrapping_add(dx);
                y = y.wrapping_add(dy);
                sequence.push(Point::new(x as f64 / SCALE, y as f64 / SCALE));
            },
            Command::ClosePath => {
                if geom_type != GeometryType::Point {
                    let sequence = sequences.last_mut().ok_or(DecodeError::MissingMoveTo)?;
                    if let Some(&first) = sequence.first() {
                        sequence.push(first);
                    }
                }
            },
        }
    }

    let geometry = match geom_type {
        GeometryType::Point => {
            let mut points: Vec<_> = sequences.iter().map(|sequence| sequence[0]).collect();
            match points.len() {
                0 => None,
                1 => Some(Geometry::Point(points.remove(0))),
                _ => Some(Geometry::MultiPoint(points)),
            }
        },
        GeometryType::Line => {
            let mut lines: Vec<_> = sequences
                .into_iter()
                .filter(|sequence| sequence.len() >= 2)
                .map(LineString::new)
                .collect();
            match lines.len() {
                0 => None,
                1 => Some(Geometry::LineString(lines.remove(0))),
                _ => Some(Geometry::MultiLineString(lines)),
            }
        },
        GeometryType::Polygon => assemble_polygons(sequences)?,
        GeometryType::Unknown => None,
    };

    Ok(geometry.unwrap_or_else(|| Geometry::Collection(Vec::new())))
}

/// Group closed rings into polygons by winding.
fn assemble_polygons(sequences: Vec<Vec<Point>>) -> Result<Option<Geometry>, DecodeError> {
    let mut groups: Vec<Vec<LinearRing>> = Vec::new();
    let mut current: Vec<LinearRing> = Vec::new();
    let mut outer_ccw = false;

    for sequence in sequences {
        // Holes with too few coordinates are dropped.
        if !current.is_empty() && sequence.len() < 2 {
            continue;
        }

        let ring = polygon_ring(sequence)?;
        let ccw = ring.is_ccw();

        // The first ring's winding is trusted as the outer orientation.
        if groups.is_empty() && current.is_empty() {
            outer_ccw = ccw;
        }

        if ccw == outer_ccw && !current.is_empty() {
            groups.push(mem::take(&mut current));
        }
        current.push(ring);
    }
    if !current.is_empty() {
        groups.push(current);
    }

    let mut polygons: Vec<_> = groups
        .into_iter()
        .map(|mut rings| Polygon::new(rings.remove(0), rings))
        .collect();

    Ok(match polygons.len() {
        0 => None,
        1 => Some(Geometry::Polygon(polygons.remove(0))),
        _ => Some(Geometry::MultiPolygon(polygons)),
    })
}

/// Validate a decoded coordinate sequence as a closed polygon ring.
fn polygon_ring(points: Vec<Point>) -> Result<LinearRing, DecodeError> {
    if points.len() < 4 || points.first() != points.last() {
        return Err(DecodeError::InvalidRing(points.len()));
    }
    Ok(LinearRing::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn zigzag_roundtrip() {
        for n in [0, 1, -1, 2, -2, 160, -160, 4096, -4096, i32::MAX, i32::MIN] {
            assert_eq!(unzigzag(zigzag(n)), n);
        }

        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(160), 320);
        assert_eq!(zigzag(-160), 319);
    }

    #[test]
    fn command_words() {
        assert_eq!(command_word(MOVE_TO, 1), 9);
        assert_eq!(command_word(LINE_TO, 2), 18);
        assert_eq!(command_word(CLOSE_PATH, 1), 15);

        // Maximum legal repeat count survives the shift.
        let max_repeat = (1 << 29) - 1;
        assert_eq!(command_word(LINE_TO, max_repeat) >> 3, max_repeat);
    }

    #[test]
    fn point_at_origin() {
        let encoded = encode_geometry(&Geometry::Point(Point::new(0., 0.))).unwrap();
        assert_eq!(encoded.commands(), [9, 0, 0]);
        assert_eq!(encoded.geom_type(), GeometryType::Point);
    }

    #[test]
    fn scaled_point() {
        let encoded = encode_geometry(&Geometry::Point(Point::new(64., 64.))).unwrap();
        assert_eq!(encoded.commands(), [9, 2048, 2048]);
    }

    #[test]
    fn multi_point() {
        let geometry = Geometry::MultiPoint(points(&[(5., 7.), (3., 2.)]));
        let encoded = encode_geometry(&geometry).unwrap();
        assert_eq!(encoded.commands(), [17, 160, 224, 63, 159]);

        assert_eq!(encoded.decode().unwrap(), geometry);
    }

    #[test]
    fn multi_point_keeps_duplicates() {
        let geometry = Geometry::MultiPoint(points(&[(1., 1.), (1., 1.)]));
        let encoded = encode_geometry(&geometry).unwrap();
        assert_eq!(encoded.commands(), [17, 32, 32, 0, 0]);

        assert_eq!(encoded.decode().unwrap(), geometry);
    }

    #[test]
    fn line_string() {
        let geometry = Geometry::LineString(LineString::new(points(&[
            (0., 0.),
            (10., 10.),
            (10., 0.),
        ])));
        let encoded = encode_geometry(&geometry).unwrap();
        assert_eq!(encoded.commands(), [9, 0, 0, 18, 320, 320, 0, 319]);
        assert_eq!(encoded.geom_type(), GeometryType::Line);

        assert_eq!(encoded.decode().unwrap(), geometry);
    }

    #[test]
    fn multi_line_string() {
        let geometry = Geometry::MultiLineString(vec![
            LineString::new(points(&[(0., 0.), (2., 2.)])),
            LineString::new(points(&[(1., 1.), (3., 5.)])),
        ]);
        let encoded = encode_geometry(&geometry).unwrap();

        // The cursor continues across the line strings.
        assert_eq!(encoded.commands(), [9, 0, 0, 10, 64, 64, 9, 31, 31, 10, 64, 128]);

        assert_eq!(encoded.decode().unwrap(), geometry);
    }

    #[test]
    fn triangle_polygon() {
        let exterior = LinearRing::new(points(&[(0., 0.), (3., 6.), (6., 1.), (0., 0.)]));
        let geometry = Geometry::Polygon(Polygon::new(exterior, Vec::new()));

        let encoded = encode_geometry(&geometry).unwrap();
        assert_eq!(encoded.commands(), [9, 0, 0, 18, 96, 192, 96, 159, 15]);
        assert_eq!(encoded.geom_type(), GeometryType::Polygon);
    }

    #[test]
    fn duplicate_points_dropped() {
        let geometry = Geometry::LineString(LineString::new(points(&[
            (0., 0.),
            (1., 1.),
            (1., 1.),
            (2., 2.),
        ])));
        let encoded = encode_geometry(&geometry).unwrap();
        assert_eq!(encoded.commands(), [9, 0, 0, 18, 32, 32, 32, 32]);
    }

    #[test]
    fn line_to_slot_removed_when_all_points_drop() {
        let geometry = Geometry::LineString(LineString::new(points(&[
            (1., 1.),
            (1., 1.),
            (1., 1.),
        ])));
        let encoded = encode_geometry(&geometry).unwrap();
        assert_eq!(encoded.commands(), [9, 32, 32]);
    }

    #[test]
    fn empty_component_errors() {
        let empty_line = Geometry::LineString(LineString::default());
        assert_eq!(encode_geometry(&empty_line).unwrap_err(), EncodeError::EmptyGeometry);

        let multi = Geometry::MultiLineString(vec![
            LineString::new(points(&[(0., 0.), (1., 1.)])),
            LineString::default(),
        ]);
        assert_eq!(encode_geometry(&multi).unwrap_err(), EncodeError::EmptyGeometry);

        let polygon = Geometry::Polygon(Polygon::new(
            LinearRing::new(points(&[(0., 0.), (4., 0.), (4., 4.)])),
            vec![LinearRing::default()],
        ));
        assert_eq!(encode_geometry(&polygon).unwrap_err(), EncodeError::EmptyGeometry);
    }

    #[test]
    fn collection_skipped() {
        let encoded = encode_geometry(&Geometry::Collection(Vec::new())).unwrap();
        assert!(encoded.is_empty());
        assert_eq!(encoded.geom_type(), GeometryType::Unknown);

        assert_eq!(encoded.decode().unwrap(), Geometry::Collection(Vec::new()));
    }

    #[test]
    fn polygon_with_hole_roundtrip() {
        let exterior = LinearRing::new(points(&[
            (0., 0.),
            (10., 0.),
            (10., 10.),
            (0., 10.),
            (0., 0.),
        ]));
        let interior =
            LinearRing::new(points(&[(2., 2.), (2., 8.), (8., 8.), (8., 2.), (2., 2.)]));
        assert!(exterior.is_ccw());
        assert!(!interior.is_ccw());

        let geometry = Geometry::Polygon(Polygon::new(exterior.clone(), vec![interior.clone()]));
        let encoded = encode_geometry(&geometry).unwrap();

        let polygon = match encoded.decode().unwrap() {
            Geometry::Polygon(polygon) => polygon,
            other => panic!("expected polygon, got {other:?}"),
        };
        assert_eq!(polygon.exterior, exterior);
        assert_eq!(polygon.interiors, [interior]);
        assert!(polygon.exterior.is_ccw());
        assert!(!polygon.interiors[0].is_ccw());

        // Re-encoding the decoded polygon reproduces the command stream.
        let reencoded = encode_geometry(&Geometry::Polygon(polygon)).unwrap();
        assert_eq!(reencoded.commands(), encoded.commands());
    }

    #[test]
    fn multi_polygon_grouped_by_winding() {
        let geometry = Geometry::MultiPolygon(vec![
            Polygon::new(
                LinearRing::new(points(&[(0., 0.), (10., 0.), (10., 10.), (0., 10.)])),
                Vec::new(),
            ),
            Polygon::new(
                LinearRing::new(points(&[(11., 11.), (20., 11.), (20., 20.), (11., 20.)])),
                vec![LinearRing::new(points(&[(13., 13.), (13., 17.), (17., 17.), (17., 13.)]))],
            ),
        ]);

        let encoded = encode_geometry(&geometry).unwrap();
        let polygons = match encoded.decode().unwrap() {
            Geometry::MultiPolygon(polygons) => polygons,
            other => panic!("expected multipolygon, got {other:?}"),
        };

        assert_eq!(polygons.len(), 2);
        assert!(polygons[0].interiors.is_empty());
        assert_eq!(polygons[1].interiors.len(), 1);
    }

    #[test]
    fn short_line_sequences_dropped() {
        let encoded = VectorGeometry::new(vec![9, 0, 0], GeometryType::Line);
        assert_eq!(encoded.decode().unwrap(), Geometry::Collection(Vec::new()));
    }

    #[test]
    fn small_hole_dropped() {
        // A closed square shell followed by a single-point hole sequence.
        let commands = vec![9, 0, 0, 26, 320, 0, 0, 320, 319, 0, 15, 9, 2, 2];
        let encoded = VectorGeometry::new(commands, GeometryType::Polygon);

        let polygon = match encoded.decode().unwrap() {
            Geometry::Polygon(polygon) => polygon,
            other => panic!("expected polygon, got {other:?}"),
        };
        assert!(polygon.interiors.is_empty());
        assert_eq!(polygon.exterior.points.len(), 5);
    }

    #[test]
    fn decode_empty_commands() {
        for geom_type in [GeometryType::Point, GeometryType::Line, GeometryType::Polygon] {
            let encoded = VectorGeometry::new(Vec::new(), geom_type);
            assert_eq!(encoded.decode().unwrap(), Geometry::Collection(Vec::new()));
        }
    }

    #[test]
    fn decode_errors() {
        let truncated = VectorGeometry::new(vec![9, 0], GeometryType::Point);
        assert_eq!(truncated.decode().unwrap_err(), DecodeError::Truncated);

        let invalid = VectorGeometry::new(vec![11, 0, 0], GeometryType::Point);
        assert_eq!(invalid.decode().unwrap_err(), DecodeError::InvalidCommand(3));

        let line_to_first = VectorGeometry::new(vec![10, 0, 0], GeometryType::Line);
        assert_eq!(line_to_first.decode().unwrap_err(), DecodeError::MissingMoveTo);

        let close_first = VectorGeometry::new(vec![15], GeometryType::Polygon);
        assert_eq!(close_first.decode().unwrap_err(), DecodeError::MissingMoveTo);

        // MoveTo plus ClosePath alone cannot form a ring.
        let degenerate = VectorGeometry::new(vec![9, 0, 0, 15], GeometryType::Polygon);
        assert_eq!(degenerate.decode().unwrap_err(), DecodeError::InvalidRing(2));
    }

    #[test]
    fn command_iter_single() {
        let mut iter = CommandIter::new(&[9, 50, 34]);
        assert_eq!(iter.next(), Some(Ok(Command::MoveTo(25, 17))));
        assert_eq!(iter.next(), None);

        let mut iter = CommandIter::new(&[15]);
        assert_eq!(iter.next(), Some(Ok(Command::ClosePath)));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn command_iter_multi() {
        let mut iter = CommandIter::new(&[17, 10, 14, 3, 9]);
        assert_eq!(iter.next(), Some(Ok(Command::MoveTo(5, 7))));
        assert_eq!(iter.next(), Some(Ok(Command::MoveTo(-2, -5))));
        assert_eq!(iter.next(), None);

        let mut iter = CommandIter::new(&[9, 4, 4, 18, 0, 16, 16, 0]);
        assert_eq!(iter.next(), Some(Ok(Command::MoveTo(2, 2))));
        assert_eq!(iter.next(), Some(Ok(Command::LineTo(0, 8))));
        assert_eq!(iter.next(), Some(Ok(Command::LineTo(8, 0))));
        assert_eq!(iter.next(), None);

        let mut iter = CommandIter::new(&[9, 6, 12, 18, 10, 12, 24, 44, 15]);
        assert_eq!(iter.next(), Some(Ok(Command::MoveTo(3, 6))));
        assert_eq!(iter.next(), Some(Ok(Command::LineTo(5, 6))));
        assert_eq!(iter.next(), Some(Ok(Command::LineTo(12, 22))));
        assert_eq!(iter.next(), Some(Ok(Command::ClosePath)));
        assert_eq!(iter.next(), None);
    }
}
