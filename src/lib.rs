//! Mapbox vector tile codec.
//!
//! Translates planar vector geometries to and from the integer command
//! stream defined by the MVT 2.1 geometry encoding rules, and assembles
//! multiple named layers of encoded features with typed attributes into the
//! vector tile protobuf wire format.
//!
//! Encoding and tile assembly are decoupled so that encoded command streams
//! can be stored and regrouped before tiles are serialized: [`encode_geometry`]
//! produces a [`VectorGeometry`], [`VectorTile`] collects such geometries
//! into layers and serializes them, and [`VectorTile::parse`] recovers
//! features whose geometries stay encoded until [`VectorGeometry::decode`]
//! is called.
//!
//! See <https://github.com/mapbox/vector-tile-spec/tree/master/2.1>.

pub use crate::codec::{
    DecodeError, EncodeError, GeometryType, VectorGeometry, encode_geometry,
};
pub use crate::geometry::{Geometry, LineString, LinearRing, Point, Polygon};
pub use crate::tile::{Feature, ParseError, Value, VectorTile};

pub mod codec;
pub mod geometry;
pub mod tile;
