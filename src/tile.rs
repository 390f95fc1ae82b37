//! Vector tile assembly and parsing.
//!
//! A [`VectorTile`] collects already-encoded geometries into named layers,
//! interning attribute keys and values into per-layer dictionaries so each
//! feature's tags reduce to pairs of integer indices, and serializes the
//! result into the tile protobuf. [`VectorTile::parse`] is the inverse; the
//! geometries it returns stay encoded until decoded per feature.

use std::hash::{Hash, Hasher};
use std::mem;

use indexmap::{IndexMap, IndexSet};
use prost::Message;
use thiserror::Error;

use crate::codec::{EXTENT, EncodeError, GeometryType, VectorGeometry, encode_geometry};
use crate::geometry::Geometry;

pub mod protobuf;

/// Typed attribute value of a feature.
///
/// The type tag participates in equality and hashing, so numerically equal
/// values of different wire types intern as distinct dictionary entries.
#[derive(Clone, Debug)]
pub enum Value {
    String(String),
    Float(f32),
    Double(f64),
    Int(i64),
    Uint(u64),
    Sint(i64),
    Bool(bool),
}

impl Value {
    /// Write this value into its matching protobuf field.
    fn to_protobuf(&self) -> protobuf::Value {
        let mut value = protobuf::Value::default();
        match self {
            Self::String(v) => value.string_value = Some(v.clone()),
            Self::Float(v) => value.float_value = Some(*v),
            Self::Double(v) => value.double_value = Some(*v),
            Self::Int(v) => value.int_value = Some(*v),
            Self::Uint(v) => value.uint_value = Some(*v),
            Self::Sint(v) => value.sint_value = Some(*v),
            Self::Bool(v) => value.bool_value = Some(*v),
        }
        value
    }

    /// Read whichever protobuf field is present, or `None` for an empty
    /// value message.
    fn from_protobuf(value: &protobuf::Value) -> Option<Self> {
        if let Some(v) = value.bool_value {
            Some(Self::Bool(v))
        } else if let Some(v) = value.double_value {
            Some(Self::Double(v))
        } else if let Some(v) = value.float_value {
            Some(Self::Float(v))
        } else if let Some(v) = value.int_value {
            Some(Self::Int(v))
        } else if let Some(v) = value.sint_value {
            Some(Self::Sint(v))
        } else if let Some(v) = value.uint_value {
            Some(Self::Uint(v))
        } else {
            value.string_value.clone().map(Self::String)
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            // Compare floats by bit pattern so values are hashable.
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Uint(a), Self::Uint(b)) => a == b,
            (Self::Sint(a), Self::Sint(b)) => a == b,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Self::String(v) => v.hash(state),
            Self::Float(v) => v.to_bits().hash(state),
            Self::Double(v) => v.to_bits().hash(state),
            Self::Int(v) | Self::Sint(v) => v.hash(state),
            Self::Uint(v) => v.hash(state),
            Self::Bool(v) => v.hash(state),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Sint(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Sint(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Sint(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        // Values beyond i64::MAX cannot be stored as a signed integer.
        match i64::try_from(v) {
            Ok(v) => Self::Sint(v),
            Err(_) => Self::Uint(v),
        }
    }
}

/// A feature in a vector tile.
#[derive(PartialEq, Clone, Debug)]
pub struct Feature {
    /// Name of the layer the feature belongs to.
    pub layer: String,
    /// Feature ID, written to the wire only when non-negative.
    pub id: i64,
    /// The encoded geometry; decode using [`VectorGeometry::decode`].
    pub geometry: VectorGeometry,
    /// Feature attributes; entries without a value are dropped on encode.
    pub attrs: IndexMap<String, Option<Value>>,
    /// Grouping key used by upstream density control, or
    /// [`Feature::NO_GROUP`].
    ///
    /// Never populated when the feature was parsed from tile bytes; the
    /// tile schema does not encode groups.
    pub group: i64,
}

impl Feature {
    /// Sentinel for features without a grouping key.
    pub const NO_GROUP: i64 = i64::MIN;

    /// Create an ungrouped feature.
    pub fn new(
        layer: String,
        id: i64,
        geometry: VectorGeometry,
        attrs: IndexMap<String, Option<Value>>,
    ) -> Self {
        Self { layer, id, geometry, attrs, group: Self::NO_GROUP }
    }

    pub fn has_group(&self) -> bool {
        self.group != Self::NO_GROUP
    }

    /// Copy of this feature with its geometry replaced by the encoded new
    /// geometry.
    pub fn with_geometry(&self, geometry: &Geometry) -> Result<Self, EncodeError> {
        Ok(Self { geometry: encode_geometry(geometry)?, ..self.clone() })
    }

    /// Copy of this feature with `extra` merged into its attributes.
    pub fn with_extra_attrs(
        &self,
        extra: impl IntoIterator<Item = (String, Option<Value>)>,
    ) -> Self {
        let mut attrs = self.attrs.clone();
        attrs.extend(extra);
        Self { attrs, ..self.clone() }
    }
}

/// Feature translated into layer-local dictionary indices.
struct EncodedFeature {
    tags: Vec<u32>,
    id: i64,
    geometry: VectorGeometry,
}

/// All features of one output layer, along with the key/value dictionaries
/// referenced by each feature's tags.
#[derive(Default)]
struct Layer {
    features: Vec<EncodedFeature>,
    keys: IndexSet<String>,
    values: IndexSet<Value>,
}

impl Layer {
    /// ID associated with `key`, inserting it on first use.
    fn key_id(&mut self, key: String) -> u32 {
        self.keys.insert_full(key).0 as u32
    }

    /// ID associated with `value`, inserting it on first use.
    fn value_id(&mut self, value: Value) -> u32 {
        self.values.insert_full(value).0 as u32
    }
}

/// Errors returned when parsing tile bytes.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("{0}")]
    Protobuf(#[from] prost::DecodeError),
    #[error("feature has odd tag count: {0}")]
    OddTagCount(usize),
    #[error("tag key index {0} out of range")]
    KeyIndex(u32),
    #[error("tag value index {0} out of range")]
    ValueIndex(u32),
}

/// Encoder for a single output tile.
///
/// Layers, features, and dictionary entries are emitted in insertion order.
/// The builder is owned by a single thread; separate tiles can be built on
/// separate threads without coordination.
#[derive(Default)]
pub struct VectorTile {
    layers: IndexMap<String, Layer>,
}

impl VectorTile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add features to the named layer, creating the layer on first use.
    ///
    /// Features without geometry commands are skipped; a layer fed only
    /// such features is never created. Attribute entries without a value
    /// are dropped, the rest are interned into the layer's dictionaries in
    /// insertion order.
    pub fn add_layer_features(
        &mut self,
        layer_name: &str,
        features: impl IntoIterator<Item = Feature>,
    ) -> &mut Self {
        for feature in features {
            if feature.geometry.is_empty() {
                continue;
            }

            let layer = self.layers.entry(layer_name.to_string()).or_default();

            let mut tags = Vec::with_capacity(feature.attrs.len() * 2);
            for (key, value) in feature.attrs {
                if let Some(value) = value {
                    tags.push(layer.key_id(key));
                    tags.push(layer.value_id(value));
                }
            }

            layer.features.push(EncodedFeature {
                tags,
                id: feature.id,
                geometry: feature.geometry,
            });
        }
        self
    }

    /// Serialize all layers into an uncompressed tile protobuf.
    pub fn encode(&self) -> Vec<u8> {
        let mut tile = protobuf::Tile::default();

        for (name, layer) in &self.layers {
            let mut tile_layer = protobuf::Layer {
                version: 2,
                name: name.clone(),
                features: Vec::with_capacity(layer.features.len()),
                keys: layer.keys.iter().cloned().collect(),
                values: layer.values.iter().map(Value::to_protobuf).collect(),
                extent: Some(EXTENT),
            };

            for feature in &layer.features {
                tile_layer.features.push(protobuf::Feature {
                    id: (feature.id >= 0).then_some(feature.id as u64),
                    tags: feature.tags.clone(),
                    r#type: Some(feature.geometry.geom_type().as_protobuf() as i32),
                    geometry: feature.geometry.commands().to_vec(),
                });
            }

            tile.layers.push(tile_layer);
        }

        tile.encode_to_vec()
    }

    /// Parse tile bytes into the features of all layers.
    ///
    /// Geometries are not decoded; clients call [`VectorGeometry::decode`]
    /// per feature as needed. Compressed tiles must be decompressed before
    /// parsing.
    pub fn parse(encoded: &[u8]) -> Result<Vec<Feature>, ParseError> {
        let tile = protobuf::Tile::decode(encoded)?;
        let mut features = Vec::new();

        for layer in &tile.layers {
            debug_assert_eq!(layer.extent.unwrap_or(EXTENT), EXTENT);

            let values: Vec<_> = layer.values.iter().map(Value::from_protobuf).collect();

            for feature in &layer.features {
                if feature.tags.len() % 2 != 0 {
                    return Err(ParseError::OddTagCount(feature.tags.len()));
                }

                let mut attrs = IndexMap::with_capacity(feature.tags.len() / 2);
                for pair in feature.tags.chunks_exact(2) {
                    let key = layer
                        .keys
                        .get(pair[0] as usize)
                        .ok_or(ParseError::KeyIndex(pair[0]))?;
                    let value = values
                        .get(pair[1] as usize)
                        .ok_or(ParseError::ValueIndex(pair[1]))?;
                    attrs.insert(key.clone(), value.clone());
                }

                features.push(Feature {
                    layer: layer.name.clone(),
                    id: feature.id.unwrap_or(0) as i64,
                    geometry: VectorGeometry::new(
                        feature.geometry.clone(),
                        GeometryType::from_protobuf(feature.r#type()),
                    ),
                    attrs,
                    group: Feature::NO_GROUP,
                });
            }
        }

        Ok(features)
    }
}
