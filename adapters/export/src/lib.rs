#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tiled-compatible map artifact writer.
//!
//! Serializes an assembled [`ArenaMap`] into the orthogonal Tiled JSON
//! document the game client consumes: named tile layers in back-to-front
//! render order (`Ground`, `WallFronts`, `Walls`), flat row-major id
//! arrays with `0` meaning "no tile", and a single tileset record pointing
//! at the shared atlas. A flat id maps into the atlas as
//! `col = (id - 1) % columns`, `row = (id - 1) / columns`.

use arena_forge_core::catalog::{AtlasGeometry, TileCatalog};
use arena_forge_world::ArenaMap;
use serde::Serialize;
use thiserror::Error;

const TILED_VERSION: &str = "1.10.2";
const FORMAT_VERSION: &str = "1.10";
const ATLAS_NAME: &str = "arena_atlas";

/// Errors raised while producing a map artifact.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The document could not be serialized to JSON.
    #[error("failed to serialize map document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Column/row position of a tile id inside the atlas image.
#[must_use]
pub fn atlas_cell(id: i32, geometry: &AtlasGeometry) -> (u32, u32) {
    let zero_based = (id - 1).max(0) as u32;
    (
        zero_based % geometry.columns(),
        zero_based / geometry.columns(),
    )
}

/// Complete Tiled map document.
#[derive(Clone, Debug, Serialize)]
pub struct TiledMap {
    compressionlevel: i32,
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    orientation: &'static str,
    renderorder: &'static str,
    tiledversion: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    version: &'static str,
    infinite: bool,
    nextlayerid: u32,
    nextobjectid: u32,
    tilesets: Vec<TiledTileset>,
    layers: Vec<TiledLayer>,
}

impl TiledMap {
    /// Tile layers in back-to-front render order.
    #[must_use]
    pub fn layers(&self) -> &[TiledLayer] {
        &self.layers
    }

    /// Tileset records referenced by the layers.
    #[must_use]
    pub fn tilesets(&self) -> &[TiledTileset] {
        &self.tilesets
    }
}

/// One flat tile layer of the document.
#[derive(Clone, Debug, Serialize)]
pub struct TiledLayer {
    data: Vec<i32>,
    height: u32,
    id: u32,
    name: &'static str,
    opacity: f64,
    #[serde(rename = "type")]
    kind: &'static str,
    visible: bool,
    width: u32,
    x: i32,
    y: i32,
}

impl TiledLayer {
    /// Layer name as the client looks it up.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Flat row-major tile ids; `0` means "no tile".
    #[must_use]
    pub fn data(&self) -> &[i32] {
        &self.data
    }
}

/// Atlas reference embedded in the document.
#[derive(Clone, Debug, Serialize)]
pub struct TiledTileset {
    firstgid: u32,
    columns: u32,
    image: String,
    imagewidth: u32,
    imageheight: u32,
    margin: u32,
    name: &'static str,
    spacing: u32,
    tilecount: u32,
    tilewidth: u32,
    tileheight: u32,
}

impl TiledTileset {
    /// Tile id assigned to the first atlas tile.
    #[must_use]
    pub const fn firstgid(&self) -> u32 {
        self.firstgid
    }

    /// Number of tile columns in the atlas image.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }
}

fn layer(id: u32, name: &'static str, data: Vec<i32>, width: u32, height: u32) -> TiledLayer {
    TiledLayer {
        data,
        height,
        id,
        name,
        opacity: 1.0,
        kind: "tilelayer",
        visible: true,
        width,
        x: 0,
        y: 0,
    }
}

/// Builds the Tiled document for an assembled map.
#[must_use]
pub fn tiled_document(map: &ArenaMap, catalog: &TileCatalog) -> TiledMap {
    let geometry = catalog.geometry();
    let width = map.dims().columns();
    let height = map.dims().rows();

    TiledMap {
        compressionlevel: -1,
        width,
        height,
        tilewidth: geometry.tile_size_px(),
        tileheight: geometry.tile_size_px(),
        orientation: "orthogonal",
        renderorder: "right-down",
        tiledversion: TILED_VERSION,
        kind: "map",
        version: FORMAT_VERSION,
        infinite: false,
        nextlayerid: 4,
        nextobjectid: 1,
        tilesets: vec![TiledTileset {
            firstgid: 1,
            columns: geometry.columns(),
            image: format!("../tilesets/{ATLAS_NAME}.png"),
            imagewidth: geometry.image_width_px(),
            imageheight: geometry.image_height_px(),
            margin: 0,
            name: ATLAS_NAME,
            spacing: 0,
            tilecount: geometry.tile_count(),
            tilewidth: geometry.tile_size_px(),
            tileheight: geometry.tile_size_px(),
        }],
        layers: vec![
            layer(1, "Ground", map.ground().cells().to_vec(), width, height),
            layer(2, "WallFronts", map.wall_fronts().cells().to_vec(), width, height),
            layer(3, "Walls", map.walls().cells().to_vec(), width, height),
        ],
    }
}

/// Serializes the document as pretty-printed JSON.
pub fn to_json_pretty(document: &TiledMap) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(document)?)
}
