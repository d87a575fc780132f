//! World document schema.
//!
//! The host supplies the world as JSON. It is parsed and normalized once
//! at the boundary; everything past this module assumes well-formed data
//! (finite sizes, arrays present, spawn inside bounds).

use serde::{Deserialize, Serialize};

use crate::core::math::{Rect, Vec2};
use crate::domain::agents::NpcKind;

/// Minimum world dimensions; smaller or non-finite inputs are floored.
pub const MIN_WORLD_W: f64 = 800.0;
pub const MIN_WORLD_H: f64 = 600.0;

const DEFAULT_SEED: u32 = 1337;
const DEFAULT_SPAWN: (f64, f64) = (320.0, 380.0);

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Size {
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub w: f64,
    #[serde(default)]
    pub h: f64,
}

impl From<Bounds> for Rect {
    fn from(b: Bounds) -> Self {
        Rect::new(b.x, b.y, b.w, b.h)
    }
}

/// A narrative location: solid house rectangle plus a separate
/// interaction anchor ("knight") so the trigger sits in front of the
/// structure.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stop {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub body: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub house: Bounds,
    #[serde(default)]
    pub knight: Point,
}

impl Stop {
    pub fn house_rect(&self) -> Rect {
        self.house.into()
    }

    pub fn knight_pos(&self) -> Vec2 {
        Vec2::new(self.knight.x, self.knight.y)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Npc {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub kind: NpcKind,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Neighborhood {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default)]
    pub stops: Vec<Stop>,
}

/// Raw document shape; everything is optional so a partial document
/// still parses.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WorldDoc {
    #[serde(default)]
    seed: Option<u32>,
    #[serde(default)]
    size: Option<Size>,
    #[serde(default)]
    player_spawn: Option<Point>,
    #[serde(default)]
    neighborhoods: Vec<Neighborhood>,
    #[serde(default)]
    npcs: Vec<Npc>,
}

/// Normalized world: the immutable input to the engine.
#[derive(Clone, Debug)]
pub struct World {
    pub seed: u32,
    pub w: f64,
    pub h: f64,
    pub spawn: Vec2,
    pub neighborhoods: Vec<Neighborhood>,
    pub npcs: Vec<Npc>,
}

impl Default for World {
    fn default() -> Self {
        Self::from_doc(WorldDoc::default())
    }
}

impl World {
    /// Parse and normalize a world document. Parse errors are reported;
    /// missing or out-of-range fields are defaulted, never rejected.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let doc: WorldDoc = serde_json::from_str(json).map_err(|e| e.to_string())?;
        Ok(Self::from_doc(doc))
    }

    fn from_doc(doc: WorldDoc) -> Self {
        let size = doc.size.unwrap_or_default();
        let w = if size.w.is_finite() { size.w.max(MIN_WORLD_W) } else { MIN_WORLD_W };
        let h = if size.h.is_finite() { size.h.max(MIN_WORLD_H) } else { MIN_WORLD_H };

        let raw_spawn = doc
            .player_spawn
            .map(|p| (p.x, p.y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .unwrap_or(DEFAULT_SPAWN);
        let spawn = Vec2::new(
            raw_spawn.0.clamp(16.0, w - 16.0),
            raw_spawn.1.clamp(16.0, h - 16.0),
        );

        Self {
            seed: doc.seed.unwrap_or(DEFAULT_SEED),
            w,
            h,
            spawn,
            neighborhoods: doc.neighborhoods,
            npcs: doc.npcs,
        }
    }

    /// All stops across neighborhoods, in data order. The interaction
    /// tie-break depends on this ordering.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.neighborhoods.iter().flat_map(|n| n.stops.iter())
    }

    /// Solid house rectangles, in stop order.
    pub fn house_rects(&self) -> Vec<Rect> {
        self.stops().map(Stop::house_rect).collect()
    }

    pub fn stop_by_id(&self, id: &str) -> Option<&Stop> {
        self.stops().find(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_normalizes_to_safe_minimums() {
        let world = World::from_json("{}").expect("empty object should parse");
        assert_eq!(world.w, MIN_WORLD_W);
        assert_eq!(world.h, MIN_WORLD_H);
        assert_eq!(world.seed, 1337);
        assert!(world.neighborhoods.is_empty());
        assert!(world.npcs.is_empty());
    }

    #[test]
    fn small_size_is_floored() {
        let world = World::from_json(r#"{"size":{"w":100,"h":50}}"#).unwrap();
        assert_eq!(world.w, MIN_WORLD_W);
        assert_eq!(world.h, MIN_WORLD_H);
    }

    #[test]
    fn spawn_is_clamped_into_bounds() {
        let world =
            World::from_json(r#"{"size":{"w":1000,"h":800},"playerSpawn":{"x":-50,"y":9000}}"#)
                .unwrap();
        assert_eq!(world.spawn.x, 16.0);
        assert_eq!(world.spawn.y, 800.0 - 16.0);
    }

    #[test]
    fn invalid_json_reports_an_error() {
        assert!(World::from_json("not json").is_err());
    }

    #[test]
    fn stops_iterate_in_data_order() {
        let json = r#"{
            "size": {"w": 3600, "h": 2400},
            "neighborhoods": [
                {"id": "nb1", "name": "Roots", "stops": [
                    {"id": "s1", "title": "A", "house": {"x":100,"y":100,"w":40,"h":40}, "knight": {"x":150,"y":150}},
                    {"id": "s2", "title": "B", "house": {"x":300,"y":100,"w":40,"h":40}, "knight": {"x":350,"y":150}}
                ]},
                {"id": "nb2", "name": "Work", "stops": [
                    {"id": "s3", "title": "C", "house": {"x":500,"y":100,"w":40,"h":40}, "knight": {"x":550,"y":150}}
                ]}
            ]
        }"#;
        let world = World::from_json(json).unwrap();
        let ids: Vec<&str> = world.stops().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["s1", "s2", "s3"]);
        assert_eq!(world.house_rects().len(), 3);
        assert!(world.stop_by_id("s2").is_some());
    }

    #[test]
    fn npc_kind_defaults_to_kid() {
        let world =
            World::from_json(r#"{"npcs":[{"id":"n1","name":"Mia","message":"hi","x":10,"y":10}]}"#)
                .unwrap();
        assert_eq!(world.npcs[0].kind, NpcKind::Kid);
    }
}
