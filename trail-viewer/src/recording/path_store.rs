use bevy::prelude::*;

use super::sample_rate::SampleRate;
use super::trail::TrailPalette;

/// A finished recording, frozen when the recorder stopped.
#[derive(Debug, Clone)]
pub struct RecordedPath {
    pub id: u32,
    pub points: Vec<Vec3>,
    pub sample_rate: SampleRate,
    pub palette: TrailPalette,
}

impl RecordedPath {
    /// JSON form used by the RPC layer.
    pub fn to_json(&self) -> serde_json::Value {
        let points: Vec<[f32; 3]> = self.points.iter().map(|p| [p.x, p.y, p.z]).collect();

        serde_json::json!({
            "id": self.id,
            "sample_rate_ms": self.sample_rate.millis(),
            "point_count": self.points.len(),
            "points": points,
            "colour_start": self.palette.start.to_srgba().to_hex(),
            "colour_end": self.palette.end.to_srgba().to_hex(),
        })
    }
}

/// Every path recorded this session, in recording order.
#[derive(Resource, Default, Debug)]
pub struct RecordedPaths {
    paths: Vec<RecordedPath>,
    next_id: u32,
}

impl RecordedPaths {
    pub fn push(&mut self, points: Vec<Vec3>, sample_rate: SampleRate, palette: TrailPalette) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.paths.push(RecordedPath {
            id,
            points,
            sample_rate,
            palette,
        });
        id
    }

    pub fn get(&self, id: u32) -> Option<&RecordedPath> {
        self.paths.iter().find(|path| path.id == id)
    }

    pub fn last(&self) -> Option<&RecordedPath> {
        self.paths.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordedPath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> TrailPalette {
        TrailPalette {
            start: Color::srgb(1.0, 0.0, 0.0),
            end: Color::srgb(0.0, 1.0, 0.0),
        }
    }

    #[test]
    fn ids_are_sequential_from_zero() {
        let mut paths = RecordedPaths::default();
        let a = paths.push(vec![Vec3::ZERO, Vec3::X], SampleRate::default(), palette());
        let b = paths.push(vec![Vec3::Z, Vec3::X], SampleRate::new(200), palette());

        assert_eq!((a, b), (0, 1));
        assert_eq!(paths.len(), 2);
        assert_eq!(paths.last().map(|p| p.id), Some(1));
        assert_eq!(paths.get(1).unwrap().sample_rate.millis(), 200);
        assert!(paths.get(2).is_none());
    }

    #[test]
    fn json_export_lists_points_and_colours() {
        let mut paths = RecordedPaths::default();
        let id = paths.push(
            vec![Vec3::new(1.0, 0.0, 2.0), Vec3::new(3.0, 0.0, 4.0)],
            SampleRate::new(150),
            palette(),
        );

        let json = paths.get(id).unwrap().to_json();
        assert_eq!(json["id"], 0);
        assert_eq!(json["sample_rate_ms"], 150);
        assert_eq!(json["point_count"], 2);
        assert_eq!(json["points"][1], serde_json::json!([3.0, 0.0, 4.0]));
        assert!(json["colour_start"].as_str().unwrap().eq_ignore_ascii_case("#ff0000"));
        assert!(json["colour_end"].as_str().unwrap().eq_ignore_ascii_case("#00ff00"));
    }
}
