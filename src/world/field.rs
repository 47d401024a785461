use serde::{Deserialize, Serialize};

/// Field dimensions in meters, sent once right after the handshake.
#[derive(Deserialize, Serialize, Clone, Copy, PartialEq, Debug)]
pub struct FieldGeometry {
    pub field_length: f32,
    pub field_width: f32,
    pub goal_width: f32,
    pub center_circle_radius: f32,
    pub defense_radius: f32,
    pub defense_stretch: f32,
    pub free_kick_from_defense_dist: f32,
    pub penalty_spot_from_field_line_dist: f32,
    pub penalty_line_from_spot_dist: f32,
}

impl FieldGeometry {
    /// number of values making up a geometry record on the wire
    pub const FIELD_COUNT: usize = 9;

    /// values in wire order
    pub fn to_array(&self) -> [f32; Self::FIELD_COUNT] {
        [
            self.field_length,
            self.field_width,
            self.goal_width,
            self.center_circle_radius,
            self.defense_radius,
            self.defense_stretch,
            self.free_kick_from_defense_dist,
            self.penalty_spot_from_field_line_dist,
            self.penalty_line_from_spot_dist,
        ]
    }

    pub fn from_array(values: [f32; Self::FIELD_COUNT]) -> Self {
        let [
            field_length,
            field_width,
            goal_width,
            center_circle_radius,
            defense_radius,
            defense_stretch,
            free_kick_from_defense_dist,
            penalty_spot_from_field_line_dist,
            penalty_line_from_spot_dist,
        ] = values;
        Self {
            field_length,
            field_width,
            goal_width,
            center_circle_radius,
            defense_radius,
            defense_stretch,
            free_kick_from_defense_dist,
            penalty_spot_from_field_line_dist,
            penalty_line_from_spot_dist,
        }
    }
}

impl Default for FieldGeometry {
    /// defaults to div B size
    fn default() -> Self {
        Self::from_array([9.0, 6.0, 1.0, 0.5, 1.0, 0.5, 0.2, 1.0, 0.4])
    }
}
