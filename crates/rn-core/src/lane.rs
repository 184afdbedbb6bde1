//! Lane edges, center-lines, and the lane capability flags.

use crate::{Point, Polyline, SectionId};

// ── LaneEdge ──────────────────────────────────────────────────────────────────

/// A boundary polyline of a section.
///
/// `kind` is the boundary type tag (e.g. `"solid"`, `"dashed"`); `index`
/// disambiguates several edges of the same kind within one section.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneEdge {
    pub section_id: SectionId,
    pub kind:       String,
    pub index:      i32,
    pub polyline:   Polyline,
}

impl LaneEdge {
    pub fn new(
        section_id: SectionId,
        kind: impl Into<String>,
        index: i32,
        polyline: impl IntoIterator<Item = Point>,
    ) -> Self {
        Self {
            section_id,
            kind: kind.into(),
            index,
            polyline: polyline.into_iter().collect(),
        }
    }

    /// Canonical ordering key within a section: kind first, then index.
    #[inline]
    pub fn sort_key(&self) -> (&str, i32) {
        (self.kind.as_str(), self.index)
    }
}

// ── CenterLine ────────────────────────────────────────────────────────────────

/// A lane's center-line polyline plus its traffic capability flags.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CenterLine {
    pub section_id: SectionId,
    pub kind:       String,
    pub index:      i32,
    pub polyline:   Polyline,
    pub attributes: LaneAttributes,
}

impl CenterLine {
    pub fn new(
        section_id: SectionId,
        kind: impl Into<String>,
        index: i32,
        polyline: impl IntoIterator<Item = Point>,
        attributes: LaneAttributes,
    ) -> Self {
        Self {
            section_id,
            kind: kind.into(),
            index,
            polyline: polyline.into_iter().collect(),
            attributes,
        }
    }
}

// ── LaneAttributes ────────────────────────────────────────────────────────────

/// The sixteen independent capability flags of a lane.
///
/// `Default` is all-`false`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneAttributes {
    pub can_go_straight:                bool,
    pub can_turn_left:                  bool,
    pub can_turn_right:                 bool,
    pub can_turn_on_red_signal:         bool,
    pub can_change_lane_left:           bool,
    pub can_change_lane_right:          bool,
    pub is_road_shoulder:               bool,
    pub is_bicycle_lane:                bool,
    pub is_vehicle_lane:                bool,
    pub is_pedestrian_lane:             bool,
    pub is_standard_bus_lane:           bool,
    pub is_whole_day_bus_lane:          bool,
    pub is_high_occupancy_vehicle_lane: bool,
    pub can_freely_park_here:           bool,
    pub can_stop_here:                  bool,
    pub is_u_turn_allowed_here:         bool,
}

impl LaneAttributes {
    /// Document keys of the flags, in the order [`flags`](Self::flags)
    /// yields them.  These strings are part of the output format.
    pub const KEYS: [&'static str; 16] = [
        "can-go-straight",
        "can-turn-left",
        "can-turn-right",
        "can-turn-on-red-signal",
        "can-change-lane-left",
        "can-change-lane-right",
        "is-road-shoulder",
        "is-bicycle-lane",
        "is-vehicle-lane",
        "is-pedestrian-lane",
        "is-standard-bus-lane",
        "is-whole-day-bus-lane",
        "is-high-occupancy-vehicle-lane",
        "can-freely-park-here",
        "can-stop-here",
        "is-U-turn-allowed-here",
    ];

    /// Every flag paired with its document key.
    pub fn flags(&self) -> [(&'static str, bool); 16] {
        let values = [
            self.can_go_straight,
            self.can_turn_left,
            self.can_turn_right,
            self.can_turn_on_red_signal,
            self.can_change_lane_left,
            self.can_change_lane_right,
            self.is_road_shoulder,
            self.is_bicycle_lane,
            self.is_vehicle_lane,
            self.is_pedestrian_lane,
            self.is_standard_bus_lane,
            self.is_whole_day_bus_lane,
            self.is_high_occupancy_vehicle_lane,
            self.can_freely_park_here,
            self.can_stop_here,
            self.is_u_turn_allowed_here,
        ];
        std::array::from_fn(|i| (Self::KEYS[i], values[i]))
    }

    /// Mutable access to a flag by its document key.  Returns `None` for an
    /// unknown key.
    pub fn flag_mut(&mut self, key: &str) -> Option<&mut bool> {
        let flag = match key {
            "can-go-straight"                => &mut self.can_go_straight,
            "can-turn-left"                  => &mut self.can_turn_left,
            "can-turn-right"                 => &mut self.can_turn_right,
            "can-turn-on-red-signal"         => &mut self.can_turn_on_red_signal,
            "can-change-lane-left"           => &mut self.can_change_lane_left,
            "can-change-lane-right"          => &mut self.can_change_lane_right,
            "is-road-shoulder"               => &mut self.is_road_shoulder,
            "is-bicycle-lane"                => &mut self.is_bicycle_lane,
            "is-vehicle-lane"                => &mut self.is_vehicle_lane,
            "is-pedestrian-lane"             => &mut self.is_pedestrian_lane,
            "is-standard-bus-lane"           => &mut self.is_standard_bus_lane,
            "is-whole-day-bus-lane"          => &mut self.is_whole_day_bus_lane,
            "is-high-occupancy-vehicle-lane" => &mut self.is_high_occupancy_vehicle_lane,
            "can-freely-park-here"           => &mut self.can_freely_park_here,
            "can-stop-here"                  => &mut self.can_stop_here,
            "is-U-turn-allowed-here"         => &mut self.is_u_turn_allowed_here,
            _                                => return None,
        };
        Some(flag)
    }
}
