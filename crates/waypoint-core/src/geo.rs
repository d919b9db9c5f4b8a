//! Geofence evaluation.
//!
//! Zones are circles on the Earth's surface. A point is inside a zone when its
//! great-circle distance to the zone centre does not exceed the zone radius.
//! Distances are computed with the haversine formula on a spherical Earth of
//! mean radius, which is accurate to well under a percent at quest scales.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Mean Earth radius (IUGG), in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A WGS84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinate {
  /// Build a coordinate, rejecting non-finite or out-of-range values.
  pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
    let valid = latitude.is_finite()
      && longitude.is_finite()
      && (-90.0..=90.0).contains(&latitude)
      && (-180.0..=180.0).contains(&longitude);
    if !valid {
      return Err(Error::InvalidCoordinate { latitude, longitude });
    }
    Ok(Self { latitude, longitude })
  }
}

/// Great-circle distance between two coordinates, in metres.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
  let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
  let d_lat = lat2 - lat1;
  let d_lon = (b.longitude - a.longitude).to_radians();

  let h = (d_lat / 2.0).sin().powi(2)
    + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

  // Rounding can push `h` a hair above 1 for antipodal points.
  2.0 * EARTH_RADIUS_M * h.min(1.0).sqrt().asin()
}

// ─── Zones ───────────────────────────────────────────────────────────────────

/// A named circular target area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
  pub name:     String,
  pub center:   Coordinate,
  pub radius_m: f64,
}

impl Zone {
  pub fn new(
    name: impl Into<String>,
    center: Coordinate,
    radius_m: f64,
  ) -> Result<Self> {
    let name = name.into();
    if !(radius_m.is_finite() && radius_m > 0.0) {
      return Err(Error::InvalidZone {
        name,
        reason: format!("radius must be a positive number of metres, got {radius_m}"),
      });
    }
    Ok(Self { name, center, radius_m })
  }

  /// Distance from `point` to the centre if the point lies inside the zone.
  pub fn contains(&self, point: Coordinate) -> Option<f64> {
    let distance = distance_m(self.center, point);
    (distance <= self.radius_m).then_some(distance)
  }
}

/// The zone a point was matched to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMatch {
  pub name:       String,
  pub distance_m: f64,
}

/// Find the zone containing `point`.
///
/// Zones are checked in slice order and the first containing zone wins, even
/// when a later overlapping zone has a closer centre.
pub fn evaluate(point: Coordinate, zones: &[Zone]) -> Option<ZoneMatch> {
  zones.iter().find_map(|zone| {
    zone.contains(point).map(|distance_m| ZoneMatch {
      name: zone.name.clone(),
      distance_m,
    })
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn point(latitude: f64, longitude: f64) -> Coordinate {
    Coordinate::new(latitude, longitude).unwrap()
  }

  fn quest_zones() -> Vec<Zone> {
    vec![
      Zone::new("A", point(50.4501, 30.5234), 100.0).unwrap(),
      Zone::new("B", point(50.4356, 30.5200), 150.0).unwrap(),
    ]
  }

  #[test]
  fn point_at_centre_matches_with_zero_distance() {
    let m = evaluate(point(50.4501, 30.5234), &quest_zones()).unwrap();
    assert_eq!(m.name, "A");
    assert!(m.distance_m < 1e-6, "distance: {}", m.distance_m);
  }

  #[test]
  fn far_point_matches_nothing() {
    assert_eq!(evaluate(point(51.0, 31.0), &quest_zones()), None);
  }

  #[test]
  fn second_zone_matches_when_first_does_not() {
    let m = evaluate(point(50.4360, 30.5200), &quest_zones()).unwrap();
    assert_eq!(m.name, "B");
    assert!(m.distance_m > 30.0 && m.distance_m < 60.0, "distance: {}", m.distance_m);
  }

  #[test]
  fn overlapping_zones_return_first_in_order() {
    let centre = point(50.4501, 30.5234);
    let zones = vec![
      // Larger zone whose centre is ~80 m away from the probe.
      Zone::new("wide", point(50.4508, 30.5234), 500.0).unwrap(),
      Zone::new("exact", centre, 10.0).unwrap(),
    ];
    for _ in 0..3 {
      let m = evaluate(centre, &zones).unwrap();
      assert_eq!(m.name, "wide");
    }
  }

  #[test]
  fn distance_between_quest_zones() {
    let zones = quest_zones();
    let d = distance_m(zones[0].center, zones[1].center);
    assert!(d > 1_500.0 && d < 1_800.0, "distance: {d}");
    assert!((d - distance_m(zones[1].center, zones[0].center)).abs() < 1e-9);
  }

  #[test]
  fn boundary_is_inclusive() {
    let centre = point(0.0, 0.0);
    let edge = point(0.0, 0.001);
    let radius = distance_m(centre, edge);
    let zone = Zone::new("edge", centre, radius).unwrap();
    assert!(zone.contains(edge).is_some());
  }

  #[test]
  fn rejects_bad_coordinates_and_radii() {
    assert!(matches!(Coordinate::new(91.0, 0.0), Err(Error::InvalidCoordinate { .. })));
    assert!(matches!(Coordinate::new(0.0, f64::NAN), Err(Error::InvalidCoordinate { .. })));
    assert!(matches!(Zone::new("z", point(0.0, 0.0), 0.0), Err(Error::InvalidZone { .. })));
    assert!(matches!(Zone::new("z", point(0.0, 0.0), -5.0), Err(Error::InvalidZone { .. })));
  }
}
