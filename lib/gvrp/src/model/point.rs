use std::fmt;
use crate::metrics::{self, Euclidean, Metric};

/// Integer coordinates of a node on the plane.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Point {
  pub x: i32,
  pub y: i32,
}

impl Point {
  pub const fn new(x: i32, y: i32) -> Self {
    Point { x, y }
  }

  /// Rounded EUC_2D distance, see [`metrics::euc_2d`].
  #[inline]
  pub fn distance_to(&self, other: &Point) -> u32 {
    metrics::euc_2d(*self, *other)
  }

  /// Unrounded Euclidean distance.
  #[inline]
  pub fn exact_distance_to(&self, other: &Point) -> f64 {
    Euclidean::compute(self.as_tuple(), other.as_tuple())
  }

  /// Polar angle (radians, in `(-pi, pi]`) of the vector pointing from `self` towards `other`.
  pub fn angle_from(&self, other: &Point) -> f64 {
    let dx = other.x as f64 - self.x as f64;
    let dy = other.y as f64 - self.y as f64;
    dy.atan2(dx)
  }

  #[inline]
  pub fn as_tuple(&self) -> (i64, i64) {
    (self.x as i64, self.y as i64)
  }
}

impl From<(i32, i32)> for Point {
  fn from((x, y): (i32, i32)) -> Self { Point { x, y } }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::f64::consts::{FRAC_PI_2, PI};

  #[test]
  fn pythagorean_triangle() {
    let a = Point::new(0, 3);
    let b = Point::new(4, 0);
    assert_eq!(a.distance_to(&b), 5);
    assert_eq!(b.distance_to(&a), 5);
    assert_eq!(a.distance_to(&a), 0);
  }

  #[test]
  fn distance_rounds_half_up() {
    // sqrt(2) = 1.414..
    assert_eq!(Point::new(0, 0).distance_to(&Point::new(1, 1)), 1);
    // sqrt(8) = 2.828..
    assert_eq!(Point::new(0, 0).distance_to(&Point::new(2, 2)), 3);
    // sqrt(5) = 2.236..
    assert_eq!(Point::new(0, 0).distance_to(&Point::new(1, 2)), 2);
    // sqrt(13) = 3.605..
    assert_eq!(Point::new(0, 0).distance_to(&Point::new(2, 3)), 4);
  }

  #[test]
  fn negative_coordinates() {
    assert_eq!(Point::new(-3, 0).distance_to(&Point::new(0, -4)), 5);
  }

  #[test]
  fn angles() {
    let o = Point::new(0, 0);
    assert!((o.angle_from(&Point::new(1, 0))).abs() < 1e-12);
    assert!((o.angle_from(&Point::new(0, 5)) - FRAC_PI_2).abs() < 1e-12);
    assert!((o.angle_from(&Point::new(-2, 0)) - PI).abs() < 1e-12);
  }

  #[test]
  fn display() {
    assert_eq!(Point::new(-1, 7).to_string(), "(-1, 7)");
  }
}
