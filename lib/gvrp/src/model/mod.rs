use std::fmt;
use std::num::NonZeroU32;
use itertools::Itertools;

use crate::Map;
use crate::metrics::{self, Euclidean};

mod point;
pub use point::Point;

macro_rules! define_one_based_id {
  ($name:ident) => {
    /// 1-based identifier, as it appears in the instance file.
    #[derive(PartialEq, Eq, Hash, Copy, Clone, Debug, Ord, PartialOrd)]
    pub struct $name(NonZeroU32);

    impl $name {
      #[inline]
      pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map($name)
      }

      #[inline]
      pub fn get(&self) -> u32 { self.0.get() }

      /// 0-based position in the owning collection.
      #[inline]
      pub fn index(&self) -> usize { (self.0.get() - 1) as usize }

      #[inline]
      pub(crate) fn from_index(idx: usize) -> Self {
        debug_assert!(idx < u32::MAX as usize);
        $name(NonZeroU32::new(idx as u32 + 1).expect("index + 1 is never zero"))
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
      }
    }
  }
}

define_one_based_id!(CustomerId);
define_one_based_id!(SetId);

impl CustomerId {
  /// Node index in the instance file and in [`Instance::distance_matrix`] (the depot is node 0
  /// in the matrix and node 1 in the file).
  #[inline]
  pub fn node(&self) -> usize { self.get() as usize }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Customer {
  pub(crate) id: CustomerId,
  pub(crate) location: Point,
  pub(crate) set: SetId,
}

impl Customer {
  pub fn id(&self) -> CustomerId { self.id }

  pub fn location(&self) -> Point { self.location }

  /// The set this customer belongs to.
  pub fn set(&self) -> SetId { self.set }
}

/// A group of customers; visiting any one member satisfies `demand`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CustomerSet {
  pub(crate) id: SetId,
  pub(crate) demand: u32,
  pub(crate) members: Vec<CustomerId>,
}

impl CustomerSet {
  pub fn id(&self) -> SetId { self.id }

  pub fn demand(&self) -> u32 { self.demand }

  /// Members in ascending customer id order.
  pub fn members(&self) -> &[CustomerId] { &self.members }

  pub fn len(&self) -> usize { self.members.len() }

  pub fn is_empty(&self) -> bool { self.members.is_empty() }

  pub fn contains(&self, customer: CustomerId) -> bool {
    self.members.binary_search(&customer).is_ok()
  }
}

impl fmt::Display for CustomerSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "S{} = {{ demand = {}, customers = [{}] }}", self.id, self.demand, self.members.iter().join(", "))
  }
}

/// A parsed GVRP instance.  Owns the depot, all customers and all sets; customers and sets
/// refer to each other by id.
///
/// Instances are only produced by the parser (see [`crate::parse_gvrp`]), which guarantees:
/// * customer ids are exactly `1..=customer_cnt()` and `customers()[i].id().index() == i`,
/// * set ids are exactly `1..=set_cnt()` and `sets()[i].id().index() == i`,
/// * every customer belongs to exactly one set, and a set lists exactly the customers pointing to it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Instance {
  pub(crate) name: String,
  pub(crate) depot: Point,
  pub(crate) customers: Vec<Customer>,
  pub(crate) sets: Vec<CustomerSet>,
  pub(crate) vehicle_cnt: u32,
  pub(crate) max_cap: u32,
}

impl Instance {
  pub fn name(&self) -> &str { &self.name }

  pub fn depot(&self) -> Point { self.depot }

  pub fn customers(&self) -> &[Customer] { &self.customers }

  pub fn sets(&self) -> &[CustomerSet] { &self.sets }

  pub fn vehicle_cnt(&self) -> u32 { self.vehicle_cnt }

  pub fn max_cap(&self) -> u32 { self.max_cap }

  pub fn customer_cnt(&self) -> usize { self.customers.len() }

  pub fn set_cnt(&self) -> usize { self.sets.len() }

  /// Depot plus customers; the `DIMENSION` header field.
  pub fn node_cnt(&self) -> usize { self.customers.len() + 1 }

  pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
    self.customers.get(id.index())
  }

  pub fn set(&self, id: SetId) -> Option<&CustomerSet> {
    self.sets.get(id.index())
  }

  /// The set of a customer owned by this instance.
  pub fn set_of(&self, customer: &Customer) -> Option<&CustomerSet> {
    self.set(customer.set)
  }

  pub fn members<'a>(&'a self, set: &'a CustomerSet) -> impl Iterator<Item=&'a Customer> + 'a {
    set.members.iter().filter_map(move |&c| self.customer(c))
  }

  /// True if `customer` is one of the customers stored in this instance (identity, not equality).
  pub fn owns(&self, customer: &Customer) -> bool {
    self.customers.as_ptr_range().contains(&(customer as *const Customer))
  }

  /// Location of node `node`, where node 0 is the depot and node `i` is customer `i`.
  pub fn node_location(&self, node: usize) -> Option<Point> {
    match node {
      0 => Some(self.depot),
      i => self.customers.get(i - 1).map(|c| c.location),
    }
  }

  /// Sum of all set demands.
  pub fn total_demand(&self) -> u64 {
    self.sets.iter().map(|s| s.demand as u64).sum()
  }

  /// Rounded EUC_2D distances between every pair of nodes (0 = depot, `i` = customer `i`).
  pub fn distance_matrix(&self) -> Map<(usize, usize), u32> {
    let coords = std::iter::once(self.depot)
      .chain(self.customers.iter().map(|c| c.location))
      .map(|p| p.as_tuple())
      .collect_vec();
    metrics::dist_matrix_pp(Euclidean(), &coords, |d| d.round() as u32)
  }
}

impl fmt::Display for Instance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "name = {}", self.name)?;
    writeln!(f, "fleet = {}", self.vehicle_cnt)?;
    writeln!(f, "capacity = {}", self.max_cap)?;
    writeln!(f, "depot = {}", self.depot)?;
    write!(f, "sets =")?;
    for s in &self.sets {
      write!(f, "\n{}", s)?;
    }
    Ok(())
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub(crate) fn small_instance() -> Instance {
    let c = |id: usize, x, y, set: usize| Customer {
      id: CustomerId::from_index(id - 1),
      location: Point::new(x, y),
      set: SetId::from_index(set - 1),
    };
    let s = |id: usize, demand, members: &[u32]| CustomerSet {
      id: SetId::from_index(id - 1),
      demand,
      members: members.iter().map(|&m| CustomerId::new(m).unwrap()).collect(),
    };
    Instance {
      name: "toy".to_string(),
      depot: Point::new(0, 0),
      customers: vec![c(1, 0, 3, 1), c(2, 4, 0, 2), c(3, 4, 3, 1)],
      sets: vec![s(1, 10, &[1, 3]), s(2, 7, &[2])],
      vehicle_cnt: 2,
      max_cap: 20,
    }
  }

  #[test]
  fn ids_are_one_based() {
    assert!(CustomerId::new(0).is_none());
    let id = CustomerId::new(4).unwrap();
    assert_eq!(id.index(), 3);
    assert_eq!(id.node(), 4);
    assert_eq!(SetId::from_index(0).get(), 1);
  }

  #[test]
  fn lookups() {
    let inst = small_instance();
    let c3 = inst.customer(CustomerId::new(3).unwrap()).unwrap();
    assert_eq!(c3.location(), Point::new(4, 3));
    let s = inst.set_of(c3).unwrap();
    assert_eq!(s.demand(), 10);
    assert!(s.contains(c3.id()));
    assert_eq!(inst.members(s).map(|c| c.id().get()).collect_vec(), vec![1, 3]);
    assert!(inst.customer(CustomerId::new(4).unwrap()).is_none());
    assert_eq!(inst.node_location(0), Some(Point::new(0, 0)));
    assert_eq!(inst.node_location(2), Some(Point::new(4, 0)));
    assert_eq!(inst.node_location(4), None);
    assert_eq!(inst.total_demand(), 17);
    assert_eq!(inst.node_cnt(), 4);
  }

  #[test]
  fn ownership_is_by_identity() {
    let inst = small_instance();
    let copy = inst.customers()[0].clone();
    assert!(inst.owns(&inst.customers()[0]));
    assert!(inst.owns(&inst.customers()[2]));
    assert!(!inst.owns(&copy));
  }

  #[test]
  fn distance_matrix() {
    let inst = small_instance();
    let m = inst.distance_matrix();
    assert_eq!(m.len(), 16);
    assert_eq!(m[&(1, 2)], 5);
    assert_eq!(m[&(0, 3)], 5);
    assert_eq!(m[&(2, 3)], 3);
  }

  #[test]
  fn summary() {
    let inst = small_instance();
    let expected = "name = toy\nfleet = 2\ncapacity = 20\ndepot = (0, 0)\nsets =\n\
                    S1 = { demand = 10, customers = [1, 3] }\n\
                    S2 = { demand = 7, customers = [2] }";
    assert_eq!(inst.to_string(), expected);
  }
}
