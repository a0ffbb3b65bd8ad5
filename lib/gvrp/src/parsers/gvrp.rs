//! The GVRP instance grammar:
//!
//! ```text
//! NAME : <token>
//! COMMENT : GVRP
//! DIMENSION : <uint>
//! VEHICLES : <uint>
//! GVRP_SETS : <uint>
//! CAPACITY : <uint>
//! EDGE_WEIGHT_TYPE : EUC_2D
//! NODE_COORD_SECTION
//! <idx> <x> <y>                 DIMENSION times, idx = 1..DIMENSION, node 1 is the depot
//! GVRP_SET_SECTION
//! <set_idx> <node_idx>... -1    GVRP_SETS times
//! DEMAND_SECTION
//! <set_idx> <demand>            GVRP_SETS times
//! ```
//!
//! Anything after the demand section is ignored.
use tracing::*;

use crate::{Error, ErrorKind};
use crate::model::{Customer, CustomerId, CustomerSet, Instance, Point, SetId};
use super::common::SET_TERMINATOR;
use super::tokens::TokenReader;

#[derive(Debug, Clone)]
struct Header {
  name: String,
  dimension: u32,
  vehicle_cnt: u32,
  set_cnt: u32,
  max_cap: u32,
}

impl Header {
  fn customer_cnt(&self) -> u32 { self.dimension - 1 }
}

/// A customer whose set may not be known yet.
#[derive(Debug, Copy, Clone)]
struct CustomerDraft {
  location: Point,
  set: Option<SetId>,
}

/// Owns everything allocated while an instance is being read.  Nothing is visible outside the
/// parser until [`InstanceBuilder::finish`] succeeds; on any earlier error the builder is
/// dropped along with all of its buffers.
#[derive(Debug)]
struct InstanceBuilder {
  header: Header,
  depot: Point,
  customers: Vec<CustomerDraft>,
  demands: Vec<u32>,
}

impl InstanceBuilder {
  fn new(header: Header) -> Result<Self, Error> {
    let mut customers = Vec::new();
    customers.try_reserve_exact(header.customer_cnt() as usize)?;
    let mut demands = Vec::new();
    demands.try_reserve_exact(header.set_cnt as usize)?;
    Ok(InstanceBuilder { header, depot: Point::default(), customers, demands })
  }

  fn push_customer(&mut self, location: Point) {
    debug_assert!(self.customers.len() < self.header.customer_cnt() as usize);
    self.customers.push(CustomerDraft { location, set: None });
  }

  /// Records that customer `idx` (0-based) belongs to `set`.
  fn assign(&mut self, idx: usize, set: SetId) -> Result<(), ErrorKind> {
    let draft = self.customers.get_mut(idx).ok_or(ErrorKind::IndexOutOfRange)?;
    match draft.set {
      Some(_) => Err(ErrorKind::DuplicateAssignment),
      None => {
        draft.set = Some(set);
        Ok(())
      }
    }
  }

  /// Demands arrive in set order.
  fn push_demand(&mut self, set: SetId, demand: u32) {
    debug_assert_eq!(set.index(), self.demands.len());
    self.demands.push(demand);
  }

  fn finish(self) -> Result<Instance, Error> {
    let InstanceBuilder { header, depot, customers: drafts, demands } = self;

    if drafts.len() != header.customer_cnt() as usize || demands.len() != header.set_cnt as usize {
      return Err(Error::new(ErrorKind::Unexpected, format!(
        "read {} customers and {} demands, expected {} and {}",
        drafts.len(), demands.len(), header.customer_cnt(), header.set_cnt,
      )));
    }

    let mut customers = Vec::new();
    customers.try_reserve_exact(drafts.len())?;
    let mut member_cnt = vec![0usize; demands.len()];
    for (k, d) in drafts.iter().enumerate() {
      let id = CustomerId::from_index(k);
      let set = d.set.ok_or_else(|| Error::new(
        ErrorKind::UnassignedCustomer,
        format!("customer {} (node {}) is not listed in GVRP_SET_SECTION", id, id.node()),
      ))?;
      member_cnt[set.index()] += 1;
      customers.push(Customer { id, location: d.location, set });
    }

    // Assignments arrive customer by customer; group them by set in customer id order.
    let mut sets = Vec::new();
    sets.try_reserve_exact(demands.len())?;
    for (k, (demand, &cnt)) in demands.into_iter().zip(&member_cnt).enumerate() {
      let id = SetId::from_index(k);
      let mut members = Vec::new();
      members.try_reserve_exact(cnt)?;
      sets.push(CustomerSet { id, demand, members });
    }
    for c in &customers {
      sets[c.set.index()].members.push(c.id);
    }

    Ok(Instance {
      name: header.name,
      depot,
      customers,
      sets,
      vehicle_cnt: header.vehicle_cnt,
      max_cap: header.max_cap,
    })
  }
}

fn parse_header(r: &mut TokenReader) -> Result<Header, Error> {
  let name = r.read_key_value("NAME")?.text.to_string();

  let comment = r.read_key_value("COMMENT")?;
  if comment.text != "GVRP" {
    return Err(r.error(ErrorKind::MalformedToken, format!("expected `GVRP`, found `{}`", comment.text)));
  }

  let dimension = r.read_key_value_uint("DIMENSION")?;
  if dimension == 0 {
    return Err(r.error(ErrorKind::MalformedToken, "DIMENSION must count the depot"));
  }
  let vehicle_cnt = r.read_key_value_uint("VEHICLES")?;
  let set_cnt = r.read_key_value_uint("GVRP_SETS")?;
  let max_cap = r.read_key_value_uint("CAPACITY")?;

  let weight_type = r.read_key_value("EDGE_WEIGHT_TYPE")?;
  if weight_type.text != "EUC_2D" {
    return Err(r.error(ErrorKind::UnsupportedValue,
                       format!("EDGE_WEIGHT_TYPE `{}` (only EUC_2D is supported)", weight_type.text)));
  }

  Ok(Header { name, dimension, vehicle_cnt, set_cnt, max_cap })
}

fn expect_index(r: &TokenReader, section: &str, found: u32, expected: u32) -> Result<(), Error> {
  if found == expected {
    Ok(())
  } else {
    Err(r.error(ErrorKind::IndexMismatch, format!("{}: expected index {}, found {}", section, expected, found)))
  }
}

fn parse_node_coords(r: &mut TokenReader, b: &mut InstanceBuilder) -> Result<(), Error> {
  r.read_literal("NODE_COORD_SECTION")?;
  for node in 1..=b.header.dimension {
    let idx = r.read_uint()?;
    expect_index(r, "NODE_COORD_SECTION", idx, node)?;
    let x = r.read_int()?;
    let y = r.read_int()?;
    if node == 1 {
      b.depot = Point::new(x, y);
    } else {
      b.push_customer(Point::new(x, y));
    }
  }
  trace!(nodes = b.header.dimension, "read node coordinates");
  Ok(())
}

fn parse_sets(r: &mut TokenReader, b: &mut InstanceBuilder) -> Result<(), Error> {
  r.read_literal("GVRP_SET_SECTION")?;
  for k in 1..=b.header.set_cnt {
    let idx = r.read_uint()?;
    expect_index(r, "GVRP_SET_SECTION", idx, k)?;
    let set = SetId::from_index(k as usize - 1);
    loop {
      let node = r.read_uint_or_terminator()?;
      if node == SET_TERMINATOR {
        break;
      }
      if node < 2 || node > b.header.dimension {
        return Err(r.error(ErrorKind::IndexOutOfRange,
                           format!("set {} lists node {}, customers are nodes 2..={}", k, node, b.header.dimension)));
      }
      b.assign(node as usize - 2, set)
        .map_err(|kind| r.error(kind, format!("node {} listed again in set {}", node, k)))?;
    }
  }
  trace!(sets = b.header.set_cnt, "read set memberships");
  Ok(())
}

fn parse_demands(r: &mut TokenReader, b: &mut InstanceBuilder) -> Result<(), Error> {
  r.read_literal("DEMAND_SECTION")?;
  for k in 1..=b.header.set_cnt {
    let idx = r.read_uint()?;
    expect_index(r, "DEMAND_SECTION", idx, k)?;
    let demand = r.read_uint()?;
    b.push_demand(SetId::from_index(k as usize - 1), demand);
  }
  trace!(sets = b.header.set_cnt, "read set demands");
  Ok(())
}

fn parse_sections(r: &mut TokenReader) -> Result<Instance, Error> {
  let header = parse_header(r)?;
  debug!(name = %header.name, dimension = header.dimension, sets = header.set_cnt, "read header");
  let mut builder = InstanceBuilder::new(header)?;
  parse_node_coords(r, &mut builder)?;
  parse_sets(r, &mut builder)?;
  parse_demands(r, &mut builder)?;
  builder.finish()
}

/// Parses a complete GVRP instance.  Either the whole instance is returned or nothing is:
/// every intermediate buffer is released before the error is returned.
pub fn parse_gvrp(input: &str) -> Result<Instance, Error> {
  let mut reader = TokenReader::new(input);
  match parse_sections(&mut reader) {
    Ok(instance) => {
      debug!(name = instance.name(), customers = instance.customer_cnt(), sets = instance.set_cnt(), "parsed GVRP instance");
      Ok(instance)
    }
    Err(e) => {
      warn!(error = %e, "aborted GVRP parse");
      Err(e)
    }
  }
}
