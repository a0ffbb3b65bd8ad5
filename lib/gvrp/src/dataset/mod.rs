//! Collections of instance files on disk.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use fnv::FnvHashSet;
use std::borrow::Cow;
use tracing::debug;

use crate::{Error, ErrorKind, Instance};
use crate::parsers::{GvrpFmt, ParseInstance};


pub trait IdxNameMap {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>>;

  fn name_to_index(&self, name: &str) -> Result<usize>;

  fn len(&self) -> usize;

  fn is_empty(&self) -> bool { self.len() == 0 }

  fn check_idx(&self, idx: usize) -> Result<()> {
    if self.len() <= idx {
      Err(Error::new(ErrorKind::IndexOutOfRange, format!("no instance {} (0..{})", idx, self.len())).into())
    } else {
      Ok(())
    }
  }
}


impl<'a, D: IdxNameMap> IdxNameMap for &'a D {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>> {
    D::index_to_name(self, idx)
  }

  fn name_to_index(&self, name: &str) -> Result<usize> {
    D::name_to_index(self, name)
  }

  fn len(&self) -> usize {
    D::len(self)
  }
}

pub trait Dataset: IdxNameMap + Sync {
  type Instance;
  fn load_instance(&self, idx: usize) -> Result<Self::Instance>;

  fn load_instance_by_name(&self, name: &str) -> Result<Self::Instance> {
    self.load_instance(self.name_to_index(name)?)
  }
}


impl<'a, D: Dataset> Dataset for &'a D {
  type Instance = D::Instance;

  fn load_instance(&self, idx: usize) -> Result<Self::Instance> {
    D::load_instance(self, idx)
  }
}

fn unknown_name(name: &str) -> anyhow::Error {
  Error::new(ErrorKind::UnknownInstanceName, name.to_string()).into()
}


/// Every file in a directory matching a glob pattern (eg `*.gvrp`), ordered by path.  Instances
/// are named by file stem.
pub struct DirLayout {
  name_order: Vec<PathBuf>,
  name_to_idx_map: HashMap<String, usize>,
}

impl DirLayout {
  pub fn new(dir: impl AsRef<Path>, patt: &str) -> Result<Self> {
    let dir = dir.as_ref();
    let ctx = format!("try read directory {:?}", dir);
    let dir = dir.canonicalize().context(ctx)?;

    let mut p = dir.to_string_lossy().into_owned();
    p.push('/');
    p.push_str(patt);

    let names : std::result::Result<Vec<PathBuf>, _> = glob::glob(&p)?.collect();
    let mut name_order = names?;
    name_order.sort();
    let name_to_idx_map: Result<HashMap<_, _>> = name_order.iter()
      .enumerate()
      .map(|(k, p)| {
        let n = p.file_stem().ok_or_else(|| anyhow::anyhow!("missing file stem: {:?}", p))?;
        Ok((n.to_string_lossy().into_owned(), k))
      })
      .collect();
    let name_to_idx_map = name_to_idx_map?;
    debug!(dir = ?dir, instances = name_order.len(), "indexed instance directory");
    Ok(DirLayout {
      name_order,
      name_to_idx_map
    })
  }

  pub fn path(&self, idx: usize) -> Result<&Path> {
    self.check_idx(idx)?;
    Ok(self.name_order[idx].as_path())
  }
}

impl IdxNameMap for DirLayout {
  fn index_to_name(&self, idx: usize) -> Result<Cow<str>> {
    self.check_idx(idx)?;
    let name = self.name_order[idx].file_stem()
      .ok_or_else(|| anyhow::anyhow!("missing file stem for idx {}", idx))?;
    Ok(name.to_string_lossy())
  }

  fn name_to_index(&self, name: &str) -> Result<usize> {
    let idx = *self.name_to_idx_map.get(name).ok_or_else(|| unknown_name(name))?;
    Ok(idx)
  }

  fn len(&self) -> usize { self.name_order.len() }
}

impl Dataset for DirLayout {
  type Instance = Instance;

  fn load_instance(&self, idx: usize) -> Result<Instance> {
    let path = self.path(idx)?;
    Instance::parse(GvrpFmt(path)).context(format!("failed to load {:?}", path))
  }
}


pub struct Subset<D> {
  dataset: D,
  indices: Vec<usize>,
}

impl<D: IdxNameMap> Subset<D> {
  pub fn new(dataset: D, indices: Vec<usize>) -> Result<Self> {
    for &i in &indices {
      dataset.check_idx(i)?;
    }
    let index_set: FnvHashSet<_> = indices.iter().cloned().collect();
    if index_set.len() != indices.len() {
      anyhow::bail!("subset indices must be unique")
    }
    Ok(Subset { dataset, indices })
  }

  fn map_index(&self, idx: usize) -> Result<usize> {
    self.indices.get(idx).copied()
      .ok_or_else(|| Error::new(ErrorKind::IndexOutOfRange, format!("no instance {} in subset", idx)).into())
  }
}

impl<D: IdxNameMap> IdxNameMap for Subset<D> {
  fn name_to_index(&self, name: &str) -> Result<usize> {
    let idx = self.dataset.name_to_index(name)?;
    self.indices.iter().position(|&i| i == idx).ok_or_else(|| unknown_name(name))
  }

  fn index_to_name(&self, idx: usize) -> Result<Cow<str>> {
    self.dataset.index_to_name(self.map_index(idx)?)
  }

  fn len(&self) -> usize { self.indices.len() }
}

impl<I, D: Dataset<Instance=I>> Dataset for Subset<D> {
  type Instance = I;
  fn load_instance(&self, idx: usize) -> Result<I> {
    self.dataset.load_instance(self.map_index(idx)?)
  }
}
