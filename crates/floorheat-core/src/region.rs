use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_REGION_POINTS;
use crate::error::{FloorheatError, Result};
use crate::geometry::{point_in_polygon, Point};
use crate::values::ValueMap;

/// Stable region identifier. Never reused within a `RegionSet`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RegionId(pub u64);

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named department polygon in image coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    id: RegionId,
    name: String,
    points: Vec<Point>,
    value: f64,
}

impl Region {
    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Sanitised sales value, kept in step with the loaded value map.
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() >= MIN_REGION_POINTS
    }

    /// Arithmetic mean of the vertices.
    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Point::ZERO, |acc, p| acc + *p);
        Some(sum / self.points.len() as f32)
    }

    /// Largest vertex distance from the centroid. Zero for empty regions.
    pub fn bounding_radius(&self) -> f32 {
        let Some(c) = self.centroid() else {
            return 0.0;
        };
        self.points
            .iter()
            .map(|p| p.distance(c))
            .fold(0.0, f32::max)
    }
}

/// Read-only view of a region for list/debug UIs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionSummary {
    pub id: RegionId,
    pub name: String,
    pub point_count: usize,
    pub value: f64,
    pub complete: bool,
}

/// Ordered collection of regions with unique names.
#[derive(Clone, Debug, Default)]
pub struct RegionSet {
    regions: Vec<Region>,
    next_id: u64,
}

impl RegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty region. The name is trimmed; empty and duplicate names
    /// are rejected without touching the set.
    pub fn create(&mut self, name: &str, values: &ValueMap) -> Result<RegionId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FloorheatError::InvalidName(name.to_string()));
        }
        if self.find_by_name(name).is_some() {
            return Err(FloorheatError::DuplicateName(name.to_string()));
        }

        let id = RegionId(self.next_id);
        self.next_id += 1;
        self.regions.push(Region {
            id,
            name: name.to_string(),
            points: Vec::new(),
            value: values.get(name),
        });
        Ok(id)
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Region> {
        let name = name.trim();
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn contains(&self, id: RegionId) -> bool {
        self.get(id).is_some()
    }

    fn get_mut(&mut self, id: RegionId) -> Result<&mut Region> {
        self.regions
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(FloorheatError::UnknownRegion(id))
    }

    /// Append a vertex. Callers gate this on the region being actively drawn.
    pub(crate) fn append_point(&mut self, id: RegionId, point: Point) -> Result<usize> {
        let region = self.get_mut(id)?;
        region.points.push(point);
        Ok(region.points.len())
    }

    pub fn clear_points(&mut self, id: RegionId) -> Result<()> {
        self.get_mut(id)?.points.clear();
        Ok(())
    }

    pub fn delete(&mut self, id: RegionId) -> Result<Region> {
        let index = self
            .regions
            .iter()
            .position(|r| r.id == id)
            .ok_or(FloorheatError::UnknownRegion(id))?;
        Ok(self.regions.remove(index))
    }

    /// Re-read every region's value from `values`; absent names become 0.
    pub fn sync_values(&mut self, values: &ValueMap) {
        for region in &mut self.regions {
            region.value = values.get(&region.name);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn complete(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.is_complete())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Topmost complete region containing `point` (image space).
    pub fn region_at(&self, point: Point) -> Option<&Region> {
        self.regions
            .iter()
            .rev()
            .find(|r| r.is_complete() && point_in_polygon(point, &r.points))
    }

    pub fn snapshot(&self) -> Vec<RegionSummary> {
        self.regions
            .iter()
            .map(|r| RegionSummary {
                id: r.id,
                name: r.name.clone(),
                point_count: r.points.len(),
                value: r.value,
                complete: r.is_complete(),
            })
            .collect()
    }
}
