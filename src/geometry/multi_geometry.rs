use std::cmp::Ordering;

use crate::error::Result;
use crate::math::ords::sanitize_accuracy;

use super::{Geometry, Rectangle, RectangleBuilder};

/// A heterogeneous collection of geometries.
///
/// May be empty; an empty collection has no bounds and relates to
/// everything as disjoint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiGeometry {
    members: Vec<Geometry>,
}

impl MultiGeometry {
    #[must_use]
    pub fn new(members: Vec<Geometry>) -> Self {
        Self { members }
    }

    #[must_use]
    pub fn members(&self) -> &[Geometry] {
        &self.members
    }

    #[must_use]
    pub fn into_members(self) -> Vec<Geometry> {
        self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Expands nested aggregates so that only primitive members remain.
    #[must_use]
    pub fn flatten(&self) -> MultiGeometry {
        let mut out = Vec::with_capacity(self.members.len());
        for member in &self.members {
            flatten_into(member, &mut out);
        }
        MultiGeometry { members: out }
    }

    /// Union of the member bounds; members without bounds are skipped.
    #[must_use]
    pub fn bounds(&self) -> Option<Rectangle> {
        let mut builder = RectangleBuilder::new();
        for bounds in self.members.iter().filter_map(Geometry::bounds) {
            builder.union_rectangle(&bounds);
        }
        builder.build()
    }

    /// Sum of the member areas; puntal and lineal members add nothing.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.members.iter().map(Geometry::area).sum()
    }

    #[must_use]
    pub fn is_valid(&self, accuracy: f64) -> bool {
        self.members.iter().all(|m| m.is_valid(accuracy))
    }

    /// Flattens, normalizes every member and sorts members by bounds.
    /// A single member is returned bare.
    #[must_use]
    pub fn normalize(&self) -> Geometry {
        let mut members: Vec<Geometry> = self
            .flatten()
            .members
            .iter()
            .map(Geometry::normalize)
            .collect();
        if members.len() == 1 {
            return members.remove(0);
        }
        members.sort_by(compare_members);
        Geometry::MultiGeometry(MultiGeometry { members })
    }

    /// Generalizes every member. A collection whose bounds collapse under
    /// `accuracy` becomes its centroid.
    #[must_use]
    pub fn generalize(&self, accuracy: f64) -> Geometry {
        let accuracy = sanitize_accuracy(accuracy);
        match self.bounds() {
            None => Geometry::MultiGeometry(self.clone()),
            Some(bounds) if bounds.is_collapsible(accuracy) => Geometry::Point(bounds.centroid()),
            Some(_) => Geometry::MultiGeometry(MultiGeometry {
                members: self
                    .members
                    .iter()
                    .map(|m| m.generalize(accuracy))
                    .collect(),
            }),
        }
    }

    /// Applies a coordinate mapping to every member.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a member.
    pub fn transform<F>(&self, mapper: F) -> Result<MultiGeometry>
    where
        F: Fn(f64, f64) -> (f64, f64),
    {
        self.transform_with(&mapper)
    }

    pub(crate) fn transform_with(
        &self,
        mapper: &dyn Fn(f64, f64) -> (f64, f64),
    ) -> Result<MultiGeometry> {
        let members = self
            .members
            .iter()
            .map(|m| m.transform_with(mapper))
            .collect::<Result<Vec<_>>>()?;
        Ok(MultiGeometry { members })
    }
}

impl From<Vec<Geometry>> for MultiGeometry {
    fn from(members: Vec<Geometry>) -> Self {
        Self::new(members)
    }
}

impl FromIterator<Geometry> for MultiGeometry {
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn flatten_into(g: &Geometry, out: &mut Vec<Geometry>) {
    match g {
        Geometry::MultiGeometry(m) => {
            for member in &m.members {
                flatten_into(member, out);
            }
        }
        Geometry::MultiPoint(mp) => out.extend(mp.iter().map(Geometry::Point)),
        other => out.push(other.clone()),
    }
}

/// Members order by bounds; members without bounds sort last.
fn compare_members(a: &Geometry, b: &Geometry) -> Ordering {
    match (a.bounds(), b.bounds()) {
        (Some(ra), Some(rb)) => ra
            .compare(&rb)
            .then_with(|| a.kind_rank().cmp(&b.kind_rank())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
