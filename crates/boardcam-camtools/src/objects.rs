//! The CAM object collection.
//!
//! Objects are the units the application works on: an imported copper layer,
//! a drill pattern, or a derived geometry. This module is the registry that
//! CAM operations resolve source objects from and register derived objects
//! into. Names are unique within a collection.

use crate::error::{CamToolError, CamToolResult};
use boardcam_geometry::{Bounds, Geometry, GeometryResult, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What produced an object, which also constrains the operations that
/// accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Copper layer geometry (imported from Gerber).
    Gerber,
    /// Drill pattern (imported from Excellon).
    Excellon,
    /// Derived or hand-built geometry.
    Geometry,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Gerber => write!(f, "Gerber"),
            ObjectKind::Excellon => write!(f, "Excellon"),
            ObjectKind::Geometry => write!(f, "Geometry"),
        }
    }
}

/// A named CAM object carrying solid geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamObject {
    pub name: String,
    pub kind: ObjectKind,
    /// Multi-geometry objects carry independent per-tool toolpaths and are
    /// rejected by the cutout planner.
    pub multigeo: bool,
    pub solid_geometry: Geometry,
}

impl CamObject {
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            multigeo: false,
            solid_geometry: Geometry::new(),
        }
    }

    /// Bounding box of the object's solid geometry.
    pub fn bounds(&self) -> GeometryResult<Bounds> {
        self.solid_geometry.bounds()
    }

    /// In-place boolean difference with a closed polygon.
    pub fn subtract_polygon(&mut self, points: &[Point]) -> GeometryResult<()> {
        self.solid_geometry.subtract_polygon(points)
    }
}

/// Registry of CAM objects, keyed by unique name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectCollection {
    objects: Vec<CamObject>,
}

impl ObjectCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an existing object. Fails on a duplicate name.
    pub fn add(&mut self, object: CamObject) -> CamToolResult<()> {
        if self.get_by_name(&object.name).is_some() {
            return Err(CamToolError::DuplicateName { name: object.name });
        }
        self.objects.push(object);
        Ok(())
    }

    /// Creates and registers a new object whose geometry is populated by the
    /// initializer, then returns a reference to it.
    pub fn new_object<F>(
        &mut self,
        kind: ObjectKind,
        name: &str,
        init: F,
    ) -> CamToolResult<&CamObject>
    where
        F: FnOnce(&mut CamObject) -> GeometryResult<()>,
    {
        if self.get_by_name(name).is_some() {
            return Err(CamToolError::DuplicateName {
                name: name.to_string(),
            });
        }
        let mut object = CamObject::new(name, kind);
        init(&mut object)?;
        self.objects.push(object);
        Ok(self.objects.last().expect("just pushed"))
    }

    pub fn get_by_name(&self, name: &str) -> Option<&CamObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn get_by_name_mut(&mut self, name: &str) -> Option<&mut CamObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Renames an object, keeping names unique.
    pub fn rename(&mut self, name: &str, new_name: &str) -> CamToolResult<()> {
        if name == new_name {
            return Ok(());
        }
        if self.get_by_name(new_name).is_some() {
            return Err(CamToolError::DuplicateName {
                name: new_name.to_string(),
            });
        }
        let object = self
            .get_by_name_mut(name)
            .ok_or_else(|| CamToolError::ObjectNotFound {
                name: name.to_string(),
            })?;
        object.name = new_name.to_string();
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.objects.iter().map(|o| o.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardcam_geometry::Polygon;

    #[test]
    fn test_add_and_resolve() {
        let mut collection = ObjectCollection::new();
        collection
            .add(CamObject::new("board", ObjectKind::Gerber))
            .unwrap();
        assert!(collection.get_by_name("board").is_some());
        assert!(collection.get_by_name("missing").is_none());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut collection = ObjectCollection::new();
        collection
            .add(CamObject::new("board", ObjectKind::Gerber))
            .unwrap();
        let err = collection
            .add(CamObject::new("board", ObjectKind::Geometry))
            .unwrap_err();
        assert!(matches!(err, CamToolError::DuplicateName { .. }));
    }

    #[test]
    fn test_new_object_runs_initializer() {
        let mut collection = ObjectCollection::new();
        let created = collection
            .new_object(ObjectKind::Geometry, "outline", |obj| {
                obj.solid_geometry =
                    Geometry::from_polygon(Polygon::rectangle(0.0, 0.0, 10.0, 10.0));
                Ok(())
            })
            .unwrap();
        assert_eq!(created.name, "outline");
        let b = collection.get_by_name("outline").unwrap().bounds().unwrap();
        assert_eq!(b.as_tuple(), (0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_rename_checks_collisions() {
        let mut collection = ObjectCollection::new();
        collection
            .add(CamObject::new("a", ObjectKind::Geometry))
            .unwrap();
        collection
            .add(CamObject::new("b", ObjectKind::Geometry))
            .unwrap();
        assert!(matches!(
            collection.rename("a", "b"),
            Err(CamToolError::DuplicateName { .. })
        ));
        collection.rename("a", "a_cutout").unwrap();
        assert!(collection.get_by_name("a_cutout").is_some());
        assert!(collection.get_by_name("a").is_none());
    }
}
