//! Injected mesh import.
//!
//! File parsing lives outside this crate. The caller constructs an importer
//! once (for example around a CAD kernel handle) and hands it to a
//! [`DrawingGenerator`]; nothing is initialized behind the caller's back.

use orthodraft_mesh::{BoundingBox3, TriangleMesh};

use crate::config::DrawingConfig;
use crate::error::{DrawingError, Result};
use crate::pipeline::{generate_drawing, Drawing};

/// Converts raw model bytes into a triangle mesh.
pub trait MeshImporter: Send + Sync {
    /// Importer-specific failure.
    type Error: std::fmt::Display;

    /// Tessellate `data` into a mesh.
    fn import(&self, data: &[u8]) -> std::result::Result<TriangleMesh, Self::Error>;
}

/// Importer for data that is already a JSON-encoded [`TriangleMesh`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMeshImporter;

impl MeshImporter for JsonMeshImporter {
    type Error = serde_json::Error;

    fn import(&self, data: &[u8]) -> std::result::Result<TriangleMesh, Self::Error> {
        serde_json::from_slice(data)
    }
}

/// Pipeline entry point that owns its importer and configuration.
#[derive(Debug, Clone)]
pub struct DrawingGenerator<I> {
    importer: I,
    config: DrawingConfig,
}

impl<I: MeshImporter> DrawingGenerator<I> {
    /// Create a generator, validating `config` up front.
    pub fn new(importer: I, config: DrawingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { importer, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &DrawingConfig {
        &self.config
    }

    /// Generate a drawing for an already imported mesh.
    ///
    /// The bounding box is computed from the mesh; an empty mesh yields an
    /// empty drawing.
    pub fn generate(&self, mesh: &TriangleMesh) -> Result<Drawing> {
        let bbox = BoundingBox3::from_mesh(mesh).unwrap_or_default();
        generate_drawing(mesh, &bbox, &self.config)
    }

    /// Import `data` with the injected importer, then generate.
    pub fn generate_from_bytes(&self, data: &[u8]) -> Result<Drawing> {
        let mesh = self
            .importer
            .import(data)
            .map_err(|e| DrawingError::Import(e.to_string()))?;
        tracing::debug!(
            bytes = data.len(),
            vertices = mesh.num_vertices(),
            triangles = mesh.num_triangles(),
            "imported mesh"
        );
        self.generate(&mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orthodraft_math::Point3;

    struct FailingImporter;

    impl MeshImporter for FailingImporter {
        type Error = String;

        fn import(&self, _data: &[u8]) -> std::result::Result<TriangleMesh, Self::Error> {
            Err("unsupported format".into())
        }
    }

    #[test]
    fn test_json_importer_round_trip() {
        let mesh = TriangleMesh::axis_aligned_box(Point3::origin(), Point3::new(1.0, 2.0, 3.0));
        let bytes = serde_json::to_vec(&mesh).unwrap();
        let generator = DrawingGenerator::new(JsonMeshImporter, DrawingConfig::default()).unwrap();
        let drawing = generator.generate_from_bytes(&bytes).unwrap();
        assert_eq!(drawing.views.len(), 3);
        assert!(!drawing.dimensions.is_empty());
    }

    #[test]
    fn test_import_failure_is_reported() {
        let generator = DrawingGenerator::new(FailingImporter, DrawingConfig::default()).unwrap();
        let err = generator.generate_from_bytes(b"solid").unwrap_err();
        assert!(matches!(err, DrawingError::Import(ref msg) if msg == "unsupported format"));
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = DrawingConfig::default();
        config.filter.max_per_view = 0;
        assert!(DrawingGenerator::new(JsonMeshImporter, config).is_err());
    }

    #[test]
    fn test_empty_mesh_gives_empty_drawing() {
        let generator = DrawingGenerator::new(JsonMeshImporter, DrawingConfig::default()).unwrap();
        let drawing = generator.generate(&TriangleMesh::new()).unwrap();
        assert!(drawing.dimensions.is_empty());
        assert!(drawing.datums.is_empty());
        assert!(drawing.views.iter().all(|v| v.projection.is_empty()));
    }
}
