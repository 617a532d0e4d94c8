//! Mesh to drawing pipeline.

use orthodraft_dimension::{
    apply_corrections, dedup_and_filter, generate_candidates, optimize_dimensions, place_dimensions,
    CandidateKind, Correction, CorrectionReport, Dimension, Unit,
};
use orthodraft_drafting::{
    cluster_planar_faces, extract_edges, face_normals, project_edges, select_datums, summarize_features, DatumFeature,
    FeatureSummary, Point2D, ProjectedView, ViewDirection,
};
use orthodraft_mesh::{BoundingBox3, TriangleMesh};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assist::TitleBlock;
use crate::config::DrawingConfig;
use crate::error::Result;

/// One projected view plus where its datum symbol goes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDrawing {
    /// Classified edges, circles, bounds, and scale.
    pub projection: ProjectedView,
    /// Primary datum symbol position in drawing units.
    pub datum_anchor: Option<Point2D>,
}

/// A complete dimensioned drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Drawing {
    /// Views in the requested order.
    pub views: Vec<ViewDrawing>,
    /// Datum reference frame (up to three).
    pub datums: Vec<DatumFeature>,
    /// Final dimensions across all views.
    pub dimensions: Vec<Dimension>,
    /// Holes, fillets, chamfers and surface count.
    #[serde(default)]
    pub features: FeatureSummary,
    /// Drawing unit.
    pub unit: Unit,
    /// Free-text drawing notes.
    #[serde(default)]
    pub notes: Vec<String>,
    /// Title block, when one has been supplied.
    #[serde(default)]
    pub title_block: Option<TitleBlock>,
}

impl Drawing {
    /// View drawing for a direction, if it was requested.
    pub fn view(&self, view: ViewDirection) -> Option<&ViewDrawing> {
        self.views.iter().find(|v| v.projection.view == view)
    }

    /// Dimensions belonging to one view.
    pub fn dimensions_in(&self, view: ViewDirection) -> impl Iterator<Item = &Dimension> {
        self.dimensions.iter().filter(move |d| d.view == view)
    }

    /// Apply external corrections to the dimensions.
    pub fn apply_corrections(&mut self, corrections: &[Correction]) -> CorrectionReport {
        apply_corrections(&mut self.dimensions, corrections)
    }

    /// Serialize to pretty JSON for the renderer.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Per-view output before the cross-view filter.
struct ViewResult {
    drawing: ViewDrawing,
    dimensions: Vec<Dimension>,
}

/// Generate a dimensioned drawing.
///
/// The edge graph and datum frame are computed once; views are projected,
/// dimensioned, and laid out in parallel and reassembled in request order.
/// With a fixed `config.layout.seed` the output is deterministic: view `i`
/// uses `seed + i`.
///
/// Empty or degenerate meshes produce a drawing with empty views and no
/// dimensions.
pub fn generate_drawing(mesh: &TriangleMesh, bbox: &BoundingBox3, config: &DrawingConfig) -> Result<Drawing> {
    config.validate()?;

    let edges = extract_edges(mesh, config.drafting.key_precision);
    let normals = face_normals(mesh);

    let faces = cluster_planar_faces(mesh, &config.drafting);
    let datums = select_datums(&faces, config.drafting.datum_perpendicular_tolerance);

    let results: Vec<ViewResult> = config
        .views
        .par_iter()
        .enumerate()
        .map(|(i, &view)| {
            let projection = project_edges(&edges, &normals, view, &config.drafting);
            let candidates = generate_candidates(&projection, bbox, &datums, &config.candidates);
            let datum_anchor = candidates
                .iter()
                .find(|c| c.kind == CandidateKind::DatumReference)
                .map(|c| c.anchor.start.scaled(projection.scale));

            let mut dimensions = place_dimensions(&candidates, &projection, config.unit, &config.placement);
            let seed = config.layout.seed.map(|s| s.wrapping_add(i as u64));
            optimize_dimensions(
                &mut dimensions,
                &projection.scaled_bounds(),
                &config.placement,
                &config.layout,
                seed,
            );

            ViewResult {
                drawing: ViewDrawing {
                    projection,
                    datum_anchor,
                },
                dimensions,
            }
        })
        .collect();

    let mut views = Vec::with_capacity(results.len());
    let mut dimensions = Vec::new();
    for result in results {
        views.push(result.drawing);
        dimensions.extend(result.dimensions);
    }
    let dimensions = dedup_and_filter(dimensions, &config.filter);
    let features = summarize_features(
        &edges,
        &normals,
        &faces,
        views.iter().map(|v| &v.projection),
        &config.drafting,
    );

    tracing::info!(
        triangles = mesh.num_triangles(),
        edges = edges.len(),
        views = views.len(),
        datums = datums.len(),
        dimensions = dimensions.len(),
        "generated drawing"
    );

    Ok(Drawing {
        views,
        datums,
        dimensions,
        features,
        unit: config.unit,
        notes: Vec::new(),
        title_block: None,
    })
}
